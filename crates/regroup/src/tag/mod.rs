//! Field tag parsing.
//!
//! A tag is the string given to `#[regroup("...")]`:
//!
//! ```text
//! <group>[,<option>[,<option>...]]
//! ```
//!
//! The first segment names the capture group. The rest are options, either
//! a [`Keyword`] (matched case-insensitively) or, on temporal fields, a
//! timestamp layout taken verbatim.

/// Option keywords with a fixed meaning on any field.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Keyword {
    /// An empty capture is an error instead of leaving the field untouched.
    Required,
    /// The field becomes `true` iff the group captured something.
    Exists,
}

impl Keyword {
    pub const ALL: [Keyword; 2] = [Keyword::Required, Keyword::Exists];

    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::Required => "required",
            Keyword::Exists => "exists",
        }
    }

    /// Recognize an option token as a keyword.
    pub fn from_option(option: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|keyword| option.eq_ignore_ascii_case(keyword.as_str()))
    }
}

/// A parsed field tag.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Tag<'a> {
    group: &'a str,
    options: Vec<&'a str>,
}

impl<'a> Tag<'a> {
    /// Split a raw tag into its group name and trimmed options.
    ///
    /// An empty tag yields an empty group and no options, meaning the field
    /// is not bound.
    pub fn parse(raw: &'a str) -> Self {
        if raw.is_empty() {
            return Tag::default();
        }
        let mut segments = raw.split(',').map(str::trim);
        let group = segments.next().unwrap_or_default();
        Tag {
            group,
            options: segments.collect(),
        }
    }

    /// The bound group name, or `None` for an unbound field.
    pub fn group(&self) -> Option<&'a str> {
        (!self.group.is_empty()).then_some(self.group)
    }

    /// Options in declaration order.
    pub fn options(&self) -> &[&'a str] {
        &self.options
    }

    pub fn has(&self, keyword: Keyword) -> bool {
        self.options
            .iter()
            .any(|option| Keyword::from_option(option) == Some(keyword))
    }

    /// The layout option of a temporal field.
    ///
    /// Keywords take precedence: the first option that is not a keyword is
    /// the layout. A layout spelled like a keyword can therefore never be
    /// expressed; callers that hit this need a `%`-style layout instead.
    pub fn layout(&self) -> Option<&'a str> {
        self.options
            .iter()
            .copied()
            .find(|option| !option.is_empty() && Keyword::from_option(option).is_none())
    }
}
