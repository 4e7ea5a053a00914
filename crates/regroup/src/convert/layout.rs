//! Timestamp layouts.
//!
//! A layout is written either against the reference time
//! `Mon Jan 2 15:04:05 MST 2006` (e.g. `2006-01-02`, `Jan _2 15:04:05`) or,
//! when it contains a `%`, as a chrono strftime string used verbatim.
//! Reference layouts are translated to strftime once per bind.
//!
//! Parsing resolves to an offset-aware instant. Whatever the layout does not
//! read takes the reference defaults: year 0, January, the 1st, midnight and
//! UTC. A parsed offset always applies, with or without a time of day.

use bitflags::bitflags;
use chrono::format::{ParseResult, Parsed, StrftimeItems};
use chrono::{DateTime, FixedOffset};

bitflags! {
    /// Timestamp fields a layout reads.
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    struct Fields: u16 {
        const YEAR = 1 << 0;
        const MONTH = 1 << 1;
        const DAY = 1 << 2;
        /// Day of year or week-based date; month and day follow from it.
        const ORDINAL = 1 << 3;
        const HOUR = 1 << 4;
        /// 12-hour clock, AM unless a meridiem is read.
        const HOUR12 = 1 << 5;
        const MINUTE = 1 << 6;
        const MERIDIEM = 1 << 7;
        const OFFSET = 1 << 8;
        /// Seconds since the epoch; determines everything else.
        const TIMESTAMP = 1 << 9;

        const DATE = Self::YEAR.bits() | Self::MONTH.bits() | Self::DAY.bits();
        const CLOCK = Self::HOUR.bits() | Self::MINUTE.bits();
    }
}

/// Reference tokens, longest first where one is a prefix of another.
/// Weekdays, seconds and zone names are read but default to nothing.
const REFERENCE_TOKENS: &[(&str, &str, Fields)] = &[
    ("January", "%B", Fields::MONTH),
    ("Jan", "%b", Fields::MONTH),
    ("Monday", "%A", Fields::empty()),
    ("Mon", "%a", Fields::empty()),
    ("MST", "%Z", Fields::empty()),
    ("2006", "%Y", Fields::YEAR),
    ("002", "%j", Fields::ORDINAL),
    ("01", "%m", Fields::MONTH),
    ("02", "%d", Fields::DAY),
    ("03", "%I", Fields::HOUR12),
    ("04", "%M", Fields::MINUTE),
    ("05", "%S", Fields::empty()),
    ("06", "%y", Fields::YEAR),
    ("15", "%H", Fields::HOUR),
    ("1", "%-m", Fields::MONTH),
    ("_2006", "_%Y", Fields::YEAR),
    ("_2", "%e", Fields::DAY),
    ("2", "%-d", Fields::DAY),
    ("3", "%-I", Fields::HOUR12),
    ("4", "%-M", Fields::MINUTE),
    ("5", "%-S", Fields::empty()),
    ("PM", "%p", Fields::MERIDIEM),
    ("pm", "%P", Fields::MERIDIEM),
    ("Z07:00", "%#z", Fields::OFFSET),
    ("Z0700", "%#z", Fields::OFFSET),
    ("Z07", "%#z", Fields::OFFSET),
    ("-07:00", "%#z", Fields::OFFSET),
    ("-0700", "%#z", Fields::OFFSET),
    ("-07", "%#z", Fields::OFFSET),
];

/// A timestamp layout ready for parsing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layout {
    /// strftime form; `None` is RFC 3339.
    format: Option<String>,
    fields: Fields,
}

impl Default for Layout {
    fn default() -> Self {
        Self::rfc3339()
    }
}

impl Layout {
    /// The layout used when a field names none.
    pub fn rfc3339() -> Self {
        Layout {
            format: None,
            fields: Fields::DATE | Fields::CLOCK | Fields::OFFSET,
        }
    }

    /// Resolve a tag's layout option.
    pub fn new(layout: Option<&str>) -> Self {
        match layout {
            None => Self::rfc3339(),
            Some(layout) if layout.contains('%') => Self::strftime(layout),
            Some(layout) => Self::reference(layout),
        }
    }

    /// Translate a reference-time layout.
    pub fn reference(layout: &str) -> Self {
        let mut format = String::with_capacity(layout.len() * 2);
        let mut fields = Fields::empty();
        let mut rest = layout;

        while let Some(c) = rest.chars().next() {
            let matched = REFERENCE_TOKENS
                .iter()
                .find(|(token, _, _)| rest.starts_with(*token))
                .map(|(token, spec, read)| (token.len(), (*spec).to_owned(), *read))
                .or_else(|| fraction_token(rest));

            match matched {
                Some((len, spec, read)) => {
                    format.push_str(&spec);
                    fields |= read;
                    rest = &rest[len..];
                }
                None => {
                    format.push(c);
                    rest = &rest[c.len_utf8()..];
                }
            }
        }

        Layout {
            format: Some(format),
            fields,
        }
    }

    /// Use a chrono strftime layout as is.
    pub fn strftime(format: &str) -> Self {
        Layout {
            format: Some(format.to_owned()),
            fields: strftime_fields(format),
        }
    }

    /// The strftime string, or `None` for RFC 3339.
    pub fn format(&self) -> Option<&str> {
        self.format.as_deref()
    }

    pub fn parse(&self, src: &str) -> Result<DateTime<FixedOffset>, chrono::ParseError> {
        let Some(format) = self.format.as_deref() else {
            return DateTime::parse_from_rfc3339(src);
        };
        let mut parsed = Parsed::new();
        chrono::format::parse(&mut parsed, src, StrftimeItems::new(format))?;
        self.fill_defaults(&mut parsed)?;
        parsed.to_datetime()
    }

    /// Set every field the layout does not read to its reference default.
    fn fill_defaults(&self, parsed: &mut Parsed) -> ParseResult<()> {
        let fields = self.fields;
        if !fields.contains(Fields::OFFSET) {
            parsed.set_offset(0)?;
        }
        if fields.contains(Fields::TIMESTAMP) {
            return Ok(());
        }

        if !fields.contains(Fields::YEAR) {
            parsed.set_year(0)?;
        }
        if !fields.contains(Fields::ORDINAL) {
            if !fields.contains(Fields::MONTH) {
                parsed.set_month(1)?;
            }
            if !fields.contains(Fields::DAY) {
                parsed.set_day(1)?;
            }
        }

        if !fields.intersects(Fields::HOUR | Fields::HOUR12) {
            parsed.set_hour(0)?;
        } else if fields.contains(Fields::HOUR12) && !fields.contains(Fields::MERIDIEM) {
            parsed.set_ampm(false)?;
        }
        if !fields.contains(Fields::MINUTE) {
            parsed.set_minute(0)?;
        }
        Ok(())
    }
}

/// `.000` / `.999` fractional seconds not followed by another digit.
fn fraction_token(rest: &str) -> Option<(usize, String, Fields)> {
    let digits = rest.strip_prefix('.')?;
    let repeated = digits.chars().next().filter(|c| matches!(c, '0' | '9'))?;
    let count = digits.chars().take_while(|c| *c == repeated).count();
    if digits[count..].starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }
    let spec = match (repeated, count) {
        ('0', 3 | 6 | 9) => format!("%.{count}f"),
        _ => "%.f".to_owned(),
    };
    Some((count + 1, spec, Fields::empty()))
}

fn strftime_fields(format: &str) -> Fields {
    let mut fields = Fields::empty();
    let mut chars = format.chars();
    while let Some(c) = chars.next() {
        if c != '%' {
            continue;
        }
        let spec = chars
            .by_ref()
            .find(|c: &char| !matches!(*c, '-' | '_' | '0' | '#' | ':' | '.' | '1'..='9'));
        fields |= match spec {
            Some('Y' | 'C' | 'y') => Fields::YEAR,
            Some('m' | 'b' | 'B' | 'h') => Fields::MONTH,
            Some('d' | 'e') => Fields::DAY,
            Some('j' | 'U' | 'W' | 'V') => Fields::ORDINAL,
            Some('G' | 'g') => Fields::YEAR | Fields::ORDINAL,
            Some('D' | 'F' | 'x' | 'v') => Fields::DATE,
            Some('H' | 'k') => Fields::HOUR,
            Some('I' | 'l') => Fields::HOUR12,
            Some('M') => Fields::MINUTE,
            Some('P' | 'p') => Fields::MERIDIEM,
            Some('T' | 'R' | 'X') => Fields::CLOCK,
            Some('r') => Fields::HOUR12 | Fields::MINUTE | Fields::MERIDIEM,
            Some('c') => Fields::DATE | Fields::CLOCK,
            Some('z') => Fields::OFFSET,
            Some('+') => Fields::DATE | Fields::CLOCK | Fields::OFFSET,
            Some('s') => Fields::TIMESTAMP,
            _ => Fields::empty(),
        };
    }
    fields
}
