//! Bind named regex capture groups to struct fields.
//!
//! Fields declare the group they read with `#[regroup("...")]`; the value is
//! converted to the field's type and written in place.
//!
//! ```text
//! #[derive(Regroup, Default)]
//! struct Entry {
//!     #[regroup("duration")]
//!     duration: std::time::Duration,
//!     #[regroup("num,required")]
//!     num: u32,
//!     #[regroup("flag,exists")]
//!     flagged: bool,
//!     #[regroup("ts,2006-01-02")]
//!     day: Option<chrono::NaiveDate>,
//!     nested: Inner,
//!     #[regroup(skip)]
//!     cache: Vec<u8>,
//! }
//!
//! let re = ReGroup::compile(r"(?P<duration>\S+)\s+(?P<num>\d+)")?;
//! let mut entry = Entry::default();
//! re.match_to_target("5s 123", &mut entry)?;
//! ```
//!
//! # Tags
//!
//! `"<group>[,<option>...]"`. Options are `required` (an empty capture is an
//! error), `exists` (the `bool` field records whether the group captured
//! anything) and, on timestamp fields, a layout such as `2006-01-02` or
//! `%d/%m/%Y`. Without a layout timestamps are RFC 3339.
//!
//! # Optional fields
//!
//! `Option` fields are never allocated by the binder. A `None` field that
//! would be written, or that holds a record, fails with
//! [`Error::NilOptionalField`]; allocate it before binding. For
//! [`ReGroup::match_all_to_target`] the prototype decides which optional
//! fields every result gets.
//!
//! # Field types
//!
//! Integers, floats, `bool`, `String`, `std::time::Duration`,
//! `chrono::TimeDelta`, the chrono date/time types, `Option` and `Box` of
//! those, and nested `#[derive(Regroup)]` records. Further value types are
//! declared with [`bind_value!`] and given a converter in a [`Registry`].

#[cfg(test)]
extern crate self as regroup;

pub mod bind;
pub mod convert;
pub mod error;
mod matcher;
pub mod tag;
pub mod table;

pub use bind::{Bind, Context, FieldDescriptor, Fill, Shape, Slot, ValueSlot};
pub use convert::{Layout, Registry};
pub use error::{ConvertError, DurationError, Error};
pub use matcher::ReGroup;
pub use regroup_macros::Regroup;
pub use table::GroupTable;
pub use tag::{Keyword, Tag};
