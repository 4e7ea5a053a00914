//! Error taxonomy for compiling, matching and binding.
//!
//! Every failure surfaces as one [`Error`] variant carrying the group and
//! field it concerns, so callers match on variants instead of probing
//! runtime types. Conversion failures keep the underlying parse error as
//! their [`std::error::Error::source`].

use std::num::{ParseFloatError, ParseIntError};

/// Errors returned by [`ReGroup`](crate::ReGroup) operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The pattern engine rejected the expression.
    #[error("compilation error: {0}")]
    Compile(#[from] regex::Error),

    /// The expression matched nothing in the input.
    #[error("no match found for given string")]
    NoMatch,

    /// The target is not a record type.
    #[error("expected struct pointer, got `{type_name}`")]
    NotARecord { type_name: &'static str },

    /// A field names a capture group the expression does not declare.
    #[error("group \"{group}\" haven't found in regex")]
    UnknownGroup { group: &'static str },

    /// A `required` field's group captured the empty string.
    #[error("required regroup \"{group}\" is empty for field \"{field}\"")]
    RequiredGroupEmpty {
        group: &'static str,
        field: &'static str,
    },

    /// A field behind an `Option` is `None`; the binder never allocates it.
    #[error("can't set value to nil pointer in field: {field}")]
    NilOptionalField { field: &'static str },

    /// No converter is registered for the field's type.
    #[error("type \"{type_name}\" is not parsable (field \"{field}\")")]
    TypeNotConvertible {
        type_name: &'static str,
        field: &'static str,
    },

    /// The registered converter rejected the captured text.
    #[error("error parsing group \"{group}\": {source}")]
    Conversion {
        group: &'static str,
        #[source]
        source: ConvertError,
    },
}

/// Why a captured string could not be converted into a field value.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConvertError {
    #[error(transparent)]
    Int(#[from] ParseIntError),

    #[error(transparent)]
    Float(#[from] ParseFloatError),

    #[error("invalid syntax for bool: {value:?}")]
    Bool { value: String },

    #[error(transparent)]
    Duration(#[from] DurationError),

    #[error(transparent)]
    Timestamp(#[from] chrono::ParseError),

    /// The converter was registered for a different type than the slot holds.
    #[error("converter output does not fit a `{expected}` slot")]
    SlotMismatch { expected: &'static str },
}

/// Malformed duration strings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DurationError {
    #[error("invalid duration {input:?}")]
    Invalid { input: String },

    #[error("missing unit in duration {input:?}")]
    MissingUnit { input: String },

    #[error("unknown unit {unit:?} in duration {input:?}")]
    UnknownUnit { unit: String, input: String },

    #[error("duration {input:?} overflows 64-bit nanoseconds")]
    Overflow { input: String },

    #[error("negative duration {input:?} does not fit an unsigned duration")]
    Negative { input: String },
}
