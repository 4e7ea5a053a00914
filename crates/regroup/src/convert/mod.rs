//! Conversion registry: captured text to typed field values.
//!
//! Converters are keyed by the field's [`TypeId`] and write straight into
//! the type-erased field. Temporal converters additionally receive the
//! field's [`Layout`].
//!
//! The built-in registry is a process-wide singleton built on first use and
//! never mutated afterwards, so it is shared across threads without
//! locking. A customized registry starts from [`Registry::builtin`] and is
//! handed to [`ReGroup::with_registry`](crate::ReGroup::with_registry)
//! before any matching.

pub mod duration;
pub mod layout;

use std::any::{type_name, Any, TypeId};
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, OnceLock};

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Utc};
use rustc_hash::FxHashMap;

use crate::error::ConvertError;
use crate::tag::Tag;

pub use layout::Layout;

/// Converts a capture and stores it into the field.
pub type ScalarFn = Arc<dyn Fn(&str, &mut dyn Any) -> Result<(), ConvertError> + Send + Sync>;

/// Converts a capture under a timestamp layout and stores it into the field.
pub type TemporalFn =
    Arc<dyn Fn(&str, &Layout, &mut dyn Any) -> Result<(), ConvertError> + Send + Sync>;

/// A registered conversion.
#[derive(Clone)]
pub enum Converter {
    Scalar(ScalarFn),
    Temporal(TemporalFn),
}

impl Converter {
    /// Convert `src` into `slot`, taking the layout from `tag` for temporal
    /// conversions.
    pub fn convert(&self, src: &str, tag: &Tag<'_>, slot: &mut dyn Any) -> Result<(), ConvertError> {
        match self {
            Converter::Scalar(convert) => convert(src, slot),
            Converter::Temporal(convert) => convert(src, &Layout::new(tag.layout()), slot),
        }
    }

    pub fn is_temporal(&self) -> bool {
        matches!(self, Converter::Temporal(_))
    }
}

impl fmt::Debug for Converter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Converter::Scalar(_) => "Converter::Scalar",
            Converter::Temporal(_) => "Converter::Temporal",
        })
    }
}

/// Global registry singleton.
static BUILTIN_REGISTRY: OnceLock<Registry> = OnceLock::new();

/// Registry of converters by field type.
#[derive(Clone, Default)]
pub struct Registry {
    converters: FxHashMap<TypeId, Converter>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Registry {
            converters: FxHashMap::default(),
        }
    }

    /// The shared registry with every built-in converter.
    pub fn global() -> &'static Registry {
        BUILTIN_REGISTRY.get_or_init(|| {
            let mut registry = Registry::new();
            register_builtins(&mut registry);
            registry
        })
    }

    /// An owned copy of the built-ins, open for extension.
    pub fn builtin() -> Self {
        Self::global().clone()
    }

    /// Register a plain conversion for `T`, replacing any previous one.
    pub fn register_scalar<T: Any>(
        &mut self,
        parse: fn(&str) -> Result<T, ConvertError>,
    ) -> &mut Self {
        let convert: ScalarFn =
            Arc::new(move |src: &str, slot: &mut dyn Any| store(slot, parse(src)?));
        self.converters
            .insert(TypeId::of::<T>(), Converter::Scalar(convert));
        self
    }

    /// Register `T` as a timestamp type, narrowed from the parsed instant.
    pub fn register_temporal<T: Any>(
        &mut self,
        narrow: fn(DateTime<FixedOffset>) -> T,
    ) -> &mut Self {
        let convert: TemporalFn =
            Arc::new(move |src: &str, layout: &Layout, slot: &mut dyn Any| {
                store(slot, narrow(layout.parse(src)?))
            });
        self.converters
            .insert(TypeId::of::<T>(), Converter::Temporal(convert));
        self
    }

    pub fn get(&self, ty: TypeId) -> Option<&Converter> {
        self.converters.get(&ty)
    }

    pub fn contains<T: Any>(&self) -> bool {
        self.converters.contains_key(&TypeId::of::<T>())
    }

    pub fn len(&self) -> usize {
        self.converters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.converters.is_empty()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("converters", &self.converters.len())
            .finish()
    }
}

fn store<T: Any>(slot: &mut dyn Any, value: T) -> Result<(), ConvertError> {
    let slot = slot
        .downcast_mut::<T>()
        .ok_or(ConvertError::SlotMismatch {
            expected: type_name::<T>(),
        })?;
    *slot = value;
    Ok(())
}

/// Parse via `FromStr` into the exact declared width.
pub fn parse_from_str<T>(src: &str) -> Result<T, ConvertError>
where
    T: FromStr,
    ConvertError: From<T::Err>,
{
    Ok(src.parse::<T>()?)
}

/// Accepts `1 t T TRUE true True` and `0 f F FALSE false False`.
pub fn parse_bool(src: &str) -> Result<bool, ConvertError> {
    match src {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(ConvertError::Bool {
            value: src.to_owned(),
        }),
    }
}

fn parse_string(src: &str) -> Result<String, ConvertError> {
    Ok(src.to_owned())
}

/// Register all built-in converters.
fn register_builtins(registry: &mut Registry) {
    macro_rules! numbers {
        ($($ty:ty),* $(,)?) => {
            $( registry.register_scalar::<$ty>(parse_from_str::<$ty>); )*
        };
    }

    numbers!(i8, i16, i32, i64, i128, isize);
    numbers!(u8, u16, u32, u64, u128, usize);
    numbers!(f32, f64);

    registry
        .register_scalar::<bool>(parse_bool)
        .register_scalar::<String>(parse_string)
        .register_scalar::<std::time::Duration>(duration::parse_std)
        .register_scalar::<TimeDelta>(duration::parse_delta)
        .register_temporal::<DateTime<FixedOffset>>(|instant| instant)
        .register_temporal::<DateTime<Utc>>(|instant| instant.with_timezone(&Utc))
        .register_temporal::<NaiveDateTime>(|instant| instant.naive_local())
        .register_temporal::<NaiveDate>(|instant| instant.date_naive())
        .register_temporal::<NaiveTime>(|instant| instant.time());
}
