//! Field kinds and the capability traits the derive implements.
//!
//! A record type is walked through two traits:
//!
//! - [`Bind`] is implemented by every type that can sit in a record field.
//!   It exposes the field as a [`Slot`], the view the binder's state machine
//!   dispatches on, and knows how to stamp out a fresh copy of itself for
//!   repeated matches.
//! - [`Fill`] is implemented by record types (via `#[derive(Regroup)]`) and
//!   binds every declared field in order.
//!
//! ```text
//! Slot::Value  : scalar or timestamp, converted through the registry
//! Slot::Record : nested record, filled from the same group table
//! Slot::Some   : allocated optional wrapper, unwrapped one level
//! Slot::None   : unallocated optional wrapper, never auto-allocated
//! ```

mod binder;

use std::any::{type_name, Any, TypeId};

use crate::error::Error;
use crate::tag::Tag;

pub use binder::Context;

/// Whether a field type is a record or a single value.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Shape {
    Value,
    Record,
}

/// A mutable view of one field, classified by kind.
pub enum Slot<'a> {
    Value(ValueSlot<'a>),
    Record(&'a mut dyn Fill),
    Some(Box<Slot<'a>>),
    /// An optional wrapper holding nothing; carries the shape it would hold.
    None(Shape),
}

impl Slot<'_> {
    pub fn shape(&self) -> Shape {
        match self {
            Slot::Value(_) => Shape::Value,
            Slot::Record(_) => Shape::Record,
            Slot::Some(inner) => inner.shape(),
            Slot::None(shape) => *shape,
        }
    }
}

/// A type-erased scalar or timestamp field.
pub struct ValueSlot<'a> {
    value: &'a mut dyn Any,
    type_name: &'static str,
}

impl<'a> ValueSlot<'a> {
    pub fn new<T: Any>(value: &'a mut T) -> Self {
        ValueSlot {
            value,
            type_name: type_name::<T>(),
        }
    }

    pub fn type_id(&self) -> TypeId {
        (*self.value).type_id()
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn value_mut(&mut self) -> &mut dyn Any {
        &mut *self.value
    }
}

/// The static description of one record field.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// The field's identifier.
    pub name: &'static str,
    /// The raw tag, empty for an untagged field.
    pub tag: &'static str,
}

impl FieldDescriptor {
    pub const fn new(name: &'static str, tag: &'static str) -> Self {
        FieldDescriptor { name, tag }
    }

    pub fn tag(&self) -> Tag<'static> {
        Tag::parse(self.tag)
    }

    /// Whether the tag names a group.
    pub fn is_tagged(&self) -> bool {
        self.tag().group().is_some()
    }
}

/// A type that can occupy a record field.
pub trait Bind: Sized {
    const SHAPE: Shape;

    /// View this field for binding.
    fn slot(&mut self) -> Slot<'_>;

    /// A fresh value shaped like `self`, for an independent fill.
    ///
    /// Values reset to their default. Optional wrappers stay `None` when
    /// `None`; when `Some` they wrap a fresh copy of their content.
    #[must_use]
    fn fresh(&self) -> Self;
}

/// A record whose fields can be bound from a group table.
pub trait Fill {
    /// Bind every field in declaration order, stopping at the first error.
    ///
    /// Fields bound before the error keep their new values.
    fn fill(&mut self, cx: &Context<'_>) -> Result<(), Error>;
}

impl<T: Bind> Bind for Option<T> {
    const SHAPE: Shape = T::SHAPE;

    fn slot(&mut self) -> Slot<'_> {
        match self {
            Some(inner) => Slot::Some(Box::new(inner.slot())),
            None => Slot::None(T::SHAPE),
        }
    }

    fn fresh(&self) -> Self {
        self.as_ref().map(Bind::fresh)
    }
}

impl<T: Bind> Bind for Box<T> {
    const SHAPE: Shape = T::SHAPE;

    fn slot(&mut self) -> Slot<'_> {
        (**self).slot()
    }

    fn fresh(&self) -> Self {
        Box::new((**self).fresh())
    }
}

/// Implement [`Bind`] for value types converted through the registry.
///
/// The type must be `Default` and `'static`. Binding a tagged field of such
/// a type fails with [`Error::TypeNotConvertible`] unless the registry in
/// use has a converter for it.
///
/// ```text
/// #[derive(Default)]
/// struct Port(u16);
/// regroup::bind_value!(Port);
/// ```
#[macro_export]
macro_rules! bind_value {
    ($($ty:ty),* $(,)?) => {$(
        impl $crate::Bind for $ty {
            const SHAPE: $crate::Shape = $crate::Shape::Value;

            fn slot(&mut self) -> $crate::Slot<'_> {
                $crate::Slot::Value($crate::ValueSlot::new(self))
            }

            fn fresh(&self) -> Self {
                <$ty as ::core::default::Default>::default()
            }
        }
    )*};
}

bind_value!(i8, i16, i32, i64, i128, isize);
bind_value!(u8, u16, u32, u64, u128, usize);
bind_value!(f32, f64, bool, String);
bind_value!(std::time::Duration, chrono::TimeDelta);
bind_value!(
    chrono::DateTime<chrono::FixedOffset>,
    chrono::DateTime<chrono::Utc>,
    chrono::NaiveDateTime,
    chrono::NaiveDate,
    chrono::NaiveTime,
);

/// Follow allocated optional wrappers down to a record.
pub fn record_slot(slot: Slot<'_>) -> Option<&mut dyn Fill> {
    match slot {
        Slot::Record(record) => Some(record),
        Slot::Some(inner) => record_slot(*inner),
        Slot::Value(_) | Slot::None(_) => None,
    }
}
