//! The per-field state machine.

use crate::convert::Registry;
use crate::error::Error;
use crate::table::GroupTable;
use crate::tag::Keyword;

use super::{FieldDescriptor, Fill, Shape, Slot, ValueSlot};

/// Everything a fill reads: the match's group table and the converters.
///
/// Nested records are filled with the same context; there is no scoping of
/// group names per nesting level.
#[derive(Copy, Clone, Debug)]
pub struct Context<'a> {
    table: &'a GroupTable<'a>,
    registry: &'a Registry,
}

impl<'a> Context<'a> {
    pub fn new(table: &'a GroupTable<'a>, registry: &'a Registry) -> Self {
        Context { table, registry }
    }

    pub fn table(&self) -> &'a GroupTable<'a> {
        self.table
    }

    pub fn registry(&self) -> &'a Registry {
        self.registry
    }

    /// Fill a record from this context.
    pub fn fill(&self, record: &mut dyn Fill) -> Result<(), Error> {
        record.fill(self)
    }

    /// Bind one field.
    ///
    /// Allocated optional wrappers are unwrapped and the inner slot bound.
    /// An unallocated wrapper is an error when it holds a record or the
    /// field is tagged, and skipped otherwise. Records recurse into
    /// [`Fill::fill`]; values go through [`Context::bind_value`].
    pub fn bind_field(&self, slot: Slot<'_>, field: &FieldDescriptor) -> Result<(), Error> {
        match slot {
            Slot::Some(inner) => self.bind_field(*inner, field),
            Slot::None(Shape::Value) if !field.is_tagged() => Ok(()),
            Slot::None(_) => {
                tracing::debug!(field = field.name, "optional field is not allocated");
                Err(Error::NilOptionalField { field: field.name })
            }
            Slot::Record(record) => record.fill(self),
            Slot::Value(value) => self.bind_value(value, field),
        }
    }

    /// Bind a scalar or timestamp field from its tag.
    ///
    /// - untagged: nothing to do
    /// - group missing from the expression: [`Error::UnknownGroup`]
    /// - `exists`: the field becomes whether the capture is non-empty
    /// - empty capture: [`Error::RequiredGroupEmpty`] if `required`,
    ///   otherwise the field keeps its value
    /// - otherwise: convert through the registry
    pub fn bind_value(&self, mut slot: ValueSlot<'_>, field: &FieldDescriptor) -> Result<(), Error> {
        let tag = field.tag();
        let Some(group) = tag.group() else {
            return Ok(());
        };
        let captured = self
            .table
            .get(group)
            .ok_or(Error::UnknownGroup { group })?;

        if tag.has(Keyword::Exists) {
            let type_name = slot.type_name();
            let flag = slot
                .value_mut()
                .downcast_mut::<bool>()
                .ok_or(Error::TypeNotConvertible {
                    type_name,
                    field: field.name,
                })?;
            *flag = !captured.is_empty();
            tracing::trace!(field = field.name, group, exists = *flag, "bound existence flag");
            return Ok(());
        }

        if captured.is_empty() {
            if tag.has(Keyword::Required) {
                return Err(Error::RequiredGroupEmpty {
                    group,
                    field: field.name,
                });
            }
            return Ok(());
        }

        let converter = self
            .registry
            .get(slot.type_id())
            .ok_or(Error::TypeNotConvertible {
                type_name: slot.type_name(),
                field: field.name,
            })?;
        converter
            .convert(captured, &tag, slot.value_mut())
            .map_err(|source| Error::Conversion { group, source })?;
        tracing::trace!(field = field.name, group, captured, "bound field");
        Ok(())
    }
}
