//! Collections and arrays.
//!
//! A sequence is serialized as a blank node typed with the class URL of the sequence,
//! linked to one blank node per element through `bean:member`.
//! Each member carries the position of the element (`bean:index`, see [`member_index`])
//! and, unless the element is null, its value (`bean:value`),
//! so that the order of the elements can be recovered from the index triples alone.
//!
//! When the owning property has an explicit predicate,
//! each element is instead linked directly to the owner through that predicate.
use super::*;
use crate::descriptor::TypeKind;
use rdfbean_term::ns::{bean, rdf};

/// Serializes collections or arrays.
#[derive(Clone, Copy, Debug)]
pub struct SequenceSerializer {
    array: bool,
}

impl SequenceSerializer {
    /// The serializer of growable collections.
    pub fn collection() -> Self {
        SequenceSerializer { array: false }
    }

    /// The serializer of arrays.
    pub fn array() -> Self {
        SequenceSerializer { array: true }
    }
}

impl Serializer for SequenceSerializer {
    fn name(&self) -> &'static str {
        if self.array {
            "array"
        } else {
            "collection"
        }
    }

    fn accept(&self, ty: &TypeDescriptor, _: &Annotations) -> bool {
        match ty.kind() {
            TypeKind::Collection { .. } => !self.array,
            TypeKind::Array { .. } => self.array,
            _ => false,
        }
    }

    fn is_complex(&self, ann: &Annotations) -> bool {
        !ann.is_property_form()
    }

    fn identifier(
        &self,
        mgr: &SerializationManager,
        _: &mut SerializationContext,
        _: &Value,
        _: &TypeDescriptor,
        _: &Annotations,
        sink: &mut dyn TripleSink,
    ) -> Result<Identifier, SerializationError> {
        Ok(mgr.fresh_blank(sink))
    }

    fn serialize(
        &self,
        mgr: &SerializationManager,
        ctx: &mut SerializationContext,
        value: &Value,
        ty: &TypeDescriptor,
        ann: &Annotations,
        sink: &mut dyn TripleSink,
    ) -> Result<Identifier, SerializationError> {
        let items = items(value, ty)?;
        if let (true, Some(owner), Some(url)) =
            (is_property_form(ty, ann), &ann.owner, &ann.property_url)
        {
            for item in &items {
                let item_id = mgr.serialize(ctx, item, &Annotations::none(), sink)?;
                if !item_id.is_null() {
                    mgr.emit(sink, owner, url, &item_id)?;
                }
            }
            return Ok(Identifier::null());
        }
        let id = current_identifier(self, mgr, ctx, value, ty, ann, sink)?;
        mgr.emit(sink, &id, rdf::type_, &Identifier::resource(ty.class_url()))?;
        write_members(mgr, ctx, &id, &items, sink)?;
        Ok(id)
    }
}

/// Serializes static collections and arrays.
///
/// The elements are attached to the [static identifier](static_identifier),
/// once per context.
#[derive(Clone, Copy, Debug, Default)]
pub struct StaticSequenceSerializer;

impl Serializer for StaticSequenceSerializer {
    fn name(&self) -> &'static str {
        "static collection"
    }

    fn accept(&self, ty: &TypeDescriptor, ann: &Annotations) -> bool {
        ty.is_sequence() && is_static(ty, ann)
    }

    fn is_complex(&self, _: &Annotations) -> bool {
        true
    }

    fn identifier(
        &self,
        _: &SerializationManager,
        _: &mut SerializationContext,
        _: &Value,
        ty: &TypeDescriptor,
        ann: &Annotations,
        _: &mut dyn TripleSink,
    ) -> Result<Identifier, SerializationError> {
        Ok(static_identifier(ty, ann))
    }

    fn serialize(
        &self,
        mgr: &SerializationManager,
        ctx: &mut SerializationContext,
        value: &Value,
        ty: &TypeDescriptor,
        ann: &Annotations,
        sink: &mut dyn TripleSink,
    ) -> Result<Identifier, SerializationError> {
        let items = items(value, ty)?;
        let id = current_identifier(self, mgr, ctx, value, ty, ann, sink)?;
        if ctx.mark_static(&id) {
            write_members(mgr, ctx, &id, &items, sink)?;
        }
        Ok(id)
    }
}

/// Emit the indexed members of the sequence `id`.
pub fn write_members(
    mgr: &SerializationManager,
    ctx: &mut SerializationContext,
    id: &Identifier,
    items: &[Value],
    sink: &mut dyn TripleSink,
) -> Result<(), SerializationError> {
    for (i, item) in items.iter().enumerate() {
        let member = mgr.emit_blank(sink, id, bean::member)?;
        mgr.emit(sink, &member, bean::index, &member_index(i)?)?;
        let item_id = mgr.serialize(ctx, item, &Annotations::none(), sink)?;
        if !item_id.is_null() {
            mgr.emit(sink, &member, bean::value, &item_id)?;
        }
    }
    Ok(())
}

/// The `bean:index` of the element at `position`:
/// an `xsd:int` when it fits, an `xsd:long` otherwise.
pub fn member_index(position: usize) -> Result<Identifier, SerializationError> {
    if let Ok(i) = i32::try_from(position) {
        return Ok(Identifier::literal(i));
    }
    i64::try_from(position)
        .map(Identifier::literal)
        .map_err(|_| SerializationError::IndexOverflow(position))
}

fn items(value: &Value, ty: &TypeDescriptor) -> Result<Vec<Value>, SerializationError> {
    expect_object(value, ty, "sequence")?
        .items()
        .ok_or_else(|| SerializationError::InvalidObject {
            type_name: ty.name().to_string(),
            expected: "sequence",
        })
}
