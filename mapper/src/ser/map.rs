//! Maps.
//!
//! A map is serialized as a blank node typed with the class URL of the map,
//! linked to one blank node per entry through `bean:entry`.
//! Each entry carries its key (`bean:key`) and its value (`bean:value`),
//! so that literal keys can be attached to a subject.
use super::*;
use crate::descriptor::TypeKind;
use rdfbean_term::ns::{bean, rdf};

/// Serializes maps.
#[derive(Clone, Copy, Debug, Default)]
pub struct MapSerializer;

impl Serializer for MapSerializer {
    fn name(&self) -> &'static str {
        "map"
    }

    fn accept(&self, ty: &TypeDescriptor, _: &Annotations) -> bool {
        matches!(ty.kind(), TypeKind::Map { .. })
    }

    fn is_complex(&self, _: &Annotations) -> bool {
        true
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
        let entries = entries(value, ty)?;
        let id = current_identifier(self, mgr, ctx, value, ty, ann, sink)?;
        mgr.emit(sink, &id, rdf::type_, &Identifier::resource(ty.class_url()))?;
        write_entries(mgr, ctx, &id, &entries, sink)?;
        Ok(id)
    }
}

/// Serializes static maps.
///
/// The entries are attached to the [static identifier](static_identifier),
/// once per context.
#[derive(Clone, Copy, Debug, Default)]
pub struct StaticMapSerializer;

impl Serializer for StaticMapSerializer {
    fn name(&self) -> &'static str {
        "static map"
    }

    fn accept(&self, ty: &TypeDescriptor, ann: &Annotations) -> bool {
        matches!(ty.kind(), TypeKind::Map { .. }) && is_static(ty, ann)
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
        let entries = entries(value, ty)?;
        let id = current_identifier(self, mgr, ctx, value, ty, ann, sink)?;
        if ctx.mark_static(&id) {
            write_entries(mgr, ctx, &id, &entries, sink)?;
        }
        Ok(id)
    }
}

/// Emit the entries of the map `id`.
///
/// Null keys or values get no triple.
pub fn write_entries(
    mgr: &SerializationManager,
    ctx: &mut SerializationContext,
    id: &Identifier,
    entries: &[(Value, Value)],
    sink: &mut dyn TripleSink,
) -> Result<(), SerializationError> {
    for (key, value) in entries {
        let entry = mgr.emit_blank(sink, id, bean::entry)?;
        let key_id = mgr.serialize(ctx, key, &Annotations::none(), sink)?;
        if !key_id.is_null() {
            mgr.emit(sink, &entry, bean::key, &key_id)?;
        }
        let value_id = mgr.serialize(ctx, value, &Annotations::none(), sink)?;
        if !value_id.is_null() {
            mgr.emit(sink, &entry, bean::value, &value_id)?;
        }
    }
    Ok(())
}

fn entries(value: &Value, ty: &TypeDescriptor) -> Result<Vec<(Value, Value)>, SerializationError> {
    expect_object(value, ty, "map")?
        .entries()
        .ok_or_else(|| SerializationError::InvalidObject {
            type_name: ty.name().to_string(),
            expected: "map",
        })
}
