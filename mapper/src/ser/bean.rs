//! Beans.
//!
//! A bean is serialized as a resource typed with its class URL,
//! linked to the value of each of its properties through the predicate of the property.
//! Ignored properties, adapter properties and null values produce no triple.
use super::*;
use crate::descriptor::TypeKind;
use crate::support::object_url;
use rdfbean_term::ns::rdf;

/// Serializes beans as resources named after their identity property
/// (see [`object_url`]).
#[derive(Clone, Copy, Debug, Default)]
pub struct BeanSerializer;

impl Serializer for BeanSerializer {
    fn name(&self) -> &'static str {
        "bean"
    }

    fn accept(&self, ty: &TypeDescriptor, _: &Annotations) -> bool {
        matches!(ty.kind(), TypeKind::Bean { .. })
    }

    fn is_complex(&self, _: &Annotations) -> bool {
        true
    }

    fn identifier(
        &self,
        mgr: &SerializationManager,
        _: &mut SerializationContext,
        value: &Value,
        ty: &TypeDescriptor,
        _: &Annotations,
        _: &mut dyn TripleSink,
    ) -> Result<Identifier, SerializationError> {
        let obj = expect_object(value, ty, "bean")?;
        let url = object_url(ty, obj, mgr.config().instance_namespace())?;
        Ok(Identifier::resource(url))
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
        let obj = expect_object(value, ty, "bean")?;
        let id = current_identifier(self, mgr, ctx, value, ty, ann, sink)?;
        mgr.emit(sink, &id, rdf::type_, &Identifier::resource(ty.class_url()))?;
        write_properties(mgr, ctx, obj, ty, &id, sink)?;
        Ok(id)
    }
}

/// Serializes static beans.
///
/// The properties are attached to the [static identifier](static_identifier),
/// once per context, and no type triple is emitted.
#[derive(Clone, Copy, Debug, Default)]
pub struct StaticBeanSerializer;

impl Serializer for StaticBeanSerializer {
    fn name(&self) -> &'static str {
        "static bean"
    }

    fn accept(&self, ty: &TypeDescriptor, ann: &Annotations) -> bool {
        matches!(ty.kind(), TypeKind::Bean { .. }) && is_static(ty, ann)
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
        let obj = expect_object(value, ty, "bean")?;
        let id = current_identifier(self, mgr, ctx, value, ty, ann, sink)?;
        if ctx.mark_static(&id) {
            write_properties(mgr, ctx, obj, ty, &id, sink)?;
        }
        Ok(id)
    }
}

/// Emit one triple per non-null property of the bean `obj`, identified by `id`.
pub fn write_properties(
    mgr: &SerializationManager,
    ctx: &mut SerializationContext,
    obj: &ObjectRef,
    ty: &TypeDescriptor,
    id: &Identifier,
    sink: &mut dyn TripleSink,
) -> Result<(), SerializationError> {
    for property in ty.properties() {
        let annotations = property.annotations();
        if annotations.ignore || annotations.adapt {
            continue;
        }
        let value = obj.get(property.name());
        let ann = Annotations::for_property(property, id);
        let value_id = mgr.serialize(ctx, &value, &ann, sink)?;
        // property-form sequences link their elements themselves, and return null
        if !value_id.is_null() {
            mgr.emit(sink, id, property.url(), &value_id)?;
        }
    }
    Ok(())
}
