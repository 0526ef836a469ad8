//! Values represented by a single literal: primitive values and enum constants.
//!
//! These values have no identity of their own, so they are serialized in one step,
//! and emit no triple.
use super::*;
use crate::descriptor::TypeKind;

/// Serializes primitive values as typed literals.
///
/// The value of a property flagged `type_ref` is the name of a registered type,
/// and is serialized as the class URL of that type.
#[derive(Clone, Copy, Debug, Default)]
pub struct PrimitiveSerializer;

impl Serializer for PrimitiveSerializer {
    fn name(&self) -> &'static str {
        "primitive"
    }

    fn accept(&self, ty: &TypeDescriptor, _: &Annotations) -> bool {
        ty.is_primitive()
    }

    fn is_complex(&self, _: &Annotations) -> bool {
        false
    }

    fn identifier(
        &self,
        mgr: &SerializationManager,
        ctx: &mut SerializationContext,
        value: &Value,
        ty: &TypeDescriptor,
        ann: &Annotations,
        sink: &mut dyn TripleSink,
    ) -> Result<Identifier, SerializationError> {
        self.serialize(mgr, ctx, value, ty, ann, sink)
    }

    fn serialize(
        &self,
        mgr: &SerializationManager,
        _: &mut SerializationContext,
        value: &Value,
        ty: &TypeDescriptor,
        ann: &Annotations,
        _: &mut dyn TripleSink,
    ) -> Result<Identifier, SerializationError> {
        let lit = value
            .as_literal()
            .ok_or_else(|| SerializationError::InvalidObject {
                type_name: ty.name().to_string(),
                expected: "primitive value",
            })?;
        if ann.property.type_ref {
            if let Some(type_name) = lit.as_str() {
                let target = mgr
                    .registry()
                    .get(type_name)
                    .ok_or_else(|| SerializationError::UnknownType(type_name.to_string()))?;
                return Ok(Identifier::resource(target.class_url()));
            }
        }
        Ok(Identifier::literal(lit.clone()))
    }
}

/// Serializes enum constants as string literals holding their name.
#[derive(Clone, Copy, Debug, Default)]
pub struct EnumSerializer;

impl Serializer for EnumSerializer {
    fn name(&self) -> &'static str {
        "enum"
    }

    fn accept(&self, ty: &TypeDescriptor, _: &Annotations) -> bool {
        matches!(ty.kind(), TypeKind::Enum { .. })
    }

    fn is_complex(&self, _: &Annotations) -> bool {
        false
    }

    fn identifier(
        &self,
        mgr: &SerializationManager,
        ctx: &mut SerializationContext,
        value: &Value,
        ty: &TypeDescriptor,
        ann: &Annotations,
        sink: &mut dyn TripleSink,
    ) -> Result<Identifier, SerializationError> {
        self.serialize(mgr, ctx, value, ty, ann, sink)
    }

    fn serialize(
        &self,
        _: &SerializationManager,
        _: &mut SerializationContext,
        value: &Value,
        ty: &TypeDescriptor,
        _: &Annotations,
        _: &mut dyn TripleSink,
    ) -> Result<Identifier, SerializationError> {
        let e = value
            .as_enum()
            .ok_or_else(|| SerializationError::InvalidObject {
                type_name: ty.name().to_string(),
                expected: "enum constant",
            })?;
        let TypeKind::Enum { constants } = ty.kind() else {
            return Err(SerializationError::NoStrategy(ty.name().to_string()));
        };
        if !constants.contains(&e.constant) {
            return Err(SerializationError::UnknownEnumConstant {
                type_name: ty.name().to_string(),
                constant: e.constant.clone(),
            });
        }
        Ok(Identifier::literal(e.constant.as_str()))
    }
}
