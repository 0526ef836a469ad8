//! Values represented by a single literal: primitive values and enum constants.
use super::*;
use crate::descriptor::TypeKind;
use crate::object::EnumValue;
use rdfbean_term::Literal;

/// Deserializes typed literals into primitive values,
/// converting them to the expected primitive type if needed.
///
/// For properties flagged `type_ref`, the resource is a class URL,
/// and is deserialized as the name of the corresponding registered type.
#[derive(Clone, Copy, Debug, Default)]
pub struct PrimitiveDeserializer;

impl Deserializer for PrimitiveDeserializer {
    fn name(&self) -> &'static str {
        "primitive"
    }

    fn accept(&self, ty: &TypeDescriptor, _: &Annotations) -> bool {
        ty.is_primitive()
    }

    fn identifier(
        &self,
        _: &DeserializationManager,
        _: &TypeDescriptor,
        _: &Annotations,
    ) -> Option<Identifier> {
        None
    }

    fn deserialize(
        &self,
        mgr: &DeserializationManager,
        _: &mut DeserializationContext,
        ty: &TypeDescriptor,
        ann: &Annotations,
        id: &Identifier,
        _: &dyn QueryEndpoint,
    ) -> Result<Value, DeserializationError> {
        if ann.property.type_ref && id.is_resource() {
            let url = id.as_str().unwrap_or_default();
            let target = mgr
                .registry()
                .type_for_class_url(url)
                .ok_or_else(|| DeserializationError::UnknownClassUrl(url.to_string()))?;
            return Ok(Value::Primitive(Literal::String(target.name().to_string())));
        }
        let TypeKind::Primitive(pt) = ty.kind() else {
            return Err(DeserializationError::NoStrategy(ty.name().to_string()));
        };
        if !id.is_literal() {
            return Err(unexpected(ty, "a literal", id));
        }
        Ok(pt.coerce(id.value())?.into())
    }
}

/// Deserializes string literals into the enum constant they name.
#[derive(Clone, Copy, Debug, Default)]
pub struct EnumDeserializer;

impl Deserializer for EnumDeserializer {
    fn name(&self) -> &'static str {
        "enum"
    }

    fn accept(&self, ty: &TypeDescriptor, _: &Annotations) -> bool {
        matches!(ty.kind(), TypeKind::Enum { .. })
    }

    fn identifier(
        &self,
        _: &DeserializationManager,
        _: &TypeDescriptor,
        _: &Annotations,
    ) -> Option<Identifier> {
        None
    }

    fn deserialize(
        &self,
        _: &DeserializationManager,
        _: &mut DeserializationContext,
        ty: &TypeDescriptor,
        _: &Annotations,
        id: &Identifier,
        _: &dyn QueryEndpoint,
    ) -> Result<Value, DeserializationError> {
        let constant = match (id.is_literal(), id.value().as_str()) {
            (true, Some(constant)) => constant,
            _ => return Err(unexpected(ty, "a string literal", id)),
        };
        let TypeKind::Enum { constants } = ty.kind() else {
            return Err(DeserializationError::NoStrategy(ty.name().to_string()));
        };
        if !constants.iter().any(|c| c == constant) {
            return Err(DeserializationError::UnknownEnumConstant {
                type_name: ty.name().to_string(),
                constant: constant.to_string(),
            });
        }
        Ok(EnumValue::new(ty.name(), constant).into())
    }
}
