//! Serialization of host values into triples.
//!
//! The [`SerializationManager`] dispatches each value to the first [`Serializer`]
//! of its chain accepting the type of the value.
//! The default chain is, in order:
//! [primitive](PrimitiveSerializer),
//! [static collection](StaticSequenceSerializer),
//! [static map](StaticMapSerializer),
//! [static bean](StaticBeanSerializer),
//! [collection](SequenceSerializer::collection),
//! [array](SequenceSerializer::array),
//! [map](MapSerializer),
//! [enum](EnumSerializer),
//! [bean](BeanSerializer).
//!
//! Complex values (beans, sequences, maps) are serialized in two phases:
//! their identifier is computed and recorded in the [`SerializationContext`]
//! before any of their content is serialized.
//! A cyclic reference to a value being serialized therefore
//! resolves to its identifier, and does not serialize it again.
use crate::context::SerializationContext;
use crate::descriptor::{Annotations, TypeDescriptor};
use crate::object::{ObjectRef, Value};
use crate::support::{is_property_form, is_static, static_identifier};
use crate::SerializationError;
use rdfbean_inmem::TripleSink;
use rdfbean_term::Identifier;

mod _manager;
pub use _manager::*;
mod bean;
pub use bean::*;
mod map;
pub use map::*;
mod primitive;
pub use primitive::*;
mod sequence;
pub use sequence::*;

#[cfg(test)]
mod test;

/// A serialization strategy.
pub trait Serializer {
    /// A short name for this strategy, used in logs.
    fn name(&self) -> &'static str;

    /// Whether this strategy handles values of type `ty` in the context `ann`.
    fn accept(&self, ty: &TypeDescriptor, ann: &Annotations) -> bool;

    /// Whether values handled by this strategy get their own identity,
    /// and must therefore be serialized in two phases.
    fn is_complex(&self, ann: &Annotations) -> bool;

    /// Compute the identifier of `value`, without emitting its content.
    ///
    /// It may emit no triple, except for generating blank nodes.
    fn identifier(
        &self,
        mgr: &SerializationManager,
        ctx: &mut SerializationContext,
        value: &Value,
        ty: &TypeDescriptor,
        ann: &Annotations,
        sink: &mut dyn TripleSink,
    ) -> Result<Identifier, SerializationError>;

    /// Emit the triples describing `value` in `sink`, and return its identifier.
    ///
    /// For complex values, the returned identifier is the one recorded in `ctx`.
    fn serialize(
        &self,
        mgr: &SerializationManager,
        ctx: &mut SerializationContext,
        value: &Value,
        ty: &TypeDescriptor,
        ann: &Annotations,
        sink: &mut dyn TripleSink,
    ) -> Result<Identifier, SerializationError>;
}

/// The identifier already recorded in `ctx` for `value`,
/// or else the identifier computed by `strategy`.
pub fn current_identifier<S: Serializer + ?Sized>(
    strategy: &S,
    mgr: &SerializationManager,
    ctx: &mut SerializationContext,
    value: &Value,
    ty: &TypeDescriptor,
    ann: &Annotations,
    sink: &mut dyn TripleSink,
) -> Result<Identifier, SerializationError> {
    if let Value::Object(obj) = value {
        if let Some(id) = ctx.get(obj) {
            return Ok(id.clone());
        }
    }
    strategy.identifier(mgr, ctx, value, ty, ann, sink)
}

fn expect_object<'a>(
    value: &'a Value,
    ty: &TypeDescriptor,
    expected: &'static str,
) -> Result<&'a ObjectRef, SerializationError> {
    value
        .as_object()
        .ok_or_else(|| SerializationError::InvalidObject {
            type_name: ty.name().to_string(),
            expected,
        })
}
