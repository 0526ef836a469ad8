//! Deserialization of host values from a [`QueryEndpoint`].
//!
//! The [`DeserializationManager`] dispatches each identifier to the first [`Deserializer`]
//! of its chain accepting the expected type.
//! The default chain is, in order:
//! [enum](EnumDeserializer),
//! [collection](SequenceDeserializer::collection),
//! [array](SequenceDeserializer::array),
//! [map](MapDeserializer),
//! [static bean](StaticBeanDeserializer),
//! [primitive](PrimitiveDeserializer),
//! [bean](BeanDeserializer).
//!
//! Complex values are registered in the [`DeserializationContext`]
//! as soon as they are allocated, *before* their content is deserialized.
//! A cyclic reference to a value being deserialized therefore
//! resolves to the very same instance.
//!
//! Deserialization is best-effort:
//! missing triples are reported as [`Issue`](crate::Issue)s, and do not abort the call.
use crate::context::DeserializationContext;
use crate::descriptor::{Annotations, TypeDescriptor};
use crate::object::{ObjectRef, Value};
use crate::support::{is_property_form, is_static, static_identifier};
use crate::DeserializationError;
use rdfbean_inmem::{PatternTerm, Query, QueryEndpoint};
use rdfbean_term::{Identifier, Term};

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


/// A deserialization strategy.
pub trait Deserializer {
    /// A short name for this strategy, used in logs.
    fn name(&self) -> &'static str;

    /// Whether this strategy handles values of type `ty` in the context `ann`.
    fn accept(&self, ty: &TypeDescriptor, ann: &Annotations) -> bool;

    /// The class-level identifier of values of type `ty`, if they have one
    /// (i.e. if they are static).
    fn identifier(
        &self,
        mgr: &DeserializationManager,
        ty: &TypeDescriptor,
        ann: &Annotations,
    ) -> Option<Identifier>;

    /// Build the value of type `ty` identified by `id`,
    /// from the triples available in `endpoint`.
    fn deserialize(
        &self,
        mgr: &DeserializationManager,
        ctx: &mut DeserializationContext,
        ty: &TypeDescriptor,
        ann: &Annotations,
        id: &Identifier,
        endpoint: &dyn QueryEndpoint,
    ) -> Result<Value, DeserializationError>;
}

/// The objects of the triples `(s, p, ?o)`, in the order of the solutions.
pub fn objects(
    mgr: &DeserializationManager,
    endpoint: &dyn QueryEndpoint,
    s: &Identifier,
    p: &str,
) -> Result<Vec<Term>, DeserializationError> {
    let query = Query::new().clause(s.to_term(), Term::iri(p), PatternTerm::var("o"));
    Ok(mgr
        .select_query(endpoint, query)?
        .filter_map(|b| b.get("o").cloned())
        .collect())
}

/// The object of the first triple `(s, p, ?o)`, if any.
pub fn first_object(
    mgr: &DeserializationManager,
    endpoint: &dyn QueryEndpoint,
    s: &Identifier,
    p: &str,
) -> Result<Option<Term>, DeserializationError> {
    Ok(objects(mgr, endpoint, s, p)?.into_iter().next())
}

fn unexpected(ty: &TypeDescriptor, expected: &'static str, found: &Identifier) -> DeserializationError {
    DeserializationError::UnexpectedTerm {
        type_name: ty.name().to_string(),
        expected,
        found: found.to_string(),
    }
}
