//! This crate is part of [rdfbean],
//! a mapper between host object graphs and [RDF] statements.
//!
//! It is the mapping engine itself:
//! * the host [object model](object), walked by serializers and built by deserializers;
//! * the [`TypeRegistry`], describing how each type maps to RDF;
//! * the [serialization](ser) and [deserialization](de) strategy chains,
//!   and their managers;
//! * the [`Issue`]s recorded by best-effort deserialization.
//!
//! [rdfbean]: https://docs.rs/rdfbean/latest/rdfbean/
//! [RDF]: https://www.w3.org/TR/rdf-primer/
#![deny(missing_docs)]

mod _error;
pub use _error::*;

pub mod config;
pub mod context;
pub mod de;
pub mod descriptor;
pub mod issue;
pub mod object;
pub mod registry;
pub mod ser;
pub mod support;

pub use config::MapperConfig;
pub use context::{DeserializationContext, SerializationContext};
pub use de::{DeserializationManager, Deserializer};
pub use descriptor::{
    Adapter, Annotations, PropertyAnnotations, PropertyDescriptor, TypeConfig, TypeDescriptor,
    TypeKind,
};
pub use issue::{Issue, IssueKind};
pub use object::{EnumValue, Object, ObjectData, ObjectKey, ObjectRef, Value};
pub use registry::TypeRegistry;
pub use ser::{SerializationManager, Serializer};

#[cfg(test)]
fn test_setup() {
    TEST_SETUP.call_once(|| {
        env_logger::init();
    });
}

#[cfg(test)]
static TEST_SETUP: std::sync::Once = std::sync::Once::new();
