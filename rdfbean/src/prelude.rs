//! A prelude re-exporting the types most commonly needed to map values.
//!
//! ```
//! use rdfbean::prelude::*;
//! ```
pub use rdfbean_inmem::{QueryEndpoint, TripleBuffer, TripleSink};
pub use rdfbean_mapper::{
    DeserializationManager, EnumValue, Issue, IssueKind, MapperConfig, ObjectRef,
    PropertyDescriptor, SerializationManager, TypeDescriptor, TypeRegistry, Value,
};
pub use rdfbean_rio::Format;
pub use rdfbean_term::{Identifier, Literal, Term};
