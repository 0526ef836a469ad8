//! This crate is part of [rdfbean],
//! a mapper between host object graphs and [RDF] statements.
//!
//! It provides the triple-level collaborators of the mapper:
//! * [`TripleSink`], the append-only destination of serialization,
//!   and [`TripleBuffer`], its in-memory implementation;
//! * [`TermMatcher`]s, to filter the content of a buffer;
//! * [`Query`] and [`QueryEndpoint`], the query-and-result contract used by deserialization,
//!   implemented by [`TripleBuffer`].
//!
//! [rdfbean]: https://docs.rs/rdfbean/latest/rdfbean/
//! [RDF]: https://www.w3.org/TR/rdf-primer/
#![deny(missing_docs)]

mod _error;
pub use _error::*;

pub mod buffer;
pub mod endpoint;
pub mod index;
pub mod matcher;
pub mod query;
pub mod sink;

pub use buffer::{GenericTripleBuffer, QuadRef, TripleBuffer};
pub use endpoint::{Bindings, QueryEndpoint, Solutions};
pub use matcher::{Any, GraphNameMatcher, TermMatcher};
pub use query::{Clause, PatternTerm, Query};
pub use sink::{Quad, Triple, TripleSink};
