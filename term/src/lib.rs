//! This crate is part of [rdfbean],
//! a mapper between host object graphs and [RDF] statements.
//!
//! It provides the value model shared by all other crates:
//! * [`Literal`] and [`PrimitiveType`], the primitive values and their parsers;
//! * [`Identifier`], the outcome of mapping one value to one RDF term;
//! * [`Term`], the owned RDF terms stored in triple buffers;
//! * the [namespaces](ns) used by the mapper.
//!
//! [rdfbean]: https://docs.rs/rdfbean/latest/rdfbean/
//! [RDF]: https://www.w3.org/TR/rdf-primer/
#![deny(missing_docs)]

mod _error;
pub use _error::*;
mod _term;
pub use _term::*;

pub mod blank_node;
pub mod identifier;
pub mod literal;
pub mod ns;

pub use blank_node::is_valid_bnode_id;
pub use identifier::{Identifier, IdentifierKind};
pub use literal::{Literal, PrimitiveType};
