//! This crate is part of [rdfbean],
//! a mapper between host object graphs and [RDF] statements.
//!
//! It adapts [RIO](https://docs.rs/rio_api/) parsers and formatters
//! to import documents into a [`TripleBuffer`](rdfbean_inmem::TripleBuffer)
//! (or any other [`TripleSink`](rdfbean_inmem::TripleSink)),
//! and to export the content of a buffer
//! as N-Triples, N-Quads, Turtle or RDF/XML.
//!
//! [rdfbean]: https://docs.rs/rdfbean/latest/rdfbean/
//! [RDF]: https://www.w3.org/TR/rdf-primer/
#![deny(missing_docs)]

mod _error;
pub use _error::*;

pub mod parser;
pub mod serializer;

pub use parser::{parse_nquads, parse_ntriples, parse_rdfxml, parse_turtle};
pub use serializer::{stringify, Format, RdfXmlConfig};
