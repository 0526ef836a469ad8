//! rdfbean maps graphs of host objects (beans, collections, maps, enums and primitive values)
//! to [RDF] statements, and back.
//!
//! Each type known to the mapper is described once, in a [`TypeRegistry`](mapper::TypeRegistry).
//! A [`SerializationManager`](mapper::SerializationManager) then turns values into triples,
//! written in any [`TripleSink`](inmem::TripleSink),
//! and a [`DeserializationManager`](mapper::DeserializationManager)
//! rebuilds values from any [`QueryEndpoint`](inmem::QueryEndpoint).
//! Shared and cyclic references are preserved in both directions.
//!
//! This crate is a facade re-exporting the crates of the rdfbean project:
//! * [`term`]: identifiers, RDF terms and vocabularies;
//! * [`inmem`]: the in-memory triple buffer and its query endpoint;
//! * [`mapper`]: the mapping engine;
//! * [`rio`]: import and export of triple buffers in standard RDF syntaxes.
//!
//! # Getting Started
//!
//! ```
//! use rdfbean::prelude::*;
//! use std::rc::Rc;
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//!
//! let registry = TypeRegistry::new().with(
//!     TypeDescriptor::bean("Person")
//!         .with_namespace("http://xmlns.com/foaf/0.1/")
//!         .property(PropertyDescriptor::new("name", "string"))
//!         .property(PropertyDescriptor::new("knows", "Person")),
//! )?;
//! let registry = Rc::new(registry);
//!
//! let alice = ObjectRef::bean("Person").with("name", "Alice");
//! alice.set("knows", alice.clone());
//!
//! let mut buffer = TripleBuffer::new();
//! SerializationManager::new(registry.clone()).serialize_object(&alice.into(), &mut buffer)?;
//! println!("{}", rdfbean::rio::stringify(&buffer, Format::NTriples)?);
//!
//! let de = DeserializationManager::new(registry);
//! let people = de.deserialize("Person", &buffer)?;
//! let got = people[0].as_object().ok_or("not a bean")?;
//! assert_eq!(got.get("name"), Value::from("Alice"));
//! assert_eq!(got.get("knows"), people[0]);
//! # Ok(())
//! # }
//! ```
//!
//! [RDF]: https://www.w3.org/TR/rdf-primer/
#![deny(missing_docs)]

pub use rdfbean_inmem as inmem;
pub use rdfbean_mapper as mapper;
pub use rdfbean_rio as rio;
pub use rdfbean_term as term;

pub mod prelude;
