//! Export of a [`TripleBuffer`] through
//! [RIO](https://docs.rs/rio_api/) formatters.
//!
//! **Important**:
//! the functions in this module accepting a [`Write`]
//! make no effort to minimize the number of write operations.
//! Hence, in most cased, they should be passed a [`BufWriter`].
//!
//! [`Write`]: https://doc.rust-lang.org/std/io/trait.Write.html
//! [`BufWriter`]: https://doc.rust-lang.org/std/io/struct.BufWriter.html

use rdfbean_inmem::TripleBuffer;
use rdfbean_term::ns::xsd;
use rdfbean_term::Term;
use rio_api::formatter::{QuadsFormatter, TriplesFormatter};
use rio_api::model::{
    BlankNode, GraphName, Literal, NamedNode, Quad as RioQuad, Subject, Term as RioTerm,
    Triple as RioTriple,
};
use rio_turtle::{NQuadsFormatter, NTriplesFormatter, TurtleFormatter};
use rio_xml::RdfXmlFormatter;
use std::io;

use crate::Result;

/// The concrete syntaxes a [`TripleBuffer`] can be exported to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Format {
    /// [N-Triples](https://www.w3.org/TR/n-triples/)
    NTriples,
    /// [N-Quads](https://www.w3.org/TR/n-quads/)
    NQuads,
    /// [Turtle](https://www.w3.org/TR/turtle/)
    Turtle,
    /// [RDF/XML](https://www.w3.org/TR/rdf-syntax-grammar/)
    RdfXml,
}

/// RDF/XML serializer configuration.
#[derive(Clone, Debug, Default)]
pub struct RdfXmlConfig {
    indentation: usize,
}

impl RdfXmlConfig {
    /// Size of the indentation to use in the serialization.
    /// (defaults to 0, meaning no indentation nor linebreaks)
    pub fn indentation(&self) -> usize {
        self.indentation
    }

    /// Build a new default [`RdfXmlConfig`]
    pub fn new() -> Self {
        Default::default()
    }

    /// Transform an [`RdfXmlConfig`] by setting the [`indentation`](RdfXmlConfig::indentation).
    pub fn with_indentation(mut self, i: usize) -> Self {
        self.indentation = i;
        self
    }
}

/// Format all the triples of `buffer` using `tf`.
///
/// NB: graph names are ignored,
/// and triples with a literal in subject position are silently skipped.
pub fn rio_format_triples<TF>(tf: &mut TF, buffer: &TripleBuffer) -> Result<(), TF::Error>
where
    TF: TriplesFormatter,
{
    for [s, p, o] in buffer.triples() {
        let (Some(subject), Some(predicate)) = (rio_subject(s), rio_predicate(p)) else {
            continue; // non standard triple
        };
        tf.format(&RioTriple {
            subject,
            predicate,
            object: rio_object(o),
        })?;
    }
    Ok(())
}

/// Format all the quads of `buffer` using `qf`.
///
/// NB: quads with a literal in subject or graph name position are silently skipped.
pub fn rio_format_quads<QF>(qf: &mut QF, buffer: &TripleBuffer) -> Result<(), QF::Error>
where
    QF: QuadsFormatter,
{
    for ([s, p, o], g) in buffer.iter() {
        let (Some(subject), Some(predicate)) = (rio_subject(s), rio_predicate(p)) else {
            continue; // non standard quad
        };
        let graph_name = match g {
            None => None,
            Some(g) => match rio_graph_name(g) {
                None => continue,
                some => some,
            },
        };
        qf.format(&RioQuad {
            subject,
            predicate,
            object: rio_object(o),
            graph_name,
        })?;
    }
    Ok(())
}

/// Write `buffer` in N-Triples to `write`.
pub fn write_ntriples<W: io::Write>(buffer: &TripleBuffer, mut write: W) -> Result<W> {
    {
        let mut tf = NTriplesFormatter::new(&mut write);
        rio_format_triples(&mut tf, buffer)?;
    }
    Ok(write)
}

/// Write `buffer` in N-Quads to `write`.
pub fn write_nquads<W: io::Write>(buffer: &TripleBuffer, mut write: W) -> Result<W> {
    {
        let mut qf = NQuadsFormatter::new(&mut write);
        rio_format_quads(&mut qf, buffer)?;
    }
    Ok(write)
}

/// Write `buffer` in Turtle to `write`.
pub fn write_turtle<W: io::Write>(buffer: &TripleBuffer, mut write: W) -> Result<W> {
    {
        let mut tf = TurtleFormatter::new(&mut write);
        rio_format_triples(&mut tf, buffer)?;
        tf.finish()?;
    }
    Ok(write)
}

/// Write `buffer` in RDF/XML to `write`, with the given config.
pub fn write_rdfxml<W: io::Write>(
    buffer: &TripleBuffer,
    mut write: W,
    config: &RdfXmlConfig,
) -> Result<W> {
    {
        let mut tf = if config.indentation > 0 {
            RdfXmlFormatter::with_indentation(&mut write, config.indentation)?
        } else {
            RdfXmlFormatter::new(&mut write)?
        };
        rio_format_triples(&mut tf, buffer)?;
        tf.finish()?;
    }
    Ok(write)
}

/// Serialize `buffer` into a `String`, in the given format.
pub fn stringify(buffer: &TripleBuffer, format: Format) -> Result<String> {
    let data = match format {
        Format::NTriples => write_ntriples(buffer, Vec::new())?,
        Format::NQuads => write_nquads(buffer, Vec::new())?,
        Format::Turtle => write_turtle(buffer, Vec::new())?,
        Format::RdfXml => write_rdfxml(buffer, Vec::new(), &RdfXmlConfig::default())?,
    };
    Ok(String::from_utf8(data)?)
}

fn rio_subject(t: &Term) -> Option<Subject<'_>> {
    match t {
        Term::Iri(_) => Some(NamedNode { iri: t.value() }.into()),
        Term::BlankNode(_) => Some(BlankNode { id: t.value() }.into()),
        Term::Literal(_) => None,
    }
}

fn rio_predicate(t: &Term) -> Option<NamedNode<'_>> {
    t.as_iri().map(|iri| NamedNode { iri })
}

fn rio_graph_name(t: &Term) -> Option<GraphName<'_>> {
    match t {
        Term::Iri(_) => Some(NamedNode { iri: t.value() }.into()),
        Term::BlankNode(_) => Some(BlankNode { id: t.value() }.into()),
        Term::Literal(_) => None,
    }
}

fn rio_object(t: &Term) -> RioTerm<'_> {
    match t {
        Term::Iri(_) => NamedNode { iri: t.value() }.into(),
        Term::BlankNode(_) => BlankNode { id: t.value() }.into(),
        Term::Literal(lit) => match lit.language() {
            Some(language) => Literal::LanguageTaggedString {
                value: lit.lexical(),
                language,
            }
            .into(),
            None if lit.datatype() == xsd::string => Literal::Simple {
                value: lit.lexical(),
            }
            .into(),
            None => Literal::Typed {
                value: lit.lexical(),
                datatype: NamedNode {
                    iri: lit.datatype(),
                },
            }
            .into(),
        },
    }
}

// ---------------------------------------------------------------------------------
//                                      tests
// ---------------------------------------------------------------------------------
