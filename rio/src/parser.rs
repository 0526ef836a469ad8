//! Import of RDF documents into a [`TripleSink`] through
//! [RIO](https://docs.rs/rio_api/) parsers.
//!
//! Terms produced by a Rio parser are trusted to be valid.

use rdfbean_inmem::TripleSink;
use rdfbean_term::ns::xsd;
use rdfbean_term::Term;
use rio_api::model::{GraphName, Literal, Subject, Term as RioTerm};
use rio_api::parser::{QuadsParser, TriplesParser};
use rio_turtle::{NQuadsParser, NTriplesParser, TurtleParser};
use rio_xml::RdfXmlParser;
use std::io::BufRead;

use crate::{Result, RioError};

/// Parse an N-Triples document from `read` into `sink`.
///
/// Return the number of parsed triples.
pub fn parse_ntriples<R, S>(read: R, sink: &mut S) -> Result<usize>
where
    R: BufRead,
    S: TripleSink + ?Sized,
{
    add_triples(&mut NTriplesParser::new(read), sink)
}

/// Parse a Turtle document from `read` into `sink`,
/// resolving relative IRIs against `base` if provided.
///
/// Return the number of parsed triples.
pub fn parse_turtle<R, S>(read: R, base: Option<&str>, sink: &mut S) -> Result<usize>
where
    R: BufRead,
    S: TripleSink + ?Sized,
{
    add_triples(&mut TurtleParser::new(read, parse_base(base)?), sink)
}

/// Parse an RDF/XML document from `read` into `sink`,
/// resolving relative IRIs against `base` if provided.
///
/// Return the number of parsed triples.
pub fn parse_rdfxml<R, S>(read: R, base: Option<&str>, sink: &mut S) -> Result<usize>
where
    R: BufRead,
    S: TripleSink + ?Sized,
{
    add_triples(&mut RdfXmlParser::new(read, parse_base(base)?), sink)
}

/// Parse an N-Quads document from `read` into `sink`.
///
/// Return the number of parsed quads.
pub fn parse_nquads<R, S>(read: R, sink: &mut S) -> Result<usize>
where
    R: BufRead,
    S: TripleSink + ?Sized,
{
    let mut parser = NQuadsParser::new(read);
    let mut count = 0;
    parser.parse_all(&mut |q| -> Result<()> {
        let triple = [
            subject_term(q.subject)?,
            Term::iri(q.predicate.iri),
            object_term(q.object)?,
        ];
        let graph = match q.graph_name {
            None => None,
            Some(GraphName::NamedNode(n)) => Some(Term::iri(n.iri)),
            Some(GraphName::BlankNode(b)) => Some(Term::blank_unchecked(b.id)),
        };
        sink.add_quad(triple, graph)?;
        count += 1;
        Ok(())
    })?;
    Ok(count)
}

fn add_triples<P, S>(parser: &mut P, sink: &mut S) -> Result<usize>
where
    P: TriplesParser,
    RioError: From<P::Error>,
    S: TripleSink + ?Sized,
{
    let mut count = 0;
    parser.parse_all(&mut |t| -> Result<()> {
        sink.add_triple(
            subject_term(t.subject)?,
            Term::iri(t.predicate.iri),
            object_term(t.object)?,
        )?;
        count += 1;
        Ok(())
    })?;
    Ok(count)
}

fn parse_base(base: Option<&str>) -> Result<Option<oxiri::Iri<String>>> {
    base.map(|b| {
        oxiri::Iri::parse(b.to_string()).map_err(|source| RioError::InvalidBase {
            base: b.to_string(),
            source,
        })
    })
    .transpose()
}

fn subject_term(s: Subject<'_>) -> Result<Term> {
    match s {
        Subject::NamedNode(n) => Ok(Term::iri(n.iri)),
        Subject::BlankNode(b) => Ok(Term::blank_unchecked(b.id)),
        _ => Err(RioError::Unsupported(s.to_string())),
    }
}

fn object_term(o: RioTerm<'_>) -> Result<Term> {
    match o {
        RioTerm::NamedNode(n) => Ok(Term::iri(n.iri)),
        RioTerm::BlankNode(b) => Ok(Term::blank_unchecked(b.id)),
        RioTerm::Literal(Literal::Simple { value }) => Ok(Term::literal(value, xsd::string)),
        RioTerm::Literal(Literal::LanguageTaggedString { value, language }) => {
            Ok(Term::lang_string(value, language))
        }
        RioTerm::Literal(Literal::Typed { value, datatype }) => {
            Ok(Term::literal(value, datatype.iri))
        }
        _ => Err(RioError::Unsupported(o.to_string())),
    }
}

// ---------------------------------------------------------------------------------
//                                      tests
// ---------------------------------------------------------------------------------
