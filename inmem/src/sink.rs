//! A [`TripleSink`] is the append-only destination of serialized statements.
use crate::Result;
use rdfbean_term::Term;

/// A triple, as an array of its subject, predicate and object.
pub type Triple = [Term; 3];

/// A quad, as a triple and an optional graph name (`None` for the default graph).
pub type Quad = (Triple, Option<Term>);

/// An append-only destination for triples and quads.
///
/// The kind of each term (IRI, blank node or literal) is carried by the [`Term`] itself.
///
/// This trait is object safe, so that serializers can write into any `&mut dyn TripleSink`.
pub trait TripleSink {
    /// Append a triple to the graph `graph` (`None` for the default graph).
    fn add_quad(&mut self, triple: Triple, graph: Option<Term>) -> Result<()>;

    /// Generate a blank node that is not used yet in this sink.
    fn fresh_blank(&mut self) -> Term;

    /// Append a triple to the default graph.
    fn add_triple(&mut self, s: Term, p: Term, o: Term) -> Result<()> {
        self.add_quad([s, p, o], None)
    }

    /// Append the triple `(_:b, p, o)` in `graph`, where `_:b` is a fresh blank node.
    ///
    /// Return the generated blank node.
    fn add_blank_subject(&mut self, p: Term, o: Term, graph: Option<Term>) -> Result<Term> {
        let b = self.fresh_blank();
        self.add_quad([b.clone(), p, o], graph)?;
        Ok(b)
    }

    /// Append the triple `(s, p, _:b)` in `graph`, where `_:b` is a fresh blank node.
    ///
    /// Return the generated blank node.
    fn add_blank_object(&mut self, s: Term, p: Term, graph: Option<Term>) -> Result<Term> {
        let b = self.fresh_blank();
        self.add_quad([s, p, b.clone()], graph)?;
        Ok(b)
    }
}
