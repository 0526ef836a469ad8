//! The [`QueryEndpoint`] is the only way deserializers read triples.
//!
//! The endpoint may be an in-memory [`TripleBuffer`](crate::TripleBuffer)
//! or any store able to evaluate a basic graph pattern (e.g. a remote SPARQL endpoint).
use std::collections::BTreeMap;

use rdfbean_term::Term;

use crate::buffer::GenericTripleBuffer;
use crate::index::TermIndex;
use crate::matcher::*;
use crate::query::*;
use crate::Result;

/// The values bound to the variables of a query in one solution.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Bindings(BTreeMap<String, Term>);

impl Bindings {
    /// Build an empty set of bindings.
    pub fn new() -> Self {
        Self::default()
    }

    /// The term bound to variable `var`, if any.
    pub fn get(&self, var: &str) -> Option<&Term> {
        self.0.get(var)
    }

    /// Bind `var` to `term`.
    pub fn insert<T: Into<String>>(&mut self, var: T, term: Term) {
        self.0.insert(var.into(), term);
    }

    /// Iter over the variable names and their bound terms.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Term)> + '_ {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// The number of bound variables.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no variable is bound.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, Term)> for Bindings {
    fn from_iter<T: IntoIterator<Item = (String, Term)>>(iter: T) -> Self {
        Bindings(iter.into_iter().collect())
    }
}

/// A cursor over the solutions of a query.
#[derive(Clone, Debug)]
pub struct Solutions {
    rows: std::vec::IntoIter<Bindings>,
}

impl Solutions {
    /// Whether there are more solutions.
    pub fn has_next(&self) -> bool {
        self.rows.len() > 0
    }
}

impl From<Vec<Bindings>> for Solutions {
    fn from(value: Vec<Bindings>) -> Self {
        Solutions {
            rows: value.into_iter(),
        }
    }
}

impl Iterator for Solutions {
    type Item = Bindings;

    fn next(&mut self) -> Option<Self::Item> {
        self.rows.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.rows.size_hint()
    }
}

/// A store able to evaluate a [`Query`].
///
/// No order is guaranteed on the solutions.
pub trait QueryEndpoint {
    /// Evaluate `query` and return its solutions.
    fn select(&self, query: &Query) -> Result<Solutions>;
}

impl<E: QueryEndpoint + ?Sized> QueryEndpoint for &E {
    fn select(&self, query: &Query) -> Result<Solutions> {
        (**self).select(query)
    }
}

/// Evaluation by nested loops, clauses being joined in order.
///
/// Solutions come in the insertion order of the matched quads.
impl<TI: TermIndex> QueryEndpoint for GenericTripleBuffer<TI> {
    fn select(&self, query: &Query) -> Result<Solutions> {
        let mut out = vec![];
        join(self, query.clauses(), query.graph(), Bindings::new(), &mut out);
        log::trace!("{} solution(s) for {:?}", out.len(), query.clauses());
        Ok(out.into())
    }
}

fn join<TI: TermIndex>(
    buffer: &GenericTripleBuffer<TI>,
    clauses: &[Clause],
    graph: Option<&Term>,
    bindings: Bindings,
    out: &mut Vec<Bindings>,
) {
    let Some((first, rest)) = clauses.split_first() else {
        out.push(bindings);
        return;
    };
    let [sp, pp, op] = first.positions();
    let sm = Slot::new(sp, &bindings);
    let pm = Slot::new(pp, &bindings);
    let om = Slot::new(op, &bindings);
    let gm = GraphSlot(graph);
    let candidates: Vec<_> = buffer.quads_matching(sm, pm, om, gm).collect();
    for ([s, p, o], _) in candidates {
        if let Some(extended) = extend(&bindings, [sp, pp, op], [s, p, o]) {
            join(buffer, rest, graph, extended, out);
        }
    }
}

/// Bind the free variables of a clause, checking that a variable repeated in the clause
/// gets the same value everywhere.
fn extend(bindings: &Bindings, patterns: [&PatternTerm; 3], terms: [&Term; 3]) -> Option<Bindings> {
    let mut extended = bindings.clone();
    for (pattern, term) in patterns.into_iter().zip(terms) {
        if let PatternTerm::Var(name) = pattern {
            match extended.get(name) {
                Some(bound) if bound != term => return None,
                Some(_) => (),
                None => extended.insert(name.as_str(), term.clone()),
            }
        }
    }
    Some(extended)
}

/// Matches a constant, a bound variable or (for a free variable) anything.
struct Slot(Option<Term>);

impl Slot {
    fn new(pattern: &PatternTerm, bindings: &Bindings) -> Self {
        match pattern {
            PatternTerm::Const(t) => Slot(Some(t.clone())),
            PatternTerm::Var(name) => Slot(bindings.get(name).cloned()),
        }
    }
}

impl TermMatcher for Slot {
    fn matches(&self, term: &Term) -> bool {
        match &self.0 {
            Some(t) => t == term,
            None => true,
        }
    }
    fn constant(&self) -> Option<&Term> {
        self.0.as_ref()
    }
}

/// Matches the query graph if any, otherwise every graph.
struct GraphSlot<'a>(Option<&'a Term>);

impl<'a> GraphNameMatcher for GraphSlot<'a> {
    fn matches(&self, graph_name: Option<&Term>) -> bool {
        match self.0 {
            Some(g) => graph_name == Some(g),
            None => true,
        }
    }
}
