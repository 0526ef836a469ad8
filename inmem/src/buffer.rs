//! An in-memory, append-only buffer of quads.
use std::iter::empty;

use rdfbean_term::Term;

use crate::index::*;
use crate::matcher::*;
use crate::sink::*;
use crate::Result;

/// A quad borrowed from a [`GenericTripleBuffer`].
pub type QuadRef<'a> = ([&'a Term; 3], Option<&'a Term>);

type Row<I> = ([I; 3], Option<I>);

/// An ordered buffer of quads over a single term index.
///
/// Quads are kept in insertion order, and duplicates are *not* removed,
/// so that the number of statements emitted by a serializer can be counted.
/// Fast to load but slow to query, which fits its usage as a serialization target.
#[derive(Clone, Debug, Default)]
pub struct GenericTripleBuffer<TI: TermIndex> {
    terms: TI,
    rows: Vec<Row<TI::Index>>,
    blank_counter: usize,
}

/// The default [`GenericTripleBuffer`].
pub type TripleBuffer = GenericTripleBuffer<SimpleTermIndex<u32>>;

impl<TI: TermIndex + Default> GenericTripleBuffer<TI> {
    /// Build an empty buffer.
    pub fn new() -> Self {
        Self {
            terms: TI::default(),
            rows: vec![],
            blank_counter: 0,
        }
    }
}

impl<TI: TermIndex> GenericTripleBuffer<TI> {
    /// The number of quads in this buffer (duplicates included).
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether this buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iter over all the quads of this buffer, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = QuadRef<'_>> + '_ {
        self.rows.iter().map(|row| self.quad_ref(row))
    }

    /// Iter over all the triples of this buffer, whatever their graph, in insertion order.
    pub fn triples(&self) -> impl Iterator<Item = [&Term; 3]> + '_ {
        self.iter().map(|(t, _)| t)
    }

    /// Iter over the quads matching all the given matchers, in insertion order.
    pub fn quads_matching<'s, S, P, O, G>(
        &'s self,
        sm: S,
        pm: P,
        om: O,
        gm: G,
    ) -> Box<dyn Iterator<Item = QuadRef<'s>> + 's>
    where
        S: TermMatcher + 's,
        P: TermMatcher + 's,
        O: TermMatcher + 's,
        G: GraphNameMatcher + 's,
    {
        let (Some(sc), Some(pc), Some(oc)) =
            (self.resolve(&sm), self.resolve(&pm), self.resolve(&om))
        else {
            return Box::new(empty());
        };
        let consts = [sc, pc, oc];
        Box::new(
            self.rows
                .iter()
                .filter(move |row| row_matches(&self.terms, &consts, row, &sm, &pm, &om, &gm))
                .map(move |row| self.quad_ref(row)),
        )
    }

    /// Iter over the triples matching all the given matchers, whatever their graph, in insertion order.
    pub fn triples_matching<'s, S, P, O>(
        &'s self,
        sm: S,
        pm: P,
        om: O,
    ) -> impl Iterator<Item = [&'s Term; 3]> + 's
    where
        S: TermMatcher + 's,
        P: TermMatcher + 's,
        O: TermMatcher + 's,
    {
        self.quads_matching(sm, pm, om, Any).map(|(t, _)| t)
    }

    /// Whether this buffer contains the given triple, in any graph.
    pub fn contains(&self, s: &Term, p: &Term, o: &Term) -> bool {
        self.triples_matching(Some(s), Some(p), Some(o))
            .next()
            .is_some()
    }

    /// Remove all the quads matching the given matchers.
    ///
    /// Return the number of removed quads.
    pub fn remove_matching<S, P, O, G>(&mut self, sm: S, pm: P, om: O, gm: G) -> usize
    where
        S: TermMatcher,
        P: TermMatcher,
        O: TermMatcher,
        G: GraphNameMatcher,
    {
        let (Some(sc), Some(pc), Some(oc)) =
            (self.resolve(&sm), self.resolve(&pm), self.resolve(&om))
        else {
            return 0;
        };
        let consts = [sc, pc, oc];
        let before = self.rows.len();
        let terms = &self.terms;
        self.rows
            .retain(|row| !row_matches(terms, &consts, row, &sm, &pm, &om, &gm));
        before - self.rows.len()
    }

    fn quad_ref(&self, row: &Row<TI::Index>) -> QuadRef<'_> {
        let (spo, g) = row;
        (
            spo.map(|i| self.terms.get_term(i)),
            g.map(|i| self.terms.get_term(i)),
        )
    }

    /// `None` if `m` is a constant absent from the index (nothing can match),
    /// `Some(None)` if `m` is not a constant.
    fn resolve<M: TermMatcher>(&self, m: &M) -> Option<Option<TI::Index>> {
        match m.constant() {
            None => Some(None),
            Some(c) => self.terms.get_index(c).map(Some),
        }
    }
}

fn row_matches<TI, S, P, O, G>(
    terms: &TI,
    consts: &[Option<TI::Index>; 3],
    row: &Row<TI::Index>,
    sm: &S,
    pm: &P,
    om: &O,
    gm: &G,
) -> bool
where
    TI: TermIndex,
    S: TermMatcher,
    P: TermMatcher,
    O: TermMatcher,
    G: GraphNameMatcher,
{
    let ([s, p, o], g) = *row;
    slot_matches(terms, consts[0], s, sm)
        && slot_matches(terms, consts[1], p, pm)
        && slot_matches(terms, consts[2], o, om)
        && GraphNameMatcher::matches(gm, g.map(|i| terms.get_term(i)))
}

fn slot_matches<TI: TermIndex, M: TermMatcher>(
    terms: &TI,
    constant: Option<TI::Index>,
    i: TI::Index,
    m: &M,
) -> bool {
    match constant {
        Some(c) => c == i,
        None => TermMatcher::matches(m, terms.get_term(i)),
    }
}

impl<TI: TermIndex> TripleSink for GenericTripleBuffer<TI> {
    fn add_quad(&mut self, triple: Triple, graph: Option<Term>) -> Result<()> {
        let [s, p, o] = &triple;
        let is = self.terms.ensure_index(s)?;
        let ip = self.terms.ensure_index(p)?;
        let io = self.terms.ensure_index(o)?;
        let ig = match &graph {
            Some(g) => Some(self.terms.ensure_index(g)?),
            None => None,
        };
        self.rows.push(([is, ip, io], ig));
        Ok(())
    }

    fn fresh_blank(&mut self) -> Term {
        loop {
            self.blank_counter += 1;
            let b = Term::blank_unchecked(format!("b{}", self.blank_counter));
            if self.terms.get_index(&b).is_none() {
                return b;
            }
        }
    }
}
