//! Matchers select the triples of a [`TripleBuffer`](crate::TripleBuffer)
//! that [`triples_matching`](crate::GenericTripleBuffer::triples_matching) returns.
//!
//! A [`TermMatcher`] is applied to each position of a triple,
//! a [`GraphNameMatcher`] to its graph name.
use rdfbean_term::{Term, TermKind};
use std::borrow::Borrow;

/// Generic trait for matching [`Term`]s.
pub trait TermMatcher {
    /// Check whether this matcher matches `t`.
    fn matches(&self, term: &Term) -> bool;

    /// Return `None`, unless this matcher can only match a single term,
    /// in which case this method may return that term.
    ///
    /// This method is provided for optimization purposes,
    /// so implementing it is optional.
    fn constant(&self) -> Option<&Term> {
        None
    }

    /// Return a [`TermMatcher`] that is actually just a reference to this one.
    fn matcher_ref(&self) -> MatcherRef<'_, Self> {
        MatcherRef(self)
    }
}

/// A universal matcher: it matches any [`Term`] or graph name (even the default graph).
#[derive(Clone, Copy, Debug)]
pub struct Any;

impl TermMatcher for Any {
    fn matches(&self, _: &Term) -> bool {
        true
    }
}

/// Wrapper used to borrow a matcher, see [`TermMatcher::matcher_ref`].
pub struct MatcherRef<'a, M: ?Sized>(&'a M);

impl<'a, M: TermMatcher + ?Sized> TermMatcher for MatcherRef<'a, M> {
    fn matches(&self, term: &Term) -> bool {
        self.0.matches(term)
    }
    fn constant(&self) -> Option<&Term> {
        self.0.constant()
    }
}

/// Matches only this term.
impl TermMatcher for Term {
    fn matches(&self, term: &Term) -> bool {
        self == term
    }
    fn constant(&self) -> Option<&Term> {
        Some(self)
    }
}

/// Matches the wrapped term if any, otherwise matches nothing.
impl<T> TermMatcher for Option<T>
where
    T: Borrow<Term>,
{
    fn matches(&self, term: &Term) -> bool {
        match self {
            Some(mine) => mine.borrow() == term,
            None => false,
        }
    }
    fn constant(&self) -> Option<&Term> {
        self.as_ref().map(Borrow::borrow)
    }
}

/// Matches any of the terms in the array.
impl<T, const N: usize> TermMatcher for [T; N]
where
    T: Borrow<Term>,
{
    fn matches(&self, term: &Term) -> bool {
        self.iter().any(|mine| mine.borrow() == term)
    }
    fn constant(&self) -> Option<&Term> {
        if N == 1 {
            Some(self[0].borrow())
        } else {
            None
        }
    }
}

/// Matches any of the terms in the slice.
impl<T> TermMatcher for &[T]
where
    T: Borrow<Term>,
{
    fn matches(&self, term: &Term) -> bool {
        self.iter().any(|mine| mine.borrow() == term)
    }
    fn constant(&self) -> Option<&Term> {
        if self.len() == 1 {
            Some(self[0].borrow())
        } else {
            None
        }
    }
}

/// Matches any term of the given kind.
impl TermMatcher for TermKind {
    fn matches(&self, term: &Term) -> bool {
        term.kind() == *self
    }
}

/// Matches any term satisfying the function.
impl<F> TermMatcher for F
where
    F: Fn(&Term) -> bool + ?Sized,
{
    fn matches(&self, term: &Term) -> bool {
        (self)(term)
    }
}

//

/// Generic trait for matching graph names, where `None` stands for the default graph.
pub trait GraphNameMatcher {
    /// Check whether this matcher matches `graph_name`.
    fn matches(&self, graph_name: Option<&Term>) -> bool;
}

impl GraphNameMatcher for Any {
    fn matches(&self, _: Option<&Term>) -> bool {
        true
    }
}

/// `None` matches the default graph, `Some(g)` matches the graph named `g`.
impl<T> GraphNameMatcher for Option<T>
where
    T: Borrow<Term>,
{
    fn matches(&self, graph_name: Option<&Term>) -> bool {
        match (self, graph_name) {
            (None, None) => true,
            (Some(mine), Some(other)) => mine.borrow() == other,
            _ => false,
        }
    }
}
