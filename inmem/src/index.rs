//! A [`TermIndex`] is a bidirectional assocuation of [terms](`Term`) with short numeric [indices](`Index`).
use crate::{Result, StoreError};
use rdfbean_term::Term;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Abstraction of the short numeric indices representing [terms](`Term`) in a [`TermIndex`].
pub trait Index: Copy + std::fmt::Debug + Ord {
    /// The largest number of terms that can be indexed.
    const MAX: Self;
    /// Convert `other` into an index, if it fits.
    fn from_usize(other: usize) -> Option<Self>;
    /// Convert this index into a `usize`.
    fn into_usize(self) -> usize;
}

impl Index for usize {
    const MAX: Self = usize::MAX;
    fn from_usize(other: usize) -> Option<Self> {
        Some(other)
    }
    fn into_usize(self) -> usize {
        self
    }
}

impl Index for u32 {
    const MAX: Self = u32::MAX;
    fn from_usize(other: usize) -> Option<Self> {
        other.try_into().ok()
    }
    fn into_usize(self) -> usize {
        self as usize
    }
}

impl Index for u16 {
    const MAX: Self = u16::MAX;
    fn from_usize(other: usize) -> Option<Self> {
        other.try_into().ok()
    }
    fn into_usize(self) -> usize {
        self as usize
    }
}

//

/// A [`TermIndex`] is a bidirectional association of [terms](`Term`) with short numeric [indices](`Index`).
pub trait TermIndex {
    /// The type of indices used by this term-index.
    type Index: Index;

    /// Get the index corresponding to term `t`, if it exists.
    ///
    /// Return `None` if this term-index does not contain `t`.
    fn get_index(&self, t: &Term) -> Option<Self::Index>;
    /// Get the index corresponding to term `t`, adding it in the term-index if necessary.
    ///
    /// Returns an error if the term-index is full.
    fn ensure_index(&mut self, t: &Term) -> Result<Self::Index>;
    /// Get the term corresponding to index `i`.
    ///
    /// # Precondition
    /// `i` must have been returned previously by [`get_index`](TermIndex::get_index) or [`ensure_index`](TermIndex::ensure_index),
    /// otherwise this method may panic.
    fn get_term(&self, i: Self::Index) -> &Term;
}

/// A generic implementation of [`TermIndex`].
#[derive(Clone, Debug, Default)]
pub struct SimpleTermIndex<I: Index> {
    t2i: HashMap<Term, I>,
    i2t: Vec<Term>,
}

impl<I: Index> SimpleTermIndex<I> {
    /// Build an empty term-index.
    pub fn new() -> Self {
        SimpleTermIndex {
            t2i: HashMap::new(),
            i2t: vec![],
        }
    }

    /// The number of terms in this term-index.
    pub fn len(&self) -> usize {
        self.i2t.len()
    }

    /// Whether this term-index is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<I: Index> TermIndex for SimpleTermIndex<I> {
    type Index = I;

    fn get_index(&self, t: &Term) -> Option<Self::Index> {
        self.t2i.get(t).copied()
    }

    fn ensure_index(&mut self, t: &Term) -> Result<Self::Index> {
        match self.t2i.entry(t.clone()) {
            Entry::Vacant(e) => {
                let i = I::from_usize(self.i2t.len())
                    .ok_or(StoreError::TooManyTerms(self.i2t.len()))?;
                self.i2t.push(e.key().clone());
                e.insert(i);
                Ok(i)
            }
            Entry::Occupied(e) => Ok(*e.get()),
        }
    }

    fn get_term(&self, i: Self::Index) -> &Term {
        &self.i2t[i.into_usize()]
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rdfbean_term::ns::xsd;

    #[test]
    fn simple_term_index() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let exa = Term::iri("https://example.com/ns/a");
        let exb = Term::iri("https://example.com/ns/b");
        let bn1 = Term::blank_unchecked("bn1");
        let hello = Term::literal("hello world", xsd::string);

        let mut sti = SimpleTermIndex::<u32>::new();
        assert!(sti.is_empty());
        assert_eq!(sti.get_index(&exa), None);

        assert_eq!(sti.ensure_index(&exa)?, 0);
        assert_eq!(sti.ensure_index(&exb)?, 1);
        assert_eq!(sti.ensure_index(&bn1)?, 2);
        assert_eq!(sti.ensure_index(&hello)?, 3);
        assert_eq!(sti.len(), 4);

        assert_eq!(sti.ensure_index(&exa)?, 0);
        assert_eq!(sti.ensure_index(&hello)?, 3);
        assert_eq!(sti.len(), 4);

        assert_eq!(sti.get_index(&bn1), Some(2));
        assert_eq!(sti.get_index(&Term::iri("https://example.com/ns/c")), None);
        assert_eq!(sti.get_term(1), &exb);
        assert_eq!(sti.get_term(3), &hello);
        Ok(())
    }

    #[test]
    fn full_index() {
        let mut sti = SimpleTermIndex::<u16>::new();
        for i in 0..=(u16::MAX as usize) {
            let t = Term::literal(i.to_string(), xsd::int);
            assert!(sti.ensure_index(&t).is_ok());
        }
        let t = Term::literal("one too many", xsd::string);
        assert!(matches!(
            sti.ensure_index(&t),
            Err(StoreError::TooManyTerms(_))
        ));
    }
}
