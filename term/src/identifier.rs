//! The [`Identifier`] is the outcome of mapping one host value to one RDF term.
//!
//! It is produced by serializers
//! (when they complete, or for complex values, begin the mapping of a value),
//! and consumed by their callers to decide how to link the value into a parent triple:
//! as a reference to a resource or blank node, or as an inlined literal.

use super::*;
use std::fmt;

/// Which kind of RDF term an [`Identifier`] stands for.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialOrd, PartialEq)]
pub enum IdentifierKind {
    /// A globally named resource (IRI)
    Resource,
    /// A blank node
    Blank,
    /// An inlined literal value
    Literal,
}

impl From<TermKind> for IdentifierKind {
    fn from(value: TermKind) -> Self {
        match value {
            TermKind::Iri => IdentifierKind::Resource,
            TermKind::BlankNode => IdentifierKind::Blank,
            TermKind::Literal => IdentifierKind::Literal,
        }
    }
}

/// An immutable tagged value:
/// a resource IRI, a blank node label or a primitive literal value,
/// together with the kind of RDF term it represents.
///
/// Equality and hashing are structural (value and kind).
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Identifier {
    value: Literal,
    kind: IdentifierKind,
}

impl Identifier {
    /// An identifier for the resource with the given IRI.
    pub fn resource<T: Into<String>>(iri: T) -> Self {
        Identifier {
            value: Literal::String(iri.into()),
            kind: IdentifierKind::Resource,
        }
    }

    /// An identifier for the blank node with the given label.
    pub fn blank<T: Into<String>>(id: T) -> Self {
        Identifier {
            value: Literal::String(id.into()),
            kind: IdentifierKind::Blank,
        }
    }

    /// An identifier for an inlined literal value.
    pub fn literal<T: Into<Literal>>(value: T) -> Self {
        Identifier {
            value: value.into(),
            kind: IdentifierKind::Literal,
        }
    }

    /// The NULL identifier, returned for absent values.
    ///
    /// It is a literal identifier carrying the [null sentinel](Literal::Null).
    /// No triple should ever be emitted for it.
    pub fn null() -> Self {
        Self::literal(Literal::Null)
    }

    /// The kind of RDF term this identifier stands for.
    pub fn kind(&self) -> IdentifierKind {
        self.kind
    }

    /// The raw value of this identifier.
    pub fn value(&self) -> &Literal {
        &self.value
    }

    /// Whether this is the NULL identifier.
    pub fn is_null(&self) -> bool {
        self.kind == IdentifierKind::Literal && self.value.is_null()
    }

    /// Whether this identifier is a resource.
    pub fn is_resource(&self) -> bool {
        self.kind == IdentifierKind::Resource
    }

    /// Whether this identifier is a blank node.
    pub fn is_blank(&self) -> bool {
        self.kind == IdentifierKind::Blank
    }

    /// Whether this identifier is a literal.
    pub fn is_literal(&self) -> bool {
        self.kind == IdentifierKind::Literal
    }

    /// The IRI of a resource identifier, or the label of a blank node identifier.
    pub fn as_str(&self) -> Option<&str> {
        match self.kind {
            IdentifierKind::Literal => None,
            _ => self.value.as_str(),
        }
    }

    /// The RDF term represented by this identifier.
    pub fn to_term(&self) -> Term {
        match self.kind {
            IdentifierKind::Resource => Term::iri(self.value.lexical_form()),
            IdentifierKind::Blank => Term::blank_unchecked(self.value.lexical_form()),
            IdentifierKind::Literal => Term::from(&self.value),
        }
    }

    /// The identifier of an RDF term.
    ///
    /// Fails if `term` is a literal whose datatype is not supported.
    pub fn from_term(term: &Term) -> Result<Self> {
        Ok(match term {
            Term::Iri(iri) => Identifier::resource(iri.as_ref()),
            Term::BlankNode(id) => Identifier::blank(id.as_ref()),
            Term::Literal(_) => Identifier::literal(term.to_literal()?),
        })
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.to_term().fmt(f)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn structural_equality() {
        let r1 = Identifier::resource("http://example.org/a");
        let r2 = Identifier::resource(String::from("http://example.org/a"));
        let b = Identifier::blank("http://example.org/a");
        let l = Identifier::literal("http://example.org/a");
        assert_eq!(r1, r2);
        assert_ne!(r1, b);
        assert_ne!(r1, l);
        assert_ne!(b, l);

        let set: HashSet<_> = [r1, r2, b, l].into_iter().collect();
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn null() {
        let n = Identifier::null();
        assert!(n.is_null());
        assert!(n.is_literal());
        assert!(!Identifier::literal("null").is_null());
        assert_eq!(n.as_str(), None);
    }

    #[test]
    fn term_round_trip() -> Result<()> {
        for id in [
            Identifier::resource("http://example.org/a"),
            Identifier::blank("b1"),
            Identifier::literal(42),
            Identifier::literal(true),
            Identifier::null(),
        ] {
            assert_eq!(Identifier::from_term(&id.to_term())?, id);
        }
        Ok(())
    }

    #[test]
    fn display() {
        assert_eq!(
            Identifier::resource("http://example.org/a").to_string(),
            "<http://example.org/a>"
        );
        assert_eq!(Identifier::blank("b1").to_string(), "_:b1");
        assert_eq!(
            Identifier::literal(42).to_string(),
            "\"42\"^^<http://www.w3.org/2001/XMLSchema#int>"
        );
        assert_eq!(Identifier::literal("a\"b").to_string(), "\"a\\\"b\"");
    }
}
