use super::*;
use std::fmt;
use std::sync::Arc;

/// The different kinds of terms that a [`Term`] can represent.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialOrd, PartialEq)]
pub enum TermKind {
    /// An [RDF IRI](https://www.w3.org/TR/rdf11-concepts/#section-IRIs)
    Iri,
    /// An RDF [blank node](https://www.w3.org/TR/rdf11-concepts/#section-blank-nodes)
    BlankNode,
    /// An RDF [literal](https://www.w3.org/TR/rdf11-concepts/#section-Graph-Literal)
    Literal,
}

/// An owned RDF term, as stored in triple buffers and returned by query endpoints.
///
/// The underlying text is shared through [`Arc<str>`],
/// making terms cheap to clone.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialOrd, PartialEq)]
pub enum Term {
    /// An IRI
    Iri(Arc<str>),
    /// A blank node, identified by its label (without the leading `_:`)
    BlankNode(Arc<str>),
    /// A literal
    Literal(LiteralTerm),
}

/// The components of a literal [`Term`].
#[derive(Clone, Debug, Eq, Hash, Ord, PartialOrd, PartialEq)]
pub struct LiteralTerm {
    lexical: Arc<str>,
    datatype: Arc<str>,
    language: Option<Arc<str>>,
}

impl LiteralTerm {
    /// The lexical form of this literal.
    pub fn lexical(&self) -> &str {
        self.lexical.as_ref()
    }

    /// The datatype IRI of this literal.
    pub fn datatype(&self) -> &str {
        self.datatype.as_ref()
    }

    /// The language tag of this literal, if any.
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }
}

impl Term {
    /// Build an IRI term.
    ///
    /// NB: the IRI is not checked.
    pub fn iri<T: Into<Arc<str>>>(iri: T) -> Self {
        Term::Iri(iri.into())
    }

    /// Build a blank node term, checking that `id` is a valid label.
    pub fn blank<T: Into<Arc<str>>>(id: T) -> Result<Self> {
        let id = id.into();
        if is_valid_bnode_id(&id) {
            Ok(Term::BlankNode(id))
        } else {
            Err(TermError::InvalidBlankNodeId(id.to_string()))
        }
    }

    /// Build a blank node term.
    ///
    /// # Pre-condition
    ///
    /// This function requires that `id` is a valid blank node label.
    pub fn blank_unchecked<T: Into<Arc<str>>>(id: T) -> Self {
        Term::BlankNode(id.into())
    }

    /// Build a datatyped literal term.
    pub fn literal<L, D>(lexical: L, datatype: D) -> Self
    where
        L: Into<Arc<str>>,
        D: Into<Arc<str>>,
    {
        Term::Literal(LiteralTerm {
            lexical: lexical.into(),
            datatype: datatype.into(),
            language: None,
        })
    }

    /// Build a language-tagged string term.
    pub fn lang_string<L, T>(lexical: L, tag: T) -> Self
    where
        L: Into<Arc<str>>,
        T: Into<Arc<str>>,
    {
        Term::Literal(LiteralTerm {
            lexical: lexical.into(),
            datatype: Arc::from(ns::rdf::langString),
            language: Some(tag.into()),
        })
    }

    /// The kind of this term.
    pub fn kind(&self) -> TermKind {
        match self {
            Term::Iri(_) => TermKind::Iri,
            Term::BlankNode(_) => TermKind::BlankNode,
            Term::Literal(_) => TermKind::Literal,
        }
    }

    /// Whether this term is an IRI.
    pub fn is_iri(&self) -> bool {
        matches!(self, Term::Iri(_))
    }

    /// Whether this term is a blank node.
    pub fn is_blank_node(&self) -> bool {
        matches!(self, Term::BlankNode(_))
    }

    /// Whether this term is a literal.
    pub fn is_literal(&self) -> bool {
        matches!(self, Term::Literal(_))
    }

    /// The IRI of this term, if it is an IRI.
    pub fn as_iri(&self) -> Option<&str> {
        match self {
            Term::Iri(iri) => Some(iri.as_ref()),
            _ => None,
        }
    }

    /// The literal components of this term, if it is a literal.
    pub fn as_literal(&self) -> Option<&LiteralTerm> {
        match self {
            Term::Literal(lit) => Some(lit),
            _ => None,
        }
    }

    /// The "value" of this term:
    /// the IRI, the blank node label, or the lexical form.
    pub fn value(&self) -> &str {
        match self {
            Term::Iri(txt) | Term::BlankNode(txt) => txt.as_ref(),
            Term::Literal(lit) => lit.lexical.as_ref(),
        }
    }

    /// Convert this term into a primitive [`Literal`], according to its datatype.
    ///
    /// Language-tagged strings are read as plain strings.
    pub fn to_literal(&self) -> Result<Literal> {
        match self {
            Term::Literal(lit) => Literal::from_lexical(&lit.lexical, &lit.datatype),
            _ => Err(TermError::NotALiteral(self.to_string())),
        }
    }
}

impl From<&Literal> for Term {
    fn from(value: &Literal) -> Self {
        Term::literal(value.lexical_form(), value.datatype())
    }
}

impl From<Literal> for Term {
    fn from(value: Literal) -> Self {
        Term::from(&value)
    }
}

/// Terms are displayed in the N-Triples syntax.
impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Iri(iri) => write!(f, "<{}>", iri),
            Term::BlankNode(id) => write!(f, "_:{}", id),
            Term::Literal(lit) => {
                f.write_str("\"")?;
                for c in lit.lexical.chars() {
                    match c {
                        '\\' => f.write_str("\\\\")?,
                        '"' => f.write_str("\\\"")?,
                        '\n' => f.write_str("\\n")?,
                        '\r' => f.write_str("\\r")?,
                        '\t' => f.write_str("\\t")?,
                        c => write!(f, "{}", c)?,
                    }
                }
                f.write_str("\"")?;
                match &lit.language {
                    Some(tag) => write!(f, "@{}", tag),
                    None if &*lit.datatype == ns::xsd::string => Ok(()),
                    None => write!(f, "^^<{}>", lit.datatype),
                }
            }
        }
    }
}
