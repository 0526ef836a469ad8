//! Basic graph patterns, as sent by deserializers to a [`QueryEndpoint`](crate::QueryEndpoint).
use rdfbean_term::Term;
use std::fmt;

/// One position of a [`Clause`]: either a variable or a constant term.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum PatternTerm {
    /// A variable, identified by its name (without the leading `?`)
    Var(String),
    /// A constant term
    Const(Term),
}

impl PatternTerm {
    /// Build a variable.
    pub fn var<T: Into<String>>(name: T) -> Self {
        PatternTerm::Var(name.into())
    }

    /// The name of this variable, if it is one.
    pub fn as_var(&self) -> Option<&str> {
        match self {
            PatternTerm::Var(name) => Some(name),
            PatternTerm::Const(_) => None,
        }
    }
}

impl From<Term> for PatternTerm {
    fn from(value: Term) -> Self {
        PatternTerm::Const(value)
    }
}

impl From<&Term> for PatternTerm {
    fn from(value: &Term) -> Self {
        PatternTerm::Const(value.clone())
    }
}

impl fmt::Display for PatternTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternTerm::Var(name) => write!(f, "?{}", name),
            PatternTerm::Const(t) => t.fmt(f),
        }
    }
}

/// A triple pattern.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Clause {
    /// The subject pattern
    pub subject: PatternTerm,
    /// The predicate pattern
    pub predicate: PatternTerm,
    /// The object pattern
    pub object: PatternTerm,
}

impl Clause {
    /// The three positions of this clause.
    pub fn positions(&self) -> [&PatternTerm; 3] {
        [&self.subject, &self.predicate, &self.object]
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} .", self.subject, self.predicate, self.object)
    }
}

/// An accumulation of triple-pattern clauses, optionally restricted to a named graph.
///
/// ```
/// # use rdfbean_inmem::{PatternTerm, Query};
/// # use rdfbean_term::{ns::rdf, Term};
/// let q = Query::new()
///     .clause(PatternTerm::var("s"), Term::iri(rdf::type_), Term::iri("http://example.org/Person"));
/// assert_eq!(q.variables(), vec!["s"]);
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Query {
    clauses: Vec<Clause>,
    graph: Option<Term>,
}

impl Query {
    /// An empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a clause to this query.
    pub fn clause<S, P, O>(mut self, s: S, p: P, o: O) -> Self
    where
        S: Into<PatternTerm>,
        P: Into<PatternTerm>,
        O: Into<PatternTerm>,
    {
        self.add_clause(s, p, o);
        self
    }

    /// Add a clause to this query, in place.
    pub fn add_clause<S, P, O>(&mut self, s: S, p: P, o: O) -> &mut Self
    where
        S: Into<PatternTerm>,
        P: Into<PatternTerm>,
        O: Into<PatternTerm>,
    {
        self.clauses.push(Clause {
            subject: s.into(),
            predicate: p.into(),
            object: o.into(),
        });
        self
    }

    /// Restrict this query to the graph named `graph`.
    pub fn in_graph(mut self, graph: Option<Term>) -> Self {
        self.graph = graph;
        self
    }

    /// The clauses of this query, in the order they were added.
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// The named graph this query is restricted to, if any.
    pub fn graph(&self) -> Option<&Term> {
        self.graph.as_ref()
    }

    /// The variables of this query, in order of first appearance.
    pub fn variables(&self) -> Vec<&str> {
        let mut vars: Vec<&str> = vec![];
        for v in self
            .clauses
            .iter()
            .flat_map(Clause::positions)
            .filter_map(PatternTerm::as_var)
        {
            if !vars.contains(&v) {
                vars.push(v);
            }
        }
        vars
    }

    /// Render this query as a SPARQL `SELECT` query,
    /// suitable for a remote SPARQL-capable store.
    pub fn to_sparql(&self) -> String {
        let mut txt = String::from("SELECT * WHERE {\n");
        let indent = if self.graph.is_some() { "    " } else { "  " };
        if let Some(g) = &self.graph {
            txt.push_str(&format!("  GRAPH {} {{\n", g));
        }
        for c in &self.clauses {
            txt.push_str(indent);
            txt.push_str(&c.to_string());
            txt.push('\n');
        }
        if self.graph.is_some() {
            txt.push_str("  }\n");
        }
        txt.push('}');
        txt
    }
}
