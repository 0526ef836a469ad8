//! Non-fatal deserialization problems.
//!
//! Deserialization is best-effort:
//! a missing triple or an unknown predicate does not abort the current call,
//! but is recorded as an [`Issue`] that the caller may inspect afterwards,
//! with [`DeserializationManager::issues`](crate::DeserializationManager::issues).
use std::fmt;
use std::sync::Arc;

/// The kind of an [`Issue`], with the identifiers it refers to.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum IssueKind {
    /// No triple links `subject` to a value through `property`.
    MissingProperty {
        /// The subject IRI or blank node label
        subject: String,
        /// The property URL
        property: String,
    },
    /// A triple of a static resource uses a predicate that maps to no property.
    UnmappedProperty {
        /// The subject IRI
        subject: String,
        /// The unmapped property URL
        property: String,
    },
    /// The type of a value can not be recovered from the store.
    UnresolvableType {
        /// The value, in N-Triples syntax
        identifier: String,
    },
}

/// A recorded, non-fatal deserialization problem.
#[derive(Clone, Debug)]
pub struct Issue {
    kind: IssueKind,
    message: String,
    cause: Option<Arc<dyn std::error::Error + Send + Sync>>,
}

impl Issue {
    /// Build an issue with a message derived from its kind.
    pub fn new(kind: IssueKind) -> Self {
        let message = match &kind {
            IssueKind::MissingProperty { subject, property } => {
                format!("no value for property <{property}> of {subject}")
            }
            IssueKind::UnmappedProperty { subject, property } => {
                format!("property <{property}> of {subject} is not mapped to any field")
            }
            IssueKind::UnresolvableType { identifier } => {
                format!("can not resolve the type of {identifier}")
            }
        };
        Issue {
            kind,
            message,
            cause: None,
        }
    }

    /// Attach a cause to this issue.
    pub fn with_cause<E>(mut self, cause: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.cause = Some(Arc::new(cause));
        self
    }

    /// The kind of this issue.
    pub fn kind(&self) -> &IssueKind {
        &self.kind
    }

    /// A human readable description of this issue.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The error that caused this issue, if any.
    pub fn cause(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        self.cause.as_deref()
    }

    /// The property URL this issue refers to, if any.
    pub fn property(&self) -> Option<&str> {
        match &self.kind {
            IssueKind::MissingProperty { property, .. }
            | IssueKind::UnmappedProperty { property, .. } => Some(property),
            IssueKind::UnresolvableType { .. } => None,
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.cause {
            Some(cause) => write!(f, "{} ({})", self.message, cause),
            None => f.write_str(&self.message),
        }
    }
}
