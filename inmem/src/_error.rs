use thiserror::Error;

/// Type alias for `Result` with default error `StoreError`.
pub type Result<T, E = StoreError> = std::result::Result<T, E>;

/// This error is raised by triple sinks and query endpoints.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The term index can not hold any more terms.
    #[error("The term index is full ({0} terms)")]
    TooManyTerms(usize),
    /// The query can not be evaluated.
    #[error("Invalid query: {0}")]
    InvalidQuery(String),
    /// An error raised by an external store (e.g. a remote SPARQL endpoint).
    #[error("Store backend error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}
