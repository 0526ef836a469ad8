use thiserror::Error;

/// Type alias for `Result` with default error `TermError`.
///
/// Can be used like `std::result::Result` as well.
pub type Result<T, E = TermError> = std::result::Result<T, E>;

/// This error is raised when the creation or the conversion of a term fails.
#[derive(Debug, Error)]
pub enum TermError {
    /// Names of blank nodes must apply to N-Triples' [production rules](https://www.w3.org/TR/n-triples/#grammar-production-BLANK_NODE_LABEL).
    #[error(
        "The identifier '{0}' is not valid for a blank node according to the N-Triples specification"
    )]
    InvalidBlankNodeId(String),
    /// The lexical value of a literal can not be interpreted according to its datatype
    #[error("The given lexical value '{lex}' is invalid for datatype {dt}")]
    InvalidLexicalValue {
        /// The faulty lexical value.
        lex: String,
        /// The literal datatype IRI.
        dt: String,
        /// The underlying error.
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// Raised when failing to convert a literal into a primitive value
    #[error("The datatype <{0}> is not supported")]
    UnsupportedDatatype(String),
    /// Raised when a literal was expected but another kind of term was received.
    #[error("The term {0} is not a literal")]
    NotALiteral(String),
}
