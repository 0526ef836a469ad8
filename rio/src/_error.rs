use rdfbean_inmem::StoreError;
use thiserror::Error;

/// Type alias for `Result` with default error `RioError`.
pub type Result<T, E = RioError> = std::result::Result<T, E>;

/// This error is raised when importing or exporting a triple buffer fails.
#[derive(Debug, Error)]
pub enum RioError {
    /// The underlying reader or writer failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// An N-Triples, N-Quads or Turtle document is invalid.
    #[error(transparent)]
    Turtle(#[from] rio_turtle::TurtleError),
    /// An RDF/XML document is invalid.
    #[error(transparent)]
    Xml(#[from] rio_xml::RdfXmlError),
    /// The triple sink refused a parsed triple.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// The base IRI given to a parser is not a valid IRI.
    #[error("Invalid base IRI <{base}>: {source}")]
    InvalidBase {
        /// The faulty base IRI.
        base: String,
        /// The underlying error.
        source: oxiri::IriParseError,
    },
    /// The parsed document uses a construct outside of plain RDF 1.1 (e.g. quoted triples).
    #[error("Unsupported RDF term: {0}")]
    Unsupported(String),
    /// A serialization produced invalid UTF-8.
    #[error(transparent)]
    Utf8(#[from] std::string::FromUtf8Error),
}
