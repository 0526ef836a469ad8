use rdfbean_inmem::StoreError;
use rdfbean_term::TermError;
use thiserror::Error;

/// This error is raised when a type can not be registered in a [`TypeRegistry`](crate::TypeRegistry).
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Type names must be identifiers, optionally qualified with dots.
    #[error("Invalid type name {0:?}")]
    InvalidTypeName(String),
    /// A type with the same name is already registered.
    #[error("Type {0:?} is already registered")]
    DuplicateType(String),
    /// Property names must be identifiers.
    #[error("Invalid property name {property:?} in type {type_name:?}")]
    InvalidPropertyName {
        /// The type declaring the property.
        type_name: String,
        /// The faulty property name.
        property: String,
    },
    /// Two properties of the same type have the same name.
    #[error("Property {property:?} is declared twice in type {type_name:?}")]
    DuplicateProperty {
        /// The type declaring the property.
        type_name: String,
        /// The duplicated property name.
        property: String,
    },
    /// Two properties of the same type map to the same predicate.
    #[error("Properties {first:?} and {second:?} of type {type_name:?} share the predicate <{url}>")]
    DuplicatePropertyUrl {
        /// The type declaring the properties.
        type_name: String,
        /// The shared predicate.
        url: String,
        /// The first property.
        first: String,
        /// The second property.
        second: String,
    },
    /// The identity property of a type is not one of its properties.
    #[error("Type {type_name:?} has no property {property:?} to use as identity")]
    UnknownIdProperty {
        /// The type declaring the identity property.
        type_name: String,
        /// The missing property.
        property: String,
    },
    /// A class or property URL is not a valid IRI.
    #[error("Invalid IRI <{iri}>: {source}")]
    InvalidIri {
        /// The faulty IRI.
        iri: String,
        /// The underlying error.
        source: oxiri::IriParseError,
    },
    /// Two types map to the same class URL.
    #[error("Types {first:?} and {second:?} share the class URL <{url}>")]
    DuplicateClassUrl {
        /// The shared class URL.
        url: String,
        /// The type registered first.
        first: String,
        /// The type registered second.
        second: String,
    },
}

/// This error is raised when a value can not be serialized.
///
/// It is always fatal to the current top-level call;
/// the triples emitted before the failure remain in the sink.
#[derive(Debug, Error)]
pub enum SerializationError {
    /// No type is registered under this name.
    #[error("Unknown type {0:?}")]
    UnknownType(String),
    /// No strategy of the chain accepts the type.
    #[error("No serializer accepts type {0:?}")]
    NoStrategy(String),
    /// A type has more than one adapter.
    #[error("Type {0:?} declares more than one adapter")]
    DuplicateAdapter(String),
    /// An adapter function failed.
    #[error("Adapter of type {type_name:?} failed: {source}")]
    Adapter {
        /// The adapted type.
        type_name: String,
        /// The underlying error.
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// The shape of an object does not match the kind of its type
    /// (e.g. a bean type holding items).
    #[error("Object of type {type_name:?} is not a {expected}")]
    InvalidObject {
        /// The type of the object.
        type_name: String,
        /// The expected shape.
        expected: &'static str,
    },
    /// The identity property of an object holds a complex value.
    #[error("Identity property {property:?} of type {type_name:?} must hold a primitive value")]
    InvalidId {
        /// The type of the object.
        type_name: String,
        /// The identity property.
        property: String,
    },
    /// An enum value uses a constant that its type does not declare.
    #[error("Unknown constant {constant:?} for enum type {type_name:?}")]
    UnknownEnumConstant {
        /// The enum type.
        type_name: String,
        /// The unknown constant.
        constant: String,
    },
    /// The object graph is nested deeper than the configured maximum depth.
    #[error("Maximum recursion depth ({0}) exceeded")]
    RecursionLimit(usize),
    /// The position of an element does not fit in an `xsd:long` index.
    #[error("Element index {0} is out of range")]
    IndexOverflow(usize),
    /// The triple sink failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// This error is raised when a value can not be deserialized.
///
/// It is always fatal to the current top-level call.
/// Non-fatal problems are reported as [`Issue`](crate::Issue)s instead.
#[derive(Debug, Error)]
pub enum DeserializationError {
    /// No type is registered under this name.
    #[error("Unknown type {0:?}")]
    UnknownType(String),
    /// No type is registered under this class URL.
    #[error("No type is registered for class <{0}>")]
    UnknownClassUrl(String),
    /// No strategy of the chain accepts the type.
    #[error("No deserializer accepts type {0:?}")]
    NoStrategy(String),
    /// The type has no class-level identity.
    #[error("Type {0:?} has no static identity")]
    NotStatic(String),
    /// An identifier resolves to a type incompatible with the requested one,
    /// either because it was already deserialized as that type,
    /// or because the store says so.
    #[error("{identifier} resolves to {found:?}, not {expected:?}")]
    TypeMismatch {
        /// The identifier.
        identifier: String,
        /// The requested type.
        expected: String,
        /// The type of the cached instance, or the type given by the store.
        found: String,
    },
    /// A literal does not name one of the constants of an enum type.
    #[error("Unknown constant {constant:?} for enum type {type_name:?}")]
    UnknownEnumConstant {
        /// The enum type.
        type_name: String,
        /// The unknown constant.
        constant: String,
    },
    /// The store links a property that can not be written.
    #[error("Property {property:?} of type {type_name:?} is not writable")]
    NotWritable {
        /// The type declaring the property.
        type_name: String,
        /// The property.
        property: String,
    },
    /// A term of the wrong kind was found (e.g. a resource where a literal was expected).
    #[error("Expected {expected} for type {type_name:?}, found {found}")]
    UnexpectedTerm {
        /// The requested type.
        type_name: String,
        /// The expected kind of term.
        expected: &'static str,
        /// The term found in the store.
        found: String,
    },
    /// The recursion went deeper than the configured maximum depth.
    #[error("Maximum recursion depth ({0}) exceeded; a deserializer probably failed to register a cyclic instance before populating it")]
    RecursionLimit(usize),
    /// A literal could not be converted to a primitive value.
    #[error(transparent)]
    Term(#[from] TermError),
    /// The query endpoint failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}
