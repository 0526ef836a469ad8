//! # Standard and mapping-specific namespaces
//!
//! This module provides:
//! * exported macros for defining custom namespaces;
//! * and modules using these macros to define the namespaces used by the mapper.
//!
//! Terms of a namespace are plain `&'static str` IRIs,
//! ready to be turned into a [`Term`](crate::Term) with [`Term::iri`](crate::Term::iri).

/// Helper for creating a "namespace module"
/// defining a set of IRIs within a given IRI space.
///
/// # Safety
/// This macro is conceptually unsafe,
/// as it is never checked that the prefix IRI is a valid IRI reference.
#[macro_export]
macro_rules! namespace {
    ($iri_prefix:literal, $($suffix:ident),*; $($r_id:ident, $r_sf:literal),*) => {
        /// Prefix used in this namespace.
        pub const PREFIX: &str = $iri_prefix;
        $(
            $crate::ns_iri!($iri_prefix, $suffix);
        )*
        $(
            $crate::ns_iri!($iri_prefix, $r_id, $r_sf);
        )*
    };
    ($iri_prefix:literal, $($suffix:ident),*) => {
        $crate::namespace!($iri_prefix, $($suffix),*;);
    };
}

/// Helper for creating an IRI in a "namespace module".
/// In general, you should use the [`namespace!`](macro.namespace.html) macro instead.
#[macro_export]
macro_rules! ns_iri {
    ($prefix:literal, $ident:ident) => {
        /// Generated IRI.
        #[allow(non_upper_case_globals)]
        pub const $ident: &str = concat!($prefix, stringify!($ident));
    };
    ($prefix:literal, $ident:ident, $suffix:literal) => {
        /// Generated IRI.
        #[allow(non_upper_case_globals)]
        pub const $ident: &str = concat!($prefix, $suffix);
    };
}

/// The standard `rdf:` namespace.
///
/// NB: since `type` is a reserved keyword in Rust,
/// the term `rdf:type` spells `rdf::type_` (with a trailing underscore).
pub mod rdf {
    namespace!(
        "http://www.w3.org/1999/02/22-rdf-syntax-ns#",
        langString,
        Property,
        value;
        type_, "type"
    );
}

/// The standard `xsd:` namespace (restricted to the datatypes of primitive values).
pub mod xsd {
    namespace!(
        "http://www.w3.org/2001/XMLSchema#",
        anyURI,
        boolean,
        dateTime,
        double,
        float,
        int,
        integer,
        long,
        short,
        string
    );
}

/// The vocabulary used by the mapper to encode sequences, maps and `null`.
pub mod bean {
    namespace!(
        "http://rdfbean.org/ns/bean#",
        entry,
        index,
        key,
        member,
        value,
        Null
    );
}
