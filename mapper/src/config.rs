//! Configuration shared by the serialization and deserialization managers.
use rdfbean_term::Term;

/// The default prefix of the URLs generated for objects with no identity property.
pub const DEFAULT_INSTANCE_NAMESPACE: &str = "http://rdfbean.org/instance/";

/// The default maximum nesting depth of serialized and deserialized values.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Mapper configuration.
///
/// ```
/// # use rdfbean_mapper::MapperConfig;
/// # use rdfbean_term::Term;
/// let mut config = MapperConfig::default();
/// config
///     .set_instance_namespace("http://example.org/data/")
///     .set_graph(Some(Term::iri("http://example.org/graph")))
///     .set_max_depth(32);
/// assert_eq!(config.max_depth(), 32);
/// ```
#[derive(Clone, Debug)]
pub struct MapperConfig {
    instance_namespace: String,
    graph: Option<Term>,
    max_depth: usize,
}

impl MapperConfig {
    /// The prefix of the URLs generated for objects with no identity property.
    pub fn instance_namespace(&self) -> &str {
        &self.instance_namespace
    }

    /// The graph where serialized triples are added (`None` for the default graph).
    pub fn graph(&self) -> Option<&Term> {
        self.graph.as_ref()
    }

    /// The maximum nesting depth of serialized and deserialized values.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Set the instance namespace.
    pub fn set_instance_namespace<T: Into<String>>(&mut self, namespace: T) -> &mut Self {
        self.instance_namespace = namespace.into();
        self
    }

    /// Set the target graph.
    pub fn set_graph(&mut self, graph: Option<Term>) -> &mut Self {
        self.graph = graph;
        self
    }

    /// Set the maximum nesting depth.
    pub fn set_max_depth(&mut self, max_depth: usize) -> &mut Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for MapperConfig {
    fn default() -> Self {
        MapperConfig {
            instance_namespace: DEFAULT_INSTANCE_NAMESPACE.to_string(),
            graph: None,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}
