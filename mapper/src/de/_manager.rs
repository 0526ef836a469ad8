use super::*;
use crate::config::MapperConfig;
use crate::descriptor::TypeKind;
use crate::issue::{Issue, IssueKind};
use crate::registry::TypeRegistry;
use rdfbean_inmem::Solutions;
use rdfbean_term::ns::rdf;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// The entry point of deserialization.
///
/// A manager holds a chain of [`Deserializer`]s,
/// caches the strategy selected for each type,
/// and keeps the [issues](DeserializationManager::issues) of its last top-level call.
pub struct DeserializationManager {
    registry: Rc<TypeRegistry>,
    config: MapperConfig,
    chain: Vec<Box<dyn Deserializer>>,
    selected: RefCell<HashMap<(String, u8), usize>>,
    issues: RefCell<Vec<Issue>>,
}

impl DeserializationManager {
    /// Build a new manager with the default config.
    #[inline]
    pub fn new(registry: Rc<TypeRegistry>) -> Self {
        Self::new_with_config(registry, MapperConfig::default())
    }

    /// Build a new manager with the given config.
    pub fn new_with_config(registry: Rc<TypeRegistry>, config: MapperConfig) -> Self {
        DeserializationManager {
            registry,
            config,
            chain: default_chain(),
            selected: RefCell::new(HashMap::new()),
            issues: RefCell::new(vec![]),
        }
    }

    /// Borrow this manager's configuration.
    pub fn config(&self) -> &MapperConfig {
        &self.config
    }

    /// Borrow this manager's type registry.
    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// The names of the strategies of the chain, in order.
    pub fn strategies(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.chain.iter().map(|s| s.name())
    }

    /// Insert `strategy` at position `index` in the chain
    /// (or at the end if `index` is greater than the length of the chain).
    pub fn insert_strategy(&mut self, index: usize, strategy: Box<dyn Deserializer>) {
        let index = index.min(self.chain.len());
        self.chain.insert(index, strategy);
        self.selected.get_mut().clear();
    }

    /// The issues recorded during the last top-level call.
    ///
    /// They are cleared at the start of each top-level call, even one failing early.
    pub fn issues(&self) -> Vec<Issue> {
        self.issues.borrow().clone()
    }

    /// Deserialize all the instances of type `type_name`,
    /// i.e. all the subjects typed with its class URL.
    pub fn deserialize<E: QueryEndpoint>(
        &self,
        type_name: &str,
        endpoint: &E,
    ) -> Result<Vec<Value>, DeserializationError> {
        self.issues.borrow_mut().clear();
        let ty = self.get_type(type_name)?;
        log::debug!("deserializing all instances of {}", type_name);
        let query = Query::new().clause(
            PatternTerm::var("s"),
            Term::iri(rdf::type_),
            Term::iri(ty.class_url()),
        );
        let mut subjects: Vec<Term> = vec![];
        for solution in self.select_query(endpoint, query)? {
            if let Some(s) = solution.get("s") {
                if !subjects.contains(s) {
                    subjects.push(s.clone());
                }
            }
        }
        self.top_level(|mgr, ctx| {
            subjects
                .iter()
                .map(|s| {
                    let id = Identifier::from_term(s)?;
                    mgr.deserialize_value(ctx, ty, &Annotations::none(), &id, endpoint)
                })
                .collect()
        })
    }

    /// Deserialize the static value of type `type_name`.
    ///
    /// Fails with [`DeserializationError::NotStatic`]
    /// if the selected strategy provides no class-level identifier.
    pub fn static_deserialize<E: QueryEndpoint>(
        &self,
        type_name: &str,
        endpoint: &E,
    ) -> Result<Value, DeserializationError> {
        self.issues.borrow_mut().clear();
        let ty = self.get_type(type_name)?;
        let ann = Annotations::none();
        let id = self
            .select(ty, &ann)?
            .identifier(self, ty, &ann)
            .ok_or_else(|| DeserializationError::NotStatic(type_name.to_string()))?;
        log::debug!("deserializing static {} from {}", type_name, id);
        self.top_level(|mgr, ctx| mgr.deserialize_value(ctx, ty, &ann, &id, endpoint))
    }

    /// Deserialize the value of type `type_name` identified by `id`.
    pub fn deserialize_identifier<E: QueryEndpoint>(
        &self,
        type_name: &str,
        id: &Identifier,
        endpoint: &E,
    ) -> Result<Value, DeserializationError> {
        self.issues.borrow_mut().clear();
        let ty = self.get_type(type_name)?;
        log::debug!("deserializing {} as {}", id, type_name);
        self.top_level(|mgr, ctx| {
            mgr.deserialize_value(ctx, ty, &Annotations::none(), id, endpoint)
        })
    }

    fn top_level<T, F>(&self, f: F) -> Result<T, DeserializationError>
    where
        F: FnOnce(&Self, &mut DeserializationContext) -> Result<T, DeserializationError>,
    {
        let mut ctx = DeserializationContext::new();
        let res = f(self, &mut ctx);
        *self.issues.borrow_mut() = ctx.into_issues();
        res
    }

    /// Deserialize the value of type `ty` identified by `id`, in the context `ctx`.
    ///
    /// This is the recursive entry point used by strategies.
    /// The null identifier yields null.
    /// An identifier already deserialized in `ctx` yields the same instance,
    /// provided that its type is compatible with `ty`.
    pub fn deserialize_value(
        &self,
        ctx: &mut DeserializationContext,
        ty: &TypeDescriptor,
        ann: &Annotations,
        id: &Identifier,
        endpoint: &dyn QueryEndpoint,
    ) -> Result<Value, DeserializationError> {
        if id.is_null() {
            return Ok(Value::Null);
        }
        // in property form, `id` is the owner, not the sequence itself;
        // primitive values are never cached, even when represented by a resource
        let cacheable = !is_property_form(ty, ann) && !ty.is_primitive();
        if cacheable {
            if let Some(cached) = ctx.get(id) {
                return self.check_cached(cached, ty, id);
            }
        }
        if ctx.enter() > self.config.max_depth() {
            ctx.leave();
            return Err(DeserializationError::RecursionLimit(self.config.max_depth()));
        }
        let res = self
            .select(ty, ann)
            .and_then(|s| s.deserialize(self, ctx, ty, ann, id, endpoint));
        ctx.leave();
        res
    }

    /// Deserialize the value represented by `term`.
    ///
    /// The type of the value is [resolved](DeserializationManager::resolve_type)
    /// from the store, falling back to `declared`
    /// (which always wins for properties flagged `type_ref`).
    /// If it can not be resolved, an issue is recorded and null is returned.
    ///
    /// When `declared` is a bean, a sequence or a map,
    /// a resolved type not [compatible](TypeDescriptor::is_compatible_with) with it
    /// is a [`TypeMismatch`](DeserializationError::TypeMismatch).
    pub fn deserialize_term(
        &self,
        ctx: &mut DeserializationContext,
        declared: Option<&TypeDescriptor>,
        ann: &Annotations,
        term: &Term,
        endpoint: &dyn QueryEndpoint,
    ) -> Result<Value, DeserializationError> {
        let id = Identifier::from_term(term)?;
        if id.is_null() {
            return Ok(Value::Null);
        }
        let resolved = match declared {
            Some(ty) if ann.property.type_ref => Some(ty),
            _ => self.resolve_type(declared, &id, endpoint)?,
        };
        if let (Some(expected), Some(found)) = (declared, resolved) {
            let checked = !matches!(expected.kind(), TypeKind::Primitive(_) | TypeKind::Enum { .. });
            if checked && !found.is_compatible_with(expected) {
                return Err(DeserializationError::TypeMismatch {
                    identifier: id.to_string(),
                    expected: expected.name().to_string(),
                    found: found.name().to_string(),
                });
            }
        }
        match resolved {
            Some(ty) => self.deserialize_value(ctx, ty, ann, &id, endpoint),
            None => {
                ctx.add_issue(Issue::new(IssueKind::UnresolvableType {
                    identifier: term.to_string(),
                }));
                Ok(Value::Null)
            }
        }
    }

    /// The type of the value identified by `id`.
    ///
    /// * For a literal, a declared primitive or enum type wins,
    ///   otherwise the type is derived from the datatype.
    /// * For a resource or a blank node, the type is recovered from its `rdf:type`;
    ///   failing that, a resource named after the class URL of a static type has that type;
    ///   otherwise the declared type is used.
    pub fn resolve_type<'a>(
        &'a self,
        declared: Option<&'a TypeDescriptor>,
        id: &Identifier,
        endpoint: &dyn QueryEndpoint,
    ) -> Result<Option<&'a TypeDescriptor>, DeserializationError> {
        if id.is_literal() {
            if let Some(ty) = declared {
                if ty.is_primitive() || matches!(ty.kind(), TypeKind::Enum { .. }) {
                    return Ok(Some(ty));
                }
            }
            return Ok(id
                .value()
                .primitive_type()
                .and_then(|t| self.registry.get(t.name())));
        }
        for class in objects(self, endpoint, id, rdf::type_)? {
            if let Some(ty) = class.as_iri().and_then(|url| self.registry.type_for_class_url(url)) {
                return Ok(Some(ty));
            }
        }
        if let Some(ty) = id.as_str().and_then(|url| self.registry.type_for_class_url(url)) {
            if ty.config().is_static {
                return Ok(Some(ty));
            }
        }
        Ok(declared)
    }

    /// The first strategy of the chain accepting `ty` in the context `ann`.
    pub fn select(
        &self,
        ty: &TypeDescriptor,
        ann: &Annotations,
    ) -> Result<&dyn Deserializer, DeserializationError> {
        let key = (ty.name().to_string(), ann.flags());
        let cached = self.selected.borrow().get(&key).copied();
        let index = match cached {
            Some(index) => index,
            None => {
                let index = self
                    .chain
                    .iter()
                    .position(|s| s.accept(ty, ann))
                    .ok_or_else(|| DeserializationError::NoStrategy(ty.name().to_string()))?;
                log::trace!("deserializer {} selected for {}", self.chain[index].name(), ty.name());
                self.selected.borrow_mut().insert(key, index);
                index
            }
        };
        Ok(self.chain[index].as_ref())
    }

    /// Evaluate `query` against `endpoint`, in the configured graph.
    pub fn select_query<E: QueryEndpoint + ?Sized>(
        &self,
        endpoint: &E,
        query: Query,
    ) -> Result<Solutions, DeserializationError> {
        Ok(endpoint.select(&query.in_graph(self.config.graph().cloned()))?)
    }

    fn get_type(&self, type_name: &str) -> Result<&TypeDescriptor, DeserializationError> {
        self.registry
            .get(type_name)
            .ok_or_else(|| DeserializationError::UnknownType(type_name.to_string()))
    }

    fn check_cached(
        &self,
        cached: &Value,
        ty: &TypeDescriptor,
        id: &Identifier,
    ) -> Result<Value, DeserializationError> {
        let found = cached.type_name().unwrap_or_default();
        let compatible = self
            .registry
            .get(&found)
            .map(|cached_ty| cached_ty.is_compatible_with(ty))
            .unwrap_or(false);
        if compatible {
            Ok(cached.clone())
        } else {
            Err(DeserializationError::TypeMismatch {
                identifier: id.to_string(),
                expected: ty.name().to_string(),
                found,
            })
        }
    }
}

/// The default chain of deserializers.
pub fn default_chain() -> Vec<Box<dyn Deserializer>> {
    vec![
        Box::new(EnumDeserializer),
        Box::new(SequenceDeserializer::collection()),
        Box::new(SequenceDeserializer::array()),
        Box::new(MapDeserializer),
        Box::new(StaticBeanDeserializer),
        Box::new(PrimitiveDeserializer),
        Box::new(BeanDeserializer),
    ]
}
