use super::*;
use crate::config::MapperConfig;
use crate::descriptor::PropertyDescriptor;
use crate::registry::TypeRegistry;
use rdfbean_term::Term;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// The entry point of serialization.
///
/// A manager holds a chain of [`Serializer`]s,
/// and caches the strategy selected for each type.
pub struct SerializationManager {
    registry: Rc<TypeRegistry>,
    config: MapperConfig,
    chain: Vec<Box<dyn Serializer>>,
    selected: RefCell<HashMap<(String, u8), usize>>,
}

impl SerializationManager {
    /// Build a new manager with the default config.
    #[inline]
    pub fn new(registry: Rc<TypeRegistry>) -> Self {
        Self::new_with_config(registry, MapperConfig::default())
    }

    /// Build a new manager with the given config.
    pub fn new_with_config(registry: Rc<TypeRegistry>, config: MapperConfig) -> Self {
        SerializationManager {
            registry,
            config,
            chain: default_chain(),
            selected: RefCell::new(HashMap::new()),
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
    pub fn insert_strategy(&mut self, index: usize, strategy: Box<dyn Serializer>) {
        let index = index.min(self.chain.len());
        self.chain.insert(index, strategy);
        self.selected.get_mut().clear();
    }

    /// Serialize `value` into `sink`, with a fresh context.
    pub fn serialize_object<S: TripleSink>(
        &self,
        value: &Value,
        sink: &mut S,
    ) -> Result<Identifier, SerializationError> {
        log::debug!("serializing {:?}", value);
        let mut ctx = SerializationContext::new();
        self.serialize(&mut ctx, value, &Annotations::none(), sink)
    }

    /// Serialize all `values` into `sink`, with a context shared by all of them.
    ///
    /// Objects reachable from several values are therefore serialized only once.
    pub fn serialize_objects<'a, I, S>(
        &self,
        values: I,
        sink: &mut S,
    ) -> Result<Vec<Identifier>, SerializationError>
    where
        I: IntoIterator<Item = &'a Value>,
        S: TripleSink,
    {
        let mut ctx = SerializationContext::new();
        values
            .into_iter()
            .map(|value| {
                log::debug!("serializing {:?}", value);
                self.serialize(&mut ctx, value, &Annotations::none(), sink)
            })
            .collect()
    }

    /// Serialize `value` into `sink`, in the context `ctx`.
    ///
    /// This is the recursive entry point used by strategies.
    /// Null yields the null identifier, and emits nothing.
    /// An object already visited in `ctx` yields its recorded identifier,
    /// and is not serialized again.
    pub fn serialize(
        &self,
        ctx: &mut SerializationContext,
        value: &Value,
        ann: &Annotations,
        sink: &mut dyn TripleSink,
    ) -> Result<Identifier, SerializationError> {
        if value.is_null() {
            return Ok(Identifier::null());
        }
        if let Value::Object(obj) = value {
            if let Some(id) = ctx.get(obj) {
                return Ok(id.clone());
            }
        }
        if ctx.enter() > self.config.max_depth() {
            ctx.leave();
            return Err(SerializationError::RecursionLimit(self.config.max_depth()));
        }
        let res = self.dispatch(ctx, value, ann, sink);
        ctx.leave();
        res
    }

    fn dispatch(
        &self,
        ctx: &mut SerializationContext,
        value: &Value,
        ann: &Annotations,
        sink: &mut dyn TripleSink,
    ) -> Result<Identifier, SerializationError> {
        let ty = self.registry.descriptor_of(value).ok_or_else(|| {
            SerializationError::UnknownType(value.type_name().unwrap_or_default())
        })?;
        if let Value::Object(obj) = value {
            if let Some(substitute) = self.adapt(obj, ty)? {
                let id = self.serialize(ctx, &substitute, ann, sink)?;
                ctx.visit(obj, id.clone());
                return Ok(id);
            }
        }
        let strategy = self.select(ty, ann)?;
        if strategy.is_complex(ann) {
            let id = strategy.identifier(self, ctx, value, ty, ann, sink)?;
            if let Value::Object(obj) = value {
                ctx.visit(obj, id);
            }
        }
        strategy.serialize(self, ctx, value, ty, ann, sink)
    }

    /// The first strategy of the chain accepting `ty` in the context `ann`.
    pub fn select(
        &self,
        ty: &TypeDescriptor,
        ann: &Annotations,
    ) -> Result<&dyn Serializer, SerializationError> {
        let key = (ty.name().to_string(), ann.flags());
        let cached = self.selected.borrow().get(&key).copied();
        let index = match cached {
            Some(index) => index,
            None => {
                let index = self
                    .chain
                    .iter()
                    .position(|s| s.accept(ty, ann))
                    .ok_or_else(|| SerializationError::NoStrategy(ty.name().to_string()))?;
                log::trace!("serializer {} selected for {}", self.chain[index].name(), ty.name());
                self.selected.borrow_mut().insert(key, index);
                index
            }
        };
        Ok(self.chain[index].as_ref())
    }

    /// The value to serialize in place of `obj`, if its type declares an adapter.
    fn adapt(
        &self,
        obj: &ObjectRef,
        ty: &TypeDescriptor,
    ) -> Result<Option<Value>, SerializationError> {
        let adapters: Vec<&PropertyDescriptor> = ty
            .properties()
            .iter()
            .filter(|p| p.annotations().adapt)
            .collect();
        match (&ty.config().adapter, adapters.as_slice()) {
            (None, []) => Ok(None),
            (Some(adapter), []) => {
                let object = obj.borrow();
                adapter(&*object)
                    .map(Some)
                    .map_err(|source| SerializationError::Adapter {
                        type_name: ty.name().to_string(),
                        source,
                    })
            }
            (None, [property]) => Ok(Some(obj.get(property.name()))),
            _ => Err(SerializationError::DuplicateAdapter(ty.name().to_string())),
        }
    }

    /// Add the triple `(s, p, o)` to `sink`, in the configured graph.
    pub fn emit(
        &self,
        sink: &mut dyn TripleSink,
        s: &Identifier,
        p: &str,
        o: &Identifier,
    ) -> Result<(), SerializationError> {
        sink.add_quad(
            [s.to_term(), Term::iri(p), o.to_term()],
            self.config.graph().cloned(),
        )?;
        Ok(())
    }

    /// Add the triple `(s, p, _:b)` to `sink`, in the configured graph,
    /// where `_:b` is a fresh blank node.
    ///
    /// Return the identifier of the blank node.
    pub fn emit_blank(
        &self,
        sink: &mut dyn TripleSink,
        s: &Identifier,
        p: &str,
    ) -> Result<Identifier, SerializationError> {
        let b = sink.add_blank_object(s.to_term(), Term::iri(p), self.config.graph().cloned())?;
        Ok(Identifier::blank(b.value()))
    }

    /// A fresh blank node identifier.
    pub fn fresh_blank(&self, sink: &mut dyn TripleSink) -> Identifier {
        Identifier::blank(sink.fresh_blank().value())
    }
}

/// The default chain of serializers.
pub fn default_chain() -> Vec<Box<dyn Serializer>> {
    vec![
        Box::new(PrimitiveSerializer),
        Box::new(StaticSequenceSerializer),
        Box::new(StaticMapSerializer),
        Box::new(StaticBeanSerializer),
        Box::new(SequenceSerializer::collection()),
        Box::new(SequenceSerializer::array()),
        Box::new(MapSerializer),
        Box::new(EnumSerializer),
        Box::new(BeanSerializer),
    ]
}
