//! Maps.
use super::*;
use crate::descriptor::TypeKind;
use rdfbean_term::ns::bean;

/// Deserializes maps, static or not, from their `bean:entry` nodes.
///
/// An entry with no `bean:key` (resp. `bean:value`) has a null key (resp. value).
#[derive(Clone, Copy, Debug, Default)]
pub struct MapDeserializer;

impl Deserializer for MapDeserializer {
    fn name(&self) -> &'static str {
        "map"
    }

    fn accept(&self, ty: &TypeDescriptor, _: &Annotations) -> bool {
        matches!(ty.kind(), TypeKind::Map { .. })
    }

    fn identifier(
        &self,
        _: &DeserializationManager,
        ty: &TypeDescriptor,
        ann: &Annotations,
    ) -> Option<Identifier> {
        is_static(ty, ann).then(|| static_identifier(ty, ann))
    }

    fn deserialize(
        &self,
        mgr: &DeserializationManager,
        ctx: &mut DeserializationContext,
        ty: &TypeDescriptor,
        _: &Annotations,
        id: &Identifier,
        endpoint: &dyn QueryEndpoint,
    ) -> Result<Value, DeserializationError> {
        let map = ObjectRef::map(ty.name(), Vec::<(Value, Value)>::new());
        ctx.register(id.clone(), map.clone().into());
        let key_type = mgr.registry().key_type(ty);
        let value_type = mgr.registry().element_type(ty);
        let mut entries = vec![];
        for entry in objects(mgr, endpoint, id, bean::entry)? {
            let entry = Identifier::from_term(&entry)?;
            let key = read_slot(mgr, ctx, key_type, &entry, bean::key, endpoint)?;
            let value = read_slot(mgr, ctx, value_type, &entry, bean::value, endpoint)?;
            entries.push((key, value));
        }
        map.set_entries(entries);
        Ok(map.into())
    }
}

fn read_slot(
    mgr: &DeserializationManager,
    ctx: &mut DeserializationContext,
    declared: Option<&TypeDescriptor>,
    entry: &Identifier,
    predicate: &str,
    endpoint: &dyn QueryEndpoint,
) -> Result<Value, DeserializationError> {
    match first_object(mgr, endpoint, entry, predicate)? {
        Some(term) => mgr.deserialize_term(ctx, declared, &Annotations::none(), &term, endpoint),
        None => Ok(Value::Null),
    }
}
