//! Collections and arrays.
//!
//! The elements of a sequence are recovered from its `bean:member` nodes,
//! and sorted by their `bean:index`,
//! whatever the order in which the endpoint returns them.
//! A member with no `bean:value` stands for a null element.
use super::*;
use crate::descriptor::TypeKind;
use rdfbean_term::ns::bean;
use rdfbean_term::Literal;

/// Deserializes collections or arrays, static or not.
#[derive(Clone, Copy, Debug)]
pub struct SequenceDeserializer {
    array: bool,
}

impl SequenceDeserializer {
    /// The deserializer of growable collections.
    pub fn collection() -> Self {
        SequenceDeserializer { array: false }
    }

    /// The deserializer of arrays.
    pub fn array() -> Self {
        SequenceDeserializer { array: true }
    }
}

impl Deserializer for SequenceDeserializer {
    fn name(&self) -> &'static str {
        if self.array {
            "array"
        } else {
            "collection"
        }
    }

    fn accept(&self, ty: &TypeDescriptor, _: &Annotations) -> bool {
        match ty.kind() {
            TypeKind::Collection { .. } => !self.array,
            TypeKind::Array { .. } => self.array,
            _ => false,
        }
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
        ann: &Annotations,
        id: &Identifier,
        endpoint: &dyn QueryEndpoint,
    ) -> Result<Value, DeserializationError> {
        let element = mgr.registry().element_type(ty);
        if let (true, Some(url)) = (is_property_form(ty, ann), &ann.property_url) {
            let owner = ann.owner.as_ref().unwrap_or(id);
            let mut items = vec![];
            for term in objects(mgr, endpoint, owner, url)? {
                items.push(mgr.deserialize_term(ctx, element, &Annotations::none(), &term, endpoint)?);
            }
            return Ok(ObjectRef::list(ty.name(), items).into());
        }
        let list = ObjectRef::list(ty.name(), Vec::<Value>::new());
        ctx.register(id.clone(), list.clone().into());
        let items = read_members(mgr, ctx, ty, element, id, endpoint)?;
        list.set_items(items);
        Ok(list.into())
    }
}

/// Read the indexed members of the sequence `id`, in the order of their index.
pub fn read_members(
    mgr: &DeserializationManager,
    ctx: &mut DeserializationContext,
    ty: &TypeDescriptor,
    element: Option<&TypeDescriptor>,
    id: &Identifier,
    endpoint: &dyn QueryEndpoint,
) -> Result<Vec<Value>, DeserializationError> {
    let query = Query::new()
        .clause(id.to_term(), Term::iri(bean::member), PatternTerm::var("m"))
        .clause(PatternTerm::var("m"), Term::iri(bean::index), PatternTerm::var("i"));
    let mut members = vec![];
    for solution in mgr.select_query(endpoint, query)? {
        if let (Some(m), Some(i)) = (solution.get("m"), solution.get("i")) {
            let index = Identifier::from_term(i)?;
            let position = match index.value() {
                Literal::Short(n) => i64::from(*n),
                Literal::Int(n) => i64::from(*n),
                Literal::Long(n) => *n,
                _ => return Err(unexpected(ty, "an integer index", &index)),
            };
            members.push((position, Identifier::from_term(m)?));
        }
    }
    members.sort_by_key(|(position, _)| *position);
    let mut items = Vec::with_capacity(members.len());
    for (_, member) in members {
        let item = match first_object(mgr, endpoint, &member, bean::value)? {
            Some(term) => mgr.deserialize_term(ctx, element, &Annotations::none(), &term, endpoint)?,
            None => Value::Null,
        };
        items.push(item);
    }
    Ok(items)
}
