//! Beans.
//!
//! A bean instance is allocated and registered before any of its properties is read,
//! so that the properties of a cyclic graph may refer back to it.
use super::*;
use crate::descriptor::{PropertyDescriptor, TypeKind};
use crate::issue::{Issue, IssueKind};
use rdfbean_term::ns::rdf;
use std::collections::HashSet;

/// Deserializes beans, property by property.
///
/// A property with no value in the store is left null,
/// and reported as a [`MissingProperty`](IssueKind::MissingProperty) issue.
/// Read-only properties are skipped.
#[derive(Clone, Copy, Debug, Default)]
pub struct BeanDeserializer;

impl Deserializer for BeanDeserializer {
    fn name(&self) -> &'static str {
        "bean"
    }

    fn accept(&self, ty: &TypeDescriptor, _: &Annotations) -> bool {
        matches!(ty.kind(), TypeKind::Bean { .. })
    }

    fn identifier(
        &self,
        _: &DeserializationManager,
        _: &TypeDescriptor,
        _: &Annotations,
    ) -> Option<Identifier> {
        None
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
        let obj = allocate(ctx, ty, id);
        for property in ty.properties() {
            let annotations = property.annotations();
            if annotations.ignore || annotations.adapt || !property.is_writable() {
                continue;
            }
            let value = if has_property_form(mgr, property, id) {
                read_property_form(mgr, ctx, property, id, endpoint)?
            } else {
                match first_object(mgr, endpoint, id, property.url())? {
                    Some(term) => read_property(mgr, ctx, property, id, &term, endpoint)?,
                    None => {
                        ctx.add_issue(Issue::new(IssueKind::MissingProperty {
                            subject: id.to_string(),
                            property: property.url().to_string(),
                        }));
                        Value::Null
                    }
                }
            };
            obj.set(property.name(), value);
        }
        Ok(obj.into())
    }
}

/// Deserializes static beans, from the triples of their static identifier.
///
/// Unlike [`BeanDeserializer`], this strategy walks the triples of the resource,
/// so predicates mapping to no property are reported as
/// [`UnmappedProperty`](IssueKind::UnmappedProperty) issues,
/// and predicates mapping to a read-only property are an error.
#[derive(Clone, Copy, Debug, Default)]
pub struct StaticBeanDeserializer;

impl Deserializer for StaticBeanDeserializer {
    fn name(&self) -> &'static str {
        "static bean"
    }

    fn accept(&self, ty: &TypeDescriptor, ann: &Annotations) -> bool {
        matches!(ty.kind(), TypeKind::Bean { .. }) && is_static(ty, ann)
    }

    fn identifier(
        &self,
        _: &DeserializationManager,
        ty: &TypeDescriptor,
        ann: &Annotations,
    ) -> Option<Identifier> {
        Some(static_identifier(ty, ann))
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
        let obj = allocate(ctx, ty, id);
        let query = Query::new().clause(id.to_term(), PatternTerm::var("p"), PatternTerm::var("o"));
        let mut done = HashSet::new();
        for solution in mgr.select_query(endpoint, query)? {
            let (Some(p), Some(o)) = (solution.get("p"), solution.get("o")) else {
                continue;
            };
            let url = p.value();
            if url == rdf::type_ {
                continue;
            }
            let Some(property) = ty.property_by_url(url) else {
                ctx.add_issue(Issue::new(IssueKind::UnmappedProperty {
                    subject: id.to_string(),
                    property: url.to_string(),
                }));
                continue;
            };
            let annotations = property.annotations();
            if annotations.ignore || annotations.adapt {
                continue;
            }
            if !property.is_writable() {
                return Err(DeserializationError::NotWritable {
                    type_name: ty.name().to_string(),
                    property: property.name().to_string(),
                });
            }
            let value = if has_property_form(mgr, property, id) {
                // all the elements are read at once
                if !done.insert(property.name()) {
                    continue;
                }
                read_property_form(mgr, ctx, property, id, endpoint)?
            } else {
                read_property(mgr, ctx, property, id, o, endpoint)?
            };
            obj.set(property.name(), value);
        }
        Ok(obj.into())
    }
}

fn allocate(ctx: &mut DeserializationContext, ty: &TypeDescriptor, id: &Identifier) -> ObjectRef {
    let obj = ObjectRef::bean(ty.name());
    for property in ty.properties() {
        obj.set(property.name(), Value::Null);
    }
    ctx.register(id.clone(), obj.clone().into());
    obj
}

fn has_property_form(
    mgr: &DeserializationManager,
    property: &PropertyDescriptor,
    owner: &Identifier,
) -> bool {
    let ann = Annotations::for_property(property, owner);
    mgr.registry()
        .get(property.declared_type())
        .map(|ty| is_property_form(ty, &ann))
        .unwrap_or(false)
}

fn read_property_form(
    mgr: &DeserializationManager,
    ctx: &mut DeserializationContext,
    property: &PropertyDescriptor,
    owner: &Identifier,
    endpoint: &dyn QueryEndpoint,
) -> Result<Value, DeserializationError> {
    let ann = Annotations::for_property(property, owner);
    match mgr.registry().get(property.declared_type()) {
        Some(ty) => mgr.deserialize_value(ctx, ty, &ann, owner, endpoint),
        None => Err(DeserializationError::UnknownType(
            property.declared_type().to_string(),
        )),
    }
}

fn read_property(
    mgr: &DeserializationManager,
    ctx: &mut DeserializationContext,
    property: &PropertyDescriptor,
    owner: &Identifier,
    term: &Term,
    endpoint: &dyn QueryEndpoint,
) -> Result<Value, DeserializationError> {
    let ann = Annotations::for_property(property, owner);
    let declared = mgr.registry().get(property.declared_type());
    mgr.deserialize_term(ctx, declared, &ann, term, endpoint)
}
