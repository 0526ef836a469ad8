//! Naming rules for the resources generated by the mapper.
//!
//! * The URL of a class is resolved at registration
//!   (see [`TypeRegistry::register`](crate::TypeRegistry::register)).
//! * The URL of an object is the URL of its class followed by
//!   the (URL-encoded) value of its identity property, if its type declares one;
//!   otherwise it is derived from the identity of the object in memory,
//!   and is therefore only unique within the current process.
//! * Static values are identified by the URL of their class,
//!   or by the predicate of the owning property followed by `/static`.
use crate::descriptor::{Annotations, TypeDescriptor};
use crate::object::{ObjectKey, ObjectRef, Value};
use crate::SerializationError;
use rdfbean_term::Identifier;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use url::form_urlencoded::byte_serialize;

/// The last segment of a qualified type name.
pub fn simple_name(type_name: &str) -> &str {
    type_name
        .rsplit(|c: char| c == '.' || c == '$')
        .next()
        .unwrap_or(type_name)
}

/// The URL of `object`, of type `ty`.
///
/// Falls back to [`fallback_url`] when `ty` has no identity property,
/// or when this property is null.
pub fn object_url(
    ty: &TypeDescriptor,
    object: &ObjectRef,
    instance_namespace: &str,
) -> Result<String, SerializationError> {
    if let Some(id_property) = &ty.config().id_property {
        let id = match object.get(id_property) {
            Value::Primitive(lit) if !lit.is_null() => Some(lit.lexical_form()),
            Value::Enum(e) => Some(e.constant),
            Value::Object(_) => {
                return Err(SerializationError::InvalidId {
                    type_name: ty.name().to_string(),
                    property: id_property.clone(),
                })
            }
            _ => None,
        };
        if let Some(id) = id {
            let encoded: String = byte_serialize(id.as_bytes()).collect();
            return Ok(format!("{}/{}", ty.class_url(), encoded));
        }
    }
    Ok(fallback_url(instance_namespace, ty.name(), object.key()))
}

/// A URL for an object with no identity property,
/// built from a hash of its identity in memory.
pub fn fallback_url(instance_namespace: &str, type_name: &str, key: ObjectKey) -> String {
    let mut hasher = DefaultHasher::new();
    key.hash(&mut hasher);
    format!(
        "{}{}_{:x}",
        instance_namespace,
        simple_name(type_name),
        hasher.finish()
    )
}

/// The URL identifying the static value of a property.
pub fn static_property_url(property_url: &str) -> String {
    format!("{}/static", property_url)
}

/// Whether values of type `ty` are static in the context `ann`,
/// either because the type or because the owning property is flagged static.
pub fn is_static(ty: &TypeDescriptor, ann: &Annotations) -> bool {
    ty.config().is_static || ann.is_static()
}

/// Whether a sequence of type `ty` is linked element by element to its owner
/// in the context `ann`.
///
/// Static sequences never are: their elements hang from their static identifier,
/// even when the owning property has an explicit predicate.
pub fn is_property_form(ty: &TypeDescriptor, ann: &Annotations) -> bool {
    ty.is_sequence() && ann.is_property_form() && !is_static(ty, ann)
}

/// The identifier of the static value of type `ty`.
///
/// Types flagged static are identified by their class URL,
/// values of static properties by the URL of the property.
pub fn static_identifier(ty: &TypeDescriptor, ann: &Annotations) -> Identifier {
    if ty.config().is_static {
        return Identifier::resource(ty.class_url());
    }
    ann.static_identifier()
        .unwrap_or_else(|| Identifier::resource(ty.class_url()))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::descriptor::PropertyDescriptor;
    use crate::{EnumValue, TypeRegistry};
    use test_case::test_case;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    #[test_case("Person", "Person" ; "simple")]
    #[test_case("org.example.Person", "Person" ; "qualified")]
    #[test_case("org.example.Outer$Inner", "Inner" ; "nested")]
    fn simple_names(name: &str, expected: &str) {
        assert_eq!(simple_name(name), expected);
    }

    fn registry() -> Result<TypeRegistry, crate::RegistryError> {
        TypeRegistry::new()
            .with(
                TypeDescriptor::bean("ex.Person")
                    .property(PropertyDescriptor::new("login", "string"))
                    .property(PropertyDescriptor::new("friend", "ex.Person"))
                    .with_id_property("login"),
            )?
            .with(TypeDescriptor::enumeration("ex.Color", ["RED", "GREEN"]))?
            .with(
                TypeDescriptor::bean("ex.Pixel")
                    .property(PropertyDescriptor::new("color", "ex.Color"))
                    .with_id_property("color"),
            )?
            .with(TypeDescriptor::bean("ex.Anonymous"))
    }

    #[test]
    fn url_from_id_property() -> TestResult {
        let reg = registry()?;
        let ty = reg.get("ex.Person").unwrap();
        let alice = ObjectRef::bean("ex.Person").with("login", "alice smith/1");
        assert_eq!(
            object_url(ty, &alice, "http://example.org/")?,
            "http://rdfbean.org/class/ex.Person/alice+smith%2F1"
        );
        let px = ObjectRef::bean("ex.Pixel").with("color", EnumValue::new("ex.Color", "RED"));
        assert_eq!(
            object_url(reg.get("ex.Pixel").unwrap(), &px, "http://example.org/")?,
            "http://rdfbean.org/class/ex.Pixel/RED"
        );
        Ok(())
    }

    #[test]
    fn fallback_is_stable_within_process() -> TestResult {
        let reg = registry()?;
        let ty = reg.get("ex.Anonymous").unwrap();
        let a = ObjectRef::bean("ex.Anonymous");
        let b = ObjectRef::bean("ex.Anonymous");
        let url_a = object_url(ty, &a, "http://example.org/")?;
        assert!(url_a.starts_with("http://example.org/Anonymous_"));
        assert_eq!(url_a, object_url(ty, &a.clone(), "http://example.org/")?);
        assert_ne!(url_a, object_url(ty, &b, "http://example.org/")?);
        Ok(())
    }

    #[test]
    fn null_id_falls_back() -> TestResult {
        let reg = registry()?;
        let ty = reg.get("ex.Person").unwrap();
        let nobody = ObjectRef::bean("ex.Person");
        assert!(object_url(ty, &nobody, "http://example.org/")?
            .starts_with("http://example.org/Person_"));
        Ok(())
    }

    #[test]
    fn complex_id_fails() -> TestResult {
        let reg = registry()?;
        let ty = reg.get("ex.Person").unwrap();
        let weird = ObjectRef::bean("ex.Person");
        weird.set("login", ObjectRef::bean("ex.Person"));
        assert!(matches!(
            object_url(ty, &weird, "http://example.org/"),
            Err(SerializationError::InvalidId { .. })
        ));
        Ok(())
    }

    #[test]
    fn static_property() {
        assert_eq!(
            static_property_url("http://example.org/ns#config"),
            "http://example.org/ns#config/static"
        );
    }
}
