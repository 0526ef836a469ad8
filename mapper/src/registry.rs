//! The [`TypeRegistry`] holds the descriptors of all the types known to the mapper.
//!
//! Registering a type validates its names,
//! and resolves once and for all its class URL and the predicates of its properties.
use crate::descriptor::{TypeDescriptor, TypeKind};
use crate::object::Value;
use crate::RegistryError;
use lazy_static::lazy_static;
use rdfbean_term::PrimitiveType;
use regex::Regex;
use std::collections::HashMap;

lazy_static! {
    /// Type names are identifiers, optionally qualified with dots (`org.example.Person`)
    /// or nested with `$` (`Outer$Inner`).
    static ref TYPE_NAME: Regex = Regex::new(r"^[A-Za-z_][A-Za-z0-9_.$]*$").unwrap();
    /// Property names are plain identifiers.
    static ref PROPERTY_NAME: Regex = Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap();
}

/// The default prefix of class URLs.
pub const DEFAULT_CLASS_NAMESPACE: &str = "http://rdfbean.org/class/";

/// The name of the built-in collection type.
pub const LIST: &str = "list";
/// The name of the built-in array type.
pub const ARRAY: &str = "array";
/// The name of the built-in map type.
pub const MAP: &str = "map";

/// A set of [`TypeDescriptor`]s, indexed by name and by class URL.
///
/// A new registry knows the nine primitive types,
/// and the untyped containers [`LIST`], [`ARRAY`] and [`MAP`].
#[derive(Clone, Debug)]
pub struct TypeRegistry {
    class_namespace: String,
    types: HashMap<String, TypeDescriptor>,
    by_class_url: HashMap<String, String>,
}

impl TypeRegistry {
    /// A registry using the [default class namespace](DEFAULT_CLASS_NAMESPACE).
    pub fn new() -> Self {
        Self::new_unchecked(DEFAULT_CLASS_NAMESPACE.to_string())
    }

    /// A registry using `namespace` as the prefix of class URLs.
    pub fn with_class_namespace<T: Into<String>>(namespace: T) -> Result<Self, RegistryError> {
        let namespace = namespace.into();
        check_iri(&namespace)?;
        Ok(Self::new_unchecked(namespace))
    }

    fn new_unchecked(class_namespace: String) -> Self {
        let mut reg = TypeRegistry {
            class_namespace,
            types: HashMap::new(),
            by_class_url: HashMap::new(),
        };
        let builtins = PrimitiveType::ALL
            .into_iter()
            .map(TypeDescriptor::primitive)
            .chain([
                TypeDescriptor::collection(LIST, None),
                TypeDescriptor::array(ARRAY, None),
                TypeDescriptor::map(MAP, None, None),
            ]);
        for mut desc in builtins {
            let class_url = format!("{}{}", reg.class_namespace, desc.name());
            desc.resolve(class_url.clone(), vec![]);
            reg.by_class_url.insert(class_url, desc.name().to_string());
            reg.types.insert(desc.name().to_string(), desc);
        }
        reg
    }

    /// The prefix of class URLs.
    pub fn class_namespace(&self) -> &str {
        &self.class_namespace
    }

    /// Register a new type.
    ///
    /// The class URL of the type is its explicit subject if any,
    /// or the class namespace followed by its name.
    /// The predicate of each property is its explicit URI if any,
    /// or the namespace of the type (defaulting to the class URL followed by `#`)
    /// followed by its name.
    pub fn register(&mut self, mut desc: TypeDescriptor) -> Result<(), RegistryError> {
        let type_name = desc.name().to_string();
        if !TYPE_NAME.is_match(&type_name) {
            return Err(RegistryError::InvalidTypeName(type_name));
        }
        if self.types.contains_key(&type_name) {
            return Err(RegistryError::DuplicateType(type_name));
        }
        for (i, p) in desc.properties().iter().enumerate() {
            if !PROPERTY_NAME.is_match(p.name()) {
                return Err(RegistryError::InvalidPropertyName {
                    type_name,
                    property: p.name().to_string(),
                });
            }
            if desc.properties()[..i].iter().any(|q| q.name() == p.name()) {
                return Err(RegistryError::DuplicateProperty {
                    type_name,
                    property: p.name().to_string(),
                });
            }
        }
        if let Some(id) = &desc.config().id_property {
            if desc.get_property(id).is_none() {
                return Err(RegistryError::UnknownIdProperty {
                    type_name,
                    property: id.clone(),
                });
            }
        }

        let class_url = match &desc.config().subject {
            Some(subject) => subject.clone(),
            None => format!("{}{}", self.class_namespace, type_name),
        };
        check_iri(&class_url)?;
        if let Some(first) = self.by_class_url.get(&class_url) {
            return Err(RegistryError::DuplicateClassUrl {
                url: class_url,
                first: first.clone(),
                second: type_name,
            });
        }

        let prefix = match &desc.config().namespace {
            Some(ns) => ns.clone(),
            None => format!("{}#", class_url),
        };
        let mut property_urls: Vec<String> = Vec::with_capacity(desc.properties().len());
        for p in desc.properties() {
            let url = match &p.annotations().uri {
                Some(uri) => uri.clone(),
                None => format!("{}{}", prefix, p.name()),
            };
            check_iri(&url)?;
            if let Some(j) = property_urls.iter().position(|u| *u == url) {
                return Err(RegistryError::DuplicatePropertyUrl {
                    type_name,
                    url,
                    first: desc.properties()[j].name().to_string(),
                    second: p.name().to_string(),
                });
            }
            property_urls.push(url);
        }

        log::debug!("registering type {} as <{}>", type_name, class_url);
        desc.resolve(class_url.clone(), property_urls);
        self.by_class_url.insert(class_url, type_name.clone());
        self.types.insert(type_name, desc);
        Ok(())
    }

    /// Builder version of [`register`](TypeRegistry::register).
    pub fn with(mut self, desc: TypeDescriptor) -> Result<Self, RegistryError> {
        self.register(desc)?;
        Ok(self)
    }

    /// The type registered under `name`.
    pub fn get(&self, name: &str) -> Option<&TypeDescriptor> {
        self.types.get(name)
    }

    /// Whether a type is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// The type whose class URL is `url`.
    pub fn type_for_class_url(&self, url: &str) -> Option<&TypeDescriptor> {
        self.by_class_url.get(url).and_then(|name| self.types.get(name))
    }

    /// The type of `value`, or `None` if `value` is null or its type is not registered.
    pub fn descriptor_of(&self, value: &Value) -> Option<&TypeDescriptor> {
        value.type_name().and_then(|name| self.types.get(&name))
    }

    /// Iterate over all registered types, in no particular order.
    pub fn types(&self) -> impl Iterator<Item = &TypeDescriptor> + '_ {
        self.types.values()
    }

    /// The type of the elements of a collection or array type,
    /// or the type of the values of a map type.
    pub fn element_type(&self, ty: &TypeDescriptor) -> Option<&TypeDescriptor> {
        let name = match ty.kind() {
            TypeKind::Collection { element } | TypeKind::Array { element } => element.as_ref(),
            TypeKind::Map { value, .. } => value.as_ref(),
            _ => None,
        };
        name.and_then(|n| self.get(n))
    }

    /// The type of the keys of a map type.
    pub fn key_type(&self, ty: &TypeDescriptor) -> Option<&TypeDescriptor> {
        match ty.kind() {
            TypeKind::Map { key, .. } => key.as_ref().and_then(|n| self.get(n)),
            _ => None,
        }
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn check_iri(iri: &str) -> Result<(), RegistryError> {
    oxiri::Iri::parse(iri)
        .map(|_| ())
        .map_err(|source| RegistryError::InvalidIri {
            iri: iri.to_string(),
            source,
        })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::descriptor::PropertyDescriptor;
    use crate::object::ObjectRef;
    use test_case::test_case;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    fn person() -> TypeDescriptor {
        TypeDescriptor::bean("org.example.Person")
            .property(PropertyDescriptor::new("name", "string"))
            .property(PropertyDescriptor::new("knows", "org.example.Person"))
    }

    #[test]
    fn builtins() {
        let reg = TypeRegistry::new();
        for t in PrimitiveType::ALL {
            assert!(reg.get(t.name()).unwrap().is_primitive());
        }
        assert!(reg.get(LIST).unwrap().is_sequence());
        assert!(reg.get(ARRAY).unwrap().is_sequence());
        assert!(matches!(reg.get(MAP).unwrap().kind(), TypeKind::Map { .. }));
        assert_eq!(
            reg.type_for_class_url("http://rdfbean.org/class/list")
                .map(TypeDescriptor::name),
            Some(LIST)
        );
    }

    #[test]
    fn default_urls() -> TestResult {
        let mut reg = TypeRegistry::new();
        reg.register(person())?;
        let d = reg.get("org.example.Person").unwrap();
        assert_eq!(d.class_url(), "http://rdfbean.org/class/org.example.Person");
        assert_eq!(
            d.get_property("name").unwrap().url(),
            "http://rdfbean.org/class/org.example.Person#name"
        );
        assert_eq!(
            reg.type_for_class_url(d.class_url()).map(TypeDescriptor::name),
            Some("org.example.Person")
        );
        Ok(())
    }

    #[test]
    fn custom_urls() -> TestResult {
        let reg = TypeRegistry::with_class_namespace("http://example.org/classes/")?
            .with(
                TypeDescriptor::bean("Person")
                    .with_namespace("http://xmlns.com/foaf/0.1/")
                    .property(PropertyDescriptor::new("name", "string"))
                    .property(
                        PropertyDescriptor::new("mbox", "url")
                            .with_uri("http://example.org/ns/mailbox"),
                    ),
            )?
            .with(TypeDescriptor::bean("Config").with_subject("http://example.org/config"))?;
        let p = reg.get("Person").unwrap();
        assert_eq!(p.class_url(), "http://example.org/classes/Person");
        assert_eq!(
            p.get_property("name").unwrap().url(),
            "http://xmlns.com/foaf/0.1/name"
        );
        assert_eq!(
            p.property_by_url("http://example.org/ns/mailbox")
                .map(PropertyDescriptor::name),
            Some("mbox")
        );
        assert_eq!(reg.get("Config").unwrap().class_url(), "http://example.org/config");
        Ok(())
    }

    #[test]
    fn descriptor_of() -> TestResult {
        let reg = TypeRegistry::new().with(person())?;
        let alice = Value::from(ObjectRef::bean("org.example.Person"));
        assert_eq!(
            reg.descriptor_of(&alice).map(TypeDescriptor::name),
            Some("org.example.Person")
        );
        assert_eq!(
            reg.descriptor_of(&Value::from(42)).map(TypeDescriptor::name),
            Some("int")
        );
        assert!(reg.descriptor_of(&Value::Null).is_none());
        assert!(reg
            .descriptor_of(&Value::from(ObjectRef::bean("Unknown")))
            .is_none());
        Ok(())
    }

    #[test_case("Person" ; "simple")]
    #[test_case("org.example.Person" ; "qualified")]
    #[test_case("Outer$Inner" ; "nested")]
    #[test_case("_private" ; "underscore")]
    fn valid_type_name(name: &str) {
        assert!(TypeRegistry::new().register(TypeDescriptor::bean(name)).is_ok());
    }

    #[test_case("" ; "empty")]
    #[test_case("1Person" ; "leading digit")]
    #[test_case("a person" ; "space")]
    #[test_case("Person<T>" ; "generic")]
    fn invalid_type_name(name: &str) {
        assert!(matches!(
            TypeRegistry::new().register(TypeDescriptor::bean(name)),
            Err(RegistryError::InvalidTypeName(_))
        ));
    }

    #[test]
    fn duplicate_type() {
        let mut reg = TypeRegistry::new();
        assert!(reg.register(person()).is_ok());
        assert!(matches!(
            reg.register(person()),
            Err(RegistryError::DuplicateType(_))
        ));
        assert!(matches!(
            reg.register(TypeDescriptor::bean(LIST)),
            Err(RegistryError::DuplicateType(_))
        ));
    }

    #[test]
    fn invalid_properties() {
        let mut reg = TypeRegistry::new();
        assert!(matches!(
            reg.register(
                TypeDescriptor::bean("A").property(PropertyDescriptor::new("my.name", "string"))
            ),
            Err(RegistryError::InvalidPropertyName { .. })
        ));
        assert!(matches!(
            reg.register(
                TypeDescriptor::bean("B")
                    .property(PropertyDescriptor::new("name", "string"))
                    .property(PropertyDescriptor::new("name", "int"))
            ),
            Err(RegistryError::DuplicateProperty { .. })
        ));
        assert!(matches!(
            reg.register(
                TypeDescriptor::bean("C")
                    .property(PropertyDescriptor::new("a", "string"))
                    .property(
                        PropertyDescriptor::new("b", "string")
                            .with_uri("http://rdfbean.org/class/C#a")
                    )
            ),
            Err(RegistryError::DuplicatePropertyUrl { .. })
        ));
        assert!(matches!(
            reg.register(TypeDescriptor::bean("D").with_id_property("id")),
            Err(RegistryError::UnknownIdProperty { .. })
        ));
        // failed registrations leave no trace
        assert!(!reg.contains("A") && !reg.contains("B"));
        assert!(!reg.contains("C") && !reg.contains("D"));
    }

    #[test]
    fn invalid_iris() {
        assert!(matches!(
            TypeRegistry::with_class_namespace("not an iri"),
            Err(RegistryError::InvalidIri { .. })
        ));
        assert!(matches!(
            TypeRegistry::new().register(TypeDescriptor::bean("A").with_subject("a b")),
            Err(RegistryError::InvalidIri { .. })
        ));
    }

    #[test]
    fn duplicate_class_url() {
        let mut reg = TypeRegistry::new();
        reg.register(TypeDescriptor::bean("A").with_subject("http://example.org/X"))
            .unwrap();
        assert!(matches!(
            reg.register(TypeDescriptor::bean("B").with_subject("http://example.org/X")),
            Err(RegistryError::DuplicateClassUrl { .. })
        ));
    }

    #[test]
    fn element_types() -> TestResult {
        let reg = TypeRegistry::new()
            .with(person())?
            .with(TypeDescriptor::collection("Team", Some("org.example.Person")))?
            .with(TypeDescriptor::map("Ages", Some("string"), Some("int")))?;
        let team = reg.get("Team").unwrap();
        assert_eq!(
            reg.element_type(team).map(TypeDescriptor::name),
            Some("org.example.Person")
        );
        let ages = reg.get("Ages").unwrap();
        assert_eq!(reg.key_type(ages).map(TypeDescriptor::name), Some("string"));
        assert_eq!(reg.element_type(ages).map(TypeDescriptor::name), Some("int"));
        assert!(reg.element_type(reg.get(LIST).unwrap()).is_none());
        Ok(())
    }
}
