//! Type descriptors tell the mapper how to handle each type of host value.
//!
//! A [`TypeDescriptor`] combines
//! the structure of a type ([`TypeKind`]),
//! its class-level annotations ([`TypeConfig`])
//! and, for beans, the description of its properties ([`PropertyDescriptor`]).
//! Descriptors are built by the caller,
//! then resolved once when registered in a [`TypeRegistry`](crate::TypeRegistry).
use crate::object::{Object, Value};
use crate::support::static_property_url;
use rdfbean_term::{Identifier, PrimitiveType};
use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use std::rc::Rc;

/// A function substituting another value to a bean when it is serialized.
pub type Adapter = Rc<dyn Fn(&Object) -> Result<Value, Box<dyn Error + Send + Sync>>>;

/// The structure of a type.
#[derive(Clone, Debug)]
pub enum TypeKind {
    /// A primitive type, represented by a literal
    Primitive(PrimitiveType),
    /// An enum type, represented by the name of its constants
    Enum {
        /// The names of the constants
        constants: Vec<String>,
    },
    /// A growable, ordered collection
    Collection {
        /// The declared type of the elements, if known
        element: Option<String>,
    },
    /// A fixed-size, ordered collection
    Array {
        /// The declared type of the elements, if known
        element: Option<String>,
    },
    /// An association of keys to values
    Map {
        /// The declared type of the keys, if known
        key: Option<String>,
        /// The declared type of the values, if known
        value: Option<String>,
    },
    /// A bean, i.e. a set of named properties
    Bean {
        /// The properties of the bean
        properties: Vec<PropertyDescriptor>,
    },
}

/// Annotations attached to a property of a bean.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PropertyAnnotations {
    /// Explicit predicate.
    /// On a collection or array property, elements are linked directly to the owner
    /// through this predicate, instead of being serialized as an indexed sequence.
    pub uri: Option<String>,
    /// The property is neither serialized nor deserialized.
    pub ignore: bool,
    /// The value of the property is serialized as a static resource,
    /// shared by all the owners.
    pub is_static: bool,
    /// The value of this property is serialized in place of the bean.
    pub adapt: bool,
    /// The (string) value of this property is the name of a registered type,
    /// serialized as the URL of that type.
    pub type_ref: bool,
}

/// The description of a property of a bean.
#[derive(Clone, Debug)]
pub struct PropertyDescriptor {
    name: String,
    declared_type: String,
    annotations: PropertyAnnotations,
    writable: bool,
    url: String,
}

impl PropertyDescriptor {
    /// A writable, non-annotated property.
    pub fn new<N: Into<String>, T: Into<String>>(name: N, declared_type: T) -> Self {
        PropertyDescriptor {
            name: name.into(),
            declared_type: declared_type.into(),
            annotations: PropertyAnnotations::default(),
            writable: true,
            url: String::new(),
        }
    }

    /// Set an explicit predicate for this property.
    pub fn with_uri<T: Into<String>>(mut self, uri: T) -> Self {
        self.annotations.uri = Some(uri.into());
        self
    }

    /// Flag this property as ignored.
    pub fn ignored(mut self) -> Self {
        self.annotations.ignore = true;
        self
    }

    /// Flag the value of this property as static.
    pub fn with_static(mut self) -> Self {
        self.annotations.is_static = true;
        self
    }

    /// Flag this property as the adapter of its bean.
    pub fn adapter(mut self) -> Self {
        self.annotations.adapt = true;
        self
    }

    /// Flag this property as holding the name of a registered type.
    pub fn type_ref(mut self) -> Self {
        self.annotations.type_ref = true;
        self
    }

    /// Flag this property as read-only.
    pub fn read_only(mut self) -> Self {
        self.writable = false;
        self
    }

    /// The name of this property.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The name of the declared type of this property.
    pub fn declared_type(&self) -> &str {
        &self.declared_type
    }

    /// The annotations of this property.
    pub fn annotations(&self) -> &PropertyAnnotations {
        &self.annotations
    }

    /// Whether this property can be set by deserializers.
    pub fn is_writable(&self) -> bool {
        self.writable
    }

    /// The predicate of this property.
    ///
    /// Empty until the owning type is registered.
    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Class-level annotations of a type.
#[derive(Clone, Default)]
pub struct TypeConfig {
    /// All the values of this type are serialized as a single resource,
    /// identified by the class URL.
    pub is_static: bool,
    /// Explicit class URL.
    pub subject: Option<String>,
    /// Explicit prefix for the predicates of the properties.
    pub namespace: Option<String>,
    /// The property whose value identifies an instance in its URL.
    pub id_property: Option<String>,
    /// A function substituting another value to the bean when it is serialized.
    pub adapter: Option<Adapter>,
}

impl fmt::Debug for TypeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeConfig")
            .field("is_static", &self.is_static)
            .field("subject", &self.subject)
            .field("namespace", &self.namespace)
            .field("id_property", &self.id_property)
            .field("adapter", &self.adapter.as_ref().map(|_| ".."))
            .finish()
    }
}

/// The description of a type.
#[derive(Clone, Debug)]
pub struct TypeDescriptor {
    name: String,
    kind: TypeKind,
    config: TypeConfig,
    class_url: String,
    by_url: HashMap<String, usize>,
}

impl TypeDescriptor {
    /// A descriptor of the given kind, with no annotation.
    pub fn new<T: Into<String>>(name: T, kind: TypeKind) -> Self {
        TypeDescriptor {
            name: name.into(),
            kind,
            config: TypeConfig::default(),
            class_url: String::new(),
            by_url: HashMap::new(),
        }
    }

    /// The descriptor of a primitive type, named after it.
    pub fn primitive(t: PrimitiveType) -> Self {
        Self::new(t.name(), TypeKind::Primitive(t))
    }

    /// The descriptor of an enum type.
    pub fn enumeration<T, I>(name: T, constants: I) -> Self
    where
        T: Into<String>,
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let constants = constants.into_iter().map(Into::into).collect();
        Self::new(name, TypeKind::Enum { constants })
    }

    /// The descriptor of a collection type.
    pub fn collection<T: Into<String>>(name: T, element: Option<&str>) -> Self {
        let element = element.map(str::to_string);
        Self::new(name, TypeKind::Collection { element })
    }

    /// The descriptor of an array type.
    pub fn array<T: Into<String>>(name: T, element: Option<&str>) -> Self {
        let element = element.map(str::to_string);
        Self::new(name, TypeKind::Array { element })
    }

    /// The descriptor of a map type.
    pub fn map<T: Into<String>>(name: T, key: Option<&str>, value: Option<&str>) -> Self {
        let key = key.map(str::to_string);
        let value = value.map(str::to_string);
        Self::new(name, TypeKind::Map { key, value })
    }

    /// The descriptor of a bean type, with no property yet.
    pub fn bean<T: Into<String>>(name: T) -> Self {
        Self::new(name, TypeKind::Bean { properties: vec![] })
    }

    /// Add a property to this bean type.
    ///
    /// Ignored if this is not a bean type.
    pub fn property(mut self, property: PropertyDescriptor) -> Self {
        if let TypeKind::Bean { properties } = &mut self.kind {
            properties.push(property);
        }
        self
    }

    /// Flag this type as static.
    pub fn with_static(mut self) -> Self {
        self.config.is_static = true;
        self
    }

    /// Set an explicit class URL.
    pub fn with_subject<T: Into<String>>(mut self, subject: T) -> Self {
        self.config.subject = Some(subject.into());
        self
    }

    /// Set an explicit prefix for the predicates of the properties.
    pub fn with_namespace<T: Into<String>>(mut self, namespace: T) -> Self {
        self.config.namespace = Some(namespace.into());
        self
    }

    /// Set the property whose value identifies an instance in its URL.
    pub fn with_id_property<T: Into<String>>(mut self, property: T) -> Self {
        self.config.id_property = Some(property.into());
        self
    }

    /// Set the function substituting another value to the bean when it is serialized.
    pub fn with_adapter<F>(mut self, adapter: F) -> Self
    where
        F: Fn(&Object) -> Result<Value, Box<dyn Error + Send + Sync>> + 'static,
    {
        self.config.adapter = Some(Rc::new(adapter));
        self
    }

    /// The name of this type.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The structure of this type.
    pub fn kind(&self) -> &TypeKind {
        &self.kind
    }

    /// The class-level annotations of this type.
    pub fn config(&self) -> &TypeConfig {
        &self.config
    }

    /// Whether this type is primitive (i.e. represented by a literal).
    pub fn is_primitive(&self) -> bool {
        matches!(self.kind, TypeKind::Primitive(_))
    }

    /// Whether this type is a collection or an array.
    pub fn is_sequence(&self) -> bool {
        matches!(
            self.kind,
            TypeKind::Collection { .. } | TypeKind::Array { .. }
        )
    }

    /// Whether values of both types may stand for the same RDF resource:
    /// either both types are the same,
    /// or both are collections, both are arrays, or both are maps.
    pub fn is_compatible_with(&self, other: &TypeDescriptor) -> bool {
        use TypeKind::*;
        self.name == other.name
            || matches!(
                (&self.kind, &other.kind),
                (Collection { .. }, Collection { .. })
                    | (Array { .. }, Array { .. })
                    | (Map { .. }, Map { .. })
            )
    }

    /// The class URL of this type.
    ///
    /// Empty until this type is registered.
    pub fn class_url(&self) -> &str {
        &self.class_url
    }

    /// The properties of this type (empty if it is not a bean type).
    pub fn properties(&self) -> &[PropertyDescriptor] {
        match &self.kind {
            TypeKind::Bean { properties } => properties,
            _ => &[],
        }
    }

    /// The property with the given name.
    pub fn get_property(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.properties().iter().find(|p| p.name == name)
    }

    /// The property with the given predicate.
    pub fn property_by_url(&self, url: &str) -> Option<&PropertyDescriptor> {
        self.by_url.get(url).map(|i| &self.properties()[*i])
    }

    /// Record the resolved class URL and predicates.
    ///
    /// `property_urls` must have one URL per property, in the order of the properties.
    pub(crate) fn resolve(&mut self, class_url: String, property_urls: Vec<String>) {
        self.class_url = class_url;
        self.by_url.clear();
        if let TypeKind::Bean { properties } = &mut self.kind {
            for (i, (p, url)) in properties.iter_mut().zip(property_urls).enumerate() {
                self.by_url.insert(url.clone(), i);
                p.url = url;
            }
        }
    }
}

/// The context in which a value is (de)serialized:
/// the annotations of the property holding it, if any.
#[derive(Clone, Debug, Default)]
pub struct Annotations {
    /// The annotations of the owning property (all unset for a root value).
    pub property: PropertyAnnotations,
    /// The predicate of the owning property.
    pub property_url: Option<String>,
    /// The identifier of the bean owning the property.
    pub owner: Option<Identifier>,
}

impl Annotations {
    /// The annotations of a root value.
    pub fn none() -> Self {
        Self::default()
    }

    /// The annotations of the value of `property` in the bean identified by `owner`.
    pub fn for_property(property: &PropertyDescriptor, owner: &Identifier) -> Self {
        Annotations {
            property: property.annotations.clone(),
            property_url: Some(property.url.clone()),
            owner: Some(owner.clone()),
        }
    }

    /// Whether the value is a sequence linked element by element to its owner,
    /// through an explicit predicate.
    pub fn is_property_form(&self) -> bool {
        self.property.uri.is_some() && self.property_url.is_some() && self.owner.is_some()
    }

    /// Whether the owning property is flagged static.
    pub fn is_static(&self) -> bool {
        self.property.is_static
    }

    /// The identifier of the static value of the owning property.
    pub fn static_identifier(&self) -> Option<Identifier> {
        match &self.property_url {
            Some(url) if self.property.is_static => {
                Some(Identifier::resource(static_property_url(url)))
            }
            _ => None,
        }
    }

    /// The flags selecting a strategy.
    pub(crate) fn flags(&self) -> u8 {
        (self.property.is_static as u8)
            | (self.is_property_form() as u8) << 1
            | (self.property.type_ref as u8) << 2
    }
}
