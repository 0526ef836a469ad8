//! The host object model walked by serializers and built by deserializers.
//!
//! Values are dynamically typed:
//! a [`Value`] is either null, a primitive [`Literal`], an enum constant,
//! or a shared handle ([`ObjectRef`]) to an [`Object`].
//! Object handles have reference identity,
//! which is what serializers use to detect cycles and shared references.
use rdfbean_term::Literal;
use std::cell::{Ref, RefCell, RefMut};
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

/// A constant of an enum type.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct EnumValue {
    /// The name of the enum type
    pub type_name: String,
    /// The name of the constant
    pub constant: String,
}

impl EnumValue {
    /// Build an enum constant.
    pub fn new<T: Into<String>, C: Into<String>>(type_name: T, constant: C) -> Self {
        EnumValue {
            type_name: type_name.into(),
            constant: constant.into(),
        }
    }
}

/// Any host value.
///
/// Objects are compared by identity, other values structurally.
#[derive(Clone, Debug, Default)]
pub enum Value {
    /// The absent value
    #[default]
    Null,
    /// A primitive value
    Primitive(Literal),
    /// An enum constant
    Enum(EnumValue),
    /// A bean, a collection, an array or a map
    Object(ObjectRef),
}

impl Value {
    /// Whether this value is null
    /// (either [`Value::Null`] or the [null literal](Literal::Null)).
    pub fn is_null(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Primitive(lit) => lit.is_null(),
            _ => false,
        }
    }

    /// The primitive value, if this is one.
    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Value::Primitive(lit) => Some(lit),
            _ => None,
        }
    }

    /// The enum constant, if this is one.
    pub fn as_enum(&self) -> Option<&EnumValue> {
        match self {
            Value::Enum(e) => Some(e),
            _ => None,
        }
    }

    /// The object handle, if this is one.
    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    /// The name of the runtime type of this value, or `None` for null.
    pub fn type_name(&self) -> Option<String> {
        match self {
            Value::Null => None,
            Value::Primitive(lit) => lit.primitive_type().map(|t| t.name().to_string()),
            Value::Enum(e) => Some(e.type_name.clone()),
            Value::Object(o) => Some(o.type_name()),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
            (Value::Enum(a), Value::Enum(b)) => a == b,
            (Value::Primitive(a), Value::Primitive(b)) => a == b,
            (a, b) => a.is_null() && b.is_null(),
        }
    }
}

impl From<Literal> for Value {
    fn from(value: Literal) -> Self {
        if value.is_null() {
            Value::Null
        } else {
            Value::Primitive(value)
        }
    }
}

impl From<EnumValue> for Value {
    fn from(value: EnumValue) -> Self {
        Value::Enum(value)
    }
}

impl From<ObjectRef> for Value {
    fn from(value: ObjectRef) -> Self {
        Value::Object(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or_default()
    }
}

macro_rules! value_from_primitive {
    ($($rust_type:ty),*) => {
        $(
            impl From<$rust_type> for Value {
                fn from(value: $rust_type) -> Self {
                    Value::Primitive(Literal::from(value))
                }
            }
        )*
    };
}

value_from_primitive!(
    &str,
    String,
    bool,
    i16,
    i32,
    i64,
    f32,
    f64,
    chrono::DateTime<chrono::Utc>,
    url::Url
);

/// The content of an [`Object`], depending on the kind of its type.
#[derive(Clone, Debug)]
pub enum ObjectData {
    /// The property values of a bean
    Fields(BTreeMap<String, Value>),
    /// The elements of a collection or an array
    Items(Vec<Value>),
    /// The entries of a map
    Entries(Vec<(Value, Value)>),
}

/// A typed aggregate value.
#[derive(Clone, Debug)]
pub struct Object {
    type_name: String,
    /// The content of this object
    pub data: ObjectData,
}

impl Object {
    /// Build an object of the given type with the given content.
    pub fn new<T: Into<String>>(type_name: T, data: ObjectData) -> Self {
        Object {
            type_name: type_name.into(),
            data,
        }
    }

    /// The name of the type of this object.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// The value of field `name` (null if unset or if this is not a bean).
    pub fn get(&self, name: &str) -> Value {
        match &self.data {
            ObjectData::Fields(fields) => fields.get(name).cloned().unwrap_or_default(),
            _ => Value::Null,
        }
    }
}

/// An identity of an [`ObjectRef`], usable as a map key.
///
/// Two handles have the same key if and only if they point to the same object,
/// as long as that object is alive.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ObjectKey(usize);

/// A shared, mutable handle to an [`Object`].
///
/// Cloning the handle does not clone the object.
#[derive(Clone)]
pub struct ObjectRef(Rc<RefCell<Object>>);

impl ObjectRef {
    /// Wrap `object` in a new handle.
    pub fn new(object: Object) -> Self {
        ObjectRef(Rc::new(RefCell::new(object)))
    }

    /// A new bean of the given type, with no field set.
    pub fn bean<T: Into<String>>(type_name: T) -> Self {
        Self::new(Object::new(type_name, ObjectData::Fields(BTreeMap::new())))
    }

    /// A new collection (or array) of the given type.
    pub fn list<T, I>(type_name: T, items: I) -> Self
    where
        T: Into<String>,
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let items = items.into_iter().map(Into::into).collect();
        Self::new(Object::new(type_name, ObjectData::Items(items)))
    }

    /// A new map of the given type.
    pub fn map<T, I, K, V>(type_name: T, entries: I) -> Self
    where
        T: Into<String>,
        I: IntoIterator<Item = (K, V)>,
        K: Into<Value>,
        V: Into<Value>,
    {
        let entries = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self::new(Object::new(type_name, ObjectData::Entries(entries)))
    }

    /// The identity of this handle.
    pub fn key(&self) -> ObjectKey {
        ObjectKey(Rc::as_ptr(&self.0) as *const () as usize)
    }

    /// Whether both handles point to the same object.
    pub fn ptr_eq(&self, other: &ObjectRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Immutably borrow the object.
    ///
    /// # Panics
    /// If the object is currently mutably borrowed.
    pub fn borrow(&self) -> Ref<'_, Object> {
        self.0.borrow()
    }

    /// Mutably borrow the object.
    ///
    /// # Panics
    /// If the object is currently borrowed.
    pub fn borrow_mut(&self) -> RefMut<'_, Object> {
        self.0.borrow_mut()
    }

    /// The name of the type of the object.
    pub fn type_name(&self) -> String {
        self.borrow().type_name.clone()
    }

    /// The value of field `name` (null if unset or if this is not a bean).
    pub fn get(&self, name: &str) -> Value {
        self.borrow().get(name)
    }

    /// Set field `name` to `value`.
    ///
    /// Turns the object into a bean if it was not one.
    pub fn set<N: Into<String>, V: Into<Value>>(&self, name: N, value: V) {
        let mut obj = self.borrow_mut();
        if !matches!(obj.data, ObjectData::Fields(_)) {
            obj.data = ObjectData::Fields(BTreeMap::new());
        }
        if let ObjectData::Fields(fields) = &mut obj.data {
            fields.insert(name.into(), value.into());
        }
    }

    /// Builder version of [`set`](ObjectRef::set).
    pub fn with<N: Into<String>, V: Into<Value>>(self, name: N, value: V) -> Self {
        self.set(name, value);
        self
    }

    /// Replace the content of this object with `items`.
    pub fn set_items(&self, items: Vec<Value>) {
        self.borrow_mut().data = ObjectData::Items(items);
    }

    /// Replace the content of this object with `entries`.
    pub fn set_entries(&self, entries: Vec<(Value, Value)>) {
        self.borrow_mut().data = ObjectData::Entries(entries);
    }

    /// A copy of the elements of this collection, or `None` if this is not a collection.
    pub fn items(&self) -> Option<Vec<Value>> {
        match &self.borrow().data {
            ObjectData::Items(items) => Some(items.clone()),
            _ => None,
        }
    }

    /// A copy of the entries of this map, or `None` if this is not a map.
    pub fn entries(&self) -> Option<Vec<(Value, Value)>> {
        match &self.borrow().data {
            ObjectData::Entries(entries) => Some(entries.clone()),
            _ => None,
        }
    }
}

/// Does not recurse into the object, so that cyclic graphs can be printed.
impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.try_borrow() {
            Ok(obj) => write!(f, "{}@{:x}", obj.type_name, self.key().0),
            Err(_) => write!(f, "<borrowed>@{:x}", self.key().0),
        }
    }
}
