use super::*;
use crate::descriptor::PropertyDescriptor;
use crate::object::EnumValue;
use crate::registry::TypeRegistry;
use crate::MapperConfig;
use rdfbean_inmem::{Any, TripleBuffer};
use rdfbean_term::ns::{bean, rdf, xsd};
use rdfbean_term::{Literal, Term, TermKind};
use std::rc::Rc;

type TestResult = Result<(), Box<dyn std::error::Error>>;

const NS: &str = "http://example.org/ns#";

fn registry() -> Result<Rc<TypeRegistry>, crate::RegistryError> {
    let reg = TypeRegistry::new()
        .with(
            TypeDescriptor::bean("Person")
                .with_namespace(NS)
                .property(PropertyDescriptor::new("name", "string"))
                .property(PropertyDescriptor::new("age", "int"))
                .property(PropertyDescriptor::new("friend", "Person"))
                .property(PropertyDescriptor::new("password", "string").ignored()),
        )?
        .with(
            TypeDescriptor::bean("User")
                .with_namespace(NS)
                .property(PropertyDescriptor::new("login", "string"))
                .with_id_property("login"),
        )?
        .with(TypeDescriptor::enumeration("Color", ["RED", "GREEN", "BLUE"]))?
        .with(TypeDescriptor::collection("Team", Some("Person")))?
        .with(TypeDescriptor::collection("Registry", Some("string")).with_static())?
        .with(
            TypeDescriptor::bean("Club")
                .with_namespace(NS)
                .property(
                    PropertyDescriptor::new("members", "Team")
                        .with_uri("http://example.org/ns#member"),
                )
                .property(PropertyDescriptor::new("settings", "Settings").with_static())
                .property(PropertyDescriptor::new("kind", "string").type_ref()),
        )?
        .with(
            TypeDescriptor::bean("Settings")
                .with_namespace(NS)
                .property(PropertyDescriptor::new("verbose", "boolean")),
        )?
        .with(
            TypeDescriptor::bean("Config")
                .with_static()
                .with_namespace(NS)
                .property(PropertyDescriptor::new("verbose", "boolean")),
        )?
        .with(
            TypeDescriptor::bean("Wrapper")
                .property(PropertyDescriptor::new("inner", "Person").adapter()),
        )?
        .with(
            TypeDescriptor::bean("Celsius")
                .property(PropertyDescriptor::new("degrees", "double"))
                .with_adapter(|obj| Ok(obj.get("degrees"))),
        )?
        .with(
            TypeDescriptor::bean("Broken")
                .property(PropertyDescriptor::new("a", "string").adapter())
                .with_adapter(|obj| Ok(obj.get("a"))),
        )?
        .with(TypeDescriptor::bean("Failing").with_adapter(|_| Err("no view".into())))?;
    Ok(Rc::new(reg))
}

fn manager() -> Result<SerializationManager, crate::RegistryError> {
    crate::test_setup();
    Ok(SerializationManager::new(registry()?))
}

fn person(name: &str, age: i32) -> ObjectRef {
    ObjectRef::bean("Person").with("name", name).with("age", age)
}

fn p(name: &str) -> Term {
    Term::iri(format!("{}{}", NS, name))
}

#[test]
fn default_chain_order() -> TestResult {
    let mgr = manager()?;
    assert_eq!(
        mgr.strategies().collect::<Vec<_>>(),
        vec![
            "primitive",
            "static collection",
            "static map",
            "static bean",
            "collection",
            "array",
            "map",
            "enum",
            "bean"
        ]
    );
    Ok(())
}

#[test]
fn null_emits_nothing() -> TestResult {
    let mgr = manager()?;
    let mut b = TripleBuffer::new();
    let id = mgr.serialize_object(&Value::Null, &mut b)?;
    assert!(id.is_null());
    let id = mgr.serialize_object(&Value::Primitive(Literal::Null), &mut b)?;
    assert!(id.is_null());
    assert!(b.is_empty());
    Ok(())
}

#[test]
fn primitives_are_literals() -> TestResult {
    let mgr = manager()?;
    let mut b = TripleBuffer::new();
    assert_eq!(
        mgr.serialize_object(&Value::from(42), &mut b)?,
        Identifier::literal(42)
    );
    assert_eq!(
        mgr.serialize_object(&Value::from("hello"), &mut b)?,
        Identifier::literal("hello")
    );
    assert!(b.is_empty());
    Ok(())
}

#[test]
fn enums_are_literals() -> TestResult {
    let mgr = manager()?;
    let mut b = TripleBuffer::new();
    let red = Value::from(EnumValue::new("Color", "RED"));
    assert_eq!(mgr.serialize_object(&red, &mut b)?, Identifier::literal("RED"));
    let pink = Value::from(EnumValue::new("Color", "PINK"));
    assert!(matches!(
        mgr.serialize_object(&pink, &mut b),
        Err(SerializationError::UnknownEnumConstant { .. })
    ));
    Ok(())
}

#[test]
fn bean() -> TestResult {
    let mgr = manager()?;
    let mut b = TripleBuffer::new();
    let alice = person("Alice", 42).with("password", "secret");
    let id = mgr.serialize_object(&alice.clone().into(), &mut b)?;
    assert!(id.is_resource());
    let s = id.to_term();
    assert_eq!(b.len(), 3);
    assert!(b.contains(
        &s,
        &Term::iri(rdf::type_),
        &Term::iri("http://rdfbean.org/class/Person")
    ));
    assert!(b.contains(&s, &p("name"), &Term::literal("Alice", xsd::string)));
    assert!(b.contains(&s, &p("age"), &Term::literal("42", xsd::int)));
    Ok(())
}

#[test]
fn bean_with_id_property() -> TestResult {
    let mgr = manager()?;
    let mut b = TripleBuffer::new();
    let u = ObjectRef::bean("User").with("login", "jdoe");
    let id = mgr.serialize_object(&u.into(), &mut b)?;
    assert_eq!(id, Identifier::resource("http://rdfbean.org/class/User/jdoe"));
    Ok(())
}

#[test]
fn null_property_emits_nothing() -> TestResult {
    let mgr = manager()?;
    let mut b = TripleBuffer::new();
    let anonymous = ObjectRef::bean("Person").with("age", 7);
    mgr.serialize_object(&anonymous.into(), &mut b)?;
    assert_eq!(b.len(), 2);
    assert_eq!(b.triples_matching(Any, p("name"), Any).count(), 0);
    assert_eq!(
        b.triples_matching(Any, Any, Term::literal("null", bean::Null))
            .count(),
        0
    );
    Ok(())
}

#[test]
fn self_reference_adds_one_triple() -> TestResult {
    let mgr = manager()?;
    let mut b1 = TripleBuffer::new();
    mgr.serialize_object(&person("Alice", 42).into(), &mut b1)?;

    let alice = person("Alice", 42);
    alice.set("friend", alice.clone());
    let mut b2 = TripleBuffer::new();
    let id = mgr.serialize_object(&alice.into(), &mut b2)?;
    assert_eq!(b2.len(), b1.len() + 1);
    assert!(b2.contains(&id.to_term(), &p("friend"), &id.to_term()));
    Ok(())
}

#[test]
fn mutual_references() -> TestResult {
    let mgr = manager()?;
    let alice = person("Alice", 42);
    let bob = person("Bob", 41).with("friend", alice.clone());
    alice.set("friend", bob.clone());
    let mut b = TripleBuffer::new();
    let id = mgr.serialize_object(&alice.into(), &mut b)?;
    assert_eq!(b.len(), 8);
    assert_eq!(
        b.triples_matching(Any, Term::iri(rdf::type_), Any).count(),
        2
    );
    let bob_id = b
        .triples_matching(id.to_term(), p("friend"), Any)
        .map(|[_, _, o]| o.clone())
        .next()
        .ok_or("no friend")?;
    assert!(b.contains(&bob_id, &p("friend"), &id.to_term()));
    Ok(())
}

#[test]
fn shared_context() -> TestResult {
    let mgr = manager()?;
    let alice = person("Alice", 42);
    let bob = person("Bob", 41).with("friend", alice.clone());
    let mut b = TripleBuffer::new();
    let ids = mgr.serialize_objects(&[Value::from(alice), Value::from(bob)], &mut b)?;
    assert_eq!(ids.len(), 2);
    // alice is serialized only once
    assert_eq!(b.len(), 7);
    Ok(())
}

#[test]
fn preseeded_context() -> TestResult {
    let mgr = manager()?;
    let alice = person("Alice", 42);
    let mut ctx = SerializationContext::new();
    let known = Identifier::resource("http://example.org/alice");
    ctx.visit(&alice, known.clone());
    let mut b = TripleBuffer::new();
    let id = mgr.serialize(&mut ctx, &alice.into(), &Annotations::none(), &mut b)?;
    assert_eq!(id, known);
    assert!(b.is_empty());
    Ok(())
}

#[test]
fn sequence() -> TestResult {
    let mgr = manager()?;
    let mut b = TripleBuffer::new();
    let list = ObjectRef::list("list", [Value::from("a"), Value::from("b"), Value::Null]);
    let id = mgr.serialize_object(&list.into(), &mut b)?;
    assert!(id.is_blank());
    assert_eq!(b.len(), 9);
    assert!(b.contains(
        &id.to_term(),
        &Term::iri(rdf::type_),
        &Term::iri("http://rdfbean.org/class/list")
    ));
    assert_eq!(
        b.triples_matching(id.to_term(), Term::iri(bean::member), TermKind::BlankNode)
            .count(),
        3
    );
    for i in 0..3 {
        assert_eq!(
            b.triples_matching(
                Any,
                Term::iri(bean::index),
                Term::literal(i.to_string(), xsd::int)
            )
            .count(),
            1
        );
    }
    assert_eq!(
        b.triples_matching(Any, Term::iri(bean::value), Any).count(),
        2
    );
    Ok(())
}

#[test]
fn sequence_containing_itself() -> TestResult {
    let mgr = manager()?;
    let list = ObjectRef::list("list", [Value::from(1)]);
    list.set_items(vec![Value::from(1), list.clone().into()]);
    let mut b = TripleBuffer::new();
    let id = mgr.serialize_object(&list.into(), &mut b)?;
    assert_eq!(
        b.triples_matching(Any, Term::iri(bean::value), id.to_term())
            .count(),
        1
    );
    assert_eq!(b.len(), 7);
    Ok(())
}

#[test]
fn map() -> TestResult {
    let mgr = manager()?;
    let mut b = TripleBuffer::new();
    let m = ObjectRef::map("map", [("one", 1), ("two", 2)]);
    let id = mgr.serialize_object(&m.into(), &mut b)?;
    assert_eq!(b.len(), 7);
    assert_eq!(
        b.triples_matching(id.to_term(), Term::iri(bean::entry), Any)
            .count(),
        2
    );
    let entry = b
        .triples_matching(
            Any,
            Term::iri(bean::key),
            Term::literal("two", xsd::string),
        )
        .map(|[s, _, _]| s.clone())
        .next()
        .ok_or("no entry")?;
    assert!(b.contains(&entry, &Term::iri(bean::value), &Term::literal("2", xsd::int)));
    Ok(())
}

#[test]
fn property_form_sequence() -> TestResult {
    let mgr = manager()?;
    let mut b = TripleBuffer::new();
    let team = ObjectRef::list("Team", [person("Alice", 42), person("Bob", 41)]);
    let club = ObjectRef::bean("Club").with("members", team);
    let id = mgr.serialize_object(&club.into(), &mut b)?;
    assert_eq!(
        b.triples_matching(id.to_term(), p("member"), TermKind::Iri)
            .count(),
        2
    );
    assert_eq!(
        b.triples_matching(Any, Term::iri(bean::member), Any).count(),
        0
    );
    // 1 type for the club, 2 links, 3 triples per person
    assert_eq!(b.len(), 9);
    Ok(())
}

#[test]
fn static_precedence() -> TestResult {
    let mgr = manager()?;
    let reg = mgr.registry();
    let none = Annotations::none();
    let name = |t: &str| {
        mgr.select(reg.get(t).expect("registered type"), &none)
            .map(|s| s.name())
    };
    assert_eq!(name("Registry")?, "static collection");
    assert_eq!(name("Team")?, "collection");
    assert_eq!(name("Config")?, "static bean");
    assert_eq!(name("Person")?, "bean");
    assert_eq!(name("int")?, "primitive");
    assert_eq!(name("Color")?, "enum");
    assert_eq!(name("map")?, "map");
    assert_eq!(name("array")?, "array");

    let club = reg.get("Club").ok_or("no club")?;
    let owner = Identifier::resource("http://example.org/club");
    let settings = Annotations::for_property(
        club.get_property("settings").ok_or("no settings")?,
        &owner,
    );
    assert_eq!(
        mgr.select(reg.get("Settings").ok_or("?")?, &settings)?.name(),
        "static bean"
    );
    assert_eq!(
        mgr.select(reg.get("Team").ok_or("?")?, &settings)?.name(),
        "static collection"
    );
    Ok(())
}

#[test]
fn static_bean_is_emitted_once() -> TestResult {
    let mgr = manager()?;
    let c1 = ObjectRef::bean("Config").with("verbose", true);
    let c2 = ObjectRef::bean("Config").with("verbose", true);
    let mut b = TripleBuffer::new();
    let ids = mgr.serialize_objects(&[Value::from(c1), Value::from(c2)], &mut b)?;
    assert_eq!(ids[0], Identifier::resource("http://rdfbean.org/class/Config"));
    assert_eq!(ids[0], ids[1]);
    assert_eq!(b.len(), 1);
    assert!(b.contains(
        &ids[0].to_term(),
        &p("verbose"),
        &Term::literal("true", xsd::boolean)
    ));
    Ok(())
}

#[test]
fn static_collection() -> TestResult {
    let mgr = manager()?;
    let r = ObjectRef::list("Registry", ["a"]);
    let mut b = TripleBuffer::new();
    let id = mgr.serialize_object(&r.into(), &mut b)?;
    assert_eq!(id, Identifier::resource("http://rdfbean.org/class/Registry"));
    // member, index and value, no type
    assert_eq!(b.len(), 3);
    Ok(())
}

#[test]
fn member_indexes_are_never_truncated() -> TestResult {
    assert_eq!(member_index(3)?.value(), &Literal::Int(3));
    let beyond_int = i32::MAX as usize + 1;
    assert_eq!(
        member_index(beyond_int)?.value(),
        &Literal::Long(i64::from(i32::MAX) + 1)
    );
    #[cfg(target_pointer_width = "64")]
    assert!(matches!(
        member_index(usize::MAX),
        Err(SerializationError::IndexOverflow(_))
    ));
    Ok(())
}

#[test]
fn static_property() -> TestResult {
    let mgr = manager()?;
    let settings = ObjectRef::bean("Settings").with("verbose", false);
    let c1 = ObjectRef::bean("Club").with("settings", settings.clone());
    let c2 = ObjectRef::bean("Club").with("settings", settings);
    let mut b = TripleBuffer::new();
    mgr.serialize_objects(&[Value::from(c1), Value::from(c2)], &mut b)?;
    let static_id = Term::iri(format!("{}settings/static", NS));
    assert_eq!(b.triples_matching(Any, p("settings"), static_id.clone()).count(), 2);
    assert_eq!(b.triples_matching(static_id.clone(), Any, Any).count(), 1);
    Ok(())
}

#[test]
fn type_ref() -> TestResult {
    let mgr = manager()?;
    let club = ObjectRef::bean("Club").with("kind", "Person");
    let mut b = TripleBuffer::new();
    let id = mgr.serialize_object(&club.into(), &mut b)?;
    assert!(b.contains(
        &id.to_term(),
        &p("kind"),
        &Term::iri("http://rdfbean.org/class/Person")
    ));
    let bad = ObjectRef::bean("Club").with("kind", "Nothing");
    assert!(matches!(
        mgr.serialize_object(&bad.into(), &mut b),
        Err(SerializationError::UnknownType(_))
    ));
    Ok(())
}

#[test]
fn adapter_property() -> TestResult {
    let mgr = manager()?;
    let alice = person("Alice", 42);
    let w = ObjectRef::bean("Wrapper").with("inner", alice.clone());
    let mut b = TripleBuffer::new();
    let ids = mgr.serialize_objects(&[Value::from(w), Value::from(alice)], &mut b)?;
    assert_eq!(ids[0], ids[1]);
    assert_eq!(b.len(), 3);
    Ok(())
}

#[test]
fn adapter_function() -> TestResult {
    let mgr = manager()?;
    let t = ObjectRef::bean("Celsius").with("degrees", 21.5);
    let mut b = TripleBuffer::new();
    assert_eq!(
        mgr.serialize_object(&t.into(), &mut b)?,
        Identifier::literal(21.5)
    );
    assert!(b.is_empty());
    Ok(())
}

#[test]
fn adapter_errors() -> TestResult {
    let mgr = manager()?;
    let mut b = TripleBuffer::new();
    assert!(matches!(
        mgr.serialize_object(&ObjectRef::bean("Broken").into(), &mut b),
        Err(SerializationError::DuplicateAdapter(_))
    ));
    let err = mgr
        .serialize_object(&ObjectRef::bean("Failing").into(), &mut b)
        .err()
        .ok_or("should fail")?;
    assert!(matches!(err, SerializationError::Adapter { .. }));
    assert!(err.to_string().contains("no view"));
    Ok(())
}

#[test]
fn unknown_type() -> TestResult {
    let mgr = manager()?;
    let mut b = TripleBuffer::new();
    assert!(matches!(
        mgr.serialize_object(&ObjectRef::bean("Alien").into(), &mut b),
        Err(SerializationError::UnknownType(t)) if t == "Alien"
    ));
    Ok(())
}

#[test]
fn recursion_limit() -> TestResult {
    let mut config = MapperConfig::default();
    config.set_max_depth(3);
    let mgr = SerializationManager::new_with_config(registry()?, config);
    let a = person("A", 1);
    let b = person("B", 2).with("friend", a.clone());
    let c = person("C", 3).with("friend", b);
    let mut buf = TripleBuffer::new();
    assert!(mgr.serialize_object(&a.into(), &mut buf).is_ok());
    assert!(matches!(
        mgr.serialize_object(&c.into(), &mut buf),
        Err(SerializationError::RecursionLimit(3))
    ));
    Ok(())
}

#[test]
fn target_graph() -> TestResult {
    let mut config = MapperConfig::default();
    config.set_graph(Some(Term::iri("http://example.org/g")));
    let mgr = SerializationManager::new_with_config(registry()?, config);
    let mut b = TripleBuffer::new();
    mgr.serialize_object(&person("Alice", 42).into(), &mut b)?;
    assert_eq!(
        b.quads_matching(Any, Any, Any, Some(Term::iri("http://example.org/g")))
            .count(),
        3
    );
    Ok(())
}

struct Shouting;

impl Serializer for Shouting {
    fn name(&self) -> &'static str {
        "shouting"
    }

    fn accept(&self, ty: &TypeDescriptor, _: &Annotations) -> bool {
        ty.name() == "string"
    }

    fn is_complex(&self, _: &Annotations) -> bool {
        false
    }

    fn identifier(
        &self,
        mgr: &SerializationManager,
        ctx: &mut SerializationContext,
        value: &Value,
        ty: &TypeDescriptor,
        ann: &Annotations,
        sink: &mut dyn TripleSink,
    ) -> Result<Identifier, SerializationError> {
        self.serialize(mgr, ctx, value, ty, ann, sink)
    }

    fn serialize(
        &self,
        _: &SerializationManager,
        _: &mut SerializationContext,
        value: &Value,
        _: &TypeDescriptor,
        _: &Annotations,
        _: &mut dyn TripleSink,
    ) -> Result<Identifier, SerializationError> {
        let txt = value
            .as_literal()
            .and_then(Literal::as_str)
            .unwrap_or_default();
        Ok(Identifier::literal(txt.to_uppercase()))
    }
}

#[test]
fn custom_strategy() -> TestResult {
    let mut mgr = manager()?;
    let mut b = TripleBuffer::new();
    assert_eq!(
        mgr.serialize_object(&Value::from("hi"), &mut b)?,
        Identifier::literal("hi")
    );
    mgr.insert_strategy(0, Box::new(Shouting));
    assert_eq!(mgr.strategies().next(), Some("shouting"));
    assert_eq!(
        mgr.serialize_object(&Value::from("hi"), &mut b)?,
        Identifier::literal("HI")
    );
    Ok(())
}
