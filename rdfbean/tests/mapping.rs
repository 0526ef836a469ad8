//! End-to-end tests of the mapper, through the facade.
use chrono::{TimeZone, Utc};
use rdfbean::inmem::Any;
use rdfbean::mapper::{Annotations, PropertyAnnotations, RegistryError, Serializer};
use rdfbean::prelude::*;
use rdfbean::rio::parse_ntriples;
use rdfbean::term::ns::{bean, rdf};
use std::rc::Rc;
use test_case::test_case;
use url::Url;

type TestResult = Result<(), Box<dyn std::error::Error>>;

const NS: &str = "http://example.org/ns#";

fn p(name: &str) -> Term {
    Term::iri(format!("{}{}", NS, name))
}

fn registry() -> Result<Rc<TypeRegistry>, RegistryError> {
    let reg = TypeRegistry::new()
        .with(
            TypeDescriptor::bean("Person")
                .with_namespace(NS)
                .property(PropertyDescriptor::new("name", "string"))
                .property(PropertyDescriptor::new("friend", "Person")),
        )?
        .with(
            TypeDescriptor::bean("Point")
                .with_namespace(NS)
                .property(PropertyDescriptor::new("x", "int"))
                .property(PropertyDescriptor::new("y", "int")),
        )?
        .with(
            TypeDescriptor::bean("Pair")
                .with_namespace(NS)
                .property(PropertyDescriptor::new("left", "Person"))
                .property(PropertyDescriptor::new("right", "Person")),
        )?
        .with(TypeDescriptor::collection("Letters", Some("string")))?
        .with(TypeDescriptor::collection("Alphabet", Some("string")).with_static())?;
    Ok(Rc::new(reg))
}

/// Write `buffer` as N-Triples, and parse it back in a new buffer.
fn through_ntriples(buffer: &TripleBuffer) -> Result<TripleBuffer, Box<dyn std::error::Error>> {
    let text = rdfbean::rio::stringify(buffer, Format::NTriples)?;
    let mut parsed = TripleBuffer::new();
    parse_ntriples(text.as_bytes(), &mut parsed)?;
    Ok(parsed)
}

#[test_case("string", Value::from("hello") ; "string")]
#[test_case("boolean", Value::from(true) ; "boolean")]
#[test_case("short", Value::from(-3i16) ; "short")]
#[test_case("int", Value::from(-7) ; "int")]
#[test_case("long", Value::from(1i64 << 40) ; "long")]
#[test_case("float", Value::from(1.5f32) ; "float")]
#[test_case("double", Value::from(-0.25f64) ; "double")]
#[test_case("date", Value::from(Utc.with_ymd_and_hms(2021, 3, 4, 5, 6, 7).unwrap()) ; "date")]
#[test_case("url", Value::from(Url::parse("http://example.org/home").unwrap()) ; "url")]
fn primitive_round_trip(type_name: &str, value: Value) -> TestResult {
    let registry = Rc::new(
        TypeRegistry::new().with(
            TypeDescriptor::bean("Holder")
                .with_namespace(NS)
                .property(PropertyDescriptor::new("value", type_name)),
        )?,
    );
    let holder = ObjectRef::bean("Holder").with("value", value.clone());
    let mut buffer = TripleBuffer::new();
    SerializationManager::new(registry.clone()).serialize_object(&holder.into(), &mut buffer)?;
    let buffer = through_ntriples(&buffer)?;

    let de = DeserializationManager::new(registry);
    let values = de.deserialize("Holder", &buffer)?;
    assert_eq!(values.len(), 1);
    let got = values[0].as_object().ok_or("not a bean")?;
    assert_eq!(got.get("value"), value);
    assert!(de.issues().is_empty());
    Ok(())
}

#[test]
fn self_reference_adds_exactly_one_triple() -> TestResult {
    let ser = SerializationManager::new(registry()?);

    let plain = ObjectRef::bean("Person").with("name", "Alice");
    let mut b1 = TripleBuffer::new();
    ser.serialize_object(&plain.into(), &mut b1)?;

    let selfish = ObjectRef::bean("Person").with("name", "Alice");
    selfish.set("friend", selfish.clone());
    let mut b2 = TripleBuffer::new();
    let id = ser.serialize_object(&selfish.into(), &mut b2)?;

    assert_eq!(b2.len(), b1.len() + 1);
    let s = id.to_term();
    assert!(b2.contains(&s, &p("friend"), &s));
    assert_eq!(b2.triples_matching(s.clone(), Term::iri(rdf::type_), Any).count(), 1);
    Ok(())
}

#[test]
fn order_survives_any_retrieval_order() -> TestResult {
    let reg = registry()?;
    let letters = ObjectRef::list("Letters", ["A", "B", "C"]);
    let mut buffer = TripleBuffer::new();
    let id = SerializationManager::new(reg.clone()).serialize_object(&letters.into(), &mut buffer)?;
    assert_eq!(buffer.triples_matching(id.to_term(), Term::iri(bean::member), Any).count(), 3);

    let mut reversed = TripleBuffer::new();
    let mut triples: Vec<[Term; 3]> = buffer
        .triples()
        .map(|[s, p, o]| [s.clone(), p.clone(), o.clone()])
        .collect();
    triples.reverse();
    for [s, p, o] in triples {
        reversed.add_triple(s, p, o)?;
    }

    let got = DeserializationManager::new(reg).deserialize_identifier("Letters", &id, &reversed)?;
    assert_eq!(
        got.as_object().ok_or("not a list")?.items(),
        Some(vec![Value::from("A"), Value::from("B"), Value::from("C")])
    );
    Ok(())
}

#[test]
fn static_collection_takes_precedence() -> TestResult {
    let reg = registry()?;
    let ser = SerializationManager::new(reg.clone());
    let none = Annotations::none();

    let alphabet = reg.get("Alphabet").ok_or("no Alphabet")?;
    assert_eq!(ser.select(alphabet, &none)?.name(), "static collection");

    let letters = reg.get("Letters").ok_or("no Letters")?;
    assert_eq!(ser.select(letters, &none)?.name(), "collection");

    let static_property = Annotations {
        property: PropertyAnnotations {
            is_static: true,
            ..Default::default()
        },
        property_url: Some(format!("{}letters", NS)),
        owner: None,
    };
    assert_eq!(ser.select(letters, &static_property)?.name(), "static collection");
    Ok(())
}

#[test]
fn null_emits_no_triple() -> TestResult {
    let ser = SerializationManager::new(registry()?);
    let mut buffer = TripleBuffer::new();
    assert!(ser.serialize_object(&Value::Null, &mut buffer)?.is_null());
    assert!(buffer.is_empty());

    let anonymous = ObjectRef::bean("Person");
    ser.serialize_object(&anonymous.into(), &mut buffer)?;
    let letters = ObjectRef::list("Letters", [Value::from("A"), Value::Null]);
    ser.serialize_object(&letters.into(), &mut buffer)?;

    assert_eq!(buffer.triples_matching(Any, p("name"), Any).count(), 0);
    assert_eq!(buffer.triples_matching(Any, p("friend"), Any).count(), 0);
    assert_eq!(buffer.triples_matching(Any, Term::iri(bean::index), Any).count(), 2);
    assert_eq!(buffer.triples_matching(Any, Term::iri(bean::value), Any).count(), 1);
    assert!(buffer
        .triples()
        .all(|[_, _, o]| o.as_literal().map(|l| l.datatype() != bean::Null).unwrap_or(true)));
    Ok(())
}

#[test]
fn missing_triple_is_one_issue() -> TestResult {
    let reg = registry()?;
    let point = ObjectRef::bean("Point").with("x", 1).with("y", 2);
    let mut full = TripleBuffer::new();
    SerializationManager::new(reg.clone()).serialize_object(&point.into(), &mut full)?;

    let y = p("y");
    let mut partial = TripleBuffer::new();
    for [s, p, o] in full.triples() {
        if p != &y {
            partial.add_triple(s.clone(), p.clone(), o.clone())?;
        }
    }

    let de = DeserializationManager::new(reg);
    let values = de.deserialize("Point", &partial)?;
    assert_eq!(values.len(), 1);
    let got = values[0].as_object().ok_or("not a bean")?;
    assert_eq!(got.get("x"), Value::from(1));
    assert!(got.get("y").is_null());
    let issues = de.issues();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].property(), Some("http://example.org/ns#y"));
    assert!(matches!(issues[0].kind(), IssueKind::MissingProperty { .. }));
    Ok(())
}

#[test]
fn shared_reference_is_one_instance() -> TestResult {
    let reg = registry()?;
    let alice = ObjectRef::bean("Person").with("name", "Alice");
    let pair = ObjectRef::bean("Pair")
        .with("left", alice.clone())
        .with("right", alice);
    let mut buffer = TripleBuffer::new();
    let id = SerializationManager::new(reg.clone()).serialize_object(&pair.into(), &mut buffer)?;
    let buffer = through_ntriples(&buffer)?;

    let got = DeserializationManager::new(reg).deserialize_identifier("Pair", &id, &buffer)?;
    let got = got.as_object().ok_or("not a bean")?;
    let left = got.get("left");
    let right = got.get("right");
    let left = left.as_object().ok_or("no left")?;
    assert!(left.ptr_eq(right.as_object().ok_or("no right")?));
    assert_eq!(left.get("name"), Value::from("Alice"));
    Ok(())
}

#[test]
fn cycle_round_trip() -> TestResult {
    let reg = registry()?;
    let alice = ObjectRef::bean("Person").with("name", "Alice");
    let bob = ObjectRef::bean("Person").with("name", "Bob");
    alice.set("friend", bob.clone());
    bob.set("friend", alice.clone());
    let mut buffer = TripleBuffer::new();
    let id = SerializationManager::new(reg.clone()).serialize_object(&alice.into(), &mut buffer)?;
    let buffer = through_ntriples(&buffer)?;

    let got = DeserializationManager::new(reg).deserialize_identifier("Person", &id, &buffer)?;
    let a = got.as_object().ok_or("not a bean")?;
    let b = a.get("friend");
    let b = b.as_object().ok_or("no friend")?;
    assert_eq!(b.get("name"), Value::from("Bob"));
    assert_eq!(b.get("friend"), got);
    Ok(())
}
