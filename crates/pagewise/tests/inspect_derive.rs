//! Integration tests for the Inspect and PropertyEnum derive macros.
//!
//! These tests verify that the derives generate correct shapes, readers and
//! property constants from field annotations.

#![allow(dead_code)] // Some fields are intentionally skipped for testing

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use pagewise::{
    lineage, parse_enum, resolve, Conversion, Described, Inspect, Kind, Number, PropertyEnum,
    Scalar, Value,
};

// =============================================================================
// Basic derive tests
// =============================================================================

#[derive(Inspect)]
struct BasicTask {
    #[inspect(String)]
    name: String,

    #[inspect(Number)]
    priority: u8,

    #[inspect(Bool)]
    done: bool,

    notes: String,
}

fn basic() -> BasicTask {
    BasicTask {
        name: "Test".to_string(),
        priority: 5,
        done: false,
        notes: String::new(),
    }
}

#[test]
fn test_basic_derive_reads() {
    let task = basic();
    assert_eq!(task.read("name"), Some(Value::String("Test")));
    assert_eq!(task.read("priority"), Some(Value::Number(Number::U64(5))));
    assert_eq!(task.read("done"), Some(Value::Bool(false)));
}

#[test]
fn test_property_constants_generated() {
    assert_eq!(BasicTask::NAME, "name");
    assert_eq!(BasicTask::PRIORITY, "priority");
    assert_eq!(BasicTask::DONE, "done");
}

#[test]
fn test_unannotated_field_is_not_a_property() {
    let task = basic();
    assert_eq!(task.read("notes"), None);
    assert_eq!(task.read("unknown"), None);
    assert!(BasicTask::SHAPE.declared("notes").is_none());
}

#[test]
fn test_shape_lists_properties_in_order() {
    let shape = BasicTask::SHAPE;
    assert_eq!(shape.type_name, "BasicTask");
    let names: Vec<_> = shape.properties.iter().map(|p| (p.name, p.kind)).collect();
    assert_eq!(
        names,
        vec![
            ("name", Kind::String),
            ("priority", Kind::Number),
            ("done", Kind::Bool),
        ]
    );
    assert!(shape.ancestor.is_none());
    assert_eq!(basic().shape().type_name, "BasicTask");
}

// =============================================================================
// Optional fields
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, PropertyEnum)]
enum Level {
    Low,
    High,
}

#[derive(Inspect)]
struct OptionalFields {
    #[inspect(String)]
    label: Option<String>,

    #[inspect(Number)]
    score: Option<f64>,

    #[inspect(Enum)]
    level: Option<Level>,

    #[inspect(DateTime)]
    seen: Option<NaiveDateTime>,
}

#[test]
fn test_none_reads_as_null() {
    let empty = OptionalFields {
        label: None,
        score: None,
        level: None,
        seen: None,
    };
    for property in ["label", "score", "level", "seen"] {
        assert_eq!(empty.read(property), Some(Value::None), "{property}");
    }
}

#[test]
fn test_some_reads_inner_value() {
    let seen = NaiveDate::from_ymd_opt(2024, 2, 29)
        .unwrap()
        .and_hms_opt(8, 0, 0)
        .unwrap();
    let full = OptionalFields {
        label: Some("x".into()),
        score: Some(1.5),
        level: Some(Level::High),
        seen: Some(seen),
    };
    assert_eq!(full.read("label"), Some(Value::String("x")));
    assert_eq!(full.read("score"), Some(Value::Number(Number::F64(1.5))));
    assert_eq!(full.read("level"), Some(Value::Enum("High")));
    assert_eq!(full.read("seen"), Some(Value::DateTime(seen)));
}

// =============================================================================
// Kinds beyond the basics
// =============================================================================

#[derive(Debug, PartialEq)]
struct Point {
    x: i32,
    y: i32,
}

#[derive(Inspect)]
struct Mixed {
    #[inspect(Opaque)]
    origin: Point,

    #[inspect(Any)]
    extra: Option<Scalar>,

    #[inspect(DateTime)]
    created: DateTime<Utc>,

    #[inspect(String, rename = "title")]
    heading: &'static str,

    #[inspect(ty = "enum")]
    level: Level,

    #[inspect(skip)]
    cache: Vec<u8>,
}

#[test]
fn test_mixed_kinds() {
    let created = NaiveDate::from_ymd_opt(2023, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let mixed = Mixed {
        origin: Point { x: 1, y: 2 },
        extra: Some(Scalar::from(8)),
        created: created.and_utc(),
        heading: "Head",
        level: Level::Low,
        cache: vec![1],
    };

    assert_eq!(mixed.read("origin"), Some(Value::Opaque(&Point { x: 1, y: 2 })));
    assert_eq!(mixed.read("extra"), Some(Value::Number(Number::I64(8))));
    assert_eq!(mixed.read("created"), Some(Value::DateTime(created)));
    assert_eq!(mixed.read("title"), Some(Value::String("Head")));
    assert_eq!(mixed.read("heading"), None);
    assert_eq!(mixed.read("level"), Some(Value::Enum("Low")));
    assert_eq!(mixed.read("cache"), None);
    assert_eq!(Mixed::TITLE, "title");

    let kinds: Vec<_> = Mixed::SHAPE.properties.iter().map(|p| p.kind).collect();
    assert_eq!(
        kinds,
        vec![Kind::Opaque, Kind::Any, Kind::DateTime, Kind::String, Kind::Enum]
    );
}

// =============================================================================
// Ancestors
// =============================================================================

#[derive(Inspect)]
struct Record {
    #[inspect(Number)]
    id: Option<i64>,

    #[inspect(String)]
    name: Option<String>,
}

#[derive(Inspect)]
struct Derived {
    #[inspect(ancestor)]
    record: Record,

    #[inspect(String)]
    name: String,
}

#[derive(Inspect)]
struct Detached {
    #[inspect(ancestor)]
    record: Option<Record>,

    #[inspect(Bool)]
    flag: bool,
}

#[test]
fn test_ancestor_shape_link() {
    let ancestor = Derived::SHAPE.ancestor.unwrap();
    assert_eq!(ancestor.type_name, "Record");
    assert_eq!(ancestor.properties, Record::SHAPE.properties);
    assert_eq!(Detached::SHAPE.ancestor.unwrap().type_name, "Record");
}

#[test]
fn test_ancestor_instance_link() {
    let derived = Derived {
        record: Record {
            id: Some(4),
            name: Some("base".into()),
        },
        name: "own".into(),
    };
    let levels: Vec<_> = lineage(&derived).map(|l| l.shape().type_name).collect();
    assert_eq!(levels, vec!["Derived", "Record"]);

    let id = resolve(Derived::SHAPE, "id").unwrap();
    assert_eq!(id.read(&derived), Ok(Value::Number(Number::I64(4))));

    // The derived declaration shadows the ancestor's
    let name = resolve(Derived::SHAPE, "name").unwrap();
    assert_eq!(name.depth(), 0);
    assert_eq!(name.read(&derived), Ok(Value::String("own")));
}

#[test]
fn test_optional_ancestor() {
    let detached = Detached {
        record: None,
        flag: true,
    };
    assert!(detached.ancestor().is_none());
    assert!(resolve(Detached::SHAPE, "id").unwrap().read(&detached).is_err());

    let attached = Detached {
        record: Some(Record {
            id: None,
            name: None,
        }),
        flag: true,
    };
    assert_eq!(
        resolve(Detached::SHAPE, "id").unwrap().read(&attached),
        Ok(Value::None)
    );
}

// =============================================================================
// Generic structs
// =============================================================================

#[derive(Inspect)]
struct Tagged<T> {
    #[inspect(String)]
    tag: String,

    payload: T,
}

#[test]
fn test_generic_struct() {
    let tagged = Tagged {
        tag: "t".into(),
        payload: vec![1, 2, 3],
    };
    assert_eq!(tagged.read("tag"), Some(Value::String("t")));
    assert_eq!(Tagged::<u8>::SHAPE.properties.len(), 1);
}

// =============================================================================
// PropertyEnum
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, PropertyEnum)]
#[property_enum(ignore_case = false, name_if_no_match)]
enum Unit {
    #[property_enum(value = "kg")]
    Kilogram,
    #[property_enum(value = "g")]
    Gram,
    Tonne,
}

#[test]
fn test_property_enum_tables() {
    assert_eq!(Unit::VARIANTS, &[Unit::Kilogram, Unit::Gram, Unit::Tonne]);
    assert_eq!(Unit::Gram.name(), "Gram");
    assert_eq!(Unit::Gram.wire_value(), Some("g"));
    assert_eq!(Unit::Tonne.wire_value(), None);
    assert_eq!(
        Unit::CONVERSION,
        Conversion {
            ignore_case: false,
            name_if_no_match: true,
        }
    );
    assert_eq!(Level::CONVERSION, Conversion::DEFAULT);
}

#[test]
fn test_property_enum_conversion() {
    assert_eq!(parse_enum::<Unit>("kg"), Ok(Some(Unit::Kilogram)));
    assert!(parse_enum::<Unit>("KG").is_err());
    // Name fallback covers variants without a wire value
    assert_eq!(parse_enum::<Unit>("Tonne"), Ok(Some(Unit::Tonne)));
    assert_eq!(parse_enum::<Level>("High"), Ok(Some(Level::High)));
    assert!(parse_enum::<Level>("high").is_err());
}

#[derive(Debug, Clone, Copy, PartialEq, PropertyEnum)]
enum Switch {
    #[property_enum(value = "on")]
    On,
    #[property_enum(value = "off")]
    Off,
}

#[test]
fn test_property_enum_defaults_ignore_case_without_fallback() {
    assert_eq!(parse_enum::<Switch>("ON"), Ok(Some(Switch::On)));
    assert!(parse_enum::<Switch>("Off").is_ok());
    assert!(parse_enum::<Switch>("Of").is_err());
}
