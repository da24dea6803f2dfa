//! Integration tests for the public API

use bomuml::prelude::*;
use bomuml::{load_model, render};

#[test]
fn test_two_class_model_end_to_end() {
    let input = r#"{
        "shortNames": {"p.A": "A", "p.B": "B"},
        "packages": [{"name": "p", "classes": [
            {"name": "p.A",
             "attributes": [{"name": "x", "type": "int"}],
             "constructors": [{"name": "A"}],
             "methods": [{"name": "m", "returnType": "void"}]},
            {"name": "p.B",
             "superclasses": ["p.A"],
             "attributes": [{"name": "y", "type": "p.A"}]}
        ]}]
    }"#;
    let diagram = render(input).unwrap();
    assert_eq!(
        diagram,
        "class A{\n\
         x: int\n\
         __\n\
         A()\n\
         __\n\
         void m()\n\
         }\n\
         A <|-- B\n\
         class B{\n\
         }\n\
         B --> A : y\n\
         \n"
    );
}

#[test]
fn test_collection_attribute_end_to_end() {
    let input = r#"{
        "shortNames": {"p.C": "C", "p.Item": "Item"},
        "packages": [{"name": "p", "classes": [
            {"name": "p.C",
             "attributes": [{"name": "items", "type": "java.util.List",
                "domain": {"kind": "collection", "min": 0,
                           "elementType": "p.Item"}}]},
            {"name": "p.Item"}
        ]}]
    }"#;
    let diagram = render(input).unwrap();
    assert_eq!(
        diagram,
        "class C{\n\
         }\n\
         C --> \"*\" Item : items\n\
         note on link:java.util.List\n\
         class Item{\n\
         }\n\
         \n"
    );
}

#[test]
fn test_inlinable_only_model_has_no_associations() {
    let input = r#"{
        "shortNames": {"p.A": "A"},
        "packages": [{"name": "p", "classes": [{
            "name": "p.A",
            "attributes": [
                {"name": "flag", "type": "boolean"},
                {"name": "label", "type": "java.lang.String"},
                {"name": "count", "type": "java.util.Integer"},
                {"name": "at", "type": "java.time.ZonedDateTime"},
                {"name": "scores", "type": "int[]"},
                {"name": "tags", "type": "java.util.List",
                 "domain": {"kind": "collection", "min": 0,
                            "elementType": "java.lang.String"}}
            ]
        }]}]
    }"#;
    let diagram = render(input).unwrap();
    assert!(!diagram.contains("-->"));
    assert!(diagram.contains("flag: boolean\n"));
    assert!(diagram.contains("label: String\n"));
    assert!(diagram.contains("count: Integer\n"));
    assert!(diagram.contains("scores: int[]\n"));
    assert!(diagram.contains("tags: String [*]\n"));
}

#[test]
fn test_unlisted_interfaces_produce_no_arrow_but_class_still_renders() {
    let input = r#"{
        "shortNames": {"p.A": "A", "p.I": "I", "p.J": "J"},
        "packages": [{"name": "p", "classes": [
            {"name": "p.I", "interface": true},
            {"name": "p.J", "interface": true},
            {"name": "p.A", "superclasses": ["p.I", "p.J"],
             "attributes": [{"name": "x", "type": "int"}]}
        ]}]
    }"#;
    let diagram = render(input).unwrap();
    assert!(!diagram.contains("<|--"));
    assert!(diagram.contains("class A{\nx: int\n}\n"));
}

#[test]
fn test_diamond_inheritance_single_visit_and_order() {
    let input = r#"{
        "shortNames": {"p.Top": "Top", "p.Left": "Left",
                       "p.Right": "Right", "p.Bottom": "Bottom"},
        "packages": [{"name": "p", "classes": [
            {"name": "p.Bottom", "superclasses": ["p.Left", "p.Right"]},
            {"name": "p.Left", "superclasses": ["p.Top"]},
            {"name": "p.Right", "superclasses": ["p.Top"]},
            {"name": "p.Top"}
        ]}]
    }"#;
    let diagram = render(input).unwrap();
    for name in ["Top", "Left", "Right", "Bottom"] {
        assert_eq!(
            diagram.matches(&format!("class {}{{", name)).count(),
            1,
            "{} must render exactly once",
            name
        );
    }
    // every superclass block precedes its subclass block
    let pos = |name: &str| diagram.find(&format!("class {}{{", name)).unwrap();
    assert!(pos("Top") < pos("Left"));
    assert!(pos("Top") < pos("Right"));
    assert!(pos("Left") < pos("Bottom"));
    assert!(pos("Right") < pos("Bottom"));
}

#[test]
fn test_missing_reference_never_appears() {
    let input = r#"{
        "shortNames": {"p.A": "A"},
        "packages": [{"name": "p", "classes": [
            {"name": "p.A",
             "superclasses": ["p.Ghost"],
             "attributes": [
                {"name": "g", "type": "p.Ghost"},
                {"name": "gs", "type": "java.util.List",
                 "domain": {"kind": "collection", "min": 0,
                            "elementType": "p.Ghost"}}
             ]}
        ]}]
    }"#;
    let diagram = render(input).unwrap();
    assert!(!diagram.contains("Ghost"));
    assert!(diagram.contains("A --> java.lang.Object : g\n"));
    assert!(diagram.contains("A --> \"*\" java.lang.Object : gs\n"));
}

#[test]
fn test_rendering_is_deterministic() {
    let input = r#"{
        "shortNames": {"p.A": "A", "p.B": "B", "q.C": "C"},
        "packages": [
            {"name": "q", "classes": [{"name": "q.C"}]},
            {"name": "p", "classes": [
                {"name": "p.B", "superclasses": ["p.A"],
                 "methods": [
                    {"name": "m", "returnType": "void",
                     "parameters": [{"name": "x", "type": "int"}]},
                    {"name": "m", "returnType": "void",
                     "parameters": [{"name": "x", "type": "boolean"}]}
                 ]},
                {"name": "p.A"}
            ]}
        ]
    }"#;
    let model = load_model(input).unwrap();
    let writer = ClassDiagramWriter::new();
    let first = writer.write_model(&model);
    let second = writer.write_model(&model);
    assert_eq!(first, second);

    // loading again gives the same bytes as well
    let reloaded = load_model(input).unwrap();
    assert_eq!(first, writer.write_model(&reloaded));
}

#[test]
fn test_packages_visited_in_sorted_order() {
    let input = r#"{
        "shortNames": {"b.B": "B", "a.A": "A"},
        "packages": [
            {"name": "b", "classes": [{"name": "b.B"}]},
            {"name": "a", "classes": [{"name": "a.A"}]}
        ]
    }"#;
    let diagram = render(input).unwrap();
    let a = diagram.find("class A{").unwrap();
    let b = diagram.find("class B{").unwrap();
    assert!(a < b);
}

#[test]
fn test_stereotype_marker_supertype() {
    let input = r#"{
        "shortNames": {"p.Order": "Order", "p.Shipped": "Shipped"},
        "packages": [{"name": "p", "classes": [
            {"name": "p.Order", "superclasses": ["com.ibm.ia.model.Entity"]},
            {"name": "p.Shipped", "superclasses": ["com.ibm.ia.model.Event"]}
        ]}]
    }"#;
    let diagram = render(input).unwrap();
    assert!(diagram.contains("class Order<< (N,#b3ffd9) Entity >>{\n"));
    assert!(diagram.contains("class Shipped<< (V,#ff704d) Event >>{\n"));
    assert!(!diagram.contains("<|--"));
}

#[test]
fn test_nested_packages_are_traversed() {
    let input = r#"{
        "shortNames": {"a.b.Deep": "Deep"},
        "packages": [{"name": "a", "packages": [
            {"name": "a.b", "classes": [{"name": "a.b.Deep"}]}
        ]}]
    }"#;
    let diagram = render(input).unwrap();
    assert!(diagram.contains("class Deep{\n"));
}

#[test]
fn test_model_error_lists_diagnostics() {
    let err = load_model("{\"packages\": [").unwrap_err();
    match err {
        ModelError::Syntax { messages } => {
            assert!(!messages.is_empty());
            assert!(!messages[0].is_empty());
        }
        other => panic!("expected syntax error, got {:?}", other),
    }
}
