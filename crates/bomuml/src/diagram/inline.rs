//! Attribute classification and multiplicity notation
//!
//! Decides, per attribute, whether its type is rendered as a field line
//! inside the class body or as an association line after it, and formats
//! the cardinality notation for collection-valued attributes.

use std::collections::HashSet;

use crate::model::{Attribute, CollectionDomain, Domain, ObjectModel, TypeRef};

/// Wrapper/value types inlined as fields in addition to primitives,
/// strings, and enums.
const INLINED_ATTRIBUTE_TYPES: &[&str] = &[
    "java.lang.Double",
    "java.util.Float",
    "java.util.Boolean",
    "java.util.Integer",
    "java.util.Short",
    "java.util.Byte",
    "java.util.Character",
    "java.time.ZonedDateTime",
];

/// Multiplicity notation for a collection's cardinality bounds
pub fn multiplicity(domain: &CollectionDomain) -> String {
    match domain.max {
        Some(max) if max == domain.min => max.to_string(),
        None if domain.min == 0 => "*".to_string(),
        None => format!("{}..*", domain.min),
        Some(max) => format!("{}..{}", domain.min, max),
    }
}

/// Decides which attribute types are inlinable as field lines
pub struct AttributeClassifier {
    inlined_types: HashSet<String>,
}

impl AttributeClassifier {
    pub fn new() -> Self {
        Self {
            inlined_types: INLINED_ATTRIBUTE_TYPES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }

    /// Treat an additional type as inlinable, by fully qualified name
    pub fn with_inlined_type(mut self, fqn: impl Into<String>) -> Self {
        self.inlined_types.insert(fqn.into());
        self
    }

    /// The field-line type representation of an attribute, or `None` when
    /// the attribute must be rendered as a relation.
    ///
    /// A collection-valued attribute whose element type is inlinable is
    /// itself inlinable, with a trailing `[<multiplicity>]` suffix.
    pub fn inline_representation(
        &self,
        model: &ObjectModel,
        attribute: &Attribute,
    ) -> Option<String> {
        if let Some(rep) = self.type_representation(model, &attribute.attribute_type) {
            return Some(rep);
        }
        if let Some(Domain::Collection(domain)) = &attribute.domain {
            if let Some(element) = &domain.element_type {
                if let Some(rep) = self.type_representation(model, element) {
                    return Some(format!("{} [{}]", rep, multiplicity(domain)));
                }
            }
        }
        None
    }

    fn type_representation(&self, model: &ObjectModel, t: &TypeRef) -> Option<String> {
        match t {
            TypeRef::Primitive(_) => Some(model.short_name(t)),
            TypeRef::Class(id) => {
                let inlined = *id == model.string_class()
                    || self.inlined_types.contains(&model.qualified_name(t))
                    || model.class(*id).is_enum;
                inlined.then(|| model.short_name(t))
            }
            TypeRef::Array(component) => self
                .type_representation(model, component)
                .map(|rep| format!("{}[]", rep)),
        }
    }
}

impl Default for AttributeClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ObjectModel;
    use proptest::prelude::*;

    fn domain(min: u32, max: Option<u32>) -> CollectionDomain {
        CollectionDomain {
            min,
            max,
            element_type: None,
        }
    }

    #[test]
    fn test_multiplicity_unbounded_from_zero() {
        assert_eq!(multiplicity(&domain(0, None)), "*");
    }

    #[test]
    fn test_multiplicity_unbounded_from_min() {
        assert_eq!(multiplicity(&domain(2, None)), "2..*");
    }

    #[test]
    fn test_multiplicity_exact_count() {
        assert_eq!(multiplicity(&domain(3, Some(3))), "3");
    }

    #[test]
    fn test_multiplicity_range() {
        assert_eq!(multiplicity(&domain(1, Some(5))), "1..5");
    }

    proptest! {
        #[test]
        fn multiplicity_is_never_empty(min in 0u32..100, max in proptest::option::of(0u32..100)) {
            let text = multiplicity(&domain(min, max));
            prop_assert!(!text.is_empty());
            if max == Some(min) {
                prop_assert_eq!(text, min.to_string());
            } else if max.is_none() {
                prop_assert!(text.ends_with('*'));
            } else {
                prop_assert!(text.contains(".."));
            }
        }
    }

    fn model(input: &str) -> ObjectModel {
        ObjectModel::from_json(input).unwrap()
    }

    fn first_attribute(model: &ObjectModel, class: &str) -> Attribute {
        let id = model.class_by_name(class).unwrap();
        model.class(id).attributes[0].clone()
    }

    #[test]
    fn test_primitive_is_inlinable() {
        let m = model(
            r#"{"packages": [{"name": "p", "classes": [{
                "name": "p.A", "attributes": [{"name": "x", "type": "int"}]
            }]}]}"#,
        );
        let classifier = AttributeClassifier::new();
        let attribute = first_attribute(&m, "p.A");
        assert_eq!(
            classifier.inline_representation(&m, &attribute),
            Some("int".to_string())
        );
    }

    #[test]
    fn test_string_is_inlinable() {
        let m = model(
            r#"{"packages": [{"name": "p", "classes": [{
                "name": "p.A",
                "attributes": [{"name": "s", "type": "java.lang.String"}]
            }]}]}"#,
        );
        let classifier = AttributeClassifier::new();
        let attribute = first_attribute(&m, "p.A");
        assert_eq!(
            classifier.inline_representation(&m, &attribute),
            Some("String".to_string())
        );
    }

    #[test]
    fn test_wrapper_type_is_inlinable() {
        let m = model(
            r#"{"packages": [{"name": "p", "classes": [{
                "name": "p.A",
                "attributes": [{"name": "when", "type": "java.time.ZonedDateTime"}]
            }]}]}"#,
        );
        let classifier = AttributeClassifier::new();
        let attribute = first_attribute(&m, "p.A");
        assert_eq!(
            classifier.inline_representation(&m, &attribute),
            Some("ZonedDateTime".to_string())
        );
    }

    #[test]
    fn test_enum_is_inlinable() {
        let m = model(
            r#"{"packages": [{"name": "p", "classes": [
                {"name": "p.A",
                 "attributes": [{"name": "color", "type": "p.Color"}]},
                {"name": "p.Color", "enum": true}
            ]}]}"#,
        );
        let classifier = AttributeClassifier::new();
        let attribute = first_attribute(&m, "p.A");
        assert_eq!(
            classifier.inline_representation(&m, &attribute),
            Some("Color".to_string())
        );
    }

    #[test]
    fn test_plain_class_is_not_inlinable() {
        let m = model(
            r#"{"packages": [{"name": "p", "classes": [
                {"name": "p.A", "attributes": [{"name": "b", "type": "p.B"}]},
                {"name": "p.B"}
            ]}]}"#,
        );
        let classifier = AttributeClassifier::new();
        let attribute = first_attribute(&m, "p.A");
        assert_eq!(classifier.inline_representation(&m, &attribute), None);
    }

    #[test]
    fn test_array_of_inlinable_component() {
        let m = model(
            r#"{"packages": [{"name": "p", "classes": [{
                "name": "p.A", "attributes": [{"name": "xs", "type": "int[]"}]
            }]}]}"#,
        );
        let classifier = AttributeClassifier::new();
        let attribute = first_attribute(&m, "p.A");
        assert_eq!(
            classifier.inline_representation(&m, &attribute),
            Some("int[]".to_string())
        );
    }

    #[test]
    fn test_array_of_plain_class_is_not_inlinable() {
        let m = model(
            r#"{"packages": [{"name": "p", "classes": [
                {"name": "p.A", "attributes": [{"name": "bs", "type": "p.B[]"}]},
                {"name": "p.B"}
            ]}]}"#,
        );
        let classifier = AttributeClassifier::new();
        let attribute = first_attribute(&m, "p.A");
        assert_eq!(classifier.inline_representation(&m, &attribute), None);
    }

    #[test]
    fn test_collection_of_inlinable_element_gets_multiplicity_suffix() {
        let m = model(
            r#"{"packages": [{"name": "p", "classes": [{
                "name": "p.A",
                "attributes": [{"name": "tags", "type": "java.util.List",
                    "domain": {"kind": "collection", "min": 0,
                               "elementType": "java.lang.String"}}]
            }]}]}"#,
        );
        let classifier = AttributeClassifier::new();
        let attribute = first_attribute(&m, "p.A");
        assert_eq!(
            classifier.inline_representation(&m, &attribute),
            Some("String [*]".to_string())
        );
    }

    #[test]
    fn test_collection_of_plain_element_is_not_inlinable() {
        let m = model(
            r#"{"packages": [{"name": "p", "classes": [
                {"name": "p.A",
                 "attributes": [{"name": "bs", "type": "java.util.List",
                     "domain": {"kind": "collection", "min": 0,
                                "elementType": "p.B"}}]},
                {"name": "p.B"}
            ]}]}"#,
        );
        let classifier = AttributeClassifier::new();
        let attribute = first_attribute(&m, "p.A");
        assert_eq!(classifier.inline_representation(&m, &attribute), None);
    }

    #[test]
    fn test_extra_inlined_type() {
        let m = model(
            r#"{"packages": [{"name": "p", "classes": [
                {"name": "p.A", "attributes": [{"name": "b", "type": "p.B"}]},
                {"name": "p.B"}
            ]}]}"#,
        );
        let classifier = AttributeClassifier::new().with_inlined_type("p.B");
        let attribute = first_attribute(&m, "p.A");
        assert_eq!(
            classifier.inline_representation(&m, &attribute),
            Some("B".to_string())
        );
    }
}
