//! Class diagram writer
//!
//! Walks the object model depth first and emits PlantUML class-diagram
//! markup: inheritance arrows, class blocks, and association lines.
//! Packages and classes are visited in a stable order, superclasses
//! strictly before subclasses, and every class is rendered at most once
//! regardless of how often the reference graph reaches it.

use std::collections::{HashMap, HashSet};

use tracing::{debug, trace};

use super::inline::{multiplicity, AttributeClassifier};
use super::signature;
use crate::model::{Attribute, ClassId, ObjectModel, PackageId, TypeRef};

/// Marker property flagging a timestamp attribute, rendered bold
const TIMESTAMP_PROPERTY: &str = "ia.timestamp";
/// Marker property flagging an entity-identifier attribute, rendered bold
const ENTITY_ID_PROPERTY: &str = "ia.entity.id";

/// Stereotype tag for the utility-class pattern
const UTILITIES_STEREOTYPE: &str = " << (U,#99ccff) Utilities >>";

/// Renders an object model as PlantUML class-diagram markup
///
/// The writer itself is reusable configuration; all per-run state lives in
/// a transient traversal scoped to one [`write_model`](Self::write_model)
/// call, so rendering the same model twice produces byte-identical output.
pub struct ClassDiagramWriter {
    excluded_namespaces: HashSet<String>,
    stereotypes: HashMap<String, String>,
    classifier: AttributeClassifier,
}

impl ClassDiagramWriter {
    pub fn new() -> Self {
        let mut excluded_namespaces = HashSet::new();
        excluded_namespaces.insert("java".to_string());
        excluded_namespaces.insert("ilog.rules.xml".to_string());

        let mut stereotypes = HashMap::new();
        stereotypes.insert(
            "com.ibm.ia.model.Event".to_string(),
            "<< (V,#ff704d) Event >>".to_string(),
        );
        stereotypes.insert(
            "com.ibm.ia.model.Entity".to_string(),
            "<< (N,#b3ffd9) Entity >>".to_string(),
        );

        Self {
            excluded_namespaces,
            stereotypes,
            classifier: AttributeClassifier::new(),
        }
    }

    /// Exclude a namespace prefix from traversal
    pub fn with_excluded_namespace(mut self, prefix: impl Into<String>) -> Self {
        self.excluded_namespaces.insert(prefix.into());
        self
    }

    /// Render a supertype as a header stereotype instead of an arrow
    pub fn with_stereotype(mut self, fqn: impl Into<String>, tag: impl Into<String>) -> Self {
        self.stereotypes.insert(fqn.into(), tag.into());
        self
    }

    /// Render the full reachable model as diagram markup
    pub fn write_model(&self, model: &ObjectModel) -> String {
        debug!(classes = model.class_count(), "rendering class diagram");
        let mut traversal = Traversal {
            model,
            writer: self,
            out: String::new(),
            visited: HashMap::new(),
        };
        traversal.visit_package(model.default_package());
        traversal.out.push('\n');
        traversal.out
    }
}

impl Default for ClassDiagramWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-run traversal state
struct Traversal<'m> {
    model: &'m ObjectModel,
    writer: &'m ClassDiagramWriter,
    out: String,
    /// Visited classes. The value slot is the annotation side channel:
    /// written while processing superclasses, read back when the class
    /// header is printed.
    visited: HashMap<ClassId, Option<String>>,
}

impl<'m> Traversal<'m> {
    /// A namespace is rejected if it starts with any excluded prefix;
    /// the default package (no namespace) is always accepted.
    fn accept_namespace(&self, namespace: Option<&str>) -> bool {
        match namespace {
            Some(ns) => !self
                .writer
                .excluded_namespaces
                .iter()
                .any(|excluded| ns.starts_with(excluded)),
            None => true,
        }
    }

    fn accept_class(&self, id: ClassId) -> bool {
        let class = self.model.class(id);
        !class.is_missing_reference && self.accept_namespace(class.namespace.as_deref())
    }

    fn visit_package(&mut self, id: PackageId) {
        let model = self.model;
        let package = model.package(id);
        if !self.accept_namespace(package.name.as_deref()) {
            return;
        }
        trace!(package = package.name.as_deref().unwrap_or("<default>"), "visiting package");
        for class in model.sorted_classes(&package.classes) {
            self.visit_class(class);
        }
        for nested in model.sorted_packages(&package.packages) {
            self.visit_package(nested);
        }
    }

    fn visit_class(&mut self, id: ClassId) {
        if !self.accept_class(id) || self.visited.contains_key(&id) {
            return;
        }
        // mark before recursing: terminates cycles and deduplicates
        // diamond-inherited classes
        self.visited.insert(id, None);

        let model = self.model;
        let class = model.class(id);
        trace!(class = %class.name, "visiting class");
        for &superclass in &class.superclasses {
            self.visit_class(superclass);
        }

        self.write_inheritance(id);
        self.write_class_header(id);
        self.out.push_str("{\n");
        let relations = self.write_attributes(id);

        let constructors = model.sorted_members(&class.constructors);
        let methods = model.sorted_members(&class.methods);
        if !constructors.is_empty() {
            self.out.push_str("__\n");
            for member in &constructors {
                signature::write_member(&mut self.out, model, member);
            }
            if !methods.is_empty() {
                self.out.push_str("__\n");
            }
        } else if !methods.is_empty() {
            self.out.push_str("__\n");
        }
        for member in &methods {
            signature::write_member(&mut self.out, model, member);
        }
        self.out.push_str("}\n");

        self.write_relations(id, &relations);
    }

    /// Emit inheritance arrows for a class, or record a stereotype
    /// annotation for supertypes found in the stereotype table.
    fn write_inheritance(&mut self, id: ClassId) {
        let model = self.model;
        let class = model.class(id);
        for &superclass_id in &class.superclasses {
            if superclass_id == model.object_class() {
                continue;
            }
            let superclass = model.class(superclass_id);
            if let Some(tag) = self.writer.stereotypes.get(&superclass.name) {
                self.visited.insert(id, Some(tag.clone()));
                continue;
            }
            // missing references are never named in the output
            if superclass.is_missing_reference {
                continue;
            }
            // interface implementation is not drawn as an arrow
            if superclass.is_interface && !class.is_interface {
                continue;
            }
            self.out.push_str(model.class_display_name(superclass_id));
            self.out.push_str(" <|-- ");
            self.out.push_str(model.class_display_name(id));
            self.out.push('\n');
        }
    }

    fn write_class_header(&mut self, id: ClassId) {
        let model = self.model;
        let class = model.class(id);
        if class.is_enum {
            self.out.push_str("enum ");
            self.out.push_str(model.class_display_name(id));
        } else if model.is_utility_class(id) {
            self.out.push_str("class ");
            self.out.push_str(model.class_display_name(id));
            self.out.push_str(UTILITIES_STEREOTYPE);
        } else {
            self.out
                .push_str(if class.is_interface { "interface " } else { "class " });
            self.out.push_str(model.class_display_name(id));
            if let Some(Some(annotation)) = self.visited.get(&id) {
                self.out.push_str(annotation);
            }
        }
    }

    /// Emit field lines for inlinable attributes; returns the attributes
    /// that must be rendered as relations instead.
    fn write_attributes(&mut self, id: ClassId) -> Vec<&'m Attribute> {
        let model = self.model;
        let class = model.class(id);
        let mut relations = Vec::new();
        for attribute in &class.attributes {
            match self
                .writer
                .classifier
                .inline_representation(model, attribute)
            {
                Some(representation) => {
                    if attribute.is_static {
                        self.out.push_str("{static} ");
                    }
                    let bold = is_bold_attribute(attribute);
                    if bold {
                        self.out.push_str("<b>");
                    }
                    self.out.push_str(&attribute.name);
                    if bold {
                        self.out.push_str("</b>");
                    }
                    self.out.push_str(": ");
                    self.out.push_str(&representation);
                    self.out.push('\n');
                }
                None => relations.push(attribute),
            }
        }
        relations
    }

    /// Emit association lines for the class's non-inlinable attributes,
    /// in declaration order, after the class block.
    fn write_relations(&mut self, id: ClassId, attributes: &[&Attribute]) {
        let model = self.model;
        for attribute in attributes {
            self.out.push_str(model.class_display_name(id));
            self.out.push_str(" --> ");
            let note = match attribute.collection_domain() {
                Some(domain) => {
                    self.out.push('"');
                    self.out.push_str(&multiplicity(domain));
                    self.out.push_str("\" ");
                    let target = match &domain.element_type {
                        Some(element) => self.target_name(element),
                        None => model
                            .class_display_name(model.object_class())
                            .to_string(),
                    };
                    self.out.push_str(&target);
                    Some(model.qualified_name(&attribute.attribute_type))
                }
                None => {
                    let mut attribute_type = &attribute.attribute_type;
                    let note = if attribute_type.is_array() {
                        let note = Some(model.qualified_name(attribute_type));
                        attribute_type = attribute_type.element();
                        note
                    } else {
                        None
                    };
                    let target = self.target_name(attribute_type);
                    self.out.push_str(&target);
                    note
                }
            };
            self.out.push_str(" : ");
            self.out.push_str(&attribute.name);
            self.out.push('\n');

            if let Some(note) = note {
                self.out.push_str("note on link:");
                self.out.push_str(&note);
                self.out.push('\n');
            }
        }
    }

    /// Display name of a relation target; missing-reference targets
    /// degrade to the universal Object class.
    fn target_name(&self, t: &TypeRef) -> String {
        match t {
            TypeRef::Class(id) if self.model.class(*id).is_missing_reference => self
                .model
                .class_display_name(self.model.object_class())
                .to_string(),
            _ => self.model.display_name(t),
        }
    }
}

fn is_bold_attribute(attribute: &Attribute) -> bool {
    attribute.property_value(TIMESTAMP_PROPERTY).is_some()
        || attribute.property_value(ENTITY_ID_PROPERTY).is_some()
}
