//! JSON object-model loader
//!
//! Deserializes an object-model document and builds the arena-backed
//! [`ObjectModel`]. Classes are interned by fully qualified name: a name
//! referenced as a supertype, attribute type, or collection element type
//! but never defined stays behind as a missing-reference entry.

use std::collections::HashMap;

use serde::Deserialize;
use tracing::debug;

use super::types::{
    Attribute, Class, ClassId, CollectionDomain, Domain, Member, MemberKind, ObjectModel, Package,
    PackageId, Parameter, Primitive, TypeRef,
};
use crate::core::ModelError;

/// Built-in string class, registered before any package is loaded
const STRING_CLASS: &str = "java.lang.String";
/// Universal object class, the substitute target for unknown element types
const OBJECT_CLASS: &str = "java.lang.Object";
const ENUM_CLASS: &str = "java.lang.Enum";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawModel {
    #[serde(default)]
    short_names: HashMap<String, String>,
    #[serde(default)]
    classes: Vec<RawClass>,
    #[serde(default)]
    packages: Vec<RawPackage>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPackage {
    name: String,
    #[serde(default)]
    classes: Vec<RawClass>,
    #[serde(default)]
    packages: Vec<RawPackage>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawClass {
    name: String,
    #[serde(default)]
    interface: bool,
    #[serde(default, rename = "enum")]
    is_enum: bool,
    #[serde(default)]
    superclasses: Vec<String>,
    #[serde(default)]
    attributes: Vec<RawAttribute>,
    #[serde(default)]
    constructors: Vec<RawMember>,
    #[serde(default)]
    methods: Vec<RawMember>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAttribute {
    name: String,
    #[serde(rename = "type")]
    attribute_type: String,
    #[serde(default, rename = "static")]
    is_static: bool,
    #[serde(default)]
    domain: Option<RawDomain>,
    #[serde(default)]
    properties: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
enum RawDomain {
    #[serde(rename_all = "camelCase")]
    Collection {
        #[serde(default)]
        min: u32,
        #[serde(default)]
        max: Option<u32>,
        #[serde(default)]
        element_type: Option<String>,
    },
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMember {
    name: String,
    #[serde(default)]
    return_type: Option<String>,
    #[serde(default)]
    parameters: Vec<RawParameter>,
    #[serde(default, rename = "static")]
    is_static: bool,
    #[serde(default, rename = "operator")]
    is_operator: bool,
    #[serde(default, rename = "varargs")]
    is_varargs: bool,
    #[serde(default)]
    type_parameters: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawParameter {
    name: String,
    #[serde(rename = "type")]
    parameter_type: String,
}

impl ObjectModel {
    /// Load an object model from its JSON document
    pub fn from_json(input: &str) -> Result<Self, ModelError> {
        let raw: RawModel = serde_json::from_str(input).map_err(|err| ModelError::Syntax {
            messages: vec![err.to_string()],
        })?;
        Ok(build(raw))
    }
}

struct ModelBuilder {
    packages: Vec<Package>,
    classes: Vec<Class>,
    by_name: HashMap<String, ClassId>,
}

impl ModelBuilder {
    fn new() -> Self {
        Self {
            packages: Vec::new(),
            classes: Vec::new(),
            by_name: HashMap::new(),
        }
    }

    /// Intern a class by fully qualified name, creating a
    /// missing-reference entry on first sight.
    fn class_id(&mut self, fqn: &str) -> ClassId {
        if let Some(&id) = self.by_name.get(fqn) {
            return id;
        }
        let id = ClassId(self.classes.len());
        let namespace = fqn.rsplit_once('.').map(|(ns, _)| ns.to_string());
        self.classes.push(Class {
            name: fqn.to_string(),
            is_interface: false,
            is_enum: false,
            is_missing_reference: true,
            superclasses: Vec::new(),
            attributes: Vec::new(),
            constructors: Vec::new(),
            methods: Vec::new(),
            namespace,
        });
        self.by_name.insert(fqn.to_string(), id);
        id
    }

    fn parse_type(&mut self, name: &str) -> TypeRef {
        if let Some(component) = name.strip_suffix("[]") {
            TypeRef::Array(Box::new(self.parse_type(component)))
        } else if let Some(primitive) = Primitive::from_name(name) {
            TypeRef::Primitive(primitive)
        } else {
            TypeRef::Class(self.class_id(name))
        }
    }

    fn add_package(&mut self, raw: RawPackage) -> PackageId {
        let classes: Vec<ClassId> = raw
            .classes
            .into_iter()
            .map(|c| self.add_class(c, Some(raw.name.clone())))
            .collect();
        let nested: Vec<PackageId> = raw
            .packages
            .into_iter()
            .map(|p| self.add_package(p))
            .collect();
        let id = PackageId(self.packages.len());
        self.packages.push(Package {
            name: Some(raw.name),
            classes,
            packages: nested,
        });
        id
    }

    fn add_class(&mut self, raw: RawClass, namespace: Option<String>) -> ClassId {
        let id = self.class_id(&raw.name);
        let superclasses: Vec<ClassId> =
            raw.superclasses.iter().map(|s| self.class_id(s)).collect();
        let attributes: Vec<Attribute> = raw
            .attributes
            .into_iter()
            .map(|a| self.build_attribute(a))
            .collect();
        let constructors: Vec<Member> = raw
            .constructors
            .into_iter()
            .map(|m| self.build_member(m, MemberKind::Constructor))
            .collect();
        let methods: Vec<Member> = raw
            .methods
            .into_iter()
            .map(|m| self.build_member(m, MemberKind::Method))
            .collect();

        let class = &mut self.classes[id.0];
        class.is_interface = raw.interface;
        class.is_enum = raw.is_enum;
        class.is_missing_reference = false;
        class.superclasses = superclasses;
        class.attributes = attributes;
        class.constructors = constructors;
        class.methods = methods;
        class.namespace = namespace;
        id
    }

    fn build_attribute(&mut self, raw: RawAttribute) -> Attribute {
        let attribute_type = self.parse_type(&raw.attribute_type);
        let domain = raw.domain.map(|d| match d {
            RawDomain::Collection {
                min,
                max,
                element_type,
            } => Domain::Collection(CollectionDomain {
                min,
                max,
                element_type: element_type.map(|e| self.parse_type(&e)),
            }),
        });
        Attribute {
            name: raw.name,
            attribute_type,
            is_static: raw.is_static,
            domain,
            properties: raw.properties,
        }
    }

    fn build_member(&mut self, raw: RawMember, kind: MemberKind) -> Member {
        let return_type = match kind {
            MemberKind::Constructor => None,
            // a method with no declared return type is void
            MemberKind::Method => Some(
                raw.return_type
                    .map(|s| self.parse_type(&s))
                    .unwrap_or(TypeRef::Primitive(Primitive::Void)),
            ),
        };
        let parameters: Vec<Parameter> = raw
            .parameters
            .into_iter()
            .map(|p| Parameter {
                parameter_type: self.parse_type(&p.parameter_type),
                name: p.name,
            })
            .collect();
        Member {
            name: raw.name,
            kind,
            return_type,
            parameters,
            is_static: raw.is_static,
            is_operator: raw.is_operator,
            is_varargs: raw.is_varargs,
            type_parameters: raw.type_parameters,
        }
    }
}

fn build(raw: RawModel) -> ObjectModel {
    let mut builder = ModelBuilder::new();
    let string_class = builder.class_id(STRING_CLASS);
    let object_class = builder.class_id(OBJECT_CLASS);

    let root_classes: Vec<ClassId> = raw
        .classes
        .into_iter()
        .map(|c| builder.add_class(c, None))
        .collect();
    let top_packages: Vec<PackageId> = raw
        .packages
        .into_iter()
        .map(|p| builder.add_package(p))
        .collect();

    let default_package = PackageId(builder.packages.len());
    builder.packages.push(Package {
        name: None,
        classes: root_classes,
        packages: top_packages,
    });

    // classes extending java.lang.Enum are enums
    if let Some(&enum_id) = builder.by_name.get(ENUM_CLASS) {
        for class in &mut builder.classes {
            if class.superclasses.contains(&enum_id) {
                class.is_enum = true;
            }
        }
    }

    debug!(
        classes = builder.classes.len(),
        packages = builder.packages.len(),
        "object model loaded"
    );

    ObjectModel {
        packages: builder.packages,
        classes: builder.classes,
        default_package,
        string_class,
        object_class,
        short_names: raw.short_names,
        by_name: builder.by_name,
    }
}
