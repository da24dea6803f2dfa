//! In-memory business object model
//!
//! Arena-backed, read-only views over packages, classes, attributes, and
//! members. Handles (`ClassId`, `PackageId`) index into the arenas, so
//! entity identity is an integer comparison and identity-keyed bookkeeping
//! (visited sets, annotation maps) is cheap and cycle-proof.

use std::collections::HashMap;

/// Handle to a class in the model arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClassId(pub(crate) usize);

/// Handle to a package in the model arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PackageId(pub(crate) usize);

/// Primitive value types of the modeled language
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    Boolean,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    Char,
    Void,
}

impl Primitive {
    pub fn name(self) -> &'static str {
        match self {
            Primitive::Boolean => "boolean",
            Primitive::Byte => "byte",
            Primitive::Short => "short",
            Primitive::Int => "int",
            Primitive::Long => "long",
            Primitive::Float => "float",
            Primitive::Double => "double",
            Primitive::Char => "char",
            Primitive::Void => "void",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "boolean" => Some(Primitive::Boolean),
            "byte" => Some(Primitive::Byte),
            "short" => Some(Primitive::Short),
            "int" => Some(Primitive::Int),
            "long" => Some(Primitive::Long),
            "float" => Some(Primitive::Float),
            "double" => Some(Primitive::Double),
            "char" => Some(Primitive::Char),
            "void" => Some(Primitive::Void),
            _ => None,
        }
    }
}

/// A reference to a declared type: primitive, class, or array
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    Primitive(Primitive),
    Class(ClassId),
    Array(Box<TypeRef>),
}

impl TypeRef {
    pub fn is_array(&self) -> bool {
        matches!(self, TypeRef::Array(_))
    }

    /// Component type of an array, `None` for non-arrays
    pub fn component(&self) -> Option<&TypeRef> {
        match self {
            TypeRef::Array(component) => Some(component),
            _ => None,
        }
    }

    /// Innermost non-array component type
    pub fn element(&self) -> &TypeRef {
        let mut current = self;
        while let TypeRef::Array(component) = current {
            current = component;
        }
        current
    }
}

/// Cardinality bounds and element type of a collection-valued attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionDomain {
    pub min: u32,
    /// `None` means unbounded
    pub max: Option<u32>,
    pub element_type: Option<TypeRef>,
}

/// Constraint attached to an attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Domain {
    Collection(CollectionDomain),
}

/// An attribute of a class
#[derive(Debug, Clone)]
pub struct Attribute {
    pub name: String,
    pub attribute_type: TypeRef,
    pub is_static: bool,
    pub domain: Option<Domain>,
    pub properties: HashMap<String, String>,
}

impl Attribute {
    pub fn property_value(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    /// The collection domain, if this attribute is collection-valued
    pub fn collection_domain(&self) -> Option<&CollectionDomain> {
        match &self.domain {
            Some(Domain::Collection(domain)) => Some(domain),
            None => None,
        }
    }
}

/// Kind of a class member
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    Constructor,
    Method,
}

/// A constructor or method of a class
#[derive(Debug, Clone)]
pub struct Member {
    pub name: String,
    pub kind: MemberKind,
    /// Always present for methods, absent for constructors
    pub return_type: Option<TypeRef>,
    pub parameters: Vec<Parameter>,
    pub is_static: bool,
    pub is_operator: bool,
    pub is_varargs: bool,
    /// Generic type parameter names, e.g. `["T", "U"]`
    pub type_parameters: Vec<String>,
}

/// A member parameter
#[derive(Debug, Clone)]
pub struct Parameter {
    pub name: String,
    pub parameter_type: TypeRef,
}

/// A class, interface, or enum of the object model
#[derive(Debug, Clone)]
pub struct Class {
    /// Fully qualified name
    pub name: String,
    pub is_interface: bool,
    pub is_enum: bool,
    /// A forward reference the model never resolved; excluded from rendering
    pub is_missing_reference: bool,
    /// Raw superclass list, declaration order
    pub superclasses: Vec<ClassId>,
    pub attributes: Vec<Attribute>,
    pub constructors: Vec<Member>,
    pub methods: Vec<Member>,
    /// Enclosing namespace, `None` for the default package
    pub namespace: Option<String>,
}

impl Class {
    /// Segment after the last `.` of the fully qualified name
    pub fn short_display_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }
}

/// A package of the object model
#[derive(Debug, Clone)]
pub struct Package {
    /// Full dotted namespace, `None` for the default package
    pub name: Option<String>,
    pub classes: Vec<ClassId>,
    pub packages: Vec<PackageId>,
}

/// Root container for the object model
///
/// All entities are supplied fully formed by the loader; rendering never
/// mutates them.
#[derive(Debug, Clone)]
pub struct ObjectModel {
    pub(crate) packages: Vec<Package>,
    pub(crate) classes: Vec<Class>,
    pub(crate) default_package: PackageId,
    pub(crate) string_class: ClassId,
    pub(crate) object_class: ClassId,
    pub(crate) short_names: HashMap<String, String>,
    pub(crate) by_name: HashMap<String, ClassId>,
}

impl ObjectModel {
    pub fn default_package(&self) -> PackageId {
        self.default_package
    }

    pub fn package(&self, id: PackageId) -> &Package {
        &self.packages[id.0]
    }

    pub fn class(&self, id: ClassId) -> &Class {
        &self.classes[id.0]
    }

    /// The built-in `java.lang.String` class
    pub fn string_class(&self) -> ClassId {
        self.string_class
    }

    /// The universal `java.lang.Object` class
    pub fn object_class(&self) -> ClassId {
        self.object_class
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    /// Look up a class by fully qualified name
    pub fn class_by_name(&self, fqn: &str) -> Option<ClassId> {
        self.by_name.get(fqn).copied()
    }

    /// Fully qualified name of a type
    pub fn qualified_name(&self, t: &TypeRef) -> String {
        match t {
            TypeRef::Primitive(p) => p.name().to_string(),
            TypeRef::Class(id) => self.class(*id).name.clone(),
            TypeRef::Array(component) => format!("{}[]", self.qualified_name(component)),
        }
    }

    /// Short display name of a type (last name segment, `[]`-suffixed for arrays)
    pub fn short_display_name(&self, t: &TypeRef) -> String {
        match t {
            TypeRef::Primitive(p) => p.name().to_string(),
            TypeRef::Class(id) => self.class(*id).short_display_name().to_string(),
            TypeRef::Array(component) => format!("{}[]", self.short_display_name(component)),
        }
    }

    /// Registered alias for the type, or its fully qualified name
    pub fn display_name(&self, t: &TypeRef) -> String {
        let fqn = self.qualified_name(t);
        self.short_names.get(&fqn).cloned().unwrap_or(fqn)
    }

    /// Registered alias for a class, or its fully qualified name
    pub fn class_display_name(&self, id: ClassId) -> &str {
        let fqn = &self.class(id).name;
        self.short_names.get(fqn).map(String::as_str).unwrap_or(fqn)
    }

    /// Shortest display name for a type: the registered alias when one
    /// exists and differs from the fully qualified name, otherwise the
    /// short display name.
    pub fn short_name(&self, t: &TypeRef) -> String {
        let fqn = self.qualified_name(t);
        match self.short_names.get(&fqn) {
            Some(alias) if *alias != fqn => alias.clone(),
            _ => self.short_display_name(t),
        }
    }

    /// Whether the class matches the utility pattern: concrete, non-enum,
    /// with at least one member and only static attributes and methods.
    pub fn is_utility_class(&self, id: ClassId) -> bool {
        let class = self.class(id);
        !class.is_interface
            && !class.is_enum
            && !class.is_missing_reference
            && !(class.attributes.is_empty() && class.methods.is_empty())
            && class.attributes.iter().all(|a| a.is_static)
            && class.methods.iter().all(|m| m.is_static)
    }

    /// Model-element ordering for classes: short display name, ties broken
    /// by fully qualified name.
    pub fn sorted_classes(&self, ids: &[ClassId]) -> Vec<ClassId> {
        let mut sorted = ids.to_vec();
        sorted.sort_by(|&a, &b| {
            let ca = self.class(a);
            let cb = self.class(b);
            ca.short_display_name()
                .cmp(cb.short_display_name())
                .then_with(|| ca.name.cmp(&cb.name))
        });
        sorted
    }

    /// Model-element ordering for packages: by display name
    pub fn sorted_packages(&self, ids: &[PackageId]) -> Vec<PackageId> {
        let mut sorted = ids.to_vec();
        sorted.sort_by(|&a, &b| self.package(a).name.cmp(&self.package(b).name));
        sorted
    }

    /// Member-with-parameters ordering: name, then the sequence of
    /// parameter type names.
    pub fn sorted_members<'m>(&self, members: &'m [Member]) -> Vec<&'m Member> {
        let mut sorted: Vec<&Member> = members.iter().collect();
        sorted.sort_by(|a, b| {
            a.name.cmp(&b.name).then_with(|| {
                let pa: Vec<String> = a
                    .parameters
                    .iter()
                    .map(|p| self.qualified_name(&p.parameter_type))
                    .collect();
                let pb: Vec<String> = b
                    .parameters
                    .iter()
                    .map(|p| self.qualified_name(&p.parameter_type))
                    .collect();
                pa.cmp(&pb)
            })
        });
        sorted
    }
}
