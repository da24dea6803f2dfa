//! bomuml - Render business object models as PlantUML class diagrams
//!
//! A library for loading a business object model (packages, classes,
//! attributes, members) from its JSON document and rendering it as
//! PlantUML class-diagram markup.
//!
//! # Quick Start
//!
//! ```rust
//! use bomuml::render;
//!
//! let input = r#"{
//!     "shortNames": {"shop.Order": "Order"},
//!     "packages": [{
//!         "name": "shop",
//!         "classes": [{
//!             "name": "shop.Order",
//!             "attributes": [{"name": "total", "type": "double"}]
//!         }]
//!     }]
//! }"#;
//! let diagram = render(input).unwrap();
//! assert!(diagram.contains("class Order{"));
//! assert!(diagram.contains("total: double"));
//! ```
//!
//! # Advanced Usage
//!
//! For more control, load the model and configure the writer separately:
//!
//! ```rust
//! use bomuml::prelude::*;
//!
//! let model = ObjectModel::from_json(r#"{
//!     "packages": [{"name": "p", "classes": [{"name": "p.A"}]}]
//! }"#).unwrap();
//!
//! let writer = ClassDiagramWriter::new()
//!     .with_excluded_namespace("vendor")
//!     .with_stereotype("p.Audited", "<< (A,#ffcc00) Audited >>");
//! let diagram = writer.write_model(&model);
//! assert!(diagram.contains("class p.A{"));
//! ```

pub mod core;
pub mod diagram;
pub mod model;

pub use crate::core::ModelError;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::ModelError;
    pub use crate::diagram::{multiplicity, AttributeClassifier, ClassDiagramWriter};
    pub use crate::model::{
        Attribute, Class, ClassId, CollectionDomain, Domain, Member, MemberKind, ObjectModel,
        Package, PackageId, Parameter, Primitive, TypeRef,
    };
}

use crate::diagram::ClassDiagramWriter;
use crate::model::ObjectModel;

/// Render an object-model JSON document as class-diagram markup
///
/// This is the simplest way to convert a model to a diagram, using the
/// default namespace exclusions and stereotype table.
///
/// # Arguments
/// * `input` - The object-model JSON document
///
/// # Returns
/// * `Ok(String)` - The diagram markup
/// * `Err` - If the document cannot be deserialized
pub fn render(input: &str) -> anyhow::Result<String> {
    let model = load_model(input)?;
    Ok(ClassDiagramWriter::new().write_model(&model))
}

/// Load an object model from its JSON document without rendering
///
/// Useful when the model is rendered more than once or with a customized
/// [`ClassDiagramWriter`].
pub fn load_model(input: &str) -> Result<ObjectModel, ModelError> {
    ObjectModel::from_json(input)
}
