//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

use serde::{Deserialize, Serialize};
use std::fmt;

pub mod activity;
pub mod activity_line;
pub mod material;
pub mod material_line;
pub mod product;

// Re-export specific types to avoid conflicts
pub use activity::{Column as ActivityColumn, Entity as Activity, Model as ActivityModel};
pub use activity_line::{
    Column as ActivityLineColumn, Entity as ActivityLine, Model as ActivityLineModel,
};
pub use material::{Column as MaterialColumn, Entity as Material, Model as MaterialModel};
pub use material_line::{
    Column as MaterialLineColumn, Entity as MaterialLine, Model as MaterialLineModel,
};
pub use product::{Column as ProductColumn, Entity as Product, Model as ProductModel};

/// The three kinds of code-keyed records the registry manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// Raw material in the material catalogue
    Material,
    /// Production activity in the activity catalogue
    Activity,
    /// Costed product
    Product,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Material => "Material",
            Self::Activity => "Activity",
            Self::Product => "Product",
        })
    }
}
