//! Product entity - The header record of a costed product.
//!
//! The bill of materials and bill of activities live in their own tables
//! (`material_lines`, `activity_lines`) keyed by the product code.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Product database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    /// Product code chosen by the user, unique among products
    #[sea_orm(primary_key, auto_increment = false)]
    pub code: i64,
    /// Name of the product (e.g., "Box 400x600x200")
    pub name: String,
    /// Free-text description
    pub description: String,
    /// Unit of finished output the bills are expressed per
    pub base_unit: String,
    /// When the product was created
    pub created_at: DateTime,
    /// When the product or its bills were last modified
    pub updated_at: DateTime,
}

/// Defines relationships between Product and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One product has many material lines
    #[sea_orm(has_many = "super::material_line::Entity")]
    MaterialLines,
    /// One product has many activity lines
    #[sea_orm(has_many = "super::activity_line::Entity")]
    ActivityLines,
}

impl Related<super::material_line::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MaterialLines.def()
    }
}

impl Related<super::activity_line::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ActivityLines.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
