//! Material entity - Represents a raw material in the material catalogue.
//!
//! Each material has a user-assigned code, a name, a description, the current cost per
//! unit and the unit that cost refers to (e.g. "kg", "sheet").

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Material database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "materials")]
pub struct Model {
    /// Catalogue code chosen by the user, unique among materials
    #[sea_orm(primary_key, auto_increment = false)]
    pub code: i64,
    /// Short name of the material
    pub name: String,
    /// Free-text description
    pub description: String,
    /// Current cost of one `base_unit` of this material
    pub cost_per_unit: f64,
    /// Unit the cost is expressed in
    pub base_unit: String,
    /// When the material was added to the catalogue
    pub created_at: DateTime,
    /// When the material was last modified
    pub updated_at: DateTime,
}

/// Defines relationships between Material and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One material appears in many bill-of-materials lines
    #[sea_orm(has_many = "super::material_line::Entity")]
    MaterialLines,
}

impl Related<super::material_line::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MaterialLines.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
