//! Activity entity - Represents a production activity in the activity catalogue.
//!
//! Activities are priced per `activity_unit` (e.g. "minutes", "cut").

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Activity database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "activities")]
pub struct Model {
    /// Catalogue code chosen by the user, unique among activities
    #[sea_orm(primary_key, auto_increment = false)]
    pub code: i64,
    /// Short name of the activity
    pub name: String,
    /// Free-text description
    pub description: String,
    /// Current cost of one `activity_unit`
    pub cost_per_unit: f64,
    /// Unit the cost is expressed in
    pub activity_unit: String,
    /// When the activity was added to the catalogue
    pub created_at: DateTime,
    /// When the activity was last modified
    pub updated_at: DateTime,
}

/// Defines relationships between Activity and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One activity appears in many bill-of-activities lines
    #[sea_orm(has_many = "super::activity_line::Entity")]
    ActivityLines,
}

impl Related<super::activity_line::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ActivityLines.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
