//! Activity line entity - One entry of a product's bill of activities.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Bill-of-activities line database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "activity_lines")]
pub struct Model {
    /// Product this line belongs to
    #[sea_orm(primary_key, auto_increment = false)]
    pub product_code: i64,
    /// Activity performed
    #[sea_orm(primary_key, auto_increment = false)]
    pub activity_code: i64,
    /// Amount of activity consumed
    pub consumption: f64,
    /// Unit the consumption is expressed in
    pub activity_unit: String,
    /// Units of finished product the consumption corresponds to
    pub production_ratio: f64,
    /// Unit of the production ratio
    pub production_unit: String,
    /// Stored override, never read by the cost engine
    pub cost_per_unit: f64,
}

/// Defines relationships between `ActivityLine` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each line belongs to one product
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductCode",
        to = "super::product::Column::Code"
    )]
    Product,
    /// Each line performs one activity
    #[sea_orm(
        belongs_to = "super::activity::Entity",
        from = "Column::ActivityCode",
        to = "super::activity::Column::Code"
    )]
    Activity,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl Related<super::activity::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Activity.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
