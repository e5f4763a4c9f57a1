//! Material line entity - One entry of a product's bill of materials.
//!
//! The composite key (`product_code`, `material_code`) enforces at most one line per
//! material per product.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Bill-of-materials line database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "material_lines")]
pub struct Model {
    /// Product this line belongs to
    #[sea_orm(primary_key, auto_increment = false)]
    pub product_code: i64,
    /// Material consumed
    #[sea_orm(primary_key, auto_increment = false)]
    pub material_code: i64,
    /// Amount of material consumed
    pub consumption: f64,
    /// Unit the consumption is expressed in
    pub consumption_unit: String,
    /// Units of finished product the consumption corresponds to
    pub production_ratio: f64,
    /// Unit of the production ratio
    pub production_unit: String,
    /// Percentage (0-100) of the material lost as waste
    pub waste: f64,
    /// Stored override, never read by the cost engine
    pub cost_per_unit: f64,
}

/// Defines relationships between `MaterialLine` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each line belongs to one product
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductCode",
        to = "super::product::Column::Code"
    )]
    Product,
    /// Each line consumes one material
    #[sea_orm(
        belongs_to = "super::material::Entity",
        from = "Column::MaterialCode",
        to = "super::material::Column::Code"
    )]
    Material,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl Related<super::material::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Material.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
