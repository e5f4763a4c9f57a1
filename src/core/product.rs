//! Product business logic - creating products and persisting their bills.
//!
//! This module loads and stores [`ProductSheet`]s: the product header lives in `products`,
//! the bill of materials in `material_lines` and the bill of activities in `activity_lines`.
//! Composition rules (validation, overwrite-on-same-code) live in
//! [`composition`](crate::core::composition); this module only reads and writes rows.

use crate::{
    core::{
        catalog::validate_code,
        composition::ProductSheet,
        validation::{Validator, non_empty},
    },
    entities::{
        ActivityLine, EntityKind, MaterialLine, Product, activity_line, material_line, product,
    },
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Input for creating a product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    /// Product code, must be positive and unused
    pub code: i64,
    /// Product name, must not be blank
    pub name: String,
    /// Free-text description
    pub description: String,
    /// Unit of finished output
    pub base_unit: String,
}

impl NewProduct {
    /// Convenience constructor.
    pub fn new(
        code: i64,
        name: impl Into<String>,
        description: impl Into<String>,
        base_unit: impl Into<String>,
    ) -> Self {
        Self {
            code,
            name: name.into(),
            description: description.into(),
            base_unit: base_unit.into(),
        }
    }
}

/// Finds a product header by code.
pub async fn get_product_by_code<C>(db: &C, code: i64) -> Result<Option<product::Model>>
where
    C: ConnectionTrait,
{
    Product::find_by_id(code).one(db).await.map_err(Into::into)
}

/// Loads a product with both of its bills. A miss is `Ok(None)`.
pub async fn get_product_sheet<C>(db: &C, code: i64) -> Result<Option<ProductSheet>>
where
    C: ConnectionTrait,
{
    let Some(header) = get_product_by_code(db, code).await? else {
        return Ok(None);
    };

    let materials = MaterialLine::find()
        .filter(material_line::Column::ProductCode.eq(code))
        .order_by_asc(material_line::Column::MaterialCode)
        .all(db)
        .await?;
    let activities = ActivityLine::find()
        .filter(activity_line::Column::ProductCode.eq(code))
        .order_by_asc(activity_line::Column::ActivityCode)
        .all(db)
        .await?;

    Ok(Some(ProductSheet::from_parts(header, materials, activities)))
}

/// Loads every product with its bills, ordered by product code.
pub async fn get_all_product_sheets<C>(db: &C) -> Result<Vec<ProductSheet>>
where
    C: ConnectionTrait,
{
    let headers = Product::find()
        .order_by_asc(product::Column::Code)
        .all(db)
        .await?;

    let mut materials: BTreeMap<i64, Vec<material_line::Model>> = BTreeMap::new();
    for line in MaterialLine::find().all(db).await? {
        materials.entry(line.product_code).or_default().push(line);
    }
    let mut activities: BTreeMap<i64, Vec<activity_line::Model>> = BTreeMap::new();
    for line in ActivityLine::find().all(db).await? {
        activities.entry(line.product_code).or_default().push(line);
    }

    Ok(headers
        .into_iter()
        .map(|header| {
            let code = header.code;
            ProductSheet::from_parts(
                header,
                materials.remove(&code).unwrap_or_default(),
                activities.remove(&code).unwrap_or_default(),
            )
        })
        .collect())
}

/// Creates a product with empty bills.
///
/// # Errors
/// - [`Error::InvalidCode`] if the code is not positive or is already in use
/// - [`Error::Validation`] if the name is blank
pub async fn create_product<C>(db: &C, input: &NewProduct) -> Result<ProductSheet>
where
    C: ConnectionTrait,
{
    validate_code(EntityKind::Product, input.code)?;
    let mut validator = Validator::new();
    validator.check("name", non_empty(&input.name));
    validator.finish()?;

    if get_product_by_code(db, input.code).await?.is_some() {
        return Err(Error::InvalidCode {
            kind: EntityKind::Product,
            code: input.code,
            reason: "code already in use".to_string(),
        });
    }

    let now = chrono::Utc::now().naive_utc();
    let product = product::ActiveModel {
        code: Set(input.code),
        name: Set(input.name.trim().to_string()),
        description: Set(input.description.clone()),
        base_unit: Set(input.base_unit.clone()),
        created_at: Set(now),
        updated_at: Set(now),
    };
    let created = product.insert(db).await?;
    info!(code = created.code, name = %created.name, "Product created");
    Ok(ProductSheet::new(created))
}

/// Writes a bill-of-materials line, replacing any stored line for the same material.
pub async fn save_material_line<C>(
    db: &C,
    line: &material_line::Model,
) -> Result<material_line::Model>
where
    C: ConnectionTrait,
{
    let existing = MaterialLine::find_by_id((line.product_code, line.material_code))
        .one(db)
        .await?;

    let saved = if let Some(existing) = existing {
        debug!(
            product_code = line.product_code,
            material_code = line.material_code,
            "Replacing material line"
        );
        let mut stored: material_line::ActiveModel = existing.into();
        stored.consumption = Set(line.consumption);
        stored.consumption_unit = Set(line.consumption_unit.clone());
        stored.production_ratio = Set(line.production_ratio);
        stored.production_unit = Set(line.production_unit.clone());
        stored.waste = Set(line.waste);
        stored.cost_per_unit = Set(line.cost_per_unit);
        stored.update(db).await?
    } else {
        material_line::ActiveModel {
            product_code: Set(line.product_code),
            material_code: Set(line.material_code),
            consumption: Set(line.consumption),
            consumption_unit: Set(line.consumption_unit.clone()),
            production_ratio: Set(line.production_ratio),
            production_unit: Set(line.production_unit.clone()),
            waste: Set(line.waste),
            cost_per_unit: Set(line.cost_per_unit),
        }
        .insert(db)
        .await?
    };

    touch_product(db, line.product_code).await?;
    Ok(saved)
}

/// Writes a bill-of-activities line, replacing any stored line for the same activity.
pub async fn save_activity_line<C>(
    db: &C,
    line: &activity_line::Model,
) -> Result<activity_line::Model>
where
    C: ConnectionTrait,
{
    let existing = ActivityLine::find_by_id((line.product_code, line.activity_code))
        .one(db)
        .await?;

    let saved = if let Some(existing) = existing {
        debug!(
            product_code = line.product_code,
            activity_code = line.activity_code,
            "Replacing activity line"
        );
        let mut stored: activity_line::ActiveModel = existing.into();
        stored.consumption = Set(line.consumption);
        stored.activity_unit = Set(line.activity_unit.clone());
        stored.production_ratio = Set(line.production_ratio);
        stored.production_unit = Set(line.production_unit.clone());
        stored.cost_per_unit = Set(line.cost_per_unit);
        stored.update(db).await?
    } else {
        activity_line::ActiveModel {
            product_code: Set(line.product_code),
            activity_code: Set(line.activity_code),
            consumption: Set(line.consumption),
            activity_unit: Set(line.activity_unit.clone()),
            production_ratio: Set(line.production_ratio),
            production_unit: Set(line.production_unit.clone()),
            cost_per_unit: Set(line.cost_per_unit),
        }
        .insert(db)
        .await?
    };

    touch_product(db, line.product_code).await?;
    Ok(saved)
}

async fn touch_product<C>(db: &C, code: i64) -> Result<()>
where
    C: ConnectionTrait,
{
    let mut product: product::ActiveModel = get_product_by_code(db, code)
        .await?
        .ok_or(Error::ProductNotFound { code })?
        .into();
    product.updated_at = Set(chrono::Utc::now().naive_utc());
    product.update(db).await?;
    Ok(())
}
