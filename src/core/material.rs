//! Material catalogue operations against the store.
//!
//! Every function is generic over [`ConnectionTrait`] so the registry can run it inside a
//! transaction. Input is validated before the first query is issued.

use crate::{
    core::{
        catalog::{Catalog, NewCatalogEntry, validate_code},
        validation::{Validator, non_negative},
    },
    entities::{EntityKind, Material, MaterialLine, material, material_line},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::{debug, info};

/// Finds a material by code. A miss is `Ok(None)`.
pub async fn get_material_by_code<C>(db: &C, code: i64) -> Result<Option<material::Model>>
where
    C: ConnectionTrait,
{
    Material::find_by_id(code).one(db).await.map_err(Into::into)
}

/// Retrieves every material, ordered by code.
pub async fn get_all_materials<C>(db: &C) -> Result<Vec<material::Model>>
where
    C: ConnectionTrait,
{
    Material::find()
        .order_by_asc(material::Column::Code)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Loads the whole material catalogue into memory.
pub async fn load_material_catalog<C>(db: &C) -> Result<Catalog<material::Model>>
where
    C: ConnectionTrait,
{
    Catalog::from_entries(get_all_materials(db).await?)
}

/// Adds a material to the catalogue.
///
/// # Errors
/// - [`Error::InvalidCode`] / [`Error::Validation`] for bad input
/// - [`Error::DuplicateCode`] if the code is already in the catalogue
/// - [`Error::Database`] if the insert fails
pub async fn create_material<C>(db: &C, entry: &NewCatalogEntry) -> Result<material::Model>
where
    C: ConnectionTrait,
{
    entry.validate(EntityKind::Material)?;

    if get_material_by_code(db, entry.code).await?.is_some() {
        return Err(Error::DuplicateCode {
            kind: EntityKind::Material,
            code: entry.code,
        });
    }

    let now = chrono::Utc::now().naive_utc();
    let material = material::ActiveModel {
        code: Set(entry.code),
        name: Set(entry.name.trim().to_string()),
        description: Set(entry.description.clone()),
        cost_per_unit: Set(entry.cost_per_unit),
        base_unit: Set(entry.unit.clone()),
        created_at: Set(now),
        updated_at: Set(now),
    };
    let created = material.insert(db).await?;
    info!(code = created.code, name = %created.name, "Material added to catalogue");
    Ok(created)
}

/// Revises the cost of one unit of a material.
///
/// # Errors
/// - [`Error::Validation`] naming `cost_per_unit` if the cost is negative or not finite
/// - [`Error::CatalogEntryNotFound`] if the material does not exist
pub async fn update_material_cost<C>(db: &C, code: i64, new_cost: f64) -> Result<material::Model>
where
    C: ConnectionTrait,
{
    let mut validator = Validator::new();
    validator.check("cost_per_unit", non_negative(new_cost));
    validator.finish()?;

    let mut material: material::ActiveModel = get_material_by_code(db, code)
        .await?
        .ok_or(Error::CatalogEntryNotFound {
            kind: EntityKind::Material,
            code,
        })?
        .into();

    material.cost_per_unit = Set(new_cost);
    material.updated_at = Set(chrono::Utc::now().naive_utc());

    let updated = material.update(db).await?;
    info!(code, cost_per_unit = new_cost, "Material cost revised");
    Ok(updated)
}

/// Removes a material that no product uses.
///
/// # Errors
/// - [`Error::InvalidCode`] if the code is not positive
/// - [`Error::CatalogEntryNotFound`] if the material does not exist
/// - [`Error::CatalogEntryInUse`] if a bill-of-materials line still references it
pub async fn delete_material<C>(db: &C, code: i64) -> Result<material::Model>
where
    C: ConnectionTrait,
{
    validate_code(EntityKind::Material, code)?;

    let material = get_material_by_code(db, code)
        .await?
        .ok_or(Error::CatalogEntryNotFound {
            kind: EntityKind::Material,
            code,
        })?;

    if let Some(line) = MaterialLine::find()
        .filter(material_line::Column::MaterialCode.eq(code))
        .order_by_asc(material_line::Column::ProductCode)
        .one(db)
        .await?
    {
        debug!(code, product_code = line.product_code, "Material still referenced");
        return Err(Error::CatalogEntryInUse {
            kind: EntityKind::Material,
            code,
            product_code: line.product_code,
        });
    }

    material.clone().delete(db).await?;
    info!(code, "Material removed from catalogue");
    Ok(material)
}
