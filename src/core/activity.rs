//! Activity catalogue operations against the store.
//!
//! Mirrors the material catalogue: lookups return `Option`, mutations validate first and
//! are generic over [`ConnectionTrait`] so they can join a registry transaction.

use crate::{
    core::{
        catalog::{Catalog, NewCatalogEntry, validate_code},
        validation::{Validator, non_negative},
    },
    entities::{Activity, ActivityLine, EntityKind, activity, activity_line},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::{debug, info};

/// Finds an activity by code. A miss is `Ok(None)`.
pub async fn get_activity_by_code<C>(db: &C, code: i64) -> Result<Option<activity::Model>>
where
    C: ConnectionTrait,
{
    Activity::find_by_id(code).one(db).await.map_err(Into::into)
}

/// Retrieves every activity, ordered by code.
pub async fn get_all_activities<C>(db: &C) -> Result<Vec<activity::Model>>
where
    C: ConnectionTrait,
{
    Activity::find()
        .order_by_asc(activity::Column::Code)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Loads the whole activity catalogue into memory.
pub async fn load_activity_catalog<C>(db: &C) -> Result<Catalog<activity::Model>>
where
    C: ConnectionTrait,
{
    Catalog::from_entries(get_all_activities(db).await?)
}

/// Adds an activity to the catalogue, rejecting codes already in use.
pub async fn create_activity<C>(db: &C, entry: &NewCatalogEntry) -> Result<activity::Model>
where
    C: ConnectionTrait,
{
    entry.validate(EntityKind::Activity)?;

    if get_activity_by_code(db, entry.code).await?.is_some() {
        return Err(Error::DuplicateCode {
            kind: EntityKind::Activity,
            code: entry.code,
        });
    }

    let now = chrono::Utc::now().naive_utc();
    let activity = activity::ActiveModel {
        code: Set(entry.code),
        name: Set(entry.name.trim().to_string()),
        description: Set(entry.description.clone()),
        cost_per_unit: Set(entry.cost_per_unit),
        activity_unit: Set(entry.unit.clone()),
        created_at: Set(now),
        updated_at: Set(now),
    };
    let created = activity.insert(db).await?;
    info!(code = created.code, name = %created.name, "Activity added to catalogue");
    Ok(created)
}

/// Revises the cost of one unit of an activity.
pub async fn update_activity_cost<C>(db: &C, code: i64, new_cost: f64) -> Result<activity::Model>
where
    C: ConnectionTrait,
{
    let mut validator = Validator::new();
    validator.check("cost_per_unit", non_negative(new_cost));
    validator.finish()?;

    let mut activity: activity::ActiveModel = get_activity_by_code(db, code)
        .await?
        .ok_or(Error::CatalogEntryNotFound {
            kind: EntityKind::Activity,
            code,
        })?
        .into();

    activity.cost_per_unit = Set(new_cost);
    activity.updated_at = Set(chrono::Utc::now().naive_utc());

    let updated = activity.update(db).await?;
    info!(code, cost_per_unit = new_cost, "Activity cost revised");
    Ok(updated)
}

/// Removes an activity that no product uses.
///
/// # Errors
/// [`Error::CatalogEntryInUse`] if a bill-of-activities line still references it.
pub async fn delete_activity<C>(db: &C, code: i64) -> Result<activity::Model>
where
    C: ConnectionTrait,
{
    validate_code(EntityKind::Activity, code)?;

    let activity = get_activity_by_code(db, code)
        .await?
        .ok_or(Error::CatalogEntryNotFound {
            kind: EntityKind::Activity,
            code,
        })?;

    if let Some(line) = ActivityLine::find()
        .filter(activity_line::Column::ActivityCode.eq(code))
        .order_by_asc(activity_line::Column::ProductCode)
        .one(db)
        .await?
    {
        debug!(code, product_code = line.product_code, "Activity still referenced");
        return Err(Error::CatalogEntryInUse {
            kind: EntityKind::Activity,
            code,
            product_code: line.product_code,
        });
    }

    activity.clone().delete(db).await?;
    info!(code, "Activity removed from catalogue");
    Ok(activity)
}
