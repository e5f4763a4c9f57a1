//! Seeding the store from a seed catalogue.
//!
//! Seeding is one transaction. Codes that already exist are skipped with a warning, new
//! products get every listed line, and a single rejected line rolls the whole seed back.

use crate::{
    config::catalog::{
        ActivityLineConfig, CatalogConfig, CatalogEntryConfig, MaterialLineConfig, ProductConfig,
    },
    core::{
        activity,
        catalog::NewCatalogEntry,
        composition::{ActivityLineInput, MaterialLineInput},
        material,
        product::{self, NewProduct},
        registry::CostTrax,
    },
    errors::Result,
};
use sea_orm::TransactionTrait;
use tracing::{error, info, warn};

/// What a seed run changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    /// Materials inserted
    pub materials_added: usize,
    /// Activities inserted
    pub activities_added: usize,
    /// Products inserted
    pub products_added: usize,
    /// Bill lines written for the inserted products
    pub lines_written: usize,
    /// Records skipped because their code already existed
    pub skipped: usize,
}

impl From<&CatalogEntryConfig> for NewCatalogEntry {
    fn from(cfg: &CatalogEntryConfig) -> Self {
        Self::new(
            cfg.code,
            cfg.name.clone(),
            cfg.description.clone(),
            cfg.cost_per_unit,
            cfg.unit.clone(),
        )
    }
}

impl From<&ProductConfig> for NewProduct {
    fn from(cfg: &ProductConfig) -> Self {
        Self::new(
            cfg.code,
            cfg.name.clone(),
            cfg.description.clone(),
            cfg.base_unit.clone(),
        )
    }
}

impl From<&MaterialLineConfig> for MaterialLineInput {
    fn from(cfg: &MaterialLineConfig) -> Self {
        Self {
            material_code: cfg.code,
            consumption: cfg.consumption,
            consumption_unit: cfg.consumption_unit.clone(),
            production_ratio: cfg.production_ratio,
            production_unit: cfg.production_unit.clone(),
            waste: cfg.waste,
            cost_per_unit: None,
        }
    }
}

impl From<&ActivityLineConfig> for ActivityLineInput {
    fn from(cfg: &ActivityLineConfig) -> Self {
        Self {
            activity_code: cfg.code,
            consumption: cfg.consumption,
            activity_unit: cfg.activity_unit.clone(),
            production_ratio: cfg.production_ratio,
            production_unit: cfg.production_unit.clone(),
            cost_per_unit: None,
        }
    }
}

/// Loads `config` into the store in one transaction.
///
/// # Errors
/// Any validation or storage error aborts the seed; nothing is written.
pub async fn seed_catalog(trax: &CostTrax, config: &CatalogConfig) -> Result<SeedSummary> {
    info!(
        "Seeding {} materials, {} activities and {} products",
        config.materials.len(),
        config.activities.len(),
        config.products.len()
    );
    let _guard = trax.write_lock.lock().await;
    let txn = trax.db.begin().await?;
    let mut summary = SeedSummary::default();

    for cfg in &config.materials {
        if material::get_material_by_code(&txn, cfg.code).await?.is_some() {
            warn!("Material {} already exists. Skipping.", cfg.code);
            summary.skipped += 1;
            continue;
        }
        material::create_material(&txn, &cfg.into()).await?;
        summary.materials_added += 1;
    }

    for cfg in &config.activities {
        if activity::get_activity_by_code(&txn, cfg.code).await?.is_some() {
            warn!("Activity {} already exists. Skipping.", cfg.code);
            summary.skipped += 1;
            continue;
        }
        activity::create_activity(&txn, &cfg.into()).await?;
        summary.activities_added += 1;
    }

    let materials = material::load_material_catalog(&txn).await?;
    let activities = activity::load_activity_catalog(&txn).await?;

    for cfg in &config.products {
        if product::get_product_by_code(&txn, cfg.code).await?.is_some() {
            warn!("Product {} already exists. Skipping it and its bills.", cfg.code);
            summary.skipped += 1;
            continue;
        }
        let mut sheet = product::create_product(&txn, &cfg.into()).await?;
        summary.products_added += 1;

        for line_cfg in &cfg.materials {
            let line = sheet
                .add_material_line(&materials, &line_cfg.into())
                .inspect_err(|e| {
                    error!("Product {} material {}: {e}", cfg.code, line_cfg.code);
                })?
                .clone();
            product::save_material_line(&txn, &line).await?;
            summary.lines_written += 1;
        }
        for line_cfg in &cfg.activities {
            let line = sheet
                .add_activity_line(&activities, &line_cfg.into())
                .inspect_err(|e| {
                    error!("Product {} activity {}: {e}", cfg.code, line_cfg.code);
                })?
                .clone();
            product::save_activity_line(&txn, &line).await?;
            summary.lines_written += 1;
        }
    }

    txn.commit().await?;
    info!(?summary, "Seed committed");
    Ok(summary)
}
