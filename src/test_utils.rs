//! Shared test utilities for `CostTrax`.
//!
//! This module provides common helper functions for setting up test databases
//! and creating catalogue entries, products and bill lines with sensible defaults.

#![allow(clippy::unwrap_used)]

use crate::{
    core::{
        activity,
        catalog::{Catalog, NewCatalogEntry},
        composition::{ActivityLineInput, MaterialLineInput, ProductSheet},
        material,
        product::{self, NewProduct},
        registry::CostTrax,
    },
    entities,
    errors::Result,
};
use chrono::{NaiveDate, NaiveDateTime};
use sea_orm::{ConnectionTrait, DatabaseConnection};

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Opens a registry over a fresh in-memory store.
pub async fn setup_test_registry() -> Result<CostTrax> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    CostTrax::open(db).await
}

/// Opens a registry holding the box example.
///
/// # Contents
/// * materials 1 (100.0), 3 (1.45), 4 (1.45)
/// * activities 2 (0.8), 3 (1.2, unused), 4 (0.2)
/// * product 1 with three material lines and two activity lines
pub async fn setup_box_registry() -> Result<CostTrax> {
    let trax = setup_test_registry().await?;

    trax.add_material(&NewCatalogEntry::new(1, "PP sheet 5mm", "Polypropylene", 100.0, "sheet"))
        .await?;
    trax.add_material(&NewCatalogEntry::new(3, "Profile 5mm", "Edge profile", 1.45, "strip"))
        .await?;
    trax.add_material(&NewCatalogEntry::new(4, "Rivet profile", "Closing profile", 1.45, "strip"))
        .await?;
    trax.add_activity(&NewCatalogEntry::new(2, "Cut sheet", "", 0.8, "cut"))
        .await?;
    trax.add_activity(&NewCatalogEntry::new(3, "Weld", "", 1.2, "minutes"))
        .await?;
    trax.add_activity(&NewCatalogEntry::new(4, "Assemble box", "", 0.2, "minutes"))
        .await?;
    trax.add_product(&NewProduct::new(1, "Box", "Polypropylene box", "box"))
        .await?;

    for input in box_material_inputs() {
        trax.add_material_line(1, &input).await?;
    }
    for input in box_activity_inputs() {
        trax.add_activity_line(1, &input).await?;
    }
    Ok(trax)
}

/// Creates a test material with sensible defaults.
///
/// # Defaults
/// * name: "Material {code}"
/// * unit: "unit"
pub async fn create_test_material<C>(
    db: &C,
    code: i64,
    cost_per_unit: f64,
) -> Result<entities::material::Model>
where
    C: ConnectionTrait,
{
    let entry = NewCatalogEntry::new(code, format!("Material {code}"), "", cost_per_unit, "unit");
    material::create_material(db, &entry).await
}

/// Creates a test activity with sensible defaults.
pub async fn create_test_activity<C>(
    db: &C,
    code: i64,
    cost_per_unit: f64,
) -> Result<entities::activity::Model>
where
    C: ConnectionTrait,
{
    let entry = NewCatalogEntry::new(code, format!("Activity {code}"), "", cost_per_unit, "unit");
    activity::create_activity(db, &entry).await
}

/// Creates a test product with empty bills.
pub async fn create_test_product<C>(db: &C, code: i64) -> Result<ProductSheet>
where
    C: ConnectionTrait,
{
    product::create_product(db, &NewProduct::new(code, format!("Product {code}"), "", "unit"))
        .await
}

fn fixed_timestamp() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

/// In-memory material model, never stored.
pub fn material_model(code: i64, cost_per_unit: f64) -> entities::material::Model {
    entities::material::Model {
        code,
        name: format!("Material {code}"),
        description: String::new(),
        cost_per_unit,
        base_unit: "unit".to_string(),
        created_at: fixed_timestamp(),
        updated_at: fixed_timestamp(),
    }
}

/// In-memory activity model, never stored.
pub fn activity_model(code: i64, cost_per_unit: f64) -> entities::activity::Model {
    entities::activity::Model {
        code,
        name: format!("Activity {code}"),
        description: String::new(),
        cost_per_unit,
        activity_unit: "unit".to_string(),
        created_at: fixed_timestamp(),
        updated_at: fixed_timestamp(),
    }
}

/// In-memory product header, never stored.
pub fn product_model(code: i64) -> entities::product::Model {
    entities::product::Model {
        code,
        name: format!("Product {code}"),
        description: String::new(),
        base_unit: "unit".to_string(),
        created_at: fixed_timestamp(),
        updated_at: fixed_timestamp(),
    }
}

/// Material line input with unit "unit" and no cost override.
pub fn material_input(code: i64, consumption: f64, ratio: f64, waste: f64) -> MaterialLineInput {
    MaterialLineInput {
        material_code: code,
        consumption,
        consumption_unit: "unit".to_string(),
        production_ratio: ratio,
        production_unit: "unit".to_string(),
        waste,
        cost_per_unit: None,
    }
}

/// Activity line input with unit "unit" and no cost override.
pub fn activity_input(code: i64, consumption: f64, ratio: f64) -> ActivityLineInput {
    ActivityLineInput {
        activity_code: code,
        consumption,
        activity_unit: "unit".to_string(),
        production_ratio: ratio,
        production_unit: "unit".to_string(),
        cost_per_unit: None,
    }
}

/// A stored-shape material line: one unit per unit, no waste.
pub fn material_line_model(
    product_code: i64,
    material_code: i64,
) -> entities::material_line::Model {
    entities::material_line::Model {
        product_code,
        material_code,
        consumption: 1.0,
        consumption_unit: "unit".to_string(),
        production_ratio: 1.0,
        production_unit: "unit".to_string(),
        waste: 0.0,
        cost_per_unit: 0.0,
    }
}

/// A stored-shape activity line: one unit per unit.
pub fn activity_line_model(
    product_code: i64,
    activity_code: i64,
) -> entities::activity_line::Model {
    entities::activity_line::Model {
        product_code,
        activity_code,
        consumption: 1.0,
        activity_unit: "unit".to_string(),
        production_ratio: 1.0,
        production_unit: "unit".to_string(),
        cost_per_unit: 0.0,
    }
}

fn box_material_inputs() -> Vec<MaterialLineInput> {
    let mut strip = material_input(4, 0.5, 1.0, 10.0);
    strip.consumption_unit = "strip".to_string();
    vec![
        material_input(1, 0.5, 1.0, 5.0),
        material_input(3, 1.0, 1.0, 5.0),
        strip,
    ]
}

fn box_activity_inputs() -> Vec<ActivityLineInput> {
    vec![activity_input(2, 2.0, 4.0), activity_input(4, 10.0, 1.0)]
}

/// The box example catalogues, in memory.
pub fn box_catalogs() -> (Catalog<entities::material::Model>, Catalog<entities::activity::Model>) {
    let materials = Catalog::from_entries([
        material_model(1, 100.0),
        material_model(3, 1.45),
        material_model(4, 1.45),
    ])
    .unwrap();
    let activities = Catalog::from_entries([
        activity_model(2, 0.8),
        activity_model(3, 1.2),
        activity_model(4, 0.2),
    ])
    .unwrap();
    (materials, activities)
}

/// The box example product sheet, built against `box_catalogs`.
pub fn box_sheet(
    materials: &Catalog<entities::material::Model>,
    activities: &Catalog<entities::activity::Model>,
) -> ProductSheet {
    let mut sheet = ProductSheet::new(product_model(1));
    for input in box_material_inputs() {
        sheet.add_material_line(materials, &input).unwrap();
    }
    for input in box_activity_inputs() {
        sheet.add_activity_line(activities, &input).unwrap();
    }
    sheet
}
