//! Seed catalogue loading from `catalog.toml`.
//!
//! The seed file lists materials, activities and products (with their bills) to load into
//! an empty or partially filled store. See [`seed_catalog`](crate::core::seed::seed_catalog).

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Default seed file, relative to the working directory.
pub const DEFAULT_CATALOG_PATH: &str = "catalog.toml";

/// Configuration structure representing the entire seed file
#[derive(Debug, Default, Deserialize)]
pub struct CatalogConfig {
    /// Materials to add to the material catalogue
    #[serde(default)]
    pub materials: Vec<CatalogEntryConfig>,
    /// Activities to add to the activity catalogue
    #[serde(default)]
    pub activities: Vec<CatalogEntryConfig>,
    /// Products to create, with their bills
    #[serde(default)]
    pub products: Vec<ProductConfig>,
}

/// One material or activity
#[derive(Debug, Deserialize, Clone)]
pub struct CatalogEntryConfig {
    /// Catalogue code
    pub code: i64,
    /// Short name
    pub name: String,
    /// Free-text description
    #[serde(default)]
    pub description: String,
    /// Cost of one unit
    pub cost_per_unit: f64,
    /// Unit the cost refers to
    pub unit: String,
}

/// One product and its bills
#[derive(Debug, Deserialize, Clone)]
pub struct ProductConfig {
    /// Product code
    pub code: i64,
    /// Product name
    pub name: String,
    /// Free-text description
    #[serde(default)]
    pub description: String,
    /// Unit of finished output
    pub base_unit: String,
    /// Bill of materials
    #[serde(default)]
    pub materials: Vec<MaterialLineConfig>,
    /// Bill of activities
    #[serde(default)]
    pub activities: Vec<ActivityLineConfig>,
}

/// One bill-of-materials line
#[derive(Debug, Deserialize, Clone)]
pub struct MaterialLineConfig {
    /// Material code
    pub code: i64,
    /// Amount consumed
    pub consumption: f64,
    /// Unit of the consumption
    pub consumption_unit: String,
    /// Finished units the consumption corresponds to
    pub production_ratio: f64,
    /// Unit of the production ratio
    pub production_unit: String,
    /// Waste percentage, 0 when omitted
    #[serde(default)]
    pub waste: f64,
}

/// One bill-of-activities line
#[derive(Debug, Deserialize, Clone)]
pub struct ActivityLineConfig {
    /// Activity code
    pub code: i64,
    /// Amount consumed
    pub consumption: f64,
    /// Unit of the consumption
    pub activity_unit: String,
    /// Finished units the consumption corresponds to
    pub production_ratio: f64,
    /// Unit of the production ratio
    pub production_unit: String,
}

/// Loads a seed catalogue from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - Required fields are missing
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<CatalogConfig> {
    let path = path.as_ref();
    tracing::debug!("Loading seed catalogue from {}", path.display());
    let contents = std::fs::read_to_string(path).map_err(|e| Error::Config {
        message: format!("Failed to read seed file {}: {e}", path.display()),
    })?;

    parse_config(&contents)
}

/// Parses seed catalogue TOML.
pub fn parse_config(contents: &str) -> Result<CatalogConfig> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse seed catalogue: {e}"),
    })
}

/// Loads the seed catalogue from the default location (./catalog.toml)
pub fn load_default_config() -> Result<CatalogConfig> {
    load_config(DEFAULT_CATALOG_PATH)
}
