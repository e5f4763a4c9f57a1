//! CLI layer - argument parsing and command dispatch.
//!
//! This module provides the command-line interface for `CostTrax`. Parsing is done with
//! `clap` derive; every handler returns the text to print so the binary stays a thin shell.

/// Command handlers (catalogues, products, seeding)
pub mod commands;

use crate::{
    core::{registry::CostTrax, report::format_field_errors},
    errors::{Error, Result},
};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Costing tool for products built from catalogued materials and activities.
#[derive(Debug, Parser)]
#[command(name = "cost-trax", version)]
pub struct Cli {
    /// `SQLite` file to use instead of `DATABASE_URL`
    #[arg(long, global = true, value_name = "PATH")]
    pub database: Option<String>,

    /// What to do
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage the material catalogue
    #[command(subcommand)]
    Material(CatalogCommand),
    /// Manage the activity catalogue
    #[command(subcommand)]
    Activity(CatalogCommand),
    /// Manage products and their bills
    #[command(subcommand)]
    Product(ProductCommand),
    /// Load a TOML seed catalogue
    Seed {
        /// Seed file, defaults to ./catalog.toml
        #[arg(value_name = "PATH")]
        path: Option<PathBuf>,
    },
}

/// Operations shared by the material and activity catalogues.
#[derive(Debug, Subcommand)]
pub enum CatalogCommand {
    /// Add an entry
    Add(CatalogEntryArgs),
    /// List every entry
    List,
    /// Show one entry
    Show {
        /// Entry code
        code: i64,
    },
    /// Revise an entry's cost per unit
    SetCost {
        /// Entry code
        code: i64,
        /// New cost per unit
        #[arg(allow_negative_numbers = true)]
        cost: f64,
    },
    /// Remove an entry no product uses
    Delete {
        /// Entry code
        code: i64,
    },
}

/// Fields of a new catalogue entry.
#[derive(Debug, Args)]
pub struct CatalogEntryArgs {
    /// Positive, unused code
    #[arg(long)]
    pub code: i64,
    /// Display name
    #[arg(long)]
    pub name: String,
    /// Free-text description
    #[arg(long, default_value = "")]
    pub description: String,
    /// Cost of one unit
    #[arg(long, allow_negative_numbers = true)]
    pub cost: f64,
    /// Unit the cost refers to
    #[arg(long)]
    pub unit: String,
}

/// Product operations.
#[derive(Debug, Subcommand)]
pub enum ProductCommand {
    /// Create a product with empty bills
    Add(ProductArgs),
    /// List every product
    List,
    /// Show a product with both bills
    Show {
        /// Product code
        code: i64,
    },
    /// Add or replace a bill-of-materials line
    AddMaterial(MaterialLineArgs),
    /// Add or replace a bill-of-activities line
    AddActivity(ActivityLineArgs),
    /// Compute a product's direct cost
    Cost {
        /// Product code
        code: i64,
    },
}

/// Fields of a new product.
#[derive(Debug, Args)]
pub struct ProductArgs {
    /// Positive, unused code
    #[arg(long)]
    pub code: i64,
    /// Display name
    #[arg(long)]
    pub name: String,
    /// Free-text description
    #[arg(long, default_value = "")]
    pub description: String,
    /// Unit of finished output
    #[arg(long, default_value = "unit")]
    pub base_unit: String,
}

/// Fields of a bill-of-materials line.
#[derive(Debug, Args)]
pub struct MaterialLineArgs {
    /// Product receiving the line
    pub product: i64,
    /// Catalogued material code
    #[arg(long)]
    pub material: i64,
    /// Amount consumed
    #[arg(long, allow_negative_numbers = true)]
    pub consumption: f64,
    /// Unit of the consumption
    #[arg(long, default_value = "unit")]
    pub unit: String,
    /// Finished units the consumption yields
    #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
    pub ratio: f64,
    /// Unit of the production ratio
    #[arg(long, default_value = "unit")]
    pub production_unit: String,
    /// Percentage of material lost
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub waste: f64,
    /// Per-line cost kept for reference, not used for costing
    #[arg(long, allow_negative_numbers = true)]
    pub cost: Option<f64>,
}

/// Fields of a bill-of-activities line.
#[derive(Debug, Args)]
pub struct ActivityLineArgs {
    /// Product receiving the line
    pub product: i64,
    /// Catalogued activity code
    #[arg(long)]
    pub activity: i64,
    /// Amount consumed
    #[arg(long, allow_negative_numbers = true)]
    pub consumption: f64,
    /// Unit of the consumption
    #[arg(long, default_value = "unit")]
    pub unit: String,
    /// Finished units the consumption yields
    #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
    pub ratio: f64,
    /// Unit of the production ratio
    #[arg(long, default_value = "unit")]
    pub production_unit: String,
    /// Per-line cost kept for reference, not used for costing
    #[arg(long, allow_negative_numbers = true)]
    pub cost: Option<f64>,
}

/// Runs one parsed command and returns what to print.
pub async fn run(trax: &CostTrax, command: Command) -> Result<String> {
    match command {
        Command::Material(cmd) => commands::catalog::run_material(trax, cmd).await,
        Command::Activity(cmd) => commands::catalog::run_activity(trax, cmd).await,
        Command::Product(cmd) => commands::product::run_product(trax, cmd).await,
        Command::Seed { path } => commands::seed::run_seed(trax, path.as_deref()).await,
    }
}

/// Renders an error for the terminal, listing each rejected field.
#[must_use]
pub fn describe_error(error: &Error) -> String {
    match error {
        Error::Validation(errors) => {
            format!("❌ Invalid input:\n{}", format_field_errors(errors))
        }
        other => format!("❌ {other}"),
    }
}
