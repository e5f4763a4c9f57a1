//! Direct cost engine.
//!
//! Costing is a pure function of a [`ProductSheet`] and the two catalogues; it never touches
//! the store. Unit costs always come from the live catalogue entry, never from the override
//! stored on the line.
//!
//! - material line: `cost_per_unit * (consumption / production_ratio) * (1 + waste / 100)`
//! - activity line: `cost_per_unit * (consumption / production_ratio)`

use crate::{
    core::{
        catalog::{Catalog, CatalogEntry},
        composition::ProductSheet,
    },
    entities::{EntityKind, activity, material},
    errors::{Error, Result},
};
use serde::Serialize;

/// Cost contribution of one bill line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineCost {
    /// Catalogue code of the line
    pub code: i64,
    /// Catalogue name at computation time
    pub name: String,
    /// Catalogue unit cost used
    pub cost_per_unit: f64,
    /// Consumption per `production_ratio` finished units
    pub consumption: f64,
    /// Finished units the consumption corresponds to
    pub production_ratio: f64,
    /// Waste percentage, `None` for activities
    pub waste: Option<f64>,
    /// Resulting cost per finished unit
    pub cost: f64,
}

/// Direct cost of one product, split by materials and activities.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostBreakdown {
    /// Product that was costed
    pub product_code: i64,
    /// Per-line material costs, ordered by material code
    pub material_lines: Vec<LineCost>,
    /// Per-line activity costs, ordered by activity code
    pub activity_lines: Vec<LineCost>,
    /// Sum of material line costs
    pub material_total: f64,
    /// Sum of activity line costs
    pub activity_total: f64,
}

impl CostBreakdown {
    /// Direct cost: materials plus activities.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.material_total + self.activity_total
    }
}

/// Cost of one material line, waste included.
#[must_use]
pub fn material_line_cost(
    cost_per_unit: f64,
    consumption: f64,
    production_ratio: f64,
    waste: f64,
) -> f64 {
    cost_per_unit * (consumption / production_ratio) * (1.0 + waste / 100.0)
}

/// Cost of one activity line. Activities carry no waste term.
#[must_use]
pub fn activity_line_cost(cost_per_unit: f64, consumption: f64, production_ratio: f64) -> f64 {
    cost_per_unit * (consumption / production_ratio)
}

/// Computes the direct cost of `sheet`.
///
/// # Errors
/// - [`Error::MissingCatalogEntry`] if a line's code no longer resolves in its catalogue
/// - [`Error::DivisionByZero`] if a line has a zero production ratio
pub fn compute_cost(
    sheet: &ProductSheet,
    materials: &Catalog<material::Model>,
    activities: &Catalog<activity::Model>,
) -> Result<CostBreakdown> {
    let product_code = sheet.code();

    let material_lines = sheet
        .bill_of_materials
        .values()
        .map(|line| {
            let entry = resolve(materials, line.material_code, product_code)?;
            check_ratio(
                EntityKind::Material,
                line.material_code,
                product_code,
                line.production_ratio,
            )?;
            Ok(LineCost {
                code: line.material_code,
                name: entry.name.clone(),
                cost_per_unit: entry.cost_per_unit,
                consumption: line.consumption,
                production_ratio: line.production_ratio,
                waste: Some(line.waste),
                cost: material_line_cost(
                    entry.cost_per_unit,
                    line.consumption,
                    line.production_ratio,
                    line.waste,
                ),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let activity_lines = sheet
        .bill_of_activities
        .values()
        .map(|line| {
            let entry = resolve(activities, line.activity_code, product_code)?;
            check_ratio(
                EntityKind::Activity,
                line.activity_code,
                product_code,
                line.production_ratio,
            )?;
            Ok(LineCost {
                code: line.activity_code,
                name: entry.name.clone(),
                cost_per_unit: entry.cost_per_unit,
                consumption: line.consumption,
                production_ratio: line.production_ratio,
                waste: None,
                cost: activity_line_cost(
                    entry.cost_per_unit,
                    line.consumption,
                    line.production_ratio,
                ),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    // an empty f64 sum is -0.0
    let material_total = material_lines.iter().fold(0.0, |acc, line| acc + line.cost);
    let activity_total = activity_lines.iter().fold(0.0, |acc, line| acc + line.cost);

    Ok(CostBreakdown {
        product_code,
        material_lines,
        activity_lines,
        material_total,
        activity_total,
    })
}

fn resolve<T: CatalogEntry>(catalog: &Catalog<T>, code: i64, product_code: i64) -> Result<&T> {
    catalog.lookup(code).ok_or(Error::MissingCatalogEntry {
        kind: T::KIND,
        code,
        product_code,
    })
}

#[allow(clippy::float_cmp)]
fn check_ratio(
    kind: EntityKind,
    code: i64,
    product_code: i64,
    production_ratio: f64,
) -> Result<()> {
    if production_ratio == 0.0 {
        return Err(Error::DivisionByZero {
            kind,
            code,
            product_code,
        });
    }
    Ok(())
}
