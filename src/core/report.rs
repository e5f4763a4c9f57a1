//! Report formatting business logic.
//!
//! This module renders catalogue entries, product sheets, cost breakdowns and field errors
//! as plain text. All functions are pure and framework-agnostic; the CLI layer only prints
//! what they return.

use crate::{
    core::{
        catalog::{Catalog, CatalogEntry},
        composition::ProductSheet,
        cost::{CostBreakdown, LineCost},
        validation::FieldErrors,
    },
    entities::{activity, material},
};

/// Width of the horizontal rules separating report sections.
pub const RULE_WIDTH: usize = 80;

/// Name shown for a bill line whose catalogue entry no longer exists.
pub const MISSING_NAME: &str = "<missing>";

fn rule() -> String {
    "-".repeat(RULE_WIDTH)
}

/// Renders one catalogue entry as a block of labelled lines.
#[must_use]
pub fn format_catalog_entry<T: CatalogEntry>(entry: &T) -> String {
    format!(
        "{kind} {code}: {name}\n  Description: {description}\n  \
         Cost per unit: {cost:.2}\n  Unit: {unit}",
        kind = T::KIND,
        code = entry.code(),
        name = entry.name(),
        description = entry.description(),
        cost = entry.cost_per_unit(),
        unit = entry.unit(),
    )
}

/// Renders a whole catalogue, one block per entry, in code order.
#[must_use]
pub fn format_catalog<T: CatalogEntry>(catalog: &Catalog<T>) -> String {
    if catalog.is_empty() {
        return format!("No {} entries catalogued.", T::KIND.to_string().to_lowercase());
    }
    catalog
        .all()
        .map(format_catalog_entry)
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Renders a product header with both bills as tables.
///
/// Lines whose catalogue entry is gone show [`MISSING_NAME`] and a zero cost instead of
/// failing, so a broken product can still be inspected.
#[must_use]
pub fn format_product_sheet(
    sheet: &ProductSheet,
    materials: &Catalog<material::Model>,
    activities: &Catalog<activity::Model>,
) -> String {
    let product = &sheet.product;
    let mut lines = vec![
        rule(),
        format!("Product {}: {}", product.code, product.name),
        format!("  Description: {}", product.description),
        format!("  Base unit: {}", product.base_unit),
        rule(),
        "Bill of materials".to_string(),
        format!(
            "{:>6} {:<20} {:>9} {:>11} {:<8} {:<14} {:>6}",
            "Code", "Name", "Cost", "Consumption", "Unit", "Ratio", "Waste"
        ),
    ];
    if sheet.bill_of_materials.is_empty() {
        lines.push("  (none)".to_string());
    }
    lines.extend(sheet.bill_of_materials.values().map(|line| {
        let entry = materials.lookup(line.material_code);
        let ratio = format!("{} {}", line.production_ratio, line.production_unit);
        format!(
            "{:>6} {:<20} {:>9.2} {:>11} {:<8} {:<14} {:>5}%",
            line.material_code,
            entry.map_or(MISSING_NAME, CatalogEntry::name),
            entry.map_or(0.0, CatalogEntry::cost_per_unit),
            line.consumption,
            line.consumption_unit,
            ratio,
            line.waste,
        )
    }));
    lines.push(rule());

    lines.push("Bill of activities".to_string());
    lines.push(format!(
        "{:>6} {:<20} {:>9} {:>11} {:<8} {:<14}",
        "Code", "Name", "Cost", "Consumption", "Unit", "Ratio"
    ));
    if sheet.bill_of_activities.is_empty() {
        lines.push("  (none)".to_string());
    }
    lines.extend(sheet.bill_of_activities.values().map(|line| {
        let entry = activities.lookup(line.activity_code);
        let ratio = format!("{} {}", line.production_ratio, line.production_unit);
        format!(
            "{:>6} {:<20} {:>9.2} {:>11} {:<8} {:<14}",
            line.activity_code,
            entry.map_or(MISSING_NAME, CatalogEntry::name),
            entry.map_or(0.0, CatalogEntry::cost_per_unit),
            line.consumption,
            line.activity_unit,
            ratio,
        )
    }));
    lines.push(rule());
    lines.join("\n")
}

fn format_line_cost(line: &LineCost) -> String {
    let waste = line
        .waste
        .map_or_else(String::new, |waste| format!(" +{waste}% waste"));
    format!(
        "  {:>6} {:<20} {:.2} x {} / {}{waste} = {:.2}",
        line.code, line.name, line.cost_per_unit, line.consumption, line.production_ratio, line.cost
    )
}

/// Renders the direct cost summary line followed by the per-line breakdown.
#[must_use]
pub fn format_cost_summary(breakdown: &CostBreakdown) -> String {
    let mut lines = vec![format!(
        "Product cost: {:.2} Material cost: {:.2} Activity cost: {:.2}",
        breakdown.total(),
        breakdown.material_total,
        breakdown.activity_total
    )];
    if !breakdown.material_lines.is_empty() {
        lines.push("Materials:".to_string());
        lines.extend(breakdown.material_lines.iter().map(format_line_cost));
    }
    if !breakdown.activity_lines.is_empty() {
        lines.push("Activities:".to_string());
        lines.extend(breakdown.activity_lines.iter().map(format_line_cost));
    }
    lines.join("\n")
}

/// One `field: message` line per rejected field.
#[must_use]
pub fn format_field_errors(errors: &FieldErrors) -> String {
    errors
        .iter()
        .map(|(field, message)| format!("{field}: {message}"))
        .collect::<Vec<_>>()
        .join("\n")
}
