//! Catalogue commands - `material ...` and `activity ...`.
//!
//! Both catalogues accept the same operations; only the registry calls differ.

use crate::{
    cli::{CatalogCommand, CatalogEntryArgs},
    core::{
        catalog::{CatalogEntry, NewCatalogEntry},
        registry::CostTrax,
        report::{format_catalog, format_catalog_entry},
    },
    entities::EntityKind,
    errors::{Error, Result},
};

impl From<CatalogEntryArgs> for NewCatalogEntry {
    fn from(args: CatalogEntryArgs) -> Self {
        Self::new(args.code, args.name, args.description, args.cost, args.unit)
    }
}

fn added<T: CatalogEntry>(entry: &T) -> String {
    format!(
        "✅ {} {} '{}' added at {:.2} per {}.",
        T::KIND,
        entry.code(),
        entry.name(),
        entry.cost_per_unit(),
        entry.unit()
    )
}

fn cost_revised<T: CatalogEntry>(entry: &T) -> String {
    format!(
        "✅ {} {} now costs {:.2} per {}.",
        T::KIND,
        entry.code(),
        entry.cost_per_unit(),
        entry.unit()
    )
}

fn removed<T: CatalogEntry>(entry: &T) -> String {
    format!("✅ {} {} '{}' removed.", T::KIND, entry.code(), entry.name())
}

const fn not_found(kind: EntityKind, code: i64) -> Error {
    Error::CatalogEntryNotFound { kind, code }
}

/// Runs a `material` subcommand.
pub async fn run_material(trax: &CostTrax, command: CatalogCommand) -> Result<String> {
    match command {
        CatalogCommand::Add(args) => Ok(added(&trax.add_material(&args.into()).await?)),
        CatalogCommand::List => Ok(format_catalog(&trax.materials().await?)),
        CatalogCommand::Show { code } => {
            let entry = trax
                .lookup_material(code)
                .await?
                .ok_or(not_found(EntityKind::Material, code))?;
            Ok(format_catalog_entry(&entry))
        }
        CatalogCommand::SetCost { code, cost } => {
            Ok(cost_revised(&trax.update_material_cost(code, cost).await?))
        }
        CatalogCommand::Delete { code } => Ok(removed(&trax.delete_material(code).await?)),
    }
}

/// Runs an `activity` subcommand.
pub async fn run_activity(trax: &CostTrax, command: CatalogCommand) -> Result<String> {
    match command {
        CatalogCommand::Add(args) => Ok(added(&trax.add_activity(&args.into()).await?)),
        CatalogCommand::List => Ok(format_catalog(&trax.activities().await?)),
        CatalogCommand::Show { code } => {
            let entry = trax
                .lookup_activity(code)
                .await?
                .ok_or(not_found(EntityKind::Activity, code))?;
            Ok(format_catalog_entry(&entry))
        }
        CatalogCommand::SetCost { code, cost } => {
            Ok(cost_revised(&trax.update_activity_cost(code, cost).await?))
        }
        CatalogCommand::Delete { code } => Ok(removed(&trax.delete_activity(code).await?)),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    fn entry_args(code: i64, cost: f64) -> CatalogEntryArgs {
        CatalogEntryArgs {
            code,
            name: "PP sheet 5mm".to_string(),
            description: String::new(),
            cost,
            unit: "sheet".to_string(),
        }
    }

    #[tokio::test]
    async fn test_material_add_then_show() -> Result<()> {
        let trax = setup_test_registry().await?;

        let reply = run_material(&trax, CatalogCommand::Add(entry_args(1, 100.0))).await?;
        assert_eq!(reply, "✅ Material 1 'PP sheet 5mm' added at 100.00 per sheet.");

        let shown = run_material(&trax, CatalogCommand::Show { code: 1 }).await?;
        assert!(shown.contains("Cost per unit: 100.00"));
        Ok(())
    }

    #[tokio::test]
    async fn test_activity_set_cost() -> Result<()> {
        let trax = setup_box_registry().await?;

        let reply = run_activity(&trax, CatalogCommand::SetCost { code: 2, cost: 1.5 }).await?;
        assert_eq!(reply, "✅ Activity 2 now costs 1.50 per cut.");
        Ok(())
    }

    #[tokio::test]
    async fn test_show_missing_entry() -> Result<()> {
        let trax = setup_test_registry().await?;

        let result = run_activity(&trax, CatalogCommand::Show { code: 9 }).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::CatalogEntryNotFound {
                kind: EntityKind::Activity,
                code: 9
            }
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_in_use_material_is_refused() -> Result<()> {
        let trax = setup_box_registry().await?;

        let result = run_material(&trax, CatalogCommand::Delete { code: 1 }).await;
        assert!(matches!(result.unwrap_err(), Error::CatalogEntryInUse { .. }));

        let listing = run_material(&trax, CatalogCommand::List).await?;
        assert!(listing.contains("Material 1:"));
        Ok(())
    }

    #[tokio::test]
    async fn test_negative_cost_is_rejected() -> Result<()> {
        let trax = setup_test_registry().await?;

        let result = run_material(&trax, CatalogCommand::Add(entry_args(1, -5.0))).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::Validation(ref e) if e.contains("cost_per_unit")
        ));
        assert_eq!(
            run_material(&trax, CatalogCommand::List).await?,
            "No material entries catalogued."
        );
        Ok(())
    }
}
