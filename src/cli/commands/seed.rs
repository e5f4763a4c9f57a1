//! Seed command - loads a TOML seed catalogue into the store.

use crate::{
    config::catalog::{load_config, load_default_config},
    core::{
        registry::CostTrax,
        seed::{SeedSummary, seed_catalog},
    },
    errors::Result,
};
use std::path::Path;

fn describe(summary: &SeedSummary) -> String {
    format!(
        "✅ Seeded {} materials, {} activities and {} products ({} lines); {} skipped.",
        summary.materials_added,
        summary.activities_added,
        summary.products_added,
        summary.lines_written,
        summary.skipped
    )
}

/// Runs `seed [PATH]`, defaulting to ./catalog.toml.
pub async fn run_seed(trax: &CostTrax, path: Option<&Path>) -> Result<String> {
    let config = match path {
        Some(path) => load_config(path)?,
        None => load_default_config()?,
    };
    let summary = seed_catalog(trax, &config).await?;
    Ok(describe(&summary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::catalog::DEFAULT_CATALOG_PATH;
    use crate::errors::Error;
    use crate::test_utils::*;

    #[test]
    fn test_describe_summary() {
        let summary = SeedSummary {
            materials_added: 3,
            activities_added: 3,
            products_added: 1,
            lines_written: 5,
            skipped: 0,
        };
        assert_eq!(
            describe(&summary),
            "✅ Seeded 3 materials, 3 activities and 1 products (5 lines); 0 skipped."
        );
    }

    #[tokio::test]
    async fn test_missing_seed_file() -> Result<()> {
        let trax = setup_test_registry().await?;

        let result = run_seed(&trax, Some(Path::new("does/not/exist.toml"))).await;
        assert!(matches!(result, Err(Error::Config { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_bundled_catalog_seeds_the_box() -> Result<()> {
        let trax = setup_test_registry().await?;
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join(DEFAULT_CATALOG_PATH);

        run_seed(&trax, Some(&path)).await?;

        let breakdown = trax.compute_cost(1).await?;
        assert!((breakdown.material_total - 54.82).abs() < 1e-9);
        assert!((breakdown.activity_total - 2.4).abs() < 1e-9);
        Ok(())
    }
}
