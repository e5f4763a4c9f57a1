//! Registry - the single entry point that owns the store.
//!
//! [`CostTrax`] holds the database connection and a write lock. Every mutation takes the
//! lock, opens one transaction, validates, writes and commits; a failure drops the
//! transaction so nothing becomes visible. Reads go straight to the connection.
//!
//! While a transaction is open all queries go through it: an in-memory SQLite store has a
//! single pooled connection.

use crate::{
    config::database::create_tables,
    core::{
        activity,
        catalog::{Catalog, NewCatalogEntry},
        composition::{ActivityLineInput, MaterialLineInput, ProductSheet},
        cost::{self, CostBreakdown},
        material,
        product::{self, NewProduct},
    },
    entities::{
        activity as activity_entity, activity_line, material as material_entity, material_line,
    },
    errors::{Error, Result},
};
use sea_orm::{DatabaseConnection, TransactionTrait};
use tokio::sync::Mutex;
use tracing::{info, instrument, warn};

/// Catalogue and product registry backed by the store.
#[derive(Debug)]
pub struct CostTrax {
    pub(crate) db: DatabaseConnection,
    pub(crate) write_lock: Mutex<()>,
}

impl CostTrax {
    /// Wraps a connection, creating any missing table first.
    ///
    /// Opening the same store repeatedly is harmless.
    pub async fn open(db: DatabaseConnection) -> Result<Self> {
        create_tables(&db).await?;
        info!("Store ready");
        Ok(Self {
            db,
            write_lock: Mutex::new(()),
        })
    }

    /// The underlying connection, for read-only callers.
    #[must_use]
    pub const fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Adds a material to the catalogue.
    #[instrument(skip(self), fields(code = entry.code))]
    pub async fn add_material(&self, entry: &NewCatalogEntry) -> Result<material_entity::Model> {
        let _guard = self.write_lock.lock().await;
        let txn = self.db.begin().await?;
        let created = material::create_material(&txn, entry).await?;
        txn.commit().await?;
        Ok(created)
    }

    /// Adds an activity to the catalogue.
    #[instrument(skip(self), fields(code = entry.code))]
    pub async fn add_activity(&self, entry: &NewCatalogEntry) -> Result<activity_entity::Model> {
        let _guard = self.write_lock.lock().await;
        let txn = self.db.begin().await?;
        let created = activity::create_activity(&txn, entry).await?;
        txn.commit().await?;
        Ok(created)
    }

    /// Looks a material up by code.
    pub async fn lookup_material(&self, code: i64) -> Result<Option<material_entity::Model>> {
        material::get_material_by_code(&self.db, code).await
    }

    /// Looks an activity up by code.
    pub async fn lookup_activity(&self, code: i64) -> Result<Option<activity_entity::Model>> {
        activity::get_activity_by_code(&self.db, code).await
    }

    /// Snapshot of the material catalogue.
    pub async fn materials(&self) -> Result<Catalog<material_entity::Model>> {
        material::load_material_catalog(&self.db).await
    }

    /// Snapshot of the activity catalogue.
    pub async fn activities(&self) -> Result<Catalog<activity_entity::Model>> {
        activity::load_activity_catalog(&self.db).await
    }

    /// Revises a material's cost per unit.
    #[instrument(skip(self))]
    pub async fn update_material_cost(
        &self,
        code: i64,
        new_cost: f64,
    ) -> Result<material_entity::Model> {
        let _guard = self.write_lock.lock().await;
        let txn = self.db.begin().await?;
        let updated = material::update_material_cost(&txn, code, new_cost).await?;
        txn.commit().await?;
        Ok(updated)
    }

    /// Revises an activity's cost per unit.
    #[instrument(skip(self))]
    pub async fn update_activity_cost(
        &self,
        code: i64,
        new_cost: f64,
    ) -> Result<activity_entity::Model> {
        let _guard = self.write_lock.lock().await;
        let txn = self.db.begin().await?;
        let updated = activity::update_activity_cost(&txn, code, new_cost).await?;
        txn.commit().await?;
        Ok(updated)
    }

    /// Removes a material no product uses.
    #[instrument(skip(self))]
    pub async fn delete_material(&self, code: i64) -> Result<material_entity::Model> {
        let _guard = self.write_lock.lock().await;
        let txn = self.db.begin().await?;
        let removed = material::delete_material(&txn, code).await?;
        txn.commit().await?;
        Ok(removed)
    }

    /// Removes an activity no product uses.
    #[instrument(skip(self))]
    pub async fn delete_activity(&self, code: i64) -> Result<activity_entity::Model> {
        let _guard = self.write_lock.lock().await;
        let txn = self.db.begin().await?;
        let removed = activity::delete_activity(&txn, code).await?;
        txn.commit().await?;
        Ok(removed)
    }

    /// Creates a product with empty bills.
    #[instrument(skip(self), fields(code = input.code))]
    pub async fn add_product(&self, input: &NewProduct) -> Result<ProductSheet> {
        let _guard = self.write_lock.lock().await;
        let txn = self.db.begin().await?;
        let sheet = product::create_product(&txn, input).await?;
        txn.commit().await?;
        Ok(sheet)
    }

    /// Finds a product with its bills. A miss is `Ok(None)`.
    pub async fn search(&self, code: i64) -> Result<Option<ProductSheet>> {
        product::get_product_sheet(&self.db, code).await
    }

    /// Every product with its bills, ordered by code.
    pub async fn products(&self) -> Result<Vec<ProductSheet>> {
        product::get_all_product_sheets(&self.db).await
    }

    /// Validates a material line against the catalogue and stores it on the product.
    ///
    /// # Errors
    /// - [`Error::ProductNotFound`] if the product does not exist
    /// - [`Error::Validation`] naming every rejected field; nothing is written
    #[instrument(skip(self, input), fields(material_code = input.material_code))]
    pub async fn add_material_line(
        &self,
        product_code: i64,
        input: &MaterialLineInput,
    ) -> Result<material_line::Model> {
        let _guard = self.write_lock.lock().await;
        let txn = self.db.begin().await?;

        let mut sheet = product::get_product_sheet(&txn, product_code)
            .await?
            .ok_or(Error::ProductNotFound { code: product_code })?;
        let materials = material::load_material_catalog(&txn).await?;

        let line = sheet
            .add_material_line(&materials, input)
            .inspect_err(|e| warn!("Material line rejected: {e}"))?
            .clone();
        let saved = product::save_material_line(&txn, &line).await?;

        txn.commit().await?;
        info!(product_code, material_code = saved.material_code, "Material line stored");
        Ok(saved)
    }

    /// Validates an activity line against the catalogue and stores it on the product.
    ///
    /// # Errors
    /// - [`Error::ProductNotFound`] if the product does not exist
    /// - [`Error::Validation`] naming every rejected field; nothing is written
    #[instrument(skip(self, input), fields(activity_code = input.activity_code))]
    pub async fn add_activity_line(
        &self,
        product_code: i64,
        input: &ActivityLineInput,
    ) -> Result<activity_line::Model> {
        let _guard = self.write_lock.lock().await;
        let txn = self.db.begin().await?;

        let mut sheet = product::get_product_sheet(&txn, product_code)
            .await?
            .ok_or(Error::ProductNotFound { code: product_code })?;
        let activities = activity::load_activity_catalog(&txn).await?;

        let line = sheet
            .add_activity_line(&activities, input)
            .inspect_err(|e| warn!("Activity line rejected: {e}"))?
            .clone();
        let saved = product::save_activity_line(&txn, &line).await?;

        txn.commit().await?;
        info!(product_code, activity_code = saved.activity_code, "Activity line stored");
        Ok(saved)
    }

    /// Loads a product and both catalogues and computes its direct cost.
    ///
    /// # Errors
    /// - [`Error::ProductNotFound`] if the product does not exist
    /// - [`Error::MissingCatalogEntry`] / [`Error::DivisionByZero`] from the cost engine
    pub async fn compute_cost(&self, product_code: i64) -> Result<CostBreakdown> {
        let sheet = self
            .search(product_code)
            .await?
            .ok_or(Error::ProductNotFound { code: product_code })?;
        let materials = self.materials().await?;
        let activities = self.activities().await?;
        cost::compute_cost(&sheet, &materials, &activities)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::entities::EntityKind;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_bootstrap_is_idempotent() -> Result<()> {
        let trax = setup_box_registry().await?;

        // bootstrapping the same store again keeps existing data
        create_tables(trax.connection()).await?;
        assert!(trax.lookup_material(1).await?.is_some());
        assert_eq!(trax.search(1).await?.unwrap().bill_of_materials.len(), 3);
        assert!((trax.compute_cost(1).await?.material_total - 54.82).abs() < 1e-9);
        Ok(())
    }

    #[tokio::test]
    async fn test_concurrent_mutations_are_serialized() -> Result<()> {
        let trax = setup_box_registry().await?;
        let line = material_input(3, 2.0, 1.0, 0.0);
        let hinge = NewCatalogEntry::new(5, "Hinge", "", 0.5, "piece");
        let other_hinge = NewCatalogEntry::new(5, "Other hinge", "", 0.7, "piece");

        let (stored, revised, first, second) = tokio::join!(
            trax.add_material_line(1, &line),
            trax.update_material_cost(3, 2.9),
            trax.add_material(&hinge),
            trax.add_material(&other_hinge),
        );

        assert_eq!(stored?.consumption, 2.0);
        assert_eq!(revised?.cost_per_unit, 2.9);

        let results = [first, second];
        let duplicates = results
            .iter()
            .filter(|r| {
                matches!(
                    r,
                    Err(Error::DuplicateCode {
                        kind: EntityKind::Material,
                        code: 5
                    })
                )
            })
            .count();
        assert_eq!(duplicates, 1);
        let winner = results.into_iter().find_map(Result::ok).unwrap();
        let stored_hinge = trax.lookup_material(5).await?.unwrap();
        assert_eq!(stored_hinge.name, winner.name);
        assert_eq!(stored_hinge.cost_per_unit, winner.cost_per_unit);

        let sheet = trax.search(1).await?.unwrap();
        assert_eq!(sheet.bill_of_materials.len(), 3);
        assert_eq!(sheet.bill_of_materials[&3].consumption, 2.0);
        // material 3 goes from 1.5225 to 2.9 * 2.0
        let breakdown = trax.compute_cost(1).await?;
        assert!((breakdown.material_total - (54.82 - 1.5225 + 5.8)).abs() < 1e-9);
        Ok(())
    }

    #[tokio::test]
    async fn test_box_example_end_to_end() -> Result<()> {
        let trax = setup_box_registry().await?;

        let breakdown = trax.compute_cost(1).await?;
        assert!((breakdown.material_total - 54.82).abs() < 1e-9);
        assert!((breakdown.activity_total - 2.4).abs() < 1e-9);
        Ok(())
    }

    #[tokio::test]
    async fn test_line_survives_reload() -> Result<()> {
        let trax = setup_box_registry().await?;

        let sheet = trax.search(1).await?.unwrap();
        let line = &sheet.bill_of_materials[&4];
        assert_eq!(line.consumption, 0.5);
        assert_eq!(line.production_ratio, 1.0);
        assert_eq!(line.waste, 10.0);
        assert_eq!(line.consumption_unit, "strip");

        // searching twice without a mutation gives the same answer
        assert_eq!(trax.search(1).await?, Some(sheet));
        Ok(())
    }

    #[tokio::test]
    async fn test_rejected_line_changes_nothing() -> Result<()> {
        let trax = setup_box_registry().await?;
        let before = trax.search(1).await?.unwrap();

        let result = trax.add_material_line(1, &material_input(99, 1.0, 1.0, 0.0)).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::Validation(ref e) if e.contains("material_code")
        ));

        let result = trax.add_material_line(1, &material_input(3, 1.0, 1.0, 150.0)).await;
        let Err(Error::Validation(errors)) = result else {
            panic!("expected a validation error");
        };
        assert!(errors.contains("waste"));

        let after = trax.search(1).await?.unwrap();
        assert_eq!(after.bill_of_materials.len(), before.bill_of_materials.len());
        assert_eq!(after.bill_of_materials, before.bill_of_materials);
        Ok(())
    }

    #[tokio::test]
    async fn test_readding_a_material_overwrites() -> Result<()> {
        let trax = setup_box_registry().await?;

        trax.add_material_line(1, &material_input(3, 2.0, 1.0, 0.0))
            .await?;

        let sheet = trax.search(1).await?.unwrap();
        assert_eq!(sheet.bill_of_materials.len(), 3);
        assert_eq!(sheet.bill_of_materials[&3].consumption, 2.0);
        assert_eq!(sheet.bill_of_materials[&3].waste, 0.0);
        Ok(())
    }

    #[tokio::test]
    async fn test_line_on_missing_product() -> Result<()> {
        let trax = setup_box_registry().await?;

        let result = trax.add_activity_line(77, &activity_input(2, 1.0, 1.0)).await;
        assert!(matches!(result.unwrap_err(), Error::ProductNotFound { code: 77 }));
        Ok(())
    }

    #[tokio::test]
    async fn test_duplicate_codes_are_rejected() -> Result<()> {
        let trax = setup_box_registry().await?;

        let result = trax
            .add_material(&NewCatalogEntry::new(1, "Replacement", "", 1.0, "sheet"))
            .await;
        assert!(matches!(
            result.unwrap_err(),
            Error::DuplicateCode {
                kind: EntityKind::Material,
                code: 1
            }
        ));
        assert_eq!(trax.lookup_material(1).await?.unwrap().cost_per_unit, 100.0);

        let result = trax.add_product(&NewProduct::new(1, "Box", "", "box")).await;
        assert!(matches!(result.unwrap_err(), Error::InvalidCode { code: 1, .. }));
        Ok(())
    }

    #[tokio::test]
    async fn test_cost_revision_flows_into_cost() -> Result<()> {
        let trax = setup_box_registry().await?;

        trax.update_material_cost(1, 200.0).await?;

        let breakdown = trax.compute_cost(1).await?;
        // material 1 doubles from 52.5 to 105
        assert!((breakdown.material_total - (54.82 + 52.5)).abs() < 1e-9);
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_referenced_entry_is_refused() -> Result<()> {
        let trax = setup_box_registry().await?;

        let result = trax.delete_activity(4).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::CatalogEntryInUse { product_code: 1, .. }
        ));

        // activity 3 is catalogued but unused
        trax.delete_activity(3).await?;
        assert!(trax.lookup_activity(3).await?.is_none());
        assert!(trax.compute_cost(1).await.is_ok());
        Ok(())
    }

    #[tokio::test]
    async fn test_cost_of_missing_product() -> Result<()> {
        let trax = setup_test_registry().await?;
        assert!(matches!(
            trax.compute_cost(1).await.unwrap_err(),
            Error::ProductNotFound { code: 1 }
        ));
        Ok(())
    }
}
