//! Product composition - a product together with its bill of materials and bill of activities.
//!
//! [`ProductSheet`] is the in-memory aggregate. Adding a line validates every field against
//! the relevant catalogue first and only then writes, so a rejected line never leaves the
//! sheet half-updated. A second line for the same code replaces the first.

use crate::{
    core::{
        catalog::Catalog,
        validation::{Validator, non_negative, percentage, positive},
    },
    entities::{activity, activity_line, material, material_line, product},
    errors::Result,
};
use std::collections::{BTreeMap, btree_map::Entry};

/// A product header plus both of its bills, keyed by catalogue code.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductSheet {
    /// Stored product header
    pub product: product::Model,
    /// Material code to consumption line
    pub bill_of_materials: BTreeMap<i64, material_line::Model>,
    /// Activity code to consumption line
    pub bill_of_activities: BTreeMap<i64, activity_line::Model>,
}

/// Input for one bill-of-materials line.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialLineInput {
    /// Material consumed, must exist in the material catalogue
    pub material_code: i64,
    /// Amount consumed
    pub consumption: f64,
    /// Unit of the consumption
    pub consumption_unit: String,
    /// Finished units the consumption corresponds to
    pub production_ratio: f64,
    /// Unit of the production ratio
    pub production_unit: String,
    /// Percentage of material lost, 0 to 100
    pub waste: f64,
    /// Stored per-line cost override; defaults to 0 and is not used for costing
    pub cost_per_unit: Option<f64>,
}

/// Input for one bill-of-activities line.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityLineInput {
    /// Activity performed, must exist in the activity catalogue
    pub activity_code: i64,
    /// Amount consumed
    pub consumption: f64,
    /// Unit of the consumption
    pub activity_unit: String,
    /// Finished units the consumption corresponds to
    pub production_ratio: f64,
    /// Unit of the production ratio
    pub production_unit: String,
    /// Stored per-line cost override; defaults to 0 and is not used for costing
    pub cost_per_unit: Option<f64>,
}

impl ProductSheet {
    /// A sheet with empty bills.
    #[must_use]
    pub const fn new(product: product::Model) -> Self {
        Self {
            product,
            bill_of_materials: BTreeMap::new(),
            bill_of_activities: BTreeMap::new(),
        }
    }

    /// Reassembles a sheet from stored rows.
    pub fn from_parts(
        product: product::Model,
        materials: impl IntoIterator<Item = material_line::Model>,
        activities: impl IntoIterator<Item = activity_line::Model>,
    ) -> Self {
        Self {
            product,
            bill_of_materials: materials
                .into_iter()
                .map(|line| (line.material_code, line))
                .collect(),
            bill_of_activities: activities
                .into_iter()
                .map(|line| (line.activity_code, line))
                .collect(),
        }
    }

    /// Product code.
    #[must_use]
    pub const fn code(&self) -> i64 {
        self.product.code
    }

    /// Checks a material line without touching the sheet.
    ///
    /// # Errors
    /// [`Error::Validation`](crate::errors::Error::Validation) naming every rejected field.
    pub fn validate_material_line(
        materials: &Catalog<material::Model>,
        input: &MaterialLineInput,
    ) -> Result<()> {
        let mut validator = Validator::new();
        if !materials.contains(input.material_code) {
            validator.reject("material_code", "Material code does not exist");
        }
        validator
            .check("consumption", non_negative(input.consumption))
            .check("production_ratio", positive(input.production_ratio))
            .check("waste", percentage(input.waste));
        if let Some(cost) = input.cost_per_unit {
            validator.check("cost_per_unit", non_negative(cost));
        }
        validator.finish()
    }

    /// Checks an activity line without touching the sheet.
    ///
    /// # Errors
    /// [`Error::Validation`](crate::errors::Error::Validation) naming every rejected field.
    pub fn validate_activity_line(
        activities: &Catalog<activity::Model>,
        input: &ActivityLineInput,
    ) -> Result<()> {
        let mut validator = Validator::new();
        if !activities.contains(input.activity_code) {
            validator.reject("activity_code", "Activity code does not exist");
        }
        validator
            .check("consumption", non_negative(input.consumption))
            .check("production_ratio", positive(input.production_ratio));
        if let Some(cost) = input.cost_per_unit {
            validator.check("cost_per_unit", non_negative(cost));
        }
        validator.finish()
    }

    /// Validates and then inserts or replaces the line for `input.material_code`.
    ///
    /// On error the sheet is unchanged.
    pub fn add_material_line(
        &mut self,
        materials: &Catalog<material::Model>,
        input: &MaterialLineInput,
    ) -> Result<&material_line::Model> {
        Self::validate_material_line(materials, input)?;

        let line = material_line::Model {
            product_code: self.code(),
            material_code: input.material_code,
            consumption: input.consumption,
            consumption_unit: input.consumption_unit.clone(),
            production_ratio: input.production_ratio,
            production_unit: input.production_unit.clone(),
            waste: input.waste,
            cost_per_unit: input.cost_per_unit.unwrap_or(0.0),
        };
        Ok(replace(&mut self.bill_of_materials, input.material_code, line))
    }

    /// Validates and then inserts or replaces the line for `input.activity_code`.
    ///
    /// On error the sheet is unchanged.
    pub fn add_activity_line(
        &mut self,
        activities: &Catalog<activity::Model>,
        input: &ActivityLineInput,
    ) -> Result<&activity_line::Model> {
        Self::validate_activity_line(activities, input)?;

        let line = activity_line::Model {
            product_code: self.code(),
            activity_code: input.activity_code,
            consumption: input.consumption,
            activity_unit: input.activity_unit.clone(),
            production_ratio: input.production_ratio,
            production_unit: input.production_unit.clone(),
            cost_per_unit: input.cost_per_unit.unwrap_or(0.0),
        };
        Ok(replace(&mut self.bill_of_activities, input.activity_code, line))
    }
}

fn replace<V>(map: &mut BTreeMap<i64, V>, code: i64, value: V) -> &V {
    match map.entry(code) {
        Entry::Occupied(mut slot) => {
            slot.insert(value);
            slot.into_mut()
        }
        Entry::Vacant(slot) => slot.insert(value),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::errors::Error;
    use crate::test_utils::{
        activity_input, activity_model, material_input, material_model, product_model,
    };

    fn materials() -> Catalog<material::Model> {
        Catalog::from_entries([material_model(1, 100.0), material_model(3, 1.45)]).unwrap()
    }

    #[test]
    fn test_add_material_line_keeps_input_values() {
        let mut sheet = ProductSheet::new(product_model(1));
        let input = material_input(1, 0.5, 1.0, 5.0);

        let line = sheet.add_material_line(&materials(), &input).unwrap().clone();

        assert_eq!(line.product_code, 1);
        assert_eq!(line.material_code, 1);
        assert_eq!(line.consumption, 0.5);
        assert_eq!(line.production_ratio, 1.0);
        assert_eq!(line.waste, 5.0);
        assert_eq!(line.cost_per_unit, 0.0);
        assert_eq!(sheet.bill_of_materials.len(), 1);
    }

    #[test]
    fn test_unknown_material_leaves_sheet_unchanged() {
        let mut sheet = ProductSheet::new(product_model(1));
        sheet
            .add_material_line(&materials(), &material_input(1, 0.5, 1.0, 5.0))
            .unwrap();
        let before = sheet.clone();

        let result = sheet.add_material_line(&materials(), &material_input(99, 1.0, 1.0, 0.0));

        let Err(Error::Validation(errors)) = result else {
            panic!("expected a validation error");
        };
        assert!(errors.contains("material_code"));
        assert_eq!(sheet.bill_of_materials.len(), before.bill_of_materials.len());
        assert_eq!(sheet, before);
    }

    #[test]
    fn test_waste_bounds() {
        let mut sheet = ProductSheet::new(product_model(1));

        let result = sheet.add_material_line(&materials(), &material_input(1, 0.5, 1.0, 150.0));
        let Err(Error::Validation(errors)) = result else {
            panic!("expected a validation error");
        };
        assert_eq!(errors.len(), 1);
        assert!(errors.contains("waste"));
        assert!(sheet.bill_of_materials.is_empty());

        sheet
            .add_material_line(&materials(), &material_input(1, 0.5, 1.0, 0.0))
            .unwrap();
        assert_eq!(sheet.bill_of_materials[&1].waste, 0.0);
    }

    #[test]
    fn test_multiple_bad_fields_write_nothing() {
        let mut sheet = ProductSheet::new(product_model(1));
        let mut input = material_input(3, -1.0, 0.0, 5.0);
        input.consumption_unit = "strip".to_string();

        let Err(Error::Validation(errors)) = sheet.add_material_line(&materials(), &input) else {
            panic!("expected a validation error");
        };
        assert!(errors.contains("consumption"));
        assert!(errors.contains("production_ratio"));
        assert!(!errors.contains("material_code"));
        assert!(sheet.bill_of_materials.is_empty());
    }

    #[test]
    fn test_same_material_code_overwrites() {
        let mut sheet = ProductSheet::new(product_model(1));
        sheet
            .add_material_line(&materials(), &material_input(3, 1.0, 1.0, 5.0))
            .unwrap();
        sheet
            .add_material_line(&materials(), &material_input(3, 2.0, 4.0, 10.0))
            .unwrap();

        assert_eq!(sheet.bill_of_materials.len(), 1);
        let line = &sheet.bill_of_materials[&3];
        assert_eq!(line.consumption, 2.0);
        assert_eq!(line.production_ratio, 4.0);
        assert_eq!(line.waste, 10.0);
    }

    #[test]
    fn test_activity_line_is_validated_like_materials() {
        let activities = Catalog::from_entries([activity_model(2, 0.8)]).unwrap();
        let mut sheet = ProductSheet::new(product_model(1));

        let result = sheet.add_activity_line(&activities, &activity_input(9, 2.0, f64::NAN));
        let Err(Error::Validation(errors)) = result else {
            panic!("expected a validation error");
        };
        assert!(errors.contains("activity_code"));
        assert!(errors.contains("production_ratio"));
        assert!(sheet.bill_of_activities.is_empty());

        let line = sheet
            .add_activity_line(&activities, &activity_input(2, 2.0, 4.0))
            .unwrap();
        assert_eq!(line.activity_code, 2);
        assert_eq!(line.production_ratio, 4.0);
    }

    #[test]
    fn test_negative_override_is_rejected() {
        let mut sheet = ProductSheet::new(product_model(1));
        let mut input = material_input(1, 0.5, 1.0, 5.0);
        input.cost_per_unit = Some(-3.0);

        let Err(Error::Validation(errors)) = sheet.add_material_line(&materials(), &input) else {
            panic!("expected a validation error");
        };
        assert!(errors.contains("cost_per_unit"));
    }
}
