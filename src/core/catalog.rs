//! Catalogue abstraction shared by the material and activity catalogues.
//!
//! Both catalogues map a positive integer code to a cost-bearing record. [`CatalogEntry`]
//! exposes the fields the cost engine and the renderers need, and [`Catalog`] is the
//! in-memory code-keyed view handed to the pure parts of the system.

use crate::{
    core::validation::{Validator, non_empty, non_negative},
    entities::{EntityKind, activity, material},
    errors::{Error, Result},
};
use std::collections::BTreeMap;

/// A cost-bearing catalogue record.
pub trait CatalogEntry {
    /// Which catalogue this record lives in
    const KIND: EntityKind;

    /// Catalogue code
    fn code(&self) -> i64;
    /// Short name
    fn name(&self) -> &str;
    /// Free-text description
    fn description(&self) -> &str;
    /// Current cost of one [`unit`](CatalogEntry::unit)
    fn cost_per_unit(&self) -> f64;
    /// Unit the cost refers to
    fn unit(&self) -> &str;
}

impl CatalogEntry for material::Model {
    const KIND: EntityKind = EntityKind::Material;

    fn code(&self) -> i64 {
        self.code
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn description(&self) -> &str {
        &self.description
    }
    fn cost_per_unit(&self) -> f64 {
        self.cost_per_unit
    }
    fn unit(&self) -> &str {
        &self.base_unit
    }
}

impl CatalogEntry for activity::Model {
    const KIND: EntityKind = EntityKind::Activity;

    fn code(&self) -> i64 {
        self.code
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn description(&self) -> &str {
        &self.description
    }
    fn cost_per_unit(&self) -> f64 {
        self.cost_per_unit
    }
    fn unit(&self) -> &str {
        &self.activity_unit
    }
}

/// Code-keyed, in-memory snapshot of one catalogue.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog<T> {
    entries: BTreeMap<i64, T>,
}

impl<T> Default for Catalog<T> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<T: CatalogEntry> Catalog<T> {
    /// Creates an empty catalogue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalogue from records, rejecting repeated codes.
    pub fn from_entries(entries: impl IntoIterator<Item = T>) -> Result<Self> {
        let mut catalog = Self::new();
        for entry in entries {
            catalog.insert(entry)?;
        }
        Ok(catalog)
    }

    /// Adds a record. Fails with [`Error::DuplicateCode`] if the code is already present.
    pub fn insert(&mut self, entry: T) -> Result<()> {
        let code = entry.code();
        if self.entries.contains_key(&code) {
            return Err(Error::DuplicateCode {
                kind: T::KIND,
                code,
            });
        }
        self.entries.insert(code, entry);
        Ok(())
    }

    /// Looks a record up by code. A miss is `None`, never an error.
    #[must_use]
    pub fn lookup(&self, code: i64) -> Option<&T> {
        self.entries.get(&code)
    }

    /// Whether a record with `code` exists.
    #[must_use]
    pub fn contains(&self, code: i64) -> bool {
        self.entries.contains_key(&code)
    }

    /// Every record, ordered by code.
    pub fn all(&self) -> impl Iterator<Item = &T> {
        self.entries.values()
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalogue is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Input for adding a record to either catalogue.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCatalogEntry {
    /// Code of the new record, must be positive and unused
    pub code: i64,
    /// Short name, must not be blank
    pub name: String,
    /// Free-text description
    pub description: String,
    /// Cost of one unit, finite and not negative
    pub cost_per_unit: f64,
    /// Unit the cost refers to
    pub unit: String,
}

impl NewCatalogEntry {
    /// Convenience constructor.
    pub fn new(
        code: i64,
        name: impl Into<String>,
        description: impl Into<String>,
        cost_per_unit: f64,
        unit: impl Into<String>,
    ) -> Self {
        Self {
            code,
            name: name.into(),
            description: description.into(),
            cost_per_unit,
            unit: unit.into(),
        }
    }

    /// Checks the input before anything touches the store.
    ///
    /// # Errors
    /// - [`Error::InvalidCode`] if the code is not positive
    /// - [`Error::Validation`] naming `name` and/or `cost_per_unit`
    pub fn validate(&self, kind: EntityKind) -> Result<()> {
        validate_code(kind, self.code)?;
        let mut validator = Validator::new();
        validator
            .check("name", non_empty(&self.name))
            .check("cost_per_unit", non_negative(self.cost_per_unit));
        validator.finish()
    }
}

/// Rejects codes that cannot serve as keys.
pub fn validate_code(kind: EntityKind, code: i64) -> Result<()> {
    if code <= 0 {
        return Err(Error::InvalidCode {
            kind,
            code,
            reason: "code must be a positive integer".to_string(),
        });
    }
    Ok(())
}
