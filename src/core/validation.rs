//! Field validation for catalogue and bill-of-materials input.
//!
//! Each check is a small function returning a [`FieldCheck`]. A [`Validator`] runs every
//! check for an operation and collects the failures into one [`FieldErrors`] report, so an
//! operation either passes completely or writes nothing.

use crate::errors::{Error, Result};
use serde::Serialize;
use std::{collections::BTreeMap, fmt};

/// Outcome of validating a single field: `Err` carries the message shown to the user.
pub type FieldCheck = std::result::Result<(), String>;

/// Field name to message report returned when input is rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    /// Creates an empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a message for `field`. The first message recorded for a field wins.
    pub fn insert(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_insert_with(|| message.into());
    }

    /// Message recorded for `field`, if any.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Whether `field` was rejected.
    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Whether no field was rejected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of rejected fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Rejected fields and their messages, ordered by field name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

/// Value must be a finite number.
pub fn finite(value: f64) -> FieldCheck {
    if value.is_finite() {
        Ok(())
    } else {
        Err("must be a number".to_string())
    }
}

/// Value must be a finite number, zero or greater.
pub fn non_negative(value: f64) -> FieldCheck {
    finite(value)?;
    if value < 0.0 {
        return Err("cannot be negative".to_string());
    }
    Ok(())
}

/// Value must be a finite number strictly greater than zero.
pub fn positive(value: f64) -> FieldCheck {
    finite(value)?;
    if value <= 0.0 {
        return Err("must be greater than zero".to_string());
    }
    Ok(())
}

/// Value must be a percentage in `[0, 100]`.
pub fn percentage(value: f64) -> FieldCheck {
    if !value.is_finite() {
        return Err("must be a number between 0 and 100".to_string());
    }
    if value < 0.0 {
        return Err("cannot be negative".to_string());
    }
    if value > 100.0 {
        return Err("cannot be greater than 100".to_string());
    }
    Ok(())
}

/// Text must contain something other than whitespace.
pub fn non_empty(text: &str) -> FieldCheck {
    if text.trim().is_empty() {
        Err("cannot be empty".to_string())
    } else {
        Ok(())
    }
}

/// Collects the outcome of every field check of one operation.
#[derive(Debug, Default)]
pub struct Validator {
    errors: FieldErrors,
}

impl Validator {
    /// Starts an empty validation run.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the outcome of a check against `field`.
    pub fn check(&mut self, field: &str, outcome: FieldCheck) -> &mut Self {
        if let Err(message) = outcome {
            self.errors.insert(field, message);
        }
        self
    }

    /// Rejects `field` unconditionally.
    pub fn reject(&mut self, field: &str, message: impl Into<String>) -> &mut Self {
        self.errors.insert(field, message);
        self
    }

    /// Ends the run: `Ok` if every check passed, otherwise [`Error::Validation`].
    pub fn finish(self) -> Result<()> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(Error::Validation(self.errors))
        }
    }
}
