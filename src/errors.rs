//! Unified error types for the costing system.
//!
//! Every fallible operation in the crate returns [`Result`]. Field-level input problems are
//! collected into a [`FieldErrors`] report so callers can show every problem at once.

use crate::{core::validation::FieldErrors, entities::EntityKind};
use thiserror::Error;

/// Errors produced by catalogue, product, cost and storage operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// Description of what went wrong
        message: String,
    },

    /// The underlying store failed (connection, query or commit)
    #[error("Storage error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Filesystem failure outside the store
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// One or more input fields were rejected; nothing was written
    #[error("Invalid input: {0}")]
    Validation(FieldErrors),

    /// A catalogue entry with this code already exists
    #[error("{kind} code {code} is already in use")]
    DuplicateCode {
        /// Which catalogue rejected the code
        kind: EntityKind,
        /// The conflicting code
        code: i64,
    },

    /// The code is not acceptable as a key (not positive, or already taken for products)
    #[error("Invalid {kind} code {code}: {reason}")]
    InvalidCode {
        /// Which registry rejected the code
        kind: EntityKind,
        /// The rejected code
        code: i64,
        /// Why it was rejected
        reason: String,
    },

    /// The product targeted by a mutation or cost computation does not exist
    #[error("Product {code} not found")]
    ProductNotFound {
        /// Code that was looked up
        code: i64,
    },

    /// The catalogue entry targeted by a mutation does not exist
    #[error("{kind} {code} not found")]
    CatalogEntryNotFound {
        /// Catalogue searched
        kind: EntityKind,
        /// Code that was looked up
        code: i64,
    },

    /// The catalogue entry is still referenced by a product line
    #[error("{kind} {code} is still used by product {product_code}")]
    CatalogEntryInUse {
        /// Catalogue of the entry
        kind: EntityKind,
        /// Code of the entry
        code: i64,
        /// A product whose bill references the entry
        product_code: i64,
    },

    /// A product line references a code that no longer resolves in its catalogue
    #[error("Product {product_code} references {kind} {code}, which is not in the catalogue")]
    MissingCatalogEntry {
        /// Catalogue the line points into
        kind: EntityKind,
        /// The dangling code
        code: i64,
        /// Product being costed
        product_code: i64,
    },

    /// A product line has a zero production ratio
    #[error("Product {product_code} has a zero production ratio on {kind} {code}")]
    DivisionByZero {
        /// Catalogue the line points into
        kind: EntityKind,
        /// Code of the offending line
        code: i64,
        /// Product being costed
        product_code: i64,
    },
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
