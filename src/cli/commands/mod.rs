//! Command handlers organized by category.
//!
//! Each handler runs one parsed command against the registry and returns the text to show.
//! Successful mutations answer with a ✅ line; errors propagate to the binary.

/// Material and activity catalogue commands
pub mod catalog;

/// Product commands
pub mod product;

/// Seed catalogue loading
pub mod seed;
