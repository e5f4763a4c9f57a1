/// Database configuration and connection management
pub mod database;

/// Seed catalogue loading from catalog.toml
pub mod catalog;
