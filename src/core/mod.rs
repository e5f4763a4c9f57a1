//! Core business logic - framework-agnostic catalogue, composition and costing operations.

/// Activity catalogue operations
pub mod activity;
/// Catalogue abstraction shared by materials and activities
pub mod catalog;
/// Product sheets and bill line validation
pub mod composition;
/// Direct cost engine
pub mod cost;
/// Material catalogue operations
pub mod material;
/// Product persistence
pub mod product;
/// Transactional registry over the store
pub mod registry;
/// Plain-text rendering
pub mod report;
/// Seeding from a seed catalogue
pub mod seed;
/// Field-level validation
pub mod validation;

pub use registry::CostTrax;
