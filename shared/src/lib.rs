//! Shared types, models and analytics for the Inventory Analytics Platform
//!
//! This crate contains the pure domain layer shared between the backend,
//! the browser dashboard (via WASM), and tests. It performs no I/O.

pub mod analytics;
pub mod models;
pub mod types;
pub mod validation;

pub use analytics::*;
pub use models::*;
pub use types::*;
pub use validation::*;
