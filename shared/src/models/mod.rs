//! Domain models for the Inventory Analytics Platform

mod analytics;
mod inventory;
mod product;
mod purchase_order;
mod sales;
mod store;

pub use analytics::*;
pub use inventory::*;
pub use product::*;
pub use purchase_order::*;
pub use sales::*;
pub use store::*;
