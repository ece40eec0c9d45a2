//! Store models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A physical store holding inventory
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Store {
    pub id: i64,
    pub name: String,
    pub location: String,
    pub region: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a store
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateStoreInput {
    #[validate(length(min = 1, max = 255, message = "Store name must be 1-255 characters"))]
    pub name: String,
    #[validate(length(min = 1, max = 255, message = "Location must be 1-255 characters"))]
    pub location: String,
    #[validate(length(max = 100))]
    pub region: Option<String>,
}

/// Input for updating a store; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateStoreInput {
    #[validate(length(min = 1, max = 255, message = "Store name must be 1-255 characters"))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 255, message = "Location must be 1-255 characters"))]
    pub location: Option<String>,
    #[validate(length(max = 100))]
    pub region: Option<String>,
}

/// Store with its inventory statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreWithInventoryCount {
    #[serde(flatten)]
    pub store: Store,
    /// Distinct products stocked at the store
    pub total_products: i64,
    /// Summed quantity across the store's inventory
    pub total_items: i64,
}
