//! Inventory models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Stock level of one product at one store
///
/// At most one record exists per (product_id, store_id) pair.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InventoryRecord {
    pub id: i64,
    pub product_id: i64,
    pub store_id: i64,
    pub quantity: i32,
    pub reorder_point: Option<i32>,
    pub reorder_quantity: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_restock_at: Option<DateTime<Utc>>,
}

impl InventoryRecord {
    /// Whether the record is at or below its reorder point.
    ///
    /// A record without a reorder point is never low-stock.
    pub fn is_low_stock(&self) -> bool {
        is_low_stock(self.quantity, self.reorder_point)
    }

    pub fn was_restocked(&self) -> bool {
        self.last_restock_at.is_some()
    }

    pub fn is_stocked_out(&self) -> bool {
        self.quantity == 0
    }
}

/// Low-stock classification: quantity <= reorder_point
pub fn is_low_stock(quantity: i32, reorder_point: Option<i32>) -> bool {
    reorder_point.map_or(false, |point| quantity <= point)
}

/// Inventory record joined with its product and store
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InventoryWithDetails {
    #[serde(flatten)]
    pub inventory: InventoryRecord,
    pub product_name: String,
    pub product_sku: String,
    pub product_category: Option<String>,
    pub store_name: String,
    pub store_location: String,
}

/// Input for creating an inventory record
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateInventoryInput {
    pub product_id: i64,
    pub store_id: i64,
    #[validate(range(min = 0, message = "Quantity cannot be negative"))]
    pub quantity: i32,
    #[validate(range(min = 0, message = "Reorder point cannot be negative"))]
    pub reorder_point: Option<i32>,
    #[validate(range(min = 0, message = "Reorder quantity cannot be negative"))]
    pub reorder_quantity: Option<i32>,
}

/// Input for updating an inventory record; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateInventoryInput {
    #[validate(range(min = 0, message = "Quantity cannot be negative"))]
    pub quantity: Option<i32>,
    #[validate(range(min = 0, message = "Reorder point cannot be negative"))]
    pub reorder_point: Option<i32>,
    #[validate(range(min = 0, message = "Reorder quantity cannot be negative"))]
    pub reorder_quantity: Option<i32>,
}

/// Input for restocking an inventory record
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RestockInput {
    #[validate(range(min = 1, message = "Restock quantity must be positive"))]
    pub quantity: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn low_stock_boundaries() {
        assert!(is_low_stock(5, Some(10)));
        assert!(is_low_stock(10, Some(10)));
        assert!(!is_low_stock(15, Some(10)));
    }

    #[test]
    fn missing_reorder_point_is_never_low_stock() {
        assert!(!is_low_stock(0, None));
    }

    #[test]
    fn create_input_rejects_negative_quantity() {
        let input = CreateInventoryInput {
            product_id: 1,
            store_id: 1,
            quantity: -1,
            reorder_point: Some(5),
            reorder_quantity: None,
        };
        assert!(input.validate().is_err());
    }
}
