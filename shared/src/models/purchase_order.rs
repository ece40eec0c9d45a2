//! Purchase order models and status lifecycle

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::Validate;

/// Purchase order lifecycle
///
/// `Draft -> Submitted -> Approved -> Received`, with `Cancelled`
/// reachable from every state before `Received`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Draft,
    Submitted,
    Approved,
    Received,
    Cancelled,
}

/// Returned when a status string is not a known order status
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown order status: {0}")]
pub struct ParseOrderStatusError(pub String);

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Draft => "draft",
            OrderStatus::Submitted => "submitted",
            OrderStatus::Approved => "approved",
            OrderStatus::Received => "received",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Received and cancelled orders accept no further transitions
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Received | OrderStatus::Cancelled)
    }

    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (*self, next),
            (Draft, Submitted)
                | (Submitted, Approved)
                | (Approved, Received)
                | (Draft | Submitted | Approved, Cancelled)
        )
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = ParseOrderStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(OrderStatus::Draft),
            "submitted" => Ok(OrderStatus::Submitted),
            "approved" => Ok(OrderStatus::Approved),
            "received" => Ok(OrderStatus::Received),
            "cancelled" => Ok(OrderStatus::Cancelled),
            other => Err(ParseOrderStatusError(other.to_string())),
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Purchase order header
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PurchaseOrder {
    pub id: i64,
    pub store_id: i64,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub submitted_at: Option<DateTime<Utc>>,
    pub approved_at: Option<DateTime<Utc>>,
    pub received_at: Option<DateTime<Utc>>,
}

/// One line of a purchase order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PurchaseOrderItem {
    pub id: i64,
    pub purchase_order_id: i64,
    pub product_id: i64,
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub product_name: Option<String>,
    pub product_sku: Option<String>,
}

/// Purchase order with store name and line items
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseOrderDetails {
    #[serde(flatten)]
    pub order: PurchaseOrder,
    pub store_name: String,
    pub items: Vec<PurchaseOrderItem>,
    pub total_items: i64,
}

/// Line item in a create request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PurchaseOrderItemInput {
    pub product_id: i64,
    #[validate(range(min = 0, message = "Item quantity cannot be negative"))]
    pub quantity: i32,
}

/// Input for creating a purchase order
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePurchaseOrderInput {
    pub store_id: i64,
    #[validate]
    pub items: Vec<PurchaseOrderItemInput>,
}

/// Input for changing a purchase order's status
#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePurchaseOrderInput {
    pub status: Option<OrderStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    const ALL: [OrderStatus; 5] = [
        OrderStatus::Draft,
        OrderStatus::Submitted,
        OrderStatus::Approved,
        OrderStatus::Received,
        OrderStatus::Cancelled,
    ];

    #[test]
    fn forward_lifecycle_is_allowed() {
        assert!(OrderStatus::Draft.can_transition_to(OrderStatus::Submitted));
        assert!(OrderStatus::Submitted.can_transition_to(OrderStatus::Approved));
        assert!(OrderStatus::Approved.can_transition_to(OrderStatus::Received));
    }

    #[test]
    fn skipping_or_reversing_is_rejected() {
        assert!(!OrderStatus::Draft.can_transition_to(OrderStatus::Received));
        assert!(!OrderStatus::Approved.can_transition_to(OrderStatus::Draft));
        assert!(!OrderStatus::Submitted.can_transition_to(OrderStatus::Submitted));
    }

    #[test]
    fn cancel_only_before_received() {
        assert!(OrderStatus::Draft.can_transition_to(OrderStatus::Cancelled));
        assert!(OrderStatus::Approved.can_transition_to(OrderStatus::Cancelled));
        assert!(!OrderStatus::Received.can_transition_to(OrderStatus::Cancelled));
    }

    #[test]
    fn terminal_states_have_no_exits() {
        for from in ALL.iter().filter(|s| s.is_terminal()) {
            for to in ALL {
                assert!(!from.can_transition_to(to), "{} -> {}", from, to);
            }
        }
    }

    #[test]
    fn status_string_round_trip() {
        for status in ALL {
            assert_eq!(OrderStatus::from_str(status.as_str()), Ok(status));
        }
        assert!(OrderStatus::from_str("shipped").is_err());
    }
}
