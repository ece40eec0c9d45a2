//! Sales history models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One append-only sales record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SalesHistoryEntry {
    pub id: i64,
    pub product_id: i64,
    pub store_id: i64,
    pub quantity_sold: i32,
    pub sale_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}
