//! Analytics response models
//!
//! Field names are part of the dashboard's JSON contract.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Overall analytics summary
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalyticsSummary {
    pub total_products: i64,
    pub total_stores: i64,
    pub total_inventory: i64,
    pub low_stock_items: i64,
    /// Percentage of inventory records that are not low-stock (0-100)
    pub inventory_health_score: f64,
    pub top_performing_stores: Vec<String>,
    pub critical_products: Vec<String>,
    pub regional_distribution: BTreeMap<String, i64>,
}

/// Per-product inventory roll-up
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductPerformance {
    pub product_id: i64,
    pub product_name: String,
    pub product_sku: String,
    pub total_quantity: i64,
    pub store_count: i64,
    pub low_stock_count: i64,
    pub avg_quantity: f64,
}

/// Per-store inventory roll-up
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorePerformance {
    pub store_id: i64,
    pub store_name: String,
    pub store_location: String,
    pub region: Option<String>,
    pub total_products: i64,
    pub total_quantity: i64,
    pub low_stock_items: i64,
    pub restock_count: i64,
    pub avg_quantity: f64,
    /// Reserved; unit costs are not tracked, so this is always 0.0
    pub inventory_value: f64,
}

/// Per-region inventory roll-up
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegionalTrends {
    pub region: String,
    pub store_count: i64,
    pub total_products: i64,
    pub total_quantity: i64,
    pub avg_products_per_store: f64,
    pub low_stock_percentage: f64,
}

/// Placeholder low-stock prediction for one store's stock of a product
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LowStockPrediction {
    pub product_id: i64,
    pub product_name: String,
    pub store_id: i64,
    pub store_name: String,
    pub current_quantity: i32,
    pub predicted_days_until_reorder: f64,
    pub confidence_score: f64,
    pub recommended_restock_date: DateTime<Utc>,
}

/// Granularity class of a trend request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeRange {
    Day,
    Week,
    Month,
}

impl TimeRange {
    /// Default lookback window when no start date is given
    pub fn lookback(&self) -> Duration {
        match self {
            TimeRange::Day => Duration::days(30),
            TimeRange::Week => Duration::weeks(12),
            TimeRange::Month => Duration::days(365),
        }
    }
}

/// One timestamped observation in a trend series
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InventoryTrendPoint {
    pub timestamp: DateTime<Utc>,
    pub quantity: i64,
    pub restock_count: i64,
    pub low_stock_count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductTrend {
    pub product_id: i64,
    pub product_name: String,
    pub trend_data: Vec<InventoryTrendPoint>,
    pub average_quantity: f64,
    pub restock_frequency: f64,
    pub stock_out_frequency: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoreTrend {
    pub store_id: i64,
    pub store_name: String,
    pub trend_data: Vec<InventoryTrendPoint>,
    pub average_inventory_level: f64,
    pub peak_inventory_date: DateTime<Utc>,
    pub low_inventory_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryTrend {
    pub category: String,
    pub trend_data: Vec<InventoryTrendPoint>,
    pub growth_rate: f64,
    /// Reserved; no seasonal detection is performed
    pub seasonal_pattern: Option<String>,
}

/// Full trend analysis over a resolved window
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrendAnalysis {
    pub time_range: TimeRange,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub products: Vec<ProductTrend>,
    pub stores: Vec<StoreTrend>,
    pub categories: Vec<CategoryTrend>,
    pub overall_growth_rate: f64,
    pub peak_period: DateTime<Utc>,
    pub low_period: DateTime<Utc>,
    pub recommendations: Vec<String>,
}

/// Trend request filters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendQuery {
    pub time_range: TimeRange,
    #[serde(default, deserialize_with = "crate::types::deserialize_optional_timestamp")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "crate::types::deserialize_optional_timestamp")]
    pub end_date: Option<DateTime<Utc>>,
    pub category: Option<String>,
    #[serde(default, deserialize_with = "crate::types::deserialize_optional_i64")]
    pub store_id: Option<i64>,
    #[serde(default, deserialize_with = "crate::types::deserialize_optional_i64")]
    pub product_id: Option<i64>,
}

/// Daily summary request filters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DailySummaryQuery {
    #[serde(default, deserialize_with = "crate::types::deserialize_optional_timestamp")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "crate::types::deserialize_optional_timestamp")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "crate::types::deserialize_optional_i64")]
    pub store_id: Option<i64>,
    #[serde(default, deserialize_with = "crate::types::deserialize_optional_i64")]
    pub product_id: Option<i64>,
}

/// Reorder calculation request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ReorderCalculation {
    #[validate(range(min = 1, max = 3650, message = "days_of_sales must be between 1 and 3650"))]
    pub days_of_sales: i32,
    pub store_id: Option<i64>,
    pub product_id: Option<i64>,
}

/// Suggested purchase quantity for one inventory record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReorderSuggestion {
    pub product_id: i64,
    pub product_name: String,
    pub product_sku: String,
    pub store_id: i64,
    pub store_name: String,
    pub current_quantity: i32,
    pub suggested_order: i64,
    pub days_of_sales: i32,
    pub total_sales: i64,
    pub average_daily_sales: f64,
}
