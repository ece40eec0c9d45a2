//! WebAssembly module for the Inventory Analytics dashboard
//!
//! Provides client-side computation for:
//! - Low-stock classification and health scores
//! - Growth rates and reorder timing
//! - Reorder suggestions, trend analysis and daily rollups over JSON rows

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};
use validator::Validate;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::analytics;
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

/// Current time from the browser clock
#[cfg(target_arch = "wasm32")]
fn now() -> DateTime<Utc> {
    DateTime::from_timestamp_millis(js_sys::Date::now() as i64).unwrap_or_default()
}

#[cfg(not(target_arch = "wasm32"))]
fn now() -> DateTime<Utc> {
    Utc::now()
}

#[cfg(target_arch = "wasm32")]
fn warn(message: &str) {
    web_sys::console::warn_1(&JsValue::from_str(message));
}

#[cfg(not(target_arch = "wasm32"))]
fn warn(_message: &str) {}

fn parse_json<T: DeserializeOwned>(json: &str, what: &str) -> Result<T, String> {
    serde_json::from_str(json).map_err(|e| {
        let message = format!("Invalid {} JSON: {}", what, e);
        warn(&message);
        message
    })
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| e.to_string())
}

fn js_error(message: String) -> JsValue {
    JsValue::from_str(&message)
}

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {}

/// Whether a stock level is at or below its reorder point
#[wasm_bindgen]
pub fn check_low_stock(quantity: i32, reorder_point: Option<i32>) -> bool {
    is_low_stock(quantity, reorder_point)
}

/// Percentage of records that are not low-stock
#[wasm_bindgen]
pub fn inventory_health_score(total_records: u32, low_stock_records: u32) -> f64 {
    analytics::health_score(i64::from(total_records), i64::from(low_stock_records))
}

/// Percentage change from `first` to `last`
#[wasm_bindgen]
pub fn growth_rate_percent(first: i32, last: i32) -> f64 {
    analytics::growth_rate(i64::from(first), i64::from(last))
}

/// Placeholder estimate of days until stock reaches the reorder point
#[wasm_bindgen]
pub fn predict_days_until_reorder(quantity: i32, reorder_point: Option<i32>) -> f64 {
    analytics::days_until_reorder(
        quantity,
        reorder_point,
        analytics::PLACEHOLDER_DAILY_USAGE,
    )
}

/// Reorder suggestions from inventory rows and raw sales history.
///
/// `inventory_json` is a list of inventory records with details and
/// `sales_json` a list of sales entries.
#[wasm_bindgen]
pub fn suggest_reorders_json(
    inventory_json: &str,
    sales_json: &str,
    days_of_sales: i32,
) -> Result<String, JsValue> {
    reorders_from_json(inventory_json, sales_json, days_of_sales).map_err(js_error)
}

/// Trend analysis over inventory rows, filtered by a trend query
#[wasm_bindgen]
pub fn analyze_trends_json(rows_json: &str, query_json: &str) -> Result<String, JsValue> {
    trends_from_json(rows_json, query_json).map_err(js_error)
}

/// Daily rollup over inventory records
#[wasm_bindgen]
pub fn daily_rollup_json(records_json: &str) -> Result<String, JsValue> {
    let records: Vec<InventoryRecord> = parse_json(records_json, "inventory").map_err(js_error)?;
    to_json(&analytics::daily_rollup(&records)).map_err(js_error)
}

fn reorders_from_json(
    inventory_json: &str,
    sales_json: &str,
    days_of_sales: i32,
) -> Result<String, String> {
    let calculation = ReorderCalculation {
        days_of_sales,
        store_id: None,
        product_id: None,
    };
    calculation.validate().map_err(|e| e.to_string())?;
    let inventory: Vec<InventoryWithDetails> = parse_json(inventory_json, "inventory")?;
    let sales: Vec<SalesHistoryEntry> = parse_json(sales_json, "sales")?;

    let (start, end) = analytics::sales_window(days_of_sales, now());
    let candidates = inventory
        .into_iter()
        .map(|detail| analytics::ReorderCandidate {
            total_sales: analytics::total_sales_in_window(
                &sales,
                detail.inventory.product_id,
                detail.inventory.store_id,
                start,
                end,
            ),
            inventory: detail,
        })
        .collect();

    to_json(&analytics::suggest_reorders(candidates, days_of_sales))
}

fn trends_from_json(rows_json: &str, query_json: &str) -> Result<String, String> {
    let rows: Vec<InventoryWithDetails> = parse_json(rows_json, "inventory")?;
    let query: TrendQuery = parse_json(query_json, "query")?;
    validate_date_window(query.start_date, query.end_date)?;

    let (start, end) =
        analytics::resolve_window(query.time_range, query.start_date, query.end_date, now());
    let selected: Vec<InventoryWithDetails> = rows
        .into_iter()
        .filter(|row| query.matches(row, start, end))
        .collect();

    to_json(&analytics::analyze_trends(
        query.time_range,
        start,
        end,
        &selected,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use serde_json::json;

    fn inventory_row(
        product_id: i64,
        quantity: i32,
        updated_at: DateTime<Utc>,
    ) -> serde_json::Value {
        json!({
            "id": product_id,
            "product_id": product_id,
            "store_id": 1,
            "quantity": quantity,
            "reorder_point": 10,
            "reorder_quantity": null,
            "created_at": updated_at,
            "updated_at": updated_at,
            "last_restock_at": null,
            "product_name": format!("Item {}", product_id),
            "product_sku": format!("ITM-{}", product_id),
            "product_category": null,
            "store_name": "Central",
            "store_location": "Main St"
        })
    }

    #[test]
    fn low_stock_and_health() {
        assert!(check_low_stock(5, Some(10)));
        assert!(!check_low_stock(15, Some(10)));
        assert!(!check_low_stock(0, None));
        assert_eq!(inventory_health_score(0, 0), 100.0);
        assert_eq!(inventory_health_score(4, 1), 75.0);
    }

    #[test]
    fn growth_and_reorder_timing() {
        assert_eq!(growth_rate_percent(20, 30), 50.0);
        assert_eq!(growth_rate_percent(0, 30), 0.0);
        assert_eq!(predict_days_until_reorder(25, None), 15.0);
        assert_eq!(predict_days_until_reorder(3, Some(10)), 0.0);
    }

    #[test]
    fn reorder_suggestions_from_json() {
        let now = Utc::now();
        let inventory = json!([inventory_row(1, 20, now), inventory_row(2, 90, now)]).to_string();
        let sales = json!([
            {
                "id": 1,
                "product_id": 1,
                "store_id": 1,
                "quantity_sold": 50,
                "sale_date": now - Duration::days(3),
                "created_at": now
            },
            {
                "id": 2,
                "product_id": 2,
                "store_id": 1,
                "quantity_sold": 10,
                "sale_date": now - Duration::days(3),
                "created_at": now
            }
        ])
        .to_string();

        let output = suggest_reorders_json(&inventory, &sales, 30).unwrap();
        let suggestions: Vec<ReorderSuggestion> = serde_json::from_str(&output).unwrap();
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].product_id, 1);
        assert_eq!(suggestions[0].suggested_order, 30);
    }

    #[test]
    fn trend_analysis_from_json() {
        let now = Utc::now();
        let rows = json!([
            inventory_row(1, 10, now - Duration::days(2)),
            inventory_row(1, 0, now - Duration::days(1)),
            inventory_row(2, 5, now - Duration::days(400)),
        ])
        .to_string();
        let query = json!({ "time_range": "day", "product_id": 1 }).to_string();

        let output = analyze_trends_json(&rows, &query).unwrap();
        let analysis: TrendAnalysis = serde_json::from_str(&output).unwrap();
        assert_eq!(analysis.products.len(), 1);
        assert_eq!(analysis.products[0].trend_data.len(), 2);
        assert_eq!(analysis.overall_growth_rate, -100.0);
        assert_eq!(
            analysis.recommendations,
            vec!["Increase reorder point for Item 1 to reduce stock outs".to_string()]
        );
    }

    #[test]
    fn daily_rollup_from_json() {
        let day = Utc::now() - Duration::days(1);
        let records = json!([inventory_row(1, 4, day), inventory_row(2, 6, day)]).to_string();
        let output = daily_rollup_json(&records).unwrap();
        let points: Vec<InventoryTrendPoint> = serde_json::from_str(&output).unwrap();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].quantity, 10);
        assert_eq!(points[0].low_stock_count, 2);
    }

    #[test]
    fn window_outside_allowed_days_is_rejected() {
        assert!(reorders_from_json("[]", "[]", 0).is_err());
        assert!(reorders_from_json("[]", "[]", 3651).is_err());
        assert!(reorders_from_json("[]", "[]", 200_000_000).is_err());
        assert_eq!(suggest_reorders_json("[]", "[]", 3650).unwrap(), "[]");
    }

    #[test]
    fn malformed_input_is_reported() {
        let err = reorders_from_json("not json", "[]", 30).unwrap_err();
        assert!(err.starts_with("Invalid inventory JSON"));
        let err = trends_from_json(
            "[]",
            r#"{"time_range": "day", "start_date": "2024-02-01", "end_date": "2024-01-01"}"#,
        )
        .unwrap_err();
        assert_eq!(err, "start_date must not be after end_date");
    }

    #[test]
    fn extreme_inputs_stay_in_range() {
        assert_eq!(inventory_health_score(1, 5), 0.0);
        assert_eq!(predict_days_until_reorder(i32::MIN, Some(10)), 0.0);
        assert_eq!(
            predict_days_until_reorder(i32::MAX, Some(0)),
            f64::from(i32::MAX)
        );
    }
}
