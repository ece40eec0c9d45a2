//! Reorder suggestion calculator
//!
//! `suggested_order = max(0, period_sales - current_quantity)`. The formula
//! deliberately ignores lead time and the record's reorder quantity.

use chrono::{DateTime, Duration, Utc};

use crate::models::{InventoryWithDetails, ReorderSuggestion, SalesHistoryEntry};

/// An inventory record with its summed sales over the lookback window
#[derive(Debug, Clone)]
pub struct ReorderCandidate {
    pub inventory: InventoryWithDetails,
    pub total_sales: i64,
}

/// Sales lookback window ending at `now`.
///
/// Windows reaching past the earliest representable instant start there.
pub fn sales_window(days_of_sales: i32, now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = now
        .checked_sub_signed(Duration::days(i64::from(days_of_sales)))
        .unwrap_or(DateTime::<Utc>::MIN_UTC);
    (start, now)
}

/// Sum of units sold for one (product, store) pair inside `[start, end]`
pub fn total_sales_in_window(
    sales: &[SalesHistoryEntry],
    product_id: i64,
    store_id: i64,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> i64 {
    sales
        .iter()
        .filter(|s| s.product_id == product_id && s.store_id == store_id)
        .filter(|s| s.sale_date >= start && s.sale_date <= end)
        .map(|s| i64::from(s.quantity_sold))
        .sum()
}

/// Units sold per day over the window; zero when nothing sold
pub fn average_daily_sales(total_sales: i64, days_of_sales: i32) -> f64 {
    if total_sales > 0 {
        total_sales as f64 / f64::from(days_of_sales.max(1))
    } else {
        0.0
    }
}

/// Suggestions for every candidate that needs stock, largest order first.
///
/// Equal orders keep their input order.
pub fn suggest_reorders(
    candidates: Vec<ReorderCandidate>,
    days_of_sales: i32,
) -> Vec<ReorderSuggestion> {
    let mut suggestions: Vec<ReorderSuggestion> = candidates
        .into_iter()
        .filter_map(|candidate| {
            let detail = candidate.inventory;
            let current = detail.inventory.quantity;
            let suggested_order = (candidate.total_sales - i64::from(current)).max(0);
            if suggested_order == 0 {
                return None;
            }
            Some(ReorderSuggestion {
                product_id: detail.inventory.product_id,
                product_name: detail.product_name,
                product_sku: detail.product_sku,
                store_id: detail.inventory.store_id,
                store_name: detail.store_name,
                current_quantity: current,
                suggested_order,
                days_of_sales,
                total_sales: candidate.total_sales,
                average_daily_sales: average_daily_sales(candidate.total_sales, days_of_sales),
            })
        })
        .collect();

    suggestions.sort_by(|a, b| b.suggested_order.cmp(&a.suggested_order));
    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::InventoryRecord;
    use chrono::TimeZone;

    fn candidate(id: i64, quantity: i32, total_sales: i64) -> ReorderCandidate {
        let ts = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        ReorderCandidate {
            inventory: InventoryWithDetails {
                inventory: InventoryRecord {
                    id,
                    product_id: id,
                    store_id: 1,
                    quantity,
                    reorder_point: Some(10),
                    reorder_quantity: Some(50),
                    created_at: ts,
                    updated_at: ts,
                    last_restock_at: None,
                },
                product_name: format!("Product {}", id),
                product_sku: format!("SKU-{}", id),
                product_category: None,
                store_name: "Central".to_string(),
                store_location: "Downtown".to_string(),
            },
            total_sales,
        }
    }

    #[test]
    fn fifty_sold_twenty_on_hand() {
        let suggestions = suggest_reorders(vec![candidate(1, 20, 50)], 30);
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].suggested_order, 30);
        assert!((suggestions[0].average_daily_sales - 50.0 / 30.0).abs() < 1e-9);
    }

    #[test]
    fn covered_stock_is_dropped() {
        let suggestions = suggest_reorders(vec![candidate(1, 60, 50), candidate(2, 0, 0)], 30);
        assert!(suggestions.is_empty());
    }

    #[test]
    fn sorted_largest_first_with_stable_ties() {
        let suggestions = suggest_reorders(
            vec![
                candidate(1, 0, 5),
                candidate(2, 0, 40),
                candidate(3, 10, 15),
                candidate(4, 0, 40),
            ],
            7,
        );
        let ids: Vec<i64> = suggestions.iter().map(|s| s.product_id).collect();
        assert_eq!(ids, vec![2, 4, 1, 3]);
    }

    #[test]
    fn window_sum_respects_pair_and_bounds() {
        let now = Utc.with_ymd_and_hms(2024, 6, 30, 0, 0, 0).unwrap();
        let (start, end) = sales_window(30, now);
        let sale = |id, product_id, store_id, qty, days_ago| SalesHistoryEntry {
            id,
            product_id,
            store_id,
            quantity_sold: qty,
            sale_date: now - Duration::days(days_ago),
            created_at: now,
        };
        let sales = vec![
            sale(1, 1, 1, 10, 1),
            sale(2, 1, 1, 15, 30),
            sale(3, 1, 1, 99, 31),
            sale(4, 1, 2, 99, 1),
            sale(5, 2, 1, 99, 1),
        ];
        assert_eq!(total_sales_in_window(&sales, 1, 1, start, end), 25);
    }

    #[test]
    fn oversized_window_starts_at_earliest_instant() {
        let now = Utc.with_ymd_and_hms(2024, 6, 30, 0, 0, 0).unwrap();
        let (start, end) = sales_window(200_000_000, now);
        assert_eq!(start, DateTime::<Utc>::MIN_UTC);
        assert_eq!(end, now);
    }
}
