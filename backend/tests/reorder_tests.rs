//! Tests for reorder suggestions and low-stock predictions
//! Verifies the period-sales formula, ordering and the placeholder constants

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use shared::{
    average_daily_sales, days_until_reorder, predict_low_stock, sales_window, suggest_reorders,
    total_sales_in_window, InventoryRecord, InventoryWithDetails, ReorderCalculation,
    ReorderCandidate, SalesHistoryEntry, DEFAULT_REORDER_POINT, PLACEHOLDER_CONFIDENCE,
    PLACEHOLDER_DAILY_USAGE,
};
use validator::Validate;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 9, 30, 18, 0, 0).unwrap()
}

fn details(
    product_id: i64,
    store_id: i64,
    quantity: i32,
    reorder_point: Option<i32>,
) -> InventoryWithDetails {
    InventoryWithDetails {
        inventory: InventoryRecord {
            id: product_id * 10 + store_id,
            product_id,
            store_id,
            quantity,
            reorder_point,
            reorder_quantity: None,
            created_at: now(),
            updated_at: now(),
            last_restock_at: None,
        },
        product_name: format!("Item {}", product_id),
        product_sku: format!("ITM-{}", product_id),
        product_category: None,
        store_name: format!("Branch {}", store_id),
        store_location: "Harbour".to_string(),
    }
}

fn sale(product_id: i64, store_id: i64, quantity_sold: i32, days_ago: i64) -> SalesHistoryEntry {
    SalesHistoryEntry {
        id: days_ago,
        product_id,
        store_id,
        quantity_sold,
        sale_date: now() - Duration::days(days_ago),
        created_at: now(),
    }
}

// =============================================================================
// Reorder suggestions
// =============================================================================

mod reorder {
    use super::*;

    #[test]
    fn fifty_sold_against_twenty_on_hand_suggests_thirty() {
        let sales = vec![sale(1, 1, 20, 1), sale(1, 1, 30, 29), sale(1, 1, 100, 31)];
        let (start, end) = sales_window(30, now());
        let total = total_sales_in_window(&sales, 1, 1, start, end);
        assert_eq!(total, 50);

        let suggestions = suggest_reorders(
            vec![ReorderCandidate {
                inventory: details(1, 1, 20, Some(5)),
                total_sales: total,
            }],
            30,
        );

        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].suggested_order, 30);
        assert_eq!(suggestions[0].total_sales, 50);
        assert_eq!(suggestions[0].days_of_sales, 30);
        assert!((suggestions[0].average_daily_sales - 50.0 / 30.0).abs() < 1e-9);
    }

    #[test]
    fn sales_for_other_pairs_are_ignored() {
        let sales = vec![sale(1, 1, 5, 1), sale(1, 2, 7, 1), sale(2, 1, 9, 1)];
        let (start, end) = sales_window(7, now());
        assert_eq!(total_sales_in_window(&sales, 1, 1, start, end), 5);
    }

    #[test]
    fn well_stocked_records_are_dropped() {
        let suggestions = suggest_reorders(
            vec![ReorderCandidate {
                inventory: details(1, 1, 80, None),
                total_sales: 80,
            }],
            30,
        );
        assert!(suggestions.is_empty());
    }

    #[test]
    fn no_sales_means_zero_average() {
        assert_eq!(average_daily_sales(0, 30), 0.0);
    }

    #[test]
    fn days_of_sales_must_be_positive() {
        let calc = ReorderCalculation {
            days_of_sales: 0,
            store_id: None,
            product_id: None,
        };
        assert!(calc.validate().is_err());

        let calc = ReorderCalculation {
            days_of_sales: 30,
            store_id: Some(1),
            product_id: None,
        };
        assert!(calc.validate().is_ok());
    }
}

// =============================================================================
// Low-stock predictions
// =============================================================================

mod prediction {
    use super::*;

    #[test]
    fn restock_date_is_now_plus_whole_days() {
        let predictions = predict_low_stock(&[details(1, 1, 25, Some(10))], now());
        assert_eq!(predictions[0].predicted_days_until_reorder, 15.0);
        assert_eq!(predictions[0].recommended_restock_date, now() + Duration::days(15));
    }

    #[test]
    fn missing_reorder_point_uses_default() {
        let predictions = predict_low_stock(&[details(1, 1, 25, None)], now());
        assert_eq!(
            predictions[0].predicted_days_until_reorder,
            f64::from(25 - DEFAULT_REORDER_POINT)
        );
    }

    #[test]
    fn below_reorder_point_restocks_today() {
        let predictions = predict_low_stock(&[details(1, 1, 2, Some(10))], now());
        assert_eq!(predictions[0].predicted_days_until_reorder, 0.0);
        assert_eq!(predictions[0].recommended_restock_date, now());
    }
}

// =============================================================================
// Property tests
// =============================================================================

mod properties {
    use super::*;

    fn candidates_strategy() -> impl Strategy<Value = Vec<ReorderCandidate>> {
        prop::collection::vec((0i32..200, 0i64..400), 0..30).prop_map(|rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, (quantity, total_sales))| ReorderCandidate {
                    inventory: details(i as i64 + 1, 1, quantity, Some(10)),
                    total_sales,
                })
                .collect()
        })
    }

    proptest! {
        /// Only positive orders are suggested, largest first
        #[test]
        fn prop_suggestions_positive_and_sorted(
            candidates in candidates_strategy(),
            days in 1i32..365,
        ) {
            let suggestions = suggest_reorders(candidates, days);
            prop_assert!(suggestions.iter().all(|s| s.suggested_order > 0));
            prop_assert!(suggestions
                .windows(2)
                .all(|w| w[0].suggested_order >= w[1].suggested_order));
        }

        /// Suggested order equals period sales minus stock on hand
        #[test]
        fn prop_suggestion_formula(candidates in candidates_strategy()) {
            for s in suggest_reorders(candidates, 30) {
                prop_assert_eq!(s.suggested_order, s.total_sales - i64::from(s.current_quantity));
            }
        }

        /// Confidence is fixed and days until reorder never go negative
        #[test]
        fn prop_prediction_constants(
            quantity in 0i32..10_000,
            reorder_point in prop::option::of(0i32..1_000),
        ) {
            let predictions = predict_low_stock(&[details(1, 1, quantity, reorder_point)], now());
            prop_assert_eq!(predictions[0].confidence_score, PLACEHOLDER_CONFIDENCE);
            prop_assert!(predictions[0].predicted_days_until_reorder >= 0.0);
            prop_assert!(predictions[0].recommended_restock_date >= now());
        }

        /// Days until reorder is linear in stock above the reorder point
        #[test]
        fn prop_days_until_reorder_formula(quantity in 0i32..10_000, reorder_point in 0i32..1_000) {
            let days = days_until_reorder(quantity, Some(reorder_point), PLACEHOLDER_DAILY_USAGE);
            prop_assert_eq!(days, f64::from((quantity - reorder_point).max(0)));
        }
    }
}
