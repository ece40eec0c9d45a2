//! Placeholder low-stock prediction
//!
//! The usage rate and confidence below are fixed stand-ins for a future
//! model, not values derived from sales history. Keep the formula as is so
//! results stay reproducible.

use chrono::{DateTime, Duration, Utc};

use crate::models::{InventoryWithDetails, LowStockPrediction};

/// Reorder point assumed when a record has none
pub const DEFAULT_REORDER_POINT: i32 = 10;

/// Assumed units consumed per day
pub const PLACEHOLDER_DAILY_USAGE: f64 = 1.0;

/// Confidence reported for every prediction
pub const PLACEHOLDER_CONFIDENCE: f64 = 0.8;

/// Days reported when the usage rate is not positive
pub const FALLBACK_DAYS_UNTIL_REORDER: f64 = 30.0;

/// Days until stock falls to the reorder point, never negative
pub fn days_until_reorder(quantity: i32, reorder_point: Option<i32>, daily_usage: f64) -> f64 {
    let reorder_point = reorder_point.unwrap_or(DEFAULT_REORDER_POINT);
    let days = if daily_usage > 0.0 {
        (f64::from(quantity) - f64::from(reorder_point)) / daily_usage
    } else {
        FALLBACK_DAYS_UNTIL_REORDER
    };
    days.max(0.0)
}

/// Predict reorder timing for each store's stock of one product
pub fn predict_low_stock(
    records: &[InventoryWithDetails],
    now: DateTime<Utc>,
) -> Vec<LowStockPrediction> {
    records
        .iter()
        .map(|detail| {
            let inv = &detail.inventory;
            let days = days_until_reorder(inv.quantity, inv.reorder_point, PLACEHOLDER_DAILY_USAGE);
            let recommended_restock_date = now
                .checked_add_signed(Duration::days(days.trunc() as i64))
                .unwrap_or(DateTime::<Utc>::MAX_UTC);
            LowStockPrediction {
                product_id: inv.product_id,
                product_name: detail.product_name.clone(),
                store_id: inv.store_id,
                store_name: detail.store_name.clone(),
                current_quantity: inv.quantity,
                predicted_days_until_reorder: days,
                confidence_score: PLACEHOLDER_CONFIDENCE,
                recommended_restock_date,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uses_default_reorder_point() {
        assert_eq!(days_until_reorder(25, None, PLACEHOLDER_DAILY_USAGE), 15.0);
        assert_eq!(days_until_reorder(25, Some(5), PLACEHOLDER_DAILY_USAGE), 20.0);
    }

    #[test]
    fn clamps_to_zero_below_reorder_point() {
        assert_eq!(days_until_reorder(3, Some(10), PLACEHOLDER_DAILY_USAGE), 0.0);
    }

    #[test]
    fn fractional_days_are_reported_unrounded() {
        assert_eq!(days_until_reorder(15, Some(10), 2.0), 2.5);
    }

    #[test]
    fn restock_date_truncates_fractional_days() {
        use chrono::TimeZone;

        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let row = InventoryWithDetails {
            inventory: crate::models::InventoryRecord {
                id: 1,
                product_id: 7,
                store_id: 3,
                quantity: 25,
                reorder_point: Some(10),
                reorder_quantity: None,
                created_at: now,
                updated_at: now,
                last_restock_at: None,
            },
            product_name: "Widget".to_string(),
            product_sku: "WID-1".to_string(),
            product_category: None,
            store_name: "Central".to_string(),
            store_location: "Main St".to_string(),
        };

        let predictions = predict_low_stock(&[row], now);
        assert_eq!(predictions[0].predicted_days_until_reorder, 15.0);
        assert_eq!(predictions[0].recommended_restock_date, now + Duration::days(15));
    }

    #[test]
    fn extreme_quantities_do_not_overflow() {
        assert_eq!(days_until_reorder(i32::MIN, Some(10), PLACEHOLDER_DAILY_USAGE), 0.0);
        assert_eq!(
            days_until_reorder(i32::MAX, Some(i32::MIN), PLACEHOLDER_DAILY_USAGE),
            f64::from(i32::MAX) - f64::from(i32::MIN)
        );
    }

    #[test]
    fn non_positive_usage_falls_back() {
        assert_eq!(days_until_reorder(100, Some(10), 0.0), FALLBACK_DAYS_UNTIL_REORDER);
    }
}
