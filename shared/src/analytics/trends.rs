//! Trend analysis over inventory rows
//!
//! Rows are grouped by product, store and category in first-appearance order
//! of the `updated_at`-ordered input.

use std::collections::HashMap;
use std::hash::Hash;

use chrono::{DateTime, Utc};

use crate::analytics::{category_label, guarded_ratio};
use crate::models::{
    CategoryTrend, InventoryTrendPoint, InventoryWithDetails, ProductTrend, StoreTrend,
    TimeRange, TrendAnalysis, TrendQuery,
};

/// Stock-out frequency above which a product gets a reorder-point recommendation
pub const STOCK_OUT_RECOMMENDATION_THRESHOLD: f64 = 0.10;

/// Restock frequency above which a product gets a reorder-quantity recommendation
pub const RESTOCK_RECOMMENDATION_THRESHOLD: f64 = 0.50;

/// Resolve the analysis window, defaulting `end` to `now` and `start` to the
/// time range's lookback before `end`
pub fn resolve_window(
    time_range: TimeRange,
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> (DateTime<Utc>, DateTime<Utc>) {
    let end = end.unwrap_or(now);
    let start = start.unwrap_or(end - time_range.lookback());
    (start, end)
}

impl TrendQuery {
    /// Whether a row passes the query's filters inside `[start, end]`
    pub fn matches(
        &self,
        row: &InventoryWithDetails,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> bool {
        let inv = &row.inventory;
        inv.updated_at >= start
            && inv.updated_at <= end
            && self
                .category
                .as_deref()
                .map_or(true, |c| row.product_category.as_deref() == Some(c))
            && self.store_id.map_or(true, |id| inv.store_id == id)
            && self.product_id.map_or(true, |id| inv.product_id == id)
    }
}

/// Single-observation trend point for one row
pub fn trend_point(row: &InventoryWithDetails) -> InventoryTrendPoint {
    let inv = &row.inventory;
    InventoryTrendPoint {
        timestamp: inv.updated_at,
        quantity: i64::from(inv.quantity),
        restock_count: i64::from(inv.was_restocked()),
        low_stock_count: i64::from(inv.is_low_stock()),
    }
}

/// Percentage change from `first` to `last`; zero when `first` is not positive
pub fn growth_rate(first: i64, last: i64) -> f64 {
    if first > 0 {
        (last - first) as f64 / first as f64 * 100.0
    } else {
        0.0
    }
}

/// Growth between the chronologically first and last observations.
///
/// Fewer than two observations yield zero.
pub fn series_growth_rate(series: &[(DateTime<Utc>, i64)]) -> f64 {
    if series.len() < 2 {
        return 0.0;
    }
    let mut ordered = series.to_vec();
    ordered.sort_by_key(|(ts, _)| *ts);
    growth_rate(ordered[0].1, ordered[ordered.len() - 1].1)
}

/// Timestamps of the highest and lowest quantities.
///
/// Among equal maxima the last observation wins; among equal minima the
/// first one does.
pub fn peak_and_low(series: &[(DateTime<Utc>, i64)]) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let (first, rest) = series.split_first()?;
    let (mut peak, mut low) = (*first, *first);
    for obs in rest {
        if obs.1 >= peak.1 {
            peak = *obs;
        }
        if obs.1 < low.1 {
            low = *obs;
        }
    }
    Some((peak.0, low.0))
}

/// Rows grouped by key, preserving first-appearance order
struct Grouped<'a, K> {
    order: Vec<K>,
    rows: HashMap<K, Vec<&'a InventoryWithDetails>>,
}

fn group_rows<'a, K, F>(rows: &[&'a InventoryWithDetails], key: F) -> Grouped<'a, K>
where
    K: Eq + Hash + Clone,
    F: Fn(&InventoryWithDetails) -> K,
{
    let mut grouped = Grouped {
        order: Vec::new(),
        rows: HashMap::new(),
    };
    for row in rows {
        let k = key(row);
        let bucket = grouped.rows.entry(k.clone()).or_insert_with(|| {
            grouped.order.push(k);
            Vec::new()
        });
        bucket.push(*row);
    }
    grouped
}

impl<'a, K: Eq + Hash> Grouped<'a, K> {
    fn into_groups(mut self) -> impl Iterator<Item = (K, Vec<&'a InventoryWithDetails>)> {
        let order = std::mem::take(&mut self.order);
        order.into_iter().filter_map(move |k| {
            let rows = self.rows.remove(&k)?;
            Some((k, rows))
        })
    }
}

fn quantity_series(rows: &[&InventoryWithDetails]) -> Vec<(DateTime<Utc>, i64)> {
    rows.iter()
        .map(|r| (r.inventory.updated_at, i64::from(r.inventory.quantity)))
        .collect()
}

fn product_trends(rows: &[&InventoryWithDetails]) -> Vec<ProductTrend> {
    group_rows(rows, |r| r.inventory.product_id)
        .into_groups()
        .map(|(product_id, group)| {
            let periods = group.len() as i64;
            let total: i64 = group.iter().map(|r| i64::from(r.inventory.quantity)).sum();
            let restocks = group.iter().filter(|r| r.inventory.was_restocked()).count() as i64;
            let stock_outs = group.iter().filter(|r| r.inventory.is_stocked_out()).count() as i64;
            ProductTrend {
                product_id,
                product_name: group[0].product_name.clone(),
                trend_data: group.iter().map(|r| trend_point(r)).collect(),
                average_quantity: guarded_ratio(total, periods),
                restock_frequency: guarded_ratio(restocks, periods),
                stock_out_frequency: guarded_ratio(stock_outs, periods),
            }
        })
        .collect()
}

fn store_trends(rows: &[&InventoryWithDetails], fallback: DateTime<Utc>) -> Vec<StoreTrend> {
    group_rows(rows, |r| r.inventory.store_id)
        .into_groups()
        .map(|(store_id, group)| {
            let series = quantity_series(&group);
            let total: i64 = series.iter().map(|(_, q)| q).sum();
            let (peak, low) = peak_and_low(&series).unwrap_or((fallback, fallback));
            StoreTrend {
                store_id,
                store_name: group[0].store_name.clone(),
                trend_data: group.iter().map(|r| trend_point(r)).collect(),
                average_inventory_level: guarded_ratio(total, series.len() as i64),
                peak_inventory_date: peak,
                low_inventory_date: low,
            }
        })
        .collect()
}

fn category_trends(rows: &[&InventoryWithDetails]) -> Vec<CategoryTrend> {
    group_rows(rows, |r| category_label(r.product_category.as_deref()).to_string())
        .into_groups()
        .map(|(category, group)| CategoryTrend {
            category,
            trend_data: group.iter().map(|r| trend_point(r)).collect(),
            growth_rate: series_growth_rate(&quantity_series(&group)),
            seasonal_pattern: None,
        })
        .collect()
}

/// Recommendation messages, in product order.
///
/// The wording is matched by dashboard consumers; do not reword.
pub fn recommendations(products: &[ProductTrend]) -> Vec<String> {
    let mut messages = Vec::new();
    for product in products {
        if product.stock_out_frequency > STOCK_OUT_RECOMMENDATION_THRESHOLD {
            messages.push(format!(
                "Increase reorder point for {} to reduce stock outs",
                product.product_name
            ));
        }
        if product.restock_frequency > RESTOCK_RECOMMENDATION_THRESHOLD {
            messages.push(format!(
                "Review reorder quantity for {} to optimize restocking frequency",
                product.product_name
            ));
        }
    }
    messages
}

/// Analyze the rows of an already-resolved window.
///
/// `rows` should already be filtered to the window; they are re-sorted by
/// `updated_at` then id before grouping.
pub fn analyze_trends(
    time_range: TimeRange,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    rows: &[InventoryWithDetails],
) -> TrendAnalysis {
    let mut ordered: Vec<&InventoryWithDetails> = rows.iter().collect();
    ordered.sort_by_key(|r| (r.inventory.updated_at, r.inventory.id));

    let products = product_trends(&ordered);
    let stores = store_trends(&ordered, start);
    let categories = category_trends(&ordered);

    let overall = quantity_series(&ordered);
    let (peak_period, low_period) = peak_and_low(&overall).unwrap_or((end, start));
    let overall_growth_rate = series_growth_rate(&overall);

    let recommendations = recommendations(&products);

    TrendAnalysis {
        time_range,
        start_date: start,
        end_date: end,
        products,
        stores,
        categories,
        overall_growth_rate,
        peak_period,
        low_period,
        recommendations,
    }
}
