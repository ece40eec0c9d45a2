//! Analytics summary builder

use std::collections::{BTreeMap, HashMap};

use crate::analytics::region_label;
use crate::models::{AnalyticsSummary, InventoryRecord, Product, Store};

/// Number of entries in the top-stores and critical-products lists
pub const SUMMARY_TOP_N: usize = 5;

/// Build the overall analytics summary from a full table snapshot
pub fn build_summary(
    products: &[Product],
    stores: &[Store],
    inventory: &[InventoryRecord],
) -> AnalyticsSummary {
    let total_inventory = inventory.iter().map(|r| i64::from(r.quantity)).sum();
    let low_stock_items = inventory.iter().filter(|r| r.is_low_stock()).count() as i64;

    let mut stock_by_store: BTreeMap<i64, i64> = BTreeMap::new();
    let mut low_stock_by_product: BTreeMap<i64, i64> = BTreeMap::new();
    for record in inventory {
        *stock_by_store.entry(record.store_id).or_default() += i64::from(record.quantity);
        if record.is_low_stock() {
            *low_stock_by_product.entry(record.product_id).or_default() += 1;
        }
    }

    let store_names: HashMap<i64, &str> = stores.iter().map(|s| (s.id, s.name.as_str())).collect();
    let product_names: HashMap<i64, &str> =
        products.iter().map(|p| (p.id, p.name.as_str())).collect();

    let mut regional_distribution = BTreeMap::new();
    for store in stores {
        *regional_distribution
            .entry(region_label(store.region.as_deref()).to_string())
            .or_default() += 1;
    }

    AnalyticsSummary {
        total_products: products.len() as i64,
        total_stores: stores.len() as i64,
        total_inventory,
        low_stock_items,
        inventory_health_score: health_score(inventory.len() as i64, low_stock_items),
        top_performing_stores: top_ranked(stock_by_store, &store_names),
        critical_products: top_ranked(low_stock_by_product, &product_names),
        regional_distribution,
    }
}

/// Percentage of records that are not low-stock.
///
/// The record count is floored at 1, so an empty snapshot scores 100. The
/// low-stock count is clamped to `[0, total]`, keeping the score in `[0, 100]`.
pub fn health_score(total_records: i64, low_stock_records: i64) -> f64 {
    let total = total_records.max(1);
    let low = low_stock_records.clamp(0, total);
    (total - low) as f64 / total as f64 * 100.0
}

/// Names of the highest-scoring ids, score descending then id ascending.
/// Ids missing from `names` are skipped.
fn top_ranked(scores: BTreeMap<i64, i64>, names: &HashMap<i64, &str>) -> Vec<String> {
    let mut ranked: Vec<(i64, i64)> = scores
        .into_iter()
        .filter(|(id, _)| names.contains_key(id))
        .collect();
    // BTreeMap iteration is id-ascending; the stable sort keeps that order within ties
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
        .into_iter()
        .take(SUMMARY_TOP_N)
        .filter_map(|(id, _)| names.get(&id).map(|name| name.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn product(id: i64, name: &str) -> Product {
        let ts = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        Product {
            id,
            sku: format!("SKU-{}", id),
            name: name.to_string(),
            description: None,
            category: None,
            created_at: ts,
            updated_at: ts,
        }
    }

    fn store(id: i64, name: &str, region: Option<&str>) -> Store {
        Store {
            id,
            name: name.to_string(),
            location: "Somewhere".to_string(),
            region: region.map(str::to_string),
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    fn record(
        id: i64,
        product_id: i64,
        store_id: i64,
        quantity: i32,
        rp: Option<i32>,
    ) -> InventoryRecord {
        let ts = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        InventoryRecord {
            id,
            product_id,
            store_id,
            quantity,
            reorder_point: rp,
            reorder_quantity: None,
            created_at: ts,
            updated_at: ts,
            last_restock_at: None,
        }
    }

    #[test]
    fn empty_snapshot_is_healthy() {
        let summary = build_summary(&[], &[], &[]);
        assert_eq!(summary.total_inventory, 0);
        assert_eq!(summary.inventory_health_score, 100.0);
        assert!(summary.top_performing_stores.is_empty());
    }

    #[test]
    fn health_score_stays_in_percent_range() {
        assert_eq!(health_score(1, 5), 0.0);
        assert_eq!(health_score(4, -2), 100.0);
        assert_eq!(health_score(0, 3), 0.0);
        assert_eq!(health_score(4, 1), 75.0);
    }

    #[test]
    fn counts_low_stock_and_health() {
        let products = vec![product(1, "Widget"), product(2, "Gadget")];
        let stores = vec![store(1, "North", Some("EU")), store(2, "South", None)];
        let inventory = vec![
            record(1, 1, 1, 5, Some(10)),
            record(2, 2, 1, 15, Some(10)),
            record(3, 1, 2, 3, Some(10)),
            record(4, 2, 2, 100, None),
        ];

        let summary = build_summary(&products, &stores, &inventory);
        assert_eq!(summary.total_inventory, 123);
        assert_eq!(summary.low_stock_items, 2);
        assert_eq!(summary.inventory_health_score, 50.0);
        assert_eq!(summary.top_performing_stores, vec!["South", "North"]);
        assert_eq!(summary.critical_products, vec!["Widget"]);
        assert_eq!(summary.regional_distribution.get("EU"), Some(&1));
        assert_eq!(summary.regional_distribution.get("Unspecified"), Some(&1));
    }

    #[test]
    fn ties_rank_by_id() {
        let stores: Vec<Store> = (1..=7).map(|i| store(i, &format!("S{}", i), None)).collect();
        let inventory: Vec<InventoryRecord> =
            (1..=7).map(|i| record(i, 1, 8 - i, 10, None)).collect();

        let summary = build_summary(&[product(1, "Widget")], &stores, &inventory);
        assert_eq!(summary.top_performing_stores, vec!["S1", "S2", "S3", "S4", "S5"]);
    }
}
