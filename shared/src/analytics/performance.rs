//! Product, store and regional performance roll-ups

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::analytics::{guarded_ratio, region_label};
use crate::models::{
    InventoryRecord, Product, ProductPerformance, RegionalTrends, Store, StorePerformance,
};

/// Totals over a group of inventory records
#[derive(Debug, Default)]
struct StockTotals {
    records: i64,
    quantity: i64,
    low_stock: i64,
    restocked: i64,
    products: BTreeSet<i64>,
    stores: BTreeSet<i64>,
}

impl StockTotals {
    fn add(&mut self, record: &InventoryRecord) {
        self.records += 1;
        self.quantity += i64::from(record.quantity);
        if record.is_low_stock() {
            self.low_stock += 1;
        }
        if record.was_restocked() {
            self.restocked += 1;
        }
        self.products.insert(record.product_id);
        self.stores.insert(record.store_id);
    }

    fn avg_quantity(&self) -> f64 {
        guarded_ratio(self.quantity, self.records)
    }
}

fn totals_by<F>(inventory: &[InventoryRecord], key: F) -> HashMap<i64, StockTotals>
where
    F: Fn(&InventoryRecord) -> i64,
{
    let mut totals: HashMap<i64, StockTotals> = HashMap::new();
    for record in inventory {
        totals.entry(key(record)).or_default().add(record);
    }
    totals
}

/// Per-product roll-up, optionally restricted to one category.
///
/// Products without inventory are omitted; output is in product id order.
pub fn product_performance(
    products: &[Product],
    inventory: &[InventoryRecord],
    category: Option<&str>,
) -> Vec<ProductPerformance> {
    let totals = totals_by(inventory, |r| r.product_id);

    let mut selected: Vec<&Product> = products
        .iter()
        .filter(|p| category.map_or(true, |c| p.category.as_deref() == Some(c)))
        .collect();
    selected.sort_by_key(|p| p.id);

    selected
        .into_iter()
        .filter_map(|product| {
            let t = totals.get(&product.id)?;
            Some(ProductPerformance {
                product_id: product.id,
                product_name: product.name.clone(),
                product_sku: product.sku.clone(),
                total_quantity: t.quantity,
                store_count: t.stores.len() as i64,
                low_stock_count: t.low_stock,
                avg_quantity: t.avg_quantity(),
            })
        })
        .collect()
}

/// Per-store roll-up, optionally restricted to one region.
///
/// Stores without inventory are omitted; output is in store id order.
pub fn store_performance(
    stores: &[Store],
    inventory: &[InventoryRecord],
    region: Option<&str>,
) -> Vec<StorePerformance> {
    let totals = totals_by(inventory, |r| r.store_id);

    let mut selected: Vec<&Store> = stores
        .iter()
        .filter(|s| region.map_or(true, |r| s.region.as_deref() == Some(r)))
        .collect();
    selected.sort_by_key(|s| s.id);

    selected
        .into_iter()
        .filter_map(|store| {
            let t = totals.get(&store.id)?;
            Some(StorePerformance {
                store_id: store.id,
                store_name: store.name.clone(),
                store_location: store.location.clone(),
                region: store.region.clone(),
                total_products: t.products.len() as i64,
                total_quantity: t.quantity,
                low_stock_items: t.low_stock,
                restock_count: t.restocked,
                avg_quantity: t.avg_quantity(),
                inventory_value: 0.0,
            })
        })
        .collect()
}

/// Per-region roll-up, ordered by region label.
///
/// Only stores holding inventory count towards a region.
pub fn regional_trends(stores: &[Store], inventory: &[InventoryRecord]) -> Vec<RegionalTrends> {
    let regions: HashMap<i64, &str> = stores
        .iter()
        .map(|s| (s.id, region_label(s.region.as_deref())))
        .collect();

    let mut totals: BTreeMap<&str, StockTotals> = BTreeMap::new();
    for record in inventory {
        if let Some(region) = regions.get(&record.store_id) {
            totals.entry(*region).or_default().add(record);
        }
    }

    totals
        .into_iter()
        .map(|(region, t)| {
            let store_count = t.stores.len() as i64;
            let total_products = t.products.len() as i64;
            RegionalTrends {
                region: region.to_string(),
                store_count,
                total_products,
                total_quantity: t.quantity,
                avg_products_per_store: guarded_ratio(total_products, store_count),
                low_stock_percentage: guarded_ratio(t.low_stock, total_products) * 100.0,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn ts() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap()
    }

    fn product(id: i64, category: Option<&str>) -> Product {
        Product {
            id,
            sku: format!("SKU-{}", id),
            name: format!("Product {}", id),
            description: None,
            category: category.map(str::to_string),
            created_at: ts(),
            updated_at: ts(),
        }
    }

    fn store(id: i64, region: Option<&str>) -> Store {
        Store {
            id,
            name: format!("Store {}", id),
            location: "Main St".to_string(),
            region: region.map(str::to_string),
            created_at: ts(),
        }
    }

    fn record(product_id: i64, store_id: i64, quantity: i32, restocked: bool) -> InventoryRecord {
        InventoryRecord {
            id: product_id * 100 + store_id,
            product_id,
            store_id,
            quantity,
            reorder_point: Some(10),
            reorder_quantity: None,
            created_at: ts(),
            updated_at: ts(),
            last_restock_at: restocked.then(ts),
        }
    }

    #[test]
    fn product_rollup_filters_category_and_skips_unstocked() {
        let products = vec![
            product(1, Some("Toys")),
            product(2, Some("Food")),
            product(3, Some("Toys")),
        ];
        let inventory = vec![
            record(1, 1, 4, false),
            record(1, 2, 20, false),
            record(2, 1, 7, false),
        ];

        let perf = product_performance(&products, &inventory, Some("Toys"));
        assert_eq!(perf.len(), 1);
        assert_eq!(perf[0].product_id, 1);
        assert_eq!(perf[0].total_quantity, 24);
        assert_eq!(perf[0].store_count, 2);
        assert_eq!(perf[0].low_stock_count, 1);
        assert_eq!(perf[0].avg_quantity, 12.0);
    }

    #[test]
    fn store_rollup_counts_restocks() {
        let stores = vec![store(1, Some("West")), store(2, None)];
        let inventory = vec![
            record(1, 1, 4, true),
            record(2, 1, 30, false),
            record(1, 2, 50, true),
        ];

        let perf = store_performance(&stores, &inventory, None);
        assert_eq!(perf.len(), 2);
        assert_eq!(perf[0].total_products, 2);
        assert_eq!(perf[0].restock_count, 1);
        assert_eq!(perf[0].low_stock_items, 1);
        assert_eq!(perf[1].total_quantity, 50);

        let west = store_performance(&stores, &inventory, Some("West"));
        assert_eq!(west.len(), 1);
    }

    #[test]
    fn regional_rollup_merges_unspecified() {
        let stores = vec![store(1, None), store(2, Some("Unspecified")), store(3, Some("East"))];
        let inventory = vec![
            record(1, 1, 5, false),
            record(2, 1, 50, false),
            record(1, 2, 8, false),
            record(1, 3, 40, false),
        ];

        let trends = regional_trends(&stores, &inventory);
        assert_eq!(trends.len(), 2);
        assert_eq!(trends[0].region, "East");
        assert_eq!(trends[0].low_stock_percentage, 0.0);

        let unspecified = &trends[1];
        assert_eq!(unspecified.store_count, 2);
        assert_eq!(unspecified.total_products, 2);
        assert_eq!(unspecified.total_quantity, 63);
        assert_eq!(unspecified.avg_products_per_store, 1.0);
        assert_eq!(unspecified.low_stock_percentage, 100.0);
    }
}
