//! Analytics service
//!
//! Loads entity-store rows and hands them to `shared::analytics`. Every
//! request reads a fresh snapshot; nothing is cached between requests.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::error::AppResult;
use crate::services::inventory::{
    InventoryDetailsRow, InventoryRow, INVENTORY_COLUMNS, INVENTORY_DETAILS_SELECT,
};
use crate::services::product::{ProductRow, PRODUCT_COLUMNS};
use crate::services::store::{StoreRow, STORE_COLUMNS};
use shared::{
    analytics, AnalyticsSummary, DailySummaryQuery, InventoryRecord, InventoryTrendPoint,
    InventoryWithDetails, LowStockPrediction, Product, ProductPerformance, RegionalTrends,
    ReorderCalculation, ReorderCandidate, ReorderSuggestion, Store, StorePerformance,
    TrendAnalysis, TrendQuery,
};

/// Analytics service
#[derive(Clone)]
pub struct AnalyticsService {
    db: PgPool,
}

/// Entity-store snapshot used by the summary and performance roll-ups
struct Snapshot {
    products: Vec<Product>,
    stores: Vec<Store>,
    inventory: Vec<InventoryRecord>,
}

impl AnalyticsService {
    /// Create a new AnalyticsService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    async fn snapshot(&self) -> AppResult<Snapshot> {
        let products = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {} FROM products ORDER BY id",
            PRODUCT_COLUMNS
        ))
        .fetch_all(&self.db)
        .await?
        .into_iter()
        .map(Product::from)
        .collect();

        let stores = sqlx::query_as::<_, StoreRow>(&format!(
            "SELECT {} FROM stores ORDER BY id",
            STORE_COLUMNS
        ))
        .fetch_all(&self.db)
        .await?
        .into_iter()
        .map(Store::from)
        .collect();

        let inventory = sqlx::query_as::<_, InventoryRow>(&format!(
            "SELECT {} FROM inventory ORDER BY id",
            INVENTORY_COLUMNS
        ))
        .fetch_all(&self.db)
        .await?
        .into_iter()
        .map(InventoryRecord::from)
        .collect();

        Ok(Snapshot {
            products,
            stores,
            inventory,
        })
    }

    /// Dashboard summary over the whole entity store
    pub async fn summary(&self) -> AppResult<AnalyticsSummary> {
        let snapshot = self.snapshot().await?;
        let summary =
            analytics::build_summary(&snapshot.products, &snapshot.stores, &snapshot.inventory);

        tracing::debug!(
            records = snapshot.inventory.len(),
            low_stock = summary.low_stock_items,
            health = summary.inventory_health_score,
            "analytics summary computed"
        );
        Ok(summary)
    }

    /// Per-product stock roll-up, optionally restricted to one category
    pub async fn product_performance(
        &self,
        category: Option<&str>,
    ) -> AppResult<Vec<ProductPerformance>> {
        let snapshot = self.snapshot().await?;
        Ok(analytics::product_performance(
            &snapshot.products,
            &snapshot.inventory,
            category,
        ))
    }

    /// Per-store stock roll-up, optionally restricted to one region
    pub async fn store_performance(
        &self,
        region: Option<&str>,
    ) -> AppResult<Vec<StorePerformance>> {
        let snapshot = self.snapshot().await?;
        Ok(analytics::store_performance(
            &snapshot.stores,
            &snapshot.inventory,
            region,
        ))
    }

    /// Per-region roll-up
    pub async fn regional_trends(&self) -> AppResult<Vec<RegionalTrends>> {
        let snapshot = self.snapshot().await?;
        Ok(analytics::regional_trends(&snapshot.stores, &snapshot.inventory))
    }

    /// Low-stock predictions for a product in every store that stocks it
    pub async fn predictions(&self, product_id: i64) -> AppResult<Vec<LowStockPrediction>> {
        let rows = self
            .inventory_details(None, Some(product_id), None, None)
            .await?;
        Ok(analytics::predict_low_stock(&rows, Utc::now()))
    }

    /// Trend analysis over the resolved window
    pub async fn trends(&self, query: &TrendQuery) -> AppResult<TrendAnalysis> {
        let (start, end) = analytics::resolve_window(
            query.time_range,
            query.start_date,
            query.end_date,
            Utc::now(),
        );

        let rows = self
            .inventory_details(
                query.store_id,
                query.product_id,
                Some((start, end)),
                query.category.as_deref(),
            )
            .await?;

        tracing::debug!(
            rows = rows.len(),
            start = %start,
            end = %end,
            "computing trend analysis"
        );
        Ok(analytics::analyze_trends(query.time_range, start, end, &rows))
    }

    /// One point per day with data inside the window
    pub async fn daily_summary(
        &self,
        query: &DailySummaryQuery,
    ) -> AppResult<Vec<InventoryTrendPoint>> {
        let (start, end) = analytics::rollup_window(query.start_date, query.end_date, Utc::now());

        let records = sqlx::query_as::<_, InventoryRow>(&format!(
            r#"
            SELECT {}
            FROM inventory
            WHERE updated_at BETWEEN $1 AND $2
              AND ($3::BIGINT IS NULL OR store_id = $3)
              AND ($4::BIGINT IS NULL OR product_id = $4)
            ORDER BY updated_at, id
            "#,
            INVENTORY_COLUMNS
        ))
        .bind(start)
        .bind(end)
        .bind(query.store_id)
        .bind(query.product_id)
        .fetch_all(&self.db)
        .await?
        .into_iter()
        .map(InventoryRecord::from)
        .collect::<Vec<_>>();

        Ok(analytics::daily_rollup(&records))
    }

    /// Reorder suggestions from trailing sales totals
    pub async fn calculate_reorder(
        &self,
        calculation: &ReorderCalculation,
    ) -> AppResult<Vec<ReorderSuggestion>> {
        let (start, end) = analytics::sales_window(calculation.days_of_sales, Utc::now());

        let rows = self
            .inventory_details(calculation.store_id, calculation.product_id, None, None)
            .await?;

        let totals: HashMap<(i64, i64), i64> = sqlx::query_as::<_, (i64, i64, i64)>(
            r#"
            SELECT product_id, store_id, COALESCE(SUM(quantity_sold), 0)::BIGINT
            FROM sales_history
            WHERE sale_date BETWEEN $1 AND $2
              AND ($3::BIGINT IS NULL OR store_id = $3)
              AND ($4::BIGINT IS NULL OR product_id = $4)
            GROUP BY product_id, store_id
            "#,
        )
        .bind(start)
        .bind(end)
        .bind(calculation.store_id)
        .bind(calculation.product_id)
        .fetch_all(&self.db)
        .await?
        .into_iter()
        .map(|(product_id, store_id, total)| ((product_id, store_id), total))
        .collect();

        let candidates = rows
            .into_iter()
            .map(|inventory| {
                let key = (inventory.inventory.product_id, inventory.inventory.store_id);
                ReorderCandidate {
                    total_sales: totals.get(&key).copied().unwrap_or(0),
                    inventory,
                }
            })
            .collect();

        let suggestions = analytics::suggest_reorders(candidates, calculation.days_of_sales);
        tracing::info!(
            days_of_sales = calculation.days_of_sales,
            suggestions = suggestions.len(),
            "reorder suggestions calculated"
        );
        Ok(suggestions)
    }

    async fn inventory_details(
        &self,
        store_id: Option<i64>,
        product_id: Option<i64>,
        window: Option<(DateTime<Utc>, DateTime<Utc>)>,
        category: Option<&str>,
    ) -> AppResult<Vec<InventoryWithDetails>> {
        let (start, end) = window.unzip();

        let rows = sqlx::query_as::<_, InventoryDetailsRow>(&format!(
            r#"
            {}
            WHERE ($1::BIGINT IS NULL OR i.store_id = $1)
              AND ($2::BIGINT IS NULL OR i.product_id = $2)
              AND ($3::TIMESTAMPTZ IS NULL OR i.updated_at >= $3)
              AND ($4::TIMESTAMPTZ IS NULL OR i.updated_at <= $4)
              AND ($5::TEXT IS NULL OR p.category = $5)
            ORDER BY i.updated_at, i.id
            "#,
            INVENTORY_DETAILS_SELECT
        ))
        .bind(store_id)
        .bind(product_id)
        .bind(start)
        .bind(end)
        .bind(category)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(InventoryWithDetails::from).collect())
    }
}
