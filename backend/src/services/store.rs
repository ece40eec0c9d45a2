//! Store management service

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use shared::{
    non_empty, CreateStoreInput, Pagination, Store, StoreWithInventoryCount, UpdateStoreInput,
};

/// Store service for managing stores and their inventory statistics
#[derive(Clone)]
pub struct StoreService {
    db: PgPool,
}

/// Database row for a store
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct StoreRow {
    id: i64,
    name: String,
    location: String,
    region: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<StoreRow> for Store {
    fn from(row: StoreRow) -> Self {
        Store {
            id: row.id,
            name: row.name,
            location: row.location,
            region: row.region,
            created_at: row.created_at,
        }
    }
}

/// Database row for a store joined with inventory aggregates
#[derive(Debug, sqlx::FromRow)]
struct StoreStatsRow {
    #[sqlx(flatten)]
    store: StoreRow,
    total_products: i64,
    total_items: i64,
}

impl From<StoreStatsRow> for StoreWithInventoryCount {
    fn from(row: StoreStatsRow) -> Self {
        StoreWithInventoryCount {
            store: row.store.into(),
            total_products: row.total_products,
            total_items: row.total_items,
        }
    }
}

/// Filters for listing stores
#[derive(Debug, Default, Clone)]
pub struct StoreFilter {
    pub region: Option<String>,
    pub search: Option<String>,
    pub page: Pagination,
}

pub(crate) const STORE_COLUMNS: &str = "id, name, location, region, created_at";

const STORE_STATS_QUERY: &str = r#"
    SELECT s.id, s.name, s.location, s.region, s.created_at,
           COUNT(DISTINCT i.product_id) AS total_products,
           COALESCE(SUM(i.quantity), 0)::BIGINT AS total_items
    FROM stores s
    LEFT JOIN inventory i ON i.store_id = s.id
"#;

impl StoreService {
    /// Create a new StoreService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Create a store; a duplicate name is rejected
    pub async fn create_store(&self, input: CreateStoreInput) -> AppResult<Store> {
        let row = sqlx::query_as::<_, StoreRow>(&format!(
            r#"
            INSERT INTO stores (name, location, region)
            VALUES ($1, $2, $3)
            RETURNING {}
            "#,
            STORE_COLUMNS
        ))
        .bind(input.name.trim())
        .bind(input.location.trim())
        .bind(non_empty(input.region))
        .fetch_one(&self.db)
        .await
        .map_err(|e| AppError::from_constraint(e, "name", "Store"))?;

        tracing::info!(store_id = row.id, name = %row.name, "store created");
        Ok(row.into())
    }

    /// List stores ordered by id
    pub async fn list_stores(&self, filter: &StoreFilter) -> AppResult<Vec<Store>> {
        let pattern = filter.search.as_ref().map(|s| format!("%{}%", s));

        let rows = sqlx::query_as::<_, StoreRow>(&format!(
            r#"
            SELECT {}
            FROM stores
            WHERE ($1::TEXT IS NULL OR region = $1)
              AND ($2::TEXT IS NULL OR name ILIKE $2 OR location ILIKE $2)
            ORDER BY id
            OFFSET $3 LIMIT $4
            "#,
            STORE_COLUMNS
        ))
        .bind(&filter.region)
        .bind(pattern)
        .bind(filter.page.skip)
        .bind(filter.page.limit)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Store::from).collect())
    }

    /// Get a store by ID
    pub async fn get_store(&self, store_id: i64) -> AppResult<Store> {
        sqlx::query_as::<_, StoreRow>(&format!(
            "SELECT {} FROM stores WHERE id = $1",
            STORE_COLUMNS
        ))
        .bind(store_id)
        .fetch_optional(&self.db)
        .await?
        .map(Store::from)
        .ok_or_else(|| AppError::NotFound("Store".to_string()))
    }

    /// Stores with distinct product counts and summed quantities
    pub async fn list_store_stats(
        &self,
        region: Option<&str>,
    ) -> AppResult<Vec<StoreWithInventoryCount>> {
        let rows = sqlx::query_as::<_, StoreStatsRow>(&format!(
            r#"
            {}
            WHERE ($1::TEXT IS NULL OR s.region = $1)
            GROUP BY s.id
            ORDER BY s.id
            "#,
            STORE_STATS_QUERY
        ))
        .bind(region)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(StoreWithInventoryCount::from).collect())
    }

    /// Inventory statistics for one store
    pub async fn get_store_stats(&self, store_id: i64) -> AppResult<StoreWithInventoryCount> {
        sqlx::query_as::<_, StoreStatsRow>(&format!(
            r#"
            {}
            WHERE s.id = $1
            GROUP BY s.id
            "#,
            STORE_STATS_QUERY
        ))
        .bind(store_id)
        .fetch_optional(&self.db)
        .await?
        .map(StoreWithInventoryCount::from)
        .ok_or_else(|| AppError::NotFound("Store".to_string()))
    }

    /// Update a store; absent fields are left unchanged
    pub async fn update_store(&self, store_id: i64, input: UpdateStoreInput) -> AppResult<Store> {
        let row = sqlx::query_as::<_, StoreRow>(&format!(
            r#"
            UPDATE stores
            SET name = COALESCE($2, name),
                location = COALESCE($3, location),
                region = COALESCE($4, region)
            WHERE id = $1
            RETURNING {}
            "#,
            STORE_COLUMNS
        ))
        .bind(store_id)
        .bind(input.name.as_deref().map(str::trim))
        .bind(input.location.as_deref().map(str::trim))
        .bind(&input.region)
        .fetch_optional(&self.db)
        .await
        .map_err(|e| AppError::from_constraint(e, "name", "Store"))?
        .ok_or_else(|| AppError::NotFound("Store".to_string()))?;

        Ok(row.into())
    }

    /// Delete a store; blocked while inventory, sales or orders reference it
    pub async fn delete_store(&self, store_id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM stores WHERE id = $1")
            .bind(store_id)
            .execute(&self.db)
            .await
            .map_err(|e| AppError::from_constraint(e, "id", "Store"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Store".to_string()));
        }

        tracing::info!(store_id, "store deleted");
        Ok(())
    }
}
