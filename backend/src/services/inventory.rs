//! Inventory service for stock levels, restocking and low-stock listings

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::services::ensure_exists;
use shared::{
    CreateInventoryInput, InventoryRecord, InventoryWithDetails, Pagination, UpdateInventoryInput,
};

/// Inventory service for managing per-store stock records
#[derive(Clone)]
pub struct InventoryService {
    db: PgPool,
}

/// Database row for an inventory record
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct InventoryRow {
    id: i64,
    product_id: i64,
    store_id: i64,
    quantity: i32,
    reorder_point: Option<i32>,
    reorder_quantity: Option<i32>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    last_restock_at: Option<DateTime<Utc>>,
}

impl From<InventoryRow> for InventoryRecord {
    fn from(row: InventoryRow) -> Self {
        InventoryRecord {
            id: row.id,
            product_id: row.product_id,
            store_id: row.store_id,
            quantity: row.quantity,
            reorder_point: row.reorder_point,
            reorder_quantity: row.reorder_quantity,
            created_at: row.created_at,
            updated_at: row.updated_at,
            last_restock_at: row.last_restock_at,
        }
    }
}

/// Database row for an inventory record joined with product and store
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct InventoryDetailsRow {
    #[sqlx(flatten)]
    inventory: InventoryRow,
    product_name: String,
    product_sku: String,
    product_category: Option<String>,
    store_name: String,
    store_location: String,
}

impl From<InventoryDetailsRow> for InventoryWithDetails {
    fn from(row: InventoryDetailsRow) -> Self {
        InventoryWithDetails {
            inventory: row.inventory.into(),
            product_name: row.product_name,
            product_sku: row.product_sku,
            product_category: row.product_category,
            store_name: row.store_name,
            store_location: row.store_location,
        }
    }
}

pub(crate) const INVENTORY_COLUMNS: &str = "id, product_id, store_id, quantity, reorder_point, \
     reorder_quantity, created_at, updated_at, last_restock_at";

/// Inventory joined with product and store; callers append WHERE/ORDER BY
pub(crate) const INVENTORY_DETAILS_SELECT: &str = r#"
    SELECT i.id, i.product_id, i.store_id, i.quantity, i.reorder_point,
           i.reorder_quantity, i.created_at, i.updated_at, i.last_restock_at,
           p.name AS product_name, p.sku AS product_sku,
           p.category AS product_category,
           s.name AS store_name, s.location AS store_location
    FROM inventory i
    JOIN products p ON p.id = i.product_id
    JOIN stores s ON s.id = i.store_id
"#;

/// Filters for listing inventory
#[derive(Debug, Default, Clone)]
pub struct InventoryFilter {
    pub store_id: Option<i64>,
    pub product_id: Option<i64>,
    pub low_stock: Option<bool>,
    pub search: Option<String>,
    pub page: Pagination,
}

impl InventoryService {
    /// Create a new InventoryService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Create an inventory record for an existing product and store
    pub async fn create_inventory(
        &self,
        input: CreateInventoryInput,
    ) -> AppResult<InventoryRecord> {
        ensure_exists(&self.db, "products", "Product", input.product_id).await?;
        ensure_exists(&self.db, "stores", "Store", input.store_id).await?;

        let row = sqlx::query_as::<_, InventoryRow>(&format!(
            r#"
            INSERT INTO inventory (product_id, store_id, quantity, reorder_point, reorder_quantity)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            INVENTORY_COLUMNS
        ))
        .bind(input.product_id)
        .bind(input.store_id)
        .bind(input.quantity)
        .bind(input.reorder_point)
        .bind(input.reorder_quantity)
        .fetch_one(&self.db)
        .await
        .map_err(|e| AppError::from_constraint(e, "product_id, store_id", "Inventory"))?;

        tracing::info!(
            inventory_id = row.id,
            product_id = row.product_id,
            store_id = row.store_id,
            "inventory record created"
        );
        Ok(row.into())
    }

    /// List inventory with product and store details, ordered by id
    pub async fn list_inventory(
        &self,
        filter: &InventoryFilter,
    ) -> AppResult<Vec<InventoryWithDetails>> {
        let pattern = filter.search.as_ref().map(|s| format!("%{}%", s));

        let rows = sqlx::query_as::<_, InventoryDetailsRow>(&format!(
            r#"
            {}
            WHERE ($1::BIGINT IS NULL OR i.store_id = $1)
              AND ($2::BIGINT IS NULL OR i.product_id = $2)
              AND (NOT COALESCE($3::BOOLEAN, FALSE) OR i.quantity <= i.reorder_point)
              AND ($4::TEXT IS NULL
                   OR p.name ILIKE $4
                   OR p.sku ILIKE $4
                   OR s.name ILIKE $4)
            ORDER BY i.id
            OFFSET $5 LIMIT $6
            "#,
            INVENTORY_DETAILS_SELECT
        ))
        .bind(filter.store_id)
        .bind(filter.product_id)
        .bind(filter.low_stock)
        .bind(pattern)
        .bind(filter.page.skip)
        .bind(filter.page.limit)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(InventoryWithDetails::from).collect())
    }

    /// Get an inventory record with details by ID
    pub async fn get_inventory(&self, inventory_id: i64) -> AppResult<InventoryWithDetails> {
        sqlx::query_as::<_, InventoryDetailsRow>(&format!(
            "{} WHERE i.id = $1",
            INVENTORY_DETAILS_SELECT
        ))
        .bind(inventory_id)
        .fetch_optional(&self.db)
        .await?
        .map(InventoryWithDetails::from)
        .ok_or_else(|| AppError::NotFound("Inventory record".to_string()))
    }

    /// Update quantity or reorder settings; stamps `updated_at`
    pub async fn update_inventory(
        &self,
        inventory_id: i64,
        input: UpdateInventoryInput,
    ) -> AppResult<InventoryRecord> {
        let row = sqlx::query_as::<_, InventoryRow>(&format!(
            r#"
            UPDATE inventory
            SET quantity = COALESCE($2, quantity),
                reorder_point = COALESCE($3, reorder_point),
                reorder_quantity = COALESCE($4, reorder_quantity),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            INVENTORY_COLUMNS
        ))
        .bind(inventory_id)
        .bind(input.quantity)
        .bind(input.reorder_point)
        .bind(input.reorder_quantity)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Inventory record".to_string()))?;

        Ok(row.into())
    }

    /// Delete an inventory record
    pub async fn delete_inventory(&self, inventory_id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM inventory WHERE id = $1")
            .bind(inventory_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Inventory record".to_string()));
        }
        Ok(())
    }

    /// Add stock in a single UPDATE so concurrent restocks do not lose increments
    pub async fn restock(&self, inventory_id: i64, quantity: i32) -> AppResult<InventoryRecord> {
        let row = sqlx::query_as::<_, InventoryRow>(&format!(
            r#"
            UPDATE inventory
            SET quantity = quantity + $2,
                last_restock_at = NOW(),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            INVENTORY_COLUMNS
        ))
        .bind(inventory_id)
        .bind(quantity)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Inventory record".to_string()))?;

        tracing::info!(
            inventory_id,
            added = quantity,
            quantity = row.quantity,
            "inventory restocked"
        );
        Ok(row.into())
    }

    /// Every low-stock record across all stores
    pub async fn low_stock_summary(&self) -> AppResult<Vec<InventoryWithDetails>> {
        let rows = sqlx::query_as::<_, InventoryDetailsRow>(&format!(
            "{} WHERE i.quantity <= i.reorder_point ORDER BY i.id",
            INVENTORY_DETAILS_SELECT
        ))
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(InventoryWithDetails::from).collect())
    }
}
