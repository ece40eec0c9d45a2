//! Purchase order service
//!
//! Orders move through `draft -> submitted -> approved -> received`, with
//! cancellation allowed before receipt. Receiving an order adds every line
//! item to the store's inventory in the same transaction as the status change.

use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool};

use crate::error::{AppError, AppResult};
use crate::services::ensure_exists;
use shared::{
    CreatePurchaseOrderInput, OrderStatus, Pagination, PurchaseOrder, PurchaseOrderDetails,
    PurchaseOrderItem,
};

/// Purchase order service
#[derive(Clone)]
pub struct PurchaseOrderService {
    db: PgPool,
}

/// Database row for an order header joined with its store and item total
#[derive(Debug, sqlx::FromRow)]
struct PurchaseOrderRow {
    id: i64,
    store_id: i64,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    submitted_at: Option<DateTime<Utc>>,
    approved_at: Option<DateTime<Utc>>,
    received_at: Option<DateTime<Utc>>,
    store_name: String,
    total_items: i64,
}

impl PurchaseOrderRow {
    fn into_order(self) -> AppResult<(PurchaseOrder, String, i64)> {
        let status = self
            .status
            .parse::<OrderStatus>()
            .map_err(|e| AppError::Internal(e.to_string()))?;
        let order = PurchaseOrder {
            id: self.id,
            store_id: self.store_id,
            status,
            created_at: self.created_at,
            updated_at: self.updated_at,
            submitted_at: self.submitted_at,
            approved_at: self.approved_at,
            received_at: self.received_at,
        };
        Ok((order, self.store_name, self.total_items))
    }
}

/// Database row for a line item joined with its product
#[derive(Debug, sqlx::FromRow)]
struct PurchaseOrderItemRow {
    id: i64,
    purchase_order_id: i64,
    product_id: i64,
    quantity: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    product_name: Option<String>,
    product_sku: Option<String>,
}

impl From<PurchaseOrderItemRow> for PurchaseOrderItem {
    fn from(row: PurchaseOrderItemRow) -> Self {
        PurchaseOrderItem {
            id: row.id,
            purchase_order_id: row.purchase_order_id,
            product_id: row.product_id,
            quantity: row.quantity,
            created_at: row.created_at,
            updated_at: row.updated_at,
            product_name: row.product_name,
            product_sku: row.product_sku,
        }
    }
}

/// Filters for listing purchase orders
#[derive(Debug, Default, Clone)]
pub struct PurchaseOrderFilter {
    pub store_id: Option<i64>,
    pub status: Option<OrderStatus>,
    pub page: Pagination,
}

const ORDER_SELECT: &str = r#"
    SELECT po.id, po.store_id, po.status, po.created_at, po.updated_at,
           po.submitted_at, po.approved_at, po.received_at,
           s.name AS store_name,
           COALESCE(SUM(poi.quantity), 0)::BIGINT AS total_items
    FROM purchase_orders po
    JOIN stores s ON s.id = po.store_id
    LEFT JOIN purchase_order_items poi ON poi.purchase_order_id = po.id
"#;

impl PurchaseOrderService {
    /// Create a new PurchaseOrderService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Create a draft order with its line items.
    ///
    /// The store and every product must exist; nothing is written otherwise.
    pub async fn create_order(
        &self,
        input: CreatePurchaseOrderInput,
    ) -> AppResult<PurchaseOrderDetails> {
        let mut tx = self.db.begin().await?;

        ensure_exists(&mut *tx, "stores", "Store", input.store_id).await?;

        let order_id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO purchase_orders (store_id, status)
            VALUES ($1, $2)
            RETURNING id
            "#,
        )
        .bind(input.store_id)
        .bind(OrderStatus::Draft.as_str())
        .fetch_one(&mut *tx)
        .await?;

        for item in &input.items {
            ensure_exists(
                &mut *tx,
                "products",
                &format!("Product {}", item.product_id),
                item.product_id,
            )
            .await?;

            sqlx::query(
                r#"
                INSERT INTO purchase_order_items (purchase_order_id, product_id, quantity)
                VALUES ($1, $2, $3)
                "#,
            )
            .bind(order_id)
            .bind(item.product_id)
            .bind(item.quantity)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        tracing::info!(
            order_id,
            store_id = input.store_id,
            items = input.items.len(),
            "purchase order created"
        );

        self.get_order(order_id).await
    }

    /// List orders with store names, items and totals, ordered by id
    pub async fn list_orders(
        &self,
        filter: &PurchaseOrderFilter,
    ) -> AppResult<Vec<PurchaseOrderDetails>> {
        let rows = sqlx::query_as::<_, PurchaseOrderRow>(&format!(
            r#"
            {}
            WHERE ($1::BIGINT IS NULL OR po.store_id = $1)
              AND ($2::TEXT IS NULL OR po.status = $2)
            GROUP BY po.id, s.name
            ORDER BY po.id
            OFFSET $3 LIMIT $4
            "#,
            ORDER_SELECT
        ))
        .bind(filter.store_id)
        .bind(filter.status.map(|s| s.as_str()))
        .bind(filter.page.skip)
        .bind(filter.page.limit)
        .fetch_all(&self.db)
        .await?;

        let mut orders = Vec::with_capacity(rows.len());
        for row in rows {
            let (order, store_name, total_items) = row.into_order()?;
            let items = fetch_items(&self.db, order.id).await?;
            orders.push(PurchaseOrderDetails {
                order,
                store_name,
                items,
                total_items,
            });
        }
        Ok(orders)
    }

    /// Get an order with its items
    pub async fn get_order(&self, order_id: i64) -> AppResult<PurchaseOrderDetails> {
        let row = sqlx::query_as::<_, PurchaseOrderRow>(&format!(
            r#"
            {}
            WHERE po.id = $1
            GROUP BY po.id, s.name
            "#,
            ORDER_SELECT
        ))
        .bind(order_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Purchase order".to_string()))?;

        let (order, store_name, total_items) = row.into_order()?;
        let items = fetch_items(&self.db, order_id).await?;

        Ok(PurchaseOrderDetails {
            order,
            store_name,
            items,
            total_items,
        })
    }

    /// Move an order to `next`, stamping the matching timestamp.
    ///
    /// Receiving increments inventory for every line item (creating records
    /// that do not exist yet) inside the transaction that holds the order
    /// row lock, so the status change and stock changes commit together.
    pub async fn update_status(
        &self,
        order_id: i64,
        next: OrderStatus,
    ) -> AppResult<PurchaseOrderDetails> {
        let mut tx = self.db.begin().await?;

        let (store_id, current): (i64, String) = sqlx::query_as(
            "SELECT store_id, status FROM purchase_orders WHERE id = $1 FOR UPDATE",
        )
        .bind(order_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Purchase order".to_string()))?;

        let current = current
            .parse::<OrderStatus>()
            .map_err(|e| AppError::Internal(e.to_string()))?;

        if !current.can_transition_to(next) {
            return Err(AppError::InvalidStateTransition(format!(
                "cannot move purchase order from {} to {}",
                current, next
            )));
        }

        let stamp_column = match next {
            OrderStatus::Submitted => Some("submitted_at"),
            OrderStatus::Approved => Some("approved_at"),
            OrderStatus::Received => Some("received_at"),
            OrderStatus::Draft | OrderStatus::Cancelled => None,
        };
        let stamp = stamp_column
            .map(|column| format!(", {} = NOW()", column))
            .unwrap_or_default();

        sqlx::query(&format!(
            "UPDATE purchase_orders SET status = $2, updated_at = NOW(){} WHERE id = $1",
            stamp
        ))
        .bind(order_id)
        .bind(next.as_str())
        .execute(&mut *tx)
        .await?;

        if next == OrderStatus::Received {
            receive_items(&mut *tx, order_id, store_id).await?;
        }

        tx.commit().await?;

        tracing::info!(order_id, from = %current, to = %next, "purchase order status changed");

        self.get_order(order_id).await
    }
}

/// Add each line item to the store's inventory with an atomic upsert
async fn receive_items(conn: &mut PgConnection, order_id: i64, store_id: i64) -> AppResult<()> {
    let items: Vec<(i64, i32)> = sqlx::query_as(
        r#"
        SELECT product_id, quantity
        FROM purchase_order_items
        WHERE purchase_order_id = $1
        ORDER BY id
        "#,
    )
    .bind(order_id)
    .fetch_all(&mut *conn)
    .await?;

    for (product_id, quantity) in items {
        sqlx::query(
            r#"
            INSERT INTO inventory (product_id, store_id, quantity, last_restock_at)
            VALUES ($1, $2, $3, NOW())
            ON CONFLICT (product_id, store_id) DO UPDATE
            SET quantity = inventory.quantity + EXCLUDED.quantity,
                last_restock_at = NOW(),
                updated_at = NOW()
            "#,
        )
        .bind(product_id)
        .bind(store_id)
        .bind(quantity)
        .execute(&mut *conn)
        .await?;

        tracing::debug!(order_id, product_id, store_id, quantity, "received line item");
    }

    Ok(())
}

async fn fetch_items(db: &PgPool, order_id: i64) -> AppResult<Vec<PurchaseOrderItem>> {
    let rows = sqlx::query_as::<_, PurchaseOrderItemRow>(
        r#"
        SELECT poi.id, poi.purchase_order_id, poi.product_id, poi.quantity,
               poi.created_at, poi.updated_at,
               p.name AS product_name, p.sku AS product_sku
        FROM purchase_order_items poi
        LEFT JOIN products p ON p.id = poi.product_id
        WHERE poi.purchase_order_id = $1
        ORDER BY poi.id
        "#,
    )
    .bind(order_id)
    .fetch_all(db)
    .await?;

    Ok(rows.into_iter().map(PurchaseOrderItem::from).collect())
}
