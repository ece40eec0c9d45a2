//! Business logic services for the Inventory Analytics & Prediction System

pub mod analytics;
pub mod inventory;
pub mod product;
pub mod purchase_order;
pub mod reporting;
pub mod store;

pub use analytics::AnalyticsService;
pub use inventory::InventoryService;
pub use product::ProductService;
pub use purchase_order::PurchaseOrderService;
pub use reporting::ReportingService;
pub use store::StoreService;

use crate::error::{AppError, AppResult};

/// Fail with `NotFound(resource)` unless `table` has a row with `id`
pub(crate) async fn ensure_exists<'e, E>(
    executor: E,
    table: &str,
    resource: &str,
    id: i64,
) -> AppResult<()>
where
    E: sqlx::PgExecutor<'e>,
{
    let exists: bool = sqlx::query_scalar(&format!(
        "SELECT EXISTS(SELECT 1 FROM {} WHERE id = $1)",
        table
    ))
    .bind(id)
    .fetch_one(executor)
    .await?;

    if !exists {
        return Err(AppError::NotFound(resource.to_string()));
    }
    Ok(())
}
