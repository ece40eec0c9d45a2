//! HTTP handlers for inventory endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use validator::Validate;

use crate::error::AppResult;
use crate::handlers::pagination;
use crate::services::{inventory::InventoryFilter, InventoryService};
use crate::AppState;
use shared::{
    non_empty, CreateInventoryInput, InventoryRecord, InventoryWithDetails, RestockInput,
    UpdateInventoryInput,
};

#[derive(Debug, Deserialize)]
pub struct ListInventoryQuery {
    #[serde(default, deserialize_with = "shared::deserialize_optional_i64")]
    pub store_id: Option<i64>,
    #[serde(default, deserialize_with = "shared::deserialize_optional_i64")]
    pub product_id: Option<i64>,
    pub low_stock: Option<bool>,
    pub search: Option<String>,
    #[serde(default, deserialize_with = "shared::deserialize_optional_i64")]
    pub skip: Option<i64>,
    #[serde(default, deserialize_with = "shared::deserialize_optional_i64")]
    pub limit: Option<i64>,
}

/// Create an inventory record
pub async fn create_inventory(
    State(state): State<AppState>,
    Json(input): Json<CreateInventoryInput>,
) -> AppResult<(StatusCode, Json<InventoryRecord>)> {
    input.validate()?;

    let service = InventoryService::new(state.db);
    let record = service.create_inventory(input).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// List inventory with product and store details
pub async fn list_inventory(
    State(state): State<AppState>,
    Query(query): Query<ListInventoryQuery>,
) -> AppResult<Json<Vec<InventoryWithDetails>>> {
    let filter = InventoryFilter {
        store_id: query.store_id,
        product_id: query.product_id,
        low_stock: query.low_stock,
        search: non_empty(query.search),
        page: pagination(query.skip, query.limit)?,
    };

    let service = InventoryService::new(state.db);
    let records = service.list_inventory(&filter).await?;
    Ok(Json(records))
}

/// Get an inventory record with details
pub async fn get_inventory(
    State(state): State<AppState>,
    Path(inventory_id): Path<i64>,
) -> AppResult<Json<InventoryWithDetails>> {
    let service = InventoryService::new(state.db);
    let record = service.get_inventory(inventory_id).await?;
    Ok(Json(record))
}

/// Update an inventory record
pub async fn update_inventory(
    State(state): State<AppState>,
    Path(inventory_id): Path<i64>,
    Json(input): Json<UpdateInventoryInput>,
) -> AppResult<Json<InventoryRecord>> {
    input.validate()?;

    let service = InventoryService::new(state.db);
    let record = service.update_inventory(inventory_id, input).await?;
    Ok(Json(record))
}

/// Delete an inventory record
pub async fn delete_inventory(
    State(state): State<AppState>,
    Path(inventory_id): Path<i64>,
) -> AppResult<StatusCode> {
    let service = InventoryService::new(state.db);
    service.delete_inventory(inventory_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Add stock to an inventory record
pub async fn restock_inventory(
    State(state): State<AppState>,
    Path(inventory_id): Path<i64>,
    Json(input): Json<RestockInput>,
) -> AppResult<Json<InventoryRecord>> {
    input.validate()?;

    let service = InventoryService::new(state.db);
    let record = service.restock(inventory_id, input.quantity).await?;
    Ok(Json(record))
}

/// All low-stock records across stores
pub async fn get_low_stock_summary(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<InventoryWithDetails>>> {
    let service = InventoryService::new(state.db);
    let records = service.low_stock_summary().await?;
    Ok(Json(records))
}
