//! HTTP handlers for store endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use validator::Validate;

use crate::error::{check_field, AppResult};
use crate::handlers::pagination;
use crate::services::{store::StoreFilter, StoreService};
use crate::AppState;
use shared::{
    non_empty, validate_not_blank, CreateStoreInput, Store, StoreWithInventoryCount,
    UpdateStoreInput,
};

#[derive(Debug, Deserialize)]
pub struct ListStoresQuery {
    pub region: Option<String>,
    pub search: Option<String>,
    #[serde(default, deserialize_with = "shared::deserialize_optional_i64")]
    pub skip: Option<i64>,
    #[serde(default, deserialize_with = "shared::deserialize_optional_i64")]
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct StoreStatsQuery {
    pub region: Option<String>,
}

/// Create a store
pub async fn create_store(
    State(state): State<AppState>,
    Json(input): Json<CreateStoreInput>,
) -> AppResult<(StatusCode, Json<Store>)> {
    input.validate()?;
    check_field("name", validate_not_blank(&input.name))?;
    check_field("location", validate_not_blank(&input.location))?;

    let service = StoreService::new(state.db);
    let store = service.create_store(input).await?;
    Ok((StatusCode::CREATED, Json(store)))
}

/// List stores with optional region and text search
pub async fn list_stores(
    State(state): State<AppState>,
    Query(query): Query<ListStoresQuery>,
) -> AppResult<Json<Vec<Store>>> {
    let filter = StoreFilter {
        region: non_empty(query.region),
        search: non_empty(query.search),
        page: pagination(query.skip, query.limit)?,
    };

    let service = StoreService::new(state.db);
    let stores = service.list_stores(&filter).await?;
    Ok(Json(stores))
}

/// Stores with inventory statistics
pub async fn list_store_stats(
    State(state): State<AppState>,
    Query(query): Query<StoreStatsQuery>,
) -> AppResult<Json<Vec<StoreWithInventoryCount>>> {
    let region = non_empty(query.region);
    let service = StoreService::new(state.db);
    let stats = service.list_store_stats(region.as_deref()).await?;
    Ok(Json(stats))
}

/// Get a store
pub async fn get_store(
    State(state): State<AppState>,
    Path(store_id): Path<i64>,
) -> AppResult<Json<Store>> {
    let service = StoreService::new(state.db);
    let store = service.get_store(store_id).await?;
    Ok(Json(store))
}

/// Inventory statistics for one store
pub async fn get_store_stats(
    State(state): State<AppState>,
    Path(store_id): Path<i64>,
) -> AppResult<Json<StoreWithInventoryCount>> {
    let service = StoreService::new(state.db);
    let stats = service.get_store_stats(store_id).await?;
    Ok(Json(stats))
}

/// Update a store
pub async fn update_store(
    State(state): State<AppState>,
    Path(store_id): Path<i64>,
    Json(input): Json<UpdateStoreInput>,
) -> AppResult<Json<Store>> {
    input.validate()?;

    let service = StoreService::new(state.db);
    let store = service.update_store(store_id, input).await?;
    Ok(Json(store))
}

/// Delete a store
pub async fn delete_store(
    State(state): State<AppState>,
    Path(store_id): Path<i64>,
) -> AppResult<StatusCode> {
    let service = StoreService::new(state.db);
    service.delete_store(store_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
