//! HTTP handlers for purchase order endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Response,
    Json,
};
use serde::Deserialize;
use validator::Validate;

use crate::error::AppResult;
use crate::handlers::{json_or_csv, pagination};
use crate::services::{
    purchase_order::PurchaseOrderFilter, AnalyticsService, PurchaseOrderService,
};
use crate::AppState;
use shared::{
    CreatePurchaseOrderInput, OrderStatus, PurchaseOrderDetails, ReorderCalculation,
    UpdatePurchaseOrderInput,
};

#[derive(Debug, Deserialize)]
pub struct ListPurchaseOrdersQuery {
    #[serde(default, deserialize_with = "shared::deserialize_optional_i64")]
    pub store_id: Option<i64>,
    pub status: Option<OrderStatus>,
    #[serde(default, deserialize_with = "shared::deserialize_optional_i64")]
    pub skip: Option<i64>,
    #[serde(default, deserialize_with = "shared::deserialize_optional_i64")]
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct ExportFormatQuery {
    pub format: Option<String>,
}

/// Create a draft purchase order
pub async fn create_purchase_order(
    State(state): State<AppState>,
    Json(input): Json<CreatePurchaseOrderInput>,
) -> AppResult<(StatusCode, Json<PurchaseOrderDetails>)> {
    input.validate()?;

    let service = PurchaseOrderService::new(state.db);
    let order = service.create_order(input).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// List purchase orders
pub async fn list_purchase_orders(
    State(state): State<AppState>,
    Query(query): Query<ListPurchaseOrdersQuery>,
) -> AppResult<Json<Vec<PurchaseOrderDetails>>> {
    let filter = PurchaseOrderFilter {
        store_id: query.store_id,
        status: query.status,
        page: pagination(query.skip, query.limit)?,
    };

    let service = PurchaseOrderService::new(state.db);
    let orders = service.list_orders(&filter).await?;
    Ok(Json(orders))
}

/// Get a purchase order with its items
pub async fn get_purchase_order(
    State(state): State<AppState>,
    Path(order_id): Path<i64>,
) -> AppResult<Json<PurchaseOrderDetails>> {
    let service = PurchaseOrderService::new(state.db);
    let order = service.get_order(order_id).await?;
    Ok(Json(order))
}

/// Change a purchase order's status; receiving it restocks the store
pub async fn update_purchase_order(
    State(state): State<AppState>,
    Path(order_id): Path<i64>,
    Json(input): Json<UpdatePurchaseOrderInput>,
) -> AppResult<Json<PurchaseOrderDetails>> {
    let service = PurchaseOrderService::new(state.db);
    let order = match input.status {
        Some(status) => service.update_status(order_id, status).await?,
        None => service.get_order(order_id).await?,
    };
    Ok(Json(order))
}

/// Reorder suggestions from trailing sales
pub async fn calculate_reorder(
    State(state): State<AppState>,
    Query(query): Query<ExportFormatQuery>,
    Json(calculation): Json<ReorderCalculation>,
) -> AppResult<Response> {
    calculation.validate()?;

    let service = AnalyticsService::new(state.db);
    let suggestions = service.calculate_reorder(&calculation).await?;
    json_or_csv(suggestions, query.format.as_deref(), "reorder_suggestions")
}
