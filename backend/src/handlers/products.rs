//! HTTP handlers for product catalog endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use validator::Validate;

use crate::error::{check_field, AppResult};
use crate::handlers::pagination;
use crate::services::{product::ProductFilter, ProductService};
use crate::AppState;
use shared::{non_empty, validate_sku, CreateProductInput, Product, UpdateProductInput};

#[derive(Debug, Deserialize)]
pub struct ListProductsQuery {
    pub category: Option<String>,
    pub search: Option<String>,
    #[serde(default, deserialize_with = "shared::deserialize_optional_i64")]
    pub skip: Option<i64>,
    #[serde(default, deserialize_with = "shared::deserialize_optional_i64")]
    pub limit: Option<i64>,
}

/// Create a product
pub async fn create_product(
    State(state): State<AppState>,
    Json(input): Json<CreateProductInput>,
) -> AppResult<(StatusCode, Json<Product>)> {
    input.validate()?;
    check_field("sku", validate_sku(&input.sku))?;

    let service = ProductService::new(state.db);
    let product = service.create_product(input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// List products with optional category and text search
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ListProductsQuery>,
) -> AppResult<Json<Vec<Product>>> {
    let filter = ProductFilter {
        category: non_empty(query.category),
        search: non_empty(query.search),
        page: pagination(query.skip, query.limit)?,
    };

    let service = ProductService::new(state.db);
    let products = service.list_products(&filter).await?;
    Ok(Json(products))
}

/// Get a product
pub async fn get_product(
    State(state): State<AppState>,
    Path(product_id): Path<i64>,
) -> AppResult<Json<Product>> {
    let service = ProductService::new(state.db);
    let product = service.get_product(product_id).await?;
    Ok(Json(product))
}

/// Update a product
pub async fn update_product(
    State(state): State<AppState>,
    Path(product_id): Path<i64>,
    Json(input): Json<UpdateProductInput>,
) -> AppResult<Json<Product>> {
    input.validate()?;
    if let Some(sku) = input.sku.as_deref() {
        check_field("sku", validate_sku(sku))?;
    }

    let service = ProductService::new(state.db);
    let product = service.update_product(product_id, input).await?;
    Ok(Json(product))
}

/// Delete a product
pub async fn delete_product(
    State(state): State<AppState>,
    Path(product_id): Path<i64>,
) -> AppResult<StatusCode> {
    let service = ProductService::new(state.db);
    service.delete_product(product_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
