//! HTTP handlers for analytics endpoints

use axum::{
    extract::{Path, Query, State},
    response::Response,
    Json,
};
use serde::Deserialize;

use crate::error::{check_field, AppResult};
use crate::handlers::json_or_csv;
use crate::services::AnalyticsService;
use crate::AppState;
use shared::{
    non_empty, validate_date_window, AnalyticsSummary, DailySummaryQuery, InventoryTrendPoint,
    LowStockPrediction, TrendAnalysis, TrendQuery,
};

#[derive(Debug, Deserialize)]
pub struct ProductPerformanceQuery {
    pub category: Option<String>,
    pub format: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StorePerformanceQuery {
    pub region: Option<String>,
    pub format: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RegionalTrendsQuery {
    pub format: Option<String>,
}

/// Dashboard summary
pub async fn get_analytics_summary(
    State(state): State<AppState>,
) -> AppResult<Json<AnalyticsSummary>> {
    let service = AnalyticsService::new(state.db);
    let summary = service.summary().await?;
    Ok(Json(summary))
}

/// Per-product performance
pub async fn get_product_performance(
    State(state): State<AppState>,
    Query(query): Query<ProductPerformanceQuery>,
) -> AppResult<Response> {
    let category = non_empty(query.category);
    let service = AnalyticsService::new(state.db);
    let data = service.product_performance(category.as_deref()).await?;
    json_or_csv(data, query.format.as_deref(), "product_performance")
}

/// Per-store performance
pub async fn get_store_performance(
    State(state): State<AppState>,
    Query(query): Query<StorePerformanceQuery>,
) -> AppResult<Response> {
    let region = non_empty(query.region);
    let service = AnalyticsService::new(state.db);
    let data = service.store_performance(region.as_deref()).await?;
    json_or_csv(data, query.format.as_deref(), "store_performance")
}

/// Per-region roll-up
pub async fn get_regional_trends(
    State(state): State<AppState>,
    Query(query): Query<RegionalTrendsQuery>,
) -> AppResult<Response> {
    let service = AnalyticsService::new(state.db);
    let data = service.regional_trends().await?;
    json_or_csv(data, query.format.as_deref(), "regional_trends")
}

/// Low-stock predictions for one product
pub async fn get_product_predictions(
    State(state): State<AppState>,
    Path(product_id): Path<i64>,
) -> AppResult<Json<Vec<LowStockPrediction>>> {
    let service = AnalyticsService::new(state.db);
    let predictions = service.predictions(product_id).await?;
    Ok(Json(predictions))
}

/// Trend analysis
pub async fn get_trend_analysis(
    State(state): State<AppState>,
    Query(mut query): Query<TrendQuery>,
) -> AppResult<Json<TrendAnalysis>> {
    check_field(
        "start_date",
        validate_date_window(query.start_date, query.end_date),
    )?;
    query.category = non_empty(query.category);

    let service = AnalyticsService::new(state.db);
    let analysis = service.trends(&query).await?;
    Ok(Json(analysis))
}

/// Daily inventory rollup
pub async fn get_daily_summary(
    State(state): State<AppState>,
    Query(query): Query<DailySummaryQuery>,
) -> AppResult<Json<Vec<InventoryTrendPoint>>> {
    check_field(
        "start_date",
        validate_date_window(query.start_date, query.end_date),
    )?;

    let service = AnalyticsService::new(state.db);
    let points = service.daily_summary(&query).await?;
    Ok(Json(points))
}
