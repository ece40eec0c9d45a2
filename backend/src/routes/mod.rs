//! Route definitions for the Inventory Analytics & Prediction System

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/products", product_routes())
        .nest("/stores", store_routes())
        .nest("/inventory", inventory_routes())
        .nest("/purchase-orders", purchase_order_routes())
        .nest("/analytics", analytics_routes())
}

/// Product catalog routes
fn product_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_products).post(handlers::create_product),
        )
        .route(
            "/:product_id",
            get(handlers::get_product)
                .put(handlers::update_product)
                .delete(handlers::delete_product),
        )
}

/// Store routes
fn store_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_stores).post(handlers::create_store))
        .route("/stats", get(handlers::list_store_stats))
        .route(
            "/:store_id",
            get(handlers::get_store)
                .put(handlers::update_store)
                .delete(handlers::delete_store),
        )
        .route("/:store_id/stats", get(handlers::get_store_stats))
}

/// Inventory routes
fn inventory_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_inventory).post(handlers::create_inventory),
        )
        .route("/low-stock/summary", get(handlers::get_low_stock_summary))
        .route(
            "/:inventory_id",
            get(handlers::get_inventory)
                .put(handlers::update_inventory)
                .delete(handlers::delete_inventory),
        )
        .route("/:inventory_id/restock", post(handlers::restock_inventory))
}

/// Purchase order routes
fn purchase_order_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_purchase_orders).post(handlers::create_purchase_order),
        )
        .route("/calculate-reorder", post(handlers::calculate_reorder))
        .route(
            "/:order_id",
            get(handlers::get_purchase_order).put(handlers::update_purchase_order),
        )
}

/// Analytics routes
fn analytics_routes() -> Router<AppState> {
    Router::new()
        .route("/summary", get(handlers::get_analytics_summary))
        .route("/products/performance", get(handlers::get_product_performance))
        .route(
            "/products/:product_id/predictions",
            get(handlers::get_product_predictions),
        )
        .route("/stores/performance", get(handlers::get_store_performance))
        .route("/regional/trends", get(handlers::get_regional_trends))
        .route("/trends", get(handlers::get_trend_analysis))
        .route("/trends/daily-summary", get(handlers::get_daily_summary))
}
