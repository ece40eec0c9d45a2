//! HTTP handlers for the Inventory Analytics & Prediction System

pub mod analytics;
pub mod health;
pub mod inventory;
pub mod products;
pub mod purchase_orders;
pub mod stores;

pub use analytics::*;
pub use health::*;
pub use inventory::*;
pub use products::*;
pub use purchase_orders::*;
pub use stores::*;

use axum::{
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::error::{check_field, AppResult};
use crate::services::ReportingService;
use shared::{validate_pagination, Pagination};

/// Build and validate offset pagination from query parameters
pub(crate) fn pagination(skip: Option<i64>, limit: Option<i64>) -> AppResult<Pagination> {
    let defaults = Pagination::default();
    let page = Pagination {
        skip: skip.unwrap_or(defaults.skip),
        limit: limit.unwrap_or(defaults.limit),
    };
    check_field("pagination", validate_pagination(&page))?;
    Ok(page)
}

/// Respond with JSON, or with a CSV attachment when `format=csv`
pub(crate) fn json_or_csv<T: Serialize>(
    data: Vec<T>,
    format: Option<&str>,
    filename: &str,
) -> AppResult<Response> {
    if format == Some("csv") {
        let csv = ReportingService::export_to_csv(&data)?;
        let disposition = format!("attachment; filename=\"{}.csv\"", filename);
        Ok((
            [
                (header::CONTENT_TYPE, "text/csv".to_string()),
                (header::CONTENT_DISPOSITION, disposition),
            ],
            csv,
        )
            .into_response())
    } else {
        Ok(Json(data).into_response())
    }
}
