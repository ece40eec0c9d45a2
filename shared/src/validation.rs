//! Validation utilities for the Inventory Analytics Platform
//!
//! Checks that complement the `validator` derives on request models.

use chrono::{DateTime, Utc};

use crate::types::{Pagination, MAX_PAGE_LIMIT};

/// Validate that a required text field is not blank
pub fn validate_not_blank(value: &str) -> Result<(), &'static str> {
    if value.trim().is_empty() {
        return Err("Value cannot be blank");
    }
    Ok(())
}

/// Validate SKU format: non-blank, no interior whitespace
pub fn validate_sku(sku: &str) -> Result<(), &'static str> {
    validate_not_blank(sku)?;
    if sku.chars().any(char::is_whitespace) {
        return Err("SKU cannot contain whitespace");
    }
    Ok(())
}

/// Validate pagination bounds: skip >= 0, 1 <= limit <= 100
pub fn validate_pagination(pagination: &Pagination) -> Result<(), &'static str> {
    if pagination.skip < 0 {
        return Err("skip cannot be negative");
    }
    if pagination.limit < 1 || pagination.limit > MAX_PAGE_LIMIT {
        return Err("limit must be between 1 and 100");
    }
    Ok(())
}

/// Validate that an explicit date window is not inverted
pub fn validate_date_window(
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
) -> Result<(), &'static str> {
    match (start, end) {
        (Some(start), Some(end)) if start > end => Err("start_date must not be after end_date"),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn sku_rules() {
        assert!(validate_sku("SKU-001").is_ok());
        assert!(validate_sku("   ").is_err());
        assert!(validate_sku("SKU 001").is_err());
    }

    #[test]
    fn pagination_rules() {
        assert!(validate_pagination(&Pagination::default()).is_ok());
        assert!(validate_pagination(&Pagination { skip: -1, limit: 10 }).is_err());
        assert!(validate_pagination(&Pagination { skip: 0, limit: 0 }).is_err());
        assert!(validate_pagination(&Pagination { skip: 0, limit: 101 }).is_err());
    }

    #[test]
    fn date_window_rules() {
        let now = Utc::now();
        assert!(validate_date_window(Some(now - Duration::days(1)), Some(now)).is_ok());
        assert!(validate_date_window(Some(now), Some(now - Duration::days(1))).is_err());
        assert!(validate_date_window(None, Some(now)).is_ok());
    }
}
