//! Reorder & trend engine
//!
//! Pure computations over entity-store rows. Every function takes the rows
//! (and, where time matters, an explicit `now`) and returns response models.
//! Nothing here fails: empty input yields zero counts, zero rates and
//! sentinel dates.

mod performance;
mod prediction;
mod reorder;
mod rollup;
mod summary;
mod trends;

pub use performance::*;
pub use prediction::*;
pub use reorder::*;
pub use rollup::*;
pub use summary::*;
pub use trends::*;

/// Group label for stores without a region
pub const UNSPECIFIED_REGION: &str = "Unspecified";

/// Group label for products without a category
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Normalize an optional region into its grouping label
pub fn region_label(region: Option<&str>) -> &str {
    region.unwrap_or(UNSPECIFIED_REGION)
}

/// Normalize an optional category into its grouping label
pub fn category_label(category: Option<&str>) -> &str {
    category.unwrap_or(UNCATEGORIZED)
}

/// `numerator / max(denominator, 1)` as a float
pub(crate) fn guarded_ratio(numerator: i64, denominator: i64) -> f64 {
    numerator as f64 / denominator.max(1) as f64
}
