//! Daily inventory rollup

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};

use crate::models::{InventoryRecord, InventoryTrendPoint};

/// Days covered by the rollup when no start date is given
pub const DEFAULT_ROLLUP_DAYS: i64 = 30;

/// Resolve the rollup window, defaulting to the trailing 30 days ending `now`
pub fn rollup_window(
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> (DateTime<Utc>, DateTime<Utc>) {
    let end = end.unwrap_or(now);
    let start = start.unwrap_or(end - Duration::days(DEFAULT_ROLLUP_DAYS));
    (start, end)
}

#[derive(Default)]
struct DayTotals {
    quantity: i64,
    restocks: i64,
    low_stock: i64,
}

/// One point per calendar day (UTC) that has at least one record, ascending.
///
/// Days without records are not emitted.
pub fn daily_rollup(records: &[InventoryRecord]) -> Vec<InventoryTrendPoint> {
    let mut days: BTreeMap<NaiveDate, DayTotals> = BTreeMap::new();
    for record in records {
        let totals = days.entry(record.updated_at.date_naive()).or_default();
        totals.quantity += i64::from(record.quantity);
        totals.restocks += i64::from(record.was_restocked());
        totals.low_stock += i64::from(record.is_low_stock());
    }

    days.into_iter()
        .map(|(day, totals)| InventoryTrendPoint {
            timestamp: day.and_time(NaiveTime::MIN).and_utc(),
            quantity: totals.quantity,
            restock_count: totals.restocks,
            low_stock_count: totals.low_stock,
        })
        .collect()
}
