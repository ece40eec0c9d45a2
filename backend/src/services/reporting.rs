//! CSV export for analytics reports

use serde::Serialize;

use crate::error::{AppError, AppResult};

/// Reporting service
pub struct ReportingService;

impl ReportingService {
    /// Serialize flat report rows to CSV with a header line
    pub fn export_to_csv<T: Serialize>(data: &[T]) -> AppResult<String> {
        let mut wtr = csv::Writer::from_writer(vec![]);
        for record in data {
            wtr.serialize(record)
                .map_err(|e| AppError::Internal(format!("CSV serialization error: {}", e)))?;
        }
        let bytes = wtr
            .into_inner()
            .map_err(|e| AppError::Internal(format!("CSV writer error: {}", e)))?;
        String::from_utf8(bytes)
            .map_err(|e| AppError::Internal(format!("UTF-8 conversion error: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Row {
        region: String,
        store_count: i64,
        low_stock_percentage: f64,
    }

    #[test]
    fn writes_header_and_rows() {
        let csv = ReportingService::export_to_csv(&[
            Row {
                region: "North".to_string(),
                store_count: 2,
                low_stock_percentage: 50.0,
            },
            Row {
                region: "Unspecified".to_string(),
                store_count: 1,
                low_stock_percentage: 0.0,
            },
        ])
        .unwrap();

        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("region,store_count,low_stock_percentage"));
        assert_eq!(lines.next(), Some("North,2,50.0"));
        assert_eq!(lines.next(), Some("Unspecified,1,0.0"));
    }

    #[test]
    fn empty_report_is_empty_string() {
        let rows: Vec<Row> = Vec::new();
        assert_eq!(ReportingService::export_to_csv(&rows).unwrap(), "");
    }
}
