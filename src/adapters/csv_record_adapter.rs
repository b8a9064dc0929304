//! Daily observation CSV writer.

use crate::domain::error::RibbonError;
use crate::domain::recorder::DailyRecord;
use std::path::Path;

/// Write the day-by-day observations to a CSV file, one row per session.
pub fn write_records<P: AsRef<Path>>(path: P, records: &[DailyRecord]) -> Result<(), RibbonError> {
    let mut writer = csv::Writer::from_path(path.as_ref()).map_err(|e| RibbonError::Data {
        reason: format!("failed to open {}: {}", path.as_ref().display(), e),
    })?;

    writer
        .write_record([
            "date",
            "allocations",
            "long_allocations",
            "short_allocations",
            "number_of_longs",
            "number_of_shorts",
        ])
        .map_err(|e| RibbonError::Data {
            reason: format!("CSV write error: {}", e),
        })?;

    for record in records {
        writer
            .write_record([
                record.date.format("%Y-%m-%d").to_string(),
                record.allocations.to_string(),
                record.long_allocations.to_string(),
                record.short_allocations.to_string(),
                record.number_of_longs.to_string(),
                record.number_of_shorts.to_string(),
            ])
            .map_err(|e| RibbonError::Data {
                reason: format!("CSV write error: {}", e),
            })?;
    }

    writer.flush().map_err(|e| RibbonError::Data {
        reason: format!("CSV flush error: {}", e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn record(day: u32, long: f64, longs: usize) -> DailyRecord {
        DailyRecord {
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            allocations: long - 0.5,
            long_allocations: long,
            short_allocations: 1.0 - long,
            number_of_longs: longs,
            number_of_shorts: 2,
        }
    }

    #[test]
    fn writes_header_and_rows() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("records.csv");
        write_records(&path, &[record(15, 0.6, 3), record(16, 0.5, 0)]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("date,allocations,long_allocations"));
        assert!(lines[1].starts_with("2024-01-15,"));
        assert!(lines[1].contains(",0.6,"));
        assert!(lines[1].ends_with(",3,2"));
    }

    #[test]
    fn empty_records_write_header_only() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("records.csv");
        write_records(&path, &[]).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 1);
    }

    #[test]
    fn unwritable_path_is_an_error() {
        let result = write_records("/nonexistent/dir/records.csv", &[]);
        assert!(result.is_err());
    }
}
