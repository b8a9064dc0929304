//! CSV file data adapter.
//!
//! One file per code, `<CODE>.csv`, with header
//! `date,open,high,low,close,volume,shares_outstanding`. The
//! shares_outstanding column may be omitted (benchmark series have no
//! meaningful share count); it then defaults to 0.

use crate::domain::bar::Bar;
use crate::domain::error::RibbonError;
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;

pub struct CsvDataAdapter {
    base_path: PathBuf,
}

impl CsvDataAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, code: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", code))
    }
}

fn field<'a>(record: &'a csv::StringRecord, index: usize, name: &str) -> Result<&'a str, RibbonError> {
    record.get(index).ok_or_else(|| RibbonError::Data {
        reason: format!("missing {} column", name),
    })
}

fn parse_field<T: std::str::FromStr>(
    record: &csv::StringRecord,
    index: usize,
    name: &str,
) -> Result<T, RibbonError>
where
    T::Err: std::fmt::Display,
{
    field(record, index, name)?
        .parse()
        .map_err(|e| RibbonError::Data {
            reason: format!("invalid {} value: {}", name, e),
        })
}

impl DataPort for CsvDataAdapter {
    fn fetch_bars(
        &self,
        code: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Bar>, RibbonError> {
        let path = self.csv_path(code);
        let content = fs::read_to_string(&path).map_err(|e| RibbonError::Data {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut bars = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| RibbonError::Data {
                reason: format!("CSV parse error: {}", e),
            })?;

            let date = NaiveDate::parse_from_str(field(&record, 0, "date")?, "%Y-%m-%d")
                .map_err(|e| RibbonError::Data {
                    reason: format!("invalid date format: {}", e),
                })?;
            if date < start || date > end {
                continue;
            }

            let shares_outstanding = match record.get(6) {
                Some(s) if !s.trim().is_empty() => parse_field(&record, 6, "shares_outstanding")?,
                _ => 0,
            };

            bars.push(Bar {
                code: code.to_string(),
                date,
                open: parse_field(&record, 1, "open")?,
                high: parse_field(&record, 2, "high")?,
                low: parse_field(&record, 3, "low")?,
                close: parse_field(&record, 4, "close")?,
                volume: parse_field(&record, 5, "volume")?,
                shares_outstanding,
            });
        }

        bars.sort_by_key(|b| b.date);
        Ok(bars)
    }

    fn list_symbols(&self) -> Result<Vec<String>, RibbonError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| RibbonError::Data {
            reason: format!("failed to read directory {}: {}", self.base_path.display(), e),
        })?;

        let mut symbols = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| RibbonError::Data {
                reason: format!("directory entry error: {}", e),
            })?;
            let name = entry.file_name();
            let name_str = name.to_string_lossy();
            if let Some(stem) = name_str.strip_suffix(".csv") {
                symbols.push(stem.to_string());
            }
        }

        symbols.sort();
        Ok(symbols)
    }
}
