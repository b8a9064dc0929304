//! Daily bar representation.

use chrono::NaiveDate;

#[derive(Debug, Clone)]
pub struct Bar {
    pub code: String,
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
    /// Shares on issue; 0 when unknown (e.g. a benchmark index series).
    pub shares_outstanding: i64,
}

impl Bar {
    /// shares_outstanding * close
    pub fn market_cap(&self) -> f64 {
        self.shares_outstanding as f64 * self.close
    }
}
