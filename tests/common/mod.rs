#![allow(dead_code)]

use chrono::NaiveDate;
pub use ribbontrader::domain::bar::Bar;
use ribbontrader::domain::backtest::BacktestConfig;
use ribbontrader::domain::error::RibbonError;
use ribbontrader::domain::screen::ScreenParams;
use ribbontrader::domain::series::CodeSeries;
use ribbontrader::ports::data_port::DataPort;
use std::collections::HashMap;

pub struct MockDataPort {
    pub data: HashMap<String, Vec<Bar>>,
    pub errors: HashMap<String, String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_bars(mut self, code: &str, bars: Vec<Bar>) -> Self {
        self.data.insert(code.to_string(), bars);
        self
    }

    pub fn with_error(mut self, code: &str, reason: &str) -> Self {
        self.errors.insert(code.to_string(), reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn fetch_bars(
        &self,
        code: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Bar>, RibbonError> {
        if let Some(reason) = self.errors.get(code) {
            return Err(RibbonError::Data {
                reason: reason.clone(),
            });
        }
        Ok(self
            .data
            .get(code)
            .map(|bars| {
                bars.iter()
                    .filter(|b| b.date >= start && b.date <= end)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    fn list_symbols(&self) -> Result<Vec<String>, RibbonError> {
        let mut symbols: Vec<String> = self.data.keys().cloned().collect();
        symbols.sort();
        Ok(symbols)
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Bar with plausible screen-passing defaults: 10M shares outstanding and
/// 2M daily volume, so a close near 10 gives a 100M market cap.
pub fn make_bar(code: &str, date: NaiveDate, close: f64) -> Bar {
    Bar {
        code: code.to_string(),
        date,
        open: close,
        high: close,
        low: close,
        close,
        volume: 2_000_000,
        shares_outstanding: 10_000_000,
    }
}

/// Consecutive daily bars starting 2024-01-01, close taken from `close_at`.
pub fn generate_bars<F: Fn(usize) -> f64>(code: &str, count: usize, close_at: F) -> Vec<Bar> {
    let start = date(2024, 1, 1);
    (0..count)
        .map(|i| make_bar(code, start + chrono::Duration::days(i as i64), close_at(i)))
        .collect()
}

pub fn make_series<F: Fn(usize) -> f64>(code: &str, count: usize, close_at: F) -> CodeSeries {
    CodeSeries::new(code.to_string(), generate_bars(code, count, close_at))
}

pub fn sample_config() -> BacktestConfig {
    BacktestConfig {
        start_date: date(2024, 1, 1),
        end_date: date(2024, 12, 31),
        initial_capital: 100_000.0,
        benchmark: "SPY".to_string(),
        screen: ScreenParams::default(),
    }
}
