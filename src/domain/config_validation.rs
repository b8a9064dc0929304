//! Configuration validation.
//!
//! Checks every field a run depends on before any data is loaded.

use crate::domain::error::RibbonError;
use crate::ports::config_port::ConfigPort;
use chrono::NaiveDate;

pub fn validate_backtest_config(config: &dyn ConfigPort) -> Result<(), RibbonError> {
    validate_initial_capital(config)?;
    validate_dates(config)?;
    validate_data_dir(config)?;
    validate_benchmark(config)?;
    validate_codes(config)?;
    validate_screen(config)?;
    Ok(())
}

fn validate_initial_capital(config: &dyn ConfigPort) -> Result<(), RibbonError> {
    let value = config.get_double("backtest", "initial_capital", 0.0);
    if value <= 0.0 {
        return Err(RibbonError::ConfigInvalid {
            section: "backtest".to_string(),
            key: "initial_capital".to_string(),
            reason: "initial_capital must be positive".to_string(),
        });
    }
    Ok(())
}

fn validate_dates(config: &dyn ConfigPort) -> Result<(), RibbonError> {
    let start = parse_date(config.get_string("backtest", "start_date").as_deref(), "start_date")?;
    let end = parse_date(config.get_string("backtest", "end_date").as_deref(), "end_date")?;
    if start >= end {
        return Err(RibbonError::ConfigInvalid {
            section: "backtest".to_string(),
            key: "start_date".to_string(),
            reason: "start_date must be before end_date".to_string(),
        });
    }
    Ok(())
}

pub fn parse_date(value: Option<&str>, field: &str) -> Result<NaiveDate, RibbonError> {
    match value {
        None => Err(RibbonError::ConfigMissing {
            section: "backtest".to_string(),
            key: field.to_string(),
        }),
        Some(s) => {
            NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| RibbonError::ConfigInvalid {
                section: "backtest".to_string(),
                key: field.to_string(),
                reason: format!("invalid {} format, expected YYYY-MM-DD", field),
            })
        }
    }
}

fn validate_data_dir(config: &dyn ConfigPort) -> Result<(), RibbonError> {
    match config.get_string("backtest", "data_dir") {
        Some(s) if !s.trim().is_empty() => Ok(()),
        _ => Err(RibbonError::ConfigMissing {
            section: "backtest".to_string(),
            key: "data_dir".to_string(),
        }),
    }
}

fn validate_benchmark(config: &dyn ConfigPort) -> Result<(), RibbonError> {
    match config.get_string("strategy", "benchmark") {
        Some(s) if !s.trim().is_empty() => Ok(()),
        _ => Err(RibbonError::ConfigMissing {
            section: "strategy".to_string(),
            key: "benchmark".to_string(),
        }),
    }
}

fn validate_codes(config: &dyn ConfigPort) -> Result<(), RibbonError> {
    match config.get_string("strategy", "codes") {
        Some(s) if s.split(',').any(|t| !t.trim().is_empty()) => Ok(()),
        _ => Err(RibbonError::ConfigMissing {
            section: "strategy".to_string(),
            key: "codes".to_string(),
        }),
    }
}

fn validate_screen(config: &dyn ConfigPort) -> Result<(), RibbonError> {
    let min_market_cap = config.get_double("screen", "min_market_cap", 50_000_000.0);
    if min_market_cap < 0.0 {
        return Err(RibbonError::ConfigInvalid {
            section: "screen".to_string(),
            key: "min_market_cap".to_string(),
            reason: "min_market_cap must be non-negative".to_string(),
        });
    }

    let min_price = config.get_double("screen", "min_price", 1.0);
    let max_price = config.get_double("screen", "max_price", 15.0);
    if min_price < 0.0 {
        return Err(RibbonError::ConfigInvalid {
            section: "screen".to_string(),
            key: "min_price".to_string(),
            reason: "min_price must be non-negative".to_string(),
        });
    }
    if max_price <= min_price {
        return Err(RibbonError::ConfigInvalid {
            section: "screen".to_string(),
            key: "max_price".to_string(),
            reason: "max_price must exceed min_price".to_string(),
        });
    }

    let min_volume = config.get_int("screen", "min_volume", 1_000_000);
    if min_volume < 0 {
        return Err(RibbonError::ConfigInvalid {
            section: "screen".to_string(),
            key: "min_volume".to_string(),
            reason: "min_volume must be non-negative".to_string(),
        });
    }
    Ok(())
}
