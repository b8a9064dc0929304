//! Core domain types and logic.

pub mod allocation;
pub mod backtest;
pub mod bar;
pub mod config_validation;
pub mod day_plan;
pub mod error;
pub mod execution;
pub mod metrics;
pub mod portfolio;
pub mod rebalance;
pub mod recorder;
pub mod screen;
pub mod series;
pub mod snapshot;
