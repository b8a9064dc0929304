//! Daily event loop.
//!
//! Drives the three per-session steps the strategy expects from its host:
//! pre-open (snapshots, screen, benchmark allocation, day plan), rebalance
//! (orders submitted through the broker seam, filled at the session open),
//! and close (equity mark plus the day's observations). Single-threaded;
//! each step runs to completion before the next.

use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};

use crate::domain::allocation::{compute_allocation, MAX_WINDOW};
use crate::domain::day_plan::DayPlan;
use crate::domain::error::RibbonError;
use crate::domain::execution::apply_target_percent;
use crate::domain::portfolio::Portfolio;
use crate::domain::rebalance::rebalance_day;
use crate::domain::recorder::record_day;
use crate::domain::screen::{screen_day, ScreenParams};
use crate::domain::series::{build_timeline, CodeSeries};
use crate::domain::snapshot::DailySnapshot;
use crate::ports::broker_port::BrokerPort;
use crate::ports::record_port::RecordPort;

#[derive(Debug, Clone)]
pub struct BacktestConfig {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub initial_capital: f64,
    /// Code whose close history feeds the ribbon allocator.
    pub benchmark: String,
    pub screen: ScreenParams,
}

#[derive(Debug)]
pub struct BacktestResult {
    pub portfolio: Portfolio,
    pub days: usize,
}

/// Simulation broker for one session: a code is tradable iff it printed a
/// bar today; submitted orders are collected for fill at the open.
struct DayBroker {
    tradable: HashSet<String>,
    orders: Vec<(String, f64)>,
}

impl BrokerPort for DayBroker {
    fn can_trade(&self, code: &str) -> bool {
        self.tradable.contains(code)
    }

    fn order_target_percent(&mut self, code: &str, target: f64) {
        self.orders.push((code.to_string(), target));
    }
}

enum Phase {
    Open,
    Close,
}

/// Today's bar price where one exists, otherwise the last known close.
fn mark_prices(series: &[&CodeSeries], date: NaiveDate, phase: Phase) -> HashMap<String, f64> {
    let mut prices = HashMap::new();
    for s in series {
        let price = match s.bar_on(date) {
            Some(bar) => Some(match phase {
                Phase::Open => bar.open,
                Phase::Close => bar.close,
            }),
            None => s.last_close_on_or_before(date),
        };
        if let Some(p) = price {
            prices.insert(s.code.clone(), p);
        }
    }
    prices
}

pub fn run_backtest(
    series: &[CodeSeries],
    config: &BacktestConfig,
    recorder: &mut dyn RecordPort,
) -> Result<BacktestResult, RibbonError> {
    let benchmark = series
        .iter()
        .find(|s| s.code == config.benchmark)
        .ok_or_else(|| RibbonError::NoData {
            code: config.benchmark.clone(),
        })?;
    let tradables: Vec<&CodeSeries> = series
        .iter()
        .filter(|s| s.code != config.benchmark)
        .collect();

    let timeline: Vec<NaiveDate> = build_timeline(series)
        .into_iter()
        .filter(|d| *d >= config.start_date && *d <= config.end_date)
        .collect();

    let mut portfolio = Portfolio::new(config.initial_capital);

    for &date in &timeline {
        // Pre-open: snapshots come from completed sessions only.
        let snapshots: Vec<DailySnapshot> = tradables
            .iter()
            .filter_map(|s| s.last_two_before(date))
            .map(|(prior, latest)| DailySnapshot::from_bars(prior, latest))
            .collect();
        let universe = screen_day(&snapshots, &config.screen);
        let allocation = compute_allocation(&benchmark.closes_before(date, MAX_WINDOW));
        let plan = DayPlan::new(date, allocation, universe);

        // Rebalance: fire the day's orders, then fill them at the open.
        let mut broker = DayBroker {
            tradable: tradables
                .iter()
                .filter(|s| s.bar_on(date).is_some())
                .map(|s| s.code.clone())
                .collect(),
            orders: Vec::new(),
        };
        rebalance_day(&plan, &portfolio, &mut broker);

        let open_prices = mark_prices(&tradables, date, Phase::Open);
        let equity_at_open = portfolio.total_equity(&open_prices);
        for (code, target) in broker.orders {
            if let Some(&price) = open_prices.get(&code) {
                apply_target_percent(&mut portfolio, &code, price, target, equity_at_open, date);
            }
        }

        // Close: mark equity and emit the day's observations.
        let close_prices = mark_prices(&tradables, date, Phase::Close);
        let equity = portfolio.total_equity(&close_prices);
        portfolio.record_equity(date, equity);
        record_day(&plan, recorder);
    }

    Ok(BacktestResult {
        portfolio,
        days: timeline.len(),
    })
}
