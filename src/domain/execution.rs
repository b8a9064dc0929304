//! Target-percentage fill application.
//!
//! Brings a position to a requested fraction of total portfolio value at a
//! given price. Whole shares only; cash moves by the traded notional, which
//! keeps equity conserved across a fill.

use crate::domain::portfolio::{Portfolio, Position};
use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub enum FillOutcome {
    Filled { delta: i64, price: f64 },
    NoChange,
}

/// Number of whole shares that `target` of `equity` buys at `price`,
/// truncated toward zero. Negative targets yield negative quantities.
pub fn target_quantity(target: f64, equity: f64, price: f64) -> i64 {
    (target * equity / price).trunc() as i64
}

/// Adjust the position in `code` to `target` of `equity`, trading at `price`.
///
/// A target of 0 flattens. Returns [`FillOutcome::NoChange`] when the price
/// is non-positive or the rounded target equals the current holding.
pub fn apply_target_percent(
    portfolio: &mut Portfolio,
    code: &str,
    price: f64,
    target: f64,
    equity: f64,
    date: NaiveDate,
) -> FillOutcome {
    if price <= 0.0 {
        return FillOutcome::NoChange;
    }

    let desired = target_quantity(target, equity, price);
    let current = portfolio.get_position(code).map_or(0, |p| p.quantity);
    let delta = desired - current;
    if delta == 0 {
        return FillOutcome::NoChange;
    }

    portfolio.cash -= delta as f64 * price;

    if desired == 0 {
        portfolio.positions.remove(code);
    } else {
        portfolio
            .positions
            .entry(code.to_string())
            .and_modify(|p| p.quantity = desired)
            .or_insert_with(|| Position {
                code: code.to_string(),
                quantity: desired,
                entry_price: price,
                entry_date: date,
            });
    }

    FillOutcome::Filled { delta, price }
}
