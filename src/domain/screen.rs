//! Universe screen and long/short classification.
//!
//! A security qualifies for a day when it clears every threshold in
//! [`ScreenParams`] and its two-session return is nonzero. The sign of the
//! return assigns it to the long or the short list; securities failing any
//! condition are simply absent from the result.

use crate::domain::snapshot::DailySnapshot;

#[derive(Debug, Clone, PartialEq)]
pub struct ScreenParams {
    pub min_market_cap: f64,
    pub min_price: f64,
    pub max_price: f64,
    pub min_volume: i64,
}

impl Default for ScreenParams {
    fn default() -> Self {
        ScreenParams {
            min_market_cap: 50_000_000.0,
            min_price: 1.0,
            max_price: 15.0,
            min_volume: 1_000_000,
        }
    }
}

/// The filtered set of securities eligible for trading on a given day.
#[derive(Debug, Clone, Default)]
pub struct DayUniverse {
    pub longs: Vec<String>,
    pub shorts: Vec<String>,
}

impl DayUniverse {
    pub fn contains(&self, code: &str) -> bool {
        self.longs.iter().any(|c| c == code) || self.shorts.iter().any(|c| c == code)
    }

    pub fn count(&self) -> usize {
        self.longs.len() + self.shorts.len()
    }
}

fn passes_thresholds(snap: &DailySnapshot, params: &ScreenParams) -> bool {
    // Both price bounds apply; the range is inclusive on both ends.
    snap.market_cap >= params.min_market_cap
        && snap.close >= params.min_price
        && snap.close <= params.max_price
        && snap.volume >= params.min_volume
}

pub fn screen_day(snapshots: &[DailySnapshot], params: &ScreenParams) -> DayUniverse {
    let mut universe = DayUniverse::default();
    for snap in snapshots {
        if !passes_thresholds(snap, params) {
            continue;
        }
        if snap.is_long_candidate() {
            universe.longs.push(snap.code.clone());
        } else if snap.is_short_candidate() {
            universe.shorts.push(snap.code.clone());
        }
        // zero two-session return: excluded from both lists
    }
    universe
}
