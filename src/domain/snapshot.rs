//! Per-security daily snapshot.
//!
//! Rebuilt fresh every session from the two most recent completed bars;
//! nothing here persists across days.

use crate::domain::bar::Bar;

#[derive(Debug, Clone)]
pub struct DailySnapshot {
    pub code: String,
    pub close: f64,
    pub volume: i64,
    pub market_cap: f64,
    /// Two-session return in percent: (latest/prior - 1) * 100.
    pub weekly_return: f64,
}

impl DailySnapshot {
    /// Build from the two most recent completed bars, `prior` then `latest`.
    pub fn from_bars(prior: &Bar, latest: &Bar) -> Self {
        DailySnapshot {
            code: latest.code.clone(),
            close: latest.close,
            volume: latest.volume,
            market_cap: latest.market_cap(),
            weekly_return: (latest.close / prior.close - 1.0) * 100.0,
        }
    }

    pub fn is_long_candidate(&self) -> bool {
        self.weekly_return > 0.0
    }

    pub fn is_short_candidate(&self) -> bool {
        self.weekly_return < 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn bar(code: &str, day: u32, close: f64) -> Bar {
        Bar {
            code: code.into(),
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            open: close,
            high: close,
            low: close,
            close,
            volume: 1_500_000,
            shares_outstanding: 10_000_000,
        }
    }

    #[test]
    fn weekly_return_from_two_closes() {
        // [100, 110] => (110/100 - 1) * 100 = 10.0
        let snap = DailySnapshot::from_bars(&bar("ACME", 1, 100.0), &bar("ACME", 2, 110.0));
        assert!((snap.weekly_return - 10.0).abs() < 1e-12);
        assert!(snap.is_long_candidate());
        assert!(!snap.is_short_candidate());
    }

    #[test]
    fn negative_return_is_short_candidate() {
        let snap = DailySnapshot::from_bars(&bar("ACME", 1, 100.0), &bar("ACME", 2, 90.0));
        assert!((snap.weekly_return + 10.0).abs() < 1e-12);
        assert!(snap.is_short_candidate());
        assert!(!snap.is_long_candidate());
    }

    #[test]
    fn flat_return_is_neither() {
        let snap = DailySnapshot::from_bars(&bar("ACME", 1, 100.0), &bar("ACME", 2, 100.0));
        assert!(!snap.is_long_candidate());
        assert!(!snap.is_short_candidate());
    }

    #[test]
    fn snapshot_uses_latest_bar_fields() {
        let mut latest = bar("ACME", 2, 12.0);
        latest.volume = 3_000_000;
        latest.shares_outstanding = 5_000_000;
        let snap = DailySnapshot::from_bars(&bar("ACME", 1, 10.0), &latest);
        assert!((snap.close - 12.0).abs() < f64::EPSILON);
        assert_eq!(snap.volume, 3_000_000);
        assert!((snap.market_cap - 60_000_000.0).abs() < f64::EPSILON);
    }
}
