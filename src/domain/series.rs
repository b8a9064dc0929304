//! Per-code bar series and the unified backtest timeline.

use crate::domain::bar::Bar;
use chrono::NaiveDate;
use std::collections::{BTreeSet, HashMap};

#[derive(Debug, Clone)]
pub struct CodeSeries {
    pub code: String,
    pub bars: Vec<Bar>,
    date_index: HashMap<NaiveDate, usize>,
}

impl CodeSeries {
    /// Bars are sorted by date on construction.
    pub fn new(code: String, mut bars: Vec<Bar>) -> Self {
        bars.sort_by_key(|b| b.date);
        let date_index = bars.iter().enumerate().map(|(i, b)| (b.date, i)).collect();
        CodeSeries {
            code,
            bars,
            date_index,
        }
    }

    pub fn bar_count(&self) -> usize {
        self.bars.len()
    }

    pub fn bar_on(&self, date: NaiveDate) -> Option<&Bar> {
        self.date_index.get(&date).map(|&i| &self.bars[i])
    }

    /// Index of the first bar on or after `date`.
    fn lower_bound(&self, date: NaiveDate) -> usize {
        self.bars.partition_point(|b| b.date < date)
    }

    /// The two most recent bars strictly before `date`, oldest first.
    pub fn last_two_before(&self, date: NaiveDate) -> Option<(&Bar, &Bar)> {
        let end = self.lower_bound(date);
        if end < 2 {
            return None;
        }
        Some((&self.bars[end - 2], &self.bars[end - 1]))
    }

    /// Up to `max` closes strictly before `date`, in chronological order.
    pub fn closes_before(&self, date: NaiveDate, max: usize) -> Vec<f64> {
        let end = self.lower_bound(date);
        let start = end.saturating_sub(max);
        self.bars[start..end].iter().map(|b| b.close).collect()
    }

    /// The most recent close on or before `date`.
    pub fn last_close_on_or_before(&self, date: NaiveDate) -> Option<f64> {
        let end = self.bars.partition_point(|b| b.date <= date);
        if end == 0 {
            return None;
        }
        Some(self.bars[end - 1].close)
    }
}

/// Sorted union of all bar dates across the given series.
pub fn build_timeline(series: &[CodeSeries]) -> Vec<NaiveDate> {
    let dates: BTreeSet<NaiveDate> = series
        .iter()
        .flat_map(|s| s.bars.iter().map(|b| b.date))
        .collect();
    dates.into_iter().collect()
}
