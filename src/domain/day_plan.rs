//! Immutable per-day trading plan.
//!
//! Built once before the session from the screen and the benchmark
//! allocator, consumed by the rebalance and record steps, then discarded.
//! Replaces free-form shared mutable state between the daily callbacks.

use crate::domain::allocation::AllocationState;
use crate::domain::screen::DayUniverse;
use chrono::NaiveDate;

#[derive(Debug, Clone)]
pub struct DayPlan {
    pub date: NaiveDate,
    pub allocation: AllocationState,
    pub universe: DayUniverse,
}

impl DayPlan {
    pub fn new(date: NaiveDate, allocation: AllocationState, universe: DayUniverse) -> Self {
        DayPlan {
            date,
            allocation,
            universe,
        }
    }
}
