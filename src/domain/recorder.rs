//! End-of-day observations.
//!
//! Five named scalars per session, purely observational: the raw allocation
//! signal, the long and short splits, and the size of each candidate list.

use crate::domain::day_plan::DayPlan;
use crate::ports::record_port::RecordPort;
use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub struct DailyRecord {
    pub date: NaiveDate,
    pub allocations: f64,
    pub long_allocations: f64,
    pub short_allocations: f64,
    pub number_of_longs: usize,
    pub number_of_shorts: usize,
}

impl DailyRecord {
    pub fn from_plan(plan: &DayPlan) -> Self {
        DailyRecord {
            date: plan.date,
            allocations: plan.allocation.signal,
            long_allocations: plan.allocation.long_allocations,
            short_allocations: plan.allocation.short_allocations,
            number_of_longs: plan.universe.longs.len(),
            number_of_shorts: plan.universe.shorts.len(),
        }
    }
}

pub fn record_day(plan: &DayPlan, sink: &mut dyn RecordPort) {
    sink.record_day(&DailyRecord::from_plan(plan));
}

/// In-memory observation sink.
#[derive(Debug, Default)]
pub struct MemoryRecorder {
    pub records: Vec<DailyRecord>,
}

impl MemoryRecorder {
    pub fn new() -> Self {
        MemoryRecorder::default()
    }
}

impl RecordPort for MemoryRecorder {
    fn record_day(&mut self, record: &DailyRecord) {
        self.records.push(record.clone());
    }
}
