//! End-of-day observation sink port trait.

use crate::domain::recorder::DailyRecord;

pub trait RecordPort {
    fn record_day(&mut self, record: &DailyRecord);
}
