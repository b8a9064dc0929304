//! Daily bar data access port trait.

use crate::domain::bar::Bar;
use crate::domain::error::RibbonError;
use chrono::NaiveDate;

pub trait DataPort {
    /// Fetch daily bars for a code, sorted ascending by date, restricted
    /// to `[start, end]` inclusive.
    fn fetch_bars(
        &self,
        code: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Bar>, RibbonError>;

    fn list_symbols(&self) -> Result<Vec<String>, RibbonError>;
}
