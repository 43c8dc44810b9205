use chrono::NaiveDate;

use crate::core::calendar::{month_bounds, week_bounds};
use crate::core::{DateRange, Result};

/// Preset reporting periods offered next to the free-form date range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportPeriod {
    /// A single day
    Day(NaiveDate),
    /// Monday..Sunday week containing the date
    Week(NaiveDate),
    /// A calendar month
    Month { year: i32, month: u32 },
}

impl ReportPeriod {
    pub fn resolve(&self) -> Result<DateRange> {
        match *self {
            ReportPeriod::Day(date) => Ok(DateRange::single_day(date)),
            ReportPeriod::Week(date) => {
                let (start, end) = week_bounds(date)?;
                DateRange::new(start, end)
            }
            ReportPeriod::Month { year, month } => {
                let (start, end) = month_bounds(year, month)?;
                DateRange::new(start, end)
            }
        }
    }
}
