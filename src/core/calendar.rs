use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime};

use crate::core::{AppError, Result};

/// Wire format for every date the service accepts or returns
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` query value, naming the offending parameter on failure
pub fn parse_date(field: &str, raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|_| {
        AppError::validation(format!(
            "Invalid {} format: '{}'. Expected YYYY-MM-DD",
            field, raw
        ))
    })
}

/// `(month, year)` of the calendar month before the one containing `date`
pub fn previous_month(date: NaiveDate) -> (u32, i32) {
    if date.month() == 1 {
        (12, date.year() - 1)
    } else {
        (date.month() - 1, date.year())
    }
}

/// Monday..Sunday week containing `date`
///
/// Fails when the week runs past the representable calendar.
pub fn week_bounds(date: NaiveDate) -> Result<(NaiveDate, NaiveDate)> {
    let out_of_range = || AppError::validation(format!("Week of {} is out of range", date));

    let offset = Days::new(date.weekday().num_days_from_monday().into());
    let monday = date.checked_sub_days(offset).ok_or_else(out_of_range)?;
    let sunday = monday.checked_add_days(Days::new(6)).ok_or_else(out_of_range)?;

    Ok((monday, sunday))
}

/// First and last day of a calendar month
pub fn month_bounds(year: i32, month: u32) -> Result<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
        AppError::validation(format!("Invalid month: {}-{:02}", year, month))
    })?;
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let last = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .ok_or_else(|| AppError::validation(format!("Invalid month: {}-{:02}", year, month)))?;

    Ok((first, last))
}

/// Inclusive range of calendar dates, `start <= end`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(AppError::validation(format!(
                "start ({}) must be before or equal to end ({})",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    pub fn single_day(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of calendar days covered, counting both ends
    pub fn day_count(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Every date from start to end, ascending
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }

    /// Inclusive lower bound for timestamp columns (`start 00:00:00`)
    pub fn lower_bound(&self) -> NaiveDateTime {
        self.start.and_time(NaiveTime::MIN)
    }

    /// Exclusive upper bound for timestamp columns (`end + 1 day, 00:00:00`).
    /// Half-open so fractional seconds late on the last day are included.
    pub fn upper_bound(&self) -> NaiveDateTime {
        self.end
            .checked_add_days(Days::new(1))
            .unwrap_or(NaiveDate::MAX)
            .and_time(NaiveTime::MIN)
    }
}
