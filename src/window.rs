use std::fmt;

use chrono::{Datelike, NaiveDate};

use crate::error::{Result, SpendError};

/// Inclusive `[start, end]` calendar date range used to scope reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(SpendError::Other(format!(
                "start date {start} is after end date {end}"
            )));
        }
        Ok(Self { start, end })
    }

    /// First through last day of the given month.
    pub fn month(year: i32, month: u32) -> Result<Self> {
        let start = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| SpendError::Other(format!("invalid month: {year}-{month:02}")))?;
        let (next_year, next_month) = if month == 12 {
            (year + 1, 1)
        } else {
            (year, month + 1)
        };
        let end = NaiveDate::from_ymd_opt(next_year, next_month, 1)
            .and_then(|d| d.pred_opt())
            .ok_or_else(|| SpendError::Other(format!("invalid month: {year}-{month:02}")))?;
        Ok(Self { start, end })
    }

    /// The calendar month containing `date`.
    pub fn month_of(date: NaiveDate) -> Self {
        // A date that exists always has a first and last day of its month.
        let start = date.with_day(1).unwrap_or(date);
        let end = start
            .checked_add_months(chrono::Months::new(1))
            .and_then(|d| d.pred_opt())
            .unwrap_or(date);
        Self { start, end }
    }

    pub fn current_month() -> Self {
        Self::month_of(chrono::Local::now().date_naive())
    }

    /// The calendar month before the one `start` falls in.
    pub fn previous_month(&self) -> Self {
        match self.start.with_day(1).and_then(|d| d.pred_opt()) {
            Some(last_of_prev) => Self::month_of(last_of_prev),
            None => *self,
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    #[cfg(test)]
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.start, self.end)
    }
}
