use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::shared::DomainError;

/// Inclusive calendar-date window for reports.
///
/// The end date covers its whole calendar day: a range of one day is
/// `start == end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DomainError> {
        if end < start {
            return Err(DomainError::Validation(
                "End date cannot be before start date".to_string(),
            ));
        }
        Ok(Self { start, end })
    }

    /// A single-day range.
    pub fn on(day: NaiveDate) -> Self {
        Self {
            start: day,
            end: day,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// User-editable view state the refresh coordinator owns.
///
/// Rendering code never reads or writes these fields directly; every change
/// goes through a coordinator setter so a change can invalidate the derived
/// view exactly once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    pub search_query: String,
    pub date_range: DateRange,
    pub current_page: u32,
}

impl FilterState {
    pub fn new(date_range: DateRange) -> Self {
        Self {
            search_query: String::new(),
            date_range,
            current_page: 1,
        }
    }
}
