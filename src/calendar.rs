use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Inclusive number of calendar days from `start` to `end`.
///
/// `days_between(d, d) == 1`. The result is zero or negative only when `end`
/// precedes `start`.
pub fn days_between(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days() + 1
}

/// `count` consecutive calendar days beginning at `start`.
pub fn enumerate_dates(start: NaiveDate, count: usize) -> Vec<NaiveDate> {
    let mut dates = Vec::with_capacity(count);
    let mut current = start;
    for _ in 0..count {
        dates.push(current);
        current = current + Duration::days(1);
    }
    dates
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    #[error("range end {end} precedes range start {start}")]
    EndBeforeStart { start: NaiveDate, end: NaiveDate },
}

/// Fixed, contiguous window the schedule is laid out on.
///
/// Deserializing goes through [`PlanningRange::new`], so an inverted range is
/// rejected there as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RangeBounds")]
pub struct PlanningRange {
    start: NaiveDate,
    end: NaiveDate,
}

#[derive(Deserialize)]
struct RangeBounds {
    start: NaiveDate,
    end: NaiveDate,
}

impl TryFrom<RangeBounds> for PlanningRange {
    type Error = RangeError;

    fn try_from(bounds: RangeBounds) -> Result<Self, Self::Error> {
        Self::new(bounds.start, bounds.end)
    }
}

impl Default for PlanningRange {
    /// Summer break 2025.
    fn default() -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(2025, 7, 22).unwrap_or_default(),
            end: NaiveDate::from_ymd_opt(2025, 8, 31).unwrap_or_default(),
        }
    }
}

impl PlanningRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, RangeError> {
        if end < start {
            return Err(RangeError::EndBeforeStart { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn total_days(&self) -> usize {
        days_between(self.start, self.end).max(0) as usize
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        enumerate_dates(self.start, self.total_days())
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}
