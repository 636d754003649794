//! Inclusive calendar date ranges.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Year, month and day of the default range start when a caller omits `from`.
pub const DEFAULT_RANGE_START: (i32, u32, u32) = (2010, 1, 1);

/// An inclusive `[from, to]` calendar date range.
///
/// Construction never fails: a reversed pair is swapped rather than rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    /// First day of the range (inclusive).
    pub from: NaiveDate,
    /// Last day of the range (inclusive).
    pub to: NaiveDate,
}

impl DateRange {
    /// Creates a range, swapping the endpoints if `from > to`.
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        if from > to {
            Self { from: to, to: from }
        } else {
            Self { from, to }
        }
    }

    /// Resolves optional endpoints against the defaults (`2010-01-01` .. `today`).
    pub fn resolve(from: Option<NaiveDate>, to: Option<NaiveDate>, today: NaiveDate) -> Self {
        Self::new(from.unwrap_or_else(default_range_start), to.unwrap_or(today))
    }

    /// Returns true if `date` falls within the range, endpoints included.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.from && date <= self.to
    }

    /// Trailing window of `days` ending at `to`, clipped so it never precedes `from`.
    pub fn trailing(&self, days: i64) -> Self {
        let start = self.to - Duration::days(days);
        Self {
            from: start.max(self.from),
            to: self.to,
        }
    }

    /// Number of calendar days between the endpoints.
    pub fn num_days(&self) -> i64 {
        (self.to - self.from).num_days()
    }

    /// Calendar years touched by the range, ascending.
    pub fn years(&self) -> impl Iterator<Item = i32> {
        self.from.year()..=self.to.year()
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.from, self.to)
    }
}

/// The default range start (`2010-01-01`).
pub fn default_range_start() -> NaiveDate {
    let (y, m, d) = DEFAULT_RANGE_START;
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}
