use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Inclusive calendar range picked in the playground.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    from: NaiveDate,
    to: NaiveDate,
}

impl DateRange {
    /// Build a range, swapping the ends if they arrive reversed.
    pub fn new(a: NaiveDate, b: NaiveDate) -> Self {
        if a <= b {
            Self { from: a, to: b }
        } else {
            Self { from: b, to: a }
        }
    }

    pub fn single(day: NaiveDate) -> Self {
        Self { from: day, to: day }
    }

    pub fn start(&self) -> NaiveDate {
        self.from
    }

    pub fn end(&self) -> NaiveDate {
        self.to
    }

    /// Number of days covered, counting both ends.
    pub fn days(&self) -> i64 {
        (self.to - self.from).num_days() + 1
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.from <= day && day <= self.to
    }

    /// Replace the start, keeping the range ordered.
    pub fn with_start(self, start: NaiveDate) -> Self {
        Self::new(start, self.to)
    }

    /// Replace the end, keeping the range ordered.
    pub fn with_end(self, end: NaiveDate) -> Self {
        Self::new(self.from, end)
    }
}

/// Parse the `YYYY-MM-DD` value of an HTML date input.
pub fn parse_input_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}
