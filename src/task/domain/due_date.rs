//! Calendar due dates and their comparison against the current instant.

use super::TaskDomainError;
use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Calendar date a task is due on.
///
/// A due date carries no time of day. When compared against `now` it denotes
/// midnight UTC at the start of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DueDate(NaiveDate);

impl DueDate {
    /// Wraps a calendar date.
    #[must_use]
    pub const fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Returns the calendar date.
    #[must_use]
    pub const fn date(self) -> NaiveDate {
        self.0
    }

    /// Returns the instant the due date denotes.
    #[must_use]
    pub fn deadline(self) -> DateTime<Utc> {
        self.0.and_time(NaiveTime::MIN).and_utc()
    }

    /// Returns whole days until the deadline, rounded up.
    ///
    /// Zero means the deadline is now or less than a day has passed since
    /// it; negative values count days overdue.
    #[must_use]
    pub fn days_until(self, now: DateTime<Utc>) -> i64 {
        let remaining = self.deadline() - now;
        let whole_days = remaining.num_days();
        if remaining > TimeDelta::days(whole_days) {
            whole_days + 1
        } else {
            whole_days
        }
    }
}

impl From<NaiveDate> for DueDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl FromStr for DueDate {
    type Err = TaskDomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
            .map(Self)
            .map_err(|_| TaskDomainError::InvalidDueDate(value.to_owned()))
    }
}

impl fmt::Display for DueDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}
