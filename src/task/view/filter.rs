//! Filter modes for the task view.

use crate::task::domain::{Task, TaskDomainError};
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Look-ahead used by the `urgent` filter and the due-soon count.
pub const URGENT_WINDOW: TimeDelta = TimeDelta::hours(48);

/// Filter mode selected by the user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskFilter {
    /// Every task.
    #[default]
    All,
    /// Incomplete tasks.
    Active,
    /// Completed tasks.
    Completed,
    /// Incomplete tasks whose due date has passed.
    Overdue,
    /// Incomplete tasks due within [`URGENT_WINDOW`].
    Urgent,
}

impl TaskFilter {
    /// Returns the canonical name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Overdue => "overdue",
            Self::Urgent => "urgent",
        }
    }

    /// Returns whether `task` passes this filter at `now`.
    #[must_use]
    pub fn matches(self, task: &Task, now: DateTime<Utc>) -> bool {
        match self {
            Self::All => true,
            Self::Active => !task.is_completed(),
            Self::Completed => task.is_completed(),
            Self::Overdue => task.is_overdue(now),
            Self::Urgent => task.is_due_within(now, URGENT_WINDOW),
        }
    }
}

impl TryFrom<&str> for TaskFilter {
    type Error = TaskDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "all" => Ok(Self::All),
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            "overdue" => Ok(Self::Overdue),
            "urgent" => Ok(Self::Urgent),
            _ => Err(TaskDomainError::InvalidFilter(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
