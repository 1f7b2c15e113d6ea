//! Summary counts over the task collection.

use super::URGENT_WINDOW;
use crate::task::domain::{Priority, Task};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Independent counts derived from the collection at one instant.
///
/// A task may contribute to several counts. `active + completed == total`
/// always holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStats {
    /// Number of tasks.
    pub total: usize,
    /// Completed tasks.
    pub completed: usize,
    /// Incomplete tasks.
    pub active: usize,
    /// Incomplete tasks past their due date.
    pub overdue: usize,
    /// Incomplete tasks with urgent priority.
    pub urgent_by_priority: usize,
    /// Incomplete tasks due within the urgent window.
    pub urgent_by_due_date: usize,
}

impl TaskStats {
    /// Counts the collection at `now`.
    #[must_use]
    pub fn collect(tasks: &[Task], now: DateTime<Utc>) -> Self {
        tasks.iter().fold(Self::default(), |mut stats, task| {
            stats.total += 1;
            if task.is_completed() {
                stats.completed += 1;
            } else {
                stats.active += 1;
                if task.priority() == Priority::Urgent {
                    stats.urgent_by_priority += 1;
                }
            }
            if task.is_overdue(now) {
                stats.overdue += 1;
            }
            if task.is_due_within(now, URGENT_WINDOW) {
                stats.urgent_by_due_date += 1;
            }
            stats
        })
    }
}
