//! Filtered, searched, and sorted display sequence.

use super::{SearchQuery, TaskFilter};
use crate::task::domain::Task;
use chrono::{DateTime, Utc};
use std::cmp::Ordering;

/// User-selected view criteria.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewSelection {
    /// Active filter mode.
    pub filter: TaskFilter,
    /// Live search text.
    pub search: SearchQuery,
}

impl ViewSelection {
    /// Creates a selection from a filter and raw search text.
    #[must_use]
    pub fn new(filter: TaskFilter, search: &str) -> Self {
        Self {
            filter,
            search: SearchQuery::new(search),
        }
    }

    /// Returns whether `task` passes both the filter and the search.
    #[must_use]
    pub fn includes(&self, task: &Task, now: DateTime<Utc>) -> bool {
        self.filter.matches(task, now) && self.search.matches(task)
    }
}

/// Projects the collection into display order.
///
/// Keeps tasks that satisfy `selection` at `now` and sorts them with
/// [`display_order`]. The sort is stable, so fully tied tasks keep their
/// collection order.
#[must_use]
pub fn project<'a>(
    tasks: &'a [Task],
    selection: &ViewSelection,
    now: DateTime<Utc>,
) -> Vec<&'a Task> {
    let mut visible: Vec<&Task> = tasks
        .iter()
        .filter(|task| selection.includes(task, now))
        .collect();
    visible.sort_by(|a, b| display_order(a, b));
    visible
}

/// Display comparator.
///
/// Incomplete before completed, then higher priority, then earlier due date
/// (dated before undated), then most recently created.
#[must_use]
pub fn display_order(a: &Task, b: &Task) -> Ordering {
    a.is_completed()
        .cmp(&b.is_completed())
        .then_with(|| b.priority().cmp(&a.priority()))
        .then_with(|| match (a.due_date(), b.due_date()) {
            (Some(left), Some(right)) => left.cmp(&right),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
        .then_with(|| b.created_at().cmp(&a.created_at()))
}
