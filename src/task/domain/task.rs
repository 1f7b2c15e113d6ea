//! Task aggregate and its completion lifecycle.

use super::{DueDate, Priority, TaskDetails, TaskId, TaskTitle};
use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Tracked work item.
///
/// `completed_at` is present exactly when `completed` is true. Editing never
/// touches `id`, `created_at`, `completed`, or `completed_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    id: TaskId,
    title: TaskTitle,
    #[serde(default)]
    description: String,
    priority: Priority,
    #[serde(default)]
    completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    due_date: Option<DueDate>,
    created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    completed_at: Option<DateTime<Utc>>,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted editable fields.
    pub details: TaskDetails,
    /// Persisted completion flag.
    pub completed: bool,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Creates a new, incomplete task stamped with the clock's current time.
    #[must_use]
    pub fn new(details: TaskDetails, clock: &impl Clock) -> Self {
        let TaskDetails {
            title,
            description,
            priority,
            due_date,
        } = details;

        Self {
            id: TaskId::new(),
            title,
            description,
            priority,
            completed: false,
            due_date,
            created_at: clock.utc(),
            completed_at: None,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        let TaskDetails {
            title,
            description,
            priority,
            due_date,
        } = data.details;

        Self {
            id: data.id,
            title,
            description,
            priority,
            completed: data.completed,
            due_date,
            created_at: data.created_at,
            completed_at: data.completed_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> &TaskId {
        &self.id
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns whether the task is completed.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.completed
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<DueDate> {
        self.due_date
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the completion timestamp, if completed.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Returns the editable fields as a detached value.
    #[must_use]
    pub fn details(&self) -> TaskDetails {
        TaskDetails {
            title: self.title.clone(),
            description: self.description.clone(),
            priority: self.priority,
            due_date: self.due_date,
        }
    }

    /// Replaces the editable fields.
    pub fn apply_details(&mut self, details: TaskDetails) {
        let TaskDetails {
            title,
            description,
            priority,
            due_date,
        } = details;
        self.title = title;
        self.description = description;
        self.priority = priority;
        self.due_date = due_date;
    }

    /// Flips completion, stamping or clearing `completed_at` to match.
    pub fn toggle_completion(&mut self, clock: &impl Clock) {
        self.completed = !self.completed;
        self.completed_at = self.completed.then(|| clock.utc());
    }

    /// Returns whether the task is incomplete and past its due date.
    #[must_use]
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.open_deadline().is_some_and(|deadline| deadline < now)
    }

    /// Returns whether the task is incomplete and due within
    /// `[now, now + window]`, inclusive at both ends.
    #[must_use]
    pub fn is_due_within(&self, now: DateTime<Utc>, window: TimeDelta) -> bool {
        self.open_deadline()
            .is_some_and(|deadline| now <= deadline && deadline <= now + window)
    }

    fn open_deadline(&self) -> Option<DateTime<Utc>> {
        if self.completed {
            return None;
        }
        self.due_date.map(DueDate::deadline)
    }
}
