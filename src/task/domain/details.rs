//! User-editable task fields.

use super::{DueDate, Priority, TaskDomainError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task title that is non-empty after trimming.
///
/// The original text is kept as supplied; only the emptiness check trims.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaskTitle(String);

impl TaskTitle {
    /// Creates a validated title.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the value is empty or
    /// whitespace only.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(TaskDomainError::EmptyTitle);
        }
        Ok(Self(raw))
    }

    /// Returns the title as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TaskTitle {
    type Error = TaskDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TaskTitle> for String {
    fn from(title: TaskTitle) -> Self {
        title.0
    }
}

impl AsRef<str> for TaskTitle {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The four fields a user supplies when creating or editing a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDetails {
    /// Validated title.
    pub title: TaskTitle,
    /// Free-form description, possibly empty.
    pub description: String,
    /// Priority level.
    pub priority: Priority,
    /// Optional due date.
    pub due_date: Option<DueDate>,
}

impl TaskDetails {
    /// Creates details with an empty description, default priority, and no
    /// due date.
    #[must_use]
    pub fn new(title: TaskTitle) -> Self {
        Self {
            title,
            description: String::new(),
            priority: Priority::default(),
            due_date: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets or clears the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: Option<DueDate>) -> Self {
        self.due_date = due_date;
        self
    }
}
