//! Shared fixtures for task unit tests.

use crate::task::domain::{
    DueDate, PersistedTaskData, Priority, Task, TaskDetails, TaskId, TaskTitle,
};
use crate::task::ports::{SnapshotStore, SnapshotStoreError, SnapshotStoreResult, StorageKey};
use async_trait::async_trait;
use chrono::{DateTime, Local, NaiveDate, TimeDelta, Utc};
use mockable::Clock;
use mockall::mock;
use std::sync::{Arc, Mutex};

mock! {
    pub Snapshots {}

    #[async_trait]
    impl SnapshotStore for Snapshots {
        async fn read(&self, key: &StorageKey) -> SnapshotStoreResult<Option<String>>;
        async fn write(&self, key: &StorageKey, contents: &str) -> SnapshotStoreResult<()>;
    }
}

/// Error standing in for an unavailable backing store.
pub fn storage_unavailable() -> SnapshotStoreError {
    SnapshotStoreError::persistence(std::io::Error::other("storage unavailable"))
}

/// Clock pinned to a settable instant.
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl FixedClock {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(Mutex::new(now)),
        }
    }

    pub fn advance(&self, delta: TimeDelta) {
        let mut now = self
            .now
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *now += delta;
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self
            .now
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

/// Parses an RFC 3339 instant.
pub fn instant(value: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(value)
        .expect("valid RFC 3339 instant")
        .with_timezone(&Utc)
}

/// Builds a due date from calendar parts.
pub fn due(year: i32, month: u32, day: u32) -> DueDate {
    DueDate::new(NaiveDate::from_ymd_opt(year, month, day).expect("valid calendar date"))
}

/// Reference instant used across view and stats tests: noon on 2026-03-10.
pub fn reference_now() -> DateTime<Utc> {
    instant("2026-03-10T12:00:00Z")
}

/// Builder for tasks with explicit field values.
pub struct TaskBuilder {
    title: &'static str,
    description: &'static str,
    priority: Priority,
    due_date: Option<DueDate>,
    completed: bool,
    created_at: DateTime<Utc>,
}

impl TaskBuilder {
    pub fn new(title: &'static str) -> Self {
        Self {
            title,
            description: "",
            priority: Priority::Medium,
            due_date: None,
            completed: false,
            created_at: instant("2026-03-01T09:00:00Z"),
        }
    }

    pub const fn description(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }

    pub const fn priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub const fn due(mut self, due_date: DueDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub const fn completed(mut self) -> Self {
        self.completed = true;
        self
    }

    pub const fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    pub fn build(self) -> Task {
        let details = TaskDetails::new(TaskTitle::new(self.title).expect("non-empty title"))
            .with_description(self.description)
            .with_priority(self.priority)
            .with_due_date(self.due_date);
        Task::from_persisted(PersistedTaskData {
            id: TaskId::new(),
            details,
            completed: self.completed,
            created_at: self.created_at,
            completed_at: self.completed.then_some(self.created_at),
        })
    }
}

/// Returns the titles of `tasks` in order.
pub fn titles<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> Vec<&'a str> {
    tasks
        .into_iter()
        .map(|task| task.title().as_str())
        .collect()
}
