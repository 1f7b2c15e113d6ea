//! Service layer for creating, editing, completing, and deleting tasks.

use crate::task::{
    domain::{DueDate, Priority, Task, TaskDetails, TaskDomainError, TaskId, TaskTitle},
    ports::SnapshotStore,
    services::TaskStore,
};
use mockable::Clock;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Upper bound for the simulated submission latency.
pub const MAX_SUBMIT_LATENCY: Duration = Duration::from_secs(2);

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    description: String,
    priority: Priority,
    due_date: Option<DueDate>,
}

impl CreateTaskRequest {
    /// Creates a request with the required title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
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

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DueDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    fn into_details(self) -> Result<TaskDetails, TaskDomainError> {
        build_details(self.title, self.description, self.priority, self.due_date)
    }
}

/// Request payload for editing a task.
///
/// All four editable fields are replaced with the request's values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditTaskRequest {
    task_id: TaskId,
    title: String,
    description: String,
    priority: Priority,
    due_date: Option<DueDate>,
}

impl EditTaskRequest {
    /// Creates a request for `task_id` with the new title.
    #[must_use]
    pub fn new(task_id: TaskId, title: impl Into<String>) -> Self {
        Self {
            task_id,
            title: title.into(),
            description: String::new(),
            priority: Priority::default(),
            due_date: None,
        }
    }

    /// Creates a request pre-filled with the task's current fields.
    #[must_use]
    pub fn prefilled(task: &Task) -> Self {
        Self {
            task_id: task.id().clone(),
            title: task.title().as_str().to_owned(),
            description: task.description().to_owned(),
            priority: task.priority(),
            due_date: task.due_date(),
        }
    }

    /// Sets the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
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

    /// Returns the target task identifier.
    #[must_use]
    pub const fn task_id(&self) -> &TaskId {
        &self.task_id
    }

    fn into_details(self) -> Result<TaskDetails, TaskDomainError> {
        build_details(self.title, self.description, self.priority, self.due_date)
    }
}

fn build_details(
    title: String,
    description: String,
    priority: Priority,
    due_date: Option<DueDate>,
) -> Result<TaskDetails, TaskDomainError> {
    Ok(TaskDetails::new(TaskTitle::new(title)?)
        .with_description(description)
        .with_priority(priority)
        .with_due_date(due_date))
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Domain validation failed; the collection is unchanged.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task lifecycle orchestration service and sole writer of the
/// [`TaskStore`].
///
/// Mutating operations borrow the service mutably, so a pending submission
/// must resolve before another one can start.
pub struct TaskLifecycleService<S, C>
where
    S: SnapshotStore,
    C: Clock + Send + Sync,
{
    store: TaskStore<S>,
    clock: Arc<C>,
    submit_latency: Duration,
}

impl<S, C> TaskLifecycleService<S, C>
where
    S: SnapshotStore,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service over a loaded store.
    #[must_use]
    pub const fn new(store: TaskStore<S>, clock: Arc<C>) -> Self {
        Self {
            store,
            clock,
            submit_latency: Duration::ZERO,
        }
    }

    /// Sets the simulated latency awaited by `create` and `edit` before
    /// committing, clamped to [`MAX_SUBMIT_LATENCY`].
    #[must_use]
    pub fn with_submit_latency(mut self, latency: Duration) -> Self {
        self.submit_latency = latency.min(MAX_SUBMIT_LATENCY);
        self
    }

    /// Returns the underlying store.
    #[must_use]
    pub const fn store(&self) -> &TaskStore<S> {
        &self.store
    }

    /// Returns the collection in storage order, newest first.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        self.store.current()
    }

    /// Creates a task and places it at the front of the collection.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] when the title is blank; the
    /// collection is left unchanged and nothing is written.
    pub async fn create(&mut self, request: CreateTaskRequest) -> TaskLifecycleResult<Task> {
        let details = request.into_details().inspect_err(|err| {
            tracing::debug!(error = %err, "create rejected");
        })?;
        self.simulate_latency().await;

        let task = Task::new(details, &*self.clock);
        let mut collection = Vec::with_capacity(self.store.current().len() + 1);
        collection.push(task.clone());
        collection.extend_from_slice(self.store.current());
        self.store.commit(collection).await;
        tracing::info!(task_id = %task.id(), "task created");
        Ok(task)
    }

    /// Replaces the editable fields of an existing task in place.
    ///
    /// Returns `Ok(None)` when no task has the requested identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] when the title is blank; the
    /// collection is left unchanged and nothing is written.
    pub async fn edit(&mut self, request: EditTaskRequest) -> TaskLifecycleResult<Option<Task>> {
        let task_id = request.task_id().clone();
        let details = request.into_details().inspect_err(|err| {
            tracing::debug!(%task_id, error = %err, "edit rejected");
        })?;
        self.simulate_latency().await;

        let updated = self
            .update_task(&task_id, |task, _| task.apply_details(details))
            .await;
        if updated.is_some() {
            tracing::info!(%task_id, "task edited");
        }
        Ok(updated)
    }

    /// Flips the completion flag of a task.
    ///
    /// Returns `None` when no task has the requested identifier.
    pub async fn toggle_completion(&mut self, task_id: &TaskId) -> Option<Task> {
        let updated = self
            .update_task(task_id, |task, clock| task.toggle_completion(clock))
            .await;
        if let Some(task) = updated.as_ref() {
            tracing::info!(%task_id, completed = task.is_completed(), "task toggled");
        }
        updated
    }

    /// Removes a task from the collection.
    ///
    /// Returns the removed task, or `None` when no task has the requested
    /// identifier.
    pub async fn delete(&mut self, task_id: &TaskId) -> Option<Task> {
        let Some(position) = self.position_of(task_id) else {
            tracing::debug!(%task_id, "delete ignored for unknown task");
            return None;
        };
        let mut collection = self.store.current().to_vec();
        let removed = collection.remove(position);
        self.store.commit(collection).await;
        tracing::info!(%task_id, "task deleted");
        Some(removed)
    }

    async fn update_task<F>(&mut self, task_id: &TaskId, apply: F) -> Option<Task>
    where
        F: FnOnce(&mut Task, &C),
    {
        let Some(position) = self.position_of(task_id) else {
            tracing::debug!(%task_id, "update ignored for unknown task");
            return None;
        };
        let mut collection = self.store.current().to_vec();
        let task = collection.get_mut(position)?;
        apply(task, &*self.clock);
        let updated = task.clone();
        self.store.commit(collection).await;
        Some(updated)
    }

    fn position_of(&self, task_id: &TaskId) -> Option<usize> {
        self.store
            .current()
            .iter()
            .position(|task| task.id() == task_id)
    }

    async fn simulate_latency(&self) {
        if !self.submit_latency.is_zero() {
            tokio::time::sleep(self.submit_latency).await;
        }
    }
}
