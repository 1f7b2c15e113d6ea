//! Shared world state for task board BDD scenarios.

use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Local, Utc};
use mockable::Clock;
use rstest::fixture;
use taskmaster::task::{
    adapters::memory::InMemorySnapshotStore,
    domain::Task,
    ports::StorageKey,
    services::{TaskLifecycleError, TaskLifecycleService, TaskStore},
    view::{TaskStats, ViewSelection, project},
};

/// Clock frozen at the scenario's reference instant.
#[derive(Debug, Clone)]
pub struct ScenarioClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl ScenarioClock {
    fn at(now: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(Mutex::new(now)),
        }
    }
}

impl Clock for ScenarioClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Service type used by the BDD world.
pub type TestTaskService = TaskLifecycleService<InMemorySnapshotStore, ScenarioClock>;

/// Scenario world for task board behaviour tests.
pub struct TaskBoardWorld {
    pub service: TestTaskService,
    pub clock: ScenarioClock,
    pub selection: ViewSelection,
    pub visible: Vec<String>,
    pub last_create_result: Option<Result<Task, TaskLifecycleError>>,
    pub last_deleted: Option<Option<Task>>,
    pub stats: Option<TaskStats>,
}

impl TaskBoardWorld {
    /// Creates a world whose clock reads 09:00 UTC on 2026-03-10.
    #[must_use]
    pub fn new() -> Self {
        let now = DateTime::parse_from_rfc3339("2026-03-10T09:00:00Z")
            .map(|instant| instant.with_timezone(&Utc))
            .expect("valid reference instant");
        let clock = ScenarioClock::at(now);
        let store = TaskStore::new(
            Arc::new(InMemorySnapshotStore::new()),
            StorageKey::default(),
        );

        Self {
            service: TaskLifecycleService::new(store, Arc::new(clock.clone())),
            clock,
            selection: ViewSelection::default(),
            visible: Vec::new(),
            last_create_result: None,
            last_deleted: None,
            stats: None,
        }
    }

    /// Looks up a task by its title.
    pub fn task_titled(&self, title: &str) -> Result<&Task, eyre::Report> {
        self.service
            .tasks()
            .iter()
            .find(|task| task.title().as_str() == title)
            .ok_or_else(|| eyre::eyre!("no task titled {title:?}"))
    }

    /// Recomputes the visible titles from the current selection.
    pub fn refresh_view(&mut self) {
        let now = self.clock.utc();
        self.visible = project(self.service.tasks(), &self.selection, now)
            .into_iter()
            .map(|task| task.title().to_string())
            .collect();
    }
}

impl Default for TaskBoardWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskBoardWorld {
    TaskBoardWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
