//! Shared test helpers for in-memory integration tests.

use chrono::{DateTime, Local, TimeDelta, Utc};
use mockable::Clock;
use rstest::fixture;
use std::sync::{Arc, Mutex, PoisonError};
use taskmaster::task::{
    adapters::memory::InMemorySnapshotStore,
    ports::StorageKey,
    services::{TaskLifecycleService, TaskStore},
};

/// Service type used by the in-memory integration tests.
pub type TestService = TaskLifecycleService<InMemorySnapshotStore, ManualClock>;

/// Clock that only moves when told to.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl ManualClock {
    /// Creates a clock reading `now`.
    #[must_use]
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(Mutex::new(now)),
        }
    }

    /// Moves the clock forward.
    pub fn advance(&self, delta: TimeDelta) {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner) += delta;
    }
}

impl Clock for ManualClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Parses an RFC 3339 instant.
///
/// # Panics
///
/// Panics when `value` is not RFC 3339.
#[must_use]
pub fn instant(value: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(value)
        .expect("valid RFC 3339 instant")
        .with_timezone(&Utc)
}

/// Provides a clock starting at 09:00 UTC on 2026-03-10.
#[fixture]
pub fn clock() -> ManualClock {
    ManualClock::at(instant("2026-03-10T09:00:00Z"))
}

/// Provides a shared snapshot store.
#[fixture]
pub fn snapshots() -> Arc<InMemorySnapshotStore> {
    Arc::new(InMemorySnapshotStore::new())
}

/// Builds a service over `snapshots` using the default storage key.
#[must_use]
pub fn service_over(snapshots: &Arc<InMemorySnapshotStore>, clock: &ManualClock) -> TestService {
    let store = TaskStore::new(Arc::clone(snapshots), StorageKey::default());
    TaskLifecycleService::new(store, Arc::new(clock.clone()))
}
