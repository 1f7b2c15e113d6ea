//! Application services for the task collection.

mod lifecycle;
mod store;

pub use lifecycle::{
    CreateTaskRequest, EditTaskRequest, MAX_SUBMIT_LATENCY, TaskLifecycleError,
    TaskLifecycleResult, TaskLifecycleService,
};
pub use store::{CorruptSnapshotPolicy, TaskStore, TaskStoreError, TaskStoreResult};
