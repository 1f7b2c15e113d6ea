//! Domain model for the task tracker.
//!
//! The domain holds the task aggregate and its validated value types. It has
//! no knowledge of persistence or presentation.

mod details;
mod due_date;
mod error;
mod ids;
mod priority;
mod task;

pub use details::{TaskDetails, TaskTitle};
pub use due_date::DueDate;
pub use error::TaskDomainError;
pub use ids::TaskId;
pub use priority::Priority;
pub use task::{PersistedTaskData, Task};
