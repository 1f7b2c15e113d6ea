//! Error types for task domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The priority value is not one of the known levels.
    #[error("unknown priority '{0}', expected low, medium, high, or urgent")]
    InvalidPriority(String),

    /// The due date is not a `YYYY-MM-DD` calendar date.
    #[error("invalid due date '{0}', expected YYYY-MM-DD")]
    InvalidDueDate(String),

    /// The filter name is not one of the known modes.
    #[error("unknown filter '{0}', expected all, active, completed, overdue, or urgent")]
    InvalidFilter(String),

    /// The task identifier is blank.
    #[error("invalid task identifier '{0}'")]
    InvalidTaskId(String),
}
