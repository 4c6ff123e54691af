//! Error types for task domain validation and parsing.

use super::{TaskId, TaskStatus};
use thiserror::Error;

/// Errors returned while constructing domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task identifier is not a positive integer.
    #[error("invalid task identifier {0}, expected a positive integer")]
    InvalidTaskId(i64),

    /// The task title is empty or whitespace only.
    #[error("task title must not be empty")]
    EmptyTitle,
}

/// Error returned by the status guard when a task no longer accepts edits.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("task {task_id} is {status} and can no longer be modified")]
pub struct TaskClosedError {
    /// Task that rejected the mutation.
    pub task_id: TaskId,
    /// Status the task was in when the mutation was attempted.
    pub status: TaskStatus,
}

/// Error returned while parsing task statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);
