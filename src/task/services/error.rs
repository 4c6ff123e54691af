//! Error taxonomy for task service operations.

use super::TaskValidationError;
use crate::task::{
    domain::{TaskClosedError, TaskId, TaskStatus, UserId},
    ports::{TaskRepositoryError, UserLookupError},
};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Stable classification of task service failures.
///
/// Callers branch on the kind; the variant payloads carry the context.
/// `UnknownUser` ("verified absent") and `RemoteUnavailable` ("could not
/// verify") are never merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskErrorKind {
    /// The targeted task does not exist.
    NotFound,
    /// The referenced user does not exist.
    UnknownUser,
    /// The task's current status forbids the mutation.
    InvalidState,
    /// The user existence check could not be completed.
    RemoteUnavailable,
    /// The payload is structurally invalid.
    ValidationFailure,
    /// The task store failed.
    Persistence,
}

impl TaskErrorKind {
    /// Returns the canonical name of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "NOT_FOUND",
            Self::UnknownUser => "UNKNOWN_USER",
            Self::InvalidState => "INVALID_STATE",
            Self::RemoteUnavailable => "REMOTE_UNAVAILABLE",
            Self::ValidationFailure => "VALIDATION_FAILURE",
            Self::Persistence => "PERSISTENCE",
        }
    }

    /// Returns whether a caller may reasonably retry the same request later.
    ///
    /// Nothing inside the service retries.
    #[must_use]
    pub const fn is_transient(self) -> bool {
        matches!(self, Self::RemoteUnavailable | Self::Persistence)
    }
}

impl fmt::Display for TaskErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Service-level errors for task operations.
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// The payload is structurally invalid.
    #[error(transparent)]
    Validation(#[from] TaskValidationError),

    /// No task has the identifier.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The user service reports that the user does not exist.
    #[error("user {0} does not exist")]
    UnknownUser(UserId),

    /// The task is in a status that forbids updates.
    #[error("task {task_id} is {status} and can no longer be modified")]
    InvalidState {
        /// Task that rejected the update.
        task_id: TaskId,
        /// Status the task was in.
        status: TaskStatus,
    },

    /// The user existence check failed to complete.
    #[error("could not verify user {user_id}: {source}")]
    RemoteUnavailable {
        /// User whose existence was being checked.
        user_id: UserId,
        /// Underlying lookup failure.
        source: UserLookupError,
    },

    /// Repository operation failed.
    #[error(transparent)]
    Repository(TaskRepositoryError),
}

impl TaskServiceError {
    /// Returns the stable classification of the error.
    #[must_use]
    pub const fn kind(&self) -> TaskErrorKind {
        match self {
            Self::Validation(_) => TaskErrorKind::ValidationFailure,
            Self::NotFound(_) => TaskErrorKind::NotFound,
            Self::UnknownUser(_) => TaskErrorKind::UnknownUser,
            Self::InvalidState { .. } => TaskErrorKind::InvalidState,
            Self::RemoteUnavailable { .. } => TaskErrorKind::RemoteUnavailable,
            Self::Repository(_) => TaskErrorKind::Persistence,
        }
    }

    /// Returns the identifier the error is about: the task for not-found and
    /// invalid-state errors, the user for lookup errors.
    #[must_use]
    pub const fn identifier(&self) -> Option<i64> {
        match self {
            Self::NotFound(task_id) | Self::InvalidState { task_id, .. } => Some(task_id.value()),
            Self::UnknownUser(user_id) | Self::RemoteUnavailable { user_id, .. } => {
                Some(user_id.value())
            }
            Self::Validation(_) | Self::Repository(_) => None,
        }
    }
}

impl From<TaskClosedError> for TaskServiceError {
    fn from(err: TaskClosedError) -> Self {
        Self::InvalidState {
            task_id: err.task_id,
            status: err.status,
        }
    }
}

impl From<TaskRepositoryError> for TaskServiceError {
    fn from(err: TaskRepositoryError) -> Self {
        match err {
            TaskRepositoryError::NotFound(task_id) => Self::NotFound(task_id),
            TaskRepositoryError::Persistence(_) => Self::Repository(err),
        }
    }
}

/// Result type for task service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;
