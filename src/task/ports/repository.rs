//! Repository port for task persistence and lookup.

use crate::task::domain::{NewTask, Task, TaskId, TaskStatus, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
///
/// Each call is atomic for the record it touches. Sequences of calls are not:
/// services that read, check, and then write accept that another writer may
/// interleave. Every listing is ordered by ascending identifier.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task and returns it with its assigned identifier.
    async fn insert(&self, task: NewTask) -> TaskRepositoryResult<Task>;

    /// Writes a task under its identifier, replacing any stored record.
    ///
    /// A record that was deleted since it was read is written back.
    async fn save(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns every stored task.
    async fn list(&self) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns the tasks referencing the owner.
    async fn find_by_owner(&self, owner: UserId) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns the tasks in the status.
    async fn find_by_status(&self, status: TaskStatus) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns the tasks referencing the owner that are also in the status.
    async fn find_by_owner_and_status(
        &self,
        owner: UserId,
        status: TaskStatus,
    ) -> TaskRepositoryResult<Vec<Task>>;

    /// Removes a task. Returns `false` when no such task was stored.
    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<bool>;

    /// Counts the tasks referencing the owner.
    async fn count_by_owner(&self, owner: UserId) -> TaskRepositoryResult<u64>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
