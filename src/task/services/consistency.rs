//! Task creation and mutation with cross-service owner verification.

use super::{TaskFilter, TaskPayload, TaskServiceError, TaskServiceResult};
use crate::task::{
    domain::{NewTask, Task, TaskId, TaskStatusGuard, UserId},
    ports::{TaskRepository, UserExistenceOracle},
};
use mockable::Clock;
use std::sync::Arc;

/// Orchestrates task reads and writes against the task store, the user
/// existence oracle, and the status guard.
///
/// Every write that sets an owner asks the oracle exactly once, on the
/// calling task, before touching the store. Nothing is retried or cached.
#[derive(Clone)]
pub struct TaskConsistencyService<R, O, C>
where
    R: TaskRepository,
    O: UserExistenceOracle,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    oracle: Arc<O>,
    clock: Arc<C>,
}

impl<R, O, C> TaskConsistencyService<R, O, C>
where
    R: TaskRepository,
    O: UserExistenceOracle,
    C: Clock + Send + Sync,
{
    /// Creates a new task consistency service.
    #[must_use]
    pub const fn new(repository: Arc<R>, oracle: Arc<O>, clock: Arc<C>) -> Self {
        Self {
            repository,
            oracle,
            clock,
        }
    }

    /// Returns every stored task.
    ///
    /// Owner references are not re-validated, so tasks whose owner has since
    /// been deleted are included.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when the store fails.
    pub async fn list(&self) -> TaskServiceResult<Vec<Task>> {
        Ok(self.repository.list().await?)
    }

    /// Retrieves a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when no task has the identifier.
    pub async fn get(&self, id: TaskId) -> TaskServiceResult<Task> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(TaskServiceError::NotFound(id))
    }

    /// Returns the tasks matching every constraint in `filter`.
    ///
    /// An owner constraint is verified with the oracle first. A status-only
    /// or empty filter makes no remote call.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::UnknownUser`] or
    /// [`TaskServiceError::RemoteUnavailable`] from the owner check.
    pub async fn filter(&self, filter: TaskFilter) -> TaskServiceResult<Vec<Task>> {
        let tasks = match (filter.owner_user_id(), filter.status()) {
            (Some(owner), Some(status)) => {
                self.verify_user(owner).await?;
                self.repository
                    .find_by_owner_and_status(owner, status)
                    .await?
            }
            (Some(owner), None) => {
                self.verify_user(owner).await?;
                self.repository.find_by_owner(owner).await?
            }
            (None, Some(status)) => self.repository.find_by_status(status).await?,
            (None, None) => self.repository.list().await?,
        };
        tracing::debug!(
            owner_user_id = ?filter.owner_user_id(),
            status = ?filter.status(),
            matches = tasks.len(),
            "filtered tasks"
        );
        Ok(tasks)
    }

    /// Creates a task owned by an existing user.
    ///
    /// The status is accepted as given, `DONE` included. The store assigns
    /// the identifier and the clock sets the creation time.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Validation`] for a malformed payload,
    /// [`TaskServiceError::UnknownUser`] when the owner does not exist, and
    /// [`TaskServiceError::RemoteUnavailable`] when that cannot be verified.
    /// Nothing is stored on error.
    pub async fn create(&self, payload: TaskPayload) -> TaskServiceResult<Task> {
        let content = payload.validate().inspect_err(|err| {
            tracing::warn!(error = %err, "rejected task creation");
        })?;
        self.verify_user(content.owner_user_id()).await?;

        let task = self
            .repository
            .insert(NewTask::new(content, &*self.clock))
            .await?;
        tracing::info!(
            task_id = %task.id(),
            owner_user_id = %task.owner_user_id(),
            status = %task.status(),
            "task created"
        );
        Ok(task)
    }

    /// Overwrites a task's title, description, status, due date, and owner.
    ///
    /// The guard looks at the stored status, so a `DONE` task rejects every
    /// update, including one that only reopens it. The incoming owner is
    /// verified even when unchanged. The identifier and creation time are
    /// kept.
    ///
    /// Read, checks, and write are not atomic together. If the task is
    /// deleted concurrently after it was read, the write re-creates it.
    ///
    /// # Errors
    ///
    /// Returns, in order of checking, [`TaskServiceError::Validation`],
    /// [`TaskServiceError::NotFound`], [`TaskServiceError::InvalidState`],
    /// then [`TaskServiceError::UnknownUser`] or
    /// [`TaskServiceError::RemoteUnavailable`]. The stored record is unchanged
    /// on error.
    pub async fn update(&self, id: TaskId, payload: TaskPayload) -> TaskServiceResult<Task> {
        let content = payload.validate().inspect_err(|err| {
            tracing::warn!(task_id = %id, error = %err, "rejected task update");
        })?;
        let mut task = self.get(id).await?;

        TaskStatusGuard::ensure_mutable(&task).inspect_err(|err| {
            tracing::warn!(task_id = %id, status = %err.status, "rejected update of closed task");
        })?;
        self.verify_user(content.owner_user_id()).await?;

        task.apply(content);
        self.repository.save(&task).await?;
        tracing::info!(
            task_id = %id,
            owner_user_id = %task.owner_user_id(),
            status = %task.status(),
            "task updated"
        );
        Ok(task)
    }

    /// Removes a task regardless of its status.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when no task has the identifier,
    /// including on a second delete of the same task.
    pub async fn delete(&self, id: TaskId) -> TaskServiceResult<()> {
        if !self.repository.delete(id).await? {
            return Err(TaskServiceError::NotFound(id));
        }
        tracing::info!(task_id = %id, "task deleted");
        Ok(())
    }

    /// Returns whether any stored task references the user.
    ///
    /// Answers from the local store only; the user's existence is not
    /// checked. Intended for the user service to consult before deleting a
    /// user, though nothing in this crate requires it to.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when the store fails.
    pub async fn has_tasks_for_user(&self, user_id: UserId) -> TaskServiceResult<bool> {
        Ok(self.repository.count_by_owner(user_id).await? > 0)
    }

    async fn verify_user(&self, user_id: UserId) -> TaskServiceResult<()> {
        match self.oracle.exists(user_id).await {
            Ok(true) => Ok(()),
            Ok(false) => {
                tracing::warn!(%user_id, "referenced user does not exist");
                Err(TaskServiceError::UnknownUser(user_id))
            }
            Err(source) => {
                tracing::warn!(%user_id, error = %source, "user existence check failed");
                Err(TaskServiceError::RemoteUnavailable { user_id, source })
            }
        }
    }
}
