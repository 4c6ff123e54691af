//! Status guard applied before any task update.

use super::{Task, TaskClosedError, TaskStatus};

/// Enforces which mutations are legal given a task's current status.
///
/// The guard fails closed: a `Done` task rejects every update, including one
/// that only changes the status. Creation is not guarded.
#[derive(Debug, Clone, Copy, Default)]
pub struct TaskStatusGuard;

impl TaskStatusGuard {
    /// Returns whether a task currently in `current` may be mutated.
    #[must_use]
    pub const fn can_mutate(current: TaskStatus) -> bool {
        current.can_mutate()
    }

    /// Checks the task's current status, not any incoming one.
    ///
    /// # Errors
    ///
    /// Returns [`TaskClosedError`] when the task is `Done`.
    pub const fn ensure_mutable(task: &Task) -> Result<(), TaskClosedError> {
        if Self::can_mutate(task.status()) {
            return Ok(());
        }
        Err(TaskClosedError {
            task_id: task.id(),
            status: task.status(),
        })
    }
}
