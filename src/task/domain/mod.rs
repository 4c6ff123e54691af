//! Domain model for tasks.
//!
//! Tasks, their status state machine, and validated scalar values. No
//! infrastructure concerns cross this boundary.

mod error;
mod guard;
mod ids;
mod status;
mod task;

pub use error::{ParseTaskStatusError, TaskClosedError, TaskDomainError};
pub use guard::TaskStatusGuard;
pub use ids::TaskId;
pub use status::TaskStatus;
pub use task::{NewTask, PersistedTaskData, Task, TaskContent, TaskTitle};

pub use crate::user::domain::UserId;
