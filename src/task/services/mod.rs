//! Application services for task management.

mod consistency;
mod error;
mod payload;

pub use consistency::TaskConsistencyService;
pub use error::{TaskErrorKind, TaskServiceError, TaskServiceResult};
pub use payload::{FieldViolation, TaskField, TaskFilter, TaskPayload, TaskValidationError};
