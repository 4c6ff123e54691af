//! Port contracts for task management.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

pub mod repository;
pub mod user_existence;

pub use repository::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};
pub use user_existence::{UserExistenceOracle, UserLookupError, UserLookupResult};
