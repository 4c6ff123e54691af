//! In-memory adapters for task ports.

mod oracle;
mod task;

pub use oracle::StaticUserExistenceOracle;
pub use task::InMemoryTaskRepository;
