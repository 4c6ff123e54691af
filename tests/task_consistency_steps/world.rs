//! Shared world state for task consistency BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskgate::task::{
    adapters::memory::{InMemoryTaskRepository, StaticUserExistenceOracle},
    domain::{Task, TaskStatus, UserId},
    services::{TaskConsistencyService, TaskServiceError},
};

/// Service type used by the BDD world.
pub type TestTaskService =
    TaskConsistencyService<InMemoryTaskRepository, StaticUserExistenceOracle, DefaultClock>;

/// Scenario world for task consistency behaviour tests.
pub struct TaskConsistencyWorld {
    pub service: TestTaskService,
    pub oracle: Arc<StaticUserExistenceOracle>,
    pub last_task: Option<Task>,
    pub last_error: Option<TaskServiceError>,
    pub last_listing: Option<Vec<Task>>,
}

impl TaskConsistencyWorld {
    /// Creates a world whose user service knows no users.
    #[must_use]
    pub fn new() -> Self {
        let oracle = Arc::new(StaticUserExistenceOracle::new());
        let service = TaskConsistencyService::new(
            Arc::new(InMemoryTaskRepository::new()),
            Arc::clone(&oracle),
            Arc::new(DefaultClock),
        );

        Self {
            service,
            oracle,
            last_task: None,
            last_error: None,
            last_listing: None,
        }
    }

    /// Records the outcome of a create or update.
    pub fn record(&mut self, result: Result<Task, TaskServiceError>) {
        match result {
            Ok(task) => {
                self.last_task = Some(task);
                self.last_error = None;
            }
            Err(err) => self.last_error = Some(err),
        }
    }
}

impl Default for TaskConsistencyWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskConsistencyWorld {
    TaskConsistencyWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

/// Parses a user identifier from scenario text.
pub fn parse_user(value: i64) -> Result<UserId, eyre::Report> {
    UserId::new(value).map_err(|err| eyre::eyre!("invalid user id in scenario: {err}"))
}

/// Parses a status from scenario text.
pub fn parse_status(value: &str) -> Result<TaskStatus, eyre::Report> {
    value
        .parse()
        .map_err(|err| eyre::eyre!("invalid status in scenario: {err}"))
}
