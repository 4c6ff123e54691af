//! Consistency service behaviour over the `PostgreSQL` store.

use crate::postgres::helpers::{TestDatabase, task_database};
use async_trait::async_trait;
use eyre::{Result, ensure};
use mockable::DefaultClock;
use rstest::rstest;
use std::sync::Arc;
use taskgate::task::{
    adapters::{memory::StaticUserExistenceOracle, postgres::PostgresTaskRepository},
    domain::{TaskId, TaskStatus, UserId},
    ports::{TaskRepository, UserExistenceOracle, UserLookupError, UserLookupResult},
    services::{TaskConsistencyService, TaskErrorKind, TaskPayload},
};

fn user(value: i64) -> UserId {
    UserId::new(value).expect("valid user id")
}

fn payload(title: &str, status: TaskStatus, owner: i64) -> TaskPayload {
    TaskPayload::new(title, status, user(owner))
}

fn static_service(
    db: &TestDatabase,
    users: impl IntoIterator<Item = UserId>,
) -> TaskConsistencyService<PostgresTaskRepository, StaticUserExistenceOracle, DefaultClock> {
    TaskConsistencyService::new(
        Arc::new(db.repository.clone()),
        Arc::new(StaticUserExistenceOracle::with_users(users)),
        Arc::new(DefaultClock),
    )
}

/// Oracle that deletes a task while the update is waiting on it.
struct DeletingOracle {
    repository: PostgresTaskRepository,
    victim: TaskId,
}

#[async_trait]
impl UserExistenceOracle for DeletingOracle {
    async fn exists(&self, _user_id: UserId) -> UserLookupResult<bool> {
        self.repository
            .delete(self.victim)
            .await
            .map_err(UserLookupError::transport)?;
        Ok(true)
    }
}

#[rstest]
fn rejected_owner_leaves_the_row_untouched(task_database: Option<TestDatabase>) -> Result<()> {
    let Some(db) = task_database else {
        return Ok(());
    };
    let service = static_service(&db, [user(10)]);
    let task = db.block_on(service.create(payload("Write report", TaskStatus::Pending, 10)))?;

    let err = db
        .block_on(service.update(task.id(), payload("Stolen", TaskStatus::Pending, 99)))
        .expect_err("unknown owner");

    ensure!(err.kind() == TaskErrorKind::UnknownUser, "kind: {:?}", err.kind());
    let stored = db.block_on(db.repository.find_by_id(task.id()))?;
    ensure!(stored.as_ref() == Some(&task), "row changed after rejection");
    Ok(())
}

#[rstest]
fn done_task_refuses_updates_in_the_store(task_database: Option<TestDatabase>) -> Result<()> {
    let Some(db) = task_database else {
        return Ok(());
    };
    let service = static_service(&db, [user(10)]);
    let task = db.block_on(service.create(payload("Shipped", TaskStatus::Done, 10)))?;

    let err = db
        .block_on(service.update(task.id(), payload("Reopened", TaskStatus::Pending, 10)))
        .expect_err("done task is closed");

    ensure!(err.kind() == TaskErrorKind::InvalidState, "kind: {:?}", err.kind());
    ensure!(err.identifier() == Some(task.id().value()), "identifier");
    let stored = db.block_on(db.repository.find_by_id(task.id()))?;
    ensure!(stored.as_ref() == Some(&task), "done task was modified");
    Ok(())
}

#[rstest]
fn delete_during_update_lookup_is_undone_by_the_write(
    task_database: Option<TestDatabase>,
) -> Result<()> {
    let Some(db) = task_database else {
        return Ok(());
    };
    let task = db.block_on(
        static_service(&db, [user(42)]).create(payload("Contested", TaskStatus::Pending, 42)),
    )?;
    let service = TaskConsistencyService::new(
        Arc::new(db.repository.clone()),
        Arc::new(DeletingOracle {
            repository: db.repository.clone(),
            victim: task.id(),
        }),
        Arc::new(DefaultClock),
    );

    let updated = db.block_on(
        service.update(task.id(), payload("Resurrected", TaskStatus::InProgress, 42)),
    )?;

    let stored = db.block_on(db.repository.find_by_id(task.id()))?;
    ensure!(stored.as_ref() == Some(&updated), "write did not re-create the task");
    ensure!(
        stored.map(|found| found.created_at()) == Some(task.created_at()),
        "re-created row lost its creation time"
    );
    Ok(())
}
