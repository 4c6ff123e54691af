//! In-memory integration tests for task consistency rules.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use eyre::{Result, ensure};
use rstest::rstest;
use taskgate::boundary::ErrorResponse;
use taskgate::task::{
    domain::{TaskId, TaskStatus},
    ports::UserLookupError,
    services::{TaskErrorKind, TaskFilter, TaskServiceError},
};

use super::helpers::{StaticContext, payload, static_context, user_id};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_write_report_for_existing_user(static_context: StaticContext) -> Result<()> {
    let StaticContext { service, .. } = static_context;

    let task = service
        .create(payload("Write report", TaskStatus::Pending, user_id(10)))
        .await?;

    ensure!(task.id().value() >= 1, "expected an assigned identifier");
    ensure!(task.status() == TaskStatus::Pending, "status changed");
    ensure!(
        service.get(task.id()).await? == task,
        "created task is not retrievable"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_for_missing_user_persists_nothing(static_context: StaticContext) -> Result<()> {
    let StaticContext { service, oracle } = static_context;

    let err = service
        .create(payload("Write report", TaskStatus::Pending, user_id(999)))
        .await
        .err()
        .ok_or_else(|| eyre::eyre!("expected UnknownUser"))?;

    ensure!(err.kind() == TaskErrorKind::UnknownUser, "got {err:?}");
    ensure!(oracle.call_count() == 1, "oracle consulted {} times", oracle.call_count());
    ensure!(service.list().await?.is_empty(), "a record was persisted");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_of_done_task_fails_and_leaves_record(static_context: StaticContext) -> Result<()> {
    let StaticContext { service, .. } = static_context;
    let done = service
        .create(payload("Closed", TaskStatus::Done, user_id(10)))
        .await?;

    let result = service
        .update(
            done.id(),
            payload("Closed", TaskStatus::Done, user_id(10)).with_description("typo fix"),
        )
        .await;

    ensure!(
        matches!(result, Err(TaskServiceError::InvalidState { .. })),
        "got {result:?}"
    );
    ensure!(service.get(done.id()).await? == done, "record changed");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn filter_by_pending_returns_the_pending_tasks(static_context: StaticContext) -> Result<()> {
    let StaticContext { service, .. } = static_context;
    let mut pending = BTreeSet::new();
    for (title, status) in [
        ("one", TaskStatus::Pending),
        ("two", TaskStatus::InProgress),
        ("three", TaskStatus::Pending),
    ] {
        let task = service.create(payload(title, status, user_id(10))).await?;
        if status == TaskStatus::Pending {
            pending.insert(task.id());
        }
    }

    let found: BTreeSet<TaskId> = service
        .filter(TaskFilter::new().with_status(TaskStatus::Pending))
        .await?
        .iter()
        .map(|task| task.id())
        .collect();

    ensure!(found == pending, "expected {pending:?}, found {found:?}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn lookup_timeout_during_update_is_remote_unavailable(
    static_context: StaticContext,
) -> Result<()> {
    let StaticContext { service, oracle } = static_context;
    let task = service
        .create(payload("Write report", TaskStatus::Pending, user_id(10)))
        .await?;
    oracle.fail_with(UserLookupError::Timeout(Duration::from_millis(2000)))?;

    let err = service
        .update(
            task.id(),
            payload("Write report", TaskStatus::InProgress, user_id(10)),
        )
        .await
        .err()
        .ok_or_else(|| eyre::eyre!("expected RemoteUnavailable"))?;

    ensure!(err.kind() == TaskErrorKind::RemoteUnavailable, "got {err:?}");
    ensure!(service.get(task.id()).await? == task, "record changed");

    let response = ErrorResponse::from_task_error(&err, &mockable::DefaultClock);
    ensure!(response.status().as_u16() == 503, "unexpected status");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn recovered_oracle_accepts_the_same_update(static_context: StaticContext) -> Result<()> {
    let StaticContext { service, oracle } = static_context;
    let task = service
        .create(payload("Write report", TaskStatus::Pending, user_id(10)))
        .await?;
    oracle.fail_with(UserLookupError::transport(std::io::Error::other("reset")))?;
    let request = payload("Write report", TaskStatus::InProgress, user_id(20));

    ensure!(
        service.update(task.id(), request.clone()).await.is_err(),
        "update should fail while the oracle is down"
    );
    oracle.recover()?;
    let updated = service.update(task.id(), request).await?;

    ensure!(updated.owner_user_id() == user_id(20), "owner not reassigned");
    ensure!(updated.created_at() == task.created_at(), "creation time changed");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn concurrent_creates_receive_distinct_identifiers(
    static_context: StaticContext,
) -> Result<()> {
    let service = Arc::new(static_context.service);
    let mut handles = Vec::new();
    for n in 0..16 {
        let worker = Arc::clone(&service);
        handles.push(tokio::spawn(async move {
            worker
                .create(payload(&format!("task {n}"), TaskStatus::Pending, user_id(10)))
                .await
        }));
    }

    let mut ids = BTreeSet::new();
    for handle in handles {
        ids.insert(handle.await??.id());
    }

    ensure!(ids.len() == 16, "identifiers collided: {ids:?}");
    ensure!(service.list().await?.len() == 16, "lost a write");
    Ok(())
}
