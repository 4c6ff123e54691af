//! Integration tests wiring the task context to the in-process user directory.

use eyre::{Result, ensure};
use rstest::rstest;
use taskgate::task::{
    domain::TaskStatus,
    services::{TaskErrorKind, TaskFilter},
};
use taskgate::user::services::UserRequest;

use super::helpers::{CrossContext, cross_context, payload};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_can_reference_a_registered_user(cross_context: CrossContext) -> Result<()> {
    let CrossContext { users, tasks } = cross_context;
    let ada = users
        .create(UserRequest::new("Ada", "ada@example.com"))
        .await?;

    let task = tasks
        .create(payload("Write report", TaskStatus::Pending, ada.id()))
        .await?;

    ensure!(task.owner_user_id() == ada.id(), "owner mismatch");
    ensure!(tasks.has_tasks_for_user(ada.id()).await?, "task not counted");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_user_orphans_their_tasks(cross_context: CrossContext) -> Result<()> {
    let CrossContext { users, tasks } = cross_context;
    let ada = users
        .create(UserRequest::new("Ada", "ada@example.com"))
        .await?;
    let task = tasks
        .create(payload("Write report", TaskStatus::Pending, ada.id()))
        .await?;

    users.delete(ada.id()).await?;

    ensure!(
        tasks.list().await? == vec![task.clone()],
        "orphaned task should still be listed"
    );
    ensure!(
        tasks.has_tasks_for_user(ada.id()).await?,
        "orphaned reference should still be counted"
    );
    let err = tasks
        .update(
            task.id(),
            payload("Write report", TaskStatus::InProgress, ada.id()),
        )
        .await
        .err()
        .ok_or_else(|| eyre::eyre!("expected UnknownUser"))?;
    ensure!(err.kind() == TaskErrorKind::UnknownUser, "got {err:?}");
    let by_owner = tasks.filter(TaskFilter::new().with_owner(ada.id())).await;
    ensure!(by_owner.is_err(), "filtering by a deleted owner should fail");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn orphaned_task_can_be_reassigned_to_another_user(
    cross_context: CrossContext,
) -> Result<()> {
    let CrossContext { users, tasks } = cross_context;
    let ada = users
        .create(UserRequest::new("Ada", "ada@example.com"))
        .await?;
    let grace = users
        .create(UserRequest::new("Grace", "grace@example.com"))
        .await?;
    let task = tasks
        .create(payload("Write report", TaskStatus::Pending, ada.id()))
        .await?;
    users.delete(ada.id()).await?;

    let reassigned = tasks
        .update(
            task.id(),
            payload("Write report", TaskStatus::InProgress, grace.id()),
        )
        .await?;

    ensure!(reassigned.owner_user_id() == grace.id(), "owner not reassigned");
    ensure!(!tasks.has_tasks_for_user(ada.id()).await?, "stale reference remains");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleted_task_stops_counting_towards_its_owner(cross_context: CrossContext) -> Result<()> {
    let CrossContext { users, tasks } = cross_context;
    let ada = users
        .create(UserRequest::new("Ada", "ada@example.com"))
        .await?;
    let task = tasks
        .create(payload("Write report", TaskStatus::Done, ada.id()))
        .await?;

    tasks.delete(task.id()).await?;

    ensure!(!tasks.has_tasks_for_user(ada.id()).await?, "deleted task still counted");
    Ok(())
}
