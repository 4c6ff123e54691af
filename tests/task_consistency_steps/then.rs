//! Then steps for task consistency BDD scenarios.

use super::world::{TaskConsistencyWorld, parse_status, run_async};
use rstest_bdd_macros::then;

#[then("the task is stored with an assigned identifier")]
fn task_is_stored(world: &TaskConsistencyWorld) -> Result<(), eyre::Report> {
    let task = world
        .last_task
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no task was created"))?;
    eyre::ensure!(task.id().value() >= 1, "identifier must be positive");
    let stored = run_async(world.service.get(task.id()))?;
    eyre::ensure!(&stored == task, "stored task differs from the created one");
    Ok(())
}

#[then(r#"the task status is "{status}""#)]
fn task_status_is(world: &TaskConsistencyWorld, status: String) -> Result<(), eyre::Report> {
    let expected = parse_status(&status)?;
    let task = world
        .last_task
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no task was created"))?;
    eyre::ensure!(
        task.status() == expected,
        "expected status {expected}, found {}",
        task.status()
    );
    Ok(())
}

#[then(r#"the request fails with "{kind}""#)]
fn request_fails_with(world: &TaskConsistencyWorld, kind: String) -> Result<(), eyre::Report> {
    let err = world
        .last_error
        .as_ref()
        .ok_or_else(|| eyre::eyre!("expected the request to fail"))?;
    eyre::ensure!(
        err.kind().as_str() == kind,
        "expected {kind}, got {} ({err})",
        err.kind()
    );
    Ok(())
}

#[then("no task is stored")]
fn no_task_is_stored(world: &TaskConsistencyWorld) -> Result<(), eyre::Report> {
    let tasks = run_async(world.service.list())?;
    eyre::ensure!(tasks.is_empty(), "expected no tasks, found {}", tasks.len());
    Ok(())
}

#[then("the stored task is unchanged")]
fn stored_task_is_unchanged(world: &TaskConsistencyWorld) -> Result<(), eyre::Report> {
    let before = world
        .last_task
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing task in scenario world"))?;
    let stored = run_async(world.service.get(before.id()))?;
    eyre::ensure!(&stored == before, "stored task was modified");
    Ok(())
}

#[then("{count:usize} tasks are returned")]
fn tasks_are_returned(world: &TaskConsistencyWorld, count: usize) -> Result<(), eyre::Report> {
    let listing = world
        .last_listing
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no listing was requested"))?;
    eyre::ensure!(
        listing.len() == count,
        "expected {count} tasks, found {}",
        listing.len()
    );
    Ok(())
}

#[then(r#"every returned task has status "{status}""#)]
fn every_task_has_status(world: &TaskConsistencyWorld, status: String) -> Result<(), eyre::Report> {
    let expected = parse_status(&status)?;
    let listing = world
        .last_listing
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no listing was requested"))?;
    eyre::ensure!(
        listing.iter().all(|task| task.status() == expected),
        "listing contains a task outside {expected}"
    );
    Ok(())
}
