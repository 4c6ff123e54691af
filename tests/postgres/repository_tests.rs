//! Repository behaviour against a real `PostgreSQL` database.

use crate::postgres::helpers::{TestDatabase, clock, content, task_database};
use chrono::{Duration, NaiveDate};
use eyre::{Result, ensure};
use mockable::DefaultClock;
use rstest::rstest;
use taskgate::task::{
    domain::{NewTask, PersistedTaskData, Task, TaskId, TaskStatus, TaskTitle, UserId},
    ports::TaskRepository,
};

fn ids(tasks: &[Task]) -> Vec<TaskId> {
    tasks.iter().map(Task::id).collect()
}

fn user(value: i64) -> UserId {
    UserId::new(value).expect("valid user id")
}

fn seed(db: &TestDatabase, clock: &DefaultClock) -> Result<[Task; 5]> {
    let rows = [
        ("Alpha", TaskStatus::Pending, 1),
        ("Beta", TaskStatus::Done, 2),
        ("Gamma", TaskStatus::Pending, 2),
        ("Delta", TaskStatus::InProgress, 1),
        ("Epsilon", TaskStatus::Pending, 1),
    ];
    let mut inserted = Vec::with_capacity(rows.len());
    for (title, status, owner) in rows {
        let task = db.block_on(
            db.repository
                .insert(NewTask::new(content(title, status, owner), clock)),
        )?;
        inserted.push(task);
    }
    <[Task; 5]>::try_from(inserted).map_err(|_| eyre::eyre!("seed size changed"))
}

#[rstest]
fn insert_assigns_ascending_ids_and_round_trips(
    clock: DefaultClock,
    task_database: Option<TestDatabase>,
) -> Result<()> {
    let Some(db) = task_database else {
        return Ok(());
    };
    let due = NaiveDate::from_ymd_opt(2026, 12, 24).expect("valid date");
    let first = db.block_on(db.repository.insert(NewTask::new(
        content("Plan", TaskStatus::Pending, 7)
            .with_description("quarterly")
            .with_due_date(due),
        &clock,
    )))?;
    let second = db.block_on(
        db.repository
            .insert(NewTask::new(content("Ship", TaskStatus::Done, 7), &clock)),
    )?;

    ensure!(second.id().value() > first.id().value(), "ids not ascending");
    let loaded = db
        .block_on(db.repository.find_by_id(first.id()))?
        .ok_or_else(|| eyre::eyre!("inserted task missing"))?;
    ensure!(loaded == first, "stored task differs from insert result");
    ensure!(loaded.description() == Some("quarterly"), "description lost");
    ensure!(loaded.due_date() == Some(due), "due date lost");
    Ok(())
}

#[rstest]
fn finders_return_tasks_in_ascending_id_order(
    clock: DefaultClock,
    task_database: Option<TestDatabase>,
) -> Result<()> {
    let Some(db) = task_database else {
        return Ok(());
    };
    let [alpha, beta, gamma, delta, epsilon] = seed(&db, &clock)?;

    let all = db.block_on(db.repository.list())?;
    let by_owner = db.block_on(db.repository.find_by_owner(user(1)))?;
    let by_status = db.block_on(db.repository.find_by_status(TaskStatus::Pending))?;
    let by_both = db.block_on(
        db.repository
            .find_by_owner_and_status(user(2), TaskStatus::Pending),
    )?;

    ensure!(
        ids(&all) == vec![alpha.id(), beta.id(), gamma.id(), delta.id(), epsilon.id()],
        "list order: {:?}",
        ids(&all)
    );
    ensure!(
        ids(&by_owner) == vec![alpha.id(), delta.id(), epsilon.id()],
        "owner order: {:?}",
        ids(&by_owner)
    );
    ensure!(
        ids(&by_status) == vec![alpha.id(), gamma.id(), epsilon.id()],
        "status order: {:?}",
        ids(&by_status)
    );
    ensure!(ids(&by_both) == vec![gamma.id()], "owner and status: {:?}", ids(&by_both));
    Ok(())
}

#[rstest]
fn save_recreates_a_deleted_task_under_its_id(
    clock: DefaultClock,
    task_database: Option<TestDatabase>,
) -> Result<()> {
    let Some(db) = task_database else {
        return Ok(());
    };
    let task = db.block_on(
        db.repository
            .insert(NewTask::new(content("Contested", TaskStatus::Pending, 3), &clock)),
    )?;

    ensure!(db.block_on(db.repository.delete(task.id()))?, "delete missed");
    ensure!(
        db.block_on(db.repository.find_by_id(task.id()))?.is_none(),
        "task still present after delete"
    );
    db.block_on(db.repository.save(&task))?;

    let restored = db.block_on(db.repository.find_by_id(task.id()))?;
    ensure!(restored.as_ref() == Some(&task), "save did not re-create the row");
    Ok(())
}

#[rstest]
fn save_keeps_the_stored_creation_time(
    clock: DefaultClock,
    task_database: Option<TestDatabase>,
) -> Result<()> {
    let Some(db) = task_database else {
        return Ok(());
    };
    let task = db.block_on(
        db.repository
            .insert(NewTask::new(content("Draft", TaskStatus::Pending, 4), &clock)),
    )?;
    let edited = Task::from_persisted(PersistedTaskData {
        id: task.id(),
        title: TaskTitle::new("Final")?,
        description: Some("edited".to_owned()),
        status: TaskStatus::InProgress,
        created_at: task.created_at() - Duration::days(30),
        due_date: None,
        owner_user_id: user(5),
    });

    db.block_on(db.repository.save(&edited))?;

    let stored = db
        .block_on(db.repository.find_by_id(task.id()))?
        .ok_or_else(|| eyre::eyre!("saved task missing"))?;
    ensure!(stored.created_at() == task.created_at(), "created_at overwritten");
    ensure!(stored.title().as_str() == "Final", "title not updated");
    ensure!(stored.status() == TaskStatus::InProgress, "status not updated");
    ensure!(stored.owner_user_id() == user(5), "owner not updated");
    Ok(())
}

#[rstest]
fn delete_and_count_track_stored_rows(
    clock: DefaultClock,
    task_database: Option<TestDatabase>,
) -> Result<()> {
    let Some(db) = task_database else {
        return Ok(());
    };
    let [alpha, ..] = seed(&db, &clock)?;

    ensure!(db.block_on(db.repository.count_by_owner(user(1)))? == 3, "owner 1 count");
    ensure!(db.block_on(db.repository.count_by_owner(user(9)))? == 0, "owner 9 count");
    ensure!(db.block_on(db.repository.delete(alpha.id()))?, "first delete");
    ensure!(!db.block_on(db.repository.delete(alpha.id()))?, "second delete");
    ensure!(db.block_on(db.repository.count_by_owner(user(1)))? == 2, "count after delete");
    Ok(())
}

#[rstest]
fn long_titles_are_stored_verbatim(
    clock: DefaultClock,
    task_database: Option<TestDatabase>,
) -> Result<()> {
    let Some(db) = task_database else {
        return Ok(());
    };
    let title = format!("  {}  ", "x".repeat(300));

    let task = db.block_on(
        db.repository
            .insert(NewTask::new(content(&title, TaskStatus::Pending, 6), &clock)),
    )?;

    let stored = db
        .block_on(db.repository.find_by_id(task.id()))?
        .ok_or_else(|| eyre::eyre!("task missing"))?;
    ensure!(stored.title().as_str() == title, "title altered by the store");
    Ok(())
}
