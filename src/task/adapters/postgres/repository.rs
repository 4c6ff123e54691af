//! `PostgreSQL` repository implementation for task storage.

use super::{
    models::{NewTaskRow, TaskChangeset, TaskRecordRow, TaskRow},
    schema::tasks,
};
use crate::task::{
    domain::{NewTask, PersistedTaskData, Task, TaskId, TaskStatus, TaskTitle, UserId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// Builds a connection pool for `database_url`.
///
/// # Errors
///
/// Returns [`TaskRepositoryError::Persistence`] when the pool cannot be
/// created.
pub fn connect_pool(database_url: &str, max_connections: u32) -> TaskRepositoryResult<TaskPgPool> {
    Pool::builder()
        .max_size(max_connections)
        .build(ConnectionManager::<PgConnection>::new(database_url))
        .map_err(TaskRepositoryError::persistence)
}

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }

    async fn load_where<F>(&self, query: F) -> TaskRepositoryResult<Vec<Task>>
    where
        F: FnOnce(&mut PgConnection) -> QueryResult<Vec<TaskRow>> + Send + 'static,
    {
        self.run_blocking(move |connection| {
            query(connection)
                .map_err(TaskRepositoryError::persistence)?
                .into_iter()
                .map(row_to_task)
                .collect()
        })
        .await
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn insert(&self, task: NewTask) -> TaskRepositoryResult<Task> {
        let new_row = to_new_row(&task);
        self.run_blocking(move |connection| {
            let row = diesel::insert_into(tasks::table)
                .values(&new_row)
                .returning(TaskRow::as_returning())
                .get_result::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            row_to_task(row)
        })
        .await
    }

    async fn save(&self, task: &Task) -> TaskRepositoryResult<()> {
        let record = to_record_row(task);
        let changes = to_changeset(task);
        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&record)
                .on_conflict(tasks::id)
                .do_update()
                .set(&changes)
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.value()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn list(&self) -> TaskRepositoryResult<Vec<Task>> {
        self.load_where(|connection| {
            tasks::table
                .order(tasks::id.asc())
                .select(TaskRow::as_select())
                .load(connection)
        })
        .await
    }

    async fn find_by_owner(&self, owner: UserId) -> TaskRepositoryResult<Vec<Task>> {
        self.load_where(move |connection| {
            tasks::table
                .filter(tasks::owner_user_id.eq(owner.value()))
                .order(tasks::id.asc())
                .select(TaskRow::as_select())
                .load(connection)
        })
        .await
    }

    async fn find_by_status(&self, status: TaskStatus) -> TaskRepositoryResult<Vec<Task>> {
        self.load_where(move |connection| {
            tasks::table
                .filter(tasks::status.eq(status.as_str()))
                .order(tasks::id.asc())
                .select(TaskRow::as_select())
                .load(connection)
        })
        .await
    }

    async fn find_by_owner_and_status(
        &self,
        owner: UserId,
        status: TaskStatus,
    ) -> TaskRepositoryResult<Vec<Task>> {
        self.load_where(move |connection| {
            tasks::table
                .filter(tasks::owner_user_id.eq(owner.value()))
                .filter(tasks::status.eq(status.as_str()))
                .order(tasks::id.asc())
                .select(TaskRow::as_select())
                .load(connection)
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<bool> {
        self.run_blocking(move |connection| {
            let removed = diesel::delete(tasks::table.filter(tasks::id.eq(id.value())))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            Ok(removed > 0)
        })
        .await
    }

    async fn count_by_owner(&self, owner: UserId) -> TaskRepositoryResult<u64> {
        self.run_blocking(move |connection| {
            let count: i64 = tasks::table
                .filter(tasks::owner_user_id.eq(owner.value()))
                .count()
                .get_result(connection)
                .map_err(TaskRepositoryError::persistence)?;
            u64::try_from(count).map_err(TaskRepositoryError::persistence)
        })
        .await
    }
}

fn to_new_row(task: &NewTask) -> NewTaskRow {
    let content = task.content();
    NewTaskRow {
        title: content.title().as_str().to_owned(),
        description: content.description().map(str::to_owned),
        status: content.status().as_str().to_owned(),
        created_at: task.created_at(),
        due_date: content.due_date(),
        owner_user_id: content.owner_user_id().value(),
    }
}

fn to_record_row(task: &Task) -> TaskRecordRow {
    TaskRecordRow {
        id: task.id().value(),
        title: task.title().as_str().to_owned(),
        description: task.description().map(str::to_owned),
        status: task.status().as_str().to_owned(),
        created_at: task.created_at(),
        due_date: task.due_date(),
        owner_user_id: task.owner_user_id().value(),
    }
}

fn to_changeset(task: &Task) -> TaskChangeset {
    TaskChangeset {
        title: task.title().as_str().to_owned(),
        description: task.description().map(str::to_owned),
        status: task.status().as_str().to_owned(),
        due_date: task.due_date(),
        owner_user_id: task.owner_user_id().value(),
    }
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        title,
        description,
        status,
        created_at,
        due_date,
        owner_user_id,
    } = row;

    let data = PersistedTaskData {
        id: TaskId::new(id).map_err(TaskRepositoryError::persistence)?,
        title: TaskTitle::new(title).map_err(TaskRepositoryError::persistence)?,
        description,
        status: TaskStatus::try_from(status.as_str()).map_err(TaskRepositoryError::persistence)?,
        created_at,
        due_date,
        owner_user_id: UserId::new(owner_user_id).map_err(TaskRepositoryError::persistence)?,
    };
    Ok(Task::from_persisted(data))
}
