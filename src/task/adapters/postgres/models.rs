//! Diesel row models for task persistence.

use super::schema::tasks;
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: i64,
    /// Task title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Task status.
    pub status: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Optional due date.
    pub due_date: Option<NaiveDate>,
    /// Referenced owner identifier.
    pub owner_user_id: i64,
}

/// Insert model for new task records; the identifier comes from the
/// sequence.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Task title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Task status.
    pub status: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Optional due date.
    pub due_date: Option<NaiveDate>,
    /// Referenced owner identifier.
    pub owner_user_id: i64,
}

/// Full record written by upserts.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct TaskRecordRow {
    /// Task identifier.
    pub id: i64,
    /// Task title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Task status.
    pub status: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Optional due date.
    pub due_date: Option<NaiveDate>,
    /// Referenced owner identifier.
    pub owner_user_id: i64,
}

/// Editable columns overwritten when an upsert hits an existing row.
///
/// Excludes `created_at`, which is written once on insert.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub struct TaskChangeset {
    /// Task title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Task status.
    pub status: String,
    /// Optional due date.
    pub due_date: Option<NaiveDate>,
    /// Referenced owner identifier.
    pub owner_user_id: i64,
}
