//! Task aggregate root and the values that make up its editable content.

use super::{TaskDomainError, TaskId, TaskStatus, UserId};
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Non-empty task title.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskTitle(String);

impl TaskTitle {
    /// Creates a validated title. The text is kept exactly as submitted.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the value is blank.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(TaskDomainError::EmptyTitle);
        }
        Ok(Self(raw))
    }

    /// Returns the title as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TaskTitle {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The fields of a task that a create or update request supplies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskContent {
    title: TaskTitle,
    description: Option<String>,
    status: TaskStatus,
    due_date: Option<NaiveDate>,
    owner_user_id: UserId,
}

impl TaskContent {
    /// Creates content with the required fields.
    #[must_use]
    pub const fn new(title: TaskTitle, status: TaskStatus, owner_user_id: UserId) -> Self {
        Self {
            title,
            description: None,
            status,
            due_date: None,
            owner_user_id,
        }
    }

    /// Sets the free-text description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    /// Returns the referenced owner.
    #[must_use]
    pub const fn owner_user_id(&self) -> UserId {
        self.owner_user_id
    }
}

/// Validated task that has not been assigned an identifier yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    content: TaskContent,
    created_at: DateTime<Utc>,
}

impl NewTask {
    /// Creates a new task stamped with the current clock time.
    #[must_use]
    pub fn new(content: TaskContent, clock: &impl Clock) -> Self {
        Self {
            content,
            created_at: clock.utc(),
        }
    }

    /// Returns the task content.
    #[must_use]
    pub const fn content(&self) -> &TaskContent {
        &self.content
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Binds the store-assigned identifier, producing the persisted task.
    #[must_use]
    pub fn into_task(self, id: TaskId) -> Task {
        let TaskContent {
            title,
            description,
            status,
            due_date,
            owner_user_id,
        } = self.content;
        Task {
            id,
            title,
            description,
            status,
            created_at: self.created_at,
            due_date,
            owner_user_id,
        }
    }
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    id: TaskId,
    title: TaskTitle,
    description: Option<String>,
    status: TaskStatus,
    created_at: DateTime<Utc>,
    due_date: Option<NaiveDate>,
    owner_user_id: UserId,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted description, if any.
    pub description: Option<String>,
    /// Persisted status.
    pub status: TaskStatus,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted due date, if any.
    pub due_date: Option<NaiveDate>,
    /// Persisted owner reference.
    pub owner_user_id: UserId,
}

impl Task {
    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            status: data.status,
            created_at: data.created_at,
            due_date: data.due_date,
            owner_user_id: data.owner_user_id,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    /// Returns the referenced owner.
    #[must_use]
    pub const fn owner_user_id(&self) -> UserId {
        self.owner_user_id
    }

    /// Overwrites every editable field with `content`.
    ///
    /// The identifier and creation timestamp are never touched. Callers run
    /// [`TaskStatusGuard`](super::TaskStatusGuard) first.
    pub fn apply(&mut self, content: TaskContent) {
        let TaskContent {
            title,
            description,
            status,
            due_date,
            owner_user_id,
        } = content;
        self.title = title;
        self.description = description;
        self.status = status;
        self.due_date = due_date;
        self.owner_user_id = owner_user_id;
    }
}
