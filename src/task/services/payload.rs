//! Inbound task payloads, query filters, and structural validation.

use crate::task::domain::{TaskContent, TaskStatus, TaskTitle, UserId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Task fields that structural validation can reject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskField {
    /// The `title` field.
    Title,
    /// The `status` field.
    Status,
    /// The `ownerUserId` field.
    OwnerUserId,
}

impl TaskField {
    /// Returns the field name as it appears in payloads.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Status => "status",
            Self::OwnerUserId => "ownerUserId",
        }
    }
}

impl fmt::Display for TaskField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single rejected field and the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    /// Offending field.
    pub field: TaskField,
    /// Human-readable reason.
    pub message: String,
}

impl FieldViolation {
    fn new(field: TaskField, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Structurally invalid task payload. Lists every violation found.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid task payload: {}", summarize(.violations))]
pub struct TaskValidationError {
    violations: Vec<FieldViolation>,
}

impl TaskValidationError {
    /// Returns the violations in field order.
    #[must_use]
    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    /// Returns whether `field` was rejected.
    #[must_use]
    pub fn rejects(&self, field: TaskField) -> bool {
        self.violations.iter().any(|violation| violation.field == field)
    }
}

fn summarize(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|violation| format!("{}: {}", violation.field, violation.message))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Create or update request for a task.
///
/// Every field is optional at the type level so that missing values surface
/// as [`TaskValidationError`] rather than as deserialisation failures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPayload {
    title: Option<String>,
    description: Option<String>,
    status: Option<TaskStatus>,
    due_date: Option<NaiveDate>,
    owner_user_id: Option<i64>,
}

impl TaskPayload {
    /// Creates a payload with the required fields.
    #[must_use]
    pub fn new(title: impl Into<String>, status: TaskStatus, owner_user_id: UserId) -> Self {
        Self {
            title: Some(title.into()),
            description: None,
            status: Some(status),
            due_date: None,
            owner_user_id: Some(owner_user_id.value()),
        }
    }

    /// Sets the description.
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

    /// Sets the status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the owner.
    #[must_use]
    pub const fn with_owner(mut self, owner_user_id: UserId) -> Self {
        self.owner_user_id = Some(owner_user_id.value());
        self
    }

    /// Returns the raw owner identifier, if supplied.
    #[must_use]
    pub const fn owner_user_id(&self) -> Option<i64> {
        self.owner_user_id
    }

    /// Checks the payload's structure and converts it into task content.
    ///
    /// # Errors
    ///
    /// Returns [`TaskValidationError`] listing a blank or missing title, a
    /// missing status, and a missing or non-positive owner.
    pub fn validate(self) -> Result<TaskContent, TaskValidationError> {
        let mut violations = Vec::new();

        let title = match self.title.map(TaskTitle::new) {
            Some(Ok(title)) => Some(title),
            Some(Err(err)) => {
                violations.push(FieldViolation::new(TaskField::Title, err.to_string()));
                None
            }
            None => {
                violations.push(FieldViolation::new(TaskField::Title, "title is required"));
                None
            }
        };

        if self.status.is_none() {
            violations.push(FieldViolation::new(TaskField::Status, "status is required"));
        }

        let owner = match self.owner_user_id.map(UserId::new) {
            Some(Ok(owner)) => Some(owner),
            Some(Err(err)) => {
                violations.push(FieldViolation::new(TaskField::OwnerUserId, err.to_string()));
                None
            }
            None => {
                violations.push(FieldViolation::new(
                    TaskField::OwnerUserId,
                    "owner user is required",
                ));
                None
            }
        };

        let (Some(title), Some(status), Some(owner)) = (title, self.status, owner) else {
            return Err(TaskValidationError { violations });
        };

        let mut content = TaskContent::new(title, status, owner);
        if let Some(description) = self.description {
            content = content.with_description(description);
        }
        if let Some(due_date) = self.due_date {
            content = content.with_due_date(due_date);
        }
        Ok(content)
    }
}

/// Optional owner and status constraints for listing tasks.
///
/// Constraints combine with logical AND. An empty filter matches every task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskFilter {
    owner_user_id: Option<UserId>,
    status: Option<TaskStatus>,
}

impl TaskFilter {
    /// Creates a filter matching every task.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            owner_user_id: None,
            status: None,
        }
    }

    /// Restricts results to tasks referencing the owner.
    #[must_use]
    pub const fn with_owner(mut self, owner_user_id: UserId) -> Self {
        self.owner_user_id = Some(owner_user_id);
        self
    }

    /// Restricts results to tasks in the status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Returns the owner constraint.
    #[must_use]
    pub const fn owner_user_id(&self) -> Option<UserId> {
        self.owner_user_id
    }

    /// Returns the status constraint.
    #[must_use]
    pub const fn status(&self) -> Option<TaskStatus> {
        self.status
    }
}
