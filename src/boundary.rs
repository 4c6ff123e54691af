//! Translation of service errors into the body returned to external callers.
//!
//! Transport adapters build an [`ErrorResponse`] from whatever error a task or
//! user operation returned. The status code and the `kind` tag are the stable
//! contract: callers distinguish "the user does not exist" (`UNKNOWN_USER`,
//! 400) from "the user service could not be asked" (`REMOTE_UNAVAILABLE`,
//! 503) by these alone.

use crate::task::services::{FieldViolation, TaskErrorKind, TaskServiceError};
use crate::user::services::UserServiceError;
use chrono::{DateTime, Utc};
use http::StatusCode;
use mockable::Clock;
use serde::Serialize;

const PERSISTENCE_MESSAGE: &str = "the data store failed to complete the request";

/// Error body returned to external callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    status: u16,
    kind: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    identifier: Option<i64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    fields: Vec<FieldViolation>,
    timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    /// Builds the response for a failed task operation.
    ///
    /// Store failures are reported without their cause.
    #[must_use]
    pub fn from_task_error(err: &TaskServiceError, clock: &impl Clock) -> Self {
        let kind = err.kind();
        let message = match err {
            TaskServiceError::Repository(_) => PERSISTENCE_MESSAGE.to_owned(),
            other => other.to_string(),
        };
        let fields = match err {
            TaskServiceError::Validation(validation) => validation.violations().to_vec(),
            _ => Vec::new(),
        };
        Self {
            status: task_status_code(kind).as_u16(),
            kind: kind.as_str(),
            message,
            identifier: err.identifier(),
            fields,
            timestamp: clock.utc(),
        }
    }

    /// Builds the response for a failed user directory operation.
    #[must_use]
    pub fn from_user_error(err: &UserServiceError, clock: &impl Clock) -> Self {
        let (status, kind, identifier) = match err {
            UserServiceError::Domain(_) => (StatusCode::BAD_REQUEST, "VALIDATION_FAILURE", None),
            UserServiceError::NotFound(id) => (StatusCode::NOT_FOUND, "NOT_FOUND", Some(id.value())),
            UserServiceError::DuplicateEmail(_) => (StatusCode::CONFLICT, "DUPLICATE_EMAIL", None),
            UserServiceError::Repository(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "PERSISTENCE", None)
            }
        };
        let message = match err {
            UserServiceError::Repository(_) => PERSISTENCE_MESSAGE.to_owned(),
            other => other.to_string(),
        };
        Self {
            status: status.as_u16(),
            kind,
            message,
            identifier,
            fields: Vec::new(),
            timestamp: clock.utc(),
        }
    }

    /// Returns the HTTP status code.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Returns the error kind tag.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        self.kind
    }

    /// Returns the human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the task or user identifier the error concerns, if any.
    #[must_use]
    pub const fn identifier(&self) -> Option<i64> {
        self.identifier
    }

    /// Returns the rejected fields of a validation failure.
    #[must_use]
    pub fn fields(&self) -> &[FieldViolation] {
        &self.fields
    }

    /// Returns when the response was built.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// Maps a task error kind to its HTTP status code.
#[must_use]
pub const fn task_status_code(kind: TaskErrorKind) -> StatusCode {
    match kind {
        TaskErrorKind::NotFound => StatusCode::NOT_FOUND,
        TaskErrorKind::UnknownUser
        | TaskErrorKind::InvalidState
        | TaskErrorKind::ValidationFailure => StatusCode::BAD_REQUEST,
        TaskErrorKind::RemoteUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        TaskErrorKind::Persistence => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
