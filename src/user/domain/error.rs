//! Error types for user domain validation.

use thiserror::Error;

/// Errors returned while constructing user domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserDomainError {
    /// The user identifier is not a positive integer.
    #[error("invalid user identifier {0}, expected a positive integer")]
    InvalidUserId(i64),

    /// The user name is empty after trimming.
    #[error("user name must not be empty")]
    EmptyName,

    /// The email address is empty after trimming.
    #[error("email address must not be empty")]
    EmptyEmail,

    /// The email address is not well formed.
    #[error("invalid email address '{0}'")]
    InvalidEmail(String),
}
