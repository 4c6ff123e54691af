//! Port for asking the user service whether a user exists.

use crate::task::domain::UserId;
use async_trait::async_trait;
use http::StatusCode;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Result type for user existence lookups.
pub type UserLookupResult<T> = Result<T, UserLookupError>;

/// Remote query answering "does a user with this identifier exist?".
///
/// The task context has no authority over user data. Every call is a fresh
/// round trip: implementations must not cache answers or retry.
#[async_trait]
pub trait UserExistenceOracle: Send + Sync {
    /// Returns whether the user exists.
    ///
    /// # Errors
    ///
    /// Returns [`UserLookupError`] when no trustworthy answer was obtained.
    /// A failed lookup says nothing about whether the user exists.
    async fn exists(&self, user_id: UserId) -> UserLookupResult<bool>;
}

/// Reasons a user existence lookup could not complete.
#[derive(Debug, Clone, Error)]
pub enum UserLookupError {
    /// The call did not finish within the configured timeout.
    #[error("user lookup timed out after {0:?}")]
    Timeout(Duration),

    /// The user service answered with a non-success status.
    #[error("user service answered with status {0}")]
    UnexpectedStatus(StatusCode),

    /// The response body was not a boolean.
    #[error("user service returned a malformed body: {0:?}")]
    MalformedBody(String),

    /// The request could not be sent or the response could not be read.
    #[error("user service unreachable: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl UserLookupError {
    /// Wraps a transport error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}
