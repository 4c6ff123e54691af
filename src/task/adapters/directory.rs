//! In-process oracle answering from the user directory service.

use async_trait::async_trait;
use mockable::Clock;
use std::sync::Arc;

use crate::task::{
    domain::UserId,
    ports::{UserExistenceOracle, UserLookupError, UserLookupResult},
};
use crate::user::{ports::UserRepository, services::UserDirectoryService};

/// Oracle backed by a [`UserDirectoryService`] running in the same process.
///
/// Used when both contexts are deployed together, and in integration tests
/// that exercise user deletion against existing task references.
#[derive(Clone)]
pub struct DirectoryUserExistenceOracle<R, C>
where
    R: UserRepository,
    C: Clock + Send + Sync,
{
    directory: Arc<UserDirectoryService<R, C>>,
}

impl<R, C> DirectoryUserExistenceOracle<R, C>
where
    R: UserRepository,
    C: Clock + Send + Sync,
{
    /// Creates an oracle over the directory service.
    #[must_use]
    pub const fn new(directory: Arc<UserDirectoryService<R, C>>) -> Self {
        Self { directory }
    }
}

#[async_trait]
impl<R, C> UserExistenceOracle for DirectoryUserExistenceOracle<R, C>
where
    R: UserRepository,
    C: Clock + Send + Sync,
{
    async fn exists(&self, user_id: UserId) -> UserLookupResult<bool> {
        self.directory
            .exists(user_id)
            .await
            .map_err(UserLookupError::transport)
    }
}
