//! Service layer for user registration, lookup, and removal.

use crate::user::{
    domain::{EmailAddress, NewUser, User, UserDomainError, UserId, UserName},
    ports::{UserRepository, UserRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating or updating a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRequest {
    name: String,
    email: String,
}

impl UserRequest {
    /// Creates a request with the user's name and email address.
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    fn validate(self) -> Result<(UserName, EmailAddress), UserDomainError> {
        Ok((UserName::new(self.name)?, EmailAddress::new(self.email)?))
    }
}

/// Service-level errors for user directory operations.
#[derive(Debug, Error)]
pub enum UserServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] UserDomainError),
    /// No user has the identifier.
    #[error("user not found: {0}")]
    NotFound(UserId),
    /// Another user already holds the email address.
    #[error("email address already registered: {0}")]
    DuplicateEmail(EmailAddress),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(UserRepositoryError),
}

impl From<UserRepositoryError> for UserServiceError {
    fn from(err: UserRepositoryError) -> Self {
        match err {
            UserRepositoryError::NotFound(id) => Self::NotFound(id),
            UserRepositoryError::DuplicateEmail(email) => Self::DuplicateEmail(email),
            UserRepositoryError::Persistence(_) => Self::Repository(err),
        }
    }
}

/// Result type for user directory service operations.
pub type UserDirectoryServiceResult<T> = Result<T, UserServiceError>;

/// User directory orchestration service.
#[derive(Clone)]
pub struct UserDirectoryService<R, C>
where
    R: UserRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> UserDirectoryService<R, C>
where
    R: UserRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new user directory service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Registers a new user.
    ///
    /// # Errors
    ///
    /// Returns [`UserServiceError::Domain`] for an invalid name or email and
    /// [`UserServiceError::DuplicateEmail`] when the address is taken.
    pub async fn create(&self, request: UserRequest) -> UserDirectoryServiceResult<User> {
        let (name, email) = request.validate()?;
        if self.repository.find_by_email(&email).await?.is_some() {
            return Err(UserServiceError::DuplicateEmail(email));
        }

        let user = self
            .repository
            .insert(NewUser::new(name, email, &*self.clock))
            .await?;
        tracing::info!(user_id = %user.id(), "user registered");
        Ok(user)
    }

    /// Retrieves a user by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`UserServiceError::NotFound`] when the user does not exist.
    pub async fn get(&self, id: UserId) -> UserDirectoryServiceResult<User> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserServiceError::NotFound(id))
    }

    /// Lists every registered user.
    ///
    /// # Errors
    ///
    /// Returns [`UserServiceError::Repository`] when the lookup fails.
    pub async fn list(&self) -> UserDirectoryServiceResult<Vec<User>> {
        Ok(self.repository.list().await?)
    }

    /// Replaces a user's name and email address.
    ///
    /// Keeping the current address is always allowed; switching to an
    /// address held by another user is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`UserServiceError::NotFound`], [`UserServiceError::Domain`],
    /// or [`UserServiceError::DuplicateEmail`].
    pub async fn update(
        &self,
        id: UserId,
        request: UserRequest,
    ) -> UserDirectoryServiceResult<User> {
        let mut user = self.get(id).await?;
        let (name, email) = request.validate()?;

        if user.email() != &email {
            let holder = self.repository.find_by_email(&email).await?;
            if holder.is_some_and(|other| other.id() != id) {
                return Err(UserServiceError::DuplicateEmail(email));
            }
        }

        user.rename(name, email);
        self.repository.update(&user).await?;
        tracing::info!(user_id = %id, "user updated");
        Ok(user)
    }

    /// Removes a user.
    ///
    /// Tasks that still reference the user are not consulted; their
    /// `ownerUserId` becomes an orphaned reference.
    ///
    /// # Errors
    ///
    /// Returns [`UserServiceError::NotFound`] when the user does not exist.
    pub async fn delete(&self, id: UserId) -> UserDirectoryServiceResult<()> {
        if !self.repository.delete(id).await? {
            return Err(UserServiceError::NotFound(id));
        }
        tracing::info!(user_id = %id, "user deleted");
        Ok(())
    }

    /// Answers whether a user with the identifier exists.
    ///
    /// # Errors
    ///
    /// Returns [`UserServiceError::Repository`] when the lookup fails.
    pub async fn exists(&self, id: UserId) -> UserDirectoryServiceResult<bool> {
        Ok(self.repository.exists(id).await?)
    }
}
