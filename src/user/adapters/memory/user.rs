//! In-memory repository for user directory tests and local wiring.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::user::{
    domain::{EmailAddress, NewUser, User, UserId},
    ports::{UserRepository, UserRepositoryError, UserRepositoryResult},
};

/// Thread-safe in-memory user repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    state: Arc<RwLock<InMemoryUserState>>,
}

#[derive(Debug, Default)]
struct InMemoryUserState {
    last_id: i64,
    users: BTreeMap<UserId, User>,
}

impl InMemoryUserState {
    fn email_taken_by_other(&self, email: &EmailAddress, id: Option<UserId>) -> bool {
        self.users
            .values()
            .any(|user| user.email() == email && Some(user.id()) != id)
    }
}

impl InMemoryUserRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> UserRepositoryResult<RwLockReadGuard<'_, InMemoryUserState>> {
        self.state.read().map_err(|err| {
            UserRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> UserRepositoryResult<RwLockWriteGuard<'_, InMemoryUserState>> {
        self.state.write().map_err(|err| {
            UserRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: NewUser) -> UserRepositoryResult<User> {
        let mut state = self.write()?;
        if state.email_taken_by_other(user.email(), None) {
            return Err(UserRepositoryError::DuplicateEmail(user.email().clone()));
        }

        let next = state.last_id + 1;
        let id = UserId::new(next).map_err(UserRepositoryError::persistence)?;
        state.last_id = next;
        let stored = user.into_user(id);
        state.users.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, user: &User) -> UserRepositoryResult<()> {
        let mut state = self.write()?;
        if !state.users.contains_key(&user.id()) {
            return Err(UserRepositoryError::NotFound(user.id()));
        }
        if state.email_taken_by_other(user.email(), Some(user.id())) {
            return Err(UserRepositoryError::DuplicateEmail(user.email().clone()));
        }
        state.users.insert(user.id(), user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: UserId) -> UserRepositoryResult<Option<User>> {
        Ok(self.read()?.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> UserRepositoryResult<Option<User>> {
        let state = self.read()?;
        Ok(state
            .users
            .values()
            .find(|user| user.email() == email)
            .cloned())
    }

    async fn list(&self) -> UserRepositoryResult<Vec<User>> {
        Ok(self.read()?.users.values().cloned().collect())
    }

    async fn exists(&self, id: UserId) -> UserRepositoryResult<bool> {
        Ok(self.read()?.users.contains_key(&id))
    }

    async fn delete(&self, id: UserId) -> UserRepositoryResult<bool> {
        Ok(self.write()?.users.remove(&id).is_some())
    }
}
