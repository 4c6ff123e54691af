//! Configurable in-memory user existence oracle.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::task::{
    domain::UserId,
    ports::{UserExistenceOracle, UserLookupError, UserLookupResult},
};

/// In-memory oracle answering from a fixed set of known users.
///
/// A forced failure makes every lookup fail until [`recover`] is called,
/// which models an unreachable user service. Lookups are counted so tests
/// can assert how often the oracle was consulted.
///
/// [`recover`]: StaticUserExistenceOracle::recover
#[derive(Debug, Clone, Default)]
pub struct StaticUserExistenceOracle {
    state: Arc<Mutex<OracleState>>,
    calls: Arc<AtomicUsize>,
}

#[derive(Debug, Default)]
struct OracleState {
    known_users: HashSet<UserId>,
    failure: Option<UserLookupError>,
}

impl StaticUserExistenceOracle {
    /// Creates an oracle that knows no users.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an oracle that knows the given users.
    #[must_use]
    pub fn with_users(users: impl IntoIterator<Item = UserId>) -> Self {
        let oracle = Self::new();
        if let Ok(mut state) = oracle.state.lock() {
            state.known_users.extend(users);
        }
        oracle
    }

    /// Registers a user as existing.
    ///
    /// # Errors
    ///
    /// Returns [`UserLookupError::Transport`] when the state lock is poisoned.
    pub fn add_user(&self, user_id: UserId) -> UserLookupResult<()> {
        self.lock()?.known_users.insert(user_id);
        Ok(())
    }

    /// Forgets a user, as if they had been deleted remotely.
    ///
    /// # Errors
    ///
    /// Returns [`UserLookupError::Transport`] when the state lock is poisoned.
    pub fn remove_user(&self, user_id: UserId) -> UserLookupResult<()> {
        self.lock()?.known_users.remove(&user_id);
        Ok(())
    }

    /// Makes every subsequent lookup fail with `failure`.
    ///
    /// # Errors
    ///
    /// Returns [`UserLookupError::Transport`] when the state lock is poisoned.
    pub fn fail_with(&self, failure: UserLookupError) -> UserLookupResult<()> {
        self.lock()?.failure = Some(failure);
        Ok(())
    }

    /// Clears a forced failure.
    ///
    /// # Errors
    ///
    /// Returns [`UserLookupError::Transport`] when the state lock is poisoned.
    pub fn recover(&self) -> UserLookupResult<()> {
        self.lock()?.failure = None;
        Ok(())
    }

    /// Returns how many lookups have been made.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn lock(&self) -> UserLookupResult<MutexGuard<'_, OracleState>> {
        self.state
            .lock()
            .map_err(|err| UserLookupError::transport(std::io::Error::other(err.to_string())))
    }
}

#[async_trait]
impl UserExistenceOracle for StaticUserExistenceOracle {
    async fn exists(&self, user_id: UserId) -> UserLookupResult<bool> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let state = self.lock()?;
        if let Some(failure) = &state.failure {
            return Err(failure.clone());
        }
        Ok(state.known_users.contains(&user_id))
    }
}
