//! In-memory repository for task tests and local wiring.

use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::task::{
    domain::{NewTask, Task, TaskId, TaskStatus, UserId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    last_id: i64,
    tasks: BTreeMap<TaskId, Task>,
    owner_index: HashMap<UserId, BTreeSet<TaskId>>,
}

impl InMemoryTaskState {
    fn index_owner(&mut self, task: &Task) {
        self.owner_index
            .entry(task.owner_user_id())
            .or_default()
            .insert(task.id());
    }

    /// Removes a task ID from the owner index, cleaning up the entry if empty.
    fn unindex_owner(&mut self, owner: UserId, task_id: TaskId) {
        if let Some(ids) = self.owner_index.get_mut(&owner) {
            ids.remove(&task_id);
            if ids.is_empty() {
                self.owner_index.remove(&owner);
            }
        }
    }

    fn owned_by(&self, owner: UserId) -> impl Iterator<Item = &Task> {
        self.owner_index
            .get(&owner)
            .into_iter()
            .flatten()
            .filter_map(|id| self.tasks.get(id))
    }
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> TaskRepositoryResult<RwLockReadGuard<'_, InMemoryTaskState>> {
        self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> TaskRepositoryResult<RwLockWriteGuard<'_, InMemoryTaskState>> {
        self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn insert(&self, task: NewTask) -> TaskRepositoryResult<Task> {
        let mut state = self.write()?;
        let next = state.last_id + 1;
        let id = TaskId::new(next).map_err(TaskRepositoryError::persistence)?;
        state.last_id = next;

        let stored = task.into_task(id);
        state.index_owner(&stored);
        state.tasks.insert(id, stored.clone());
        Ok(stored)
    }

    async fn save(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.write()?;
        let previous_owner = state.tasks.get(&task.id()).map(Task::owner_user_id);
        if let Some(owner) = previous_owner {
            state.unindex_owner(owner, task.id());
        }
        state.last_id = state.last_id.max(task.id().value());
        state.index_owner(task);
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        Ok(self.read()?.tasks.get(&id).cloned())
    }

    async fn list(&self) -> TaskRepositoryResult<Vec<Task>> {
        Ok(self.read()?.tasks.values().cloned().collect())
    }

    async fn find_by_owner(&self, owner: UserId) -> TaskRepositoryResult<Vec<Task>> {
        Ok(self.read()?.owned_by(owner).cloned().collect())
    }

    async fn find_by_status(&self, status: TaskStatus) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.read()?;
        Ok(state
            .tasks
            .values()
            .filter(|task| task.status() == status)
            .cloned()
            .collect())
    }

    async fn find_by_owner_and_status(
        &self,
        owner: UserId,
        status: TaskStatus,
    ) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.read()?;
        Ok(state
            .owned_by(owner)
            .filter(|task| task.status() == status)
            .cloned()
            .collect())
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<bool> {
        let mut state = self.write()?;
        let Some(removed) = state.tasks.remove(&id) else {
            return Ok(false);
        };
        state.unindex_owner(removed.owner_user_id(), id);
        Ok(true)
    }

    async fn count_by_owner(&self, owner: UserId) -> TaskRepositoryResult<u64> {
        let state = self.read()?;
        let count = state.owner_index.get(&owner).map_or(0, BTreeSet::len);
        u64::try_from(count).map_err(TaskRepositoryError::persistence)
    }
}
