//! In-memory repository implementation.
//!
//! Suitable for tests and for running the API without a database
//! (`STORAGE_MODE=in_memory`). State lives for the lifetime of the process.

use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;
use tokio::sync::RwLock;

use crate::domain::{Task, TaskChanges, TaskFilter, TaskId, Timestamp};
use crate::infrastructure::{
    OwnerScope, PaginatedResult, Pagination, RepositoryError, TaskRepository,
};

// =============================================================================
// In-Memory Task Repository
// =============================================================================

/// In-memory implementation of `TaskRepository`.
///
/// Tasks are kept in a `HashMap` wrapped in `Arc<RwLock<...>>`, so clones
/// share the same storage.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    tasks: Arc<RwLock<HashMap<TaskId, Task>>>,
}

impl InMemoryTaskRepository {
    /// Creates a new empty in-memory task repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[allow(clippy::significant_drop_tightening)]
impl TaskRepository for InMemoryTaskRepository {
    fn insert(&self, task: &Task) -> BoxFuture<'static, Result<Task, RepositoryError>> {
        let tasks = Arc::clone(&self.tasks);
        let task = task.clone();
        async move {
            let mut guard = tasks.write().await;
            if guard.contains_key(&task.task_id) {
                return Err(RepositoryError::DatabaseError(format!(
                    "duplicate task id {}",
                    task.task_id
                )));
            }
            guard.insert(task.task_id, task.clone());
            Ok(task)
        }
        .boxed()
    }

    fn find(
        &self,
        scope: &OwnerScope,
        id: &TaskId,
    ) -> BoxFuture<'static, Result<Option<Task>, RepositoryError>> {
        let tasks = Arc::clone(&self.tasks);
        let scope = scope.clone();
        let id = *id;
        async move {
            let guard = tasks.read().await;
            Ok(guard.get(&id).filter(|task| scope.permits(task)).cloned())
        }
        .boxed()
    }

    fn list(
        &self,
        scope: &OwnerScope,
        filter: TaskFilter,
        pagination: Pagination,
    ) -> BoxFuture<'static, Result<PaginatedResult<Task>, RepositoryError>> {
        let tasks = Arc::clone(&self.tasks);
        let scope = scope.clone();
        async move {
            let guard = tasks.read().await;
            let mut matching: Vec<&Task> = guard
                .values()
                .filter(|task| scope.permits(task) && filter.matches(task))
                .collect();
            matching.sort_by_key(|task| (Reverse(task.created_at), Reverse(task.task_id)));

            let total = matching.len() as u64;
            let skip = usize::try_from(pagination.offset).unwrap_or(usize::MAX);
            let items = matching
                .into_iter()
                .skip(skip)
                .take(pagination.limit as usize)
                .cloned()
                .collect();

            Ok(PaginatedResult::new(items, total, pagination))
        }
        .boxed()
    }

    fn update(
        &self,
        scope: &OwnerScope,
        id: &TaskId,
        changes: TaskChanges,
        now: Timestamp,
    ) -> BoxFuture<'static, Result<Option<Task>, RepositoryError>> {
        let tasks = Arc::clone(&self.tasks);
        let scope = scope.clone();
        let id = *id;
        async move {
            let mut guard = tasks.write().await;
            let Some(existing) = guard.get(&id).filter(|task| scope.permits(task)) else {
                return Ok(None);
            };
            let updated = existing.clone().apply(changes, now);
            guard.insert(id, updated.clone());
            Ok(Some(updated))
        }
        .boxed()
    }

    fn delete(
        &self,
        scope: &OwnerScope,
        id: &TaskId,
    ) -> BoxFuture<'static, Result<bool, RepositoryError>> {
        let tasks = Arc::clone(&self.tasks);
        let scope = scope.clone();
        let id = *id;
        async move {
            let mut guard = tasks.write().await;
            if !guard.get(&id).is_some_and(|task| scope.permits(task)) {
                return Ok(false);
            }
            Ok(guard.remove(&id).is_some())
        }
        .boxed()
    }
}

// =============================================================================
// Tests
// =============================================================================
