//! Owner-scoped task commands.
//!
//! `TaskService` is the only path from the transport to the repository. Each
//! operation takes the caller's identity and turns it into an [`OwnerScope`]
//! so a task owned by someone else is reported exactly like a missing one.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::{NewTask, OwnerId, Task, TaskChanges, TaskFilter, TaskId, Timestamp};
use crate::infrastructure::{
    OwnerScope, PaginatedResult, Pagination, RepositoryError, TaskRepository,
};

// =============================================================================
// Errors
// =============================================================================

/// Errors returned by [`TaskService`].
#[derive(Debug, Error, Clone)]
pub enum TaskServiceError {
    /// The task does not exist or is not visible to the caller.
    #[error("Task not found")]
    NotFound,

    /// The store failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

// =============================================================================
// Task Service
// =============================================================================

/// Authorization-scoped CRUD over a [`TaskRepository`].
#[derive(Clone)]
pub struct TaskService {
    repository: Arc<dyn TaskRepository>,
}

impl std::fmt::Debug for TaskService {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("TaskService")
            .field("repository", &"Arc<dyn TaskRepository>")
            .finish()
    }
}

impl TaskService {
    /// Creates a service on top of the given repository.
    #[must_use]
    pub fn new(repository: Arc<dyn TaskRepository>) -> Self {
        Self { repository }
    }

    /// Creates a task owned by `owner`.
    ///
    /// # Errors
    ///
    /// Returns `TaskServiceError::Repository` if the store fails.
    pub async fn create(&self, owner: &OwnerId, new_task: NewTask) -> Result<Task, TaskServiceError> {
        let task = Task {
            description: new_task.description,
            ..Task::new(TaskId::generate(), owner.clone(), new_task.title, Timestamp::now())
        };

        let task = self.repository.insert(&task).await?;
        tracing::debug!(task_id = %task.task_id, owner = %owner, "Task created");
        Ok(task)
    }

    /// Lists the caller's tasks matching the filter, newest first.
    ///
    /// # Errors
    ///
    /// Returns `TaskServiceError::Repository` if the store fails.
    pub async fn list(
        &self,
        owner: &OwnerId,
        filter: TaskFilter,
        pagination: Pagination,
    ) -> Result<PaginatedResult<Task>, TaskServiceError> {
        let scope = OwnerScope::new(owner.clone());
        Ok(self.repository.list(&scope, filter, pagination).await?)
    }

    /// Returns one of the caller's tasks.
    ///
    /// # Errors
    ///
    /// Returns `TaskServiceError::NotFound` if the task is absent or owned by someone else.
    pub async fn get_by_id(&self, owner: &OwnerId, id: &TaskId) -> Result<Task, TaskServiceError> {
        let scope = OwnerScope::new(owner.clone());
        self.repository
            .find(&scope, id)
            .await?
            .ok_or(TaskServiceError::NotFound)
    }

    /// Changes only the fields present in `changes`.
    ///
    /// # Errors
    ///
    /// Returns `TaskServiceError::NotFound` if the task is absent or owned by someone else.
    pub async fn update(
        &self,
        owner: &OwnerId,
        id: &TaskId,
        changes: TaskChanges,
    ) -> Result<Task, TaskServiceError> {
        let scope = OwnerScope::new(owner.clone());
        let task = self
            .repository
            .update(&scope, id, changes, Timestamp::now())
            .await?
            .ok_or(TaskServiceError::NotFound)?;

        tracing::debug!(task_id = %task.task_id, owner = %owner, "Task updated");
        Ok(task)
    }

    /// Replaces every mutable field. An omitted description clears it.
    ///
    /// # Errors
    ///
    /// Returns `TaskServiceError::NotFound` if the task is absent or owned by someone else.
    pub async fn replace(
        &self,
        owner: &OwnerId,
        id: &TaskId,
        title: String,
        description: Option<String>,
        completed: bool,
    ) -> Result<Task, TaskServiceError> {
        self.update(
            owner,
            id,
            TaskChanges::replace_all(title, description, completed),
        )
        .await
    }

    /// Deletes one of the caller's tasks.
    ///
    /// # Errors
    ///
    /// Returns `TaskServiceError::NotFound` if the task is absent or owned by someone else.
    pub async fn delete(&self, owner: &OwnerId, id: &TaskId) -> Result<(), TaskServiceError> {
        let scope = OwnerScope::new(owner.clone());
        if self.repository.delete(&scope, id).await? {
            tracing::debug!(task_id = %id, owner = %owner, "Task deleted");
            Ok(())
        } else {
            Err(TaskServiceError::NotFound)
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
