//! Process-local task store used by the shell.

use std::collections::BTreeMap;

use thiserror::Error;

/// Errors returned by [`LocalTaskStore`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum LocalStoreError {
    /// The title was empty after trimming.
    #[error("Title cannot be empty")]
    EmptyTitle,

    /// No task has the given ID.
    #[error("Task {0} not found")]
    NotFound(u64),
}

/// A task held by the shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalTask {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub completed: bool,
}

/// Tasks keyed by ID, with a counter that never hands out the same ID twice.
#[derive(Debug, Clone)]
pub struct LocalTaskStore {
    tasks: BTreeMap<u64, LocalTask>,
    next_id: u64,
}

impl Default for LocalTaskStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalTaskStore {
    /// Creates an empty store whose first ID is 1.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tasks: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Adds a task with a trimmed title.
    ///
    /// # Errors
    ///
    /// Returns `LocalStoreError::EmptyTitle` if the title is blank; the ID
    /// counter is not advanced in that case.
    pub fn add(&mut self, title: &str, description: &str) -> Result<&LocalTask, LocalStoreError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(LocalStoreError::EmptyTitle);
        }

        let id = self.next_id;
        self.next_id += 1;

        let task = LocalTask {
            id,
            title: title.to_string(),
            description: description.to_string(),
            completed: false,
        };
        Ok(self.tasks.entry(id).or_insert(task))
    }

    /// All tasks in ascending ID order.
    pub fn list(&self) -> impl Iterator<Item = &LocalTask> {
        self.tasks.values()
    }

    #[must_use]
    pub fn get(&self, id: u64) -> Option<&LocalTask> {
        self.tasks.get(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// # Errors
    ///
    /// Returns `LocalStoreError::NotFound` if no task has the ID.
    pub fn mark_complete(&mut self, id: u64) -> Result<&LocalTask, LocalStoreError> {
        self.set_completed(id, true)
    }

    /// # Errors
    ///
    /// Returns `LocalStoreError::NotFound` if no task has the ID.
    pub fn mark_incomplete(&mut self, id: u64) -> Result<&LocalTask, LocalStoreError> {
        self.set_completed(id, false)
    }

    fn set_completed(&mut self, id: u64, completed: bool) -> Result<&LocalTask, LocalStoreError> {
        let task = self
            .tasks
            .get_mut(&id)
            .ok_or(LocalStoreError::NotFound(id))?;
        task.completed = completed;
        Ok(task)
    }

    /// Replaces the title and, when given, the description.
    ///
    /// # Errors
    ///
    /// Returns `LocalStoreError::EmptyTitle` for a blank title, checked
    /// before `LocalStoreError::NotFound`.
    pub fn update(
        &mut self,
        id: u64,
        title: &str,
        description: Option<&str>,
    ) -> Result<&LocalTask, LocalStoreError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(LocalStoreError::EmptyTitle);
        }

        let task = self
            .tasks
            .get_mut(&id)
            .ok_or(LocalStoreError::NotFound(id))?;
        title.clone_into(&mut task.title);
        if let Some(description) = description {
            description.clone_into(&mut task.description);
        }
        Ok(task)
    }

    /// Removes a task, returning whether it existed.
    pub fn delete(&mut self, id: u64) -> bool {
        self.tasks.remove(&id).is_some()
    }
}
