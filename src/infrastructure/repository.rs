//! Repository trait for the task entity.
//!
//! Every method returns a boxed `'static` future so the repository can live
//! behind `Arc<dyn TaskRepository>` inside the axum state. Every read and
//! write is scoped to a single owner through [`OwnerScope`].

use futures::future::BoxFuture;
use thiserror::Error;

use crate::domain::{OwnerId, Task, TaskChanges, TaskFilter, TaskId, Timestamp};

// =============================================================================
// Repository Error
// =============================================================================

/// Errors that can occur during repository operations.
///
/// Absence of a task is not an error at this layer; lookups return `Option`
/// and deletes return `bool`.
#[derive(Debug, Error, Clone)]
pub enum RepositoryError {
    /// Database connection or query error.
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// A stored row could not be mapped back to a task.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

// =============================================================================
// Owner Scope
// =============================================================================

/// The visibility boundary of a repository call.
///
/// A task outside the scope behaves exactly like a task that does not exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerScope {
    owner: OwnerId,
}

impl OwnerScope {
    /// Creates a scope restricted to the given owner.
    #[must_use]
    pub const fn new(owner: OwnerId) -> Self {
        Self { owner }
    }

    /// Returns the owner this scope is restricted to.
    #[must_use]
    pub const fn owner(&self) -> &OwnerId {
        &self.owner
    }

    /// Returns `true` if the task is visible within this scope.
    #[must_use]
    pub fn permits(&self, task: &Task) -> bool {
        task.is_owned_by(&self.owner)
    }
}

// =============================================================================
// Pagination
// =============================================================================

/// Offset pagination parameters for list queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Maximum number of items to return.
    pub limit: u32,
    /// Number of matching items to skip.
    pub offset: u64,
}

impl Pagination {
    /// Default page size.
    pub const DEFAULT_LIMIT: u32 = 50;

    /// Creates new pagination parameters.
    #[must_use]
    pub const fn new(limit: u32, offset: u64) -> Self {
        Self { limit, offset }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            limit: Self::DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

/// Paginated result containing items and the total matching count.
#[derive(Debug, Clone)]
pub struct PaginatedResult<T> {
    /// The items in the current page.
    pub items: Vec<T>,
    /// Total number of matching items, independent of limit and offset.
    pub total: u64,
    /// The limit the page was requested with.
    pub limit: u32,
    /// The offset the page was requested with.
    pub offset: u64,
}

impl<T> PaginatedResult<T> {
    /// Creates a new paginated result.
    #[must_use]
    pub const fn new(items: Vec<T>, total: u64, pagination: Pagination) -> Self {
        Self {
            items,
            total,
            limit: pagination.limit,
            offset: pagination.offset,
        }
    }
}

// =============================================================================
// Task Repository
// =============================================================================

/// Repository trait for owner-scoped Task storage.
pub trait TaskRepository: Send + Sync {
    /// Inserts a new task and returns it as stored.
    fn insert(&self, task: &Task) -> BoxFuture<'static, Result<Task, RepositoryError>>;

    /// Finds a task by its ID within the scope.
    ///
    /// Returns `Ok(None)` if the task does not exist or belongs to another owner.
    fn find(
        &self,
        scope: &OwnerScope,
        id: &TaskId,
    ) -> BoxFuture<'static, Result<Option<Task>, RepositoryError>>;

    /// Lists the scope's tasks matching the filter, newest first.
    ///
    /// `total` counts every matching task regardless of pagination.
    fn list(
        &self,
        scope: &OwnerScope,
        filter: TaskFilter,
        pagination: Pagination,
    ) -> BoxFuture<'static, Result<PaginatedResult<Task>, RepositoryError>>;

    /// Applies the change set to a task within the scope.
    ///
    /// Returns `Ok(None)` if no such task is visible.
    fn update(
        &self,
        scope: &OwnerScope,
        id: &TaskId,
        changes: TaskChanges,
        now: Timestamp,
    ) -> BoxFuture<'static, Result<Option<Task>, RepositoryError>>;

    /// Deletes a task within the scope.
    ///
    /// Returns `Ok(true)` if the task was deleted, `Ok(false)` if no such task was visible.
    fn delete(
        &self,
        scope: &OwnerScope,
        id: &TaskId,
    ) -> BoxFuture<'static, Result<bool, RepositoryError>>;
}

// =============================================================================
// Tests
// =============================================================================
