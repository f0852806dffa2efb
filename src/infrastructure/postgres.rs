//! `PostgreSQL` repository implementation.
//!
//! Tasks are stored as plain columns in the `tasks` table created by
//! `migrations/0001_create_tasks_table.sql`:
//!
//! ```sql
//! CREATE TABLE tasks (
//!     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
//!     title VARCHAR(200) NOT NULL,
//!     description TEXT NULL,
//!     completed BOOLEAN NOT NULL DEFAULT FALSE,
//!     user_id VARCHAR(36) NOT NULL,
//!     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
//!     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
//! );
//! CREATE INDEX tasks_user_id_idx ON tasks (user_id);
//! ```
//!
//! Every statement binds the owner as `$1` and filters with the same
//! predicate, so a row owned by someone else is indistinguishable from a
//! missing one.

use chrono::{DateTime, Utc};
use futures::FutureExt;
use futures::future::BoxFuture;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::{OwnerId, Task, TaskChanges, TaskFilter, TaskId, Timestamp};
use crate::infrastructure::{
    OwnerScope, PaginatedResult, Pagination, RepositoryError, TaskRepository,
};

// =============================================================================
// SQL Fragments
// =============================================================================

macro_rules! task_columns {
    () => {
        "id, title, description, completed, user_id, created_at, updated_at"
    };
}

macro_rules! owner_predicate {
    () => {
        "user_id = $1"
    };
}

const INSERT_TASK: &str = concat!(
    "INSERT INTO tasks (user_id, id, title, description, completed, created_at, updated_at) ",
    "VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING ",
    task_columns!()
);

const SELECT_TASK: &str = concat!(
    "SELECT ",
    task_columns!(),
    " FROM tasks WHERE ",
    owner_predicate!(),
    " AND id = $2"
);

const COUNT_TASKS: &str = concat!(
    "SELECT COUNT(*) FROM tasks WHERE ",
    owner_predicate!(),
    " AND ($2::BOOLEAN IS NULL OR completed = $2)"
);

const SELECT_TASK_PAGE: &str = concat!(
    "SELECT ",
    task_columns!(),
    " FROM tasks WHERE ",
    owner_predicate!(),
    " AND ($2::BOOLEAN IS NULL OR completed = $2)",
    " ORDER BY created_at DESC, id DESC LIMIT $3 OFFSET $4"
);

// `updated_at` never moves backwards, even if the database clock does.
const UPDATE_TASK: &str = concat!(
    "UPDATE tasks SET ",
    "title = COALESCE($3, title), ",
    "description = CASE WHEN $4 THEN $5 ELSE description END, ",
    "completed = COALESCE($6, completed), ",
    "updated_at = GREATEST($7, updated_at + INTERVAL '1 microsecond') ",
    "WHERE ",
    owner_predicate!(),
    " AND id = $2 RETURNING ",
    task_columns!()
);

const DELETE_TASK: &str = concat!("DELETE FROM tasks WHERE ", owner_predicate!(), " AND id = $2");

// =============================================================================
// Row Mapping
// =============================================================================

/// A row of the `tasks` table.
#[derive(Debug, Clone, sqlx::FromRow)]
struct TaskRow {
    id: Uuid,
    title: String,
    description: Option<String>,
    completed: bool,
    user_id: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<TaskRow> for Task {
    type Error = RepositoryError;

    fn try_from(row: TaskRow) -> Result<Self, Self::Error> {
        let owner = OwnerId::parse(row.user_id).ok_or_else(|| {
            RepositoryError::SerializationError(format!("invalid user_id on task {}", row.id))
        })?;

        Ok(Self {
            task_id: TaskId::from_uuid(row.id),
            owner,
            title: row.title,
            description: row.description,
            completed: row.completed,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

fn database_error(error: sqlx::Error) -> RepositoryError {
    RepositoryError::DatabaseError(error.to_string())
}

// =============================================================================
// PostgreSQL Task Repository
// =============================================================================

/// `PostgreSQL` implementation of `TaskRepository`.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    /// Connection pool for `PostgreSQL`.
    pool: PgPool,
}

impl PostgresTaskRepository {
    /// Creates a new `PostgreSQL` task repository with the given connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns the underlying connection pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}

impl TaskRepository for PostgresTaskRepository {
    fn insert(&self, task: &Task) -> BoxFuture<'static, Result<Task, RepositoryError>> {
        let pool = self.pool.clone();
        let task = task.clone();

        async move {
            let row: TaskRow = sqlx::query_as(INSERT_TASK)
                .bind(task.owner.as_str())
                .bind(task.task_id.as_uuid())
                .bind(&task.title)
                .bind(task.description.as_deref())
                .bind(task.completed)
                .bind(task.created_at.as_datetime())
                .bind(task.updated_at.as_datetime())
                .fetch_one(&pool)
                .await
                .map_err(database_error)?;

            Task::try_from(row)
        }
        .boxed()
    }

    fn find(
        &self,
        scope: &OwnerScope,
        id: &TaskId,
    ) -> BoxFuture<'static, Result<Option<Task>, RepositoryError>> {
        let pool = self.pool.clone();
        let owner = scope.owner().clone();
        let id = *id;

        async move {
            let row: Option<TaskRow> = sqlx::query_as(SELECT_TASK)
                .bind(owner.as_str())
                .bind(id.as_uuid())
                .fetch_optional(&pool)
                .await
                .map_err(database_error)?;

            row.map(Task::try_from).transpose()
        }
        .boxed()
    }

    fn list(
        &self,
        scope: &OwnerScope,
        filter: TaskFilter,
        pagination: Pagination,
    ) -> BoxFuture<'static, Result<PaginatedResult<Task>, RepositoryError>> {
        let pool = self.pool.clone();
        let owner = scope.owner().clone();

        async move {
            let mut transaction = pool.begin().await.map_err(database_error)?;

            // Count and page must observe the same snapshot.
            sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
                .execute(&mut *transaction)
                .await
                .map_err(database_error)?;

            let (total,): (i64,) = sqlx::query_as(COUNT_TASKS)
                .bind(owner.as_str())
                .bind(filter.completed)
                .fetch_one(&mut *transaction)
                .await
                .map_err(database_error)?;

            let offset = i64::try_from(pagination.offset).unwrap_or(i64::MAX);

            let rows: Vec<TaskRow> = sqlx::query_as(SELECT_TASK_PAGE)
                .bind(owner.as_str())
                .bind(filter.completed)
                .bind(i64::from(pagination.limit))
                .bind(offset)
                .fetch_all(&mut *transaction)
                .await
                .map_err(database_error)?;

            transaction.commit().await.map_err(database_error)?;

            let items = rows
                .into_iter()
                .map(Task::try_from)
                .collect::<Result<Vec<_>, _>>()?;

            let total = u64::try_from(total).unwrap_or_default();

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
        let pool = self.pool.clone();
        let owner = scope.owner().clone();
        let id = *id;

        async move {
            let replace_description = changes.description.is_some();
            let description = changes.description.flatten();

            let row: Option<TaskRow> = sqlx::query_as(UPDATE_TASK)
                .bind(owner.as_str())
                .bind(id.as_uuid())
                .bind(changes.title)
                .bind(replace_description)
                .bind(description)
                .bind(changes.completed)
                .bind(now.as_datetime())
                .fetch_optional(&pool)
                .await
                .map_err(database_error)?;

            row.map(Task::try_from).transpose()
        }
        .boxed()
    }

    fn delete(
        &self,
        scope: &OwnerScope,
        id: &TaskId,
    ) -> BoxFuture<'static, Result<bool, RepositoryError>> {
        let pool = self.pool.clone();
        let owner = scope.owner().clone();
        let id = *id;

        async move {
            let result = sqlx::query(DELETE_TASK)
                .bind(owner.as_str())
                .bind(id.as_uuid())
                .execute(&pool)
                .await
                .map_err(database_error)?;

            Ok(result.rows_affected() > 0)
        }
        .boxed()
    }
}

// =============================================================================
// Tests
// =============================================================================
