//! HTTP handlers for the task API.
//!
//! Every task handler takes the caller's [`AuthenticatedUser`] first, so an
//! unauthenticated request is rejected before its path, query, or body is
//! looked at.

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};

use super::auth::AuthenticatedUser;
use super::dto::{
    CreateTaskRequest, ListTasksQuery, ReplaceTaskRequest, TaskListResponse, TaskResponse,
    UpdateTaskRequest,
};
use super::error::{ApiErrorResponse, ValidationError};
use super::extract::{ApiJson, ApiPath, ApiQuery};
use crate::application::TaskService;
use crate::auth::TokenVerifier;
use crate::domain::TaskId;
use crate::infrastructure::{AppConfig, TaskRepository};

// =============================================================================
// Application State
// =============================================================================

/// Shared application dependencies.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Owner-scoped task commands.
    pub tasks: TaskService,
    /// Bearer token verifier.
    pub verifier: Arc<TokenVerifier>,
}

impl AppState {
    /// Creates a new `AppState` from its parts.
    #[must_use]
    pub fn new(repository: Arc<dyn TaskRepository>, verifier: TokenVerifier) -> Self {
        Self {
            tasks: TaskService::new(repository),
            verifier: Arc::new(verifier),
        }
    }

    /// Creates a new `AppState` from a repository and the loaded configuration.
    #[must_use]
    pub fn from_config(repository: Arc<dyn TaskRepository>, config: &AppConfig) -> Self {
        let verifier =
            TokenVerifier::new(config.jwt_secret.as_bytes(), config.jwt_issuer.as_deref());
        Self::new(repository, verifier)
    }
}

fn parse_task_id(raw: &str) -> Result<TaskId, ApiErrorResponse> {
    TaskId::parse(raw).map_err(|_| ValidationError::single("id", "Invalid task ID").into())
}

// =============================================================================
// GET /api/v1/tasks
// =============================================================================

/// Lists the caller's tasks, newest first.
///
/// # Query Parameters
///
/// - `completed`: optional boolean filter
/// - `limit`: page size (default 50)
/// - `offset`: number of tasks to skip (default 0)
///
/// # Errors
///
/// - 401 if unauthenticated
/// - 422 for invalid query parameters
/// - 500 on store failure
pub async fn list_tasks(
    AuthenticatedUser(owner): AuthenticatedUser,
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ListTasksQuery>,
) -> Result<Json<TaskListResponse>, ApiErrorResponse> {
    let (filter, pagination) = query.into_parts();
    let page = state.tasks.list(&owner, filter, pagination).await?;
    Ok(Json(TaskListResponse::from(page)))
}

// =============================================================================
// POST /api/v1/tasks
// =============================================================================

/// Creates a task owned by the caller.
///
/// # Request Body
///
/// ```json
/// { "title": "Task title", "description": "Optional description" }
/// ```
///
/// # Errors
///
/// - 401 if unauthenticated
/// - 400 / 415 for an unreadable body
/// - 422 for field constraint violations
/// - 500 on store failure
pub async fn create_task(
    AuthenticatedUser(owner): AuthenticatedUser,
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateTaskRequest>,
) -> Result<(StatusCode, Json<TaskResponse>), ApiErrorResponse> {
    let new_task = request.validate()?;
    let task = state.tasks.create(&owner, new_task).await?;
    Ok((StatusCode::CREATED, Json(TaskResponse::from(task))))
}

// =============================================================================
// GET /api/v1/tasks/{id}
// =============================================================================

/// Returns one of the caller's tasks.
///
/// # Errors
///
/// - 401 if unauthenticated
/// - 404 if absent or owned by someone else
/// - 422 for a malformed id
pub async fn get_task(
    AuthenticatedUser(owner): AuthenticatedUser,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
) -> Result<Json<TaskResponse>, ApiErrorResponse> {
    let task_id = parse_task_id(&id)?;
    let task = state.tasks.get_by_id(&owner, &task_id).await?;
    Ok(Json(TaskResponse::from(task)))
}

// =============================================================================
// PUT /api/v1/tasks/{id}
// =============================================================================

/// Replaces the title, description, and completion state of a task.
///
/// # Errors
///
/// - 401 if unauthenticated
/// - 404 if absent or owned by someone else
/// - 422 for a malformed id or field constraint violations
pub async fn replace_task(
    AuthenticatedUser(owner): AuthenticatedUser,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
    ApiJson(request): ApiJson<ReplaceTaskRequest>,
) -> Result<Json<TaskResponse>, ApiErrorResponse> {
    let task_id = parse_task_id(&id)?;
    let replacement = request.validate()?;
    let task = state
        .tasks
        .replace(
            &owner,
            &task_id,
            replacement.title,
            replacement.description,
            replacement.completed,
        )
        .await?;
    Ok(Json(TaskResponse::from(task)))
}

// =============================================================================
// PATCH /api/v1/tasks/{id}
// =============================================================================

/// Changes only the fields present in the body.
///
/// # Errors
///
/// - 401 if unauthenticated
/// - 404 if absent or owned by someone else
/// - 422 for a malformed id or field constraint violations
pub async fn update_task(
    AuthenticatedUser(owner): AuthenticatedUser,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
    ApiJson(request): ApiJson<UpdateTaskRequest>,
) -> Result<Json<TaskResponse>, ApiErrorResponse> {
    let task_id = parse_task_id(&id)?;
    let changes = request.validate()?;
    let task = state.tasks.update(&owner, &task_id, changes).await?;
    Ok(Json(TaskResponse::from(task)))
}

// =============================================================================
// DELETE /api/v1/tasks/{id}
// =============================================================================

/// Deletes one of the caller's tasks.
///
/// # Errors
///
/// - 401 if unauthenticated
/// - 404 if absent or owned by someone else
/// - 422 for a malformed id
pub async fn delete_task(
    AuthenticatedUser(owner): AuthenticatedUser,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
) -> Result<StatusCode, ApiErrorResponse> {
    let task_id = parse_task_id(&id)?;
    state.tasks.delete(&owner, &task_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// GET /health
// =============================================================================

/// Health check response body.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
}

/// Health check endpoint. Requires no authentication.
///
/// ```json
/// { "status": "healthy", "version": "0.1.0" }
/// ```
#[allow(clippy::unused_async)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// =============================================================================
// Tests
// =============================================================================
