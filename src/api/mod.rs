//! HTTP API layer.
//!
//! This module contains the axum handlers, DTOs, error responses, and the
//! router for the owner-scoped task API.

pub mod auth;
pub mod dto;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod routes;

pub use auth::AuthenticatedUser;
pub use dto::{
    CreateTaskRequest, ListTasksQuery, ReplaceTaskRequest, TaskListResponse, TaskResponse,
    UpdateTaskRequest,
};
pub use error::{ApiError, ApiErrorResponse, FieldError, ValidationError};
pub use handlers::{
    AppState, HealthResponse, create_task, delete_task, get_task, health_check, list_tasks,
    replace_task, update_task,
};
pub use routes::{TASKS_PATH, cors_layer, create_router};
