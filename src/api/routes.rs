//! Route configuration for the task API.
//!
//! # Routes
//!
//! | Method | Path | Handler | Description |
//! |--------|------|---------|-------------|
//! | GET | /api/v1/tasks | `list_tasks` | List the caller's tasks |
//! | POST | /api/v1/tasks | `create_task` | Create a task |
//! | GET | /api/v1/tasks/{id} | `get_task` | Get a task |
//! | PUT | /api/v1/tasks/{id} | `replace_task` | Replace a task |
//! | PATCH | /api/v1/tasks/{id} | `update_task` | Partially update a task |
//! | DELETE | /api/v1/tasks/{id} | `delete_task` | Delete a task |
//! | GET | /health | `health_check` | Health check, no authentication |

use axum::Router;
use axum::http::HeaderValue;
use axum::routing::get;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers::{
    AppState, create_task, delete_task, get_task, health_check, list_tasks, replace_task,
    update_task,
};

/// Collection path of the task resource.
pub const TASKS_PATH: &str = "/api/v1/tasks";

/// Creates the router with all API routes, request tracing, and CORS.
///
/// An empty `cors_origins` allows any origin without credentials.
pub fn create_router(state: AppState, cors_origins: &[String]) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route(TASKS_PATH, get(list_tasks).post(create_task))
        .route(
            &format!("{TASKS_PATH}/{{id}}"),
            get(get_task)
                .put(replace_task)
                .patch(update_task)
                .delete(delete_task),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(cors_origins))
        .with_state(state)
}

/// Builds the CORS layer for the configured origins.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| {
            HeaderValue::from_str(origin)
                .inspect_err(|_| tracing::warn!(origin = %origin, "Ignoring invalid CORS origin"))
                .ok()
        })
        .collect();

    if allowed.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(allowed))
            .allow_credentials(true)
            .allow_methods(AllowMethods::mirror_request())
            .allow_headers(AllowHeaders::mirror_request())
    }
}
