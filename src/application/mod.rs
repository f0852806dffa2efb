//! Application layer: task commands scoped to the calling user.

pub mod task_service;

pub use task_service::{TaskService, TaskServiceError};
