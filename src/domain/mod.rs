//! Domain module for task management.
//!
//! This module contains the task entity and its value objects.

pub mod task;

pub use task::{
    DESCRIPTION_MAX_LENGTH, NewTask, OWNER_ID_MAX_LENGTH, OwnerId, TITLE_MAX_LENGTH, Task,
    TaskChanges, TaskFilter, TaskId, Timestamp,
};
