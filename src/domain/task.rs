//! Task domain model.
//!
//! This module contains the owner-scoped task entity used by the HTTP API
//! together with the value objects and change sets that describe how a task
//! may be created and mutated.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// Field Limits
// =============================================================================

/// Maximum number of characters in a task title.
pub const TITLE_MAX_LENGTH: usize = 200;

/// Maximum number of characters in a task description.
pub const DESCRIPTION_MAX_LENGTH: usize = 2000;

/// Maximum number of characters in an owner identifier (`user_id` column width).
pub const OWNER_ID_MAX_LENGTH: usize = 36;

// =============================================================================
// Value Objects - Newtypes
// =============================================================================

/// Unique identifier for a task.
///
/// This is a newtype wrapper around UUID to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TaskId(Uuid);

impl TaskId {
    /// Creates a `TaskId` from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Generates a new `TaskId` with a randomly generated UUID (v4).
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parses a `TaskId` from its hyphenated string form.
    ///
    /// # Errors
    ///
    /// Returns `uuid::Error` if the input is not a valid UUID.
    pub fn parse(value: &str) -> Result<Self, uuid::Error> {
        Uuid::parse_str(value.trim()).map(Self)
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Identifier of the principal that owns a task.
///
/// The value is the subject of a verified bearer token. It is opaque to this
/// crate apart from its length bounds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OwnerId(String);

impl OwnerId {
    /// Creates an `OwnerId` if the value is non-empty and fits the storage column.
    #[must_use]
    pub fn parse(value: impl Into<String>) -> Option<Self> {
        let value: String = value.into();
        let length = value.chars().count();
        (length > 0 && length <= OWNER_ID_MAX_LENGTH).then_some(Self(value))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for OwnerId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// A timestamp wrapper for `DateTime<Utc>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a `Timestamp` from a `DateTime<Utc>`.
    #[must_use]
    pub const fn from_datetime(datetime: DateTime<Utc>) -> Self {
        Self(datetime)
    }

    /// Returns the inner `DateTime<Utc>`.
    #[must_use]
    pub const fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Returns the current time as a `Timestamp`.
    #[must_use]
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Returns `self` if it is later than `previous`, otherwise the smallest
    /// representable instant after `previous`.
    ///
    /// Mutations use this so `updated_at` strictly increases even when two
    /// writes land within the clock's resolution.
    #[must_use]
    pub fn after(self, previous: Self) -> Self {
        if self > previous {
            self
        } else {
            Self(previous.0 + Duration::microseconds(1))
        }
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0.to_rfc3339())
    }
}

// =============================================================================
// Task
// =============================================================================

/// A task owned by a single user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier, immutable.
    pub task_id: TaskId,
    /// The user who created the task, immutable.
    pub owner: OwnerId,
    /// Title of the task.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Whether the task has been completed.
    pub completed: bool,
    /// When the task was created.
    pub created_at: Timestamp,
    /// When the task was last mutated.
    pub updated_at: Timestamp,
}

impl Task {
    /// Creates a new, incomplete task without description.
    #[must_use]
    pub fn new(
        task_id: TaskId,
        owner: OwnerId,
        title: impl Into<String>,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            task_id,
            owner,
            title: title.into(),
            description: None,
            completed: false,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Returns a new task with the given description.
    #[must_use]
    pub fn with_description(self, description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            ..self
        }
    }

    /// Returns a new task with the completed flag set to the given value.
    #[must_use]
    pub fn with_completed(self, completed: bool) -> Self {
        Self { completed, ..self }
    }

    /// Returns `true` if the task is owned by `owner`.
    #[must_use]
    pub fn is_owned_by(&self, owner: &OwnerId) -> bool {
        &self.owner == owner
    }

    /// Applies a change set, keeping every field the change set leaves out.
    ///
    /// `updated_at` always moves forward, even for an empty change set.
    #[must_use]
    pub fn apply(self, changes: TaskChanges, now: Timestamp) -> Self {
        let updated_at = now.after(self.updated_at);
        Self {
            title: changes.title.unwrap_or(self.title),
            description: changes.description.unwrap_or(self.description),
            completed: changes.completed.unwrap_or(self.completed),
            updated_at,
            ..self
        }
    }
}

// =============================================================================
// Commands
// =============================================================================

/// Validated data for a task that does not exist yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    /// Title of the task.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
}

/// A set of field changes for an existing task.
///
/// `None` on any field means "leave unchanged". For `description`,
/// `Some(None)` clears the description.
#[allow(clippy::option_option)]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskChanges {
    /// New title.
    pub title: Option<String>,
    /// New description, or `Some(None)` to clear it.
    pub description: Option<Option<String>>,
    /// New completion state.
    pub completed: Option<bool>,
}

impl TaskChanges {
    /// Builds a change set that replaces every mutable field.
    #[must_use]
    pub const fn replace_all(title: String, description: Option<String>, completed: bool) -> Self {
        Self {
            title: Some(title),
            description: Some(description),
            completed: Some(completed),
        }
    }

    /// Returns `true` if no field would change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.completed.is_none()
    }
}

// =============================================================================
// Filters
// =============================================================================

/// Equality filters for listing tasks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskFilter {
    /// Only tasks whose completion state equals this value.
    pub completed: Option<bool>,
}

impl TaskFilter {
    /// Returns `true` if the task passes every filter.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        self.completed.is_none_or(|completed| task.completed == completed)
    }
}

// =============================================================================
// Tests
// =============================================================================
