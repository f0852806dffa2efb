//! Data Transfer Objects for API requests and responses.
//!
//! Requests are deserialized leniently and then validated into domain
//! commands; responses mirror the stored task with RFC 3339 timestamps.

use serde::{Deserialize, Deserializer, Serialize};

use super::error::ValidationError;
use crate::domain::{
    DESCRIPTION_MAX_LENGTH, NewTask, TITLE_MAX_LENGTH, Task, TaskChanges, TaskFilter,
};
use crate::infrastructure::{PaginatedResult, Pagination};

// =============================================================================
// Request DTOs
// =============================================================================

/// Request DTO for creating a new task.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTaskRequest {
    /// Title of the task.
    pub title: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
}

impl CreateTaskRequest {
    /// Validates the request into a [`NewTask`].
    ///
    /// # Errors
    ///
    /// Returns every field error found.
    pub fn validate(self) -> Result<NewTask, ValidationError> {
        let title = validate_title(&self.title);
        let description = validate_description(self.description.as_deref());

        match (title, description) {
            (Ok(title), Ok(description)) => Ok(NewTask { title, description }),
            (Err(left), Err(right)) => Err(left.merge(right)),
            (Err(error), _) | (_, Err(error)) => Err(error),
        }
    }
}

/// Request DTO for a partial update.
///
/// An absent field is left unchanged. `description: null` clears the
/// description; `title: null` and `completed: null` are rejected.
#[allow(clippy::option_option)]
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTaskRequest {
    /// New title for the task.
    #[serde(default, deserialize_with = "present")]
    pub title: Option<Option<String>>,
    /// New description, or `Some(None)` to clear it.
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
    /// New completion state.
    #[serde(default, deserialize_with = "present")]
    pub completed: Option<Option<bool>>,
}

impl UpdateTaskRequest {
    /// Validates the request into a [`TaskChanges`].
    ///
    /// # Errors
    ///
    /// Returns every field error found.
    pub fn validate(self) -> Result<TaskChanges, ValidationError> {
        let mut errors = Vec::new();

        let title = match self.title {
            None => None,
            Some(None) => {
                errors.extend(ValidationError::single("title", "Title must not be null").errors);
                None
            }
            Some(Some(title)) => validate_title(&title)
                .map_err(|error| errors.extend(error.errors))
                .ok(),
        };

        let description = match self.description {
            None => None,
            Some(description) => validate_description(description.as_deref())
                .map_err(|error| errors.extend(error.errors))
                .ok(),
        };

        let completed = match self.completed {
            None => None,
            Some(None) => {
                errors.extend(
                    ValidationError::single("completed", "Completed must not be null").errors,
                );
                None
            }
            Some(Some(completed)) => Some(completed),
        };

        if errors.is_empty() {
            Ok(TaskChanges {
                title,
                description,
                completed,
            })
        } else {
            Err(ValidationError::new(errors))
        }
    }
}

/// Request DTO for replacing every mutable field.
#[derive(Debug, Clone, Deserialize)]
pub struct ReplaceTaskRequest {
    /// New title.
    pub title: String,
    /// New description; absent or null clears it.
    #[serde(default)]
    pub description: Option<String>,
    /// New completion state.
    pub completed: bool,
}

/// A validated replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedReplace {
    /// New title.
    pub title: String,
    /// New description.
    pub description: Option<String>,
    /// New completion state.
    pub completed: bool,
}

impl ReplaceTaskRequest {
    /// Validates the request.
    ///
    /// # Errors
    ///
    /// Returns every field error found.
    pub fn validate(self) -> Result<ValidatedReplace, ValidationError> {
        let completed = self.completed;
        CreateTaskRequest {
            title: self.title,
            description: self.description,
        }
        .validate()
        .map(|new_task| ValidatedReplace {
            title: new_task.title,
            description: new_task.description,
            completed,
        })
    }
}

/// Query parameters for listing tasks.
#[derive(Debug, Clone, Deserialize)]
pub struct ListTasksQuery {
    /// Only tasks with this completion state.
    #[serde(default)]
    pub completed: Option<bool>,
    /// Page size.
    #[serde(default = "default_limit")]
    pub limit: u32,
    /// Number of matching tasks to skip.
    #[serde(default)]
    pub offset: u64,
}

const fn default_limit() -> u32 {
    Pagination::DEFAULT_LIMIT
}

impl Default for ListTasksQuery {
    fn default() -> Self {
        Self {
            completed: None,
            limit: Pagination::DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

impl ListTasksQuery {
    /// Splits the query into a filter and pagination.
    ///
    /// Any `limit` is accepted; `0` yields an empty page that still reports `total`.
    #[must_use]
    pub const fn into_parts(self) -> (TaskFilter, Pagination) {
        (
            TaskFilter {
                completed: self.completed,
            },
            Pagination::new(self.limit, self.offset),
        )
    }
}

// =============================================================================
// Response DTOs
// =============================================================================

/// Response DTO for a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskResponse {
    /// Task ID.
    pub id: String,
    /// Title of the task.
    pub title: String,
    /// Description of the task.
    pub description: Option<String>,
    /// Whether the task is completed.
    pub completed: bool,
    /// Owner of the task; always the caller.
    pub user_id: String,
    /// Creation timestamp.
    pub created_at: String,
    /// Last update timestamp.
    pub updated_at: String,
}

impl From<&Task> for TaskResponse {
    fn from(task: &Task) -> Self {
        Self {
            id: task.task_id.to_string(),
            title: task.title.clone(),
            description: task.description.clone(),
            completed: task.completed,
            user_id: task.owner.to_string(),
            created_at: task.created_at.to_string(),
            updated_at: task.updated_at.to_string(),
        }
    }
}

impl From<Task> for TaskResponse {
    fn from(task: Task) -> Self {
        Self::from(&task)
    }
}

/// Response DTO for a page of tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskListResponse {
    /// Tasks in the page, newest first.
    pub tasks: Vec<TaskResponse>,
    /// Number of tasks matching the filter.
    pub total: u64,
    /// Requested page size.
    pub limit: u32,
    /// Requested offset.
    pub offset: u64,
}

impl From<PaginatedResult<Task>> for TaskListResponse {
    fn from(page: PaginatedResult<Task>) -> Self {
        Self {
            tasks: page.items.iter().map(TaskResponse::from).collect(),
            total: page.total,
            limit: page.limit,
            offset: page.offset,
        }
    }
}

// =============================================================================
// Validation Functions
// =============================================================================

/// Validates a task title.
///
/// # Validation Rules
///
/// - Title is trimmed
/// - Title must not be empty
/// - Title must not exceed 200 characters
///
/// # Errors
///
/// Returns a `title` field error when a rule is violated.
pub fn validate_title(title: &str) -> Result<String, ValidationError> {
    let title = title.trim();

    if title.is_empty() {
        return Err(ValidationError::single("title", "Title is required"));
    }

    if title.chars().count() > TITLE_MAX_LENGTH {
        return Err(ValidationError::single(
            "title",
            format!("Title must not exceed {TITLE_MAX_LENGTH} characters"),
        ));
    }

    Ok(title.to_string())
}

/// Validates a task description.
///
/// A blank description is stored as no description.
///
/// # Errors
///
/// Returns a `description` field error when it exceeds 2000 characters.
pub fn validate_description(description: Option<&str>) -> Result<Option<String>, ValidationError> {
    description.map_or(Ok(None), |description| {
        let description = description.trim();
        if description.is_empty() {
            Ok(None)
        } else if description.chars().count() > DESCRIPTION_MAX_LENGTH {
            Err(ValidationError::single(
                "description",
                format!("Description must not exceed {DESCRIPTION_MAX_LENGTH} characters"),
            ))
        } else {
            Ok(Some(description.to_string()))
        }
    })
}

/// Deserializes a field that was present in the payload, keeping `null` as `Some(None)`.
#[allow(clippy::option_option)]
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{OwnerId, TaskId, Timestamp};
    use rstest::rstest;

    // -------------------------------------------------------------------------
    // Title / Description Validation
    // -------------------------------------------------------------------------

    #[rstest]
    #[case("Buy milk", Some("Buy milk"))]
    #[case("  padded  ", Some("padded"))]
    #[case("", None)]
    #[case("   ", None)]
    fn test_validate_title(#[case] input: &str, #[case] expected: Option<&str>) {
        assert_eq!(validate_title(input).ok().as_deref(), expected);
    }

    #[rstest]
    fn test_validate_title_length_counts_characters() {
        let at_limit = "é".repeat(TITLE_MAX_LENGTH);
        let over_limit = "é".repeat(TITLE_MAX_LENGTH + 1);

        assert!(validate_title(&at_limit).is_ok());
        assert_eq!(
            validate_title(&over_limit).unwrap_err().errors[0].field,
            "title"
        );
    }

    #[rstest]
    #[case(None, Ok(None))]
    #[case(Some(""), Ok(None))]
    #[case(Some(" text "), Ok(Some("text".to_string())))]
    fn test_validate_description(
        #[case] input: Option<&str>,
        #[case] expected: Result<Option<String>, ValidationError>,
    ) {
        assert_eq!(validate_description(input), expected);
    }

    #[rstest]
    fn test_validate_description_too_long() {
        let long = "a".repeat(DESCRIPTION_MAX_LENGTH + 1);
        assert!(validate_description(Some(&long)).is_err());
    }

    // -------------------------------------------------------------------------
    // Request Validation
    // -------------------------------------------------------------------------

    #[rstest]
    fn test_create_request_collects_all_errors() {
        let request = CreateTaskRequest {
            title: " ".to_string(),
            description: Some("a".repeat(DESCRIPTION_MAX_LENGTH + 1)),
        };

        let error = request.validate().unwrap_err();
        let fields: Vec<&str> = error.errors.iter().map(|e| e.field.as_str()).collect();

        assert_eq!(fields, vec!["title", "description"]);
    }

    #[rstest]
    fn test_update_request_distinguishes_absent_and_null() {
        let absent: UpdateTaskRequest = serde_json::from_str(r#"{"completed": true}"#).unwrap();
        let cleared: UpdateTaskRequest = serde_json::from_str(r#"{"description": null}"#).unwrap();

        let absent = absent.validate().unwrap();
        let cleared = cleared.validate().unwrap();

        assert_eq!(absent.description, None);
        assert_eq!(absent.completed, Some(true));
        assert_eq!(cleared.description, Some(None));
        assert!(cleared.title.is_none());
    }

    #[rstest]
    #[case(r#"{"title": null}"#, "title")]
    #[case(r#"{"completed": null}"#, "completed")]
    #[case(r#"{"title": ""}"#, "title")]
    fn test_update_request_rejects_invalid_fields(#[case] body: &str, #[case] field: &str) {
        let request: UpdateTaskRequest = serde_json::from_str(body).unwrap();

        let error = request.validate().unwrap_err();

        assert_eq!(error.errors[0].field, field);
    }

    #[rstest]
    fn test_empty_update_request_is_empty_change_set() {
        let request: UpdateTaskRequest = serde_json::from_str("{}").unwrap();
        assert!(request.validate().unwrap().is_empty());
    }

    #[rstest]
    fn test_replace_request_requires_completed() {
        let result = serde_json::from_str::<ReplaceTaskRequest>(r#"{"title": "x"}"#);
        assert!(result.is_err());
    }

    #[rstest]
    fn test_replace_request_validates_title() {
        let request: ReplaceTaskRequest =
            serde_json::from_str(r#"{"title": "  Final ", "completed": true}"#).unwrap();

        let validated = request.validate().unwrap();

        assert_eq!(
            validated,
            ValidatedReplace {
                title: "Final".to_string(),
                description: None,
                completed: true,
            }
        );
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(150)]
    fn test_list_query_passes_limit_through(#[case] limit: u32) {
        let query = ListTasksQuery {
            completed: Some(true),
            limit,
            offset: 7,
        };

        let (filter, pagination) = query.into_parts();

        assert_eq!(filter.completed, Some(true));
        assert_eq!(pagination, Pagination::new(limit, 7));
    }

    // -------------------------------------------------------------------------
    // Response Mapping
    // -------------------------------------------------------------------------

    #[rstest]
    fn test_task_response_from_task() {
        let task = Task::new(
            TaskId::generate(),
            OwnerId::parse("alice").unwrap(),
            "Title",
            Timestamp::now(),
        );

        let response = TaskResponse::from(&task);

        assert_eq!(response.id, task.task_id.to_string());
        assert_eq!(response.user_id, "alice");
        assert_eq!(response.created_at, task.created_at.to_string());
        assert!(chrono::DateTime::parse_from_rfc3339(&response.updated_at).is_ok());
    }

    #[rstest]
    fn test_task_response_serializes_null_description() {
        let task = Task::new(
            TaskId::generate(),
            OwnerId::parse("alice").unwrap(),
            "Title",
            Timestamp::now(),
        );

        let json = serde_json::to_value(TaskResponse::from(task)).unwrap();

        assert!(json["description"].is_null());
        assert_eq!(json["completed"], false);
    }
}
