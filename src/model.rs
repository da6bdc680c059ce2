//! Wire types shared by the services and their clients.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use validator::{Validate, ValidationError};

pub const TASK_REQUIRED: &str = "Task is required";
pub const TITLE_REQUIRED: &str = "Title is required";
pub const TODO_NOT_FOUND: &str = "To-Do not found";
pub const NOTE_NOT_FOUND: &str = "Note not found";
pub const TODO_DELETED: &str = "To-Do deleted";
pub const NOTE_DELETED: &str = "Note deleted";

// ============================================================================
// Todos
// ============================================================================

/// A task record with completion flag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: i64,
    pub task: String,
    #[serde(default)]
    pub completed: bool,
}

/// Body of `POST /todos`
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct NewTodo {
    #[serde(default, deserialize_with = "loose_text")]
    #[validate(custom(function = "non_empty_task"))]
    pub task: String,
    #[serde(default, deserialize_with = "loose_flag")]
    pub completed: bool,
}

impl NewTodo {
    pub fn new(task: impl Into<String>) -> Self {
        Self {
            task: task.into(),
            completed: false,
        }
    }
}

/// Body of a successful `DELETE /todos/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedTodo {
    pub message: String,
    pub todo: Todo,
}

// ============================================================================
// Notes
// ============================================================================

/// A titled text record with timestamp
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /notes` and `PUT /notes/{id}`
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct NoteInput {
    #[serde(default, deserialize_with = "loose_text")]
    #[validate(custom(function = "non_blank_title"))]
    pub title: String,
    #[serde(default, deserialize_with = "loose_text")]
    pub content: String,
}

impl NoteInput {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}

/// Body of a successful `DELETE /notes/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedNote {
    pub message: String,
    pub note: Note,
}

// ============================================================================
// Errors
// ============================================================================

/// Body of every 4xx response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

// ============================================================================
// Lenient request fields
// ============================================================================

/// Accept any JSON value for a text field. Falsy values (`null`, `false`,
/// `0`, `""`) read as empty so validation reports them as missing; other
/// scalars are stringified.
fn loose_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    if !is_truthy(&value) {
        return Ok(String::new());
    }
    Ok(match value {
        Value::String(text) => text,
        other => other.to_string(),
    })
}

fn loose_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(|value| is_truthy(&value))
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

// Whitespace-only tasks are accepted, only the empty string is rejected.
fn non_empty_task(task: &str) -> Result<(), ValidationError> {
    if task.is_empty() {
        return Err(required(TASK_REQUIRED));
    }
    Ok(())
}

fn non_blank_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(required(TITLE_REQUIRED));
    }
    Ok(())
}

fn required(message: &'static str) -> ValidationError {
    let mut err = ValidationError::new("required");
    err.message = Some(message.into());
    err
}
