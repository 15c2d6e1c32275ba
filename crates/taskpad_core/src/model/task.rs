//! Task domain model.
//!
//! # Responsibility
//! - Define the task record and its persisted wire shape.
//! - Provide the trim validation shared by add and edit boundaries.
//!
//! # Invariants
//! - `id` is stable and never reused for another task.
//! - `text` is non-empty after trim whenever a task exists.
//! - `created_at` is immutable once assigned.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Stable identifier for a task.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type TaskId = Uuid;

/// One todo entry.
///
/// Serialized camelCase so the persisted slot layout stays
/// `{id, text, completed, createdAt}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Stable ID used for event dispatch and slot round-trips.
    pub id: TaskId,
    /// User-entered text, trimmed and non-empty at every mutation boundary.
    pub text: String,
    /// Completion flag, `false` at creation.
    pub completed: bool,
    /// Creation time in unix epoch milliseconds, immutable.
    pub created_at: i64,
}

impl Task {
    /// Creates a task with a generated stable ID.
    ///
    /// # Invariants
    /// - `completed` starts as `false`.
    /// - The caller has already validated `text` as non-blank.
    pub fn new(text: impl Into<String>, created_at_ms: i64) -> Self {
        Self::with_id(Uuid::new_v4(), text, created_at_ms)
    }

    /// Creates a task with a caller-provided stable ID.
    ///
    /// Used by load paths where identity already exists in the slot.
    pub fn with_id(id: TaskId, text: impl Into<String>, created_at_ms: i64) -> Self {
        Self {
            id,
            text: text.into(),
            completed: false,
            created_at: created_at_ms,
        }
    }
}

/// Validation failure for task text at add/edit boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskValidationError {
    /// Text is empty or whitespace-only after trim.
    EmptyText,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyText => write!(f, "task text must not be blank"),
        }
    }
}

impl Error for TaskValidationError {}

/// Trims `text` and rejects blank input.
///
/// Shared by `add` and `edit` so both boundaries enforce the same rule.
pub fn validate_text(text: &str) -> Result<&str, TaskValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(TaskValidationError::EmptyText);
    }
    Ok(trimmed)
}

/// Currently selected subset view.
///
/// Changes only what the renderer shows, never what the store contains.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Filter {
    /// Every task.
    #[default]
    All,
    /// Not completed.
    Active,
    /// Completed only.
    Completed,
}

impl Filter {
    /// Returns whether `task` is visible under this filter.
    pub fn admits(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Active => !task.completed,
            Self::Completed => task.completed,
        }
    }

    /// Stable lowercase name, matching the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }
}

impl Display for Filter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse failure for a filter name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFilterError(pub String);

impl Display for ParseFilterError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown filter `{}`; expected all|active|completed",
            self.0
        )
    }
}

impl Error for ParseFilterError {}

impl FromStr for Filter {
    type Err = ParseFilterError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            other => Err(ParseFilterError(other.to_string())),
        }
    }
}
