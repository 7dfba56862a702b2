//! Task domain model
//!
//! A task is a short line of user-entered text. Its text is trimmed on
//! creation and can never be empty.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::id::TaskId;

#[derive(Debug, Error, PartialEq)]
pub enum TaskError {
    #[error("Task text cannot be empty")]
    EmptyText,
}

/// Trims draft text, rejecting input that is empty or only whitespace
pub fn normalize_text(text: &str) -> Result<&str, TaskError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        Err(TaskError::EmptyText)
    } else {
        Ok(trimmed)
    }
}

/// A task on the board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier within the board
    pub id: TaskId,

    /// Trimmed, non-empty text
    pub text: String,

    /// When the task was added
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Creates a task from raw input text
    pub fn new(id: TaskId, text: &str) -> Result<Self, TaskError> {
        Self::with_timestamp(id, text, Utc::now())
    }

    /// Creates a task with an explicit creation time
    pub fn with_timestamp(
        id: TaskId,
        text: &str,
        created_at: DateTime<Utc>,
    ) -> Result<Self, TaskError> {
        let text = normalize_text(text)?;
        Ok(Self {
            id,
            text: text.to_string(),
            created_at,
        })
    }
}
