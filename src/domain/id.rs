//! Task identifiers
//!
//! ID Format: `#{sequence}` (e.g., `#1`, `#42`)
//!
//! IDs come from a per-board [`IdGenerator`] that starts at 1 and only counts
//! up, so an ID is never reused within a board, even after its task is deleted.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum IdError {
    #[error("Invalid task ID format: expected '#{{number}}' or '{{number}}', got '{0}'")]
    InvalidTaskId(String),

    #[error("Task ID must be greater than zero")]
    Zero,
}

/// Opaque task identifier, unique within a board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(u64);

impl TaskId {
    /// Returns the raw sequence number
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl FromStr for TaskId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let digits = s.strip_prefix('#').unwrap_or(s);

        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(IdError::InvalidTaskId(s.to_string()));
        }

        let value: u64 = digits
            .parse()
            .map_err(|_| IdError::InvalidTaskId(s.to_string()))?;

        if value == 0 {
            return Err(IdError::Zero);
        }

        Ok(Self(value))
    }
}

/// Hands out fresh task IDs in increasing order
#[derive(Debug, Clone)]
pub struct IdGenerator {
    next: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Returns a fresh ID and advances the counter
    pub fn next_id(&mut self) -> TaskId {
        let id = TaskId(self.next);
        self.next += 1;
        id
    }

    /// Returns the ID the next call to [`IdGenerator::next_id`] will produce
    pub fn peek(&self) -> TaskId {
        TaskId(self.next)
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
