//! Domain models for taskboard
//!
//! Contains the board state machine without any terminal or I/O concerns.

mod id;
mod task;
mod board;

pub use id::{IdError, IdGenerator, TaskId};
pub use task::{normalize_text, Task, TaskError};
pub use board::{BoardState, Column, SubscriptionId, TaskBoard, Transition};
