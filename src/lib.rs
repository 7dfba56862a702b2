//! taskboard - A two-column terminal task board
//!
//! Tasks are added to a pending column, marked complete, moved back to
//! pending, or deleted once completed. State lives in memory only and is
//! lost when the program exits.

pub mod domain;
pub mod config;
pub mod cli;

pub use domain::{BoardState, Column, Task, TaskBoard, TaskId, Transition};
