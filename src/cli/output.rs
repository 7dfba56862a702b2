//! Output formatting for CLI commands

use serde::Serialize;

use crate::domain::{BoardState, TaskId, Transition};

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Output helper for consistent formatting
#[derive(Debug, Clone, Copy)]
pub struct Output {
    format: OutputFormat,
    verbose: bool,
}

impl Output {
    pub fn new(format: OutputFormat, verbose: bool) -> Self {
        Self { format, verbose }
    }

    /// Prints plain text (text format only)
    pub fn text(&self, message: &str) {
        if self.format == OutputFormat::Text {
            println!("{}", message);
        }
    }

    /// Prints structured data
    pub fn data<T: Serialize>(&self, data: &T) {
        match self.format {
            OutputFormat::Text => {
                // Callers normally render text themselves; fall back to pretty JSON
                if let Ok(json) = serde_json::to_string_pretty(data) {
                    println!("{}", json);
                }
            }
            OutputFormat::Json => {
                if let Ok(json) = serde_json::to_string(data) {
                    println!("{}", json);
                }
            }
        }
    }

    /// Returns true if using JSON format
    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    /// Returns true if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Prints a verbose debug message (only when --verbose is set)
    pub fn verbose(&self, message: &str) {
        if self.verbose {
            eprintln!("[verbose] {}", message);
        }
    }

    /// Prints a verbose debug message with context (only when --verbose is set)
    pub fn verbose_ctx(&self, context: &str, message: &str) {
        if self.verbose {
            eprintln!("[verbose:{}] {}", context, message);
        }
    }
}

/// One-line human description of a transition
pub fn transition_message(transition: &Transition, state: &BoardState) -> String {
    let text_of = |id: TaskId| {
        state
            .get(id)
            .map(|t| t.text.as_str())
            .unwrap_or("?")
    };

    match transition {
        Transition::Added(id) => format!("Added {}: {}", id, text_of(*id)),
        Transition::Completed(id) => format!("Completed {}: {}", id, text_of(*id)),
        Transition::Restored(id) => format!("Moved back to pending {}: {}", id, text_of(*id)),
        Transition::Deleted(task) => format!("Deleted {}: {}", task.id, task.text),
        Transition::DraftChanged => format!("Draft: {:?}", state.draft()),
    }
}
