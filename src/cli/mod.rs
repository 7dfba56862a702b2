//! # Command-Line Interface
//!
//! Entry point, output formatting, and the two ways to drive a board.
//!
//! ## Commands
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `tui` (default) | Interactive two-column board |
//! | `script [FILE]` | Apply board commands from a file or stdin, print the result |
//!
//! ## Output Formats
//!
//! `script` honours the `--format` flag:
//! - `text` (default) - Human-readable columns
//! - `json` - Machine-parseable board state
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug output on stderr:
//! ```bash
//! taskboard --verbose script tasks.txt
//! ```

mod app;
mod output;
pub mod script;
mod tui;

pub use app::{run, Cli, Commands};
pub use output::{transition_message, Output, OutputFormat};
