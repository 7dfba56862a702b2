//! Interactive terminal board
//!
//! Renders the pending and completed columns side by side with an input
//! line on top, using ratatui over crossterm.

mod app;
mod event;
mod terminal;
mod utils;
mod views;

use std::panic::{self, AssertUnwindSafe};
use std::time::Duration;

use anyhow::{anyhow, Result};

use super::Output;
use crate::config::Config;
use app::App;
use event::EventHandler;

/// Launch the TUI
pub fn run(output: &Output, config: &Config) -> Result<()> {
    output.verbose_ctx(
        "tui",
        &format!("Initializing TUI, tick rate {}ms", config.ui.tick_rate_ms),
    );

    let mut terminal = terminal::init()?;
    let mut app = App::new(config);
    let events = EventHandler::new(Duration::from_millis(config.ui.tick_rate_ms));

    // Restore the terminal even if the loop panics
    let result = panic::catch_unwind(AssertUnwindSafe(|| app.run(&mut terminal, events)));
    let restore_result = terminal::restore();

    let outcome = match result {
        Ok(inner_result) => {
            restore_result?;
            inner_result
        }
        Err(panic_payload) => {
            let _ = restore_result;
            if let Some(s) = panic_payload.downcast_ref::<&str>() {
                Err(anyhow!("TUI panicked: {}", s))
            } else if let Some(s) = panic_payload.downcast_ref::<String>() {
                Err(anyhow!("TUI panicked: {}", s))
            } else {
                Err(anyhow!("TUI panicked with unknown error"))
            }
        }
    };

    output.verbose_ctx(
        "tui",
        &format!(
            "Exited with {} pending, {} completed (board discarded)",
            app.board().pending_len(),
            app.board().completed_len()
        ),
    );

    outcome
}
