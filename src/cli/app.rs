//! Main CLI application structure

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::output::{Output, OutputFormat};
use super::{script, tui};
use crate::config::Config;

#[derive(Parser)]
#[command(name = "taskboard")]
#[command(author, version, about = "Two-column terminal task board")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Path to a config file (defaults to the user config directory)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Defaults to `tui` when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the interactive board
    Tui {
        /// Input poll interval in milliseconds (overrides config)
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        tick_rate: Option<u64>,
    },

    /// Run board commands from a file and print the resulting board
    Script {
        /// Script file; reads stdin when omitted or "-"
        file: Option<PathBuf>,
    },
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(cli.format, cli.verbose);

    output.verbose("taskboard starting");

    let mut config = Config::load(cli.config.as_deref())?;
    match &config.source {
        Some(path) => output.verbose_ctx("config", &format!("Loaded {}", path.display())),
        None => output.verbose_ctx("config", "Using defaults"),
    }

    match cli.command.unwrap_or(Commands::Tui { tick_rate: None }) {
        Commands::Tui { tick_rate } => {
            if let Some(ms) = tick_rate {
                config.ui.tick_rate_ms = ms;
            }
            tui::run(&output, &config)?
        }
        Commands::Script { file } => script::run(&output, &config.labels, file.as_deref())?,
    }

    output.verbose("Command completed successfully");
    Ok(())
}
