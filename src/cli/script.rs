//! Headless board driver
//!
//! Runs board commands from a file or stdin, one per line:
//!
//! ```text
//! # comments and blank lines are skipped
//! add Buy milk
//! draft Walk dog
//! submit
//! complete 1
//! restore #1
//! delete 1
//! show
//! ```
//!
//! Board no-ops (unknown IDs, blank text) are not errors. Malformed lines
//! stop the script with the offending line number; earlier lines have
//! already been applied.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result};
use thiserror::Error;

use super::output::{transition_message, Output};
use crate::config::Labels;
use crate::domain::{BoardState, IdError, TaskBoard, TaskId};

#[derive(Debug, Error, PartialEq)]
pub enum ScriptError {
    #[error("line {line}: unknown command '{command}'")]
    UnknownCommand { line: usize, command: String },

    #[error("line {line}: '{command}' requires a task ID")]
    MissingId { line: usize, command: &'static str },

    #[error("line {line}: '{command}' takes no arguments")]
    UnexpectedArgument { line: usize, command: &'static str },

    #[error("line {line}: {source}")]
    InvalidId { line: usize, source: IdError },
}

/// A single parsed script line
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Add(String),
    Draft(String),
    Submit,
    Complete(TaskId),
    Restore(TaskId),
    Delete(TaskId),
    Show,
}

/// Parses one line; returns None for blank lines and comments
pub fn parse_line(line_no: usize, line: &str) -> Result<Option<Command>, ScriptError> {
    let trimmed = line.trim_start();
    if trimmed.trim().is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let (word, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest),
        None => (trimmed.trim_end(), ""),
    };

    let id_arg = |command: &'static str| -> Result<TaskId, ScriptError> {
        if rest.trim().is_empty() {
            return Err(ScriptError::MissingId { line: line_no, command });
        }
        rest.parse()
            .map_err(|source| ScriptError::InvalidId { line: line_no, source })
    };

    let no_arg = |command: &'static str, cmd: Command| -> Result<Command, ScriptError> {
        if rest.trim().is_empty() {
            Ok(cmd)
        } else {
            Err(ScriptError::UnexpectedArgument { line: line_no, command })
        }
    };

    let command = match word.to_lowercase().as_str() {
        // Text is passed through untrimmed; the board does its own trimming
        "add" => Command::Add(rest.to_string()),
        "draft" => Command::Draft(rest.trim_end_matches(['\r', '\n']).to_string()),
        "submit" => no_arg("submit", Command::Submit)?,
        "complete" | "done" => Command::Complete(id_arg("complete")?),
        "restore" | "undo" => Command::Restore(id_arg("restore")?),
        "delete" | "rm" => Command::Delete(id_arg("delete")?),
        "show" => no_arg("show", Command::Show)?,
        _ => {
            return Err(ScriptError::UnknownCommand {
                line: line_no,
                command: word.to_string(),
            })
        }
    };

    Ok(Some(command))
}

/// Applies a command to the board
pub fn apply(board: &mut TaskBoard, command: &Command, output: &Output, labels: &Labels) {
    match command {
        Command::Add(text) => {
            board.add_task(text);
        }
        Command::Draft(text) => {
            board.set_draft(text.clone());
        }
        Command::Submit => {
            board.submit_draft();
        }
        Command::Complete(id) => {
            board.complete_task(*id);
        }
        Command::Restore(id) => {
            board.restore_task(*id);
        }
        Command::Delete(id) => {
            board.delete_task(*id);
        }
        Command::Show => print_board(board.state(), output, labels),
    }
}

/// Runs a whole script against a fresh board and returns it
pub fn execute(script: &str, output: &Output, labels: &Labels) -> Result<TaskBoard> {
    let mut board = TaskBoard::new();

    let log = *output;
    board.subscribe(move |transition, state| {
        log.verbose_ctx("board", &transition_message(transition, state));
    });

    for (index, line) in script.lines().enumerate() {
        let line_no = index + 1;
        match parse_line(line_no, line)? {
            Some(command) => {
                output.verbose_ctx("script", &format!("line {}: {:?}", line_no, command));
                apply(&mut board, &command, output, labels);
            }
            None => continue,
        }
    }

    Ok(board)
}

/// Entry point for `taskboard script`
pub fn run(output: &Output, labels: &Labels, file: Option<&Path>) -> Result<()> {
    let script = match file {
        Some(path) if path != Path::new("-") => {
            output.verbose_ctx("script", &format!("Reading {}", path.display()));
            fs::read_to_string(path)
                .with_context(|| format!("Failed to read script: {}", path.display()))?
        }
        _ => {
            output.verbose_ctx("script", "Reading from stdin");
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read script from stdin")?;
            buf
        }
    };

    let board = execute(&script, output, labels)?;
    print_board(board.state(), output, labels);

    Ok(())
}

/// Prints the board in the current output format
pub fn print_board(state: &BoardState, output: &Output, labels: &Labels) {
    if output.is_json() {
        output.data(state);
    } else {
        output.text(&format_board(state, labels));
    }
}

/// Renders the board as plain text, pending column first
pub fn format_board(state: &BoardState, labels: &Labels) -> String {
    let mut out = String::new();

    let columns = [
        (&labels.pending_title, state.pending(), &labels.pending_empty),
        (&labels.completed_title, state.completed(), &labels.completed_empty),
    ];

    for (title, tasks, empty) in columns {
        out.push_str(&format!("{} ({})\n", title, tasks.len()));
        if tasks.is_empty() {
            out.push_str(&format!("  {}\n", empty));
        }
        for task in tasks {
            out.push_str(&format!("  {:<5} {}\n", task.id.to_string(), task.text));
        }
    }

    if !state.draft().is_empty() {
        out.push_str(&format!("Draft: {}\n", state.draft()));
    }

    // println! adds the final newline
    out.pop();
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;

    fn quiet() -> Output {
        Output::new(OutputFormat::Json, false)
    }

    fn id(n: u64) -> TaskId {
        n.to_string().parse().unwrap()
    }

    #[test]
    fn parse_skips_blank_and_comments() {
        assert_eq!(parse_line(1, ""), Ok(None));
        assert_eq!(parse_line(1, "   "), Ok(None));
        assert_eq!(parse_line(1, "# add nothing"), Ok(None));
        assert_eq!(parse_line(1, "   # indented"), Ok(None));
    }

    #[test]
    fn parse_commands() {
        assert_eq!(
            parse_line(1, "add Buy milk"),
            Ok(Some(Command::Add("Buy milk".to_string())))
        );
        assert_eq!(parse_line(1, "complete 3"), Ok(Some(Command::Complete(id(3)))));
        assert_eq!(parse_line(1, "restore #3"), Ok(Some(Command::Restore(id(3)))));
        assert_eq!(parse_line(1, "delete 3"), Ok(Some(Command::Delete(id(3)))));
        assert_eq!(parse_line(1, "submit"), Ok(Some(Command::Submit)));
        assert_eq!(parse_line(1, "SHOW"), Ok(Some(Command::Show)));
    }

    #[test]
    fn parse_aliases() {
        assert_eq!(parse_line(1, "done 2"), Ok(Some(Command::Complete(id(2)))));
        assert_eq!(parse_line(1, "undo 2"), Ok(Some(Command::Restore(id(2)))));
        assert_eq!(parse_line(1, "rm 2"), Ok(Some(Command::Delete(id(2)))));
    }

    #[test]
    fn parse_draft_keeps_text_verbatim() {
        assert_eq!(
            parse_line(1, "draft   spaced  "),
            Ok(Some(Command::Draft("  spaced  ".to_string())))
        );
        assert_eq!(parse_line(1, "draft"), Ok(Some(Command::Draft(String::new()))));
    }

    #[test]
    fn parse_errors_carry_line_numbers() {
        assert_eq!(
            parse_line(4, "frobnicate 1"),
            Err(ScriptError::UnknownCommand {
                line: 4,
                command: "frobnicate".to_string()
            })
        );
        assert_eq!(
            parse_line(5, "complete"),
            Err(ScriptError::MissingId {
                line: 5,
                command: "complete"
            })
        );
        assert!(matches!(
            parse_line(6, "delete abc"),
            Err(ScriptError::InvalidId { line: 6, .. })
        ));
        assert_eq!(
            parse_line(7, "submit now"),
            Err(ScriptError::UnexpectedArgument {
                line: 7,
                command: "submit"
            })
        );
    }

    #[test]
    fn error_messages() {
        let err = parse_line(2, "complete x").unwrap_err();
        assert!(err.to_string().starts_with("line 2: Invalid task ID format"));
    }

    #[test]
    fn execute_runs_scenario() {
        let script = "\
add Buy milk
add Walk dog
complete 1
";
        let board = execute(script, &quiet(), &Labels::default()).unwrap();
        let pending: Vec<_> = board.pending().iter().map(|t| t.text.as_str()).collect();
        let completed: Vec<_> = board.completed().iter().map(|t| t.text.as_str()).collect();
        assert_eq!(pending, vec!["Walk dog"]);
        assert_eq!(completed, vec!["Buy milk"]);
    }

    #[test]
    fn execute_treats_board_noops_as_success() {
        let script = "add   \ncomplete 9\nrestore 9\ndelete 9\n";
        let board = execute(script, &quiet(), &Labels::default()).unwrap();
        assert!(board.state().is_empty());
    }

    #[test]
    fn execute_stops_at_bad_line() {
        let err = execute("add a\nbogus\n", &quiet(), &Labels::default()).unwrap_err();
        let script_err = err.downcast_ref::<ScriptError>().unwrap();
        assert_eq!(
            script_err,
            &ScriptError::UnknownCommand {
                line: 2,
                command: "bogus".to_string()
            }
        );
    }

    #[test]
    fn draft_and_submit() {
        let board = execute("draft  Read book \nsubmit\n", &quiet(), &Labels::default()).unwrap();
        assert_eq!(board.pending()[0].text, "Read book");
        assert_eq!(board.draft(), "");
    }

    #[test]
    fn format_board_shows_counters_and_empty_copy() {
        let labels = Labels::default();
        let board = execute("add Buy milk\nadd Walk dog\n", &quiet(), &labels).unwrap();

        let text = format_board(board.state(), &labels);
        assert_eq!(
            text,
            "\
To Do (2)
  #2    Walk dog
  #1    Buy milk
Completed (0)
  Nothing here yet. Keep going!"
        );
    }

    #[test]
    fn format_board_includes_draft() {
        let labels = Labels::default();
        let board = execute("draft half done\n", &quiet(), &labels).unwrap();

        let text = format_board(board.state(), &labels);
        assert!(text.contains("No tasks yet. Add your first task above."));
        assert!(text.ends_with("Draft: half done"));
    }
}
