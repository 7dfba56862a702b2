//! CLI integration tests for taskboard
//!
//! These drive the headless `script` command end to end: parsing, board
//! transitions, output formats and configuration.

use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Command for the taskboard binary, isolated from the user's config directory
fn taskboard_cmd(home: &TempDir) -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("taskboard"));
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"));
    cmd
}

/// Runs a script through stdin and returns the parsed JSON board
fn run_json(script: &str) -> serde_json::Value {
    let home = TempDir::new().unwrap();
    let output = taskboard_cmd(&home)
        .args(["script", "--format", "json"])
        .write_stdin(script)
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let last_line = stdout.lines().last().unwrap();
    serde_json::from_str(last_line).unwrap()
}

fn texts(json: &serde_json::Value, column: &str) -> Vec<String> {
    json[column]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["text"].as_str().unwrap().to_string())
        .collect()
}

// =============================================================================
// Scenario Tests
// =============================================================================

#[test]
fn test_milk_and_dog_scenario() {
    let board = run_json("add Buy milk\nadd Walk dog\n");
    assert_eq!(texts(&board, "pending"), vec!["Walk dog", "Buy milk"]);

    let board = run_json("add Buy milk\nadd Walk dog\ncomplete 1\n");
    assert_eq!(texts(&board, "pending"), vec!["Walk dog"]);
    assert_eq!(texts(&board, "completed"), vec!["Buy milk"]);

    let board = run_json("add Buy milk\nadd Walk dog\ncomplete 1\ndelete 1\n");
    assert_eq!(texts(&board, "pending"), vec!["Walk dog"]);
    assert!(texts(&board, "completed").is_empty());
}

#[test]
fn test_restore_returns_task_to_front() {
    let board = run_json("add a\nadd b\ncomplete 1\nrestore 1\n");
    assert_eq!(texts(&board, "pending"), vec!["a", "b"]);
    assert!(texts(&board, "completed").is_empty());
}

#[test]
fn test_text_is_trimmed_and_blank_ignored() {
    let board = run_json("add    padded   \nadd     \n");
    assert_eq!(texts(&board, "pending"), vec!["padded"]);
}

#[test]
fn test_noops_do_not_fail() {
    let board = run_json("add a\nrestore 1\ndelete 1\ncomplete 42\n");
    assert_eq!(texts(&board, "pending"), vec!["a"]);
    assert!(texts(&board, "completed").is_empty());
}

#[test]
fn test_deleted_id_is_not_reused() {
    let board = run_json("add a\ncomplete 1\ndelete 1\nadd b\n");
    assert_eq!(board["pending"][0]["id"], 2);
}

#[test]
fn test_draft_submit() {
    let board = run_json("draft  Read book\nsubmit\ndraft next\n");
    assert_eq!(texts(&board, "pending"), vec!["Read book"]);
    assert_eq!(board["draft"], "next");
}

// =============================================================================
// Output Tests
// =============================================================================

#[test]
fn test_text_output_shows_columns() {
    let home = TempDir::new().unwrap();
    taskboard_cmd(&home)
        .arg("script")
        .write_stdin("add Buy milk\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("To Do (1)"))
        .stdout(predicate::str::contains("#1    Buy milk"))
        .stdout(predicate::str::contains("Completed (0)"))
        .stdout(predicate::str::contains("Nothing here yet. Keep going!"));
}

#[test]
fn test_empty_script_prints_empty_board() {
    let home = TempDir::new().unwrap();
    taskboard_cmd(&home)
        .arg("script")
        .write_stdin("# nothing\n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("No tasks yet. Add your first task above."));
}

#[test]
fn test_show_prints_intermediate_board() {
    let home = TempDir::new().unwrap();
    let output = taskboard_cmd(&home)
        .args(["script", "-f", "json"])
        .write_stdin("add a\nshow\ncomplete 1\n")
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let boards: Vec<serde_json::Value> = stdout
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    assert_eq!(boards.len(), 2);
    assert_eq!(texts(&boards[0], "pending"), vec!["a"]);
    assert_eq!(texts(&boards[1], "completed"), vec!["a"]);
}

#[test]
fn test_verbose_logs_transitions() {
    let home = TempDir::new().unwrap();
    taskboard_cmd(&home)
        .args(["--verbose", "script"])
        .write_stdin("add Buy milk\ncomplete 1\ncomplete 1\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("[verbose:board] Added #1: Buy milk"))
        .stderr(predicate::str::contains("[verbose:board] Completed #1: Buy milk"))
        .stderr(predicate::str::contains("Using defaults"));
}

// =============================================================================
// Script File Tests
// =============================================================================

#[test]
fn test_script_from_file() {
    let home = TempDir::new().unwrap();
    let script = home.path().join("board.txt");
    fs::write(&script, "# groceries\nadd Eggs\nadd Bread\ndone 2\n").unwrap();

    taskboard_cmd(&home)
        .arg("script")
        .arg(&script)
        .assert()
        .success()
        .stdout(predicate::str::contains("To Do (1)"))
        .stdout(predicate::str::contains("Completed (1)"));
}

#[test]
fn test_missing_script_file_fails() {
    let home = TempDir::new().unwrap();
    taskboard_cmd(&home)
        .args(["script", "does-not-exist.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read script"));
}

#[test]
fn test_unknown_command_reports_line() {
    let home = TempDir::new().unwrap();
    taskboard_cmd(&home)
        .arg("script")
        .write_stdin("add a\n\nfly away\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 3: unknown command 'fly'"));
}

#[test]
fn test_bad_id_reports_line() {
    let home = TempDir::new().unwrap();
    taskboard_cmd(&home)
        .arg("script")
        .write_stdin("complete one\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 1: Invalid task ID format"));
}

// =============================================================================
// Config Tests
// =============================================================================

#[test]
fn test_config_labels_apply_to_text_output() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("custom.toml");
    fs::write(
        &config,
        "[labels]\npending_title = \"Backlog\"\ncompleted_empty = \"Zero done\"\n",
    )
    .unwrap();

    taskboard_cmd(&home)
        .arg("--config")
        .arg(&config)
        .arg("script")
        .write_stdin("add x\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Backlog (1)"))
        .stdout(predicate::str::contains("Zero done"));
}

#[test]
fn test_invalid_config_fails() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("bad.toml");
    fs::write(&config, "[ui]\ntick_rate_ms = 0\n").unwrap();

    taskboard_cmd(&home)
        .arg("--config")
        .arg(&config)
        .arg("script")
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("tick_rate_ms must be greater than zero"));
}

#[test]
fn test_missing_explicit_config_fails() {
    let home = TempDir::new().unwrap();
    taskboard_cmd(&home)
        .args(["--config", "nowhere.toml", "script"])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read config"));
}

#[test]
fn test_help_lists_commands() {
    let home = TempDir::new().unwrap();
    taskboard_cmd(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("tui"))
        .stdout(predicate::str::contains("script"));
}
