//! End-to-end tests for the tomato binary.
//!
//! Every test points `--config` at a temporary file so the user's real
//! configuration is never touched.

use std::time::Duration;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

// ============================================================================
// Test Helpers
// ============================================================================

/// Creates a command with an isolated configuration file.
fn tomato(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("tomato").unwrap();
    cmd.arg("--config").arg(dir.path().join("config.json"));
    cmd.env_remove("RUST_LOG");
    cmd
}

// ============================================================================
// config
// ============================================================================

#[test]
fn test_config_show_defaults() {
    let dir = tempfile::tempdir().unwrap();

    tomato(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Focus:          25 min"))
        .stdout(predicate::str::contains("Long break every 4 sessions"));
}

#[test]
fn test_config_set_persists() {
    let dir = tempfile::tempdir().unwrap();

    tomato(&dir)
        .args(["config", "set", "--work", "50", "--sessions", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration saved"));

    let text = std::fs::read_to_string(dir.path().join("config.json")).unwrap();
    assert!(text.contains("\"workDuration\": 50"));

    tomato(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Focus:          50 min"))
        .stdout(predicate::str::contains("Short break:    5 min"))
        .stdout(predicate::str::contains("Long break every 2 sessions"));
}

#[test]
fn test_config_set_out_of_range() {
    let dir = tempfile::tempdir().unwrap();

    tomato(&dir)
        .args(["config", "set", "--short-break", "45"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("45"));

    assert!(!dir.path().join("config.json").exists());
}

#[test]
fn test_config_set_without_values() {
    let dir = tempfile::tempdir().unwrap();

    tomato(&dir)
        .args(["config", "set"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("nothing to change"));
}

#[test]
fn test_config_reset() {
    let dir = tempfile::tempdir().unwrap();
    tomato(&dir)
        .args(["config", "set", "--long-break", "30"])
        .assert()
        .success();

    tomato(&dir)
        .args(["config", "reset"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Long break:     15 min"));

    assert!(!dir.path().join("config.json").exists());
}

#[test]
fn test_config_path() {
    let dir = tempfile::tempdir().unwrap();

    tomato(&dir)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.json"));
}

#[test]
fn test_config_show_corrupt_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("config.json"), "not json").unwrap();

    tomato(&dir)
        .args(["config", "show"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("malformed configuration"))
        .stderr(predicate::str::contains("tomato config reset"));
}

// ============================================================================
// run
// ============================================================================

#[test]
fn test_run_quits_on_q() {
    let dir = tempfile::tempdir().unwrap();

    tomato(&dir)
        .args(["run", "--no-sound", "--no-notify", "--work", "1"])
        .write_stdin("?\nq\n")
        .timeout(Duration::from_secs(10))
        .assert()
        .success()
        .stdout(predicate::str::contains("focus 1m"))
        .stdout(predicate::str::contains("Controls"))
        .stdout(predicate::str::contains("Stopped after 0 sessions"));
}

#[test]
fn test_run_skip_from_stdin() {
    let dir = tempfile::tempdir().unwrap();

    tomato(&dir)
        .args(["run", "--no-sound", "--no-notify"])
        .write_stdin("n\nbogus\nq\n")
        .timeout(Duration::from_secs(10))
        .assert()
        .success()
        .stdout(predicate::str::contains("Unknown command 'bogus'"))
        .stdout(predicate::str::contains("Stopped after 1 session."));
}

#[test]
fn test_run_rejects_unsupported_sound_file() {
    let dir = tempfile::tempdir().unwrap();
    let sound = dir.path().join("notes.txt");
    std::fs::write(&sound, "not audio").unwrap();

    tomato(&dir)
        .args(["run", "--no-notify", "--sound"])
        .arg(&sound)
        .write_stdin("q\n")
        .timeout(Duration::from_secs(10))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("cannot use sound file"))
        .stderr(predicate::str::contains("unsupported sound format"));
}

// ============================================================================
// misc
// ============================================================================

#[test]
fn test_completions_bash() {
    Command::cargo_bin("tomato")
        .unwrap()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("tomato"));
}

#[test]
fn test_version() {
    Command::cargo_bin("tomato")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("tomato "));
}
