//! CLI integration tests

use std::path::Path;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;

fn voice_notes_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_voice-notes"))
}

/// Binary with config and cache directories redirected into `home`
fn isolated_bin(home: &Path) -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::new(env!("CARGO_BIN_EXE_voice-notes"));
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join("config"))
        .env("XDG_CACHE_HOME", home.join("cache"))
        .env_remove("RUST_LOG")
        .env_remove("VOICE_NOTES_CLIPS_DIR");
    cmd
}

#[test]
fn help_output() {
    let output = voice_notes_bin()
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("voice notes"));
    assert!(stdout.contains("--clips-dir"));
    assert!(stdout.contains("--quality"));
    assert!(stdout.contains("--log-level"));
}

#[test]
fn version_output() {
    voice_notes_bin()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("voice-notes"))
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn config_help() {
    let output = voice_notes_bin()
        .args(["config", "--help"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("init"));
    assert!(stdout.contains("set"));
    assert!(stdout.contains("get"));
    assert!(stdout.contains("list"));
    assert!(stdout.contains("path"));
}

#[test]
fn config_path_command() {
    let home = tempfile::tempdir().unwrap();

    isolated_bin(home.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("voice-notes"))
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn config_set_then_get() {
    let home = tempfile::tempdir().unwrap();

    isolated_bin(home.path())
        .args(["config", "set", "quality", "speech"])
        .assert()
        .success();

    isolated_bin(home.path())
        .args(["config", "get", "quality"])
        .assert()
        .success()
        .stdout(predicate::str::diff("speech\n"));

    isolated_bin(home.path())
        .args(["config", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("quality"))
        .stdout(predicate::str::contains("(not set)"));
}

#[test]
fn config_rejects_invalid_values() {
    let home = tempfile::tempdir().unwrap();

    isolated_bin(home.path())
        .args(["config", "set", "status_interval_ms", "0"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("status_interval_ms"));

    isolated_bin(home.path())
        .args(["config", "get", "api_key"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unknown key"));
}

#[test]
fn config_init_twice_fails() {
    let home = tempfile::tempdir().unwrap();

    isolated_bin(home.path())
        .args(["config", "init"])
        .assert()
        .success();
    isolated_bin(home.path())
        .args(["config", "init"])
        .assert()
        .code(1);
}

#[test]
fn invalid_quality_error() {
    let output = voice_notes_bin()
        .args(["--quality", "lossless"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("invalid") || stderr.contains("Invalid"),
        "Expected error about invalid quality, got: {}",
        stderr
    );
}

#[test]
fn invalid_log_level_is_usage_error() {
    let home = tempfile::tempdir().unwrap();

    isolated_bin(home.path())
        .args(["--log-level", "voice_notes=["])
        .write_stdin("quit\n")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid log level"));
}

#[test]
fn shell_reports_errors_and_quits() {
    let home = tempfile::tempdir().unwrap();

    isolated_bin(home.path())
        .arg("--clips-dir")
        .arg(home.path().join("clips"))
        .write_stdin("help\nplay 1\nseek 1 0:05\nbogus\nquit\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Voice note 1 does not exist"))
        .stderr(predicate::str::contains("Unknown command"));
}

#[test]
fn malformed_rust_log_falls_back_to_configured_level() {
    let home = tempfile::tempdir().unwrap();

    isolated_bin(home.path())
        .env("RUST_LOG", "voice_notes=[")
        .arg("--clips-dir")
        .arg(home.path().join("clips"))
        .write_stdin("quit\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Invalid log level").not());
}

#[test]
fn config_command_rejects_invalid_log_level() {
    let home = tempfile::tempdir().unwrap();

    isolated_bin(home.path())
        .args(["--log-level", "voice_notes=[", "config", "path"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid log level"));
}
