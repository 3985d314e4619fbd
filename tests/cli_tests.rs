//! Integration tests for the skycast CLI

use std::process::Command;

fn skycast() -> Command {
    Command::new(env!("CARGO_BIN_EXE_skycast"))
}

/// Test that the CLI shows help with explicit help flag
#[test]
fn test_cli_help() {
    let output = skycast()
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("skycast"));
    assert!(stdout.contains("serve"));
    assert!(stdout.contains("chat"));
    assert!(stdout.contains("diagnose-knowledge"));
}

#[test]
fn test_cli_version() {
    let output = skycast()
        .arg("--version")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

/// Serving without provider keys must fail at startup
#[test]
fn test_serve_without_keys_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = skycast()
        .arg("serve")
        .current_dir(dir.path())
        .env_remove("WEATHER_API_KEY")
        .env_remove("OPENAI_API_KEY")
        .env_remove("GEMINI_API_KEY")
        .env_remove("SKYCAST_WEATHER__API_KEY")
        .env_remove("SKYCAST_OPENAI__API_KEY")
        .env_remove("SKYCAST_GEMINI__API_KEY")
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("WEATHER_API_KEY"));
}

#[test]
fn test_unknown_subcommand_is_rejected() {
    let output = skycast()
        .arg("forecast")
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
}
