//! CLI integration tests
//!
//! These drive the built binary's argument surface only; nothing here
//! needs a running broker.

use std::process::Command;

/// Test that the CLI shows help
#[test]
fn test_cli_help() {
    let output = Command::new(env!("CARGO_BIN_EXE_smokewatch"))
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "CLI help should succeed");
    assert!(stdout.contains("watch"), "Should show watch command");
    assert!(stdout.contains("publish"), "Should show publish command");
}

/// Test that the CLI shows version
#[test]
fn test_cli_version() {
    let output = Command::new(env!("CARGO_BIN_EXE_smokewatch"))
        .arg("--version")
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "CLI version should succeed");
    assert!(stdout.contains("smokewatch"), "Should show binary name");
}

/// Test watch subcommand help
#[test]
fn test_watch_help() {
    let output = Command::new(env!("CARGO_BIN_EXE_smokewatch"))
        .args(["watch", "--help"])
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Watch help should succeed");
    assert!(
        stdout.contains("Channel to watch"),
        "Should describe the channel argument"
    );
}

/// Test that watch requires a channel argument
#[test]
fn test_watch_requires_channel() {
    let output = Command::new(env!("CARGO_BIN_EXE_smokewatch"))
        .arg("watch")
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success(), "Watch without a channel should fail");
}

/// Test that an unknown channel is rejected before any connection attempt
#[test]
fn test_watch_rejects_unknown_channel() {
    let output = Command::new(env!("CARGO_BIN_EXE_smokewatch"))
        .args(["watch", "grill"])
        .output()
        .expect("Failed to execute command");

    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success(), "Unknown channel should fail");
    assert!(
        stderr.contains("unknown channel"),
        "Should explain the invalid channel"
    );
}
