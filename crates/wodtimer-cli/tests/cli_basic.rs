//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run against the dev config
//! directory (WODTIMER_ENV=dev) and verify outputs.

use std::process::Command;

/// Run a CLI command and return (exit code, stdout, stderr).
fn run_cli(args: &[&str]) -> (i32, String, String) {
    let output = Command::new("cargo")
        .args(["run", "-q", "-p", "wodtimer-cli", "--"])
        .args(args)
        .env("WODTIMER_ENV", "dev")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

#[test]
fn test_config_list() {
    let (code, stdout, _) = run_cli(&["config", "list"]);
    assert_eq!(code, 0, "Config list failed");
    assert!(stdout.contains("[timer]"));
    assert!(stdout.contains("[notifications]"));
}

#[test]
fn test_config_get() {
    let (code, stdout, _) = run_cli(&["config", "get", "timer.countdown_seconds"]);
    assert_eq!(code, 0, "Config get failed");
    assert!(!stdout.trim().is_empty());
}

#[test]
fn test_config_get_unknown_key_fails() {
    let (code, _, stderr) = run_cli(&["config", "get", "timer.nope"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("Unknown configuration key"));
}

#[test]
fn test_config_set_round_trips() {
    let (code, _, _) = run_cli(&["config", "set", "notifications.volume", "40"]);
    assert_eq!(code, 0, "Config set failed");
    let (code, stdout, _) = run_cli(&["config", "get", "notifications.volume"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "40");
    let _ = run_cli(&["config", "reset"]);
}

#[test]
fn test_timer_countdown_completes() {
    let (code, stdout, _) = run_cli(&["timer", "countdown", "--seconds", "1"]);
    assert_eq!(code, 0, "Countdown run failed");
    assert!(stdout.contains("timer_started") || stdout.contains("TimerStarted"));
    assert!(stdout.contains("\"completed\": true"));
}

#[test]
fn test_timer_help_lists_all_modes() {
    let (code, stdout, _) = run_cli(&["timer", "--help"]);
    assert_eq!(code, 0);
    for mode in ["stopwatch", "countdown", "interval", "emom", "amrap", "tabata"] {
        assert!(stdout.contains(mode), "missing mode {mode} in help");
    }
}
