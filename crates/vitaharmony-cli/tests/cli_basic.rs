//! Basic CLI E2E tests.
//!
//! Each test runs the built binary against its own temporary home
//! directory, so config and database never touch the real user's files.

use std::io::Write;
use std::process::{Command, Stdio};

use tempfile::TempDir;

fn cli(home: &TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_vitaharmony"));
    cmd.env("HOME", home.path())
        .env_remove("VITAHARMONY_ENV")
        .env("VITAHARMONY_LOG", "off");
    cmd
}

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(home: &TempDir, args: &[&str]) -> (String, String, i32) {
    let output = cli(home).args(args).output().expect("Failed to execute CLI command");
    (
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
        output.status.code().unwrap_or(-1),
    )
}

fn run_ok(home: &TempDir, args: &[&str]) -> String {
    let (stdout, stderr, code) = run_cli(home, args);
    assert_eq!(code, 0, "{args:?} failed: {stderr}");
    stdout
}

fn onboard_guest(home: &TempDir) {
    run_ok(home, &["onboard", "--guest"]);
}

#[test]
fn test_config_defaults() {
    let home = TempDir::new().unwrap();
    assert_eq!(run_ok(&home, &["config", "get", "gate.timeout_secs"]).trim(), "5");
    assert_eq!(run_ok(&home, &["config", "get", "session.tick_ms"]).trim(), "1000");

    let (_, stderr, code) = run_cli(&home, &["config", "get", "nope.key"]);
    assert_eq!(code, 1);
    assert!(stderr.starts_with("error:"));
}

#[test]
fn test_config_set() {
    let home = TempDir::new().unwrap();
    run_ok(&home, &["config", "set", "session.coach_interval_secs", "20"]);
    assert_eq!(run_ok(&home, &["config", "get", "session.coach_interval_secs"]).trim(), "20");
}

#[test]
fn test_onboard_and_profile() {
    let home = TempDir::new().unwrap();
    let out = run_ok(
        &home,
        &[
            "onboard", "--name", "Ada", "--email", "ada@example.com", "--level", "advanced",
            "--workout-minutes", "45",
        ],
    );
    let profile: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(profile["name"], "Ada");
    assert_eq!(profile["fitnessLevel"], "Advanced");

    let (_, stderr, code) = run_cli(&home, &["onboard", "--guest"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("already completed"));

    let shown: serde_json::Value = serde_json::from_str(&run_ok(&home, &["profile", "show"])).unwrap();
    assert_eq!(shown["preferredWorkoutDuration"], 45);
    assert_eq!(shown["bmiCategory"], "N/A");
}

#[test]
fn test_invalid_duration_rejected() {
    let home = TempDir::new().unwrap();
    onboard_guest(&home);
    let (_, stderr, code) = run_cli(&home, &["profile", "durations", "--workout", "17"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"));

    run_ok(&home, &["profile", "durations", "--meditation", "20"]);
}

#[test]
fn test_settings_toggle() {
    let home = TempDir::new().unwrap();
    assert_eq!(run_ok(&home, &["settings", "toggle", "sound"]).trim(), "off");
    assert_eq!(run_ok(&home, &["settings", "toggle", "sound"]).trim(), "on");
    run_ok(&home, &["settings", "reminder", "07:45"]);
    let settings: serde_json::Value = serde_json::from_str(&run_ok(&home, &["settings", "show"])).unwrap();
    assert_eq!(settings["reminderTime"], "07:45:00");
}

#[test]
fn test_catalog_lists_workouts() {
    let home = TempDir::new().unwrap();
    onboard_guest(&home);
    let out = run_ok(&home, &["catalog", "workouts"]);
    assert!(out.contains("Full Body Workout"));
}

#[test]
fn test_stats_empty() {
    let home = TempDir::new().unwrap();
    let stats: serde_json::Value = serde_json::from_str(&run_ok(&home, &["stats"])).unwrap();
    assert_eq!(stats["workouts"]["total_workouts"], 0);
    assert_eq!(stats["meditation"]["total_sessions"], 0);

    let streak: serde_json::Value = serde_json::from_str(&run_ok(&home, &["streak"])).unwrap();
    assert_eq!(streak["streak"], 0);
}

#[test]
fn test_gate_without_url_is_native() {
    let home = TempDir::new().unwrap();
    let event: serde_json::Value = serde_json::from_str(&run_ok(&home, &["gate"])).unwrap();
    assert_eq!(event["type"], "DisplayModeResolved");
    assert_eq!(event["mode"]["mode"], "native_app");
}

#[test]
fn test_play_cancel() {
    let home = TempDir::new().unwrap();
    onboard_guest(&home);
    let mut child = cli(&home)
        .args(["play", "workout", "full body workout"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child.stdin.take().unwrap().write_all(b"cancel\n").unwrap();
    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let types: Vec<String> = stdout
        .lines()
        .filter_map(|l| serde_json::from_str::<serde_json::Value>(l).ok())
        .filter_map(|v| v["type"].as_str().map(str::to_string))
        .collect();
    assert_eq!(types.first().map(String::as_str), Some("SessionStarted"));
    assert!(types.iter().any(|t| t == "SessionCancelled"));
}

#[test]
fn test_unknown_workout_fails() {
    let home = TempDir::new().unwrap();
    let (_, stderr, code) = run_cli(&home, &["play", "workout", "Moon Walk"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("no workout named"));
}

#[test]
fn test_catalog_tips_lists_every_tip() {
    let home = TempDir::new().unwrap();
    let out = run_ok(&home, &["catalog", "tips"]);
    assert_eq!(out.lines().count(), 10);
    let quote = run_ok(&home, &["catalog", "quote"]);
    let tip = quote.lines().nth(1).unwrap().trim_start_matches("tip: ");
    assert_eq!(out.lines().next(), Some(tip));
}
