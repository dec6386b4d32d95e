//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run against a throwaway data
//! directory, so nothing touches the real config or cache. No test here
//! hits the network.

use chrono::{Duration, Local};
use std::process::Command;
use tempfile::TempDir;

/// Run a CLI command against an isolated data directory.
fn run_cli(dir: &TempDir, args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "waqt-cli", "--"])
        .args(args)
        .env("WAQT_DATA_DIR", dir.path())
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

/// Write a cache slot covering today and tomorrow.
fn seed_cache(dir: &TempDir) {
    let today = Local::now().date_naive();
    let rows: Vec<serde_json::Value> = [today, today + Duration::days(1)]
        .iter()
        .map(|d| {
            serde_json::json!({
                "date": d.to_string(),
                "fajr": "05:10",
                "sunrise": "06:20",
                "dhuhr": "12:15",
                "asr": "15:40",
                "maghrib": "18:05",
                "isha": "23:59",
            })
        })
        .collect();
    let payload = serde_json::json!({
        "schedule": rows,
        "location": {"latitude": 0.0, "longitude": 0.0, "captured_at_ms": 1},
        "fetched_at_ms": 1,
        "timezone": "UTC",
        "place": "Testville",
    });
    std::fs::write(dir.path().join("cache.json"), payload.to_string()).unwrap();
}

#[test]
fn test_help() {
    let dir = TempDir::new().unwrap();
    let (stdout, _, code) = run_cli(&dir, &["--help"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("times"));
    assert!(stdout.contains("refresh"));
}

#[test]
fn test_times_without_cache_fails() {
    let dir = TempDir::new().unwrap();
    let (_, stderr, code) = run_cli(&dir, &["times"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("no cached schedule"), "stderr: {stderr}");
}

#[test]
fn test_times_shows_seeded_day() {
    let dir = TempDir::new().unwrap();
    seed_cache(&dir);
    let today = Local::now().date_naive().to_string();
    let (stdout, _, code) = run_cli(&dir, &["times", "--date", &today]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Testville"));
    assert!(stdout.contains("Fajr"));
    assert!(stdout.contains("05:10"));
    assert!(stdout.contains("Isha"));
}

#[test]
fn test_times_json_output() {
    let dir = TempDir::new().unwrap();
    seed_cache(&dir);
    let (stdout, _, code) = run_cli(&dir, &["times", "--json"]);
    assert_eq!(code, 0);
    let prayers: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(prayers.as_array().unwrap().len(), 6);
}

#[test]
fn test_times_outside_window_reports_bounds() {
    let dir = TempDir::new().unwrap();
    seed_cache(&dir);
    let (stdout, _, code) = run_cli(&dir, &["times", "--date", "1999-01-01"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("no times cached"), "stdout: {stdout}");
    assert!(stdout.contains("window covers"), "stdout: {stdout}");
}

#[test]
fn test_next_with_seeded_cache() {
    let dir = TempDir::new().unwrap();
    seed_cache(&dir);
    let (stdout, _, code) = run_cli(&dir, &["next"]);
    assert_eq!(code, 0);
    assert!(!stdout.trim().is_empty());
}

#[test]
fn test_next_json_is_valid() {
    let dir = TempDir::new().unwrap();
    seed_cache(&dir);
    let (stdout, _, code) = run_cli(&dir, &["next", "--json"]);
    assert_eq!(code, 0);
    let payload: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(payload.get("prayer").is_some());
}

#[test]
fn test_refresh_without_location_is_denied() {
    let dir = TempDir::new().unwrap();
    let (_, stderr, code) = run_cli(&dir, &["refresh"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("denied"), "stderr: {stderr}");
}

#[test]
fn test_location_show_disabled_by_default() {
    let dir = TempDir::new().unwrap();
    let (stdout, _, code) = run_cli(&dir, &["location", "show"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("location disabled"), "stdout: {stdout}");
}

#[test]
fn test_location_set_then_show() {
    let dir = TempDir::new().unwrap();
    let (_, _, code) = run_cli(&dir, &["location", "set", "51.5", "-0.12"]);
    assert_eq!(code, 0);
    let (stdout, _, code) = run_cli(&dir, &["location", "show"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("51.5"));
    assert!(stdout.contains("-0.12"));
}

#[test]
fn test_location_set_rejects_bad_latitude() {
    let dir = TempDir::new().unwrap();
    let (_, stderr, code) = run_cli(&dir, &["location", "set", "123.0", "0.0"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("out of range"), "stderr: {stderr}");
}

#[test]
fn test_cache_status_empty() {
    let dir = TempDir::new().unwrap();
    let (stdout, _, code) = run_cli(&dir, &["cache", "status"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("no cached schedule"));
}

#[test]
fn test_cache_status_and_clear() {
    let dir = TempDir::new().unwrap();
    seed_cache(&dir);
    let (stdout, _, code) = run_cli(&dir, &["cache", "status"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("days cached: 2"), "stdout: {stdout}");

    let (_, _, code) = run_cli(&dir, &["cache", "clear"]);
    assert_eq!(code, 0);
    let (stdout, _, code) = run_cli(&dir, &["cache", "status"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("no cached schedule"));
}

#[test]
fn test_config_get_default_threshold() {
    let dir = TempDir::new().unwrap();
    let (stdout, _, code) = run_cli(&dir, &["config", "get", "cache.refresh_threshold_meters"]);
    assert_eq!(code, 0);
    assert!(stdout.trim().starts_with("25000"), "stdout: {stdout}");
}

#[test]
fn test_config_set_roundtrip() {
    let dir = TempDir::new().unwrap();
    let (_, _, code) = run_cli(
        &dir,
        &["config", "set", "cache.refresh_threshold_meters", "10000"],
    );
    assert_eq!(code, 0);
    let (stdout, _, code) = run_cli(&dir, &["config", "get", "cache.refresh_threshold_meters"]);
    assert_eq!(code, 0);
    assert!(stdout.trim().starts_with("10000"), "stdout: {stdout}");
}

#[test]
fn test_config_get_unknown_key_fails() {
    let dir = TempDir::new().unwrap();
    let (_, stderr, code) = run_cli(&dir, &["config", "get", "bogus.key"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("unknown config key"), "stderr: {stderr}");
}

#[test]
fn test_config_list_prints_toml() {
    let dir = TempDir::new().unwrap();
    let (stdout, _, code) = run_cli(&dir, &["config", "list"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("[api]"));
    assert!(stdout.contains("[cache]"));
}

#[test]
fn test_completions_generate() {
    let dir = TempDir::new().unwrap();
    let (stdout, _, code) = run_cli(&dir, &["completions", "bash"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("waqt"));
}
