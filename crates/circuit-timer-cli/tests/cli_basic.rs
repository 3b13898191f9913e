//! Basic CLI E2E tests.
//!
//! Each test runs the built binary against its own data directory.

use std::path::Path;
use std::process::Command;

/// Run a CLI command and return (exit code, stdout, stderr).
fn run_cli(data_dir: &Path, args: &[&str]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_circuit-timer"))
        .args(args)
        .env("CIRCUIT_TIMER_DATA_DIR", data_dir)
        .env_remove("CIRCUIT_TIMER_BACKEND_URL")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

fn json(stdout: &str) -> serde_json::Value {
    serde_json::from_str(stdout).expect("stdout is JSON")
}

#[test]
fn test_settings_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let (code, out, _) = run_cli(dir.path(), &["settings", "get", "workTime"]);
    assert_eq!(code, 0);
    assert_eq!(out.trim(), "40");

    let (code, out, _) = run_cli(dir.path(), &["settings", "list"]);
    assert_eq!(code, 0);
    let settings = json(&out);
    assert_eq!(settings["restTime"], 20);
    assert_eq!(settings["setsPerExercise"], 3);
    assert_eq!(settings["circuits"], 2);
    assert_eq!(settings["exercises"].as_array().unwrap().len(), 4);
}

#[test]
fn test_settings_set_persists() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, _) = run_cli(dir.path(), &["settings", "set", "restTime", "30"]);
    assert_eq!(code, 0);
    assert!(dir.path().join("settings.toml").exists());

    let (code, out, _) = run_cli(dir.path(), &["settings", "get", "restTime"]);
    assert_eq!(code, 0);
    assert_eq!(out.trim(), "30");
}

#[test]
fn test_settings_set_rejects_bad_input() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, err) = run_cli(dir.path(), &["settings", "set", "nope", "1"]);
    assert_eq!(code, 1);
    assert!(err.contains("nope"));

    let (code, _, _) = run_cli(dir.path(), &["settings", "set", "workTime", "0"]);
    assert_eq!(code, 1);

    let (code, _, _) = run_cli(dir.path(), &["settings", "get", "nope"]);
    assert_eq!(code, 1);
}

#[test]
fn test_settings_adjust_clamps() {
    let dir = tempfile::tempdir().unwrap();
    let (code, out, _) = run_cli(dir.path(), &["settings", "adjust", "work", "-100"]);
    assert_eq!(code, 0);
    assert_eq!(out.trim(), "10");

    let (code, out, _) = run_cli(dir.path(), &["settings", "adjust", "circuits", "9"]);
    assert_eq!(code, 0);
    assert_eq!(out.trim(), "5");

    let (code, _, _) = run_cli(dir.path(), &["settings", "adjust", "tempo", "1"]);
    assert_ne!(code, 0);
}

#[test]
fn test_settings_reset() {
    let dir = tempfile::tempdir().unwrap();
    run_cli(dir.path(), &["settings", "set", "circuits", "4"]);
    let (code, _, _) = run_cli(dir.path(), &["settings", "reset"]);
    assert_eq!(code, 0);

    let (_, out, _) = run_cli(dir.path(), &["settings", "get", "circuits"]);
    assert_eq!(out.trim(), "2");
}

#[test]
fn test_malformed_settings_fall_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("settings.toml"), "workTime = \"soon\"").unwrap();

    let (code, out, _) = run_cli(dir.path(), &["settings", "get", "workTime"]);
    assert_eq!(code, 0);
    assert_eq!(out.trim(), "40");
}

#[test]
fn test_exercise_add_toggle_remove() {
    let dir = tempfile::tempdir().unwrap();
    let (code, out, _) = run_cli(dir.path(), &["exercise", "add", "Burpees", "--description", "Full body"]);
    assert_eq!(code, 0);
    let id = out.trim().to_string();

    let (_, out, _) = run_cli(dir.path(), &["exercise", "list", "--json"]);
    let list = json(&out);
    let names: Vec<&str> = list.as_array().unwrap().iter().map(|e| e["name"].as_str().unwrap()).collect();
    assert_eq!(names, ["Push-ups", "Squats", "Jumping Jacks", "Mountain Climbers", "Burpees"]);

    let (code, out, _) = run_cli(dir.path(), &["exercise", "toggle", &id]);
    assert_eq!(code, 0);
    assert!(out.contains("disabled"));

    let (_, out, _) = run_cli(dir.path(), &["plan", "--json"]);
    assert_eq!(json(&out)["summary"]["active_exercises"], 4);

    let (code, _, _) = run_cli(dir.path(), &["exercise", "remove", &id]);
    assert_eq!(code, 0);
    let (code, _, _) = run_cli(dir.path(), &["exercise", "remove", &id]);
    assert_eq!(code, 1);
}

#[test]
fn test_exercise_move_reorders_plan() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, _) = run_cli(dir.path(), &["exercise", "move", "4", "1"]);
    assert_eq!(code, 0);

    let (_, out, _) = run_cli(dir.path(), &["plan", "--json"]);
    let plan = json(&out);
    assert_eq!(plan["exercises"][0]["name"], "Mountain Climbers");
    assert_eq!(plan["exercises"][1]["name"], "Push-ups");

    let (code, _, _) = run_cli(dir.path(), &["exercise", "move", "9", "1"]);
    assert_eq!(code, 1);
}

#[test]
fn test_plan_summary() {
    let dir = tempfile::tempdir().unwrap();
    let (code, out, _) = run_cli(dir.path(), &["plan", "--json"]);
    assert_eq!(code, 0);
    let plan = json(&out);
    assert_eq!(plan["summary"]["total_sets"], 24);
    assert_eq!(plan["summary"]["estimated_minutes"], 24);

    let (code, out, _) = run_cli(dir.path(), &["plan"]);
    assert_eq!(code, 0);
    assert!(out.contains("Push-ups"));
}

#[test]
fn test_simulate_runs_to_completion() {
    let dir = tempfile::tempdir().unwrap();
    let (code, out, _) = run_cli(
        dir.path(),
        &["simulate", "--work", "5", "--rest", "4", "--sets", "1", "--circuits", "1", "--json"],
    );
    assert_eq!(code, 0);
    let report = json(&out);
    assert_eq!(report["completed"], true);
    assert_eq!(report["workIntervals"], 4);
    assert_eq!(report["restIntervals"], 4);
    assert_eq!(report["totalSeconds"], 4 * 9);
    let last = report["timeline"].as_array().unwrap().last().unwrap().clone();
    assert_eq!(last["type"], "workout_complete");
}

#[test]
fn test_simulate_without_active_exercises_fails() {
    let dir = tempfile::tempdir().unwrap();
    for id in ["1", "2", "3", "4"] {
        run_cli(dir.path(), &["exercise", "toggle", id]);
    }
    let (code, _, err) = run_cli(dir.path(), &["simulate"]);
    assert_eq!(code, 1);
    assert!(err.contains("no active exercises"));
}

#[test]
fn test_completions() {
    let dir = tempfile::tempdir().unwrap();
    let (code, out, _) = run_cli(dir.path(), &["completions", "bash"]);
    assert_eq!(code, 0);
    assert!(out.contains("circuit-timer"));
}
