//! Integration tests for the `smerge` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to exercise the merge and
//! conflicts subcommands through the actual binary, including stdin/stdout
//! piping, file I/O and error handling.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

/// Helper: path to the overlapping.json fixture.
fn overlapping_json_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/overlapping.json")
}

/// Helper: path to the inverted.json fixture.
fn inverted_json_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/inverted.json")
}

/// Helper: run `smerge` with `args` and parse stdout as JSON.
fn run_json(args: &[&str]) -> Value {
    let output = Command::cargo_bin("smerge")
        .unwrap()
        .args(args)
        .output()
        .expect("smerge should run");
    assert!(output.status.success(), "smerge {:?} failed", args);
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

/// Helper: `(id, start, end)` triples from a timeline array.
fn spans(timeline: &Value) -> Vec<(String, String, String)> {
    timeline
        .as_array()
        .expect("timeline should be an array")
        .iter()
        .map(|e| {
            (
                e["id"].as_str().unwrap().to_string(),
                e["start"].as_str().unwrap().to_string(),
                e["end"].as_str().unwrap().to_string(),
            )
        })
        .collect()
}

fn span(id: &str, start: &str, end: &str) -> (String, String, String) {
    (
        id.to_string(),
        format!("2026-03-01T{}:00Z", start),
        format!("2026-03-01T{}:00Z", end),
    )
}

// ─────────────────────────────────────────────────────────────────────────────
// Merge subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn merge_discards_losers_by_default() {
    let timeline = run_json(&["merge", "-i", overlapping_json_path()]);

    assert_eq!(
        spans(&timeline),
        vec![
            span("review", "10:00", "11:00"),
            span("lunch", "12:00", "13:00"),
        ]
    );
}

#[test]
fn merge_trim_keeps_free_remainders() {
    let timeline = run_json(&["merge", "--trim", "-i", overlapping_json_path()]);

    assert_eq!(
        spans(&timeline),
        vec![
            span("standup", "09:00", "10:00"),
            span("review", "10:00", "11:00"),
            span("standup", "11:00", "12:00"),
            span("lunch", "12:00", "13:00"),
        ]
    );
    // Fragments keep their payload.
    assert_eq!(timeline[0]["desirability"], 1);
    assert_eq!(timeline[2]["desirability"], 1);
}

#[test]
fn merge_stdin_to_stdout() {
    let input = std::fs::read_to_string(overlapping_json_path()).unwrap();

    Command::cargo_bin("smerge")
        .unwrap()
        .args(["merge", "--trim", "--compact"])
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("[{"))
        .stdout(predicate::str::contains("\"id\":\"review\""));
}

#[test]
fn merge_file_to_file() {
    let output_path = std::env::temp_dir().join("smerge-test-merge-output.json");
    let output_str = output_path.to_str().unwrap();
    let _ = std::fs::remove_file(&output_path);

    Command::cargo_bin("smerge")
        .unwrap()
        .args(["merge", "-i", overlapping_json_path(), "-o", output_str])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let content = std::fs::read_to_string(&output_path).expect("output file must exist");
    let timeline: Value = serde_json::from_str(&content).unwrap();
    assert_eq!(timeline.as_array().unwrap().len(), 2);

    let _ = std::fs::remove_file(&output_path);
}

#[test]
fn merge_empty_schedule() {
    Command::cargo_bin("smerge")
        .unwrap()
        .args(["merge", "--compact"])
        .write_stdin("[]")
        .assert()
        .success()
        .stdout("[]\n");
}

#[test]
fn merge_missing_desirability_defaults_to_zero() {
    let input = r#"[
        {"id": "a", "start": "2026-03-01T09:00:00Z", "end": "2026-03-01T10:00:00Z"},
        {"id": "b", "start": "2026-03-01T09:30:00Z", "end": "2026-03-01T10:30:00Z"}
    ]"#;

    // Equal desirability: later input wins.
    Command::cargo_bin("smerge")
        .unwrap()
        .args(["merge", "--compact"])
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"id\":\"b\""))
        .stdout(predicate::str::contains("\"id\":\"a\"").not());
}

#[test]
fn merge_inverted_interval_fails() {
    Command::cargo_bin("smerge")
        .unwrap()
        .args(["merge", "-i", inverted_json_path()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to merge schedule"))
        .stderr(predicate::str::contains("Invalid interval"));
}

#[test]
fn merge_invalid_json_fails() {
    Command::cargo_bin("smerge")
        .unwrap()
        .arg("merge")
        .write_stdin("this is not valid json {{{")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse schedule JSON"));
}

#[test]
fn merge_missing_file_fails() {
    Command::cargo_bin("smerge")
        .unwrap()
        .args(["merge", "-i", "/nonexistent/schedule.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

#[test]
fn verbose_logs_go_to_stderr() {
    let output = Command::cargo_bin("smerge")
        .unwrap()
        .args(["-v", "merge", "--compact", "-i", overlapping_json_path()])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout: Value = serde_json::from_slice(&output.stdout).expect("stdout stays JSON");
    assert!(stdout.is_array());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("merging schedule"), "stderr: {}", stderr);
}

// ─────────────────────────────────────────────────────────────────────────────
// Conflicts subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn conflicts_lists_overlapping_pairs() {
    let conflicts = run_json(&["conflicts", "-i", overlapping_json_path()]);

    let conflicts = conflicts.as_array().unwrap();
    assert_eq!(conflicts.len(), 1, "lunch is adjacent, not conflicting");
    assert_eq!(conflicts[0]["earlier"]["id"], "standup");
    assert_eq!(conflicts[0]["later"]["id"], "review");
    assert_eq!(conflicts[0]["overlap_start"], "2026-03-01T10:00:00Z");
    assert_eq!(conflicts[0]["overlap_end"], "2026-03-01T11:00:00Z");
}

#[test]
fn conflicts_on_merged_output_is_empty() {
    let timeline = run_json(&["merge", "--trim", "-i", overlapping_json_path()]);

    Command::cargo_bin("smerge")
        .unwrap()
        .args(["conflicts", "--compact"])
        .write_stdin(timeline.to_string())
        .assert()
        .success()
        .stdout("[]\n");
}

// ─────────────────────────────────────────────────────────────────────────────
// Help
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn help_lists_subcommands() {
    Command::cargo_bin("smerge")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("merge"))
        .stdout(predicate::str::contains("conflicts"));
}

#[test]
fn missing_subcommand_fails() {
    Command::cargo_bin("smerge").unwrap().assert().failure();
}
