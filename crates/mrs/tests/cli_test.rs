//! Integration tests for the `mrs` CLI binary.
//!
//! These tests validate argument parsing, help output, shell completions,
//! validation errors, and (via wiremock) one end-to-end read -- all without
//! requiring a live backend.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `mrs` binary with env isolation.
///
/// Clears all `MRS_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn mrs_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("mrs");
    cmd.env("HOME", "/tmp/mrs-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/mrs-cli-test-nonexistent")
        .env_remove("MRS_PROFILE")
        .env_remove("MRS_SERVER")
        .env_remove("MRS_OUTPUT")
        .env_remove("MRS_TIMEOUT");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = mrs_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    mrs_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("MercariSearcher")
            .and(predicate::str::contains("stats"))
            .and(predicate::str::contains("queries"))
            .and(predicate::str::contains("clear-items")),
    );
}

#[test]
fn test_version_flag() {
    mrs_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("mrs"));
}

#[test]
fn test_completions_bash() {
    mrs_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("_mrs"));
}

#[test]
fn test_config_path_prints_a_path() {
    mrs_cmd()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

// ── Validation ──────────────────────────────────────────────────────

#[test]
fn test_empty_test_url_fails_without_network() {
    // A whitespace URL must be rejected before any request is attempted.
    let output = mrs_cmd().args(["test-url", "   "]).output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected usage exit code");
    let text = combined_output(&output);
    assert!(
        text.contains("must not be empty"),
        "Expected validation message, got:\n{text}"
    );
}

#[test]
fn test_invalid_server_url_rejected() {
    let output = mrs_cmd()
        .args(["--server", "not a url", "stats"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(text.contains("invalid URL"), "got:\n{text}");
}

#[test]
fn test_unknown_profile_rejected() {
    let output = mrs_cmd()
        .args(["--profile", "nope", "stats"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(4), "Expected not-found exit code");
    let text = combined_output(&output);
    assert!(text.contains("nope"), "got:\n{text}");
}

// ── Confirmation handling ───────────────────────────────────────────

#[test]
fn test_delete_query_noninteractive_requires_yes() {
    // With stdin not a TTY and no --yes, the command must refuse rather
    // than hang on a prompt -- and must issue no request.
    let output = mrs_cmd()
        .args(["queries", "delete", "1"])
        .write_stdin("")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(
        text.contains("requires confirmation"),
        "Expected confirmation error, got:\n{text}"
    );
}

#[test]
fn test_clear_items_noninteractive_requires_yes() {
    let output = mrs_cmd().arg("clear-items").write_stdin("").output().unwrap();
    assert_eq!(output.status.code(), Some(2));
}

// ── End-to-end against a mock backend ───────────────────────────────

#[tokio::test]
async fn test_stats_json_against_mock_backend() {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "database": { "total_items": 5, "active_searches": 2 },
            "total_api_requests": 9,
            "uptime_formatted": "1 day, 2:03"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/recent-items"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true, "items": []
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/queries"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true, "queries": []
        })))
        .mount(&server)
        .await;

    let uri = server.uri();
    let output = tokio::task::spawn_blocking(move || {
        mrs_cmd()
            .args(["--server", &uri, "--output", "json", "stats"])
            .output()
            .unwrap()
    })
    .await
    .unwrap();

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8_lossy(&output.stdout);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["total_items"], 5);
    assert_eq!(parsed["active_searches"], 2);
    assert_eq!(parsed["total_api_requests"], 9);
    assert_eq!(parsed["uptime"], "1 day, 2:03");
}
