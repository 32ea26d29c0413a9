//! Integration tests for the `adminkit` CLI binary.
//!
//! Argument parsing, help output and error handling run without a backend;
//! the remaining tests drive the binary against a wiremock server.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `adminkit` binary with env isolation.
///
/// Clears all `ADMINKIT_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn adminkit_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("adminkit");
    cmd.env("HOME", "/tmp/adminkit-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/adminkit-cli-test-nonexistent")
        .env_remove("ADMINKIT_PROFILE")
        .env_remove("ADMINKIT_BASE_URL")
        .env_remove("ADMINKIT_CONFIG")
        .env_remove("ADMINKIT_OUTPUT")
        .env_remove("ADMINKIT_INSECURE")
        .env_remove("ADMINKIT_TIMEOUT")
        .env_remove("RUST_LOG");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

async fn people_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/back/api/people/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{ "id": 1, "name": "Al" }, { "id": 2, "name": "Bo" }])),
        )
        .mount(&server)
        .await;
    server
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = adminkit_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    adminkit_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("OpenAPI document")
            .and(predicate::str::contains("list"))
            .and(predicate::str::contains("upsert"))
            .and(predicate::str::contains("schema")),
    );
}

#[test]
fn test_version_flag() {
    adminkit_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("adminkit"));
}

#[test]
fn test_completions_bash() {
    adminkit_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

// ── Usage and configuration errors ──────────────────────────────────

#[test]
fn test_list_without_backend_fails() {
    adminkit_cmd()
        .args(["list", "/back/api/people/"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No backend configured"));
}

#[test]
fn test_invalid_base_url_is_usage_error() {
    adminkit_cmd()
        .args(["--base-url", "ftp://example.com", "list", "/back/api/people/"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unsupported scheme"));
}

#[test]
fn test_find_requires_where() {
    adminkit_cmd()
        .args(["--base-url", "http://localhost:1", "find", "/back/api/people/"])
        .assert()
        .code(2);
}

#[test]
fn test_unknown_profile_lists_available() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");

    adminkit_cmd()
        .args(["--config", config.to_str().unwrap()])
        .args(["config", "init", "--url", "http://localhost:8000", "--name", "local"])
        .assert()
        .success();

    adminkit_cmd()
        .args(["--config", config.to_str().unwrap()])
        .args(["--profile", "staging", "list", "/back/api/people/"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Profile 'staging' not found"));
}

#[test]
fn test_config_init_then_show() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");

    adminkit_cmd()
        .args(["--config", config.to_str().unwrap()])
        .args(["config", "init", "--url", "http://localhost:8000"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Profile 'default' written"));

    adminkit_cmd()
        .args(["--config", config.to_str().unwrap()])
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("http://localhost:8000/")
                .and(predicate::str::contains("/back/api/schema/?format=json"))
                .and(predicate::str::contains("first_name")),
        );
}

// ── Against a backend ───────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_list_plain_and_json() {
    let server = people_server().await;
    let uri = server.uri();

    adminkit_cmd()
        .args(["--base-url", uri.as_str(), "-o", "plain"])
        .args(["list", "/back/api/people/"])
        .assert()
        .success()
        .stdout("1\n2\n");

    adminkit_cmd()
        .args(["--base-url", uri.as_str(), "-o", "json-compact"])
        .args(["list", "/back/api/people/"])
        .assert()
        .success()
        .stdout("[{\"id\":1,\"name\":\"Al\"},{\"id\":2,\"name\":\"Bo\"}]\n");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_config_default_output_applies_unless_flag_given() {
    let server = people_server().await;
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    std::fs::write(
        &config,
        format!(
            "default_profile = \"local\"\n\n[defaults]\noutput = \"plain\"\n\n\
             [profiles.local]\nbase_url = \"{}\"\n",
            server.uri()
        ),
    )
    .unwrap();

    adminkit_cmd()
        .args(["--config", config.to_str().unwrap()])
        .args(["list", "/back/api/people/"])
        .assert()
        .success()
        .stdout("1\n2\n");

    adminkit_cmd()
        .args(["--config", config.to_str().unwrap(), "-o", "json-compact"])
        .args(["list", "/back/api/people/"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("[{\"id\":1"));
}

#[test]
fn test_unknown_config_output_is_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    std::fs::write(
        &config,
        "[defaults]\noutput = \"xml\"\n\n[profiles.default]\nbase_url = \"http://localhost:1\"\n",
    )
    .unwrap();

    adminkit_cmd()
        .args(["--config", config.to_str().unwrap()])
        .args(["list", "/back/api/people/"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("defaults.output"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_find_and_next() {
    let server = people_server().await;
    let uri = server.uri();

    adminkit_cmd()
        .args(["--base-url", uri.as_str(), "-o", "plain"])
        .args(["find", "/back/api/people/", "--where", "name=Bo", "--all"])
        .assert()
        .success()
        .stdout("2\n");

    adminkit_cmd()
        .args(["--base-url", uri.as_str(), "-o", "plain"])
        .args(["next", "/back/api/people/", "1"])
        .assert()
        .success()
        .stdout("2\n");

    adminkit_cmd()
        .args(["--base-url", uri.as_str()])
        .args(["next", "/back/api/people/", "2"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("No record matched"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_delete_requires_confirmation() {
    let server = people_server().await;
    let uri = server.uri();
    Mock::given(method("DELETE"))
        .and(path("/back/api/people/2"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    adminkit_cmd()
        .args(["--base-url", uri.as_str()])
        .args(["delete", "/back/api/people/", "2"])
        .assert()
        .code(2);

    adminkit_cmd()
        .args(["--base-url", uri.as_str(), "--yes"])
        .args(["delete", "/back/api/people/", "2"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Record deleted"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_backend_not_found_exit_code() {
    let server = MockServer::start().await;
    let uri = server.uri();
    Mock::given(method("GET"))
        .and(path("/back/api/missing/"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "detail": "Not found." })))
        .mount(&server)
        .await;

    adminkit_cmd()
        .args(["--base-url", uri.as_str()])
        .args(["list", "/back/api/missing/"])
        .assert()
        .code(4);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_upsert_creates() {
    let server = people_server().await;
    let uri = server.uri();
    Mock::given(method("POST"))
        .and(path("/back/api/people/"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": 3, "name": "Cy" })))
        .expect(1)
        .mount(&server)
        .await;

    adminkit_cmd()
        .args(["--base-url", uri.as_str(), "-o", "plain"])
        .args(["upsert", "/back/api/people/", "--data", r#"{"name":"Cy"}"#])
        .assert()
        .success()
        .stdout("3\n")
        .stderr(predicate::str::contains("Record created"));
}

#[test]
fn test_upsert_rejects_non_object() {
    adminkit_cmd()
        .args(["--base-url", "http://localhost:1"])
        .args(["upsert", "/back/api/people/", "--data", "[1, 2]"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("must be a JSON object"));
}
