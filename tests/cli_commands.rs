//! Integration tests for the headless CLI commands.
//!
//! Each test gets its own SOUK_HOME; SOUK_BASE_URL points the binary at a
//! mock server, and SOUK_BLOCK_REAL_API is a belt-and-braces guard against
//! ever touching the compiled-in endpoint.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn souk_cmd(home: &std::path::Path, base_url: &str) -> Command {
    let mut cmd = Command::cargo_bin("souk").unwrap();
    cmd.env("SOUK_HOME", home)
        .env("SOUK_BASE_URL", base_url)
        .env("SOUK_BLOCK_REAL_API", "1");
    cmd
}

/// Test: help lists the subcommands.
#[test]
fn test_help_lists_subcommands() {
    Command::cargo_bin("souk")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("login"))
        .stdout(predicate::str::contains("logout"))
        .stdout(predicate::str::contains("categories"));
}

/// Test: login writes the token file under SOUK_HOME.
#[tokio::test]
async fn test_login_stores_token() {
    let server = MockServer::start().await;
    let temp = tempdir().unwrap();
    let auth_path = temp.path().join("auth.json");

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(query_param("username", "amina"))
        .and(query_param("password", "Abcd123!"))
        .respond_with(ResponseTemplate::new(200).set_body_string("tok-cli"))
        .expect(1)
        .mount(&server)
        .await;

    souk_cmd(temp.path(), &server.uri())
        .args(["login", "--username", "amina", "--password", "Abcd123!"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged in"));

    assert!(auth_path.exists(), "auth.json should exist");
    let contents = fs::read_to_string(&auth_path).unwrap();
    assert!(contents.contains("tok-cli"), "token should be in auth.json");
}

/// Test: a rejected login leaves no token and prints the server message.
#[tokio::test]
async fn test_login_rejection_writes_nothing() {
    let server = MockServer::start().await;
    let temp = tempdir().unwrap();

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(serde_json::json!({ "message": "Bad credentials" })),
        )
        .mount(&server)
        .await;

    souk_cmd(temp.path(), &server.uri())
        .args(["login", "--username", "amina", "--password", "wrong"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Bad credentials"));

    assert!(!temp.path().join("auth.json").exists());
}

/// Test: logout when not logged in says so.
#[tokio::test]
async fn test_logout_when_not_logged_in() {
    let server = MockServer::start().await;
    let temp = tempdir().unwrap();

    souk_cmd(temp.path(), &server.uri())
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not logged in"));
}

/// Test: logout removes the token file.
#[tokio::test]
async fn test_logout_clears_token() {
    let server = MockServer::start().await;
    let temp = tempdir().unwrap();
    let auth_path = temp.path().join("auth.json");

    fs::write(
        &auth_path,
        r#"{"authToken": "tok-old", "saved_at": "2026-08-01T00:00:00Z"}"#,
    )
    .unwrap();

    souk_cmd(temp.path(), &server.uri())
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged out"));

    assert!(!auth_path.exists(), "token file should be removed");
}

/// Test: categories sends the stored token as a bearer credential and
/// prints the listing.
#[tokio::test]
async fn test_categories_uses_stored_token() {
    let server = MockServer::start().await;
    let temp = tempdir().unwrap();

    fs::write(
        temp.path().join("auth.json"),
        r#"{"authToken": "tok-cli", "saved_at": "2026-08-01T00:00:00Z"}"#,
    )
    .unwrap();

    Mock::given(method("GET"))
        .and(path("/categories"))
        .and(header("authorization", "Bearer tok-cli"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "id": 1, "name": "Spices" },
            { "id": 2, "name": "Rugs", "imageUrl": "http://cdn.example/r.png" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    souk_cmd(temp.path(), &server.uri())
        .arg("categories")
        .assert()
        .success()
        .stdout(predicate::str::contains("Spices"))
        .stdout(predicate::str::contains("Rugs"));
}

/// Test: an expired token surfaces the server message and a failure code.
#[tokio::test]
async fn test_categories_rejection_fails() {
    let server = MockServer::start().await;
    let temp = tempdir().unwrap();

    fs::write(
        temp.path().join("auth.json"),
        r#"{"authToken": "stale", "saved_at": "2026-08-01T00:00:00Z"}"#,
    )
    .unwrap();

    Mock::given(method("GET"))
        .and(path("/categories"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(serde_json::json!({ "message": "Expired" })),
        )
        .mount(&server)
        .await;

    souk_cmd(temp.path(), &server.uri())
        .arg("categories")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Expired"));
}

/// Test: config shows the resolved base URL (env wins over the default).
#[tokio::test]
async fn test_config_shows_resolved_base_url() {
    let server = MockServer::start().await;
    let temp = tempdir().unwrap();

    souk_cmd(temp.path(), &server.uri())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains(server.uri()))
        .stdout(predicate::str::contains("language: fr"));
}

/// Test: config --init writes the default template once.
#[tokio::test]
async fn test_config_init_writes_template() {
    let server = MockServer::start().await;
    let temp = tempdir().unwrap();

    souk_cmd(temp.path(), &server.uri())
        .args(["config", "--init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote"));

    assert!(temp.path().join("config.toml").exists());

    souk_cmd(temp.path(), &server.uri())
        .args(["config", "--init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}
