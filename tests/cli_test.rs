//! CLI behaviour. Tests marked `#[ignore]` need PostgreSQL via `DATABASE_URL`.

use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;

fn client_book() -> Command {
    Command::cargo_bin("client-book").unwrap()
}

#[test]
fn help_lists_subcommands() {
    client_book()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("add-client"))
        .stdout(contains("update-client"))
        .stdout(contains("find"));
}

#[test]
fn find_help_mentions_match_all() {
    client_book()
        .args(["find", "--help"])
        .assert()
        .success()
        .stdout(contains("--all"))
        .stdout(contains("--phone"));
}

#[test]
fn non_numeric_id_is_rejected() {
    client_book()
        .args(["delete-client", "two"])
        .assert()
        .failure()
        .stderr(contains("invalid value"));
}

#[test]
fn add_client_requires_all_fields() {
    client_book()
        .args(["add-client", "Lionel", "Messi"])
        .assert()
        .failure();
}

#[test]
fn zero_pool_size_fails_cleanly() {
    client_book()
        .args(["find", "--first-name", "Lionel"])
        .env("DATABASE_URL", "postgres://localhost/client_book")
        .env("MAX_CONNECTIONS", "0")
        .assert()
        .code(1)
        .stderr(contains("MAX_CONNECTIONS must be at least 1"));
}

#[test]
fn zero_acquire_timeout_fails_cleanly() {
    client_book()
        .args(["find"])
        .env("DATABASE_URL", "postgres://localhost/client_book")
        .env("ACQUIRE_TIMEOUT_SECS", "0")
        .assert()
        .code(1)
        .stderr(contains("ACQUIRE_TIMEOUT_SECS must be at least 1"));
}

#[test]
#[ignore = "needs PostgreSQL via DATABASE_URL"]
fn find_does_not_touch_the_schema() {
    client_book().arg("init").assert().success();

    client_book()
        .args(["find", "--first-name", "nobody-by-this-name"])
        .env("RUST_LOG", "info")
        .assert()
        .success()
        .stdout(contains("Client not found."))
        .stderr(contains("already exists").not());
}

#[test]
#[ignore = "needs PostgreSQL via DATABASE_URL"]
fn demo_confirms_each_delete_once() {
    let output = client_book()
        .arg("demo")
        .env("RUST_LOG", "info")
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stdout.contains("Found client:"));
    assert!(stdout.contains("First name=Vinicius, Last name=Junior"));
    assert!(!stdout.contains("deleted"));
    assert_eq!(stderr.matches("client with ID").count(), 2);
}
