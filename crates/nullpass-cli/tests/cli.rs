#![allow(clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const SECRET: &str = "correct horse";

/// A `nullpass` command isolated to `dir`, with the master secret unset.
#[allow(deprecated)]
fn nullpass(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("nullpass").unwrap();
    cmd.env_remove("NULLPASS_MASTER")
        .env_remove("RUST_LOG")
        .arg("--data-dir")
        .arg(dir.path());
    cmd
}

#[test]
fn help_works() {
    let dir = TempDir::new().unwrap();
    nullpass(&dir).arg("--help").assert().success();
    nullpass(&dir)
        .args(["generate", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--no-symbols"));
}

#[test]
fn generate_reads_secret_from_env() {
    let dir = TempDir::new().unwrap();
    nullpass(&dir)
        .env("NULLPASS_MASTER", SECRET)
        .args(["generate", "example.com", "--login", "alice"])
        .assert()
        .success()
        .stdout(predicate::str::diff("<+\"qhcNXO}\"H\"7zJ\n"));
}

#[test]
fn generate_reads_secret_from_stdin() {
    let dir = TempDir::new().unwrap();
    nullpass(&dir)
        .args(["generate", "example.com", "--login", "alice", "-C", "2"])
        .write_stdin(format!("{SECRET}\n"))
        .assert()
        .success()
        .stdout(predicate::str::diff(":!\"Gp9+SD}wc5E{v\n"));
}

#[test]
fn generate_with_class_flags() {
    let dir = TempDir::new().unwrap();
    nullpass(&dir)
        .env("NULLPASS_MASTER", SECRET)
        .args([
            "generate",
            "example.com",
            "--login",
            "alice",
            "-L",
            "8",
            "--no-lowercase",
            "--no-uppercase",
            "--no-symbols",
        ])
        .assert()
        .success()
        .stdout(predicate::str::diff("51203288\n"));
}

#[test]
fn generate_rejects_bad_length() {
    let dir = TempDir::new().unwrap();
    nullpass(&dir)
        .env("NULLPASS_MASTER", SECRET)
        .args(["generate", "example.com", "-L", "40"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("password length"));
}

#[test]
fn generate_rejects_empty_secret() {
    let dir = TempDir::new().unwrap();
    nullpass(&dir)
        .args(["generate", "example.com"])
        .write_stdin("\n")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("master secret"));
}

#[test]
fn saved_profile_supplies_login_and_policy() {
    let dir = TempDir::new().unwrap();
    nullpass(&dir)
        .args(["profile", "save", "example.com", "--login", "bob"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"login\": \"bob\""));

    nullpass(&dir)
        .env("NULLPASS_MASTER", SECRET)
        .args(["generate", "example.com"])
        .assert()
        .success()
        .stdout(predicate::str::diff("B{yvs\\\\2GEHAW;yL\n"));
}

#[test]
fn profile_save_edits_existing_policy() {
    let dir = TempDir::new().unwrap();
    nullpass(&dir)
        .args(["profile", "save", "example.com", "--login", "alice", "-L", "20"])
        .assert()
        .success();
    nullpass(&dir)
        .args(["profile", "save", "example.com", "--no-symbols"])
        .assert()
        .success();

    nullpass(&dir)
        .args(["profile", "show", "example.com"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("\"login\": \"alice\"")
                .and(predicate::str::contains("\"length\": 20"))
                .and(predicate::str::contains("\"symbols\": false")),
        );
}

#[test]
fn profile_list_and_delete() {
    let dir = TempDir::new().unwrap();
    for site in ["b.example", "a.example"] {
        nullpass(&dir)
            .args(["profile", "save", site, "--login", "alice"])
            .assert()
            .success();
    }

    nullpass(&dir)
        .args(["profile", "list"])
        .assert()
        .success()
        .stdout(predicate::str::diff("a.example\talice\nb.example\talice\n"));

    nullpass(&dir)
        .args(["profile", "delete", "a.example"])
        .assert()
        .success();
    nullpass(&dir)
        .args(["profile", "delete", "a.example"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("profile not found"));
    nullpass(&dir)
        .args(["profile", "show", "a.example"])
        .assert()
        .code(1);
}

#[test]
fn settings_set_changes_default_policy() {
    let dir = TempDir::new().unwrap();
    nullpass(&dir)
        .args(["settings", "set", "--auto-detect", "false", "--exclude", "aeiou"])
        .assert()
        .success();

    nullpass(&dir)
        .args(["settings", "show"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("\"autoDetect\": false")
                .and(predicate::str::contains("\"exclude\": \"aeiou\"")),
        );

    nullpass(&dir)
        .env("NULLPASS_MASTER", SECRET)
        .args(["generate", "example.com", "--login", "alice"])
        .assert()
        .success()
        .stdout(predicate::str::diff("?Z<.r.MQk;%P?7t4\n"));
}

#[test]
fn repeated_and_contradicting_flags_last_one_wins() {
    let dir = TempDir::new().unwrap();
    nullpass(&dir)
        .env("NULLPASS_MASTER", SECRET)
        .args([
            "generate",
            "example.com",
            "--login",
            "alice",
            "-C",
            "5",
            "-C",
            "2",
            "-s",
            "--no-symbols",
            "-s",
        ])
        .assert()
        .success()
        .stdout(predicate::str::diff(":!\"Gp9+SD}wc5E{v\n"));
}
