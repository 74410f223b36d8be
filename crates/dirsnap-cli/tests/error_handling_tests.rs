//! Tests for error handling, exit codes, and suggestions.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::{TempDir, tempdir};

fn dirsnap(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("dirsnap").unwrap();
    cmd.env("DIRSNAP_HOME", home.path());
    cmd
}

#[test]
fn unknown_command_is_a_usage_error() {
    Command::cargo_bin("dirsnap")
        .unwrap()
        .arg("bogus")
        .assert()
        .code(2);
}

#[test]
fn snap_without_name_is_a_usage_error() {
    Command::cargo_bin("dirsnap")
        .unwrap()
        .arg("snap")
        .assert()
        .code(2);
}

#[test]
fn delete_unknown_template_exits_not_found() {
    let home = tempdir().unwrap();
    dirsnap(&home)
        .args(["delete", "--name", "ghost"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("not found"))
        .stderr(predicate::str::contains("ghost"));

    // The catalog is unchanged and no archive appeared.
    dirsnap(&home)
        .args(["list", "--format", "list"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
    assert!(
        fs::read_dir(home.path().join("templates"))
            .unwrap()
            .next()
            .is_none()
    );
}

#[test]
fn create_unknown_template_exits_not_found() {
    let home = tempdir().unwrap();
    let work = tempdir().unwrap();
    dirsnap(&home)
        .current_dir(work.path())
        .args(["create", "--name", "ghost"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("dirsnap list"));
}

#[test]
fn update_unknown_template_exits_not_found() {
    let home = tempdir().unwrap();
    let work = tempdir().unwrap();
    dirsnap(&home)
        .current_dir(work.path())
        .args(["update", "--name", "ghost"])
        .assert()
        .code(3);
}

#[test]
fn list_unknown_template_exits_not_found() {
    let home = tempdir().unwrap();
    dirsnap(&home)
        .args(["list", "--name", "ghost"])
        .assert()
        .code(3);
}

#[test]
fn duplicate_snap_exits_user_error_with_suggestion() {
    let home = tempdir().unwrap();
    let work = tempdir().unwrap();
    let src = work.path().join("proj");
    fs::create_dir_all(&src).unwrap();
    fs::write(src.join("f.txt"), "x").unwrap();

    dirsnap(&home)
        .args(["snap", "--name", "proj", "--path"])
        .arg(&src)
        .assert()
        .success();

    dirsnap(&home)
        .args(["snap", "--name", "proj", "--path"])
        .arg(&src)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("already exists"))
        .stderr(predicate::str::contains("update"));
}

#[test]
fn invalid_template_name_exits_user_error() {
    let home = tempdir().unwrap();
    dirsnap(&home)
        .args(["snap", "--name", "../escape"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid template name"));
}

#[test]
fn snap_missing_source_directory_fails() {
    let home = tempdir().unwrap();
    dirsnap(&home)
        .args(["snap", "--name", "proj", "--path", "/definitely/not/here"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to"));

    // The failed snapshot left no row behind.
    dirsnap(&home)
        .args(["list", "--format", "list"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn explicit_missing_config_file_exits_configuration_error() {
    let home = tempdir().unwrap();
    dirsnap(&home)
        .args(["--config", "/definitely/not/here.toml", "list"])
        .assert()
        .code(4);
}
