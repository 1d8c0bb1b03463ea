//! End-to-end checks of the `create-py-app` binary that need neither uv nor git.

use assert_cmd::Command;
use predicates::prelude::*;

fn create_py_app() -> Command {
    Command::cargo_bin("create-py-app").unwrap()
}

#[test]
fn test_help_lists_create() {
    create_py_app()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("create"));
}

#[test]
fn test_create_help_lists_flags() {
    create_py_app()
        .args(["create", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--no-git"))
        .stdout(predicate::str::contains("--framework"));
}

#[test]
fn test_existing_directory_exits_with_one() {
    let tmp = tempfile::tempdir().unwrap();
    let taken = tmp.path().join("taken");
    std::fs::create_dir(&taken).unwrap();
    std::fs::write(taken.join("keep.txt"), "original").unwrap();

    create_py_app()
        .current_dir(tmp.path())
        .args(["create", "taken", "--python", "3.12", "--skip-uv-check", "--yes"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("already exists"));

    let entries: Vec<_> = std::fs::read_dir(&taken).unwrap().collect();
    assert_eq!(entries.len(), 1);
    assert_eq!(
        std::fs::read_to_string(taken.join("keep.txt")).unwrap(),
        "original"
    );
}

#[test]
fn test_invalid_python_version_creates_nothing() {
    let tmp = tempfile::tempdir().unwrap();

    create_py_app()
        .current_dir(tmp.path())
        .args(["create", "demo", "--python", "latest", "--skip-uv-check", "--yes"])
        .assert()
        .code(1);

    assert!(!tmp.path().join("demo").exists());
}

#[test]
fn test_unknown_framework_is_a_usage_error() {
    create_py_app()
        .args(["create", "demo", "--framework", "django"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("django"));
}
