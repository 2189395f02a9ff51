use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;

fn permablog(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("permablog").unwrap();
    cmd.env("PERMABLOG_HOME", home).env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_post_comment_show() {
    let temp_dir = tempfile::tempdir().unwrap();

    permablog(temp_dir.path())
        .args(["post", "Acme", "alice", "Hello World!", "body text", "--tags", "x,y"])
        .assert()
        .success()
        .stdout(predicate::str::contains("acme.Hello_World_"));

    permablog(temp_dir.path())
        .args([
            "comment",
            "acme.Hello_World_",
            "bob",
            "nice post",
            "--timestamp",
            "2024-01-01T00:00:00Z",
        ])
        .assert()
        .success();

    permablog(temp_dir.path())
        .args([
            "comment",
            "2024-01-01T00:00:00Z",
            "carol",
            "agreed",
            "--timestamp",
            "2024-01-01T00:00:05Z",
        ])
        .assert()
        .success();

    permablog(temp_dir.path())
        .args(["show", "acme"])
        .assert()
        .success()
        .stdout(predicate::str::contains("in Acme"))
        .stdout(predicate::str::contains("title:      Hello World!"))
        .stdout(predicate::str::contains("tags:       x, y"))
        .stdout(predicate::str::contains("        > bob @ 2024-01-01T00:00:00Z"))
        .stdout(predicate::str::contains("            > carol @ 2024-01-01T00:00:05Z"));
}

#[test]
fn test_duplicate_post_fails() {
    let temp_dir = tempfile::tempdir().unwrap();

    permablog(temp_dir.path())
        .args(["post", "acme", "alice", "Same", "one"])
        .assert()
        .success();

    permablog(temp_dir.path())
        .args(["post", "acme", "bob", "Same", "two"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Permalink already exists: acme.Same"));
}

#[test]
fn test_orphaned_comment_warns() {
    let temp_dir = tempfile::tempdir().unwrap();

    permablog(temp_dir.path())
        .args([
            "comment",
            "acme.Missing",
            "bob",
            "hello?",
            "--timestamp",
            "2024-01-01T00:00:00Z",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("is not linked"))
        .stderr(predicate::str::contains("orphaned"));
}

#[test]
fn test_delete_tombstones_post() {
    let temp_dir = tempfile::tempdir().unwrap();

    permablog(temp_dir.path())
        .args(["post", "acme", "alice", "Gone Soon", "original body"])
        .assert()
        .success();

    permablog(temp_dir.path())
        .args(["delete", "acme.Gone_Soon", "alice"])
        .assert()
        .success();

    permablog(temp_dir.path())
        .args(["view", "acme.Gone_Soon"])
        .assert()
        .success()
        .stdout(predicate::str::contains("deleted by alice"))
        .stdout(predicate::str::contains("original body").not());

    permablog(temp_dir.path())
        .args(["delete", "acme.Never_Was", "alice"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No record found"));
}

#[test]
fn test_show_json() {
    let temp_dir = tempfile::tempdir().unwrap();

    permablog(temp_dir.path())
        .args(["post", "acme", "alice", "Json", "body"])
        .assert()
        .success();

    let output = permablog(temp_dir.path())
        .args(["show", "acme", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let posts: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(posts[0]["post"]["permalink"], "acme.Json");
    assert_eq!(posts[0]["comments"], serde_json::json!([]));
}

#[test]
fn test_shell_session() {
    let temp_dir = tempfile::tempdir().unwrap();

    let script = "\
post acme alice \"Shell Post\" \"typed in the shell\"\n\
\n\
delete acme.Nope alice\n\
comment acme.Shell_Post bob 'first!' --timestamp 2024-01-01T00:00:00Z\n\
show acme\n\
exit\n\
show never-reached\n";

    permablog(temp_dir.path())
        .arg("shell")
        .write_stdin(script)
        .assert()
        .success()
        .stdout(predicate::str::contains("Enter request: "))
        .stdout(predicate::str::contains("> bob @ 2024-01-01T00:00:00Z"))
        .stdout(predicate::str::contains("never-reached").not())
        .stderr(predicate::str::contains("No record found for permalink: acme.Nope"));
}

#[test]
fn test_config_roundtrip() {
    let temp_dir = tempfile::tempdir().unwrap();

    permablog(temp_dir.path())
        .args(["config", "indent", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("indent set to 2"));

    permablog(temp_dir.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("indent = 2"))
        .stdout(predicate::str::contains("max-depth = 64"));

    permablog(temp_dir.path())
        .args(["post", "acme", "alice", "Narrow", "body"])
        .assert()
        .success();

    permablog(temp_dir.path())
        .args(["show", "acme"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\n  title:      Narrow\n"));
}
