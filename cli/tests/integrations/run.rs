use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_cli_run_single_file() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("facts.prelog");

    fs::write(
        &file,
        r#"
# a definition and its use
def x 1
x
def greet (proc
  "hello")
greet
"#,
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("prelog").unwrap();
    cmd.arg("run").arg(&file);

    cmd.assert()
        .success()
        .stdout("def x 1\n1\ndef greet (proc \"hello\")\n\"hello\"\n");
}

#[test]
fn test_cli_run_directory_shares_one_session() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("a.prelog"), "def x 1\n").unwrap();
    fs::write(temp_dir.path().join("b.prelog"), "x\n").unwrap();
    fs::write(temp_dir.path().join("notes.txt"), "def x 2\n").unwrap();

    let mut cmd = Command::cargo_bin("prelog").unwrap();
    cmd.arg("run").arg(temp_dir.path());

    cmd.assert().success().stdout("def x 1\n1\n");
}

#[test]
fn test_cli_run_stops_at_exit() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("stop.prelog");
    fs::write(&file, "def x 1\n@exit\ndef y 2\n").unwrap();

    let mut cmd = Command::cargo_bin("prelog").unwrap();
    cmd.arg("run").arg(&file);

    cmd.assert()
        .success()
        .stdout("def x 1\ndef x 1\n")
        .stdout(predicate::str::contains("def y").not());
}

#[test]
fn test_cli_run_reports_parse_errors_and_continues() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("broken.prelog");
    fs::write(&file, "def x 1\n\"open ) \"\n)\nx\n").unwrap();

    let mut cmd = Command::cargo_bin("prelog").unwrap();
    cmd.arg("run").arg(&file);

    cmd.assert()
        .failure()
        .stdout(predicate::str::contains("1"))
        .stderr(predicate::str::contains("Parse error"));
}

#[test]
fn test_cli_run_empty_directory() {
    let temp_dir = TempDir::new().unwrap();

    let mut cmd = Command::cargo_bin("prelog").unwrap();
    cmd.arg("run").arg(temp_dir.path());

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("no .prelog files found"));
}
