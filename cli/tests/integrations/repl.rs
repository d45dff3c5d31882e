use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_cli_repl_reads_piped_lines() {
    let mut cmd = Command::cargo_bin("prelog").unwrap();
    cmd.write_stdin("def x 1\nx\n");

    cmd.assert().success().stdout("def x 1\n1\n");
}

#[test]
fn test_cli_repl_joins_open_groups() {
    let mut cmd = Command::cargo_bin("prelog").unwrap();
    cmd.arg("repl").write_stdin("{ def a 1\n  def b 2 }\n");

    cmd.assert().success().stdout("{(def a 1) (def b 2)}\n");
}

#[test]
fn test_cli_repl_help() {
    let mut cmd = Command::cargo_bin("prelog").unwrap();
    cmd.write_stdin("@h\n");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("command [\"@x\" \"@exit\"]"));
}

#[test]
fn test_cli_repl_exit_ends_session() {
    let mut cmd = Command::cargo_bin("prelog").unwrap();
    cmd.write_stdin("def x 1\n@x\nx\n");

    cmd.assert().success().stdout("def x 1\ndef x 1\n");
}

#[test]
fn test_cli_repl_survives_parse_errors() {
    let mut cmd = Command::cargo_bin("prelog").unwrap();
    cmd.write_stdin("]\nrank true\n");

    cmd.assert()
        .success()
        .stdout("1\n")
        .stderr(predicate::str::contains("Parse error"));
}

#[test]
fn test_cli_repl_json_exit() {
    let mut cmd = Command::cargo_bin("prelog").unwrap();
    cmd.arg("--json").write_stdin("@exit\n");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"exit\""));
}
