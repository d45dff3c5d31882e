use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_cli_eval_prints_result() {
    let mut cmd = Command::cargo_bin("prelog").unwrap();
    cmd.arg("eval").arg("rank success");

    cmd.assert().success().stdout("2\n");
}

#[test]
fn test_cli_eval_skips_unit_results() {
    let mut cmd = Command::cargo_bin("prelog").unwrap();
    cmd.arg("eval").arg("success");

    cmd.assert().success().stdout("");
}

#[test]
fn test_cli_eval_reports_error_values_on_stdout() {
    let mut cmd = Command::cargo_bin("prelog").unwrap();
    cmd.arg("eval").arg("(1 2)");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("error \"')' expected\" (1 2)"));
}

#[test]
fn test_cli_eval_json_output() {
    let mut cmd = Command::cargo_bin("prelog").unwrap();
    cmd.arg("--json").arg("eval").arg("def x 1");

    let output = cmd.assert().success().get_output().stdout.clone();
    let line = String::from_utf8(output).unwrap();
    let json: serde_json::Value = serde_json::from_str(line.trim()).unwrap();

    assert_eq!(json["kind"], "list");
    assert_eq!(json["value"][0]["kind"], "symbol");
    assert_eq!(json["value"][0]["value"], "def");
}

#[test]
fn test_cli_eval_parse_error_fails() {
    let mut cmd = Command::cargo_bin("prelog").unwrap();
    cmd.arg("eval").arg("{ def x");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Parse error"));
}

#[test]
fn test_cli_eval_input_limit() {
    let mut cmd = Command::cargo_bin("prelog").unwrap();
    cmd.arg("--max-input-bytes")
        .arg("4")
        .arg("eval")
        .arg("def x 1");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("max_input_bytes"));
}

#[test]
fn test_cli_eval_exit_prints_program() {
    let mut cmd = Command::cargo_bin("prelog").unwrap();
    cmd.arg("eval").arg("@exit");

    cmd.assert().success();
}
