//! End-to-end tests for the fraction calculator binary.

use assert_cmd::Command;
use predicates::prelude::*;

/// Runs `frac-calc` feeding it `input`, expecting a clean exit.
fn run_calc(input: &str) -> String {
    let mut cmd = Command::cargo_bin("frac-calc").unwrap();
    let assert = cmd.write_stdin(input).assert().success();
    String::from_utf8(assert.get_output().stdout.clone()).unwrap()
}

#[test]
fn test_expression_addition() {
    let output = run_calc("1\n1/2+1/3\n#\n");
    assert!(output.contains("5/6"));
}

#[test]
fn test_expression_all_operators() {
    let output = run_calc("1\n1/2-1/3\n2/3*3/4\n1/2/1/3\n#\n");
    assert!(output.contains("1/6"));
    assert!(output.contains("1/2"));
    assert!(output.contains("3/2"));
}

#[test]
fn test_expression_malformed_reprompts() {
    let output = run_calc("1\nnonsense\n1/2+1/3\n#\n");
    assert!(output.contains("输入错误!"));
    assert!(output.contains("5/6"));
}

#[test]
fn test_expression_division_by_zero_is_an_input_error() {
    let output = run_calc("1\n1/2/0/3\n#\n");
    assert!(output.contains("输入错误!"));
}

#[test]
fn test_sort_ascending_reduces_entries() {
    let output = run_calc("2\n2/4,1/3,5/6<\n#\n");
    assert!(output.contains("1/3 1/2 5/6"));
}

#[test]
fn test_sort_descending() {
    let output = run_calc("2\n1/2,1/4,3/5>\n#\n");
    assert!(output.contains("3/5 1/2 1/4"));
}

#[test]
fn test_sort_bad_terminator_reprompts() {
    let output = run_calc("2\n1/2,1/4,3/5\n1/2,1/4<\n#\n");
    assert!(output.contains("输入错误!"));
    assert!(output.contains("1/4 1/2"));
}

#[test]
fn test_hash_returns_to_top_menu() {
    let output = run_calc("1\n#\n2\n#\n");
    // The top menu is printed three times: start, after each #.
    assert_eq!(output.matches("请选择功能：(键入1或者2)").count(), 3);
}

#[test]
fn test_unknown_menu_choice_reprompts() {
    let mut cmd = Command::cargo_bin("frac-calc").unwrap();
    cmd.write_stdin("9\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("输入错误，请重新选择！"));
}
