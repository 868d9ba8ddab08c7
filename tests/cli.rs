use std::{
    io::Write,
    process::{Command, Output},
};

use tempfile::NamedTempFile;

fn temp_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_rotor16"))
        .args(args)
        .arg("--color=never")
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

#[test]
fn sorted_board_reports_one_check_and_no_moves() {
    let file = temp_file("1 2 3 4\n5 6 7 8\n9 10 11 12\n13 14 15 16\n");
    let output = run(&[file.path().to_str().unwrap()]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.starts_with("Start state:\n  1   2   3   4\n"));
    assert!(text.contains("Solving...\n1 boards checked.\nSolution found in 0 moves:\n\n"));
}

#[test]
fn one_rotation_from_sorted() {
    let file = temp_file("4 1 2 3\n5 6 7 8\n9 10 11 12\n13 14 15 16\n");
    let output = run(&[file.path().to_str().unwrap(), "--verify"]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("2 boards checked.\nSolution found in 1 moves:\nL1\n"));
    assert!(text.ends_with("Verified.\n"));
}

#[test]
fn rejects_duplicate_tiles() {
    let file = temp_file("1 1 3 4 5 6 7 8 9 10 11 12 13 14 15 16");
    let output = run(&[file.path().to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let err = String::from_utf8(output.stderr).unwrap();
    assert!(err.contains("1 appears more than once"), "{err}");
}

#[test]
fn rejects_short_input() {
    let file = temp_file("1 2 3 4 5 6 7 8 9 10 11 12 13 14 15");
    let output = run(&[file.path().to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    let err = String::from_utf8(output.stderr).unwrap();
    assert!(err.contains("expected 16 numbers, found 15"), "{err}");
}

#[test]
fn missing_file_is_an_error() {
    let output = run(&["/nonexistent/board.txt"]);
    assert_eq!(output.status.code(), Some(1));
    let err = String::from_utf8(output.stderr).unwrap();
    assert!(err.contains("failed to read"), "{err}");
}

#[test]
fn expansion_limit_exits_with_two() {
    let file = temp_file("16 2 3 13 5 11 10 8 9 7 6 12 4 14 15 1");
    let output = run(&[file.path().to_str().unwrap(), "--max-expansions", "3"]);
    assert_eq!(output.status.code(), Some(2));
    let text = stdout(&output);
    assert!(text.contains("3 boards checked.\nSearch stopped: expansion limit of 3 reached.\n"));
}

#[test]
fn seeded_scramble_is_reproducible() {
    let first = run(&["--scramble", "3", "--seed", "99", "--verify"]);
    let second = run(&["--scramble", "3", "--seed", "99", "--verify"]);
    assert!(first.status.success());
    assert_eq!(stdout(&first), stdout(&second));
}

#[test]
fn scramble_of_zero_moves_is_already_sorted() {
    let output = run(&["--scramble", "0", "--seed", "1"]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.starts_with("Start state:\n  1   2   3   4\n"));
    assert!(text.contains("1 boards checked.\nSolution found in 0 moves:\n"));
}

#[test]
fn bare_scramble_uses_config_moves() {
    let config = temp_file("[scramble]\nmoves = 1\nseed = 5\n");
    let output = run(&["--scramble", "--config", config.path().to_str().unwrap()]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("Solution found in 1 moves:"));
}

#[test]
fn config_file_supplies_limits() {
    let config = temp_file("[limits]\nmax_expansions = 2\n");
    let file = temp_file("16 2 3 13 5 11 10 8 9 7 6 12 4 14 15 1");
    let output = run(&[
        file.path().to_str().unwrap(),
        "--config",
        config.path().to_str().unwrap(),
    ]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stdout(&output).contains("expansion limit of 2"));
}

#[test]
fn file_and_scramble_conflict() {
    let file = temp_file("1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 16");
    let output = run(&[file.path().to_str().unwrap(), "--scramble", "4"]);
    assert!(!output.status.success());
}
