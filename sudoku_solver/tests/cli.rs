//! End-to-end tests of the `sudoku_solver` binary: flag precedence,
//! output path derivation, and the documented exit codes.

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;

const EASY: &str = "9\n\
5 3 0 0 7 0 0 0 0\n\
6 0 0 1 9 5 0 0 0\n\
0 9 8 0 0 0 0 6 0\n\
8 0 0 0 6 0 0 0 3\n\
4 0 0 8 0 3 0 0 1\n\
7 0 0 0 2 0 0 0 6\n\
0 6 0 0 0 0 2 8 0\n\
0 0 0 4 1 9 0 0 5\n\
0 0 0 0 8 0 0 7 9\n";

/// Each test runs in its own scratch directory so `outputs/` and input
/// file names never collide between tests running in parallel.
fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("sudoku_solver_cli_test_{name}_{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn solves_easy_puzzle_and_writes_output() {
    let dir = scratch_dir("easy");
    let input = dir.join("easy.txt");
    fs::write(&input, EASY).unwrap();

    Command::cargo_bin("sudoku_solver")
        .unwrap()
        .current_dir(&dir)
        .args(["-f", "easy.txt"])
        .assert()
        .success();

    let output = dir.join("outputs").join("output_easy.txt");
    let contents = fs::read_to_string(output).unwrap();
    assert!(contents.starts_with("9\n"));
    assert!(contents.contains("05 03"));
}

#[test]
fn input_flag_overrides_earlier_file_flag() {
    let dir = scratch_dir("precedence");
    fs::write(dir.join("bogus.txt"), "not a real puzzle").unwrap();
    fs::write(dir.join("easy.txt"), EASY).unwrap();

    // -f names a garbage file first, but -i comes later and should win.
    Command::cargo_bin("sudoku_solver")
        .unwrap()
        .current_dir(&dir)
        .args(["-f", "bogus.txt", "-i", "easy.txt"])
        .assert()
        .success();

    assert!(dir.join("outputs").join("output_easy.txt").exists());
}

#[test]
fn missing_file_flag_is_a_usage_error() {
    Command::cargo_bin("sudoku_solver")
        .unwrap()
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn help_flag_prints_usage_and_exits_one() {
    Command::cargo_bin("sudoku_solver")
        .unwrap()
        .arg("-?")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn unreadable_input_path_exits_with_io_code() {
    Command::cargo_bin("sudoku_solver")
        .unwrap()
        .args(["-f", "/nonexistent/path/does-not-exist.txt"])
        .assert()
        .failure()
        .code(255);
}

#[test]
fn contradictory_puzzle_prints_no_solution_and_exits_zero() {
    let dir = scratch_dir("unsolvable");
    let input = dir.join("bad.txt");
    // Two 1s in the same row: no valid completion exists.
    let mut digits = vec!["2".to_string()];
    let mut grid = vec![0u32; 16];
    grid[0] = 1;
    grid[1] = 1;
    for d in grid {
        digits.push(d.to_string());
    }
    fs::write(&input, digits.join(" ")).unwrap();

    Command::cargo_bin("sudoku_solver")
        .unwrap()
        .current_dir(&dir)
        .args(["-f", "bad.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No Solution"));

    assert!(!dir.join("outputs").join("output_bad.txt").exists());
}
