// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! CLI tests for the `puzzle` binary.
//!
//! Writes puzzle inputs into a temporary directory, spawns the binary and
//! checks its answers and exit codes.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn run_puzzle(dir: &Path, input: &str, args: &[&str]) -> Output {
    let path = dir.join("input.txt");
    fs::write(&path, input).expect("write input");
    Command::new(env!("CARGO_BIN_EXE_puzzle"))
        .args(args)
        .arg(&path)
        .output()
        .expect("run puzzle")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn route_prints_both_extremes() {
    let temp = tempfile::tempdir().expect("tempdir");
    let output = run_puzzle(
        temp.path(),
        "London to Dublin = 464\nLondon to Belfast = 518\nDublin to Belfast = 141\n",
        &["route"],
    );
    assert!(output.status.success());
    assert_eq!(stdout(&output), "shortest: 605\nlongest: 982\n");
}

#[test]
fn containers_honours_capacity_flag() {
    let temp = tempfile::tempdir().expect("tempdir");
    let output = run_puzzle(temp.path(), "20\n15\n10\n5\n5\n", &["containers", "--capacity", "25"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "combinations: 4\nfewest containers: 2 (3 ways)\n");
}

#[test]
fn molecule_prints_expansion_and_steps() {
    let temp = tempfile::tempdir().expect("tempdir");
    let output = run_puzzle(
        temp.path(),
        "e => H\ne => O\nH => HO\nH => OH\nO => HH\n\nHOH\n",
        &["molecule"],
    );
    assert!(output.status.success());
    assert_eq!(stdout(&output), "distinct molecules: 4\nsteps from e: 3\n");
}

#[test]
fn presents_finds_first_house() {
    let temp = tempfile::tempdir().expect("tempdir");
    let output = run_puzzle(temp.path(), "130\n", &["presents", "--upper-bound", "100"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "house: 8\n");
}

#[test]
fn malformed_input_exits_with_failure() {
    let temp = tempfile::tempdir().expect("tempdir");
    let output = run_puzzle(temp.path(), "London -> Dublin\n", &["route"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("line 1"));
}

#[test]
fn missing_cost_exits_with_failure() {
    let temp = tempfile::tempdir().expect("tempdir");
    let output = run_puzzle(
        temp.path(),
        "Alice would gain 5 happiness units by sitting next to Bob.\n\
         Carol would lose 1 happiness unit by sitting next to Bob.\n",
        &["seating"],
    );
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("no cost defined"));
}
