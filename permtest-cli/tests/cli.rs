use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::NamedTempFile;

fn numbers_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", contents).unwrap();
    file.flush().unwrap();
    file
}

fn permtest() -> Command {
    let mut cmd = Command::cargo_bin("permtest").expect("permtest binary should be built");
    cmd.env_remove("PERMTEST_ITER").env_remove("PERMTEST_SEED").env_remove("RUST_LOG");
    cmd
}

#[test]
fn exact_test_prints_p_value() {
    let a = numbers_file("1 2 3\n");
    let b = numbers_file("10\n11\n12\n");
    permtest()
        .args(["test", "--iter", "1000"])
        .arg(a.path())
        .arg(b.path())
        .assert()
        .success()
        .stdout("0.1\n")
        .stderr(predicate::str::contains("doing exact test"));
}

#[test]
fn default_iterations_are_logged_in_approximate_mode() {
    // Pool of 3000 -> 10 000 iterations; C(3000, 2) is far beyond that.
    let a = numbers_file("1 2");
    let b = numbers_file(&(0..2998).map(|i| (i % 17).to_string()).collect::<Vec<_>>().join(" "));
    permtest()
        .args(["test", "--seed", "5"])
        .arg(a.path())
        .arg(b.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("using 10000 iterations"));
}

#[test]
fn detail_flag_prints_summary() {
    let a = numbers_file("0 0 0");
    let b = numbers_file("100 100 100");
    permtest()
        .args(["test", "-i", "50", "--detail"])
        .arg(a.path())
        .arg(b.path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with("0.1\n"))
        .stdout(predicate::str::contains("Permutation test (exact)"));
}

#[test]
fn quiet_suppresses_info_logs() {
    let a = numbers_file("1 2");
    let b = numbers_file("3 4");
    permtest()
        .args(["-q", "test", "--iter", "100"])
        .arg(a.path())
        .arg(b.path())
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}

#[test]
fn empty_group_fails() {
    let a = numbers_file("");
    let b = numbers_file("1 2 3");
    permtest()
        .args(["test"])
        .arg(a.path())
        .arg(b.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid input"));
}

#[test]
fn malformed_number_fails() {
    let a = numbers_file("1 2 abc");
    let b = numbers_file("1 2 3");
    permtest()
        .args(["test"])
        .arg(a.path())
        .arg(b.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("parse error"))
        .stderr(predicate::str::contains("'abc'"));
}

#[test]
fn missing_file_fails() {
    let b = numbers_file("1 2 3");
    permtest()
        .args(["test", "/nonexistent/a.txt"])
        .arg(b.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("I/O error"));
}

#[test]
fn summary_from_files() {
    let first = numbers_file("4 1 3");
    let second = numbers_file("2");
    permtest()
        .args(["summary", "--stat", "median"])
        .arg(first.path())
        .arg(second.path())
        .assert()
        .success()
        .stdout("2.5\n");
}

#[test]
fn summary_from_stdin() {
    permtest()
        .args(["summary", "-s", "mode"])
        .write_stdin("5 7 7 5 9\n")
        .assert()
        .success()
        .stdout("7\n");
}

#[test]
fn summary_uses_exponent_for_tiny_values() {
    permtest()
        .args(["summary", "--stat", "mean"])
        .write_stdin("0.0000001 0.0000001\n")
        .assert()
        .success()
        .stdout("1e-07\n");
}

#[test]
fn summary_rejects_unknown_statistic() {
    permtest()
        .args(["summary", "--stat", "average"])
        .write_stdin("1 2 3")
        .assert()
        .failure();
}
