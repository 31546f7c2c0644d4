//! Integration tests for the `probe` command and global flags.

use predicates::prelude::*;
use tempfile::TempDir;

use super::reader_cmd;

#[test]
fn test_probe_always_succeeds() {
    let temp = TempDir::new().unwrap();

    reader_cmd(temp.path())
        .arg("probe")
        .assert()
        .success()
        .stdout(predicate::str::contains("null").or(predicate::str::contains("\"name\"")));
}

#[test]
fn test_verbose_and_quiet_conflict() {
    let temp = TempDir::new().unwrap();

    reader_cmd(temp.path()).args(["--verbose", "--quiet", "probe"]).assert().failure();
}

#[test]
fn test_help_lists_commands() {
    let temp = TempDir::new().unwrap();

    reader_cmd(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("metadata"))
        .stdout(predicate::str::contains("read"))
        .stdout(predicate::str::contains("probe"));
}
