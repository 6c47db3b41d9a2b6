//! Binary-level tests: exit codes, console summary and log files.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn renamer(workdir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("box-renamer").expect("binary should build");
    cmd.current_dir(workdir).env_remove("RUST_LOG");
    cmd
}

fn log_files(dir: &Path) -> Vec<PathBuf> {
    fs::read_dir(dir)
        .expect("read log dir")
        .map(|e| e.expect("dir entry").path())
        .collect()
}

#[test]
fn test_renames_and_reports_counts() {
    let workdir = TempDir::new().expect("create workdir");
    let tree = TempDir::new().expect("create tree");
    fs::create_dir(tree.path().join("a:b")).expect("create a:b");
    fs::write(tree.path().join("a:b/c|d.txt"), b"x").expect("write file");

    renamer(workdir.path())
        .arg(tree.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "1 file(s) changed. 1 folder(s) changed.",
        ));

    assert!(tree.path().join("a-b/c-d.txt").exists());

    let logs = log_files(&workdir.path().join("logs"));
    assert_eq!(logs.len(), 1);
    let name = logs[0]
        .file_name()
        .and_then(|n| n.to_str())
        .expect("utf-8 log name");
    assert!(name.starts_with("box-renamer_") && name.ends_with(".log"));
    let contents = fs::read_to_string(&logs[0]).expect("read log");
    assert!(contents.contains("Renamed:"));
    assert!(contents.contains("completed with no errors"));
}

#[test]
fn test_dry_run_flag() {
    let workdir = TempDir::new().expect("create workdir");
    let tree = TempDir::new().expect("create tree");
    fs::write(tree.path().join("bad?name"), b"x").expect("write bad?name");

    renamer(workdir.path())
        .arg(tree.path())
        .arg("--dryRun")
        .assert()
        .code(0)
        .stdout(predicate::str::contains("Dry run complete"));

    assert!(tree.path().join("bad?name").exists());
    assert!(!tree.path().join("bad-name").exists());

    let logs = log_files(&workdir.path().join("logs"));
    let contents = fs::read_to_string(&logs[0]).expect("read log");
    assert!(contents.contains("DRY RUN: Renaming"));
}

#[test]
fn test_dry_run_logs_nested_file_under_planned_folder() {
    let workdir = TempDir::new().expect("create workdir");
    let tree = TempDir::new().expect("create tree");
    fs::create_dir(tree.path().join("a:b")).expect("create a:b");
    fs::write(tree.path().join("a:b/c|d.txt"), b"x").expect("write file");

    renamer(workdir.path())
        .arg(tree.path())
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "1 file(s) would change. 1 folder(s) would change.",
        ));

    let logs = log_files(&workdir.path().join("logs"));
    let contents = fs::read_to_string(&logs[0]).expect("read log");
    let expected = format!(
        "DRY RUN: Renaming {} to {}",
        tree.path().join("a-b/c|d.txt").display(),
        tree.path().join("a-b/c-d.txt").display()
    );
    assert!(contents.contains(&expected), "missing {expected:?} in log");
    assert!(tree.path().join("a:b/c|d.txt").exists());
}

#[test]
#[cfg(unix)]
fn test_rename_failure_exits_with_one() {
    let workdir = TempDir::new().expect("create workdir");
    let tree = TempDir::new().expect("create tree");
    let tail = "b".repeat(253);
    fs::write(tree.path().join(format!("a-{tail}")), b"existing").expect("write existing");
    fs::write(tree.path().join(format!("a:{tail}")), b"long").expect("write long name");
    fs::write(tree.path().join("fine?.txt"), b"x").expect("write fine?.txt");

    renamer(workdir.path())
        .arg(tree.path())
        .assert()
        .code(1)
        .stdout(predicate::str::contains("1 errors occurred"));

    assert!(tree.path().join("fine-.txt").exists());
    let logs = log_files(&workdir.path().join("logs"));
    let contents = fs::read_to_string(&logs[0]).expect("read log");
    assert!(contents.contains("OS Error"));
}

#[test]
fn test_log_dir_failure_is_not_fatal() {
    let workdir = TempDir::new().expect("create workdir");
    let tree = TempDir::new().expect("create tree");
    fs::write(workdir.path().join("logs"), b"a file, not a directory").expect("write blocker");
    fs::write(tree.path().join("q?.txt"), b"x").expect("write q?.txt");

    renamer(workdir.path())
        .arg(tree.path())
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "problem creating the logging directory",
        ));

    assert!(tree.path().join("q-.txt").exists());
}

#[test]
fn test_missing_root_fails() {
    let workdir = TempDir::new().expect("create workdir");

    renamer(workdir.path())
        .arg(workdir.path().join("does-not-exist"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_missing_argument_is_usage_error() {
    let workdir = TempDir::new().expect("create workdir");

    renamer(workdir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("rootDirectory"));
}

#[test]
fn test_report_flag_writes_json() {
    let workdir = TempDir::new().expect("create workdir");
    let tree = TempDir::new().expect("create tree");
    fs::write(tree.path().join("x:1.txt"), b"a").expect("write x:1.txt");
    fs::write(tree.path().join("x|1.txt"), b"b").expect("write x|1.txt");
    let report = workdir.path().join("report.json");

    renamer(workdir.path())
        .arg(tree.path())
        .arg("--report")
        .arg(&report)
        .arg("--quiet")
        .assert()
        .success();

    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&report).expect("read report"))
            .expect("parse report");
    assert_eq!(value["files_renamed"], 2);
    assert_eq!(value["outcomes"][1]["attempts"], 1);
}
