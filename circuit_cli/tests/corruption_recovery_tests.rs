//! Corruption recovery tests for the circuit binary.
//!
//! These tests verify the system can handle:
//! - Corrupted user workout files
//! - Truncated files that must survive a failed save
//! - Missing data directories

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn setup_test_dir() -> TempDir {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    fs::write(dir.path().join("config.toml"), "").expect("Failed to write config");
    dir
}

fn cli(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("circuit"));
    cmd.arg("--data-dir")
        .arg(dir.join("data"))
        .arg("--config")
        .arg(dir.join("config.toml"));
    cmd
}

fn user_file(dir: &Path) -> std::path::PathBuf {
    dir.join("data").join("user_workouts.json")
}

#[test]
fn test_corrupted_user_file_falls_back_to_seed() {
    let temp_dir = setup_test_dir();
    fs::create_dir_all(temp_dir.path().join("data")).unwrap();
    fs::write(user_file(temp_dir.path()), "{ invalid json }}}}").unwrap();

    cli(temp_dir.path())
        .arg("paths")
        .assert()
        .success()
        .stdout(predicate::str::contains("Calisthenics  (2 workouts)"));
}

#[test]
fn test_truncated_user_file_is_not_overwritten_on_save() {
    let temp_dir = setup_test_dir();
    fs::create_dir_all(temp_dir.path().join("data")).unwrap();
    // Simulate a crash halfway through a non-atomic write
    let truncated = r#"[{"_id": "new_1", "path": "Yo"#;
    fs::write(user_file(temp_dir.path()), truncated).unwrap();

    cli(temp_dir.path())
        .args(["configure", "seed_calisthenics_push_1", "--warmup", "3"])
        .assert()
        .failure();

    // The damaged file is left for the user to repair
    let contents = fs::read_to_string(user_file(temp_dir.path())).unwrap();
    assert_eq!(contents, truncated);

    // Reads keep working from the seed catalog
    cli(temp_dir.path())
        .args(["show", "seed_calisthenics_push_1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Warmup:  5 min"));
}

#[test]
fn test_missing_data_dir_is_created_on_save() {
    let temp_dir = setup_test_dir();
    assert!(!temp_dir.path().join("data").exists());

    cli(temp_dir.path())
        .args(["calibrate", "seed_mobility_hips_1", "--feedback", "8"])
        .assert()
        .success();

    assert!(user_file(temp_dir.path()).exists());
}

#[test]
fn test_user_entry_with_wrong_shape_ignored() {
    let temp_dir = setup_test_dir();
    fs::create_dir_all(temp_dir.path().join("data")).unwrap();
    fs::write(user_file(temp_dir.path()), r#"[{"_id": "x", "sets": "many"}]"#).unwrap();

    cli(temp_dir.path())
        .args(["show", "seed_mobility_hips_1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Hips #1"));
}
