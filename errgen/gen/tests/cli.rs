use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

const CATALOG: &str = include_str!("fixtures/catalog.json");

fn write_catalog(dir: &TempDir, json: &str) -> std::path::PathBuf {
    let path = dir.path().join("catalog.json");
    fs::write(&path, json).unwrap();
    path
}

// ============================================================================
// Help and Version Tests
// ============================================================================

#[test]
fn test_help_flag() {
    cargo_bin_cmd!("errgen")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("error catalog"))
        .stdout(predicate::str::contains("--resources"));
}

#[test]
fn test_missing_schema_argument() {
    cargo_bin_cmd!("errgen")
        .assert()
        .failure()
        .stderr(predicate::str::contains("<SCHEMA>"));
}

// ============================================================================
// Generation Tests
// ============================================================================

#[test]
fn test_generates_and_lists_files() {
    let temp_dir = TempDir::new().unwrap();
    let schema = write_catalog(&temp_dir, CATALOG);

    cargo_bin_cmd!("errgen")
        .arg(&schema)
        .assert()
        .success()
        .stdout(predicate::str::contains("messages.rs"))
        .stdout(predicate::str::contains("api.rs"))
        .stdout(predicate::str::contains("api_tests.rs"));

    assert!(temp_dir.path().join("generated/api.rs").is_file());
}

#[test]
fn test_output_flag_overrides_catalog_path() {
    let temp_dir = TempDir::new().unwrap();
    let schema = write_catalog(&temp_dir, CATALOG);
    let out = temp_dir.path().join("elsewhere");

    cargo_bin_cmd!("errgen")
        .arg(&schema)
        .arg("--output")
        .arg(&out)
        .assert()
        .success();

    assert!(out.join("messages.rs").is_file());
    assert!(!temp_dir.path().join("generated").exists());
}

#[test]
fn test_config_file_renames_target() {
    let temp_dir = TempDir::new().unwrap();
    let schema = write_catalog(&temp_dir, CATALOG);
    let config = temp_dir.path().join("errgen.toml");
    fs::write(&config, "[api]\nfile = \"constructors.rs\"\n").unwrap();

    cargo_bin_cmd!("errgen")
        .arg(&schema)
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("constructors.rs"));

    assert!(temp_dir.path().join("generated/constructors.rs").is_file());
}

// ============================================================================
// Failure Tests
// ============================================================================

#[test]
fn test_missing_schema_file_fails() {
    cargo_bin_cmd!("errgen")
        .arg("/no/such/catalog.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"))
        .stderr(predicate::str::contains("catalog.json"));
}

#[test]
fn test_failure_prints_cause_once() {
    let assert = cargo_bin_cmd!("errgen")
        .arg("/no/such/catalog.json")
        .assert()
        .failure();
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr);

    assert_eq!(stderr.matches("os error").count(), 1, "{}", stderr);
    assert_eq!(stderr.lines().count(), 1, "{}", stderr);
}

#[test]
fn test_zero_parameter_entry_fails() {
    let temp_dir = TempDir::new().unwrap();
    let schema = write_catalog(
        &temp_dir,
        r#"{"errgen": {"path": "out", "version": "1", "errors": [
            {"name": "Bare", "comment": "", "code": "StatusCode::BAD_REQUEST", "message": "bare"}
        ]}}"#,
    );

    cargo_bin_cmd!("errgen")
        .arg(&schema)
        .assert()
        .failure()
        .stderr(predicate::str::contains("must have at least one parameter"));

    assert!(!temp_dir.path().join("out").exists());
}

#[test]
fn test_resources_flag_replaces_builtin_resources() {
    let temp_dir = TempDir::new().unwrap();
    let schema = write_catalog(&temp_dir, CATALOG);
    let resources = temp_dir.path().join("resources");
    fs::create_dir(&resources).unwrap();
    for file in ["messages.rs", "api.rs", "api_tests.rs"] {
        fs::write(resources.join(format!("{}.header", file)), "//! Custom runtime.\n").unwrap();
        fs::write(resources.join(format!("{}.footer", file)), "").unwrap();
    }

    cargo_bin_cmd!("errgen")
        .arg(&schema)
        .arg("--resources")
        .arg(&resources)
        .assert()
        .success();

    let messages = fs::read_to_string(temp_dir.path().join("generated/messages.rs")).unwrap();
    assert!(messages.contains("//! Custom runtime."));
    assert!(!messages.contains("pub struct ErrMsg"));
}

#[test]
fn test_missing_resources_fail() {
    let temp_dir = TempDir::new().unwrap();
    let schema = write_catalog(&temp_dir, CATALOG);

    cargo_bin_cmd!("errgen")
        .arg(&schema)
        .arg("--resources")
        .arg(temp_dir.path().join("nothing-here"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("read header"));
}
