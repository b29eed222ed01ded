//! End-to-end tests: generate the three files from a catalog and inspect them.
//!
//! The last test compiles and runs the generated tests; it is slow and
//! ignored by default.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

use errgen_define::SchemaError;
use errgen_gen::config::GeneratorConfig;
use errgen_gen::errors::GeneratorError;
use errgen_gen::generate::{generate, generate_catalog};
use errgen_gen::output::format_source;

mod common;
use common::{make_catalog, make_param, make_spec};

const CATALOG: &str = include_str!("fixtures/catalog.json");

/// Copies the fixture catalog into `dir` and generates from it.
fn generate_fixture(dir: &Path) -> Vec<PathBuf> {
    let schema = dir.join("catalog.json");
    fs::write(&schema, CATALOG).expect("write catalog");
    generate(&schema, &GeneratorConfig::default()).expect("generation succeeds")
}

fn read(dir: &Path, file: &str) -> String {
    fs::read_to_string(dir.join("generated").join(file)).expect("generated file exists")
}

#[test]
fn catalog_output_path_is_relative_to_schema() {
    let temp_dir = TempDir::new().unwrap();
    let paths = generate_fixture(temp_dir.path());

    assert_eq!(
        paths,
        vec![
            temp_dir.path().join("generated/messages.rs"),
            temp_dir.path().join("generated/api.rs"),
            temp_dir.path().join("generated/api_tests.rs"),
        ]
    );
}

#[test]
fn every_file_parses_and_is_formatted_once() {
    let temp_dir = TempDir::new().unwrap();
    for path in generate_fixture(temp_dir.path()) {
        let content = fs::read_to_string(&path).unwrap();
        assert!(
            syn::parse_file(&content).is_ok(),
            "{} does not parse",
            path.display()
        );
        let again = format_source(&content, "1.4.0").unwrap();
        assert_eq!(content, again, "{} changed on reformat", path.display());
    }
}

#[test]
fn files_carry_notice_and_resources() {
    let temp_dir = TempDir::new().unwrap();
    generate_fixture(temp_dir.path());

    let messages = read(temp_dir.path(), "messages.rs");
    assert!(messages.starts_with(
        "// This code was automatically generated by errgen (catalog version 1.4.0)."
    ));
    assert!(messages.contains("pub struct ErrMsg"));

    let api = read(temp_dir.path(), "api.rs");
    assert!(api.contains("use crate::messages::*;"));
    assert!(api.contains("pub fn errorf("));
    assert!(api.contains("pub fn is_nil_argument(&self) -> bool"));

    let tests = read(temp_dir.path(), "api_tests.rs");
    assert!(tests.contains("fn assert_valid_json(err: &Error)"));
    assert!(tests.contains("fn test_nil_argument()"));
}

#[test]
fn single_parameter_error() {
    let temp_dir = TempDir::new().unwrap();
    generate_fixture(temp_dir.path());

    let messages = read(temp_dir.path(), "messages.rs");
    assert!(messages.contains("pub const ERRMSG_NOT_EXISTENT: ErrMsg = ErrMsg {"));
    assert!(messages.contains("code: StatusCode::NOT_FOUND,"));
    assert!(messages.contains("message: \"file {} does not exist\","));

    let api = read(temp_dir.path(), "api.rs");
    assert!(api.contains("/// NotExistent returns an error when a file does not exist."));
    assert!(api.contains("/// * `path` - path of the missing file"));
    assert!(api.contains("pub fn not_existent(path: &str) -> Error {"));
    assert!(api.contains("errorf(&ERRMSG_NOT_EXISTENT, &[&path])"));

    let tests = read(temp_dir.path(), "api_tests.rs");
    assert!(tests.contains("fn test_not_existent() {"));
    assert!(tests.contains("let a = \"foo\";"));
    assert!(tests.contains("let err = not_existent(a);"));
    assert!(tests.contains("assert_valid_json(&err);"));
    assert!(tests.contains("assert_eq!(err, expected);"));
}

#[test]
fn multi_parameter_error() {
    let temp_dir = TempDir::new().unwrap();
    generate_fixture(temp_dir.path());

    let api = read(temp_dir.path(), "api.rs");
    assert!(api.contains("pub struct NotEqualArgs<'a> {"));
    assert!(api.contains("/// path being counted"));
    assert!(api.contains("pub path: &'a str,"));
    assert!(api.contains("pub count: i64,"));
    assert!(api.contains("pub fn not_equal(a: Option<&NotEqualArgs<'_>>) -> Error {"));
    assert!(api.contains("return nil_argument();"));
    assert!(api.contains("errorf(&ERRMSG_NOT_EQUAL, &[&a.path, &a.count])"));

    let holder = api.find("pub struct NotEqualArgs").unwrap();
    let function = api.find("pub fn not_equal").unwrap();
    assert!(holder < function);

    let tests = read(temp_dir.path(), "api_tests.rs");
    assert!(tests.contains("fn test_not_equal_nil() {"));
    assert!(tests.contains("let err = not_equal(None);"));
    assert!(tests.contains("fn test_not_equal() {"));
    assert!(tests.contains("let err = not_equal(Some(&a));"));
}

#[test]
fn owned_holder_has_no_lifetime() {
    let temp_dir = TempDir::new().unwrap();
    generate_fixture(temp_dir.path());

    let api = read(temp_dir.path(), "api.rs");
    assert!(api.contains("pub struct TimeoutArgs {"));
    assert!(api.contains("pub operation: String,"));
    assert!(api.contains("pub fn timeout(a: Option<&TimeoutArgs>) -> Error {"));
    assert!(api.contains("pub fn io_failure(cause: &dyn std::error::Error) -> Error {"));
}

#[test]
fn entries_keep_catalog_order() {
    let temp_dir = TempDir::new().unwrap();
    generate_fixture(temp_dir.path());

    let messages = read(temp_dir.path(), "messages.rs");
    let order: Vec<usize> = [
        "ERRMSG_NOT_EXISTENT:",
        "ERRMSG_NOT_EQUAL:",
        "ERRMSG_TIMEOUT:",
        "ERRMSG_IO_FAILURE:",
        "ERRMSG_RATIO_OUT_OF_RANGE:",
    ]
    .iter()
    .map(|name| messages.find(name).expect(name))
    .collect();
    assert!(order.windows(2).all(|w| w[0] < w[1]));
    assert!(messages.contains("id: 1,"));
    assert!(messages.contains("id: 5,"));
}

#[test]
fn slot_thirteen_is_never_assigned() {
    let temp_dir = TempDir::new().unwrap();
    let errors = (0..15)
        .map(|i| make_spec(&format!("Entry{}", i), vec![make_param("a", "&str")]))
        .collect();
    let catalog = make_catalog(temp_dir.path(), errors);

    generate_catalog(&catalog, &GeneratorConfig::default()).unwrap();
    let messages = fs::read_to_string(temp_dir.path().join("messages.rs")).unwrap();

    assert!(messages.contains("id: 12,"));
    assert!(!messages.contains("id: 13,"));
    assert!(messages.contains("id: 14,"));
    assert!(messages.contains("id: 16,"));
    assert!(!messages.contains("id: 17,"));
}

#[test]
fn zero_parameter_entry_fails_without_output() {
    let temp_dir = TempDir::new().unwrap();
    let out = temp_dir.path().join("out");
    let catalog = make_catalog(
        &out,
        vec![
            make_spec("Fine", vec![make_param("a", "&str")]),
            make_spec("Bare", vec![]),
        ],
    );

    let err = generate_catalog(&catalog, &GeneratorConfig::default()).unwrap_err();
    assert!(err.to_string().contains("'Bare' must have at least one parameter"));
    assert!(matches!(
        err.root(),
        GeneratorError::Schema(SchemaError::MissingParams { .. })
    ));
    assert!(!out.exists());
}

#[test]
fn unsupported_type_lists_every_fixture() {
    let temp_dir = TempDir::new().unwrap();
    let catalog = make_catalog(
        temp_dir.path(),
        vec![make_spec("Odd", vec![make_param("bytes", "Vec<u8>")])],
    );

    let err = generate_catalog(&catalog, &GeneratorConfig::default()).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("Unsupported parameter type 'Vec<u8>'"));
    assert!(message.contains(
        "[&dyn std::error::Error, &str, String, bool, f64, i64, u64]"
    ));
}

#[test]
fn extra_fixtures_enable_more_types() {
    let temp_dir = TempDir::new().unwrap();
    let catalog = make_catalog(
        temp_dir.path(),
        vec![make_spec("Small", vec![make_param("value", "u8")])],
    );
    let mut config = GeneratorConfig::default();
    config.fixtures.insert("u8", "7");

    generate_catalog(&catalog, &config).unwrap();
    let tests = fs::read_to_string(temp_dir.path().join("api_tests.rs")).unwrap();
    assert!(tests.contains("let a = 7;"));
}

/// Generates the fixture catalog into a scratch crate and runs its tests.
#[test]
#[ignore = "slow: compiles generated code"]
fn generated_tests_pass() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let crate_dir = temp_dir.path().join("generated_errors");
    let src_dir = crate_dir.join("src");
    fs::create_dir_all(&src_dir).unwrap();

    let schema = temp_dir.path().join("catalog.json");
    fs::write(&schema, CATALOG).unwrap();
    let mut config = GeneratorConfig::default();
    config.output = Some(src_dir.clone());
    generate(&schema, &config).expect("Failed to generate code");

    fs::write(
        crate_dir.join("Cargo.toml"),
        "[package]\nname = \"generated_errors\"\nversion = \"0.1.0\"\nedition = \"2024\"\n\n\
         [dependencies]\nserde = { version = \"1.0\", features = [\"derive\"] }\nserde_json = \"1.0\"\n",
    )
    .unwrap();
    fs::write(
        src_dir.join("lib.rs"),
        "pub mod api;\npub mod messages;\n#[cfg(test)]\nmod api_tests;\n",
    )
    .unwrap();

    let output = Command::new("cargo")
        .args(["test", "--manifest-path"])
        .arg(crate_dir.join("Cargo.toml"))
        .output()
        .expect("Failed to run cargo test");

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let stdout = String::from_utf8_lossy(&output.stdout);
        panic!(
            "Generated tests failed:\n\nSTDOUT:\n{}\n\nSTDERR:\n{}",
            stdout, stderr
        );
    }
}
