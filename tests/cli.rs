use std::process::{Command, Output};

use tempfile::TempDir;

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_tabular-ingest"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

#[test]
fn cli_prints_one_line_per_column_in_order() {
    let out = run(&["--input", "tests/fixtures/people.csv"]);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(
        String::from_utf8(out.stdout).unwrap(),
        "id: int64\nname: utf8\nscore: float64\nactive: bool\n"
    );
}

#[test]
fn cli_json_flag_prints_schema_array() {
    let out = run(&["--input", "tests/fixtures/people.xml", "--json"]);
    assert!(out.status.success());

    let schema: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(
        schema,
        serde_json::json!([
            {"name": "id", "data_type": "utf8"},
            {"name": "name", "data_type": "utf8"},
            {"name": "score", "data_type": "utf8"},
        ])
    );
}

#[test]
fn cli_fails_on_missing_input() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing.csv");
    let out = run(&["--input", path.to_str().unwrap()]);
    assert!(!out.status.success());
    assert!(out.stdout.is_empty());
    assert!(String::from_utf8_lossy(&out.stderr).contains("input not found"));
}

#[test]
fn cli_fails_on_unsupported_extension() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("people.txt");
    std::fs::write(&path, "name,age\nAlice,30\n").unwrap();

    let out = run(&["--input", path.to_str().unwrap()]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("unsupported file format"));
}

#[test]
fn cli_fails_on_malformed_content() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "[{\"a\": 1},").unwrap();

    let out = run(&["--input", path.to_str().unwrap()]);
    assert!(!out.status.success());
    assert!(out.stdout.is_empty());
}

#[test]
fn cli_format_flag_overrides_extension() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("people.txt");
    std::fs::write(&path, "name,age\nAlice,30\n").unwrap();

    let out = run(&["--input", path.to_str().unwrap(), "--format", "csv"]);
    assert!(out.status.success());
    assert_eq!(String::from_utf8(out.stdout).unwrap(), "name: utf8\nage: int64\n");
}

#[test]
fn cli_requires_input_flag() {
    let out = run(&[]);
    assert!(!out.status.success());
}
