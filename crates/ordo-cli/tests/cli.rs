//! End-to-end tests driving the `ordo` binary.

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::NamedTempFile;

fn ordo(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ordo"))
        .args(args)
        .output()
        .expect("failed to run ordo")
}

fn write_constants(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::with_suffix(".ordo").unwrap();
    write!(file, "{content}").unwrap();
    file
}

fn demo(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../demos")
        .join(name)
}

#[test]
fn eval_prints_resolved_bindings() {
    let file = write_constants("const {\n    a = ord - 1\n    b = ord * 20\n    c = 2 << ord\n}\n");
    let output = ordo(&["eval", file.path().to_str().unwrap()]);

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("a = -1"));
    assert!(stdout.contains("b = 20"));
    assert!(stdout.contains("c = 8"));
}

#[test]
fn eval_emits_json_in_declaration_order() {
    let file = write_constants("const {\n    z = 1\n    m = 2.5\n    a\n}\n");
    let output = ordo(&[
        "eval",
        "--format",
        "json",
        file.path().to_str().unwrap(),
    ]);

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();

    let block = &parsed[0];
    assert_eq!(block["z"], serde_json::json!(1));
    assert_eq!(block["m"], serde_json::json!(2.5));
    assert_eq!(block["a"], serde_json::json!(2));

    let keys: Vec<_> = block.as_object().unwrap().keys().collect();
    assert_eq!(keys, ["z", "m", "a"]);
}

#[test]
fn check_reports_ok() {
    let file = write_constants("const {\n    a = 1\n}\n");
    let output = ordo(&["check", file.path().to_str().unwrap()]);

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("OK"));
}

#[test]
fn check_fails_on_undefined_reference() {
    let file = write_constants("const {\n    a = missing + 1\n}\n");
    let output = ordo(&["check", file.path().to_str().unwrap()]);

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("undefined reference"));
}

#[test]
fn dump_prints_the_syntax_tree() {
    let file = write_constants("const {\n    a = 1\n}\n");
    let output = ordo(&["dump", file.path().to_str().unwrap()]);

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("BlockDef"));
    assert!(stdout.contains("bindings"));
}

#[test]
fn demo_files_evaluate() {
    for name in ["enumeration.ordo", "transforms.ordo"] {
        let output = ordo(&["eval", demo(name).to_str().unwrap()]);
        assert!(output.status.success(), "{name} failed to evaluate");
    }

    let output = ordo(&["eval", demo("enumeration.ordo").to_str().unwrap()]);
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("west = 3"));
    assert!(stdout.contains("blue = 2"));
}
