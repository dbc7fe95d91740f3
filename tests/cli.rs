//! End-to-end checks of the binary's stream and exit-code contract:
//! exactly one JSON document per run, stdout on success, stderr on
//! failure, exit code 0 iff success.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;

fn jbridge() -> Command {
    Command::cargo_bin("jbridge").unwrap()
}

/// Fixture disassembler: a shell script invoked as `sh <script> ...`.
fn fixture(dir: &Path, name: &str, body: &str) -> String {
    let path = dir.join(name);
    std::fs::write(&path, body).unwrap();
    format!("sh {}", path.display())
}

fn disassemble_payload(working_dir: &Path) -> String {
    serde_json::json!({
        "mode": "disassemble",
        "classPath": "classes",
        "className": "com.example.Main",
        "workingDir": working_dir,
    })
    .to_string()
}

#[test]
fn greeting_document_is_exact() {
    jbridge()
        .arg(r#"{"name":"Мир","age":21}"#)
        .assert()
        .success()
        .stdout("{\"status\":\"success\",\"message\":\"Привет из Java, Мир!\",\"info\":\"Это пример консольного Java-приложения.\",\"processedAge\":42}\n")
        .stderr(predicate::str::is_empty());
}

#[test]
fn empty_object_uses_defaults() {
    jbridge()
        .arg("{}")
        .assert()
        .success()
        .stdout(predicate::str::contains("Привет из Java, Гость!"))
        .stdout(predicate::str::contains("\"processedAge\":0"));
}

#[test]
fn numeric_string_age_is_doubled() {
    jbridge()
        .arg(r#"{"age":"17"}"#)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"processedAge\":34"));
}

#[test]
fn non_numeric_age_defaults_to_zero() {
    jbridge()
        .arg(r#"{"age":true,"name":"А"}"#)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"processedAge\":0"));
}

#[test]
fn no_argument_reports_missing_input() {
    jbridge()
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr("{\"message\":\"No input data provided.\",\"status\":\"error\"}\n");
}

#[test]
fn malformed_argument_keeps_stdout_clean() {
    jbridge()
        .arg("not json at all")
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("\"status\":\"error\""));
}

#[test]
fn disassemble_with_missing_field_fails() {
    jbridge()
        .arg(r#"{"mode":"disassemble","classPath":"x","className":"y"}"#)
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("workingDir"));
}

#[test]
fn disassemble_success_relays_tool_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let tool = fixture(dir.path(), "ok.sh", "echo CODE-BLOCK\n");
    jbridge()
        .arg(disassemble_payload(dir.path()))
        .arg("--disassembler")
        .arg(&tool)
        .assert()
        .success()
        .stdout("{\"status\":\"success\",\"disassembledCode\":\"CODE-BLOCK\"}\n")
        .stderr(predicate::str::is_empty());
}

#[test]
fn disassemble_failure_relays_tool_stderr() {
    let dir = tempfile::tempdir().unwrap();
    let tool = fixture(dir.path(), "bad.sh", "echo 'bad class' >&2\nexit 2\n");
    jbridge()
        .arg(disassemble_payload(dir.path()))
        .arg("-d")
        .arg(&tool)
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr("{\"message\":\"bad class\",\"status\":\"error\"}\n");
}

#[test]
fn silent_tool_failure_names_exit_code() {
    let dir = tempfile::tempdir().unwrap();
    let tool = fixture(dir.path(), "silent.sh", "exit 5\n");
    jbridge()
        .arg(disassemble_payload(dir.path()))
        .arg("-d")
        .arg(&tool)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("exited with code 5"));
}

#[test]
fn disassembler_env_fallback_is_honored() {
    let dir = tempfile::tempdir().unwrap();
    let tool = fixture(dir.path(), "ok.sh", "echo FROM-ENV\n");
    jbridge()
        .env("JBRIDGE_DISASSEMBLER", &tool)
        .arg(disassemble_payload(dir.path()))
        .assert()
        .success()
        .stdout(predicate::str::contains("FROM-ENV"));
}

#[test]
fn flag_overrides_env() {
    let dir = tempfile::tempdir().unwrap();
    let env_tool = fixture(dir.path(), "env.sh", "echo FROM-ENV\n");
    let flag_tool = fixture(dir.path(), "flag.sh", "echo FROM-FLAG\n");
    jbridge()
        .env("JBRIDGE_DISASSEMBLER", &env_tool)
        .arg(disassemble_payload(dir.path()))
        .arg("-d")
        .arg(&flag_tool)
        .assert()
        .success()
        .stdout(predicate::str::contains("FROM-FLAG"));
}

#[test]
fn repeated_runs_are_byte_identical() {
    let run = || {
        jbridge()
            .arg(r#"{"name":"Мир","age":3}"#)
            .output()
            .unwrap()
    };
    let (a, b) = (run(), run());
    assert!(a.status.success());
    assert_eq!(a.stdout, b.stdout);
    assert_eq!(a.stderr, b.stderr);
}

#[test]
fn verbose_diagnostics_stay_off_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let tool = fixture(dir.path(), "ok.sh", "echo CODE-BLOCK\n");
    jbridge()
        .arg("-vv")
        .arg(disassemble_payload(dir.path()))
        .arg("-d")
        .arg(&tool)
        .assert()
        .success()
        .stdout("{\"status\":\"success\",\"disassembledCode\":\"CODE-BLOCK\"}\n")
        .stderr(predicate::str::contains("[DEBUG]"));
}
