//! Tests for the `stylecheck` binary: output streams and exit codes.

use std::path::PathBuf;
use std::process::{Command, Output};

use tempfile::TempDir;

fn run_in(dir: &std::path::Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_stylecheck"))
        .args(args)
        .current_dir(dir)
        .env("NO_COLOR", "1")
        .output()
        .expect("binary should run")
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

#[test]
fn test_reports_relative_paths_as_given() {
    let temp = TempDir::new().unwrap();
    std::fs::create_dir(temp.path().join("src")).unwrap();
    std::fs::write(temp.path().join("src/a.py"), "x = 1;\n").unwrap();
    std::fs::write(temp.path().join("src/b.py"), "def Run():\n    pass\n").unwrap();

    let output = run_in(temp.path(), &["src"]);
    assert_eq!(output.status.code(), Some(0));

    let expected_a = PathBuf::from("src").join("a.py");
    let expected_b = PathBuf::from("src").join("b.py");
    assert_eq!(
        stdout(&output),
        format!(
            "{}: Line 1: S003 Unnecessary semicolon\n\
             {}: Line 1: S009 Function name 'Run' should use snake_case\n",
            expected_a.display(),
            expected_b.display()
        )
    );
}

#[test]
fn test_missing_path_is_fatal() {
    let temp = TempDir::new().unwrap();
    let output = run_in(temp.path(), &["does_not_exist.py"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("path not found"), "stderr: {}", stderr);
}

#[test]
fn test_fatal_errors_share_prefix() {
    let temp = TempDir::new().unwrap();
    let output = run_in(temp.path(), &["missing.py"]);
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.starts_with("Error: "), "stderr: {}", stderr);

    std::fs::write(temp.path().join("stylecheck.yaml"), "max_line_length: [\n").unwrap();
    std::fs::write(temp.path().join("a.py"), "x = 1\n").unwrap();
    let output = run_in(temp.path(), &["a.py"]);
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.starts_with("Error: "), "stderr: {}", stderr);
}

#[test]
fn test_module_level_variable_names() {
    let temp = TempDir::new().unwrap();
    std::fs::write(
        temp.path().join("a.py"),
        "Total = 0\nresult = dict(\n    Bar=1,\n    Baz=2\n)\n",
    )
    .unwrap();

    let output = run_in(temp.path(), &["a.py"]);
    assert_eq!(
        stdout(&output),
        "a.py: Line 1: S011 Variable 'Total' in function should be snake_case\n"
    );
}

#[test]
fn test_strict_exit_code() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("a.py"), "x = 1;\n").unwrap();
    std::fs::write(temp.path().join("ok.py"), "x = 1\n").unwrap();

    assert_eq!(run_in(temp.path(), &["a.py", "--strict"]).status.code(), Some(1));
    assert_eq!(run_in(temp.path(), &["ok.py", "--strict"]).status.code(), Some(0));
}

#[test]
fn test_unreadable_file_continues_then_fails() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("a.py"), b"\xff\xfe\n").unwrap();
    std::fs::write(temp.path().join("b.py"), "y = 2;\n").unwrap();

    let output = run_in(temp.path(), &["."]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stdout(&output).contains("b.py: Line 1: S003 Unnecessary semicolon"));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("a.py"), "stderr: {}", stderr);
}

#[test]
fn test_config_discovery_and_override() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("stylecheck.yaml"), "ignore: [S003]\n").unwrap();
    std::fs::write(temp.path().join("a.py"), "x = 1;  # todo\n").unwrap();

    let output = run_in(temp.path(), &["a.py"]);
    assert_eq!(stdout(&output), "a.py: Line 1: S005 TODO found\n");

    let output = run_in(temp.path(), &["a.py", "--ignore", "S005"]);
    assert_eq!(stdout(&output), "a.py: Line 1: S003 Unnecessary semicolon\n");
}

#[test]
fn test_invalid_config_is_fatal() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("stylecheck.yaml"), "select: [X1]\n").unwrap();
    std::fs::write(temp.path().join("a.py"), "x = 1\n").unwrap();

    let output = run_in(temp.path(), &["a.py"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_json_output() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("a.py"), "x = 1;\n  y = 2\n").unwrap();

    let output = run_in(temp.path(), &["a.py", "--format", "json"]);
    assert_eq!(output.status.code(), Some(0));

    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value["files_scanned"], 1);
    assert_eq!(value["diagnostics"][0]["code"], "S003");
    assert_eq!(value["diagnostics"][0]["line"], 1);
    assert_eq!(value["diagnostics"][1]["code"], "S002");
    assert_eq!(value["counts"]["S002"], 1);
}

#[test]
fn test_list_checks() {
    let temp = TempDir::new().unwrap();
    let output = run_in(temp.path(), &["--list-checks"]);
    assert_eq!(output.status.code(), Some(0));
    let out = stdout(&output);
    assert!(out.contains("S001"));
    assert!(out.contains("S012"));
}
