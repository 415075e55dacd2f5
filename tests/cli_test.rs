//! Integration tests for the zalgo-gen binary

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

fn data_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("data/zalgo-char-data.toml")
}

fn run_zalgo_gen(args: &[&str]) -> (ExitStatus, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_zalgo-gen"))
        .args(args)
        .output()
        .expect("Failed to execute zalgo-gen");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();

    (output.status, stdout, stderr)
}

fn small_input(dir: &Path) -> PathBuf {
    let input = dir.join("marks.toml");
    fs::write(
        &input,
        "up = [\"\\u0300\", \"\\u0301\"]\ndown = [\"\\u0316\"]\nmid = [\"\\u0334\"]\n",
    )
    .unwrap();
    input
}

#[test]
fn test_generate_writes_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = small_input(dir.path());
    let output = dir.path().join("chars.rs");

    let (status, _, stderr) = run_zalgo_gen(&[
        "generate",
        input.to_str().unwrap(),
        "--output",
        output.to_str().unwrap(),
    ]);

    assert!(status.success(), "stderr: {}", stderr);
    assert!(stderr.contains("Generated"));
    let written = fs::read_to_string(&output).unwrap();
    assert!(written.starts_with("// Generated by zalgo-gen "));
    assert!(written.contains("fn is_zalgo_char(c: char) -> bool"));
    assert!(zalgo_gen::check_rust(&written).is_ok());
}

#[test]
fn test_generate_accepts_flags_before_input() {
    let dir = tempfile::tempdir().unwrap();
    let input = small_input(dir.path());
    let output = dir.path().join("chars.rs");

    let (status, _, stderr) = run_zalgo_gen(&[
        "generate",
        "--greedy",
        "--output",
        output.to_str().unwrap(),
        input.to_str().unwrap(),
    ]);

    assert!(status.success(), "stderr: {}", stderr);
    assert!(output.exists());
}

#[test]
fn test_generate_to_stdout() {
    let (status, stdout, _) =
        run_zalgo_gen(&["generate", "--greedy", data_path().to_str().unwrap()]);

    assert!(status.success());
    assert!(stdout.contains("pub(crate) const ZALGO_MID_ENCODED: &[[u8; 2]]"));
    assert!(stdout.contains("fn is_zalgo_char(c: char) -> bool"));
}

#[test]
fn test_check_fresh_and_stale_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let input = small_input(dir.path());
    let output = dir.path().join("chars.rs");
    let input_arg = input.to_str().unwrap();
    let output_arg = output.to_str().unwrap();

    let (status, _, _) = run_zalgo_gen(&["generate", input_arg, "--output", output_arg]);
    assert!(status.success());

    let (status, stdout, _) = run_zalgo_gen(&["check", input_arg, output_arg]);
    assert!(status.success());
    assert!(stdout.contains("up to date"));

    fs::write(&input, "up = [\"\\u0300\"]\ndown = []\nmid = []\n").unwrap();
    let (status, _, stderr) = run_zalgo_gen(&["check", input_arg, output_arg]);
    assert_eq!(status.code(), Some(1));
    assert!(stderr.contains("is stale"));
}

#[test]
fn test_stats_json_report() {
    let (status, stdout, _) = run_zalgo_gen(&["stats", data_path().to_str().unwrap(), "--json"]);
    assert!(status.success());

    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(report["categories"]["up"], 50);
    assert_eq!(report["categories"]["down"], 40);
    assert_eq!(report["categories"]["mid"], 23);
    assert_eq!(report["members"], 113);
    assert_eq!(report["range"][0], 0x300);
    assert_eq!(report["range"][1], 0x489);
    assert_eq!(report["strategy"], "exact");
    assert!(report["fell_back"].is_boolean());
    assert!(report["clauses"].as_u64().unwrap() <= 113);
    assert!(report["literals"].is_u64());
    assert!(report["prime_implicants"].is_u64());
}

#[test]
fn test_stats_greedy_flag() {
    let (status, stdout, _) = run_zalgo_gen(&[
        "stats",
        "--json",
        "--greedy",
        data_path().to_str().unwrap(),
    ]);
    assert!(status.success());

    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(report["strategy"], "greedy");
}

#[test]
fn test_failed_generate_exits_nonzero() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("marks.toml");
    let output = dir.path().join("chars.rs");
    fs::write(&input, "up = []\ndown = []\nmid = [\"\\u20D2\"]\n").unwrap();

    let (status, _, stderr) = run_zalgo_gen(&[
        "generate",
        input.to_str().unwrap(),
        "--output",
        output.to_str().unwrap(),
    ]);

    assert_eq!(status.code(), Some(1));
    assert!(stderr.contains("Encoding error"));
    assert!(!output.exists());
}

#[test]
fn test_missing_input_is_usage_error() {
    let (status, _, stderr) = run_zalgo_gen(&["stats", "--json"]);
    assert_eq!(status.code(), Some(1));
    assert!(stderr.contains("Usage: zalgo-gen stats"));
}

#[test]
fn test_unknown_command() {
    let (status, _, stderr) = run_zalgo_gen(&["frobnicate"]);
    assert_eq!(status.code(), Some(1));
    assert!(stderr.contains("Unknown command: frobnicate"));
}

#[test]
fn test_schema_and_version() {
    let (status, stdout, _) = run_zalgo_gen(&["schema"]);
    assert!(status.success());
    let schema: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(schema["properties"]["up"].is_object());

    let (status, stdout, _) = run_zalgo_gen(&["version"]);
    assert!(status.success());
    assert_eq!(stdout.trim(), format!("zalgo-gen {}", zalgo_gen::VERSION));
}
