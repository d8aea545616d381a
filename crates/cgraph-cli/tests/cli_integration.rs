//! Integration tests for the cg CLI.
//!
//! Run with: `cargo test --package cgraph-cli --test cli_integration`

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::TempDir;

/// Helper to run cg inside `dir`, with config and `.env` lookups confined to it.
fn run_cg(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_cg"))
        .current_dir(dir)
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join("config"))
        .env_remove("CG_OUTPUT_FORMAT")
        .env_remove("CG_CLIQUE_PRUNING")
        .args(args)
        .output()
        .expect("Failed to execute cg command")
}

fn write_fixture(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

fn stdout_json(output: &Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

const CONSOLES: &str = "[[0,1],[0,4],[2,1],[3,1],[4,2],[2,3],[1,4],[4,3]]";

const TIMED_LEVEL: &str = r#"[
    ["", "w", "", "", ""],
    ["", "w", "o", "w", ""],
    ["", "w", "", "w", ""],
    ["", "o", "", "w", ""]
]"#;

// =============================================================================
// Path Command Tests
// =============================================================================

#[test]
fn test_path_waits_for_night() {
    let temp = TempDir::new().unwrap();
    let edges = write_fixture(temp.path(), "edges.json", "[[0,1,-1],[1,2,0]]");

    let output = run_cg(
        temp.path(),
        &["path", "--edges", edges.to_str().unwrap(), "--start", "0", "--end", "2"],
    );

    assert!(output.status.success(), "cg path should succeed");
    assert_eq!(stdout(&output), "0 0 1 2");
}

#[test]
fn test_path_json_report() {
    let temp = TempDir::new().unwrap();
    let edges = write_fixture(temp.path(), "edges.json", "[[0,1,-1],[1,2,0]]");

    let output = run_cg(
        temp.path(),
        &["--format", "json", "path", "-e", edges.to_str().unwrap(), "-s", "0", "-t", "2"],
    );

    assert!(output.status.success());
    let report = stdout_json(&output);
    assert_eq!(report["path"], serde_json::json!([0, 0, 1, 2]));
    assert_eq!(report["transitions"], 3);
    assert_eq!(report["waits"], 1);
    assert_eq!(report["arrival_phase"], "night");
}

#[test]
fn test_path_unreachable_is_empty_success() {
    let temp = TempDir::new().unwrap();
    let edges = write_fixture(temp.path(), "edges.json", "[[0,1,0],[2,3,0]]");

    let output = run_cg(
        temp.path(),
        &["--format", "json", "path", "--edges", edges.to_str().unwrap(), "--start", "0", "--end", "3"],
    );

    assert!(output.status.success(), "no path is not an error");
    let report = stdout_json(&output);
    assert_eq!(report["path"], serde_json::json!([]));
    assert!(report["transitions"].is_null());
}

#[test]
fn test_path_rejects_bad_input() {
    let temp = TempDir::new().unwrap();
    let bad_annotation = write_fixture(temp.path(), "bad.json", "[[0,1,2]]");
    let good = write_fixture(temp.path(), "good.json", "[[0,1,0]]");

    let output = run_cg(
        temp.path(),
        &["path", "--edges", bad_annotation.to_str().unwrap(), "--start", "0", "--end", "1"],
    );
    assert!(!output.status.success(), "invalid annotation should fail");

    let output = run_cg(
        temp.path(),
        &["path", "--edges", good.to_str().unwrap(), "--start", "0", "--end", "9"],
    );
    assert!(!output.status.success(), "unknown end node should fail");
    assert!(String::from_utf8_lossy(&output.stderr).contains('9'));

    let output = run_cg(
        temp.path(),
        &["path", "--edges", "missing.json", "--start", "0", "--end", "1"],
    );
    assert!(!output.status.success(), "missing file should fail");
}

#[test]
fn test_path_directed() {
    let temp = TempDir::new().unwrap();
    let edges = write_fixture(temp.path(), "edges.json", "[[0,1,0]]");
    let path = edges.to_str().unwrap();

    let output = run_cg(temp.path(), &["path", "-e", path, "-s", "1", "-t", "0"]);
    assert_eq!(stdout(&output), "1 0");

    let output = run_cg(temp.path(), &["path", "-e", path, "-s", "1", "-t", "0", "--directed"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "");
}

// =============================================================================
// Clique Command Tests
// =============================================================================

#[test]
fn test_clique_dense() {
    let temp = TempDir::new().unwrap();
    let edges = write_fixture(temp.path(), "edges.json", CONSOLES);

    let output = run_cg(
        temp.path(),
        &["clique", "--edges", edges.to_str().unwrap(), "--size", "4", "--nodes", "5"],
    );

    assert!(output.status.success(), "cg clique should succeed");
    assert_eq!(stdout(&output), "1 2 3 4");
}

#[test]
fn test_clique_not_found_is_null() {
    let temp = TempDir::new().unwrap();
    let edges = write_fixture(temp.path(), "edges.json", CONSOLES);

    let output = run_cg(
        temp.path(),
        &["-f", "json", "clique", "-e", edges.to_str().unwrap(), "-k", "5", "-n", "5"],
    );

    assert!(output.status.success());
    let report = stdout_json(&output);
    assert!(report["clique"].is_null());
    assert_eq!(report["size"], 5);
}

#[test]
fn test_clique_no_prune_reports_no_pruned_branches() {
    let temp = TempDir::new().unwrap();
    let edges = write_fixture(temp.path(), "edges.json", CONSOLES);
    let path = edges.to_str().unwrap();

    let pruned = run_cg(temp.path(), &["-f", "json", "clique", "-e", path, "-k", "5"]);
    let exhaustive = run_cg(
        temp.path(),
        &["-f", "json", "clique", "-e", path, "-k", "5", "--no-prune"],
    );

    let pruned = stdout_json(&pruned);
    let exhaustive = stdout_json(&exhaustive);
    assert_eq!(pruned["clique"], exhaustive["clique"]);
    assert_eq!(exhaustive["stats"]["branches_pruned"], 0);
    assert!(pruned["stats"]["branches_pruned"].as_u64().unwrap() > 0);
}

#[test]
fn test_clique_sparse_ids() {
    let temp = TempDir::new().unwrap();
    let edges = write_fixture(
        temp.path(),
        "edges.json",
        "[[10,70],[70,300],[300,10],[300,5]]",
    );

    let output = run_cg(temp.path(), &["clique", "-e", edges.to_str().unwrap(), "-k", "3"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "10 70 300");
}

#[test]
fn test_clique_rejects_bad_input() {
    let temp = TempDir::new().unwrap();
    let edges = write_fixture(temp.path(), "edges.json", CONSOLES);
    let path = edges.to_str().unwrap();

    let output = run_cg(temp.path(), &["clique", "-e", path, "-k", "4", "-n", "4"]);
    assert!(!output.status.success(), "endpoint outside 0..N should fail");

    let output = run_cg(temp.path(), &["clique", "-e", path, "-k", "6", "-n", "5"]);
    assert!(!output.status.success(), "size above node count should fail");

    let output = run_cg(temp.path(), &["clique", "-e", path, "-k", "-1"]);
    assert!(!output.status.success(), "negative size should fail");
}

// =============================================================================
// Grid Command Tests
// =============================================================================

#[test]
fn test_grid_level() {
    let temp = TempDir::new().unwrap();
    let level = write_fixture(temp.path(), "level.json", TIMED_LEVEL);

    let output = run_cg(
        temp.path(),
        &["-f", "json", "grid", "--level", level.to_str().unwrap(), "--start", "0,0", "--dest", "3,4"],
    );

    assert!(output.status.success(), "cg grid should succeed");
    let report = stdout_json(&output);
    assert_eq!(report["path"].as_array().unwrap().len(), 15);
    assert_eq!(report["steps"], 14);
    assert_eq!(report["path"][0], serde_json::json!([0, 0]));
}

#[test]
fn test_grid_rejects_bad_input() {
    let temp = TempDir::new().unwrap();
    let level = write_fixture(temp.path(), "level.json", TIMED_LEVEL);
    let path = level.to_str().unwrap();

    let output = run_cg(temp.path(), &["grid", "-l", path, "-s", "0,0", "-d", "9,9"]);
    assert!(!output.status.success(), "destination outside the grid should fail");

    let output = run_cg(temp.path(), &["grid", "-l", path, "-s", "0", "-d", "3,4"]);
    assert!(!output.status.success(), "malformed position should fail");

    let ragged = write_fixture(temp.path(), "ragged.json", r#"[["", ""], [""]]"#);
    let output = run_cg(
        temp.path(),
        &["grid", "-l", ragged.to_str().unwrap(), "-s", "0,0", "-d", "0,1"],
    );
    assert!(!output.status.success(), "ragged level should fail");
}

// =============================================================================
// Config Command Tests
// =============================================================================

#[test]
fn test_config_set_get_reset() {
    let temp = TempDir::new().unwrap();

    let output = run_cg(temp.path(), &["config", "get", "output-format"]);
    assert_eq!(stdout(&output), "text");

    let output = run_cg(temp.path(), &["config", "set", "output-format", "json"]);
    assert!(output.status.success());

    let output = run_cg(temp.path(), &["config", "get", "output-format"]);
    assert_eq!(stdout(&output), "json");

    // The configured format applies when --format is not given
    let edges = write_fixture(temp.path(), "edges.json", "[[0,1,0]]");
    let output = run_cg(temp.path(), &["path", "-e", edges.to_str().unwrap(), "-s", "0", "-t", "1"]);
    assert_eq!(stdout_json(&output)["path"], serde_json::json!([0, 1]));

    let output = run_cg(temp.path(), &["config", "reset"]);
    assert!(output.status.success());
    let output = run_cg(temp.path(), &["config", "get", "output-format"]);
    assert_eq!(stdout(&output), "text");
}

#[test]
fn test_config_env_overrides_file() {
    let temp = TempDir::new().unwrap();
    run_cg(temp.path(), &["config", "set", "clique-pruning", "on"]);

    let output = Command::new(env!("CARGO_BIN_EXE_cg"))
        .current_dir(temp.path())
        .env("HOME", temp.path())
        .env("XDG_CONFIG_HOME", temp.path().join("config"))
        .env("CG_CLIQUE_PRUNING", "off")
        .args(["config", "get", "clique-pruning"])
        .output()
        .unwrap();
    assert_eq!(stdout(&output), "false");
}

#[test]
fn test_config_set_does_not_store_env_overrides() {
    let temp = TempDir::new().unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_cg"))
        .current_dir(temp.path())
        .env("HOME", temp.path())
        .env("XDG_CONFIG_HOME", temp.path().join("config"))
        .env("CG_OUTPUT_FORMAT", "json")
        .env_remove("CG_CLIQUE_PRUNING")
        .args(["config", "set", "clique-pruning", "off"])
        .output()
        .unwrap();
    assert!(output.status.success());

    // Without the variable, only the explicitly set key has changed
    let output = run_cg(temp.path(), &["config", "get", "output-format"]);
    assert_eq!(stdout(&output), "text");
    let output = run_cg(temp.path(), &["config", "get", "clique-pruning"]);
    assert_eq!(stdout(&output), "false");
}

#[test]
fn test_config_unknown_key() {
    let temp = TempDir::new().unwrap();
    let output = run_cg(temp.path(), &["config", "get", "colour"]);
    assert!(!output.status.success());
}
