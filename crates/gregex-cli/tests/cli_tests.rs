//! Integration tests for the gregex CLI
//!
//! These tests invoke the built gregex-cli binary and verify:
//! - Exit codes (0 = success, 1 = negative verdict, 2 = error)
//! - Tab-separated and JSON output
//! - Vocabulary loading from a file

use std::path::PathBuf;
use std::process::Command;

// ── Helpers ───────────────────────────────────────────────

fn gregex_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_gregex-cli"))
}

fn run_gregex(args: &[&str]) -> std::process::Output {
    Command::new(gregex_bin())
        .args(args)
        .env_remove("RUST_LOG")
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .output()
        .expect("failed to execute gregex-cli")
}

fn stdout_lines(output: &std::process::Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_string)
        .collect()
}

fn write_vocabulary(name: &str, json: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("gregex-{}-{}.json", name, std::process::id()));
    std::fs::write(&path, json).expect("failed to write vocabulary file");
    path
}

// ── Version ───────────────────────────────────────────────

#[test]
fn test_version_command() {
    let output = run_gregex(&["version"]);
    assert!(output.status.success(), "version should exit 0");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("gregex"), "should contain 'gregex'");
    assert!(
        stdout.contains(env!("CARGO_PKG_VERSION")),
        "should contain version"
    );
}

#[test]
fn test_version_flag() {
    let output = run_gregex(&["--version"]);
    assert!(output.status.success(), "--version should exit 0");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

// ── Tokenize ──────────────────────────────────────────────

#[test]
fn test_tokenize_branched_expression() {
    let output = run_gregex(&["tokenize", "Ma3(Ma6)Mb4GNb4GN"]);
    assert!(output.status.success());
    assert_eq!(
        stdout_lines(&output),
        vec!["Ma3", "(", "Ma6", ")", "Mb4", "GNb4", "GN"]
    );
}

#[test]
fn test_tokenize_json() {
    let output = run_gregex(&["tokenize", "Fa6GN", "--json"]);
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let tokens = json.as_array().unwrap();
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0]["kind"], "bonded_unit");
    assert_eq!(tokens[1]["kind"], "bare_unit");
}

#[test]
fn test_tokenize_unknown_unit_exits_2() {
    let output = run_gregex(&["tokenize", "MQ"]);
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error"), "should report an error");
}

// ── Analyze ───────────────────────────────────────────────

#[test]
fn test_analyze_ligand_matches() {
    let output = run_gregex(&["analyze", "A(G)M", "-o", "..."]);
    assert!(output.status.success());
    assert_eq!(
        stdout_lines(&output),
        vec!["(G)", "(G)M", "A", "A(G)", "A(G)M", "G", "M"]
    );
}

#[test]
fn test_analyze_accepts_operator_name() {
    let by_symbol = run_gregex(&["analyze", "A(G)M", "-o", "_"]);
    let by_name = run_gregex(&["analyze", "A(G)M", "--operator", "continuation"]);
    assert!(by_symbol.status.success());
    assert_eq!(by_symbol.stdout, by_name.stdout);
    assert!(stdout_lines(&by_name).contains(&")M".to_string()));
}

#[test]
fn test_analyze_header_row() {
    let output = run_gregex(&["analyze", "A(G)M", "-o", "|", "-c", "-s", "(G)", "-n"]);
    assert!(output.status.success());
    let lines = stdout_lines(&output);
    assert_eq!(lines[0], "left_context\tmatch\tright_context\tvalid_sub?");
    assert!(lines.contains(&"A\t(G)\tM\ttrue".to_string()), "{:?}", lines);
}

#[test]
fn test_analyze_json() {
    let output = run_gregex(&["analyze", "A(G)M", "-o", "...", "-s", "(G", "--json"]);
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let records = json.as_array().unwrap();
    assert!(!records.is_empty());
    for record in records {
        assert!(record["match"].is_string());
        assert_eq!(record["valid"], false);
        assert!(record.get("left").is_none());
    }
}

#[test]
fn test_analyze_rejects_expression_with_operator() {
    let output = run_gregex(&["analyze", "A...M", "-o", "..."]);
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("already present"), "stderr: {}", stderr);
}

#[test]
fn test_analyze_unknown_operator_exits_2() {
    let output = run_gregex(&["analyze", "A(G)M", "-o", "?"]);
    assert_eq!(output.status.code(), Some(2));
}

// ── Check ─────────────────────────────────────────────────

#[test]
fn test_check_valid_substitution() {
    let output = run_gregex(&["check", "A...M", "(G)"]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout_lines(&output), vec!["true"]);
}

#[test]
fn test_check_invalid_substitution_exits_1() {
    let output = run_gregex(&["check", "A...M", "(G"]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout_lines(&output), vec!["false"]);
}

#[test]
fn test_check_without_substitution() {
    let output = run_gregex(&["check", "A(G_M"]);
    assert_eq!(output.status.code(), Some(1), "open branch stays open");
    let output = run_gregex(&["check", "AM"]);
    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn test_check_two_operators_exits_2() {
    let output = run_gregex(&["check", "A...G|M", ""]);
    assert_eq!(output.status.code(), Some(2));
}

// ── Tree ──────────────────────────────────────────────────

#[test]
fn test_tree_sexp() {
    let output = run_gregex(&["tree", "Ma3(Ma6)Mb4GNb4GN", "--style", "s-exp"]);
    assert!(output.status.success());
    assert_eq!(stdout_lines(&output), vec!["(GN (GNb4 (Mb4 Ma3 Ma6)))"]);
}

#[test]
fn test_tree_sexp_keep_leaf_parens() {
    let output = run_gregex(&[
        "tree",
        "Ma3(Ma6)Mb4GNb4GN",
        "--style",
        "s-exp",
        "--keep-leaf-parens",
    ]);
    assert!(output.status.success());
    assert_eq!(
        stdout_lines(&output),
        vec!["(GN (GNb4 (Mb4 (Ma3) (Ma6))))"]
    );
}

#[test]
fn test_tree_default_style_is_json() {
    let output = run_gregex(&["tree", "Ma3(Ma6)Mb4GNb4GN"]);
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["stem"][0], "GN");
    assert_eq!(json["subtrees"].as_array().unwrap().len(), 2);
}

#[test]
fn test_tree_func_and_args() {
    let output = run_gregex(&["tree", "Fa6GN", "--style", "func-and-args"]);
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["func"], "GN");
    assert_eq!(json["args"][0]["func"], "Fa6");
}

#[test]
fn test_tree_without_stem_exits_2() {
    let output = run_gregex(&["tree", "GN(Fa6)"]);
    assert_eq!(output.status.code(), Some(2));
}

// ── Compare ───────────────────────────────────────────────

#[test]
fn test_compare_json() {
    let output = run_gregex(&["compare", "A(G)M", "-a", "...", "-b", "_", "--json"]);
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(json["just_a"].as_array().unwrap().is_empty());
    let just_b: Vec<&str> = json["just_b"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["match"].as_str().unwrap())
        .collect();
    assert!(just_b.contains(&")M"));
    assert!(!json["neither"].as_array().unwrap().is_empty());
}

#[test]
fn test_compare_text_sections() {
    let output = run_gregex(&["compare", "A(G)M", "-a", "ligand", "-b", "branch", "-c"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for section in ["both", "just_a", "just_b", "neither"] {
        assert!(stdout.contains(section), "missing section {}", section);
    }
    assert!(stdout.contains("\tA\t(G)\tM"));
}

#[test]
fn test_compare_match_only_identity() {
    let full = run_gregex(&["compare", "MM", "-a", "...", "-b", "_", "-c", "--json"]);
    let by_text = run_gregex(&[
        "compare",
        "MM",
        "-a",
        "...",
        "-b",
        "_",
        "-c",
        "--match-only-identity",
        "--json",
    ]);
    assert!(full.status.success() && by_text.status.success());
    let full: serde_json::Value = serde_json::from_slice(&full.stdout).unwrap();
    let by_text: serde_json::Value = serde_json::from_slice(&by_text.stdout).unwrap();
    assert_eq!(full["both"].as_array().unwrap().len(), 3);
    let both = by_text["both"].as_array().unwrap();
    assert_eq!(both.len(), 2);
    assert_eq!(both[0]["match"], "M");
    assert_eq!(both[0]["left"], "");
    assert_eq!(both[0]["right"], "M");
}

// ── Vocabulary ────────────────────────────────────────────

#[test]
fn test_custom_vocabulary() {
    let path = write_vocabulary("custom", r#"{"bare_units": ["Q", "R"]}"#);
    let output = run_gregex(&[
        "--vocabulary",
        path.to_str().unwrap(),
        "tokenize",
        "Q(R3)Q",
    ]);
    let _ = std::fs::remove_file(&path);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(stdout_lines(&output), vec!["Q", "(", "R3", ")", "Q"]);
}

#[test]
fn test_missing_vocabulary_exits_2() {
    let output = run_gregex(&["--vocabulary", "does-not-exist.json", "tokenize", "GN"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_vocabulary_not_read_by_version_or_check() {
    let output = run_gregex(&["--vocabulary", "does-not-exist.json", "version"]);
    assert!(output.status.success(), "version should ignore the vocabulary");
    let output = run_gregex(&["--vocabulary", "does-not-exist.json", "check", "A...M", "(G)"]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout_lines(&output), vec!["true"]);
}

#[test]
fn test_invalid_vocabulary_exits_2() {
    let path = write_vocabulary("invalid", r#"{"bare_units": ["Q("]}"#);
    let output = run_gregex(&["--vocabulary", path.to_str().unwrap(), "tokenize", "Q"]);
    let _ = std::fs::remove_file(&path);
    assert_eq!(output.status.code(), Some(2));
}
