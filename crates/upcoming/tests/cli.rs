//! End-to-end CLI integration tests
//!
//! These tests invoke the compiled binary as a subprocess to verify
//! that the CLI behaves correctly from a user's perspective.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Returns a Command configured to run our binary, logging into `logs`.
#[allow(deprecated)]
fn cmd(logs: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap();
    cmd.env("UPCOMING_LOG_DIR", logs.path());
    cmd
}

fn logs() -> TempDir {
    TempDir::new().unwrap()
}

// =============================================================================
// Help & Version
// =============================================================================

#[test]
fn help_flag_shows_usage() {
    cmd(&logs())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("Commands:"))
        .stdout(predicate::str::contains("next"))
        .stdout(predicate::str::contains("compute"));
}

#[test]
fn long_help_lists_environment() {
    cmd(&logs())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("UPCOMING_LOG_DIR"));
}

#[test]
fn version_flag_shows_version() {
    cmd(&logs())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

// =============================================================================
// Compute Command
// =============================================================================

#[test]
fn compute_fix_bumps_patch() {
    cmd(&logs())
        .args(["compute", "1.2.3", "fix: correct typo"])
        .assert()
        .success()
        .stdout("1.2.4\n");
}

#[test]
fn compute_feat_bumps_minor() {
    cmd(&logs())
        .args(["compute", "1.2.3", "feat: add new endpoint"])
        .assert()
        .success()
        .stdout("1.3.0\n");
}

#[test]
fn compute_breaking_wins() {
    cmd(&logs())
        .args([
            "compute",
            "1.2.3",
            "fix: small bug",
            "feat: new feature",
            "BREAKING CHANGE: removed deprecated API",
        ])
        .assert()
        .success()
        .stdout("2.0.0\n");
}

#[test]
fn compute_without_commits_normalizes_tag() {
    cmd(&logs())
        .args(["compute", "v1.2.3"])
        .assert()
        .success()
        .stdout("1.2.3\n");
}

#[test]
fn compute_reads_stdin() {
    cmd(&logs())
        .args(["compute", "v0.4.1", "--stdin"])
        .write_stdin("chore: tidy\nfeat!: new config format\n")
        .assert()
        .success()
        .stdout("1.0.0\n");
}

#[test]
fn compute_json_outputs_resolution() {
    let output = cmd(&logs())
        .args(["compute", "v1.2.3", "fix: bug", "--json"])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let json: serde_json::Value =
        serde_json::from_str(&stdout).expect("compute --json should output valid JSON");

    assert_eq!(json["current_tag"], "v1.2.3");
    assert_eq!(json["next_version"], "1.2.4");
    assert_eq!(json["commits"][0], "fix: bug");
}

#[test]
fn compute_invalid_tag_fails() {
    cmd(&logs())
        .args(["compute", "v1.2", "fix: bug"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not semantic version format"));
}

// =============================================================================
// Info Command
// =============================================================================

#[test]
fn info_json_outputs_valid_json() {
    let output = cmd(&logs()).args(["info", "--json"]).assert().success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let json: serde_json::Value =
        serde_json::from_str(&stdout).expect("info --json should output valid JSON");

    assert_eq!(json["name"], env!("CARGO_PKG_NAME"));
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(json["config"]["remote"], "origin");
}

// =============================================================================
// Global Flags
// =============================================================================

#[test]
fn quiet_and_verbose_flags_accepted() {
    for flag in ["-q", "--quiet", "-v", "-vv", "--verbose"] {
        cmd(&logs())
            .args([flag, "compute", "1.0.0"])
            .assert()
            .success()
            .stdout("1.0.0\n");
    }
}

#[test]
fn color_choices_accepted() {
    for choice in ["auto", "always", "never"] {
        cmd(&logs())
            .args(["--color", choice, "info"])
            .assert()
            .success();
    }
}

#[test]
fn log_file_is_written_to_log_dir() {
    let logs = logs();
    cmd(&logs)
        .args(["compute", "1.0.0", "fix: x"])
        .assert()
        .success();

    let entries: Vec<_> = std::fs::read_dir(logs.path())
        .unwrap()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_name().to_string_lossy().starts_with("upcoming.jsonl"))
        .collect();
    assert!(!entries.is_empty(), "expected a log file in the log dir");
}

// =============================================================================
// Error Cases
// =============================================================================

#[test]
fn no_subcommand_shows_help() {
    cmd(&logs())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn invalid_subcommand_shows_error() {
    cmd(&logs())
        .arg("not-a-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn chdir_nonexistent_fails() {
    cmd(&logs())
        .args(["-C", "/nonexistent/path/that/does/not/exist", "info"])
        .assert()
        .failure();
}
