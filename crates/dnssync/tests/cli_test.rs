//! Integration tests for the `dnssync` CLI binary.
//!
//! Argument parsing, completions, offline layout printing and error exit
//! codes. Nothing here talks to the DNS API.
#![allow(clippy::unwrap_used)]

use std::io::Write;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::NamedTempFile;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `dnssync` binary with env isolation.
///
/// Clears all `DNSSYNC_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn dnssync_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("dnssync");
    cmd.env("HOME", "/tmp/dnssync-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/dnssync-cli-test-nonexistent")
        .env_remove("DNSSYNC_CONFIG")
        .env_remove("DNSSYNC_CREDENTIALS")
        .env_remove("DNSSYNC_API_PASSWORD")
        .env_remove("DNSSYNC_TIMEOUT")
        .env_remove("DNSSYNC_CA_CERT")
        .env_remove("DNSSYNC_COLOR")
        .env_remove("DNSSYNC_SORT_RECORDS")
        .env_remove("RUST_LOG");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

fn layout_file(text: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(text.as_bytes()).unwrap();
    file
}

const LAYOUT: &str = "\
# zones managed by dnssync
example.com
\t.ttl\t300
\tMX\t@\tmail.example.com\t10
\tA\twww\t1.2.3.4
\tA\twww\t1.2.3.4

example.org
\tCNAME\twww\texample.com.
";

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = dnssync_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    dnssync_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("netcup")
            .and(predicate::str::contains("print"))
            .and(predicate::str::contains("pull"))
            .and(predicate::str::contains("push")),
    );
}

#[test]
fn test_version_flag() {
    dnssync_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("dnssync"));
}

#[test]
fn test_invalid_subcommand() {
    dnssync_cmd().arg("frobnicate").assert().failure().code(2);
}

#[test]
fn test_push_requires_files() {
    dnssync_cmd().arg("push").assert().failure().code(2);
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    dnssync_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    dnssync_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

// ── print ───────────────────────────────────────────────────────────

#[test]
fn test_print_renders_canonical_layout() {
    let file = layout_file(LAYOUT);
    dnssync_cmd()
        .arg("print")
        .arg(file.path())
        .assert()
        .success()
        .stdout(
            "example.com\n\
             \t.ttl\t300\n\
             \tMX\t@\tmail.example.com\t10\n\
             \tA\twww\t1.2.3.4\n\
             \n\
             example.org\n\
             \tCNAME\twww\texample.com.\n",
        );
}

#[test]
fn test_print_sorted_and_filtered() {
    let file = layout_file(LAYOUT);
    dnssync_cmd()
        .args(["print", "--sort-records", "-d", "example.com"])
        .arg(file.path())
        .assert()
        .success()
        .stdout("example.com\n\t.ttl\t300\n\tA\twww\t1.2.3.4\n\tMX\t@\tmail.example.com\t10\n");
}

#[test]
fn test_print_warns_when_later_file_replaces_zone() {
    let first = layout_file("example.com\n\tA\twww\t1.1.1.1\nexample.org\n");
    let second = layout_file("example.com\n\tA\twww\t2.2.2.2\n");
    dnssync_cmd()
        .arg("print")
        .arg(first.path())
        .arg(second.path())
        .assert()
        .success()
        .stdout("example.com\n\tA\twww\t2.2.2.2\n\nexample.org\n")
        .stderr(
            predicate::str::contains("zone declared again")
                .and(predicate::str::contains("example.com")),
        );
}

#[test]
fn test_push_help_mentions_yes_for_scripted_commits() {
    dnssync_cmd()
        .args(["push", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("confirmation prompt")
                .and(predicate::str::contains("non-interactive")),
        );
}

#[test]
fn test_print_reads_stdin() {
    dnssync_cmd()
        .args(["print", "-"])
        .write_stdin("example.net\n\tAAAA\t@\t2001:db8::1\n")
        .assert()
        .success()
        .stdout("example.net\n\tAAAA\t@\t2001:db8::1\n");
}

#[test]
fn test_print_json() {
    let file = layout_file(LAYOUT);
    dnssync_cmd()
        .args(["-o", "json", "print"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(
            predicate::str::contains("\"domain\": \"example.org\"")
                .and(predicate::str::contains("\"ttl\": 300")),
        );
}

#[test]
fn test_print_syntax_error_exits_with_layout_code() {
    let file = layout_file("example.com\n\tA\twww\t1.2.3.4\n\t\tA\tstray\n");
    dnssync_cmd()
        .arg("print")
        .arg(file.path())
        .assert()
        .failure()
        .code(9)
        .stderr(predicate::str::contains("line 3"));
}

#[test]
fn test_print_rejects_wrong_address_family() {
    let file = layout_file("example.com\n\tA\twww\t2001:db8::1\n");
    dnssync_cmd()
        .arg("print")
        .arg(file.path())
        .assert()
        .failure()
        .code(9)
        .stderr(predicate::str::contains("IPv4"));
}

#[test]
fn test_print_missing_file() {
    dnssync_cmd()
        .args(["print", "/nonexistent/zones.txt"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("/nonexistent/zones.txt"));
}

// ── config ──────────────────────────────────────────────────────────

#[test]
fn test_config_path_honors_flag() {
    dnssync_cmd()
        .args(["--config", "/tmp/dnssync-elsewhere.toml", "config", "path"])
        .assert()
        .success()
        .stdout("/tmp/dnssync-elsewhere.toml\n");
}

#[test]
fn test_config_show_applies_overrides() {
    let config = layout_file("sort_records = true\n");
    dnssync_cmd()
        .arg("--config")
        .arg(config.path())
        .args(["--timeout", "5", "config", "show"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("timeout = 5")
                .and(predicate::str::contains("sort_records = true")),
        );
}

#[test]
fn test_zero_timeout_is_usage_error() {
    dnssync_cmd()
        .args(["--timeout", "0", "config", "show"])
        .assert()
        .failure()
        .code(2);
}

// ── network commands without credentials ────────────────────────────

#[test]
fn test_pull_without_credentials_file() {
    dnssync_cmd()
        .args(["--credentials", "/nonexistent/credentials.json", "pull", "example.com"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("/nonexistent/credentials.json"));
}

#[test]
fn test_push_parses_layout_before_connecting() {
    let file = layout_file("example.com\n\tMX\t@\tmail.example.com\n");
    dnssync_cmd()
        .args(["--credentials", "/nonexistent/credentials.json", "push"])
        .arg(file.path())
        .assert()
        .failure()
        .code(9)
        .stderr(predicate::str::contains("line 2"));
}
