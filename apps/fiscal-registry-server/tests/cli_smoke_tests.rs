#![allow(clippy::unwrap_used, clippy::expect_used)]

//! CLI smoke tests for the fiscal-registry-server binary.

use std::path::Path;
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

/// Run the binary from `dir` with a scrubbed database environment.
fn run_server_in(dir: &Path, args: &[&str], database_url: Option<&str>) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_fiscal-registry-server"));
    cmd.args(args)
        .current_dir(dir)
        .env_remove("DATABASE_URL")
        .env_remove("APP__DATABASE__URL")
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    if let Some(url) = database_url {
        cmd.env("DATABASE_URL", url);
    }
    cmd.output().expect("Failed to execute fiscal-registry-server")
}

fn run_server(args: &[&str], database_url: Option<&str>) -> Output {
    let dir = TempDir::new().unwrap();
    run_server_in(dir.path(), args, database_url)
}

#[test]
fn test_cli_help_command() {
    let output = run_server(&["--help"], None);

    assert!(output.status.success(), "Help command should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage:"), "Should contain usage information");
    assert!(stdout.contains("run"), "Should contain 'run' subcommand");
    assert!(stdout.contains("check"), "Should contain 'check' subcommand");
    assert!(stdout.contains("--config"), "Should mention config option");
    assert!(stdout.contains("--port"), "Should mention port option");
}

#[test]
fn test_cli_version_command() {
    let output = run_server(&["--version"], None);

    assert!(output.status.success(), "Version command should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("fiscal-registry-server"));
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_check_without_database_url_fails() {
    let output = run_server(&["check"], None);

    assert!(!output.status.success(), "check must fail without a URL");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("DATABASE_URL"),
        "Error should name DATABASE_URL, got: {stderr}"
    );
}

#[test]
fn test_run_without_database_url_fails_fast() {
    let output = run_server(&["run"], None);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("DATABASE_URL"), "got: {stderr}");
}

#[test]
fn test_check_with_database_url_redacts_password() {
    let output = run_server(&["check"], Some("postgres://app:s3cret@db:5432/registry"));

    assert!(output.status.success(), "check should succeed with a URL");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Configuration is valid"));
    assert!(stdout.contains("db:5432/registry"));
    assert!(!stdout.contains("s3cret"), "password must be masked");
}

#[test]
fn test_print_config_applies_port_override() {
    let output = run_server(
        &["--print-config", "--port", "9123"],
        Some("sqlite::memory:"),
    );

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Effective configuration"));
    assert!(stdout.contains("9123"));
}

#[test]
fn test_config_file_is_read() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("registry.yaml"),
        "database:\n  url: \"sqlite::memory:\"\nlogging:\n  level: warn\n",
    )
    .unwrap();

    let output = run_server_in(dir.path(), &["--config", "registry.yaml", "check"], None);

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("sqlite::memory:"));
}

#[test]
fn test_missing_config_file_fails() {
    let output = run_server(&["--config", "does-not-exist.yaml", "check"], None);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("config file does not exist"));
}

#[test]
fn test_dotenv_supplies_database_url() {
    let dir = TempDir::new().unwrap();
    let dotenv = "DATABASE_URL=sqlite::memory:\n";
    std::fs::write(dir.path().join(".env"), dotenv).unwrap();

    let output = run_server_in(dir.path(), &["check"], None);

    assert!(output.status.success());
}

#[test]
fn test_single_verbose_flag_selects_debug() {
    let output = run_server(&["-v", "--print-config"], None);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("debug"), "got: {stdout}");
}
