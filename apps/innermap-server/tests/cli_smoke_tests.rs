//! CLI smoke tests for the innermap-server binary.
//!
//! These cover argument parsing, configuration validation, and that the
//! server actually comes up with a mock database.

use std::process::{Command, Stdio};
use std::time::Duration;
use tempfile::TempDir;
use tokio::time::timeout;

fn run_innermap_server(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_innermap-server"))
        .args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .expect("Failed to execute innermap-server")
}

async fn run_innermap_server_with_timeout(
    args: &[&str],
    timeout_duration: Duration,
) -> Result<std::process::Output, Box<dyn std::error::Error>> {
    let mut cmd = tokio::process::Command::new(env!("CARGO_BIN_EXE_innermap-server"));
    cmd.args(args).stdout(Stdio::piped()).stderr(Stdio::piped());

    match timeout(timeout_duration, cmd.output()).await {
        Ok(result) => result.map_err(|e| e.into()),
        Err(elapsed) => Err(elapsed.into()),
    }
}

fn write_config(temp_dir: &TempDir, db_url: &str) -> std::path::PathBuf {
    let config_path = temp_dir.path().join("config.yaml");
    let config_content = format!(
        r#"
server:
  home_dir: "{home}"
  host: "127.0.0.1"
  port: 0

database:
  url: "{db_url}"

logging:
  default:
    console_level: info
    file: ""
"#,
        home = temp_dir.path().display(),
    );
    std::fs::write(&config_path, config_content).expect("Failed to write config file");
    config_path
}

#[test]
fn help_lists_commands_and_options() {
    let output = run_innermap_server(&["--help"]);

    assert!(output.status.success(), "Help command should succeed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("innermap-server") || stdout.contains("Innermap"),
        "Should contain binary name"
    );
    assert!(
        stdout.contains("Usage:") || stdout.contains("USAGE:"),
        "Should contain usage information"
    );
    assert!(stdout.contains("run"), "Should contain 'run' subcommand");
    assert!(
        stdout.contains("check"),
        "Should contain 'check' subcommand"
    );
    assert!(stdout.contains("--config"), "Should mention config option");
}

#[test]
fn version_prints_a_number() {
    let output = run_innermap_server(&["--version"]);

    assert!(output.status.success(), "Version command should succeed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("innermap-server"),
        "Should contain binary name"
    );
    assert!(
        stdout.chars().any(|c| c.is_ascii_digit()),
        "Should contain version numbers"
    );
}

#[test]
fn invalid_subcommand_fails() {
    let output = run_innermap_server(&["invalid-command"]);

    assert!(!output.status.success(), "Invalid command should fail");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("error") || stderr.contains("invalid") || stderr.contains("unexpected"),
        "Should contain error message about invalid command"
    );
}

#[test]
fn check_rejects_missing_config_file() {
    let output = run_innermap_server(&["--config", "/nonexistent/config.yaml", "check"]);

    assert!(!output.status.success(), "Should fail with missing config");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("config") || stderr.contains("file") || stderr.contains("found"),
        "Should mention config file issue: {}",
        stderr
    );
}

#[test]
fn check_rejects_invalid_yaml() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("invalid.yaml");

    std::fs::write(&config_path, "invalid: yaml: content: [unclosed")
        .expect("Failed to write file");

    let output = run_innermap_server(&["--config", config_path.to_str().unwrap(), "check"]);

    assert!(!output.status.success(), "Should fail with invalid YAML");
}

#[test]
fn check_accepts_valid_config() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = write_config(&temp_dir, "sqlite://database/innermap.db");

    let output = run_innermap_server(&["--config", config_path.to_str().unwrap(), "check"]);

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let stdout = String::from_utf8_lossy(&output.stdout);
        eprintln!("STDERR: {}", stderr);
        eprintln!("STDOUT: {}", stdout);
    }

    assert!(output.status.success(), "Should succeed with valid config");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("valid") || stdout.contains("passed"),
        "Should indicate successful validation: {}",
        stdout
    );
}

#[test]
fn print_config_round_trips_through_yaml() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = write_config(&temp_dir, "sqlite://database/innermap.db");

    let output = run_innermap_server(&[
        "--config",
        config_path.to_str().unwrap(),
        "--print-config",
    ]);

    assert!(output.status.success(), "print-config should succeed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("server:") && stdout.contains("database:"),
        "Should print the effective YAML config: {}",
        stdout
    );
}

#[tokio::test]
async fn run_starts_with_mock_database() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = write_config(&temp_dir, "sqlite://database/innermap.db");

    let result = run_innermap_server_with_timeout(
        &["--config", config_path.to_str().unwrap(), "--mock", "run"],
        Duration::from_secs(10),
    )
    .await;

    match result {
        Err(err) => {
            // Timeout means the server was up and serving.
            assert!(
                err.to_string().contains("elapsed"),
                "Server failed to start: {}",
                err
            );
        }
        Ok(output) => {
            let stdout = String::from_utf8_lossy(&output.stdout);
            let stderr = String::from_utf8_lossy(&output.stderr);
            assert!(
                output.status.success(),
                "Server exited with failure.\nSTDOUT: {}\nSTDERR: {}",
                stdout,
                stderr
            );
        }
    }
}
