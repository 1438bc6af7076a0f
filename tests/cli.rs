// ABOUTME: Integration tests for the docklog CLI commands.
// ABOUTME: Validates --help output, demo fallback and startup errors.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

fn docklog_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("docklog"));
    for var in ["DOCKER_HOST", "DOCKLOG_BIND", "DOCKLOG_TIMEOUT", "DOCKLOG_STOP_TIMEOUT"] {
        cmd.env_remove(var);
    }
    cmd
}

/// A connection string nothing listens on, so the runtime ping fails fast.
fn unreachable_host() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    format!("tcp://{}", listener.local_addr().unwrap())
}

#[test]
fn help_shows_commands() {
    docklog_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("logs"))
        .stdout(predicate::str::contains("ps"));
}

#[test]
fn ps_falls_back_to_demo_containers() {
    let temp_dir = tempfile::tempdir().unwrap();

    docklog_cmd()
        .current_dir(temp_dir.path())
        .args(["--host", &unreachable_host(), "ps"])
        .assert()
        .success()
        .stdout(predicate::str::contains("web-app"))
        .stdout(predicate::str::contains("old-app").not());
}

#[test]
fn ps_all_includes_stopped_demo_container() {
    let temp_dir = tempfile::tempdir().unwrap();

    docklog_cmd()
        .current_dir(temp_dir.path())
        .args(["--host", &unreachable_host(), "ps", "--all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("old-app"));
}

#[test]
fn logs_prints_json_lines() {
    let temp_dir = tempfile::tempdir().unwrap();

    let output = docklog_cmd()
        .current_dir(temp_dir.path())
        .args(["--host", &unreachable_host(), "logs", "web-app", "-n", "2"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<serde_json::Value> = stdout
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[1]["message"], "[INFO] Server running normally");
}

#[test]
fn start_fails_when_runtime_unavailable() {
    let temp_dir = tempfile::tempdir().unwrap();

    docklog_cmd()
        .current_dir(temp_dir.path())
        .args(["--host", &unreachable_host(), "start", "web-app"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unavailable"));
}

#[test]
fn unsupported_host_scheme_is_rejected() {
    let temp_dir = tempfile::tempdir().unwrap();

    docklog_cmd()
        .current_dir(temp_dir.path())
        .args(["--host", "ssh://deploy@example.com", "ps"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported"));
}

#[test]
fn invalid_config_file_is_rejected() {
    let temp_dir = tempfile::tempdir().unwrap();
    fs::write(temp_dir.path().join("docklog.yml"), "colour: blue\n").unwrap();

    docklog_cmd()
        .current_dir(temp_dir.path())
        .arg("ps")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn missing_explicit_config_is_rejected() {
    let temp_dir = tempfile::tempdir().unwrap();

    docklog_cmd()
        .current_dir(temp_dir.path())
        .args(["--config", "nowhere.yml", "ps"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nowhere.yml"));
}
