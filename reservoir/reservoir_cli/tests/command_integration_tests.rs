use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn write_config(dir: &TempDir, content: &str) -> String {
    let path = dir.path().join("pool.toml");
    fs::write(&path, content).expect("Failed to write test config");
    path.to_string_lossy().to_string()
}

#[test]
fn test_demo_prints_pool_lifecycle() {
    let mut cmd = Command::cargo_bin("reservoir").unwrap();
    cmd.args(["demo", "--seed", "7"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "Empty pool created: Pool(free=0, in_use=0)\nCreating some models...\nPool(free=3, in_use=0)\n",
        ))
        .stdout(predicate::str::contains("Locking models...\nPool(free=0, in_use=3)"))
        .stdout(predicate::str::contains("Model 3"))
        .stdout(predicate::str::ends_with("\tPool(free=3, in_use=0)\n"));
}

#[test]
fn test_demo_is_reproducible() {
    let run = || {
        let output = Command::cargo_bin("reservoir")
            .unwrap()
            .args(["demo", "--seed", "1234", "--models", "5"])
            .output()
            .unwrap();
        assert!(output.status.success());
        String::from_utf8(output.stdout).unwrap()
    };

    let first = run();
    assert!(first.contains("Model 5"));
    assert_eq!(first, run());
}

#[test]
fn test_demo_with_blocking_config() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        "name = \"demo\"\n\n[exhaustion]\nmode = \"block\"\ntimeout_ms = 50\n",
    );

    let mut cmd = Command::cargo_bin("reservoir").unwrap();
    cmd.args(["demo", "--models", "2", "--config", &path])
        .assert()
        .success()
        .stdout(predicate::str::contains("Pool(free=0, in_use=2)"));
}

#[test]
fn test_check_config_prints_effective_config() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[exhaustion]\nmode = \"block\"\ntimeout_ms = 250\n");

    let mut cmd = Command::cargo_bin("reservoir").unwrap();
    cmd.args(["check-config", "--path", &path])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"mode\": \"block\""))
        .stdout(predicate::str::contains("\"timeout_ms\": 250"))
        .stdout(predicate::str::contains("\"name\": \"model-pool\""));
}

#[test]
fn test_check_config_rejects_invalid_file() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[exhaustion]\nmode = \"block\"\ntimeout_ms = 0\n");

    let mut cmd = Command::cargo_bin("reservoir").unwrap();
    cmd.args(["check-config", "--path", &path])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration"));
}

#[test]
fn test_check_config_missing_file() {
    let mut cmd = Command::cargo_bin("reservoir").unwrap();
    cmd.args(["check-config", "--path", "/nonexistent/reservoir.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load configuration"));
}

#[test]
fn test_unknown_log_level_is_rejected() {
    let mut cmd = Command::cargo_bin("reservoir").unwrap();
    cmd.args(["--log-level", "loud", "demo"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown log level"));
}

#[test]
fn test_debug_logs_go_to_stderr() {
    let mut cmd = Command::cargo_bin("reservoir").unwrap();
    cmd.args(["--log-level", "debug", "demo", "--models", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Checked out").not())
        .stderr(predicate::str::contains("Checked out resource"));
}
