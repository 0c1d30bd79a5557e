//! CLI binary integration tests.
//!
//! These tests exercise the compiled `passvault` binary to verify that
//! top-level command routing, help text, and error handling work as expected.

use std::path::PathBuf;
use std::process::Command;

use tempfile::TempDir;

/// Locate the compiled `passvault` binary in the workspace target directory.
fn passvault_bin() -> PathBuf {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    // tests/integration -> workspace root
    let workspace_root = manifest_dir
        .parent()
        .expect("tests/ parent")
        .parent()
        .expect("workspace root");
    let bin = workspace_root.join("target").join("debug").join("passvault");
    assert!(
        bin.exists(),
        "passvault binary not found at {}; run `cargo build -p passvault-cli` first",
        bin.display()
    );
    bin
}

/// A command isolated from the caller's home directory and environment.
fn passvault_cmd(home: &TempDir) -> Command {
    let mut cmd = Command::new(passvault_bin());
    cmd.current_dir(home.path())
        .env("PASSVAULT_HOME", home.path())
        .env_remove("PASSVAULT_CONFIG")
        .env_remove("PASSVAULT_ENCRYPTION_KEY")
        .env_remove("PASSVAULT_USER")
        .env_remove("PASSVAULT_LOG");
    cmd
}

#[test]
fn test_cli_version() {
    let home = TempDir::new().unwrap();
    let output = passvault_cmd(&home)
        .arg("version")
        .output()
        .expect("failed to run passvault");
    assert!(output.status.success(), "version command should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("passvault"),
        "version output should contain 'passvault', got: {}",
        stdout
    );
}

#[test]
fn test_cli_help() {
    let home = TempDir::new().unwrap();
    let output = passvault_cmd(&home)
        .arg("--help")
        .output()
        .expect("failed to run passvault");
    assert!(output.status.success(), "--help should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    for command in ["entry", "generate", "keygen", "doctor"] {
        assert!(
            stdout.contains(command),
            "help output should mention '{}', got: {}",
            command,
            stdout
        );
    }
}

#[test]
fn test_cli_unknown_command() {
    let home = TempDir::new().unwrap();
    let output = passvault_cmd(&home)
        .arg("nonexistent-command")
        .output()
        .expect("failed to run passvault");
    assert!(
        !output.status.success(),
        "unknown command should return non-zero exit code"
    );
}

#[test]
fn test_cli_keygen_prints_hex_key() {
    let home = TempDir::new().unwrap();
    let output = passvault_cmd(&home)
        .arg("keygen")
        .output()
        .expect("failed to run passvault keygen");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let key = stdout.trim();
    assert_eq!(key.len(), 64);
    assert!(key.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn test_cli_generate_length() {
    let home = TempDir::new().unwrap();
    let output = passvault_cmd(&home)
        .args(["generate", "--length", "20", "--count", "3"])
        .output()
        .expect("failed to run passvault generate");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines.iter().all(|l| l.chars().count() == 20));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Very Strong"), "got: {}", stderr);
}

#[test]
fn test_cli_generate_rejects_out_of_range_length() {
    let home = TempDir::new().unwrap();
    let output = passvault_cmd(&home)
        .args(["generate", "--length", "31"])
        .output()
        .expect("failed to run passvault generate");
    assert!(!output.status.success());
}

#[test]
fn test_cli_entry_requires_key() {
    let home = TempDir::new().unwrap();
    let output = passvault_cmd(&home)
        .args(["entry", "list", "--user", "alice"])
        .output()
        .expect("failed to run passvault entry list");
    assert!(!output.status.success(), "entry list without a key should fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("PASSVAULT_ENCRYPTION_KEY"),
        "error should name the missing variable, got: {}",
        stderr
    );
}

#[test]
fn test_cli_entry_add_and_get() {
    let home = TempDir::new().unwrap();
    let key = "11".repeat(32);

    let output = passvault_cmd(&home)
        .env("PASSVAULT_ENCRYPTION_KEY", &key)
        .args([
            "entry", "add", "--user", "alice", "--title", "Gmail", "--username", "a@b.com",
            "--password", "p@ss", "--url", "https://gmail.com",
        ])
        .output()
        .expect("failed to run passvault entry add");
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let id = String::from_utf8_lossy(&output.stdout).trim().to_string();

    let output = passvault_cmd(&home)
        .env("PASSVAULT_ENCRYPTION_KEY", &key)
        .args(["entry", "get", &id, "--user", "alice"])
        .output()
        .expect("failed to run passvault entry get");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("a@b.com"));
    assert!(!stdout.contains("p@ss"), "password must be masked");

    let output = passvault_cmd(&home)
        .env("PASSVAULT_ENCRYPTION_KEY", &key)
        .args(["entry", "get", &id, "--user", "alice", "--reveal"])
        .output()
        .expect("failed to run passvault entry get --reveal");
    assert!(String::from_utf8_lossy(&output.stdout).contains("p@ss"));
}

#[test]
fn test_cli_doctor_help() {
    let home = TempDir::new().unwrap();
    let output = passvault_cmd(&home)
        .args(["doctor", "--help"])
        .output()
        .expect("failed to run passvault doctor --help");
    assert!(output.status.success(), "doctor --help should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("diagnostic") || stdout.contains("Doctor") || stdout.contains("doctor"),
        "doctor help should mention diagnostics, got: {}",
        stdout
    );
}
