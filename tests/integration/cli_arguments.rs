//! The `ezbx` binary's handling of bad invocations. None of these reach a prompt.

use super::test_utils::write_file;
use std::process::Command;
use tempfile::TempDir;

fn ezbx(home: &TempDir) -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_ezbx"));
    command
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join("config"))
        .env("NO_COLOR", "1")
        .env_remove("EZBX_LOG");
    command
}

#[test]
fn missing_profile_argument_exits_with_argument_error() {
    let home = TempDir::new().unwrap();
    let output = ezbx(&home).output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ArgumentError"), "stderr: {}", stderr);
    assert!(stderr.contains("bx-config.json"));
}

#[test]
fn nonexistent_profile_file_exits_with_load_error() {
    let home = TempDir::new().unwrap();
    let missing = home.path().join("absent.json");
    let output = ezbx(&home).arg(&missing).output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to load config file"), "stderr: {}", stderr);
}

#[test]
fn missing_settings_file_exits_before_loading_profiles() {
    let home = TempDir::new().unwrap();
    let profiles = write_file(home.path(), "bx-config.json", super::test_utils::PROFILES_JSON);
    let output = ezbx(&home)
        .arg(&profiles)
        .arg("--settings")
        .arg(home.path().join("missing.toml"))
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Settings file not found"), "stderr: {}", stderr);
}
