#![allow(dead_code)]

use std::{fs, path::PathBuf, sync::Mutex};

use assert_cmd::Command;
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary homes live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// A fresh application home with no config and no data.
pub fn temp_home() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let home = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    home
}

/// A fresh home whose config removes the sync and payment delays and
/// disables ANSI colours.
pub fn fast_home() -> PathBuf {
    let home = temp_home();
    let config_dir = home.join("config");
    fs::create_dir_all(&config_dir).expect("create config dir");
    fs::write(
        config_dir.join("config.json"),
        r#"{
  "ui_color_enabled": false,
  "payment_delay_ms": 0,
  "sync": { "delay_ms": 0 }
}"#,
    )
    .expect("write config");
    home
}

/// The persisted ledger document under `home`.
pub fn ledger_path(home: &std::path::Path) -> PathBuf {
    home.join("data").join("payment_trackers_v3.json")
}

/// The CLI binary in script mode, rooted at `home`.
pub fn cli(home: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("pt_trackers_cli").expect("binary built");
    cmd.env("PT_TRACKERS_CLI_SCRIPT", "1")
        .env("PT_TRACKERS_HOME", home)
        .env("RUST_LOG", "off");
    cmd
}
