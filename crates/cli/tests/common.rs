// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

// Allow unused items: test helpers are shared across multiple test binaries,
// and not every test file uses every helper.
#![allow(dead_code)]
#![allow(unused_imports)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;

pub use predicates::prelude::*;
pub use similar_asserts::assert_eq;
pub use tempfile::TempDir;

/// `dl` with a fixed actor and no ambient logging or color.
pub fn dl() -> Command {
    let mut cmd = cargo_bin_cmd!("dl");
    cmd.env("DL_ACTOR", "tester")
        .env("NO_COLOR", "1")
        .env_remove("DL_LOG")
        .env_remove("COLOR");
    cmd
}

/// Helper to create an initialized temp directory
pub fn init_temp() -> TempDir {
    let temp = TempDir::new().unwrap();
    dl().arg("init")
        .arg("--prefix")
        .arg("test")
        .current_dir(temp.path())
        .assert()
        .success();
    temp
}

/// Helper to create a decision and return its ID
pub fn create_decision(temp: &TempDir, title: &str, decision_type: &str) -> String {
    let output = dl()
        .args(["new", title, "-t", decision_type, "-o", "id"])
        .current_dir(temp.path())
        .output()
        .unwrap();
    assert!(output.status.success(), "{:?}", output);
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// Run `dl <args>` in `temp` and parse stdout as JSON.
pub fn json(temp: &TempDir, args: &[&str]) -> serde_json::Value {
    let output = dl()
        .args(args)
        .current_dir(temp.path())
        .output()
        .unwrap();
    assert!(output.status.success(), "{:?}", output);
    serde_json::from_slice(&output.stdout).unwrap()
}

/// Run `dl <args>` in `temp` and return its trimmed stdout.
pub fn stdout(temp: &TempDir, args: &[&str]) -> String {
    let output = dl()
        .args(args)
        .current_dir(temp.path())
        .output()
        .unwrap();
    assert!(output.status.success(), "{:?}", output);
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}
