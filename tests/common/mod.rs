//! Shared integration-test harness for running the `sceneschema` binary and
//! locating fixtures.

#![allow(dead_code)]

use std::path::PathBuf;
use std::process::{Command, Output};

/// Runs the built binary with `args` and collects its output.
///
/// `SCENESCHEMA_FILE` and `SCENESCHEMA_LOG_LEVEL` are cleared so the caller's
/// environment cannot change which schema is read or what is logged.
#[allow(clippy::missing_panics_doc)]
#[must_use]
pub fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_sceneschema"))
        .args(args)
        .env_remove("SCENESCHEMA_FILE")
        .env_remove("SCENESCHEMA_LOG_LEVEL")
        .env("NO_COLOR", "1")
        .output()
        .expect("failed to spawn sceneschema")
}

/// Runs the binary with an extra environment variable set.
#[allow(clippy::missing_panics_doc)]
#[must_use]
pub fn run_with_env(args: &[&str], key: &str, value: &str) -> Output {
    Command::new(env!("CARGO_BIN_EXE_sceneschema"))
        .args(args)
        .env_remove("SCENESCHEMA_LOG_LEVEL")
        .env("NO_COLOR", "1")
        .env(key, value)
        .output()
        .expect("failed to spawn sceneschema")
}

/// Returns the path to a test fixture.
#[must_use]
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

/// Fixture path as a `String`, for building argument lists.
#[must_use]
pub fn fixture(name: &str) -> String {
    fixture_path(name).display().to_string()
}

#[must_use]
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[must_use]
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
