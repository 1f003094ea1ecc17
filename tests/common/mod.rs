//! Shared integration-test helpers: fixture lookup and running the
//! `themecfg` binary to completion.

#![allow(dead_code)]

use std::path::PathBuf;
use std::process::{Command, Output};

/// Returns the path to a test fixture.
#[must_use]
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

/// Runs the `themecfg` binary with `args` and waits for it to exit.
///
/// Logging is pinned to `warn` so output does not depend on the caller's
/// environment.
#[allow(clippy::missing_panics_doc)]
pub fn spawn_command(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_themecfg"))
        .args(args)
        .env_remove("THEMECFG_COLOR")
        .env_remove("THEMECFG_LOG_FORMAT")
        .env("THEMECFG_LOG_LEVEL", "warn")
        .env("NO_COLOR", "1")
        .output()
        .expect("failed to run themecfg")
}

/// Fixture path as a `String`, for use in argument lists.
#[allow(clippy::missing_panics_doc)]
pub fn fixture_arg(name: &str) -> String {
    fixture_path(name)
        .to_str()
        .expect("non-UTF-8 fixture path")
        .to_string()
}
