//! Shared test harness for dcmp-cli integration tests.
//!
//! Runs the compiled `dcmp` binary with a pinned environment so color and
//! logging settings of the host do not leak into the output.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

/// Captured output from running a command.
pub struct CommandResult {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

/// Path to the compiled `dcmp` binary.
pub fn dcmp_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_dcmp"))
}

/// Run `dcmp` in `dir` with the given arguments and extra environment.
pub fn dcmp_env(dir: &Path, args: &[&str], env: &[(&str, &str)]) -> CommandResult {
    let mut cmd = Command::new(dcmp_bin());
    cmd.args(args)
        .current_dir(dir)
        .env_remove("NO_COLOR")
        .env_remove("DCMP_NO_COLOR")
        .env_remove("DCMP_COLOR")
        .env_remove("DCMP_COLORS")
        .env_remove("RUST_LOG");
    for (key, value) in env {
        cmd.env(key, value);
    }
    let output = cmd.output().expect("failed to run dcmp");
    CommandResult {
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        exit_code: output.status.code().unwrap_or(-1),
    }
}

/// Run `dcmp` in `dir` with the given arguments.
pub fn dcmp(dir: &Path, args: &[&str]) -> CommandResult {
    dcmp_env(dir, args, &[])
}

/// Create a temp dir holding `a.txt` and `b.txt`.
pub fn setup_pair(before: &str, after: &str) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("a.txt"), before).unwrap();
    std::fs::write(dir.path().join("b.txt"), after).unwrap();
    dir
}
