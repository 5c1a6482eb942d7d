//! Common test utilities shared across integration tests.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Path to the csvmodel binary built for this test run
pub fn csvmodel_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_csvmodel"))
}

/// Run the csvmodel binary in the specified directory
pub fn run_csvmodel_in_dir(dir: &Path, args: &[&str]) -> Output {
    Command::new(csvmodel_binary())
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute csvmodel binary")
}

/// Write `content` to `name` inside `dir`
pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).expect("Failed to write test file");
    path
}
