//! Integration test suite for asciidoc-reader
//!
//! Drives the `asciidoc-reader` binary end to end.
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! - **metadata**: `metadata` command over files and directories
//! - **read**: `read` command with a stand-in converter
//! - **probe**: `probe` command and global flags
//! - **settings**: settings file lookup through `--config` and the environment

mod metadata;
mod probe;
mod read;
mod settings;

use assert_cmd::Command;
use asciidoc_reader::config::CONFIG_ENV_VAR;
use std::path::Path;

/// The binary with settings isolated to `dir`.
///
/// Points `--config` at `dir/config.toml`, which tests may or may not create.
pub fn reader_cmd(dir: &Path) -> Command {
    let mut cmd = bare_cmd();
    cmd.env_remove(CONFIG_ENV_VAR).arg("--config").arg(dir.join("config.toml"));
    cmd
}

/// The binary without `--config`, inheriting the settings environment.
pub fn bare_cmd() -> Command {
    let mut cmd = Command::cargo_bin("asciidoc-reader").unwrap();
    cmd.env_remove("RUST_LOG").env("NO_COLOR", "1");
    cmd
}
