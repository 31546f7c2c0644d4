//! Command-line interface for asciidoc-reader.
//!
//! # Available Commands
//!
//! - `metadata` - Extract title and attribute metadata from documents
//! - `read` - Render a document and extract its metadata
//! - `probe` - Report which AsciiDoc converter is installed
//!
//! All commands print JSON to stdout. Logs go to stderr.
//!
//! # Global Options
//!
//! - `--verbose` - Enable debug output
//! - `--quiet` - Only log errors
//! - `--config` - Path to a settings file
//!
//! # Example
//!
//! ```bash
//! asciidoc-reader metadata content/posts
//! asciidoc-reader read content/posts/hello.adoc --verbose
//! asciidoc-reader probe
//! ```

mod metadata;
mod probe;
mod read;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::ReaderSettings;

/// Per-invocation settings derived from the global flags.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Filter directive for the log subscriber, overridden by `RUST_LOG`
    pub log_level: String,

    /// Settings file given with `--config`
    pub config_path: Option<PathBuf>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            config_path: None,
        }
    }
}

impl CliConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the stderr log subscriber.
    ///
    /// Does nothing if a subscriber is already installed.
    pub fn init_logging(&self) {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            EnvFilter::new(&self.log_level)
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }

    /// Load reader settings from `--config`, the environment or the default location.
    pub async fn load_settings(&self) -> Result<ReaderSettings> {
        ReaderSettings::load_with_optional(self.config_path.clone()).await
    }
}

#[derive(Parser)]
#[command(
    name = "asciidoc-reader",
    about = "Extract metadata from AsciiDoc documents and render them with an external converter",
    version,
    long_about = "asciidoc-reader reads AsciiDoc sources, extracting the document title and \
                  `:key: value` attributes, and renders the body with asciidoc, asciidoctor \
                  or asciidoc3."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to the settings file
    #[arg(short, long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract metadata from AsciiDoc files or directories
    Metadata(metadata::MetadataCommand),

    /// Render a document and extract its metadata
    Read(read::ReadCommand),

    /// Show the detected AsciiDoc converter
    Probe(probe::ProbeCommand),
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        self.execute_with_config(config).await
    }

    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "info"
        };

        CliConfig {
            log_level: log_level.to_string(),
            config_path: self.config.clone(),
        }
    }

    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        config.init_logging();

        match self.command {
            Commands::Metadata(cmd) => cmd.execute(&config).await,
            Commands::Read(cmd) => cmd.execute(&config).await,
            Commands::Probe(cmd) => cmd.execute().await,
        }
    }
}
