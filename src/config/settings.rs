//! Reader settings loaded from a TOML file.
//!
//! Settings control how the external converter is chosen and invoked, and
//! which metadata keys the default normalizer splits into lists.
//!
//! # Location
//!
//! The settings file is looked up in this order:
//! 1. An explicit path (the CLI's `--config` flag)
//! 2. The `ASCIIDOC_READER_CONFIG` environment variable
//! 3. `{config_dir}/asciidoc-reader/config.toml`
//!
//! A missing file is not an error; defaults are used instead.
//!
//! # Format
//!
//! ```toml
//! command = "asciidoctor"
//! options = ["-a", "sectnums"]
//! require_converter = false
//! timeout_secs = 60
//! list_keys = ["tags", "keywords", "authors"]
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;

use crate::core::ReaderError;
use crate::metadata::normalize::DEFAULT_LIST_KEYS;

/// Environment variable naming the settings file.
pub const CONFIG_ENV_VAR: &str = "ASCIIDOC_READER_CONFIG";

const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Options for reading AsciiDoc documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReaderSettings {
    /// Converter executable to use instead of the probed one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,

    /// Extra converter options, passed before `--no-header-footer`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,

    /// Fail instead of returning an empty body when no converter is available.
    #[serde(default)]
    pub require_converter: bool,

    /// Seconds to wait for the converter before giving up.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Metadata keys whose values are comma-separated lists.
    #[serde(default = "default_list_keys")]
    pub list_keys: Vec<String>,
}

const fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_list_keys() -> Vec<String> {
    DEFAULT_LIST_KEYS.iter().map(|key| (*key).to_string()).collect()
}

impl Default for ReaderSettings {
    fn default() -> Self {
        Self {
            command: None,
            options: Vec::new(),
            require_converter: false,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            list_keys: default_list_keys(),
        }
    }
}

impl ReaderSettings {
    /// Load settings from `path`, the environment, or the default location.
    ///
    /// Returns defaults when the resolved file does not exist.
    pub async fn load_with_optional(path: Option<PathBuf>) -> Result<Self> {
        let path = match path {
            Some(path) => path,
            None => match std::env::var_os(CONFIG_ENV_VAR) {
                Some(value) => PathBuf::from(value),
                None => match Self::default_path() {
                    Ok(path) => path,
                    Err(e) => {
                        tracing::debug!("No default settings location: {e}");
                        return Ok(Self::default());
                    }
                },
            },
        };

        if path.exists() {
            Self::load_from(&path).await
        } else {
            tracing::debug!("Settings file {} not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Load and validate settings from a specific file.
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;

        let settings: Self = toml::from_str(&content)
            .map_err(ReaderError::from)
            .with_context(|| format!("Failed to parse settings from {}", path.display()))?;

        settings
            .validate()
            .with_context(|| format!("Invalid settings in {}", path.display()))?;

        tracing::debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Default settings file location.
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Unable to determine configuration directory"))?;
        Ok(config_dir.join("asciidoc-reader").join("config.toml"))
    }

    /// Converter timeout as a [`Duration`].
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    fn validate(&self) -> Result<(), ReaderError> {
        if self.timeout_secs == 0 {
            return Err(ReaderError::ConfigError {
                message: "timeout_secs must be greater than zero".to_string(),
            });
        }

        if let Some(command) = &self.command
            && command.trim().is_empty()
        {
            return Err(ReaderError::ConfigError {
                message: "command must not be empty".to_string(),
            });
        }

        Ok(())
    }
}
