//! Extract metadata from AsciiDoc files.
//!
//! Directories are walked recursively and every file with an AsciiDoc
//! extension is read. Files named explicitly must have one of those
//! extensions.
//!
//! A single document prints its metadata object:
//!
//! ```json
//! {
//!   "title": "Hello",
//!   "tags": ["rust", "docs"]
//! }
//! ```
//!
//! Several documents print an object keyed by path.

use anyhow::{Context, Result};
use clap::Args;
use indexmap::IndexMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::CliConfig;
use crate::core::ReaderError;
use crate::metadata::{DefaultNormalizer, Metadata, MetadataValue};
use crate::reader::AsciiDocReader;

#[derive(Args)]
pub struct MetadataCommand {
    /// AsciiDoc files or directories to read
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<PathBuf>,
}

impl MetadataCommand {
    pub async fn execute(self, config: &CliConfig) -> Result<()> {
        let reader = AsciiDocReader::new(config.load_settings().await?);
        let normalizer = DefaultNormalizer::from_settings(reader.settings());

        let documents = collect_documents(&self.paths)?;
        tracing::debug!("Reading metadata from {} document(s)", documents.len());

        let mut results: IndexMap<String, Metadata<MetadataValue>> = IndexMap::new();
        for path in &documents {
            let metadata = reader.read_metadata(path, &normalizer).await?;
            results.insert(path.display().to_string(), metadata);
        }

        let json = match results.len() {
            1 => {
                let (_, metadata) = results.first().context("No documents read")?;
                serde_json::to_string_pretty(metadata)
            }
            _ => serde_json::to_string_pretty(&results),
        }
        .map_err(ReaderError::from)?;
        println!("{json}");
        Ok(())
    }
}

/// Expand `paths` into the AsciiDoc files to read, in a stable order.
fn collect_documents(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut documents = Vec::new();

    for path in paths {
        if path.is_dir() {
            let before = documents.len();
            for entry in WalkDir::new(path).sort_by_file_name() {
                let entry =
                    entry.with_context(|| format!("Failed to walk directory {}", path.display()))?;
                if entry.file_type().is_file() && AsciiDocReader::handles(entry.path()) {
                    documents.push(entry.into_path());
                }
            }
            if documents.len() == before {
                tracing::warn!("No AsciiDoc files found in {}", path.display());
            }
        } else {
            ensure_asciidoc(path)?;
            documents.push(path.clone());
        }
    }

    Ok(documents)
}

fn ensure_asciidoc(path: &Path) -> Result<(), ReaderError> {
    if AsciiDocReader::handles(path) {
        Ok(())
    } else {
        Err(ReaderError::UnsupportedFile {
            path: path.display().to_string(),
        })
    }
}
