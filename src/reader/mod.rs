//! Reading AsciiDoc documents into pages.
//!
//! [`AsciiDocReader`] combines the two halves of reading a document:
//!
//! 1. **Body** - rendered by the external converter into a temporary file and
//!    read back. When no converter is configured or installed the body is empty.
//! 2. **Metadata** - extracted from the raw source by
//!    [`MetadataExtractor`](crate::metadata::MetadataExtractor).
//!
//! File routing is by extension: only `.asc`, `.adoc` and `.asciidoc` files
//! are handled (see [`AsciiDocReader::handles`]).
//!
//! ```rust,no_run
//! use asciidoc_reader::config::ReaderSettings;
//! use asciidoc_reader::metadata::DefaultNormalizer;
//! use asciidoc_reader::reader::AsciiDocReader;
//! use std::path::Path;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let settings = ReaderSettings::default();
//! let normalizer = DefaultNormalizer::from_settings(&settings);
//! let reader = AsciiDocReader::new(settings);
//!
//! let page = reader.read(Path::new("content/post.adoc"), &normalizer).await?;
//! println!("{:?}", page.metadata.get("title"));
//! println!("{}", page.content);
//! # Ok(())
//! # }
//! ```

use anyhow::{Context, Result};
use serde::Serialize;
use std::fmt::Debug;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::config::ReaderSettings;
use crate::converter::{self, ConverterCommand, NO_HEADER_FOOTER};
use crate::core::ReaderError;
use crate::metadata::{Metadata, MetadataExtractor, MetadataNormalizer};

const PREVIEW_CHARS: usize = 50;

/// A document read from disk: rendered body plus metadata.
#[derive(Debug, Clone, Serialize)]
pub struct Page<V> {
    /// The source file that was read
    pub source_path: PathBuf,
    /// Converter output, empty when no converter is available
    pub content: String,
    /// Title and attribute metadata in document order
    pub metadata: Metadata<V>,
}

/// Reader for AsciiDoc source files.
#[derive(Debug, Clone, Default)]
pub struct AsciiDocReader {
    settings: ReaderSettings,
}

impl AsciiDocReader {
    /// Extensions routed to this reader, without the leading dot.
    pub const FILE_EXTENSIONS: &'static [&'static str] = &["asc", "adoc", "asciidoc"];

    /// Options always passed to the converter, after the configured ones.
    pub const DEFAULT_OPTIONS: &'static [&'static str] = &[NO_HEADER_FOOTER];

    /// Create a reader with the given settings.
    #[must_use]
    pub const fn new(settings: ReaderSettings) -> Self {
        Self {
            settings,
        }
    }

    /// The settings this reader was created with.
    #[must_use]
    pub const fn settings(&self) -> &ReaderSettings {
        &self.settings
    }

    /// Whether `path` has an AsciiDoc extension (case-insensitive).
    #[must_use]
    pub fn handles(path: &Path) -> bool {
        path.extension().and_then(|ext| ext.to_str()).is_some_and(|ext| {
            Self::FILE_EXTENSIONS.iter().any(|known| known.eq_ignore_ascii_case(ext))
        })
    }

    /// The converter command to run, if any.
    ///
    /// A command set in the settings always wins over the probed converter.
    pub async fn command(&self) -> Option<String> {
        if let Some(command) = &self.settings.command {
            return Some(command.clone());
        }

        converter::detected_converter().await.map(|found| found.path.display().to_string())
    }

    /// Render the body of `path` with the converter.
    ///
    /// Returns an empty string, with a warning, when no converter is available,
    /// or [`ReaderError::ConverterNotFound`] if the settings require one.
    pub async fn render(&self, path: &Path) -> Result<String> {
        let Some(command) = self.command().await else {
            if self.settings.require_converter {
                return Err(ReaderError::ConverterNotFound {
                    candidates: converter::CANDIDATES.join(", "),
                }
                .into());
            }
            tracing::warn!(
                target: "reader",
                "No AsciiDoc converter available (tried: {}); {} will have an empty body",
                converter::CANDIDATES.join(", "),
                path.display()
            );
            return Ok(String::new());
        };

        tracing::debug!(target: "reader", "Reading: {}", path.display());

        // Closed handle, file removed on drop; the converter writes to it by name
        let output_path = tempfile::Builder::new()
            .prefix("asciidoc-reader-")
            .suffix(".html")
            .tempfile()
            .context("Failed to create temporary output file")?
            .into_temp_path();

        let options: Vec<String> = self
            .settings
            .options
            .iter()
            .cloned()
            .chain(Self::DEFAULT_OPTIONS.iter().map(|option| (*option).to_string()))
            .collect();

        let output = ConverterCommand::render(command, &options, &output_path, path)
            .with_timeout(Some(self.settings.timeout()))
            .with_context(path.display().to_string())
            .execute()
            .await
            .with_context(|| format!("Failed to render {}", path.display()))?;

        if !output.stderr.trim().is_empty() {
            tracing::warn!(target: "converter", "{}: {}", path.display(), output.stderr.trim());
        }

        let content = fs::read(&output_path)
            .await
            .with_context(|| format!("Failed to read converter output for {}", path.display()))?;

        Ok(String::from_utf8_lossy(&content).into_owned())
    }

    /// Extract title and attribute metadata from `path` without rendering.
    pub async fn read_metadata<N>(&self, path: &Path, normalizer: &N) -> Result<Metadata<N::Value>>
    where
        N: MetadataNormalizer + ?Sized,
        N::Value: Debug,
        N::Error: std::error::Error + Send + Sync + 'static,
    {
        let source = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let metadata = MetadataExtractor::extract_str(&source, normalizer)
            .with_context(|| format!("Failed to read metadata from {}", path.display()))?;

        tracing::debug!(target: "reader", "Found metadata: {:?}", metadata);
        Ok(metadata)
    }

    /// Render `path` and extract its metadata.
    pub async fn read<N>(&self, path: &Path, normalizer: &N) -> Result<Page<N::Value>>
    where
        N: MetadataNormalizer + ?Sized,
        N::Value: Debug,
        N::Error: std::error::Error + Send + Sync + 'static,
    {
        let content = self.render(path).await?;
        let metadata = self.read_metadata(path, normalizer).await?;

        tracing::debug!(
            target: "reader",
            "Got content (showing first {} chars): {}",
            PREVIEW_CHARS,
            preview(&content)
        );

        Ok(Page {
            source_path: path.to_path_buf(),
            content,
            metadata,
        })
    }
}

fn preview(content: &str) -> String {
    match content.char_indices().nth(PREVIEW_CHARS) {
        Some((end, _)) => format!("{}...", &content[..end]),
        None => content.to_string(),
    }
}
