//! asciidoc-reader - metadata extraction and rendering for AsciiDoc documents
//!
//! Reads AsciiDoc source files for static site generators: the document body
//! is rendered by an external converter (`asciidoc`, `asciidoctor` or
//! `asciidoc3`) and metadata is extracted from the raw source.
//!
//! # Metadata
//!
//! Two kinds of lines carry metadata:
//!
//! - **Title**: the first `= Title` line, or a line underlined by `=`
//!   characters of the same length (Setext style)
//! - **Attributes**: `:key: value` lines anywhere in the document; keys are
//!   lower-cased and later lines overwrite earlier ones
//!
//! Every value passes through a [`MetadataNormalizer`](metadata::MetadataNormalizer)
//! before it is stored, so callers decide how raw strings become typed values.
//!
//! ```rust
//! use asciidoc_reader::metadata::{DefaultNormalizer, MetadataExtractor, MetadataValue};
//!
//! let source = "My Post\n=======\n:tags: rust, docs\n\nBody.\n";
//! let metadata = MetadataExtractor::extract_str(source, &DefaultNormalizer::default()).unwrap();
//!
//! assert_eq!(metadata["title"], MetadataValue::Text("My Post".into()));
//! assert_eq!(metadata["tags"], MetadataValue::List(vec!["rust".into(), "docs".into()]));
//! ```
//!
//! # Core Modules
//!
//! - [`metadata`] - Title and attribute extraction, value normalization
//! - [`reader`] - Reads a file into a [`Page`](reader::Page)
//! - [`converter`] - Converter discovery and invocation
//! - [`config`] - Reader settings (`config.toml`)
//! - [`core`] - Error types and user-facing error formatting
//! - [`cli`] - Command-line interface

pub mod cli;
pub mod config;
pub mod converter;
pub mod core;
pub mod metadata;
pub mod reader;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
