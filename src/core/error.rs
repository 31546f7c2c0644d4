//! Error handling for the AsciiDoc reader
//!
//! This module provides the reader's error type and the user-facing error
//! reporting used by the CLI. It follows two rules:
//! 1. **Strongly-typed errors** so library callers can match on failure modes
//! 2. **User-friendly messages** with a suggestion when the CLI prints them
//!
//! # Architecture
//!
//! - [`ReaderError`] - Enumerated failure cases (converter, metadata, config, I/O)
//! - [`ErrorContext`] - Wrapper that adds details and a suggestion for display
//! - [`user_friendly_error`] - Converts any [`anyhow::Error`] into an [`ErrorContext`]
//!
//! Metadata extraction itself never fails; the only errors it can return are
//! those produced by the metadata normalizer it was given.
//!
//! # Examples
//!
//! ```rust,no_run
//! use asciidoc_reader::core::{ErrorContext, ReaderError, user_friendly_error};
//!
//! let error = ReaderError::ConverterNotFound {
//!     candidates: "asciidoc, asciidoctor, asciidoc3".to_string(),
//! };
//!
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display();
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for reader operations.
///
/// # Error Categories
///
/// ## Converter
/// - [`ConverterNotFound`] - None of the candidate executables is installed
/// - [`ConverterFailed`] - The converter exited with a non-zero status
/// - [`ConverterTimeout`] - The converter did not finish in time
///
/// ## Documents
/// - [`InvalidMetadata`] - A metadata value could not be normalized
/// - [`UnsupportedFile`] - The file extension is not routed to this reader
///
/// ## Configuration and I/O
/// - [`ConfigError`] - Settings file problems
/// - [`IoError`] - Standard I/O errors from [`std::io::Error`]
/// - [`TomlError`] - Settings parse errors from [`toml::de::Error`]
/// - [`JsonError`] - Output serialization errors from [`serde_json::Error`]
///
/// [`ConverterNotFound`]: ReaderError::ConverterNotFound
/// [`ConverterFailed`]: ReaderError::ConverterFailed
/// [`ConverterTimeout`]: ReaderError::ConverterTimeout
/// [`InvalidMetadata`]: ReaderError::InvalidMetadata
/// [`UnsupportedFile`]: ReaderError::UnsupportedFile
/// [`ConfigError`]: ReaderError::ConfigError
/// [`IoError`]: ReaderError::IoError
/// [`TomlError`]: ReaderError::TomlError
/// [`JsonError`]: ReaderError::JsonError
#[derive(Error, Debug)]
pub enum ReaderError {
    /// No AsciiDoc converter executable could be found.
    ///
    /// Raised when `require_converter` is set and neither a configured
    /// command nor any of the probed candidates is available on `PATH`.
    #[error("No AsciiDoc converter found (tried: {candidates})")]
    ConverterNotFound {
        /// Comma-separated list of the executables that were probed
        candidates: String,
    },

    /// The converter ran but reported failure.
    #[error("Converter command failed: {command} (exit status {status})")]
    ConverterFailed {
        /// The full command line that was executed
        command: String,
        /// Exit status, or -1 when terminated by a signal
        status: i32,
        /// Captured standard error
        stderr: String,
    },

    /// The converter did not complete within the configured timeout.
    #[error("Converter command timed out after {seconds}s: {command}")]
    ConverterTimeout {
        /// The full command line that was executed
        command: String,
        /// Timeout that elapsed
        seconds: u64,
    },

    /// A metadata value could not be converted to its typed form.
    ///
    /// Produced by [`DefaultNormalizer`](crate::metadata::DefaultNormalizer),
    /// for example when `:date:` holds something that is not a date.
    #[error("Invalid value for metadata '{key}': {value:?} ({reason})")]
    InvalidMetadata {
        /// Lower-cased metadata key
        key: String,
        /// The raw, trimmed value from the document
        value: String,
        /// Why the value was rejected
        reason: String,
    },

    /// The file extension is not one this reader handles.
    #[error("Not an AsciiDoc file: {path}")]
    UnsupportedFile {
        /// Path of the rejected file
        path: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration error
        message: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Other error
    #[error("{message}")]
    Other {
        /// Generic error message
        message: String,
    },
}

impl Clone for ReaderError {
    fn clone(&self) -> Self {
        match self {
            Self::ConverterNotFound {
                candidates,
            } => Self::ConverterNotFound {
                candidates: candidates.clone(),
            },
            Self::ConverterFailed {
                command,
                status,
                stderr,
            } => Self::ConverterFailed {
                command: command.clone(),
                status: *status,
                stderr: stderr.clone(),
            },
            Self::ConverterTimeout {
                command,
                seconds,
            } => Self::ConverterTimeout {
                command: command.clone(),
                seconds: *seconds,
            },
            Self::InvalidMetadata {
                key,
                value,
                reason,
            } => Self::InvalidMetadata {
                key: key.clone(),
                value: value.clone(),
                reason: reason.clone(),
            },
            Self::UnsupportedFile {
                path,
            } => Self::UnsupportedFile {
                path: path.clone(),
            },
            Self::ConfigError {
                message,
            } => Self::ConfigError {
                message: message.clone(),
            },
            // io, toml and json errors are not Clone; keep kind and message
            Self::IoError(e) => Self::IoError(std::io::Error::new(e.kind(), e.to_string())),
            Self::TomlError(e) => Self::Other {
                message: format!("TOML parsing error: {e}"),
            },
            Self::JsonError(e) => Self::Other {
                message: format!("JSON serialization error: {e}"),
            },
            Self::Other {
                message,
            } => Self::Other {
                message: message.clone(),
            },
        }
    }
}

/// An error paired with optional details and a suggestion for the user.
///
/// The CLI builds one of these through [`user_friendly_error`] and prints it
/// with [`ErrorContext::display`] before exiting.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: ReaderError,
    /// What the user can try next
    pub suggestion: Option<String>,
    /// Extra explanation of the failure
    pub details: Option<String>,
}

impl ErrorContext {
    /// Wrap an error without details or suggestion.
    #[must_use]
    pub const fn new(error: ReaderError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Attach a suggestion.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Attach details.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error to stderr with terminal colors.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error into an [`ErrorContext`] suitable for CLI display.
///
/// Known [`ReaderError`] variants get a tailored suggestion. I/O and TOML
/// errors found anywhere in the chain are mapped to their reader equivalents.
/// Everything else is reported with its full cause chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    for (depth, cause) in error.chain().enumerate() {
        if let Some(reader_error) = cause.downcast_ref::<ReaderError>() {
            let mut ctx = create_error_context(reader_error.clone());
            if depth > 0 {
                // Keep the outer context ("Failed to read ...") visible
                let chain = chain_message(&error);
                ctx.details = Some(match ctx.details.take() {
                    Some(details) => format!("{chain}\n{details}"),
                    None => chain,
                });
            }
            return ctx;
        }

        if let Some(io_error) = cause.downcast_ref::<std::io::Error>() {
            let ctx = ErrorContext::new(ReaderError::Other {
                message: chain_message(&error),
            });
            return match io_error.kind() {
                std::io::ErrorKind::NotFound => ctx.with_suggestion(
                    "Check that the file or directory exists and the path is correct",
                ),
                std::io::ErrorKind::PermissionDenied => {
                    ctx.with_suggestion("Check the file permissions and ownership")
                }
                std::io::ErrorKind::InvalidData => ctx.with_suggestion(
                    "AsciiDoc sources are read as UTF-8; re-encode the file and try again",
                ),
                _ => ctx,
            };
        }

        if cause.downcast_ref::<toml::de::Error>().is_some() {
            return ErrorContext::new(ReaderError::ConfigError {
                message: chain_message(&error),
            })
            .with_suggestion("Check the TOML syntax of the settings file");
        }
    }

    ErrorContext::new(ReaderError::Other {
        message: chain_message(&error),
    })
}

fn chain_message(error: &anyhow::Error) -> String {
    let mut message = error.to_string();

    let chain: Vec<String> =
        error.chain().skip(1).map(std::string::ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    message
}

fn create_error_context(error: ReaderError) -> ErrorContext {
    let (suggestion, details): (Option<&str>, Option<String>) = match &error {
        ReaderError::ConverterNotFound {
            ..
        } => (
            Some(
                "Install asciidoctor (e.g. 'gem install asciidoctor') or set 'command' in the \
                 settings file",
            ),
            Some("Document bodies are rendered by an external converter found on PATH".to_string()),
        ),

        ReaderError::ConverterFailed {
            stderr,
            ..
        } => (
            Some("Run the converter manually on the file to see the full diagnostics"),
            Some(if stderr.trim().is_empty() {
                "The converter produced no error output".to_string()
            } else {
                stderr.trim().to_string()
            }),
        ),

        ReaderError::ConverterTimeout {
            ..
        } => (Some("Increase 'timeout_secs' in the settings file"), None),

        ReaderError::InvalidMetadata {
            key,
            ..
        } if key == "date" || key == "modified" => (
            Some("Use a date such as 2024-01-31, 2024-01-31 10:00 or 2024-01-31T10:00:00"),
            None,
        ),

        ReaderError::UnsupportedFile {
            ..
        } => (Some("Only files ending in .adoc, .asc or .asciidoc are read"), None),

        ReaderError::ConfigError {
            ..
        }
        | ReaderError::TomlError(_) => (
            Some("Check the settings file; run with --verbose to see which file was loaded"),
            None,
        ),

        ReaderError::InvalidMetadata {
            ..
        }
        | ReaderError::IoError(_)
        | ReaderError::JsonError(_)
        | ReaderError::Other {
            ..
        } => (None, None),
    };

    let mut ctx = ErrorContext::new(error);
    if let Some(suggestion) = suggestion {
        ctx = ctx.with_suggestion(suggestion);
    }
    if let Some(details) = details {
        ctx = ctx.with_details(details);
    }
    ctx
}
