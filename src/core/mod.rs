//! Core types for the AsciiDoc reader
//!
//! This module holds the error handling shared by every other module:
//! - [`ReaderError`] - Strongly-typed errors for library callers
//! - [`ErrorContext`] - User-facing wrapper with details and a suggestion
//! - [`user_friendly_error`] - Convert any [`anyhow::Error`] for CLI display
//!
//! Library functions that touch the filesystem or spawn the converter return
//! [`anyhow::Result`] with context naming the file involved; the typed
//! [`ReaderError`] sits at the bottom of that chain and is recovered by
//! [`user_friendly_error`] when the CLI reports the failure.

pub mod error;

pub use error::{ErrorContext, ReaderError, user_friendly_error};
