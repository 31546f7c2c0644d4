//! Configuration for the AsciiDoc reader.
//!
//! - [`ReaderSettings`] - converter command, options, timeout and list keys,
//!   loaded from TOML
//!
//! See [`settings`] for the file format and lookup order.

pub mod settings;

pub use settings::{CONFIG_ENV_VAR, ReaderSettings};
