//! External AsciiDoc converter discovery and invocation.
//!
//! Body rendering is delegated to whichever of [`CANDIDATES`] is installed.
//! A candidate counts as available when it resolves on `PATH` and prints
//! something for `--help`.
//!
//! Probing spawns processes, so the result for the default candidates is
//! computed once per process by [`detected_converter`] and reused afterwards.
//! [`probe_converter`] runs the same check uncached for an arbitrary list.
//!
//! ```rust,no_run
//! use asciidoc_reader::converter;
//!
//! # async fn example() {
//! match converter::detected_converter().await {
//!     Some(found) => println!("using {} at {}", found.name, found.path.display()),
//!     None => println!("no converter installed"),
//! }
//! # }
//! ```

pub mod command;

pub use command::{ConverterCommand, ConverterOutput, NO_HEADER_FOOTER};

use serde::Serialize;
use std::path::PathBuf;
use tokio::sync::OnceCell;

/// Converter executables, in order of preference.
pub const CANDIDATES: &[&str] = &["asciidoc", "asciidoctor", "asciidoc3"];

/// An installed converter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Converter {
    /// Candidate name, e.g. `asciidoctor`
    pub name: String,
    /// Resolved executable path
    pub path: PathBuf,
}

static DETECTED: OnceCell<Option<Converter>> = OnceCell::const_new();

/// Find the first usable converter among `candidates`.
///
/// Not cached; see [`detected_converter`] for the memoized default probe.
pub async fn probe_converter(candidates: &[&str]) -> Option<Converter> {
    for name in candidates {
        let path = match which::which(name) {
            Ok(path) => path,
            Err(_) => {
                tracing::trace!(target: "converter", "{} not found on PATH", name);
                continue;
            }
        };

        match ConverterCommand::help(path.display().to_string()).execute().await {
            Ok(output) if !output.stdout.trim().is_empty() => {
                tracing::debug!(target: "converter", "Using command: '{}'", name);
                return Some(Converter {
                    name: (*name).to_string(),
                    path,
                });
            }
            Ok(_) => {
                tracing::debug!(target: "converter", "{} printed no help, skipping", name);
            }
            Err(e) => {
                tracing::debug!(target: "converter", "{} --help failed: {:#}", name, e);
            }
        }
    }

    None
}

/// The converter found among [`CANDIDATES`], probed at most once.
pub async fn detected_converter() -> Option<&'static Converter> {
    DETECTED.get_or_init(|| probe_converter(CANDIDATES)).await.as_ref()
}

/// Whether any converter from [`CANDIDATES`] is installed.
pub async fn converter_available() -> bool {
    detected_converter().await.is_some()
}
