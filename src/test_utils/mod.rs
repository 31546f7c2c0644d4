//! Test utilities for asciidoc-reader
//!
//! Shared by the unit tests inside the crate and the `unit`/`integration`
//! test targets (through the `test-utils` feature).

use std::path::{Path, PathBuf};
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has any effect. Uses `level` when given, otherwise
/// `RUST_LOG`; with neither, logging stays off.
///
/// ```bash
/// RUST_LOG=converter=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true) // Show targets like "converter"
            .with_thread_ids(false)
            .with_ansi(true)
            .try_init();
    });
}

/// Write an AsciiDoc document to `dir/name` and return its path.
///
/// Parent directories are created as needed.
pub fn write_document(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .unwrap_or_else(|e| panic!("Failed to create {}: {e}", parent.display()));
    }
    std::fs::write(&path, content)
        .unwrap_or_else(|e| panic!("Failed to write {}: {e}", path.display()));
    path
}

/// Write a shell script that stands in for an AsciiDoc converter.
///
/// Run as `sh <script> <options...> -o <output> <source>`, it writes `html`
/// to the output file. Pass the script path as the first configured option
/// with `command = "sh"`.
#[cfg(unix)]
pub fn write_fake_converter(dir: &Path, html: &str) -> PathBuf {
    let script = format!(
        "#!/bin/sh\nwhile [ \"$1\" != \"-o\" ]; do shift; done\nprintf '%s' '{html}' > \"$2\"\n"
    );
    write_document(dir, "fake-asciidoc.sh", &script)
}

/// Write an executable shell script to `dir/name` and return its path.
#[cfg(unix)]
pub fn write_executable(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = write_document(dir, name, &format!("#!/bin/sh\n{body}\n"));
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
        .unwrap_or_else(|e| panic!("Failed to make {} executable: {e}", path.display()));
    path
}
