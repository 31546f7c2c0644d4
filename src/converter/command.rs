//! Builder for running the external AsciiDoc converter
//!
//! Every converter invocation goes through [`ConverterCommand`], which takes
//! care of output capture, timeouts, logging and turning failures into
//! [`ReaderError`] values.

use anyhow::{Context, Result};
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;

use crate::core::ReaderError;

/// Option that makes the converter emit only the document body.
pub const NO_HEADER_FOOTER: &str = "--no-header-footer";

/// Fluent builder for a single converter invocation.
///
/// # Examples
///
/// ```rust,no_run
/// use asciidoc_reader::converter::ConverterCommand;
/// use std::path::Path;
///
/// # async fn example() -> anyhow::Result<()> {
/// let output = ConverterCommand::render(
///     "asciidoctor",
///     &["--no-header-footer".to_string()],
///     Path::new("/tmp/out.html"),
///     Path::new("post.adoc"),
/// )
/// .with_context("post.adoc")
/// .execute()
/// .await?;
/// println!("{}", output.stderr);
/// # Ok(())
/// # }
/// ```
///
/// # Default Configuration
///
/// - **Timeout**: 5 minutes
/// - **Output capture**: stdout and stderr are captured and decoded as UTF-8
///   (invalid sequences replaced)
pub struct ConverterCommand {
    program: String,

    args: Vec<String>,

    timeout_duration: Option<Duration>,

    context: Option<String>,
}

impl ConverterCommand {
    /// Start building a command for `program`.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            // Large documents with diagrams can be slow to render
            timeout_duration: Some(Duration::from_secs(300)),
            context: None,
        }
    }

    /// Add one argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Add several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set or clear the timeout.
    pub const fn with_timeout(mut self, duration: Option<Duration>) -> Self {
        self.timeout_duration = duration;
        self
    }

    /// Label used in log messages, usually the document being rendered.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// The command line as it will be logged and reported in errors.
    #[must_use]
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Run the command and wait for it to finish.
    ///
    /// A non-zero exit status becomes [`ReaderError::ConverterFailed`] and an
    /// elapsed timeout becomes [`ReaderError::ConverterTimeout`]. Warnings the
    /// converter prints on success are left in [`ConverterOutput::stderr`].
    pub async fn execute(self) -> Result<ConverterOutput> {
        let start = std::time::Instant::now();
        let command_line = self.command_line();
        let label = self.context.as_deref().unwrap_or(&self.program);

        tracing::debug!(target: "converter", "({}) Running: {}", label, command_line);

        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let output_future = cmd.output();
        let output = if let Some(duration) = self.timeout_duration {
            match timeout(duration, output_future).await {
                Ok(result) => result.with_context(|| format!("Failed to execute {command_line}"))?,
                Err(_) => {
                    tracing::warn!(
                        target: "converter",
                        "({}) Timed out after {} seconds: {}",
                        label,
                        duration.as_secs(),
                        command_line
                    );
                    return Err(ReaderError::ConverterTimeout {
                        command: command_line,
                        seconds: duration.as_secs(),
                    }
                    .into());
                }
            }
        } else {
            output_future.await.with_context(|| format!("Failed to execute {command_line}"))?
        };

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !output.status.success() {
            tracing::debug!(
                target: "converter",
                "({}) Exited with status {:?}",
                label,
                output.status.code()
            );
            return Err(ReaderError::ConverterFailed {
                command: command_line,
                status: output.status.code().unwrap_or(-1),
                stderr,
            }
            .into());
        }

        let elapsed = start.elapsed();
        if elapsed.as_millis() > 100 {
            let millis = elapsed.as_millis();
            tracing::debug!(target: "converter::perf", "({}) took {}ms", label, millis);
        }

        Ok(ConverterOutput {
            stdout,
            stderr,
        })
    }
}

/// Captured output of a successful converter run.
#[derive(Debug, Clone)]
pub struct ConverterOutput {
    /// Standard output
    pub stdout: String,
    /// Standard error; converters print warnings here even on success
    pub stderr: String,
}

// Convenience builders for the two invocations the reader needs

impl ConverterCommand {
    /// `<program> --help`, used to check that a converter actually runs.
    pub fn help(program: impl Into<String>) -> Self {
        Self::new(program).arg("--help").with_timeout(Some(Duration::from_secs(30)))
    }

    /// `<program> <options...> -o <output> <source>`.
    pub fn render(
        program: impl Into<String>,
        options: &[String],
        output: &Path,
        source: &Path,
    ) -> Self {
        Self::new(program)
            .args(options.iter().cloned())
            .arg("-o")
            .arg(output.display().to_string())
            .arg(source.display().to_string())
    }
}
