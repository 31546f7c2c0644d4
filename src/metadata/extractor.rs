//! Extract title and attribute metadata from AsciiDoc source lines.
//!
//! The scanner makes a single forward pass over the document, keeping only the
//! previous line as state. Two things are recognized:
//!
//! - **Title**, declared either with a `= ` prefix or with a Setext-style
//!   underline of `=` characters as long as the trimmed line above it.
//!   The first title found wins.
//! - **Attribute lines** matching `^:\w+:`, e.g. `:author: Jane Doe`. The key
//!   is lower-cased, the value may itself contain colons. A later line with the
//!   same key overwrites the earlier value, and that includes `:title:`.
//!
//! ```rust
//! use asciidoc_reader::metadata::{IdentityNormalizer, MetadataExtractor};
//!
//! let source = "= Hello World\n:Author: Jane Doe\n:date: 2024-01-01T10:00:00\n\nBody.\n";
//! let metadata = MetadataExtractor::extract_str(source, &IdentityNormalizer).unwrap();
//!
//! assert_eq!(metadata["title"], "Hello World");
//! assert_eq!(metadata["author"], "Jane Doe");
//! assert_eq!(metadata["date"], "2024-01-01T10:00:00");
//! ```

use indexmap::IndexMap;
use regex::Regex;
use std::io::{self, BufRead};
use std::sync::OnceLock;

use super::normalize::MetadataNormalizer;
use crate::core::ReaderError;

/// Ordered metadata map, in order of first appearance of each key.
pub type Metadata<V> = IndexMap<String, V>;

/// Key under which the document title is stored.
pub const TITLE_KEY: &str = "title";

const TITLE_PREFIX: &str = "= ";

fn attribute_line() -> &'static Regex {
    static ATTRIBUTE_LINE: OnceLock<Regex> = OnceLock::new();
    ATTRIBUTE_LINE.get_or_init(|| Regex::new(r"^:\w+:").expect("attribute line pattern is valid"))
}

/// Metadata extractor for AsciiDoc sources.
///
/// Performs no I/O of its own apart from [`extract_reader`], and never fails on
/// its own account: the only errors it returns come from the normalizer.
///
/// Line breaks are `\n`, `\r\n` or a lone `\r`.
///
/// [`extract_reader`]: MetadataExtractor::extract_reader
pub struct MetadataExtractor;

impl MetadataExtractor {
    /// Extract metadata from lines given in file order.
    ///
    /// Lines may keep their terminators; all trimming happens here. Every
    /// recognized key, `title` included, goes through `normalizer` before it is
    /// stored. A normalizer error stops the scan and is returned unchanged.
    pub fn extract<I, S, N>(lines: I, normalizer: &N) -> Result<Metadata<N::Value>, N::Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        N: MetadataNormalizer + ?Sized,
    {
        let mut metadata = Metadata::new();
        let mut previous: Option<S> = None;

        for line in lines {
            let text = line.as_ref();

            if !metadata.contains_key(TITLE_KEY) {
                let previous_text = previous.as_ref().map_or("", AsRef::as_ref);
                if let Some(title) = title_candidate(text, previous_text) {
                    tracing::trace!("Title candidate: {title:?}");
                    let value = normalizer.normalize(TITLE_KEY, title)?;
                    metadata.insert(TITLE_KEY.to_string(), value);
                }
            }

            if let Some((key, value)) = attribute(text) {
                let value = normalizer.normalize(&key, value)?;
                metadata.insert(key, value);
            }

            previous = Some(line);
        }

        Ok(metadata)
    }

    /// Extract metadata from a whole document held in memory.
    ///
    /// The content is split after each line break with the terminator kept,
    /// exactly as when reading the file line by line.
    pub fn extract_str<N>(content: &str, normalizer: &N) -> Result<Metadata<N::Value>, N::Error>
    where
        N: MetadataNormalizer + ?Sized,
    {
        Self::extract(split_lines(content), normalizer)
    }

    /// Extract metadata from a buffered reader, one line at a time.
    ///
    /// Read failures, invalid UTF-8 included, are reported as
    /// [`ReaderError::IoError`]. Normalizer failures are reported as the
    /// normalizer's own error. Both can be recovered with `downcast_ref`.
    pub fn extract_reader<R, N>(mut reader: R, normalizer: &N) -> anyhow::Result<Metadata<N::Value>>
    where
        R: BufRead,
        N: MetadataNormalizer + ?Sized,
        N::Error: std::error::Error + Send + Sync + 'static,
    {
        let mut failure: Option<io::Error> = None;
        let lines = std::iter::from_fn(|| {
            let mut buf = Vec::new();
            read_line(&mut reader, &mut buf)
                .and_then(|read| match read {
                    0 => Ok(None),
                    _ => String::from_utf8(buf)
                        .map(Some)
                        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e)),
                })
                .unwrap_or_else(|e| {
                    failure = Some(e);
                    None
                })
        });

        let metadata = Self::extract(lines, normalizer);
        if let Some(e) = failure {
            return Err(ReaderError::from(e).into());
        }
        Ok(metadata?)
    }
}

/// Split `content` after each `\n`, `\r\n` or lone `\r`, keeping terminators.
fn split_lines(content: &str) -> impl Iterator<Item = &str> {
    let mut rest = content;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        let end = match rest.find(['\r', '\n']) {
            Some(i) if rest[i..].starts_with("\r\n") => i + 2,
            Some(i) => i + 1,
            None => rest.len(),
        };
        let (line, tail) = rest.split_at(end);
        rest = tail;
        Some(line)
    })
}

/// Append the next line of `reader` to `line`, terminator included.
///
/// Like [`BufRead::read_until`] but ends a line at `\n`, `\r\n` or a lone
/// `\r`. Returns the number of bytes appended, 0 at end of input.
fn read_line<R: BufRead>(reader: &mut R, line: &mut Vec<u8>) -> io::Result<usize> {
    let start = line.len();
    loop {
        let available = reader.fill_buf()?;
        if available.is_empty() {
            break;
        }

        match available.iter().position(|b| *b == b'\n' || *b == b'\r') {
            Some(i) => {
                let carriage_return = available[i] == b'\r';
                line.extend_from_slice(&available[..=i]);
                reader.consume(i + 1);
                // The `\n` of a `\r\n` pair may start the next buffer
                if carriage_return && reader.fill_buf()?.first() == Some(&b'\n') {
                    line.push(b'\n');
                    reader.consume(1);
                }
                break;
            }
            None => {
                let len = available.len();
                line.extend_from_slice(available);
                reader.consume(len);
            }
        }
    }
    Ok(line.len() - start)
}

/// Title declared by `line`, given the raw line before it.
///
/// Returns `None` when the line declares nothing or the candidate is empty.
fn title_candidate<'a>(line: &'a str, previous: &'a str) -> Option<&'a str> {
    let candidate = if let Some(rest) = line.strip_prefix(TITLE_PREFIX) {
        rest.trim()
    } else if is_underline_for(line, previous) {
        previous.trim()
    } else {
        return None;
    };

    (!candidate.is_empty()).then_some(candidate)
}

/// Setext-style underline: only `=`, as many as the trimmed previous line.
fn is_underline_for(line: &str, previous: &str) -> bool {
    let underline = line.trim();
    !underline.is_empty()
        && underline.chars().all(|c| c == '=')
        && underline.chars().count() == previous.trim().chars().count()
}

/// Split an attribute line into its lower-cased key and trimmed value.
fn attribute(line: &str) -> Option<(String, &str)> {
    if !attribute_line().is_match(line) {
        return None;
    }

    // A match guarantees the leading empty segment, the key and a remainder
    let mut parts = line.splitn(3, ':');
    parts.next();
    let key = parts.next()?.trim().to_lowercase();
    let value = parts.next()?.trim();
    Some((key, value))
}
