//! Metadata value normalization.
//!
//! The extractor hands every recognized `(key, raw_value)` pair to a
//! [`MetadataNormalizer`] and stores whatever comes back. This keeps typing
//! decisions (dates, tag lists, plain strings) out of the scanner.
//!
//! Three normalizers are available:
//! - [`DefaultNormalizer`] - dates become [`MetadataValue::Date`], tag-like keys
//!   become [`MetadataValue::List`], everything else stays text
//! - [`IdentityNormalizer`] - keeps the raw string, cannot fail
//! - any closure `Fn(&str, &str) -> Result<V, E>`
//!
//! ```rust
//! use asciidoc_reader::metadata::{DefaultNormalizer, MetadataNormalizer, MetadataValue};
//!
//! let normalizer = DefaultNormalizer::default();
//! let tags = normalizer.normalize("tags", "rust, asciidoc").unwrap();
//! assert_eq!(tags, MetadataValue::List(vec!["rust".into(), "asciidoc".into()]));
//! ```

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::convert::Infallible;
use std::fmt;

use crate::config::ReaderSettings;
use crate::core::ReaderError;

/// Converts a raw metadata string into a typed value.
///
/// Implementations are called once per recognized key, `title` included,
/// in document order. Errors are returned to the caller of the extractor
/// untouched.
pub trait MetadataNormalizer {
    /// The normalized value stored in the metadata map.
    type Value;
    /// Failure type for values that cannot be normalized.
    type Error;

    /// Normalize `raw_value` found under the lower-cased `key`.
    fn normalize(&self, key: &str, raw_value: &str) -> Result<Self::Value, Self::Error>;
}

impl<F, V, E> MetadataNormalizer for F
where
    F: Fn(&str, &str) -> Result<V, E>,
{
    type Value = V;
    type Error = E;

    fn normalize(&self, key: &str, raw_value: &str) -> Result<V, E> {
        self(key, raw_value)
    }
}

/// Keeps every value as the raw string.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityNormalizer;

impl MetadataNormalizer for IdentityNormalizer {
    type Value = String;
    type Error = Infallible;

    fn normalize(&self, _key: &str, raw_value: &str) -> Result<String, Infallible> {
        Ok(raw_value.to_string())
    }
}

/// A typed metadata value produced by [`DefaultNormalizer`].
///
/// Serializes untagged: text as a JSON string, lists as arrays of strings and
/// dates as ISO-8601 strings (`2024-01-01T10:00:00`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum MetadataValue {
    /// Plain string value
    Text(String),
    /// Delimited list, items trimmed, empty items dropped
    List(Vec<String>),
    /// Date or date-time without a time zone
    Date(NaiveDateTime),
}

impl fmt::Display for MetadataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => write!(f, "{text}"),
            Self::List(items) => write!(f, "{}", items.join(", ")),
            Self::Date(date) => write!(f, "{}", date.format("%Y-%m-%dT%H:%M:%S")),
        }
    }
}

/// Keys that are always parsed as dates.
pub const DATE_KEYS: &[&str] = &["date", "modified"];

/// Keys split into lists unless settings say otherwise.
pub const DEFAULT_LIST_KEYS: &[&str] = &["tags", "keywords", "authors"];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Host-style normalizer for static-site metadata.
///
/// - `date` and `modified` are parsed into [`MetadataValue::Date`]
/// - keys in `list_keys` become [`MetadataValue::List`]; `authors` is split on
///   `;` when the value contains one, every other list on `,`
/// - all remaining keys, `title` included, are kept as [`MetadataValue::Text`]
#[derive(Debug, Clone)]
pub struct DefaultNormalizer {
    list_keys: Vec<String>,
}

impl Default for DefaultNormalizer {
    fn default() -> Self {
        Self {
            list_keys: DEFAULT_LIST_KEYS.iter().map(|key| (*key).to_string()).collect(),
        }
    }
}

impl DefaultNormalizer {
    /// Create a normalizer that splits the given keys into lists.
    pub fn with_list_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            list_keys: keys.into_iter().map(|key| key.into().to_lowercase()).collect(),
        }
    }

    /// Create a normalizer from the reader settings.
    #[must_use]
    pub fn from_settings(settings: &ReaderSettings) -> Self {
        Self::with_list_keys(settings.list_keys.iter().cloned())
    }

    fn is_list_key(&self, key: &str) -> bool {
        self.list_keys.iter().any(|candidate| candidate == key)
    }
}

impl MetadataNormalizer for DefaultNormalizer {
    type Value = MetadataValue;
    type Error = ReaderError;

    fn normalize(&self, key: &str, raw_value: &str) -> Result<MetadataValue, ReaderError> {
        if DATE_KEYS.contains(&key) {
            return parse_date(raw_value).map(MetadataValue::Date).ok_or_else(|| {
                ReaderError::InvalidMetadata {
                    key: key.to_string(),
                    value: raw_value.to_string(),
                    reason: "unrecognized date format".to_string(),
                }
            });
        }

        if self.is_list_key(key) {
            let separator = if key == "authors" && raw_value.contains(';') {
                ';'
            } else {
                ','
            };
            return Ok(MetadataValue::List(split_list(raw_value, separator)));
        }

        Ok(MetadataValue::Text(raw_value.to_string()))
    }
}

/// Parse the date formats accepted in `:date:` and `:modified:` attributes.
///
/// RFC 3339 values keep their wall-clock time; the offset is dropped.
#[must_use]
pub fn parse_date(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.naive_local());
    }

    for format in DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, format) {
            return Some(parsed);
        }
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

fn split_list(value: &str, separator: char) -> Vec<String> {
    value
        .split(separator)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
