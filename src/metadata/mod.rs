//! Metadata extraction from AsciiDoc sources.
//!
//! This module finds the document title and `:key: value` attribute lines in
//! raw AsciiDoc text and turns them into an ordered metadata map. The typing
//! of each value is delegated to a [`MetadataNormalizer`].

pub mod extractor;
pub mod normalize;

pub use extractor::{Metadata, MetadataExtractor, TITLE_KEY};
pub use normalize::{
    DefaultNormalizer, IdentityNormalizer, MetadataNormalizer, MetadataValue, parse_date,
};
