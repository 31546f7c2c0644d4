//! Tests for title and attribute extraction.

use asciidoc_reader::metadata::{IdentityNormalizer, MetadataExtractor, TITLE_KEY};
use std::cell::RefCell;
use std::convert::Infallible;
use std::io::Cursor;

fn extract(content: &str) -> Vec<(String, String)> {
    MetadataExtractor::extract_str(content, &IdentityNormalizer).unwrap().into_iter().collect()
}

fn pairs(expected: &[(&str, &str)]) -> Vec<(String, String)> {
    expected.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect()
}

#[test]
fn test_blog_post_header() {
    let content = "\
= Getting Started With Rust
:author: Jane Doe
:date: 2024-03-01
:tags: rust, beginners

== Introduction

Rust is a systems language.
";
    assert_eq!(
        extract(content),
        pairs(&[
            ("title", "Getting Started With Rust"),
            ("author", "Jane Doe"),
            ("date", "2024-03-01"),
            ("tags", "rust, beginners"),
        ])
    );
}

#[test]
fn test_setext_title_with_crlf_line_endings() {
    let content = "Windows Post\r\n============\r\n:Category: Notes\r\n";
    assert_eq!(extract(content), pairs(&[("title", "Windows Post"), ("category", "Notes")]));
}

#[test]
fn test_section_headings_are_not_titles() {
    let content = "== Section\n=== Subsection\nText\n";
    assert!(extract(content).is_empty());
}

#[test]
fn test_attribute_values_keep_inner_colons() {
    let content = ":link: https://example.com:8443/path\n";
    assert_eq!(extract(content), pairs(&[("link", "https://example.com:8443/path")]));
}

#[test]
fn test_last_attribute_wins_in_first_position() {
    let content = ":status: draft\n:author: A\n:STATUS: published\n";
    assert_eq!(extract(content), pairs(&[("status", "published"), ("author", "A")]));
}

#[test]
fn test_title_attribute_overrides_heading() {
    let content = "= Heading Title\n:title: Attribute Title\n";
    assert_eq!(extract(content), pairs(&[("title", "Attribute Title")]));
}

#[test]
fn test_title_attribute_blocks_later_heading() {
    let content = ":title: Attribute Title\n= Heading Title\n";
    assert_eq!(extract(content), pairs(&[("title", "Attribute Title")]));
}

#[test]
fn test_extract_from_reader() {
    let reader = Cursor::new("Reader Title\n============\n:lang: en\n");
    let metadata = MetadataExtractor::extract_reader(reader, &IdentityNormalizer).unwrap();
    assert_eq!(metadata[TITLE_KEY], "Reader Title");
    assert_eq!(metadata["lang"], "en");
}

#[test]
fn test_extract_from_line_vector() {
    let lines = vec!["= Title".to_string(), ":a: 1".to_string()];
    let metadata = MetadataExtractor::extract(lines, &IdentityNormalizer).unwrap();
    assert_eq!(metadata.len(), 2);
}

#[test]
fn test_closure_normalizer_sees_every_key() {
    let seen = RefCell::new(Vec::new());
    let normalizer = |key: &str, value: &str| -> Result<usize, Infallible> {
        seen.borrow_mut().push(key.to_string());
        Ok(value.len())
    };

    let metadata = MetadataExtractor::extract_str("= Four\n:a: xy\n:b:\n", &normalizer).unwrap();

    assert_eq!(*seen.borrow(), vec!["title", "a", "b"]);
    assert_eq!(metadata["title"], 4);
    assert_eq!(metadata["a"], 2);
    assert_eq!(metadata["b"], 0);
}

#[test]
fn test_normalizer_error_is_returned_unchanged() {
    #[derive(Debug, PartialEq)]
    struct Rejected(String);

    let normalizer = |key: &str, _value: &str| -> Result<(), Rejected> {
        if key == "secret" {
            Err(Rejected(key.to_string()))
        } else {
            Ok(())
        }
    };

    let result = MetadataExtractor::extract_str("= T\n:secret: x\n", &normalizer);
    assert_eq!(result.unwrap_err(), Rejected("secret".to_string()));
}
