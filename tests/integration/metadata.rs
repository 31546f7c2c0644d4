//! Integration tests for the `metadata` command.

use asciidoc_reader::test_utils::write_document;
use predicates::prelude::*;
use serde_json::{Value, json};
use tempfile::TempDir;

use super::reader_cmd;

fn stdout_json(output: &std::process::Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

#[test]
fn test_metadata_single_file() {
    let temp = TempDir::new().unwrap();
    let post = write_document(
        temp.path(),
        "post.adoc",
        "= Hello World\n:date: 2024-02-03\n:tags: rust, cli\n:Author: Jane\n\nBody.\n",
    );

    let output =
        reader_cmd(temp.path()).arg("metadata").arg(&post).assert().success().get_output().clone();

    assert_eq!(
        stdout_json(&output),
        json!({
            "title": "Hello World",
            "date": "2024-02-03T00:00:00",
            "tags": ["rust", "cli"],
            "author": "Jane",
        })
    );
}

#[test]
fn test_metadata_preserves_document_order() {
    let temp = TempDir::new().unwrap();
    let post = write_document(temp.path(), "post.asc", ":zeta: 1\n:alpha: 2\nTitle\n=====\n");

    reader_cmd(temp.path())
        .arg("metadata")
        .arg(&post)
        .assert()
        .success()
        .stdout(predicate::str::is_match(r#"(?s)"zeta".*"alpha".*"title""#).unwrap());
}

#[test]
fn test_metadata_walks_directories() {
    let temp = TempDir::new().unwrap();
    let content = temp.path().join("content");
    write_document(&content, "a.adoc", "= First\n");
    write_document(&content, "nested/b.asciidoc", "Second\n======\n");
    write_document(&content, "notes.md", "# Not AsciiDoc\n");

    let output = reader_cmd(temp.path())
        .arg("metadata")
        .arg(&content)
        .assert()
        .success()
        .get_output()
        .clone();

    let json = stdout_json(&output);
    let results = json.as_object().unwrap();
    assert_eq!(results.len(), 2);

    let first = content.join("a.adoc").display().to_string();
    let second = content.join("nested").join("b.asciidoc").display().to_string();
    assert_eq!(results[&first], json!({ "title": "First" }));
    assert_eq!(results[&second], json!({ "title": "Second" }));
}

#[test]
fn test_metadata_rejects_unsupported_extension() {
    let temp = TempDir::new().unwrap();
    let notes = write_document(temp.path(), "notes.md", "= Looks like AsciiDoc\n");

    reader_cmd(temp.path())
        .arg("metadata")
        .arg(&notes)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Not an AsciiDoc file"));
}

#[test]
fn test_metadata_invalid_date_fails() {
    let temp = TempDir::new().unwrap();
    let post = write_document(temp.path(), "post.adoc", "= T\n:date: someday\n");

    reader_cmd(temp.path())
        .arg("metadata")
        .arg(&post)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid value for metadata 'date'"));
}

#[test]
fn test_metadata_missing_file_fails() {
    let temp = TempDir::new().unwrap();

    reader_cmd(temp.path())
        .arg("metadata")
        .arg(temp.path().join("missing.adoc"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing.adoc"));
}

#[test]
fn test_metadata_uses_list_keys_from_config() {
    let temp = TempDir::new().unwrap();
    write_document(temp.path(), "config.toml", "list_keys = [\"series\"]\n");
    let post = write_document(temp.path(), "post.adoc", ":series: one, two\n:tags: a, b\n");

    let output =
        reader_cmd(temp.path()).arg("metadata").arg(&post).assert().success().get_output().clone();

    assert_eq!(
        stdout_json(&output),
        json!({
            "series": ["one", "two"],
            "tags": "a, b",
        })
    );
}

#[test]
fn test_metadata_invalid_config_fails() {
    let temp = TempDir::new().unwrap();
    write_document(temp.path(), "config.toml", "timeout_secs = \"soon\"\n");
    let post = write_document(temp.path(), "post.adoc", "= T\n");

    reader_cmd(temp.path())
        .arg("metadata")
        .arg(&post)
        .assert()
        .failure()
        .stderr(predicate::str::contains("config.toml"));
}
