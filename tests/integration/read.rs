//! Integration tests for the `read` command.

use asciidoc_reader::test_utils::write_document;
use predicates::prelude::*;
use tempfile::TempDir;

use super::reader_cmd;

#[cfg(unix)]
#[test]
fn test_read_renders_with_configured_converter() {
    use asciidoc_reader::test_utils::write_fake_converter;
    use serde_json::{Value, json};

    let temp = TempDir::new().unwrap();
    let script = write_fake_converter(temp.path(), "<p>Hello from the converter</p>");
    write_document(
        temp.path(),
        "config.toml",
        &format!("command = \"sh\"\noptions = [{:?}]\n", script.display().to_string()),
    );
    let post = write_document(temp.path(), "post.adoc", "= Rendered Post\n:lang: en\n\nBody.\n");

    let output =
        reader_cmd(temp.path()).arg("read").arg(&post).assert().success().get_output().clone();

    let page: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(page["content"], "<p>Hello from the converter</p>");
    assert_eq!(page["metadata"], json!({ "title": "Rendered Post", "lang": "en" }));
    assert_eq!(page["source_path"], post.display().to_string());
}

#[cfg(unix)]
#[test]
fn test_read_converter_failure() {
    let temp = TempDir::new().unwrap();
    write_document(temp.path(), "config.toml", "command = \"false\"\n");
    let post = write_document(temp.path(), "post.adoc", "= T\n");

    reader_cmd(temp.path())
        .arg("read")
        .arg(&post)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to render"));
}

#[test]
fn test_read_rejects_unsupported_extension() {
    let temp = TempDir::new().unwrap();
    let page = write_document(temp.path(), "page.html", "<h1>Hi</h1>");

    reader_cmd(temp.path())
        .arg("read")
        .arg(&page)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not an AsciiDoc file"));
}
