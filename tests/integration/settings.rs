//! Integration tests for settings file lookup.

use asciidoc_reader::config::CONFIG_ENV_VAR;
use asciidoc_reader::test_utils::write_document;
use serde_json::{Value, json};
use tempfile::TempDir;

use super::bare_cmd;

const DOCUMENT: &str = ":series: one, two\n:topics: a, b\n";

fn metadata_json(output: &std::process::Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

#[test]
fn test_settings_from_environment() {
    let temp = TempDir::new().unwrap();
    let settings = write_document(temp.path(), "env.toml", "list_keys = [\"series\"]\n");
    let post = write_document(temp.path(), "post.adoc", DOCUMENT);

    let output = bare_cmd()
        .env(CONFIG_ENV_VAR, &settings)
        .arg("metadata")
        .arg(&post)
        .assert()
        .success()
        .get_output()
        .clone();

    assert_eq!(
        metadata_json(&output),
        json!({
            "series": ["one", "two"],
            "topics": "a, b",
        })
    );
}

#[test]
fn test_config_flag_overrides_environment() {
    let temp = TempDir::new().unwrap();
    let from_env = write_document(temp.path(), "env.toml", "list_keys = [\"series\"]\n");
    let from_flag = write_document(temp.path(), "flag.toml", "list_keys = [\"topics\"]\n");
    let post = write_document(temp.path(), "post.adoc", DOCUMENT);

    let output = bare_cmd()
        .env(CONFIG_ENV_VAR, &from_env)
        .arg("--config")
        .arg(&from_flag)
        .arg("metadata")
        .arg(&post)
        .assert()
        .success()
        .get_output()
        .clone();

    assert_eq!(
        metadata_json(&output),
        json!({
            "series": "one, two",
            "topics": ["a", "b"],
        })
    );
}

#[test]
fn test_invalid_settings_from_environment_fail() {
    let temp = TempDir::new().unwrap();
    let settings = write_document(temp.path(), "env.toml", "timeout_secs = 0\n");
    let post = write_document(temp.path(), "post.adoc", DOCUMENT);

    bare_cmd()
        .env(CONFIG_ENV_VAR, &settings)
        .arg("metadata")
        .arg(&post)
        .assert()
        .failure()
        .stderr(predicates::str::contains("timeout_secs must be greater than zero"));
}
