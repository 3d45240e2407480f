// ABOUTME: Integration tests for the corpus-cli binary.
// ABOUTME: Tests document extraction from files, option handling, and error reporting.

use assert_cmd::assert::OutputAssertExt;
use assert_cmd::cargo::CommandCargoExt;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::TempDir;

fn corpus_cmd() -> Command {
    Command::cargo_bin("corpus-cli").unwrap()
}

#[test]
fn extracts_article_from_html_file() {
    let temp_dir = TempDir::new().unwrap();
    let html_path = temp_dir.path().join("page.html");
    let options_path = temp_dir.path().join("options.json");

    fs::write(
        &html_path,
        r#"<!DOCTYPE html>
<html>
<head><title>Test Page</title></head>
<body>
<article>Hello <b>World</b></article>
</body>
</html>"#,
    )
    .unwrap();

    fs::write(
        &options_path,
        r#"{
  "contentExtraction": [
    { "url": "https://example.com/*", "selectors": [{ "selector": "article" }] }
  ]
}"#,
    )
    .unwrap();

    corpus_cmd()
        .arg("--input")
        .arg(&html_path)
        .arg("--url")
        .arg("https://example.com/page")
        .arg("--options")
        .arg(&options_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Hello World"))
        .stdout(predicate::str::contains("\"digest\""))
        .stdout(predicate::str::contains("\"partitions\""));
}

#[test]
fn fallback_warning_appears_without_options() {
    let temp_dir = TempDir::new().unwrap();
    let html_path = temp_dir.path().join("page.html");
    fs::write(&html_path, "<html><body><p>Body only</p></body></html>").unwrap();

    corpus_cmd()
        .arg("--input")
        .arg(&html_path)
        .arg("--url")
        .arg("https://example.com/")
        .assert()
        .success()
        .stdout(predicate::str::contains("Body only"))
        .stdout(predicate::str::contains("warnings"));
}

#[test]
fn list_prints_registered_components() {
    corpus_cmd()
        .arg("--list")
        .assert()
        .success()
        .stdout(predicate::str::contains("rag.loader.html"))
        .stdout(predicate::str::contains("rag.loader.text"))
        .stdout(predicate::str::contains("rag.splitter.paragraph"));
}

#[test]
fn unknown_component_fails_with_identifier_in_message() {
    let temp_dir = TempDir::new().unwrap();
    let html_path = temp_dir.path().join("page.html");
    fs::write(&html_path, "<html></html>").unwrap();

    corpus_cmd()
        .arg("--input")
        .arg(&html_path)
        .arg("--url")
        .arg("https://example.com/")
        .arg("--component")
        .arg("no.such.id")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown component `no.such.id`"));
}

#[test]
fn invalid_options_fail_with_field_path() {
    let temp_dir = TempDir::new().unwrap();
    let html_path = temp_dir.path().join("page.html");
    let options_path = temp_dir.path().join("options.json");
    fs::write(&html_path, "<html></html>").unwrap();
    fs::write(
        &options_path,
        r#"{ "contentExtraction": [{ "selectors": [] }] }"#,
    )
    .unwrap();

    corpus_cmd()
        .arg("--input")
        .arg(&html_path)
        .arg("--url")
        .arg("https://example.com/")
        .arg("--options")
        .arg(&options_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("contentExtraction[0].url"));
}

#[test]
fn splitter_component_is_rejected_for_loading() {
    let temp_dir = TempDir::new().unwrap();
    let html_path = temp_dir.path().join("page.html");
    fs::write(&html_path, "<html></html>").unwrap();

    corpus_cmd()
        .arg("--input")
        .arg(&html_path)
        .arg("--url")
        .arg("https://example.com/")
        .arg("--component")
        .arg("rag.splitter.paragraph")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a loader"));
}
