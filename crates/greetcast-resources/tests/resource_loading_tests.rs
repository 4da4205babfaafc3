//! Integration tests for resource file loading.

use std::fs;

use greetcast_resources::{ResourceError, load_lines, load_template};

#[test]
fn resource_loading_tests_strips_blank_and_whitespace_lines() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("contacts.txt");
    fs::write(&path, "Alice\n\n  \nBob\n").expect("write fixture");

    let lines = load_lines(&path).expect("list should load");
    assert_eq!(lines, vec!["Alice".to_string(), "Bob".to_string()]);
}

#[test]
fn resource_loading_tests_trims_entries_but_keeps_inner_whitespace() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("contacts.txt");
    fs::write(&path, "  Alice Zhang \n\tBob\n").expect("write fixture");

    let lines = load_lines(&path).expect("list should load");
    assert_eq!(lines, vec!["Alice Zhang".to_string(), "Bob".to_string()]);
}

#[test]
fn resource_loading_tests_template_is_verbatim() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("template.txt");
    fs::write(&path, "Hi {name},\n{word}!\n").expect("write fixture");

    let template = load_template(&path).expect("template should load");
    assert_eq!(template, "Hi {name},\n{word}!\n");
}

#[test]
fn resource_loading_tests_missing_file_is_not_found() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("absent.txt");

    let error = load_lines(&path).expect_err("missing file must fail");
    assert!(matches!(error, ResourceError::NotFound { path: reported } if reported == path));
}

#[test]
fn resource_loading_tests_invalid_utf8_is_read_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("binary.txt");
    fs::write(&path, [0xFFu8, 0xFE, 0x00, 0x41]).expect("write fixture");

    let error = load_template(&path).expect_err("non-UTF-8 file must fail");
    assert!(matches!(error, ResourceError::Read { .. }));
}
