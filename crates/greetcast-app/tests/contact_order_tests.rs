//! Integration tests for contact list loading order.

use std::fs;

use greetcast_app::contacts_from_lines;
use greetcast_resources::load_lines;

#[test]
fn contact_order_tests_send_order_equals_file_order_with_duplicates() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("contacts.txt");
    fs::write(&path, "Bob\nAlice\n\nBob\n  Carol  \n").expect("write fixture");

    let lines = load_lines(&path).expect("list should load");
    let contacts = contacts_from_lines(lines).expect("valid contacts");

    let names: Vec<&str> = contacts.iter().map(|contact| contact.as_str()).collect();
    assert_eq!(names, vec!["Bob", "Alice", "Bob", "Carol"]);
}

#[test]
fn contact_order_tests_blank_lines_never_become_contacts() {
    let error = contacts_from_lines(vec!["   ".to_string()]).expect_err("blank must be rejected");
    assert_eq!(error.to_string(), "contact name is blank");
}
