use std::fs;

use domains::{Document, DocumentStore, ErrorKind};
use integration_tests::{seeded_store, two_authors};
use storage_adapters::JsonFileStore;

/// A file in canonical form with escaped non-ASCII and microsecond timestamps.
const CANONICAL_TEXT: &str = r#"{
  "posts": [
    {
      "author_id": 1,
      "body": "caf\u00e9 \ud83d\ude00\nline two",
      "created": "2024-03-14T09:00:00.250000+00:00",
      "id": 2,
      "title": "Hello"
    }
  ],
  "users": [
    {
      "id": 1,
      "password": "pbkdf2:sha256:600000$salt$hash",
      "username": "test"
    }
  ]
}"#;

#[test]
fn files_in_canonical_form_round_trip_byte_for_byte() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("blog.json");
    fs::write(&path, CANONICAL_TEXT).unwrap();

    let store = JsonFileStore::new(&path);
    let doc = store.load().unwrap();
    assert_eq!(doc.posts[0].body, "café 😀\nline two");

    store.commit(&doc).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), CANONICAL_TEXT);
}

#[test]
fn commit_then_load_in_a_new_store_is_deeply_equal() {
    let dir = tempfile::tempdir().unwrap();
    let store = seeded_store(dir.path(), &two_authors());

    let reopened = JsonFileStore::new(store.path());
    assert_eq!(reopened.load().unwrap(), two_authors());
}

#[test]
fn commit_replaces_the_whole_file() {
    let dir = tempfile::tempdir().unwrap();
    let store = seeded_store(dir.path(), &two_authors());
    store.commit(&Document::default()).unwrap();

    assert_eq!(
        fs::read_to_string(store.path()).unwrap(),
        "{\n  \"posts\": [],\n  \"users\": []\n}"
    );
}

#[test]
fn initialize_wipes_existing_data() {
    let dir = tempfile::tempdir().unwrap();
    let store = seeded_store(dir.path(), &two_authors());
    store.initialize().unwrap();
    assert_eq!(store.load().unwrap(), Document::default());
}

#[test]
fn bad_timestamp_makes_the_database_unreadable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("blog.json");
    fs::write(
        &path,
        r#"{"users": [], "posts": [{"id": 2, "author_id": 1, "created": "yesterday", "title": "t", "body": ""}]}"#,
    )
    .unwrap();

    let err = JsonFileStore::new(&path).load().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DatabaseUnreadable);
}

#[test]
fn commit_into_missing_directory_fails_with_persist_error() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("nope").join("blog.json"));
    let err = store.commit(&Document::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Persist);
}
