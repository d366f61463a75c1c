//! Shared fixtures for the integration test targets.

use std::path::Path;

use chrono::{DateTime, Duration, TimeZone, Utc};
use domains::{Caller, Document, DocumentStore, Extra, Post, User};
use storage_adapters::JsonFileStore;

pub fn user(id: i64, username: &str) -> User {
    User {
        id,
        username: username.to_string(),
        password: format!("pbkdf2:sha256:600000${username}"),
        extra: Extra::new(),
    }
}

pub fn caller(user: &User) -> Caller {
    Caller::from(user)
}

/// Fixed base time so ordering assertions are deterministic.
pub fn at(minutes: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 14, 9, 0, 0).unwrap() + Duration::minutes(minutes)
}

pub fn post(id: i64, author_id: i64, minutes: i64, title: &str) -> Post {
    Post {
        id,
        author_id,
        created: at(minutes).into(),
        title: title.to_string(),
        body: format!("body of {title}"),
        extra: Extra::new(),
    }
}

/// Users 1 and 2, with post 2 by user 1 and post 3 by user 2.
pub fn two_authors() -> Document {
    Document {
        users: vec![user(1, "test"), user(2, "other")],
        posts: vec![post(2, 1, 0, "first"), post(3, 2, 10, "second")],
        extra: Extra::new(),
    }
}

/// A store over `dir/blog.json` already holding `document`.
pub fn seeded_store(dir: &Path, document: &Document) -> JsonFileStore {
    let store = JsonFileStore::new(dir.join("blog.json"));
    store.commit(document).unwrap();
    store
}
