use domains::{Document, DocumentStore, DomainError, ErrorKind};
use integration_tests::{post, seeded_store, two_authors};
use services::RequestScope;
use storage_adapters::JsonFileStore;

#[test]
fn mutations_without_commit_are_flushed_at_teardown() {
    let dir = tempfile::tempdir().unwrap();
    let store = seeded_store(dir.path(), &two_authors());

    let mut scope = RequestScope::new(&store);
    scope.acquire().unwrap().posts.push(post(4, 1, 20, "late"));
    scope.teardown(None).unwrap();

    assert_eq!(store.load().unwrap().posts.len(), 3);
}

#[test]
fn teardown_after_a_failed_request_still_commits() {
    let dir = tempfile::tempdir().unwrap();
    let store = seeded_store(dir.path(), &two_authors());

    let mut scope = RequestScope::new(&store);
    scope.acquire().unwrap().posts.clear();
    let err = DomainError::Forbidden { id: 3 };
    scope.teardown(Some(&err)).unwrap();

    assert!(store.load().unwrap().posts.is_empty());
}

#[test]
fn dropping_a_scope_flushes_like_teardown() {
    let dir = tempfile::tempdir().unwrap();
    let store = seeded_store(dir.path(), &two_authors());
    {
        let mut scope = RequestScope::new(&store);
        scope.acquire().unwrap().users.pop();
    }
    assert_eq!(store.load().unwrap().users.len(), 1);
}

#[test]
fn a_scope_does_not_see_writes_made_after_it_loaded() {
    let dir = tempfile::tempdir().unwrap();
    let store = seeded_store(dir.path(), &two_authors());

    let mut scope = RequestScope::new(&store);
    scope.acquire().unwrap();
    store.commit(&Document::default()).unwrap();
    assert_eq!(scope.acquire().unwrap().posts.len(), 2);
}

#[test]
fn concurrent_scopes_lose_the_earlier_commit() {
    let dir = tempfile::tempdir().unwrap();
    let store = seeded_store(dir.path(), &two_authors());

    let mut first = RequestScope::new(&store);
    let mut second = RequestScope::new(&store);
    first.acquire().unwrap().posts.push(post(4, 1, 20, "from first"));
    second.acquire().unwrap().posts.push(post(4, 2, 30, "from second"));
    first.teardown(None).unwrap();
    second.teardown(None).unwrap();

    let titles: Vec<String> = store.load().unwrap().posts.into_iter().map(|p| p.title).collect();
    assert_eq!(titles, vec!["first", "second", "from second"]);
}

#[test]
fn missing_file_fails_acquire_as_unreadable() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("missing.json"));

    let mut scope = RequestScope::new(&store);
    let err = scope.acquire().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DatabaseUnreadable);
    scope.teardown(Some(&err)).unwrap();
    assert!(!store.path().exists());
}
