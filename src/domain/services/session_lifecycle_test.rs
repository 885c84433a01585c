use super::SessionLifecycle;
use crate::domain::models::Message;
use crate::domain::services::SessionStore;

#[test]
fn it_starts_without_session() {
    let lifecycle = SessionLifecycle::default();
    assert!(lifecycle.current().is_none());
}

#[test]
fn it_ensures_session_idempotently() {
    let mut lifecycle = SessionLifecycle::default();
    let first = lifecycle.ensure_session();
    let second = lifecycle.ensure_session();

    assert!(!first.is_empty());
    assert_eq!(first, second);
    assert_eq!(lifecycle.current(), Some(first.as_str()));
}

#[test]
fn it_rotates_id_after_reset() {
    let store = SessionStore::default();
    let mut lifecycle = SessionLifecycle::default();
    let before = lifecycle.ensure_session();

    lifecycle.reset_session(&store);
    assert!(lifecycle.current().is_none());

    let after = lifecycle.ensure_session();
    assert_ne!(before, after);
}

#[test]
fn it_clears_history_on_reset() {
    let store = SessionStore::default();
    let mut lifecycle = SessionLifecycle::default();
    let session_id = lifecycle.ensure_session();
    store.append(&session_id, Message::assistant("Hello!"));

    lifecycle.reset_session(&store);

    assert!(store.list(&session_id).is_empty());
}

#[test]
fn it_resets_without_session() {
    let store = SessionStore::default();
    let mut lifecycle = SessionLifecycle::default();
    lifecycle.reset_session(&store);
    lifecycle.reset_session(&store);

    assert!(lifecycle.current().is_none());
}

#[test]
fn it_creates_unique_ids() {
    let ids = (0..100)
        .map(|_| return SessionLifecycle::create_id())
        .collect::<std::collections::HashSet<String>>();
    assert_eq!(ids.len(), 100);
}
