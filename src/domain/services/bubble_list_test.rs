use anyhow::Result;

use super::BubbleList;
use crate::domain::models::Author;
use crate::domain::models::Entry;

fn entries() -> Vec<Entry> {
    return vec![
        Entry::new(Author::Glimpse, "Hi there!"),
        Entry::new(Author::User, "Tell me a joke\nabout crabs"),
    ];
}

#[test]
fn it_has_no_cached_lines() -> Result<()> {
    let bubble_list = BubbleList::new();

    assert_eq!(bubble_list.cache.len(), 0);
    assert_eq!(bubble_list.len(), 0);
    return Ok(());
}

#[test]
fn it_caches_lines() -> Result<()> {
    let mut bubble_list = BubbleList::new();
    bubble_list.set_entries(&entries(), 50);

    assert_eq!(bubble_list.cache.len(), 2);
    return Ok(());
}

#[test]
fn it_returns_correct_length() -> Result<()> {
    let mut bubble_list = BubbleList::new();
    bubble_list.set_entries(&entries(), 50);

    assert_eq!(bubble_list.len(), 7);
    return Ok(());
}

#[test]
fn it_rebuilds_the_streaming_entry() -> Result<()> {
    let mut entries = entries();
    let mut bubble_list = BubbleList::new();
    bubble_list.set_entries(&entries, 50);

    entries.push(Entry::new(Author::Glimpse, "Why"));
    bubble_list.set_entries(&entries, 50);
    assert_eq!(bubble_list.len(), 10);

    if let Some(last) = entries.last_mut() {
        last.append(" did the crab never share?\nBecause it was shellfish.");
    }
    bubble_list.set_entries(&entries, 50);
    assert_eq!(bubble_list.len(), 11);

    return Ok(());
}

#[test]
fn it_drops_stale_entries_when_cleared() -> Result<()> {
    let mut bubble_list = BubbleList::new();
    bubble_list.set_entries(&entries(), 50);
    bubble_list.set_entries(&[Entry::new(Author::Glimpse, "Hi there!")], 50);

    assert_eq!(bubble_list.cache.len(), 1);
    assert_eq!(bubble_list.len(), 3);
    return Ok(());
}
