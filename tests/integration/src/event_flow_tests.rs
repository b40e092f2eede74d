//! Event-flow scenarios through the service mailbox
//!
//! Buffers host events into the channel, lets the service drain them,
//! and checks the cache the host would be left with.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use serde_json::Value;
use startpage_host::keys::{BOOKMARK_FOLDER_KEY, STORE_VERSION_KEY, favicon_content_key};
use startpage_host::{BookmarkEvent, BookmarkId, StateChange};
use startpage_sync::{HostEvent, STORE_VERSION, SyncService};
use startpage_test_utils::{MemoryBookmarks, MemoryStore, StubFetcher};

struct Host {
    bookmarks: Arc<MemoryBookmarks>,
    cache: Arc<MemoryStore>,
    fetcher: Arc<StubFetcher>,
    service: SyncService,
}

impl Host {
    fn new() -> Self {
        let bookmarks = Arc::new(MemoryBookmarks::new());
        let cache = Arc::new(MemoryStore::new());
        let fetcher = Arc::new(StubFetcher::new());
        let service = SyncService::new(bookmarks.clone(), cache.clone(), fetcher.clone());
        Self {
            bookmarks,
            cache,
            fetcher,
            service,
        }
    }

    /// Seed an already-initialized store pointing at `root`.
    fn seed_initialized(&self, root: &BookmarkId) {
        self.cache
            .seed(BOOKMARK_FOLDER_KEY, Value::from(root.as_str()));
        self.cache
            .seed(STORE_VERSION_KEY, Value::from(STORE_VERSION));
    }

    /// Buffer `events`, close the channel, and let the service drain.
    async fn drive(&self, events: Vec<HostEvent>) {
        let (tx, rx) = tokio::sync::mpsc::channel(events.len().max(1));
        for event in events {
            tx.send(event).await.unwrap();
        }
        drop(tx);
        self.service.run(rx).await.unwrap();
    }
}

#[tokio::test]
async fn test_member_and_outsider_events() {
    let host = Host::new();
    let root = host.bookmarks.add_folder(None, "Favorites");
    host.seed_initialized(&root);
    let inside = host
        .bookmarks
        .add_bookmark(Some(&root), "Inside", "https://inside.example");
    let outside = host
        .bookmarks
        .add_bookmark(None, "Outside", "https://outside.example");

    host.drive(vec![
        HostEvent::Bookmark(BookmarkEvent::Created(inside.clone())),
        HostEvent::Bookmark(BookmarkEvent::Created(outside.clone())),
    ])
    .await;

    assert!(host.cache.value(&favicon_content_key(&inside)).is_some());
    assert!(host.cache.value(&favicon_content_key(&outside)).is_none());
    assert_eq!(host.fetcher.resolve_calls(), 1);
}

#[tokio::test]
async fn test_moved_event_refreshes_incrementally() {
    let host = Host::new();
    let root = host.bookmarks.add_folder(None, "Favorites");
    host.seed_initialized(&root);
    let sub = host.bookmarks.add_folder(Some(&root), "Sub");
    let moved = host
        .bookmarks
        .add_bookmark(Some(&sub), "Moved", "https://moved.example");
    host.bookmarks
        .add_bookmark(Some(&root), "Sibling", "https://sibling.example");

    host.drive(vec![HostEvent::Bookmark(BookmarkEvent::Moved(moved.clone()))])
        .await;

    // Only the moved leaf is refreshed, not the whole folder.
    assert_eq!(host.cache.write_count(&favicon_content_key(&moved)), 1);
    assert_eq!(host.fetcher.resolve_calls(), 1);
}

#[tokio::test]
async fn test_removed_event_leaves_the_cache_alone() {
    let host = Host::new();
    let root = host.bookmarks.add_folder(None, "Favorites");
    host.seed_initialized(&root);
    let leaf = host
        .bookmarks
        .add_bookmark(Some(&root), "Leaf", "https://leaf.example");
    host.cache.seed(
        &favicon_content_key(&leaf),
        Value::from("icon-bytes:stale"),
    );
    host.bookmarks.remove(&leaf);

    host.drive(vec![HostEvent::Bookmark(BookmarkEvent::Removed(leaf.clone()))])
        .await;

    // The stale entry survives; removal is not tracked.
    assert_eq!(
        host.cache.value(&favicon_content_key(&leaf)),
        Some(Value::from("icon-bytes:stale"))
    );
    assert_eq!(host.fetcher.resolve_calls(), 0);
}

#[tokio::test]
async fn test_folder_replacement_rebinds_event_scope() {
    let host = Host::new();
    let old_root = host.bookmarks.add_folder(None, "Old");
    host.seed_initialized(&old_root);
    let old_leaf = host
        .bookmarks
        .add_bookmark(Some(&old_root), "Old leaf", "https://old.example");
    let new_root = host.bookmarks.add_folder(None, "New");
    let new_leaf = host
        .bookmarks
        .add_bookmark(Some(&new_root), "New leaf", "https://new.example");

    host.drive(vec![
        HostEvent::StorageChanged(vec![StateChange::new(
            BOOKMARK_FOLDER_KEY,
            Some(Value::from(old_root.as_str())),
            Some(Value::from(new_root.as_str())),
        )]),
        // Arrives after the replacement, so it is judged under the new
        // root and ignored.
        HostEvent::Bookmark(BookmarkEvent::Created(old_leaf.clone())),
    ])
    .await;

    assert!(host.cache.value(&favicon_content_key(&new_leaf)).is_some());
    assert!(host.cache.value(&favicon_content_key(&old_leaf)).is_none());
}

#[tokio::test]
async fn test_one_bad_event_never_stalls_the_drain() {
    let host = Host::new();
    let root = host.bookmarks.add_folder(None, "Favorites");
    host.seed_initialized(&root);
    let bad = host
        .bookmarks
        .add_bookmark(Some(&root), "Bad", "https://bad.example");
    let good = host
        .bookmarks
        .add_bookmark(Some(&root), "Good", "https://good.example");
    host.fetcher.fail_fetch(
        &StubFetcher::favicon_url_for("https://bad.example", true),
        "server returned 500",
    );

    host.drive(vec![
        HostEvent::Bookmark(BookmarkEvent::Created(bad.clone())),
        HostEvent::Bookmark(BookmarkEvent::Created(good.clone())),
    ])
    .await;

    assert!(host.cache.value(&favicon_content_key(&bad)).is_none());
    assert!(host.cache.value(&favicon_content_key(&good)).is_some());
}
