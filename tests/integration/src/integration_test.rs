//! End-to-end startup scenarios
//!
//! Exercises the complete flow: folder convergence -> store migration
//! -> full cache rebuild, against the in-memory host.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use serde_json::Value;
use startpage_host::keys::{
    BOOKMARK_FOLDER_KEY, FAVICON_CONTENT_PREFIX, STORE_VERSION_KEY, favicon_content_key,
};
use startpage_sync::{STORE_VERSION, SyncService};
use startpage_test_utils::{MemoryBookmarks, MemoryStore, StubFetcher};

struct Host {
    bookmarks: Arc<MemoryBookmarks>,
    cache: Arc<MemoryStore>,
    fetcher: Arc<StubFetcher>,
}

impl Host {
    fn new() -> Self {
        Self {
            bookmarks: Arc::new(MemoryBookmarks::new()),
            cache: Arc::new(MemoryStore::new()),
            fetcher: Arc::new(StubFetcher::new()),
        }
    }

    /// A service over this host, as each fresh process start would
    /// build one.
    fn service(&self) -> SyncService {
        SyncService::new(
            self.bookmarks.clone(),
            self.cache.clone(),
            self.fetcher.clone(),
        )
    }
}

#[tokio::test]
async fn test_first_start_creates_folder_and_records_version() {
    let host = Host::new();

    let report = host.service().start().await.unwrap();

    assert!(report.store_migrated);
    assert_eq!(report.reconciliation.unwrap().total(), 0);
    assert_eq!(host.bookmarks.created_folders(), 1);
    assert_eq!(
        host.cache.value(STORE_VERSION_KEY),
        Some(Value::from(STORE_VERSION))
    );
    assert_eq!(
        host.cache.value(BOOKMARK_FOLDER_KEY),
        Some(Value::from(report.root_folder_id.as_str()))
    );
    // Nothing to reconcile in a brand-new folder.
    assert!(host.cache.keys_with_prefix(FAVICON_CONTENT_PREFIX).is_empty());
}

#[tokio::test]
async fn test_restart_converges_without_new_work() {
    let host = Host::new();

    let first = host.service().start().await.unwrap();
    let second = host.service().start().await.unwrap();

    assert_eq!(first.root_folder_id, second.root_folder_id);
    assert!(!second.store_migrated);
    assert!(second.reconciliation.is_none());
    assert_eq!(host.bookmarks.created_folders(), 1);
    assert_eq!(host.cache.write_count(BOOKMARK_FOLDER_KEY), 1);
    assert_eq!(host.cache.write_count(STORE_VERSION_KEY), 1);
}

#[tokio::test]
async fn test_version_bump_rebuilds_an_existing_folder() {
    let host = Host::new();
    let root = host.bookmarks.add_folder(None, "Favorites");
    let news = host
        .bookmarks
        .add_bookmark(Some(&root), "News", "https://example.com");
    host.cache
        .seed(BOOKMARK_FOLDER_KEY, Value::from(root.as_str()));
    // Store predates versioning entirely.

    let report = host.service().start().await.unwrap();

    assert!(report.store_migrated);
    assert_eq!(report.reconciliation.unwrap().refreshed, vec![news.clone()]);
    assert_eq!(
        host.cache.value(&favicon_content_key(&news)),
        Some(Value::from(StubFetcher::content_for(
            &StubFetcher::favicon_url_for("https://example.com", true)
        )))
    );
}

#[tokio::test]
async fn test_rebuild_covers_nested_leaves_exactly_once() {
    let host = Host::new();
    let root = host.bookmarks.add_folder(None, "Favorites");
    let a = host
        .bookmarks
        .add_bookmark(Some(&root), "A", "https://a.example");
    let sub = host.bookmarks.add_folder(Some(&root), "Sub");
    let b = host
        .bookmarks
        .add_bookmark(Some(&sub), "B", "https://b.example");
    host.bookmarks.add_folder(Some(&sub), "Empty");
    host.cache
        .seed(BOOKMARK_FOLDER_KEY, Value::from(root.as_str()));

    host.service().start().await.unwrap();

    assert_eq!(
        host.cache.keys_with_prefix(FAVICON_CONTENT_PREFIX),
        {
            let mut keys = vec![favicon_content_key(&a), favicon_content_key(&b)];
            keys.sort();
            keys
        }
    );
    assert_eq!(host.cache.write_count(&favicon_content_key(&a)), 1);
    assert_eq!(host.cache.write_count(&favicon_content_key(&b)), 1);
    assert_eq!(host.fetcher.resolve_calls(), 2);

    // A second start finds the store current and fetches nothing more.
    host.service().start().await.unwrap();
    assert_eq!(host.fetcher.resolve_calls(), 2);
}

#[tokio::test]
async fn test_dangling_folder_id_recovers_on_start() {
    let host = Host::new();
    host.cache.seed(BOOKMARK_FOLDER_KEY, Value::from("gone"));
    host.cache
        .seed(STORE_VERSION_KEY, Value::from(STORE_VERSION));

    let report = host.service().start().await.unwrap();

    assert_ne!(report.root_folder_id.as_str(), "gone");
    assert_eq!(host.bookmarks.created_folders(), 1);
    assert_eq!(
        host.cache.value(BOOKMARK_FOLDER_KEY),
        Some(Value::from(report.root_folder_id.as_str()))
    );
    assert!(!report.store_migrated);
}

#[tokio::test]
async fn test_partial_failure_still_reports_the_rest() {
    let host = Host::new();
    let root = host.bookmarks.add_folder(None, "Favorites");
    let good = host
        .bookmarks
        .add_bookmark(Some(&root), "Good", "https://good.example");
    let bad = host
        .bookmarks
        .add_bookmark(Some(&root), "Bad", "https://bad.example");
    host.cache
        .seed(BOOKMARK_FOLDER_KEY, Value::from(root.as_str()));
    host.fetcher.fail_resolve("https://bad.example", "no icon indexed");

    let report = host.service().start().await.unwrap();

    let reconciliation = report.reconciliation.unwrap();
    assert_eq!(reconciliation.refreshed, vec![good.clone()]);
    assert_eq!(reconciliation.failures.len(), 1);
    assert_eq!(reconciliation.failures[0].id, bad);
    assert!(host.cache.value(&favicon_content_key(&good)).is_some());
    assert!(host.cache.value(&favicon_content_key(&bad)).is_none());
}
