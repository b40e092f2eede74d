//! Basic usage example for startpage-sync
//!
//! Wires the in-memory host fixtures to the sync service, starts it,
//! and pushes a few host events through the mailbox.
//!
//! ```bash
//! RUST_LOG=startpage_sync=debug cargo run -p startpage-sync --example basic_usage
//! ```

use std::sync::Arc;

use startpage_host::BookmarkEvent;
use startpage_host::keys::favicon_content_key;
use startpage_sync::{HostEvent, SyncService};
use startpage_test_utils::{MemoryBookmarks, MemoryStore, StubFetcher};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr; RUST_LOG controls verbosity
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("startpage_sync=debug".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let bookmarks = Arc::new(MemoryBookmarks::new());
    let cache = Arc::new(MemoryStore::new());
    let fetcher = Arc::new(StubFetcher::new());

    let service = SyncService::new(bookmarks.clone(), cache.clone(), fetcher.clone());

    // First start: creates the managed folder and migrates the store.
    let report = service.start().await?;
    println!("managed folder: {}", report.root_folder_id);
    println!("store migrated: {}", report.store_migrated);

    // The user adds one bookmark inside the managed folder and one
    // outside it.
    let root = report.root_folder_id.clone();
    let news = bookmarks.add_bookmark(Some(&root), "News", "https://news.example");
    let outside = bookmarks.add_bookmark(None, "Elsewhere", "https://elsewhere.example");

    // Forward the host's notifications through the mailbox. run() opens
    // with the same convergence pass start() did; the second ensure is
    // a no-op.
    let (tx, rx) = tokio::sync::mpsc::channel(16);
    tx.send(HostEvent::Bookmark(BookmarkEvent::Created(news.clone())))
        .await?;
    tx.send(HostEvent::Bookmark(BookmarkEvent::Created(outside.clone())))
        .await?;
    drop(tx);
    service.run(rx).await?;

    println!(
        "favicon for {news}: {:?}",
        cache.value(&favicon_content_key(&news))
    );
    println!(
        "favicon for {outside} (outside the folder): {:?}",
        cache.value(&favicon_content_key(&outside))
    );

    Ok(())
}
