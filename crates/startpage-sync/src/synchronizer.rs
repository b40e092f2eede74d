//! Favicon refresh over the managed subtree
//!
//! Incremental path: one bookmark event, one membership check, one
//! refresh. Full path: flatten the subtree and refresh every leaf,
//! joined concurrently. Either way the cache ends up holding one
//! `favicon_content_<id>` entry per live leaf.

use std::sync::Arc;

use futures_util::future::join_all;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use startpage_host::keys::favicon_content_key;
use startpage_host::{BookmarkId, BookmarkNode, BookmarkStore, CacheStore, FaviconFetcher};

use crate::Result;
use crate::tree::{contains_id, flatten_leaves};

/// Outcome of a subtree refresh.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RefreshReport {
    /// Leaves whose cache entry was rewritten.
    pub refreshed: Vec<BookmarkId>,
    /// Leaves that failed, with the failure recorded.
    pub failures: Vec<RefreshFailure>,
}

impl RefreshReport {
    /// Whether every leaf refreshed cleanly.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Leaves visited, successful or not.
    pub fn total(&self) -> usize {
        self.refreshed.len() + self.failures.len()
    }
}

/// One leaf's refresh failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshFailure {
    pub id: BookmarkId,
    pub url: Option<String>,
    pub message: String,
}

/// Keeps cached favicons in step with the bookmarks under the managed
/// folder.
#[derive(Clone)]
pub struct FaviconSynchronizer {
    bookmarks: Arc<dyn BookmarkStore>,
    cache: Arc<dyn CacheStore>,
    fetcher: Arc<dyn FaviconFetcher>,
    prefer_high_res: bool,
}

impl FaviconSynchronizer {
    pub fn new(
        bookmarks: Arc<dyn BookmarkStore>,
        cache: Arc<dyn CacheStore>,
        fetcher: Arc<dyn FaviconFetcher>,
        prefer_high_res: bool,
    ) -> Self {
        Self {
            bookmarks,
            cache,
            fetcher,
            prefer_high_res,
        }
    }

    /// Refresh the cached favicon of a single leaf.
    ///
    /// Resolves the page's favicon URL, downloads the content, and
    /// rewrites the leaf's cache entry. Folders are skipped quietly.
    pub async fn refresh_one(&self, bookmark: &BookmarkNode) -> Result<()> {
        let Some(page_url) = bookmark.url() else {
            tracing::debug!(id = %bookmark.id, "not a leaf; nothing to refresh");
            return Ok(());
        };

        let favicon_url = self
            .fetcher
            .resolve_favicon_url(page_url, self.prefer_high_res)
            .await?;
        let content = self.fetcher.fetch_content(&favicon_url).await?;
        self.cache
            .set(&favicon_content_key(&bookmark.id), Value::from(content))
            .await?;
        tracing::debug!(id = %bookmark.id, %favicon_url, "favicon refreshed");
        Ok(())
    }

    /// Refresh every leaf under `root`.
    ///
    /// All leaves are issued together and joined; one leaf's failure
    /// is recorded in the report and never aborts its siblings. The
    /// report lists leaves in tree order.
    pub async fn refresh_subtree(&self, root: &BookmarkNode) -> RefreshReport {
        let leaves = flatten_leaves(root);
        let results = join_all(leaves.iter().map(|leaf| self.refresh_one(leaf))).await;

        let mut report = RefreshReport::default();
        for (leaf, result) in leaves.iter().zip(results) {
            match result {
                Ok(()) => report.refreshed.push(leaf.id.clone()),
                Err(err) => {
                    tracing::warn!(id = %leaf.id, error = %err, "favicon refresh failed");
                    report.failures.push(RefreshFailure {
                        id: leaf.id.clone(),
                        url: leaf.url().map(String::from),
                        message: err.to_string(),
                    });
                }
            }
        }
        report
    }

    /// React to a bookmark being created or moved anywhere in the host
    /// tree.
    ///
    /// Fetches the current subtree under `root` and completes the
    /// membership check before touching anything else.
    ///
    /// # Returns
    /// - `Ok(true)` when the bookmark is a leaf under `root` and its
    ///   favicon was refreshed
    /// - `Ok(false)` when it is not; no favicon is fetched and nothing
    ///   is written
    pub async fn handle_bookmark_event(&self, root: &BookmarkId, id: &BookmarkId) -> Result<bool> {
        let subtree = self.bookmarks.subtree(root).await?;
        if !contains_id(&subtree, id) {
            tracing::debug!(%id, %root, "bookmark outside the managed folder; ignoring");
            return Ok(false);
        }

        let bookmark = self.bookmarks.node(id).await?;
        self.refresh_one(&bookmark).await?;
        Ok(true)
    }

    /// Rebuild every favicon under a (possibly new) root folder.
    pub async fn handle_root_replaced(&self, root: &BookmarkId) -> Result<RefreshReport> {
        let subtree = self.bookmarks.subtree(root).await?;
        Ok(self.refresh_subtree(&subtree).await)
    }
}
