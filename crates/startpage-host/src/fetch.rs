//! Favicon lookup and retrieval seam

use async_trait::async_trait;

use crate::Result;

/// Resolves and downloads favicons for bookmarked pages.
#[async_trait]
pub trait FaviconFetcher: Send + Sync {
    /// Resolve the favicon URL for a page.
    ///
    /// With `prefer_high_res` set, hosts that index multiple icon
    /// sizes return the largest.
    async fn resolve_favicon_url(&self, page_url: &str, prefer_high_res: bool) -> Result<String>;

    /// Download a favicon and return its encoded content.
    ///
    /// The content is opaque to the engine (typically a data URL) and
    /// is cached verbatim.
    async fn fetch_content(&self, favicon_url: &str) -> Result<String>;
}
