//! [`StubFetcher`]: a deterministic favicon fetcher with failure
//! injection.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use startpage_host::{Error, FaviconFetcher, Result};

/// A [`FaviconFetcher`] that derives favicon URLs and content from the
/// page URL, so every result is predictable in assertions.
///
/// Resolution yields `{page}/favicon-large.png` (or `-small` when
/// high-res is not preferred); content is `icon-bytes:{favicon_url}`.
pub struct StubFetcher {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    fail_pages: HashMap<String, String>,
    fail_urls: HashMap<String, String>,
    resolve_calls: u64,
    fetch_calls: u64,
}

impl Default for StubFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl StubFetcher {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
        }
    }

    /// Make favicon resolution fail for one page URL.
    pub fn fail_resolve(&self, page_url: &str, message: &str) {
        let mut inner = self.inner.lock().unwrap();
        inner
            .fail_pages
            .insert(page_url.to_string(), message.to_string());
    }

    /// Make content download fail for one favicon URL.
    pub fn fail_fetch(&self, favicon_url: &str, message: &str) {
        let mut inner = self.inner.lock().unwrap();
        inner
            .fail_urls
            .insert(favicon_url.to_string(), message.to_string());
    }

    /// Number of resolution calls served.
    pub fn resolve_calls(&self) -> u64 {
        self.inner.lock().unwrap().resolve_calls
    }

    /// Number of download calls served.
    pub fn fetch_calls(&self) -> u64 {
        self.inner.lock().unwrap().fetch_calls
    }

    /// The favicon URL this stub resolves for a page.
    pub fn favicon_url_for(page_url: &str, prefer_high_res: bool) -> String {
        let size = if prefer_high_res { "large" } else { "small" };
        format!("{page_url}/favicon-{size}.png")
    }

    /// The content this stub serves for a favicon URL.
    pub fn content_for(favicon_url: &str) -> String {
        format!("icon-bytes:{favicon_url}")
    }
}

#[async_trait]
impl FaviconFetcher for StubFetcher {
    async fn resolve_favicon_url(&self, page_url: &str, prefer_high_res: bool) -> Result<String> {
        let mut inner = self.inner.lock().unwrap();
        inner.resolve_calls += 1;
        if let Some(message) = inner.fail_pages.get(page_url) {
            return Err(Error::favicon_unavailable(page_url, message.clone()));
        }
        Ok(Self::favicon_url_for(page_url, prefer_high_res))
    }

    async fn fetch_content(&self, favicon_url: &str) -> Result<String> {
        let mut inner = self.inner.lock().unwrap();
        inner.fetch_calls += 1;
        if let Some(message) = inner.fail_urls.get(favicon_url) {
            return Err(Error::fetch_failed(favicon_url, message.clone()));
        }
        Ok(Self::content_for(favicon_url))
    }
}
