//! Error types for startpage-host

use crate::bookmarks::BookmarkId;

/// Result type for host-boundary operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported by host integrations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("bookmark {id} not found")]
    BookmarkNotFound { id: BookmarkId },

    #[error("bookmark backend failure: {message}")]
    Bookmarks { message: String },

    #[error("storage failure for key {key}: {message}")]
    Storage { key: String, message: String },

    #[error("no favicon for {page_url}: {message}")]
    FaviconUnavailable { page_url: String, message: String },

    #[error("favicon fetch failed for {url}: {message}")]
    FetchFailed { url: String, message: String },
}

impl Error {
    pub fn bookmark_not_found(id: impl Into<BookmarkId>) -> Self {
        Self::BookmarkNotFound { id: id.into() }
    }

    pub fn bookmarks(message: impl Into<String>) -> Self {
        Self::Bookmarks {
            message: message.into(),
        }
    }

    pub fn storage(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Storage {
            key: key.into(),
            message: message.into(),
        }
    }

    pub fn favicon_unavailable(page_url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::FaviconUnavailable {
            page_url: page_url.into(),
            message: message.into(),
        }
    }

    pub fn fetch_failed(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::FetchFailed {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Whether this is the dangling-id case hosts report when a
    /// recorded bookmark no longer exists.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::BookmarkNotFound { .. })
    }
}
