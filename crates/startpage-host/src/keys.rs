//! Durable key layout of the favicon cache
//!
//! These strings are the persisted schema. Changing any of them
//! orphans existing state, so layout changes go through a
//! schema-version bump instead.

use crate::bookmarks::BookmarkId;

/// Key holding the integer schema version of the cache layout.
pub const STORE_VERSION_KEY: &str = "store_version";

/// Key holding the id of the managed root folder.
pub const BOOKMARK_FOLDER_KEY: &str = "bookmarkFolderId";

/// Prefix of per-bookmark favicon content keys.
pub const FAVICON_CONTENT_PREFIX: &str = "favicon_content_";

/// Cache key for one bookmark's favicon content.
pub fn favicon_content_key(id: &BookmarkId) -> String {
    format!("{FAVICON_CONTENT_PREFIX}{id}")
}
