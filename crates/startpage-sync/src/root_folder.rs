//! Managed root folder location and creation
//!
//! The engine owns one folder in the host bookmark tree and remembers
//! its id in the cache store. Users are free to rename or move the
//! folder; only deleting it makes the engine create a fresh one.

use std::sync::Arc;

use serde_json::Value;
use startpage_host::keys::BOOKMARK_FOLDER_KEY;
use startpage_host::{BookmarkId, BookmarkStore, CacheStore};

use crate::Result;

/// Locates the managed bookmark folder, creating it when missing.
pub struct RootFolderManager {
    bookmarks: Arc<dyn BookmarkStore>,
    cache: Arc<dyn CacheStore>,
    folder_title: String,
}

impl RootFolderManager {
    pub fn new(
        bookmarks: Arc<dyn BookmarkStore>,
        cache: Arc<dyn CacheStore>,
        folder_title: impl Into<String>,
    ) -> Self {
        Self {
            bookmarks,
            cache,
            folder_title: folder_title.into(),
        }
    }

    /// Return the id of the managed folder, converging persisted state
    /// on the way there.
    ///
    /// - no recorded id → create the folder and record its id
    /// - recorded id resolves → return it, nothing written
    /// - recorded id dangles → create a replacement and record it
    ///
    /// Idempotent while the tree is unchanged: a second call returns
    /// the identical id without further host writes. Host failures
    /// other than not-found propagate untouched.
    pub async fn ensure(&self) -> Result<BookmarkId> {
        let recorded = self
            .cache
            .get(BOOKMARK_FOLDER_KEY)
            .await?
            .and_then(|value| value.as_str().map(BookmarkId::from));

        let Some(id) = recorded else {
            tracing::info!(title = %self.folder_title, "no managed folder recorded; creating one");
            return self.create_and_record().await;
        };

        match self.bookmarks.node(&id).await {
            Ok(_) => Ok(id),
            Err(err) if err.is_not_found() => {
                tracing::warn!(%id, "recorded folder no longer exists; recreating");
                self.create_and_record().await
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn create_and_record(&self) -> Result<BookmarkId> {
        let folder = self.bookmarks.create_folder(&self.folder_title).await?;
        self.cache
            .set(BOOKMARK_FOLDER_KEY, Value::from(folder.id.as_str()))
            .await?;
        tracing::debug!(id = %folder.id, "managed folder recorded");
        Ok(folder.id)
    }
}
