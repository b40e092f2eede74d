//! Startup composition and event dispatch
//!
//! One service instance owns the whole engine: it converges the managed
//! folder, runs migration, and then drains a host-event mailbox until
//! the channel closes. Handler failures are logged and contained; the
//! loop itself only ends when the sender side goes away.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::Receiver;

use startpage_host::keys::BOOKMARK_FOLDER_KEY;
use startpage_host::{
    BookmarkEvent, BookmarkId, BookmarkStore, CacheStore, FaviconFetcher, StateChange,
};

use crate::Result;
use crate::config::SyncConfig;
use crate::migrate::StoreMigrator;
use crate::root_folder::RootFolderManager;
use crate::synchronizer::{FaviconSynchronizer, RefreshReport};

/// Everything the embedding host forwards into the engine.
#[derive(Debug, Clone)]
pub enum HostEvent {
    Bookmark(BookmarkEvent),
    StorageChanged(Vec<StateChange>),
}

/// What the startup pass did.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartupReport {
    /// Id of the managed folder after convergence.
    pub root_folder_id: BookmarkId,
    /// Whether the store layout version was advanced.
    pub store_migrated: bool,
    /// The full rebuild that a migration triggered, if one did.
    pub reconciliation: Option<RefreshReport>,
}

/// Wires the engine together and drives it.
pub struct SyncService {
    root_folders: RootFolderManager,
    migrator: StoreMigrator,
    synchronizer: FaviconSynchronizer,
}

impl SyncService {
    /// Service with the stock configuration.
    pub fn new(
        bookmarks: Arc<dyn BookmarkStore>,
        cache: Arc<dyn CacheStore>,
        fetcher: Arc<dyn FaviconFetcher>,
    ) -> Self {
        Self::with_config(bookmarks, cache, fetcher, SyncConfig::default())
    }

    pub fn with_config(
        bookmarks: Arc<dyn BookmarkStore>,
        cache: Arc<dyn CacheStore>,
        fetcher: Arc<dyn FaviconFetcher>,
        config: SyncConfig,
    ) -> Self {
        Self {
            root_folders: RootFolderManager::new(
                bookmarks.clone(),
                cache.clone(),
                config.folder_title,
            ),
            migrator: StoreMigrator::new(cache.clone()),
            synchronizer: FaviconSynchronizer::new(
                bookmarks,
                cache,
                fetcher,
                config.prefer_high_res,
            ),
        }
    }

    /// Converge the managed folder, migrate the store layout, and
    /// rebuild the cache when migration says so.
    pub async fn start(&self) -> Result<StartupReport> {
        let root = self.root_folders.ensure().await?;
        let migrated = self.migrator.check_and_migrate().await?;
        let reconciliation = if migrated {
            Some(self.synchronizer.handle_root_replaced(&root).await?)
        } else {
            None
        };
        tracing::info!(%root, migrated, "sync service ready");
        Ok(StartupReport {
            root_folder_id: root,
            store_migrated: migrated,
            reconciliation,
        })
    }

    /// Route one host event.
    ///
    /// `root` is the dispatcher's current managed-folder binding; a
    /// storage change replacing the folder rebinds it. Handler errors
    /// are logged, never returned.
    pub async fn dispatch(&self, root: &mut BookmarkId, event: HostEvent) {
        match event {
            HostEvent::Bookmark(BookmarkEvent::Removed(id)) => {
                // Removals are not tracked; stale entries stay until
                // the next full rebuild.
                tracing::debug!(%id, "bookmark removed; cache entry left in place");
            }
            HostEvent::Bookmark(event) => {
                let id = event.id();
                match self.synchronizer.handle_bookmark_event(root, id).await {
                    Ok(refreshed) => {
                        tracing::debug!(%id, refreshed, "bookmark event handled");
                    }
                    Err(err) => {
                        tracing::warn!(%id, error = %err, "bookmark event handling failed");
                    }
                }
            }
            HostEvent::StorageChanged(changes) => {
                for change in changes {
                    self.handle_storage_change(root, change).await;
                }
            }
        }
    }

    async fn handle_storage_change(&self, root: &mut BookmarkId, change: StateChange) {
        if change.key != BOOKMARK_FOLDER_KEY {
            return;
        }
        let Some(new_root) = change.new_value.as_ref().and_then(|value| value.as_str()) else {
            tracing::debug!("managed folder key changed without a usable id; ignoring");
            return;
        };

        *root = BookmarkId::from(new_root);
        match self.synchronizer.handle_root_replaced(root).await {
            Ok(report) => {
                tracing::info!(
                    %root,
                    refreshed = report.refreshed.len(),
                    failed = report.failures.len(),
                    "managed folder replaced; cache rebuilt"
                );
            }
            Err(err) => {
                tracing::warn!(%root, error = %err, "rebuild after folder replacement failed");
            }
        }
    }

    /// Start up, then drain the mailbox until the channel closes.
    ///
    /// Events sent while startup is still running buffer in the
    /// channel and are handled afterwards.
    pub async fn run(&self, mut events: Receiver<HostEvent>) -> Result<()> {
        let startup = self.start().await?;
        let mut root = startup.root_folder_id;
        while let Some(event) = events.recv().await {
            self.dispatch(&mut root, event).await;
        }
        tracing::debug!("event channel closed; sync service stopping");
        Ok(())
    }
}
