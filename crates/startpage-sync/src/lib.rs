//! Bookmark-to-favicon synchronization engine for Startpage Manager
//!
//! Keeps a cached favicon image in sync with every bookmark under a
//! managed folder of the host bookmark tree, implementing:
//!
//! - **Root folder management**: locate or create the managed folder and
//!   persist its id across restarts
//! - **Schema migration**: one-time full cache rebuild when the store
//!   layout version advances
//! - **Incremental sync**: refresh a single favicon when a bookmark is
//!   created in or moved into the managed folder
//! - **Tree algorithms**: membership and flattening over the bookmark
//!   subtree, iterative and depth-safe
//!
//! # Architecture
//!
//! The engine only ever talks to the host through the trait seams in
//! `startpage-host`; the embedding host forwards its notifications into
//! the service mailbox:
//!
//! ```text
//!        host notifications --> mpsc --> SyncService
//!                                            |
//!                         +------------------+---------------+
//!                         |                  |               |
//!                 RootFolderManager    StoreMigrator  FaviconSynchronizer
//!                         |                  |               |
//!                  BookmarkStore        CacheStore     FaviconFetcher
//! ```

pub mod config;
pub mod error;
pub mod migrate;
pub mod root_folder;
pub mod service;
pub mod synchronizer;
pub mod tree;

pub use config::SyncConfig;
pub use error::{Error, Result};
pub use migrate::{STORE_VERSION, StoreMigrator};
pub use root_folder::RootFolderManager;
pub use service::{HostEvent, StartupReport, SyncService};
pub use synchronizer::{FaviconSynchronizer, RefreshFailure, RefreshReport};
pub use tree::{contains_id, flatten_leaves, folders_only};
