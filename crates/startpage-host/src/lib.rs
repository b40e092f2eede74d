//! Host-environment boundary for Startpage Manager
//!
//! Defines the bookmark tree data model, the durable key layout of the
//! favicon cache, and the trait seams the sync engine drives: bookmark
//! access, favicon retrieval, and cache storage. Host integrations
//! implement these traits; the engine never talks to a concrete host
//! API directly.

pub mod bookmarks;
pub mod error;
pub mod fetch;
pub mod keys;
pub mod storage;

pub use bookmarks::{BookmarkEvent, BookmarkId, BookmarkNode, BookmarkStore, NodeKind};
pub use error::{Error, Result};
pub use fetch::FaviconFetcher;
pub use storage::{CacheStore, StateChange};
