//! In-memory host fixtures for Startpage Manager tests.
//!
//! Every fixture counts the host calls it serves, so tests can assert
//! not just end state but how many folder creations, favicon fetches,
//! and cache writes a scenario performed.

pub mod bookmarks;
pub mod fetch;
pub mod store;

pub use bookmarks::MemoryBookmarks;
pub use fetch::StubFetcher;
pub use store::MemoryStore;
