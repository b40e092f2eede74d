//! Bookmark tree data model and host access trait
//!
//! The host bookmark tree is the source of truth for everything the
//! engine derives. Nodes are either folders (children, no URL) or leaf
//! bookmarks (URL, no children); the sum type makes the distinction
//! unrepresentable to get wrong.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::Result;

/// Opaque, host-assigned bookmark identifier.
///
/// Ids are stable for the lifetime of a node and unique within the
/// tree; nothing else about their shape is guaranteed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookmarkId(String);

impl BookmarkId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BookmarkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BookmarkId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for BookmarkId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A node in the host bookmark tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookmarkNode {
    pub id: BookmarkId,
    pub title: String,
    #[serde(flatten)]
    pub kind: NodeKind,
}

/// What a node is, tagged the way the host serializes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NodeKind {
    Folder {
        #[serde(default)]
        children: Vec<BookmarkNode>,
    },
    Bookmark {
        url: String,
    },
}

impl BookmarkNode {
    /// Build a folder node with the given children.
    pub fn folder(
        id: impl Into<BookmarkId>,
        title: impl Into<String>,
        children: Vec<BookmarkNode>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            kind: NodeKind::Folder { children },
        }
    }

    /// Build a leaf bookmark node.
    pub fn bookmark(
        id: impl Into<BookmarkId>,
        title: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            kind: NodeKind::Bookmark { url: url.into() },
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self.kind, NodeKind::Folder { .. })
    }

    /// Page URL for leaves, `None` for folders.
    pub fn url(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Bookmark { url } => Some(url),
            NodeKind::Folder { .. } => None,
        }
    }

    /// Children in stored order; empty for leaves.
    pub fn children(&self) -> &[BookmarkNode] {
        match &self.kind {
            NodeKind::Folder { children } => children,
            NodeKind::Bookmark { .. } => &[],
        }
    }
}

/// A bookmark mutation reported by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookmarkEvent {
    Created(BookmarkId),
    Moved(BookmarkId),
    Removed(BookmarkId),
}

impl BookmarkEvent {
    /// Id of the node the event is about.
    pub fn id(&self) -> &BookmarkId {
        match self {
            Self::Created(id) | Self::Moved(id) | Self::Removed(id) => id,
        }
    }
}

/// Read access to the host bookmark tree, plus folder creation.
///
/// Folder creation is the only mutation the engine ever performs; all
/// other tree changes originate with the user.
#[async_trait]
pub trait BookmarkStore: Send + Sync {
    /// Fetch a single node without its descendants.
    ///
    /// A dangling id reports the dedicated not-found error so callers
    /// can distinguish it from backend failures.
    async fn node(&self, id: &BookmarkId) -> Result<BookmarkNode>;

    /// Fetch a node together with its full descendant tree.
    async fn subtree(&self, id: &BookmarkId) -> Result<BookmarkNode>;

    /// Create a folder with the given title and return the new node.
    async fn create_folder(&self, title: &str) -> Result<BookmarkNode>;
}
