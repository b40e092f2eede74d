//! [`MemoryBookmarks`]: an in-memory bookmark tree for test scenarios.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use startpage_host::{BookmarkId, BookmarkNode, BookmarkStore, Error, NodeKind, Result};

/// An in-memory bookmark tree implementing [`BookmarkStore`].
///
/// Ids are assigned sequentially (`"1"`, `"2"`, ...). Nodes added
/// without a parent sit at the top level, outside any managed folder,
/// which is how tests model out-of-scope bookmarks.
///
/// # Example
///
/// ```rust
/// use startpage_test_utils::MemoryBookmarks;
///
/// let bookmarks = MemoryBookmarks::new();
/// let root = bookmarks.add_folder(None, "Favorites");
/// bookmarks.add_bookmark(Some(&root), "News", "https://example.com");
/// ```
pub struct MemoryBookmarks {
    inner: Mutex<Inner>,
}

struct Inner {
    roots: Vec<BookmarkNode>,
    next_id: u64,
    created_folders: u64,
    broken: HashMap<BookmarkId, String>,
}

impl Default for MemoryBookmarks {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBookmarks {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                roots: Vec::new(),
                next_id: 0,
                created_folders: 0,
                broken: HashMap::new(),
            }),
        }
    }

    /// Add a folder under `parent` (top level when `None`) and return
    /// its id.
    ///
    /// # Panics
    /// Panics if `parent` does not name an existing folder.
    pub fn add_folder(&self, parent: Option<&BookmarkId>, title: &str) -> BookmarkId {
        let mut inner = self.inner.lock().unwrap();
        let id = inner.fresh_id();
        let node = BookmarkNode::folder(id.clone(), title, vec![]);
        inner.attach(parent, node);
        id
    }

    /// Add a leaf bookmark under `parent` (top level when `None`) and
    /// return its id.
    ///
    /// # Panics
    /// Panics if `parent` does not name an existing folder.
    pub fn add_bookmark(&self, parent: Option<&BookmarkId>, title: &str, url: &str) -> BookmarkId {
        let mut inner = self.inner.lock().unwrap();
        let id = inner.fresh_id();
        let node = BookmarkNode::bookmark(id.clone(), title, url);
        inner.attach(parent, node);
        id
    }

    /// Delete a node (and its descendants). Returns whether anything
    /// was removed.
    pub fn remove(&self, id: &BookmarkId) -> bool {
        let mut inner = self.inner.lock().unwrap();
        remove_from(&mut inner.roots, id)
    }

    /// Make lookups of `id` fail with a backend error instead of
    /// not-found.
    pub fn break_lookup(&self, id: &BookmarkId, message: &str) {
        let mut inner = self.inner.lock().unwrap();
        inner.broken.insert(id.clone(), message.to_string());
    }

    /// Number of folders created through the [`BookmarkStore`] trait.
    pub fn created_folders(&self) -> u64 {
        self.inner.lock().unwrap().created_folders
    }
}

impl Inner {
    fn fresh_id(&mut self) -> BookmarkId {
        self.next_id += 1;
        BookmarkId::from(self.next_id.to_string())
    }

    fn attach(&mut self, parent: Option<&BookmarkId>, node: BookmarkNode) {
        match parent {
            None => self.roots.push(node),
            Some(id) => {
                let parent = find_mut(&mut self.roots, id)
                    .unwrap_or_else(|| panic!("MemoryBookmarks: no such parent: {id}"));
                match &mut parent.kind {
                    NodeKind::Folder { children } => children.push(node),
                    NodeKind::Bookmark { .. } => {
                        panic!("MemoryBookmarks: parent {id} is not a folder")
                    }
                }
            }
        }
    }
}

fn find<'a>(nodes: &'a [BookmarkNode], id: &BookmarkId) -> Option<&'a BookmarkNode> {
    for node in nodes {
        if &node.id == id {
            return Some(node);
        }
        if let Some(found) = find(node.children(), id) {
            return Some(found);
        }
    }
    None
}

fn find_mut<'a>(nodes: &'a mut [BookmarkNode], id: &BookmarkId) -> Option<&'a mut BookmarkNode> {
    for node in nodes {
        if &node.id == id {
            return Some(node);
        }
        if let NodeKind::Folder { children } = &mut node.kind {
            if let Some(found) = find_mut(children, id) {
                return Some(found);
            }
        }
    }
    None
}

fn remove_from(nodes: &mut Vec<BookmarkNode>, id: &BookmarkId) -> bool {
    if let Some(pos) = nodes.iter().position(|n| &n.id == id) {
        nodes.remove(pos);
        return true;
    }
    for node in nodes {
        if let NodeKind::Folder { children } = &mut node.kind {
            if remove_from(children, id) {
                return true;
            }
        }
    }
    false
}

#[async_trait]
impl BookmarkStore for MemoryBookmarks {
    async fn node(&self, id: &BookmarkId) -> Result<BookmarkNode> {
        let inner = self.inner.lock().unwrap();
        if let Some(message) = inner.broken.get(id) {
            return Err(Error::bookmarks(message.clone()));
        }
        let found = find(&inner.roots, id).ok_or_else(|| Error::bookmark_not_found(id.clone()))?;
        // A single-node fetch carries no descendants.
        Ok(match &found.kind {
            NodeKind::Folder { .. } => {
                BookmarkNode::folder(found.id.clone(), found.title.clone(), vec![])
            }
            NodeKind::Bookmark { .. } => found.clone(),
        })
    }

    async fn subtree(&self, id: &BookmarkId) -> Result<BookmarkNode> {
        let inner = self.inner.lock().unwrap();
        if let Some(message) = inner.broken.get(id) {
            return Err(Error::bookmarks(message.clone()));
        }
        find(&inner.roots, id)
            .cloned()
            .ok_or_else(|| Error::bookmark_not_found(id.clone()))
    }

    async fn create_folder(&self, title: &str) -> Result<BookmarkNode> {
        let mut inner = self.inner.lock().unwrap();
        let id = inner.fresh_id();
        let node = BookmarkNode::folder(id, title, vec![]);
        inner.roots.push(node.clone());
        inner.created_folders += 1;
        Ok(node)
    }
}
