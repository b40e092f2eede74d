//! Bookmark tree algorithms
//!
//! Membership and flattening over a fetched subtree. All traversals are
//! iterative with an explicit worklist, so pathologically deep trees
//! cannot overflow the stack.

use startpage_host::{BookmarkId, BookmarkNode, NodeKind};

/// Whether `target` names a leaf bookmark anywhere under `root`.
///
/// Only leaves are compared: a folder whose id equals `target` does not
/// match, and `root` itself is never considered. Returns on the first
/// hit.
pub fn contains_id(root: &BookmarkNode, target: &BookmarkId) -> bool {
    let mut stack: Vec<&BookmarkNode> = root.children().iter().collect();
    while let Some(node) = stack.pop() {
        match &node.kind {
            NodeKind::Bookmark { .. } => {
                if &node.id == target {
                    return true;
                }
            }
            NodeKind::Folder { children } => stack.extend(children.iter()),
        }
    }
    false
}

/// All leaf bookmarks under `root`, depth first and left to right in
/// stored child order.
///
/// Folders contribute nothing; a childless `root` yields an empty
/// vector.
pub fn flatten_leaves(root: &BookmarkNode) -> Vec<&BookmarkNode> {
    let mut leaves = Vec::new();
    let mut stack: Vec<&BookmarkNode> = root.children().iter().rev().collect();
    while let Some(node) = stack.pop() {
        match &node.kind {
            NodeKind::Bookmark { .. } => leaves.push(node),
            NodeKind::Folder { children } => stack.extend(children.iter().rev()),
        }
    }
    leaves
}

/// A copy of the subtree with every leaf pruned, preserving child
/// order.
///
/// Folder pickers want the structure without the bookmarks. The root
/// node itself is returned as-is.
pub fn folders_only(root: &BookmarkNode) -> BookmarkNode {
    let mut filtered = root.clone();
    let mut stack: Vec<&mut BookmarkNode> = vec![&mut filtered];
    while let Some(node) = stack.pop() {
        if let NodeKind::Folder { children } = &mut node.kind {
            children.retain(|child| child.is_folder());
            stack.extend(children.iter_mut());
        }
    }
    filtered
}
