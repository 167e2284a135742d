//! # Node Indexes
//!
//! Every node in the tree gets an integer `index`: its position in a depth-first,
//! pre-order walk that follows each folder's `list` order. The root folder takes
//! [`INDEX_ORIGIN`], its first child the next value, and so on:
//!
//! ```text
//! 0 Snippets
//! 1 ├── Work
//! 2 │   └── greeting
//! 3 └── sig
//! ```
//!
//! ## Properties
//!
//! - **Dense**: no gaps, no duplicates, `0..=root.count()`.
//! - **Contiguous subtrees**: a folder at index `i` with `n` descendants owns exactly
//!   `i+1..=i+n`. [`node_at`] relies on this to prune its search.
//! - **Global, not stable**: inserting a node shifts every index after it. Indexes
//!   are addresses into the *current* tree, not identifiers.
//!
//! **Developer Note**: every structural mutation must end with [`set_indices`] before
//! the change is persisted or handed back to a caller. The commands in
//! [`crate::commands`] do this; code that edits a [`Folder`] directly must too.

use crate::model::{Folder, Node, NodeRef, Snippet};

/// Index assigned to the root folder.
pub const INDEX_ORIGIN: usize = 0;

/// Assigns pre-order indexes to every node under (and including) `root`.
///
/// Calling it twice without a mutation in between produces the same assignment.
pub fn set_indices(root: &mut Folder) {
    let mut next = INDEX_ORIGIN;
    assign_folder(root, &mut next);
}

fn assign_folder(folder: &mut Folder, next: &mut usize) {
    folder.index = take(next);
    for node in &mut folder.list {
        match node {
            Node::Folder(child) => assign_folder(child, next),
            Node::Snippet(snippet) => snippet.index = take(next),
        }
    }
}

fn take(next: &mut usize) -> usize {
    let current = *next;
    *next += 1;
    current
}

/// One row of the flattened tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedEntry<'a> {
    pub index: usize,
    /// 0 for the root, 1 for its children, ...
    pub depth: usize,
    /// Names of the folders between the root and this node, usable as a `folderPath`.
    pub path: Vec<&'a str>,
    pub node: NodeRef<'a>,
}

impl<'a> IndexedEntry<'a> {
    pub fn is_folder(&self) -> bool {
        self.node.is_folder()
    }

    pub fn snippet(&self) -> Option<&'a Snippet> {
        match self.node {
            NodeRef::Snippet(snippet) => Some(snippet),
            NodeRef::Folder(_) => None,
        }
    }
}

/// Flattens the tree in index order. The root is the first entry.
pub fn entries(root: &Folder) -> Vec<IndexedEntry<'_>> {
    let mut out = Vec::with_capacity(root.count() + 1);
    out.push(IndexedEntry {
        index: root.index,
        depth: 0,
        path: Vec::new(),
        node: NodeRef::Folder(root),
    });
    collect(root, &mut Vec::new(), &mut out);
    out
}

fn collect<'a>(folder: &'a Folder, path: &mut Vec<&'a str>, out: &mut Vec<IndexedEntry<'a>>) {
    for node in &folder.list {
        out.push(IndexedEntry {
            index: node.index(),
            depth: path.len() + 1,
            path: path.clone(),
            node: NodeRef::from(node),
        });
        if let Node::Folder(child) = node {
            path.push(&child.name);
            collect(child, path, out);
            path.pop();
        }
    }
}

/// Finds the node carrying `index`, descending only into the folder whose
/// range contains it.
pub fn node_at(root: &Folder, index: usize) -> Option<NodeRef<'_>> {
    if root.index == index {
        return Some(NodeRef::Folder(root));
    }
    let mut current = root;
    loop {
        let mut next = None;
        for node in &current.list {
            match node {
                Node::Snippet(snippet) if snippet.index == index => {
                    return Some(NodeRef::Snippet(snippet));
                }
                Node::Folder(folder) if folder.index == index => {
                    return Some(NodeRef::Folder(folder));
                }
                Node::Folder(folder)
                    if index > folder.index && index <= folder.index + folder.count() =>
                {
                    next = Some(folder);
                    break;
                }
                _ => {}
            }
        }
        current = next?;
    }
}
