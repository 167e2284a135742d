//! # Domain Model: Folders and Snippets
//!
//! This module defines the two node kinds of the snippet tree: [`Folder`] and [`Snippet`],
//! joined by the [`Node`] sum type.
//!
//! ## The Tree
//!
//! ```text
//! Snippets            <-- root Folder, index 0, owned by the RootStore
//! ├── Work            <-- Folder, index 1
//! │   └── greeting    <-- Snippet, index 2
//! └── sig             <-- Snippet, index 3
//! ```
//!
//! - A folder's `list` is ordered. Insertion order is significant and preserved.
//! - Folders and snippets interleave freely in the same `list`.
//! - The root is always a [`Folder`]; it is never wrapped in a [`Node`] in memory.
//!
//! ## Names
//!
//! Within a single `list`, no two children may share a name under case-insensitive
//! comparison ([`same_name`]), regardless of kind. A folder named "Notes" and a snippet
//! named "notes" cannot be siblings.
//!
//! Snippet lookup for edit/delete is different: it is an *exact*, case-sensitive match
//! on the first snippet found in pre-order. See [`crate::commands::helpers::find_snippet`].
//!
//! ## Indexes
//!
//! Every node carries an `index` assigned by [`crate::index::set_indices`]. Indexes are
//! derived data: they are never persisted (`#[serde(skip)]`) and are recomputed after
//! every mutation and every load.
//!
//! ## Persisted Shape
//!
//! [`Node`] is internally tagged by `kind`, so the serialized form is plain data:
//!
//! ```text
//! { "kind": "folder",  "name": "Work", "list": [ ... ] }
//! { "kind": "snippet", "name": "greeting", "body": "Hi" }
//! ```

use serde::{Deserialize, Serialize};

/// Case-insensitive name comparison used for sibling uniqueness and folder paths.
pub fn same_name(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snippet {
    pub name: String,
    pub body: String,
    #[serde(skip)]
    pub index: usize,
}

impl Snippet {
    pub fn new(name: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            body: body.into(),
            index: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    pub name: String,
    #[serde(default)]
    pub list: Vec<Node>,
    #[serde(skip)]
    pub index: usize,
}

impl Folder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            list: Vec::new(),
            index: 0,
        }
    }

    /// Builder-style append, mostly useful for fixtures.
    pub fn with(mut self, node: impl Into<Node>) -> Self {
        self.list.push(node.into());
        self
    }

    /// Finds a direct child of either kind by case-insensitive name.
    pub fn child_named(&self, name: &str) -> Option<&Node> {
        self.list.iter().find(|node| same_name(node.name(), name))
    }

    /// Finds a direct child folder by case-insensitive name.
    pub fn subfolder(&self, name: &str) -> Option<&Folder> {
        self.list
            .iter()
            .filter_map(Node::as_folder)
            .find(|folder| same_name(&folder.name, name))
    }

    pub fn subfolder_mut(&mut self, name: &str) -> Option<&mut Folder> {
        self.list
            .iter_mut()
            .filter_map(Node::as_folder_mut)
            .find(|folder| same_name(&folder.name, name))
    }

    /// Total number of nodes below this folder (the folder itself excluded).
    pub fn count(&self) -> usize {
        self.list
            .iter()
            .map(|node| match node {
                Node::Folder(folder) => 1 + folder.count(),
                Node::Snippet(_) => 1,
            })
            .sum()
    }
}

/// A tree node: either a [`Folder`] or a [`Snippet`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Node {
    Folder(Folder),
    Snippet(Snippet),
}

impl Node {
    pub fn is_folder(&self) -> bool {
        matches!(self, Node::Folder(_))
    }

    pub fn is_snippet(&self) -> bool {
        matches!(self, Node::Snippet(_))
    }

    pub fn name(&self) -> &str {
        match self {
            Node::Folder(folder) => &folder.name,
            Node::Snippet(snippet) => &snippet.name,
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Node::Folder(folder) => folder.index,
            Node::Snippet(snippet) => snippet.index,
        }
    }

    pub fn as_folder(&self) -> Option<&Folder> {
        match self {
            Node::Folder(folder) => Some(folder),
            Node::Snippet(_) => None,
        }
    }

    pub fn as_folder_mut(&mut self) -> Option<&mut Folder> {
        match self {
            Node::Folder(folder) => Some(folder),
            Node::Snippet(_) => None,
        }
    }

    pub fn as_snippet(&self) -> Option<&Snippet> {
        match self {
            Node::Snippet(snippet) => Some(snippet),
            Node::Folder(_) => None,
        }
    }

    pub fn as_snippet_mut(&mut self) -> Option<&mut Snippet> {
        match self {
            Node::Snippet(snippet) => Some(snippet),
            Node::Folder(_) => None,
        }
    }
}

impl From<Folder> for Node {
    fn from(folder: Folder) -> Self {
        Node::Folder(folder)
    }
}

impl From<Snippet> for Node {
    fn from(snippet: Snippet) -> Self {
        Node::Snippet(snippet)
    }
}

/// Borrowed view over any node, including the root folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRef<'a> {
    Folder(&'a Folder),
    Snippet(&'a Snippet),
}

impl<'a> NodeRef<'a> {
    pub fn name(&self) -> &'a str {
        match self {
            NodeRef::Folder(folder) => &folder.name,
            NodeRef::Snippet(snippet) => &snippet.name,
        }
    }

    pub fn index(&self) -> usize {
        match self {
            NodeRef::Folder(folder) => folder.index,
            NodeRef::Snippet(snippet) => snippet.index,
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self, NodeRef::Folder(_))
    }
}

impl<'a> From<&'a Node> for NodeRef<'a> {
    fn from(node: &'a Node) -> Self {
        match node {
            Node::Folder(folder) => NodeRef::Folder(folder),
            Node::Snippet(snippet) => NodeRef::Snippet(snippet),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Folder {
        Folder::new("Snippets")
            .with(Folder::new("Work").with(Snippet::new("greeting", "Hi")))
            .with(Snippet::new("sig", "-- me"))
    }

    #[test]
    fn test_same_name_ignores_case() {
        assert!(same_name("Greeting", "greeting"));
        assert!(same_name("ÉTÉ", "été"));
        assert!(!same_name("greeting", "greetings"));
    }

    #[test]
    fn test_child_lookup_spans_both_kinds() {
        let root = sample();
        assert!(root.child_named("WORK").unwrap().is_folder());
        assert!(root.child_named("SIG").unwrap().is_snippet());
        assert!(root.child_named("missing").is_none());
    }

    #[test]
    fn test_subfolder_skips_snippets() {
        let root = sample();
        assert!(root.subfolder("sig").is_none());
        assert_eq!(root.subfolder("work").unwrap().name, "Work");
    }

    #[test]
    fn test_count_includes_nested_nodes() {
        assert_eq!(sample().count(), 3);
        assert_eq!(Folder::new("empty").count(), 0);
    }

    #[test]
    fn test_node_serializes_with_kind_tag() {
        let node = Node::from(Snippet::new("greeting", "Hi"));
        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"kind": "snippet", "name": "greeting", "body": "Hi"})
        );

        let folder: Node =
            serde_json::from_value(serde_json::json!({"kind": "folder", "name": "Work"})).unwrap();
        assert!(folder.as_folder().unwrap().list.is_empty());
    }
}
