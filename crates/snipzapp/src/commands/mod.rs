//! # Command Layer
//!
//! This module contains the **tree mutation logic** of snipz. Each command lives in its
//! own submodule and is a plain function over the root [`Folder`].
//!
//! ## Role and Responsibilities
//!
//! Commands:
//! - Validate the request **before** touching the tree
//! - Apply the change in place
//! - Recompute indexes with [`crate::index::set_indices`]
//! - Return the affected node, or a typed [`crate::error::SnipzError`]
//!
//! A command either fully applies or leaves the tree untouched. No partial mutation is
//! ever observable, so callers can hand the same root to the next command regardless of
//! the previous outcome.
//!
//! ## What Commands Do NOT Do
//!
//! - **Persistence**: the [`crate::store::RootStore`] writes after a success
//! - **Locking**: the store serializes mutations; commands take `&mut Folder`
//! - **Presentation**: the [`crate::api`] layer turns results into responses
//!
//! ## Snippet Identity
//!
//! Edit and delete address a snippet by name alone: the first snippet, in pre-order,
//! whose name matches *exactly*. Creating and moving use case-insensitive uniqueness.
//! The two rules are intentionally different.
//!
//! ## Command Modules
//!
//! - [`create`]: Add a snippet to a folder
//! - [`edit`]: Rename, rewrite, or move a snippet
//! - [`delete`]: Remove a snippet
//! - [`create_folder`]: Add an empty folder
//! - [`search`]: Find snippets by name or body text
//! - [`helpers`]: Path resolution and tree lookup

use serde::{Deserialize, Serialize};

#[cfg(test)]
use crate::model::Folder;

pub mod create;
pub mod create_folder;
pub mod delete;
pub mod edit;
pub mod helpers;
pub mod search;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub folder_path: Vec<String>,
}

impl CreateRequest {
    pub fn new(name: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            body: body.into(),
            folder_path: Vec::new(),
        }
    }

    pub fn in_folder<I, S>(mut self, path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.folder_path = path.into_iter().map(Into::into).collect();
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditRequest {
    #[serde(default)]
    pub snippet_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub folder_path: Option<Vec<String>>,
}

impl EditRequest {
    pub fn new(snippet_id: impl Into<String>) -> Self {
        Self {
            snippet_id: Some(snippet_id.into()),
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_folder<I, S>(mut self, path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.folder_path = Some(path.into_iter().map(Into::into).collect());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteRequest {
    #[serde(default)]
    pub snippet_id: Option<String>,
}

impl DeleteRequest {
    pub fn new(snippet_id: impl Into<String>) -> Self {
        Self {
            snippet_id: Some(snippet_id.into()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub folder_path: Vec<String>,
}

impl FolderRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            folder_path: Vec::new(),
        }
    }

    pub fn in_folder<I, S>(mut self, path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.folder_path = path.into_iter().map(Into::into).collect();
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    #[serde(default)]
    pub term: String,
}

/// Root "Snippets" holding an empty "Work" folder, indexed.
#[cfg(test)]
pub(crate) fn work_tree() -> Folder {
    let mut root = Folder::new("Snippets").with(Folder::new("Work"));
    crate::index::set_indices(&mut root);
    root
}
