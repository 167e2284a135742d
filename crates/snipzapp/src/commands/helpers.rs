use crate::error::{Result, SnipzError};
use crate::model::{same_name, Folder, Node, Snippet};

/// Where a snippet lives: the child positions leading from the root to its parent
/// folder, plus its own position in that folder's `list`.
///
/// Positions are only valid until the next structural change to the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnippetLocation {
    pub parent: Vec<usize>,
    pub position: usize,
}

pub fn fmt_path(path: &[String]) -> String {
    if path.is_empty() {
        "/".to_string()
    } else {
        path.join("/")
    }
}

/// Rejects a required text field that is empty or whitespace-only.
pub fn require_text(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SnipzError::InvalidInput(format!("{} must not be empty", field)));
    }
    Ok(())
}

/// Resolves a folder path to child positions, matching one folder per segment
/// case-insensitively. An empty path is the root itself.
pub fn folder_positions(root: &Folder, path: &[String]) -> Result<Vec<usize>> {
    let mut positions = Vec::with_capacity(path.len());
    let mut current = root;
    for segment in path {
        let (position, folder) = current
            .list
            .iter()
            .enumerate()
            .find_map(|(i, node)| match node {
                Node::Folder(folder) if same_name(&folder.name, segment) => Some((i, folder)),
                _ => None,
            })
            .ok_or_else(|| SnipzError::FolderNotFound(segment.clone()))?;
        positions.push(position);
        current = folder;
    }
    Ok(positions)
}

pub fn resolve_folder<'a>(root: &'a Folder, path: &[String]) -> Result<&'a Folder> {
    let mut current = root;
    for segment in path {
        current = current
            .subfolder(segment)
            .ok_or_else(|| SnipzError::FolderNotFound(segment.clone()))?;
    }
    Ok(current)
}

pub fn resolve_folder_mut<'a>(root: &'a mut Folder, path: &[String]) -> Result<&'a mut Folder> {
    let mut current = root;
    for segment in path {
        current = current
            .subfolder_mut(segment)
            .ok_or_else(|| SnipzError::FolderNotFound(segment.clone()))?;
    }
    Ok(current)
}

pub fn folder_at<'a>(root: &'a Folder, positions: &[usize]) -> Option<&'a Folder> {
    let mut current = root;
    for &position in positions {
        current = current.list.get(position)?.as_folder()?;
    }
    Some(current)
}

pub fn folder_at_mut<'a>(root: &'a mut Folder, positions: &[usize]) -> Option<&'a mut Folder> {
    let mut current = root;
    for &position in positions {
        current = current.list.get_mut(position)?.as_folder_mut()?;
    }
    Some(current)
}

pub fn snippet_at<'a>(root: &'a Folder, location: &SnippetLocation) -> Option<&'a Snippet> {
    folder_at(root, &location.parent)?
        .list
        .get(location.position)?
        .as_snippet()
}

pub fn snippet_at_mut<'a>(
    root: &'a mut Folder,
    location: &SnippetLocation,
) -> Option<&'a mut Snippet> {
    folder_at_mut(root, &location.parent)?
        .list
        .get_mut(location.position)?
        .as_snippet_mut()
}

/// Finds the first snippet, in pre-order, whose name equals `name` exactly.
///
/// Unlike sibling uniqueness, this match is case-sensitive.
pub fn find_snippet(root: &Folder, name: &str) -> Option<SnippetLocation> {
    let mut parent = Vec::new();
    search(root, name, &mut parent)
}

fn search(folder: &Folder, name: &str, parent: &mut Vec<usize>) -> Option<SnippetLocation> {
    for (position, node) in folder.list.iter().enumerate() {
        match node {
            Node::Snippet(snippet) if snippet.name == name => {
                return Some(SnippetLocation {
                    parent: parent.clone(),
                    position,
                });
            }
            Node::Snippet(_) => {}
            Node::Folder(child) => {
                parent.push(position);
                if let Some(found) = search(child, name, parent) {
                    return Some(found);
                }
                parent.pop();
            }
        }
    }
    None
}

/// Fails with `DuplicateName` when a child of `folder` other than the one at
/// `except` already uses `name` (case-insensitively).
pub fn ensure_unique(folder: &Folder, name: &str, except: Option<usize>) -> Result<()> {
    let clash = folder
        .list
        .iter()
        .enumerate()
        .any(|(i, node)| Some(i) != except && same_name(node.name(), name));
    if clash {
        return Err(SnipzError::DuplicateName(name.to_string()));
    }
    Ok(())
}

/// Fetches a snippet that a command has just written, after reindexing.
pub(crate) fn committed(root: &Folder, location: &SnippetLocation) -> Result<Snippet> {
    snippet_at(root, location)
        .cloned()
        .ok_or_else(|| SnipzError::Store("snippet vanished after commit".to_string()))
}
