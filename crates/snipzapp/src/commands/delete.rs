use crate::commands::helpers::{find_snippet, folder_at_mut};
use crate::commands::DeleteRequest;
use crate::error::{Result, SnipzError};
use crate::index::set_indices;
use crate::model::{Folder, Node, Snippet};
use tracing::info;

/// Removes a snippet and returns it as it was before removal.
pub fn run(root: &mut Folder, request: &DeleteRequest) -> Result<Snippet> {
    let id = request
        .snippet_id
        .as_deref()
        .filter(|id| !id.is_empty())
        .ok_or_else(|| SnipzError::InvalidInput("snippetId is required".to_string()))?;

    let location = find_snippet(root, id).ok_or_else(|| SnipzError::NotFound(id.to_string()))?;
    let stale = || SnipzError::Store("snippet location is stale".to_string());
    let parent = folder_at_mut(root, &location.parent).ok_or_else(stale)?;
    if !parent
        .list
        .get(location.position)
        .is_some_and(Node::is_snippet)
    {
        return Err(stale());
    }
    let removed = match parent.list.remove(location.position) {
        Node::Snippet(snippet) => snippet,
        Node::Folder(_) => return Err(stale()),
    };

    set_indices(root);
    info!(id, index = removed.index, "snippet deleted");
    Ok(removed)
}
