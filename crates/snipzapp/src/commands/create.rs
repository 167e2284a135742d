use crate::commands::helpers::{
    committed, ensure_unique, fmt_path, folder_positions, require_text, resolve_folder_mut,
    SnippetLocation,
};
use crate::commands::CreateRequest;
use crate::error::{Result, SnipzError};
use crate::index::set_indices;
use crate::model::{Folder, Node, Snippet};
use tracing::info;

pub fn run(root: &mut Folder, request: &CreateRequest) -> Result<Snippet> {
    require_text("name", &request.name)?;
    if request.body.is_empty() {
        return Err(SnipzError::InvalidInput("body must not be empty".to_string()));
    }

    let parent = folder_positions(root, &request.folder_path)?;
    let folder = resolve_folder_mut(root, &request.folder_path)?;
    ensure_unique(folder, &request.name, None)?;

    folder
        .list
        .push(Node::Snippet(Snippet::new(&request.name, &request.body)));
    let location = SnippetLocation {
        parent,
        position: folder.list.len() - 1,
    };
    set_indices(root);

    let snippet = committed(root, &location)?;
    info!(
        name = %snippet.name,
        folder = %fmt_path(&request.folder_path),
        index = snippet.index,
        "snippet created"
    );
    Ok(snippet)
}
