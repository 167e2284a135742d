use crate::commands::helpers::{ensure_unique, fmt_path, require_text, resolve_folder, resolve_folder_mut};
use crate::commands::FolderRequest;
use crate::error::{Result, SnipzError};
use crate::index::set_indices;
use crate::model::{Folder, Node};
use tracing::info;

/// Appends an empty folder under `folder_path`. Same validation rules as snippets.
pub fn run(root: &mut Folder, request: &FolderRequest) -> Result<Folder> {
    require_text("name", &request.name)?;

    let parent = resolve_folder_mut(root, &request.folder_path)?;
    ensure_unique(parent, &request.name, None)?;
    parent.list.push(Node::Folder(Folder::new(&request.name)));
    set_indices(root);

    let created = resolve_folder(root, &request.folder_path)?
        .list
        .last()
        .and_then(Node::as_folder)
        .cloned()
        .ok_or_else(|| SnipzError::Store("folder vanished after commit".to_string()))?;
    info!(
        name = %created.name,
        parent = %fmt_path(&request.folder_path),
        index = created.index,
        "folder created"
    );
    Ok(created)
}
