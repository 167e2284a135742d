use crate::commands::helpers::{
    committed, ensure_unique, find_snippet, fmt_path, folder_at, folder_at_mut, folder_positions,
    require_text, snippet_at_mut, SnippetLocation,
};
use crate::commands::EditRequest;
use crate::error::{Result, SnipzError};
use crate::index::set_indices;
use crate::model::{Folder, Node, Snippet};
use tracing::{debug, info};

pub fn run(root: &mut Folder, request: &EditRequest) -> Result<Snippet> {
    // 1. Validate the request shape
    let id = request
        .snippet_id
        .as_deref()
        .filter(|id| !id.is_empty())
        .ok_or_else(|| SnipzError::InvalidInput("snippetId is required".to_string()))?;
    if request.name.is_none() && request.body.is_none() && request.folder_path.is_none() {
        return Err(SnipzError::InvalidInput(
            "nothing to change: supply name, body or folderPath".to_string(),
        ));
    }
    if let Some(name) = &request.name {
        require_text("name", name)?;
    }
    if matches!(request.body.as_deref(), Some("")) {
        return Err(SnipzError::InvalidInput("body must not be empty".to_string()));
    }

    // 2. Locate
    let location = find_snippet(root, id).ok_or_else(|| SnipzError::NotFound(id.to_string()))?;
    debug!(id, parent = ?location.parent, position = location.position, "snippet located");

    // 3. Validate the destination before touching anything
    let final_name = request.name.as_deref().unwrap_or(id);
    let target = match &request.folder_path {
        Some(path) => Some(folder_positions(root, path)?),
        None => None,
    };
    let destination = target.as_deref().unwrap_or(location.parent.as_slice());
    let destination_folder = folder_at(root, destination).ok_or_else(stale)?;
    let except = (destination == location.parent.as_slice()).then_some(location.position);
    if target.is_some() || request.name.is_some() {
        ensure_unique(destination_folder, final_name, except)?;
    }

    // 4. Apply
    let final_location = match target {
        Some(target) => {
            let target = shift_after_removal(target, &location);
            let parent = folder_at_mut(root, &location.parent).ok_or_else(stale)?;
            let mut node = parent.list.remove(location.position);
            if let Node::Snippet(snippet) = &mut node {
                apply(snippet, request);
            }
            let folder = folder_at_mut(root, &target).ok_or_else(stale)?;
            folder.list.push(node);
            SnippetLocation {
                position: folder.list.len() - 1,
                parent: target,
            }
        }
        None => {
            let snippet = snippet_at_mut(root, &location).ok_or_else(stale)?;
            apply(snippet, request);
            location
        }
    };

    // 5. Reindex
    set_indices(root);
    let snippet = committed(root, &final_location)?;
    info!(
        id,
        name = %snippet.name,
        moved_to = ?request.folder_path.as_deref().map(fmt_path),
        "snippet edited"
    );
    Ok(snippet)
}

fn apply(snippet: &mut Snippet, request: &EditRequest) {
    if let Some(name) = &request.name {
        snippet.name = name.clone();
    }
    if let Some(body) = &request.body {
        snippet.body = body.clone();
    }
}

/// Rewrites a folder path so it stays valid once the snippet at `removed` is taken
/// out of its parent: a step through that parent past the removed slot moves back one.
fn shift_after_removal(mut target: Vec<usize>, removed: &SnippetLocation) -> Vec<usize> {
    let depth = removed.parent.len();
    if target.len() > depth
        && target[..depth] == removed.parent[..]
        && target[depth] > removed.position
    {
        target[depth] -= 1;
    }
    target
}

fn stale() -> SnipzError {
    SnipzError::Store("snippet location is stale".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{create, work_tree, CreateRequest};

    fn with_greeting() -> Folder {
        let mut root = work_tree();
        create::run(
            &mut root,
            &CreateRequest::new("greeting", "Hi").in_folder(["Work"]),
        )
        .unwrap();
        root
    }

    #[test]
    fn test_body_only_edit_keeps_name_and_parent() {
        let mut root = with_greeting();
        let snippet = run(&mut root, &EditRequest::new("greeting").with_body("Hello")).unwrap();

        assert_eq!(snippet.name, "greeting");
        assert_eq!(snippet.body, "Hello");
        let work = root.subfolder("Work").unwrap();
        assert_eq!(work.list[0].as_snippet().unwrap().body, "Hello");
    }

    #[test]
    fn test_moves_to_root_with_empty_path() {
        let mut root = with_greeting();
        let total = root.count();

        let snippet = run(
            &mut root,
            &EditRequest::new("greeting").with_folder(Vec::<String>::new()),
        )
        .unwrap();

        assert!(root.subfolder("Work").unwrap().list.is_empty());
        let names: Vec<_> = root.list.iter().map(|n| n.name()).collect();
        assert_eq!(names, vec!["Work", "greeting"]);
        assert_eq!(root.count(), total);
        assert_eq!(snippet.index, 2);
        assert_eq!(snippet.body, "Hi");
    }

    #[test]
    fn test_move_and_rename_together() {
        let mut root = with_greeting();
        run(
            &mut root,
            &EditRequest::new("greeting")
                .with_name("hello")
                .with_folder(Vec::<String>::new()),
        )
        .unwrap();
        assert_eq!(root.list[1].name(), "hello");
    }

    #[test]
    fn test_move_into_folder_after_source_position() {
        let mut root = Folder::new("Snippets")
            .with(Snippet::new("a", "1"))
            .with(Folder::new("Later"));
        set_indices(&mut root);

        run(&mut root, &EditRequest::new("a").with_folder(["Later"])).unwrap();

        assert_eq!(root.list.len(), 1);
        let later = root.subfolder("Later").unwrap();
        assert_eq!(later.list[0].name(), "a");
        assert_eq!(later.index, 1);
        assert_eq!(later.list[0].index(), 2);
    }

    #[test]
    fn test_rename_to_own_name_in_other_case_is_allowed() {
        let mut root = with_greeting();
        let snippet = run(&mut root, &EditRequest::new("greeting").with_name("Greeting")).unwrap();
        assert_eq!(snippet.name, "Greeting");
    }

    #[test]
    fn test_rename_clashing_with_sibling_fails() {
        let mut root = with_greeting();
        create::run(
            &mut root,
            &CreateRequest::new("other", "x").in_folder(["Work"]),
        )
        .unwrap();
        let before = root.clone();

        let err = run(&mut root, &EditRequest::new("other").with_name("GREETING")).unwrap_err();
        assert!(matches!(err, SnipzError::DuplicateName(_)));
        assert_eq!(root, before);
    }

    #[test]
    fn test_move_clashing_at_destination_fails() {
        let mut root = with_greeting();
        create::run(&mut root, &CreateRequest::new("Greeting", "root copy")).unwrap();
        let before = root.clone();

        let err = run(
            &mut root,
            &EditRequest::new("greeting").with_folder(Vec::<String>::new()),
        )
        .unwrap_err();
        assert!(matches!(err, SnipzError::DuplicateName(_)));
        assert_eq!(root, before);
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let mut root = with_greeting();
        let err = run(&mut root, &EditRequest::new("Greeting").with_body("x")).unwrap_err();
        assert!(matches!(err, SnipzError::NotFound(_)));
    }

    #[test]
    fn test_missing_target_folder_leaves_tree_untouched() {
        let mut root = with_greeting();
        let before = root.clone();
        let err = run(&mut root, &EditRequest::new("greeting").with_folder(["Nowhere"]))
            .unwrap_err();
        assert!(matches!(err, SnipzError::FolderNotFound(_)));
        assert_eq!(root, before);
    }

    #[test]
    fn test_rejects_requests_without_changes_or_id() {
        let mut root = with_greeting();
        let err = run(&mut root, &EditRequest::new("greeting")).unwrap_err();
        assert!(matches!(err, SnipzError::InvalidInput(_)));

        let err = run(&mut root, &EditRequest::default()).unwrap_err();
        assert!(matches!(err, SnipzError::InvalidInput(_)));

        let err = run(&mut root, &EditRequest::new("greeting").with_name("  ")).unwrap_err();
        assert!(matches!(err, SnipzError::InvalidInput(_)));

        let before = root.clone();
        let err = run(&mut root, &EditRequest::new("greeting").with_body("")).unwrap_err();
        assert!(matches!(err, SnipzError::InvalidInput(ref m) if m.contains("body")));
        assert_eq!(root, before);
    }

    #[test]
    fn test_move_into_nested_folder_past_removed_sibling() {
        let mut root = Folder::new("Snippets")
            .with(Folder::new("Work").with(Snippet::new("a", "1")).with(
                Folder::new("Archive").with(Folder::new("Old")),
            ));
        set_indices(&mut root);

        run(&mut root, &EditRequest::new("a").with_folder(["Work", "Archive", "Old"])).unwrap();

        let old = root
            .subfolder("Work")
            .and_then(|w| w.subfolder("Archive"))
            .and_then(|a| a.subfolder("Old"))
            .unwrap();
        assert_eq!(old.list[0].name(), "a");
        assert_eq!(old.list[0].index(), 4);
        assert_eq!(root.subfolder("Work").unwrap().list.len(), 1);
    }

    #[test]
    fn test_shift_after_removal_only_touches_later_siblings() {
        let removed = SnippetLocation {
            parent: vec![0],
            position: 1,
        };
        assert_eq!(shift_after_removal(vec![0, 2, 5], &removed), vec![0, 1, 5]);
        assert_eq!(shift_after_removal(vec![0, 0], &removed), vec![0, 0]);
        assert_eq!(shift_after_removal(vec![1, 2], &removed), vec![1, 2]);
        assert_eq!(shift_after_removal(vec![0], &removed), vec![0]);
        assert_eq!(shift_after_removal(vec![], &removed), Vec::<usize>::new());
    }
}
