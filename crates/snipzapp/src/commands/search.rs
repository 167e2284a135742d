use crate::commands::helpers::require_text;
use crate::commands::SearchRequest;
use crate::error::Result;
use crate::index::entries;
use crate::model::{Folder, Snippet};
use serde::Serialize;

/// A snippet matching a search term, with the folder path that contains it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    pub index: usize,
    pub folder_path: Vec<String>,
    pub name: String,
    pub body: String,
    pub matched_name: bool,
}

/// Case-insensitive substring search over snippet names and bodies, in index order.
pub fn run(root: &Folder, request: &SearchRequest) -> Result<Vec<SearchHit>> {
    require_text("term", &request.term)?;
    let term = request.term.to_lowercase();

    let hits = entries(root)
        .into_iter()
        .filter_map(|entry| {
            let snippet: &Snippet = entry.snippet()?;
            let matched_name = snippet.name.to_lowercase().contains(&term);
            if !matched_name && !snippet.body.to_lowercase().contains(&term) {
                return None;
            }
            Some(SearchHit {
                index: entry.index,
                folder_path: entry.path.iter().map(|s| s.to_string()).collect(),
                name: snippet.name.clone(),
                body: snippet.body.clone(),
                matched_name,
            })
        })
        .collect();
    Ok(hits)
}
