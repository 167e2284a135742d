//! Plain terminal rendering.
//!
//! Functions here turn API views into strings; they never print. Styling goes
//! through `console::style`, which drops the escape codes when the output is not a
//! terminal.

use console::style;
use snipzapp::api::{EntryView, FolderView, NodeKind, SnippetView};
use snipzapp::commands::search::SearchHit;

const PREVIEW_WIDTH: usize = 40;

fn preview(body: &str) -> String {
    let first = body.lines().next().unwrap_or("");
    let mut text: String = first.chars().take(PREVIEW_WIDTH).collect();
    if first.chars().count() > PREVIEW_WIDTH || body.lines().nth(1).is_some() {
        text.push('…');
    }
    text
}

fn index_label(index: usize) -> String {
    style(format!("{:>3}", index)).dim().to_string()
}

pub fn render_tree(rows: &[EntryView]) -> String {
    let mut out = String::new();
    for row in rows {
        let indent = "  ".repeat(row.depth);
        let line = match row.kind {
            NodeKind::Folder => format!(
                "{} {}{}",
                index_label(row.index),
                indent,
                style(format!("{}/", row.name)).bold().blue()
            ),
            NodeKind::Snippet => format!(
                "{} {}{}  {}",
                index_label(row.index),
                indent,
                row.name,
                style(preview(row.body.as_deref().unwrap_or(""))).dim()
            ),
        };
        out.push_str(&line);
        out.push('\n');
    }
    out
}

pub fn render_snippet(verb: &str, snippet: &SnippetView) -> String {
    format!(
        "{} {} {}\n",
        style(verb).green(),
        style(&snippet.name).bold(),
        style(format!("(#{})", snippet.index)).dim()
    )
}

pub fn render_folder(folder: &FolderView) -> String {
    format!(
        "{} {} {}\n",
        style("Created folder").green(),
        style(format!("{}/", folder.name)).bold().blue(),
        style(format!("(#{})", folder.index)).dim()
    )
}

pub fn render_hits(hits: &[SearchHit]) -> String {
    if hits.is_empty() {
        return format!("{}\n", style("No matches").dim());
    }
    let mut out = String::new();
    for hit in hits {
        let mut path = hit.folder_path.join("/");
        if !path.is_empty() {
            path.push('/');
        }
        out.push_str(&format!(
            "{} {}{}  {}\n",
            index_label(hit.index),
            style(path).dim(),
            style(&hit.name).bold(),
            preview(&hit.body)
        ));
    }
    out
}

pub fn render_persist_warning(message: &str) -> String {
    format!(
        "{} change applied but not saved: {}\n",
        style("warning:").yellow().bold(),
        message
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use console::strip_ansi_codes;

    fn row(index: usize, depth: usize, kind: NodeKind, name: &str, body: Option<&str>) -> EntryView {
        EntryView {
            index,
            depth,
            kind,
            folder_path: Vec::new(),
            name: name.to_string(),
            body: body.map(str::to_string),
        }
    }

    #[test]
    fn test_tree_indents_by_depth() {
        let rows = vec![
            row(0, 0, NodeKind::Folder, "Snippets", None),
            row(1, 1, NodeKind::Folder, "Work", None),
            row(2, 2, NodeKind::Snippet, "greeting", Some("Hi\nthere")),
        ];
        let out = strip_ansi_codes(&render_tree(&rows)).to_string();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "  0 Snippets/");
        assert_eq!(lines[1], "  1   Work/");
        assert_eq!(lines[2], "  2     greeting  Hi…");
    }

    #[test]
    fn test_preview_truncates_long_lines() {
        let long = "x".repeat(60);
        let text = preview(&long);
        assert_eq!(text.chars().count(), PREVIEW_WIDTH + 1);
        assert_eq!(preview("short"), "short");
    }

    #[test]
    fn test_hits_show_folder_path() {
        let hits = vec![SearchHit {
            index: 3,
            folder_path: vec!["Work".into()],
            name: "sig".into(),
            body: "Regards".into(),
            matched_name: false,
        }];
        let out = strip_ansi_codes(&render_hits(&hits)).to_string();
        assert_eq!(out, "  3 Work/sig  Regards\n");
        assert!(strip_ansi_codes(&render_hits(&[])).contains("No matches"));
    }
}
