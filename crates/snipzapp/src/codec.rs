//! # Persisted Format and Upgrades
//!
//! The whole store is one JSON document:
//!
//! ```text
//! {
//!   "dataVersion": 1,
//!   "savedAt": "2026-10-19T12:00:00Z",
//!   "settings": { ... },
//!   "snippets": { "kind": "folder", "name": "Snippets", "list": [ ... ] }
//! }
//! ```
//!
//! ## Versions
//!
//! | `dataVersion` | Shape |
//! |---------------|-------|
//! | absent / `0`  | Legacy: nodes carry no `kind`; `snippets` may be a bare array |
//! | `1`           | Current: every node tagged with `kind` |
//!
//! [`serialize`] always writes [`CURRENT_DATA_VERSION`]. [`deserialize`] upgrades older
//! documents one version at a time on the raw JSON value, then decodes. Upgrades never
//! touch a node that already has a `kind`, so running them over current data is a no-op.
//! Any other integer version, negative ones included, fails with
//! [`SnipzError::UnsupportedVersion`] before decoding starts. A non-integer version is
//! malformed. Decoded folders must not hold two children whose names match
//! case-insensitively.
//!
//! ## Legacy Detection
//!
//! A legacy node is a folder if it has a `list`, a snippet if it has a `body`. A bare
//! array under `snippets` becomes the children of a root folder named
//! [`LEGACY_ROOT_NAME`].
//!
//! Indexes are never stored; decoding ends with [`set_indices`].

use crate::error::{Result, SnipzError};
use crate::index::set_indices;
use crate::model::{same_name, Folder, Node};
use crate::settings::Settings;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tracing::{debug, warn};

pub const CURRENT_DATA_VERSION: i64 = 1;

/// Root folder name given to legacy documents that stored a bare list.
pub const LEGACY_ROOT_NAME: &str = "Snippets";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PersistedRef<'a> {
    data_version: i64,
    saved_at: DateTime<Utc>,
    settings: &'a Settings,
    snippets: TaggedRoot<'a>,
}

#[derive(Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
enum TaggedRoot<'a> {
    Folder(&'a Folder),
}

#[derive(Deserialize)]
struct Persisted {
    #[serde(default)]
    settings: Settings,
    snippets: Node,
}

pub fn serialize(root: &Folder, settings: &Settings) -> Result<Value> {
    let persisted = PersistedRef {
        data_version: CURRENT_DATA_VERSION,
        saved_at: Utc::now(),
        settings,
        snippets: TaggedRoot::Folder(root),
    };
    Ok(serde_json::to_value(persisted)?)
}

pub fn to_string(root: &Folder, settings: &Settings, pretty: bool) -> Result<String> {
    let value = serialize(root, settings)?;
    let text = if pretty {
        serde_json::to_string_pretty(&value)?
    } else {
        serde_json::to_string(&value)?
    };
    Ok(text)
}

pub fn deserialize(value: Value) -> Result<(Folder, Settings)> {
    let version = data_version(&value)?;
    if !(0..=CURRENT_DATA_VERSION).contains(&version) {
        return Err(SnipzError::UnsupportedVersion(version));
    }
    let value = upgrade(value, version)?;

    let persisted: Persisted =
        serde_json::from_value(value).map_err(|e| SnipzError::MalformedData(e.to_string()))?;
    let mut root = match persisted.snippets {
        Node::Folder(folder) => folder,
        Node::Snippet(snippet) => {
            return Err(SnipzError::MalformedData(format!(
                "root must be a folder, found snippet \"{}\"",
                snippet.name
            )))
        }
    };
    check_unique_names(&root)?;
    set_indices(&mut root);
    debug!(version, nodes = root.count(), "store decoded");
    Ok((root, persisted.settings))
}

pub fn from_str(text: &str) -> Result<(Folder, Settings)> {
    deserialize(serde_json::from_str(text)?)
}

fn data_version(value: &Value) -> Result<i64> {
    let object = value
        .as_object()
        .ok_or_else(|| SnipzError::MalformedData("expected a JSON object".to_string()))?;
    match object.get("dataVersion") {
        None | Some(Value::Null) => Ok(0),
        Some(raw) => raw.as_i64().ok_or_else(|| {
            SnipzError::MalformedData(format!("dataVersion must be an integer, found {}", raw))
        }),
    }
}

/// Applies every upgrade step from `from` up to the current version.
fn upgrade(mut value: Value, from: i64) -> Result<Value> {
    let mut version = from;
    while version < CURRENT_DATA_VERSION {
        warn!(from = version, to = version + 1, "upgrading stored snippets");
        value = match version {
            0 => upgrade_v0(value)?,
            other => return Err(SnipzError::UnsupportedVersion(other)),
        };
        version += 1;
    }
    Ok(value)
}

/// Version 0 → 1: add `kind` discriminants, wrap a bare list in a root folder.
fn upgrade_v0(value: Value) -> Result<Value> {
    let Value::Object(mut map) = value else {
        return Err(SnipzError::MalformedData("expected a JSON object".to_string()));
    };
    let root = match map.remove("snippets") {
        None | Some(Value::Null) => json!({ "name": LEGACY_ROOT_NAME, "list": [] }),
        Some(Value::Array(list)) => json!({ "name": LEGACY_ROOT_NAME, "list": list }),
        Some(other) => other,
    };
    map.insert("snippets".to_string(), tag_node(root)?);
    map.insert("dataVersion".to_string(), json!(1));
    Ok(Value::Object(map))
}

fn tag_node(node: Value) -> Result<Value> {
    let Value::Object(mut map) = node else {
        return Err(SnipzError::MalformedData(format!(
            "expected a node object, found {}",
            node
        )));
    };

    let kind = match map.get("kind").and_then(Value::as_str) {
        Some(kind) => kind.to_string(),
        None if map.get("list").is_some_and(Value::is_array) => "folder".to_string(),
        None if map.contains_key("body") => "snippet".to_string(),
        None => {
            return Err(SnipzError::MalformedData(format!(
                "node {} is neither a folder nor a snippet",
                node_label(&map)
            )))
        }
    };

    if kind == "folder" {
        if let Some(Value::Array(children)) = map.remove("list") {
            let children = children
                .into_iter()
                .map(tag_node)
                .collect::<Result<Vec<_>>>()?;
            map.insert("list".to_string(), Value::Array(children));
        }
    }
    map.insert("kind".to_string(), Value::String(kind));
    Ok(Value::Object(map))
}

/// Stored siblings must not share a name, compared the same way commands compare them.
fn check_unique_names(folder: &Folder) -> Result<()> {
    for (i, node) in folder.list.iter().enumerate() {
        if folder.list[..i]
            .iter()
            .any(|earlier| same_name(earlier.name(), node.name()))
        {
            return Err(SnipzError::MalformedData(format!(
                "folder \"{}\" holds \"{}\" more than once",
                folder.name,
                node.name()
            )));
        }
        if let Node::Folder(child) = node {
            check_unique_names(child)?;
        }
    }
    Ok(())
}

fn node_label(map: &Map<String, Value>) -> String {
    map.get("name")
        .and_then(Value::as_str)
        .map(|name| format!("\"{}\"", name))
        .unwrap_or_else(|| "(unnamed)".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Snippet;

    fn sample() -> Folder {
        let mut root = Folder::new("Snippets")
            .with(Folder::new("Work").with(Snippet::new("greeting", "<b>Hi</b>")))
            .with(Snippet::new("sig", "-- \nme"))
            .with(Folder::new("Empty"));
        set_indices(&mut root);
        root
    }

    #[test]
    fn test_round_trips_tree_and_settings() {
        let root = sample();
        let mut settings = Settings::default();
        settings.language = "fr".into();

        let value = serialize(&root, &settings).unwrap();
        assert_eq!(value["dataVersion"], json!(CURRENT_DATA_VERSION));
        assert_eq!(value["snippets"]["kind"], json!("folder"));
        assert_eq!(value["snippets"]["list"][1]["kind"], json!("snippet"));
        assert!(value["snippets"].get("index").is_none());

        let (decoded, decoded_settings) = deserialize(value).unwrap();
        assert_eq!(decoded, root);
        assert_eq!(decoded_settings, settings);
    }

    #[test]
    fn test_indices_are_recomputed_on_decode() {
        let mut root = sample();
        // Corrupt indices are never persisted, so decode restores the dense ones.
        root.list[1].as_snippet_mut().unwrap().index = 99;
        let (decoded, _) = deserialize(serialize(&root, &Settings::default()).unwrap()).unwrap();
        assert_eq!(decoded, sample());
    }

    #[test]
    fn test_string_helpers_round_trip() {
        let text = to_string(&sample(), &Settings::default(), true).unwrap();
        assert!(text.contains('\n'));
        let (decoded, _) = from_str(&text).unwrap();
        assert_eq!(decoded, sample());
    }

    #[test]
    fn test_upgrades_version_zero() {
        let legacy = json!({
            "dataVersion": 0,
            "settings": { "language": "en" },
            "snippets": {
                "name": "Snippets",
                "list": [
                    { "name": "Work", "list": [ { "name": "greeting", "body": "Hi" } ] },
                    { "name": "sig", "body": "--" }
                ]
            }
        });

        let (root, _) = deserialize(legacy).unwrap();

        let work = root.subfolder("Work").unwrap();
        assert_eq!(work.list[0].as_snippet().unwrap().body, "Hi");
        assert!(root.list[1].is_snippet());
        assert_eq!(root.list[1].index(), 3);
    }

    #[test]
    fn test_legacy_bare_list_gets_a_root() {
        let legacy = json!({ "snippets": [ { "name": "a", "body": "1" } ] });
        let (root, settings) = deserialize(legacy).unwrap();
        assert_eq!(root.name, LEGACY_ROOT_NAME);
        assert_eq!(root.list.len(), 1);
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_upgrade_is_idempotent_on_current_data() {
        let current = serialize(&sample(), &Settings::default()).unwrap();
        let upgraded = upgrade_v0(current.clone()).unwrap();
        assert_eq!(upgraded["snippets"], current["snippets"]);
        assert_eq!(deserialize(upgraded).unwrap().0, sample());
    }

    #[test]
    fn test_rejects_unknown_versions() {
        let err = deserialize(json!({ "dataVersion": 9999, "snippets": {} })).unwrap_err();
        assert!(matches!(err, SnipzError::UnsupportedVersion(9999)));
    }

    #[test]
    fn test_rejects_negative_versions() {
        let err = deserialize(json!({
            "dataVersion": -1,
            "snippets": { "kind": "folder", "name": "Snippets", "list": [] }
        }))
        .unwrap_err();
        assert!(matches!(err, SnipzError::UnsupportedVersion(-1)));
        assert_eq!(err.kind(), crate::error::FailureKind::UnsupportedVersion);
    }

    #[test]
    fn test_non_integer_version_is_malformed() {
        for version in [json!(1.5), json!("1")] {
            let err = deserialize(json!({ "dataVersion": version, "snippets": [] })).unwrap_err();
            assert!(matches!(err, SnipzError::MalformedData(_)));
        }
    }

    #[test]
    fn test_rejects_case_insensitive_sibling_duplicates() {
        let err = deserialize(json!({
            "snippets": [ { "name": "a", "body": "1" }, { "name": "A", "body": "2" } ]
        }))
        .unwrap_err();
        assert!(matches!(err, SnipzError::MalformedData(ref m) if m.contains("\"A\"")));

        let nested = json!({
            "dataVersion": 1,
            "snippets": { "kind": "folder", "name": "Snippets", "list": [
                { "kind": "folder", "name": "Work", "list": [
                    { "kind": "snippet", "name": "sig", "body": "x" },
                    { "kind": "folder", "name": "SIG", "list": [] }
                ] }
            ] }
        });
        assert!(matches!(deserialize(nested), Err(SnipzError::MalformedData(_))));
    }

    #[test]
    fn test_same_name_in_different_folders_is_fine() {
        let doc = json!({
            "snippets": [
                { "name": "a", "body": "1" },
                { "name": "Work", "list": [ { "name": "a", "body": "2" } ] }
            ]
        });
        assert_eq!(deserialize(doc).unwrap().0.count(), 3);
    }

    #[test]
    fn test_rejects_malformed_documents() {
        let err = deserialize(json!([1, 2])).unwrap_err();
        assert!(matches!(err, SnipzError::MalformedData(_)));

        let err = deserialize(json!({
            "dataVersion": 1,
            "snippets": { "kind": "snippet", "name": "x", "body": "y" }
        }))
        .unwrap_err();
        assert!(matches!(err, SnipzError::MalformedData(_)));

        let err = deserialize(json!({ "snippets": [ { "name": "mystery" } ] })).unwrap_err();
        assert!(matches!(err, SnipzError::MalformedData(ref m) if m.contains("mystery")));
    }
}
