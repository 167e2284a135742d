//! # Settings
//!
//! Extension-wide preferences stored next to the snippet tree. The core never reads
//! them: they are carried through load and save untouched so that UI clients have a
//! single place to keep their configuration.
//!
//! Unknown keys are kept in [`Settings::extra`] and written back verbatim, so a newer
//! client's settings survive a round trip through an older one.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

fn default_language() -> String {
    "en".to_string()
}

fn default_auto_insert_pairs() -> Vec<[String; 2]> {
    [("(", ")"), ("[", "]"), ("{", "}"), ("\"", "\"")]
        .into_iter()
        .map(|(open, close)| [open.to_string(), close.to_string()])
        .collect()
}

fn default_hotkey() -> Vec<String> {
    vec!["Shift".to_string(), "Space".to_string()]
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default = "default_language")]
    pub language: String,

    /// Characters auto-closed when the opening one is typed.
    #[serde(default = "default_auto_insert_pairs")]
    pub auto_insert_pairs: Vec<[String; 2]>,

    /// Key combination that expands a snippet name in place.
    #[serde(default = "default_hotkey")]
    pub hotkey: Vec<String>,

    #[serde(default = "default_true")]
    pub context_menu: bool,

    #[serde(default)]
    pub tab_key_expansion: bool,

    #[serde(default = "default_true")]
    pub wrap_selection: bool,

    #[serde(default)]
    pub blocked_sites: Vec<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            language: default_language(),
            auto_insert_pairs: default_auto_insert_pairs(),
            hotkey: default_hotkey(),
            context_menu: true,
            tab_key_expansion: false,
            wrap_selection: true,
            blocked_sites: Vec::new(),
            extra: Map::new(),
        }
    }
}
