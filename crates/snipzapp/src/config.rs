//! # Configuration
//!
//! Snipz configuration is a [`confique`] struct, loaded in layers.
//!
//! ## Storage Hierarchy
//!
//! Configuration is resolved in priority order:
//! 1. **Environment variables**: `SNIPZ_FILE_NAME`, `SNIPZ_PRETTY`, etc.
//! 2. **Config file**: `snipz.toml` in the data directory.
//! 3. **Compiled Defaults**: Built-in fallbacks via `#[config(default = ...)]`.
//!
//! The data directory itself comes from the OS conventions (via the `directories`
//! crate) unless the caller passes one explicitly.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `file_name` | `snippets.json` | Name of the stored document |
//! | `pretty` | `true` | Indent the stored JSON |
//! | `persist_retries` | `3` | Extra write attempts before reporting a failure |
//! | `root_name` | `Snippets` | Root folder name for a fresh store |
//!
//! These are process settings. User preferences shown in the UI live in
//! [`crate::settings::Settings`] and are stored with the snippets.

use crate::error::{Result, SnipzError};
use confique::Config;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "snipz.toml";

/// Configuration for snipz, stored in `snipz.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SnipzConfig {
    /// File name of the stored document inside the data directory.
    #[config(default = "snippets.json", env = "SNIPZ_FILE_NAME")]
    pub file_name: String,

    /// Write indented JSON.
    #[config(default = true, env = "SNIPZ_PRETTY")]
    pub pretty: bool,

    /// Extra attempts after a failed write before the failure is reported.
    #[config(default = 3, env = "SNIPZ_PERSIST_RETRIES")]
    pub persist_retries: u32,

    /// Name of the root folder when no data exists yet.
    #[config(default = "Snippets", env = "SNIPZ_ROOT_NAME")]
    pub root_name: String,
}

impl Default for SnipzConfig {
    fn default() -> Self {
        Self {
            file_name: "snippets.json".to_string(),
            pretty: true,
            persist_retries: 3,
            root_name: "Snippets".to_string(),
        }
    }
}

impl SnipzConfig {
    /// Loads `snipz.toml` from `dir` (if present) under the environment overrides.
    pub fn load(dir: &Path) -> Result<Self> {
        let config = SnipzConfig::builder()
            .env()
            .file(dir.join(CONFIG_FILE_NAME))
            .load()?;
        Ok(config)
    }

    /// A commented `snipz.toml` listing every key with its default.
    pub fn template() -> String {
        confique::toml::template::<SnipzConfig>(confique::toml::FormatOptions::default())
    }
}

/// OS-appropriate data directory for snipz.
pub fn data_dir() -> Result<PathBuf> {
    ProjectDirs::from("com", "snipz", "snipz")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| SnipzError::Config("Could not determine data directory".to_string()))
}
