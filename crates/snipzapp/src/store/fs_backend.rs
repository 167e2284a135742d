use super::backend::StorageBackend;
use crate::error::{Result, SnipzError};
use std::fs;
use std::path::PathBuf;
use tracing::debug;
use uuid::Uuid;

pub const DEFAULT_FILE_NAME: &str = "snippets.json";

pub struct FsBackend {
    root: PathBuf,
    file_name: String,
}

impl FsBackend {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            file_name: DEFAULT_FILE_NAME.to_string(),
        }
    }

    pub fn with_file_name(mut self, file_name: &str) -> Self {
        self.file_name = file_name.to_string();
        self
    }

    fn data_file(&self) -> PathBuf {
        self.root.join(&self.file_name)
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(SnipzError::Io)?;
        }
        Ok(())
    }
}

impl StorageBackend for FsBackend {
    fn load(&self) -> Result<Option<String>> {
        let data_file = self.data_file();
        if !data_file.exists() {
            debug!(path = %data_file.display(), "no stored snippets yet");
            return Ok(None);
        }
        let content = fs::read_to_string(&data_file).map_err(SnipzError::Io)?;
        Ok(Some(content))
    }

    fn save(&self, payload: &str) -> Result<()> {
        self.ensure_dir()?;
        let data_file = self.data_file();

        // Atomic write
        let tmp_file = self.root.join(format!(".snippets-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp_file, payload).map_err(SnipzError::Io)?;
        if let Err(err) = fs::rename(&tmp_file, &data_file) {
            let _ = fs::remove_file(&tmp_file);
            return Err(SnipzError::Io(err));
        }

        debug!(path = %data_file.display(), bytes = payload.len(), "snippets written");
        Ok(())
    }

    fn location(&self) -> PathBuf {
        self.data_file()
    }
}
