use super::backend::StorageBackend;
use crate::codec;
use crate::config::SnipzConfig;
use crate::error::Result;
use crate::index::set_indices;
use crate::model::Folder;
use crate::settings::Settings;
use parking_lot::RwLock;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreOptions {
    /// Name of the root folder created when nothing is stored yet.
    pub root_name: String,
    pub pretty: bool,
    /// Extra attempts after a failed write.
    pub persist_retries: u32,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            root_name: codec::LEGACY_ROOT_NAME.to_string(),
            pretty: true,
            persist_retries: 3,
        }
    }
}

impl From<&SnipzConfig> for StoreOptions {
    fn from(config: &SnipzConfig) -> Self {
        Self {
            root_name: config.root_name.clone(),
            pretty: config.pretty,
            persist_retries: config.persist_retries,
        }
    }
}

/// Result of a successful mutation.
///
/// `persist_error` is set when the change was applied in memory but could not be
/// written out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Committed<T> {
    pub value: T,
    pub persist_error: Option<String>,
}

struct State {
    root: Folder,
    settings: Settings,
    dirty: bool,
}

/// Owner of the snippet tree.
///
/// Mutations take the write lock and run to completion, persistence included, so
/// writes land in mutation order. Readers share the read lock.
pub struct RootStore<B: StorageBackend> {
    backend: B,
    options: StoreOptions,
    state: RwLock<State>,
}

impl<B: StorageBackend> RootStore<B> {
    /// Loads the stored document, or starts from an empty root when there is none.
    pub fn open(backend: B, options: StoreOptions) -> Result<Self> {
        let (root, settings) = match backend.load()? {
            Some(text) => codec::from_str(&text)?,
            None => {
                let mut root = Folder::new(options.root_name.clone());
                set_indices(&mut root);
                (root, Settings::default())
            }
        };
        info!(
            location = %backend.location().display(),
            nodes = root.count(),
            "snippet store opened"
        );
        Ok(Self {
            backend,
            options,
            state: RwLock::new(State {
                root,
                settings,
                dirty: false,
            }),
        })
    }

    /// Runs `op` against the tree under the write lock and persists on success.
    ///
    /// An error from `op` is returned as is and nothing is written. A persistence
    /// failure does not fail the call; it is reported in [`Committed::persist_error`].
    pub fn mutate<T, F>(&self, op: F) -> Result<Committed<T>>
    where
        F: FnOnce(&mut Folder) -> Result<T>,
    {
        let mut state = self.state.write();
        let value = op(&mut state.root)?;
        let persist_error = self.persist(&mut state).err().map(|err| err.to_string());
        Ok(Committed {
            value,
            persist_error,
        })
    }

    pub fn read<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&Folder, &Settings) -> R,
    {
        let state = self.state.read();
        f(&state.root, &state.settings)
    }

    pub fn snapshot(&self) -> Folder {
        self.state.read().root.clone()
    }

    pub fn settings(&self) -> Settings {
        self.state.read().settings.clone()
    }

    pub fn update_settings(&self, settings: Settings) -> Committed<()> {
        let mut state = self.state.write();
        state.settings = settings;
        let persist_error = self.persist(&mut state).err().map(|err| err.to_string());
        Committed {
            value: (),
            persist_error,
        }
    }

    /// Encodes the current document without writing it.
    pub fn export(&self, pretty: bool) -> Result<String> {
        let state = self.state.read();
        codec::to_string(&state.root, &state.settings, pretty)
    }

    /// True when the last write failed and memory is ahead of storage.
    pub fn is_dirty(&self) -> bool {
        self.state.read().dirty
    }

    /// Writes pending changes, if any.
    pub fn flush(&self) -> Result<()> {
        let mut state = self.state.write();
        if !state.dirty {
            return Ok(());
        }
        self.persist(&mut state)
    }

    /// Flushes and hands the backend back.
    pub fn close(self) -> Result<B> {
        self.flush()?;
        Ok(self.backend)
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn options(&self) -> &StoreOptions {
        &self.options
    }

    fn persist(&self, state: &mut State) -> Result<()> {
        state.dirty = true;
        let payload = codec::to_string(&state.root, &state.settings, self.options.pretty)?;

        let mut attempt = 0;
        loop {
            match self.backend.save(&payload) {
                Ok(()) => {
                    state.dirty = false;
                    debug!(attempt, "store persisted");
                    return Ok(());
                }
                Err(err) if attempt < self.options.persist_retries => {
                    attempt += 1;
                    warn!(attempt, error = %err, "persist failed, retrying");
                }
                Err(err) => {
                    warn!(error = %err, "persist failed, store left dirty");
                    return Err(err);
                }
            }
        }
    }
}
