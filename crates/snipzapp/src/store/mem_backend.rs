use super::backend::StorageBackend;
use crate::error::{Result, SnipzError};
use parking_lot::Mutex;
use std::path::PathBuf;

#[derive(Default)]
struct MemState {
    payload: Option<String>,
    failing_writes: usize,
    saves: usize,
}

/// In-memory storage backend for testing.
///
/// Uses a `parking_lot::Mutex` so that a [`super::RootStore`] over it can be shared
/// across threads.
#[derive(Default)]
pub struct MemBackend {
    state: Mutex<MemState>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend that already holds a stored document.
    pub fn with_payload(payload: impl Into<String>) -> Self {
        let backend = Self::default();
        backend.state.lock().payload = Some(payload.into());
        backend
    }

    /// Makes the next `count` saves fail with a simulated write error.
    pub fn fail_next_writes(&self, count: usize) {
        self.state.lock().failing_writes = count;
    }

    pub fn payload(&self) -> Option<String> {
        self.state.lock().payload.clone()
    }

    /// Number of successful saves so far.
    pub fn save_count(&self) -> usize {
        self.state.lock().saves
    }
}

impl StorageBackend for MemBackend {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.state.lock().payload.clone())
    }

    fn save(&self, payload: &str) -> Result<()> {
        let mut state = self.state.lock();
        if state.failing_writes > 0 {
            state.failing_writes -= 1;
            return Err(SnipzError::Store("Simulated write error".to_string()));
        }
        state.payload = Some(payload.to_string());
        state.saves += 1;
        Ok(())
    }

    fn location(&self) -> PathBuf {
        PathBuf::from("memory://snippets.json")
    }
}
