//! In-memory session store.

use super::{SessionStore, StoreError};

/// Session store that keeps the slot in memory. Used by tests and as a
/// fallback when no durable storage is available.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    slot: Option<String>,
    saves: usize,
}

impl MemorySessionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store whose slot already holds `contents`.
    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            slot: Some(contents.into()),
            saves: 0,
        }
    }

    /// Current slot contents.
    pub fn contents(&self) -> Option<&str> {
        self.slot.as_deref()
    }

    /// Number of writes since creation.
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<String>, StoreError> {
        Ok(self.slot.clone())
    }

    fn save(&mut self, contents: &str) -> Result<(), StoreError> {
        self.slot = Some(contents.to_string());
        self.saves += 1;
        Ok(())
    }
}
