//! Browser localStorage session store (WASM only).

use super::{SessionStore, StoreError};
use crate::constants::SESSION_KEY;

/// Session store backed by `window.localStorage`.
#[derive(Debug, Clone)]
pub struct LocalStorageSessionStore {
    key: String,
}

impl LocalStorageSessionStore {
    /// Use the default session key.
    pub fn new() -> Self {
        Self::with_key(SESSION_KEY)
    }

    /// Use a custom key.
    pub fn with_key(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    fn storage() -> Result<web_sys::Storage, StoreError> {
        let window = web_sys::window()
            .ok_or_else(|| StoreError::Storage("No window object available".to_string()))?;

        window
            .local_storage()
            .map_err(|e| StoreError::Storage(format!("localStorage access error: {:?}", e)))?
            .ok_or_else(|| StoreError::Storage("localStorage not available".to_string()))
    }
}

impl Default for LocalStorageSessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore for LocalStorageSessionStore {
    fn load(&self) -> Result<Option<String>, StoreError> {
        Self::storage()?
            .get_item(&self.key)
            .map_err(|e| StoreError::Storage(format!("Failed to read from localStorage: {:?}", e)))
    }

    fn save(&mut self, contents: &str) -> Result<(), StoreError> {
        Self::storage()?
            .set_item(&self.key, contents)
            .map_err(|e| StoreError::Storage(format!("Failed to save to localStorage: {:?}", e)))
    }
}
