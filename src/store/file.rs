//! File-backed session store (native only).

use std::path::{Path, PathBuf};

use super::{SessionStore, StoreError};
use crate::constants::SESSION_KEY;

/// Session store that keeps the slot in a JSON file.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Store the session at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the default session file path.
    /// Uses the XDG data directory, falling back to the home directory.
    pub fn default_path() -> Option<PathBuf> {
        let filename = format!("{}.json", SESSION_KEY);
        if let Some(data_dir) = dirs::data_dir() {
            Some(data_dir.join("labeller").join(filename))
        } else {
            dirs::home_dir().map(|home| {
                home.join(".local")
                    .join("share")
                    .join("labeller")
                    .join(filename)
            })
        }
    }

    /// Path of the session file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<String>, StoreError> {
        if !self.path.exists() {
            return Ok(None);
        }
        Ok(Some(std::fs::read_to_string(&self.path)?))
    }

    fn save(&mut self, contents: &str) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, contents)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_empty_slot() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("session.json"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("session.json");
        let mut store = FileSessionStore::new(&path);

        store.save("{\"a\":1}").unwrap();
        assert!(path.exists());
        assert_eq!(store.load().unwrap().as_deref(), Some("{\"a\":1}"));

        store.save("{}").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("{}"));
    }

    #[test]
    fn test_default_path_uses_session_key() {
        if let Some(path) = FileSessionStore::default_path() {
            assert!(path.ends_with("labeller/imageLabelerData.json"));
        }
    }
}
