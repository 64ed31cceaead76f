//! Session persistence.
//!
//! A [`SessionStore`] is a single durable key-value slot holding the JSON
//! snapshot of the labelling session. The session owns its store, so tests
//! can substitute [`MemorySessionStore`] for the file or browser backends.

#[cfg(not(target_arch = "wasm32"))]
mod file;
#[cfg(target_arch = "wasm32")]
mod local_storage;
mod memory;
mod snapshot;

use thiserror::Error;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileSessionStore;
#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageSessionStore;
pub use memory::MemorySessionStore;
pub use snapshot::{PersistedSession, SESSION_VERSION, load_session, save_session};

/// A durable slot for the serialized session.
pub trait SessionStore {
    /// Read the slot. `Ok(None)` means nothing has been saved yet.
    fn load(&self) -> Result<Option<String>, StoreError>;

    /// Overwrite the slot.
    fn save(&mut self, contents: &str) -> Result<(), StoreError>;
}

impl<T: SessionStore + ?Sized> SessionStore for Box<T> {
    fn load(&self) -> Result<Option<String>, StoreError> {
        (**self).load()
    }

    fn save(&mut self, contents: &str) -> Result<(), StoreError> {
        (**self).save(contents)
    }
}

/// Errors that can occur while reading or writing a session.
#[derive(Debug, Error)]
pub enum StoreError {
    /// I/O error on the session file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot could not be serialized or parsed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Snapshot was written by a newer version
    #[error("Session version {found} is newer than supported version {supported}")]
    VersionTooNew {
        /// Version found in the snapshot
        found: u32,
        /// Highest version this build reads
        supported: u32,
    },

    /// Storage backend error (localStorage in WASM)
    #[error("Storage error: {0}")]
    Storage(String),
}
