//! Persisted session snapshot.

use serde::{Deserialize, Serialize};
use web_time::{SystemTime, UNIX_EPOCH};

use super::{SessionStore, StoreError};
use crate::model::{CategoryCatalog, ImageRecord};
use crate::state::ImageCollection;

/// Current snapshot format version.
/// Increment this when making breaking changes to the snapshot layout.
pub const SESSION_VERSION: u32 = 1;

fn default_version() -> u32 {
    SESSION_VERSION
}

/// Serialized `{images, currentIndex, categoriesData}` snapshot.
///
/// `images` and `currentIndex` are required; a snapshot missing either is
/// treated as no session at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedSession {
    /// Snapshot format version (absent in snapshots from older builds)
    #[serde(default = "default_version")]
    pub version: u32,

    /// Image records, without their binary handles
    pub images: Vec<ImageRecord>,

    /// Cursor at the time of saving
    pub current_index: usize,

    /// Catalog including any runtime additions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories_data: Option<CategoryCatalog>,

    /// Unix timestamp (seconds) of the save
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<u64>,
}

impl PersistedSession {
    /// Snapshot the current collection and catalog.
    pub fn capture(collection: &ImageCollection, catalog: &CategoryCatalog) -> Self {
        Self {
            version: SESSION_VERSION,
            images: collection.records().to_vec(),
            current_index: collection.cursor(),
            categories_data: Some(catalog.clone()),
            saved_at: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .ok()
                .map(|d| d.as_secs()),
        }
    }

    /// Serialize the snapshot to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize a snapshot, rejecting versions newer than this build.
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        let session: Self = serde_json::from_str(json)?;

        if session.version > SESSION_VERSION {
            return Err(StoreError::VersionTooNew {
                found: session.version,
                supported: SESSION_VERSION,
            });
        }

        Ok(session)
    }

    /// Rebuild the collection, clamping the cursor to the restored images.
    pub fn collection(&self) -> ImageCollection {
        ImageCollection::from_records(self.images.clone(), self.current_index)
    }
}

/// Write the collection and catalog to the store.
///
/// An empty collection is never written, so an earlier session is not
/// overwritten with nothing. Returns true if the slot was written.
pub fn save_session<S: SessionStore + ?Sized>(
    store: &mut S,
    collection: &ImageCollection,
    catalog: &CategoryCatalog,
) -> Result<bool, StoreError> {
    if collection.is_empty() {
        log::trace!("Session: empty collection, not saving");
        return Ok(false);
    }

    let json = PersistedSession::capture(collection, catalog).to_json()?;
    store.save(&json)?;
    log::trace!(
        "Session: saved {} images ({} bytes)",
        collection.len(),
        json.len()
    );
    Ok(true)
}

/// Read the snapshot from the store.
///
/// Returns None if nothing was saved or the saved data cannot be used.
pub fn load_session<S: SessionStore + ?Sized>(store: &S) -> Option<PersistedSession> {
    let json = match store.load() {
        Ok(Some(json)) => json,
        Ok(None) => {
            log::debug!("Session: no saved session found");
            return None;
        }
        Err(e) => {
            log::warn!("Session: failed to read saved session: {}", e);
            return None;
        }
    };

    match PersistedSession::from_json(&json) {
        Ok(session) => {
            log::info!(
                "Session: restored {} images at index {}",
                session.images.len(),
                session.current_index
            );
            Some(session)
        }
        Err(e) => {
            log::warn!("Session: ignoring unreadable saved session: {}", e);
            None
        }
    }
}
