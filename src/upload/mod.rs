//! Turning selected files into image records.
//!
//! An upload batch is filtered by declared media type, ZIP archives are
//! expanded into their image entries, and every remaining file is decoded
//! into a `data:` URL. A file that fails to decode is skipped; the rest of
//! the batch still loads.

mod decode;
#[cfg(not(target_arch = "wasm32"))]
mod native;
mod zip_import;

use thiserror::Error;

pub use decode::{data_url, decode_file, probe_dimensions};
#[cfg(not(target_arch = "wasm32"))]
pub use native::{files_from_paths, read_upload_file};
pub use zip_import::{expand_archives, extract_uploads_from_zip_bytes, is_zip_file};

use crate::constants::UNKNOWN_MEDIA_TYPE;
use crate::model::ImageRecord;

/// Media types by file extension, used when the caller has no declared type.
const MEDIA_TYPES: &[(&str, &str)] = &[
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("bmp", "image/bmp"),
    ("webp", "image/webp"),
    ("tif", "image/tiff"),
    ("tiff", "image/tiff"),
    ("ico", "image/x-icon"),
    ("avif", "image/avif"),
    ("svg", "image/svg+xml"),
    ("zip", "application/zip"),
    ("csv", "text/csv"),
    ("txt", "text/plain"),
    ("json", "application/json"),
];

/// Guess a media type from a file name's extension.
pub fn media_type_for_name(name: &str) -> &'static str {
    let lower = name.to_lowercase();
    let Some((_, ext)) = lower.rsplit_once('.') else {
        return UNKNOWN_MEDIA_TYPE;
    };
    MEDIA_TYPES
        .iter()
        .find(|(e, _)| *e == ext)
        .map(|(_, media_type)| *media_type)
        .unwrap_or(UNKNOWN_MEDIA_TYPE)
}

/// Check if a declared media type is image-like.
pub fn is_image_media_type(media_type: &str) -> bool {
    media_type.trim().to_lowercase().starts_with("image/")
}

/// A file selected by the user, with its declared media type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadFile {
    /// File name (may include a relative folder for archive entries)
    pub name: String,
    /// Declared media type
    pub media_type: String,
    /// Raw file contents
    pub bytes: Vec<u8>,
}

impl UploadFile {
    /// Create a file with an explicit media type.
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            bytes,
        }
    }

    /// Create a file whose media type is guessed from its name.
    pub fn from_name(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let name = name.into();
        let media_type = media_type_for_name(&name);
        Self::new(name, media_type, bytes)
    }

    /// Check if the declared type is image-like.
    pub fn is_image(&self) -> bool {
        is_image_media_type(&self.media_type)
    }
}

/// Errors for a single file in an upload batch.
#[derive(Debug, Error)]
pub enum UploadError {
    /// I/O error while reading the file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The file could not be turned into a displayable URL
    #[error("Failed to decode '{name}': {message}")]
    Decode {
        /// File name
        name: String,
        /// Description of the failure
        message: String,
    },

    /// The archive could not be read
    #[error("Failed to read archive '{name}': {message}")]
    Archive {
        /// Archive file name
        name: String,
        /// Description of the failure
        message: String,
    },
}

impl UploadError {
    /// Create a decode error.
    pub fn decode(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create an archive error.
    pub fn archive(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Archive {
            name: name.into(),
            message: message.into(),
        }
    }
}

/// Result of decoding an upload batch.
#[derive(Debug, Default)]
pub struct UploadOutcome {
    /// Records for every decoded image, in input order
    pub records: Vec<ImageRecord>,
    /// Names of files dropped because their type is not image-like
    pub skipped: Vec<String>,
    /// Files that were images but failed to decode
    pub failed: Vec<UploadError>,
}

/// What an upload did to a session.
#[derive(Debug, Default)]
pub struct UploadSummary {
    /// Number of images now in the collection
    pub loaded: usize,
    /// Names of files dropped because their type is not image-like
    pub skipped: Vec<String>,
    /// Files that were images but failed to decode
    pub failed: Vec<UploadError>,
}

/// Filter a batch to image files and decode each one.
pub fn decode_batch(files: Vec<UploadFile>) -> UploadOutcome {
    let mut outcome = UploadOutcome::default();

    for file in expand_archives(files) {
        if !file.is_image() {
            log::trace!("Skipping non-image '{}' ({})", file.name, file.media_type);
            outcome.skipped.push(file.name);
            continue;
        }

        match decode_file(file) {
            Ok(record) => outcome.records.push(record),
            Err(e) => {
                log::warn!("Skipping file: {}", e);
                outcome.failed.push(e);
            }
        }
    }

    log::info!(
        "Upload: {} images decoded, {} skipped, {} failed",
        outcome.records.len(),
        outcome.skipped.len(),
        outcome.failed.len()
    );

    outcome
}
