//! Image record data model.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::labels::Labels;

/// Raw bytes of an uploaded file.
///
/// Only lives for the duration of a run; it is never serialized, so records
/// restored from a saved session have no handle.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageHandle(Arc<[u8]>);

impl ImageHandle {
    /// Wrap raw file bytes.
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes.into())
    }

    /// Raw file bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.0
    }

    /// Size in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the file was empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for ImageHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ImageHandle({} bytes)", self.0.len())
    }
}

/// One image in the collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRecord {
    /// File name as supplied by the user
    pub name: String,
    /// Declared media type (e.g. `image/png`)
    #[serde(default)]
    pub media_type: String,
    /// File size in bytes
    #[serde(default)]
    pub size: u64,
    /// Raw bytes of the file for this run
    #[serde(skip)]
    pub handle: Option<ImageHandle>,
    /// `data:` URL that can be rendered directly
    #[serde(default)]
    pub url: String,
    /// Pixel dimensions, when the header could be read
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<(u32, u32)>,
    /// Assigned labels
    #[serde(flatten)]
    pub labels: Labels,
}

impl ImageRecord {
    /// Create an unlabelled record.
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, url: String) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            size: 0,
            handle: None,
            url,
            dimensions: None,
            labels: Labels::default(),
        }
    }

    /// Attach the raw bytes of the file.
    pub fn with_handle(mut self, handle: ImageHandle) -> Self {
        self.size = handle.len() as u64;
        self.handle = Some(handle);
        self
    }

    /// Set the pixel dimensions.
    pub fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.dimensions = Some((width, height));
        self
    }

    /// Check if any label level is set.
    pub fn is_labelled(&self) -> bool {
        !self.labels.is_empty()
    }
}
