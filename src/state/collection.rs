//! Ordered image collection with a single cursor.

use crate::model::{ImageRecord, Labels};

/// The loaded images and the index of the one being labelled.
///
/// The cursor is always a valid index while the collection is non-empty and
/// zero while it is empty. Moving past either end clamps.
#[derive(Clone, Debug, Default)]
pub struct ImageCollection {
    /// Images in upload order
    images: Vec<ImageRecord>,
    /// Current image index
    cursor: usize,
}

impl ImageCollection {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a collection from records and a cursor, clamping the cursor.
    pub fn from_records(images: Vec<ImageRecord>, cursor: usize) -> Self {
        let mut collection = Self { images, cursor };
        collection.cursor = collection.clamp(cursor);
        collection
    }

    /// Replace every record and reset the cursor.
    pub fn replace(&mut self, images: Vec<ImageRecord>) {
        self.images = images;
        self.cursor = 0;
    }

    fn clamp(&self, index: usize) -> usize {
        index.min(self.images.len().saturating_sub(1))
    }

    /// Number of images.
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Check if nothing is loaded.
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Current image index.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// All records in order.
    pub fn records(&self) -> &[ImageRecord] {
        &self.images
    }

    /// Record at `index`.
    pub fn get(&self, index: usize) -> Option<&ImageRecord> {
        self.images.get(index)
    }

    /// Record under the cursor.
    pub fn current(&self) -> Option<&ImageRecord> {
        self.images.get(self.cursor)
    }

    /// Write labels onto the record under the cursor.
    /// Returns true if the record changed.
    pub fn set_current_labels(&mut self, labels: Labels) -> bool {
        let Some(record) = self.images.get_mut(self.cursor) else {
            return false;
        };
        if record.labels == labels {
            return false;
        }
        record.labels = labels;
        true
    }

    /// Move to the previous image, stopping at the first one.
    /// Returns true if the cursor moved.
    pub fn previous(&mut self) -> bool {
        let target = self.cursor.saturating_sub(1);
        self.move_to(target)
    }

    /// Move to the next image, stopping at the last one.
    /// Returns true if the cursor moved.
    pub fn next(&mut self) -> bool {
        let target = self.clamp(self.cursor.saturating_add(1));
        self.move_to(target)
    }

    fn move_to(&mut self, target: usize) -> bool {
        if target == self.cursor {
            return false;
        }
        self.cursor = target;
        true
    }

    /// Check if the cursor is on the first image.
    pub fn at_start(&self) -> bool {
        self.cursor == 0
    }

    /// Check if the cursor is on the last image (or nothing is loaded).
    pub fn at_end(&self) -> bool {
        self.cursor + 1 >= self.images.len()
    }

    /// Number of records carrying at least one label.
    pub fn labelled_count(&self) -> usize {
        self.images.iter().filter(|r| r.is_labelled()).count()
    }

    /// Get progress string like "3/15".
    pub fn progress(&self) -> String {
        if self.images.is_empty() {
            return "0/0".to_string();
        }
        format!("{}/{}", self.cursor + 1, self.images.len())
    }
}
