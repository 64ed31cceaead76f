//! The labelling session.
//!
//! [`LabelSession`] owns the catalog, the image collection, the pending
//! selection and the view state, and writes a snapshot to its
//! [`SessionStore`] after every change to the collection, cursor or catalog.
//! Persistence is fire-and-forget: a failed write is logged and the session
//! carries on.
//!
//! Option lists for the three selectors are derived on demand from the
//! catalog and the current selection; callers ask for them again after each
//! change.

use crate::format::{CsvExport, FormatError, export_csv};
use crate::model::{CategoryCatalog, ImageRecord, LabelDepth, LabelOption};
use crate::store::{PersistedSession, SessionStore, load_session, save_session};
use crate::upload::{UploadFile, UploadOutcome, UploadSummary, decode_batch};

use super::collection::ImageCollection;
use super::selection::Selection;
use super::view::ViewState;

/// Navigation state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No images loaded
    Empty,
    /// Viewing the image at this index
    Viewing(usize),
}

/// A labelling session bound to a persistence slot.
#[derive(Debug)]
pub struct LabelSession<S: SessionStore> {
    catalog: CategoryCatalog,
    collection: ImageCollection,
    selection: Selection,
    view: ViewState,
    depth: LabelDepth,
    store: S,
}

impl<S: SessionStore> LabelSession<S> {
    /// Start an empty session without reading the store.
    pub fn new(store: S, catalog: CategoryCatalog, depth: LabelDepth) -> Self {
        Self {
            catalog,
            collection: ImageCollection::new(),
            selection: Selection::new(),
            view: ViewState::default(),
            depth,
            store,
        }
    }

    /// Start a session from whatever the store holds.
    ///
    /// Without a usable snapshot the session starts empty with `seed` as its
    /// catalog. A snapshot without a catalog also falls back to `seed`.
    pub fn restore(store: S, seed: CategoryCatalog, depth: LabelDepth) -> Self {
        let mut session = Self::new(store, seed, depth);
        if let Some(snapshot) = load_session(&session.store) {
            session.apply_snapshot(snapshot);
        }
        session
    }

    fn apply_snapshot(&mut self, snapshot: PersistedSession) {
        self.collection = snapshot.collection();
        if let Some(catalog) = snapshot.categories_data {
            self.catalog = catalog;
        }
        self.reseed_selection();
        self.view.reset();
    }

    fn reseed_selection(&mut self) {
        match self.collection.current() {
            Some(record) => self.selection.reseed(&record.labels, self.depth),
            None => self.selection.clear(),
        }
    }

    fn persist(&mut self) {
        if let Err(e) = save_session(&mut self.store, &self.collection, &self.catalog) {
            log::warn!("Failed to save session: {}", e);
        }
    }

    /// Current navigation state.
    pub fn state(&self) -> SessionState {
        if self.collection.is_empty() {
            SessionState::Empty
        } else {
            SessionState::Viewing(self.collection.cursor())
        }
    }

    /// Check if no images are loaded.
    pub fn is_empty(&self) -> bool {
        self.collection.is_empty()
    }

    /// The category catalog.
    pub fn catalog(&self) -> &CategoryCatalog {
        &self.catalog
    }

    /// The image collection.
    pub fn collection(&self) -> &ImageCollection {
        &self.collection
    }

    /// Record under the cursor.
    pub fn current(&self) -> Option<&ImageRecord> {
        self.collection.current()
    }

    /// Pending selection for the current image.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Label depth in use.
    pub fn depth(&self) -> LabelDepth {
        self.depth
    }

    /// Current preview zoom.
    pub fn zoom(&self) -> f32 {
        self.view.zoom()
    }

    /// Preview view state.
    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Get progress string like "3/15".
    pub fn progress(&self) -> String {
        self.collection.progress()
    }

    /// The persistence backend.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Give back the persistence backend.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Options for the category selector.
    pub fn category_options(&self) -> Vec<LabelOption> {
        self.catalog.list_categories()
    }

    /// Options for the subcategory selector, given the selected category.
    pub fn subcategory_options(&self) -> Vec<LabelOption> {
        self.catalog.list_subcategories(self.selection.category())
    }

    /// Options for the sub-subcategory selector, given the selected
    /// category and subcategory. Always empty for two-level labelling.
    pub fn subsubcategory_options(&self) -> Vec<LabelOption> {
        if !self.depth.has_subsubcategory() {
            return Vec::new();
        }
        self.catalog
            .list_leaves(self.selection.category(), self.selection.subcategory())
    }

    /// Replace the collection with the images in `files`.
    ///
    /// Files whose declared type is not image-like are dropped and files that
    /// fail to decode are skipped. An empty `files` list changes nothing and
    /// returns None.
    pub fn upload(&mut self, files: Vec<UploadFile>) -> Option<UploadSummary> {
        if files.is_empty() {
            return None;
        }

        let UploadOutcome {
            records,
            skipped,
            failed,
        } = decode_batch(files);
        self.collection.replace(records);
        self.selection.clear();
        self.view.reset();

        log::info!("Loaded {} images", self.collection.len());
        self.persist();

        Some(UploadSummary {
            loaded: self.collection.len(),
            skipped,
            failed,
        })
    }

    /// Copy the selection onto the current record without persisting.
    fn commit_selection(&mut self) -> bool {
        if self.collection.is_empty() {
            return false;
        }
        let labels = self.selection.labels().normalized(self.depth);
        if self.collection.set_current_labels(labels) {
            log::debug!("Saved labels for image {}", self.collection.progress());
        }
        true
    }

    /// Write the pending selection onto the current image.
    /// Returns false when nothing is loaded.
    pub fn save_current_labels(&mut self) -> bool {
        if !self.commit_selection() {
            return false;
        }
        self.persist();
        true
    }

    /// Save, then move to the previous image (stopping at the first).
    /// Returns true if the cursor moved.
    pub fn previous(&mut self) -> bool {
        if !self.commit_selection() {
            return false;
        }
        let moved = self.collection.previous();
        self.after_navigation(moved);
        moved
    }

    /// Save, then move to the next image (stopping at the last).
    /// Returns true if the cursor moved.
    pub fn next(&mut self) -> bool {
        if !self.commit_selection() {
            return false;
        }
        let moved = self.collection.next();
        self.after_navigation(moved);
        moved
    }

    fn after_navigation(&mut self, moved: bool) {
        if moved {
            log::debug!("Navigated to image {}", self.collection.progress());
            self.reseed_selection();
            self.view.reset();
        }
        self.persist();
    }

    /// Pick a category. A different value clears the lower levels.
    pub fn select_category(&mut self, value: &str) -> bool {
        self.selection.select_category(value)
    }

    /// Pick a subcategory. A different value clears the third level.
    pub fn select_subcategory(&mut self, value: &str) -> bool {
        self.selection.select_subcategory(value)
    }

    /// Pick a sub-subcategory. Ignored for two-level labelling.
    pub fn select_subsubcategory(&mut self, value: &str) -> bool {
        if !self.depth.has_subsubcategory() {
            return false;
        }
        self.selection.select_subsubcategory(value)
    }

    /// Add a category to the catalog.
    pub fn add_category(&mut self, name: &str) -> bool {
        let changed = self.catalog.add_category(name);
        if changed {
            self.persist();
        }
        changed
    }

    /// Add a subcategory under the selected category.
    pub fn add_subcategory(&mut self, name: &str) -> bool {
        let changed = self
            .catalog
            .add_subcategory(self.selection.category(), name);
        if changed {
            self.persist();
        }
        changed
    }

    /// Add a term under the selected category and subcategory.
    pub fn add_leaf(&mut self, term: &str) -> bool {
        if !self.depth.has_subsubcategory() {
            return false;
        }
        let changed = self.catalog.add_leaf(
            self.selection.category(),
            self.selection.subcategory(),
            term,
        );
        if changed {
            self.persist();
        }
        changed
    }

    /// Zoom the preview in one step.
    pub fn zoom_in(&mut self) {
        self.view.zoom_in();
    }

    /// Zoom the preview out one step.
    pub fn zoom_out(&mut self) {
        self.view.zoom_out();
    }

    /// Reset the preview zoom.
    pub fn reset_zoom(&mut self) {
        self.view.reset();
    }

    /// Save the current image's labels, then render every record as CSV.
    /// Returns None when nothing is loaded.
    pub fn export_csv(&mut self) -> Result<Option<CsvExport>, FormatError> {
        if !self.save_current_labels() {
            return Ok(None);
        }
        let export = export_csv(self.collection.records(), self.depth)?;
        log::info!("Exported {} rows as {}", export.rows, export.filename);
        Ok(Some(export))
    }
}
