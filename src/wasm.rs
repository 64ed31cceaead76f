//! Browser bindings.
//!
//! [`WebLabeller`] wraps a [`LabelSession`] persisted to localStorage. The
//! page calls one method per user action and re-reads the option lists and
//! the current image afterwards.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::config::AppConfig;
use crate::download::trigger_download;
use crate::model::{CategoryCatalog, LabelOption};
use crate::state::LabelSession;
use crate::store::LocalStorageSessionStore;
use crate::upload::UploadFile;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    let config = AppConfig::load_from_local_storage().unwrap_or_default();
    let level = config
        .preferences
        .log_level
        .to_level_filter()
        .to_level()
        .unwrap_or(log::Level::Error);
    if console_log::init_with_level(level).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }

    log::info!("Labeller WASM started");
}

fn values(options: Vec<LabelOption>) -> Vec<String> {
    options.into_iter().map(|option| option.value).collect()
}

/// A labelling session for the browser.
#[wasm_bindgen]
pub struct WebLabeller {
    session: LabelSession<LocalStorageSessionStore>,
}

#[wasm_bindgen]
impl WebLabeller {
    /// Restore the session saved in localStorage, or start empty.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        let config = AppConfig::load_from_local_storage().unwrap_or_default();
        Self {
            session: LabelSession::restore(
                LocalStorageSessionStore::new(),
                CategoryCatalog::seed(),
                config.preferences.label_depth,
            ),
        }
    }

    /// Replace the collection with the selected files.
    ///
    /// `names`, `types` and `contents` are parallel; each entry of `contents`
    /// is a `Uint8Array`. Returns the number of images loaded, or -1 if the
    /// selection was empty and nothing changed.
    pub fn upload(
        &mut self,
        names: Vec<String>,
        types: Vec<String>,
        contents: js_sys::Array,
    ) -> Result<i32, JsValue> {
        if names.len() != types.len() || names.len() != contents.length() as usize {
            return Err(JsValue::from_str("names, types and contents differ in length"));
        }

        let mut files = Vec::with_capacity(names.len());
        for ((name, media_type), bytes) in names.into_iter().zip(types).zip(contents.iter()) {
            let bytes: js_sys::Uint8Array = bytes.dyn_into()?;
            files.push(UploadFile::new(name, media_type, bytes.to_vec()));
        }

        Ok(match self.session.upload(files) {
            Some(summary) => i32::try_from(summary.loaded).unwrap_or(i32::MAX),
            None => -1,
        })
    }

    /// Save the pending selection onto the current image.
    pub fn save(&mut self) -> bool {
        self.session.save_current_labels()
    }

    /// Save, then go to the previous image.
    pub fn previous(&mut self) -> bool {
        self.session.previous()
    }

    /// Save, then go to the next image.
    pub fn next(&mut self) -> bool {
        self.session.next()
    }

    #[wasm_bindgen(js_name = selectCategory)]
    pub fn select_category(&mut self, value: &str) -> bool {
        self.session.select_category(value)
    }

    #[wasm_bindgen(js_name = selectSubcategory)]
    pub fn select_subcategory(&mut self, value: &str) -> bool {
        self.session.select_subcategory(value)
    }

    #[wasm_bindgen(js_name = selectSubsubcategory)]
    pub fn select_subsubcategory(&mut self, value: &str) -> bool {
        self.session.select_subsubcategory(value)
    }

    #[wasm_bindgen(js_name = addCategory)]
    pub fn add_category(&mut self, name: &str) -> bool {
        self.session.add_category(name)
    }

    #[wasm_bindgen(js_name = addSubcategory)]
    pub fn add_subcategory(&mut self, name: &str) -> bool {
        self.session.add_subcategory(name)
    }

    #[wasm_bindgen(js_name = addLeaf)]
    pub fn add_leaf(&mut self, term: &str) -> bool {
        self.session.add_leaf(term)
    }

    #[wasm_bindgen(js_name = categoryOptions)]
    pub fn category_options(&self) -> Vec<String> {
        values(self.session.category_options())
    }

    #[wasm_bindgen(js_name = subcategoryOptions)]
    pub fn subcategory_options(&self) -> Vec<String> {
        values(self.session.subcategory_options())
    }

    #[wasm_bindgen(js_name = subsubcategoryOptions)]
    pub fn subsubcategory_options(&self) -> Vec<String> {
        values(self.session.subsubcategory_options())
    }

    #[wasm_bindgen(getter)]
    pub fn category(&self) -> String {
        self.session.selection().category().to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn subcategory(&self) -> String {
        self.session.selection().subcategory().to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn subsubcategory(&self) -> String {
        self.session.selection().subsubcategory().to_string()
    }

    /// Whether the third selector is shown.
    #[wasm_bindgen(getter, js_name = hasSubsubcategory)]
    pub fn has_subsubcategory(&self) -> bool {
        self.session.depth().has_subsubcategory()
    }

    /// `data:` URL of the current image.
    #[wasm_bindgen(getter, js_name = currentUrl)]
    pub fn current_url(&self) -> Option<String> {
        self.session.current().map(|record| record.url.clone())
    }

    #[wasm_bindgen(getter, js_name = currentName)]
    pub fn current_name(&self) -> Option<String> {
        self.session.current().map(|record| record.name.clone())
    }

    /// Progress like "3/15".
    #[wasm_bindgen(getter)]
    pub fn progress(&self) -> String {
        self.session.progress()
    }

    #[wasm_bindgen(getter, js_name = atStart)]
    pub fn at_start(&self) -> bool {
        self.session.collection().at_start()
    }

    #[wasm_bindgen(getter, js_name = atEnd)]
    pub fn at_end(&self) -> bool {
        self.session.collection().at_end()
    }

    #[wasm_bindgen(getter)]
    pub fn zoom(&self) -> f32 {
        self.session.zoom()
    }

    #[wasm_bindgen(js_name = zoomIn)]
    pub fn zoom_in(&mut self) {
        self.session.zoom_in();
    }

    #[wasm_bindgen(js_name = zoomOut)]
    pub fn zoom_out(&mut self) {
        self.session.zoom_out();
    }

    #[wasm_bindgen(js_name = resetZoom)]
    pub fn reset_zoom(&mut self) {
        self.session.reset_zoom();
    }

    /// Save the current labels and download `image_labels.csv`.
    /// Returns false when there is nothing to export.
    #[wasm_bindgen(js_name = exportCsv)]
    pub fn export_csv(&mut self) -> Result<bool, JsValue> {
        let Some(export) = self
            .session
            .export_csv()
            .map_err(|e| JsValue::from_str(&e.to_string()))?
        else {
            return Ok(false);
        };
        trigger_download(&export.filename, &export.media_type, &export.contents)?;
        Ok(true)
    }
}

impl Default for WebLabeller {
    fn default() -> Self {
        Self::new()
    }
}
