//! Pending label selection.
//!
//! Holds the three selector values for the image being viewed. Changing a
//! level clears the levels below it; the values only reach the image record
//! when the session saves them.

use crate::model::{LabelDepth, Labels};

/// The category, subcategory and sub-subcategory currently picked.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    labels: Labels,
}

impl Selection {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Selected values.
    pub fn labels(&self) -> &Labels {
        &self.labels
    }

    /// Selected category (empty when unset).
    pub fn category(&self) -> &str {
        &self.labels.category
    }

    /// Selected subcategory (empty when unset).
    pub fn subcategory(&self) -> &str {
        &self.labels.subcategory
    }

    /// Selected sub-subcategory (empty when unset).
    pub fn subsubcategory(&self) -> &str {
        &self.labels.subsubcategory
    }

    /// Pick a category. A different value clears both lower levels.
    /// Returns true if anything changed.
    pub fn select_category(&mut self, value: &str) -> bool {
        if self.labels.category == value {
            return false;
        }
        self.labels.category = value.to_string();
        self.labels.subcategory.clear();
        self.labels.subsubcategory.clear();
        true
    }

    /// Pick a subcategory. Ignored while no category is selected.
    /// A different value clears the third level.
    pub fn select_subcategory(&mut self, value: &str) -> bool {
        if self.labels.category.is_empty() || self.labels.subcategory == value {
            return false;
        }
        self.labels.subcategory = value.to_string();
        self.labels.subsubcategory.clear();
        true
    }

    /// Pick a sub-subcategory. Ignored while no subcategory is selected.
    pub fn select_subsubcategory(&mut self, value: &str) -> bool {
        if self.labels.subcategory.is_empty() || self.labels.subsubcategory == value {
            return false;
        }
        self.labels.subsubcategory = value.to_string();
        true
    }

    /// Replace the selection with the labels stored on a record.
    pub fn reseed(&mut self, labels: &Labels, depth: LabelDepth) {
        self.labels = labels.normalized(depth);
    }

    /// Clear every level.
    pub fn clear(&mut self) {
        self.labels = Labels::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full() -> Selection {
        let mut selection = Selection::new();
        selection.select_category("Action");
        selection.select_subcategory("Shooter");
        selection.select_subsubcategory("FPS");
        selection
    }

    #[test]
    fn test_category_change_clears_lower_levels() {
        let mut selection = full();
        assert!(selection.select_category("Sport"));
        assert_eq!(selection.labels(), &Labels::new("Sport", "", ""));
    }

    #[test]
    fn test_same_category_keeps_lower_levels() {
        let mut selection = full();
        assert!(!selection.select_category("Action"));
        assert_eq!(selection.labels(), &Labels::new("Action", "Shooter", "FPS"));
    }

    #[test]
    fn test_subcategory_change_clears_only_third_level() {
        let mut selection = full();
        assert!(selection.select_subcategory("Plateforme"));
        assert_eq!(selection.labels(), &Labels::new("Action", "Plateforme", ""));
    }

    #[test]
    fn test_subsubcategory_change_clears_nothing() {
        let mut selection = full();
        assert!(selection.select_subsubcategory("TPS"));
        assert_eq!(selection.labels(), &Labels::new("Action", "Shooter", "TPS"));
    }

    #[test]
    fn test_levels_require_parent() {
        let mut selection = Selection::new();
        assert!(!selection.select_subcategory("Shooter"));
        assert!(!selection.select_subsubcategory("FPS"));
        assert!(selection.labels().is_empty());

        selection.select_category("Action");
        assert!(!selection.select_subsubcategory("FPS"));
        assert_eq!(selection.subsubcategory(), "");
    }

    #[test]
    fn test_clearing_category_clears_everything() {
        let mut selection = full();
        assert!(selection.select_category(""));
        assert!(selection.labels().is_empty());
    }

    #[test]
    fn test_reseed_normalizes() {
        let mut selection = Selection::new();
        selection.reseed(&Labels::new("Action", "Shooter", "FPS"), LabelDepth::Two);
        assert_eq!(selection.labels(), &Labels::new("Action", "Shooter", ""));
        selection.clear();
        assert!(selection.labels().is_empty());
    }
}
