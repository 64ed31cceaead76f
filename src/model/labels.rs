//! Label values assigned to an image.

use serde::{Deserialize, Serialize};

/// How many selector levels are in use.
///
/// Three levels is the canonical layout. The two-level layout keeps the same
/// data model with an always-empty third level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LabelDepth {
    /// Category and subcategory only
    Two,
    /// Category, subcategory and sub-subcategory
    #[default]
    Three,
}

impl LabelDepth {
    /// Whether the sub-subcategory level is in use.
    pub fn has_subsubcategory(&self) -> bool {
        matches!(self, LabelDepth::Three)
    }
}

/// The three label fields of an image.
///
/// Field order matters: it is the key order of the `json_format` export
/// column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Labels {
    /// Top-level category (empty when unset)
    #[serde(default)]
    pub category: String,
    /// Subcategory (empty unless `category` is set)
    #[serde(default)]
    pub subcategory: String,
    /// Sub-subcategory (empty unless `subcategory` is set)
    #[serde(default)]
    pub subsubcategory: String,
}

impl Labels {
    /// Create labels from the three levels.
    pub fn new(category: &str, subcategory: &str, subsubcategory: &str) -> Self {
        Self {
            category: category.to_string(),
            subcategory: subcategory.to_string(),
            subsubcategory: subsubcategory.to_string(),
        }
    }

    /// Check if no level is set.
    pub fn is_empty(&self) -> bool {
        self.category.is_empty() && self.subcategory.is_empty() && self.subsubcategory.is_empty()
    }

    /// Copy with the dependency invariant applied: a level is cleared when
    /// its parent is empty, and the third level is cleared for two-level
    /// labelling.
    pub fn normalized(&self, depth: LabelDepth) -> Self {
        let mut labels = self.clone();
        if labels.category.is_empty() {
            labels.subcategory.clear();
        }
        if labels.subcategory.is_empty() || !depth.has_subsubcategory() {
            labels.subsubcategory.clear();
        }
        labels
    }
}
