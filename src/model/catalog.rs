//! Hierarchical category catalog.
//!
//! The catalog is a fixed three-level table: category → subcategory → leaf
//! terms. Lookups on paths that do not resolve return empty option lists
//! instead of failing, and mutations on missing parents are no-ops.
//!
//! Insertion order is preserved everywhere so the selector lists come out in
//! the same order as the seed file.

use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use thiserror::Error;

/// Bundled seed catalog.
const SEED_JSON: &str = include_str!("../../assets/categories.json");

/// Top-level wrapper key used by seed files.
const SEED_ROOT_KEY: &str = "CATEGORIES";

/// One entry of a selector list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelOption {
    /// Value stored on the image record
    pub value: String,
    /// Text shown to the user
    pub label: String,
}

impl LabelOption {
    /// Create an option whose value and label are both `name`.
    pub fn new(name: &str) -> Self {
        Self {
            value: name.to_string(),
            label: name.to_string(),
        }
    }
}

/// Errors raised while building a catalog from JSON.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The JSON parsed but does not have the catalog shape
    #[error("Invalid catalog at '{path}': {message}")]
    InvalidShape {
        /// Dotted path to the offending node
        path: String,
        /// Description of the problem
        message: String,
    },
}

impl CatalogError {
    fn invalid_shape(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidShape {
            path: path.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct SubcategoryNode {
    name: String,
    leaves: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CategoryNode {
    name: String,
    subcategories: Vec<SubcategoryNode>,
}

impl CategoryNode {
    fn subcategory(&self, name: &str) -> Option<&SubcategoryNode> {
        self.subcategories.iter().find(|s| s.name == name)
    }

    fn subcategory_mut(&mut self, name: &str) -> Option<&mut SubcategoryNode> {
        self.subcategories.iter_mut().find(|s| s.name == name)
    }
}

/// Three-level category catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryCatalog {
    categories: Vec<CategoryNode>,
}

impl CategoryCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// The catalog bundled with the application.
    pub fn seed() -> Self {
        match Self::from_seed_json(SEED_JSON) {
            Ok(catalog) => catalog,
            Err(e) => {
                log::error!("Bundled category catalog is invalid: {}", e);
                Self::new()
            }
        }
    }

    /// Parse a seed file.
    ///
    /// Accepts either the wrapped layout `{"CATEGORIES": {"<domain>": {..}}}`
    /// (domains are merged in order) or a bare catalog object.
    pub fn from_seed_json(json: &str) -> Result<Self, CatalogError> {
        let value: Value = serde_json::from_str(json)?;
        let root = value
            .as_object()
            .ok_or_else(|| CatalogError::invalid_shape("$", "expected an object"))?;

        let Some(wrapped) = root.get(SEED_ROOT_KEY) else {
            return Self::from_value(&value);
        };

        let domains = wrapped.as_object().ok_or_else(|| {
            CatalogError::invalid_shape(SEED_ROOT_KEY, "expected an object of domains")
        })?;
        let mut catalog = Self::new();
        for (domain, categories) in domains {
            let path = format!("{}.{}", SEED_ROOT_KEY, domain);
            let categories = categories
                .as_object()
                .ok_or_else(|| CatalogError::invalid_shape(&path, "expected an object"))?;
            catalog.merge_categories(categories, &path)?;
        }
        Ok(catalog)
    }

    /// Build a catalog from a bare JSON object (category → subcategories).
    ///
    /// Every key is a category name; there is no wrapper detection, so this
    /// is the inverse of [`CategoryCatalog::to_value`]. A category may map
    /// either to an object of subcategory → leaf list (three levels) or to a
    /// plain list of subcategory names (two levels, no leaves).
    pub fn from_value(value: &Value) -> Result<Self, CatalogError> {
        let root = value
            .as_object()
            .ok_or_else(|| CatalogError::invalid_shape("$", "expected an object"))?;

        let mut catalog = Self::new();
        catalog.merge_categories(root, "$")?;
        Ok(catalog)
    }

    fn merge_categories(
        &mut self,
        categories: &serde_json::Map<String, Value>,
        path: &str,
    ) -> Result<(), CatalogError> {
        for (name, children) in categories {
            let name = name.trim();
            let path = format!("{}.{}", path, name);
            self.add_category(name);

            match children {
                Value::Object(subcategories) => {
                    for (sub_name, leaves) in subcategories {
                        let sub_name = sub_name.trim();
                        let leaf_path = format!("{}.{}", path, sub_name);
                        let leaves = leaves.as_array().ok_or_else(|| {
                            CatalogError::invalid_shape(&leaf_path, "expected a list of terms")
                        })?;
                        self.add_subcategory(name, sub_name);
                        for leaf in leaves {
                            let term = leaf.as_str().ok_or_else(|| {
                                CatalogError::invalid_shape(&leaf_path, "terms must be strings")
                            })?;
                            self.add_leaf(name, sub_name, term);
                        }
                    }
                }
                Value::Array(subcategories) => {
                    for sub in subcategories {
                        let sub_name = sub.as_str().ok_or_else(|| {
                            CatalogError::invalid_shape(&path, "subcategory names must be strings")
                        })?;
                        self.add_subcategory(name, sub_name);
                    }
                }
                _ => {
                    return Err(CatalogError::invalid_shape(
                        path,
                        "expected an object or a list",
                    ));
                }
            }
        }
        Ok(())
    }

    /// Convert to the bare JSON layout (category → subcategory → terms).
    pub fn to_value(&self) -> Value {
        let mut root = serde_json::Map::new();
        for category in &self.categories {
            let mut subs = serde_json::Map::new();
            for sub in &category.subcategories {
                subs.insert(
                    sub.name.clone(),
                    Value::Array(sub.leaves.iter().cloned().map(Value::String).collect()),
                );
            }
            root.insert(category.name.clone(), Value::Object(subs));
        }
        Value::Object(root)
    }

    /// Number of top-level categories.
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Check if the catalog has no categories.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Check if a category exists.
    pub fn contains_category(&self, category: &str) -> bool {
        self.category(category).is_some()
    }

    fn category(&self, name: &str) -> Option<&CategoryNode> {
        self.categories.iter().find(|c| c.name == name)
    }

    fn category_mut(&mut self, name: &str) -> Option<&mut CategoryNode> {
        self.categories.iter_mut().find(|c| c.name == name)
    }

    /// Options for the first selector level.
    pub fn list_categories(&self) -> Vec<LabelOption> {
        self.categories
            .iter()
            .map(|c| LabelOption::new(&c.name))
            .collect()
    }

    /// Options for the second level under `category`.
    pub fn list_subcategories(&self, category: &str) -> Vec<LabelOption> {
        self.category(category)
            .map(|c| {
                c.subcategories
                    .iter()
                    .map(|s| LabelOption::new(&s.name))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Options for the third level under `category` / `subcategory`.
    pub fn list_leaves(&self, category: &str, subcategory: &str) -> Vec<LabelOption> {
        self.category(category)
            .and_then(|c| c.subcategory(subcategory))
            .map(|s| s.leaves.iter().map(|l| LabelOption::new(l)).collect())
            .unwrap_or_default()
    }

    /// Ensure a category exists. Returns true if the catalog changed.
    ///
    /// Blank names are ignored. An existing category keeps its children.
    pub fn add_category(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() || self.contains_category(name) {
            return false;
        }
        self.categories.push(CategoryNode {
            name: name.to_string(),
            subcategories: Vec::new(),
        });
        log::debug!("Catalog: added category '{}'", name);
        true
    }

    /// Ensure a subcategory exists under an existing category.
    /// Returns true if the catalog changed.
    pub fn add_subcategory(&mut self, category: &str, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        let Some(node) = self.category_mut(category) else {
            return false;
        };
        if node.subcategory(name).is_some() {
            return false;
        }
        node.subcategories.push(SubcategoryNode {
            name: name.to_string(),
            leaves: Vec::new(),
        });
        log::debug!("Catalog: added subcategory '{}' under '{}'", name, category);
        true
    }

    /// Append a leaf term to an existing subcategory.
    /// Returns true if the catalog changed.
    pub fn add_leaf(&mut self, category: &str, subcategory: &str, term: &str) -> bool {
        let term = term.trim();
        if term.is_empty() {
            return false;
        }
        let Some(sub) = self
            .category_mut(category)
            .and_then(|c| c.subcategory_mut(subcategory))
        else {
            return false;
        };
        if sub.leaves.iter().any(|l| l == term) {
            return false;
        }
        sub.leaves.push(term.to_string());
        log::debug!(
            "Catalog: added term '{}' under '{}/{}'",
            term,
            category,
            subcategory
        );
        true
    }
}

struct SubcategoriesRef<'a>(&'a [SubcategoryNode]);

impl Serialize for SubcategoriesRef<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for sub in self.0 {
            map.serialize_entry(&sub.name, &sub.leaves)?;
        }
        map.end()
    }
}

impl Serialize for CategoryCatalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.categories.len()))?;
        for category in &self.categories {
            map.serialize_entry(&category.name, &SubcategoriesRef(&category.subcategories))?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for CategoryCatalog {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(&value).map_err(D::Error::custom)
    }
}
