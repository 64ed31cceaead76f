//! Data models for the labeller.

mod catalog;
mod labels;
mod record;

pub use catalog::{CatalogError, CategoryCatalog, LabelOption};
pub use labels::{LabelDepth, Labels};
pub use record::{ImageHandle, ImageRecord};
