//! Labeller - Hierarchical Image Labelling Tool
//!
//! Load a batch of images, tag each with a category, subcategory and
//! sub-subcategory picked from an extendable catalog, and export the labels
//! as CSV. The session survives restarts through a pluggable
//! [`store::SessionStore`].
//!
//! Native builds ship a line-oriented front end (`labeller-cli`); WASM builds
//! expose `WebLabeller` to the page.

pub mod config;
pub mod constants;
pub mod format;
pub mod message;
pub mod model;
pub mod state;
pub mod store;
pub mod upload;

#[cfg(not(target_arch = "wasm32"))]
pub mod handlers;

#[cfg(test)]
mod test_support;

pub use model::{CategoryCatalog, ImageRecord, LabelDepth, Labels};
pub use state::LabelSession;

// WASM entry point
#[cfg(target_arch = "wasm32")]
mod download;
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::*;
