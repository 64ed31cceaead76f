//! Application state management modules.

mod collection;
mod selection;
mod session;
mod view;

#[cfg(test)]
mod tests;

pub use collection::ImageCollection;
pub use selection::Selection;
pub use session::{LabelSession, SessionState};
pub use view::ViewState;
