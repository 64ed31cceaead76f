//! Label export.
//!
//! The CSV export is the only output format: one row per image with the
//! three label levels and the same labels as compact JSON.

pub mod csv;
mod error;

pub use csv::{CsvExport, export_csv};
pub use error::FormatError;
