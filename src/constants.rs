//! Global constants for the labeller

/// Key of the single persisted session slot
pub const SESSION_KEY: &str = "imageLabelerData";

/// File name offered for the CSV export
pub const EXPORT_FILENAME: &str = "image_labels.csv";

/// Media type of the CSV export
pub const CSV_MEDIA_TYPE: &str = "text/csv;charset=utf-8;";

/// Media type assumed for files whose type cannot be determined
pub const UNKNOWN_MEDIA_TYPE: &str = "application/octet-stream";

/// Default zoom level
pub const ZOOM_DEFAULT: f32 = 1.0;

/// Zoom change per zoom in/out step
pub const ZOOM_STEP: f32 = 0.25;

/// Smallest zoom level
pub const ZOOM_MIN: f32 = 0.5;

/// Largest zoom level
pub const ZOOM_MAX: f32 = 3.0;
