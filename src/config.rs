//! Configuration file support for the labeller.
//!
//! This module provides serialization and deserialization of application
//! settings. Native builds read `labeller-config.json` from the user's config
//! directory; WASM builds read the same JSON from localStorage.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::model::{CatalogError, LabelDepth};

/// Log level setting for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Show only errors
    Error,
    /// Show errors and warnings
    Warn,
    /// Show errors, warnings, and info messages
    #[default]
    Info,
    /// Show debug-level logging
    Debug,
    /// Show all log messages including trace
    Trace,
}

impl LogLevel {
    /// Convert to log crate's LevelFilter.
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Current configuration file format version.
/// Increment this when making breaking changes to the config format.
pub const CONFIG_VERSION: u32 = 1;

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Version of the configuration file format
    pub version: u32,

    /// Application name (for identification)
    #[serde(default = "default_app_name")]
    pub app_name: String,

    /// User preferences
    #[serde(default)]
    pub preferences: UserPreferences,
}

fn default_app_name() -> String {
    "Labeller".to_string()
}

/// User preferences section of the config.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserPreferences {
    /// Log verbosity level
    #[serde(default)]
    pub log_level: LogLevel,

    /// Number of selector levels
    #[serde(default)]
    pub label_depth: LabelDepth,

    /// Folder the CSV export is written to (empty = working directory)
    #[serde(default)]
    pub export_folder: String,

    /// Session file override (empty = default data directory)
    #[serde(default)]
    pub session_path: String,

    /// Catalog file replacing the bundled seed (empty = bundled seed)
    #[serde(default)]
    pub catalog_path: String,
}

fn non_empty_path(value: &str) -> Option<PathBuf> {
    let value = value.trim();
    (!value.is_empty()).then(|| PathBuf::from(value))
}

impl UserPreferences {
    /// Export folder, if one is configured.
    pub fn export_folder(&self) -> Option<PathBuf> {
        non_empty_path(&self.export_folder)
    }

    /// Session file override, if one is configured.
    pub fn session_path(&self) -> Option<PathBuf> {
        non_empty_path(&self.session_path)
    }

    /// Custom catalog file, if one is configured.
    pub fn catalog_path(&self) -> Option<PathBuf> {
        non_empty_path(&self.catalog_path)
    }
}

impl AppConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self {
            version: CONFIG_VERSION,
            app_name: default_app_name(),
            preferences: UserPreferences::default(),
        }
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;

        // Validate version compatibility
        if config.version > CONFIG_VERSION {
            return Err(ConfigError::VersionTooNew {
                file_version: config.version,
                supported_version: CONFIG_VERSION,
            });
        }

        Ok(config)
    }

    /// Get the default filename for the config file.
    pub fn default_filename() -> &'static str {
        "labeller-config.json"
    }

    /// Load the catalog this configuration asks for.
    ///
    /// Uses the bundled seed unless `catalog_path` is set.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_catalog(&self) -> Result<crate::model::CategoryCatalog, ConfigError> {
        use crate::model::CategoryCatalog;

        let Some(path) = self.preferences.catalog_path() else {
            return Ok(CategoryCatalog::seed());
        };
        let json = std::fs::read_to_string(&path)?;
        let catalog = CategoryCatalog::from_seed_json(&json)?;
        log::info!(
            "Loaded catalog with {} categories from {:?}",
            catalog.len(),
            path
        );
        Ok(catalog)
    }

    /// Get the default config file path for auto-load/save.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn default_path() -> Option<PathBuf> {
        // Try to use XDG config directory, fall back to home directory
        if let Some(config_dir) = dirs::config_dir() {
            Some(config_dir.join("labeller").join(Self::default_filename()))
        } else {
            dirs::home_dir().map(|home_dir| {
                home_dir
                    .join(".config")
                    .join("labeller")
                    .join(Self::default_filename())
            })
        }
    }

    /// Try to load configuration from a file.
    /// Returns None if the file doesn't exist or can't be read.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_path(path: &std::path::Path) -> Option<Self> {
        if !path.exists() {
            log::debug!("No config file found at {:?}", path);
            return None;
        }

        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(config) => {
                    log::info!("Loaded configuration from {:?}", path);
                    Some(config)
                }
                Err(e) => {
                    log::warn!("Failed to parse config file {:?}: {}", path, e);
                    None
                }
            },
            Err(e) => {
                log::warn!("Failed to read config file {:?}: {}", path, e);
                None
            }
        }
    }

    /// Load configuration from `path`, writing the defaults there first if
    /// no file exists yet so users have a file to edit.
    ///
    /// A file that exists but cannot be used is left alone and the defaults
    /// are returned.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_or_create(path: &std::path::Path) -> Self {
        if path.exists() {
            return Self::load_from_path(path).unwrap_or_default();
        }

        let config = Self::new();
        if let Err(e) = config.save_to_path(path) {
            log::warn!("Failed to write default config to {:?}: {}", path, e);
        }
        config
    }

    /// Save configuration to a file, creating parent directories.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to_path(&self, path: &std::path::Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = self.to_json()?;
        std::fs::write(path, json)?;
        log::info!("Saved configuration to {:?}", path);
        Ok(())
    }

    /// LocalStorage key for WASM config persistence.
    #[cfg(target_arch = "wasm32")]
    const LOCALSTORAGE_KEY: &'static str = "labeller-config";

    /// Try to load configuration from localStorage (WASM only).
    /// Returns None if not found or can't be parsed.
    #[cfg(target_arch = "wasm32")]
    pub fn load_from_local_storage() -> Option<Self> {
        let window = web_sys::window()?;
        let storage = window.local_storage().ok()??;

        match storage.get_item(Self::LOCALSTORAGE_KEY) {
            Ok(Some(json)) => match Self::from_json(&json) {
                Ok(config) => {
                    log::info!("Loaded configuration from localStorage");
                    Some(config)
                }
                Err(e) => {
                    log::warn!("Failed to parse config from localStorage: {}", e);
                    None
                }
            },
            Ok(None) => {
                log::debug!("No config found in localStorage");
                None
            }
            Err(e) => {
                log::warn!("Failed to read from localStorage: {:?}", e);
                None
            }
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// JSON parsing error
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Configuration version is newer than supported
    #[error(
        "Configuration file version {file_version} is newer than supported version {supported_version}"
    )]
    VersionTooNew {
        file_version: u32,
        supported_version: u32,
    },

    /// I/O error when reading/writing config
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Custom catalog file could not be used
    #[error("Invalid catalog: {0}")]
    Catalog(#[from] CatalogError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.version, CONFIG_VERSION);
        assert_eq!(config.preferences.log_level, LogLevel::Info);
        assert_eq!(config.preferences.label_depth, LabelDepth::Three);
        assert!(config.preferences.export_folder().is_none());
        assert!(config.preferences.catalog_path().is_none());
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config = AppConfig::from_json(
            r#"{ "version": 1, "preferences": { "label_depth": "two", "export_folder": " out " } }"#,
        )
        .unwrap();
        assert_eq!(config.app_name, "Labeller");
        assert_eq!(config.preferences.label_depth, LabelDepth::Two);
        assert_eq!(config.preferences.log_level, LogLevel::Info);
        assert_eq!(config.preferences.export_folder(), Some(PathBuf::from("out")));
    }

    #[test]
    fn test_newer_version_rejected() {
        let err = AppConfig::from_json(r#"{ "version": 2 }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::VersionTooNew {
                file_version: 2,
                supported_version: 1
            }
        ));
    }

    #[test]
    fn test_log_level_filter() {
        assert_eq!(LogLevel::Warn.to_level_filter(), log::LevelFilter::Warn);
        assert_eq!(LogLevel::Trace.to_level_filter(), log::LevelFilter::Trace);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cfg").join(AppConfig::default_filename());
        let mut config = AppConfig::new();
        config.preferences.log_level = LogLevel::Debug;
        config.save_to_path(&path).unwrap();

        let loaded = AppConfig::load_from_path(&path).unwrap();
        assert_eq!(loaded.preferences.log_level, LogLevel::Debug);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_load_or_create_writes_defaults_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("labeller").join(AppConfig::default_filename());

        let config = AppConfig::load_or_create(&path);
        assert_eq!(config.preferences.log_level, LogLevel::Info);
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("\"label_depth\": \"three\""));

        std::fs::write(&path, r#"{ "version": 1, "preferences": { "log_level": "warn" } }"#)
            .unwrap();
        let config = AppConfig::load_or_create(&path);
        assert_eq!(config.preferences.log_level, LogLevel::Warn);

        std::fs::write(&path, "broken").unwrap();
        let config = AppConfig::load_or_create(&path);
        assert_eq!(config.preferences.log_level, LogLevel::Info);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "broken");
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_custom_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, r#"{ "Books": { "Novel": ["Crime"] } }"#).unwrap();

        let mut config = AppConfig::new();
        assert!(config.load_catalog().unwrap().contains_category("Action"));

        config.preferences.catalog_path = path.display().to_string();
        let catalog = config.load_catalog().unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(catalog.contains_category("Books"));

        std::fs::write(&path, "[]").unwrap();
        assert!(matches!(
            config.load_catalog(),
            Err(ConfigError::Catalog(_))
        ));
    }
}
