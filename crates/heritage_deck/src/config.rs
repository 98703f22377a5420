//! Deck generation configuration.
//!
//! TOML-based configuration with bundled defaults (include_str! from
//! heritageflow.toml) and an optional user override file in the current
//! directory, user values taking precedence.

use config::{Config, File, FileFormat};
use heritage_error::{ConfigError, HeritageError, HeritageResult};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Configuration for deck generation.
///
/// # Example
///
/// ```toml
/// content_model = "gemini-3-flash-preview"
/// image_model = "gemini-2.5-flash-image"
/// slide_count = 8
/// aspect_ratio = "16:9"
/// language = "Chinese (Simplified)"
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DeckConfig {
    /// Model used for the structured content call
    pub content_model: String,
    /// Model used for per-slide image generation
    pub image_model: String,
    /// Number of slides requested per deck
    pub slide_count: u8,
    /// Aspect ratio for generated slide imagery
    pub aspect_ratio: String,
    /// Output language for deck text
    pub language: String,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            content_model: "gemini-3-flash-preview".to_string(),
            image_model: "gemini-2.5-flash-image".to_string(),
            slide_count: 8,
            aspect_ratio: "16:9".to_string(),
            language: "Chinese (Simplified)".to_string(),
        }
    }
}

impl DeckConfig {
    /// Load configuration from a specific file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> HeritageResult<Self> {
        debug!("Loading configuration from file");

        Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .map_err(|e| {
                HeritageError::from(ConfigError::new(format!(
                    "Failed to read configuration from {}: {}",
                    path.as_ref().display(),
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                HeritageError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })
    }

    /// Load configuration with precedence: user override > bundled default.
    ///
    /// Configuration sources in order of precedence (later sources override earlier):
    /// 1. Bundled defaults (heritageflow.toml shipped with the workspace)
    /// 2. User config in the current directory (./heritageflow.toml)
    ///
    /// The user file is optional and silently skipped if not found.
    #[instrument]
    pub fn load() -> HeritageResult<Self> {
        debug!("Loading configuration with precedence: current dir > bundled defaults");

        // Bundled default configuration
        const DEFAULT_CONFIG: &str = include_str!("../../../heritageflow.toml");

        Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::with_name("heritageflow").required(false))
            .build()
            .map_err(|e| {
                HeritageError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                HeritageError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_defaults_match_struct_defaults() {
        let loaded = DeckConfig::load().unwrap();
        let defaults = DeckConfig::default();
        assert_eq!(loaded.slide_count, defaults.slide_count);
        assert_eq!(loaded.aspect_ratio, defaults.aspect_ratio);
    }
}
