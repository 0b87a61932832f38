//! Shaper configuration and its YAML persistence.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Font and shaping settings.
///
/// Every field has a default, so a partial (or empty) YAML document is a
/// valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShaperConfig {
    /// Primary font family
    #[serde(default = "crate::defaults::font_family")]
    pub font_family: String,

    /// Font size in points
    #[serde(default = "crate::defaults::font_size")]
    pub font_size: f32,

    /// Display resolution used to convert points to pixels
    #[serde(default = "crate::defaults::dpi")]
    pub dpi: f32,

    /// Fallback families in priority order; empty selects the built-in chain
    #[serde(default = "crate::defaults::fallback_families")]
    pub fallback_families: Vec<String>,

    /// BCP 47 language tag for shaping (e.g. "ja"); `None` uses the locale
    #[serde(default = "crate::defaults::language")]
    pub language: Option<String>,

    /// OpenType feature settings such as "-liga" or "ss01"
    #[serde(default = "crate::defaults::features")]
    pub features: Vec<String>,
}

impl Default for ShaperConfig {
    fn default() -> Self {
        Self {
            font_family: crate::defaults::font_family(),
            font_size: crate::defaults::font_size(),
            dpi: crate::defaults::dpi(),
            fallback_families: crate::defaults::fallback_families(),
            language: crate::defaults::language(),
            features: crate::defaults::features(),
        }
    }
}

impl ShaperConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = family.into();
        self
    }

    pub fn with_font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    pub fn with_dpi(mut self, dpi: f32) -> Self {
        self.dpi = dpi;
        self
    }

    pub fn with_fallback_families<S: Into<String>>(
        mut self,
        families: impl IntoIterator<Item = S>,
    ) -> Self {
        self.fallback_families = families.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_features<S: Into<String>>(mut self, features: impl IntoIterator<Item = S>) -> Self {
        self.features = features.into_iter().map(Into::into).collect();
        self
    }

    /// Load the user config, or defaults if no config file exists.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path();
        log::info!("Config path: {:?}", config_path);

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            log::info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load and validate a config file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        log::info!("Loading config from {:?}", path);
        let contents = fs::read_to_string(path)?;
        let config: Self = serde_yaml_ng::from_str(&contents).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Save to the user config path.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path())
    }

    /// Save to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml_ng::to_string(self).map_err(ConfigError::Serialize)?;

        // Atomic save: write to temp file then rename to prevent corruption on crash
        let temp_path = path.with_extension("yaml.tmp");
        fs::write(&temp_path, &yaml)?;
        fs::rename(&temp_path, path)?;

        log::info!("Config saved to {:?}", path);
        Ok(())
    }

    /// Get the configuration file path (using XDG convention)
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.yaml")
    }

    /// Get the configuration directory path (using XDG convention)
    pub fn config_dir() -> PathBuf {
        #[cfg(target_os = "windows")]
        {
            if let Some(config_dir) = dirs::config_dir() {
                config_dir.join("gridshape")
            } else {
                PathBuf::from(".")
            }
        }
        #[cfg(not(target_os = "windows"))]
        {
            if let Some(home_dir) = dirs::home_dir() {
                home_dir.join(".config").join("gridshape")
            } else {
                PathBuf::from(".")
            }
        }
    }

    /// Check field values that deserialize fine but cannot be used.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.font_family.trim().is_empty() {
            return Err(ConfigError::Validation(
                "font_family must not be empty".to_string(),
            ));
        }
        if !(self.font_size.is_finite() && self.font_size > 0.0) {
            return Err(ConfigError::Validation(format!(
                "font_size must be positive, got {}",
                self.font_size
            )));
        }
        if !(self.dpi.is_finite() && self.dpi > 0.0) {
            return Err(ConfigError::Validation(format!(
                "dpi must be positive, got {}",
                self.dpi
            )));
        }
        if let Some(index) = self
            .fallback_families
            .iter()
            .position(|family| family.trim().is_empty())
        {
            return Err(ConfigError::Validation(format!(
                "fallback_families[{}] must not be empty",
                index
            )));
        }
        Ok(())
    }
}
