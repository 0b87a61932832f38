//! Typed error variants for the gridshape-config crate.
//!
//! Callers that work with `anyhow` can still recover the concrete failure
//! with `downcast_ref::<ConfigError>()`.

use thiserror::Error;

/// Errors that can occur when loading, saving or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An I/O error occurred reading or writing the config file.
    #[error("I/O error reading config: {0}")]
    Io(#[from] std::io::Error),

    /// The config file contained invalid YAML.
    #[error("YAML parse error in config: {0}")]
    Parse(#[source] serde_yaml_ng::Error),

    /// The config could not be rendered as YAML.
    #[error("Failed to serialize config: {0}")]
    Serialize(#[source] serde_yaml_ng::Error),

    /// A field value failed semantic validation.
    ///
    /// The inner string names the field and what is wrong with it.
    #[error("Config validation error: {0}")]
    Validation(String),
}
