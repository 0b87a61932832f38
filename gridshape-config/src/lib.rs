//! Configuration system for gridshape.
//!
//! Provides the [`ShaperConfig`] settings struct, its default values, and
//! YAML persistence under `~/.config/gridshape/config.yaml`.

pub mod defaults;
mod error;
mod shaper_config;

pub use error::ConfigError;
pub use shaper_config::ShaperConfig;
