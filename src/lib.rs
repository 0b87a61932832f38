//! Cell-grid text shaping.
//!
//! Glue between terminal cells and [`gridshape_fonts`]: [`RunBuilder`] turns
//! cells into codepoint runs with one cluster per column, and
//! [`GridShaper`] loads fonts from a [`ShaperConfig`] and shapes those runs
//! through the cached fallback pipeline.

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod grid_shaper;
pub mod text_run;

pub use grid_shaper::GridShaper;
pub use text_run::RunBuilder;

// Re-export the crates a caller needs alongside the glue types
pub use gridshape_config::{ConfigError, ShaperConfig};
pub use gridshape_fonts::{
    FontId, Glyph, GlyphPosition, GlyphPositionList, ShapeError, ShapeStats,
};
