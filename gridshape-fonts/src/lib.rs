//! Shape caching and fallback font resolution for cell-grid text rendering.
//!
//! This crate provides:
//! - A shape cache keyed on codepoint sequences
//! - Fallback resolution across a primary font and an ordered fallback chain
//! - Replacement-character substitution when no font covers a run
//! - HarfBuzz-based shaping via rustybuzz behind the [`ShapingEngine`] trait
//! - Font loading through fontdb with swash-backed charmap and metrics lookups
//!
//! # Architecture
//!
//! The [`TextShaper`] orchestrates a single shape call:
//! 1. Cache check (no engine work on a hit)
//! 2. Shaping attempt against the primary font
//! 3. Shaping attempts against each fallback font, in order
//! 4. Primary font re-shape with missing glyphs patched to U+FFFD
//!
//! Engine font handles are created lazily per font and kept in a registry
//! until the cache is cleared or the shaper is dropped.

pub mod engine;
pub mod error;
pub mod font;
pub mod text_shaper;

// Re-export main types for convenience
pub use engine::{Direction, RawGlyph, RustybuzzEngine, SegmentProperties, ShapingEngine};
pub use error::{FontLoadError, ShapeError};
pub use font::{DEFAULT_FALLBACK_FAMILIES, Font, FontData, FontId, FontList, FontLoader};
pub use text_shaper::{
    CodepointRun, Glyph, GlyphPosition, GlyphPositionList, ShapeCache, ShapeStats, TextShaper,
};
