//! Typed error types for gridshape-fonts.
//!
//! Coverage failures are never errors: a font lacking a glyph shows up as
//! [`Glyph::Missing`](crate::Glyph::Missing) inside an otherwise valid result.
//! The variants below cover the failures a caller cannot recover from locally.

use thiserror::Error;

use crate::font::FontId;

/// Errors surfaced by the shaping pipeline.
#[derive(Debug, Error)]
pub enum ShapeError {
    /// The shaping engine could not build a font handle for this font.
    #[error("Failed to create shaping engine handle for font {font}: {reason}")]
    FaceCreation {
        /// Font the handle was requested for.
        font: FontId,
        /// Engine-specific failure description.
        reason: String,
    },
}

/// Errors produced while loading fonts from the system font database.
#[derive(Debug, Error)]
pub enum FontLoadError {
    /// The requested family is not installed.
    #[error("Font family '{0}' not found")]
    FamilyNotFound(String),

    /// The family was found but its face data could not be read or parsed.
    #[error("Font data for '{0}' could not be parsed")]
    InvalidFontData(String),

    /// Neither the primary family nor any fallback family could be loaded.
    #[error("No usable font found (primary '{primary}', {fallbacks} fallback families tried)")]
    NoUsableFont {
        /// The requested primary family.
        primary: String,
        /// How many fallback families were tried.
        fallbacks: usize,
    },
}
