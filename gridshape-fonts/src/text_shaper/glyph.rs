//! Positioned glyph records produced by shaping.

use crate::font::FontId;

/// Result of mapping one output glyph to the font.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Glyph {
    /// Glyph index in the owning font.
    Found(u32),
    /// The font has no glyph here.
    Missing,
}

impl Glyph {
    /// Map an engine glyph index, where 0 means not found.
    pub fn from_index(index: u32) -> Self {
        match index {
            0 => Glyph::Missing,
            index => Glyph::Found(index),
        }
    }

    /// Glyph index for rasterization; `Missing` maps to 0 (`.notdef`).
    pub fn index(self) -> u32 {
        match self {
            Glyph::Found(index) => index,
            Glyph::Missing => 0,
        }
    }

    pub fn is_missing(self) -> bool {
        self == Glyph::Missing
    }
}

/// A glyph placed relative to the start of its run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphPosition {
    /// Font the glyph index belongs to
    pub font: FontId,
    /// Horizontal offset in whole pixels (cell-quantized cursor + engine offset)
    pub x: i32,
    /// Vertical offset in whole pixels
    pub y: i32,
    pub glyph: Glyph,
    /// Cluster index of the source codepoint(s)
    pub cluster: u32,
}

pub type GlyphPositionList = Vec<GlyphPosition>;
