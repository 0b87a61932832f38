//! Shaping engine abstraction.
//!
//! The shaper drives an engine through the same steps HarfBuzz exposes:
//! reset the working buffer, append codepoints with their clusters, fix the
//! segment properties, shape against a per-font handle, normalize, and read
//! the positioned glyphs back. [`RustybuzzEngine`] is the production engine;
//! tests plug in scripted engines through the same trait.

mod rustybuzz_engine;

pub use rustybuzz_engine::{RustybuzzEngine, RustybuzzFace};

use crate::error::ShapeError;
use crate::font::Font;

/// ISO 15924 tag for the Common script.
pub const SCRIPT_COMMON: [u8; 4] = *b"Zyyy";

/// One glyph as reported by the engine.
///
/// Offsets and advances are in 26.6 fixed point (1/64 pixel).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RawGlyph {
    /// Glyph index in the font (0 = not found)
    pub glyph_id: u32,
    /// Cluster index copied from the input codepoint
    pub cluster: u32,
    pub x_offset: i32,
    pub y_offset: i32,
    pub x_advance: i32,
    pub y_advance: i32,
}

/// Text direction of a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    LeftToRight,
    RightToLeft,
}

/// Segmentation properties applied to the engine buffer before shaping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentProperties {
    pub direction: Direction,
    /// ISO 15924 script tag, e.g. `*b"Zyyy"` or `*b"Latn"`.
    pub script: [u8; 4],
    /// BCP 47 language tag; `None` leaves the engine default in place.
    pub language: Option<String>,
}

impl SegmentProperties {
    /// Left-to-right, Common script, with an explicit language.
    pub fn with_language(language: Option<String>) -> Self {
        Self {
            direction: Direction::LeftToRight,
            script: SCRIPT_COMMON,
            language,
        }
    }
}

impl Default for SegmentProperties {
    /// Left-to-right, Common script, and the process default language.
    fn default() -> Self {
        Self::with_language(default_language())
    }
}

/// The process default language, derived from the locale environment.
///
/// Checks `LC_ALL`, `LC_CTYPE` and `LANG` in that order and converts a POSIX
/// locale name such as `de_DE.UTF-8@euro` into a language tag (`de-de`).
/// The `C` and `POSIX` locales have no language.
pub fn default_language() -> Option<String> {
    ["LC_ALL", "LC_CTYPE", "LANG"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|value| !value.is_empty())
        .and_then(|locale| language_from_locale(&locale))
}

fn language_from_locale(locale: &str) -> Option<String> {
    let name = locale
        .split(['.', '@'])
        .next()
        .unwrap_or_default()
        .trim();
    if name.is_empty() || name == "C" || name == "POSIX" {
        return None;
    }
    Some(name.replace('_', "-").to_ascii_lowercase())
}

/// A glyph-shaping engine with a reusable working buffer.
pub trait ShapingEngine {
    /// Font type the engine can build handles from.
    type Font: Font;

    /// Per-font engine state, created once per font and reused across calls.
    type FontHandle;

    /// Build the engine handle for `font`.
    fn create_font_handle(&self, font: &Self::Font) -> Result<Self::FontHandle, ShapeError>;

    /// Reset the working buffer to empty.
    fn clear_contents(&mut self);

    /// Append one codepoint tagged with its cluster index.
    fn add(&mut self, codepoint: char, cluster: u32);

    fn set_segment_properties(&mut self, properties: &SegmentProperties);

    /// Fill in any segment property still unset from the buffer contents.
    fn guess_segment_properties(&mut self);

    /// Shape the buffer contents against `handle`.
    fn shape(&mut self, handle: &Self::FontHandle);

    /// Canonicalize glyph order and positions within each cluster.
    fn normalize_glyphs(&mut self);

    /// Output of the last [`shape`](Self::shape) call.
    fn glyphs(&self) -> &[RawGlyph];
}

/// Normalize left-to-right glyph output cluster by cluster.
///
/// Within each cluster, the cluster's total advance moves onto its first
/// glyph, the remaining glyphs keep their pen position through their offsets
/// and are stably sorted by glyph index. This gives identical output for
/// equivalent glyph orders within a cluster.
pub fn normalize_clusters(glyphs: &mut [RawGlyph]) {
    let mut start = 0;
    while start < glyphs.len() {
        let cluster = glyphs[start].cluster;
        let end = glyphs[start..]
            .iter()
            .position(|glyph| glyph.cluster != cluster)
            .map_or(glyphs.len(), |len| start + len);
        normalize_cluster(&mut glyphs[start..end]);
        start = end;
    }
}

fn normalize_cluster(cluster: &mut [RawGlyph]) {
    let total_x: i32 = cluster.iter().map(|glyph| glyph.x_advance).sum();
    let total_y: i32 = cluster.iter().map(|glyph| glyph.y_advance).sum();

    let (mut pen_x, mut pen_y) = (0, 0);
    for glyph in cluster.iter_mut() {
        glyph.x_offset += pen_x;
        glyph.y_offset += pen_y;
        pen_x += glyph.x_advance;
        pen_y += glyph.y_advance;
        glyph.x_advance = 0;
        glyph.y_advance = 0;
    }

    let Some((first, rest)) = cluster.split_first_mut() else {
        return;
    };
    first.x_advance = total_x;
    first.y_advance = total_y;
    for glyph in rest.iter_mut() {
        glyph.x_offset -= total_x;
        glyph.y_offset -= total_y;
    }
    rest.sort_by_key(|glyph| glyph.glyph_id);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glyph(glyph_id: u32, cluster: u32, x_advance: i32) -> RawGlyph {
        RawGlyph {
            glyph_id,
            cluster,
            x_advance,
            ..RawGlyph::default()
        }
    }

    #[test]
    fn test_single_glyph_clusters_are_untouched() {
        let mut glyphs = vec![glyph(5, 0, 512), glyph(6, 1, 512), glyph(7, 2, 512)];
        let expected = glyphs.clone();
        normalize_clusters(&mut glyphs);
        assert_eq!(glyphs, expected);
    }

    #[test]
    fn test_multi_glyph_cluster_moves_advance_to_first_glyph() {
        // base + two marks sharing cluster 0, then a plain glyph in cluster 1
        let mut glyphs = vec![
            glyph(40, 0, 512),
            glyph(90, 0, 0),
            glyph(80, 0, 64),
            glyph(41, 1, 512),
        ];
        normalize_clusters(&mut glyphs);

        assert_eq!(glyphs[0].glyph_id, 40);
        assert_eq!(glyphs[0].x_advance, 576);
        // Trailing glyphs sorted by glyph index, advances cleared
        assert_eq!(glyphs[1].glyph_id, 80);
        assert_eq!(glyphs[2].glyph_id, 90);
        assert!(glyphs[1..3].iter().all(|g| g.x_advance == 0));
        // Offsets are relative to the pen after the first glyph's advance
        assert_eq!(glyphs[1].x_offset, 512 - 576);
        assert_eq!(glyphs[2].x_offset, 512 - 576);
        assert_eq!(glyphs[3], glyph(41, 1, 512));
    }

    #[test]
    fn test_normalize_empty_is_noop() {
        let mut glyphs: Vec<RawGlyph> = Vec::new();
        normalize_clusters(&mut glyphs);
        assert!(glyphs.is_empty());
    }

    #[test]
    fn test_language_from_locale() {
        assert_eq!(language_from_locale("en_US.UTF-8").as_deref(), Some("en-us"));
        assert_eq!(language_from_locale("de_DE@euro").as_deref(), Some("de-de"));
        assert_eq!(language_from_locale("ja").as_deref(), Some("ja"));
        assert_eq!(language_from_locale("C"), None);
        assert_eq!(language_from_locale("POSIX"), None);
        assert_eq!(language_from_locale("C.UTF-8"), None);
    }

    #[test]
    fn test_segment_properties_fix_direction_and_script() {
        let props = SegmentProperties::with_language(Some("en".to_string()));
        assert_eq!(props.direction, Direction::LeftToRight);
        assert_eq!(&props.script, b"Zyyy");
        assert_eq!(props.language.as_deref(), Some("en"));
    }
}
