//! One shaping attempt against one font.

use super::font_handles::FontHandleRegistry;
use super::glyph::{Glyph, GlyphPosition, GlyphPositionList};
use super::run::CodepointRun;
use crate::engine::{RawGlyph, SegmentProperties, ShapingEngine};
use crate::error::ShapeError;
use crate::font::Font;

/// Glyphs produced by one attempt and whether the font covered the whole run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attempt {
    pub glyphs: GlyphPositionList,
    /// True iff no glyph is [`Glyph::Missing`]
    pub covered: bool,
}

/// Shape `run` against `font`.
///
/// The engine buffer is rebuilt from scratch on every attempt. Only handle
/// creation can fail; lack of coverage is reported through
/// [`Attempt::covered`].
pub fn attempt<E: ShapingEngine>(
    engine: &mut E,
    handles: &mut FontHandleRegistry<E::FontHandle>,
    properties: &SegmentProperties,
    run: &CodepointRun<'_>,
    font: &E::Font,
) -> Result<Attempt, ShapeError> {
    engine.clear_contents();
    for (codepoint, cluster) in run.iter() {
        engine.add(codepoint, cluster);
    }

    engine.set_segment_properties(properties);
    engine.guess_segment_properties();

    let handle = handles.handle_for(font, |font| engine.create_font_handle(font))?;
    engine.shape(handle);
    engine.normalize_glyphs();

    let glyphs = position_glyphs(engine.glyphs(), font);
    let covered = !glyphs.iter().any(|position| position.glyph.is_missing());
    Ok(Attempt { glyphs, covered })
}

/// Convert engine output to cell-grid positions.
///
/// The horizontal cursor moves by the font's fixed cell advance for every
/// glyph the engine gives a nonzero x-advance, whatever its magnitude; the
/// vertical cursor follows the engine's y-advance.
fn position_glyphs<F: Font>(raw: &[RawGlyph], font: &F) -> GlyphPositionList {
    let font_id = font.id();
    let cell_advance = font.max_advance();
    let (mut cursor_x, mut cursor_y) = (0_i32, 0_i32);

    raw.iter()
        .map(|glyph| {
            let position = GlyphPosition {
                font: font_id,
                x: cursor_x + (glyph.x_offset >> 6),
                y: cursor_y + (glyph.y_offset >> 6),
                glyph: Glyph::from_index(glyph.glyph_id),
                cluster: glyph.cluster,
            };
            if glyph.x_advance != 0 {
                cursor_x += cell_advance;
            }
            cursor_y += glyph.y_advance >> 6;
            position
        })
        .collect()
}
