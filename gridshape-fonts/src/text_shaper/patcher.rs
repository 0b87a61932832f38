//! Replacement-character substitution for glyphs no font could provide.

use super::glyph::{Glyph, GlyphPosition};
use crate::font::Font;

/// U+FFFD REPLACEMENT CHARACTER
pub const REPLACEMENT_CHARACTER: char = '\u{FFFD}';

/// Overwrite every missing glyph with `font`'s replacement-character glyph.
///
/// Found glyphs are left alone. If the font has no U+FFFD glyph the list is
/// unchanged. Returns the number of glyphs patched.
pub fn patch_missing_glyphs<F: Font>(font: &F, glyphs: &mut [GlyphPosition]) -> usize {
    let Some(replacement) = font.glyph_index_for(REPLACEMENT_CHARACTER) else {
        return 0;
    };

    let mut patched = 0;
    for position in glyphs.iter_mut().filter(|position| position.glyph.is_missing()) {
        position.glyph = Glyph::Found(replacement);
        patched += 1;
    }
    patched
}
