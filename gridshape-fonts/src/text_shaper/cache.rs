//! Shape result cache keyed on codepoint content.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::ops::Index;

use super::glyph::GlyphPositionList;

/// Maps a codepoint sequence to its shaped glyph list.
///
/// Keys are owned copies of the codepoints, so callers may shape from
/// transient buffers and reuse them afterwards. Lookups take a borrowed
/// slice and never allocate; an owned key is only built on insert.
///
/// There is no eviction: the cache grows with every distinct sequence until
/// [`clear`](Self::clear) is called.
#[derive(Debug, Default)]
pub struct ShapeCache {
    entries: HashMap<Box<[char]>, GlyphPositionList>,
}

impl ShapeCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached glyphs for `codepoints`, compared by content.
    pub fn lookup(&self, codepoints: &[char]) -> Option<&GlyphPositionList> {
        self.entries.get(codepoints)
    }

    pub fn contains(&self, codepoints: &[char]) -> bool {
        self.entries.contains_key(codepoints)
    }

    /// Store `glyphs` under an owned copy of `codepoints`, replacing any
    /// previous entry, and return the stored list.
    pub fn store(
        &mut self,
        codepoints: &[char],
        glyphs: GlyphPositionList,
    ) -> &GlyphPositionList {
        match self.entries.entry(Box::from(codepoints)) {
            Entry::Occupied(mut entry) => {
                entry.insert(glyphs);
                entry.into_mut()
            }
            Entry::Vacant(entry) => entry.insert(glyphs),
        }
    }

    /// Drop every entry together with its owned key.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Index<&[char]> for ShapeCache {
    type Output = GlyphPositionList;

    /// # Panics
    /// Panics if `codepoints` is not cached; check with [`ShapeCache::contains`] first.
    fn index(&self, codepoints: &[char]) -> &GlyphPositionList {
        &self.entries[codepoints]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::FontId;
    use crate::text_shaper::glyph::{Glyph, GlyphPosition};

    fn glyphs(font: FontId, indices: &[u32]) -> GlyphPositionList {
        indices
            .iter()
            .enumerate()
            .map(|(i, &index)| GlyphPosition {
                font,
                x: i as i32 * 8,
                y: 0,
                glyph: Glyph::from_index(index),
                cluster: i as u32,
            })
            .collect()
    }

    #[test]
    fn test_lookup_by_borrowed_view() {
        let font = FontId::next();
        let mut cache = ShapeCache::new();
        let owned: Vec<char> = "ab".chars().collect();
        cache.store(&owned, glyphs(font, &[1, 2]));

        // A different buffer with equal content finds the entry
        let view = ['a', 'b'];
        assert_eq!(cache.lookup(&view), Some(&glyphs(font, &[1, 2])));
        assert!(cache.lookup(&['a']).is_none());
        assert_eq!(cache[&view[..]].len(), 2);
    }

    #[test]
    fn test_key_survives_buffer_reuse() {
        let font = FontId::next();
        let mut cache = ShapeCache::new();
        let mut buffer = vec!['x', 'y'];
        cache.store(&buffer, glyphs(font, &[7, 8]));

        buffer[0] = 'z';
        cache.store(&buffer, glyphs(font, &[9, 8]));

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.lookup(&['x', 'y']), Some(&glyphs(font, &[7, 8])));
        assert_eq!(cache.lookup(&['z', 'y']), Some(&glyphs(font, &[9, 8])));
    }

    #[test]
    fn test_store_overwrites_existing_entry() {
        let font = FontId::next();
        let mut cache = ShapeCache::new();
        cache.store(&['q'], glyphs(font, &[1]));
        let stored = cache.store(&['q'], glyphs(font, &[2]));
        assert_eq!(stored, &glyphs(font, &[2]));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let font = FontId::next();
        let mut cache = ShapeCache::new();
        cache.store(&['a'], glyphs(font, &[1]));
        cache.clear();
        assert!(cache.is_empty());
        cache.clear();
        assert!(cache.is_empty());
        assert!(!cache.contains(&['a']));
    }
}
