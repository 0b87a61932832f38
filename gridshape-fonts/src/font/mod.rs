//! Font abstraction, font lists and system font loading.
//!
//! The shaping core only needs three things from a font: a stable identity,
//! the cell advance used for grid layout, and a charmap query. Those live on
//! the [`Font`] trait so the core can be driven by test doubles as well as by
//! [`FontData`], the swash-backed font loaded from the system database.

mod fallbacks;
mod loader;
mod types;

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

pub use fallbacks::DEFAULT_FALLBACK_FAMILIES;
pub use loader::{FontLoader, points_to_pixels};
pub use types::{DEFAULT_PIXEL_SIZE, FontData};

/// Stable identifier for a loaded font.
///
/// Engine handles and glyph records refer to fonts by id rather than by
/// address, so a font may be moved or cloned without invalidating them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FontId(u64);

impl FontId {
    /// Allocate a fresh process-unique id.
    pub fn next() -> Self {
        static NEXT_ID: AtomicU64 = AtomicU64::new(1);
        FontId(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw numeric value, useful for logging and atlas keys.
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for FontId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The font queries the shaping core depends on.
pub trait Font {
    /// Identity used to key engine handles and to tag glyph records.
    fn id(&self) -> FontId;

    /// Fixed cell advance in whole pixels.
    fn max_advance(&self) -> i32;

    /// Glyph index for `character`, or `None` if the font has no glyph for it.
    fn glyph_index_for(&self, character: char) -> Option<u32>;
}

/// A primary font plus fallbacks consulted in order.
#[derive(Debug, Clone)]
pub struct FontList<F> {
    primary: F,
    fallbacks: Vec<F>,
}

impl<F: Font> FontList<F> {
    pub fn new(primary: F, fallbacks: Vec<F>) -> Self {
        Self { primary, fallbacks }
    }

    pub fn primary(&self) -> &F {
        &self.primary
    }

    pub fn fallbacks(&self) -> &[F] {
        &self.fallbacks
    }

    /// All fonts, primary first.
    pub fn iter(&self) -> impl Iterator<Item = &F> {
        std::iter::once(&self.primary).chain(self.fallbacks.iter())
    }

    /// Number of fonts in the list (primary included).
    pub fn font_count(&self) -> usize {
        1 + self.fallbacks.len()
    }

    /// Look a font up by id, e.g. to rasterize a shaped glyph.
    pub fn find(&self, id: FontId) -> Option<&F> {
        self.iter().find(|font| font.id() == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Stub(FontId);

    impl Font for Stub {
        fn id(&self) -> FontId {
            self.0
        }
        fn max_advance(&self) -> i32 {
            1
        }
        fn glyph_index_for(&self, _character: char) -> Option<u32> {
            None
        }
    }

    #[test]
    fn test_font_ids_are_unique() {
        let a = FontId::next();
        let b = FontId::next();
        assert_ne!(a, b);
        assert!(b.raw() > a.raw());
    }

    #[test]
    fn test_font_list_iterates_primary_first() {
        let (p, f1, f2) = (FontId::next(), FontId::next(), FontId::next());
        let list = FontList::new(Stub(p), vec![Stub(f1), Stub(f2)]);
        let order: Vec<FontId> = list.iter().map(Font::id).collect();
        assert_eq!(order, vec![p, f1, f2]);
        assert_eq!(list.font_count(), 3);
        assert_eq!(list.find(f2).map(Font::id), Some(f2));
        assert!(list.find(FontId::next()).is_none());
    }
}
