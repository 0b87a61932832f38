//! Per-font engine handle registry.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::font::{Font, FontId};

/// Engine handles keyed by font id, created on first use.
///
/// Handle creation is the expensive part of preparing a font for shaping, so
/// each font gets exactly one handle for the lifetime of the registry.
#[derive(Debug)]
pub struct FontHandleRegistry<H> {
    handles: HashMap<FontId, H>,
}

impl<H> FontHandleRegistry<H> {
    pub fn new() -> Self {
        Self {
            handles: HashMap::new(),
        }
    }

    /// Return the handle for `font`, building it with `create` on first use.
    ///
    /// A failed creation registers nothing, so the next call retries.
    pub fn handle_for<F, E>(
        &mut self,
        font: &F,
        create: impl FnOnce(&F) -> Result<H, E>,
    ) -> Result<&H, E>
    where
        F: Font,
    {
        match self.handles.entry(font.id()) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let handle = create(font)?;
                log::debug!("Registered engine handle for font {}", font.id());
                Ok(entry.insert(handle))
            }
        }
    }

    pub fn contains(&self, font: FontId) -> bool {
        self.handles.contains_key(&font)
    }

    /// Drop every registered handle. Safe to call repeatedly.
    pub fn release_all(&mut self) {
        if !self.handles.is_empty() {
            log::debug!("Releasing {} engine font handles", self.handles.len());
        }
        self.handles.clear();
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

impl<H> Default for FontHandleRegistry<H> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct TestFont(FontId);

    impl Font for TestFont {
        fn id(&self) -> FontId {
            self.0
        }
        fn max_advance(&self) -> i32 {
            8
        }
        fn glyph_index_for(&self, _character: char) -> Option<u32> {
            None
        }
    }

    #[test]
    fn test_handle_created_once_per_font() {
        let created = Cell::new(0);
        let mut registry: FontHandleRegistry<u64> = FontHandleRegistry::new();
        let font = TestFont(FontId::next());
        let create = |f: &TestFont| -> Result<u64, ()> {
            created.set(created.get() + 1);
            Ok(f.id().raw())
        };

        let first = *registry.handle_for(&font, create).unwrap();
        let second = *registry.handle_for(&font, create).unwrap();
        assert_eq!(first, second);
        assert_eq!(created.get(), 1);
        assert!(registry.contains(font.id()));

        let other = TestFont(FontId::next());
        registry.handle_for(&other, create).unwrap();
        assert_eq!(created.get(), 2);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_failed_creation_registers_nothing() {
        let mut registry: FontHandleRegistry<u64> = FontHandleRegistry::new();
        let font = TestFont(FontId::next());
        let result = registry.handle_for(&font, |_| Err::<u64, &str>("bad face"));
        assert_eq!(result.unwrap_err(), "bad face");
        assert!(registry.is_empty());
    }

    #[test]
    fn test_release_all_is_idempotent() {
        let mut registry: FontHandleRegistry<u64> = FontHandleRegistry::new();
        let font = TestFont(FontId::next());
        registry.handle_for(&font, |_| Ok::<u64, ()>(1)).unwrap();
        registry.release_all();
        assert!(registry.is_empty());
        registry.release_all();
        assert!(registry.is_empty());
        assert!(!registry.contains(font.id()));
    }
}
