//! Cached text shaping with fallback font resolution.
//!
//! # Pipeline
//!
//! One [`TextShaper::shape`] call walks this state machine:
//!
//! ```text
//! CacheCheck ─ hit ──────────────────────────────────────────────▶ return
//!     │ miss
//!     ▼
//! TryPrimary ─ covered ──────────────────────────────────────────▶ Store
//!     │ missing glyphs
//!     ▼
//! TryFallback[0..n] ─ first covered ─────────────────────────────▶ Store
//!     │ none covered
//!     ▼
//! Primary again ─▶ patch missing glyphs with U+FFFD ─────────────▶ Store
//! ```
//!
//! # Usage
//!
//! ```ignore
//! let mut shaper = TextShaper::new(RustybuzzEngine::new());
//! let codepoints: Vec<char> = "hello".chars().collect();
//! let clusters: Vec<u32> = (0..codepoints.len() as u32).collect();
//! let glyphs = shaper.shape(&fonts, CodepointRun::new(&codepoints, &clusters))?;
//! ```

mod cache;
mod font_handles;
mod glyph;
pub mod invoker;
pub mod patcher;
mod run;

pub use cache::ShapeCache;
pub use font_handles::FontHandleRegistry;
pub use glyph::{Glyph, GlyphPosition, GlyphPositionList};
pub use run::CodepointRun;

use crate::engine::{SegmentProperties, ShapingEngine};
use crate::error::ShapeError;
use crate::font::{Font, FontList};
use invoker::Attempt;

/// Counters describing how shape calls were resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShapeStats {
    /// Calls answered from the cache
    pub cache_hits: u64,
    /// Calls that had to shape
    pub cache_misses: u64,
    /// Misses covered by the primary font
    pub primary_hits: u64,
    /// Misses covered by a fallback font
    pub fallback_hits: u64,
    /// Misses no font covered (replacement glyphs emitted)
    pub total_failures: u64,
}

/// Shapes codepoint runs against a font list and caches the results.
///
/// Single-threaded: every operation runs to completion on the calling thread.
/// Use one shaper per thread (and per font list, since cache entries are
/// keyed on codepoints only).
pub struct TextShaper<E: ShapingEngine> {
    engine: E,
    handles: FontHandleRegistry<E::FontHandle>,
    cache: ShapeCache,
    properties: SegmentProperties,
    stats: ShapeStats,
}

impl<E: ShapingEngine> TextShaper<E> {
    /// Create a shaper using the process default language.
    pub fn new(engine: E) -> Self {
        Self::with_properties(engine, SegmentProperties::default())
    }

    /// Create a shaper with explicit segment properties.
    pub fn with_properties(engine: E, properties: SegmentProperties) -> Self {
        Self {
            engine,
            handles: FontHandleRegistry::new(),
            cache: ShapeCache::new(),
            properties,
            stats: ShapeStats::default(),
        }
    }

    /// Shape `run`, trying the primary font, then each fallback in order.
    ///
    /// The returned list lives in the cache and stays valid until the next
    /// call that takes `&mut self`. If no font covers the run, the primary
    /// font's shaping is returned with missing glyphs replaced by U+FFFD.
    ///
    /// # Errors
    /// Returns [`ShapeError::FaceCreation`] if the engine cannot build a
    /// handle for one of the fonts it needs to try.
    pub fn shape(
        &mut self,
        fonts: &FontList<E::Font>,
        run: CodepointRun<'_>,
    ) -> Result<&GlyphPositionList, ShapeError> {
        let key = run.codepoints();
        if self.cache.contains(key) {
            self.stats.cache_hits += 1;
            log::trace!("Shape cache hit for {} codepoints", key.len());
            return Ok(&self.cache[key]);
        }

        self.stats.cache_misses += 1;
        let glyphs = self.resolve(fonts, &run)?;
        Ok(self.cache.store(key, glyphs))
    }

    /// Previously shaped glyphs for `codepoints`, without shaping.
    pub fn lookup(&self, codepoints: &[char]) -> Option<&GlyphPositionList> {
        self.cache.lookup(codepoints)
    }

    fn resolve(
        &mut self,
        fonts: &FontList<E::Font>,
        run: &CodepointRun<'_>,
    ) -> Result<GlyphPositionList, ShapeError> {
        let primary = self.attempt(run, fonts.primary())?;
        if primary.covered {
            self.stats.primary_hits += 1;
            return Ok(primary.glyphs);
        }

        for fallback in fonts.fallbacks() {
            let attempt = self.attempt(run, fallback)?;
            if attempt.covered {
                self.stats.fallback_hits += 1;
                log::debug!(
                    "Run of {} codepoints shaped with fallback font {}",
                    run.len(),
                    fallback.id()
                );
                return Ok(attempt.glyphs);
            }
        }

        self.stats.total_failures += 1;
        log::warn!(
            "Shaping failed for {} codepoints: {}",
            run.len(),
            run.hex_codepoints()
        );

        // Render with the primary font, using U+FFFD for whatever it lacks
        let mut glyphs = self.attempt(run, fonts.primary())?.glyphs;
        patcher::patch_missing_glyphs(fonts.primary(), &mut glyphs);
        Ok(glyphs)
    }

    fn attempt(
        &mut self,
        run: &CodepointRun<'_>,
        font: &E::Font,
    ) -> Result<Attempt, ShapeError> {
        invoker::attempt(&mut self.engine, &mut self.handles, &self.properties, run, font)
    }

    /// Drop all cached shapes and release every engine font handle.
    ///
    /// Safe to call repeatedly; the next shape call is a fresh miss.
    pub fn clear_cache(&mut self) {
        if !self.cache.is_empty() {
            log::debug!("Clearing {} cached shapes", self.cache.len());
        }
        self.cache.clear();
        self.handles.release_all();
    }

    /// Number of cached codepoint sequences.
    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }

    /// Number of live engine font handles.
    pub fn font_handle_count(&self) -> usize {
        self.handles.len()
    }

    pub fn stats(&self) -> ShapeStats {
        self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats = ShapeStats::default();
    }

    pub fn properties(&self) -> &SegmentProperties {
        &self.properties
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }
}

impl<E: ShapingEngine + Default> Default for TextShaper<E> {
    fn default() -> Self {
        Self::new(E::default())
    }
}

impl<E: ShapingEngine> Drop for TextShaper<E> {
    fn drop(&mut self) {
        self.clear_cache();
    }
}
