//! Config-driven shaper owning its fonts and engine.

use std::path::Path;

use anyhow::{Context, Result};
use gridshape_config::ShaperConfig;
use gridshape_fonts::font::points_to_pixels;
use gridshape_fonts::{
    DEFAULT_FALLBACK_FAMILIES, Font, FontData, FontId, FontList, FontLoader, GlyphPositionList,
    RustybuzzEngine, SegmentProperties, ShapeError, ShapeStats, TextShaper,
};

use crate::text_run::RunBuilder;

/// Shapes terminal runs against the fonts named by a [`ShaperConfig`].
///
/// The font list and the shape cache always belong together: replacing the
/// fonts (e.g. on a size change) clears the cache.
pub struct GridShaper {
    fonts: FontList<FontData>,
    shaper: TextShaper<RustybuzzEngine>,
    pixel_size: f32,
}

impl GridShaper {
    /// Load the user config and build a shaper from it.
    pub fn load() -> Result<Self> {
        let config = ShaperConfig::load().context("Failed to load shaper config")?;
        Self::from_config(&config)
    }

    /// Build a shaper from the config file at `path`.
    pub fn from_config_path(path: &Path) -> Result<Self> {
        let config = ShaperConfig::load_from(path)
            .with_context(|| format!("Failed to load shaper config from {:?}", path))?;
        Self::from_config(&config)
    }

    /// Build a shaper over the installed system fonts.
    pub fn from_config(config: &ShaperConfig) -> Result<Self> {
        Self::with_loader(&FontLoader::new(), config)
    }

    /// Build a shaper using fonts from `loader`.
    pub fn with_loader(loader: &FontLoader, config: &ShaperConfig) -> Result<Self> {
        config.validate()?;
        let pixel_size = points_to_pixels(config.font_size, config.dpi);

        let fallback_families: Vec<&str> = if config.fallback_families.is_empty() {
            DEFAULT_FALLBACK_FAMILIES.to_vec()
        } else {
            config.fallback_families.iter().map(String::as_str).collect()
        };
        let fonts = loader
            .load_font_list(&config.font_family, &fallback_families, pixel_size)
            .with_context(|| format!("Failed to load fonts for {:?}", config.font_family))?;

        let properties = match &config.language {
            Some(language) => SegmentProperties::with_language(Some(language.clone())),
            None => SegmentProperties::default(),
        };
        let engine = RustybuzzEngine::with_features(&config.features);

        log::info!(
            "Grid shaper ready: {} fonts at {:.1}px, cell width {}px",
            fonts.font_count(),
            pixel_size,
            fonts.primary().max_advance()
        );

        Ok(Self {
            fonts,
            shaper: TextShaper::with_properties(engine, properties),
            pixel_size,
        })
    }

    /// Shape the contents of `run`.
    pub fn shape(&mut self, run: &RunBuilder) -> Result<&GlyphPositionList, ShapeError> {
        self.shaper.shape(&self.fonts, run.run())
    }

    /// Rescale every font to `pixel_size` and drop all cached shapes.
    ///
    /// Sizes below one pixel are clamped to one; non-finite sizes are
    /// ignored.
    pub fn set_pixel_size(&mut self, pixel_size: f32) {
        let Some(pixel_size) = usable_pixel_size(pixel_size) else {
            log::warn!("Ignoring invalid pixel size {}", pixel_size);
            return;
        };
        if pixel_size == self.pixel_size {
            return;
        }
        let primary = self.fonts.primary().clone().with_pixel_size(pixel_size);
        let fallbacks = self
            .fonts
            .fallbacks()
            .iter()
            .map(|font| font.clone().with_pixel_size(pixel_size))
            .collect();
        self.fonts = FontList::new(primary, fallbacks);
        self.pixel_size = pixel_size;
        self.shaper.clear_cache();
        log::debug!("Rescaled fonts to {:.1}px", pixel_size);
    }

    pub fn fonts(&self) -> &FontList<FontData> {
        &self.fonts
    }

    /// Font a shaped glyph refers to.
    pub fn font(&self, id: FontId) -> Option<&FontData> {
        self.fonts.find(id)
    }

    /// Grid cell width in pixels, taken from the primary font.
    pub fn cell_width(&self) -> i32 {
        self.fonts.primary().max_advance()
    }

    pub fn pixel_size(&self) -> f32 {
        self.pixel_size
    }

    pub fn stats(&self) -> ShapeStats {
        self.shaper.stats()
    }

    pub fn cache_size(&self) -> usize {
        self.shaper.cache_size()
    }

    pub fn clear_cache(&mut self) {
        self.shaper.clear_cache();
    }

    pub fn shaper(&self) -> &TextShaper<RustybuzzEngine> {
        &self.shaper
    }
}

/// `pixel_size` clamped to at least one pixel, or `None` if it is not finite.
fn usable_pixel_size(pixel_size: f32) -> Option<f32> {
    pixel_size.is_finite().then(|| pixel_size.max(1.0))
}
