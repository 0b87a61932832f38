//! HarfBuzz shaping via rustybuzz.

use std::str::FromStr;
use std::sync::Arc;

use rustybuzz::{Face, Feature, Language, Script, UnicodeBuffer};

use super::{Direction, RawGlyph, SegmentProperties, ShapingEngine, normalize_clusters};
use crate::error::ShapeError;
use crate::font::{Font, FontData};

/// rustybuzz face for one font, plus the scale from font units to 26.6 pixels.
///
/// Holds its own reference to the font bytes so the face stays valid for as
/// long as the handle lives, independent of the `FontData` it came from.
pub struct RustybuzzFace {
    // Field order matters: the face borrows from `_data` and must drop first.
    face: Face<'static>,
    _data: Arc<Vec<u8>>,
    scale: f32,
}

impl RustybuzzFace {
    fn scaled(&self, value: i32) -> i32 {
        (value as f32 * self.scale).round() as i32
    }
}

/// Shaping engine backed by rustybuzz.
pub struct RustybuzzEngine {
    /// Working buffer; `None` only while a shape call owns it
    buffer: Option<UnicodeBuffer>,
    /// Output of the last shape call, in 26.6 pixels
    glyphs: Vec<RawGlyph>,
    /// OpenType features applied on top of the font's defaults
    features: Vec<Feature>,
}

impl RustybuzzEngine {
    pub fn new() -> Self {
        Self {
            buffer: Some(UnicodeBuffer::new()),
            glyphs: Vec::new(),
            features: Vec::new(),
        }
    }

    /// Create an engine applying OpenType feature strings such as `"-liga"` or `"ss01"`.
    ///
    /// Strings rustybuzz cannot parse are logged and skipped.
    pub fn with_features<S: AsRef<str>>(features: &[S]) -> Self {
        let features = features
            .iter()
            .map(AsRef::as_ref)
            .filter_map(|setting| match Feature::from_str(setting) {
                Ok(feature) => Some(feature),
                Err(e) => {
                    log::warn!("Ignoring invalid OpenType feature '{}': {}", setting, e);
                    None
                }
            })
            .collect();
        Self {
            features,
            ..Self::new()
        }
    }

    /// Number of OpenType features applied to every shape call.
    pub fn feature_count(&self) -> usize {
        self.features.len()
    }

    fn buffer_mut(&mut self) -> &mut UnicodeBuffer {
        self.buffer.get_or_insert_with(UnicodeBuffer::new)
    }
}

impl Default for RustybuzzEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ShapingEngine for RustybuzzEngine {
    type Font = FontData;
    type FontHandle = RustybuzzFace;

    fn create_font_handle(&self, font: &FontData) -> Result<RustybuzzFace, ShapeError> {
        let data = Arc::clone(&font.data);

        // SAFETY: `data` is stored in the returned handle next to the face and
        // is dropped after it, so the bytes outlive every use of the face.
        let face = unsafe {
            let static_bytes: &'static [u8] = std::mem::transmute(data.as_slice());
            Face::from_slice(static_bytes, font.face_index())
        }
        .ok_or_else(|| ShapeError::FaceCreation {
            font: font.id(),
            reason: format!("face index {} could not be parsed", font.face_index()),
        })?;

        let units_per_em = face.units_per_em() as f32;
        if units_per_em <= 0.0 {
            return Err(ShapeError::FaceCreation {
                font: font.id(),
                reason: "font reports zero units per em".to_string(),
            });
        }

        log::debug!(
            "Created rustybuzz face for font {} ({} px, {} units/em)",
            font.id(),
            font.pixel_size(),
            units_per_em
        );
        Ok(RustybuzzFace {
            face,
            _data: data,
            scale: font.pixel_size() * 64.0 / units_per_em,
        })
    }

    fn clear_contents(&mut self) {
        self.buffer_mut().clear();
        self.glyphs.clear();
    }

    fn add(&mut self, codepoint: char, cluster: u32) {
        self.buffer_mut().add(codepoint, cluster);
    }

    fn set_segment_properties(&mut self, properties: &SegmentProperties) {
        let buffer = self.buffer_mut();
        buffer.set_direction(match properties.direction {
            Direction::LeftToRight => rustybuzz::Direction::LeftToRight,
            Direction::RightToLeft => rustybuzz::Direction::RightToLeft,
        });

        // Convert the 4-letter ISO 15924 tag (e.g. "Zyyy", "Latn") to a Script
        if let Some(script) = std::str::from_utf8(&properties.script)
            .ok()
            .and_then(|tag| Script::from_str(tag).ok())
        {
            buffer.set_script(script);
        }

        if let Some(language) = properties
            .language
            .as_deref()
            .and_then(|tag| Language::from_str(tag).ok())
        {
            buffer.set_language(language);
        }
    }

    fn guess_segment_properties(&mut self) {
        self.buffer_mut().guess_segment_properties();
    }

    fn shape(&mut self, handle: &RustybuzzFace) {
        let buffer = self.buffer.take().unwrap_or_else(UnicodeBuffer::new);
        let glyph_buffer = rustybuzz::shape(&handle.face, &self.features, buffer);

        self.glyphs = glyph_buffer
            .glyph_infos()
            .iter()
            .zip(glyph_buffer.glyph_positions())
            .map(|(info, pos)| RawGlyph {
                glyph_id: info.glyph_id,
                cluster: info.cluster,
                x_offset: handle.scaled(pos.x_offset),
                y_offset: handle.scaled(pos.y_offset),
                x_advance: handle.scaled(pos.x_advance),
                y_advance: handle.scaled(pos.y_advance),
            })
            .collect();

        // Hand the allocation back for the next call
        self.buffer = Some(glyph_buffer.clear());
    }

    fn normalize_glyphs(&mut self) {
        normalize_clusters(&mut self.glyphs);
    }

    fn glyphs(&self) -> &[RawGlyph] {
        &self.glyphs
    }
}
