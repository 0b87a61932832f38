//! Font data types backed by swash.

use std::sync::Arc;
use swash::FontRef;

use super::{Font, FontId};

/// Pixel size used until a caller picks one with [`FontData::with_pixel_size`].
pub const DEFAULT_PIXEL_SIZE: f32 = 16.0;

/// Stores font data with lifetime management.
///
/// This struct owns the font data bytes and provides a `FontRef` that can be used
/// for glyph lookups and metrics. The `FontRef` is guaranteed to be valid
/// for the lifetime of this struct.
#[derive(Clone)]
pub struct FontData {
    /// Raw font data bytes (TTF/OTF/TTC)
    pub data: Arc<Vec<u8>>,
    /// Swash font reference for charmap and metrics queries
    pub font_ref: FontRef<'static>,
    face_index: u32,
    pixel_size: f32,
    max_advance: i32,
    id: FontId,
}

impl std::fmt::Debug for FontData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontData")
            .field("id", &self.id)
            .field("data_len", &self.data.len())
            .field("face_index", &self.face_index)
            .field("pixel_size", &self.pixel_size)
            .field("max_advance", &self.max_advance)
            .finish()
    }
}

impl FontData {
    /// Create a new FontData from bytes using face index 0.
    ///
    /// # Returns
    /// `Some(FontData)` if the font data is valid, `None` otherwise.
    pub fn new(data: Vec<u8>) -> Option<Self> {
        Self::new_with_index(data, 0)
    }

    /// Create a new FontData from bytes with a specific face index.
    ///
    /// This is needed for TrueType Collection (.ttc) files where multiple
    /// font faces share the same data but have different face indices.
    pub fn new_with_index(data: Vec<u8>, face_index: u32) -> Option<Self> {
        let data_arc = Arc::new(data);

        // SAFETY: We ensure the data outlives the FontRef by storing it in an Arc.
        // The FontRef will never outlive the FontData struct because they are stored
        // together and dropped together.
        let font_ref = unsafe {
            let bytes = data_arc.as_slice();
            let static_bytes: &'static [u8] = std::mem::transmute(bytes);
            FontRef::from_index(static_bytes, face_index as usize)?
        };

        let max_advance = compute_max_advance(&font_ref, DEFAULT_PIXEL_SIZE);
        Some(FontData {
            data: data_arc,
            font_ref,
            face_index,
            pixel_size: DEFAULT_PIXEL_SIZE,
            max_advance,
            id: FontId::next(),
        })
    }

    /// Rescale to `pixel_size` pixels per em.
    ///
    /// The rescaled font gets a new id: engine handles carry the scale, so a
    /// handle created for the old size must not be reused for the new one.
    pub fn with_pixel_size(mut self, pixel_size: f32) -> Self {
        self.pixel_size = pixel_size;
        self.max_advance = compute_max_advance(&self.font_ref, pixel_size);
        self.id = FontId::next();
        self
    }

    pub fn face_index(&self) -> u32 {
        self.face_index
    }

    pub fn pixel_size(&self) -> f32 {
        self.pixel_size
    }
}

impl Font for FontData {
    fn id(&self) -> FontId {
        self.id
    }

    fn max_advance(&self) -> i32 {
        self.max_advance
    }

    fn glyph_index_for(&self, character: char) -> Option<u32> {
        match self.font_ref.charmap().map(character) {
            0 => None,
            glyph_id => Some(u32::from(glyph_id)),
        }
    }
}

/// Widest advance over printable 7-bit ASCII, rounded up to whole pixels.
fn compute_max_advance(font_ref: &FontRef<'_>, pixel_size: f32) -> i32 {
    let units_per_em = font_ref.metrics(&[]).units_per_em;
    if units_per_em == 0 {
        return 0;
    }
    let scale = pixel_size / f32::from(units_per_em);
    let charmap = font_ref.charmap();
    let glyph_metrics = font_ref.glyph_metrics(&[]);

    let widest = (' '..='~')
        .map(|ch| charmap.map(ch))
        .filter(|&glyph_id| glyph_id != 0)
        .map(|glyph_id| glyph_metrics.advance_width(glyph_id))
        .fold(0.0_f32, f32::max);

    (widest * scale).ceil() as i32
}
