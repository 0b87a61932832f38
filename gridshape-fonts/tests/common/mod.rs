//! Shared integration test helpers for gridshape-fonts.
//!
//! Provides a scripted shaping engine and fonts with configurable coverage so
//! the fallback pipeline can be exercised without real font files.
//!
//! ```ignore
//! mod common;
//! use common::{ScriptedEngine, TestFont};
//! ```

#![allow(dead_code)]

use std::cell::Cell;
use std::collections::{HashMap, HashSet};

use gridshape_fonts::engine::normalize_clusters;
use gridshape_fonts::{
    CodepointRun, Font, FontId, RawGlyph, SegmentProperties, ShapeError, ShapingEngine,
};

/// A font that maps a fixed set of characters to glyph indices.
#[derive(Debug, Clone)]
pub struct TestFont {
    pub id: FontId,
    pub advance: i32,
    pub coverage: HashMap<char, u32>,
    pub replacement: Option<u32>,
}

impl TestFont {
    /// A font with no glyphs at all.
    pub fn empty() -> Self {
        Self {
            id: FontId::next(),
            advance: 8,
            coverage: HashMap::new(),
            replacement: None,
        }
    }

    /// A font covering every character of `text`, numbering glyphs from `first_glyph`.
    pub fn covering(text: &str, first_glyph: u32) -> Self {
        let mut font = Self::empty();
        for ch in text.chars() {
            let next = first_glyph + font.coverage.len() as u32;
            font.coverage.entry(ch).or_insert(next);
        }
        font
    }

    pub fn with_replacement(mut self, glyph: u32) -> Self {
        self.replacement = Some(glyph);
        self
    }

    pub fn with_advance(mut self, advance: i32) -> Self {
        self.advance = advance;
        self
    }
}

impl Font for TestFont {
    fn id(&self) -> FontId {
        self.id
    }

    fn max_advance(&self) -> i32 {
        self.advance
    }

    fn glyph_index_for(&self, character: char) -> Option<u32> {
        if character == '\u{FFFD}' {
            return self.replacement;
        }
        self.coverage.get(&character).copied()
    }
}

/// Engine handle: a snapshot of the font's charmap.
#[derive(Debug)]
pub struct TestHandle {
    pub font: FontId,
    coverage: HashMap<char, u32>,
}

/// Engine that emits one glyph per input codepoint using the font's charmap.
///
/// Records every shape call in order, counts handle creations and remembers
/// the segment properties it was given.
pub struct ScriptedEngine {
    pending: Vec<(char, u32)>,
    output: Vec<RawGlyph>,
    /// x-advance reported for every glyph, in 26.6 units
    pub x_advance: i32,
    /// Fonts shaped against, in call order
    pub shape_calls: Vec<FontId>,
    pub handles_created: Cell<usize>,
    pub properties: Option<SegmentProperties>,
    pub guessed: bool,
    /// Fonts whose handle creation fails
    pub broken_fonts: HashSet<FontId>,
}

impl ScriptedEngine {
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
            output: Vec::new(),
            // Deliberately not a whole number of cells
            x_advance: 7 * 64 + 13,
            shape_calls: Vec::new(),
            handles_created: Cell::new(0),
            properties: None,
            guessed: false,
            broken_fonts: HashSet::new(),
        }
    }

    pub fn with_x_advance(mut self, x_advance: i32) -> Self {
        self.x_advance = x_advance;
        self
    }

    pub fn with_broken_font(mut self, font: FontId) -> Self {
        self.broken_fonts.insert(font);
        self
    }

    pub fn shape_count(&self) -> usize {
        self.shape_calls.len()
    }
}

impl ShapingEngine for ScriptedEngine {
    type Font = TestFont;
    type FontHandle = TestHandle;

    fn create_font_handle(&self, font: &TestFont) -> Result<TestHandle, ShapeError> {
        if self.broken_fonts.contains(&font.id) {
            return Err(ShapeError::FaceCreation {
                font: font.id,
                reason: "scripted failure".to_string(),
            });
        }
        self.handles_created.set(self.handles_created.get() + 1);
        Ok(TestHandle {
            font: font.id,
            coverage: font.coverage.clone(),
        })
    }

    fn clear_contents(&mut self) {
        self.pending.clear();
        self.output.clear();
    }

    fn add(&mut self, codepoint: char, cluster: u32) {
        self.pending.push((codepoint, cluster));
    }

    fn set_segment_properties(&mut self, properties: &SegmentProperties) {
        self.properties = Some(properties.clone());
    }

    fn guess_segment_properties(&mut self) {
        self.guessed = true;
    }

    fn shape(&mut self, handle: &TestHandle) {
        self.shape_calls.push(handle.font);
        self.output = self
            .pending
            .iter()
            .map(|&(codepoint, cluster)| RawGlyph {
                glyph_id: handle.coverage.get(&codepoint).copied().unwrap_or(0),
                cluster,
                x_advance: self.x_advance,
                ..RawGlyph::default()
            })
            .collect();
    }

    fn normalize_glyphs(&mut self) {
        normalize_clusters(&mut self.output);
    }

    fn glyphs(&self) -> &[RawGlyph] {
        &self.output
    }
}

/// Codepoints of `text` with one cluster per codepoint.
pub fn chars_with_clusters(text: &str) -> (Vec<char>, Vec<u32>) {
    let codepoints: Vec<char> = text.chars().collect();
    let clusters = (0..codepoints.len() as u32).collect();
    (codepoints, clusters)
}

/// Shorthand for building a run over owned buffers.
pub fn run<'a>(codepoints: &'a [char], clusters: &'a [u32]) -> CodepointRun<'a> {
    CodepointRun::new(codepoints, clusters)
}
