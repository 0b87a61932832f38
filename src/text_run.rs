//! Building codepoint runs from terminal cells.

use gridshape_fonts::CodepointRun;
use unicode_segmentation::UnicodeSegmentation;

/// Accumulates cell contents into a codepoint run.
///
/// Every codepoint pushed for a cell carries that cell's index as its
/// cluster, counted without gaps. Clusters therefore depend only on the
/// codepoints, which keeps them valid for cache entries keyed on codepoints.
/// Grid columns (which differ from cell indices once wide characters are
/// involved) are tracked separately; see [`column`](Self::column).
/// The buffers are reused across [`clear`](Self::clear) calls.
#[derive(Debug, Clone, Default)]
pub struct RunBuilder {
    codepoints: Vec<char>,
    clusters: Vec<u32>,
    /// Starting grid column of each cell, indexed by cluster
    columns: Vec<u32>,
    next_column: u32,
}

impl RunBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(codepoints: usize) -> Self {
        Self {
            codepoints: Vec::with_capacity(codepoints),
            clusters: Vec::with_capacity(codepoints),
            columns: Vec::with_capacity(codepoints),
            next_column: 0,
        }
    }

    /// Append one cell. An empty cell is shaped as a space.
    ///
    /// Returns the cluster index of the cell.
    pub fn push_cell(&mut self, text: &str) -> u32 {
        let cluster = self.columns.len() as u32;
        if text.is_empty() {
            self.push_codepoint(' ', cluster);
        } else {
            for ch in text.chars() {
                self.push_codepoint(ch, cluster);
            }
        }
        self.columns.push(self.next_column);
        self.next_column += 1;
        cluster
    }

    /// Skip `count` grid columns without adding codepoints or clusters.
    ///
    /// Used for the trailing half of double-width characters. Only the
    /// column map changes.
    pub fn skip_cells(&mut self, count: u32) {
        self.next_column += count;
    }

    /// Split `text` into grapheme clusters and append one cell per cluster.
    pub fn push_text(&mut self, text: &str) {
        for grapheme in text.graphemes(true) {
            self.push_cell(grapheme);
        }
    }

    fn push_codepoint(&mut self, codepoint: char, cluster: u32) {
        self.codepoints.push(codepoint);
        self.clusters.push(cluster);
    }

    pub fn codepoints(&self) -> &[char] {
        &self.codepoints
    }

    pub fn clusters(&self) -> &[u32] {
        &self.clusters
    }

    /// Grid column where the cell with `cluster` starts.
    pub fn column(&self, cluster: u32) -> Option<u32> {
        self.columns.get(cluster as usize).copied()
    }

    /// Number of cells pushed.
    pub fn cell_count(&self) -> u32 {
        self.columns.len() as u32
    }

    /// Grid columns covered so far, including skipped ones.
    pub fn column_count(&self) -> u32 {
        self.next_column
    }

    pub fn is_empty(&self) -> bool {
        self.codepoints.is_empty()
    }

    /// Borrow the accumulated contents as a run.
    pub fn run(&self) -> CodepointRun<'_> {
        CodepointRun::new(&self.codepoints, &self.clusters)
    }

    /// Reset to an empty run starting at column 0.
    pub fn clear(&mut self) {
        self.codepoints.clear();
        self.clusters.clear();
        self.columns.clear();
        self.next_column = 0;
    }
}
