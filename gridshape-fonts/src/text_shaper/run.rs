//! Borrowed codepoint runs.

/// An ordered run of codepoints with a parallel cluster index per codepoint.
///
/// The cluster index identifies which original character (usually the grid
/// cell) each codepoint maps back to. The run borrows caller buffers and is
/// only valid for the duration of a shape call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodepointRun<'a> {
    codepoints: &'a [char],
    clusters: &'a [u32],
}

impl<'a> CodepointRun<'a> {
    /// Pair `codepoints` with `clusters`.
    ///
    /// # Panics
    /// Panics if the two slices differ in length. Equal lengths are a caller
    /// precondition, not a recoverable condition.
    pub fn new(codepoints: &'a [char], clusters: &'a [u32]) -> Self {
        assert_eq!(
            codepoints.len(),
            clusters.len(),
            "codepoint and cluster sequences must have the same length"
        );
        Self {
            codepoints,
            clusters,
        }
    }

    pub fn codepoints(&self) -> &'a [char] {
        self.codepoints
    }

    pub fn clusters(&self) -> &'a [u32] {
        self.clusters
    }

    pub fn len(&self) -> usize {
        self.codepoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codepoints.is_empty()
    }

    /// `(codepoint, cluster)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (char, u32)> + 'a {
        self.codepoints
            .iter()
            .copied()
            .zip(self.clusters.iter().copied())
    }

    /// Codepoints as fixed-width hex, for diagnostics.
    pub fn hex_codepoints(&self) -> String {
        self.codepoints
            .iter()
            .map(|&codepoint| format!("{:<6x}", u32::from(codepoint)))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_pairs_codepoints_with_clusters() {
        let codepoints = ['a', 'e', '\u{301}'];
        let clusters = [0, 1, 1];
        let run = CodepointRun::new(&codepoints, &clusters);
        assert_eq!(run.len(), 3);
        assert!(!run.is_empty());
        let pairs: Vec<(char, u32)> = run.iter().collect();
        assert_eq!(pairs, vec![('a', 0), ('e', 1), ('\u{301}', 1)]);
    }

    #[test]
    #[should_panic(expected = "same length")]
    fn test_mismatched_lengths_panic() {
        let _ = CodepointRun::new(&['a', 'b'], &[0]);
    }

    #[test]
    fn test_hex_codepoints_are_fixed_width() {
        let codepoints = ['A', '\u{1F600}'];
        let run = CodepointRun::new(&codepoints, &[0, 1]);
        assert_eq!(run.hex_codepoints(), "41     1f600 ");
    }
}
