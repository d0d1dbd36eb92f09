//! Cut line editing and normalization.
//!
//! Cut lines are horizontal positions in source pixel space where the image
//! will be split. Editing is forgiving: positions are appended as-is, and
//! duplicates or out-of-range values are tolerated until normalization.
//! Normalization produces the clean partition the slicer consumes: sorted,
//! deduplicated, and strictly inside the image.

use serde::{Deserialize, Serialize};

/// An editable set of horizontal cut positions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CutLineSet {
    /// Cut positions in source pixel space, in insertion order until
    /// normalized.
    lines: Vec<u32>,
    /// Number of pieces implied by the most recent normalization.
    piece_count: usize,
}

impl Default for CutLineSet {
    fn default() -> Self {
        Self {
            lines: Vec::new(),
            piece_count: 1,
        }
    }
}

impl CutLineSet {
    /// Removal radius used when deleting cut lines near a clicked position,
    /// in source pixels. Positions within the radius (inclusive) are removed.
    pub const DEFAULT_REMOVE_RADIUS: u32 = 20;

    /// Create an empty cut line set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a cut position.
    ///
    /// Duplicates and positions outside the image are accepted here and
    /// cleaned up by [`normalize`](Self::normalize).
    pub fn add(&mut self, source_y: u32) {
        self.lines.push(source_y);
    }

    /// Remove every cut position within `radius` pixels of `source_y`,
    /// inclusive. Does nothing when no position is in range.
    ///
    /// Callers working in preview space map the clicked position to source
    /// space first, so removal happens in the same space values were added.
    pub fn remove_near(&mut self, source_y: u32, radius: u32) {
        self.lines.retain(|&v| v.abs_diff(source_y) > radius);
    }

    /// Remove all cut positions.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.piece_count = 1;
    }

    /// Normalize the set against an image of the given height.
    ///
    /// Keeps only positions strictly inside `(0, height)`, sorts them,
    /// removes duplicates, and stores the cleaned sequence back. The piece
    /// count becomes the cleaned length plus one. Idempotent.
    ///
    /// Positions at 0 or at `height` would produce zero-height pieces, so
    /// they are dropped rather than rejected.
    pub fn normalize(&mut self, height: u32) -> &[u32] {
        self.lines.retain(|&y| y > 0 && y < height);
        self.lines.sort_unstable();
        self.lines.dedup();
        self.piece_count = self.lines.len() + 1;
        &self.lines
    }

    /// The current cut positions, raw. Sorted and deduplicated only after
    /// [`normalize`](Self::normalize).
    pub fn lines(&self) -> &[u32] {
        &self.lines
    }

    /// Number of cut positions currently stored.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// True when no cut positions are stored.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of pieces the image will be cut into, as of the most recent
    /// normalization. A fresh or cleared set reports 1.
    pub fn piece_count(&self) -> usize {
        self.piece_count
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Strategy for raw cut positions, deliberately exceeding the image
    /// height so out-of-range values are exercised.
    fn raw_cuts_strategy(height: u32) -> impl Strategy<Value = Vec<u32>> {
        prop::collection::vec(0u32..=height + height / 2, 0..32)
    }

    proptest! {
        /// Property: Normalized positions are strictly inside the image.
        #[test]
        fn prop_normalize_open_interval(
            height in 2u32..=10_000,
            raw in raw_cuts_strategy(10_000),
        ) {
            let mut cuts = CutLineSet::new();
            for y in raw {
                cuts.add(y);
            }

            for &y in cuts.normalize(height) {
                prop_assert!(y > 0 && y < height, "Position {} escapes (0, {})", y, height);
            }
        }

        /// Property: Normalized positions are strictly ascending.
        #[test]
        fn prop_normalize_strictly_ascending(
            height in 2u32..=10_000,
            raw in raw_cuts_strategy(10_000),
        ) {
            let mut cuts = CutLineSet::new();
            for y in raw {
                cuts.add(y);
            }

            let cleaned = cuts.normalize(height);
            for pair in cleaned.windows(2) {
                prop_assert!(pair[0] < pair[1], "Not strictly ascending: {:?}", pair);
            }
        }

        /// Property: Piece count is always normalized length plus one.
        #[test]
        fn prop_piece_count_is_len_plus_one(
            height in 2u32..=10_000,
            raw in raw_cuts_strategy(10_000),
        ) {
            let mut cuts = CutLineSet::new();
            for y in raw {
                cuts.add(y);
            }

            let len = cuts.normalize(height).len();
            prop_assert_eq!(cuts.piece_count(), len + 1);
        }

        /// Property: Normalization is idempotent.
        #[test]
        fn prop_normalize_idempotent(
            height in 2u32..=10_000,
            raw in raw_cuts_strategy(10_000),
        ) {
            let mut cuts = CutLineSet::new();
            for y in raw {
                cuts.add(y);
            }

            let first: Vec<u32> = cuts.normalize(height).to_vec();
            let second: Vec<u32> = cuts.normalize(height).to_vec();
            prop_assert_eq!(first, second);
        }

        /// Property: remove_near removes exactly the in-radius positions.
        #[test]
        fn prop_remove_near_radius_boundary(
            raw in raw_cuts_strategy(10_000),
            target in 0u32..=10_000,
            radius in 0u32..=100,
        ) {
            let mut cuts = CutLineSet::new();
            for y in raw.iter().copied() {
                cuts.add(y);
            }

            cuts.remove_near(target, radius);

            let expected: Vec<u32> = raw
                .into_iter()
                .filter(|v| v.abs_diff(target) > radius)
                .collect();
            prop_assert_eq!(cuts.lines(), expected.as_slice());
        }
    }
}
