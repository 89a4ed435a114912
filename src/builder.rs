//! Builders for engines with configuration knobs.
//!
//! The reconstruction engine has none and is constructed directly.

use crate::engines::alignment::{AffineScoring, AlignmentEngine};
use crate::engines::lcs::LcsEngine;

/// Configure and build an [`LcsEngine`].
pub struct LcsEngineBuilder {
    parallel: bool,
    pooling: bool,
}

impl LcsEngineBuilder {
    pub fn new() -> Self {
        Self {
            parallel: false,
            pooling: true,
        }
    }

    /// Run the two Hirschberg halves on rayon workers.
    ///
    /// Requires the `parallel` cargo feature; without it the setting is
    /// accepted but has no effect. Output is identical either way.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Reuse DP rows across calls (on by default).
    ///
    /// Purely a performance policy; results do not depend on it.
    pub fn pooling(mut self, pooling: bool) -> Self {
        self.pooling = pooling;
        self
    }

    pub fn build(self) -> LcsEngine {
        LcsEngine::with_options(self.parallel, self.pooling)
    }
}

impl Default for LcsEngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Configure and build an [`AlignmentEngine`].
///
/// Starts from [`AffineScoring::default`] and overrides per parameter.
pub struct AlignmentEngineBuilder {
    scoring: AffineScoring,
}

impl AlignmentEngineBuilder {
    pub fn new() -> Self {
        Self {
            scoring: AffineScoring::default(),
        }
    }

    pub fn match_score(mut self, score: i32) -> Self {
        self.scoring.match_score = score;
        self
    }

    pub fn mismatch_score(mut self, score: i32) -> Self {
        self.scoring.mismatch_score = score;
        self
    }

    /// Penalty for opening a gap (a length-1 gap costs exactly this).
    ///
    /// # Panics
    /// Panics if `penalty` is negative.
    pub fn gap_open(mut self, penalty: i32) -> Self {
        assert!(penalty >= 0, "gap_open must be non-negative");
        self.scoring.gap_open = penalty;
        self
    }

    /// Penalty for each gap symbol past the first.
    ///
    /// # Panics
    /// Panics if `penalty` is negative.
    pub fn gap_extend(mut self, penalty: i32) -> Self {
        assert!(penalty >= 0, "gap_extend must be non-negative");
        self.scoring.gap_extend = penalty;
        self
    }

    pub fn build(self) -> AlignmentEngine {
        AlignmentEngine::new(self.scoring)
    }
}

impl Default for AlignmentEngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lcs_builder_defaults() {
        let engine = LcsEngineBuilder::new().build();
        assert!(!engine.is_parallel());
    }

    #[test]
    fn alignment_builder_overrides() {
        let engine = AlignmentEngineBuilder::new()
            .match_score(1)
            .mismatch_score(-1)
            .gap_open(2)
            .gap_extend(1)
            .build();
        assert_eq!(
            *engine.scoring(),
            AffineScoring {
                match_score: 1,
                mismatch_score: -1,
                gap_open: 2,
                gap_extend: 1
            }
        );
    }

    #[test]
    #[should_panic]
    fn negative_gap_open_panics() {
        let _ = AlignmentEngineBuilder::new().gap_open(-1);
    }
}
