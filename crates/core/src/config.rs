//! Tunable scoring parameters.
//!
//! Every scoring entry point takes an explicit [`ScoringConfig`] so callers
//! can run different profiles side by side. `ScoringConfig::default()` gives
//! the standard profile used in tests and in the stored reports.

use serde::{Deserialize, Serialize};

/// Bundle of all tunable knobs used by the scoring functions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub thresholds: QualityThresholds,
    pub confidence: ConfidenceModel,
}

/// Centipawn-delta cutoffs for the move quality bands.
///
/// A delta is the mover-relative evaluation swing produced by a move, so a
/// perfect move sits near zero and mistakes go negative. Each field is the
/// lowest delta still accepted by that band; anything below `mistake` is a
/// blunder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityThresholds {
    /// Best: delta of -10 or better.
    pub best: i32,
    /// Good: delta of -50 or better.
    pub good: i32,
    /// Inaccuracy: delta of -120 or better.
    pub inaccuracy: i32,
    /// Mistake: delta of -250 or better.
    pub mistake: i32,
}

impl Default for QualityThresholds {
    fn default() -> Self {
        Self {
            best: -10,
            good: -50,
            inaccuracy: -120,
            mistake: -250,
        }
    }
}

impl QualityThresholds {
    /// Returns cutoffs forced into descending order.
    ///
    /// Overridden thresholds are not trusted to be ordered. Each band is
    /// clamped to its stricter neighbour, so a misordered override collapses
    /// a band to empty instead of misclassifying.
    pub fn ordered(&self) -> QualityThresholds {
        let best = self.best;
        let good = self.good.min(best);
        let inaccuracy = self.inaccuracy.min(good);
        let mistake = self.mistake.min(inaccuracy);
        QualityThresholds {
            best,
            good,
            inaccuracy,
            mistake,
        }
    }
}

/// Linear falloff from `max` down to `floor` as engine disagreement grows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfidenceModel {
    /// Confidence when all engines agree exactly.
    pub max: u8,
    /// Confidence never drops below this, however wide the spread.
    pub floor: u8,
    /// Centipawn spread at which confidence reaches the floor.
    pub span_cp: i32,
}

impl Default for ConfidenceModel {
    fn default() -> Self {
        Self {
            max: 100,
            floor: 20,
            span_cp: 320,
        }
    }
}

impl ConfidenceModel {
    /// Maps a centipawn spread between engines to a confidence score.
    pub fn for_delta(&self, delta_cp: i32) -> u8 {
        let floor = self.floor.min(self.max);
        if delta_cp <= 0 {
            return self.max;
        }
        let span = self.span_cp.max(1);
        if delta_cp >= span {
            return floor;
        }
        let range = (self.max - floor) as f64;
        let falloff = range * delta_cp as f64 / span as f64;
        (self.max as f64 - falloff).round() as u8
    }
}
