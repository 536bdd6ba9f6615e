//! Move quality grading from the evaluation swing a move produced.
//!
//! Deltas are mover-relative: a move that keeps the evaluation steady is
//! near zero, a move that throws the game away is deeply negative. The
//! centipawn bands come from [`crate::config::QualityThresholds`]; the
//! special labels on top of them (brilliant, great) and the forced-mate
//! overrides need the extra context carried in [`MoveContext`].

use serde::{Deserialize, Serialize};

use crate::config::ScoringConfig;
use crate::engine::Reading;

/// Quality label for a single played move, best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveQuality {
    Brilliant,
    Great,
    Best,
    Good,
    Inaccuracy,
    Mistake,
    Blunder,
}

impl MoveQuality {
    pub fn as_str(&self) -> &'static str {
        match self {
            MoveQuality::Brilliant => "brilliant",
            MoveQuality::Great => "great",
            MoveQuality::Best => "best",
            MoveQuality::Good => "good",
            MoveQuality::Inaccuracy => "inaccuracy",
            MoveQuality::Mistake => "mistake",
            MoveQuality::Blunder => "blunder",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            MoveQuality::Brilliant => "Brilliant",
            MoveQuality::Great => "Great",
            MoveQuality::Best => "Best",
            MoveQuality::Good => "Good",
            MoveQuality::Inaccuracy => "Inaccuracy",
            MoveQuality::Mistake => "Mistake",
            MoveQuality::Blunder => "Blunder",
        }
    }

    /// Accuracy weight of the label, 0 to 100.
    pub fn weight(&self) -> u8 {
        match self {
            MoveQuality::Brilliant => 100,
            MoveQuality::Great => 95,
            MoveQuality::Best => 90,
            MoveQuality::Good => 80,
            MoveQuality::Inaccuracy => 65,
            MoveQuality::Mistake => 40,
            MoveQuality::Blunder => 15,
        }
    }
}

/// Everything known about a move when it is graded.
///
/// Both readings are signed from the mover's perspective. `opponent_prev`
/// is the label the opponent's immediately preceding move earned, when that
/// move could be graded at all.
#[derive(Debug, Clone, Copy)]
pub struct MoveContext {
    pub eval_before: Reading,
    pub eval_after: Reading,
    pub was_engine_choice: bool,
    pub is_sacrifice: bool,
    pub opponent_prev: Option<MoveQuality>,
}

impl MoveContext {
    pub fn new(eval_before: Reading, eval_after: Reading) -> Self {
        Self {
            eval_before,
            eval_after,
            was_engine_choice: false,
            is_sacrifice: false,
            opponent_prev: None,
        }
    }
}

/// Grades one move.
///
/// Two rules sit above the centipawn bands: throwing away a forced mate is
/// always a blunder, and finding one is never graded worse than good. Within
/// the top band a material sacrifice that holds the evaluation is brilliant,
/// and the engine's own choice that punishes an opponent lapse is great.
pub fn classify_move(ctx: &MoveContext, config: &ScoringConfig) -> MoveQuality {
    let before = ctx.eval_before;
    let after = ctx.eval_after;

    // Losing a forced mate is a blunder no matter what the centipawn
    // collapse values say about the swing.
    if before.is_winning_mate() && !after.is_winning_mate() {
        return MoveQuality::Blunder;
    }

    let bands = config.thresholds.ordered();
    let delta = after.to_cp() - before.to_cp();

    let mut quality = if delta >= bands.best {
        if ctx.is_sacrifice && delta >= 0 {
            MoveQuality::Brilliant
        } else if ctx.was_engine_choice && delta >= 0 && punished_opponent(ctx.opponent_prev) {
            MoveQuality::Great
        } else {
            MoveQuality::Best
        }
    } else if delta >= bands.good {
        MoveQuality::Good
    } else if delta >= bands.inaccuracy {
        MoveQuality::Inaccuracy
    } else if delta >= bands.mistake {
        MoveQuality::Mistake
    } else {
        MoveQuality::Blunder
    };

    // Converting an advantage into a forced mate can cost plenty of
    // nominal centipawns, never grade it below good.
    if after.is_winning_mate() && quality.weight() < MoveQuality::Good.weight() {
        quality = MoveQuality::Good;
    }

    quality
}

fn punished_opponent(prev: Option<MoveQuality>) -> bool {
    matches!(
        prev,
        Some(MoveQuality::Inaccuracy | MoveQuality::Mistake | MoveQuality::Blunder)
    )
}
