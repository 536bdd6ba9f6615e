//! Per-player accuracy rollups over a finished timeline.

use serde::{Deserialize, Serialize};
use shakmaty::Color;

use super::timeline::AnalysisTimelinePoint;
use crate::engine::cp_for_mover;
use crate::scoring::MoveQuality;

/// A single ply is never charged more than this many centipawns of loss,
/// one throwaway move should not drown the whole average.
pub const MAX_PLY_CP_LOSS: i32 = 500;

/// Accuracy rollup for one player.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSummary {
    /// Number of graded moves.
    pub moves: u32,
    /// Mean quality weight of the graded moves, 100.0 when nothing was
    /// graded at all.
    pub accuracy: f64,
    pub avg_cp_loss: f64,
    pub brilliant: u32,
    pub great: u32,
    pub best: u32,
    pub good: u32,
    pub inaccuracy: u32,
    pub mistake: u32,
    pub blunder: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSummary {
    pub white: PlayerSummary,
    pub black: PlayerSummary,
}

/// A stored review: who played, how it ended, and the full graded timeline
/// with its rollup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameReport {
    pub game_id: String,
    pub white_player: String,
    pub black_player: String,
    pub result: String,
    pub summary: GameSummary,
    pub timeline: Vec<AnalysisTimelinePoint>,
}

impl GameReport {
    pub fn new(
        game_id: impl Into<String>,
        white_player: impl Into<String>,
        black_player: impl Into<String>,
        result: impl Into<String>,
        timeline: Vec<AnalysisTimelinePoint>,
    ) -> Self {
        let summary = summarize(&timeline);
        Self {
            game_id: game_id.into(),
            white_player: white_player.into(),
            black_player: black_player.into(),
            result: result.into(),
            summary,
            timeline,
        }
    }
}

struct Tally {
    summary: PlayerSummary,
    weight_sum: u32,
    loss_sum: i64,
    loss_count: u32,
}

impl Tally {
    fn new() -> Self {
        Self {
            summary: PlayerSummary::default(),
            weight_sum: 0,
            loss_sum: 0,
            loss_count: 0,
        }
    }

    fn finish(self) -> PlayerSummary {
        let mut summary = self.summary;
        summary.accuracy = if summary.moves == 0 {
            100.0
        } else {
            self.weight_sum as f64 / summary.moves as f64
        };
        summary.avg_cp_loss = if self.loss_count == 0 {
            0.0
        } else {
            self.loss_sum as f64 / self.loss_count as f64
        };
        summary
    }
}

/// Folds a timeline into per-player accuracy reports.
///
/// Ungraded plies count toward neither accuracy nor loss, and a ply whose
/// predecessor had no consensus cannot be charged a loss either. The game
/// is assumed to start from the position before the first ply, which is
/// scored as balanced.
pub fn summarize(timeline: &[AnalysisTimelinePoint]) -> GameSummary {
    let mut white = Tally::new();
    let mut black = Tally::new();
    let mut previous_cp: Option<i32> = Some(0);

    for point in timeline {
        let mover = mover_of(point);
        let tally = match mover {
            Color::White => &mut white,
            Color::Black => &mut black,
        };

        if let Some(quality) = point.quality {
            tally.summary.moves += 1;
            tally.weight_sum += quality.weight() as u32;
            match quality {
                MoveQuality::Brilliant => tally.summary.brilliant += 1,
                MoveQuality::Great => tally.summary.great += 1,
                MoveQuality::Best => tally.summary.best += 1,
                MoveQuality::Good => tally.summary.good += 1,
                MoveQuality::Inaccuracy => tally.summary.inaccuracy += 1,
                MoveQuality::Mistake => tally.summary.mistake += 1,
                MoveQuality::Blunder => tally.summary.blunder += 1,
            }

            if let Some(before) = previous_cp {
                let drop = cp_for_mover(before, mover) - cp_for_mover(point.consensus_cp, mover);
                let loss = drop.clamp(0, MAX_PLY_CP_LOSS);
                tally.loss_sum += loss as i64;
                tally.loss_count += 1;
            }
        }

        previous_cp = if point.confidence > 0 {
            Some(point.consensus_cp)
        } else {
            None
        };
    }

    GameSummary {
        white: white.finish(),
        black: black.finish(),
    }
}

/// The side that played the move behind this point. The stored FEN is the
/// position after the move, so whoever is not on turn there just moved.
fn mover_of(point: &AnalysisTimelinePoint) -> Color {
    match point.fen.split_whitespace().nth(1) {
        Some("b") => Color::White,
        Some("w") => Color::Black,
        _ => {
            if point.ply % 2 == 1 {
                Color::White
            } else {
                Color::Black
            }
        }
    }
}
