//! Ply-by-ply review timeline.
//!
//! The builder walks a finished game as a list of positions with their
//! engine samples plus the moves that connect them, and emits one point per
//! ply: blended evaluation, engine spread, confidence, win/draw/loss split
//! and a quality label for the move that produced the position.
//!
//! Evaluations are stored White-perspective throughout; the builder
//! re-signs them for whoever moved before grading.

use serde::{Deserialize, Serialize};
use shakmaty::{Color, Position};

use super::sacrifice::{is_sacrifice_move, move_from_uci, position_from_fen};
use crate::config::ScoringConfig;
use crate::engine::{reading_for_mover, EngineId, EngineResponse, EvaluationSample};
use crate::error::Result;
use crate::scoring::{aggregate, classify_move, estimate_wdl, MoveContext, MoveQuality};

/// One analysed position as the builder receives it: the FEN, whatever
/// samples the engines produced for it, and the engine's preferred move
/// from it, when known.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionEval {
    pub fen: String,
    pub samples: Vec<EvaluationSample>,
    #[serde(default)]
    pub best_move: Option<String>,
}

impl PositionEval {
    pub fn new(fen: impl Into<String>) -> Self {
        Self {
            fen: fen.into(),
            samples: Vec::new(),
            best_move: None,
        }
    }

    pub fn with_sample(mut self, sample: EvaluationSample) -> Self {
        self.samples.push(sample);
        self
    }

    pub fn with_best_move(mut self, uci: impl Into<String>) -> Self {
        self.best_move = Some(uci.into());
        self
    }

    /// Builds a position record straight from raw engine answers.
    ///
    /// The best move is taken from the highest-priority engine that
    /// answered successfully and named one.
    pub fn from_responses(
        fen: impl Into<String>,
        responses: Vec<(EngineId, EngineResponse)>,
    ) -> Self {
        let mut samples = Vec::with_capacity(responses.len());
        let mut best: Option<(u8, String)> = None;
        for (engine, response) in responses {
            if response.success {
                if let Some(bestmove) = &response.bestmove {
                    let priority = engine.priority();
                    if best.as_ref().map_or(true, |(held, _)| priority < *held) {
                        best = Some((priority, bestmove.clone()));
                    }
                }
            }
            samples.push(response.into_sample(engine));
        }
        Self {
            fen: fen.into(),
            samples,
            best_move: best.map(|(_, bestmove)| bestmove),
        }
    }
}

/// One ply of a reviewed game. Evaluations are White-perspective.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisTimelinePoint {
    /// 1-based half-move index within the reviewed sequence.
    pub ply: u32,
    /// Full-move number the ply belongs to.
    pub move_number: u32,
    /// Position after the move was played.
    pub fen: String,
    pub stockfish_cp: Option<i32>,
    pub chess_api_cp: Option<i32>,
    pub consensus_cp: i32,
    pub delta_cp: i32,
    pub confidence: u8,
    /// Grade of the move that produced this position, when both sides of
    /// the swing had data.
    pub quality: Option<MoveQuality>,
    pub wdl_win: u8,
    pub wdl_draw: u8,
    pub wdl_loss: u8,
}

/// Builds the review timeline for a played sequence.
///
/// `positions[i]` is the position before `moves[i]`; `positions[i + 1]` the
/// position after it. Whichever list runs out first ends the timeline, so a
/// half-analysed game still reviews cleanly. Plies without engine data get
/// a neutral point with zero confidence and no quality label rather than
/// being dropped, the ply numbering must stay aligned with the game.
pub fn build_timeline(
    positions: &[PositionEval],
    moves: &[String],
    config: &ScoringConfig,
) -> Result<Vec<AnalysisTimelinePoint>> {
    let mut points = Vec::new();
    if positions.is_empty() {
        return Ok(points);
    }

    let ply_count = moves.len().min(positions.len() - 1);
    let mut last_white: Option<MoveQuality> = None;
    let mut last_black: Option<MoveQuality> = None;

    for index in 0..ply_count {
        let before = &positions[index];
        let after = &positions[index + 1];
        let played = &moves[index];

        let pre_position = position_from_fen(&before.fen)?;
        let mv = move_from_uci(&pre_position, played)?;
        let mover = pre_position.turn();

        let pre = aggregate(&before.samples, config);
        let post = aggregate(&after.samples, config);

        let quality = if pre.reading.is_none() || post.reading.is_none() {
            None
        } else {
            let eval_before = reading_for_mover(pre.reading, mover);
            let eval_after = reading_for_mover(post.reading, mover);
            let delta = eval_after.to_cp() - eval_before.to_cp();
            let was_engine_choice = before
                .best_move
                .as_deref()
                .map_or(false, |best| best.trim() == played.trim());
            // The probe only matters for moves that held the evaluation,
            // no point running it on swings already graded down.
            let is_sacrifice = delta >= 0 && is_sacrifice_move(&pre_position, &mv);
            let opponent_prev = match mover {
                Color::White => last_black,
                Color::Black => last_white,
            };
            let ctx = MoveContext {
                eval_before,
                eval_after,
                was_engine_choice,
                is_sacrifice,
                opponent_prev,
            };
            Some(classify_move(&ctx, config))
        };

        match mover {
            Color::White => last_white = quality,
            Color::Black => last_black = quality,
        }

        let wdl = estimate_wdl(post.reading, None);
        points.push(AnalysisTimelinePoint {
            ply: (index + 1) as u32,
            move_number: (index / 2 + 1) as u32,
            fen: after.fen.clone(),
            stockfish_cp: engine_cp(&after.samples, EngineId::StockfishOnline),
            chess_api_cp: engine_cp(&after.samples, EngineId::ChessApi),
            consensus_cp: post.consensus_cp(),
            delta_cp: post.delta_cp,
            confidence: post.confidence,
            quality,
            wdl_win: wdl.win,
            wdl_draw: wdl.draw,
            wdl_loss: wdl.loss,
        });
    }

    Ok(points)
}

fn engine_cp(samples: &[EvaluationSample], engine: EngineId) -> Option<i32> {
    samples
        .iter()
        .find(|sample| sample.engine == engine)
        .and_then(|sample| sample.reading.centipawns())
}
