//! Candidate move ranking for display.
//!
//! Each engine suggestion is collapsed to its win/loss outlook, scored on a
//! single 0-100 quality scale and sorted under the caller's chosen order.
//! Sorting is stable, so equally scored moves keep their input order.

use serde::{Deserialize, Serialize};

use super::wdl::estimate_wdl;
use crate::engine::{EngineId, Reading};

/// Sort key for ranked candidates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankOrder {
    /// Blended quality score, best first.
    #[default]
    Quality,
    /// Raw winning chances, highest first.
    Win,
    /// Losing chances, lowest first.
    Safety,
}

/// An engine suggestion before ranking.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateMove {
    #[serde(rename = "move")]
    pub uci: String,
    pub engine: EngineId,
    pub reading: Reading,
    #[serde(default)]
    pub win_chance: Option<f64>,
}

/// A ranked candidate, ready for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateMoveScore {
    #[serde(rename = "move")]
    pub uci: String,
    pub engine: EngineId,
    pub win: u8,
    pub loss: u8,
    /// Blend of win and loss chances on a 0-100 scale.
    pub quality: u8,
    /// 1-based position after sorting.
    pub rank: u32,
    pub verdict: String,
    pub color: String,
    pub is_top: bool,
}

/// Scores, sorts and ranks candidate moves.
///
/// With an engine filter only that engine's suggestions survive; ranks are
/// always contiguous from 1 over whatever remains.
pub fn rank_candidates(
    moves: &[CandidateMove],
    order: RankOrder,
    engine_filter: Option<EngineId>,
) -> Vec<CandidateMoveScore> {
    let mut scored: Vec<CandidateMoveScore> = moves
        .iter()
        .filter(|candidate| engine_filter.map_or(true, |engine| candidate.engine == engine))
        .map(score_candidate)
        .collect();

    match order {
        RankOrder::Quality => scored.sort_by(|a, b| b.quality.cmp(&a.quality)),
        RankOrder::Win => scored.sort_by(|a, b| b.win.cmp(&a.win).then(b.quality.cmp(&a.quality))),
        RankOrder::Safety => {
            scored.sort_by(|a, b| a.loss.cmp(&b.loss).then(b.quality.cmp(&a.quality)))
        }
    }

    for (index, entry) in scored.iter_mut().enumerate() {
        entry.rank = (index + 1) as u32;
        entry.is_top = index == 0;
    }
    scored
}

fn score_candidate(candidate: &CandidateMove) -> CandidateMoveScore {
    let wdl = estimate_wdl(candidate.reading, candidate.win_chance);
    let quality = ((wdl.win as i32 - wdl.loss as i32 + 100) / 2) as u8;
    let (verdict, color) = verdict_for(quality);
    CandidateMoveScore {
        uci: candidate.uci.clone(),
        engine: candidate.engine,
        win: wdl.win,
        loss: wdl.loss,
        quality,
        rank: 0,
        verdict: verdict.to_string(),
        color: color.to_string(),
        is_top: false,
    }
}

/// Fixed verdict bands over the quality scale, with their display colors.
fn verdict_for(quality: u8) -> (&'static str, &'static str) {
    match quality {
        q if q >= 90 => ("winning", "#2e7d32"),
        q if q >= 70 => ("strong", "#66bb6a"),
        q if q >= 55 => ("promising", "#9ccc65"),
        q if q >= 45 => ("balanced", "#ffca28"),
        q if q >= 30 => ("dubious", "#ffa726"),
        q if q >= 15 => ("poor", "#ef5350"),
        _ => ("losing", "#b71c1c"),
    }
}
