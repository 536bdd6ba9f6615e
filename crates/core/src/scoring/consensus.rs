//! Multi-engine consensus for a single position.
//!
//! Engines are polled independently and frequently disagree. The aggregate
//! keeps a single blended reading plus how far apart the engines were and
//! how much that spread erodes trust in the blend.

use serde::{Deserialize, Serialize};

use crate::config::ScoringConfig;
use crate::engine::{EvaluationSample, Reading};

/// Blended view of one position across every engine that answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Consensus {
    pub reading: Reading,
    /// Widest centipawn disagreement between any two engines.
    pub delta_cp: i32,
    /// Trust in the blended reading, 0 to the configured maximum.
    pub confidence: u8,
}

impl Consensus {
    /// The aggregate of no data: neutral reading, zero confidence.
    pub fn none() -> Self {
        Self {
            reading: Reading::None,
            delta_cp: 0,
            confidence: 0,
        }
    }

    /// The blended reading collapsed to one centipawn number.
    pub fn consensus_cp(&self) -> i32 {
        self.reading.to_cp()
    }
}

/// Blends every usable sample into a single consensus.
///
/// Centipawn readings average with equal weight. Any reported mate
/// dominates the average entirely; when several engines report different
/// mates the highest-priority engine's line is kept. The disagreement
/// spread is measured over centipawn readings only, mate stand-in values
/// would drown it.
pub fn aggregate(samples: &[EvaluationSample], config: &ScoringConfig) -> Consensus {
    let usable: Vec<&EvaluationSample> =
        samples.iter().filter(|s| !s.reading.is_none()).collect();
    if usable.is_empty() {
        return Consensus::none();
    }

    let mate = usable
        .iter()
        .filter_map(|s| s.reading.mate().map(|moves| (s.engine, moves)))
        .min_by_key(|(engine, _)| engine.priority())
        .map(|(_, moves)| moves);

    let cps: Vec<i32> = usable
        .iter()
        .filter_map(|s| s.reading.centipawns())
        .collect();

    let delta_cp = match (cps.iter().min(), cps.iter().max()) {
        (Some(low), Some(high)) => high - low,
        _ => 0,
    };

    let reading = if let Some(moves) = mate {
        Reading::Mate(moves)
    } else {
        let mean = cps.iter().map(|&cp| cp as f64).sum::<f64>() / cps.len() as f64;
        Reading::Centipawns(mean.round() as i32)
    };

    Consensus {
        reading,
        delta_cp,
        confidence: config.confidence.for_delta(delta_cp),
    }
}
