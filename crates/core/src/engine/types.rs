//! Normalized evaluation types shared by all scoring components.
//!
//! Remote engines answer in slightly different dialects; the HTTP layer is
//! expected to reshape each answer into [`EngineResponse`] before it crosses
//! into this crate. From there everything is carried as an
//! [`EvaluationSample`] holding a single [`Reading`].

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Centipawn stand-in for a forced mate when a single number is needed.
pub const MATE_CP: i32 = 10_000;

/// Identifies which remote engine produced an evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EngineId {
    StockfishOnline,
    ChessApi,
}

impl EngineId {
    pub const ALL: [EngineId; 2] = [EngineId::StockfishOnline, EngineId::ChessApi];

    pub fn as_str(&self) -> &'static str {
        match self {
            EngineId::StockfishOnline => "stockfish-online",
            EngineId::ChessApi => "chess-api",
        }
    }

    /// Tie-break order when engines disagree, lower wins.
    pub fn priority(&self) -> u8 {
        match self {
            EngineId::StockfishOnline => 0,
            EngineId::ChessApi => 1,
        }
    }
}

/// A single engine score: a centipawn value, a forced mate distance, or
/// nothing at all.
///
/// Centipawn and mate values never share a reading. An engine that reports
/// both has the mate kept and the centipawns dropped, since a forced mate
/// makes the centipawn number meaningless.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Reading {
    Centipawns(i32),
    Mate(i32),
    #[default]
    None,
}

impl Reading {
    pub fn centipawns(self) -> Option<i32> {
        match self {
            Reading::Centipawns(cp) => Some(cp),
            _ => None,
        }
    }

    pub fn mate(self) -> Option<i32> {
        match self {
            Reading::Mate(moves) => Some(moves),
            _ => None,
        }
    }

    pub fn is_none(self) -> bool {
        matches!(self, Reading::None)
    }

    /// True for a mate in favour of the side the reading is signed for.
    ///
    /// Mate in zero counts as winning: it is a mate already on the board,
    /// not a missing value.
    pub fn is_winning_mate(self) -> bool {
        matches!(self, Reading::Mate(moves) if moves >= 0)
    }

    /// Collapses the reading to a single centipawn number.
    ///
    /// Mates become `±MATE_CP` regardless of distance and a missing reading
    /// becomes zero, so deltas between readings are always defined.
    pub fn to_cp(self) -> i32 {
        match self {
            Reading::Centipawns(cp) => cp,
            Reading::Mate(moves) => {
                if moves >= 0 {
                    MATE_CP
                } else {
                    -MATE_CP
                }
            }
            Reading::None => 0,
        }
    }

    /// The same reading seen from the other side of the board.
    pub fn flipped(self) -> Reading {
        match self {
            Reading::Centipawns(cp) => Reading::Centipawns(-cp),
            Reading::Mate(moves) => Reading::Mate(-moves),
            Reading::None => Reading::None,
        }
    }
}

/// One engine's evaluation of one position.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationSample {
    pub engine: EngineId,
    pub reading: Reading,
    /// Engine-supplied win probability in percent, when the engine has one.
    #[serde(default)]
    pub win_chance: Option<f64>,
}

impl EvaluationSample {
    pub fn centipawns(engine: EngineId, cp: i32) -> Self {
        Self {
            engine,
            reading: Reading::Centipawns(cp),
            win_chance: None,
        }
    }

    pub fn mate(engine: EngineId, moves: i32) -> Self {
        Self {
            engine,
            reading: Reading::Mate(moves),
            win_chance: None,
        }
    }

    pub fn missing(engine: EngineId) -> Self {
        Self {
            engine,
            reading: Reading::None,
            win_chance: None,
        }
    }

    pub fn with_win_chance(mut self, percent: f64) -> Self {
        self.win_chance = Some(percent);
        self
    }
}

/// Wire shape of a normalized engine answer.
///
/// Every field except `success` is optional; a failed or partial answer
/// simply converts to a sample with no reading.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub evaluation: Option<f64>,
    #[serde(default)]
    pub mate: Option<i32>,
    #[serde(default)]
    pub bestmove: Option<String>,
    #[serde(default)]
    pub win_chance: Option<f64>,
}

impl EngineResponse {
    pub fn from_json(body: &str) -> Result<Self> {
        Ok(serde_json::from_str(body)?)
    }

    /// Reduces the response to a sample, attributing it to `engine`.
    ///
    /// A reported mate wins over any centipawn value. Engines keep sending
    /// a sentinel evaluation next to a mate score and the sentinel must
    /// never leak into averaging.
    pub fn into_sample(self, engine: EngineId) -> EvaluationSample {
        if !self.success {
            return EvaluationSample::missing(engine);
        }
        let reading = match (self.mate, self.evaluation) {
            (Some(moves), _) => Reading::Mate(moves),
            (None, Some(cp)) => Reading::Centipawns(cp.round() as i32),
            (None, None) => Reading::None,
        };
        EvaluationSample {
            engine,
            reading,
            win_chance: self.win_chance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_id_serializes_kebab_case() {
        let id: EngineId = serde_json::from_str("\"stockfish-online\"").unwrap();
        assert_eq!(id, EngineId::StockfishOnline);
        assert_eq!(id.as_str(), "stockfish-online");
        assert_eq!(EngineId::ChessApi.as_str(), "chess-api");
        assert!(EngineId::StockfishOnline.priority() < EngineId::ChessApi.priority());
    }

    #[test]
    fn reading_serializes_tagged() {
        let json = serde_json::to_string(&Reading::Centipawns(35)).unwrap();
        assert_eq!(json, r#"{"kind":"centipawns","value":35}"#);

        let back: Reading = serde_json::from_str(r#"{"kind":"mate","value":-2}"#).unwrap();
        assert_eq!(back, Reading::Mate(-2));

        let none: Reading = serde_json::from_str(r#"{"kind":"none"}"#).unwrap();
        assert_eq!(none, Reading::None);
    }

    #[test]
    fn reading_to_cp_collapses_mates() {
        assert_eq!(Reading::Centipawns(120).to_cp(), 120);
        assert_eq!(Reading::Mate(2).to_cp(), MATE_CP);
        assert_eq!(Reading::Mate(-1).to_cp(), -MATE_CP);
        assert_eq!(Reading::Mate(0).to_cp(), MATE_CP);
        assert_eq!(Reading::None.to_cp(), 0);
    }

    #[test]
    fn mate_in_zero_is_winning() {
        assert!(Reading::Mate(0).is_winning_mate());
        assert!(Reading::Mate(4).is_winning_mate());
        assert!(!Reading::Mate(-1).is_winning_mate());
        assert!(!Reading::Centipawns(900).is_winning_mate());
        assert!(!Reading::None.is_winning_mate());
    }

    #[test]
    fn response_prefers_mate_over_sentinel_evaluation() {
        let json = r#"{"success":true,"evaluation":-9999,"mate":3,"bestmove":"e2e4"}"#;
        let response = EngineResponse::from_json(json).unwrap();
        let sample = response.into_sample(EngineId::StockfishOnline);
        assert_eq!(sample.reading, Reading::Mate(3));
    }

    #[test]
    fn failed_response_converts_to_missing_sample() {
        let response = EngineResponse::from_json(r#"{"success":false}"#).unwrap();
        let sample = response.into_sample(EngineId::ChessApi);
        assert!(sample.reading.is_none());

        // An answer with no success flag at all is treated as failed.
        let empty = EngineResponse::from_json("{}").unwrap();
        assert!(empty.into_sample(EngineId::ChessApi).reading.is_none());
    }

    #[test]
    fn response_carries_win_chance_through() {
        let json = r#"{"success":true,"evaluation":35.4,"winChance":52.5}"#;
        let sample = EngineResponse::from_json(json)
            .unwrap()
            .into_sample(EngineId::ChessApi);
        assert_eq!(sample.reading, Reading::Centipawns(35));
        assert_eq!(sample.win_chance, Some(52.5));
    }

    #[test]
    fn malformed_body_is_a_json_error() {
        assert!(EngineResponse::from_json("not json").is_err());
    }
}
