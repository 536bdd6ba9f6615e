//! Chess Scoring Core Library
//!
//! Turns raw engine evaluations into win/draw/loss estimates, move quality
//! grades, multi-engine consensus readings and ranked candidate moves, and
//! rolls whole games up into stored review reports.
//!
//! Every scoring function is pure and every entry point takes its
//! configuration explicitly, so calls are safe to run concurrently.

pub mod config;
pub mod engine;
pub mod error;
pub mod review;
pub mod scoring;
pub mod storage;

pub use config::{ConfidenceModel, QualityThresholds, ScoringConfig};
pub use engine::{EngineId, EngineResponse, EvaluationSample, Reading};
pub use error::{Error, Result};
pub use review::{
    build_timeline, is_material_sacrifice, summarize, AnalysisTimelinePoint, GameReport,
    GameSummary, PlayerSummary, PositionEval,
};
pub use scoring::{
    aggregate, classify_move, estimate_wdl, evaluation_bar_percent, rank_candidates,
    CandidateMove, CandidateMoveScore, Consensus, MoveContext, MoveQuality, RankOrder, WdlEstimate,
};
pub use storage::Database;
