//! Position scoring: win/draw/loss estimation, move quality grading,
//! multi-engine consensus and candidate move ranking.

mod consensus;
mod quality;
mod ranker;
mod wdl;

pub use consensus::{aggregate, Consensus};
pub use quality::{classify_move, MoveContext, MoveQuality};
pub use ranker::{rank_candidates, CandidateMove, CandidateMoveScore, RankOrder};
pub use wdl::{estimate_wdl, evaluation_bar_percent, WdlEstimate, WIN_PROBABILITY_SLOPE};
