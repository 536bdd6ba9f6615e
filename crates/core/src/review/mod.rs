//! Whole-game review: ply-by-ply timeline construction, material sacrifice
//! detection and per-player accuracy rollups.

mod sacrifice;
mod summary;
mod timeline;

pub use sacrifice::is_material_sacrifice;
pub use summary::{summarize, GameReport, GameSummary, PlayerSummary, MAX_PLY_CP_LOSS};
pub use timeline::{build_timeline, AnalysisTimelinePoint, PositionEval};
