//! Engine response boundary: normalized evaluation types and perspective
//! helpers shared by every scoring component.

mod perspective;
mod types;

pub use perspective::{cp_for_mover, cp_for_white, reading_for_mover};
pub use types::{EngineId, EngineResponse, EvaluationSample, Reading, MATE_CP};
