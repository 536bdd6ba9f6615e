//! Sign-flip helpers between White-perspective and mover-perspective scores.
//!
//! Engines and stored timelines speak White-perspective; move classification
//! wants scores signed for the side that just moved. The flip is its own
//! inverse, both directions exist so call sites say which way they convert.

use shakmaty::Color;

use super::types::Reading;

/// Converts a White-perspective centipawn score to the mover's perspective.
pub fn cp_for_mover(white_cp: i32, mover: Color) -> i32 {
    match mover {
        Color::White => white_cp,
        Color::Black => -white_cp,
    }
}

/// Converts a mover-perspective centipawn score back to White's perspective.
pub fn cp_for_white(mover_cp: i32, mover: Color) -> i32 {
    cp_for_mover(mover_cp, mover)
}

/// Re-signs a full reading, mate distances included, for the mover.
pub fn reading_for_mover(reading: Reading, mover: Color) -> Reading {
    match mover {
        Color::White => reading,
        Color::Black => reading.flipped(),
    }
}
