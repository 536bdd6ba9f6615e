//! Win/draw/loss estimation from a single engine reading.
//!
//! A centipawn score maps to a win chance through a logistic curve, the win
//! chance then splits into win, draw and loss percentages that always sum to
//! exactly 100. Forced mates bypass the curve entirely. Probabilities are
//! signed the way the input is signed: feed a White-perspective reading and
//! `win` is White's chance, feed a mover-perspective reading and it is the
//! mover's.

use serde::{Deserialize, Serialize};

use crate::engine::Reading;

/// Steepness of the centipawn-to-win-chance logistic curve.
pub const WIN_PROBABILITY_SLOPE: f64 = 0.00368208;

/// Integer win/draw/loss percentages, guaranteed to sum to 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WdlEstimate {
    pub win: u8,
    pub draw: u8,
    pub loss: u8,
}

impl WdlEstimate {
    pub fn from_sample(sample: &crate::engine::EvaluationSample) -> WdlEstimate {
        estimate_wdl(sample.reading, sample.win_chance)
    }
}

/// Estimates win/draw/loss percentages for a reading.
///
/// An engine-supplied win chance, when present, overrides the logistic curve
/// but never a mate: a forced mate is always 99/1/0 for the winning side and
/// 0/1/99 for the losing side. A missing reading sits at the even 50% point.
pub fn estimate_wdl(reading: Reading, win_chance: Option<f64>) -> WdlEstimate {
    if let Reading::Mate(_) = reading {
        return if reading.is_winning_mate() {
            WdlEstimate {
                win: 99,
                draw: 1,
                loss: 0,
            }
        } else {
            WdlEstimate {
                win: 0,
                draw: 1,
                loss: 99,
            }
        };
    }

    let chance = match (win_chance, reading) {
        (Some(percent), _) => percent.clamp(1.0, 99.0),
        (None, Reading::Centipawns(cp)) => logistic_win_chance(cp),
        (None, _) => 50.0,
    };

    // Draw likelihood peaks in balanced positions and thins out toward
    // either extreme, never below 5%.
    let draw_rate = (0.34 - (chance - 50.0).abs() / 120.0).clamp(0.05, 0.34);

    let win = (chance * (1.0 - draw_rate)).round() as i32;
    let mut draw = (draw_rate * 100.0).round() as i32;
    let mut loss = 100 - win - draw;
    if loss < 0 {
        loss = 0;
        draw = 100 - win;
    }

    WdlEstimate {
        win: win as u8,
        draw: draw as u8,
        loss: loss as u8,
    }
}

/// Position of the evaluation bar needle as a percentage in [1, 99].
///
/// Unlike the probability model this is a plain linear ramp, saturating at
/// ±1200 centipawns so endgame-sized scores still move the needle visibly.
pub fn evaluation_bar_percent(reading: Reading, win_chance: Option<f64>) -> f64 {
    if let Reading::Mate(_) = reading {
        return if reading.is_winning_mate() { 99.0 } else { 1.0 };
    }
    if let Some(percent) = win_chance {
        return percent.clamp(1.0, 99.0);
    }
    match reading {
        Reading::Centipawns(cp) => {
            (50.0 + cp.clamp(-1200, 1200) as f64 / 24.0).clamp(1.0, 99.0)
        }
        _ => 50.0,
    }
}

fn logistic_win_chance(cp: i32) -> f64 {
    let spread = 2.0 / (1.0 + (-WIN_PROBABILITY_SLOPE * cp as f64).exp()) - 1.0;
    (50.0 + 50.0 * spread).clamp(1.0, 99.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wdl(cp: i32) -> WdlEstimate {
        estimate_wdl(Reading::Centipawns(cp), None)
    }

    #[test]
    fn percentages_always_sum_to_hundred() {
        for cp in (-2000..=2000).step_by(37) {
            let estimate = wdl(cp);
            let sum = estimate.win as u16 + estimate.draw as u16 + estimate.loss as u16;
            assert_eq!(sum, 100, "cp {} gave {:?}", cp, estimate);
        }
    }

    #[test]
    fn balanced_position_is_even() {
        assert_eq!(
            wdl(0),
            WdlEstimate {
                win: 33,
                draw: 34,
                loss: 33
            }
        );
    }

    #[test]
    fn small_edge_shifts_the_split() {
        assert_eq!(
            wdl(20),
            WdlEstimate {
                win: 35,
                draw: 32,
                loss: 33
            }
        );
        assert_eq!(
            wdl(300),
            WdlEstimate {
                win: 65,
                draw: 13,
                loss: 22
            }
        );
    }

    #[test]
    fn win_chance_never_decreases_with_evaluation() {
        let mut previous = 0;
        for cp in (-600..=600).step_by(50) {
            let estimate = wdl(cp);
            assert!(
                estimate.win >= previous,
                "win dropped from {} at cp {}",
                previous,
                cp
            );
            previous = estimate.win;
        }
    }

    #[test]
    fn mirrored_scores_mirror_win_and_loss() {
        for cp in [10, 80, 150, 300, 700] {
            let up = wdl(cp);
            let down = wdl(-cp);
            // Identical up to a percentage point of rounding slack.
            assert!((up.win as i16 - down.loss as i16).abs() <= 1, "cp {}", cp);
            assert!((up.loss as i16 - down.win as i16).abs() <= 1, "cp {}", cp);
            assert_eq!(up.draw, down.draw, "cp {}", cp);
        }
    }

    #[test]
    fn forced_mate_dominates() {
        let winning = estimate_wdl(Reading::Mate(3), None);
        assert_eq!(
            winning,
            WdlEstimate {
                win: 99,
                draw: 1,
                loss: 0
            }
        );
        let losing = estimate_wdl(Reading::Mate(-2), None);
        assert_eq!(
            losing,
            WdlEstimate {
                win: 0,
                draw: 1,
                loss: 99
            }
        );
        // Mate already delivered counts as a winning mate.
        assert_eq!(estimate_wdl(Reading::Mate(0), None).win, 99);
        // A mate reading beats a supplied win chance.
        assert_eq!(estimate_wdl(Reading::Mate(1), Some(3.0)).win, 99);
    }

    #[test]
    fn supplied_win_chance_overrides_the_curve() {
        let pushed = estimate_wdl(Reading::Centipawns(0), Some(140.0));
        assert_eq!(
            pushed,
            WdlEstimate {
                win: 94,
                draw: 5,
                loss: 1
            }
        );
        let pulled = estimate_wdl(Reading::Centipawns(0), Some(-20.0));
        assert_eq!(
            pulled,
            WdlEstimate {
                win: 1,
                draw: 5,
                loss: 94
            }
        );
    }

    #[test]
    fn sample_shortcut_matches_the_direct_call() {
        use crate::engine::{EngineId, EvaluationSample};

        let plain = EvaluationSample::centipawns(EngineId::StockfishOnline, 120);
        assert_eq!(
            WdlEstimate::from_sample(&plain),
            estimate_wdl(Reading::Centipawns(120), None)
        );

        let with_chance =
            EvaluationSample::centipawns(EngineId::ChessApi, 120).with_win_chance(80.0);
        assert_eq!(
            WdlEstimate::from_sample(&with_chance),
            estimate_wdl(Reading::Centipawns(120), Some(80.0))
        );
    }

    #[test]
    fn missing_reading_is_even() {
        assert_eq!(
            estimate_wdl(Reading::None, None),
            WdlEstimate {
                win: 33,
                draw: 34,
                loss: 33
            }
        );
    }

    #[test]
    fn extreme_scores_stay_in_range() {
        for cp in [i32::MIN, -100_000, 100_000, i32::MAX] {
            let estimate = wdl(cp);
            assert!(estimate.win <= 100 && estimate.loss <= 100);
            let sum = estimate.win as u16 + estimate.draw as u16 + estimate.loss as u16;
            assert_eq!(sum, 100);
        }
    }

    #[test]
    fn bar_is_linear_and_clamped() {
        assert_eq!(evaluation_bar_percent(Reading::Centipawns(0), None), 50.0);
        assert_eq!(evaluation_bar_percent(Reading::Centipawns(240), None), 60.0);
        assert_eq!(evaluation_bar_percent(Reading::Centipawns(1200), None), 99.0);
        assert_eq!(evaluation_bar_percent(Reading::Centipawns(-1200), None), 1.0);
        assert_eq!(evaluation_bar_percent(Reading::Centipawns(50_000), None), 99.0);
        assert_eq!(evaluation_bar_percent(Reading::None, None), 50.0);
    }

    #[test]
    fn bar_honours_mates_and_overrides() {
        assert_eq!(evaluation_bar_percent(Reading::Mate(2), None), 99.0);
        assert_eq!(evaluation_bar_percent(Reading::Mate(-1), None), 1.0);
        assert_eq!(evaluation_bar_percent(Reading::Mate(0), None), 99.0);
        assert_eq!(
            evaluation_bar_percent(Reading::Centipawns(-500), Some(73.2)),
            73.2
        );
        assert_eq!(
            evaluation_bar_percent(Reading::Centipawns(0), Some(150.0)),
            99.0
        );
    }
}
