//! Material sacrifice detection.
//!
//! A move is a sacrifice when the mover ends up materially worse than
//! before it even after every favourable recapture runs its course. The
//! probe is a small capture-only search, nothing positional: it prices
//! pieces at exchange values and plays out capture chains with
//! alpha-beta until the position goes quiet.

use shakmaty::{fen::Fen, uci::UciMove, CastlingMode, Chess, Color, Move, Position, Role};

use crate::engine::MATE_CP;
use crate::error::{Error, Result};

/// Material a mover must still be down, after all recaptures, for the move
/// to count as a sacrifice. One exchange's worth.
const SACRIFICE_MARGIN: i32 = 200;

/// Search window wide enough for any material score plus the mate bonus.
const SEARCH_BOUND: i32 = 100_000;

/// Decides whether the move played from `fen` gives up material on purpose.
///
/// The FEN must be the position before the move and the move comes in UCI
/// notation. An unparseable FEN or a move that is not legal in the
/// position is an error, not a `false`.
pub fn is_material_sacrifice(fen: &str, uci: &str) -> Result<bool> {
    let position = position_from_fen(fen)?;
    let mv = move_from_uci(&position, uci)?;
    Ok(is_sacrifice_move(&position, &mv))
}

pub(crate) fn position_from_fen(fen: &str) -> Result<Chess> {
    let parsed: Fen = fen
        .parse()
        .map_err(|e| Error::Fen(format!("{}: {}", fen, e)))?;
    parsed
        .into_position(CastlingMode::Standard)
        .map_err(|e| Error::Position(format!("{}: {}", fen, e)))
}

pub(crate) fn move_from_uci(position: &Chess, uci: &str) -> Result<Move> {
    let parsed: UciMove = uci
        .parse()
        .map_err(|e| Error::Uci(format!("{}: {}", uci, e)))?;
    parsed
        .to_move(position)
        .map_err(|e| Error::Uci(format!("{}: {}", uci, e)))
}

pub(crate) fn is_sacrifice_move(position: &Chess, mv: &Move) -> bool {
    let baseline = material_balance(position);
    let after = match position.clone().play(mv.clone()) {
        Ok(next) => next,
        Err(_) => return false,
    };
    // The opponent moves next, so their best capture line is the mover's
    // worst case.
    let forced = -capture_search(&after, -SEARCH_BOUND, SEARCH_BOUND);
    baseline - forced >= SACRIFICE_MARGIN
}

/// Plays out capture chains and returns the side-to-move's material score
/// once no capture improves it further.
fn capture_search(position: &Chess, mut alpha: i32, beta: i32) -> i32 {
    let stand_pat = material_balance(position);
    if stand_pat >= beta {
        return beta;
    }
    if stand_pat > alpha {
        alpha = stand_pat;
    }

    let mut captures: Vec<Move> = position
        .legal_moves()
        .iter()
        .filter(|m| m.is_capture())
        .cloned()
        .collect();
    // Try the biggest prey first, it tightens the window fastest.
    captures.sort_by_key(|m| std::cmp::Reverse(m.capture().map(exchange_value).unwrap_or(0)));

    for capture in captures {
        let next = match position.clone().play(capture) {
            Ok(next) => next,
            Err(_) => continue,
        };
        let score = -capture_search(&next, -beta, -alpha);
        if score >= beta {
            return beta;
        }
        if score > alpha {
            alpha = score;
        }
    }

    alpha
}

/// Material balance from the side-to-move's point of view. Checkmate is
/// priced below any material deficit.
fn material_balance(position: &Chess) -> i32 {
    if position.is_checkmate() {
        return -MATE_CP;
    }
    let us = position.turn();
    side_material(position, us) - side_material(position, us.other())
}

fn side_material(position: &Chess, color: Color) -> i32 {
    let board = position.board();
    [Role::Pawn, Role::Knight, Role::Bishop, Role::Rook, Role::Queen]
        .iter()
        .map(|&role| (board.by_color(color) & board.by_role(role)).count() as i32 * exchange_value(role))
        .sum()
}

fn exchange_value(role: Role) -> i32 {
    match role {
        Role::Pawn => 100,
        Role::Knight => 300,
        Role::Bishop => 300,
        Role::Rook => 500,
        Role::Queen => 900,
        Role::King => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Italian game after 1.e4 e5 2.Bc4 Bc5.
    const ITALIAN: &str = "rnbqk1nr/pppp1ppp/8/2b1p3/2B1P3/8/PPPP1PPP/RNBQK1NR w KQkq - 2 3";

    #[test]
    fn bishop_takes_defended_pawn_is_a_sacrifice() {
        // Bxf7+ wins a pawn but loses the bishop to Kxf7.
        assert!(is_material_sacrifice(ITALIAN, "c4f7").unwrap());
    }

    #[test]
    fn quiet_move_is_not_a_sacrifice() {
        let start = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
        assert!(!is_material_sacrifice(start, "e2e4").unwrap());
    }

    #[test]
    fn even_trade_is_not_a_sacrifice() {
        // Ruy Lopez after 3...a6: Bxc6 trades bishop for knight.
        let lopez = "r1bqkbnr/1ppp1ppp/p1n5/1B2p3/4P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 0 4";
        assert!(!is_material_sacrifice(lopez, "b5c6").unwrap());
    }

    #[test]
    fn winning_a_hanging_piece_is_not_a_sacrifice() {
        // The black queen wandered to g5 where nothing defends it.
        let hanging = "rnb1kbnr/pppp1ppp/8/4p1q1/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3";
        assert!(!is_material_sacrifice(hanging, "f3g5").unwrap());
    }

    #[test]
    fn losing_the_queen_for_a_pawn_is_a_sacrifice() {
        // 3.Qxe5+ runs into Nxe5. Costly, but by the material definition
        // it is exactly a sacrifice; soundness is the classifier's problem.
        let scholar = "r1bqkbnr/pppp1ppp/2n5/4p2Q/4P3/8/PPPP1PPP/RNB1KBNR w KQkq - 2 3";
        assert!(is_material_sacrifice(scholar, "h5e5").unwrap());
    }

    #[test]
    fn garbage_fen_is_an_error() {
        let result = is_material_sacrifice("definitely not a fen", "e2e4");
        assert!(matches!(result, Err(Error::Fen(_))));
    }

    #[test]
    fn illegal_move_is_an_error() {
        let start = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
        assert!(matches!(
            is_material_sacrifice(start, "zz99"),
            Err(Error::Uci(_))
        ));
        // Well-formed UCI, but the rook cannot jump its own pawn.
        assert!(matches!(
            is_material_sacrifice(start, "a1a8"),
            Err(Error::Uci(_))
        ));
    }
}
