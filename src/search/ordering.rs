//! Move ordering.
//!
//! Every move at a node is scored once; the search then draws moves with
//! [`ScoredMoveList::pick_best`], a lazy selection sort that only pays for
//! the moves actually tried before a cutoff.

use crate::board::{Board, Move, MoveList, ScoredMoveList};

use super::{HistoryTable, KillerTable};

/// Score granted to the hash move.
const TT_MOVE_SCORE: i32 = 1_000_000;
/// Base score for captures; the MVV-LVA term is added on top.
const CAPTURE_SCORE: i32 = 900_000;
/// First killer at this ply.
const KILLER1_SCORE: i32 = 800_000;
/// Second killer at this ply.
const KILLER2_SCORE: i32 = 799_000;

/// `MVV_LVA[attacker][victim]`: prefer valuable victims, break ties toward
/// cheap attackers. Indexed by piece kind (pawn..king).
#[rustfmt::skip]
const MVV_LVA: [[i32; 6]; 6] = [
    [15, 25, 35, 45, 55, 65], // pawn captures P, N, B, R, Q, K
    [14, 24, 34, 44, 54, 64], // knight captures
    [13, 23, 33, 43, 53, 63], // bishop captures
    [12, 22, 32, 42, 52, 62], // rook captures
    [11, 21, 31, 41, 51, 61], // queen captures
    [10, 20, 30, 40, 50, 60], // king captures
];

/// Ordering score for one move.
pub(crate) fn score_move(
    board: &Board,
    mv: Move,
    tt_move: Move,
    killers: &KillerTable,
    history: &HistoryTable,
    ply: usize,
) -> i32 {
    if mv == tt_move {
        return TT_MOVE_SCORE;
    }

    // Captures ranked by MVV-LVA. En passant lands on an empty square and
    // falls through to the quiet path, matching the original ordering.
    if mv.is_capture() {
        if let (Some(attacker), Some(victim)) = (board.piece_on(mv.from()), board.piece_on(mv.to()))
        {
            return CAPTURE_SCORE + 1_000 * MVV_LVA[attacker.index()][victim.index()];
        }
    }

    if mv == killers.primary(ply) {
        return KILLER1_SCORE;
    }
    if mv == killers.secondary(ply) {
        return KILLER2_SCORE;
    }

    history.score(board.side_to_move(), mv)
}

/// Score every move in `moves` for selection at one node.
pub(crate) fn score_moves(
    board: &Board,
    moves: &MoveList,
    tt_move: Move,
    killers: &KillerTable,
    history: &HistoryTable,
    ply: usize,
) -> ScoredMoveList {
    let mut scored = ScoredMoveList::new();
    for &mv in moves {
        scored.push(mv, score_move(board, mv, tt_move, killers, history, ply));
    }
    scored
}
