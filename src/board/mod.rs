//! Board representation: state, move generation, make/unmake, FEN,
//! and static evaluation.

mod attack_tables;
pub mod error;
mod eval;
mod fen;
mod make_unmake;
mod movegen;
mod state;
pub mod types;

#[cfg(test)]
mod tests;

pub use state::{Board, NullMoveInfo, UnmakeInfo};
pub use types::{
    mate_in, mated_in, Bitboard, Color, Move, MoveList, Piece, ScoredMove, ScoredMoveList, Square,
    Value, MAX_MOVES, MAX_PLY, VALUE_DRAW, VALUE_INFINITE, VALUE_MATE, VALUE_MATE_IN_MAX_PLY,
};
