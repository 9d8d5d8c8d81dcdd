use super::super::attack_tables::KNIGHT_ATTACKS;
use super::super::types::{Bitboard, Move, MoveList, Square};
use super::super::Board;

impl Board {
    pub(crate) fn generate_knight_moves(&self, from: Square, moves: &mut MoveList) {
        let us = self.side_to_move();
        let own = self.occupied[us.index()];
        let targets = Bitboard(KNIGHT_ATTACKS[from.as_index()]) & !own;

        for to in targets.iter() {
            if self.is_empty_square(to) {
                moves.push(Move::quiet(from, to));
            } else {
                moves.push(Move::capture(from, to));
            }
        }
    }
}
