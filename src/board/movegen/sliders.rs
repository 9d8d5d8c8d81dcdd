use super::super::attack_tables::{bishop_attacks, queen_attacks, rook_attacks};
use super::super::types::{Bitboard, Move, MoveList, Square};
use super::super::Board;

#[derive(Clone, Copy)]
pub(crate) enum SliderKind {
    Bishop,
    Rook,
    Queen,
}

impl Board {
    pub(crate) fn generate_slider_moves(
        &self,
        from: Square,
        kind: SliderKind,
        moves: &mut MoveList,
    ) {
        let us = self.side_to_move();
        let occ = self.all_occupied.0;
        let attacks = match kind {
            SliderKind::Bishop => bishop_attacks(from.as_index(), occ),
            SliderKind::Rook => rook_attacks(from.as_index(), occ),
            SliderKind::Queen => queen_attacks(from.as_index(), occ),
        };
        let targets = Bitboard(attacks) & !self.occupied[us.index()];

        for to in targets.iter() {
            if self.is_empty_square(to) {
                moves.push(Move::quiet(from, to));
            } else {
                moves.push(Move::capture(from, to));
            }
        }
    }
}
