use super::super::types::{Move, MoveList, Piece, Square};
use super::super::Board;

/// Promotion choices, queen first.
const PROMOTION_PIECES: [Piece; 4] = [Piece::Queen, Piece::Rook, Piece::Bishop, Piece::Knight];

impl Board {
    pub(crate) fn generate_pawn_moves(&self, from: Square, moves: &mut MoveList) {
        let us = self.side_to_move();
        let dir = us.pawn_direction();
        let promotion_rank = us.pawn_promotion_rank();

        let rank = from.rank() as isize;
        let file = from.file() as isize;
        let forward_rank = rank + dir;
        if !(0..8).contains(&forward_rank) {
            return;
        }

        // Pushes
        let forward = Square::new(forward_rank as usize, from.file());
        if self.is_empty_square(forward) {
            if forward.rank() == promotion_rank {
                for promo in PROMOTION_PIECES {
                    moves.push(Move::promotion(from, forward, promo, false));
                }
            } else {
                moves.push(Move::quiet(from, forward));
                if from.rank() == us.pawn_start_rank() {
                    let double = Square::new((rank + 2 * dir) as usize, from.file());
                    if self.is_empty_square(double) {
                        moves.push(Move::double_pawn_push(from, double));
                    }
                }
            }
        }

        // Captures, including en passant
        for df in [-1, 1] {
            let capture_file = file + df;
            if !(0..8).contains(&capture_file) {
                continue;
            }
            let target = Square::new(forward_rank as usize, capture_file as usize);
            if let Some((target_color, _)) = self.piece_at(target) {
                if target_color != us {
                    if target.rank() == promotion_rank {
                        for promo in PROMOTION_PIECES {
                            moves.push(Move::promotion(from, target, promo, true));
                        }
                    } else {
                        moves.push(Move::capture(from, target));
                    }
                }
            } else if Some(target) == self.en_passant_target {
                moves.push(Move::en_passant(from, target));
            }
        }
    }

    /// Captures and promotions only, for quiescence.
    pub(crate) fn generate_pawn_tactical_moves(&self, from: Square, moves: &mut MoveList) {
        let us = self.side_to_move();
        let dir = us.pawn_direction();
        let promotion_rank = us.pawn_promotion_rank();

        let rank = from.rank() as isize;
        let file = from.file() as isize;
        let forward_rank = rank + dir;
        if !(0..8).contains(&forward_rank) {
            return;
        }

        let forward = Square::new(forward_rank as usize, from.file());
        if forward.rank() == promotion_rank && self.is_empty_square(forward) {
            for promo in PROMOTION_PIECES {
                moves.push(Move::promotion(from, forward, promo, false));
            }
        }

        for df in [-1, 1] {
            let capture_file = file + df;
            if !(0..8).contains(&capture_file) {
                continue;
            }
            let target = Square::new(forward_rank as usize, capture_file as usize);
            if let Some((target_color, _)) = self.piece_at(target) {
                if target_color != us {
                    if target.rank() == promotion_rank {
                        for promo in PROMOTION_PIECES {
                            moves.push(Move::promotion(from, target, promo, true));
                        }
                    } else {
                        moves.push(Move::capture(from, target));
                    }
                }
            } else if Some(target) == self.en_passant_target {
                moves.push(Move::en_passant(from, target));
            }
        }
    }
}
