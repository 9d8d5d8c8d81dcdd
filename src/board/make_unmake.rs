use crate::zobrist::ZOBRIST;

use super::state::{NullMoveInfo, UnmakeInfo};
use super::types::{castle_bit, Bitboard, Color, Move, Piece, Square};
use super::Board;

impl Board {
    pub(crate) fn has_castling_right(&self, color: Color, kingside: bool) -> bool {
        self.castling_rights & castle_bit(color, kingside) != 0
    }

    pub(crate) fn set_piece(&mut self, sq: Square, color: Color, piece: Piece) {
        let bit = Bitboard::from_square(sq);
        self.pieces[color.index()][piece.index()] |= bit;
        self.occupied[color.index()] |= bit;
        self.all_occupied |= bit;
    }

    pub(crate) fn remove_piece(&mut self, sq: Square, color: Color, piece: Piece) {
        let bit = Bitboard::from_square(sq);
        self.pieces[color.index()][piece.index()] &= !bit;
        self.occupied[color.index()] &= !bit;
        self.all_occupied &= !bit;
    }

    /// Color and piece kind on a square, if occupied.
    #[must_use]
    pub fn piece_at(&self, sq: Square) -> Option<(Color, Piece)> {
        let bit = Bitboard::from_square(sq);
        if (self.all_occupied & bit).is_empty() {
            return None;
        }
        let color = if !(self.occupied[Color::White.index()] & bit).is_empty() {
            Color::White
        } else {
            Color::Black
        };
        for p_idx in 0..6 {
            if !(self.pieces[color.index()][p_idx] & bit).is_empty() {
                return Some((color, Piece::from_index(p_idx)));
            }
        }
        None
    }

    /// Piece kind on a square, ignoring color.
    #[must_use]
    pub fn piece_on(&self, sq: Square) -> Option<Piece> {
        self.piece_at(sq).map(|(_, piece)| piece)
    }

    pub(crate) fn is_empty_square(&self, sq: Square) -> bool {
        (self.all_occupied & Bitboard::from_square(sq)).is_empty()
    }

    /// Recompute the Zobrist hash from scratch. Used when constructing a
    /// position; incremental updates keep it current afterwards.
    pub(crate) fn calculate_hash(&self) -> u64 {
        let mut hash = 0u64;

        for color in [Color::White, Color::Black] {
            for piece in Piece::ALL {
                for sq in self.pieces[color.index()][piece.index()].iter() {
                    hash ^= ZOBRIST.piece[color.index()][piece.index()][sq.as_index()];
                }
            }
        }

        if !self.white_to_move {
            hash ^= ZOBRIST.side_to_move;
        }
        hash ^= ZOBRIST.castling[self.castling_rights as usize];
        if let Some(ep) = self.en_passant_target {
            hash ^= ZOBRIST.en_passant[ep.file()];
        }

        hash
    }

    /// Play `mv`, updating the hash incrementally. The returned
    /// [`UnmakeInfo`] must be handed back to the matching [`unmake_move`]
    /// call; make/unmake pairs nest strictly.
    ///
    /// [`unmake_move`]: Board::unmake_move
    pub fn make_move(&mut self, mv: Move) -> UnmakeInfo {
        let us = self.side_to_move();
        let from = mv.from();
        let to = mv.to();

        let prev_en_passant = self.en_passant_target;
        let prev_castling_rights = self.castling_rights;
        let prev_hash = self.hash;
        let prev_halfmove_clock = self.halfmove_clock;

        let mut hash = self.hash;
        hash ^= ZOBRIST.side_to_move;
        if let Some(ep) = self.en_passant_target {
            hash ^= ZOBRIST.en_passant[ep.file()];
        }

        let mut captured: Option<(Color, Piece)> = None;
        if mv.is_en_passant() {
            // The captured pawn sits beside the destination, not on it
            let cap_sq = Square::new(from.rank(), to.file());
            captured = self.piece_at(cap_sq);
            if let Some((c, p)) = captured {
                self.remove_piece(cap_sq, c, p);
                hash ^= ZOBRIST.piece[c.index()][p.index()][cap_sq.as_index()];
            }
        } else if !mv.is_castling() {
            captured = self.piece_at(to);
            if let Some((c, p)) = captured {
                self.remove_piece(to, c, p);
                hash ^= ZOBRIST.piece[c.index()][p.index()][to.as_index()];
            }
        }

        let (_, moving_piece) = self.piece_at(from).expect("make_move 'from' square empty");
        self.remove_piece(from, us, moving_piece);
        hash ^= ZOBRIST.piece[us.index()][moving_piece.index()][from.as_index()];

        if mv.is_castling() {
            self.set_piece(to, us, Piece::King);
            hash ^= ZOBRIST.piece[us.index()][Piece::King.index()][to.as_index()];

            let (rook_from_file, rook_to_file) = if to.file() == 6 { (7, 5) } else { (0, 3) };
            let rook_from = Square::new(to.rank(), rook_from_file);
            let rook_to = Square::new(to.rank(), rook_to_file);
            self.remove_piece(rook_from, us, Piece::Rook);
            self.set_piece(rook_to, us, Piece::Rook);
            hash ^= ZOBRIST.piece[us.index()][Piece::Rook.index()][rook_from.as_index()];
            hash ^= ZOBRIST.piece[us.index()][Piece::Rook.index()][rook_to.as_index()];
        } else {
            let placed = mv.promoted_piece().unwrap_or(moving_piece);
            self.set_piece(to, us, placed);
            hash ^= ZOBRIST.piece[us.index()][placed.index()][to.as_index()];
        }

        self.en_passant_target = None;
        if mv.is_double_pawn_push() {
            let ep_sq = Square::new(usize::midpoint(from.rank(), to.rank()), from.file());
            self.en_passant_target = Some(ep_sq);
            hash ^= ZOBRIST.en_passant[ep_sq.file()];
        }

        if moving_piece == Piece::Pawn || mv.is_capture() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock = self.halfmove_clock.saturating_add(1);
        }

        self.update_castling_rights(us, moving_piece, from, to, captured);
        if self.castling_rights != prev_castling_rights {
            hash ^= ZOBRIST.castling[prev_castling_rights as usize];
            hash ^= ZOBRIST.castling[self.castling_rights as usize];
        }

        self.white_to_move = !self.white_to_move;
        self.game_ply += 1;
        self.hash = hash;

        let prev_repetition_count = self.repetition_counts.get(hash);
        self.repetition_counts.increment(hash);

        UnmakeInfo {
            captured,
            prev_en_passant,
            prev_castling_rights,
            prev_hash,
            prev_halfmove_clock,
            made_hash: hash,
            prev_repetition_count,
        }
    }

    fn update_castling_rights(
        &mut self,
        us: Color,
        moving_piece: Piece,
        from: Square,
        to: Square,
        captured: Option<(Color, Piece)>,
    ) {
        if moving_piece == Piece::King {
            self.castling_rights &= !(castle_bit(us, true) | castle_bit(us, false));
        } else if moving_piece == Piece::Rook {
            if from == Square::new(us.back_rank(), 0) {
                self.castling_rights &= !castle_bit(us, false);
            } else if from == Square::new(us.back_rank(), 7) {
                self.castling_rights &= !castle_bit(us, true);
            }
        }

        if let Some((them, Piece::Rook)) = captured {
            if to == Square::new(them.back_rank(), 0) {
                self.castling_rights &= !castle_bit(them, false);
            } else if to == Square::new(them.back_rank(), 7) {
                self.castling_rights &= !castle_bit(them, true);
            }
        }
    }

    /// Take back `mv`. `info` must come from the matching [`make_move`] call.
    ///
    /// [`make_move`]: Board::make_move
    pub fn unmake_move(&mut self, mv: Move, info: UnmakeInfo) {
        self.repetition_counts
            .set(info.made_hash, info.prev_repetition_count);

        self.white_to_move = !self.white_to_move;
        self.game_ply -= 1;
        self.en_passant_target = info.prev_en_passant;
        self.castling_rights = info.prev_castling_rights;
        self.hash = info.prev_hash;
        self.halfmove_clock = info.prev_halfmove_clock;

        let us = self.side_to_move();
        let from = mv.from();
        let to = mv.to();

        if mv.is_castling() {
            self.remove_piece(to, us, Piece::King);
            self.set_piece(from, us, Piece::King);

            let (rook_from_file, rook_to_file) = if to.file() == 6 { (7, 5) } else { (0, 3) };
            self.remove_piece(Square::new(to.rank(), rook_to_file), us, Piece::Rook);
            self.set_piece(Square::new(to.rank(), rook_from_file), us, Piece::Rook);
            return;
        }

        let (_, placed) = self.piece_at(to).expect("unmake_move 'to' square empty");
        self.remove_piece(to, us, placed);
        let original = if mv.is_promotion() { Piece::Pawn } else { placed };
        self.set_piece(from, us, original);

        if mv.is_en_passant() {
            if let Some((c, p)) = info.captured {
                self.set_piece(Square::new(from.rank(), to.file()), c, p);
            }
        } else if let Some((c, p)) = info.captured {
            self.set_piece(to, c, p);
        }
    }

    /// Pass the move: flip the side to move without touching any piece.
    /// Must not be called while in check.
    pub fn make_null_move(&mut self) -> NullMoveInfo {
        let prev_hash = self.hash;
        let prev_en_passant = self.en_passant_target;

        let mut hash = self.hash;
        hash ^= ZOBRIST.side_to_move;
        if let Some(ep) = self.en_passant_target {
            hash ^= ZOBRIST.en_passant[ep.file()];
        }

        self.en_passant_target = None;
        self.white_to_move = !self.white_to_move;
        self.hash = hash;

        NullMoveInfo {
            prev_en_passant,
            prev_hash,
        }
    }

    /// Take back a null move.
    pub fn unmake_null_move(&mut self, info: NullMoveInfo) {
        self.white_to_move = !self.white_to_move;
        self.en_passant_target = info.prev_en_passant;
        self.hash = info.prev_hash;
    }
}
