use std::collections::HashMap;

use super::types::{
    Bitboard, Color, Piece, Square, CASTLE_BLACK_K, CASTLE_BLACK_Q, CASTLE_WHITE_K, CASTLE_WHITE_Q,
};

/// Per-move scratch block consumed by `make_move` and returned to
/// `unmake_move`. One instance lives on each recursion frame.
#[derive(Clone, Debug)]
pub struct UnmakeInfo {
    pub(crate) captured: Option<(Color, Piece)>,
    pub(crate) prev_en_passant: Option<Square>,
    pub(crate) prev_castling_rights: u8,
    pub(crate) prev_hash: u64,
    pub(crate) prev_halfmove_clock: u32,
    pub(crate) made_hash: u64,
    pub(crate) prev_repetition_count: u32,
}

/// Scratch block for a null move.
#[derive(Clone, Debug)]
pub struct NullMoveInfo {
    pub(crate) prev_en_passant: Option<Square>,
    pub(crate) prev_hash: u64,
}

#[derive(Clone, Debug)]
pub(crate) struct RepetitionTable {
    counts: HashMap<u64, u32>,
}

impl RepetitionTable {
    pub(crate) fn new() -> Self {
        RepetitionTable {
            counts: HashMap::new(),
        }
    }

    pub(crate) fn get(&self, hash: u64) -> u32 {
        self.counts.get(&hash).copied().unwrap_or(0)
    }

    pub(crate) fn set(&mut self, hash: u64, count: u32) {
        if count == 0 {
            self.counts.remove(&hash);
        } else {
            self.counts.insert(hash, count);
        }
    }

    pub(crate) fn increment(&mut self, hash: u64) {
        let next = self.get(hash).saturating_add(1);
        self.set(hash, next);
    }
}

/// Full game state: piece placement, side to move, castling rights,
/// en-passant target, clocks, Zobrist hash, and repetition counts.
#[derive(Clone, Debug)]
pub struct Board {
    pub(crate) pieces: [[Bitboard; 6]; 2],
    pub(crate) occupied: [Bitboard; 2],
    pub(crate) all_occupied: Bitboard,
    pub(crate) white_to_move: bool,
    pub(crate) en_passant_target: Option<Square>,
    pub(crate) castling_rights: u8,
    pub(crate) hash: u64,
    pub(crate) halfmove_clock: u32,
    pub(crate) game_ply: u32,
    pub(crate) repetition_counts: RepetitionTable,
}

impl Board {
    /// The standard starting position.
    #[must_use]
    pub fn new() -> Self {
        let mut board = Board::empty();
        let back_rank = [
            Piece::Rook,
            Piece::Knight,
            Piece::Bishop,
            Piece::Queen,
            Piece::King,
            Piece::Bishop,
            Piece::Knight,
            Piece::Rook,
        ];
        for (file, piece) in back_rank.iter().enumerate() {
            board.set_piece(Square::new(0, file), Color::White, *piece);
            board.set_piece(Square::new(7, file), Color::Black, *piece);
            board.set_piece(Square::new(1, file), Color::White, Piece::Pawn);
            board.set_piece(Square::new(6, file), Color::Black, Piece::Pawn);
        }

        board.castling_rights = CASTLE_WHITE_K | CASTLE_WHITE_Q | CASTLE_BLACK_K | CASTLE_BLACK_Q;
        board.hash = board.calculate_hash();
        board.repetition_counts.set(board.hash, 1);
        board
    }

    pub(crate) fn empty() -> Self {
        Board {
            pieces: [[Bitboard::EMPTY; 6]; 2],
            occupied: [Bitboard::EMPTY; 2],
            all_occupied: Bitboard::EMPTY,
            white_to_move: true,
            en_passant_target: None,
            castling_rights: 0,
            hash: 0,
            halfmove_clock: 0,
            game_ply: 0,
            repetition_counts: RepetitionTable::new(),
        }
    }

    /// The current Zobrist hash.
    #[must_use]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    #[must_use]
    pub fn white_to_move(&self) -> bool {
        self.white_to_move
    }

    /// The color to move.
    #[must_use]
    pub fn side_to_move(&self) -> Color {
        if self.white_to_move {
            Color::White
        } else {
            Color::Black
        }
    }

    /// Plies played since the move counters started (fifty-move rule).
    #[must_use]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    /// Plies played since the start of the game.
    #[must_use]
    pub fn game_ply(&self) -> u32 {
        self.game_ply
    }

    /// True if the current position occurred earlier on the move path.
    ///
    /// The search treats a single recurrence as a draw; waiting for a full
    /// threefold inside the tree only wastes nodes.
    #[must_use]
    pub fn is_repetition(&self) -> bool {
        self.repetition_counts.get(self.hash) > 1
    }

    /// Game-level draw: fifty-move rule, threefold repetition, or
    /// insufficient mating material.
    #[must_use]
    pub fn is_draw(&self) -> bool {
        self.halfmove_clock >= 100
            || self.repetition_counts.get(self.hash) >= 3
            || self.is_insufficient_material()
    }

    fn is_insufficient_material(&self) -> bool {
        let white = Color::White.index();
        let black = Color::Black.index();

        let majors_or_pawns = [Piece::Pawn, Piece::Rook, Piece::Queen]
            .iter()
            .any(|p| !(self.pieces[white][p.index()] | self.pieces[black][p.index()]).is_empty());
        if majors_or_pawns {
            return false;
        }

        let knights = self.pieces[white][Piece::Knight.index()]
            | self.pieces[black][Piece::Knight.index()];
        let bishops = self.pieces[white][Piece::Bishop.index()]
            | self.pieces[black][Piece::Bishop.index()];
        let minors = knights.popcount() + bishops.popcount();

        if minors <= 1 {
            return true;
        }

        // Two bishops on the same square color cannot force mate
        if knights.is_empty() && bishops.popcount() == 2 {
            return (bishops & Bitboard::LIGHT_SQUARES).is_empty()
                || (bishops & Bitboard::DARK_SQUARES).is_empty();
        }

        false
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}
