//! Zobrist hashing keys.
//!
//! One random 64-bit key per (color, piece, square), per castling-rights
//! mask, per en-passant file, and one for the side to move. A position hash
//! is the XOR of the keys for every feature present.

use once_cell::sync::Lazy;
use rand::Rng;

pub(crate) struct ZobristKeys {
    pub piece: [[[u64; 64]; 6]; 2],
    pub castling: [u64; 16],
    pub en_passant: [u64; 8],
    pub side_to_move: u64,
}

pub(crate) static ZOBRIST: Lazy<ZobristKeys> = Lazy::new(|| {
    let mut rng = rand::thread_rng();

    let mut piece = [[[0u64; 64]; 6]; 2];
    for color in &mut piece {
        for kind in color.iter_mut() {
            for sq in kind.iter_mut() {
                *sq = rng.gen();
            }
        }
    }

    let mut castling = [0u64; 16];
    for key in &mut castling {
        *key = rng.gen();
    }

    let mut en_passant = [0u64; 8];
    for key in &mut en_passant {
        *key = rng.gen();
    }

    ZobristKeys {
        piece,
        castling,
        en_passant,
        side_to_move: rng.gen(),
    }
});
