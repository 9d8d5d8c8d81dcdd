//! Property-based tests over random legal move walks.

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::board::{Board, Move, UnmakeInfo};

fn random_walk(board: &mut Board, rng: &mut StdRng, max_moves: usize) -> Vec<(Move, UnmakeInfo)> {
    let mut history = Vec::new();
    for _ in 0..max_moves {
        let moves = board.generate_moves();
        if moves.is_empty() {
            break;
        }
        let mv = moves[rng.gen_range(0..moves.len())];
        let info = board.make_move(mv);
        history.push((mv, info));
    }
    history
}

proptest! {
    /// make_move followed by unmake_move restores the position exactly.
    #[test]
    fn prop_make_unmake_restores_state(seed in any::<u64>(), num_moves in 1..=24usize) {
        let mut board = Board::new();
        let mut rng = StdRng::seed_from_u64(seed);

        let initial_hash = board.hash();
        let initial_fen = board.to_fen();

        let mut history = random_walk(&mut board, &mut rng, num_moves);
        while let Some((mv, info)) = history.pop() {
            board.unmake_move(mv, info);
        }

        prop_assert_eq!(board.hash(), initial_hash);
        prop_assert_eq!(board.to_fen(), initial_fen);
    }

    /// The incremental hash always matches a from-scratch recomputation.
    #[test]
    fn prop_incremental_hash_matches_recomputation(seed in any::<u64>(), num_moves in 1..=24usize) {
        let mut board = Board::new();
        let mut rng = StdRng::seed_from_u64(seed);

        for _ in 0..num_moves {
            let moves = board.generate_moves();
            if moves.is_empty() {
                break;
            }
            let mv = moves[rng.gen_range(0..moves.len())];
            board.make_move(mv);
            prop_assert_eq!(board.hash(), board.calculate_hash());
        }
    }

    /// Generated moves never leave the mover's king attacked.
    #[test]
    fn prop_legal_moves_are_legal(seed in any::<u64>()) {
        let mut board = Board::new();
        let mut rng = StdRng::seed_from_u64(seed);

        for _ in 0..10 {
            let moves = board.generate_moves();
            if moves.is_empty() {
                break;
            }

            let us = board.side_to_move();
            for &mv in &moves {
                let info = board.make_move(mv);
                prop_assert!(!board.in_check(us), "legal move left king in check: {:?}", mv);
                board.unmake_move(mv, info);
            }

            let mv = moves[rng.gen_range(0..moves.len())];
            board.make_move(mv);
        }
    }

    /// FEN round-trip preserves the position.
    #[test]
    fn prop_fen_round_trip(seed in any::<u64>(), num_moves in 1..=24usize) {
        let mut board = Board::new();
        let mut rng = StdRng::seed_from_u64(seed);
        let _ = random_walk(&mut board, &mut rng, num_moves);

        let fen = board.to_fen();
        let restored = Board::from_fen(&fen);

        prop_assert_eq!(board.hash(), restored.hash());
        prop_assert_eq!(fen, restored.to_fen());
    }
}
