//! Draw detection tests.

use crate::board::Board;

fn apply_uci(board: &mut Board, uci: &str) {
    let mv = board.parse_move(uci).expect("uci move should be legal");
    board.make_move(mv);
}

#[test]
fn test_fifty_move_rule_draw() {
    let board = Board::from_fen("8/8/8/8/8/8/8/K1k5 w - - 100 1");
    assert!(board.is_draw());
}

#[test]
fn test_halfmove_just_below_threshold() {
    let board = Board::from_fen("8/8/8/4r3/8/8/8/K1k5 w - - 99 1");
    assert!(!board.is_draw());
}

#[test]
fn test_threefold_repetition() {
    let mut board = Board::new();
    for _ in 0..2 {
        apply_uci(&mut board, "g1f3");
        apply_uci(&mut board, "g8f6");
        apply_uci(&mut board, "f3g1");
        apply_uci(&mut board, "f6g8");
    }
    // Startpos has now occurred three times
    assert!(board.is_draw());
}

#[test]
fn test_single_repetition_flags_search_draw() {
    let mut board = Board::new();
    apply_uci(&mut board, "g1f3");
    apply_uci(&mut board, "g8f6");
    assert!(!board.is_repetition());
    apply_uci(&mut board, "f3g1");
    apply_uci(&mut board, "f6g8");
    // Second occurrence of the start position
    assert!(board.is_repetition());
    assert!(!board.is_draw());
}

#[test]
fn test_insufficient_material_bare_kings() {
    let board = Board::from_fen("8/8/8/8/8/8/8/K1k5 w - - 0 1");
    assert!(board.is_draw());
}

#[test]
fn test_insufficient_material_single_minor() {
    assert!(Board::from_fen("8/8/8/8/8/8/6N1/K1k5 w - - 0 1").is_draw());
    assert!(Board::from_fen("8/8/8/8/8/8/6b1/K1k5 w - - 0 1").is_draw());
}

#[test]
fn test_same_colored_bishops_draw() {
    // b2 and f2 are both dark squares
    let board = Board::from_fen("8/8/8/8/8/8/1B3b2/K1k5 w - - 0 1");
    assert!(board.is_draw());
}

#[test]
fn test_opposite_colored_bishops_not_insufficient() {
    // b2 is dark, g2 is light
    let board = Board::from_fen("8/8/8/8/8/8/1B4b1/K1k5 w - - 0 1");
    assert!(!board.is_draw());
}

#[test]
fn test_pawn_prevents_material_draw() {
    let board = Board::from_fen("8/8/8/8/8/8/4P3/K1k5 w - - 0 1");
    assert!(!board.is_draw());
}

#[test]
fn test_unmake_restores_repetition_counts() {
    let mut board = Board::new();
    let mv = board.parse_move("e2e4").expect("legal");
    let info = board.make_move(mv);
    let made_hash = board.hash();
    board.unmake_move(mv, info);

    // Replaying the move must not see a phantom prior occurrence
    let mv = board.parse_move("e2e4").expect("legal");
    board.make_move(mv);
    assert_eq!(board.hash(), made_hash);
    assert!(!board.is_repetition());
}
