//! The alpha-beta core and quiescence search.

use std::time::Instant;

use crate::board::{
    Board, Move, Value, MAX_PLY, VALUE_DRAW, VALUE_INFINITE,
};

use super::ordering::score_moves;
use super::tt::{Bound, TranspositionTable};
use super::{terminal_score, HistoryTable, KillerTable};

/// How often the wall clock is consulted, in nodes.
const TIME_CHECK_INTERVAL: u64 = 2048;

/// Mutable state threaded through one top-level search.
pub(crate) struct SearchContext<'a> {
    pub board: &'a mut Board,
    pub tt: &'a mut TranspositionTable,
    pub killers: &'a mut KillerTable,
    pub history: &'a mut HistoryTable,
    pub nodes: u64,
    pub start: Instant,
    pub time_limit_ms: u64,
    pub stop: bool,
}

impl SearchContext<'_> {
    /// Poll the deadline every [`TIME_CHECK_INTERVAL`] nodes. Once `stop`
    /// latches, every frame unwinds without committing results.
    pub(crate) fn should_stop(&mut self) -> bool {
        if self.nodes % TIME_CHECK_INTERVAL == 0
            && self.start.elapsed().as_millis() as u64 >= self.time_limit_ms
        {
            self.stop = true;
        }
        self.stop
    }

    /// Negamax alpha-beta.
    ///
    /// `depth` may drop to zero or below, which delegates to quiescence.
    /// `do_null` gates null-move pruning so two null moves are never
    /// played back to back.
    pub(crate) fn alphabeta(
        &mut self,
        depth: i32,
        mut alpha: Value,
        beta: Value,
        ply: usize,
        do_null: bool,
    ) -> Value {
        if self.should_stop() {
            return VALUE_DRAW;
        }

        if ply >= MAX_PLY - 1 {
            return self.board.evaluate();
        }

        if depth <= 0 {
            return self.qsearch(alpha, beta, ply);
        }

        self.nodes += 1;

        // Interior draws; the root must always produce a move
        if ply > 0 && (self.board.is_repetition() || self.board.halfmove_clock() >= 100) {
            return VALUE_DRAW;
        }

        let key = self.board.hash();
        let original_alpha = alpha;

        let mut tt_move = Move::NONE;
        if let Some(entry) = self.tt.probe(key) {
            tt_move = entry.best_move();
            if entry.depth() >= depth {
                match entry.bound() {
                    Bound::Exact => return entry.value(),
                    Bound::Lower if entry.value() >= beta => return beta,
                    Bound::Upper if entry.value() <= alpha => return alpha,
                    _ => {}
                }
            }
        }

        let us = self.board.side_to_move();
        let in_check = self.board.in_check(us);

        // Null-move pruning: hand the opponent a free move with a reduced
        // depth and a null window around beta. Unsound in zugzwang, which
        // this engine accepts.
        if do_null && !in_check && depth >= 3 && ply > 0 {
            let info = self.board.make_null_move();
            let null_score = -self.alphabeta(depth - 3, -beta, -beta + 1, ply + 1, false);
            self.board.unmake_null_move(info);

            if null_score >= beta {
                return beta;
            }
        }

        let moves = self.board.generate_moves();
        if moves.is_empty() {
            return terminal_score(in_check, ply);
        }

        let mut scored = score_moves(self.board, &moves, tt_move, self.killers, self.history, ply);

        let mut best_score = -VALUE_INFINITE;
        let mut best_move = Move::NONE;

        let mut idx = 0;
        while let Some(mv) = scored.pick_best(idx) {
            idx += 1;

            let info = self.board.make_move(mv);
            let score = -self.alphabeta(depth - 1, -beta, -alpha, ply + 1, true);
            self.board.unmake_move(mv, info);

            if self.should_stop() {
                return best_score;
            }

            if score > best_score {
                best_score = score;
                best_move = mv;

                if score > alpha {
                    alpha = score;

                    if alpha >= beta {
                        if !mv.is_capture() {
                            self.killers.update(ply, mv);
                            self.history.update(us, mv, depth);
                        }
                        break;
                    }
                }
            }
        }

        if !self.stop {
            let bound = if best_score <= original_alpha {
                Bound::Upper
            } else if best_score >= beta {
                Bound::Lower
            } else {
                Bound::Exact
            };
            self.tt.store(key, best_move, best_score, depth, bound);
        }

        best_score
    }

    /// Quiescence search: stand pat, then captures only, or all evasions
    /// when in check. Fail-hard bounds.
    pub(crate) fn qsearch(&mut self, mut alpha: Value, beta: Value, ply: usize) -> Value {
        if ply >= MAX_PLY - 1 {
            return self.board.evaluate();
        }

        self.nodes += 1;

        let stand_pat = self.board.evaluate();
        if stand_pat >= beta {
            return beta;
        }
        if stand_pat > alpha {
            alpha = stand_pat;
        }

        let us = self.board.side_to_move();
        let in_check = self.board.in_check(us);

        // Restricting to captures while in check would miss quiet defenses;
        // the legal move list is exactly the evasion set there
        let moves = if in_check {
            self.board.generate_moves()
        } else {
            self.board.generate_captures()
        };

        let mut scored =
            score_moves(self.board, &moves, Move::NONE, self.killers, self.history, ply);

        let mut idx = 0;
        while let Some(mv) = scored.pick_best(idx) {
            idx += 1;

            // Capture generation is pseudo-legal; skip anything that leaves
            // our king hanging
            let info = self.board.make_move(mv);
            if self.board.in_check(us) {
                self.board.unmake_move(mv, info);
                continue;
            }
            let score = -self.qsearch(-beta, -alpha, ply + 1);
            self.board.unmake_move(mv, info);

            if score >= beta {
                return beta;
            }
            if score > alpha {
                alpha = score;
            }
        }

        alpha
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{mated_in, VALUE_MATE_IN_MAX_PLY};
    use crate::search::Engine;

    fn context<'a>(engine: &'a mut Engine, board: &'a mut Board) -> SearchContext<'a> {
        SearchContext {
            board,
            tt: &mut engine.tt,
            killers: &mut engine.killers,
            history: &mut engine.history,
            nodes: 0,
            start: Instant::now(),
            time_limit_ms: crate::search::TIME_INFINITE,
            stop: false,
        }
    }

    #[test]
    fn test_full_window_result_is_inside_window() {
        let mut engine = Engine::new(1024);
        let mut board = Board::new();
        let mut ctx = context(&mut engine, &mut board);
        let score = ctx.alphabeta(3, -VALUE_INFINITE, VALUE_INFINITE, 0, true);
        assert!(score.abs() < VALUE_MATE_IN_MAX_PLY);
    }

    #[test]
    fn test_window_bounds_on_fail() {
        // White is a queen up; a narrow window around zero must fail high
        let mut engine = Engine::new(1024);
        let mut board = Board::from_fen("4k3/8/8/8/8/8/8/Q3K3 w - - 0 1");
        let mut ctx = context(&mut engine, &mut board);
        let score = ctx.alphabeta(3, -50, 50, 0, true);
        assert!(score >= 50, "fail-high must return at least beta: {score}");

        // And from the other side it must fail low
        let mut engine = Engine::new(1024);
        let mut board = Board::from_fen("4k3/8/8/8/8/8/8/Q3K3 b - - 0 1");
        let mut ctx = context(&mut engine, &mut board);
        let score = ctx.alphabeta(3, -50, 50, 0, true);
        assert!(score <= -50, "fail-low must return at most alpha: {score}");
    }

    #[test]
    fn test_checkmate_score_at_root_frame() {
        // Black is already mated; alphabeta at ply 0 reports mated_in(0)
        let mut engine = Engine::new(1024);
        let mut board = Board::from_fen("7k/6Q1/5K2/8/8/8/8/8 b - - 0 1");
        let mut ctx = context(&mut engine, &mut board);
        let score = ctx.alphabeta(2, -VALUE_INFINITE, VALUE_INFINITE, 0, true);
        assert_eq!(score, mated_in(0));
    }

    #[test]
    fn test_stalemate_scores_draw() {
        let mut engine = Engine::new(1024);
        let mut board = Board::from_fen("k7/8/1QK5/8/8/8/8/8 b - - 0 1");
        let mut ctx = context(&mut engine, &mut board);
        let score = ctx.alphabeta(2, -VALUE_INFINITE, VALUE_INFINITE, 0, true);
        assert_eq!(score, VALUE_DRAW);
    }

    #[test]
    fn test_qsearch_stand_pat_bounds() {
        // Quiet equal position: quiescence returns the raised alpha
        let mut engine = Engine::new(1024);
        let mut board = Board::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1");
        let mut ctx = context(&mut engine, &mut board);
        let score = ctx.qsearch(-VALUE_INFINITE, VALUE_INFINITE, 0);
        assert_eq!(score, board_eval("4k3/8/8/8/8/8/8/4K3 w - - 0 1"));
    }

    fn board_eval(fen: &str) -> Value {
        Board::from_fen(fen).evaluate()
    }

    #[test]
    fn test_qsearch_resolves_hanging_queen() {
        // White queen en prise to the pawn: quiescence must see the capture
        let mut engine = Engine::new(1024);
        let mut board = Board::from_fen("4k3/3p4/4Q3/8/8/8/8/4K3 b - - 0 1");
        let stand_pat = board.evaluate();
        let mut ctx = context(&mut engine, &mut board);
        let score = ctx.qsearch(-VALUE_INFINITE, VALUE_INFINITE, 0);
        assert!(
            score > stand_pat + 700,
            "taking the queen should beat standing pat: {score} vs {stand_pat}"
        );
    }

    #[test]
    fn test_ply_ceiling_returns_static_eval() {
        let mut engine = Engine::new(1024);
        let mut board = Board::new();
        let expected = board.evaluate();
        let mut ctx = context(&mut engine, &mut board);
        let score = ctx.alphabeta(5, -VALUE_INFINITE, VALUE_INFINITE, MAX_PLY - 1, true);
        assert_eq!(score, expected);
        assert_eq!(ctx.nodes, 0, "no nodes searched at the ply ceiling");
    }

    #[test]
    fn test_board_unchanged_by_alphabeta() {
        let mut engine = Engine::new(1024);
        let mut board = Board::new();
        let before = board.to_fen();
        let mut ctx = context(&mut engine, &mut board);
        ctx.alphabeta(4, -VALUE_INFINITE, VALUE_INFINITE, 0, true);
        assert_eq!(board.to_fen(), before);
    }
}
