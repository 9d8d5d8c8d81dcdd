//! Iterative deepening driver.

use std::time::Instant;

use crate::board::{Board, Move, Value, VALUE_DRAW, VALUE_INFINITE, VALUE_MATE_IN_MAX_PLY};

use super::alphabeta::SearchContext;
use super::log::{IterationInfo, SearchLogger};
use super::ordering::score_moves;
use super::{terminal_score, Engine, SearchReport, MAX_ITER_DEPTH};

impl Engine {
    /// Search `board` up to `max_depth` plies within `time_ms` milliseconds
    /// of wall clock.
    ///
    /// The board is returned in exactly the state it was given. Use
    /// [`TIME_INFINITE`] for a depth-only search.
    ///
    /// [`TIME_INFINITE`]: super::TIME_INFINITE
    pub fn search(&mut self, board: &mut Board, max_depth: i32, time_ms: u64) -> SearchReport {
        self.search_internal(board, max_depth, time_ms, None)
    }

    /// Like [`search`], reporting each completed iteration to `logger`.
    ///
    /// [`search`]: Engine::search
    pub fn search_with(
        &mut self,
        board: &mut Board,
        max_depth: i32,
        time_ms: u64,
        logger: &mut dyn SearchLogger,
    ) -> SearchReport {
        self.search_internal(board, max_depth, time_ms, Some(logger))
    }

    fn search_internal(
        &mut self,
        board: &mut Board,
        max_depth: i32,
        time_ms: u64,
        mut logger: Option<&mut dyn SearchLogger>,
    ) -> SearchReport {
        // Killers and history are per-search; the transposition table
        // persists across calls
        self.killers.reset();
        self.history.reset();

        let root_moves = board.generate_moves();

        // Short-circuits: nothing to search, or nothing to decide
        if root_moves.is_empty() {
            let in_check = board.in_check(board.side_to_move());
            return SearchReport {
                best_move: Move::NONE,
                score: terminal_score(in_check, 0),
                depth: 0,
                nodes: 0,
            };
        }
        if root_moves.len() == 1 {
            return SearchReport {
                best_move: root_moves[0],
                score: VALUE_DRAW,
                depth: 0,
                nodes: 0,
            };
        }

        let mut ctx = SearchContext {
            board,
            tt: &mut self.tt,
            killers: &mut self.killers,
            history: &mut self.history,
            nodes: 0,
            start: Instant::now(),
            time_limit_ms: time_ms,
            stop: false,
        };

        let mut report = SearchReport {
            best_move: Move::NONE,
            score: VALUE_DRAW,
            depth: 0,
            nodes: 0,
        };
        let mut prev_best = Move::NONE;

        for depth in 1..=max_depth.min(MAX_ITER_DEPTH) {
            if ctx.should_stop() {
                break;
            }

            // Root ordering: the previous iteration's best move plays the
            // role of the hash move
            let mut scored =
                score_moves(ctx.board, &root_moves, prev_best, ctx.killers, ctx.history, 0);

            let mut alpha = -VALUE_INFINITE;
            let beta = VALUE_INFINITE;
            let mut best_move = Move::NONE;
            let mut best_score: Value = -VALUE_INFINITE;

            let mut idx = 0;
            while let Some(mv) = scored.pick_best(idx) {
                idx += 1;

                let info = ctx.board.make_move(mv);
                let score = -ctx.alphabeta(depth - 1, -beta, -alpha, 1, true);
                ctx.board.unmake_move(mv, info);

                if ctx.should_stop() {
                    break;
                }

                if score > best_score {
                    best_score = score;
                    best_move = mv;
                    if score > alpha {
                        alpha = score;
                    }
                }
            }

            // Only a fully scanned iteration may update the committed
            // result; a partial scan under time pressure is discarded
            if !ctx.stop && best_move != Move::NONE {
                report = SearchReport {
                    best_move,
                    score: best_score,
                    depth,
                    nodes: ctx.nodes,
                };
                prev_best = best_move;

                if let Some(logger) = logger.as_deref_mut() {
                    let elapsed = ctx.start.elapsed().as_millis() as u64;
                    let nps = if elapsed > 0 {
                        ctx.nodes * 1000 / elapsed
                    } else {
                        0
                    };
                    logger.iteration(&IterationInfo {
                        depth,
                        score: best_score,
                        best_move,
                        nodes: ctx.nodes,
                        nps,
                        time_ms: elapsed,
                    });
                }
            }

            // A forced mate cannot improve with more depth
            if best_score.abs() >= VALUE_MATE_IN_MAX_PLY {
                break;
            }
        }

        report.nodes = ctx.nodes;
        report
    }
}
