//! Quiescence: resolve captures, promotions, and checks past the
//! nominal horizon so the evaluation never lands mid-exchange.
//!
//! Out of check the node stands pat on the static evaluation, cutting
//! on beta, raising alpha, or bailing out when even a huge swing (a
//! queen, 900) could not lift the score back to alpha. In check every
//! legal move is examined instead. The selective scan covers the
//! ordered buffer up to the generator's check cursor: promotions and
//! captures recurse, check-giving quiets are probed only for mate.
//! The draw rules apply inside the loop exactly as in the main search,
//! and the ply cap protects the stack.

use crate::engine::Engine;
use crate::move_types::Move;
use crate::movegen::generate;
use crate::search::{MATE_VALUE, MAX_DEPTH};

impl Engine {
    /// Leaf evaluation with tactical resolution, fail-hard in
    /// `[alpha, beta]`. `in_check` is the move's check flag (or the
    /// root probe), not recomputed here.
    pub fn quiescence(&mut self, mut alpha: i32, beta: i32, ply: u32, in_check: bool) -> i32 {
        if !in_check {
            let v = self.static_eval(ply);
            if v >= beta {
                return beta;
            } else if v > alpha {
                alpha = v;
            } else if v < alpha - 900 {
                return alpha;
            }
        }

        if (ply as usize) < MAX_DEPTH {
            let list = generate(&mut self.board, Move::NULL, true);
            let count = list.len();
            if count == 0 {
                return if in_check { -(MATE_VALUE - ply as i32) } else { 0 };
            }
            let (recurse_end, scan_end) = if in_check {
                (count, count)
            } else {
                (list.last_capture, list.last_check)
            };

            for i in 0..scan_end {
                let mv = list.moves[i];
                let undo = self.board.snapshot();
                self.board.apply_full(mv, &self.zobrist);
                self.nodes += 1;
                let v = if self.board.fifty >= 100 || self.board.repetition_sloppy() {
                    0
                } else if i < recurse_end {
                    -self.quiescence(-beta, -alpha, ply + 1, mv.gives_check())
                } else {
                    // Check-giving quiet: worth a reply probe for mate,
                    // nothing more at the leaf.
                    let mut v = alpha;
                    if mv.gives_check() {
                        let replies = generate(&mut self.board, Move::NULL, false);
                        if replies.is_empty() {
                            v = MATE_VALUE - ply as i32;
                        }
                    }
                    v
                };
                self.board.undo_full(mv, undo);

                if v >= beta {
                    return beta;
                } else if v > alpha {
                    alpha = v;
                }
            }
        }

        alpha
    }
}
