//! Fail-hard negamax alpha-beta with null-move pruning, principal-
//! variation search, tactical extensions, and transposition cuts.
//!
//! Order of business at a node: draw claims first (fifty-move rule or
//! first-repeat repetition), then the check extension, then the
//! transposition probe, and only then generation. An empty move list is
//! mate or stalemate scored at this ply. With two or fewer replies the
//! horizon extends a ply while the extension budget lasts; a single
//! forced reply that does not improve its placement extends as well,
//! and at the marker ply the extension is given back. The null move is
//! tried only out of check with at least four replies, at reduced
//! depth and a zero-width window. The first improving move is searched
//! with the full window; later moves get a null window and a re-search
//! only when they land inside it. Fail-highs store a BETA bound and
//! the killer; the final score stores EXACT or ALPHA with the
//! principal move.

use crate::engine::Engine;
use crate::eval::PLACE_MINOR;
use crate::move_types::Move;
use crate::movegen::generate;
use crate::search::{MATE_VALUE, MAX_DEPTH};
use crate::transposition::Bound;

impl Engine {
    /// Search to `depth_max` plies, returning a score clamped to
    /// `[alpha, beta]`. `ext` is the retraction marker of the last
    /// forced-move extension granted above this node.
    pub fn search(
        &mut self,
        mut alpha: i32,
        beta: i32,
        ply: u32,
        mut depth_max: u32,
        null_ok: bool,
        in_check: bool,
        mut ext: u32,
    ) -> i32 {
        debug_assert!(ply <= depth_max);
        debug_assert!(-32767 <= alpha && alpha <= beta && beta <= 32767);

        self.nodes += 1;

        if self.board.fifty >= 100 || self.board.repetition_sloppy() {
            return 0;
        }

        if in_check {
            depth_max += 1;
        }

        if let Some(v) = self.tt.lookup(
            self.board.key,
            ply,
            depth_max,
            alpha,
            beta,
            &mut self.killers,
        ) {
            return v;
        }

        if ply >= depth_max {
            return self.quiescence(alpha, beta, ply, in_check);
        }

        let killer = if (ply as usize) < MAX_DEPTH {
            self.killers[ply as usize]
        } else {
            Move::NULL
        };
        let list = generate(&mut self.board, killer, true);
        let count = list.len();
        if count == 0 {
            return if in_check { -(MATE_VALUE - ply as i32) } else { 0 };
        } else if count <= 2 {
            if ply < self.ext_budget {
                ext = ply + 2;
                depth_max += 1;
            } else if count == 1 {
                let only = list.moves[0];
                if PLACE_MINOR[only.from()] >= PLACE_MINOR[only.to()] {
                    ext = ply + 2;
                    depth_max += 1;
                }
            }
        } else if ply == ext && ply < depth_max - 1 {
            depth_max -= 1;
        }

        // Null move: the move count is a cheap proxy for the forced
        // situations where passing is unsound.
        if !in_check && count >= 4 && null_ok {
            let saved_state = self.board.state;
            let saved_ply = self.board.ply;
            self.board.record_position();
            self.board.state.advance();
            self.board.key ^= self.zobrist.side_key();
            let reduced = if depth_max - ply > 2 {
                depth_max - 2
            } else {
                ply + 1
            };
            let v = -self.search(-beta, -beta + 1, ply + 1, reduced, false, false, ext);
            self.board.key ^= self.zobrist.side_key();
            self.board.state = saved_state;
            self.board.ply = saved_ply;
            if v >= beta {
                return beta;
            }
        }

        let mut pv_move = Move::NULL;
        for &mv in &list.moves {
            let undo = self.board.snapshot();
            self.board.apply_full(mv, &self.zobrist);
            let gives_check = mv.gives_check();
            let v = if !pv_move.is_null() {
                let v = -self.search(-alpha - 1, -alpha, ply + 1, depth_max, true, gives_check, ext);
                if alpha < v && v < beta {
                    -self.search(-beta, -alpha, ply + 1, depth_max, true, gives_check, ext)
                } else {
                    v
                }
            } else {
                -self.search(-beta, -alpha, ply + 1, depth_max, true, gives_check, ext)
            };
            self.board.undo_full(mv, undo);

            if v >= beta {
                self.tt
                    .insert(self.board.key, ply, depth_max, Bound::Beta, beta, mv);
                if (ply as usize) < MAX_DEPTH {
                    self.killers[ply as usize] = mv;
                }
                return beta;
            }
            if v > alpha {
                alpha = v;
                pv_move = mv;
            }
        }

        let bound = if pv_move.is_null() {
            Bound::Alpha
        } else {
            Bound::Exact
        };
        self.tt
            .insert(self.board.key, ply, depth_max, bound, alpha, pv_move);
        alpha
    }
}
