//! Incremental make and unmake, in fast and full flavors.
//!
//! Fast mode exists for one caller: the generator's legality filter.
//! It mutates only the grid and the king squares, fills the captured
//! piece into the returned move, and sets the check flag by probing the
//! mover's attack on the opponent king. Full mode additionally toggles
//! the Zobrist key, maintains the piece lists, records the pre-move key
//! in the repetition ring, advances the clocks and the state word, and
//! downgrades castling rights on moves from the king and rook home
//! squares.
//!
//! Unmake is exact because the caller supplies a [`Undo`] snapshot of
//! the state word, clocks, and key; nothing about en passant or rights
//! needs to be un-derived. Castling moves the king and rook atomically
//! under a single move word; an en-passant victim sits on the mover's
//! from-rank, not the to-square, and is restored there.

use crate::board::{Board, State, HISTORY_LEN};
use crate::move_types::Move;
use crate::piece_types::*;
use crate::zobrist::Zobrist;

/// Pre-move snapshot full-mode unmake restores from.
#[derive(Clone, Copy, Debug)]
pub struct Undo {
    pub state: State,
    pub ply: usize,
    pub fifty: u32,
    pub key: u64,
}

impl Board {
    #[inline]
    pub fn snapshot(&self) -> Undo {
        Undo {
            state: self.state,
            ply: self.ply,
            fifty: self.fifty,
            key: self.key,
        }
    }

    /// Append the current key to the repetition ring. Recording stops
    /// once the ring is full; the ply counter is bounded with it.
    #[inline]
    pub fn record_position(&mut self) {
        if self.ply < HISTORY_LEN {
            self.history[self.ply] = self.key;
            self.ply += 1;
        }
    }

    /// First-repeat repetition test: the current key is compared with
    /// the keys 2, 4, ... plies back, at most `fifty / 2` of them, so a
    /// fifty-move reset fences the scan. Claiming the draw on the first
    /// repeat surfaces forcible repetitions earlier than the strict
    /// threefold rule; this is the benchmark's intended behavior.
    pub fn repetition_sloppy(&self) -> bool {
        if self.fifty < 4 {
            return false;
        }
        let steps = (self.fifty >> 1) as usize;
        let mut p = self.ply;
        for _ in 0..steps {
            if p < 2 {
                break;
            }
            p -= 2;
            if self.history[p] == self.key {
                return true;
            }
        }
        false
    }

    /// Legality-filter apply: grid and king squares only. Returns the
    /// move with the captured piece recorded and the check flag set if
    /// the mover now attacks the opponent king.
    pub fn apply_fast(&mut self, mv: Move) -> Move {
        let f = mv.from();
        let t = mv.to();
        let mut mv = mv;

        if mv.is_castle() {
            self.castle_cells_forward(t);
        } else if mv.is_en_passant() {
            self.squares[t] = self.squares[f];
            self.squares[f] = EMPTY;
            if t <= 48 {
                debug_assert_eq!(self.squares[t + 10], WPAWN);
                mv = mv.with_captured(WPAWN);
                self.squares[t + 10] = EMPTY;
            } else {
                debug_assert_eq!(self.squares[t - 10], BPAWN);
                mv = mv.with_captured(BPAWN);
                self.squares[t - 10] = EMPTY;
            }
        } else {
            let promo = mv.promotion_piece();
            let mover = self.squares[f];
            let victim = self.squares[t];
            let placed = if promo == EMPTY { mover } else { promo };
            if victim != EMPTY {
                mv = mv.with_captured(victim);
            }
            self.squares[t] = placed;
            self.squares[f] = EMPTY;
            if mover == WKING {
                self.wk = t;
            } else if mover == BKING {
                self.bk = t;
            }
        }

        // Check flag from the original side-to-move state.
        if self.state.white_to_move() {
            if self.attacked_by_white(self.bk) {
                mv = mv.with_check();
            }
        } else if self.attacked_by_black(self.wk) {
            mv = mv.with_check();
        }
        mv
    }

    /// Undo a fast apply. State, clocks, key, and lists were never
    /// touched, so only the grid and king squares roll back.
    pub fn undo_fast(&mut self, mv: Move) {
        let f = mv.from();
        let t = mv.to();

        if mv.is_castle() {
            self.castle_cells_backward(t);
        } else if mv.is_en_passant() {
            self.squares[f] = self.squares[t];
            self.squares[t] = EMPTY;
            if t <= 48 {
                self.squares[t + 10] = WPAWN;
            } else {
                self.squares[t - 10] = BPAWN;
            }
        } else {
            let mover = if mv.promotion_piece() == EMPTY {
                let mover = self.squares[t];
                if mover == WKING {
                    self.wk = f;
                } else if mover == BKING {
                    self.bk = f;
                }
                mover
            } else {
                // A promotion landed on the far rank; the pawn it was
                // is implied by which far rank.
                if t <= 28 {
                    BPAWN
                } else {
                    WPAWN
                }
            };
            self.squares[f] = mover;
            self.squares[t] = mv.captured_piece();
        }
    }

    /// Search apply: everything fast mode does minus the check probe
    /// (the move already carries its flag from generation), plus
    /// Zobrist, piece lists, repetition ring, clocks, state word, and
    /// castling-rights upkeep.
    pub fn apply_full(&mut self, mv: Move, zobrist: &Zobrist) -> Move {
        let f = mv.from();
        let t = mv.to();
        let mut mv = mv;
        let mut resets_fifty = false;
        let mut key = self.key;

        if mv.is_castle() {
            key ^= self.castle_key_delta(t, zobrist);
            self.castle_cells_forward(t);
            self.castle_lists_forward(t);
        } else if mv.is_en_passant() {
            self.squares[t] = self.squares[f];
            self.squares[f] = EMPTY;
            if t <= 48 {
                debug_assert_eq!(self.squares[t + 10], WPAWN);
                mv = mv.with_captured(WPAWN);
                self.squares[t + 10] = EMPTY;
                key ^= zobrist.piece_square(f, BPAWN)
                    ^ zobrist.piece_square(t, BPAWN)
                    ^ zobrist.piece_square(t + 10, WPAWN);
                self.lists.remove(0, t + 10);
                self.lists.remove(1, f);
                self.lists.add(1, t);
            } else {
                debug_assert_eq!(self.squares[t - 10], BPAWN);
                mv = mv.with_captured(BPAWN);
                self.squares[t - 10] = EMPTY;
                key ^= zobrist.piece_square(f, WPAWN)
                    ^ zobrist.piece_square(t, WPAWN)
                    ^ zobrist.piece_square(t - 10, BPAWN);
                self.lists.remove(1, t - 10);
                self.lists.remove(0, f);
                self.lists.add(0, t);
            }
            resets_fifty = true;
        } else {
            let promo = mv.promotion_piece();
            let mover = self.squares[f];
            let victim = self.squares[t];
            let placed = if promo == EMPTY { mover } else { promo };
            if victim != EMPTY {
                resets_fifty = true;
                mv = mv.with_captured(victim);
                let enemy = if self.state.white_to_move() { 1 } else { 0 };
                key ^= zobrist.piece_square(t, victim);
                self.lists.remove(enemy, t);
            } else if mover == WPAWN || mover == BPAWN {
                resets_fifty = true;
            }
            self.squares[t] = placed;
            self.squares[f] = EMPTY;
            if mover == WKING {
                self.wk = t;
            } else if mover == BKING {
                self.bk = t;
            }
            let c = if self.state.white_to_move() { 0 } else { 1 };
            key ^= zobrist.piece_square(f, mover) ^ zobrist.piece_square(t, placed);
            self.lists.remove(c, f);
            self.lists.add(c, t);
        }

        self.record_position();
        if resets_fifty {
            self.fifty = 0;
        } else {
            self.fifty += 1;
        }
        self.key = key ^ zobrist.side_key();
        self.state.advance();

        if self.squares[t] == WPAWN {
            if f <= 38 && t >= 51 {
                self.state.set_ep_file((f - 31) as u32);
            }
        } else if self.squares[t] == BPAWN {
            if f >= 81 && t <= 68 {
                self.state.set_ep_file((f - 81) as u32);
            }
        } else if self.state.any_castling() {
            match f {
                25 => self.state.clear_white_castling(),
                95 => self.state.clear_black_castling(),
                21 => self.state.clear_white_queenside(),
                28 => self.state.clear_white_kingside(),
                91 => self.state.clear_black_queenside(),
                98 => self.state.clear_black_kingside(),
                _ => {}
            }
        }

        debug_assert_eq!(self.key, zobrist.full_key(self));
        mv
    }

    /// Undo a full apply: restore the snapshot, then roll back the grid,
    /// king squares, and piece lists.
    pub fn undo_full(&mut self, mv: Move, undo: Undo) {
        self.state = undo.state;
        self.ply = undo.ply;
        self.fifty = undo.fifty;
        self.key = undo.key;

        let f = mv.from();
        let t = mv.to();

        if mv.is_castle() {
            self.castle_cells_backward(t);
            self.castle_lists_backward(t);
        } else if mv.is_en_passant() {
            self.squares[f] = self.squares[t];
            self.squares[t] = EMPTY;
            if t <= 48 {
                self.squares[t + 10] = WPAWN;
                self.lists.remove(1, t);
                self.lists.add(1, f);
                self.lists.add(0, t + 10);
            } else {
                self.squares[t - 10] = BPAWN;
                self.lists.remove(0, t);
                self.lists.add(0, f);
                self.lists.add(1, t - 10);
            }
        } else {
            let mover = if mv.promotion_piece() == EMPTY {
                let mover = self.squares[t];
                if mover == WKING {
                    self.wk = f;
                } else if mover == BKING {
                    self.bk = f;
                }
                mover
            } else if t <= 28 {
                BPAWN
            } else {
                WPAWN
            };
            self.squares[f] = mover;
            self.squares[t] = mv.captured_piece();
            let c = if self.state.white_to_move() { 0 } else { 1 };
            self.lists.remove(c, t);
            self.lists.add(c, f);
            if mv.is_capture() {
                self.lists.add(1 - c, t);
            }
        }
    }

    /// Grid half of a castle, forward direction. Targets identify the
    /// four castles: 23/27 white queenside/kingside, 93/97 black.
    fn castle_cells_forward(&mut self, t: usize) {
        match t {
            23 => {
                debug_assert!(self.squares[21] == WROOK && self.squares[25] == WKING);
                self.squares[21] = EMPTY;
                self.squares[23] = WKING;
                self.squares[24] = WROOK;
                self.squares[25] = EMPTY;
                self.wk = 23;
            }
            27 => {
                debug_assert!(self.squares[25] == WKING && self.squares[28] == WROOK);
                self.squares[25] = EMPTY;
                self.squares[26] = WROOK;
                self.squares[27] = WKING;
                self.squares[28] = EMPTY;
                self.wk = 27;
            }
            93 => {
                debug_assert!(self.squares[91] == BROOK && self.squares[95] == BKING);
                self.squares[91] = EMPTY;
                self.squares[93] = BKING;
                self.squares[94] = BROOK;
                self.squares[95] = EMPTY;
                self.bk = 93;
            }
            _ => {
                debug_assert_eq!(t, 97);
                debug_assert!(self.squares[95] == BKING && self.squares[98] == BROOK);
                self.squares[95] = EMPTY;
                self.squares[96] = BROOK;
                self.squares[97] = BKING;
                self.squares[98] = EMPTY;
                self.bk = 97;
            }
        }
    }

    fn castle_cells_backward(&mut self, t: usize) {
        match t {
            23 => {
                self.squares[21] = WROOK;
                self.squares[23] = EMPTY;
                self.squares[24] = EMPTY;
                self.squares[25] = WKING;
                self.wk = 25;
            }
            27 => {
                self.squares[25] = WKING;
                self.squares[26] = EMPTY;
                self.squares[27] = EMPTY;
                self.squares[28] = WROOK;
                self.wk = 25;
            }
            93 => {
                self.squares[91] = BROOK;
                self.squares[93] = EMPTY;
                self.squares[94] = EMPTY;
                self.squares[95] = BKING;
                self.bk = 95;
            }
            _ => {
                self.squares[95] = BKING;
                self.squares[96] = EMPTY;
                self.squares[97] = EMPTY;
                self.squares[98] = BROOK;
                self.bk = 95;
            }
        }
    }

    fn castle_key_delta(&self, t: usize, zobrist: &Zobrist) -> u64 {
        match t {
            23 => {
                zobrist.piece_square(25, WKING)
                    ^ zobrist.piece_square(23, WKING)
                    ^ zobrist.piece_square(21, WROOK)
                    ^ zobrist.piece_square(24, WROOK)
            }
            27 => {
                zobrist.piece_square(25, WKING)
                    ^ zobrist.piece_square(27, WKING)
                    ^ zobrist.piece_square(28, WROOK)
                    ^ zobrist.piece_square(26, WROOK)
            }
            93 => {
                zobrist.piece_square(95, BKING)
                    ^ zobrist.piece_square(93, BKING)
                    ^ zobrist.piece_square(91, BROOK)
                    ^ zobrist.piece_square(94, BROOK)
            }
            _ => {
                zobrist.piece_square(95, BKING)
                    ^ zobrist.piece_square(97, BKING)
                    ^ zobrist.piece_square(98, BROOK)
                    ^ zobrist.piece_square(96, BROOK)
            }
        }
    }

    fn castle_lists_forward(&mut self, t: usize) {
        match t {
            23 => {
                self.lists.remove(0, 21);
                self.lists.remove(0, 25);
                self.lists.add(0, 23);
                self.lists.add(0, 24);
            }
            27 => {
                self.lists.remove(0, 25);
                self.lists.remove(0, 28);
                self.lists.add(0, 26);
                self.lists.add(0, 27);
            }
            93 => {
                self.lists.remove(1, 91);
                self.lists.remove(1, 95);
                self.lists.add(1, 93);
                self.lists.add(1, 94);
            }
            _ => {
                self.lists.remove(1, 95);
                self.lists.remove(1, 98);
                self.lists.add(1, 96);
                self.lists.add(1, 97);
            }
        }
    }

    fn castle_lists_backward(&mut self, t: usize) {
        match t {
            23 => {
                self.lists.remove(0, 23);
                self.lists.remove(0, 24);
                self.lists.add(0, 21);
                self.lists.add(0, 25);
            }
            27 => {
                self.lists.remove(0, 26);
                self.lists.remove(0, 27);
                self.lists.add(0, 25);
                self.lists.add(0, 28);
            }
            93 => {
                self.lists.remove(1, 93);
                self.lists.remove(1, 94);
                self.lists.add(1, 91);
                self.lists.add(1, 95);
            }
            _ => {
                self.lists.remove(1, 96);
                self.lists.remove(1, 97);
                self.lists.add(1, 95);
                self.lists.add(1, 98);
            }
        }
    }
}
