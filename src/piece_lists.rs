//! Sparse per-color piece lists with a reverse index.
//!
//! Generation and evaluation iterate only over occupied squares, so the
//! board keeps two lists of at most 16 squares each plus a reverse map
//! from square to list slot. Removal swaps the last entry into the
//! vacated slot, so both operations are O(1). The lists are built once
//! from the parsed position and afterwards mutated only by full-mode
//! make/unmake; fast-mode legality probes never touch them.
//!
//! Undo restores the lists as sets, not as sequences: a make/unmake
//! pair may rotate entries. Iteration order stays deterministic for a
//! deterministic sequence of operations, which is all fixed-depth
//! reproducibility needs.

use crate::board::BOARD_CELLS;
use crate::piece_types::{is_black, is_white};

/// Upper bound on pieces of one color.
pub const MAX_PIECES: usize = 16;

#[derive(Clone, Debug)]
pub struct PieceLists {
    squares: [[usize; MAX_PIECES]; 2],
    len: [usize; 2],
    slot_of: [usize; BOARD_CELLS],
}

impl Default for PieceLists {
    fn default() -> Self {
        PieceLists {
            squares: [[0; MAX_PIECES]; 2],
            len: [0; 2],
            slot_of: [0; BOARD_CELLS],
        }
    }
}

impl PieceLists {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of pieces of one color (0 = white, 1 = black).
    #[inline]
    pub fn count(&self, color: usize) -> usize {
        self.len[color]
    }

    /// Occupied squares of one color, in list order.
    #[inline]
    pub fn squares(&self, color: usize) -> &[usize] {
        &self.squares[color][..self.len[color]]
    }

    /// Square at a given list slot; the slot must be below `count`.
    #[inline]
    pub fn square_at(&self, color: usize, slot: usize) -> usize {
        debug_assert!(slot < self.len[color]);
        self.squares[color][slot]
    }

    /// List slot holding `sq`; meaningful only while `sq` is occupied
    /// by a piece of that color.
    #[inline]
    pub fn slot_of(&self, sq: usize) -> usize {
        self.slot_of[sq]
    }

    #[inline]
    pub fn add(&mut self, color: usize, sq: usize) {
        let slot = self.len[color];
        debug_assert!(slot < MAX_PIECES);
        self.squares[color][slot] = sq;
        self.slot_of[sq] = slot;
        self.len[color] = slot + 1;
    }

    #[inline]
    pub fn remove(&mut self, color: usize, sq: usize) {
        let slot = self.slot_of[sq];
        debug_assert!(slot < self.len[color]);
        debug_assert_eq!(self.squares[color][slot], sq);
        let last = self.len[color] - 1;
        if slot != last {
            let moved = self.squares[color][last];
            self.squares[color][slot] = moved;
            self.slot_of[moved] = slot;
        }
        self.len[color] = last;
    }

    /// Rebuild both lists from a board scan, playable squares only.
    pub fn rebuild(&mut self, cells: &[u32; BOARD_CELLS]) {
        self.len = [0; 2];
        for (sq, &code) in cells.iter().enumerate().take(99).skip(21) {
            if is_white(code) {
                self.add(0, sq);
            } else if is_black(code) {
                self.add(1, sq);
            }
        }
        debug_assert!(self.len[0] <= MAX_PIECES && self.len[1] <= MAX_PIECES);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_then_remove_middle_swaps_last_into_slot() {
        let mut lists = PieceLists::new();
        lists.add(0, 21);
        lists.add(0, 22);
        lists.add(0, 23);
        lists.remove(0, 21);
        assert_eq!(lists.count(0), 2);
        assert_eq!(lists.squares(0), &[23, 22]);
        // Reverse index still round-trips for every remaining entry.
        for &sq in lists.squares(0) {
            assert_eq!(lists.square_at(0, lists.slot_of(sq)), sq);
        }
    }

    #[test]
    fn colors_are_independent() {
        let mut lists = PieceLists::new();
        lists.add(0, 25);
        lists.add(1, 95);
        lists.remove(0, 25);
        assert_eq!(lists.count(0), 0);
        assert_eq!(lists.squares(1), &[95]);
    }
}
