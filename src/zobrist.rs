//! Seeded Zobrist tables and the from-scratch position key.
//!
//! One 64-bit random per (playable square, piece code) plus a single
//! side-to-move key. The en-passant file and the castling rights are
//! deliberately not hashed: the repetition test compares raw keys
//! across plies where those fields routinely differ, and hashing them
//! would hide repeats it is meant to see.
//!
//! Tables are filled from a seeded [`StdRng`], so a fixed seed pins
//! every key, every transposition hit, and every node count.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::board::{Board, SQ_A1, SQ_H8};
use crate::piece_types::{BLACK, WHITE, WPAWN};

const SQUARE_KEYS: usize = SQ_H8 - SQ_A1 + 1;
const PIECE_KEYS: usize = 32;

pub struct Zobrist {
    table: [[u64; PIECE_KEYS]; SQUARE_KEYS],
    side: u64,
}

impl Zobrist {
    pub fn new(seed: u64) -> Zobrist {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut table = [[0u64; PIECE_KEYS]; SQUARE_KEYS];
        for square_row in table.iter_mut() {
            for key in square_row.iter_mut() {
                *key = rng.gen();
            }
        }
        let side = rng.gen();
        Zobrist { table, side }
    }

    /// Random for a piece code standing on a playable square.
    #[inline]
    pub fn piece_square(&self, sq: usize, piece: u32) -> u64 {
        debug_assert!((SQ_A1..=SQ_H8).contains(&sq));
        self.table[sq - SQ_A1][(piece - WPAWN) as usize]
    }

    /// Key toggled when black is to move.
    #[inline]
    pub fn side_key(&self) -> u64 {
        self.side
    }

    /// Recompute the position key from scratch. Used at position setup
    /// and by the development-build check that the incremental key
    /// never drifts.
    pub fn full_key(&self, board: &Board) -> u64 {
        let mut key = if board.white_to_move() { 0 } else { self.side };
        for sq in SQ_A1..=SQ_H8 {
            let code = board.squares[sq];
            if code & (WHITE | BLACK) != 0 {
                key ^= self.piece_square(sq, code);
            }
        }
        key
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_tables() {
        let a = Zobrist::new(1);
        let b = Zobrist::new(1);
        assert_eq!(a.side_key(), b.side_key());
        assert_eq!(a.piece_square(SQ_A1, WPAWN), b.piece_square(SQ_A1, WPAWN));
        assert_eq!(a.piece_square(SQ_H8, crate::piece_types::BKING), b.piece_square(SQ_H8, crate::piece_types::BKING));
    }

    #[test]
    fn different_seeds_differ() {
        let a = Zobrist::new(1);
        let b = Zobrist::new(2);
        assert_ne!(a.piece_square(55, WPAWN), b.piece_square(55, WPAWN));
    }

    #[test]
    fn side_to_move_flips_full_key() {
        let zobrist = Zobrist::new(1);
        let white = Board::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let black = Board::from_fen("4k3/8/8/8/8/8/8/4K3 b - - 0 1").unwrap();
        assert_eq!(
            zobrist.full_key(&white) ^ zobrist.side_key(),
            zobrist.full_key(&black)
        );
    }
}
