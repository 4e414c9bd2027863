//! The engine value: one place for every piece of mutable search state.
//!
//! The board, Zobrist tables, transposition table, killer slots, and
//! the node/selective-depth counters live here, and the search methods
//! take `&mut self`. The table and killers stay warm across `go`
//! commands; node counts are a reported output, so whether state is
//! cleared between positions is part of the observable contract.

use crate::board::{Board, FenError};
use crate::eval::evaluate;
use crate::move_types::Move;
use crate::search::MAX_DEPTH;
use crate::transposition::TranspositionTable;
use crate::zobrist::Zobrist;

pub struct Engine {
    pub board: Board,
    pub(crate) zobrist: Zobrist,
    pub(crate) tt: TranspositionTable,
    pub(crate) killers: [Move; MAX_DEPTH],
    pub(crate) nodes: u64,
    pub(crate) sel_depth: u32,
    /// Ply budget below which the forced-move extension may fire;
    /// set to `2 * depth + 2` by each deepening iteration.
    pub(crate) ext_budget: u32,
}

impl Engine {
    /// Build an engine with a transposition table of the given size in
    /// MiB and Zobrist tables from the given seed. Identical seed and
    /// inputs reproduce identical output, node counts included.
    pub fn new(hash_megabytes: usize, seed: u64) -> Engine {
        log::debug!("engine init: hash {} MiB, zobrist seed {}", hash_megabytes, seed);
        Engine {
            board: Board::empty(),
            zobrist: Zobrist::new(seed),
            tt: TranspositionTable::new(hash_megabytes),
            killers: [Move::NULL; MAX_DEPTH],
            nodes: 0,
            sel_depth: 0,
            ext_budget: 0,
        }
    }

    /// Load a position: parse the FEN, compute the key from scratch.
    /// The transposition table and killers are deliberately left warm.
    pub fn set_position(&mut self, fen: &str) -> Result<(), FenError> {
        let mut board = Board::from_fen(fen)?;
        board.key = self.zobrist.full_key(&board);
        self.board = board;
        Ok(())
    }

    /// Apply a move to the engine's board with full bookkeeping. The
    /// search applies and undoes its own moves; this entry point drives
    /// game continuations, where the repetition history must accrue.
    pub fn play(&mut self, mv: Move) {
        self.board.apply_full(mv, &self.zobrist);
    }

    /// Move-path count to the given depth from the current position.
    pub fn perft(&mut self, depth: u32) -> u64 {
        crate::movegen::perft(&mut self.board, &self.zobrist, depth)
    }

    /// The engine's Zobrist tables.
    pub fn zobrist(&self) -> &Zobrist {
        &self.zobrist
    }

    /// Nodes visited by the current or last search.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Greatest ply reached, quiescence and extensions included.
    pub fn sel_depth(&self) -> u32 {
        self.sel_depth
    }

    /// Static evaluation at a ply, tracking selective depth.
    #[inline]
    pub(crate) fn static_eval(&mut self, ply: u32) -> i32 {
        if ply > self.sel_depth {
            self.sel_depth = ply;
        }
        evaluate(&self.board)
    }
}
