//! Goshawk — a deterministic fixed-depth chess search benchmark.
//!
//! Given a position in Forsyth-Edwards Notation and a target depth, the
//! engine selects a principal move and reports a score, node count, and
//! selective depth. With a fixed Zobrist seed the result is reproducible
//! bit for bit across runs; depth is the only budget, so the engine
//! exercises real search computations without any wall-clock dependence.
//!
//! The stack, bottom up: a 10x12 mailbox board with sparse piece lists
//! ([`board`], [`piece_lists`]), seeded Zobrist hashing ([`zobrist`]),
//! by-color attack probes ([`attacks`]), incremental make/unmake
//! ([`makemove`]), pseudo-legal generation with a legality filter and
//! partition ordering ([`movegen`]), a depth-and-bound transposition
//! table ([`transposition`]), a hand-tuned static evaluation ([`eval`]),
//! and a fail-hard negamax alpha-beta with null-move pruning, PVS,
//! tactical extensions, and a quiescence leaf ([`search`]). All mutable
//! search state is owned by an [`engine::Engine`] value.

pub mod attacks;
pub mod board;
pub mod engine;
pub mod eval;
pub mod makemove;
pub mod move_types;
pub mod movegen;
pub mod piece_lists;
pub mod piece_types;
pub mod search;
pub mod transposition;
pub mod utils;
pub mod zobrist;
