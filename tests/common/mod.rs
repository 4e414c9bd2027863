//! Shared test utilities for the Goshawk test suite
#![allow(dead_code)]

use goshawk::board::Board;
use goshawk::engine::Engine;
use goshawk::move_types::{Move, MoveList};
use goshawk::movegen::generate;
use goshawk::zobrist::Zobrist;

/// Engine with the scenario defaults: 4 MiB table, Zobrist seed 1.
pub fn engine_with(fen: &str) -> Engine {
    let mut engine = Engine::new(4, 1);
    engine.set_position(fen).expect("test FEN should parse");
    engine
}

/// Board with its key computed against seed-1 tables.
pub fn board_from_fen(fen: &str) -> Board {
    let zobrist = Zobrist::new(1);
    let mut board = Board::from_fen(fen).expect("test FEN should parse");
    board.key = zobrist.full_key(&board);
    board
}

/// Ordered legal moves for the side to move, no killer.
pub fn legal_moves(board: &mut Board) -> MoveList {
    generate(board, Move::NULL, true)
}

/// Find the generated move with the given from/to squares.
pub fn find_move(board: &mut Board, from: usize, to: usize) -> Option<Move> {
    legal_moves(board)
        .moves
        .iter()
        .copied()
        .find(|m| m.from() == from && m.to() == to)
}

/// Mirror a FEN top to bottom with colors swapped: ranks reversed,
/// letter case flipped, side to move flipped, castling rights swapped,
/// en-passant rank reflected.
pub fn mirror_fen(fen: &str) -> String {
    let fields: Vec<&str> = fen.split_whitespace().collect();
    let placement = fields[0]
        .split('/')
        .rev()
        .map(swap_case)
        .collect::<Vec<_>>()
        .join("/");
    let color = if fields[1] == "w" { "b" } else { "w" };
    let castling = if fields[2] == "-" {
        "-".to_string()
    } else {
        // Reorder so white rights still print first.
        let swapped = swap_case(fields[2]);
        let mut upper: String = swapped.chars().filter(|c| c.is_ascii_uppercase()).collect();
        upper.extend(swapped.chars().filter(|c| c.is_ascii_lowercase()));
        upper
    };
    let ep = if fields[3] == "-" {
        "-".to_string()
    } else {
        let mut chars = fields[3].chars();
        let file = chars.next().unwrap();
        let rank = if chars.next() == Some('3') { '6' } else { '3' };
        format!("{}{}", file, rank)
    };
    let mut out = format!("{} {} {} {}", placement, color, castling, ep);
    for field in &fields[4..] {
        out.push(' ');
        out.push_str(field);
    }
    out
}

fn swap_case(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_ascii_uppercase() {
                c.to_ascii_lowercase()
            } else if c.is_ascii_lowercase() {
                c.to_ascii_uppercase()
            } else {
                c
            }
        })
        .collect()
}

/// Positions with known properties, shared across the suite.
#[allow(dead_code)]
pub mod positions {
    pub const STARTING: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
    pub const MATE_IN_ONE: &str = "6k1/5ppp/8/8/8/8/5PPP/R5K1 w - - 0 1"; // Ra8#
    pub const BARE_KINGS: &str = "8/8/4k3/8/8/4K3/8/8 w - - 0 1";
    pub const STALEMATE: &str = "7k/5Q2/6K1/8/8/8/8/8 b - - 0 1"; // black has no move
    pub const KING_SHUFFLE: &str = "k7/8/8/8/8/8/8/K7 w - - 0 1";
    pub const KP_ENDGAME: &str = "4k3/8/8/8/8/8/4P3/4K3 w - - 0 1";
    pub const CASTLING_BOTH: &str = "r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1";
    pub const EN_PASSANT: &str = "8/8/8/pP6/8/8/8/K6k w - a6 0 1";
    pub const PROMOTION: &str = "8/P7/8/8/8/8/8/K6k w - - 0 1";
    pub const KIWIPETE: &str =
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
    pub const POSITION_3: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";
    pub const MIDDLEGAME: &str =
        "r1bqk2r/pppp1ppp/2n2n2/2b1p3/2B1P3/2N2N2/PPPP1PPP/R1BQK2R w KQkq - 4 5";
    pub const WINNING_CAPTURE: &str = "7k/8/8/3q4/8/2N5/6PP/K7 w - - 0 1"; // Nxd5 wins the queen
}
