//! Tests for Zobrist hashing: stability, incremental maintenance, and
//! the deliberate exclusions.

mod common;

use common::{board_from_fen, engine_with, find_move, positions};
use goshawk::zobrist::Zobrist;

#[test]
fn identical_positions_share_a_key() {
    let a = board_from_fen(positions::STARTING);
    let b = board_from_fen(positions::STARTING);
    assert_eq!(a.key, b.key);
    assert_ne!(a.key, 0);
}

#[test]
fn placement_and_side_change_the_key() {
    let start = board_from_fen(positions::STARTING);
    let pushed = board_from_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1");
    assert_ne!(start.key, pushed.key);

    let white = board_from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1");
    let black = board_from_fen("4k3/8/8/8/8/8/8/4K3 b - - 0 1");
    assert_ne!(white.key, black.key);
}

#[test]
fn castling_rights_and_ep_file_are_excluded() {
    // Neither field enters the hash: the repetition test compares keys
    // across plies where these fields differ and must still see the
    // repeat.
    let with_rights = board_from_fen("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1");
    let without = board_from_fen("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w - - 0 1");
    assert_eq!(with_rights.key, without.key);

    let with_ep = board_from_fen("rnbqkbnr/pppp1ppp/8/4p3/8/8/PPPPPPPP/RNBQKBNR w KQkq e6 0 2");
    let without = board_from_fen("rnbqkbnr/pppp1ppp/8/4p3/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 2");
    assert_eq!(with_ep.key, without.key);
}

#[test]
fn transpositions_reach_the_same_key() {
    let via_e4 = board_from_fen("r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3");
    let same = board_from_fen("r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3");
    assert_eq!(via_e4.key, same.key);
}

#[test]
fn make_undo_restores_the_key_for_every_move() {
    let zobrist = Zobrist::new(1);
    let mut board = board_from_fen(positions::KIWIPETE);
    let before = board.key;
    let list = common::legal_moves(&mut board);
    for &mv in &list.moves {
        let undo = board.snapshot();
        board.apply_full(mv, &zobrist);
        assert_ne!(board.key, before, "a move must change the key");
        assert_eq!(board.key, zobrist.full_key(&board), "incremental = scratch");
        board.undo_full(mv, undo);
        assert_eq!(board.key, before);
    }
}

#[test]
fn played_line_keys_match_fresh_parses() {
    // 1. e4 e5 2. Nf3 reached by play() matches the FEN parse.
    let mut engine = engine_with(positions::STARTING);
    let e4 = find_move(&mut engine.board, 35, 55).unwrap();
    engine.play(e4);
    let e5 = find_move(&mut engine.board, 85, 65).unwrap();
    engine.play(e5);
    let nf3 = find_move(&mut engine.board, 27, 46).unwrap();
    engine.play(nf3);

    let parsed = board_from_fen("rnbqkbnr/pppp1ppp/8/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R b KQkq - 1 2");
    assert_eq!(engine.board.key, parsed.key);
}

#[test]
fn seeds_pin_the_tables() {
    let a = Zobrist::new(7);
    let b = Zobrist::new(7);
    let c = Zobrist::new(8);
    let board = board_from_fen(positions::STARTING);
    assert_eq!(a.full_key(&board), b.full_key(&board));
    assert_ne!(a.full_key(&board), c.full_key(&board));
}
