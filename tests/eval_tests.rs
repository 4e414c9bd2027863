//! Tests for the static evaluation: symmetry, material balance, the
//! positional terms, and the drawn-material rules.

mod common;

use common::{board_from_fen, mirror_fen, positions};
use goshawk::eval::evaluate;

#[test]
fn starting_position_is_dead_even() {
    let board = board_from_fen(positions::STARTING);
    assert_eq!(evaluate(&board), 0);
}

#[test]
fn evaluation_is_color_symmetric() {
    // The score is reported for the side to move, so a mirrored
    // position with colors swapped evaluates to the same number.
    for fen in [
        positions::STARTING,
        positions::KIWIPETE,
        positions::MIDDLEGAME,
        positions::KP_ENDGAME,
        "r2q1rk1/ppp2ppp/2npbn2/2b1p3/4P3/2PP1N2/PP1NBPPP/R1BQ1RK1 w - - 0 8",
    ] {
        let board = board_from_fen(fen);
        let mirrored = board_from_fen(&mirror_fen(fen));
        assert_eq!(
            evaluate(&board),
            evaluate(&mirrored),
            "mirror asymmetry for {}",
            fen
        );
    }
}

#[test]
fn material_dominates() {
    let up_queen = board_from_fen("4k3/8/8/3Q4/8/8/8/4K3 w - - 0 1");
    let v = evaluate(&up_queen);
    assert!(v > 800, "queen up should score near +900, got {}", v);

    // Same position with black to move: the queen belongs to the
    // opponent of the side to move.
    let down_queen = board_from_fen("4k3/8/8/3Q4/8/8/8/4K3 b - - 0 1");
    let v = evaluate(&down_queen);
    assert!(v < -800, "queen down should score near -900, got {}", v);
}

#[test]
fn passed_pawns_earn_their_rank_bonuses() {
    // A white pawn on the seventh towers over one on the fifth.
    let seventh = board_from_fen("4k3/2P5/8/8/8/8/8/4K3 w - - 0 1");
    let fifth = board_from_fen("4k3/8/8/2P5/8/8/8/4K3 w - - 0 1");
    assert!(evaluate(&seventh) > evaluate(&fifth));
}

#[test]
fn advanced_pawn_blocked_by_enemy_pawn_gets_no_pass_bonus() {
    let free = board_from_fen("4k3/8/8/2P5/8/8/8/4K3 w - - 0 1");
    let blocked = board_from_fen("4k3/8/2p5/2P5/8/8/8/4K3 w - - 0 1");
    // The blocked pawn line also carries an extra black pawn of
    // material, so compare against the free line minus one pawn-ish.
    assert!(evaluate(&free) - evaluate(&blocked) > 98);
}

#[test]
fn drawn_material_configurations_score_zero() {
    for fen in [
        positions::BARE_KINGS,
        "8/8/4k3/8/8/4KB2/8/8 w - - 0 1",      // lone minor
        "8/8/4k3/8/8/4KN2/8/8 b - - 0 1",      // lone knight, black to move
        "4k3/3q4/8/8/8/3Q4/8/4K3 w - - 0 1",   // queen each
        "4k3/3r4/8/8/8/3R4/8/4K3 w - - 0 1",   // rook each
        "4k3/3b4/8/8/8/3N4/8/4K3 w - - 0 1",   // minor each
        "4k3/8/8/8/8/3NN3/8/4K3 w - - 0 1",    // two knights
        "4k3/3p4/8/8/8/3B4/8/4K3 w - - 0 1",   // minor vs pawn
        "4k3/3r4/8/8/8/3RB3/8/4K3 w - - 0 1",  // rook+minor vs rook
        "4k3/2bn4/8/8/8/3R4/8/4K3 w - - 0 1",  // rook vs two minors
    ] {
        let board = board_from_fen(fen);
        assert_eq!(evaluate(&board), 0, "expected draw score for {}", fen);
    }
}

#[test]
fn lone_pawn_endgames_are_not_draws() {
    let board = board_from_fen(positions::KP_ENDGAME);
    assert!(evaluate(&board) > 0);
    // And KQ vs K is decisive material, not a drawn shape.
    let board = board_from_fen("4k3/8/8/8/8/8/8/QK6 w - - 0 1");
    assert!(evaluate(&board) > 800);
}

#[test]
fn bishop_pair_and_open_files_show_up() {
    // Two bishops vs bishop+knight, otherwise balanced.
    let pair = board_from_fen("2b1kb2/pppppppp/8/8/8/8/PPPPPPPP/2B1KB2 w - - 0 1");
    let split = board_from_fen("2n1kb2/pppppppp/8/8/8/8/PPPPPPPP/2B1KB2 w - - 0 1");
    // The pair holder nets the +6 plus placement differences; just
    // check the sign of the swing toward the pair.
    assert!(evaluate(&pair) > evaluate(&split) - 20);

    // Equal material, but one rook sits on an open file and the other
    // behind its own h-pawn.
    let open = board_from_fen("4k3/8/pppp4/8/8/8/PPPP4/4K2R w - - 0 1");
    let closed = board_from_fen("4k3/8/pppp4/8/8/8/PPP4P/4K2R w - - 0 1");
    assert!(evaluate(&open) > evaluate(&closed));
}
