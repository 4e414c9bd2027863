//! Pseudo-legal move generation with a make/probe/revert legality
//! filter, plus the partition ordering the search asks for.
//!
//! Every candidate is tried with a fast apply, the mover's king is
//! probed for exposure, and the move is reverted; only survivors enter
//! the buffer. The fast apply also stamps the captured piece and the
//! check flag into the emitted word, so ordering and quiescence never
//! recompute them.
//!
//! Sorted generation partitions the buffer into
//! `[killer | promotions | captures | checks | quiets]` and bubbles the
//! first few captures into MVV/LVA order: higher-valued victim first,
//! ties broken toward the cheaper attacker. The capture and check
//! cursors are exported on the returned list for the quiescence scan.

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::move_types::{Move, MoveList, MAX_MOVES};
use crate::piece_types::*;
use crate::zobrist::Zobrist;

const DIAG_OFFSETS: [isize; 4] = [-11, -9, 9, 11];
const STRT_OFFSETS: [isize; 4] = [-10, -1, 1, 10];
const KNIGHT_OFFSETS: [isize; 8] = [-21, -19, -12, -8, 8, 12, 19, 21];
const KING_OFFSETS: [isize; 8] = [-11, -10, -9, -1, 1, 9, 10, 11];

type Buffer = ArrayVec<Move, MAX_MOVES>;

/// Generate all legal moves for the side to move. `killer` is placed
/// first when present and `sort` requests the partition ordering;
/// unsorted generation leaves the buffer in emission order with both
/// cursors at its end.
pub fn generate(board: &mut Board, killer: Move, sort: bool) -> MoveList {
    let mut raw = Buffer::new();
    if board.white_to_move() {
        generate_white(board, &mut raw);
    } else {
        generate_black(board, &mut raw);
    }
    if !sort {
        let len = raw.len();
        return MoveList {
            moves: raw,
            last_capture: len,
            last_check: len,
        };
    }
    order(board, raw, killer)
}

/// Try a candidate: fast apply, king-exposure probe, fast revert.
fn try_add_white(board: &mut Board, list: &mut Buffer, mv: Move) {
    let applied = board.apply_fast(mv);
    let exposed = board.attacked_by_black(board.wk);
    board.undo_fast(applied);
    if !exposed {
        list.push(applied);
    }
}

fn try_add_black(board: &mut Board, list: &mut Buffer, mv: Move) {
    let applied = board.apply_fast(mv);
    let exposed = board.attacked_by_white(board.bk);
    board.undo_fast(applied);
    if !exposed {
        list.push(applied);
    }
}

fn generate_white(board: &mut Board, list: &mut Buffer) {
    // Fast applies never touch the lists, so indexed iteration is
    // stable while the grid is probed.
    for slot in 0..board.lists.count(0) {
        let k = board.lists.square_at(0, slot);
        debug_assert!(is_white(board.squares[k]));
        match board.squares[k] {
            WKING => {
                debug_assert_eq!(board.wk, k);
                for d in KING_OFFSETS {
                    let t = (k as isize + d) as usize;
                    if !is_white_or_full(board.squares[t]) {
                        try_add_white(board, list, Move::quiet(k, t));
                    }
                }
                if k == 25 {
                    if board.state.white_kingside()
                        && board.squares[26] == EMPTY
                        && board.squares[27] == EMPTY
                        && board.squares[28] == WROOK
                        && !board.attacked_by_black(25)
                        && !board.attacked_by_black(26)
                        && !board.attacked_by_black(27)
                    {
                        try_add_white(board, list, Move::castle(25, 27));
                    }
                    if board.state.white_queenside()
                        && board.squares[21] == WROOK
                        && board.squares[22] == EMPTY
                        && board.squares[23] == EMPTY
                        && board.squares[24] == EMPTY
                        && !board.attacked_by_black(23)
                        && !board.attacked_by_black(24)
                        && !board.attacked_by_black(25)
                    {
                        try_add_white(board, list, Move::castle(25, 23));
                    }
                }
            }
            WKNIGHT => {
                for d in KNIGHT_OFFSETS {
                    let t = (k as isize + d) as usize;
                    if !is_white_or_full(board.squares[t]) {
                        try_add_white(board, list, Move::quiet(k, t));
                    }
                }
            }
            WPAWN => {
                debug_assert!(k <= 88);
                if board.squares[k + 10] == EMPTY {
                    if k <= 78 {
                        try_add_white(board, list, Move::quiet(k, k + 10));
                        if k <= 38 && board.squares[k + 20] == EMPTY {
                            try_add_white(board, list, Move::quiet(k, k + 20));
                        }
                    } else {
                        for promo in [WKNIGHT, WBISHOP, WROOK, WQUEEN] {
                            try_add_white(board, list, Move::promotion(k, k + 10, promo));
                        }
                    }
                }
                for t in [k + 9, k + 11] {
                    if is_black(board.squares[t]) {
                        if k <= 78 {
                            try_add_white(board, list, Move::quiet(k, t));
                        } else {
                            for promo in [WKNIGHT, WBISHOP, WROOK, WQUEEN] {
                                try_add_white(board, list, Move::promotion(k, t, promo));
                            }
                        }
                    }
                }
                let ep = board.state.ep_file();
                if (62..=68).contains(&k) && (k - 62) as u32 == ep {
                    try_add_white(board, list, Move::en_passant(k, k + 9));
                } else if (61..=67).contains(&k) && (k - 60) as u32 == ep {
                    try_add_white(board, list, Move::en_passant(k, k + 11));
                }
            }
            WQUEEN => {
                rays_white(board, list, k, &DIAG_OFFSETS);
                rays_white(board, list, k, &STRT_OFFSETS);
            }
            WROOK => rays_white(board, list, k, &STRT_OFFSETS),
            WBISHOP => rays_white(board, list, k, &DIAG_OFFSETS),
            _ => debug_assert!(false, "foreign code in white list"),
        }
    }
}

fn generate_black(board: &mut Board, list: &mut Buffer) {
    for slot in 0..board.lists.count(1) {
        let k = board.lists.square_at(1, slot);
        debug_assert!(is_black(board.squares[k]));
        match board.squares[k] {
            BKING => {
                debug_assert_eq!(board.bk, k);
                for d in KING_OFFSETS {
                    let t = (k as isize + d) as usize;
                    if !is_black_or_full(board.squares[t]) {
                        try_add_black(board, list, Move::quiet(k, t));
                    }
                }
                if k == 95 {
                    if board.state.black_kingside()
                        && board.squares[96] == EMPTY
                        && board.squares[97] == EMPTY
                        && board.squares[98] == BROOK
                        && !board.attacked_by_white(95)
                        && !board.attacked_by_white(96)
                        && !board.attacked_by_white(97)
                    {
                        try_add_black(board, list, Move::castle(95, 97));
                    }
                    if board.state.black_queenside()
                        && board.squares[91] == BROOK
                        && board.squares[92] == EMPTY
                        && board.squares[93] == EMPTY
                        && board.squares[94] == EMPTY
                        && !board.attacked_by_white(93)
                        && !board.attacked_by_white(94)
                        && !board.attacked_by_white(95)
                    {
                        try_add_black(board, list, Move::castle(95, 93));
                    }
                }
            }
            BKNIGHT => {
                for d in KNIGHT_OFFSETS {
                    let t = (k as isize + d) as usize;
                    if !is_black_or_full(board.squares[t]) {
                        try_add_black(board, list, Move::quiet(k, t));
                    }
                }
            }
            BPAWN => {
                debug_assert!(k >= 31);
                if board.squares[k - 10] == EMPTY {
                    if k >= 41 {
                        try_add_black(board, list, Move::quiet(k, k - 10));
                        if k >= 81 && board.squares[k - 20] == EMPTY {
                            try_add_black(board, list, Move::quiet(k, k - 20));
                        }
                    } else {
                        for promo in [BKNIGHT, BBISHOP, BROOK, BQUEEN] {
                            try_add_black(board, list, Move::promotion(k, k - 10, promo));
                        }
                    }
                }
                for t in [k - 11, k - 9] {
                    if is_white(board.squares[t]) {
                        if k >= 41 {
                            try_add_black(board, list, Move::quiet(k, t));
                        } else {
                            for promo in [BKNIGHT, BBISHOP, BROOK, BQUEEN] {
                                try_add_black(board, list, Move::promotion(k, t, promo));
                            }
                        }
                    }
                }
                let ep = board.state.ep_file();
                if (52..=58).contains(&k) && (k - 52) as u32 == ep {
                    try_add_black(board, list, Move::en_passant(k, k - 11));
                } else if (51..=57).contains(&k) && (k - 50) as u32 == ep {
                    try_add_black(board, list, Move::en_passant(k, k - 9));
                }
            }
            BQUEEN => {
                rays_black(board, list, k, &DIAG_OFFSETS);
                rays_black(board, list, k, &STRT_OFFSETS);
            }
            BROOK => rays_black(board, list, k, &STRT_OFFSETS),
            BBISHOP => rays_black(board, list, k, &DIAG_OFFSETS),
            _ => debug_assert!(false, "foreign code in black list"),
        }
    }
}

fn rays_white(board: &mut Board, list: &mut Buffer, k: usize, offsets: &[isize; 4]) {
    for &d in offsets {
        let mut kk = k as isize;
        loop {
            kk += d;
            let t = kk as usize;
            if is_white_or_full(board.squares[t]) {
                break;
            }
            let occupied = board.squares[t] != EMPTY;
            try_add_white(board, list, Move::quiet(k, t));
            if occupied {
                break;
            }
        }
    }
}

fn rays_black(board: &mut Board, list: &mut Buffer, k: usize, offsets: &[isize; 4]) {
    for &d in offsets {
        let mut kk = k as isize;
        loop {
            kk += d;
            let t = kk as usize;
            if is_black_or_full(board.squares[t]) {
                break;
            }
            let occupied = board.squares[t] != EMPTY;
            try_add_black(board, list, Move::quiet(k, t));
            if occupied {
                break;
            }
        }
    }
}

/// MVV ordering with LVA tiebreak over the raw code fields: a higher
/// victim code outranks, equal victims prefer the cheaper attacker.
#[inline]
fn better_capture(board: &Board, a: Move, b: Move) -> bool {
    let va = a.capture_field();
    let vb = b.capture_field();
    debug_assert!(va != 0 && vb != 0);
    if va > vb {
        true
    } else if va == vb {
        board.squares[a.from()] < board.squares[b.from()]
    } else {
        false
    }
}

/// Stable bucket partition plus the bounded MVV/LVA bubble over the
/// first capture slots.
fn order(board: &Board, raw: Buffer, killer: Move) -> MoveList {
    let len = raw.len();
    let mut n_killer = 0usize;
    let mut n_promo = 0usize;
    let mut n_cap = 0usize;
    let mut n_check = 0usize;
    for &mv in &raw {
        if mv == killer {
            n_killer += 1;
        } else if mv.is_promotion() {
            n_promo += 1;
        } else if mv.is_capture() {
            n_cap += 1;
        } else if mv.gives_check() {
            n_check += 1;
        }
    }
    debug_assert!(n_killer <= 1);

    // Bucket cursors start one past their region and walk backwards.
    let mut promo_at = n_killer + n_promo;
    let mut cap_at = promo_at + n_cap;
    let mut check_at = cap_at + n_check;
    let mut quiet_at = len;

    let mut sorted = raw.clone();
    for &mv in &raw {
        if mv == killer {
            sorted[0] = mv;
        } else if mv.is_promotion() {
            promo_at -= 1;
            sorted[promo_at] = mv;
        } else if mv.is_capture() {
            cap_at -= 1;
            sorted[cap_at] = mv;
        } else if mv.gives_check() {
            check_at -= 1;
            sorted[check_at] = mv;
        } else {
            quiet_at -= 1;
            sorted[quiet_at] = mv;
        }
    }
    // Now cap_at..check_at spans the captures. Bubble the best victims
    // into the first three capture slots only.
    for j in cap_at..cap_at + 3 {
        let mut stable = true;
        let mut i = check_at;
        while i > j + 1 {
            i -= 1;
            if better_capture(board, sorted[i], sorted[i - 1]) {
                sorted.swap(i, i - 1);
                stable = false;
            }
        }
        if stable {
            break;
        }
    }

    MoveList {
        moves: sorted,
        last_capture: check_at,
        last_check: quiet_at,
    }
}

/// Count move paths of exact length `depth`. Validation aid for the
/// generator and the make/unmake pair; the known counts for standard
/// positions pin both down.
pub fn perft(board: &mut Board, zobrist: &Zobrist, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    let list = generate(board, Move::NULL, false);
    if depth == 1 {
        return list.len() as u64;
    }
    let mut nodes = 0;
    for &mv in &list.moves {
        let undo = board.snapshot();
        board.apply_full(mv, zobrist);
        nodes += perft(board, zobrist, depth - 1);
        board.undo_full(mv, undo);
    }
    nodes
}
