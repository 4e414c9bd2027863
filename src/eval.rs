//! Static evaluation: material, pawn structure, piece placement, file
//! control, king safety, and endgame draw recognition.
//!
//! The score is accumulated from white's perspective and negated at
//! return when black is to move. Positional terms switch on the total
//! piece count: five or fewer pieces triggers the drawn-material rules,
//! eighteen or fewer rewards king development when the enemy queen is
//! gone, twenty-four or more applies the opening terms (center pawns,
//! castling, pawn shield, queens kept behind).
//!
//! Everything here is a pure function of the board; the engine wrapper
//! tracks selective depth at the call sites.

use crate::board::{file_of, rank_of, Board};
use crate::piece_types::*;

/// Center-preferring placement value per square, shared by the minor
/// pieces, the developed king, and the forced-move extension test.
#[rustfmt::skip]
pub const PLACE_MINOR: [i32; 120] = [
    0,  0,  0,  0,  0,  0,  0,  0,  0,  0,
    0,  0,  0,  0,  0,  0,  0,  0,  0,  0,
    0,  0,  1,  2,  3,  3,  2,  1,  0,  0,
    0,  1,  4,  5,  6,  6,  5,  4,  1,  0,
    0,  2,  5,  7,  8,  8,  7,  5,  2,  0,
    0,  3,  6,  9, 11, 11,  9,  6,  3,  0,
    0,  3,  6,  9, 11, 11,  9,  6,  3,  0,
    0,  2,  5,  7,  8,  8,  7,  5,  2,  0,
    0,  1,  4,  5,  6,  6,  5,  4,  1,  0,
    0,  0,  1,  2,  3,  3,  2,  1,  0,  0,
    0,  0,  0,  0,  0,  0,  0,  0,  0,  0,
    0,  0,  0,  0,  0,  0,  0,  0,  0,  0,
];

/// Square color parity, for the bad-bishop rule.
#[rustfmt::skip]
const SQUARE_COLOR: [u8; 120] = [
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 1, 0, 1, 0, 1, 0, 1, 0, 0,
    0, 0, 1, 0, 1, 0, 1, 0, 1, 0,
    0, 1, 0, 1, 0, 1, 0, 1, 0, 0,
    0, 0, 1, 0, 1, 0, 1, 0, 1, 0,
    0, 1, 0, 1, 0, 1, 0, 1, 0, 0,
    0, 0, 1, 0, 1, 0, 1, 0, 1, 0,
    0, 1, 0, 1, 0, 1, 0, 1, 0, 0,
    0, 0, 1, 0, 1, 0, 1, 0, 1, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
];

/// Pawn-structure value keyed by the per-color file-occupancy mask.
#[rustfmt::skip]
const PAWN_FILES: [i32; 256] = [
     0,  3,  4,  7,  6,  7, 10, 13,  7,  8,  9, 12, 13, 14, 17, 20,
     7,  8,  9, 12, 11, 12, 15, 18, 14, 15, 16, 19, 20, 21, 24, 27,
     6,  7,  8, 11, 10, 11, 14, 17, 11, 12, 13, 16, 17, 18, 21, 24,
    13, 14, 15, 18, 17, 18, 21, 24, 20, 21, 22, 25, 26, 27, 30, 33,
     4,  5,  6,  9,  8,  9, 12, 15,  9, 10, 11, 14, 15, 16, 19, 22,
     9, 10, 11, 14, 13, 14, 17, 20, 16, 17, 18, 21, 22, 23, 26, 29,
    10, 11, 12, 15, 14, 15, 18, 21, 15, 16, 17, 20, 21, 22, 25, 28,
    17, 18, 19, 22, 21, 22, 25, 28, 24, 25, 26, 29, 30, 31, 34, 37,
     3,  4,  5,  8,  7,  8, 11, 14,  8,  9, 10, 13, 14, 15, 18, 21,
     8,  9, 10, 13, 12, 13, 16, 19, 15, 16, 17, 20, 21, 22, 25, 28,
     7,  8,  9, 12, 11, 12, 15, 18, 12, 13, 14, 17, 18, 19, 22, 25,
    14, 15, 16, 19, 18, 19, 22, 25, 21, 22, 23, 26, 27, 28, 31, 34,
     7,  8,  9, 12, 11, 12, 15, 18, 12, 13, 14, 17, 18, 19, 22, 25,
    12, 13, 14, 17, 16, 17, 20, 23, 19, 20, 21, 24, 25, 26, 29, 32,
    13, 14, 15, 18, 17, 18, 21, 24, 18, 19, 20, 23, 24, 25, 28, 31,
    20, 21, 22, 25, 24, 25, 28, 31, 27, 28, 29, 32, 33, 34, 37, 40,
];

/// File masks covering a king file and its neighbors; a rook or queen
/// on a file in this zone aims at the king. The h-file entry is empty:
/// a king on h gets no zone.
const KING_FILE_ZONE: [u32; 8] = [0x03, 0x07, 0x0e, 0x1c, 0x38, 0x70, 0xe0, 0x00];

/// Walk straight behind a pawn: the first piece found decides between a
/// supporting own straight-slider (+15), an attacking enemy one (-15),
/// or nothing.
#[inline]
fn behind_on_file(board: &Board, k: usize, step: isize, own: u32, enemy: u32) -> i32 {
    let mut kk = k as isize;
    loop {
        kk += step;
        let code = board.squares[kk as usize];
        if code & own == own {
            return 15;
        }
        if code & enemy == enemy {
            return -15;
        }
        if code != EMPTY {
            return 0;
        }
    }
}

/// Closeness to the enemy king: 7 minus the Chebyshev distance.
#[inline]
fn king_closeness(from: usize, king: usize) -> i32 {
    let df = (file_of(king) as i32 - file_of(from) as i32).abs();
    let dr = (rank_of(king) as i32 - rank_of(from) as i32).abs();
    7 - df.max(dr)
}

/// Open and semi-open file bonus, doubled when the file aims at the
/// enemy king's neighborhood.
#[inline]
fn open_file_bonus(k: usize, own_pawns: u32, enemy_pawns: u32, king_zone: u32) -> i32 {
    let bit = 1u32 << file_of(k);
    if own_pawns & bit == 0 {
        if enemy_pawns & bit == 0 {
            if king_zone & bit != 0 {
                20
            } else {
                12
            }
        } else if king_zone & bit != 0 {
            10
        } else {
            6
        }
    } else {
        0
    }
}

/// Placement plus king proximity, with a nudge for keeping the forward
/// diagonals clear of own pawns.
#[inline]
fn score_bishop(board: &Board, k: usize, enemy_king: usize, fl: isize, fr: isize, own_pawn: u32) -> i32 {
    let mut score = PLACE_MINOR[k] + king_closeness(k, enemy_king);
    if board.squares[(k as isize + fl) as usize] != own_pawn {
        score += 2;
    }
    if board.squares[(k as isize + fr) as usize] != own_pawn {
        score += 2;
    }
    score
}

/// Lone-bishop penalty when own pawns sit on center squares of the
/// bishop's color.
fn bad_bishop(board: &Board, k: usize, own_pawn: u32) -> i32 {
    let mut score = 0;
    if SQUARE_COLOR[k] == 1 {
        if board.squares[54] == own_pawn {
            score -= 10;
        }
        if board.squares[65] == own_pawn {
            score -= 10;
        }
        if board.squares[63] == own_pawn {
            score -= 9;
        }
        if board.squares[56] == own_pawn {
            score -= 9;
        }
        if board.squares[43] == own_pawn {
            score -= 8;
        }
        if board.squares[45] == own_pawn {
            score -= 8;
        }
        if board.squares[74] == own_pawn {
            score -= 8;
        }
        if board.squares[76] == own_pawn {
            score -= 8;
        }
    } else {
        if board.squares[55] == own_pawn {
            score -= 10;
        }
        if board.squares[64] == own_pawn {
            score -= 10;
        }
        if board.squares[53] == own_pawn {
            score -= 9;
        }
        if board.squares[66] == own_pawn {
            score -= 9;
        }
        if board.squares[44] == own_pawn {
            score -= 8;
        }
        if board.squares[46] == own_pawn {
            score -= 8;
        }
        if board.squares[73] == own_pawn {
            score -= 8;
        }
        if board.squares[75] == own_pawn {
            score -= 8;
        }
    }
    score
}

/// Placement plus king proximity; first-rank knights are penalized,
/// advanced knights get support-point bonuses when own pawns guard
/// them from behind.
#[inline]
fn score_knight(
    board: &Board,
    k: usize,
    enemy_king: usize,
    home_rank: usize,
    strong_rank: usize,
    good_rank: usize,
    bl: isize,
    br: isize,
    own_pawn: u32,
) -> i32 {
    let mut score = PLACE_MINOR[k] + king_closeness(k, enemy_king);
    let rank = rank_of(k);
    if rank == home_rank {
        score -= 9;
    } else if rank == strong_rank {
        if board.squares[(k as isize + bl) as usize] == own_pawn {
            score += 6;
        }
        if board.squares[(k as isize + br) as usize] == own_pawn {
            score += 6;
        }
    } else if rank == good_rank {
        if board.squares[(k as isize + bl) as usize] == own_pawn {
            score += 3;
        }
        if board.squares[(k as isize + br) as usize] == own_pawn {
            score += 3;
        }
    }
    score
}

/// Evaluate the position for the side to move.
pub fn evaluate(board: &Board) -> i32 {
    let mut score: i32 = 0;

    let wk = board.wk;
    let bk = board.bk;
    let mut wq: Option<usize> = None;
    let mut bq: Option<usize> = None;
    let (mut wr1, mut wr2): (Option<usize>, Option<usize>) = (None, None);
    let (mut br1, mut br2): (Option<usize>, Option<usize>) = (None, None);
    let (mut wb1, mut wb2): (Option<usize>, Option<usize>) = (None, None);
    let (mut bb1, mut bb2): (Option<usize>, Option<usize>) = (None, None);
    let (mut wn1, mut wn2): (Option<usize>, Option<usize>) = (None, None);
    let (mut bn1, mut bn2): (Option<usize>, Option<usize>) = (None, None);
    let mut white_pawns: u32 = 0;
    let mut black_pawns: u32 = 0;

    let total = board.piece_count();

    for &k in board.lists.squares(0) {
        match board.squares[k] {
            WKING => debug_assert_eq!(wk, k),
            WQUEEN => {
                score += 900;
                wq = Some(k);
            }
            WROOK => {
                score += 500;
                if wr1.is_some() {
                    wr2 = Some(k);
                } else {
                    wr1 = Some(k);
                }
            }
            WBISHOP => {
                score += 301;
                if wb1.is_some() {
                    wb2 = Some(k);
                } else {
                    wb1 = Some(k);
                }
            }
            WKNIGHT => {
                score += 300;
                if wn1.is_some() {
                    wn2 = Some(k);
                } else {
                    wn1 = Some(k);
                }
            }
            WPAWN => {
                score += 98;
                white_pawns |= 1 << file_of(k);
                if board.squares[k - 9] == WPAWN
                    || board.squares[k + 1] == WPAWN
                    || board.squares[k + 11] == WPAWN
                {
                    score += 1;
                }
                match rank_of(k) {
                    6 => {
                        score += 55 + behind_on_file(board, k, -10, WSTRT, BSTRT);
                        if board.squares[k - 1] == WPAWN || board.squares[k - 11] == WPAWN {
                            score += 14;
                        }
                        if board.squares[k + 1] == WPAWN || board.squares[k - 9] == WPAWN {
                            score += 14;
                        }
                    }
                    5 => {
                        if board.squares[k + 9] != BPAWN
                            && board.squares[k + 10] != BPAWN
                            && board.squares[k + 11] != BPAWN
                        {
                            score += 34 + behind_on_file(board, k, -10, WSTRT, BSTRT);
                        }
                    }
                    4 => {
                        if board.squares[k + 9] != BPAWN
                            && board.squares[k + 19] != BPAWN
                            && board.squares[k + 10] != BPAWN
                            && board.squares[k + 20] != BPAWN
                            && board.squares[k + 11] != BPAWN
                            && board.squares[k + 21] != BPAWN
                        {
                            score += 23 + behind_on_file(board, k, -10, WSTRT, BSTRT);
                        }
                    }
                    _ => {}
                }
            }
            _ => debug_assert!(false, "foreign code in white list"),
        }
    }

    for &k in board.lists.squares(1) {
        match board.squares[k] {
            BKING => debug_assert_eq!(bk, k),
            BQUEEN => {
                score -= 900;
                bq = Some(k);
            }
            BROOK => {
                score -= 500;
                if br1.is_some() {
                    br2 = Some(k);
                } else {
                    br1 = Some(k);
                }
            }
            BBISHOP => {
                score -= 301;
                if bb1.is_some() {
                    bb2 = Some(k);
                } else {
                    bb1 = Some(k);
                }
            }
            BKNIGHT => {
                score -= 300;
                if bn1.is_some() {
                    bn2 = Some(k);
                } else {
                    bn1 = Some(k);
                }
            }
            BPAWN => {
                score -= 98;
                black_pawns |= 1 << file_of(k);
                if board.squares[k - 9] == BPAWN
                    || board.squares[k + 1] == BPAWN
                    || board.squares[k + 11] == BPAWN
                {
                    score -= 1;
                }
                match rank_of(k) {
                    1 => {
                        score -= 55 + behind_on_file(board, k, 10, BSTRT, WSTRT);
                        if board.squares[k - 1] == BPAWN || board.squares[k + 9] == BPAWN {
                            score -= 14;
                        }
                        if board.squares[k + 1] == BPAWN || board.squares[k + 11] == BPAWN {
                            score -= 14;
                        }
                    }
                    2 => {
                        if board.squares[k - 11] != WPAWN
                            && board.squares[k - 10] != WPAWN
                            && board.squares[k - 9] != WPAWN
                        {
                            score -= 34 + behind_on_file(board, k, 10, BSTRT, WSTRT);
                        }
                    }
                    3 => {
                        if board.squares[k - 11] != WPAWN
                            && board.squares[k - 21] != WPAWN
                            && board.squares[k - 10] != WPAWN
                            && board.squares[k - 20] != WPAWN
                            && board.squares[k - 19] != WPAWN
                            && board.squares[k - 9] != WPAWN
                        {
                            score -= 23 + behind_on_file(board, k, 10, BSTRT, WSTRT);
                        }
                    }
                    _ => {}
                }
            }
            _ => debug_assert!(false, "foreign code in black list"),
        }
    }

    if total > 5 {
        score += PAWN_FILES[white_pawns as usize] - PAWN_FILES[black_pawns as usize];

        if wb2.is_some() && bb2.is_none() {
            score += 6;
        } else if bb2.is_some() && wb2.is_none() {
            score -= 6;
        }

        if let Some(b1) = wb1 {
            score += score_bishop(board, b1, bk, 9, 11, WPAWN);
            if let Some(b2) = wb2 {
                score += score_bishop(board, b2, bk, 9, 11, WPAWN);
            } else {
                score += bad_bishop(board, b1, WPAWN);
            }
        }
        if let Some(n1) = wn1 {
            score += score_knight(board, n1, bk, 0, 6, 5, -11, -9, WPAWN);
            if let Some(n2) = wn2 {
                score += score_knight(board, n2, bk, 0, 6, 5, -11, -9, WPAWN);
            }
        }
        if let Some(b1) = bb1 {
            score -= score_bishop(board, b1, wk, -11, -9, BPAWN);
            if let Some(b2) = bb2 {
                score -= score_bishop(board, b2, wk, -11, -9, BPAWN);
            } else {
                score -= bad_bishop(board, b1, BPAWN);
            }
        }
        if let Some(n1) = bn1 {
            score -= score_knight(board, n1, wk, 7, 3, 4, 9, 11, BPAWN);
            if let Some(n2) = bn2 {
                score -= score_knight(board, n2, wk, 7, 3, 4, 9, 11, BPAWN);
            }
        }

        let white_king_zone = KING_FILE_ZONE[file_of(wk)];
        let black_king_zone = KING_FILE_ZONE[file_of(bk)];
        if let Some(q) = wq {
            score += open_file_bonus(q, white_pawns, black_pawns, black_king_zone)
                + king_closeness(q, bk);
        }
        if let Some(q) = bq {
            score -= open_file_bonus(q, black_pawns, white_pawns, white_king_zone)
                + king_closeness(q, wk);
        }
        if let Some(r1) = wr1 {
            score += open_file_bonus(r1, white_pawns, black_pawns, black_king_zone)
                + king_closeness(r1, bk);
            if let Some(r2) = wr2 {
                score += open_file_bonus(r2, white_pawns, black_pawns, black_king_zone)
                    + king_closeness(r2, bk);
                if file_of(r1) == file_of(r2) {
                    score += 4;
                }
                if rank_of(r1) == 6 && rank_of(r2) == 6 {
                    score += 5;
                }
            }
        }
        if let Some(r1) = br1 {
            score -= open_file_bonus(r1, black_pawns, white_pawns, white_king_zone)
                + king_closeness(r1, wk);
            if let Some(r2) = br2 {
                score -= open_file_bonus(r2, black_pawns, white_pawns, white_king_zone)
                    + king_closeness(r2, wk);
                if file_of(r1) == file_of(r2) {
                    score -= 4;
                }
                if rank_of(r1) == 1 && rank_of(r2) == 1 {
                    score -= 5;
                }
            }
        }

        if total <= 18 {
            // Develop the king once the enemy queen is gone.
            if bq.is_none() {
                score += PLACE_MINOR[wk];
            }
            if wq.is_none() {
                score -= PLACE_MINOR[bk];
            }
        } else if total >= 24 {
            if board.squares[54] == WPAWN {
                score += 6;
            } else if board.squares[54] == BPAWN {
                score -= 4;
            }
            if board.squares[55] == WPAWN {
                score += 6;
            } else if board.squares[55] == BPAWN {
                score -= 4;
            }
            if board.squares[64] == WPAWN {
                score += 4;
            } else if board.squares[64] == BPAWN {
                score -= 6;
            }
            if board.squares[65] == WPAWN {
                score += 4;
            } else if board.squares[65] == BPAWN {
                score -= 6;
            }
            if (wk == 27 && board.squares[28] == EMPTY) || wk == 23 {
                score += 9;
            }
            if (bk == 97 && board.squares[98] == EMPTY) || bk == 93 {
                score -= 9;
            }
            if wk <= 28 {
                score += 5;
            }
            if bk >= 91 {
                score -= 5;
            }
            if !is_white(board.squares[wk + 9]) {
                score -= 10;
            }
            if !is_white(board.squares[wk + 10]) {
                score -= 10;
            }
            if !is_white(board.squares[wk + 11]) {
                score -= 10;
            }
            if !is_black(board.squares[bk - 11]) {
                score += 10;
            }
            if !is_black(board.squares[bk - 10]) {
                score += 10;
            }
            if !is_black(board.squares[bk - 9]) {
                score += 10;
            }
            if let Some(q) = wq {
                if (21..=38).contains(&q) {
                    score += 7;
                }
            }
            if let Some(q) = bq {
                if q >= 81 {
                    score -= 7;
                }
            }
        }
    } else {
        // Drawn-material configurations; the search finds exceptions.
        match total {
            0..=2 => return 0,
            3 => {
                if wq.is_none()
                    && bq.is_none()
                    && white_pawns == 0
                    && black_pawns == 0
                    && wr1.is_none()
                    && br1.is_none()
                {
                    return 0; // bare minor
                }
            }
            _ => {
                if total == 4 {
                    if wq.is_some() && bq.is_some() {
                        return 0; // opposing queens
                    } else if (wr1.is_some() || wb1.is_some() || wn1.is_some())
                        && (br1.is_some() || bb1.is_some() || bn1.is_some())
                    {
                        return 0; // rook or minor each
                    } else if wn2.is_some() || bn2.is_some() {
                        return 0; // two knights cannot mate
                    } else if ((wb1.is_some() || wn1.is_some()) && black_pawns != 0)
                        || ((bb1.is_some() || bn1.is_some()) && white_pawns != 0)
                    {
                        return 0; // minor against pawn
                    }
                }
                if ((wr1.is_some() || wb1.is_some() || wn1.is_some())
                    && (bb2.is_some() || bn2.is_some() || (bb1.is_some() && bn1.is_some())))
                    || ((br1.is_some() || bb1.is_some() || bn1.is_some())
                        && (wb2.is_some() || wn2.is_some() || (wb1.is_some() && wn1.is_some())))
                {
                    return 0; // rook or minor against two minors
                }
                if (wr1.is_some() && (wb1.is_some() || wn1.is_some()) && br1.is_some())
                    || (br1.is_some() && (bb1.is_some() || bn1.is_some()) && wr1.is_some())
                {
                    return 0; // rook plus minor against rook
                }
            }
        }
    }

    if board.white_to_move() {
        score
    } else {
        -score
    }
}
