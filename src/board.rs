//! The 10x12 mailbox board, the packed state word, and FEN parsing.
//!
//! Playable squares are indices 21..=98 with a1 at 21 and h8 at 98;
//! file = index % 10 - 1, rank = index / 10 - 2. Ranks 0, 1, 10, 11 and
//! the two padding files carry the FULL sentinel, so sliding scans
//! always terminate on a non-empty, non-capturable cell without bounds
//! checks.
//!
//! The state word packs the en-passant file (0xF meaning none), the
//! four castling-rights bits, and the side to move. Derived slots live
//! alongside the grid: the Zobrist key, the ply counter with its
//! bounded repetition ring, the fifty-move counter, both king squares,
//! and the sparse piece lists.

use std::error::Error;
use std::fmt;

use crate::piece_lists::PieceLists;
use crate::piece_types::*;

/// Cells in the mailbox grid, sentinel ring included.
pub const BOARD_CELLS: usize = 120;
/// First and last playable indices (a1 and h8).
pub const SQ_A1: usize = 21;
pub const SQ_H8: usize = 98;
/// Capacity of the repetition ring.
pub const HISTORY_LEN: usize = 1024;

/// En-passant file, castling rights, and side to move in one word.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct State(pub u32);

impl State {
    /// No en-passant file, no castling rights, white to move.
    pub const FRESH: State = State(0x000f);

    /// En-passant file 0..=7, or 0xF when none is set.
    #[inline]
    pub fn ep_file(self) -> u32 {
        self.0 & 0x000f
    }

    #[inline]
    pub fn white_kingside(self) -> bool {
        self.0 & 0x0010 != 0
    }

    #[inline]
    pub fn white_queenside(self) -> bool {
        self.0 & 0x0020 != 0
    }

    #[inline]
    pub fn black_kingside(self) -> bool {
        self.0 & 0x0040 != 0
    }

    #[inline]
    pub fn black_queenside(self) -> bool {
        self.0 & 0x0080 != 0
    }

    #[inline]
    pub fn any_castling(self) -> bool {
        self.0 & 0x00f0 != 0
    }

    #[inline]
    pub fn white_to_move(self) -> bool {
        self.0 & 0x0100 == 0
    }

    /// Flip the side to move and clear the en-passant file. Applied by
    /// every full-mode make and by the null move.
    #[inline]
    pub fn advance(&mut self) {
        self.0 = (self.0 | 0x000f) ^ 0x0100;
    }

    #[inline]
    pub fn set_ep_file(&mut self, file: u32) {
        debug_assert!(file < 8);
        self.0 = (self.0 & !0x000f) | file;
    }

    #[inline]
    pub fn set_white_to_move(&mut self) {
        self.0 &= !0x0100;
    }

    #[inline]
    pub fn set_black_to_move(&mut self) {
        self.0 |= 0x0100;
    }

    #[inline]
    pub fn set_white_kingside(&mut self) {
        self.0 |= 0x0010;
    }

    #[inline]
    pub fn set_white_queenside(&mut self) {
        self.0 |= 0x0020;
    }

    #[inline]
    pub fn set_black_kingside(&mut self) {
        self.0 |= 0x0040;
    }

    #[inline]
    pub fn set_black_queenside(&mut self) {
        self.0 |= 0x0080;
    }

    #[inline]
    pub fn clear_white_castling(&mut self) {
        self.0 &= !0x0030;
    }

    #[inline]
    pub fn clear_white_kingside(&mut self) {
        self.0 &= !0x0010;
    }

    #[inline]
    pub fn clear_white_queenside(&mut self) {
        self.0 &= !0x0020;
    }

    #[inline]
    pub fn clear_black_castling(&mut self) {
        self.0 &= !0x00c0;
    }

    #[inline]
    pub fn clear_black_kingside(&mut self) {
        self.0 &= !0x0040;
    }

    #[inline]
    pub fn clear_black_queenside(&mut self) {
        self.0 &= !0x0080;
    }
}

/// Why a FEN string was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    /// Placement field ran outside the board or used an unknown char.
    BadPlacement(char),
    /// Placement field was truncated.
    TruncatedPlacement,
    /// Active-color field was not `w` or `b`.
    BadColor(String),
    /// Castling field held something other than `KQkq` or `-`.
    BadCastling(char),
    /// En-passant field was not a file letter plus rank 3/6, or `-`.
    BadEnPassant(String),
    /// A clock field was not an unsigned integer.
    BadClock(String),
    /// Fewer fields than the placement/color/castling/en-passant core.
    MissingField(&'static str),
    /// One side has no king (or more than one).
    BadKingCount,
}

impl fmt::Display for FenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FenError::BadPlacement(c) => write!(f, "bad placement character '{}'", c),
            FenError::TruncatedPlacement => write!(f, "placement field truncated"),
            FenError::BadColor(s) => write!(f, "bad active color '{}'", s),
            FenError::BadCastling(c) => write!(f, "bad castling character '{}'", c),
            FenError::BadEnPassant(s) => write!(f, "bad en-passant target '{}'", s),
            FenError::BadClock(s) => write!(f, "bad clock field '{}'", s),
            FenError::MissingField(name) => write!(f, "missing field: {}", name),
            FenError::BadKingCount => write!(f, "each side needs exactly one king"),
        }
    }
}

impl Error for FenError {}

/// The complete position: grid, state word, and every derived slot the
/// search mutates incrementally.
#[derive(Clone, Debug)]
pub struct Board {
    pub squares: [u32; BOARD_CELLS],
    pub state: State,
    /// Plies recorded in the repetition ring.
    pub ply: usize,
    /// Half-moves since the last capture or pawn move.
    pub fifty: u32,
    /// Incrementally maintained Zobrist key.
    pub key: u64,
    /// White king square.
    pub wk: usize,
    /// Black king square.
    pub bk: usize,
    pub lists: PieceLists,
    /// Zobrist keys of earlier positions, indexed by ply.
    pub history: [u64; HISTORY_LEN],
}

impl Board {
    /// An empty board: sentinel ring in place, every playable square
    /// empty, fresh state, zeroed clocks and kings.
    pub fn empty() -> Board {
        let mut squares = [FULL; BOARD_CELLS];
        for row in 2..10 {
            for file in 1..9 {
                squares[row * 10 + file] = EMPTY;
            }
        }
        Board {
            squares,
            state: State::FRESH,
            ply: 0,
            fifty: 0,
            key: 0,
            wk: 0,
            bk: 0,
            lists: PieceLists::new(),
            history: [0; HISTORY_LEN],
        }
    }

    /// Parse the six FEN fields. The Zobrist key is left at zero; the
    /// engine computes it from scratch once its tables are in reach.
    /// Missing clock fields default to zero.
    pub fn from_fen(fen: &str) -> Result<Board, FenError> {
        let mut board = Board::empty();
        let mut fields = fen.split_whitespace();

        let placement = fields.next().ok_or(FenError::MissingField("placement"))?;
        let mut k = 91; // a8; FEN ranks arrive 8 down to 1
        let mut row_start = 91;
        for c in placement.chars() {
            match c {
                '/' => {
                    if k != row_start + 8 {
                        return Err(FenError::TruncatedPlacement);
                    }
                    row_start -= 10;
                    if row_start < SQ_A1 {
                        return Err(FenError::BadPlacement(c));
                    }
                    k = row_start;
                }
                '1'..='8' => {
                    k += c as usize - '0' as usize;
                    if k > row_start + 8 {
                        return Err(FenError::BadPlacement(c));
                    }
                }
                _ => {
                    let code = match c {
                        'P' => WPAWN,
                        'N' => WKNIGHT,
                        'B' => WBISHOP,
                        'R' => WROOK,
                        'Q' => WQUEEN,
                        'K' => WKING,
                        'p' => BPAWN,
                        'n' => BKNIGHT,
                        'b' => BBISHOP,
                        'r' => BROOK,
                        'q' => BQUEEN,
                        'k' => BKING,
                        _ => return Err(FenError::BadPlacement(c)),
                    };
                    if k > row_start + 7 || board.squares[k] == FULL {
                        return Err(FenError::BadPlacement(c));
                    }
                    if code == WKING {
                        if board.wk != 0 {
                            return Err(FenError::BadKingCount);
                        }
                        board.wk = k;
                    } else if code == BKING {
                        if board.bk != 0 {
                            return Err(FenError::BadKingCount);
                        }
                        board.bk = k;
                    }
                    board.squares[k] = code;
                    k += 1;
                }
            }
        }
        if row_start != SQ_A1 || k != SQ_A1 + 8 {
            return Err(FenError::TruncatedPlacement);
        }
        if board.wk == 0 || board.bk == 0 {
            return Err(FenError::BadKingCount);
        }

        let color = fields.next().ok_or(FenError::MissingField("active color"))?;
        match color {
            "w" => board.state.set_white_to_move(),
            "b" => board.state.set_black_to_move(),
            _ => return Err(FenError::BadColor(color.to_string())),
        }

        let castling = fields.next().ok_or(FenError::MissingField("castling"))?;
        for c in castling.chars() {
            match c {
                'K' => board.state.set_white_kingside(),
                'Q' => board.state.set_white_queenside(),
                'k' => board.state.set_black_kingside(),
                'q' => board.state.set_black_queenside(),
                '-' => {}
                _ => return Err(FenError::BadCastling(c)),
            }
        }

        let ep = fields.next().ok_or(FenError::MissingField("en passant"))?;
        if ep != "-" {
            let mut chars = ep.chars();
            let file = chars.next();
            let rank = chars.next();
            match (file, rank, chars.next()) {
                (Some(f @ 'a'..='h'), Some('3' | '6'), None) => {
                    board.state.set_ep_file(f as u32 - 'a' as u32);
                }
                _ => return Err(FenError::BadEnPassant(ep.to_string())),
            }
        }

        if let Some(halfmove) = fields.next() {
            board.fifty = halfmove
                .parse()
                .map_err(|_| FenError::BadClock(halfmove.to_string()))?;
        }
        if let Some(fullmove) = fields.next() {
            // Parsed for validation only; the search never consults it.
            let _: u32 = fullmove
                .parse()
                .map_err(|_| FenError::BadClock(fullmove.to_string()))?;
        }

        board.lists.rebuild(&board.squares);
        Ok(board)
    }

    #[inline]
    pub fn white_to_move(&self) -> bool {
        self.state.white_to_move()
    }

    /// Total pieces on the board, kings included.
    #[inline]
    pub fn piece_count(&self) -> usize {
        self.lists.count(0) + self.lists.count(1)
    }
}

/// File 0..=7 of a playable square.
#[inline]
pub fn file_of(sq: usize) -> usize {
    sq % 10 - 1
}

/// Rank 0..=7 of a playable square (rank 0 is the white home rank).
#[inline]
pub fn rank_of(sq: usize) -> usize {
    sq / 10 - 2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_board_has_sentinel_ring() {
        let board = Board::empty();
        for k in 0..20 {
            assert_eq!(board.squares[k], FULL);
        }
        for k in 100..120 {
            assert_eq!(board.squares[k], FULL);
        }
        for row in 2..10 {
            assert_eq!(board.squares[row * 10], FULL);
            assert_eq!(board.squares[row * 10 + 9], FULL);
        }
        assert_eq!(board.squares[SQ_A1], EMPTY);
        assert_eq!(board.squares[SQ_H8], EMPTY);
    }

    #[test]
    fn square_coordinates() {
        assert_eq!(file_of(SQ_A1), 0);
        assert_eq!(rank_of(SQ_A1), 0);
        assert_eq!(file_of(SQ_H8), 7);
        assert_eq!(rank_of(SQ_H8), 7);
        assert_eq!(file_of(25), 4); // e1
        assert_eq!(rank_of(95), 7); // e8
    }
}
