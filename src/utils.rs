//! Square names and shorthand algebraic move formatting.

use crate::board::{file_of, rank_of, Board};
use crate::move_types::Move;
use crate::piece_types::{piece_letter, EMPTY};

/// Algebraic name of a playable square, e.g. `e4`.
pub fn square_name(sq: usize) -> String {
    format!("{}{}", (b'a' + file_of(sq) as u8) as char, rank_of(sq) + 1)
}

/// Shorthand algebraic rendering against the board the move came from:
/// piece letter, from-square, `-` or `x`, to-square, promotion letter,
/// `ep` for en passant, `0-0`/`0-0-0` for castling, and a trailing `+`
/// on checking moves.
pub fn format_move(board: &Board, mv: Move) -> String {
    let mut text = if mv.is_castle() {
        match mv.to() {
            27 | 97 => "0-0".to_string(),
            _ => "0-0-0".to_string(),
        }
    } else if mv.is_en_passant() {
        format!(
            "{}x{}ep",
            square_name(mv.from()),
            square_name(mv.to())
        )
    } else {
        let piece = board.squares[mv.from()];
        let sep = if board.squares[mv.to()] != EMPTY { 'x' } else { '-' };
        let mut text = String::new();
        if let Some(letter) = piece_letter(piece) {
            text.push(letter);
        }
        text.push_str(&square_name(mv.from()));
        text.push(sep);
        text.push_str(&square_name(mv.to()));
        if let Some(letter) = piece_letter(mv.promotion_piece()) {
            text.push(letter);
        }
        text
    };
    if mv.gives_check() {
        text.push('+');
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece_types::WQUEEN;

    #[test]
    fn square_names_span_the_board() {
        assert_eq!(square_name(21), "a1");
        assert_eq!(square_name(28), "h1");
        assert_eq!(square_name(55), "e4");
        assert_eq!(square_name(91), "a8");
        assert_eq!(square_name(98), "h8");
    }

    #[test]
    fn formats_the_move_kinds() {
        let board = Board::from_fen("6k1/P7/8/8/8/8/8/R5K1 w - - 0 1").unwrap();
        let quiet = Move::quiet(21, 91);
        assert_eq!(format_move(&board, quiet), "Ra1-a8");
        let promo = Move::promotion(81, 91, WQUEEN);
        assert_eq!(format_move(&board, promo), "a7-a8Q");
        let castle = Move::castle(25, 27);
        assert_eq!(format_move(&board, castle), "0-0");
        let check = Move::quiet(21, 91).with_check();
        assert_eq!(format_move(&board, check), "Ra1-a8+");
    }
}
