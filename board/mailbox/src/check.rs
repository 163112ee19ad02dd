//! Working out whether a king is in check
//!
//! Everything here takes the board as a parameter instead of reading it from a game, so a
//! hypothetical board can be checked before any move is committed.

use board::{BoardSquare, Color};

use crate::{candidate_destinations, Bitboard, Mailbox, Result};

/// The squares of every piece of color `by` that could move onto `target`
///
/// A square is considered attacked when an enemy piece could move there on its next turn, which is
/// exactly the squares where a king would be in check.
pub fn attackers(target: BoardSquare, by: Color, board: &Mailbox) -> Bitboard {
    board
        .pieces()
        .filter(|(_, piece)| piece.color == by)
        .filter(|&(square, piece)| candidate_destinations(piece, square, board).has(target))
        .map(|(square, _)| square)
        .collect()
}

/// Returns `true` if the given color's king is in check on this board
///
/// Fails with [`crate::Error::KingMissing`] if that king isn't on the board.
pub fn in_check(color: Color, board: &Mailbox) -> Result<bool> {
    let king = board.king_square(color)?;
    let attackers = attackers(king, color.other(), board);
    if !attackers.is_empty() {
        log::trace!("{color} king on {king} attacked from {attackers:?}");
    }
    Ok(!attackers.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    use board::{Piece, PieceKind};
    use quickcheck::quickcheck;

    use crate::{tests::parse_board, Error};

    #[test]
    fn test_no_check_at_start() {
        for color in Color::COLORS {
            assert_eq!(in_check(color, &Mailbox::INITIAL_STATE), Ok(false));
        }
    }

    #[test]
    fn test_check_by_each_kind() {
        // knight on f3 hits the king on e1
        assert_eq!(in_check(Color::White, &parse_board("7k/8/8/8/8/5n2/8/4K3")), Ok(true));
        // rook down the open e-file
        assert_eq!(in_check(Color::White, &parse_board("4r2k/8/8/8/8/8/8/4K3")), Ok(true));
        // bishop on the long diagonal
        assert_eq!(in_check(Color::Black, &parse_board("7k/8/8/8/8/8/8/B3K3")), Ok(true));
        // adjacent kings check each other
        let kings = parse_board("8/8/8/8/8/8/8/3Kk3");
        assert_eq!(in_check(Color::White, &kings), Ok(true));
        assert_eq!(in_check(Color::Black, &kings), Ok(true));
    }

    #[test]
    fn test_blocked_slider_does_not_check() {
        assert_eq!(in_check(Color::White, &parse_board("4r2k/8/8/4N3/8/8/8/4K3")), Ok(false));
        assert_eq!(in_check(Color::Black, &parse_board("7k/8/8/8/3n4/8/8/B3K3")), Ok(false));
        assert_eq!(in_check(Color::Black, &parse_board("7k/8/8/8/3N4/8/8/B3K3")), Ok(false));
    }

    #[test]
    fn test_own_pieces_never_check() {
        assert_eq!(in_check(Color::White, &parse_board("7k/8/8/8/8/5N2/8/4K1R1")), Ok(false));
    }

    #[test]
    fn test_attackers_lists_every_piece() {
        let board = parse_board("7k/8/8/8/8/5n2/8/r3K3");
        let attackers = attackers(BoardSquare::E1, Color::Black, &board);
        assert_eq!(
            attackers,
            Bitboard::from(BoardSquare::F3) | BoardSquare::A1
        );
    }

    #[test]
    fn test_missing_king_is_an_error() {
        let board = Mailbox::EMPTY.placed(BoardSquare::E1, Piece::king(Color::White));
        assert_eq!(in_check(Color::Black, &board), Err(Error::KingMissing(Color::Black)));
        let board = board.placed(BoardSquare::E8, Piece::new(PieceKind::Rook, Color::Black));
        assert_eq!(in_check(Color::White, &board), Ok(true));
    }

    quickcheck! {
        fn test_check_matches_attackers(board: Mailbox, color: Color) -> bool {
            let king = board.king_square(color).unwrap();
            in_check(color, &board) == Ok(!attackers(king, color.other(), &board).is_empty())
        }
    }
}
