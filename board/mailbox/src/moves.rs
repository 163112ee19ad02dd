//! The movement rules for each kind of piece
//!
//! These produce pseudo-legal destinations: they follow the movement and capture pattern of the
//! piece but never look at whether a king ends up in check.

use board::{BoardSquare, BoardSquareOffset, Color, Piece, PieceKind};

use crate::{Bitboard, Mailbox};

/// All squares the given piece could move to from `from`, ignoring check
///
/// The caller is expected to pass the piece that actually stands on `from`. A piece with nowhere
/// to go gets an empty bitboard.
pub fn candidate_destinations(piece: Piece, from: BoardSquare, board: &Mailbox) -> Bitboard {
    match piece.kind {
        PieceKind::King => steps(piece.color, from, &BoardSquareOffset::KING_MOVES, board),
        PieceKind::Knight => steps(piece.color, from, &BoardSquareOffset::KNIGHT_MOVES, board),
        PieceKind::Rook => rays(piece.color, from, &BoardSquareOffset::ORTHOGONAL, board),
        PieceKind::Bishop => rays(piece.color, from, &BoardSquareOffset::DIAGONAL, board),
    }
}

/// A square is a valid landing spot if it's empty or holds an enemy piece
fn can_land(color: Color, square: BoardSquare, board: &Mailbox) -> bool {
    board.get(square).map_or(true, |occupant| occupant.color != color)
}

/// Single jumps by each offset; nothing in between can block them
fn steps(
    color: Color,
    from: BoardSquare,
    offsets: &[BoardSquareOffset],
    board: &Mailbox,
) -> Bitboard {
    offsets
        .iter()
        .filter_map(|&offset| from.offset(offset))
        .filter(|&square| can_land(color, square, board))
        .collect()
}

/// Slides along each direction until the edge of the board or the first piece
///
/// The first piece hit is included if it can be captured.
fn rays(
    color: Color,
    from: BoardSquare,
    directions: &[BoardSquareOffset],
    board: &Mailbox,
) -> Bitboard {
    let mut targets = Bitboard::empty();
    for &direction in directions {
        let mut square = from;
        while let Some(next) = square.offset(direction) {
            match board.get(next) {
                None => targets.insert(next),
                Some(occupant) => {
                    if occupant.color != color {
                        targets.insert(next);
                    }
                    break;
                }
            }
            square = next;
        }
    }
    targets
}

#[cfg(test)]
mod tests {
    use super::*;

    use quickcheck::{quickcheck, TestResult};

    use crate::tests::parse_board;

    fn squares(names: &[&str]) -> Bitboard {
        names
            .iter()
            .map(|name| name.parse::<BoardSquare>().unwrap())
            .collect()
    }

    fn destinations_at(board: &Mailbox, from: BoardSquare) -> Bitboard {
        let piece = board.get(from).expect("no piece on square under test");
        candidate_destinations(piece, from, board)
    }

    /// The squares strictly between two squares on a shared line
    fn between(from: BoardSquare, to: BoardSquare) -> Vec<BoardSquare> {
        let df = (to.file() as i8 - from.file() as i8).signum();
        let dr = (to.rank() as i8 - from.rank() as i8).signum();
        let step = BoardSquareOffset::new(df, dr);
        let mut squares = Vec::new();
        let mut square = from.offset(step).unwrap();
        while square != to {
            squares.push(square);
            square = square.offset(step).unwrap();
        }
        squares
    }

    #[test]
    fn test_initial_position_destinations() {
        let board = Mailbox::INITIAL_STATE;
        assert!(destinations_at(&board, BoardSquare::A1).is_empty());
        assert_eq!(
            destinations_at(&board, BoardSquare::B1),
            squares(&["c1", "d1", "e1", "f1", "g1"])
        );
        assert_eq!(
            destinations_at(&board, BoardSquare::B2),
            squares(&["c1", "c3", "d4", "e5", "f6", "g7", "h8"])
        );
        assert_eq!(
            destinations_at(&board, BoardSquare::B3),
            squares(&["a5", "c5", "c1", "d4", "d2"])
        );
        assert_eq!(
            destinations_at(&board, BoardSquare::A3),
            squares(&["b5", "c4", "c2"])
        );
        assert!(destinations_at(&board, BoardSquare::A2).is_empty());
    }

    #[test]
    fn test_king_moves() {
        let open = parse_board("8/8/8/8/3K4/8/8/7k");
        assert_eq!(destinations_at(&open, BoardSquare::D4).num_set(), 8);
        assert_eq!(
            destinations_at(&open, BoardSquare::H1),
            squares(&["g1", "g2", "h2"])
        );

        let crowded = parse_board("8/8/8/2rN4/3K4/8/8/7k");
        let moves = destinations_at(&crowded, BoardSquare::D4);
        assert!(moves.has(BoardSquare::C5), "enemy rook is capturable");
        assert!(!moves.has(BoardSquare::D5), "own knight blocks");
        assert_eq!(moves.num_set(), 7);
    }

    #[test]
    fn test_rook_stops_at_first_piece() {
        let board = parse_board("8/8/3n4/8/1N1R1b2/8/8/K6k");
        let moves = destinations_at(&board, BoardSquare::D4);
        assert_eq!(
            moves,
            squares(&["d5", "d6", "c4", "e4", "f4", "d3", "d2", "d1"])
        );
    }

    #[test]
    fn test_bishop_stops_at_first_piece() {
        let board = parse_board("8/6n1/8/8/3B4/2B5/5r2/K6k");
        let moves = destinations_at(&board, BoardSquare::D4);
        assert_eq!(
            moves,
            squares(&["e5", "f6", "g7", "c5", "b6", "a7", "e3", "f2"])
        );
    }

    #[test]
    fn test_knight_jumps_over_pieces() {
        let board = parse_board("8/8/8/2rrr3/2rnr3/2rrr3/8/K6k");
        let moves = destinations_at(&board, BoardSquare::D4);
        assert_eq!(
            moves,
            squares(&["c2", "e2", "b3", "f3", "b5", "f5", "c6", "e6"])
        );
    }

    quickcheck! {
        fn test_never_onto_own_piece(board: Mailbox, pick: usize) -> bool {
            let pieces: Vec<_> = board.pieces().collect();
            let (from, piece) = pieces[pick % pieces.len()];
            let moves = candidate_destinations(piece, from, &board);
            !moves.intersects(board.occupied_by(piece.color)) && !moves.has(from)
        }

        fn test_slides_are_unobstructed(board: Mailbox, pick: usize) -> TestResult {
            let sliders: Vec<_> = board
                .pieces()
                .filter(|(_, piece)| matches!(piece.kind, PieceKind::Rook | PieceKind::Bishop))
                .collect();
            if sliders.is_empty() {
                return TestResult::discard();
            }
            let (from, piece) = sliders[pick % sliders.len()];
            let moves = candidate_destinations(piece, from, &board);
            TestResult::from_bool(moves.squares_iter().all(|to| {
                between(from, to).into_iter().all(|square| board.get(square).is_none())
            }))
        }

        fn test_slide_blocker_included_iff_enemy(board: Mailbox, pick: usize) -> TestResult {
            let sliders: Vec<_> = board
                .pieces()
                .filter(|(_, piece)| matches!(piece.kind, PieceKind::Rook | PieceKind::Bishop))
                .collect();
            if sliders.is_empty() {
                return TestResult::discard();
            }
            let (from, piece) = sliders[pick % sliders.len()];
            let moves = candidate_destinations(piece, from, &board);
            let directions = match piece.kind {
                PieceKind::Rook => BoardSquareOffset::ORTHOGONAL,
                _ => BoardSquareOffset::DIAGONAL,
            };
            TestResult::from_bool(directions.into_iter().all(|direction| {
                let mut square = from;
                while let Some(next) = square.offset(direction) {
                    if let Some(occupant) = board.get(next) {
                        let beyond_excluded = core::iter::successors(next.offset(direction), |s| {
                            s.offset(direction)
                        })
                        .all(|s| !moves.has(s));
                        return moves.has(next) == (occupant.color != piece.color)
                            && beyond_excluded;
                    }
                    square = next;
                }
                true
            }))
        }
    }
}
