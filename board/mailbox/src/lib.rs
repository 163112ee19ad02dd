//! A plain 8x8 array board, with the movement and check rules of the kings' race variant
//!
//! The board here knows nothing about turns or game status, which live one level up in the `game`
//! crate. Everything in this crate is a pure function of a board snapshot, so the same code serves
//! both the live board and the scratch copies used to try a move out.

use core::{fmt, str::FromStr};

use board::{BoardSquare, Color, Piece, PieceKind};

mod bitboard;
mod check;
mod moves;

pub use crate::bitboard::Bitboard;
pub use crate::check::{attackers, in_check};
pub use crate::moves::candidate_destinations;

pub type Result<T, E = Error> = core::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    #[error("{0} king missing from the board")]
    KingMissing(Color),
    #[error("more than one {0} king on the board")]
    DuplicateKing(Color),
    #[error("invalid placement string: {0}")]
    InvalidPlacement(String),
}

/// A board stored as one optional piece per square
///
/// Squares are indexed by [`BoardSquare::index`], so iterating the array visits a1, b1, ..., h1,
/// a2, ..., h8. Every search over the board uses that order.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Mailbox {
    squares: [Option<Piece>; 64],
}

impl Mailbox {
    /// A board with no pieces on it
    pub const EMPTY: Self = Self {
        squares: [None; 64],
    };

    /// The layout every game starts from
    ///
    /// White holds the a- and b-files and black the g- and h-files, both on ranks 1 to 3.
    pub const INITIAL_STATE: Self = {
        use Color::{Black, White};
        use PieceKind::{Bishop, King, Knight, Rook};
        Self::EMPTY
            .placed(BoardSquare::A1, Piece::new(King, White))
            .placed(BoardSquare::B1, Piece::new(Rook, White))
            .placed(BoardSquare::A2, Piece::new(Bishop, White))
            .placed(BoardSquare::B2, Piece::new(Bishop, White))
            .placed(BoardSquare::A3, Piece::new(Knight, White))
            .placed(BoardSquare::B3, Piece::new(Knight, White))
            .placed(BoardSquare::H1, Piece::new(King, Black))
            .placed(BoardSquare::G1, Piece::new(Rook, Black))
            .placed(BoardSquare::H2, Piece::new(Bishop, Black))
            .placed(BoardSquare::G2, Piece::new(Bishop, Black))
            .placed(BoardSquare::H3, Piece::new(Knight, Black))
            .placed(BoardSquare::G3, Piece::new(Knight, Black))
    };

    /// This board with the given piece added, for building boards in `const` context
    pub const fn placed(mut self, square: BoardSquare, piece: Piece) -> Self {
        self.squares[square.index()] = Some(piece);
        self
    }

    /// Find the piece, if any, at the given square
    pub const fn get(&self, square: BoardSquare) -> Option<Piece> {
        self.squares[square.index()]
    }

    /// Put a piece on a square, returning whatever was there before
    pub fn put(&mut self, square: BoardSquare, piece: Piece) -> Option<Piece> {
        self.squares[square.index()].replace(piece)
    }

    /// Remove the piece on a square, if any
    pub fn take(&mut self, square: BoardSquare) -> Option<Piece> {
        self.squares[square.index()].take()
    }

    /// A copy of this board with whatever is on `from` moved onto `to`
    ///
    /// Anything on `to` is overwritten, which is how captures happen. `self` is left untouched.
    pub fn after_move(&self, from: BoardSquare, to: BoardSquare) -> Self {
        let mut scratch = self.clone();
        if let Some(piece) = scratch.take(from) {
            scratch.put(to, piece);
        }
        scratch
    }

    /// Every square with its occupant, in scan order
    pub fn squares(&self) -> impl Iterator<Item = (BoardSquare, Option<Piece>)> + '_ {
        BoardSquare::all_squares().map(move |square| (square, self.get(square)))
    }

    /// Every occupied square with its piece, in scan order
    pub fn pieces(&self) -> impl Iterator<Item = (BoardSquare, Piece)> + '_ {
        self.squares()
            .filter_map(|(square, piece)| piece.map(|piece| (square, piece)))
    }

    /// The number of pieces on the board
    pub fn piece_count(&self) -> usize {
        self.squares.iter().flatten().count()
    }

    /// The squares holding a piece of the given color
    pub fn occupied_by(&self, color: Color) -> Bitboard {
        self.pieces()
            .filter(|(_, piece)| piece.color == color)
            .map(|(square, _)| square)
            .collect()
    }

    /// The first square, in scan order, whose piece satisfies the predicate
    pub fn find(&self, mut predicate: impl FnMut(Piece) -> bool) -> Option<BoardSquare> {
        self.pieces()
            .find(|&(_, piece)| predicate(piece))
            .map(|(square, _)| square)
    }

    /// Get the square on which the given player's king resides
    ///
    /// A board without that king is corrupt, so this is [`Error::KingMissing`] rather than an
    /// `Option`.
    pub fn king_square(&self, color: Color) -> Result<BoardSquare> {
        self.find(|piece| piece == Piece::king(color))
            .ok_or(Error::KingMissing(color))
    }

    /// Check there is exactly one king of each color
    pub fn validate_kings(&self) -> Result<()> {
        for color in Color::COLORS {
            match self
                .pieces()
                .filter(|&(_, piece)| piece == Piece::king(color))
                .count()
            {
                0 => return Err(Error::KingMissing(color)),
                1 => {}
                _ => return Err(Error::DuplicateKing(color)),
            }
        }
        Ok(())
    }

    /// The colors whose king stands on the far rank
    pub fn kings_on_far_rank(&self) -> impl Iterator<Item = Color> + '_ {
        BoardSquare::rank_squares(BoardSquare::FAR_RANK)
            .filter_map(move |square| self.get(square))
            .filter(|piece| piece.kind == PieceKind::King)
            .map(|piece| piece.color)
    }

    /// The piece placement in FEN style, rank 8 first
    ///
    /// ```
    /// use mailbox::Mailbox;
    /// assert_eq!(Mailbox::INITIAL_STATE.to_placement(), "8/8/8/8/8/NN4nn/BB4bb/KR4rk");
    /// ```
    pub fn to_placement(&self) -> String {
        let rows = (0..8u8).rev().map(|rank| {
            let mut row = String::new();
            let mut empty = 0;
            for square in BoardSquare::rank_squares(rank) {
                match self.get(square) {
                    Some(piece) => {
                        if empty > 0 {
                            row.push_str(&empty.to_string());
                            empty = 0;
                        }
                        row.push(piece.letter());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                row.push_str(&empty.to_string());
            }
            row
        });
        rows.collect::<Vec<_>>().join("/")
    }
}

impl Default for Mailbox {
    fn default() -> Self {
        Self::INITIAL_STATE
    }
}

impl fmt::Debug for Mailbox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Mailbox").field(&self.to_placement()).finish()
    }
}

/// Parse the piece placement field of a FEN-style string
///
/// Kings aren't counted here, see [`Mailbox::validate_kings`].
impl FromStr for Mailbox {
    type Err = Error;

    fn from_str(placement: &str) -> Result<Self> {
        let rows: Vec<&str> = placement.trim().split('/').collect();
        if rows.len() != 8 {
            return Err(Error::InvalidPlacement(format!(
                "expected 8 ranks, found {}",
                rows.len()
            )));
        }
        let mut board = Self::EMPTY;
        for (row, rank) in rows.into_iter().zip((0..8u8).rev()) {
            let mut file = 0u8;
            for c in row.chars() {
                if let Some(skip) = c.to_digit(10).filter(|skip| (1..=8).contains(skip)) {
                    file += skip as u8;
                } else if let Some(piece) = Piece::from_letter(c) {
                    let square = BoardSquare::new(file, rank).ok_or_else(|| {
                        Error::InvalidPlacement(format!("rank {} is too long", rank + 1))
                    })?;
                    board.put(square, piece);
                    file += 1;
                } else {
                    return Err(Error::InvalidPlacement(format!(
                        "unexpected character {c:?}"
                    )));
                }
                if file > 8 {
                    return Err(Error::InvalidPlacement(format!(
                        "rank {} is too long",
                        rank + 1
                    )));
                }
            }
            if file != 8 {
                return Err(Error::InvalidPlacement(format!(
                    "rank {} is too short",
                    rank + 1
                )));
            }
        }
        Ok(board)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    use quickcheck::{Arbitrary, Gen};

    /// Random boards which always have exactly one king of each color
    impl Arbitrary for Mailbox {
        fn arbitrary(g: &mut Gen) -> Self {
            const OTHERS: [PieceKind; 3] = [PieceKind::Rook, PieceKind::Bishop, PieceKind::Knight];
            let mut board = Mailbox::EMPTY;
            for square in BoardSquare::all_squares() {
                if u8::arbitrary(g) % 4 == 0 {
                    let kind = *g.choose(&OTHERS).unwrap();
                    board.put(square, Piece::new(kind, Color::arbitrary(g)));
                }
            }
            let white_king = BoardSquare::arbitrary(g);
            let mut black_king = BoardSquare::arbitrary(g);
            while black_king == white_king {
                black_king = BoardSquare::arbitrary(g);
            }
            board.put(white_king, Piece::king(Color::White));
            board.put(black_king, Piece::king(Color::Black));
            board
        }
    }

    /// Shorthand for parsing a placement in tests
    pub(crate) fn parse_board(placement: &str) -> Mailbox {
        placement.parse().expect("invalid test placement")
    }

    #[test]
    fn test_initial_state_pieces() {
        let board = Mailbox::INITIAL_STATE;
        assert_eq!(board.piece_count(), 12);
        assert_eq!(board.get(BoardSquare::A1), Some(Piece::king(Color::White)));
        assert_eq!(board.get(BoardSquare::H1), Some(Piece::king(Color::Black)));
        assert_eq!(
            board.get(BoardSquare::G3),
            Some(Piece::new(PieceKind::Knight, Color::Black))
        );
        assert_eq!(board.get(BoardSquare::D4), None);
        assert_eq!(board.validate_kings(), Ok(()));
        assert_eq!(board.kings_on_far_rank().count(), 0);
    }

    #[test]
    fn test_placement_round_trip() {
        for placement in [
            "8/8/8/8/8/NN4nn/BB4bb/KR4rk",
            "5K2/8/3n4/8/2b5/8/8/7k",
            "8/8/8/8/8/8/8/8",
            "KkRrBbNn/8/8/8/8/8/8/8",
        ] {
            assert_eq!(parse_board(placement).to_placement(), placement);
        }
        assert_eq!(parse_board("8/8/8/8/8/NN4nn/BB4bb/KR4rk"), Mailbox::INITIAL_STATE);
    }

    #[test]
    fn test_bad_placements_rejected() {
        for bad in [
            "8/8/8/8/8/8/8",
            "8/8/8/8/8/8/8/8/8",
            "9/8/8/8/8/8/8/8",
            "7/8/8/8/8/8/8/8",
            "8/8/8/8/8/8/8/K8",
            "8/8/8/8/8/8/8/7q",
            "8/8/8/8/8/8/8/0K7",
        ] {
            assert!(
                matches!(bad.parse::<Mailbox>(), Err(Error::InvalidPlacement(_))),
                "{bad} parsed"
            );
        }
    }

    #[test]
    fn test_find_uses_scan_order() {
        let board = parse_board("8/8/8/8/8/8/1R6/6R1");
        let rook = |piece: Piece| piece.kind == PieceKind::Rook;
        assert_eq!(board.find(rook), Some(BoardSquare::G1));
        assert_eq!(board.find(|piece| piece.kind == PieceKind::King), None);
    }

    #[test]
    fn test_king_square() {
        let board = Mailbox::INITIAL_STATE;
        assert_eq!(board.king_square(Color::White), Ok(BoardSquare::A1));
        assert_eq!(board.king_square(Color::Black), Ok(BoardSquare::H1));
        assert_eq!(
            Mailbox::EMPTY.king_square(Color::Black),
            Err(Error::KingMissing(Color::Black))
        );
    }

    #[test]
    fn test_validate_kings() {
        assert_eq!(
            parse_board("8/8/8/8/8/8/8/K7").validate_kings(),
            Err(Error::KingMissing(Color::Black))
        );
        assert_eq!(
            parse_board("8/8/8/8/8/8/8/KK5k").validate_kings(),
            Err(Error::DuplicateKing(Color::White))
        );
    }

    #[test]
    fn test_after_move_leaves_original_alone() {
        let board = Mailbox::INITIAL_STATE;
        let moved = board.after_move(BoardSquare::B1, BoardSquare::G1);
        assert_eq!(board, Mailbox::INITIAL_STATE);
        assert_eq!(moved.get(BoardSquare::B1), None);
        assert_eq!(
            moved.get(BoardSquare::G1),
            Some(Piece::new(PieceKind::Rook, Color::White))
        );
        assert_eq!(moved.piece_count(), 11);
    }

    #[test]
    fn test_kings_on_far_rank() {
        let board = parse_board("K6k/8/8/8/8/8/8/8");
        let colors: Vec<_> = board.kings_on_far_rank().collect();
        assert_eq!(colors, [Color::White, Color::Black]);
    }
}
