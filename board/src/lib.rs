//! Basic types shared by everything that deals with the kings' race variant
//!
//! The variant is played on a regular 8x8 board with only kings, rooks, bishops and knights. There
//! is no checkmate: the first king to reach the far rank wins.

use core::fmt;

mod square;

pub use crate::square::{BoardSquare, BoardSquareFromStrErr, BoardSquareOffset};

/// The types of pieces there are
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PieceKind {
    King,
    Rook,
    Bishop,
    Knight,
}
impl PieceKind {
    /// All the kinds of pieces there are
    pub const KINDS: [PieceKind; 4] = [Self::King, Self::Rook, Self::Bishop, Self::Knight];

    /// The capitalized letter used for this piece in placement strings
    pub const fn letter(self) -> char {
        match self {
            Self::King => 'K',
            Self::Rook => 'R',
            Self::Bishop => 'B',
            Self::Knight => 'N',
        }
    }

    /// The kind of piece with the given letter, in either case
    pub const fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'K' => Some(Self::King),
            'R' => Some(Self::Rook),
            'B' => Some(Self::Bishop),
            'N' => Some(Self::Knight),
            _ => None,
        }
    }
}

/// The colors a piece can have
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}
impl Color {
    pub const COLORS: [Color; 2] = [Self::White, Self::Black];

    pub const fn other(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}
impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Color::White => "White",
            Color::Black => "Black",
        })
    }
}

/// A piece
///
/// Pieces never change kind or color once they're on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
}
impl Piece {
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Self { kind, color }
    }

    /// The king of the given color
    pub const fn king(color: Color) -> Self {
        Self::new(PieceKind::King, color)
    }

    /// The letter for this piece, uppercase for white and lowercase for black
    pub const fn letter(self) -> char {
        match self.color {
            Color::White => self.kind.letter().to_ascii_uppercase(),
            Color::Black => self.kind.letter().to_ascii_lowercase(),
        }
    }

    /// Parse a piece from its letter, using the case to determine the color
    ///
    /// ```
    /// use board::{Color, Piece, PieceKind};
    /// assert_eq!(Piece::from_letter('n'), Some(Piece::new(PieceKind::Knight, Color::Black)));
    /// assert_eq!(Piece::from_letter('K'), Some(Piece::king(Color::White)));
    /// assert_eq!(Piece::from_letter('q'), None);
    /// ```
    pub const fn from_letter(letter: char) -> Option<Self> {
        let color = if letter.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        match PieceKind::from_letter(letter) {
            Some(kind) => Some(Self { kind, color }),
            None => None,
        }
    }

    /// Returns an iterator of all pieces that exist
    pub fn all_pieces() -> impl Iterator<Item = Self> {
        Color::COLORS
            .into_iter()
            .flat_map(|color| PieceKind::KINDS.into_iter().map(move |kind| Self { kind, color }))
    }
}

/// Where a game stands
///
/// Every status other than [`GameStatus::InProgress`] is terminal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GameStatus {
    #[default]
    InProgress,
    /// White's king reached the far rank
    WhiteWon,
    /// Black's king reached the far rank
    BlackWon,
    /// Both kings stand on the far rank at once
    Tie,
}
impl GameStatus {
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::InProgress)
    }

    /// The status naming the given color as the winner
    pub const fn won_by(color: Color) -> Self {
        match color {
            Color::White => Self::WhiteWon,
            Color::Black => Self::BlackWon,
        }
    }
}
impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::InProgress => "in progress",
            Self::WhiteWon => "white won",
            Self::BlackWon => "black won",
            Self::Tie => "tie",
        })
    }
}

#[cfg(feature = "quickcheck")]
mod arbitrary {
    use quickcheck::{Arbitrary, Gen};

    use crate::{BoardSquare, Color, Piece, PieceKind};

    impl Arbitrary for Color {
        fn arbitrary(g: &mut Gen) -> Self {
            *g.choose(&Color::COLORS).unwrap_or(&Color::White)
        }
    }

    impl Arbitrary for PieceKind {
        fn arbitrary(g: &mut Gen) -> Self {
            *g.choose(&PieceKind::KINDS).unwrap_or(&PieceKind::King)
        }
    }

    impl Arbitrary for Piece {
        fn arbitrary(g: &mut Gen) -> Self {
            Piece::new(PieceKind::arbitrary(g), Color::arbitrary(g))
        }
    }

    impl Arbitrary for BoardSquare {
        fn arbitrary(g: &mut Gen) -> Self {
            let index = usize::arbitrary(g) % 64;
            BoardSquare::from_index(index).unwrap_or(BoardSquare::A1)
        }

        fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
            let index = self.index();
            Box::new((0..index).rev().filter_map(BoardSquare::from_index).take(4))
        }
    }
}
