//! Squares on the board, and the offsets between them

use core::{fmt, str::FromStr};

/// A square on the board
///
/// Stored in 0x88 method:
/// ```text
/// 0b12345678
///        +-+ File
///    +-+ Rank
///   +   + Must be zero
/// ```
///
/// Every value of this type names a square on the board. Stepping off the board is detected by
/// the guard bits when an offset is applied, see [`BoardSquare::offset`].
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoardSquare(u8);

/// Declare the constants for one rank, files a through h
macro_rules! rank_constants {
    ($rank:literal: $a:ident $b:ident $c:ident $d:ident $e:ident $f:ident $g:ident $h:ident) => {
        pub const $a: Self = Self($rank << 4);
        pub const $b: Self = Self($rank << 4 | 1);
        pub const $c: Self = Self($rank << 4 | 2);
        pub const $d: Self = Self($rank << 4 | 3);
        pub const $e: Self = Self($rank << 4 | 4);
        pub const $f: Self = Self($rank << 4 | 5);
        pub const $g: Self = Self($rank << 4 | 6);
        pub const $h: Self = Self($rank << 4 | 7);
    };
}

impl BoardSquare {
    rank_constants!(0: A1 B1 C1 D1 E1 F1 G1 H1);
    rank_constants!(1: A2 B2 C2 D2 E2 F2 G2 H2);
    rank_constants!(2: A3 B3 C3 D3 E3 F3 G3 H3);
    rank_constants!(3: A4 B4 C4 D4 E4 F4 G4 H4);
    rank_constants!(4: A5 B5 C5 D5 E5 F5 G5 H5);
    rank_constants!(5: A6 B6 C6 D6 E6 F6 G6 H6);
    rank_constants!(6: A7 B7 C7 D7 E7 F7 G7 H7);
    rank_constants!(7: A8 B8 C8 D8 E8 F8 G8 H8);

    /// The rank index a king has to reach to win
    pub const FAR_RANK: u8 = 7;

    /// Produce a square from zero-based file and rank, if both are on the board
    ///
    /// ```
    /// use board::BoardSquare;
    /// assert_eq!(BoardSquare::new(0, 0), Some(BoardSquare::A1));
    /// assert_eq!(BoardSquare::new(7, 7), Some(BoardSquare::H8));
    /// assert_eq!(BoardSquare::new(8, 0), None);
    /// ```
    pub const fn new(file: u8, rank: u8) -> Option<Self> {
        if file < 8 && rank < 8 {
            Some(Self(rank << 4 | file))
        } else {
            None
        }
    }

    /// The zero-based file, where `0` is the a-file
    pub const fn file(self) -> u8 {
        self.0 & 0x07
    }

    /// The zero-based rank, where `0` is rank 1
    pub const fn rank(self) -> u8 {
        self.0 >> 4
    }

    /// Dense index in `0..64`, counting a1, b1, ..., h1, a2, ..., h8
    pub const fn index(self) -> usize {
        (self.rank() * 8 + self.file()) as usize
    }

    /// Inverse of [`BoardSquare::index`]
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < 64 {
            Self::new((index % 8) as u8, (index / 8) as u8)
        } else {
            None
        }
    }

    /// Offset by the given amount, or `None` if that steps off the board
    ///
    /// ```rust
    /// use board::{BoardSquare, BoardSquareOffset};
    /// assert_eq!(BoardSquare::A1.offset(BoardSquareOffset::new(3, 1)), Some(BoardSquare::D2));
    /// assert_eq!(BoardSquare::D2.offset(BoardSquareOffset::new(-3, -1)), Some(BoardSquare::A1));
    /// assert_eq!(BoardSquare::D1.offset(BoardSquareOffset::new(0, -1)), None);
    /// assert_eq!(BoardSquare::D8.offset(BoardSquareOffset::new(0, 1)), None);
    /// assert_eq!(BoardSquare::A4.offset(BoardSquareOffset::new(-1, 0)), None);
    /// assert_eq!(BoardSquare::H4.offset(BoardSquareOffset::new(1, 0)), None);
    /// ```
    pub const fn offset(self, offset: BoardSquareOffset) -> Option<Self> {
        let raw = self.0 as i16 + offset.rank as i16 * 16 + offset.file as i16;
        // Leaving the board sets a guard bit or makes the value negative
        if raw & !0x77 == 0 {
            Some(Self(raw as u8))
        } else {
            None
        }
    }

    /// All squares on the board, in ascending rank and then ascending file
    ///
    /// ```
    /// use board::BoardSquare;
    /// assert_eq!(BoardSquare::all_squares().count(), 64);
    /// assert_eq!(BoardSquare::all_squares().nth(1), Some(BoardSquare::B1));
    /// ```
    pub fn all_squares() -> impl Iterator<Item = Self> {
        (0..64).filter_map(Self::from_index)
    }

    /// The squares of the given rank, from the a-file to the h-file
    pub fn rank_squares(rank: u8) -> impl Iterator<Item = Self> {
        (0..8).filter_map(move |file| Self::new(file, rank))
    }

    /// The file letter, `'a'` through `'h'`
    pub const fn file_char(self) -> char {
        (b'a' + self.file()) as char
    }

    /// The rank digit, `'1'` through `'8'`
    pub const fn rank_char(self) -> char {
        (b'1' + self.rank()) as char
    }
}
impl fmt::Debug for BoardSquare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoardSquare")
            .field("repr", &format_args!("{:02X}", self.0))
            .field("readable", &format_args!("{self}"))
            .finish()
    }
}
impl fmt::Display for BoardSquare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

/// Why a string couldn't be read as a square
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardSquareFromStrErr {
    #[error("a square is two characters, got {0}")]
    WrongLength(usize),
    #[error("file must be a letter from a to h, got {0:?}")]
    InvalidFile(char),
    #[error("rank must be a digit from 1 to 8, got {0:?}")]
    InvalidRank(char),
}

/// Parse a square in algebraic form, like `e4`
///
/// ```
/// use board::{BoardSquare, BoardSquareFromStrErr};
/// assert_eq!("a1".parse::<BoardSquare>(), Ok(BoardSquare::A1));
/// assert_eq!("h8".parse::<BoardSquare>(), Ok(BoardSquare::H8));
/// assert_eq!("i1".parse::<BoardSquare>(), Err(BoardSquareFromStrErr::InvalidFile('i')));
/// assert_eq!("a9".parse::<BoardSquare>(), Err(BoardSquareFromStrErr::InvalidRank('9')));
/// assert_eq!("a10".parse::<BoardSquare>(), Err(BoardSquareFromStrErr::WrongLength(3)));
/// ```
impl FromStr for BoardSquare {
    type Err = BoardSquareFromStrErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(BoardSquareFromStrErr::WrongLength(s.chars().count()));
        };
        let file_index = match file {
            'a'..='h' => file as u8 - b'a',
            _ => return Err(BoardSquareFromStrErr::InvalidFile(file)),
        };
        let rank_index = match rank {
            '1'..='8' => rank as u8 - b'1',
            _ => return Err(BoardSquareFromStrErr::InvalidRank(rank)),
        };
        Ok(Self(rank_index << 4 | file_index))
    }
}

/// An offset on a board, in files and ranks
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BoardSquareOffset {
    file: i8,
    rank: i8,
}
impl BoardSquareOffset {
    /// The offsets corresponding to all possible knight moves
    pub const KNIGHT_MOVES: [BoardSquareOffset; 8] = [
        Self::new(1, 2),
        Self::new(-1, 2),
        Self::new(1, -2),
        Self::new(-1, -2),
        Self::new(2, 1),
        Self::new(-2, 1),
        Self::new(2, -1),
        Self::new(-2, -1),
    ];

    /// The offsets corresponding to all possible king moves
    pub const KING_MOVES: [BoardSquareOffset; 8] = [
        Self::new(1, 1),
        Self::new(0, 1),
        Self::new(-1, 1),
        Self::new(1, 0),
        Self::new(-1, 0),
        Self::new(1, -1),
        Self::new(0, -1),
        Self::new(-1, -1),
    ];

    /// Unit steps along ranks and files
    pub const ORTHOGONAL: [BoardSquareOffset; 4] = [
        Self::new(0, 1),
        Self::new(0, -1),
        Self::new(1, 0),
        Self::new(-1, 0),
    ];

    /// Unit steps along diagonals
    pub const DIAGONAL: [BoardSquareOffset; 4] = [
        Self::new(1, 1),
        Self::new(1, -1),
        Self::new(-1, 1),
        Self::new(-1, -1),
    ];

    /// Produce a new offset from the given file and rank amounts
    ///
    /// In debug mode, we assert that both are on the interval [-7,7] (which are the only offsets
    /// between two squares).
    pub const fn new(file: i8, rank: i8) -> Self {
        debug_assert!(-8 < file && file < 8);
        debug_assert!(-8 < rank && rank < 8);
        Self { file, rank }
    }

    /// Gets the signed number of files associated with this offset
    pub const fn file(self) -> i8 {
        self.file
    }

    /// Gets the signed number of ranks associated with this offset
    pub const fn rank(self) -> i8 {
        self.rank
    }
}
