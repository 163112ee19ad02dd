use core::{
    fmt,
    ops::{BitOr, BitOrAssign},
};

use board::BoardSquare;

/// A set of squares, one bit per square (which is equivalent to a `u64`)
///
/// Bit `n` stands for the square with [`BoardSquare::index`] `n`.
#[repr(transparent)]
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Bitboard(pub u64);

impl Bitboard {
    /// Create an empty bitboard
    pub const fn empty() -> Self {
        Self(0)
    }

    /// The bitboard with only the given square set
    pub const fn from_board_square(square: BoardSquare) -> Self {
        Self(1 << square.index())
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Whether the given square is in this set
    pub const fn has(self, square: BoardSquare) -> bool {
        self.intersects(Self::from_board_square(square))
    }

    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    pub fn insert(&mut self, square: BoardSquare) {
        *self |= square;
    }

    /// Iterate over the squares in this set, in scan order
    ///
    /// ```
    /// use board::BoardSquare;
    /// use mailbox::Bitboard;
    /// let squares = Bitboard::from(BoardSquare::C3) | BoardSquare::A8;
    /// assert_eq!(
    ///     squares.squares_iter().collect::<Vec<_>>(),
    ///     [BoardSquare::C3, BoardSquare::A8],
    /// );
    /// assert_eq!(Bitboard(!0).squares_iter().count(), 64);
    /// ```
    pub fn squares_iter(self) -> impl Iterator<Item = BoardSquare> {
        BoardSquare::all_squares().filter(move |&square| self.has(square))
    }

    /// Returns the number of squares in the set
    pub fn num_set(self) -> u32 {
        self.0.count_ones()
    }
}

impl Bitboard {
    /// `const` equivalent to `|`
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl BitOr<Bitboard> for Bitboard {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}
impl BitOr<BoardSquare> for Bitboard {
    type Output = Self;

    fn bitor(self, rhs: BoardSquare) -> Self::Output {
        self.union(Self::from_board_square(rhs))
    }
}
impl<T> BitOrAssign<T> for Bitboard
where
    Self: BitOr<T, Output = Self>,
{
    fn bitor_assign(&mut self, rhs: T) {
        *self = *self | rhs;
    }
}
impl From<BoardSquare> for Bitboard {
    fn from(value: BoardSquare) -> Self {
        Self::from_board_square(value)
    }
}
impl FromIterator<BoardSquare> for Bitboard {
    fn from_iter<I: IntoIterator<Item = BoardSquare>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::empty(), |bitboard, square| bitboard | square)
    }
}

impl fmt::Debug for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.squares_iter()).finish()
    }
}

/// Draws the set as a grid, rank 8 on top
impl fmt::Display for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use fmt::Write;
        for rank in (0..8).rev() {
            for square in BoardSquare::rank_squares(rank) {
                f.write_char(if self.has(square) { 'X' } else { '.' })?;
            }
            f.write_char('\n')?;
        }
        Ok(())
    }
}
