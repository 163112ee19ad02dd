//! The game itself: whose turn it is, which moves are allowed, and who has won
//!
//! A [`Game`] owns the one live board. The only way to change it is [`Game::try_move`] (or its
//! boolean twin [`Game::attempt_move`]), which tries the move on a scratch copy first and only
//! commits it if neither king ends up in check.

use board::{BoardSquare, Color, GameStatus};
use mailbox::{candidate_destinations, in_check, Mailbox};

pub type Result<T, E = Rejection> = core::result::Result<T, E>;

/// Why a move was refused
///
/// These are the ordinary outcome of a bad move and leave the game untouched, so the caller can
/// simply ask for another move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("the game is already over")]
    GameOver,
    #[error("there is no piece on {0}")]
    NoPieceAtSource(BoardSquare),
    #[error("the piece on {square} belongs to {owner}")]
    NotYourPiece { square: BoardSquare, owner: Color },
    #[error("the piece on {from} can't move to {to}")]
    NotAPieceMove { from: BoardSquare, to: BoardSquare },
    #[error("attempted move leaves the moving side's king in check")]
    LeavesOwnKingInCheck,
    #[error("attempted move puts the opponent's king in check")]
    ChecksOpponent,
}

/// One game of the kings' race
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Game {
    /// The live board
    board: Mailbox,
    /// The side to move
    turn: Color,
    /// Never changes again once it's terminal
    status: GameStatus,
}

impl Game {
    /// A game at the standard starting layout, white to move
    pub fn new() -> Self {
        Self {
            board: Mailbox::INITIAL_STATE,
            turn: Color::White,
            status: GameStatus::InProgress,
        }
    }

    /// A game starting from an arbitrary board
    ///
    /// The board must hold exactly one king of each color. The status is worked out from the board
    /// straight away, so a king already standing on the far rank means the game starts finished.
    pub fn from_position(board: Mailbox, turn: Color) -> mailbox::Result<Self> {
        board.validate_kings()?;
        let status = evaluate_status(&board);
        Ok(Self {
            board,
            turn,
            status,
        })
    }

    /// Get the state of the game right now
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// The side to move
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// Read-only view of the live board
    pub fn board(&self) -> &Mailbox {
        &self.board
    }

    /// Make the given move if it is legal
    ///
    /// Returns whether the move was made. See [`Game::try_move`] for the reason behind a refusal.
    pub fn attempt_move(&mut self, from: BoardSquare, to: BoardSquare) -> bool {
        self.try_move(from, to).is_ok()
    }

    /// Make the given move if it is legal, in place
    ///
    /// On `Err(..)` nothing about the game has changed. On success the turn passes to the other
    /// side and the status is updated.
    ///
    /// # Panics
    /// If a king has gone missing from the board, which can only be a bug in this crate.
    pub fn try_move(&mut self, from: BoardSquare, to: BoardSquare) -> Result<()> {
        let scratch = match self.check_move_legality(from, to) {
            Ok(scratch) => scratch,
            Err(rejection) => {
                log::debug!("rejected {from}{to}: {rejection}");
                return Err(rejection);
            }
        };
        log::debug!("{} plays {from}{to}", self.turn);
        self.board = scratch;
        self.turn = self.turn.other();
        self.status = evaluate_status(&self.board);
        if self.status.is_terminal() {
            log::info!("game over: {}", self.status);
        }
        Ok(())
    }

    /// Whether [`Game::try_move`] would accept this move right now
    pub fn is_legal(&self, from: BoardSquare, to: BoardSquare) -> bool {
        self.check_move_legality(from, to).is_ok()
    }

    /// Every move the side to move could make, as `(from, to)` pairs
    ///
    /// Empty once the game is over.
    pub fn legal_moves(&self) -> Vec<(BoardSquare, BoardSquare)> {
        if self.status.is_terminal() {
            return Vec::new();
        }
        self.board
            .pieces()
            .filter(|(_, piece)| piece.color == self.turn)
            .flat_map(|(from, piece)| {
                candidate_destinations(piece, from, &self.board)
                    .squares_iter()
                    .map(move |to| (from, to))
            })
            .filter(|&(from, to)| self.is_legal(from, to))
            .collect()
    }

    /// Check if this move is legal to do right now.
    ///
    /// Returns the board as it would be after the move, otherwise the reason why the move is
    /// illegal. The live board is only read.
    fn check_move_legality(&self, from: BoardSquare, to: BoardSquare) -> Result<Mailbox> {
        if self.status.is_terminal() {
            return Err(Rejection::GameOver);
        }
        let Some(piece) = self.board.get(from) else {
            return Err(Rejection::NoPieceAtSource(from));
        };
        if piece.color != self.turn {
            return Err(Rejection::NotYourPiece {
                square: from,
                owner: piece.color,
            });
        }
        if !candidate_destinations(piece, from, &self.board).has(to) {
            return Err(Rejection::NotAPieceMove { from, to });
        }
        let scratch = self.board.after_move(from, to);
        if king_in_check(piece.color, &scratch) {
            return Err(Rejection::LeavesOwnKingInCheck);
        }
        // Unlike orthodox chess, giving check is not allowed either
        if king_in_check(piece.color.other(), &scratch) {
            return Err(Rejection::ChecksOpponent);
        }
        Ok(scratch)
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

/// The status a board implies: whoever has a king on the far rank has won
///
/// Both kings there at once is a tie.
pub fn evaluate_status(board: &Mailbox) -> GameStatus {
    let mut winners = board.kings_on_far_rank();
    match (winners.next(), winners.next()) {
        (None, _) => GameStatus::InProgress,
        (Some(color), None) => GameStatus::won_by(color),
        (Some(_), Some(_)) => GameStatus::Tie,
    }
}

/// [`in_check`] on a board which must have both kings
///
/// A missing king means a king was captured or lost somewhere, so there's no sensible answer.
fn king_in_check(color: Color, board: &Mailbox) -> bool {
    match in_check(color, board) {
        Ok(check) => check,
        Err(e) => panic!("internal rules engine error: {e} (board {board:?})"),
    }
}
