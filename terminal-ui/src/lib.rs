//! Input and output for a human playing in the terminal
//!
//! This is the boundary where text turns into squares. Nothing past here ever sees a string.

use board::{BoardSquare, BoardSquareFromStrErr};
use mailbox::Mailbox;

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("expected two squares, like `b1 c1`")]
    WrongShape,
    #[error(transparent)]
    Square(#[from] BoardSquareFromStrErr),
}

/// A line the player typed
#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Move(BoardSquare, BoardSquare),
    /// List the legal moves
    Moves,
    Quit,
}

/// Read one line of input
///
/// A move is two squares, with or without whitespace between them.
///
/// ```
/// use board::BoardSquare;
/// use terminal_ui::{parse_command, Command};
/// assert_eq!(parse_command("b1 c1"), Ok(Command::Move(BoardSquare::B1, BoardSquare::C1)));
/// assert_eq!(parse_command("h8a1"), Ok(Command::Move(BoardSquare::H8, BoardSquare::A1)));
/// assert!(parse_command("b1").is_err());
/// ```
pub fn parse_command(line: &str) -> Result<Command, InputError> {
    let line = line.trim();
    match line {
        "moves" | "?" => return Ok(Command::Moves),
        "quit" | "exit" | "q" => return Ok(Command::Quit),
        _ => {}
    }
    let joined: String = line.split_whitespace().collect();
    if joined.chars().count() != 4 || !joined.is_ascii() {
        return Err(InputError::WrongShape);
    }
    let (from, to) = joined.split_at(2);
    Ok(Command::Move(from.parse()?, to.parse()?))
}

/// Draw the board with rank 8 on top and coordinates on every side
pub fn render(board: &Mailbox) -> String {
    const FILES: &str = "  a b c d e f g h\n";
    let mut out = String::from(FILES);
    for rank in (0..8).rev() {
        out.push_str(&(rank + 1).to_string());
        for square in BoardSquare::rank_squares(rank) {
            out.push(' ');
            out.push(board.get(square).map_or('.', |piece| piece.letter()));
        }
        out.push_str(&format!(" {}\n", rank + 1));
    }
    out.push_str(FILES);
    out
}
