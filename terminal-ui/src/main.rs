use std::{
    io::{self, BufRead, Write},
    process::ExitCode,
};

use board::Color;
use clap::{Parser, ValueEnum};
use env_logger::Env;
use game::Game;
use mailbox::Mailbox;
use terminal_ui::{parse_command, render, Command};

#[derive(Parser)]
#[command(name = "kings-race", version, about = "Race your king to the far rank")]
struct Cli {
    /// Start from this piece placement (FEN style, rank 8 first) instead of the usual layout
    #[arg(long)]
    position: Option<Mailbox>,
    /// The side to move first
    #[arg(long, value_enum, default_value_t = Side::White)]
    to_move: Side,
}

#[derive(Clone, Copy, ValueEnum)]
enum Side {
    White,
    Black,
}
impl From<Side> for Color {
    fn from(side: Side) -> Self {
        match side {
            Side::White => Color::White,
            Side::Black => Color::Black,
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().filter_or("KINGS_RACE_LOG", "warn")).init();
    let cli = Cli::parse();

    let mut game = match cli.position {
        Some(board) => match Game::from_position(board, cli.to_move.into()) {
            Ok(game) => game,
            Err(e) => {
                eprintln!("Can't start from that position: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => Game::new(),
    };

    match play(&mut game) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("terminal error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Prompt for moves until the game ends or input runs out
fn play(game: &mut Game) -> io::Result<()> {
    let mut lines = io::stdin().lock().lines();
    let mut redraw = true;
    loop {
        if redraw {
            print!("{}", render(game.board()));
            redraw = false;
        }
        if game.status().is_terminal() {
            println!("Game over: {}", game.status());
            return Ok(());
        }
        if game.legal_moves().is_empty() {
            println!("{} has no legal moves", game.turn());
            return Ok(());
        }
        print!("{} to move: ", game.turn());
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            println!();
            return Ok(());
        };
        match parse_command(&line?) {
            Ok(Command::Move(from, to)) => match game.try_move(from, to) {
                Ok(()) => redraw = true,
                Err(rejection) => println!("Illegal move: {rejection}"),
            },
            Ok(Command::Moves) => {
                let moves: Vec<String> = game
                    .legal_moves()
                    .into_iter()
                    .map(|(from, to)| format!("{from}{to}"))
                    .collect();
                println!("{}", moves.join(" "));
            }
            Ok(Command::Quit) => return Ok(()),
            Err(e) => println!("{e}"),
        }
    }
}
