extern crate tictactoe_minimax;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::io::{self, BufRead, Write};
use tictactoe_minimax::board::GameOutcome;
use tictactoe_minimax::boards::tic_tac_toe::{Cell, Mark, TicTacToeBoard};
use tictactoe_minimax::game::{GameConfig, GameMode, GameSession};
use tictactoe_minimax::random::{RandomGenerator, SeededRandomGenerator, StandardRandomGenerator};
use tracing_subscriber::EnvFilter;

/// Play Tic-Tac-Toe in the terminal.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Play against the AI or against another human.
    #[arg(long, value_enum, default_value_t = ModeArg::Single)]
    mode: ModeArg,

    /// The mark of the first human player.
    #[arg(long, value_enum, default_value_t = MarkArg::X)]
    mark: MarkArg,

    /// Seed for the AI's opening move. Random when omitted.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    Single,
    Multi,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum MarkArg {
    X,
    O,
}

impl Args {
    fn config(&self) -> GameConfig {
        let mode = match self.mode {
            ModeArg::Single => GameMode::SinglePlayer,
            ModeArg::Multi => GameMode::Multiplayer,
        };
        let human_mark = match self.mark {
            MarkArg::X => Mark::X,
            MarkArg::O => Mark::O,
        };
        GameConfig::new(mode, human_mark)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    match args.seed {
        Some(seed) => run(GameSession::with_random_generator(
            args.config(),
            SeededRandomGenerator::new(seed),
        )),
        None => run(GameSession::with_random_generator(
            args.config(),
            StandardRandomGenerator,
        )),
    }
}

fn run<K: RandomGenerator>(mut game: GameSession<K>) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    render(&game);
    prompt(&mut stdout, &game)?;
    for line in stdin.lock().lines() {
        let line = line?;
        match line.trim() {
            "q" => break,
            "r" => game.reset(),
            "h" => match game.hint() {
                Some(index) => println!("Hint: {}", index + 1),
                None => println!("No moves left"),
            },
            input => match input.parse::<u8>() {
                // the board is numbered 1-9 for humans; anything else is ignored like a stray click
                Ok(number @ 1..=9) => {
                    let _ = game.play(number - 1);
                }
                _ => println!("Enter 1-9, h for a hint, r to reset or q to quit"),
            },
        }
        render(&game);
        prompt(&mut stdout, &game)?;
    }
    Ok(())
}

fn render<K: RandomGenerator>(game: &GameSession<K>) {
    println!();
    println!("{}", game.title());
    println!("{}", numbered(game.board()));
}

fn prompt<K: RandomGenerator>(stdout: &mut io::Stdout, game: &GameSession<K>) -> Result<()> {
    match game.outcome() {
        GameOutcome::InProgress => print!("{} to move> ", game.next_mark()),
        _ => print!("r to play again, q to quit> "),
    }
    stdout.flush()?;
    Ok(())
}

/// Renders the board with empty cells showing the number to type.
fn numbered(board: &TicTacToeBoard) -> String {
    board
        .cells()
        .chunks(3)
        .enumerate()
        .map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .map(|(col, cell)| match cell {
                    Cell::Empty => (row * 3 + col + 1).to_string(),
                    Cell::Marked(mark) => mark.to_string(),
                })
                .collect::<Vec<_>>()
                .join(" | ")
        })
        .collect::<Vec<_>>()
        .join("\n--+---+--\n")
}
