//! Play tic-tac-toe in the terminal, against a friend or against the computer.
//!

use std::io::{BufRead, Write};
use std::time::Duration;

use anyhow::Context;
use clap::{ArgAction, Parser, ValueEnum};
use log::LevelFilter;
use oxo::{
    core::{Difficulty, Outcome, Player, PlayerMark},
    error::Result,
    game::{Board, Move},
    player::{AlphaBetaAi, ConsolePlayer},
    session::{GameSession, SessionState},
};

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Two humans sharing the keyboard
    Pvp,
    /// A human against the computer
    Pvc,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Side {
    X,
    O,
}

impl From<Side> for PlayerMark {
    fn from(s: Side) -> Self {
        match s {
            Side::X => PlayerMark::Cross,
            Side::O => PlayerMark::Naught,
        }
    }
}

/// A Tic-Tac-Toe game for the command line, with an alpha-beta opponent
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(long, default_value = "pvc")]
    mode: Mode,

    /// Which mark the human plays against the computer. X moves first.
    #[arg(long, default_value = "x")]
    human: Side,

    /// How deep the computer searches: easy 3, medium 5, hard 9 plies
    #[arg(short, long, default_value = "hard")]
    difficulty: Difficulty,

    /// Pause before the computer shows its move, in milliseconds
    #[arg(long, default_value = "1000")]
    delay_ms: u64,

    /// Print how to play and exit
    #[arg(long)]
    instructions: bool,

    /// More log output, repeat for more
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

const INSTRUCTIONS: &str = "\
HOW TO PLAY

Two players take turns placing their mark, X or O, on a 3x3 grid. X always goes first.
The first to line up three marks in a row, column or diagonal wins.
If all nine cells are filled without a line the game is a draw.

Name a cell by its column letter followed by its row number, for example b2 for the centre:

        a   b   c
    3  a3 | b3 | c3
    2  a2 | b2 | c2
    1  a1 | b1 | c1

Against the computer, pick a difficulty with --difficulty easy, medium or hard.
On hard the computer cannot be beaten.
";

/// The computer's side of the table: searches, waits a moment, then announces its move
struct Computer {
    ai: AlphaBetaAi,
    delay: Duration,
}

impl Player for Computer {
    fn play(&mut self, b: &Board) -> Result<Move> {
        let mv = self.ai.play(b)?;
        std::thread::sleep(self.delay);
        println!("Computer's move: {mv}");
        Ok(mv)
    }
}

fn make_players(args: &Args) -> (Box<dyn Player>, Box<dyn Player>) {
    let human = |mark| -> Box<dyn Player> { Box::new(ConsolePlayer::new(mark)) };
    match args.mode {
        Mode::Pvp => (human(PlayerMark::Cross), human(PlayerMark::Naught)),
        Mode::Pvc => {
            let computer: Box<dyn Player> = Box::new(Computer {
                ai: AlphaBetaAi::new(args.difficulty.depth()),
                delay: Duration::from_millis(args.delay_ms),
            });
            match PlayerMark::from(args.human) {
                PlayerMark::Cross => (human(PlayerMark::Cross), computer),
                PlayerMark::Naught => (computer, human(PlayerMark::Naught)),
            }
        }
    }
}

fn play_one(args: &Args) -> anyhow::Result<Outcome> {
    let (crosses, naughts) = make_players(args);
    let mut session = GameSession::new(crosses, naughts);
    println!("\n{}", session.board());
    loop {
        let state = session.step().context("Could not finish the game")?;
        println!("\n{}", session.board());
        if let SessionState::Terminal(outcome) = state {
            return Ok(outcome);
        }
    }
}

fn play_again() -> anyhow::Result<bool> {
    let mut stdin = std::io::stdin().lock();
    loop {
        print!("Play again? [y/n] ");
        std::io::stdout().flush()?;
        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            return Ok(false);
        }
        match line.trim().to_ascii_lowercase().as_str() {
            "y" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            _ => continue,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let level = match args.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    simple_logger::SimpleLogger::new()
        .with_level(level)
        .init()
        .context("Could not set up logging")?;

    if args.instructions {
        print!("{INSTRUCTIONS}");
        return Ok(());
    }

    loop {
        match play_one(&args)? {
            Outcome::Won(p) => println!("PLAYER {p} WINS\n"),
            Outcome::Draw => println!("DRAW\n"),
            Outcome::InProgress => unreachable!("a session only stops on a finished board"),
        }
        if !play_again()? {
            break;
        }
    }
    Ok(())
}
