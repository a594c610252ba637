//! Let computer players fight it out over many games and count who wins.
//!

use anyhow::Context;
use clap::{ArgAction, Parser, ValueEnum};
use log::{info, LevelFilter};
use rand::{rngs::StdRng, Rng as _, SeedableRng as _};
use serde::Serialize;

use oxo::{
    core::{Difficulty, Outcome, Player, PlayerMark},
    player::{AlphaBetaAi, RandomAi},
    session::GameSession,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
enum PlayerSpec {
    Random,
    Easy,
    Medium,
    Hard,
}

impl PlayerSpec {
    fn difficulty(&self) -> Option<Difficulty> {
        match self {
            PlayerSpec::Random => None,
            PlayerSpec::Easy => Some(Difficulty::Easy),
            PlayerSpec::Medium => Some(Difficulty::Medium),
            PlayerSpec::Hard => Some(Difficulty::Hard),
        }
    }
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Who plays X (moves first)
    #[arg(short = 'x', long, default_value = "hard")]
    crosses: PlayerSpec,

    /// Who plays O
    #[arg(short = 'o', long, default_value = "random")]
    naughts: PlayerSpec,

    /// How many games to play
    #[arg(short = 'n', long, default_value = "100")]
    games: usize,

    /// Seed for the random players. Drawn from entropy if left out.
    #[arg(long)]
    seed: Option<u64>,

    /// Print the tally as JSON
    #[arg(long)]
    json: bool,

    /// More log output, repeat for more
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Serialize)]
struct Tally {
    crosses: PlayerSpec,
    naughts: PlayerSpec,
    seed: u64,
    games: usize,
    crosses_won: usize,
    naughts_won: usize,
    draws: usize,
}

impl Tally {
    fn record(&mut self, outcome: Outcome) {
        self.games += 1;
        match outcome {
            Outcome::Won(PlayerMark::Cross) => self.crosses_won += 1,
            Outcome::Won(PlayerMark::Naught) => self.naughts_won += 1,
            Outcome::Draw => self.draws += 1,
            Outcome::InProgress => {}
        }
    }
}

fn make_player(p: PlayerSpec, rng: &mut StdRng) -> Box<dyn Player> {
    match p.difficulty() {
        None => Box::new(RandomAi::new(rng.gen())),
        Some(d) => Box::new(AlphaBetaAi::new(d.depth())),
    }
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    let level = match args.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    simple_logger::SimpleLogger::new()
        .with_level(level)
        .init()
        .context("Could not set up logging")?;

    let seed = args.seed.unwrap_or_else(|| StdRng::from_entropy().gen());
    let mut rng = StdRng::seed_from_u64(seed);
    let mut tally = Tally {
        crosses: args.crosses,
        naughts: args.naughts,
        seed,
        games: 0,
        crosses_won: 0,
        naughts_won: 0,
        draws: 0,
    };
    for k in 0..args.games {
        let mut session = GameSession::new(
            make_player(args.crosses, &mut rng),
            make_player(args.naughts, &mut rng),
        );
        let outcome = session
            .run()
            .with_context(|| format!("Game {} did not finish", k + 1))?;
        info!("Game {}: {outcome}", k + 1);
        tally.record(outcome);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&tally)?);
    } else {
        println!("AI seed: {}", tally.seed);
        println!(
            "{} games, X ({:?}) won {}, O ({:?}) won {}, {} draws",
            tally.games,
            tally.crosses,
            tally.crosses_won,
            tally.naughts,
            tally.naughts_won,
            tally.draws
        );
    }
    Ok(())
}
