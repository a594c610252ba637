//! The core abstractions for this application
//!

use std::fmt::Display;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::game::tictactoe::{Board, Move};

/// The two marks. Crosses always move first.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PlayerMark {
    Cross,
    Naught,
}

impl PlayerMark {
    pub fn other(&self) -> Self {
        match *self {
            Self::Cross => Self::Naught,
            Self::Naught => Self::Cross,
        }
    }
}

impl Display for PlayerMark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlayerMark::Cross => write!(f, "X"),
            PlayerMark::Naught => write!(f, "O"),
        }
    }
}

/// The Player trait is the struct that represents a player.
pub trait Player {
    /// The play function is the main mechanic for the AIs and the humans alike.
    /// You observe the whole board through a reference and return where you want to play.
    /// The move is checked by the caller, so returning an illegal one is an error, never a cheat.
    fn play(&mut self, b: &Board) -> Result<Move>;
}

/// Always recomputed from the board, never stored next to it.
#[derive(Debug, Clone, Copy, PartialEq, Hash, Eq, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Outcome {
    InProgress,
    Draw,
    Won(PlayerMark),
}

impl Outcome {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::InProgress)
    }
}

impl Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::InProgress => write!(f, "in progress"),
            Outcome::Draw => write!(f, "draw"),
            Outcome::Won(p) => write!(f, "player {p} wins"),
        }
    }
}

/// How hard the computer tries. Each level is a fixed search depth in plies.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, ValueEnum, Serialize, Deserialize,
)]
pub enum Difficulty {
    #[value(alias = "low")]
    Easy,
    Medium,
    /// Searches the whole remaining game, so it never loses
    #[value(alias = "high")]
    Hard,
}

impl Difficulty {
    pub fn depth(&self) -> usize {
        match self {
            Difficulty::Easy => 3,
            Difficulty::Medium => 5,
            Difficulty::Hard => 9,
        }
    }
}
