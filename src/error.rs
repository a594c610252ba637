//! Errors raised by the game core and the players built on it

use thiserror::Error;

use crate::game::tictactoe::Move;

#[derive(Error, Debug)]
pub enum Error {
    /// The move cannot be applied to the board. The board is left as it was.
    #[error("invalid move {mv}: {reason}")]
    InvalidMove { mv: Move, reason: InvalidMoveReason },

    #[error("coordinate ({row}, {col}) is off the board (rows and columns are 0-2)")]
    OutOfBounds { row: usize, col: usize },

    #[error("could not read '{0}' as a move (expected a column a-c followed by a row 1-3)")]
    InvalidNotation(String),

    #[error("invalid board: {0}")]
    InvalidBoard(String),

    #[error("the game is over, there is no move to make")]
    NoMoveAvailable,

    #[error("failed to read player input: {0}")]
    Input(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidMoveReason {
    Occupied,
    GameOver,
}

impl std::fmt::Display for InvalidMoveReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidMoveReason::Occupied => write!(f, "the cell is already taken"),
            InvalidMoveReason::GameOver => write!(f, "the game is already over"),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
