pub mod tictactoe;

pub use tictactoe::{Board, Move};
