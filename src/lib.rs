//! A tic-tac-toe engine: board values, win detection and an alpha-beta opponent
//! with a depth limit that doubles as its difficulty.

pub mod core;
pub mod error;
pub mod game;
pub mod player;
pub mod session;
