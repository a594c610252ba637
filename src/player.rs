pub mod alpha_beta;
pub mod console;
mod heuristics;
pub mod random;

pub use alpha_beta::{best_move, AlphaBetaAi, SearchResult};
pub use console::ConsolePlayer;
pub use heuristics::ttt_heuristic;
pub use random::RandomAi;
