use crate::{
    core::{Outcome, PlayerMark},
    game::tictactoe::Board,
};

/// Scores a leaf of the search from the point of view of crosses.
///
/// +1 if crosses won, -1 if naughts won, 0 for a draw and for anything still open.
/// A zero can thus hide a loss that lies beyond the search horizon. That is what
/// makes a shallow search a weaker opponent.
pub fn ttt_heuristic(b: &Board) -> i32 {
    match b.outcome() {
        Outcome::Won(PlayerMark::Cross) => 1,
        Outcome::Won(PlayerMark::Naught) => -1,
        Outcome::Draw | Outcome::InProgress => 0,
    }
}
