use log::{debug, info};

use super::heuristics::ttt_heuristic;
use crate::core::{Player, PlayerMark};
use crate::error::{Error, Result};
use crate::game::tictactoe::{Board, Move};

/// Scores a board from the point of view of crosses: higher is better for crosses
pub type HeuristicFn = fn(&Board) -> i32;

/// The move picked at the root of a search and the value it was given
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub mv: Move,
    pub value: i32,
}

/// Minimax with alpha-beta pruning, cut off at a fixed depth.
/// Crosses maximize the heuristic and naughts minimize it.
pub struct AlphaBetaAi {
    /// A performance counter. If we prune well, this number is small
    n_leafs_evaluated: usize,
    heuristic_fn: HeuristicFn,
    max_depth: usize,
}

impl AlphaBetaAi {
    pub fn new(depth: usize) -> Self {
        Self::with_heuristic(ttt_heuristic, depth)
    }

    pub fn with_heuristic(heuristic_fn: HeuristicFn, depth: usize) -> Self {
        AlphaBetaAi {
            n_leafs_evaluated: 0,
            heuristic_fn,
            max_depth: depth,
        }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn n_leafs_evaluated(&self) -> usize {
        self.n_leafs_evaluated
    }

    fn heuristic(&mut self, b: &Board) -> i32 {
        self.n_leafs_evaluated += 1;
        (self.heuristic_fn)(b)
    }

    /// compute the score of a node by use of alpha-beta with pruning
    /// `player` is the one to move at `node`, `depth` the number of plies left to look at
    fn value(
        &mut self,
        node: &Board,
        alpha: i32,
        beta: i32,
        depth: usize,
        player: PlayerMark,
    ) -> i32 {
        if depth == 0 || node.is_terminal() {
            return self.heuristic(node);
        }
        debug_assert_eq!(node.whose_turn(), Some(player));
        let mut a = alpha;
        let mut b = beta;
        match player {
            PlayerMark::Cross => {
                let mut value = i32::MIN;
                for (_, child) in node.successors() {
                    value = value.max(self.value(&child, a, b, depth - 1, PlayerMark::Naught));
                    // the minimizing parent already has something at least this good
                    if value >= b {
                        break;
                    }
                    a = a.max(value);
                }
                value
            }
            PlayerMark::Naught => {
                let mut value = i32::MAX;
                for (_, child) in node.successors() {
                    value = value.min(self.value(&child, a, b, depth - 1, PlayerMark::Cross));
                    if value <= a {
                        break;
                    }
                    b = b.min(value);
                }
                value
            }
        }
    }

    /// Searches every root move with a fresh window and keeps the first strictly best one.
    /// `None` if the game is already over.
    pub fn best_move_with_value(&mut self, board: &Board) -> Option<SearchResult> {
        if board.is_terminal() {
            return None;
        }
        let mover = board.whose_turn()?;
        let mut best: Option<SearchResult> = None;
        for (mv, child) in board.successors() {
            let value = self.value(&child, i32::MIN, i32::MAX, self.max_depth, mover.other());
            debug!("{mover} at {mv} scores {value}");
            let improves = match (best, mover) {
                (None, _) => true,
                (Some(b), PlayerMark::Cross) => value > b.value,
                (Some(b), PlayerMark::Naught) => value < b.value,
            };
            if improves {
                best = Some(SearchResult { mv, value });
            }
        }
        best
    }

    pub fn best_move(&mut self, board: &Board) -> Option<Move> {
        self.best_move_with_value(board).map(|r| r.mv)
    }
}

/// The move an alpha-beta search of `depth_limit` plies picks for whoever is to move.
/// A depth of 9 or more searches the whole game and never loses.
pub fn best_move(board: &Board, depth_limit: usize) -> Option<Move> {
    AlphaBetaAi::new(depth_limit).best_move(board)
}

impl Player for AlphaBetaAi {
    fn play(&mut self, b: &Board) -> Result<Move> {
        let SearchResult { mv, value } =
            self.best_move_with_value(b).ok_or(Error::NoMoveAvailable)?;
        info!(
            "Alpha-beta (depth {}) plays {mv} valued {value}",
            self.max_depth
        );
        Ok(mv)
    }
}

impl Drop for AlphaBetaAi {
    fn drop(&mut self) {
        debug!("AlphaBetaAi evaluated {} leaf nodes", self.n_leafs_evaluated);
    }
}
