//! One game between two players, from the empty board to a result

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::core::{Outcome, Player, PlayerMark};
use crate::error::Result;
use crate::game::tictactoe::{Board, Move};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionState {
    AwaitingMove(PlayerMark),
    /// Absorbing. Stepping a finished game changes nothing.
    Terminal(Outcome),
}

/// The holder of the game state and the two players
pub struct GameSession {
    crosses: Box<dyn Player>,
    naughts: Box<dyn Player>,
    board: Board,
    history: Vec<Move>,
}

impl GameSession {
    pub fn new(crosses: Box<dyn Player>, naughts: Box<dyn Player>) -> Self {
        Self {
            crosses,
            naughts,
            board: Board::new(),
            history: Vec::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The moves played so far, oldest first
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    pub fn state(&self) -> SessionState {
        match self.board.whose_turn() {
            Some(p) if !self.board.is_terminal() => SessionState::AwaitingMove(p),
            _ => SessionState::Terminal(self.board.outcome()),
        }
    }

    /// Asks the player to move for a move and plays it.
    ///
    /// A move the board rejects is returned as an error and the session stays where it was,
    /// so the caller can simply step again.
    pub fn step(&mut self) -> Result<SessionState> {
        let mover = match self.state() {
            SessionState::AwaitingMove(p) => p,
            terminal => return Ok(terminal),
        };
        let player = match mover {
            PlayerMark::Cross => &mut self.crosses,
            PlayerMark::Naught => &mut self.naughts,
        };
        let mv = player.play(&self.board)?;
        let next = match self.board.apply_move(mv) {
            Ok(b) => b,
            Err(e) => {
                warn!("Player {mover} tried an illegal move: {e}");
                return Err(e);
            }
        };
        debug!("Player {mover} played {mv}");
        debug!("\n{next}");
        self.board = next;
        self.history.push(mv);
        let state = self.state();
        if let SessionState::Terminal(outcome) = state {
            info!("Game over after {} moves: {outcome}", self.history.len());
        }
        Ok(state)
    }

    /// Plays until the game is decided
    pub fn run(&mut self) -> Result<Outcome> {
        loop {
            if let SessionState::Terminal(outcome) = self.step()? {
                return Ok(outcome);
            }
        }
    }
}
