use log::info;
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use crate::core::Player;
use crate::error::{Error, Result};
use crate::game::tictactoe::{Board, Move};

/// Plays a uniformly random legal move
pub struct RandomAi<R> {
    rng: R,
}

impl<R> Player for RandomAi<R>
where
    R: rand::Rng,
{
    fn play(&mut self, b: &Board) -> Result<Move> {
        let moves = b.legal_moves();
        let mv = *moves.choose(&mut self.rng).ok_or(Error::NoMoveAvailable)?;
        info!("Random AI plays {mv}");
        Ok(mv)
    }
}

impl RandomAi<StdRng> {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

#[cfg(test)]
mod test {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn only_picks_legal_moves() {
        let b = Board::from_str("xo.xo....").unwrap();
        let mut ai = RandomAi::new(7);
        for _ in 0..50 {
            let mv = ai.play(&b).unwrap();
            assert!(b.legal_moves().contains(&mv));
        }
    }

    #[test]
    fn same_seed_same_moves() {
        let b = Board::new();
        let mut a1 = RandomAi::new(42);
        let mut a2 = RandomAi::new(42);
        for _ in 0..10 {
            assert_eq!(a1.play(&b).unwrap(), a2.play(&b).unwrap());
        }
    }

    #[test]
    fn nothing_to_pick_on_a_full_board() {
        let b = Board::from_str("xoxxoooxx").unwrap();
        assert!(matches!(
            RandomAi::new(1).play(&b),
            Err(Error::NoMoveAvailable)
        ));
    }
}
