//! Random baseline agent

use isolation_core::{Agent, GameState, Move, TimeLeft};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// Plays a uniformly random legal move
pub struct RandomAgent {
    rng: ChaCha8Rng,
}

impl RandomAgent {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl<S: GameState> Agent<S> for RandomAgent {
    fn next_move(&mut self, state: &S, _time_left: &dyn TimeLeft) -> Move {
        state
            .legal_moves()
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(Move::NONE)
    }

    fn name(&self) -> String {
        "random".to_string()
    }
}
