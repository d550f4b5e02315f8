//! A player which makes purely random moves

use board::{Board, CoordinateMove};
use players::{Action, Player};

use rand::{rngs::SmallRng, seq::IteratorRandom, SeedableRng};

/// A player which picks uniformly at random among the legal moves
///
/// "Woodpusher" is what stronger players call it.
#[derive(Debug)]
pub struct WoodpusherPlayer {
    /// How we decide what to do
    rng: SmallRng,
}

impl WoodpusherPlayer {
    /// Create a new player with an unpredictable seed
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_entropy(),
        }
    }

    /// Create a new player whose choices are reproducible
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl<B: Board> Player<B> for WoodpusherPlayer {
    fn next_action(&mut self, board: &B, _history: &[CoordinateMove]) -> Action {
        match board.legal_moves().into_iter().choose(&mut self.rng) {
            Some(mv) => Action::Move(mv),
            // The game loop never asks a player with no legal moves, but
            // resigning is the right answer if someone else does.
            None => Action::Quit,
        }
    }
}

impl Default for WoodpusherPlayer {
    fn default() -> Self {
        Self::new()
    }
}
