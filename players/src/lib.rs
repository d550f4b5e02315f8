//! Traits for an arbitrary player

use std::path::PathBuf;

use board::{Board, CoordinateMove};

/// What a player wants to happen next
///
/// Only a [`Action::Move`] goes through the rules engine; the rest are
/// handled by the game loop itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// Play this move (the game loop may still reject it as illegal)
    Move(CoordinateMove),
    /// Write the current game to this file
    Save(PathBuf),
    /// Replace the current game with the one saved in this file
    Load(PathBuf),
    /// Stop playing
    Quit,
}

/// A participant in a game
///
/// This trait is generic over how the player decides what to do, so
/// interactive and computer players can both implement this. Players hold no
/// board of their own; the game loop hands them the authoritative state.
pub trait Player<B: Board> {
    /// Decide what to do next, given the current game state
    fn next_action(&mut self, board: &B, history: &[CoordinateMove]) -> Action;

    /// React to the opponent making the given move
    fn react_to_move(&mut self, opponent_move: CoordinateMove) {
        let _ = opponent_move;
    }
}
