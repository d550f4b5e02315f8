//! A backend which queries actions from the two players until the game is done

use std::fs;
use std::path::Path;

use board::{Color, CoordinateMove, GameStatus};
use mailbox::{save, MailboxBoard};
use players::{Action, Player};
use tracing::{debug, info, warn};

/// The game loop: alternates turns, reports progress, and owns the history
pub struct Backend<White, Black> {
    /// The authoritative state of the board
    board: MailboxBoard,
    /// Every move committed so far, in coordinate notation order
    history: Vec<CoordinateMove>,
    white_player: White,
    black_player: Black,
}

impl<White, Black> Backend<White, Black>
where
    White: Player<MailboxBoard>,
    Black: Player<MailboxBoard>,
{
    /// Create a new instance with the chess starting board
    pub fn new(white_player: White, black_player: Black) -> Self {
        Self {
            board: MailboxBoard::INITIAL_STATE,
            history: Vec::new(),
            white_player,
            black_player,
        }
    }

    /// Get the state of the game right now
    pub fn board(&self) -> &MailboxBoard {
        &self.board
    }

    /// The moves committed so far
    pub fn history(&self) -> &[CoordinateMove] {
        &self.history
    }

    /// Show the board and run one action from whoever's turn it is
    ///
    /// Returns `false` once the game is over or a player quit. A rejected
    /// move leaves the state untouched, so the same player is asked again on
    /// the next call.
    pub fn play_half_move(&mut self) -> bool {
        println!("{}", self.board);
        let color = match self.board.status() {
            GameStatus::AwaitingMove(color) => color,
            GameStatus::Checkmate { winner } => {
                println!("Checkmate! {winner} wins!");
                return false;
            }
            GameStatus::Stalemate => {
                println!("Stalemate! It's a draw.");
                return false;
            }
        };
        if self.board.is_in_check(color) {
            println!("{color} is in check!");
        }
        println!("{color} to move.");
        let action = match color {
            Color::White => self.white_player.next_action(&self.board, &self.history),
            Color::Black => self.black_player.next_action(&self.board, &self.history),
        };
        match action {
            Action::Move(mv) => match self.board.make_move(mv) {
                Ok(()) => {
                    debug!(%mv, %color, "move committed");
                    self.history.push(mv);
                    match color {
                        Color::White => self.black_player.react_to_move(mv),
                        Color::Black => self.white_player.react_to_move(mv),
                    }
                }
                Err(err) => {
                    warn!(%mv, %err, "move rejected");
                    println!("Invalid move: {err}.");
                }
            },
            Action::Save(path) => self.save(&path),
            Action::Load(path) => self.load(&path),
            Action::Quit => return false,
        }
        true
    }

    /// Play the game until it ends, then print the move history
    pub fn play_game(&mut self) {
        while self.play_half_move() {}
        if !self.history.is_empty() {
            println!("\nGame over. Move history:");
            for (number, mv) in self.history.iter().enumerate() {
                println!("{}. {mv}", number + 1);
            }
        }
    }

    /// Write the game to a file; failure leaves the game unaffected
    fn save(&self, path: &Path) {
        match fs::write(path, save::to_save_text(&self.board, &self.history)) {
            Ok(()) => {
                info!(path = %path.display(), "game saved");
                println!("Game saved to {}.", path.display());
            }
            Err(err) => println!("Error saving file: {err}."),
        }
    }

    /// Replace the game with one read from a file; failure leaves it unchanged
    fn load(&mut self, path: &Path) {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) => {
                println!("Error loading file: {err}.");
                return;
            }
        };
        match save::from_save_text(&text) {
            Ok(loaded) => {
                info!(path = %path.display(), moves = loaded.history.len(), "game loaded");
                self.board = loaded.board;
                self.history = loaded.history;
                println!("Game loaded from {}.", path.display());
            }
            Err(err) => println!("Error loading file: {err}."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use woodpusher::WoodpusherPlayer;

    /// Two seeded random players never produce an illegal move or a panic,
    /// and the history tracks every committed move.
    #[test]
    fn seeded_random_game_progresses_cleanly() {
        let mut backend = Backend::new(
            WoodpusherPlayer::with_seed(7),
            WoodpusherPlayer::with_seed(8),
        );
        for _ in 0..60 {
            if !backend.play_half_move() {
                break;
            }
        }
        assert!(!backend.history().is_empty());
        let replayed: Result<MailboxBoard, _> =
            board::Board::from_move_sequence(backend.history().iter().copied());
        assert_eq!(
            replayed.expect("recorded history replays cleanly"),
            *backend.board()
        );
    }

    #[test]
    fn save_and_load_round_trip_through_a_file() {
        let mut backend = Backend::new(
            WoodpusherPlayer::with_seed(21),
            WoodpusherPlayer::with_seed(22),
        );
        for _ in 0..8 {
            if !backend.play_half_move() {
                break;
            }
        }
        let moves_recorded = backend.history().len();
        assert!(moves_recorded > 0);
        let path = std::env::temp_dir().join("backend-save-load-round-trip.txt");
        backend.save(&path);
        let placement_before: Vec<_> = board::Square::all()
            .map(|sq| backend.board().get(sq).map(|p| (p.kind, p.color)))
            .collect();
        backend.load(&path);
        let placement_after: Vec<_> = board::Square::all()
            .map(|sq| backend.board().get(sq).map(|p| (p.kind, p.color)))
            .collect();
        assert_eq!(placement_before, placement_after);
        assert_eq!(backend.history().len(), moves_recorded);
        let _ = fs::remove_file(path);
    }
}
