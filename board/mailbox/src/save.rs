//! The plain-text saved-game format
//!
//! Eight lines of eight characters give the grid in board order (rank 8
//! first), with `.` for an empty square and the piece letters of
//! [`Piece::letter`]. A literal `HISTORY` line follows, then one move per
//! line in coordinate notation. Castling rights are not part of the format:
//! every loaded piece is conservatively marked as already moved, which is a
//! documented limitation rather than a bug. The side to move is inferred
//! from the parity of the history, and the final history line is restored
//! as the remembered last move so an open en passant window survives a
//! save/load cycle.

use board::{Color, CoordinateMove, Piece, Square};

use crate::MailboxBoard;

/// The line separating the grid from the move list
const HISTORY_MARKER: &str = "HISTORY";

/// A game as reconstructed from its saved text
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SavedGame {
    pub board: MailboxBoard,
    pub history: Vec<CoordinateMove>,
}

/// Why saved text could not be understood
#[derive(Debug, thiserror::Error)]
pub enum SaveParseError {
    #[error("save data ended before all 8 board rows were read")]
    TruncatedBoard,
    #[error("board row {row} has fewer than 8 squares")]
    ShortRow { row: usize },
    #[error("unrecognized piece character {0:?}")]
    UnknownPiece(char),
}

/// Render a game in the saved-game format
pub fn to_save_text(board: &MailboxBoard, history: &[CoordinateMove]) -> String {
    let mut out = String::new();
    for square in Square::all() {
        out.push(board.get(square).map_or('.', Piece::letter));
        if square.col() == 7 {
            out.push('\n');
        }
    }
    out.push_str(HISTORY_MARKER);
    out.push('\n');
    for mv in history {
        out.push_str(&mv.to_string());
        out.push('\n');
    }
    out
}

/// Reconstruct a game from its saved text
///
/// Lines after the marker that do not parse as moves are skipped rather
/// than rejected; the history only feeds turn inference and the en passant
/// window, so a best-effort reading matches what the format promises.
pub fn from_save_text(text: &str) -> Result<SavedGame, SaveParseError> {
    let mut lines = text.lines();
    let mut board = MailboxBoard::EMPTY;
    for row in 0..8 {
        let line = lines.next().ok_or(SaveParseError::TruncatedBoard)?;
        let mut cells = line.chars();
        for col in 0..8 {
            let cell = cells.next().ok_or(SaveParseError::ShortRow { row })?;
            if cell == '.' {
                continue;
            }
            let mut piece =
                Piece::from_letter(cell).ok_or(SaveParseError::UnknownPiece(cell))?;
            // Castling rights are lost here, by design of the format
            piece.moved = true;
            board.squares[row * 8 + col] = Some(piece);
        }
    }
    // The marker line carries no information beyond its position
    let _ = lines.next();
    let history: Vec<CoordinateMove> = lines.filter_map(|line| line.trim().parse().ok()).collect();
    board.side_to_move = if history.len() % 2 == 0 {
        Color::White
    } else {
        Color::Black
    };
    board.last_move = history.last().copied();
    tracing::debug!(moves = history.len(), "reconstructed saved game");
    Ok(SavedGame { board, history })
}
