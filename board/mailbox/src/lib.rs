//! A mailbox board representation with full rule enforcement
//!
//! The board is a flat 64-cell grid of optional pieces plus a record of the
//! most recent move (which is all the history en passant needs). Legality is
//! decided by simulating a candidate move on a scratch copy of the grid and
//! checking that the mover's own king is not left in check, so every query
//! on the real board is side-effect-free.

use core::fmt;

use board::{Board, Color, CoordinateMove, GameStatus, Piece, PieceKind, Square};

pub mod patterns;
pub mod save;

pub use save::{from_save_text, to_save_text, SaveParseError, SavedGame};

/// Why a move was rejected
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    #[error("there is no piece on the source square")]
    NoSourcePiece,
    #[error("the piece on the source square belongs to the opponent")]
    NotYourPiece,
    #[error("that piece cannot move like that")]
    PatternViolation,
    #[error("castling is not allowed from this position")]
    IllegalCastle,
    #[error("that move would leave your own king in check")]
    MovingIntoCheck,
}

/// How a validated move will mutate the board when committed
///
/// Every move gets exactly one of these; a capturing promotion counts as
/// [`MoveKind::Promotion`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveKind {
    /// A relocation, capturing whatever sat on the destination
    Ordinary,
    /// A pawn capturing a pawn that just double-stepped past it
    EnPassantCapture,
    /// A two-column king move that also relocates the corresponding rook
    Castle,
    /// A pawn reaching the far rank, replaced by a queen on arrival
    Promotion,
}

/// The fixed piece arrangement at the start of a game
const fn initial_squares() -> [Option<Piece>; 64] {
    const BACK_RANK: [PieceKind; 8] = [
        PieceKind::Rook,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Queen,
        PieceKind::King,
        PieceKind::Bishop,
        PieceKind::Knight,
        PieceKind::Rook,
    ];
    let mut squares = [None; 64];
    let mut col = 0;
    while col < 8 {
        squares[col] = Some(Piece::new(BACK_RANK[col], Color::Black));
        squares[8 + col] = Some(Piece::new(PieceKind::Pawn, Color::Black));
        squares[48 + col] = Some(Piece::new(PieceKind::Pawn, Color::White));
        squares[56 + col] = Some(Piece::new(BACK_RANK[col], Color::White));
        col += 1;
    }
    squares
}

/// Represent the game as a row-major grid of optional pieces
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MailboxBoard {
    /// The grid, row 0 (rank 8) first
    squares: [Option<Piece>; 64],
    /// The most recently executed move, which decides en passant eligibility
    last_move: Option<CoordinateMove>,
    side_to_move: Color,
}

impl MailboxBoard {
    /// A board with no pieces on it and no moves made
    pub const EMPTY: Self = Self {
        squares: [None; 64],
        last_move: None,
        side_to_move: Color::White,
    };

    /// The state at the start of a chess game
    ///
    /// ```
    /// use board::{Board as _, Color};
    /// use mailbox::MailboxBoard;
    /// let board = MailboxBoard::INITIAL_STATE;
    /// assert_eq!(board.legal_moves().len(), 20);
    /// assert_eq!(board.legal_moves_for(Color::Black).count(), 20);
    /// ```
    pub const INITIAL_STATE: Self = Self {
        squares: initial_squares(),
        last_move: None,
        side_to_move: Color::White,
    };

    /// Find the piece, if any, on the given square
    pub const fn get(&self, square: Square) -> Option<Piece> {
        self.squares[square.index()]
    }

    /// The color whose turn it is
    pub const fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Get the square on which the given player's king resides
    ///
    /// During play there is always exactly one king per color; `None` can
    /// only come out of a hand-built or corrupted position.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        Square::all().find(|&square| {
            matches!(
                self.get(square),
                Some(piece) if piece.kind == PieceKind::King && piece.color == color
            )
        })
    }

    /// Returns whether any piece of `by` has a pattern-valid move onto `square`
    ///
    /// This drives both check detection and castling path safety. It reuses
    /// the per-piece pattern predicates directly, so a king contributes its
    /// ordinary adjacent-square reach here, not a capture threat computed any
    /// other way.
    pub fn is_square_attacked(&self, square: Square, by: Color) -> bool {
        Square::all().any(|from| match self.get(from) {
            Some(piece) if piece.color == by => {
                patterns::pattern_valid(piece, from, square, self)
            }
            _ => false,
        })
    }

    /// Returns whether the given color's king is currently attacked
    pub fn is_in_check(&self, color: Color) -> bool {
        self.king_square(color)
            .is_some_and(|king| self.is_square_attacked(king, color.other()))
    }

    /// Decide whether `color` may play `mv` right now
    ///
    /// This is a pure query: an empty source square or an opponent's piece
    /// simply yields `false`, and the board is never observably mutated.
    pub fn is_legal_move(&self, mv: CoordinateMove, color: Color) -> bool {
        self.legality(mv, color).is_ok()
    }

    /// Returns whether `color` has at least one legal move
    pub fn has_any_legal_move(&self, color: Color) -> bool {
        self.legal_moves_for(color).next().is_some()
    }

    /// Every legal move for `color`, row-major by start square then by end square
    ///
    /// The sequence is finite, restartable, and stable for a given position.
    pub fn legal_moves_for(&self, color: Color) -> impl Iterator<Item = CoordinateMove> + '_ {
        Square::all()
            .flat_map(|start| Square::all().map(move |end| CoordinateMove { start, end }))
            .filter(move |&mv| self.is_legal_move(mv, color))
    }

    /// Make the given move for the side to move
    ///
    /// On success the move is committed (including any capture, rook
    /// relocation, or promotion), the move becomes the remembered last move,
    /// and the turn passes to the opponent. On failure nothing changes.
    pub fn make_move(&mut self, mv: CoordinateMove) -> Result<(), Error> {
        let kind = self.legality(mv, self.side_to_move)?;
        self.commit(mv, kind);
        Ok(())
    }

    /// Where the game stands for the side to move
    pub fn status(&self) -> GameStatus {
        let color = self.side_to_move;
        if self.has_any_legal_move(color) {
            GameStatus::AwaitingMove(color)
        } else if self.is_in_check(color) {
            GameStatus::Checkmate {
                winner: color.other(),
            }
        } else {
            GameStatus::Stalemate
        }
    }

    /// The square of the pawn an en passant capture would remove
    ///
    /// That pawn sits beside the capturing pawn: same row as the start, same
    /// column as the destination.
    const fn en_passant_victim(mv: CoordinateMove) -> Option<Square> {
        Square::from_row_col(mv.start.row(), mv.end.col())
    }

    /// Detect the en passant special case
    ///
    /// The mover must be a pawn stepping one row forward and one column
    /// sideways onto an empty square, the square beside it must hold an enemy
    /// pawn, and the remembered last move must be that pawn double-stepping
    /// onto it. En passant is its own pattern, so when this holds the
    /// per-piece pattern check is skipped.
    fn is_en_passant_candidate(&self, piece: Piece, mv: CoordinateMove) -> bool {
        if piece.kind != PieceKind::Pawn || self.get(mv.end).is_some() {
            return false;
        }
        let forward = mv.end.row() as i8 - mv.start.row() as i8 == piece.color.forward();
        let sideways = mv.end.col().abs_diff(mv.start.col()) == 1;
        if !forward || !sideways {
            return false;
        }
        let Some(victim_square) = Self::en_passant_victim(mv) else {
            return false;
        };
        let victim_is_enemy_pawn = matches!(
            self.get(victim_square),
            Some(victim) if victim.kind == PieceKind::Pawn && victim.color != piece.color
        );
        victim_is_enemy_pawn
            && matches!(
                self.last_move,
                Some(last) if last.end == victim_square
                    && last.start.row().abs_diff(last.end.row()) == 2
            )
    }

    /// Classify how `mv` would mutate the board
    fn classify(&self, piece: Piece, mv: CoordinateMove) -> MoveKind {
        match piece.kind {
            PieceKind::Pawn if self.is_en_passant_candidate(piece, mv) => {
                MoveKind::EnPassantCapture
            }
            PieceKind::Pawn if mv.end.row() == piece.color.promotion_row() => MoveKind::Promotion,
            PieceKind::King
                if mv.start.row() == mv.end.row()
                    && mv.start.col().abs_diff(mv.end.col()) == 2 =>
            {
                MoveKind::Castle
            }
            _ => MoveKind::Ordinary,
        }
    }

    /// The central legality decision
    ///
    /// Pattern validity is checked first (except for en passant, which is a
    /// pattern unto itself), then the move is applied to a scratch copy of
    /// the grid and rejected if the mover's king ends up attacked. Castling
    /// additionally requires, on the real board, that the king is not in
    /// check now and does not pass through an attacked square.
    fn legality(&self, mv: CoordinateMove, color: Color) -> Result<MoveKind, Error> {
        let Some(piece) = self.get(mv.start) else {
            return Err(Error::NoSourcePiece);
        };
        if piece.color != color {
            return Err(Error::NotYourPiece);
        }
        let kind = self.classify(piece, mv);
        if kind != MoveKind::EnPassantCapture
            && !patterns::pattern_valid(piece, mv.start, mv.end, self)
        {
            return Err(match kind {
                MoveKind::Castle => Error::IllegalCastle,
                _ => Error::PatternViolation,
            });
        }
        if kind == MoveKind::Castle {
            if self.is_in_check(color) {
                return Err(Error::IllegalCastle);
            }
            let passed_col = (mv.start.col() + mv.end.col()) / 2;
            if let Some(passed) = Square::from_row_col(mv.start.row(), passed_col) {
                if self.is_square_attacked(passed, color.other()) {
                    return Err(Error::IllegalCastle);
                }
            }
        }
        // Simulate on a scratch copy. Relocating the piece (and removing an
        // en passant victim) is enough: the castling rook swap and the
        // promotion swap both leave a friendly piece on a square that was
        // already friendly, which cannot change whether the king is attacked.
        let mut scratch = self.clone();
        if kind == MoveKind::EnPassantCapture {
            if let Some(victim) = Self::en_passant_victim(mv) {
                scratch.squares[victim.index()] = None;
            }
        }
        scratch.squares[mv.end.index()] = scratch.squares[mv.start.index()].take();
        if scratch.is_in_check(color) {
            return Err(match kind {
                MoveKind::Castle => Error::IllegalCastle,
                _ => Error::MovingIntoCheck,
            });
        }
        Ok(kind)
    }

    /// Commit a move already validated by [`Self::legality`]
    ///
    /// Calling this with anything else leaves the board in an unspecified
    /// (but memory-safe) state, which is why it is not public.
    fn commit(&mut self, mv: CoordinateMove, kind: MoveKind) {
        let Some(mut piece) = self.squares[mv.start.index()].take() else {
            debug_assert!(false, "commit without a piece on the start square");
            return;
        };
        piece.moved = true;
        match kind {
            MoveKind::Ordinary => {
                self.squares[mv.end.index()] = Some(piece);
            }
            MoveKind::EnPassantCapture => {
                if let Some(victim) = Self::en_passant_victim(mv) {
                    self.squares[victim.index()] = None;
                }
                self.squares[mv.end.index()] = Some(piece);
            }
            MoveKind::Castle => {
                let kingside = mv.end.col() > mv.start.col();
                let corner_col = if kingside { 7 } else { 0 };
                let corner = Square::from_row_col(mv.start.row(), corner_col);
                let rook_to = mv.end.offset(0, if kingside { -1 } else { 1 });
                self.squares[mv.end.index()] = Some(piece);
                if let (Some(corner), Some(rook_to)) = (corner, rook_to) {
                    if let Some(mut rook) = self.squares[corner.index()].take() {
                        rook.moved = true;
                        self.squares[rook_to.index()] = Some(rook);
                    }
                }
            }
            MoveKind::Promotion => {
                self.squares[mv.end.index()] = Some(Piece {
                    kind: PieceKind::Queen,
                    color: piece.color,
                    moved: true,
                });
            }
        }
        self.last_move = Some(mv);
        self.side_to_move = self.side_to_move.other();
        tracing::debug!(%mv, ?kind, "committed move");
    }
}

impl Board for MailboxBoard {
    type Err = Error;

    fn initial_state() -> Self {
        Self::INITIAL_STATE
    }

    fn piece_at(&self, square: Square) -> Option<Piece> {
        self.get(square)
    }

    fn make_move(&mut self, mv: CoordinateMove) -> Result<(), Error> {
        MailboxBoard::make_move(self, mv)
    }

    fn legal_moves(&self) -> Vec<CoordinateMove> {
        self.legal_moves_for(self.side_to_move).collect()
    }

    fn in_check(&self) -> bool {
        self.is_in_check(self.side_to_move)
    }

    fn status(&self) -> GameStatus {
        MailboxBoard::status(self)
    }
}

/// Display as the interactive grid shown between turns
impl fmt::Display for MailboxBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "      a   b   c   d   e   f   g   h")?;
        writeln!(f, "    +---+---+---+---+---+---+---+---+")?;
        for row in 0..8u8 {
            write!(f, "  {} |", 8 - row)?;
            for col in 0..8u8 {
                match Square::from_row_col(row, col).and_then(|square| self.get(square)) {
                    Some(piece) => write!(f, " {} |", piece.letter())?,
                    None => write!(f, "   |")?,
                }
            }
            writeln!(f, " {}", 8 - row)?;
            writeln!(f, "    +---+---+---+---+---+---+---+---+")?;
        }
        writeln!(f, "      a   b   c   d   e   f   g   h")
    }
}
