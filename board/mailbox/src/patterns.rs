//! Movement-pattern predicates, one per piece kind
//!
//! A pattern decides whether a piece's geometry and the current occupancy
//! permit a move, ignoring whether the mover's own king would be left in
//! check afterwards; that is the legality engine's job. En passant does not
//! appear here at all because it depends on history, not on occupancy.

use board::{Color, Piece, PieceKind, Square};

use crate::MailboxBoard;

/// Returns whether the geometric pattern of `piece` permits moving from
/// `start` to `end` on the given board
///
/// Purely a predicate; the board is only read. The king's two-column castle
/// candidate is included (path clearance only, with attack safety left to
/// the legality engine).
pub fn pattern_valid(piece: Piece, start: Square, end: Square, board: &MailboxBoard) -> bool {
    if start == end {
        return false;
    }
    match piece.kind {
        PieceKind::Pawn => pawn(piece, start, end, board),
        PieceKind::Rook => rook(piece, start, end, board),
        PieceKind::Knight => knight(piece, start, end, board),
        PieceKind::Bishop => bishop(piece, start, end, board),
        PieceKind::Queen => rook(piece, start, end, board) || bishop(piece, start, end, board),
        PieceKind::King => king(piece, start, end, board),
    }
}

/// Whether the destination is empty or holds a capturable enemy piece
fn can_land(color: Color, end: Square, board: &MailboxBoard) -> bool {
    board.get(end).map_or(true, |target| target.color != color)
}

/// Whether every square strictly between `start` and `end` is empty
///
/// Walks in unit steps of the given deltas' signs; `start` and `end` must be
/// on a shared rank, file, or diagonal for the walk to terminate at `end`.
fn path_clear(start: Square, end: Square, board: &MailboxBoard) -> bool {
    let rows = (end.row() as i8 - start.row() as i8).signum();
    let cols = (end.col() as i8 - start.col() as i8).signum();
    let mut square = start;
    loop {
        square = match square.offset(rows, cols) {
            Some(next) => next,
            None => return false,
        };
        if square == end {
            return true;
        }
        if board.get(square).is_some() {
            return false;
        }
    }
}

fn pawn(piece: Piece, start: Square, end: Square, board: &MailboxBoard) -> bool {
    let forward = piece.color.forward();
    let rows = end.row() as i8 - start.row() as i8;
    let cols = end.col() as i8 - start.col() as i8;
    // Forward moves land only on empty squares
    if cols == 0 && board.get(end).is_none() {
        if rows == forward {
            return true;
        }
        if start.row() == piece.color.pawn_row() && rows == 2 * forward {
            return start
                .offset(forward, 0)
                .is_some_and(|middle| board.get(middle).is_none());
        }
    }
    // A diagonal step must capture
    cols.abs() == 1
        && rows == forward
        && board
            .get(end)
            .is_some_and(|target| target.color != piece.color)
}

fn rook(piece: Piece, start: Square, end: Square, board: &MailboxBoard) -> bool {
    if start.row() != end.row() && start.col() != end.col() {
        return false;
    }
    path_clear(start, end, board) && can_land(piece.color, end, board)
}

fn knight(piece: Piece, start: Square, end: Square, board: &MailboxBoard) -> bool {
    let rows = start.row().abs_diff(end.row());
    let cols = start.col().abs_diff(end.col());
    ((rows, cols) == (2, 1) || (rows, cols) == (1, 2)) && can_land(piece.color, end, board)
}

fn bishop(piece: Piece, start: Square, end: Square, board: &MailboxBoard) -> bool {
    if start.row().abs_diff(end.row()) != start.col().abs_diff(end.col()) {
        return false;
    }
    path_clear(start, end, board) && can_land(piece.color, end, board)
}

fn king(piece: Piece, start: Square, end: Square, board: &MailboxBoard) -> bool {
    let rows = start.row().abs_diff(end.row());
    let cols = start.col().abs_diff(end.col());
    if rows <= 1 && cols <= 1 {
        return can_land(piece.color, end, board);
    }
    // Castle candidate: an unmoved king sliding two columns towards an
    // unmoved rook of its own color, over nothing but empty squares. Whether
    // the path is attacked is not this predicate's concern.
    if rows == 0 && cols == 2 && !piece.moved {
        let corner_col = if end.col() > start.col() { 7 } else { 0 };
        let Some(corner) = Square::from_row_col(start.row(), corner_col) else {
            return false;
        };
        let rook_ready = board.get(corner).is_some_and(|rook| {
            rook.kind == PieceKind::Rook && rook.color == piece.color && !rook.moved
        });
        return rook_ready && path_clear(start, corner, board);
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MailboxBoard;

    use quickcheck::quickcheck;

    /// The sliding and jumping pieces, whose patterns should not care about
    /// color or position beyond the board edge
    const SYMMETRIC_KINDS: [PieceKind; 4] = [
        PieceKind::Rook,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Queen,
    ];

    fn square(row: u8, col: u8) -> Square {
        Square::from_row_col(row % 8, col % 8).expect("wrapped coordinates are always in range")
    }

    fn lone_piece(piece: Piece, at: Square) -> MailboxBoard {
        let mut board = MailboxBoard::EMPTY;
        board.squares[at.index()] = Some(piece);
        board
    }

    quickcheck! {
        /// Mirroring the board vertically and swapping colors preserves
        /// pattern validity for every piece except pawns and kings.
        fn test_patterns_are_color_symmetric(kind: u8, sr: u8, sc: u8, er: u8, ec: u8) -> bool {
            let kind = SYMMETRIC_KINDS[kind as usize % SYMMETRIC_KINDS.len()];
            let (start, end) = (square(sr, sc), square(er, ec));
            let (mirrored_start, mirrored_end) =
                (square(7 - start.row(), start.col()), square(7 - end.row(), end.col()));
            let white = Piece::new(kind, Color::White);
            let black = Piece::new(kind, Color::Black);
            pattern_valid(white, start, end, &lone_piece(white, start))
                == pattern_valid(black, mirrored_start, mirrored_end, &lone_piece(black, mirrored_start))
        }

        /// Translating a move across an empty board preserves pattern
        /// validity as long as it stays on the board.
        fn test_patterns_are_translation_invariant(
            kind: u8, sr: u8, sc: u8, er: u8, ec: u8, rows: i8, cols: i8
        ) -> bool {
            let kind = SYMMETRIC_KINDS[kind as usize % SYMMETRIC_KINDS.len()];
            let (start, end) = (square(sr, sc), square(er, ec));
            let (rows, cols) = (rows % 8, cols % 8);
            let (Some(shifted_start), Some(shifted_end)) =
                (start.offset(rows, cols), end.offset(rows, cols))
            else {
                return true;
            };
            let piece = Piece::new(kind, Color::White);
            pattern_valid(piece, start, end, &lone_piece(piece, start))
                == pattern_valid(piece, shifted_start, shifted_end, &lone_piece(piece, shifted_start))
        }
    }

    #[test]
    fn pawn_steps_forward_onto_empty_squares_only() {
        let pawn = Piece::new(PieceKind::Pawn, Color::White);
        let board = lone_piece(pawn, Square::E2);
        assert!(pattern_valid(pawn, Square::E2, Square::E3, &board));
        assert!(pattern_valid(pawn, Square::E2, Square::E4, &board));
        // No sideways, no backward, no diagonal onto empty squares
        assert!(!pattern_valid(pawn, Square::E2, Square::D2, &board));
        assert!(!pattern_valid(pawn, Square::E2, Square::E1, &board));
        assert!(!pattern_valid(pawn, Square::E2, Square::D3, &board));
        assert!(!pattern_valid(pawn, Square::E2, Square::F3, &board));
    }

    #[test]
    fn pawn_double_step_needs_both_squares_clear_and_the_home_row() {
        let pawn = Piece::new(PieceKind::Pawn, Color::White);
        let mut board = lone_piece(pawn, Square::E2);
        board.squares[Square::E3.index()] = Some(Piece::new(PieceKind::Knight, Color::Black));
        assert!(!pattern_valid(pawn, Square::E2, Square::E4, &board));

        let board = lone_piece(pawn, Square::E3);
        assert!(!pattern_valid(pawn, Square::E3, Square::E5, &board));
    }

    #[test]
    fn pawn_captures_diagonally_against_enemies_only() {
        let pawn = Piece::new(PieceKind::Pawn, Color::White);
        let mut board = lone_piece(pawn, Square::E4);
        board.squares[Square::D5.index()] = Some(Piece::new(PieceKind::Rook, Color::Black));
        board.squares[Square::F5.index()] = Some(Piece::new(PieceKind::Rook, Color::White));
        assert!(pattern_valid(pawn, Square::E4, Square::D5, &board));
        assert!(!pattern_valid(pawn, Square::E4, Square::F5, &board));
    }

    #[test]
    fn black_pawn_marches_the_other_way() {
        let pawn = Piece::new(PieceKind::Pawn, Color::Black);
        let board = lone_piece(pawn, Square::E7);
        assert!(pattern_valid(pawn, Square::E7, Square::E6, &board));
        assert!(pattern_valid(pawn, Square::E7, Square::E5, &board));
        assert!(!pattern_valid(pawn, Square::E7, Square::E8, &board));
    }

    #[test]
    fn sliding_pieces_stop_at_blockers() {
        let rook = Piece::new(PieceKind::Rook, Color::White);
        let mut board = lone_piece(rook, Square::A1);
        board.squares[Square::A4.index()] = Some(Piece::new(PieceKind::Pawn, Color::Black));
        assert!(pattern_valid(rook, Square::A1, Square::A3, &board));
        assert!(pattern_valid(rook, Square::A1, Square::A4, &board));
        assert!(!pattern_valid(rook, Square::A1, Square::A5, &board));
        assert!(!pattern_valid(rook, Square::A1, Square::B3, &board));

        let bishop = Piece::new(PieceKind::Bishop, Color::White);
        let mut board = lone_piece(bishop, Square::C1);
        board.squares[Square::E3.index()] = Some(Piece::new(PieceKind::Pawn, Color::White));
        assert!(pattern_valid(bishop, Square::C1, Square::D2, &board));
        assert!(!pattern_valid(bishop, Square::C1, Square::E3, &board));
        assert!(!pattern_valid(bishop, Square::C1, Square::F4, &board));
    }

    #[test]
    fn knight_jumps_over_anything() {
        let knight = Piece::new(PieceKind::Knight, Color::White);
        let board = MailboxBoard::INITIAL_STATE;
        assert!(pattern_valid(knight, Square::G1, Square::F3, &board));
        assert!(pattern_valid(knight, Square::G1, Square::H3, &board));
        assert!(!pattern_valid(knight, Square::G1, Square::E2, &board));
        assert!(!pattern_valid(knight, Square::G1, Square::G3, &board));
    }

    #[test]
    fn queen_is_the_union_of_rook_and_bishop() {
        let queen = Piece::new(PieceKind::Queen, Color::White);
        let board = lone_piece(queen, Square::D4);
        assert!(pattern_valid(queen, Square::D4, Square::D8, &board));
        assert!(pattern_valid(queen, Square::D4, Square::H4, &board));
        assert!(pattern_valid(queen, Square::D4, Square::G7, &board));
        assert!(!pattern_valid(queen, Square::D4, Square::E6, &board));
    }

    #[test]
    fn king_reaches_adjacent_squares() {
        let king = Piece::new(PieceKind::King, Color::White);
        let board = lone_piece(king, Square::E4);
        for target in [Square::D3, Square::D4, Square::D5, Square::E3, Square::E5] {
            assert!(pattern_valid(king, Square::E4, target, &board));
        }
        assert!(!pattern_valid(king, Square::E4, Square::E6, &board));
        assert!(!pattern_valid(king, Square::E4, Square::C4, &board));
    }

    #[test]
    fn castle_candidate_checks_path_clearance_but_not_attacks() {
        let king = Piece::new(PieceKind::King, Color::White);
        let mut board = lone_piece(king, Square::E1);
        board.squares[Square::H1.index()] = Some(Piece::new(PieceKind::Rook, Color::White));
        board.squares[Square::A1.index()] = Some(Piece::new(PieceKind::Rook, Color::White));
        // An enemy rook covering the path does not bother the pattern layer
        board.squares[Square::F8.index()] = Some(Piece::new(PieceKind::Rook, Color::Black));
        assert!(pattern_valid(king, Square::E1, Square::G1, &board));
        assert!(pattern_valid(king, Square::E1, Square::C1, &board));

        // A piece in the way does
        board.squares[Square::B1.index()] = Some(Piece::new(PieceKind::Knight, Color::White));
        assert!(!pattern_valid(king, Square::E1, Square::C1, &board));

        // So does a missing or already-moved rook
        board.squares[Square::H1.index()] = None;
        assert!(!pattern_valid(king, Square::E1, Square::G1, &board));
        let mut stale = Piece::new(PieceKind::Rook, Color::White);
        stale.moved = true;
        board.squares[Square::H1.index()] = Some(stale);
        assert!(!pattern_valid(king, Square::E1, Square::G1, &board));

        // And so does a moved king
        let mut wandered = king;
        wandered.moved = true;
        board.squares[Square::H1.index()] = Some(Piece::new(PieceKind::Rook, Color::White));
        assert!(!pattern_valid(wandered, Square::E1, Square::G1, &board));
    }

    #[test]
    fn castle_candidate_requires_the_corner_rook_to_match_color() {
        let king = Piece::new(PieceKind::King, Color::White);
        let mut board = lone_piece(king, Square::E1);
        board.squares[Square::H1.index()] = Some(Piece::new(PieceKind::Rook, Color::Black));
        assert!(!pattern_valid(king, Square::E1, Square::G1, &board));
    }
}
