//! An interactive player typing commands at a terminal prompt

use std::fmt;
use std::io::{self, Write};

use board::{Board, CoordinateMove, GameStatus, Square};
use players::{Action, Player};

/// An input for a human typing in the terminal
///
/// Besides moves, the prompt accepts the `help`, `save`, `load`, and `quit`
/// commands; everything except a well-formed action loops back to the
/// prompt.
#[derive(Default)]
pub struct TerminalUIPlayer;

impl TerminalUIPlayer {
    /// Create a new player
    pub const fn new() -> Self {
        Self
    }
}

impl<B: Board + fmt::Display> Player<B> for TerminalUIPlayer {
    fn next_action(&mut self, board: &B, _history: &[CoordinateMove]) -> Action {
        loop {
            println!("Enter a move (e.g. e2e4), or: help <square> | save <file> | load <file> | quit");
            print!("> ");
            let _ = io::stdout().flush();
            let mut buffer = String::new();
            match io::stdin().read_line(&mut buffer) {
                // End of input means nobody is typing anymore
                Ok(0) => return Action::Quit,
                Ok(_) => {}
                Err(err) => {
                    eprintln!("Error reading input: {err}");
                    return Action::Quit;
                }
            }
            let mut words = buffer.split_whitespace();
            match words.next() {
                None => continue,
                Some("quit") => return Action::Quit,
                Some("save") => match words.next() {
                    Some(path) => return Action::Save(path.into()),
                    None => println!("Usage: save <file>"),
                },
                Some("load") => match words.next() {
                    Some(path) => return Action::Load(path.into()),
                    None => println!("Usage: load <file>"),
                },
                Some("help") => match words.next() {
                    Some(square) => help_for_square(board, square),
                    None => println!("Usage: help <square>"),
                },
                Some(word) => match word.parse::<CoordinateMove>() {
                    Ok(mv) => return Action::Move(mv),
                    Err(err) => println!("Invalid input! {err}."),
                },
            }
        }
    }

    fn react_to_move(&mut self, opponent_move: CoordinateMove) {
        println!("Opponent played: {opponent_move}");
    }
}

/// Answer `help <square>`: where may the piece on that square go?
fn help_for_square<B: Board>(board: &B, square: &str) {
    let Ok(square) = square.parse::<Square>() else {
        println!("Invalid square. Usage: help e2");
        return;
    };
    let Some(piece) = board.piece_at(square) else {
        println!("No piece at {square}.");
        return;
    };
    if let GameStatus::AwaitingMove(to_move) = board.status() {
        if piece.color != to_move {
            println!("It's {to_move}'s turn. Select one of your own pieces.");
            return;
        }
    }
    let destinations: Vec<String> = board
        .legal_moves()
        .into_iter()
        .filter(|mv| mv.start == square)
        .map(|mv| mv.end.to_string())
        .collect();
    if destinations.is_empty() {
        println!("Possible moves for {square}: (none)");
    } else {
        println!("Possible moves for {square}: {}", destinations.join(" "));
    }
}
