//! Text rendering for boards, moves, and game states.
//! Grounded on `material.rs`'s plain `write!`/`f.write_str` `Display`
//! idiom (no external formatting crate pulled in for this).

use std::fmt;

use crate::board::Board;
use crate::geometry::Tile;
use crate::mv::Move;
use crate::state::GameState;

/// Renders a `Board` as `width` columns of `height` characters: `'L'`/
/// `'D'`/`'.'` for on-board cells, `' '` for off-board gaps, columns
/// joined by `delimiter`.
pub struct BoardRender<'a> {
    board: &'a Board,
    delimiter: &'a str,
}

impl<'a> BoardRender<'a> {
    #[must_use]
    pub fn new(board: &'a Board) -> Self {
        Self {
            board,
            delimiter: " ",
        }
    }

    #[must_use]
    pub fn with_delimiter(board: &'a Board, delimiter: &'a str) -> Self {
        Self { board, delimiter }
    }
}

impl fmt::Display for BoardRender<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shape = self.board.shape();
        for x in 1..=shape.width() {
            if x > 1 {
                f.write_str(self.delimiter)?;
            }
            for y in 1..=shape.height() {
                let tile = Tile::new(x, y);
                let ch = if !shape.contains(tile) {
                    ' '
                } else {
                    match self.board.get(tile) {
                        Some(piece) => piece.owner().character(),
                        None => '.',
                    }
                };
                write!(f, "{ch}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.source(), self.dest()) {
            (None, None) => unreachable!("introduce-and-score is impossible by construction"),
            (None, Some(dest)) => write!(f, "Introduce a piece to {dest}"),
            (Some(source), None) => write!(f, "Score a piece from {source}"),
            (Some(source), Some(dest)) if self.is_capture() => {
                write!(f, "Move {source} to capture {dest}")
            }
            (Some(source), Some(dest)) => write!(f, "Move {source} to {dest}"),
        }
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", BoardRender::new(self.board()))?;
        write!(
            f,
            "Light: {} in reserve, {} scored | Dark: {} in reserve, {} scored",
            self.light().piece_count(),
            self.light().score(),
            self.dark().piece_count(),
            self.dark().score(),
        )?;
        match self {
            GameState::Win { winner, .. } => write!(f, " | {winner} wins"),
            _ => write!(f, " | {} to move", self.turn()),
        }
    }
}
