//! A single move: introducing, shifting, capturing, or scoring a piece.

use crate::board::{Board, Piece};
use crate::geometry::{BoardShape, Tile};
use crate::player::PlayerType;

/// `source`/`source_piece` are both present or both absent (absence means
/// introducing from reserve); `dest`/`dest_piece` are both present or both
/// absent (absence means scoring); a move with no `dest` never carries a
/// `captured_piece` (scoring moves cannot capture).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    player: PlayerType,
    source: Option<Tile>,
    source_piece: Option<Piece>,
    dest: Option<Tile>,
    dest_piece: Option<Piece>,
    captured_piece: Option<Piece>,
}

impl Move {
    #[must_use]
    pub fn new(
        player: PlayerType,
        source: Option<Tile>,
        source_piece: Option<Piece>,
        dest: Option<Tile>,
        dest_piece: Option<Piece>,
        captured_piece: Option<Piece>,
    ) -> Self {
        debug_assert_eq!(source.is_some(), source_piece.is_some());
        debug_assert_eq!(dest.is_some(), dest_piece.is_some());
        debug_assert!(dest.is_some() || captured_piece.is_none());
        Self {
            player,
            source,
            source_piece,
            dest,
            dest_piece,
            captured_piece,
        }
    }

    #[must_use]
    pub fn player(&self) -> PlayerType {
        self.player
    }

    #[must_use]
    pub fn source(&self) -> Option<Tile> {
        self.source
    }

    #[must_use]
    pub fn source_piece(&self) -> Option<Piece> {
        self.source_piece
    }

    #[must_use]
    pub fn dest(&self) -> Option<Tile> {
        self.dest
    }

    #[must_use]
    pub fn dest_piece(&self) -> Option<Piece> {
        self.dest_piece
    }

    #[must_use]
    pub fn captured_piece(&self) -> Option<Piece> {
        self.captured_piece
    }

    #[must_use]
    pub fn is_introducing_piece(&self) -> bool {
        self.source.is_none()
    }

    #[must_use]
    pub fn is_scoring_piece(&self) -> bool {
        self.dest.is_none()
    }

    #[must_use]
    pub fn is_capture(&self) -> bool {
        self.captured_piece.is_some()
    }

    #[must_use]
    pub fn is_dest_rosette(&self, shape: &BoardShape) -> bool {
        self.dest.is_some_and(|tile| shape.is_rosette(tile))
    }

    /// Applies this move to `board` in place.
    pub fn apply(&self, board: &mut Board) {
        if let Some(source) = self.source {
            board.set(source, None);
        }
        if let Some(dest) = self.dest {
            board.set(dest, self.dest_piece);
        }
    }
}
