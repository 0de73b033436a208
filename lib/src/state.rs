//! The game state machine. A single sum type replaces the source's
//! class-hierarchy discrimination (see spec design note on tagged
//! variants); the shared `{board, light, dark}` substructure is
//! duplicated per-variant rather than pulled into a nested header, so
//! that `match` alone determines which fields are legal to read.

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::dice::Roll;
use crate::mv::Move;
use crate::player::{PlayerState, PlayerType};

/// Upper bound on legal moves generated for a single roll: one scoring
/// move plus at most one board/introduction candidate per path tile.
pub const MAX_MOVES: usize = 16;
pub type MoveList = ArrayVec<Move, MAX_MOVES>;

#[derive(Debug, Clone)]
pub enum GameState {
    WaitingForRoll {
        board: Board,
        light: PlayerState,
        dark: PlayerState,
        turn: PlayerType,
    },
    /// Action state recording that `roll` was rolled; not itself playable.
    Rolled {
        board: Board,
        light: PlayerState,
        dark: PlayerState,
        turn: PlayerType,
        roll: Roll,
        available_moves: MoveList,
    },
    WaitingForMove {
        board: Board,
        light: PlayerState,
        dark: PlayerState,
        turn: PlayerType,
        roll: Roll,
        available_moves: MoveList,
    },
    /// Action state recording that `mv` was made; not itself playable.
    Moved {
        board: Board,
        light: PlayerState,
        dark: PlayerState,
        turn: PlayerType,
        roll: Roll,
        mv: Move,
    },
    Win {
        board: Board,
        light: PlayerState,
        dark: PlayerState,
        winner: PlayerType,
    },
}

impl GameState {
    #[must_use]
    pub fn board(&self) -> &Board {
        match self {
            Self::WaitingForRoll { board, .. }
            | Self::Rolled { board, .. }
            | Self::WaitingForMove { board, .. }
            | Self::Moved { board, .. }
            | Self::Win { board, .. } => board,
        }
    }

    #[must_use]
    pub fn light(&self) -> PlayerState {
        match self {
            Self::WaitingForRoll { light, .. }
            | Self::Rolled { light, .. }
            | Self::WaitingForMove { light, .. }
            | Self::Moved { light, .. }
            | Self::Win { light, .. } => *light,
        }
    }

    #[must_use]
    pub fn dark(&self) -> PlayerState {
        match self {
            Self::WaitingForRoll { dark, .. }
            | Self::Rolled { dark, .. }
            | Self::WaitingForMove { dark, .. }
            | Self::Moved { dark, .. }
            | Self::Win { dark, .. } => *dark,
        }
    }

    /// The player to move, for every variant except `Win` (which has a
    /// `winner` instead). Calling this on a `Win` state is a programmer
    /// error: there is no "turn" once the game is over.
    #[must_use]
    pub fn turn(&self) -> PlayerType {
        match self {
            Self::WaitingForRoll { turn, .. }
            | Self::Rolled { turn, .. }
            | Self::WaitingForMove { turn, .. }
            | Self::Moved { turn, .. } => *turn,
            Self::Win { .. } => panic!("Win state has no turn player, it has a winner"),
        }
    }

    #[must_use]
    pub fn is_waiting_for_roll(&self) -> bool {
        matches!(self, Self::WaitingForRoll { .. })
    }

    #[must_use]
    pub fn is_waiting_for_move(&self) -> bool {
        matches!(self, Self::WaitingForMove { .. })
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Win { .. })
    }

    #[must_use]
    pub fn winner(&self) -> Option<PlayerType> {
        match self {
            Self::Win { winner, .. } => Some(*winner),
            _ => None,
        }
    }

    #[must_use]
    pub fn available_moves(&self) -> Option<&[Move]> {
        match self {
            Self::Rolled {
                available_moves, ..
            }
            | Self::WaitingForMove {
                available_moves, ..
            } => Some(available_moves),
            _ => None,
        }
    }
}
