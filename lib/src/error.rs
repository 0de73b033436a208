//! Error kinds surfaced to callers. `InvariantViolation` conditions (bad
//! board state during encoding, state-machine method called on the wrong
//! variant, negative path index) are programmer errors and stay as
//! `panic!`/`assert!` at the point of violation rather than being
//! threaded through `Result`, matching the rest of this crate.

use std::fmt;

/// Input a caller handed us that we can't act on: a bad tile string, a
/// roll value outside the dice's range, or a `Piece`/`Tile` that doesn't
/// match any currently available move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrError {
    InvalidInput(String),
}

impl fmt::Display for UrError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
        }
    }
}

impl std::error::Error for UrError {}
