#![warn(clippy::pedantic)]
#![allow(
    clippy::missing_panics_doc,
    clippy::missing_errors_doc,
    clippy::cast_possible_truncation
)]

mod agent;
mod board;
mod dice;
mod driver;
mod encoding;
mod enumerator;
mod error;
mod geometry;
mod lut;
mod mv;
mod player;
mod render;
mod rules;
mod settings;
mod state;

pub use crate::agent::{LutAgent, RandomAgent};
pub use crate::board::{Board, Piece};
pub use crate::dice::{BinaryDice, Dice, Roll};
pub use crate::driver::Driver;
pub use crate::encoding::{CenterLaneTable, StateEncoder};
pub use crate::enumerator::enumerate_keys;
pub use crate::error::UrError;
pub use crate::geometry::{BoardShape, PathPair, Tile};
pub use crate::lut::LutFile;
pub use crate::mv::Move;
pub use crate::player::{PlayerState, PlayerType};
pub use crate::render::BoardRender;
pub use crate::rules::RuleEngine;
pub use crate::settings::GameSettings;
pub use crate::state::{GameState, MoveList, MAX_MOVES};
