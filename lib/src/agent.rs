//! Agents that choose a move given a playable state: `LutAgent`, a
//! one-ply search backed by a look-up table, and `RandomAgent`, a uniform
//! baseline used to measure a LUT agent's win rate.
//!
//! `LutAgent::play` is ported from `royalur/lut/lut_player.py::LutAgent.play`.
//! Its geometric mirror-reflection `invert_state` reconstructs the
//! `copy_inverted()` helper that `lut_player.py` calls but whose
//! definition isn't present anywhere in the retrieved source: every board
//! shape here is left-right mirror-symmetric by construction (light's
//! path at `x=1` has the same `y` sequence as dark's path at `x=3`), so a
//! light-to-move LUT can answer a dark-to-move query by mirroring the
//! whole position across that axis, rather than just swapping labels in
//! place (which would describe a board no enumerator ever produced). See
//! DESIGN.md's Open Question on this for the full reasoning.

use rand::Rng;

use crate::board::{Board, Piece};
use crate::encoding::StateEncoder;
use crate::geometry::{BoardShape, Tile};
use crate::lut::LutFile;
use crate::mv::Move;
use crate::player::{PlayerState, PlayerType};
use crate::rules::RuleEngine;
use crate::state::GameState;

/// An agent that picks the move maximizing the light player's winning
/// chances by one-ply-searching a pre-computed look-up table. Only
/// meaningful for light-to-move states; `play` panics if handed a
/// dark-to-move or already-finished state, matching the state machine's
/// own "wrong variant" convention (see `rules.rs`).
#[derive(Debug)]
pub struct LutAgent<'a> {
    engine: &'a RuleEngine,
    encoder: &'a StateEncoder,
    lut: &'a LutFile,
}

impl<'a> LutAgent<'a> {
    #[must_use]
    pub fn new(engine: &'a RuleEngine, encoder: &'a StateEncoder, lut: &'a LutFile) -> Self {
        Self {
            engine,
            encoder,
            lut,
        }
    }

    /// Chooses the available move whose resulting position has the
    /// highest light-win value, breaking ties by move order. A branch
    /// whose lookup fails is treated as unusable rather than aborting the
    /// whole search; if every branch fails, falls back to the first
    /// legal move.
    pub fn play(&self, state: &GameState) -> Move {
        let moves = state
            .available_moves()
            .expect("LutAgent::play called on a state with no available moves");
        moves
            .iter()
            .filter_map(|mv| {
                let [_, next] = self.engine.apply_move(state, *mv);
                self.value_of(&next).ok().map(|value| (*mv, value))
            })
            .max_by_key(|(_, value)| *value)
            .map_or(moves[0], |(mv, _)| mv)
    }

    /// The light-win value of `state`, from the look-up table. Terminal
    /// states are scored directly (`65535` light win, `0` dark win);
    /// dark-to-move states are mirrored to a light-to-move query and the
    /// value complemented against `65535`.
    fn value_of(&self, state: &GameState) -> std::io::Result<u16> {
        if let GameState::Win { winner, .. } = state {
            return Ok(if *winner == PlayerType::Light { 65535 } else { 0 });
        }
        if state.turn() == PlayerType::Light {
            let key = self
                .encoder
                .encode_game_state(state)
                .expect("apply_move only produces encodable light-to-move states here");
            self.lut.lookup(0, key)
        } else {
            let inverted = invert_state(state, self.engine.settings().board_shape());
            let key = self
                .encoder
                .encode_game_state(&inverted)
                .expect("invert_state always yields a light-to-move state");
            self.lut.lookup(0, key).map(|value| 65535 - value)
        }
    }
}

/// Mirrors a dark-to-move state into the light-to-move equivalent the LUT
/// was built for: reflects every tile's `x` coordinate across the board's
/// vertical centerline, flips each piece's owner, and swaps the two
/// players' reserves/scores wholesale.
fn invert_state(state: &GameState, shape: &BoardShape) -> GameState {
    let GameState::WaitingForRoll {
        board,
        light,
        dark,
        turn,
    } = state
    else {
        panic!("invert_state called on a state that is not WaitingForRoll");
    };
    debug_assert_eq!(
        *turn,
        PlayerType::Dark,
        "only dark-to-move states need inverting"
    );
    GameState::WaitingForRoll {
        board: mirror_board(board, shape),
        light: PlayerState::new(PlayerType::Light, dark.piece_count(), dark.score()),
        dark: PlayerState::new(PlayerType::Dark, light.piece_count(), light.score()),
        turn: PlayerType::Light,
    }
}

fn mirror_board(board: &Board, shape: &BoardShape) -> Board {
    let mut mirrored = Board::new(board.shape_arc());
    let width = shape.width();
    for x in 1..=width {
        for y in 1..=shape.height() {
            let tile = Tile::new(x, y);
            if !shape.contains(tile) {
                continue;
            }
            let Some(piece) = board.get(tile) else {
                continue;
            };
            let mirrored_tile = Tile::new(width + 1 - x, y);
            let mirrored_piece = Piece::new(piece.owner().other(), piece.path_index());
            mirrored.set(mirrored_tile, Some(mirrored_piece));
        }
    }
    mirrored
}

/// A uniformly-random baseline opponent, used by the S6 win-rate scenario
/// and the CLI's `play` subcommand.
#[derive(Debug, Default)]
pub struct RandomAgent;

impl RandomAgent {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Picks uniformly among the available moves.
    pub fn play(&self, state: &GameState) -> Move {
        let moves = state
            .available_moves()
            .expect("RandomAgent::play called on a state with no available moves");
        let index = rand::thread_rng().gen_range(0..moves.len());
        moves[index]
    }
}
