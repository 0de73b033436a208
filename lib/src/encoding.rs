//! Perfect-hash encoding of light-turn game states into 31-bit LUT keys.
//! Ported from `royalur/lut/board_encoder.py::SimpleGameStateEncoding`.
//!
//! The key packs, from the low bit: a 6-bit right-side-lane occupancy
//! mask, a 13-bit compressed center-lane index, a 6-bit left-side-lane
//! occupancy mask, a 3-bit dark reserve count, and a 3-bit light reserve
//! count.

use std::sync::Arc;

use crate::board::{Board, Piece};
use crate::error::UrError;
use crate::geometry::{BoardShape, PathPair, Tile};
use crate::player::{PlayerState, PlayerType};
use crate::state::GameState;

const RAW_CENTER_STATES: usize = 1 << 16;
const CENTER_LANE_BITS: u32 = 13;
const CENTER_LANE_TILES: u8 = 8;
const SIDE_LANE_TILES: u8 = 6;

/// Dense lookup from a raw 16-bit center-lane occupancy (2 bits/tile, 8
/// tiles, 0 = empty / 1 = dark / 2 = light) to its compressed 13-bit
/// index, plus the reverse mapping (a table built alongside the forward
/// one so decoding a key back to a board is possible for debugging).
/// Built once via the same depth-first enumeration as the original: every
/// combination of the 8 tiles with at most 7 pieces of either color is
/// assigned a dense index in generation order; every other raw value maps
/// to `None`.
#[derive(Debug)]
pub struct CenterLaneTable {
    compression: Vec<i32>,
    decompression: Vec<u16>,
}

impl CenterLaneTable {
    #[must_use]
    pub fn new() -> Self {
        let mut compression = vec![-1; RAW_CENTER_STATES];
        let mut states = Vec::new();
        Self::add_states(&mut states, 0, 7, 7, 0);

        for (index, &state) in states.iter().enumerate() {
            compression[state as usize] = index as i32;
        }

        let max_compressed = compression.iter().copied().max().unwrap_or(-1);
        let mut bits = 1u32;
        while i64::from(max_compressed) >= (1i64 << bits) {
            bits += 1;
        }
        assert_eq!(
            bits, CENTER_LANE_BITS,
            "center lane compression was expected to take {CENTER_LANE_BITS} bits, computed {bits}"
        );
        Self {
            compression,
            decompression: states,
        }
    }

    fn add_states(states: &mut Vec<u16>, state: u16, light_pieces: i8, dark_pieces: i8, index: u8) {
        let next_index = index + 1;
        for occupant in 0..3u16 {
            let mut new_light = light_pieces;
            let mut new_dark = dark_pieces;
            match occupant {
                1 => {
                    new_dark -= 1;
                    if new_dark < 0 {
                        continue;
                    }
                }
                2 => {
                    new_light -= 1;
                    if new_light < 0 {
                        continue;
                    }
                }
                _ => {}
            }
            let new_state = state | (occupant << (2 * u16::from(index)));
            if next_index == CENTER_LANE_TILES {
                states.push(new_state);
            } else {
                Self::add_states(states, new_state, new_light, new_dark, next_index);
            }
        }
    }

    /// Compresses a raw center-lane occupancy to its dense index, or
    /// `None` if it is not reachable from a legal game (too many pieces
    /// of one color).
    #[must_use]
    pub fn compress(&self, raw: u16) -> Option<u16> {
        match self.compression[raw as usize] {
            -1 => None,
            value => Some(value as u16),
        }
    }

    /// Inverse of `compress`: recovers the raw 16-bit center-lane
    /// occupancy a compressed index was generated from, or `None` if
    /// `index` is past the end of the reachable domain.
    #[must_use]
    pub fn decompress(&self, index: u16) -> Option<u16> {
        self.decompression.get(index as usize).copied()
    }
}

impl Default for CenterLaneTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Encodes board/game states for light-to-move positions into the packed
/// keys used by the LUT file format. Holds the precomputed center-lane
/// table, so construct one `StateEncoder` and reuse it.
#[derive(Debug)]
pub struct StateEncoder {
    center: CenterLaneTable,
}

impl StateEncoder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            center: CenterLaneTable::new(),
        }
    }

    fn encode_side_lane(&self, board: &Board, x: u8) -> u16 {
        let mut state: u16 = 0;
        for index in 0..SIDE_LANE_TILES {
            let y = if index < 4 { index + 1 } else { index + 3 };
            let tile = Tile::new(x, y);
            let occupant = u16::from(board.get(tile).is_some());
            state |= occupant << index;
        }
        state
    }

    fn encode_middle_lane_raw(&self, board: &Board) -> u16 {
        let mut state: u16 = 0;
        for index in 0..CENTER_LANE_TILES {
            let tile = Tile::new(2, index + 1);
            let occupant = match board.get(tile) {
                None => 0u16,
                Some(piece) if piece.owner() == PlayerType::Dark => 1,
                Some(_) => 2,
            };
            state |= occupant << (2 * u16::from(index));
        }
        state
    }

    /// Encodes the board alone, independent of whose turn it is or
    /// either player's reserve. Returns `InvalidInput` if the center-lane
    /// occupancy cannot arise in a legal game, or if `board` isn't shaped
    /// like the Standard 3x8 board this encoder's fixed 31-bit layout was
    /// built for: the side/center lane loops below only ever visit the
    /// Standard board's 6/8 on-path cells, so handing this an Aseb board
    /// (12-tall center column) would silently ignore every piece past row
    /// 8 instead of failing loudly.
    pub fn encode_board(&self, board: &Board) -> Result<u32, UrError> {
        let shape = board.shape();
        if shape.width() != 3 || shape.height() != 8 {
            return Err(UrError::InvalidInput(format!(
                "this encoder only supports the Standard 3x8 board shape, got {}x{} ({})",
                shape.width(),
                shape.height(),
                shape.name()
            )));
        }
        let left_lane = self.encode_side_lane(board, 1);
        let right_lane = self.encode_side_lane(board, 3);
        let raw_middle = self.encode_middle_lane_raw(board);
        let middle_lane = self.center.compress(raw_middle).ok_or_else(|| {
            UrError::InvalidInput(
                "illegal board state: center lane occupancy is unreachable from a legal game"
                    .to_string(),
            )
        })?;
        Ok(u32::from(right_lane) | (u32::from(middle_lane) << 6) | (u32::from(left_lane) << 19))
    }

    /// Encodes a full game state. Only light-to-move, non-terminal states
    /// are supported; callers holding a dark-to-move state must invert it
    /// first (see `agent::invert_state`).
    pub fn encode_game_state(&self, state: &GameState) -> Result<u32, UrError> {
        if let GameState::Win { .. } = state {
            return Err(UrError::InvalidInput(
                "finished game states cannot be encoded".to_string(),
            ));
        }
        if state.turn() != PlayerType::Light {
            return Err(UrError::InvalidInput(
                "only game states where it is the light player's turn are supported by this encoding"
                    .to_string(),
            ));
        }

        let board_key = self.encode_board(state.board())?;
        let dark_reserve = u32::from(state.dark().piece_count());
        let light_reserve = u32::from(state.light().piece_count());
        Ok(board_key | (dark_reserve << 25) | (light_reserve << 28))
    }

    /// Inverse of `encode_board`: rebuilds the Standard-shaped board a
    /// 25-bit board key was produced from. `paths` supplies the
    /// `path_index` each recovered piece must carry — the encoder's bit
    /// positions only fix *which tile* a bit refers to, not a piece's
    /// position within its owner's path, which differs between e.g. Bell
    /// and Masters even on the same Standard board. For debugging a LUT
    /// or the enumerator; not used on any hot path.
    #[must_use]
    pub fn decode_board(&self, board_key: u32, shape: Arc<BoardShape>, paths: &PathPair) -> Board {
        assert!(
            shape.width() == 3 && shape.height() == 8,
            "decode_board only supports the Standard 3x8 board shape"
        );
        let mut board = Board::new(shape);
        let left_lane = ((board_key >> 19) & 0x3F) as u16;
        let right_lane = (board_key & 0x3F) as u16;
        let middle_index = ((board_key >> 6) & 0x1FFF) as u16;
        let raw_middle = self
            .center
            .decompress(middle_index)
            .expect("board_key was produced by encode_board, so its middle index must decompress");

        decode_side_lane(&mut board, 1, left_lane, PlayerType::Light, paths);
        decode_side_lane(&mut board, 3, right_lane, PlayerType::Dark, paths);
        for index in 0..CENTER_LANE_TILES {
            let occupant = (raw_middle >> (2 * u16::from(index))) & 0b11;
            if occupant == 0 {
                continue;
            }
            let owner = if occupant == 1 {
                PlayerType::Dark
            } else {
                PlayerType::Light
            };
            let tile = Tile::new(2, index + 1);
            let path_index = path_index_of(paths, owner, tile);
            board.set(tile, Some(Piece::new(owner, path_index)));
        }
        board
    }

    /// Inverse of `encode_game_state`: rebuilds the light-to-move
    /// `WaitingForRoll` a 31-bit key was produced from.
    #[must_use]
    pub fn decode_game_state(&self, key: u32, shape: Arc<BoardShape>, paths: &PathPair) -> GameState {
        let board = self.decode_board(key & 0x01FF_FFFF, shape, paths);
        let dark_reserve = ((key >> 25) & 0b111) as u8;
        let light_reserve = ((key >> 28) & 0b111) as u8;
        GameState::WaitingForRoll {
            board,
            light: PlayerState::new(PlayerType::Light, light_reserve, 0),
            dark: PlayerState::new(PlayerType::Dark, dark_reserve, 0),
            turn: PlayerType::Light,
        }
    }
}

fn path_index_of(paths: &PathPair, owner: PlayerType, tile: Tile) -> u8 {
    paths
        .get(owner)
        .iter()
        .position(|&t| t == tile)
        .unwrap_or_else(|| panic!("{tile} is not on {owner:?}'s path")) as u8
}

fn decode_side_lane(board: &mut Board, x: u8, lane: u16, owner: PlayerType, paths: &PathPair) {
    for index in 0..SIDE_LANE_TILES {
        if (lane >> index) & 1 == 0 {
            continue;
        }
        let y = if index < 4 { index + 1 } else { index + 3 };
        let tile = Tile::new(x, y);
        let path_index = path_index_of(paths, owner, tile);
        board.set(tile, Some(Piece::new(owner, path_index)));
    }
}

impl Default for StateEncoder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Piece;
    use crate::player::PlayerState;
    use std::sync::Arc;

    use crate::geometry::BoardShape;

    #[test]
    fn test_center_lane_table_is_13_bits() {
        let table = CenterLaneTable::new();
        assert!(table.compress(0).is_some());
        // all-dark (2 bits of 1 per tile) needs 8 dark pieces, impossible
        // with only 7 available, so it must be unreachable.
        let all_dark: u16 = (0..8).map(|i| 1u16 << (2 * i)).fold(0, |a, b| a | b);
        assert_eq!(table.compress(all_dark), None);
    }

    #[test]
    fn test_encode_board_empty_is_deterministic() {
        let shape = Arc::new(BoardShape::standard());
        let board = Board::new(shape);
        let encoder = StateEncoder::new();
        let key1 = encoder.encode_board(&board).unwrap();
        let key2 = encoder.encode_board(&board).unwrap();
        assert_eq!(key1, key2);
        assert!(key1 < (1 << 25), "board-only key must fit in 25 bits");
    }

    #[test]
    fn test_encode_board_distinguishes_piece_placement() {
        let shape = Arc::new(BoardShape::standard());
        let mut board = Board::new(shape);
        let encoder = StateEncoder::new();
        let empty_key = encoder.encode_board(&board).unwrap();
        board.set(Tile::new(2, 1), Some(Piece::new(PlayerType::Light, 4)));
        let occupied_key = encoder.encode_board(&board).unwrap();
        assert_ne!(empty_key, occupied_key);
    }

    #[test]
    fn test_encode_game_state_rejects_dark_turn() {
        let shape = Arc::new(BoardShape::standard());
        let board = Board::new(shape);
        let encoder = StateEncoder::new();
        let state = GameState::WaitingForRoll {
            board,
            light: PlayerState::new(PlayerType::Light, 7, 0),
            dark: PlayerState::new(PlayerType::Dark, 7, 0),
            turn: PlayerType::Dark,
        };
        assert!(encoder.encode_game_state(&state).is_err());
    }

    #[test]
    fn test_encode_game_state_packs_reserves_at_top_bits() {
        let shape = Arc::new(BoardShape::standard());
        let board = Board::new(shape);
        let encoder = StateEncoder::new();
        let state = GameState::WaitingForRoll {
            board,
            light: PlayerState::new(PlayerType::Light, 7, 0),
            dark: PlayerState::new(PlayerType::Dark, 6, 0),
            turn: PlayerType::Light,
        };
        let key = encoder.encode_game_state(&state).unwrap();
        assert_eq!((key >> 28) & 0b111, 7);
        assert_eq!((key >> 25) & 0b111, 6);
    }

    #[test]
    fn test_encode_board_rejects_aseb_shape() {
        let shape = Arc::new(BoardShape::aseb());
        let board = Board::new(shape);
        let encoder = StateEncoder::new();
        let err = encoder.encode_board(&board).unwrap_err();
        assert!(matches!(err, UrError::InvalidInput(_)));
    }

    #[test]
    fn test_decode_board_round_trips_bell_path_placements() {
        use crate::geometry::PathPair;

        let shape = Arc::new(BoardShape::standard());
        let paths = PathPair::bell();
        let encoder = StateEncoder::new();
        let mut board = Board::new(shape.clone());
        // one piece per lane: left side lane, right side lane, center lane.
        let light_side_tile = paths.light()[1];
        board.set(
            light_side_tile,
            Some(Piece::new(PlayerType::Light, 1)),
        );
        let dark_side_tile = paths.dark()[3];
        board.set(dark_side_tile, Some(Piece::new(PlayerType::Dark, 3)));
        let center_tile = Tile::new(2, 5);
        let center_path_index = paths
            .light()
            .iter()
            .position(|&t| t == center_tile)
            .unwrap() as u8;
        board.set(
            center_tile,
            Some(Piece::new(PlayerType::Light, center_path_index)),
        );

        let key = encoder.encode_board(&board).unwrap();
        let decoded = encoder.decode_board(key, shape, &paths);
        assert_eq!(decoded, board);
    }

    #[test]
    fn test_decode_board_round_trips_masters_path_placements() {
        use crate::geometry::PathPair;

        // Masters visits the same Standard side-lane tiles as Bell but in
        // a different order, so this exercises decode_board's per-path
        // index lookup rather than Bell-specific arithmetic.
        let shape = Arc::new(BoardShape::standard());
        let paths = PathPair::masters();
        let encoder = StateEncoder::new();
        let mut board = Board::new(shape.clone());
        let light_side_tile = paths.light()[0];
        let light_path_index = paths.light().iter().position(|&t| t == light_side_tile).unwrap() as u8;
        board.set(
            light_side_tile,
            Some(Piece::new(PlayerType::Light, light_path_index)),
        );

        let key = encoder.encode_board(&board).unwrap();
        let decoded = encoder.decode_board(key, shape, &paths);
        assert_eq!(decoded, board);
    }

    #[test]
    fn test_decode_game_state_recovers_reserves_and_turn() {
        let shape = Arc::new(BoardShape::standard());
        let paths = crate::geometry::PathPair::bell();
        let encoder = StateEncoder::new();
        let state = GameState::WaitingForRoll {
            board: Board::new(shape.clone()),
            light: PlayerState::new(PlayerType::Light, 5, 0),
            dark: PlayerState::new(PlayerType::Dark, 2, 0),
            turn: PlayerType::Light,
        };
        let key = encoder.encode_game_state(&state).unwrap();
        let decoded = encoder.decode_game_state(key, shape, &paths);
        assert_eq!(decoded.light().piece_count(), 5);
        assert_eq!(decoded.dark().piece_count(), 2);
        assert_eq!(decoded.turn(), PlayerType::Light);
    }
}
