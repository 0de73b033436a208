use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, ValueEnum};
use log::info;
use royal_ur::{Board, BoardRender, BoardShape, GameState, LutFile, Piece, PlayerState, PlayerType, StateEncoder, Tile};

/// Only the Standard board: `StateEncoder` rejects any other shape (see
/// `encoding::StateEncoder::encode_board`), since its 31-bit layout is
/// fixed to the Standard board's lane widths.
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum Shape {
    Standard,
}

impl Shape {
    fn board_shape(self) -> BoardShape {
        match self {
            Self::Standard => BoardShape::standard(),
        }
    }
}

fn parse_placement(s: &str) -> Result<(Tile, PlayerType), String> {
    let (tile_str, owner_str) = s
        .split_once(':')
        .ok_or_else(|| format!("expected TILE:OWNER, got {s:?}"))?;
    let tile: Tile = tile_str
        .parse()
        .map_err(|e| format!("bad tile in {s:?}: {e:?}"))?;
    let owner = match owner_str {
        "L" | "l" => PlayerType::Light,
        "D" | "d" => PlayerType::Dark,
        other => return Err(format!("owner must be L or D, got {other:?}")),
    };
    Ok((tile, owner))
}

/// Looks up the light-win probability of a position in a precomputed LUT
/// file. The position is described directly on the command line (board
/// shape, reserves, piece placements) rather than parsed from a saved
/// game, since the driver/history machinery lives in the library, not
/// this CLI — process-level I/O stays out of scope here, keeping the
/// surface intentionally thin.
#[derive(Args, Debug)]
pub struct Probe {
    #[arg(long)]
    lut: PathBuf,
    #[arg(long, value_name = "INDEX", default_value_t = 0)]
    map: usize,
    #[arg(long, value_enum, default_value_t = Shape::Standard)]
    shape: Shape,
    #[arg(long, default_value_t = 7)]
    light_reserve: u8,
    #[arg(long, default_value_t = 7)]
    dark_reserve: u8,
    #[arg(long = "piece", value_parser = parse_placement, help = "e.g. --piece A1:L --piece B4:D")]
    pieces: Vec<(Tile, PlayerType)>,
}

impl Probe {
    pub fn run(self) {
        let shape = Arc::new(self.shape.board_shape());
        let mut board = Board::new(shape);
        for (tile, owner) in &self.pieces {
            board.set(*tile, Some(Piece::new(*owner, 0)));
        }

        let state = GameState::WaitingForRoll {
            board,
            light: PlayerState::new(PlayerType::Light, self.light_reserve, 0),
            dark: PlayerState::new(PlayerType::Dark, self.dark_reserve, 0),
            turn: PlayerType::Light,
        };

        info!("{}", BoardRender::new(state.board()));

        let encoder = StateEncoder::new();
        let key = encoder
            .encode_game_state(&state)
            .expect("position must be encodable (light to move, reachable center-lane occupancy)");

        let bytes = fs::read(&self.lut).unwrap_or_else(|e| {
            panic!("failed to read LUT file {}: {e}", self.lut.display())
        });
        let lut = LutFile::read(&bytes).expect("malformed LUT file");
        let value = lut
            .lookup(self.map, key)
            .unwrap_or_else(|e| panic!("key {key} not found in map {}: {e}", self.map));

        info!(
            "key = {key}, value = {value} (P(light wins) = {:.4})",
            f64::from(value) / 65535.0
        );
    }
}
