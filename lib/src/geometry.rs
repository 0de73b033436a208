//! Coordinates, paths and board shapes: the immutable geometry that every
//! other module builds on.

use std::fmt;
use std::str::FromStr;

use rustc_hash::FxHashSet;

use crate::error::UrError;

/// A position on, or off, the board. Coordinates are 1-based; `y == 0` is
/// used by a handful of off-board path endpoints (e.g. the Skiriuk path).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile {
    x: u8,
    y: u8,
}

impl Tile {
    #[must_use]
    pub fn new(x: u8, y: u8) -> Self {
        assert!((1..=26).contains(&x), "x must fall within [1, 26], was {x}");
        Self { x, y }
    }

    #[must_use]
    pub fn x(&self) -> u8 {
        self.x
    }

    #[must_use]
    pub fn y(&self) -> u8 {
        self.y
    }

    #[must_use]
    pub fn from_indices(ix: u8, iy: u8) -> Self {
        Self::new(ix + 1, iy + 1)
    }

    #[must_use]
    pub fn ix(&self) -> u8 {
        self.x - 1
    }

    #[must_use]
    pub fn iy(&self) -> u8 {
        self.y - 1
    }

    /// Takes a unit-length step towards `other`, preferring the axis with
    /// the larger remaining delta.
    #[must_use]
    pub fn step_towards(&self, other: Tile) -> Tile {
        let dx = i16::from(other.x) - i16::from(self.x);
        let dy = i16::from(other.y) - i16::from(self.y);

        if dx.abs() + dy.abs() <= 1 {
            return other;
        }

        if dx.abs() < dy.abs() {
            Tile::new(self.x, (i16::from(self.y) + dy.signum()) as u8)
        } else {
            Tile::new((i16::from(self.x) + dx.signum()) as u8, self.y)
        }
    }

    /// Builds a path by stepping between consecutive waypoints.
    #[must_use]
    pub fn create_path(waypoints: &[(u8, u8)]) -> Vec<Tile> {
        assert!(!waypoints.is_empty(), "no coordinates provided");
        let waypoints: Vec<Tile> = waypoints.iter().map(|&(x, y)| Tile::new(x, y)).collect();
        let mut path = vec![waypoints[0]];
        for window in waypoints.windows(2) {
            let (mut current, target) = (window[0], window[1]);
            while current != target {
                current = current.step_towards(target);
                path.push(current);
            }
        }
        path
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = (b'A' + self.x - 1) as char;
        write!(f, "{letter}{}", self.y)
    }
}

impl FromStr for Tile {
    type Err = UrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() < 2 {
            return Err(UrError::InvalidInput(format!(
                "tile notation too short: {s:?}"
            )));
        }
        let mut chars = s.chars();
        let letter = chars.next().expect("checked non-empty above");
        if !letter.is_ascii_uppercase() {
            return Err(UrError::InvalidInput(format!(
                "tile column must be an uppercase letter, got {letter:?}"
            )));
        }
        let x = letter as u8 - b'A' + 1;
        let y: u8 = chars
            .as_str()
            .parse()
            .map_err(|_| UrError::InvalidInput(format!("invalid tile row in {s:?}")))?;
        Ok(Tile::new(x, y))
    }
}

/// The paths that light and dark pieces travel, including their off-board
/// start (reserve) and end (scored) sentinels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPair {
    name: &'static str,
    light_with_ends: Vec<Tile>,
    dark_with_ends: Vec<Tile>,
}

impl PathPair {
    fn new(name: &'static str, light_with_ends: Vec<Tile>, dark_with_ends: Vec<Tile>) -> Self {
        Self {
            name,
            light_with_ends,
            dark_with_ends,
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// On-board tiles only, for the given player.
    #[must_use]
    pub fn light(&self) -> &[Tile] {
        &self.light_with_ends[1..self.light_with_ends.len() - 1]
    }

    #[must_use]
    pub fn dark(&self) -> &[Tile] {
        &self.dark_with_ends[1..self.dark_with_ends.len() - 1]
    }

    /// On-board path for `player`.
    #[must_use]
    pub fn get(&self, player: crate::player::PlayerType) -> &[Tile] {
        match player {
            crate::player::PlayerType::Light => self.light(),
            crate::player::PlayerType::Dark => self.dark(),
        }
    }

    #[must_use]
    pub fn light_with_ends(&self) -> &[Tile] {
        &self.light_with_ends
    }

    #[must_use]
    pub fn dark_with_ends(&self) -> &[Tile] {
        &self.dark_with_ends
    }

    #[must_use]
    pub fn bell() -> Self {
        Self::new(
            "Bell",
            Tile::create_path(&[(1, 5), (1, 1), (2, 1), (2, 8), (1, 8), (1, 6)]),
            Tile::create_path(&[(3, 5), (3, 1), (2, 1), (2, 8), (3, 8), (3, 6)]),
        )
    }

    #[must_use]
    pub fn aseb() -> Self {
        Self::new(
            "Aseb",
            Tile::create_path(&[(1, 5), (1, 1), (2, 1), (2, 12), (1, 12)]),
            Tile::create_path(&[(3, 5), (3, 1), (2, 1), (2, 12), (3, 12)]),
        )
    }

    #[must_use]
    pub fn masters() -> Self {
        Self::new(
            "Masters",
            Tile::create_path(&[
                (1, 5),
                (1, 1),
                (2, 1),
                (2, 7),
                (3, 7),
                (3, 8),
                (1, 8),
                (1, 6),
            ]),
            Tile::create_path(&[
                (3, 5),
                (3, 1),
                (2, 1),
                (2, 7),
                (1, 7),
                (1, 8),
                (3, 8),
                (3, 6),
            ]),
        )
    }

    #[must_use]
    pub fn murray() -> Self {
        Self::new(
            "Murray",
            Tile::create_path(&[
                (1, 5),
                (1, 1),
                (2, 1),
                (2, 7),
                (3, 7),
                (3, 8),
                (1, 8),
                (1, 7),
                (2, 7),
                (2, 1),
                (3, 1),
                (3, 5),
            ]),
            Tile::create_path(&[
                (3, 5),
                (3, 1),
                (2, 1),
                (2, 7),
                (1, 7),
                (1, 8),
                (3, 8),
                (3, 7),
                (2, 7),
                (2, 1),
                (1, 1),
                (1, 5),
            ]),
        )
    }

    #[must_use]
    pub fn skiriuk() -> Self {
        Self::new(
            "Skiriuk",
            Tile::create_path(&[
                (1, 5),
                (1, 1),
                (2, 1),
                (2, 7),
                (3, 7),
                (3, 8),
                (1, 8),
                (1, 7),
                (2, 7),
                (2, 0),
            ]),
            Tile::create_path(&[
                (3, 5),
                (3, 1),
                (2, 1),
                (2, 7),
                (1, 7),
                (1, 8),
                (3, 8),
                (3, 7),
                (2, 7),
                (2, 0),
            ]),
        )
    }
}

/// The set of tiles that make up a board, plus which of them are rosettes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardShape {
    name: &'static str,
    tiles: FxHashSet<Tile>,
    rosettes: FxHashSet<Tile>,
    width: u8,
    height: u8,
}

impl BoardShape {
    fn new(name: &'static str, tiles: FxHashSet<Tile>, rosettes: FxHashSet<Tile>) -> Self {
        assert!(!tiles.is_empty(), "a board shape requires at least one tile");
        for rosette in &rosettes {
            assert!(
                tiles.contains(rosette),
                "rosette at {rosette} does not exist on the board"
            );
        }
        let min_x = tiles.iter().map(Tile::x).min().expect("non-empty");
        let min_y = tiles.iter().map(Tile::y).min().expect("non-empty");
        assert!(
            min_x == 1 && min_y == 1,
            "board shape must be translated to have min x and min y of 1, got ({min_x}, {min_y})"
        );
        let width = tiles.iter().map(Tile::x).max().expect("non-empty");
        let height = tiles.iter().map(Tile::y).max().expect("non-empty");
        Self {
            name,
            tiles,
            rosettes,
            width,
            height,
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn width(&self) -> u8 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u8 {
        self.height
    }

    #[must_use]
    pub fn contains(&self, tile: Tile) -> bool {
        self.tiles.contains(&tile)
    }

    #[must_use]
    pub fn is_rosette(&self, tile: Tile) -> bool {
        self.rosettes.contains(&tile)
    }

    #[must_use]
    pub fn standard() -> Self {
        let path_pair = PathPair::bell();
        let tiles: FxHashSet<Tile> = path_pair
            .light()
            .iter()
            .chain(path_pair.dark())
            .copied()
            .collect();
        let rosettes = [
            Tile::new(1, 1),
            Tile::new(3, 1),
            Tile::new(2, 4),
            Tile::new(1, 7),
            Tile::new(3, 7),
        ]
        .into_iter()
        .collect();
        Self::new("Standard", tiles, rosettes)
    }

    #[must_use]
    pub fn aseb() -> Self {
        let path_pair = PathPair::aseb();
        let tiles: FxHashSet<Tile> = path_pair
            .light()
            .iter()
            .chain(path_pair.dark())
            .copied()
            .collect();
        let rosettes = [
            Tile::new(1, 1),
            Tile::new(3, 1),
            Tile::new(2, 4),
            Tile::new(2, 8),
            Tile::new(2, 12),
        ]
        .into_iter()
        .collect();
        Self::new("Aseb", tiles, rosettes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_display_and_parse() {
        let t = Tile::new(1, 4);
        assert_eq!(t.to_string(), "A4");
        assert_eq!(Tile::from_str("A4").unwrap(), t);
        assert_eq!(Tile::from_str("C12").unwrap(), Tile::new(3, 12));
    }

    #[test]
    fn test_step_towards_picks_larger_delta_axis() {
        let from = Tile::new(1, 1);
        let to = Tile::new(3, 2);
        // dx=2, dy=1: x axis has the larger delta, so we step in x first.
        assert_eq!(from.step_towards(to), Tile::new(2, 1));
    }

    #[test]
    fn test_step_towards_adjacent_returns_other() {
        let from = Tile::new(1, 1);
        let to = Tile::new(1, 2);
        assert_eq!(from.step_towards(to), to);
    }

    #[test]
    fn test_bell_path_length_and_rosette() {
        let pair = PathPair::bell();
        assert_eq!(pair.light().len(), 14);
        // introducing with a roll of 4 lands at path index 3, a rosette.
        let shape = BoardShape::standard();
        assert_eq!(pair.light()[3], Tile::new(1, 1));
        assert!(shape.is_rosette(pair.light()[3]));
    }

    #[test]
    fn test_standard_board_shape_contains_rosettes() {
        let shape = BoardShape::standard();
        assert!(shape.is_rosette(Tile::new(2, 4)));
        assert!(!shape.is_rosette(Tile::new(1, 4)));
        assert_eq!(shape.width(), 3);
        assert_eq!(shape.height(), 8);
    }

    #[test]
    fn test_aseb_board_shape_piece_count_matches_settings() {
        let shape = BoardShape::aseb();
        assert_eq!(shape.height(), 12);
        assert!(shape.is_rosette(Tile::new(2, 12)));
    }
}
