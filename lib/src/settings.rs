//! Immutable variant settings, bundling the board shape, paths, dice and
//! the handful of rule toggles that distinguish Finkel/Masters/Aseb.
//! Ported from `royalur/model/settings.py`.

use std::sync::Arc;

use crate::dice::Dice;
use crate::geometry::{BoardShape, PathPair};

#[derive(Debug, Clone)]
pub struct GameSettings {
    board_shape: Arc<BoardShape>,
    paths: PathPair,
    dice_factory: fn() -> Dice,
    starting_piece_count: u8,
    safe_rosettes: bool,
    rosettes_grant_extra_rolls: bool,
    captures_grant_extra_rolls: bool,
}

impl GameSettings {
    #[must_use]
    pub fn new(
        board_shape: BoardShape,
        paths: PathPair,
        dice_factory: fn() -> Dice,
        starting_piece_count: u8,
        safe_rosettes: bool,
        rosettes_grant_extra_rolls: bool,
        captures_grant_extra_rolls: bool,
    ) -> Self {
        assert!(
            starting_piece_count >= 1,
            "starting piece count must be at least 1"
        );
        Self {
            board_shape: Arc::new(board_shape),
            paths,
            dice_factory,
            starting_piece_count,
            safe_rosettes,
            rosettes_grant_extra_rolls,
            captures_grant_extra_rolls,
        }
    }

    /// The rules used in the "Tom Scott vs. Irving Finkel" YouTube video.
    #[must_use]
    pub fn finkel() -> Self {
        Self::new(
            BoardShape::standard(),
            PathPair::bell(),
            Dice::four_binary,
            7,
            true,
            true,
            false,
        )
    }

    /// The settings proposed by James Masters.
    #[must_use]
    pub fn masters() -> Self {
        Self::new(
            BoardShape::standard(),
            PathPair::masters(),
            Dice::four_binary,
            7,
            false,
            true,
            false,
        )
    }

    /// The settings used for Aseb.
    #[must_use]
    pub fn aseb() -> Self {
        Self::new(
            BoardShape::aseb(),
            PathPair::aseb(),
            Dice::four_binary,
            5,
            true,
            true,
            false,
        )
    }

    #[must_use]
    pub fn board_shape(&self) -> &BoardShape {
        &self.board_shape
    }

    #[must_use]
    pub fn board_shape_arc(&self) -> Arc<BoardShape> {
        self.board_shape.clone()
    }

    #[must_use]
    pub fn paths(&self) -> &PathPair {
        &self.paths
    }

    #[must_use]
    pub fn dice(&self) -> Dice {
        (self.dice_factory)()
    }

    #[must_use]
    pub fn starting_piece_count(&self) -> u8 {
        self.starting_piece_count
    }

    #[must_use]
    pub fn safe_rosettes(&self) -> bool {
        self.safe_rosettes
    }

    #[must_use]
    pub fn rosettes_grant_extra_rolls(&self) -> bool {
        self.rosettes_grant_extra_rolls
    }

    #[must_use]
    pub fn captures_grant_extra_rolls(&self) -> bool {
        self.captures_grant_extra_rolls
    }
}
