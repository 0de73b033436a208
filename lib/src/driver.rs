//! `Driver`: the external-facing facade that alternates `roll_dice` and
//! `make_move` calls over a growing history. Grounded on `royalur/game.py`
//! (referenced transitively via `lut_player.py`'s usage); the source's
//! single overloaded `make_move(Move|Piece|Tile)` becomes three plain
//! named entry points here, to avoid dynamic dispatch — the
//! disambiguation logic against `find_available_moves` is the same
//! either way.

use crate::dice::Roll;
use crate::error::UrError;
use crate::geometry::Tile;
use crate::mv::Move;
use crate::player::PlayerType;
use crate::rules::RuleEngine;
use crate::settings::GameSettings;
use crate::state::GameState;

/// Owns a `RuleEngine` and the append-only history of states it has
/// produced; the last entry is always the current state.
#[derive(Debug)]
pub struct Driver {
    engine: RuleEngine,
    history: Vec<GameState>,
}

impl Driver {
    #[must_use]
    pub fn new(settings: GameSettings) -> Self {
        let engine = RuleEngine::new(settings);
        let initial = engine.generate_initial_state();
        Self {
            engine,
            history: vec![initial],
        }
    }

    #[must_use]
    pub fn finkel() -> Self {
        Self::new(GameSettings::finkel())
    }

    #[must_use]
    pub fn masters() -> Self {
        Self::new(GameSettings::masters())
    }

    #[must_use]
    pub fn aseb() -> Self {
        Self::new(GameSettings::aseb())
    }

    #[must_use]
    pub fn engine(&self) -> &RuleEngine {
        &self.engine
    }

    #[must_use]
    pub fn history(&self) -> &[GameState] {
        &self.history
    }

    #[must_use]
    pub fn current(&self) -> &GameState {
        self.history.last().expect("history is never empty")
    }

    #[must_use]
    pub fn is_waiting_for_roll(&self) -> bool {
        self.current().is_waiting_for_roll()
    }

    #[must_use]
    pub fn is_waiting_for_move(&self) -> bool {
        self.current().is_waiting_for_move()
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.current().is_finished()
    }

    #[must_use]
    pub fn get_winner(&self) -> Option<PlayerType> {
        self.current().winner()
    }

    #[must_use]
    pub fn find_available_moves(&self) -> &[Move] {
        self.current().available_moves().unwrap_or(&[])
    }

    /// Rolls the dice, or forces `value` if given, and advances history
    /// through the `Rolled` action state into `WaitingForMove` or the
    /// other player's `WaitingForRoll`.
    pub fn roll_dice(&mut self, value: Option<u8>) -> Roll {
        let dice = self.engine.settings().dice();
        let roll = match value {
            Some(v) => dice.roll_forced(v),
            None => dice.roll(),
        };
        let [rolled, next] = self.engine.apply_roll(self.current(), roll);
        self.history.push(rolled);
        self.history.push(next);
        roll
    }

    /// Applies `mv`, which must already appear in `find_available_moves`.
    pub fn make_move(&mut self, mv: Move) -> Result<&GameState, UrError> {
        if !self.find_available_moves().contains(&mv) {
            return Err(UrError::InvalidInput(
                "move is not among the current available moves".to_string(),
            ));
        }
        self.push_move(mv);
        Ok(self.current())
    }

    /// Applies the available move whose `source` is `tile`, disambiguating
    /// a tile-identified move against `find_available_moves`.
    pub fn make_move_at(&mut self, tile: Tile) -> Result<&GameState, UrError> {
        let mv = *self
            .find_available_moves()
            .iter()
            .find(|mv| mv.source() == Some(tile))
            .ok_or_else(|| UrError::InvalidInput(format!("no available move from {tile}")))?;
        self.push_move(mv);
        Ok(self.current())
    }

    /// Applies the (at most one) available move that introduces a piece
    /// from reserve.
    pub fn make_move_introducing(&mut self) -> Result<&GameState, UrError> {
        let mv = *self
            .find_available_moves()
            .iter()
            .find(|mv| mv.is_introducing_piece())
            .ok_or_else(|| UrError::InvalidInput("no available introducing move".to_string()))?;
        self.push_move(mv);
        Ok(self.current())
    }

    fn push_move(&mut self, mv: Move) {
        let [moved, next] = self.engine.apply_move(self.current(), mv);
        self.history.push(moved);
        self.history.push(next);
    }
}
