//! The rule engine: legal-move generation, roll application, move
//! application, extra-turn policy, and win detection. Ported from
//! `royalur/rules/simple.py::SimpleRuleSet`.

use crate::board::{Board, Piece};
use crate::dice::Roll;
use crate::mv::Move;
use crate::player::{PlayerState, PlayerType};
use crate::settings::GameSettings;
use crate::state::{GameState, MoveList};

/// Drives a single rule variant through its state machine. Owns the
/// settings; holds no other state. `apply_roll`/`apply_move` panic if
/// handed a state of the wrong variant — per spec, a type mismatch here
/// is a programmer error, not a recoverable condition.
#[derive(Debug, Clone)]
pub struct RuleEngine {
    settings: GameSettings,
}

impl RuleEngine {
    #[must_use]
    pub fn new(settings: GameSettings) -> Self {
        Self { settings }
    }

    #[must_use]
    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    #[must_use]
    pub fn generate_initial_state(&self) -> GameState {
        let starting = self.settings.starting_piece_count();
        GameState::WaitingForRoll {
            board: Board::new(self.settings.board_shape_arc()),
            light: PlayerState::new(PlayerType::Light, starting, 0),
            dark: PlayerState::new(PlayerType::Dark, starting, 0),
            turn: PlayerType::Light,
        }
    }

    /// Enumerates every legal move for `player` with the given `roll`,
    /// assuming it's their turn.
    #[must_use]
    pub fn find_available_moves(
        &self,
        board: &Board,
        player: PlayerState,
        roll: Roll,
    ) -> MoveList {
        let mut moves = MoveList::new();
        if roll.value() == 0 {
            return moves;
        }
        let roll = i16::from(roll.value());
        let player_type = player.player();
        let path = self.settings.paths().get(player_type);
        let len = path.len() as i16;

        // Scoring move: take a piece off the far end of the path.
        if roll <= len {
            let score_path_index = len - roll;
            let score_tile = path[score_path_index as usize];
            if let Some(piece) = board.get(score_tile) {
                if piece.owner() == player_type && i16::from(piece.path_index()) == score_path_index
                {
                    moves.push(Move::new(
                        player_type,
                        Some(score_tile),
                        Some(piece),
                        None,
                        None,
                        None,
                    ));
                }
            }
        }

        // Board moves and introductions.
        for path_index in -1..(len - roll) {
            let (source, source_piece) = if path_index >= 0 {
                let tile = path[path_index as usize];
                match board.get(tile) {
                    Some(piece)
                        if piece.owner() == player_type
                            && i16::from(piece.path_index()) == path_index =>
                    {
                        (Some(tile), Some(piece))
                    }
                    _ => continue,
                }
            } else if player.piece_count() > 0 {
                (None, None)
            } else {
                continue;
            };

            let dest_path_index = path_index + roll;
            let dest = path[dest_path_index as usize];
            let existing = board.get(dest);
            let captured_piece = match existing {
                Some(occupant) if occupant.owner() == player_type => continue,
                Some(occupant)
                    if self.settings.safe_rosettes() && self.settings.board_shape().is_rosette(dest) =>
                {
                    let _ = occupant;
                    continue;
                }
                Some(occupant) => Some(occupant),
                None => None,
            };

            let dest_piece = Piece::new(player_type, dest_path_index as u8);
            moves.push(Move::new(
                player_type,
                source,
                source_piece,
                Some(dest),
                Some(dest_piece),
                captured_piece,
            ));
        }

        moves
    }

    /// Always emits the `Rolled` action state, then either `WaitingForMove`
    /// (if the roll produced any legal moves) or `WaitingForRoll` for the
    /// other player (if it didn't, including a roll of zero).
    #[must_use]
    pub fn apply_roll(&self, state: &GameState, roll: Roll) -> [GameState; 2] {
        let GameState::WaitingForRoll {
            board,
            light,
            dark,
            turn,
        } = state
        else {
            panic!("apply_roll called on a state that is not WaitingForRoll");
        };
        let turn_player = if *turn == PlayerType::Light { *light } else { *dark };
        let available_moves = self.find_available_moves(board, turn_player, roll);

        let rolled = GameState::Rolled {
            board: board.clone(),
            light: *light,
            dark: *dark,
            turn: *turn,
            roll,
            available_moves: available_moves.clone(),
        };

        if available_moves.is_empty() {
            let next = GameState::WaitingForRoll {
                board: board.clone(),
                light: *light,
                dark: *dark,
                turn: turn.other(),
            };
            [rolled, next]
        } else {
            let next = GameState::WaitingForMove {
                board: board.clone(),
                light: *light,
                dark: *dark,
                turn: *turn,
                roll,
                available_moves,
            };
            [rolled, next]
        }
    }

    fn should_grant_extra_roll(&self, mv: &Move) -> bool {
        if self.settings.rosettes_grant_extra_rolls() && mv.is_dest_rosette(self.settings.board_shape())
        {
            return true;
        }
        self.settings.captures_grant_extra_rolls() && mv.is_capture()
    }

    /// Always emits `Moved`; does not validate `mv` against
    /// `available_moves` (callers are expected to have selected it from
    /// there, via the driver's disambiguation).
    #[must_use]
    pub fn apply_move(&self, state: &GameState, mv: Move) -> [GameState; 2] {
        let GameState::WaitingForMove {
            board,
            light,
            dark,
            turn,
            roll,
            ..
        } = state
        else {
            panic!("apply_move called on a state that is not WaitingForMove");
        };

        let moved = GameState::Moved {
            board: board.clone(),
            light: *light,
            dark: *dark,
            turn: *turn,
            roll: *roll,
            mv,
        };

        let mut board = board.clone();
        mv.apply(&mut board);

        let mut turn_player = if *turn == PlayerType::Light { *light } else { *dark };
        if mv.is_introducing_piece() {
            turn_player = turn_player.with_piece_introduced();
        } else if mv.is_scoring_piece() {
            turn_player = turn_player.with_piece_scored();
        }

        let mut other_player = if *turn == PlayerType::Light { *dark } else { *light };
        if mv.is_capture() {
            other_player = other_player.with_piece_captured();
        }

        let (light, dark) = if *turn == PlayerType::Light {
            (turn_player, other_player)
        } else {
            (other_player, turn_player)
        };

        if mv.is_scoring_piece() && turn_player.piece_count() == 0 && board.count_pieces(*turn) == 0 {
            let win = GameState::Win {
                board,
                light,
                dark,
                winner: *turn,
            };
            return [moved, win];
        }

        let grant_extra_roll = self.should_grant_extra_roll(&mv);
        let next_turn = if grant_extra_roll { *turn } else { turn.other() };
        let next = GameState::WaitingForRoll {
            board,
            light,
            dark,
            turn: next_turn,
        };
        [moved, next]
    }
}
