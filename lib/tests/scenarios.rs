//! End-to-end scenarios exercising the public API together rather than in
//! isolation. S1-S3 replay the opening-move scenarios through `Driver`;
//! S4-S5 check the encoder's magic keys directly; S6 builds a small
//! synthetic look-up table in memory (computing a real Finkel solution is
//! an external solver run, out of this crate's scope) and checks that a
//! one-ply LUT agent beats a uniformly-random opponent across many games
//! of a reduced, fully-covered variant.

use std::collections::HashSet;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use royal_ur::{
    Board, BoardShape, Dice, Driver, GameSettings, GameState, LutAgent, LutFile, Move, PathPair,
    Piece, PlayerState, PlayerType, RuleEngine, StateEncoder, Tile,
};
use serde_json::json;

#[test]
fn s1_opening_roll_4_introduces_onto_rosette_keeping_light_turn() {
    let mut driver = Driver::finkel();
    driver.roll_dice(Some(4));
    assert_eq!(driver.find_available_moves().len(), 1);
    driver.make_move_introducing().unwrap();
    assert!(driver.is_waiting_for_roll());
    assert_eq!(driver.current().turn(), PlayerType::Light);
    assert!(driver
        .history()
        .iter()
        .any(|s| matches!(s, GameState::WaitingForMove { .. })));
}

#[test]
fn s2_roll_zero_swaps_turn() {
    let mut driver = Driver::finkel();
    driver.roll_dice(Some(0));
    assert!(driver.is_waiting_for_roll());
    assert_eq!(driver.current().turn(), PlayerType::Dark);
}

#[test]
fn s3_capture_grants_no_extra_turn_under_finkel() {
    let engine = RuleEngine::new(GameSettings::finkel());
    let shape = Arc::new(BoardShape::standard());
    let mut board = Board::new(shape);
    // Dark sits on a non-rosette tile (2, 5) that light can reach by
    // moving a piece already at (2, 1) with a roll of 4.
    board.set(Tile::new(2, 5), Some(Piece::new(PlayerType::Dark, 3)));
    board.set(Tile::new(2, 1), Some(Piece::new(PlayerType::Light, 4)));
    let state = GameState::WaitingForRoll {
        board,
        light: PlayerState::new(PlayerType::Light, 6, 0),
        dark: PlayerState::new(PlayerType::Dark, 6, 0),
        turn: PlayerType::Light,
    };
    let roll = engine.settings().dice().roll_forced(4);
    let [_, waiting_for_move] = engine.apply_roll(&state, roll);
    let capture = *waiting_for_move
        .available_moves()
        .expect("a roll of 4 has legal moves")
        .iter()
        .find(|mv| mv.is_capture())
        .expect("a capturing move is available");
    let [_, after_move] = engine.apply_move(&waiting_for_move, capture);
    assert_eq!(after_move.turn(), PlayerType::Dark);
}

#[test]
fn s4_lut_starting_position_key_matches_magic_value() {
    let encoder = StateEncoder::new();
    let shape = Arc::new(BoardShape::standard());
    let board = Board::new(shape);
    let state = GameState::WaitingForRoll {
        board,
        light: PlayerState::new(PlayerType::Light, 2, 0),
        dark: PlayerState::new(PlayerType::Dark, 2, 0),
        turn: PlayerType::Light,
    };
    let key = encoder.encode_game_state(&state).unwrap();
    assert_eq!(key, 603_979_776);

    let lut = LutFile::new(json!({}), vec![vec![(key, 33_985)]]);
    assert_eq!(lut.lookup(0, key).unwrap(), 33_985);
}

#[test]
fn s5_lut_terminal_keys_both_map_to_max_value() {
    let encoder = StateEncoder::new();
    let shape = Arc::new(BoardShape::standard());
    let board = Board::new(shape);

    let already_won_dark_two = GameState::WaitingForRoll {
        board: board.clone(),
        light: PlayerState::new(PlayerType::Light, 0, 2),
        dark: PlayerState::new(PlayerType::Dark, 2, 0),
        turn: PlayerType::Light,
    };
    let key_a = encoder.encode_game_state(&already_won_dark_two).unwrap();
    assert_eq!(key_a, 67_108_864);

    let already_won_dark_one = GameState::WaitingForRoll {
        board,
        light: PlayerState::new(PlayerType::Light, 0, 2),
        dark: PlayerState::new(PlayerType::Dark, 1, 1),
        turn: PlayerType::Light,
    };
    let key_b = encoder.encode_game_state(&already_won_dark_one).unwrap();
    assert_eq!(key_b, 33_554_432);

    let lut = LutFile::new(json!({}), vec![vec![(key_a, 65_535), (key_b, 65_535)]]);
    assert_eq!(lut.lookup(0, key_a).unwrap(), 65_535);
    assert_eq!(lut.lookup(0, key_b).unwrap(), 65_535);
}

/// Discovers every state reachable from the initial position of a tiny
/// one-piece-per-side variant, returning the light-to-move ones
/// deduplicated by their encoded board plus reserves. Small enough (a few
/// dozen states) to fully cover with a synthetic LUT, unlike the real
/// 7-piece Finkel game.
fn reachable_light_states(engine: &RuleEngine, encoder: &StateEncoder) -> Vec<GameState> {
    let mut seen = HashSet::new();
    let mut stack = vec![engine.generate_initial_state()];
    let mut light_states = Vec::new();
    let max_roll = engine.settings().dice().max_roll();

    while let Some(state) = stack.pop() {
        if state.is_finished() {
            continue;
        }
        let board_key = encoder
            .encode_board(state.board())
            .expect("reachable boards are always encodable under this variant");
        let dedup_key = (
            board_key,
            state.light().piece_count(),
            state.dark().piece_count(),
            state.turn() == PlayerType::Light,
        );
        if !seen.insert(dedup_key) {
            continue;
        }
        if state.turn() == PlayerType::Light {
            light_states.push(state.clone());
        }

        for roll_value in 0..=max_roll {
            let roll = engine.settings().dice().roll_forced(roll_value);
            let [_, next] = engine.apply_roll(&state, roll);
            match next.available_moves() {
                Some(moves) if !moves.is_empty() => {
                    for mv in moves.to_vec() {
                        let [_, after] = engine.apply_move(&next, mv);
                        stack.push(after);
                    }
                }
                _ => stack.push(next),
            }
        }
    }
    light_states
}

/// A crude but directionally-correct stand-in for a solved win-probability
/// table: rewards a light piece further along its path and penalizes a
/// dark piece further along its own, using each board's own on-board
/// pieces rather than decoding the key. Nowhere near the precision a real
/// solve would have, but enough to beat uniformly-random play reliably.
fn heuristic_value(state: &GameState) -> u16 {
    let board = state.board();
    let light_progress = board_progress(board, PlayerType::Light);
    let dark_progress = board_progress(board, PlayerType::Dark);
    let score = 32768 + 2000 * light_progress - 2000 * dark_progress;
    score.clamp(1, 65534) as u16
}

/// 0 if `player` has no piece on the board, otherwise that piece's
/// `path_index + 1`. A real solve would weigh reserve/scored pieces too;
/// this variant has exactly one piece per side, so "on board" and "path
/// position" fully determine progress.
fn board_progress(board: &Board, player: PlayerType) -> i32 {
    let shape = board.shape();
    for x in 1..=shape.width() {
        for y in 1..=shape.height() {
            let tile = Tile::new(x, y);
            if let Some(piece) = board.get(tile) {
                if piece.owner() == player {
                    return i32::from(piece.path_index()) + 1;
                }
            }
        }
    }
    0
}

fn seeded_roll(dice: &Dice, rng: &mut StdRng) -> u8 {
    let probabilities = dice.probabilities();
    let sample: f64 = rng.gen();
    let mut cumulative = 0.0;
    for (value, probability) in probabilities.iter().enumerate() {
        cumulative += probability;
        if sample < cumulative {
            return value as u8;
        }
    }
    dice.max_roll()
}

fn seeded_pick(moves: &[Move], rng: &mut StdRng) -> Move {
    moves[rng.gen_range(0..moves.len())]
}

#[test]
fn s6_lut_agent_beats_random_opponent_over_many_games() {
    let settings = GameSettings::new(
        BoardShape::standard(),
        PathPair::bell(),
        Dice::four_binary,
        1,
        true,
        true,
        false,
    );
    let engine = RuleEngine::new(settings.clone());
    let encoder = StateEncoder::new();

    let light_states = reachable_light_states(&engine, &encoder);
    assert!(!light_states.is_empty());

    let mut map = Vec::new();
    for state in &light_states {
        let key = encoder.encode_game_state(state).unwrap();
        let value = heuristic_value(state);
        map.push((key, value));
    }
    map.sort_unstable_by_key(|&(k, _)| k);
    map.dedup_by_key(|&mut (k, _)| k);
    let lut = LutFile::new(json!({"variant": "test-one-piece"}), vec![map]);
    let agent = LutAgent::new(&engine, &encoder, &lut);

    let mut rng = StdRng::seed_from_u64(42);
    let games = 200;
    let mut light_wins = 0;
    for _ in 0..games {
        let mut driver = Driver::new(settings.clone());
        while !driver.is_finished() {
            let dice = driver.engine().settings().dice();
            let roll_value = seeded_roll(&dice, &mut rng);
            driver.roll_dice(Some(roll_value));
            if driver.is_waiting_for_move() {
                let mv = if driver.current().turn() == PlayerType::Light {
                    agent.play(driver.current())
                } else {
                    seeded_pick(driver.find_available_moves(), &mut rng)
                };
                driver.make_move(mv).unwrap();
            }
        }
        if driver.get_winner() == Some(PlayerType::Light) {
            light_wins += 1;
        }
    }

    assert!(
        light_wins > games * 3 / 4,
        "expected light to win more than 75% of {games} games, won {light_wins}"
    );
}
