//! Enumerates every `(reserve, board)` combination reachable under a
//! ruleset and streams the resulting 31-bit keys. Grounded on
//! `royalur/lut/generate_states.py`'s recursive board-state walk, but
//! restructured around the left/center/right lane decomposition that
//! `encoding.rs` already uses, rather than porting the Python reference's
//! generic `tile_flags`/`calculate_next_board_indices` skip-table.
//!
//! This module produces keys only, not values: assigning a LUT value to
//! each key is a solving step the specification keeps out of scope. Keys
//! are emitted in generation order, not necessarily ascending; a caller
//! building a `.rgu` file sorts them first (see `cli/src/generate.rs`).
//! Only meaningful for the Standard board shape (8-tile center lane,
//! 6-tile side lanes) that `CenterLaneTable` is built for.

use std::sync::mpsc::{sync_channel, SyncSender};
use std::thread;

use indicatif::{ProgressBar, ProgressStyle};

use crate::encoding::CenterLaneTable;
use crate::settings::GameSettings;

const SIDE_LANE_TILES: u8 = 6;
const CENTER_LANE_TILES: u8 = 8;

/// Walks every `(light_reserve, dark_reserve, board)` combination
/// reachable under `settings` and calls `consume` once per resulting key.
/// Runs the walk on a producer thread so `consume` can process a key
/// while the next is generated, following the `queue.rs` producer/consumer
/// split and `common.rs::get_progress_bar` for progress reporting.
pub fn enumerate_keys(settings: &GameSettings, mut consume: impl FnMut(u32)) {
    let starting = settings.starting_piece_count();
    let center = CenterLaneTable::new();
    let total_reserve_pairs = u64::from(starting + 1) * u64::from(starting + 1);
    let pb = build_progress_bar(total_reserve_pairs);

    let (tx, rx) = sync_channel::<u32>(1 << 16);
    thread::scope(|scope| {
        scope.spawn(|| {
            for light_reserve in 0..=starting {
                for dark_reserve in 0..=starting {
                    walk_reserve_pair(&center, starting, light_reserve, dark_reserve, &tx);
                    pb.inc(1);
                }
            }
            // tx drops here, closing the channel so the `for key in rx`
            // loop below terminates.
        });
        for key in rx {
            consume(key);
        }
    });
    pb.finish_and_clear();
}

fn build_progress_bar(len: u64) -> ProgressBar {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::with_template(
            "{msg} {spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} ({eta})",
        )
        .expect("invalid indicatif template syntax")
        .progress_chars("#>-"),
    );
    pb.set_message("enumerating reserve pairs");
    pb
}

/// Enumerates every board reachable with `light_reserve`/`dark_reserve`
/// pieces held back, sending each resulting key on `tx`. Side lanes are
/// single-color (light only occupies `x=1`, dark only `x=3`, per the
/// Bell/Masters/Murray/Skiriuk/Aseb paths), so a lane's occupancy count
/// draws directly from that color's on-board budget; the center lane is
/// shared, so its light/dark counts are tracked by `walk_center_lane`.
fn walk_reserve_pair(
    center: &CenterLaneTable,
    starting: u8,
    light_reserve: u8,
    dark_reserve: u8,
    tx: &SyncSender<u32>,
) {
    let light_budget = starting - light_reserve;
    let dark_budget = starting - dark_reserve;
    // "dark already won" means dark_reserve == 0 *and* no dark piece is on
    // the board at all; mirrors generate_states.py's `if dark_won: continue`.
    let dark_already_won_if_board_empty = dark_reserve == 0;

    for left_lane in 0u16..(1 << SIDE_LANE_TILES) {
        let left_count = left_lane.count_ones() as u8;
        if left_count > light_budget {
            continue;
        }
        for right_lane in 0u16..(1 << SIDE_LANE_TILES) {
            let right_count = right_lane.count_ones() as u8;
            if right_count > dark_budget {
                continue;
            }
            let remaining_light = light_budget - left_count;
            let remaining_dark = dark_budget - right_count;
            let dark_already_won_so_far = dark_already_won_if_board_empty && right_count == 0;
            walk_center_lane(
                center,
                0,
                0,
                remaining_light,
                remaining_dark,
                dark_already_won_so_far,
                left_lane,
                right_lane,
                light_reserve,
                dark_reserve,
                tx,
            );
        }
    }
}

/// Recursive depth-first walk of the 8 center-lane tiles, mirroring
/// `CenterLaneTable::add_states`'s own traversal order exactly (empty,
/// then dark, then light) so that the compressed indices this produces
/// agree with the table's generation order.
#[allow(clippy::too_many_arguments)]
fn walk_center_lane(
    center: &CenterLaneTable,
    raw: u16,
    tile_index: u8,
    light_left: u8,
    dark_left: u8,
    dark_already_won_so_far: bool,
    left_lane: u16,
    right_lane: u16,
    light_reserve: u8,
    dark_reserve: u8,
    tx: &SyncSender<u32>,
) {
    if tile_index == CENTER_LANE_TILES {
        if dark_already_won_so_far {
            return;
        }
        if let Some(compressed) = center.compress(raw) {
            let key = u32::from(right_lane)
                | (u32::from(compressed) << 6)
                | (u32::from(left_lane) << 19)
                | (u32::from(dark_reserve) << 25)
                | (u32::from(light_reserve) << 28);
            // a full channel means the consumer fell behind; block rather
            // than drop, this is a correctness-first enumerator.
            let _ = tx.send(key);
        }
        return;
    }

    walk_center_lane(
        center,
        raw,
        tile_index + 1,
        light_left,
        dark_left,
        dark_already_won_so_far,
        left_lane,
        right_lane,
        light_reserve,
        dark_reserve,
        tx,
    );
    if dark_left > 0 {
        let next_raw = raw | (1u16 << (2 * tile_index));
        walk_center_lane(
            center,
            next_raw,
            tile_index + 1,
            light_left,
            dark_left - 1,
            false,
            left_lane,
            right_lane,
            light_reserve,
            dark_reserve,
            tx,
        );
    }
    if light_left > 0 {
        let next_raw = raw | (2u16 << (2 * tile_index));
        walk_center_lane(
            center,
            next_raw,
            tile_index + 1,
            light_left - 1,
            dark_left,
            dark_already_won_so_far,
            left_lane,
            right_lane,
            light_reserve,
            dark_reserve,
            tx,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::Dice;
    use crate::geometry::{BoardShape, PathPair};

    #[test]
    fn test_walk_center_lane_excludes_dark_already_won() {
        let center = CenterLaneTable::new();
        let (tx, rx) = sync_channel(8);
        walk_center_lane(&center, 0, 0, 0, 0, true, 0, 0, 7, 0, &tx);
        drop(tx);
        assert!(rx.try_iter().next().is_none());
    }

    #[test]
    fn test_walk_center_lane_emits_empty_board_when_not_already_won() {
        let center = CenterLaneTable::new();
        let (tx, rx) = sync_channel(8);
        walk_center_lane(&center, 0, 0, 0, 0, false, 0, 0, 7, 1, &tx);
        drop(tx);
        let key = rx.try_iter().next().expect("one key");
        assert_eq!(key, (7u32 << 25) | (1u32 << 28));
    }

    #[test]
    fn test_walk_reserve_pair_with_zero_budget_yields_single_empty_board() {
        let center = CenterLaneTable::new();
        let (tx, rx) = sync_channel(8);
        walk_reserve_pair(&center, 7, 7, 7, &tx);
        drop(tx);
        let keys: Vec<u32> = rx.try_iter().collect();
        assert_eq!(keys, vec![(7u32 << 25) | (7u32 << 28)]);
    }

    #[test]
    fn test_enumerate_keys_with_one_piece_per_side_is_nonempty_and_bounded() {
        let settings = GameSettings::new(
            BoardShape::standard(),
            PathPair::bell(),
            Dice::four_binary,
            1,
            true,
            true,
            false,
        );
        let mut keys = Vec::new();
        enumerate_keys(&settings, |key| keys.push(key));
        assert!(!keys.is_empty());

        // full reserve on both sides must still surface the empty board.
        let full_reserve_key = (1u32 << 28) | (1u32 << 25);
        assert!(keys.contains(&full_reserve_key));

        // a side with reserve == 0 and an empty board has already won its
        // single piece and must never be enumerated.
        assert!(!keys.contains(&0));
        assert!(!keys.contains(&(1u32 << 28)));

        // but dark_reserve == 0 with a piece actually on the board (right
        // lane bit 0 set, i.e. a dark piece at the first right-lane tile)
        // is a legitimate, still-playable position and must appear.
        assert!(keys.contains(&1u32));
    }
}
