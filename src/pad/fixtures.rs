//! Synthetic pads used by tests throughout the crate (spec §8 scenarios).
//! Compiled only under `cfg(test)`.

use crate::*;

/// The 4-lane single pad from spec §8: lanes 0=Left, 1=Down, 2=Up, 3=Right,
/// arranged in a plus shape. Starting tier 0 is `(0, 3)`.
pub fn single_pad() -> Pad {
    // (x, y) in abstract panel units, plus-shaped layout.
    let coords: [(i32, i32); 4] = [(0, 1), (1, 0), (1, 2), (2, 1)];
    let n = coords.len();

    let mut arrow_data = Vec::with_capacity(n);
    for i in 0..n {
        let mut valid_next_arrows = vec![true; n];
        valid_next_arrows[i] = true;

        // Every other lane is a normal pairing for both feet, except
        // stepping on your own lane twice with two different feet (that's
        // the bracket/footswap territory, not a plain "normal pair").
        let mut normal = [vec![false; n], vec![false; n]];
        let mut crossover_front = [vec![false; n], vec![false; n]];
        let mut crossover_behind = [vec![false; n], vec![false; n]];
        let mut inverted = [vec![false; n], vec![false; n]];
        let mut bracket_heel = [vec![false; n], vec![false; n]];
        let mut bracket_toe = [vec![false; n], vec![false; n]];

        for j in 0..n {
            if i == j {
                continue;
            }
            let (xi, _) = coords[i];
            let (xj, _) = coords[j];
            // Left foot on lane i, right foot on lane j: normal iff left is
            // not to the right of right, and vice versa.
            normal[0][j] = xi <= xj;
            normal[1][j] = xj <= xi;
            crossover_front[0][j] = xi > xj;
            crossover_front[1][j] = xj > xi;
            crossover_behind[0][j] = xi > xj;
            crossover_behind[1][j] = xj > xi;
            // Inversion requires an extreme cross; on a 4-lane plus pad we
            // treat the fully-opposite lane pair as invertible for tests
            // that need an Invert-family link to exist.
            let is_opposite = (xi - xj).abs() >= 1 && coords[i].1 != coords[j].1;
            inverted[0][j] = is_opposite;
            inverted[1][j] = is_opposite;
            // Adjacent lanes (sharing neither x nor y with distance 1) are
            // heel/toe bracketable.
            let dx = (coords[i].0 - coords[j].0).abs();
            let dy = (coords[i].1 - coords[j].1).abs();
            let adjacent = dx + dy == 1;
            bracket_heel[0][j] = adjacent;
            bracket_heel[1][j] = adjacent;
            bracket_toe[0][j] = adjacent;
            bracket_toe[1][j] = adjacent;
        }

        arrow_data.push(RawArrow {
            x: coords[i].0,
            y: coords[i].1,
            valid_next_arrows,
            bracketable_pairings_other_heel: bracket_heel,
            bracketable_pairings_other_toe: bracket_toe,
            other_foot_pairings: normal,
            other_foot_pairings_other_foot_crossover_front: crossover_front,
            other_foot_pairings_other_foot_crossover_behind: crossover_behind,
            other_foot_pairings_inverted: inverted,
        });
    }

    let raw = RawPad {
        arrow_data,
        starting_positions: vec![vec![RawStartingPosition { left_lane: Lane::new(0), right_lane: Lane::new(3) }]],
        y_travel_distance_compensation: DEFAULT_Y_TRAVEL_DISTANCE_COMPENSATION,
    };
    Pad::try_from_raw(raw).expect("single_pad fixture is valid")
}

/// An 8-lane doubles pad from spec §8 scenario E6: two 4-lane single pads
/// placed side by side, lanes 0-3 the left pad and 4-7 the right pad.
/// Starting tier 0 is `(3, 4)` — the two innermost lanes.
pub fn doubles_pad() -> Pad {
    let single: [(i32, i32); 4] = [(0, 1), (1, 0), (1, 2), (2, 1)];
    let mut coords: Vec<(i32, i32)> = Vec::with_capacity(8);
    for &(x, y) in &single {
        coords.push((x, y));
    }
    for &(x, y) in &single {
        coords.push((x + 3, y));
    }
    let n = coords.len();

    let mut arrow_data = Vec::with_capacity(n);
    for i in 0..n {
        let mut valid_next_arrows = vec![true; n];
        let mut normal = [vec![false; n], vec![false; n]];
        let mut crossover_front = [vec![false; n], vec![false; n]];
        let mut crossover_behind = [vec![false; n], vec![false; n]];
        let mut inverted = [vec![false; n], vec![false; n]];
        let mut bracket_heel = [vec![false; n], vec![false; n]];
        let mut bracket_toe = [vec![false; n], vec![false; n]];
        for j in 0..n {
            valid_next_arrows[j] = true;
            if i == j {
                continue;
            }
            let (xi, _) = coords[i];
            let (xj, _) = coords[j];
            normal[0][j] = xi <= xj;
            normal[1][j] = xj <= xi;
            crossover_front[0][j] = xi > xj;
            crossover_front[1][j] = xj > xi;
            crossover_behind[0][j] = xi > xj;
            crossover_behind[1][j] = xj > xi;
            let dx = (coords[i].0 - coords[j].0).abs();
            let dy = (coords[i].1 - coords[j].1).abs();
            let adjacent = dx + dy == 1;
            bracket_heel[0][j] = adjacent;
            bracket_heel[1][j] = adjacent;
            bracket_toe[0][j] = adjacent;
            bracket_toe[1][j] = adjacent;
            let _ = &inverted;
        }
        arrow_data.push(RawArrow {
            x: coords[i].0,
            y: coords[i].1,
            valid_next_arrows,
            bracketable_pairings_other_heel: bracket_heel,
            bracketable_pairings_other_toe: bracket_toe,
            other_foot_pairings: normal,
            other_foot_pairings_other_foot_crossover_front: crossover_front,
            other_foot_pairings_other_foot_crossover_behind: crossover_behind,
            other_foot_pairings_inverted: inverted,
        });
    }

    let raw = RawPad {
        arrow_data,
        starting_positions: vec![vec![RawStartingPosition { left_lane: Lane::new(3), right_lane: Lane::new(4) }]],
        y_travel_distance_compensation: DEFAULT_Y_TRAVEL_DISTANCE_COMPENSATION,
    };
    Pad::try_from_raw(raw).expect("doubles_pad fixture is valid")
}
