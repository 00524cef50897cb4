use crate::*;

/// Per-lane boolean table indexed `[foot][other_lane]`.
pub(crate) type FootTable = [Vec<bool>; 2];

/// A validated, immutable pad layout (spec §3, C1). Built once via
/// [`Pad::try_from_raw`] and safe to share by reference across any number
/// of concurrent searches thereafter (spec §5).
#[derive(Debug, Clone)]
pub struct Pad {
    coordinates: Vec<(i32, i32)>,
    valid_next_arrow: Vec<Vec<bool>>,
    bracketable_heel_with: Vec<FootTable>,
    bracketable_toe_with: Vec<FootTable>,
    normal_pair: Vec<FootTable>,
    crossover_front: Vec<FootTable>,
    crossover_behind: Vec<FootTable>,
    inverted: Vec<FootTable>,
    mirrored_lane: Vec<Lane>,
    flipped_lane: Vec<Lane>,
    travel_distance: Vec<Vec<Distance>>,
    max_bracket_separation: Distance,
    starting_positions: StartingPositions,
}

impl Pad {
    pub fn num_arrows(&self) -> usize {
        self.coordinates.len()
    }

    pub fn lanes(&self) -> impl Iterator<Item = Lane> {
        (0..self.num_arrows()).map(|i| Lane::new(i as u8))
    }

    pub fn coordinate(&self, lane: Lane) -> (i32, i32) {
        self.coordinates[lane.index()]
    }

    pub fn valid_next_arrow(&self, from: Lane, to: Lane) -> bool {
        self.valid_next_arrow[from.index()][to.index()]
    }

    pub fn bracketable_heel_with(&self, lane: Lane, foot: Foot, other: Lane) -> bool {
        self.bracketable_heel_with[lane.index()][foot_index(foot)][other.index()]
    }

    pub fn bracketable_toe_with(&self, lane: Lane, foot: Foot, other: Lane) -> bool {
        self.bracketable_toe_with[lane.index()][foot_index(foot)][other.index()]
    }

    pub fn normal_pair(&self, lane: Lane, foot: Foot, other: Lane) -> bool {
        self.normal_pair[lane.index()][foot_index(foot)][other.index()]
    }

    pub fn crossover_front(&self, lane: Lane, foot: Foot, other: Lane) -> bool {
        self.crossover_front[lane.index()][foot_index(foot)][other.index()]
    }

    pub fn crossover_behind(&self, lane: Lane, foot: Foot, other: Lane) -> bool {
        self.crossover_behind[lane.index()][foot_index(foot)][other.index()]
    }

    pub fn inverted(&self, lane: Lane, foot: Foot, other: Lane) -> bool {
        self.inverted[lane.index()][foot_index(foot)][other.index()]
    }

    pub fn mirrored_lane(&self, lane: Lane) -> Lane {
        self.mirrored_lane[lane.index()]
    }

    pub fn flipped_lane(&self, lane: Lane) -> Lane {
        self.flipped_lane[lane.index()]
    }

    pub fn travel_distance(&self, from: Lane, to: Lane) -> Distance {
        self.travel_distance[from.index()][to.index()]
    }

    pub fn max_bracket_separation(&self) -> Distance {
        self.max_bracket_separation
    }

    pub fn starting_positions(&self) -> &StartingPositions {
        &self.starting_positions
    }

    /// Validates and derives a [`Pad`] from its wire representation (spec
    /// §6). Computes `mirroredLane`/`flippedLane` from the coordinate
    /// extrema and `travelDistance`/`maxBracketSeparation` per spec §3.
    pub fn try_from_raw(raw: RawPad) -> CoreResult<Pad> {
        raw.validate().into_result()?;

        let coordinates: Vec<(i32, i32)> = raw.arrow_data.iter().map(|a| (a.x, a.y)).collect();
        let n = coordinates.len();
        let compensation = raw.y_travel_distance_compensation;

        let valid_next_arrow: Vec<Vec<bool>> =
            raw.arrow_data.iter().map(|a| a.valid_next_arrows.clone()).collect();
        let bracketable_heel_with: Vec<FootTable> =
            raw.arrow_data.iter().map(|a| a.bracketable_pairings_other_heel.clone()).collect();
        let bracketable_toe_with: Vec<FootTable> =
            raw.arrow_data.iter().map(|a| a.bracketable_pairings_other_toe.clone()).collect();
        let normal_pair: Vec<FootTable> =
            raw.arrow_data.iter().map(|a| a.other_foot_pairings.clone()).collect();
        let crossover_front: Vec<FootTable> = raw
            .arrow_data
            .iter()
            .map(|a| a.other_foot_pairings_other_foot_crossover_front.clone())
            .collect();
        let crossover_behind: Vec<FootTable> = raw
            .arrow_data
            .iter()
            .map(|a| a.other_foot_pairings_other_foot_crossover_behind.clone())
            .collect();
        let inverted: Vec<FootTable> =
            raw.arrow_data.iter().map(|a| a.other_foot_pairings_inverted.clone()).collect();

        let min_x = coordinates.iter().map(|c| c.0).min().unwrap();
        let max_x = coordinates.iter().map(|c| c.0).max().unwrap();
        let min_y = coordinates.iter().map(|c| c.1).min().unwrap();
        let max_y = coordinates.iter().map(|c| c.1).max().unwrap();

        let mut mirrored_lane = Vec::with_capacity(n);
        let mut flipped_lane = Vec::with_capacity(n);
        for &(x, y) in &coordinates {
            let mirrored_target = (min_x + max_x - x, y);
            let flipped_target = (x, min_y + max_y - y);
            mirrored_lane.push(find_lane(&coordinates, mirrored_target).ok_or_else(|| {
                CoreError::PadInvalid(format!("no mirrored lane for coordinate {:?}", (x, y)))
            })?);
            flipped_lane.push(find_lane(&coordinates, flipped_target).ok_or_else(|| {
                CoreError::PadInvalid(format!("no flipped lane for coordinate {:?}", (x, y)))
            })?);
        }

        let mut travel_distance = vec![vec![0.0; n]; n];
        for i in 0..n {
            for j in 0..n {
                let (x1, y1) = coordinates[i];
                let (x2, y2) = coordinates[j];
                let dx = (x1 - x2) as Distance;
                let dy = (y1 - y2) as Distance;
                let longitudinal = (dy.abs() - compensation).max(0.0);
                travel_distance[i][j] = (dx * dx + longitudinal * longitudinal).sqrt();
            }
        }

        let mut max_bracket_separation: Distance = 0.0;
        for i in 0..n {
            for j in 0..n {
                let bracketable = Foot::all().iter().any(|&foot| {
                    bracketable_heel_with[i][foot_index(foot)][j] || bracketable_toe_with[i][foot_index(foot)][j]
                });
                if bracketable {
                    let (x1, y1) = coordinates[i];
                    let (x2, y2) = coordinates[j];
                    let dx = (x1 - x2) as Distance;
                    let dy = (y1 - y2) as Distance;
                    max_bracket_separation = max_bracket_separation.max((dx * dx + dy * dy).sqrt());
                }
            }
        }

        let starting_positions = StartingPositions::try_from_raw(&raw.starting_positions, n)?;

        Ok(Pad {
            coordinates,
            valid_next_arrow,
            bracketable_heel_with,
            bracketable_toe_with,
            normal_pair,
            crossover_front,
            crossover_behind,
            inverted,
            mirrored_lane,
            flipped_lane,
            travel_distance,
            max_bracket_separation,
            starting_positions,
        })
    }
}

fn find_lane(coordinates: &[(i32, i32)], target: (i32, i32)) -> Option<Lane> {
    coordinates.iter().position(|&c| c == target).map(|i| Lane::new(i as u8))
}

fn foot_index(foot: Foot) -> usize {
    match foot {
        Foot::Left => 0,
        Foot::Right => 1,
    }
}
