use crate::*;

/// The wire shape of one pad-geometry file (spec §6). Parsing the
/// surrounding file format (comments, versioning, on-disk layout) stays an
/// external collaborator; this struct is only the typed JSON shape the
/// core agrees to consume via `serde_json`.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RawPad {
    pub arrow_data: Vec<RawArrow>,
    pub starting_positions: Vec<Vec<RawStartingPosition>>,
    #[serde(default = "default_y_travel_compensation")]
    pub y_travel_distance_compensation: Distance,
}

fn default_y_travel_compensation() -> Distance {
    DEFAULT_Y_TRAVEL_DISTANCE_COMPENSATION
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RawArrow {
    pub x: i32,
    pub y: i32,
    pub valid_next_arrows: Vec<bool>,
    pub bracketable_pairings_other_heel: [Vec<bool>; 2],
    pub bracketable_pairings_other_toe: [Vec<bool>; 2],
    pub other_foot_pairings: [Vec<bool>; 2],
    pub other_foot_pairings_other_foot_crossover_front: [Vec<bool>; 2],
    pub other_foot_pairings_other_foot_crossover_behind: [Vec<bool>; 2],
    pub other_foot_pairings_inverted: [Vec<bool>; 2],
}

#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
pub struct RawStartingPosition {
    pub left_lane: Lane,
    pub right_lane: Lane,
}

impl RawPad {
    /// Validates the raw document against spec §6's invariants, collecting
    /// every offending field rather than stopping at the first one (spec
    /// §7).
    pub fn validate(&self) -> ConfigDiagnostics {
        let mut diagnostics = ConfigDiagnostics::new();
        let n = self.arrow_data.len();
        if n == 0 {
            diagnostics.push("arrowData must contain at least one lane");
            return diagnostics;
        }
        for (i, arrow) in self.arrow_data.iter().enumerate() {
            check_len(&mut diagnostics, "validNextArrows", i, arrow.valid_next_arrows.len(), n);
            for foot in 0..2 {
                check_len(&mut diagnostics, "bracketablePairingsOtherHeel", i, arrow.bracketable_pairings_other_heel[foot].len(), n);
                check_len(&mut diagnostics, "bracketablePairingsOtherToe", i, arrow.bracketable_pairings_other_toe[foot].len(), n);
                check_len(&mut diagnostics, "otherFootPairings", i, arrow.other_foot_pairings[foot].len(), n);
                check_len(&mut diagnostics, "otherFootPairingsOtherFootCrossoverFront", i, arrow.other_foot_pairings_other_foot_crossover_front[foot].len(), n);
                check_len(&mut diagnostics, "otherFootPairingsOtherFootCrossoverBehind", i, arrow.other_foot_pairings_other_foot_crossover_behind[foot].len(), n);
                check_len(&mut diagnostics, "otherFootPairingsInverted", i, arrow.other_foot_pairings_inverted[foot].len(), n);
            }
        }
        if self.starting_positions.is_empty() {
            diagnostics.push("startingPositions must contain tier 0");
        } else if self.starting_positions[0].len() != 1 {
            diagnostics.push(format!(
                "tier 0 must contain exactly one position, found {}",
                self.starting_positions[0].len()
            ));
        }
        for (tier, positions) in self.starting_positions.iter().enumerate() {
            for position in positions {
                check_lane_range(&mut diagnostics, "startingPositions", tier, position.left_lane, n);
                check_lane_range(&mut diagnostics, "startingPositions", tier, position.right_lane, n);
            }
        }
        if self.y_travel_distance_compensation < 0.0 {
            diagnostics.push("yTravelDistanceCompensation must be non-negative");
        }
        diagnostics
    }
}

fn check_len(diagnostics: &mut ConfigDiagnostics, field: &str, lane: usize, actual: usize, expected: usize) {
    if actual != expected {
        diagnostics.push(format!(
            "{field} at lane {lane} has length {actual}, expected numArrows={expected}"
        ));
    }
}

fn check_lane_range(diagnostics: &mut ConfigDiagnostics, field: &str, tier: usize, lane: Lane, num_arrows: usize) {
    if lane.index() >= num_arrows {
        diagnostics.push(format!(
            "{field} tier {tier} references lane {lane} outside [0, {num_arrows})"
        ));
    }
}
