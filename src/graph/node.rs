use crate::*;

/// Where one foot portion rests: which lane it's on and what state that
/// arrow is in under this foot (spec §3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FootState {
    pub lane: Lane,
    pub arrow_state: ArrowState,
}

impl FootState {
    pub const fn new(lane: Lane, arrow_state: ArrowState) -> Self {
        Self { lane, arrow_state }
    }

    pub const fn resting(lane: Lane) -> Self {
        Self::new(lane, ArrowState::Resting)
    }
}

/// A physical foot state on a pad: where each foot's heel and toe rest (or
/// hold), plus the body's orientation (spec §3). Nodes never represent
/// feet "in the air" — every entry here is a resting or held arrow.
///
/// Identity is structural: two nodes are equal iff every `(lane,
/// arrowState)` entry and the orientation match (spec §3), which is
/// exactly what `#[derive(PartialEq, Eq, Hash)]` gives us, letting the
/// builder dedupe nodes with a plain `HashMap`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GraphNode {
    feet: [[FootState; 2]; 2],
    pub orientation: BodyOrientation,
}

impl GraphNode {
    pub fn new(orientation: BodyOrientation) -> Self {
        Self {
            feet: [[FootState::resting(Lane::new(0)); 2]; 2],
            orientation,
        }
    }

    pub fn at(&self, foot: Foot, portion: FootPortion) -> FootState {
        self.feet[foot_idx(foot)][portion_idx(portion)]
    }

    pub fn with(&self, foot: Foot, portion: FootPortion, state: FootState) -> Self {
        let mut next = *self;
        next.feet[foot_idx(foot)][portion_idx(portion)] = state;
        next
    }

    pub fn with_orientation(&self, orientation: BodyOrientation) -> Self {
        Self { orientation, ..*self }
    }

    /// Builds the starting node for a given tier-0 position: both feet
    /// resting, `Heel` portion on the assigned lane, `Toe` portion
    /// defaulting to the same lane (spec §3: "single (non-bracket) steps
    /// use Default = Heel").
    pub fn starting(position: StartingPosition) -> Self {
        GraphNode::new(BodyOrientation::Normal)
            .with(Foot::Left, FootPortion::Heel, FootState::resting(position.left))
            .with(Foot::Left, FootPortion::Toe, FootState::resting(position.left))
            .with(Foot::Right, FootPortion::Heel, FootState::resting(position.right))
            .with(Foot::Right, FootPortion::Toe, FootState::resting(position.right))
    }

    /// Applies [`Pad::mirrored_lane`] to every lane entry, used by the
    /// mirror-symmetry invariant (spec §8 property 4).
    pub fn mirrored(&self, pad: &Pad) -> Self {
        let mut next = *self;
        for foot in Foot::all() {
            for portion in FootPortion::all() {
                let state = self.at(foot, portion);
                next = next.with(foot, portion, FootState::new(pad.mirrored_lane(state.lane), state.arrow_state));
            }
        }
        next
    }
}

fn foot_idx(foot: Foot) -> usize {
    match foot {
        Foot::Left => 0,
        Foot::Right => 1,
    }
}

fn portion_idx(portion: FootPortion) -> usize {
    match portion {
        FootPortion::Heel => 0,
        FootPortion::Toe => 1,
    }
}
