use crate::*;

/// One `(foot, portion)` slot's entry in a [`GraphLink`]: which step kind
/// and foot action applies there (spec §3). Absence (`None`) is the
/// chosen representation of the spec's explicit `valid` boolean — a slot
/// that doesn't act carries no kind/action at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LinkEntry {
    pub kind: StepKind,
    pub action: FootAction,
}

/// One transition in the step graph: a `(StepKind, FootAction, valid)`
/// triple per `(foot, portion)` (spec §3). A link applies when at least one
/// slot is present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GraphLink {
    entries: [[Option<LinkEntry>; 2]; 2],
}

impl GraphLink {
    pub fn empty() -> Self {
        Self { entries: [[None; 2]; 2] }
    }

    pub fn entry(&self, foot: Foot, portion: FootPortion) -> Option<LinkEntry> {
        self.entries[foot_idx(foot)][portion_idx(portion)]
    }

    pub fn with_entry(&self, foot: Foot, portion: FootPortion, entry: LinkEntry) -> Self {
        let mut next = *self;
        next.entries[foot_idx(foot)][portion_idx(portion)] = Some(entry);
        next
    }

    fn active_entries(&self) -> impl Iterator<Item = (Foot, FootPortion, LinkEntry)> + '_ {
        Foot::all().into_iter().flat_map(move |foot| {
            FootPortion::all()
                .into_iter()
                .filter_map(move |portion| self.entry(foot, portion).map(|e| (foot, portion, e)))
        })
    }

    /// Which feet have at least one active slot in this link.
    pub fn acting_feet(&self) -> Vec<Foot> {
        let mut feet: Vec<Foot> = self.active_entries().map(|(f, _, _)| f).collect();
        feet.sort();
        feet.dedup();
        feet
    }

    /// The step kinds carried by this link's active slots, used by the
    /// expressed search to classify the dominant posture of a transition.
    pub fn kinds(&self) -> impl Iterator<Item = StepKind> + '_ {
        self.active_entries().map(|(_, _, e)| e.kind)
    }

    /// Both feet act, and neither action is a `Release` (spec §3).
    pub fn is_jump(&self) -> bool {
        let feet = self.acting_feet();
        feet.len() == 2 && self.active_entries().all(|(_, _, e)| e.action != FootAction::Release)
    }

    /// Any slot releases a held arrow.
    pub fn is_release(&self) -> bool {
        self.active_entries().any(|(_, _, e)| e.action == FootAction::Release)
    }

    /// Exactly one foot acts, and all of that foot's active portions act
    /// (i.e. a full bracket, not a one-arrow partial bracket).
    pub fn is_bracket_step(&self) -> bool {
        let feet = self.acting_feet();
        feet.len() == 1 && {
            let foot = feet[0];
            let active: Vec<_> = FootPortion::all().into_iter().filter(|&p| self.entry(foot, p).is_some()).collect();
            active.len() == 2
        }
    }

    pub fn is_footswap(&self, foot: Foot, portion: FootPortion) -> bool {
        self.entry(foot, portion).is_some_and(|e| e.kind.is_footswap(portion))
    }

    pub fn involves_bracket(&self) -> bool {
        self.active_entries().any(|(_, _, e)| e.kind.is_bracket())
    }

    /// A single-foot, single-portion (non-bracket) step by `foot` with the
    /// given kind.
    pub fn is_single_step(&self, kind: StepKind, foot: Foot) -> bool {
        let feet = self.acting_feet();
        feet.len() == 1
            && feet[0] == foot
            && self.entry(foot, FootPortion::Heel).is_some_and(|e| e.kind == kind)
            && self.entry(foot, FootPortion::Toe).is_none()
    }

    /// The multiset of lanes this link acts on — used by the expressed
    /// search to check "shape compatibility" against a chart row (spec
    /// §4.3: "same multiset of lanes acted on, accounting for brackets and
    /// jumps").
    pub fn acted_lanes(&self, node: &GraphNode) -> Vec<Lane> {
        let mut lanes: Vec<Lane> = self.active_entries().map(|(foot, portion, _)| node.at(foot, portion).lane).collect();
        lanes.sort();
        lanes
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
