use crate::*;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::{HashMap, VecDeque};

/// A single-foot, single-portion move candidate: the link entry it would
/// record plus the resulting foot state and posture, kept separate from any
/// particular node so a jump can combine one from each foot (spec §4.1).
struct SingleMove {
    entry: LinkEntry,
    state: FootState,
    posture: PostureFamily,
}

/// Builds the full, static step graph for a pad by fixed-point worklist
/// expansion (spec §4.1, C3): seed the starting-position nodes, expand every
/// newly discovered node against the C2 step-kind space and the C1 pad
/// predicates, and keep going until nothing new is produced. Grounded on the
/// arena-construction style of a worklist-driven state-graph builder, mirrored
/// here with `petgraph::graph::DiGraph` as the backing arena (as in
/// `crates/mccfr/src/state/tree.rs`'s `Tree<T,E,G,I>`) instead of owned,
/// possibly-cyclic node pointers.
pub struct StepGraphBuilder<'p> {
    pad: &'p Pad,
}

impl<'p> StepGraphBuilder<'p> {
    pub fn new(pad: &'p Pad) -> Self {
        Self { pad }
    }

    pub fn build(&self) -> StepGraph {
        let mut graph: DiGraph<GraphNode, GraphLink> = DiGraph::new();
        let mut index_of: HashMap<GraphNode, NodeIndex> = HashMap::new();
        let mut worklist: VecDeque<NodeIndex> = VecDeque::new();

        let mut starting_indices = Vec::new();
        for tier in self.pad.starting_positions().tiers() {
            let mut tier_indices = Vec::new();
            for &position in tier {
                let node = GraphNode::starting(position);
                tier_indices.push(intern(&mut graph, &mut index_of, &mut worklist, node));
            }
            starting_indices.push(tier_indices);
        }

        while let Some(index) = worklist.pop_front() {
            let node = graph[index];
            for (link, successor) in self.expand(&node) {
                let target = intern(&mut graph, &mut index_of, &mut worklist, successor);
                graph.add_edge(index, target, link);
            }
        }

        StepGraph::new(self.pad.clone(), graph, index_of, starting_indices)
    }

    /// Every outgoing `(link, successor)` pair reachable from `node` in one
    /// step: whole-foot single-arrow moves (alone or combined into a jump),
    /// partial/full arrow releases, and two-arrow / one-arrow brackets.
    fn expand(&self, node: &GraphNode) -> Vec<(GraphLink, GraphNode)> {
        let mut out = Vec::new();

        let left = self.single_moves(node, Foot::Left);
        let right = self.single_moves(node, Foot::Right);

        for mv in &left {
            out.push((GraphLink::empty().with_entry(Foot::Left, FootPortion::Heel, mv.entry), self.apply_single(node, Foot::Left, mv)));
        }
        for mv in &right {
            out.push((GraphLink::empty().with_entry(Foot::Right, FootPortion::Heel, mv.entry), self.apply_single(node, Foot::Right, mv)));
        }
        for l in &left {
            for r in &right {
                // A jump never lands both feet on the same lane at once.
                if l.state.lane == r.state.lane {
                    continue;
                }
                let link = GraphLink::empty()
                    .with_entry(Foot::Left, FootPortion::Heel, l.entry)
                    .with_entry(Foot::Right, FootPortion::Heel, r.entry);
                let next = node
                    .with(Foot::Left, FootPortion::Heel, l.state)
                    .with(Foot::Left, FootPortion::Toe, l.state)
                    .with(Foot::Right, FootPortion::Heel, r.state)
                    .with(Foot::Right, FootPortion::Toe, r.state)
                    .with_orientation(l.posture.resulting_orientation(r.posture.resulting_orientation(node.orientation)));
                out.push((link, next));
            }
        }

        for foot in Foot::all() {
            out.extend(self.release_moves(node, foot));
            out.extend(self.bracket_moves(node, foot));
            out.extend(self.one_arrow_moves(node, foot));
        }

        out
    }

    /// Whole-foot candidates for `foot`: re-tap/re-hold in place, or move to
    /// any pad-adjacent arrow (a footswap when that arrow is the other
    /// foot's current position). Only defined from a non-bracketed stance —
    /// moving a bracketed foot as a unit is represented by releasing it
    /// first (spec §4.1 treats brackets and single steps as distinct
    /// shapes, never silently collapsed into each other).
    fn single_moves(&self, node: &GraphNode, foot: Foot) -> Vec<SingleMove> {
        let mut moves = Vec::new();
        let heel = node.at(foot, FootPortion::Heel);
        let toe = node.at(foot, FootPortion::Toe);
        if heel.lane != toe.lane {
            return moves;
        }
        let current = heel.lane;
        let other_heel = node.at(foot.other(), FootPortion::Heel).lane;

        for &action in &[FootAction::Tap, FootAction::Hold] {
            let posture = self.posture_family(current, foot, other_heel);
            let kind = StepKind::new(posture, BracketForm::Single(LaneRelation::SameArrow));
            moves.push(SingleMove {
                entry: LinkEntry { kind, action },
                state: FootState::new(current, arrow_state_for(action)),
                posture,
            });
        }

        for to in self.pad.lanes() {
            if to == current || !self.pad.valid_next_arrow(current, to) {
                continue;
            }
            let relation = lane_relation(current, to, other_heel);
            let posture = self.posture_family(to, foot, other_heel);
            let kind = StepKind::new(posture, BracketForm::Single(relation));
            for &action in &[FootAction::Tap, FootAction::Hold] {
                moves.push(SingleMove {
                    entry: LinkEntry { kind, action },
                    state: FootState::new(to, arrow_state_for(action)),
                    posture,
                });
            }
        }

        moves
    }

    fn apply_single(&self, node: &GraphNode, foot: Foot, mv: &SingleMove) -> GraphNode {
        node.with(foot, FootPortion::Heel, mv.state)
            .with(foot, FootPortion::Toe, mv.state)
            .with_orientation(mv.posture.resulting_orientation(node.orientation))
    }

    /// Releasing a held arrow never moves a foot, so it carries no posture
    /// change. From a non-bracketed stance the whole foot releases at once;
    /// from a bracketed stance each portion releases independently (spec
    /// §4.1: "the non-acting portion retains its resting lane").
    fn release_moves(&self, node: &GraphNode, foot: Foot) -> Vec<(GraphLink, GraphNode)> {
        let mut out = Vec::new();
        let heel = node.at(foot, FootPortion::Heel);
        let toe = node.at(foot, FootPortion::Toe);
        let other_heel = node.at(foot.other(), FootPortion::Heel).lane;
        let bracketed = heel.lane != toe.lane;

        if !bracketed {
            if heel.arrow_state == ArrowState::Held {
                let posture = self.posture_family(heel.lane, foot, other_heel);
                let kind = StepKind::new(posture, BracketForm::Single(LaneRelation::SameArrow));
                let next = node
                    .with(foot, FootPortion::Heel, FootState::new(heel.lane, ArrowState::Resting))
                    .with(foot, FootPortion::Toe, FootState::new(toe.lane, ArrowState::Resting));
                let link = GraphLink::empty().with_entry(foot, FootPortion::Heel, LinkEntry { kind, action: FootAction::Release });
                out.push((link, next));
            }
            return out;
        }

        for portion in FootPortion::all() {
            let state = node.at(foot, portion);
            if state.arrow_state != ArrowState::Held {
                continue;
            }
            let posture = self.posture_family(state.lane, foot, other_heel);
            let kind = StepKind::new(posture, BracketForm::OneArrow { portion, relation: LaneRelation::SameArrow });
            let next = node.with(foot, portion, FootState::new(state.lane, ArrowState::Resting));
            let link = GraphLink::empty().with_entry(foot, portion, LinkEntry { kind, action: FootAction::Release });
            out.push((link, next));
        }
        out
    }

    /// Full two-arrow brackets: `foot` places heel and toe together,
    /// independently of whatever the foot was doing before (spec §3
    /// "bracket form" `TwoArrow`). Restricted to the `Normal`/
    /// `CrossoverFront`/`CrossoverBehind` postures, matching
    /// [`StepKind::all`]'s exclusion of inverted/stretch brackets.
    fn bracket_moves(&self, node: &GraphNode, foot: Foot) -> Vec<(GraphLink, GraphNode)> {
        let mut out = Vec::new();
        let heel = node.at(foot, FootPortion::Heel);
        let toe = node.at(foot, FootPortion::Toe);
        let other_heel = node.at(foot.other(), FootPortion::Heel).lane;

        for heel_lane in self.pad.lanes() {
            for toe_lane in self.pad.lanes() {
                if heel_lane == toe_lane {
                    continue;
                }
                if !self.pad.bracketable_heel_with(heel_lane, foot, toe_lane) {
                    continue;
                }
                if !self.pad.bracketable_toe_with(toe_lane, foot, heel_lane) {
                    continue;
                }
                let heel_posture = self.posture_family(heel_lane, foot, other_heel);
                let toe_posture = self.posture_family(toe_lane, foot, other_heel);
                if heel_posture.is_invert() || heel_posture.is_stretch() || toe_posture.is_invert() || toe_posture.is_stretch() {
                    continue;
                }
                let posture = heel_posture.max(toe_posture);
                let heel_relation = lane_relation(heel.lane, heel_lane, other_heel);
                let toe_relation = lane_relation(toe.lane, toe_lane, other_heel);
                let kind = StepKind::new(posture, BracketForm::TwoArrow { heel: heel_relation, toe: toe_relation });

                for &(heel_action, toe_action) in &[
                    (FootAction::Tap, FootAction::Tap),
                    (FootAction::Tap, FootAction::Hold),
                    (FootAction::Hold, FootAction::Tap),
                    (FootAction::Hold, FootAction::Hold),
                ] {
                    let next = node
                        .with(foot, FootPortion::Heel, FootState::new(heel_lane, arrow_state_for(heel_action)))
                        .with(foot, FootPortion::Toe, FootState::new(toe_lane, arrow_state_for(toe_action)))
                        .with_orientation(posture.resulting_orientation(node.orientation));
                    let link = GraphLink::empty()
                        .with_entry(foot, FootPortion::Heel, LinkEntry { kind, action: heel_action })
                        .with_entry(foot, FootPortion::Toe, LinkEntry { kind, action: toe_action });
                    out.push((link, next));
                }
            }
        }
        out
    }

    /// One-arrow brackets: `foot` is already bracketed and moves exactly one
    /// portion while the other retains its resting lane (spec §4.1).
    fn one_arrow_moves(&self, node: &GraphNode, foot: Foot) -> Vec<(GraphLink, GraphNode)> {
        let mut out = Vec::new();
        let heel = node.at(foot, FootPortion::Heel);
        let toe = node.at(foot, FootPortion::Toe);
        if heel.lane == toe.lane {
            return out;
        }
        let other_heel = node.at(foot.other(), FootPortion::Heel).lane;

        for &(moving, anchor) in &[(FootPortion::Heel, toe), (FootPortion::Toe, heel)] {
            let moving_state = node.at(foot, moving);
            for target in self.pad.lanes() {
                if target == moving_state.lane {
                    continue;
                }
                let bracketable = match moving {
                    FootPortion::Heel => self.pad.bracketable_heel_with(target, foot, anchor.lane),
                    FootPortion::Toe => self.pad.bracketable_toe_with(target, foot, anchor.lane),
                };
                if !bracketable {
                    continue;
                }
                let posture = self.posture_family(target, foot, other_heel);
                if posture.is_invert() || posture.is_stretch() {
                    continue;
                }
                let relation = lane_relation(moving_state.lane, target, other_heel);
                let kind = StepKind::new(posture, BracketForm::OneArrow { portion: moving, relation });
                for &action in &[FootAction::Tap, FootAction::Hold] {
                    let next = node
                        .with(foot, moving, FootState::new(target, arrow_state_for(action)))
                        .with_orientation(posture.resulting_orientation(node.orientation));
                    let link = GraphLink::empty().with_entry(foot, moving, LinkEntry { kind, action });
                    out.push((link, next));
                }
            }
        }
        out
    }

    /// Classifies the posture a foot would have landing on `lane` given the
    /// other foot's current heel lane. Crossover/invert read directly off
    /// the pad's predicate tables (spec §6); `Stretch` has no dedicated
    /// predicate there, so it is derived from travel distance exceeding the
    /// pad's own bracket-separation bound — a documented scope decision
    /// (see DESIGN.md), not a spec-mandated formula.
    fn posture_family(&self, lane: Lane, foot: Foot, other_heel: Lane) -> PostureFamily {
        if self.pad.inverted(lane, foot, other_heel) {
            if self.pad.crossover_front(lane, foot, other_heel) {
                PostureFamily::InvertFront
            } else {
                PostureFamily::InvertBack
            }
        } else if self.pad.crossover_front(lane, foot, other_heel) {
            PostureFamily::CrossoverFront
        } else if self.pad.crossover_behind(lane, foot, other_heel) {
            PostureFamily::CrossoverBehind
        } else if self.pad.normal_pair(lane, foot, other_heel) {
            PostureFamily::Normal
        } else if self.pad.travel_distance(other_heel, lane) > self.pad.max_bracket_separation() {
            PostureFamily::Stretch
        } else {
            PostureFamily::Normal
        }
    }
}

fn lane_relation(current: Lane, target: Lane, other_current: Lane) -> LaneRelation {
    if target == current {
        LaneRelation::SameArrow
    } else if target == other_current {
        LaneRelation::FootSwap
    } else {
        LaneRelation::NewArrow
    }
}

fn arrow_state_for(action: FootAction) -> ArrowState {
    match action {
        FootAction::Tap => ArrowState::Resting,
        FootAction::Hold => ArrowState::Held,
        FootAction::Release => ArrowState::Resting,
    }
}

fn intern(
    graph: &mut DiGraph<GraphNode, GraphLink>,
    index_of: &mut HashMap<GraphNode, NodeIndex>,
    worklist: &mut VecDeque<NodeIndex>,
    node: GraphNode,
) -> NodeIndex {
    if let Some(&index) = index_of.get(&node) {
        index
    } else {
        let index = graph.add_node(node);
        index_of.insert(node, index);
        worklist.push_back(index);
        index
    }
}
