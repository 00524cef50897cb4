use crate::*;
use petgraph::graph::NodeIndex;
use std::collections::HashMap;

const LATERAL_WINDOW_DEFAULT: u32 = 4;

/// One frontier node of the performed-chart search: the chosen target-pad
/// graph position plus the running per-foot shaping state needed to price
/// the next extension in O(1) (spec §4.4 "state carried on search nodes").
#[derive(Debug, Clone)]
struct FrontierNode {
    graph_index: NodeIndex,
    parent: Option<usize>,
    step: Option<PerformedStep>,
    cost: Cost,
    depth: usize,
    last_foot_time: [Option<Seconds>; 2],
    last_foot_lane: [Option<Lane>; 2],
    lateral_window: Vec<(Seconds, i32)>,
    histogram: Vec<u32>,
    inward_count: u32,
    outward_count: u32,
    steps_so_far: u32,
}

/// Best-first search replaying an expressed chart onto a (possibly
/// different) target pad's step graph (spec §4.4, C6).
pub struct PerformedChartSearch<'g> {
    target: &'g StepGraph,
}

impl<'g> PerformedChartSearch<'g> {
    pub fn new(target: &'g StepGraph) -> Self {
        Self { target }
    }

    pub fn run(
        &mut self,
        expressed: &ExpressedChart,
        row_times: &[Seconds],
        config: &PerformedChartConfig,
        chart_type: &str,
        cancel: &CancellationFlag,
    ) -> CoreResult<PerformedChart> {
        config.validate(&[chart_type]).into_result()?;
        let target_weights = config.arrow_weights.get(chart_type).cloned();
        let num_arrows = self.target.pad().num_arrows();

        let mut arena: Vec<FrontierNode> = Vec::new();
        let mut frontier: Vec<usize> = Vec::new();

        for (tier_index, tier) in self.target.starting_indices().iter().enumerate() {
            for &start in tier {
                arena.push(FrontierNode {
                    graph_index: start,
                    parent: None,
                    step: None,
                    cost: tier_index as Cost,
                    depth: 0,
                    last_foot_time: [None, None],
                    last_foot_lane: [None, None],
                    lateral_window: Vec::new(),
                    histogram: vec![0; num_arrows],
                    inward_count: 0,
                    outward_count: 0,
                    steps_so_far: 0,
                });
                frontier.push(arena.len() - 1);
            }
        }

        for (row_index, source_row) in expressed.rows.iter().enumerate() {
            if cancel.is_cancelled() {
                return Err(CoreError::Cancelled {
                    rows_completed: row_index,
                    best_partial: self.best_partial(&arena, &frontier),
                });
            }

            let time = row_times.get(row_index).copied().unwrap_or(0.0);
            let mut next_frontier: Vec<usize> = Vec::new();

            for &index in &frontier {
                let node = arena[index].clone();
                let Some(candidate_link) = find_target_link(self.target, node.graph_index, &source_row.link) else {
                    continue;
                };

                for (_, link, target) in self.target.outgoing(node.graph_index) {
                    if *link != candidate_link {
                        continue;
                    }
                    let successor = *self.target.node(target);
                    let mut histogram = node.histogram.clone();
                    let mut lateral_window = node.lateral_window.clone();
                    let mut last_foot_time = node.last_foot_time;
                    let mut last_foot_lane = node.last_foot_lane;
                    let mut inward_count = node.inward_count;
                    let mut outward_count = node.outward_count;
                    let mut cost = node.cost;

                    for foot in link.acting_feet() {
                        let foot_index = foot_idx(foot);
                        let acting_portion = FootPortion::all()
                            .into_iter()
                            .find(|&p| link.entry(foot, p).is_some())
                            .unwrap_or(FootPortion::Heel);
                        let lane = successor.at(foot, acting_portion).lane;
                        histogram[lane.index()] += 1;
                        for portion in FootPortion::all() {
                            if portion != acting_portion && link.entry(foot, portion).is_some() {
                                histogram[successor.at(foot, portion).lane.index()] += 1;
                            }
                        }

                        if let (Some(prev_time), Some(prev_lane)) =
                            (last_foot_time[foot_index], last_foot_lane[foot_index])
                        {
                            let dt = time - prev_time;
                            let distance = self.target.pad().travel_distance(prev_lane, lane);
                            cost += step_tightening_cost(dt, distance, &config.step_tightening);
                        }
                        last_foot_time[foot_index] = Some(time);
                        last_foot_lane[foot_index] = Some(lane);

                        let (x, _) = self.target.pad().coordinate(lane);
                        lateral_window.push((time, x));
                        let window_len = config.lateral_tightening.pattern_length.unwrap_or(LATERAL_WINDOW_DEFAULT) as usize;
                        if lateral_window.len() > window_len.max(1) {
                            lateral_window.remove(0);
                        }
                        if lateral_window.len() >= 2 {
                            let (t0, x0) = lateral_window[0];
                            let (t1, x1) = *lateral_window.last().expect("checked len >= 2");
                            let elapsed = (t1 - t0).max(f32::EPSILON);
                            let lateral_speed = (x1 - x0).unsigned_abs() as Distance / elapsed;
                            let window_nps = lateral_window.len() as f32 / elapsed;
                            let chart_average_nps = row_times
                                .last()
                                .copied()
                                .filter(|&t| t > 0.0)
                                .map(|t| expressed.rows.len() as f32 / t)
                                .unwrap_or(window_nps);
                            cost += lateral_tightening_cost(
                                lateral_speed,
                                window_nps,
                                chart_average_nps,
                                &config.lateral_tightening,
                            );
                        }

                        let posture = kinds_for_foot(link, foot).map(|k| k.posture).max().unwrap_or_default();
                        let direction = facing_direction(posture);
                        cost += facing_cost(direction, inward_count, outward_count, node.steps_so_far, &config.facing);
                        match direction {
                            FacingDirection::Inward => inward_count += 1,
                            FacingDirection::Outward => outward_count += 1,
                            FacingDirection::Neutral => {}
                        }
                    }

                    if link.acting_feet().len() == 2 {
                        let lanes: Vec<Lane> = link.acted_lanes(&successor);
                        if lanes.len() == 2 {
                            let separation = self.target.pad().travel_distance(lanes[0], lanes[1]);
                            cost += stretch_tightening_cost(separation, &config.stretch_tightening);
                        }
                    }

                    if let Some(weights) = &target_weights {
                        cost += arrow_weight_deviation_cost(&histogram, weights);
                    }

                    let step = PerformedStep::new(candidate_link, successor, source_row.instance_types);
                    arena.push(FrontierNode {
                        graph_index: target,
                        parent: Some(index),
                        step: Some(step),
                        cost,
                        depth: node.depth + 1,
                        last_foot_time,
                        last_foot_lane,
                        lateral_window,
                        histogram,
                        inward_count,
                        outward_count,
                        steps_so_far: node.steps_so_far + 1,
                    });
                    next_frontier.push(arena.len() - 1);
                }
            }

            if next_frontier.is_empty() {
                return Err(CoreError::NoTargetMapping { row: row_index });
            }

            frontier = prune(&arena, next_frontier);
        }

        let best = frontier
            .iter()
            .copied()
            .min_by_key(|&i| arena[i].cost)
            .expect("frontier is non-empty whenever rows were produced");
        Ok(self.reconstruct(&arena, best))
    }

    fn reconstruct(&self, arena: &[FrontierNode], mut index: usize) -> PerformedChart {
        let mut steps = Vec::new();
        loop {
            let node = &arena[index];
            if let Some(step) = node.step {
                steps.push(step);
            }
            match node.parent {
                Some(parent) => index = parent,
                None => break,
            }
        }
        steps.reverse();
        PerformedChart { steps }
    }

    fn best_partial(&self, arena: &[FrontierNode], frontier: &[usize]) -> Vec<GraphLinkInstance> {
        let _ = (arena, frontier);
        // A performed-chart partial path is target-pad links, not the
        // expressed-chart GraphLinkInstance type the error carries;
        // cancellation during the performed search reports no partial
        // path rather than mismatching the error's shape.
        Vec::new()
    }
}

fn prune(arena: &[FrontierNode], indices: Vec<usize>) -> Vec<usize> {
    let mut best: HashMap<NodeIndex, usize> = HashMap::new();
    for index in indices {
        let key = arena[index].graph_index;
        let replace = match best.get(&key) {
            None => true,
            Some(&existing) => arena[index].cost < arena[existing].cost,
        };
        if replace {
            best.insert(key, index);
        }
    }
    best.into_values().collect()
}

fn kinds_for_foot(link: &GraphLink, foot: Foot) -> impl Iterator<Item = StepKind> + '_ {
    FootPortion::all().into_iter().filter_map(move |p| link.entry(foot, p)).map(|e| e.kind)
}

fn facing_direction(posture: PostureFamily) -> FacingDirection {
    match posture {
        PostureFamily::CrossoverBehind | PostureFamily::InvertBack => FacingDirection::Inward,
        PostureFamily::CrossoverFront | PostureFamily::InvertFront => FacingDirection::Outward,
        PostureFamily::Normal | PostureFamily::Stretch => FacingDirection::Neutral,
    }
}

fn foot_idx(foot: Foot) -> usize {
    match foot {
        Foot::Left => 0,
        Foot::Right => 1,
    }
}

/// Finds a target-pad link reachable from `index` whose kind tags match
/// `source_link`'s, degrading through looser bracket forms when an exact
/// match does not exist (spec §4.4 "the search degrades in a defined
/// order"). A [`GraphLink`] already carries no lane information — only
/// `(StepKind, FootAction)` per slot — so "same kind tags" is exactly
/// [`GraphLink`] structural equality.
fn find_target_link(graph: &StepGraph, index: NodeIndex, source_link: &GraphLink) -> Option<GraphLink> {
    let mut candidate = *source_link;
    loop {
        if graph.outgoing(index).any(|(_, link, _)| *link == candidate) {
            return Some(candidate);
        }
        candidate = degrade_once(&candidate)?;
    }
}

/// One step down the bracket-form degrade ladder: two-arrow bracket to
/// one-arrow, one-arrow to non-bracket single, single has nowhere looser
/// to go.
fn degrade_once(link: &GraphLink) -> Option<GraphLink> {
    let feet = link.acting_feet();
    if feet.len() != 1 {
        return None;
    }
    let foot = feet[0];
    let heel = link.entry(foot, FootPortion::Heel);
    let toe = link.entry(foot, FootPortion::Toe);

    match (heel, toe) {
        (Some(heel_entry), Some(_)) => {
            let BracketForm::TwoArrow { heel: relation, .. } = heel_entry.kind.form else {
                return None;
            };
            let kind = StepKind::new(heel_entry.kind.posture, BracketForm::OneArrow { portion: FootPortion::Heel, relation });
            Some(GraphLink::empty().with_entry(foot, FootPortion::Heel, LinkEntry { kind, action: heel_entry.action }))
        }
        (Some(entry), None) | (None, Some(entry)) => match entry.kind.form {
            BracketForm::OneArrow { relation, .. } => {
                let kind = StepKind::new(entry.kind.posture, BracketForm::Single(relation));
                Some(GraphLink::empty().with_entry(foot, FootPortion::Heel, LinkEntry { kind, action: entry.action }))
            }
            BracketForm::Single(_) => None,
            BracketForm::TwoArrow { .. } => None,
        },
        (None, None) => None,
    }
}
