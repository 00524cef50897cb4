use crate::*;
use petgraph::graph::NodeIndex;
use std::collections::HashMap;

/// One node on the expressed-search frontier: a candidate `(graphNode,
/// depth)` pair with its cumulative cost and a back-pointer into the same
/// arena (spec §4.3 "search structure"). The arena is a plain `Vec` scoped
/// to a single `run()` call (spec §5 "Resource discipline") — no recursion,
/// no suspension points, released in one step on return.
#[derive(Debug, Clone, Copy)]
struct FrontierNode {
    graph_index: NodeIndex,
    parent: Option<usize>,
    link: Option<GraphLinkInstance>,
    cost: Cost,
    depth: usize,
    acting_foot: Option<Foot>,
    consecutive_same_foot: u32,
    was_jump: bool,
}

/// Best-cost search assigning each input chart row to a step-graph link
/// (spec §4.3, C5).
pub struct ExpressedChartSearch<'g> {
    graph: &'g StepGraph,
    rng: SearchRng,
}

impl<'g> ExpressedChartSearch<'g> {
    pub fn new(graph: &'g StepGraph, rng: SearchRng) -> Self {
        Self { graph, rng }
    }

    /// Runs the full search: determines the bracket-parsing method, then
    /// expands the frontier one row at a time until every row is consumed
    /// or the frontier empties (spec §4.3).
    pub fn run(
        &mut self,
        rows: &[ChartRow],
        difficulty_level: i32,
        config: &ExpressedChartConfig,
        cancel: &CancellationFlag,
    ) -> CoreResult<ExpressedChart> {
        let method = self.determine_bracket_method(rows, difficulty_level, config);
        let no_brackets_mode = method == BracketParsingMethod::NoBrackets;
        let aggressive_mode = method == BracketParsingMethod::Aggressive;

        let mut arena: Vec<FrontierNode> = Vec::new();
        let mut frontier: Vec<usize> = Vec::new();

        for (tier_index, tier) in self.graph.starting_indices().iter().enumerate() {
            for &start in tier {
                arena.push(FrontierNode {
                    graph_index: start,
                    parent: None,
                    link: None,
                    cost: tier_index as Cost,
                    depth: 0,
                    acting_foot: None,
                    consecutive_same_foot: 0,
                    was_jump: false,
                });
                frontier.push(arena.len() - 1);
            }
        }

        let mut pending_mine_lanes: Vec<Lane> = Vec::new();
        let mut rows_completed = 0usize;

        for row in rows {
            if cancel.is_cancelled() {
                return Err(CoreError::Cancelled {
                    rows_completed,
                    best_partial: self.best_partial(&arena, &frontier),
                });
            }
            if row.is_empty() {
                continue;
            }
            if row.steps.is_empty() && row.releases.is_empty() {
                // mine-only row: nothing for the step graph to match against,
                // but its mines still indicate the row after it.
                pending_mine_lanes = row.mines.iter().map(|e| e.lane).collect();
                continue;
            }

            // a mine co-located with its own step indicates that step too
            // (spec §8 scenario E3), not just the row that follows it.
            let mine_lanes_for_this_row: Vec<Lane> =
                pending_mine_lanes.iter().copied().chain(row.mines.iter().map(|e| e.lane)).collect();

            let mut next_frontier: Vec<usize> = Vec::new();

            for &index in &frontier {
                let node = arena[index];
                let source_node = *self.graph.node(node.graph_index);

                for (_, link, target) in self.graph.outgoing(node.graph_index) {
                    let successor_node = *self.graph.node(target);
                    if !shape_compatible(link, &successor_node, row) {
                        continue;
                    }

                    let acting_foot = single_acting_foot(link);
                    let is_jump = link.is_jump();
                    let is_release = link.is_release();

                    let consecutive = if is_jump || is_release {
                        0
                    } else if acting_foot.is_some() && acting_foot == node.acting_foot {
                        node.consecutive_same_foot + 1
                    } else {
                        1
                    };

                    let mine_indicated = !is_release
                        && link.acted_lanes(&successor_node).iter().any(|lane| mine_lanes_for_this_row.contains(lane));

                    let bracket_alternative_exists = is_jump
                        && bracket_alternative_exists(self.graph, node.graph_index, link, &successor_node);

                    let this_foot_held = acting_foot
                        .is_some_and(|foot| source_node.at(foot, FootPortion::Heel).arrow_state == ArrowState::Held);
                    let other_foot_held_portions =
                        acting_foot.map(|foot| held_portion_count(&source_node, foot.other())).unwrap_or(0);

                    let ctx = ExpressedCostContext {
                        posture: dominant_posture(link),
                        is_bracket: link.involves_bracket(),
                        is_footswap: Foot::all()
                            .into_iter()
                            .any(|f| FootPortion::all().into_iter().any(|p| link.is_footswap(f, p))),
                        is_jump,
                        is_jump_exit: node.was_jump && !is_jump && !is_release,
                        is_first_step: node.depth == 0,
                        is_release,
                        is_double_step: consecutive == 2,
                        is_triple_step: consecutive >= 3,
                        mine_indicated,
                        this_foot_held,
                        other_foot_held_portions,
                        no_brackets_mode,
                        aggressive_brackets_mode: aggressive_mode,
                        bracket_alternative_exists,
                    };

                    let cost = node.cost + expressed_transition_cost(&ctx);
                    let instance = GraphLinkInstance::new(*link, successor_node);

                    arena.push(FrontierNode {
                        graph_index: target,
                        parent: Some(index),
                        link: Some(instance),
                        cost,
                        depth: node.depth + 1,
                        acting_foot,
                        consecutive_same_foot: consecutive,
                        was_jump: is_jump,
                    });
                    next_frontier.push(arena.len() - 1);
                }
            }

            if next_frontier.is_empty() {
                return Err(CoreError::NoValidAssignment {
                    row: rows_completed,
                    candidate_lanes: row.steps.iter().chain(row.releases.iter()).map(|e| e.lane).collect(),
                });
            }

            frontier = self.prune(&arena, next_frontier);
            pending_mine_lanes = row.mines.iter().map(|e| e.lane).collect();
            rows_completed += 1;
        }

        let best = frontier
            .iter()
            .copied()
            .min_by_key(|&i| arena[i].cost)
            .expect("frontier is non-empty whenever rows were produced");
        Ok(self.reconstruct(&arena, best))
    }

    fn determine_bracket_method(
        &self,
        rows: &[ChartRow],
        difficulty_level: i32,
        config: &ExpressedChartConfig,
    ) -> BracketParsingMethod {
        match config.bracket_parsing_determination {
            BracketParsingDetermination::UseDefault => config.default_bracket_parsing_method,
            BracketParsingDetermination::ChooseDynamically => {
                let (balanced_bpm, peak_simultaneous) = prescan(rows);
                const MAX_FEET: usize = 2;
                if difficulty_level < config.min_level_for_brackets
                    || balanced_bpm < config.balanced_brackets_per_minute_for_no_brackets
                {
                    BracketParsingMethod::NoBrackets
                } else if balanced_bpm > config.balanced_brackets_per_minute_for_aggressive_brackets
                    || (config.use_aggressive_brackets_when_more_simultaneous_notes_than_can_be_covered_without_brackets
                        && peak_simultaneous > MAX_FEET)
                {
                    BracketParsingMethod::Aggressive
                } else {
                    BracketParsingMethod::Balanced
                }
            }
        }
    }

    /// Dominance pruning: one survivor per `graphNode` (depth is uniform
    /// across a frontier generation). Ties on `(cost, tie-break key)` are
    /// broken by this run's seeded RNG, keeping the result reproducible for
    /// a fixed seed (spec §8 property 5) without favoring insertion order.
    fn prune(&mut self, arena: &[FrontierNode], indices: Vec<usize>) -> Vec<usize> {
        let mut best: HashMap<NodeIndex, usize> = HashMap::new();
        for index in indices {
            let key = arena[index].graph_index;
            let replace = match best.get(&key) {
                None => true,
                Some(&existing) => {
                    let a = (arena[index].cost, tie_break_key(&arena[index]));
                    let b = (arena[existing].cost, tie_break_key(&arena[existing]));
                    match a.cmp(&b) {
                        std::cmp::Ordering::Less => true,
                        std::cmp::Ordering::Greater => false,
                        std::cmp::Ordering::Equal => self.rng.next_u64(0..2) == 0,
                    }
                }
            };
            if replace {
                best.insert(key, index);
            }
        }
        best.into_values().collect()
    }

    fn reconstruct(&self, arena: &[FrontierNode], mut index: usize) -> ExpressedChart {
        let mut rows = Vec::new();
        loop {
            let node = arena[index];
            if let Some(link) = node.link {
                rows.push(link);
            }
            match node.parent {
                Some(parent) => index = parent,
                None => break,
            }
        }
        rows.reverse();
        ExpressedChart { rows }
    }

    fn best_partial(&self, arena: &[FrontierNode], frontier: &[usize]) -> Vec<GraphLinkInstance> {
        frontier
            .iter()
            .copied()
            .min_by_key(|&i| arena[i].cost)
            .map(|i| self.reconstruct(arena, i).rows)
            .unwrap_or_default()
    }
}

fn prescan(rows: &[ChartRow]) -> (f32, usize) {
    let total_seconds = rows.iter().map(|r| r.time).fold(0.0_f32, f32::max);
    let minutes = (total_seconds / 60.0).max(f32::EPSILON);
    let bracket_rows = rows.iter().filter(|r| r.steps.len() > 2).count();
    let peak_simultaneous = rows.iter().map(|r| r.steps.len()).max().unwrap_or(0);
    (bracket_rows as f32 / minutes, peak_simultaneous)
}

fn shape_compatible(link: &GraphLink, successor_node: &GraphNode, row: &ChartRow) -> bool {
    if !row.steps.is_empty() {
        if link.is_release() {
            return false;
        }
        let mut wanted: Vec<Lane> = row.steps.iter().map(|e| e.lane).collect();
        wanted.sort();
        link.acted_lanes(successor_node) == wanted
    } else if !row.releases.is_empty() {
        if !link.is_release() {
            return false;
        }
        let mut wanted: Vec<Lane> = row.releases.iter().map(|e| e.lane).collect();
        wanted.sort();
        link.acted_lanes(successor_node) == wanted
    } else {
        false
    }
}

fn single_acting_foot(link: &GraphLink) -> Option<Foot> {
    let feet = link.acting_feet();
    if feet.len() == 1 {
        Some(feet[0])
    } else {
        None
    }
}

fn dominant_posture(link: &GraphLink) -> PostureFamily {
    link.kinds().map(|k| k.posture).max().unwrap_or_default()
}

fn held_portion_count(node: &GraphNode, foot: Foot) -> u8 {
    FootPortion::all().into_iter().filter(|&p| node.at(foot, p).arrow_state == ArrowState::Held).count() as u8
}

/// Whether, from the same source node, a single-foot bracket link reaches a
/// node acting on the same lanes as `link` (a jump). Used to penalize a jump
/// in aggressive-bracket mode only when a bracket genuinely could have
/// covered the row instead (spec §4.3).
fn bracket_alternative_exists(graph: &StepGraph, index: NodeIndex, link: &GraphLink, jump_successor: &GraphNode) -> bool {
    let wanted = link.acted_lanes(jump_successor);
    graph.outgoing(index).any(|(_, candidate, target)| {
        candidate.is_bracket_step() && candidate.acted_lanes(graph.node(target)) == wanted
    })
}

fn tie_break_key(node: &FrontierNode) -> Option<StepKind> {
    node.link.and_then(|instance| {
        Foot::all()
            .into_iter()
            .flat_map(|f| FootPortion::all().into_iter().filter_map(move |p| instance.link.entry(f, p)))
            .map(|e| e.kind)
            .min()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_config() -> ExpressedChartConfig {
        ExpressedChartConfig {
            default_bracket_parsing_method: BracketParsingMethod::Balanced,
            bracket_parsing_determination: BracketParsingDetermination::UseDefault,
            min_level_for_brackets: 0,
            use_aggressive_brackets_when_more_simultaneous_notes_than_can_be_covered_without_brackets: false,
            balanced_brackets_per_minute_for_aggressive_brackets: 100.0,
            balanced_brackets_per_minute_for_no_brackets: 0.0,
        }
    }

    fn tap_row(row: u32, lanes: &[u8]) -> ChartRow {
        ChartRow {
            row,
            time: row as Seconds * 0.5,
            releases: Vec::new(),
            mines: Vec::new(),
            steps: lanes
                .iter()
                .map(|&lane| ChartEvent { lane: Lane::new(lane), row, time: row as Seconds * 0.5, kind: EventKind::Tap })
                .collect(),
        }
    }

    #[test]
    fn e1_trivial_alternation_costs_nothing() {
        let pad = crate::pad::fixtures::single_pad();
        let graph = crate::graph::StepGraphBuilder::new(&pad).build();
        let rows = vec![tap_row(0, &[0]), tap_row(1, &[3]), tap_row(2, &[0]), tap_row(3, &[3])];

        let mut search = ExpressedChartSearch::new(&graph, SearchRng::from_seed(1));
        let chart = search.run(&rows, 1, &default_config(), &CancellationFlag::new()).expect("search succeeds");

        assert_eq!(chart.len(), 4);
        let total: Cost = chart
            .rows
            .iter()
            .map(|r| {
                let ctx = ExpressedCostContext {
                    posture: dominant_posture(&r.link),
                    is_bracket: r.link.involves_bracket(),
                    is_footswap: false,
                    is_jump: r.link.is_jump(),
                    is_jump_exit: false,
                    is_first_step: false,
                    is_release: r.link.is_release(),
                    is_double_step: false,
                    is_triple_step: false,
                    mine_indicated: false,
                    this_foot_held: false,
                    other_foot_held_portions: 0,
                    no_brackets_mode: false,
                    aggressive_brackets_mode: false,
                    bracket_alternative_exists: false,
                };
                expressed_transition_cost(&ctx)
            })
            .sum();
        assert_eq!(total, 0);
    }

    #[test]
    fn e4_prefers_jump_over_bracket_when_both_feet_can_cover_the_row() {
        let pad = crate::pad::fixtures::single_pad();
        let graph = crate::graph::StepGraphBuilder::new(&pad).build();
        let rows = vec![tap_row(0, &[0, 1])];

        let mut search = ExpressedChartSearch::new(&graph, SearchRng::from_seed(1));
        let chart = search.run(&rows, 1, &default_config(), &CancellationFlag::new()).expect("search succeeds");

        assert_eq!(chart.len(), 1);
        assert!(chart.rows[0].link.is_jump());
    }

    #[test]
    fn determinism_with_fixed_seed() {
        let pad = crate::pad::fixtures::single_pad();
        let graph = crate::graph::StepGraphBuilder::new(&pad).build();
        let rows = vec![tap_row(0, &[0]), tap_row(1, &[3]), tap_row(2, &[1])];

        let mut a = ExpressedChartSearch::new(&graph, SearchRng::from_seed(42));
        let mut b = ExpressedChartSearch::new(&graph, SearchRng::from_seed(42));
        let chart_a = a.run(&rows, 1, &default_config(), &CancellationFlag::new()).expect("search succeeds");
        let chart_b = b.run(&rows, 1, &default_config(), &CancellationFlag::new()).expect("search succeeds");
        assert_eq!(chart_a.rows, chart_b.rows);
    }

    #[test]
    fn e3_mine_indicated_double_step_resolves_without_error() {
        let pad = crate::pad::fixtures::single_pad();
        let graph = crate::graph::StepGraphBuilder::new(&pad).build();
        let mine_row = ChartRow {
            row: 1,
            time: 0.5,
            releases: Vec::new(),
            mines: vec![ChartEvent { lane: Lane::new(3), row: 1, time: 0.5, kind: EventKind::Mine }],
            steps: vec![ChartEvent { lane: Lane::new(0), row: 1, time: 0.5, kind: EventKind::Tap }],
        };
        let rows = vec![tap_row(0, &[0]), mine_row, tap_row(2, &[3])];

        let mut search = ExpressedChartSearch::new(&graph, SearchRng::from_seed(1));
        let chart = search.run(&rows, 1, &default_config(), &CancellationFlag::new()).expect("search succeeds");
        assert_eq!(chart.len(), 3);
    }

    #[test]
    fn infeasible_chart_surfaces_no_valid_assignment() {
        let pad = crate::pad::fixtures::single_pad();
        let graph = crate::graph::StepGraphBuilder::new(&pad).build();
        // No link ever acts on four simultaneous lanes on a two-foot pad.
        let rows = vec![tap_row(0, &[0, 1, 2, 3])];

        let mut search = ExpressedChartSearch::new(&graph, SearchRng::from_seed(1));
        let err = search.run(&rows, 1, &default_config(), &CancellationFlag::new()).unwrap_err();
        assert!(matches!(err, CoreError::NoValidAssignment { row: 0, .. }));
    }
}
