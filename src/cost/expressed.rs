use crate::*;

/// Baseline situational weights for the expressed-search cost table (spec
/// §4.2). These are a designer-tuned heuristic, not a derived quantity
/// (spec §9 "Cost-table stability") — tests pin the *ordering*
/// `doubleStep > invert > crossover > footswap > bracket > alternating =
/// same-arrow` (spec §8 property 6), not the exact numbers, except where
/// §8's scenarios name a specific constant.
pub const COST_SAME_ARROW: Cost = 0;
pub const COST_ALTERNATING_NEW_ARROW: Cost = 0;
pub const COST_BRACKET: Cost = 20;
pub const COST_FOOTSWAP: Cost = 30;
pub const COST_CROSSOVER: Cost = 40;
pub const COST_INVERT: Cost = 60;
pub const COST_JUMP_EXIT: Cost = 10;
pub const COST_FOOT_ALREADY_HELD: Cost = 5;
pub const COST_DOUBLE_STEP: Cost = 100;
pub const COST_DOUBLE_STEP_MINE_INDICATED: Cost = 50;
pub const COST_CROSSOVER_DOUBLE_STEP_NO_INDICATION: Cost = 200;
pub const COST_TRIPLE_STEP: Cost = 150;
pub const NO_BRACKETS_COST_BRACKET: Cost = 1000;
pub const AGGRESSIVE_BRACKETS_COST_JUMP: Cost = 1000;

/// The situational inputs the expressed-search cost table is indexed by
/// (spec §4.2): "a dense table of integer weights indexed by contextual
/// situation, not by step kind alone".
#[derive(Debug, Clone, Copy)]
pub struct ExpressedCostContext {
    pub posture: PostureFamily,
    pub is_bracket: bool,
    pub is_footswap: bool,
    pub is_jump: bool,
    pub is_jump_exit: bool,
    pub is_first_step: bool,
    pub is_release: bool,
    pub is_double_step: bool,
    pub is_triple_step: bool,
    pub mine_indicated: bool,
    pub this_foot_held: bool,
    pub other_foot_held_portions: u8,
    pub no_brackets_mode: bool,
    pub aggressive_brackets_mode: bool,
    pub bracket_alternative_exists: bool,
}

/// The per-transition cost the expressed search adds for choosing this link
/// (spec §4.2). Releases and the first step of a chart are always free;
/// everything else accumulates from the situational axes below.
pub fn expressed_transition_cost(ctx: &ExpressedCostContext) -> Cost {
    if ctx.is_release || ctx.is_first_step {
        return 0;
    }

    let mut cost: Cost = 0;

    if ctx.is_double_step {
        cost += if ctx.mine_indicated {
            COST_DOUBLE_STEP_MINE_INDICATED
        } else if ctx.posture.is_crossover() && ctx.other_foot_held_portions == 0 {
            COST_CROSSOVER_DOUBLE_STEP_NO_INDICATION
        } else {
            COST_DOUBLE_STEP
        };
    } else if ctx.is_triple_step {
        cost += COST_TRIPLE_STEP;
    } else {
        if ctx.posture.is_invert() {
            cost += COST_INVERT;
        } else if ctx.posture.is_crossover() {
            cost += COST_CROSSOVER;
        }
        if ctx.is_footswap {
            cost += COST_FOOTSWAP;
        }
        if ctx.is_bracket {
            cost += COST_BRACKET;
        }
    }

    if ctx.is_jump_exit {
        cost += COST_JUMP_EXIT;
    }
    if ctx.this_foot_held {
        cost += COST_FOOT_ALREADY_HELD;
    }
    if ctx.is_bracket && ctx.no_brackets_mode {
        cost += NO_BRACKETS_COST_BRACKET;
    }
    if ctx.is_jump && !ctx.is_bracket && ctx.aggressive_brackets_mode && ctx.bracket_alternative_exists {
        cost += AGGRESSIVE_BRACKETS_COST_JUMP;
    }

    cost
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_ctx() -> ExpressedCostContext {
        ExpressedCostContext {
            posture: PostureFamily::Normal,
            is_bracket: false,
            is_footswap: false,
            is_jump: false,
            is_jump_exit: false,
            is_first_step: false,
            is_release: false,
            is_double_step: false,
            is_triple_step: false,
            mine_indicated: false,
            this_foot_held: false,
            other_foot_held_portions: 0,
            no_brackets_mode: false,
            aggressive_brackets_mode: false,
            bracket_alternative_exists: false,
        }
    }

    #[test]
    fn release_and_first_step_are_free() {
        assert_eq!(expressed_transition_cost(&ExpressedCostContext { is_release: true, ..base_ctx() }), 0);
        assert_eq!(expressed_transition_cost(&ExpressedCostContext { is_first_step: true, ..base_ctx() }), 0);
    }

    #[test]
    fn unambiguous_same_arrow_and_new_arrow_are_free() {
        assert_eq!(expressed_transition_cost(&base_ctx()), 0);
    }

    #[test]
    fn cost_ordering_matches_spec_pinned_order() {
        let double_step = expressed_transition_cost(&ExpressedCostContext { is_double_step: true, ..base_ctx() });
        let invert = expressed_transition_cost(&ExpressedCostContext { posture: PostureFamily::InvertFront, ..base_ctx() });
        let crossover =
            expressed_transition_cost(&ExpressedCostContext { posture: PostureFamily::CrossoverFront, ..base_ctx() });
        let footswap = expressed_transition_cost(&ExpressedCostContext { is_footswap: true, ..base_ctx() });
        let bracket = expressed_transition_cost(&ExpressedCostContext { is_bracket: true, ..base_ctx() });
        let same_arrow = expressed_transition_cost(&base_ctx());

        assert!(double_step > invert);
        assert!(invert > crossover);
        assert!(crossover > footswap);
        assert!(footswap > bracket);
        assert!(bracket > same_arrow);
    }

    #[test]
    fn mine_indicated_double_step_costs_roughly_half() {
        let indicated =
            expressed_transition_cost(&ExpressedCostContext { is_double_step: true, mine_indicated: true, ..base_ctx() });
        let plain = expressed_transition_cost(&ExpressedCostContext { is_double_step: true, ..base_ctx() });
        assert_eq!(indicated, COST_DOUBLE_STEP_MINE_INDICATED);
        assert!((indicated as f64) < (plain as f64) * 0.6);
    }

    #[test]
    fn e2_prefers_double_step_over_crossover_double_step() {
        // spec §8 scenario E2: CostNewArrow_DoubleStep (100) must be chosen
        // over CostNewArrow_Crossover_OtherFree_DoubleStep_NoIndication (200).
        let plain_double_step = expressed_transition_cost(&ExpressedCostContext { is_double_step: true, ..base_ctx() });
        let crossover_double_step = expressed_transition_cost(&ExpressedCostContext {
            is_double_step: true,
            posture: PostureFamily::CrossoverFront,
            ..base_ctx()
        });
        assert_eq!(plain_double_step, COST_DOUBLE_STEP);
        assert_eq!(crossover_double_step, COST_CROSSOVER_DOUBLE_STEP_NO_INDICATION);
        assert!(plain_double_step < crossover_double_step);
    }

    #[test]
    fn no_brackets_mode_adds_large_penalty_only_to_brackets() {
        let bracket_penalized =
            expressed_transition_cost(&ExpressedCostContext { is_bracket: true, no_brackets_mode: true, ..base_ctx() });
        assert!(bracket_penalized >= NO_BRACKETS_COST_BRACKET);
    }

    #[test]
    fn aggressive_brackets_mode_penalizes_jump_when_bracket_alternative_exists() {
        let ctx = ExpressedCostContext {
            is_jump: true,
            aggressive_brackets_mode: true,
            bracket_alternative_exists: true,
            ..base_ctx()
        };
        assert!(expressed_transition_cost(&ctx) >= AGGRESSIVE_BRACKETS_COST_JUMP);
    }
}
