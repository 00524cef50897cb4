use crate::*;

/// Continuous costs are computed in floating point and then scaled into the
/// integer [`Cost`] domain the searches compare, matching the expressed
/// table's units closely enough that the two contribute comparably to a
/// combined path cost.
pub const SHAPING_COST_SCALE: f32 = 100.0;

fn scale(value: f32) -> Cost {
    (value * SHAPING_COST_SCALE).round() as Cost
}

/// Linear interpolation of `value` between `(lo, 1.0)` and `(hi, 0.0)` —
/// full weight at or below `lo`, zero at or above `hi` (spec §4.2 "0
/// outside the band on the loose side, full weight on the tight side").
fn band_fraction(value: f32, lo: f32, hi: f32) -> f32 {
    if hi <= lo {
        return if value <= lo { 1.0 } else { 0.0 };
    }
    ((hi - value) / (hi - lo)).clamp(0.0, 1.0)
}

/// Cost of a same-foot step covering `distance` in `dt` seconds, scaled by
/// how tight `dt` is against `[minTime, maxTime]` (spec §4.2 "individual
/// step tightening"). Unconfigured thresholds contribute no cost.
pub fn step_tightening_cost(dt: Seconds, distance: Distance, config: &StepTighteningConfig) -> Cost {
    let (Some(min_time), Some(max_time)) = (config.min_time, config.max_time) else {
        return 0;
    };
    scale(band_fraction(dt, min_time, max_time) * distance)
}

/// Cost of a sliding window's lateral body speed, charged only when it
/// exceeds the configured speed *and* the window's notes-per-second
/// exceeds both the absolute and chart-relative thresholds (spec §4.2
/// "lateral body tightening").
pub fn lateral_tightening_cost(
    lateral_speed: Distance,
    window_nps: f32,
    chart_average_nps: f32,
    config: &LateralTighteningConfig,
) -> Cost {
    let Some(speed_cap) = config.speed else {
        return 0;
    };
    if lateral_speed <= speed_cap {
        return 0;
    }
    let absolute_cap = config.absolute_nps.unwrap_or(0.0);
    let relative_cap = config.relative_nps.unwrap_or(0.0) * chart_average_nps;
    if window_nps <= absolute_cap || window_nps <= relative_cap {
        return 0;
    }
    scale(lateral_speed - speed_cap)
}

/// Cost proportional to how far `separation` exceeds `distanceMin`,
/// saturating at `distanceMax` (spec §4.2 "stretch tightening").
pub fn stretch_tightening_cost(separation: Distance, config: &StretchTighteningConfig) -> Cost {
    let (Some(min), Some(max)) = (config.distance_min, config.distance_max) else {
        return 0;
    };
    if separation <= min {
        return 0;
    }
    let fraction = ((separation - min) / (max - min).max(f32::EPSILON)).clamp(0.0, 1.0);
    scale(fraction)
}

/// Which facing posture a step belongs to, for the facing-percentage cap
/// (spec §4.2 "facing").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FacingDirection {
    Inward,
    Outward,
    Neutral,
}

/// Per-step cost for exceeding the configured inward/outward facing
/// percentage caps, evaluated incrementally against running counts carried
/// on the search node (spec §4.2 "facing").
pub const COST_FACING_CAP_EXCEEDED: Cost = 40;

pub fn facing_cost(
    direction: FacingDirection,
    inward_count: u32,
    outward_count: u32,
    steps_so_far: u32,
    config: &FacingConfig,
) -> Cost {
    let total = steps_so_far + 1;
    match direction {
        FacingDirection::Inward => {
            let pct = (inward_count + 1) as f32 / total as f32;
            match config.max_inward_percent {
                Some(cap) if pct > cap => COST_FACING_CAP_EXCEEDED,
                _ => 0,
            }
        }
        FacingDirection::Outward => {
            let pct = (outward_count + 1) as f32 / total as f32;
            match config.max_outward_percent {
                Some(cap) if pct > cap => COST_FACING_CAP_EXCEEDED,
                _ => 0,
            }
        }
        FacingDirection::Neutral => 0,
    }
}

/// L1 deviation of the realised per-lane histogram from the desired
/// distribution, accumulated incrementally (spec §4.2 "desired arrow
/// weights"). `histogram` and `target` must be the same length.
pub fn arrow_weight_deviation_cost(histogram: &[u32], target: &[f32]) -> Cost {
    let total: u32 = histogram.iter().sum();
    if total == 0 || histogram.len() != target.len() {
        return 0;
    }
    let deviation: f32 = histogram
        .iter()
        .zip(target)
        .map(|(&count, &weight)| ((count as f32 / total as f32) - weight).abs())
        .sum();
    scale(deviation)
}
