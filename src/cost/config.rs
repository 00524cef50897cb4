use crate::*;
use std::collections::HashMap;

/// Which bracket-parsing policy the expressed search applies (spec §4.3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum BracketParsingMethod {
    NoBrackets,
    Balanced,
    Aggressive,
}

/// Whether the bracket-parsing method is fixed or estimated from the chart
/// itself (spec §4.3 "bracket-parsing determination").
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum BracketParsingDetermination {
    UseDefault,
    ChooseDynamically,
}

/// Configuration for the expressed-chart search (spec §6).
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ExpressedChartConfig {
    pub default_bracket_parsing_method: BracketParsingMethod,
    pub bracket_parsing_determination: BracketParsingDetermination,
    pub min_level_for_brackets: i32,
    pub use_aggressive_brackets_when_more_simultaneous_notes_than_can_be_covered_without_brackets: bool,
    pub balanced_brackets_per_minute_for_aggressive_brackets: f32,
    pub balanced_brackets_per_minute_for_no_brackets: f32,
}

impl ExpressedChartConfig {
    pub fn validate(&self) -> ConfigDiagnostics {
        let mut diagnostics = ConfigDiagnostics::new();
        if self.min_level_for_brackets < 0 {
            diagnostics.push("minLevelForBrackets must not be negative");
        }
        if self.balanced_brackets_per_minute_for_aggressive_brackets < 0.0 {
            diagnostics.push("balancedBracketsPerMinuteForAggressiveBrackets must not be negative");
        }
        if self.balanced_brackets_per_minute_for_no_brackets < 0.0 {
            diagnostics.push("balancedBracketsPerMinuteForNoBrackets must not be negative");
        }
        if self.balanced_brackets_per_minute_for_aggressive_brackets < self.balanced_brackets_per_minute_for_no_brackets
        {
            diagnostics.push(
                "balancedBracketsPerMinuteForAggressiveBrackets must not be below balancedBracketsPerMinuteForNoBrackets",
            );
        }
        diagnostics
    }
}

/// One leaf of an override-mergeable config: `None` is the sentinel "unset,
/// inherit from parent" value (spec §4.2, §9 "Override-merge semantics" —
/// we use `Option::None` rather than the numeric `-1` sentinel, an
/// explicitly allowed equivalent representation).
fn merge_leaf<T: Copy>(child: Option<T>, parent: Option<T>) -> Option<T> {
    child.or(parent)
}

#[derive(Debug, Clone, Copy, Default, serde::Serialize, serde::Deserialize)]
pub struct StepTighteningConfig {
    pub min_time: Option<Seconds>,
    pub max_time: Option<Seconds>,
}

impl StepTighteningConfig {
    pub fn merge_from(&self, parent: &Self) -> Self {
        Self {
            min_time: merge_leaf(self.min_time, parent.min_time),
            max_time: merge_leaf(self.max_time, parent.max_time),
        }
    }

    pub fn validate(&self, diagnostics: &mut ConfigDiagnostics) {
        if let Some(min) = self.min_time {
            if min < 0.0 {
                diagnostics.push("stepTightening.minTime must not be negative");
            }
        }
        if let (Some(min), Some(max)) = (self.min_time, self.max_time) {
            if min > max {
                diagnostics.push("stepTightening: minTime must not exceed maxTime");
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Default, serde::Serialize, serde::Deserialize)]
pub struct LateralTighteningConfig {
    pub pattern_length: Option<u32>,
    pub speed: Option<Distance>,
    pub absolute_nps: Option<f32>,
    pub relative_nps: Option<f32>,
}

impl LateralTighteningConfig {
    pub fn merge_from(&self, parent: &Self) -> Self {
        Self {
            pattern_length: merge_leaf(self.pattern_length, parent.pattern_length),
            speed: merge_leaf(self.speed, parent.speed),
            absolute_nps: merge_leaf(self.absolute_nps, parent.absolute_nps),
            relative_nps: merge_leaf(self.relative_nps, parent.relative_nps),
        }
    }

    pub fn validate(&self, diagnostics: &mut ConfigDiagnostics) {
        if self.speed.is_some_and(|v| v < 0.0) {
            diagnostics.push("lateralTightening.speed must not be negative");
        }
        if self.absolute_nps.is_some_and(|v| v < 0.0) {
            diagnostics.push("lateralTightening.absoluteNPS must not be negative");
        }
        if self.relative_nps.is_some_and(|v| v < 0.0) {
            diagnostics.push("lateralTightening.relativeNPS must not be negative");
        }
    }
}

#[derive(Debug, Clone, Copy, Default, serde::Serialize, serde::Deserialize)]
pub struct StretchTighteningConfig {
    pub distance_min: Option<Distance>,
    pub distance_max: Option<Distance>,
}

impl StretchTighteningConfig {
    pub fn merge_from(&self, parent: &Self) -> Self {
        Self {
            distance_min: merge_leaf(self.distance_min, parent.distance_min),
            distance_max: merge_leaf(self.distance_max, parent.distance_max),
        }
    }

    pub fn validate(&self, diagnostics: &mut ConfigDiagnostics) {
        if let (Some(min), Some(max)) = (self.distance_min, self.distance_max) {
            if min > max {
                diagnostics.push("stretchTightening: distanceMin must not exceed distanceMax");
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Default, serde::Serialize, serde::Deserialize)]
pub struct FacingConfig {
    pub max_inward_percent: Option<f32>,
    pub max_outward_percent: Option<f32>,
}

impl FacingConfig {
    pub fn merge_from(&self, parent: &Self) -> Self {
        Self {
            max_inward_percent: merge_leaf(self.max_inward_percent, parent.max_inward_percent),
            max_outward_percent: merge_leaf(self.max_outward_percent, parent.max_outward_percent),
        }
    }

    pub fn validate(&self, diagnostics: &mut ConfigDiagnostics) {
        for (label, value) in [("maxInwardPercent", self.max_inward_percent), ("maxOutwardPercent", self.max_outward_percent)]
        {
            if let Some(v) = value {
                if !(0.0..=1.0).contains(&v) {
                    diagnostics.push(format!("facing.{label} must be within [0,1]"));
                }
            }
        }
    }
}

/// Configuration for the performed-chart search (spec §6): nested shaping
/// thresholds plus a per-chart-type desired arrow-weight distribution.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct PerformedChartConfig {
    pub facing: FacingConfig,
    pub lateral_tightening: LateralTighteningConfig,
    pub step_tightening: StepTighteningConfig,
    pub stretch_tightening: StretchTighteningConfig,
    pub arrow_weights: HashMap<String, Vec<f32>>,
}

impl PerformedChartConfig {
    /// Override-merges every leaf against `parent`; `arrow_weights` merges
    /// per chart-type key, child entries winning (spec §8 property 7 —
    /// applying this twice against the same parent is idempotent since
    /// `Option::or` and hash-map insertion are themselves idempotent).
    pub fn merge_from(&self, parent: &Self) -> Self {
        let mut arrow_weights = parent.arrow_weights.clone();
        arrow_weights.extend(self.arrow_weights.iter().map(|(k, v)| (k.clone(), v.clone())));
        Self {
            facing: self.facing.merge_from(&parent.facing),
            lateral_tightening: self.lateral_tightening.merge_from(&parent.lateral_tightening),
            step_tightening: self.step_tightening.merge_from(&parent.step_tightening),
            stretch_tightening: self.stretch_tightening.merge_from(&parent.stretch_tightening),
            arrow_weights,
        }
    }

    /// Validates the shaping thresholds plus every present `arrowWeights`
    /// entry, and additionally requires an entry for each of
    /// `required_chart_types` (spec §7 "missing arrowWeights for chart
    /// type"): a search run for a chart type absent from `arrow_weights`
    /// must surface `ConfigInvalid`, not silently fall back to no
    /// weighting.
    pub fn validate(&self, required_chart_types: &[&str]) -> ConfigDiagnostics {
        let mut diagnostics = ConfigDiagnostics::new();
        self.facing.validate(&mut diagnostics);
        self.lateral_tightening.validate(&mut diagnostics);
        self.step_tightening.validate(&mut diagnostics);
        self.stretch_tightening.validate(&mut diagnostics);
        for (chart_type, weights) in &self.arrow_weights {
            if weights.iter().any(|&w| w < 0.0) {
                diagnostics.push(format!("arrowWeights[{chart_type}] contains a negative weight"));
            }
            let sum: f32 = weights.iter().sum();
            if weights.is_empty() || (sum - 1.0).abs() > 1e-3 {
                diagnostics.push(format!("arrowWeights[{chart_type}] must sum to 1.0, got {sum}"));
            }
        }
        for &chart_type in required_chart_types {
            if !self.arrow_weights.contains_key(chart_type) {
                diagnostics.push(format!("arrowWeights is missing a required entry for chart type '{chart_type}'"));
            }
        }
        diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_merge_inherits_only_unset_leaves() {
        let parent = StepTighteningConfig { min_time: Some(0.1), max_time: Some(0.4) };
        let child = StepTighteningConfig { min_time: Some(0.2), max_time: None };
        let merged = child.merge_from(&parent);
        assert_eq!(merged.min_time, Some(0.2));
        assert_eq!(merged.max_time, Some(0.4));
    }

    #[test]
    fn merge_is_idempotent() {
        let parent = PerformedChartConfig {
            step_tightening: StepTighteningConfig { min_time: Some(0.1), max_time: Some(0.4) },
            ..Default::default()
        };
        let child = PerformedChartConfig {
            step_tightening: StepTighteningConfig { min_time: None, max_time: Some(0.3) },
            ..Default::default()
        };
        let once = child.merge_from(&parent);
        let twice = once.merge_from(&parent);
        assert_eq!(once.step_tightening.min_time, twice.step_tightening.min_time);
        assert_eq!(once.step_tightening.max_time, twice.step_tightening.max_time);
    }

    #[test]
    fn inverted_time_range_is_rejected() {
        let mut diagnostics = ConfigDiagnostics::new();
        StepTighteningConfig { min_time: Some(0.5), max_time: Some(0.1) }.validate(&mut diagnostics);
        assert!(!diagnostics.is_empty());
    }

    #[test]
    fn arrow_weights_must_sum_to_one() {
        let mut config = PerformedChartConfig::default();
        config.arrow_weights.insert("single".to_string(), vec![0.3, 0.3, 0.3, 0.3]);
        assert!(!config.validate(&[]).is_empty());
        config.arrow_weights.insert("single".to_string(), vec![0.25, 0.25, 0.25, 0.25]);
        assert!(config.validate(&[]).is_empty());
    }

    #[test]
    fn missing_arrow_weights_for_a_required_chart_type_is_rejected() {
        let mut config = PerformedChartConfig::default();
        config.arrow_weights.insert("single".to_string(), vec![0.25, 0.25, 0.25, 0.25]);
        assert!(config.validate(&["single"]).is_empty());
        assert!(!config.validate(&["single", "double"]).is_empty());
    }
}
