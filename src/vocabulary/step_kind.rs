use crate::*;

/// The posture family a step kind belongs to (spec §3).
///
/// Ordered `Normal < CrossoverFront < CrossoverBehind < InvertFront <
/// InvertBack < Stretch`, matching the expressed-search tie-break
/// preference (spec §4.3: "lower orientation tier") and the cost ordering
/// pinned by spec §8 property 6 (`... > invert > crossover > ... >
/// same-arrow`).
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub enum PostureFamily {
    #[default]
    Normal,
    CrossoverFront,
    CrossoverBehind,
    InvertFront,
    InvertBack,
    Stretch,
}

impl PostureFamily {
    pub const fn is_crossover(self) -> bool {
        matches!(self, PostureFamily::CrossoverFront | PostureFamily::CrossoverBehind)
    }

    pub const fn is_invert(self) -> bool {
        matches!(self, PostureFamily::InvertFront | PostureFamily::InvertBack)
    }

    pub const fn is_stretch(self) -> bool {
        matches!(self, PostureFamily::Stretch)
    }

    pub const fn resulting_orientation(self, current: BodyOrientation) -> BodyOrientation {
        match self {
            PostureFamily::InvertFront => BodyOrientation::InvertedClockwise,
            PostureFamily::InvertBack => BodyOrientation::InvertedCounterClockwise,
            // a Normal/Crossover/Stretch step does not itself cross the
            // invert threshold; orientation only changes via an Invert-*
            // family step (spec §4.1 invariant: "monotonically... only via
            // a step kind in the appropriate family")
            _ => current,
        }
    }
}

/// How a single lane relates to the foot's previous position on it (spec
/// §3 "lane relation").
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub enum LaneRelation {
    SameArrow,
    NewArrow,
    FootSwap,
}

/// The bracket shape of a step kind (spec §3 "bracket form").
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub enum BracketForm {
    /// One foot, one arrow.
    Single(LaneRelation),
    /// One foot, two arrows: heel and toe act independently.
    TwoArrow {
        heel: LaneRelation,
        toe: LaneRelation,
    },
    /// One foot, two arrows, but only one portion moves — the other stays
    /// resting on its current lane (spec §4.1: "the non-acting portion
    /// retains its resting lane").
    OneArrow {
        portion: FootPortion,
        relation: LaneRelation,
    },
}

/// One member of the closed step-kind enumeration (spec §3): the
/// cross-product of posture family and bracket form. Represented as a
/// composite struct rather than a hand-listed flat enum — per spec §9
/// ("tagged enum with a parallel lookup table of predicate bits"), the two
/// fields together *are* the tag, and [`StepKind::all`] enumerates the
/// closed, finite space explicitly rather than leaving it implicit.
///
/// `PartialOrd`/`Ord` derive field-by-field (posture first, then form),
/// giving the "earlier-sorted step kind" tie-break from spec §4.3.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct StepKind {
    pub posture: PostureFamily,
    pub form: BracketForm,
}

impl StepKind {
    pub const fn new(posture: PostureFamily, form: BracketForm) -> Self {
        Self { posture, form }
    }

    pub const fn is_bracket(&self) -> bool {
        matches!(self.form, BracketForm::TwoArrow { .. } | BracketForm::OneArrow { .. })
    }

    pub fn is_footswap(&self, portion: FootPortion) -> bool {
        match self.form {
            BracketForm::Single(rel) => portion == FootPortion::Heel && rel == LaneRelation::FootSwap,
            BracketForm::TwoArrow { heel, toe } => match portion {
                FootPortion::Heel => heel == LaneRelation::FootSwap,
                FootPortion::Toe => toe == LaneRelation::FootSwap,
            },
            BracketForm::OneArrow { portion: acting, relation } => {
                acting == portion && relation == LaneRelation::FootSwap
            }
        }
    }

    pub const fn is_crossover(&self) -> bool {
        self.posture.is_crossover()
    }

    pub const fn is_invert(&self) -> bool {
        self.posture.is_invert()
    }

    pub const fn is_stretch(&self) -> bool {
        self.posture.is_stretch()
    }

    /// Whether this step is a same-arrow/alternating-new-arrow step with no
    /// other complicating factor — the unambiguous, zero-cost baseline from
    /// spec §4.2 and §8 property 6.
    pub fn is_unambiguous(&self) -> bool {
        !self.is_bracket()
            && self.posture == PostureFamily::Normal
            && matches!(self.form, BracketForm::Single(LaneRelation::SameArrow | LaneRelation::NewArrow))
    }

    /// Enumerates the closed step-kind space (spec §3: "approximately 60
    /// members"). Bracket forms are restricted to the `Normal`,
    /// `CrossoverFront` and `CrossoverBehind` postures — brackets performed
    /// while inverted or stretched are vanishingly rare on real pads and
    /// are excluded as a deliberate scope decision (see DESIGN.md). This
    /// yields 6*3 (single) + 3*9 (two-arrow) + 3*2*3 (one-arrow) = 63
    /// kinds.
    pub fn all() -> Vec<StepKind> {
        let mut kinds = Vec::with_capacity(64);
        for &posture in &[
            PostureFamily::Normal,
            PostureFamily::CrossoverFront,
            PostureFamily::CrossoverBehind,
            PostureFamily::InvertFront,
            PostureFamily::InvertBack,
            PostureFamily::Stretch,
        ] {
            for &relation in &[LaneRelation::SameArrow, LaneRelation::NewArrow, LaneRelation::FootSwap] {
                kinds.push(StepKind::new(posture, BracketForm::Single(relation)));
            }
        }
        for &posture in &[
            PostureFamily::Normal,
            PostureFamily::CrossoverFront,
            PostureFamily::CrossoverBehind,
        ] {
            for &heel in &[LaneRelation::SameArrow, LaneRelation::NewArrow, LaneRelation::FootSwap] {
                for &toe in &[LaneRelation::SameArrow, LaneRelation::NewArrow, LaneRelation::FootSwap] {
                    kinds.push(StepKind::new(posture, BracketForm::TwoArrow { heel, toe }));
                }
            }
            for portion in FootPortion::all() {
                for &relation in &[LaneRelation::SameArrow, LaneRelation::NewArrow, LaneRelation::FootSwap] {
                    kinds.push(StepKind::new(posture, BracketForm::OneArrow { portion, relation }));
                }
            }
        }
        kinds.sort();
        kinds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enumeration_is_closed_and_sized_approximately_sixty() {
        let all = StepKind::all();
        assert_eq!(all.len(), 63);
        let mut dedup = all.clone();
        dedup.dedup();
        assert_eq!(dedup.len(), all.len(), "no duplicate step kinds");
    }

    #[test]
    fn same_arrow_and_alternating_new_arrow_are_unambiguous() {
        let same = StepKind::new(PostureFamily::Normal, BracketForm::Single(LaneRelation::SameArrow));
        let new = StepKind::new(PostureFamily::Normal, BracketForm::Single(LaneRelation::NewArrow));
        assert!(same.is_unambiguous());
        assert!(new.is_unambiguous());
    }

    #[test]
    fn crossover_and_invert_are_not_unambiguous() {
        let crossover = StepKind::new(PostureFamily::CrossoverFront, BracketForm::Single(LaneRelation::NewArrow));
        let invert = StepKind::new(PostureFamily::InvertFront, BracketForm::Single(LaneRelation::NewArrow));
        assert!(!crossover.is_unambiguous());
        assert!(!invert.is_unambiguous());
        assert!(crossover.is_crossover());
        assert!(invert.is_invert());
    }

    #[test]
    fn bracket_predicate_covers_both_bracket_forms() {
        let two_arrow = StepKind::new(
            PostureFamily::Normal,
            BracketForm::TwoArrow { heel: LaneRelation::NewArrow, toe: LaneRelation::SameArrow },
        );
        let one_arrow = StepKind::new(
            PostureFamily::Normal,
            BracketForm::OneArrow { portion: FootPortion::Toe, relation: LaneRelation::NewArrow },
        );
        assert!(two_arrow.is_bracket());
        assert!(one_arrow.is_bracket());
    }

    #[test]
    fn tie_break_ordering_prefers_normal_over_crossover_over_invert() {
        let normal = StepKind::new(PostureFamily::Normal, BracketForm::Single(LaneRelation::NewArrow));
        let crossover = StepKind::new(PostureFamily::CrossoverFront, BracketForm::Single(LaneRelation::NewArrow));
        let invert = StepKind::new(PostureFamily::InvertFront, BracketForm::Single(LaneRelation::NewArrow));
        assert!(normal < crossover);
        assert!(crossover < invert);
    }
}
