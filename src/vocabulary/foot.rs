/// Which foot performs an action.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub enum Foot {
    Left,
    Right,
}

impl Foot {
    pub const fn all() -> [Foot; 2] {
        [Foot::Left, Foot::Right]
    }

    pub const fn other(self) -> Foot {
        match self {
            Foot::Left => Foot::Right,
            Foot::Right => Foot::Left,
        }
    }
}

impl std::fmt::Display for Foot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Foot::Left => write!(f, "L"),
            Foot::Right => write!(f, "R"),
        }
    }
}

/// Which part of a foot is on an arrow. Single (non-bracket) steps always
/// use `Heel` as their portion (spec §3: "single steps use Default = Heel").
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub enum FootPortion {
    #[default]
    Heel,
    Toe,
}

impl FootPortion {
    pub const fn all() -> [FootPortion; 2] {
        [FootPortion::Heel, FootPortion::Toe]
    }
}

impl std::fmt::Display for FootPortion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FootPortion::Heel => write!(f, "heel"),
            FootPortion::Toe => write!(f, "toe"),
        }
    }
}

/// What a foot portion does to an arrow in a single graph-link entry.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum FootAction {
    Tap,
    Hold,
    Release,
}

/// The body's rotation relative to the pad (spec §3). Ordered so that
/// `Normal < InvertedClockwise < InvertedCounterClockwise` — the tie-break
/// preference from spec §4.3 ("lower orientation tier").
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub enum BodyOrientation {
    #[default]
    Normal,
    InvertedClockwise,
    InvertedCounterClockwise,
}

/// Chart-level annotation carried alongside a step, independent of its
/// kinematic classification (spec §3).
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum InstanceStepType {
    #[default]
    Default,
    Roll,
    Fake,
    Lift,
}
