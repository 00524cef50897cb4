use crate::*;

/// An index into a [`Pad`]'s arrow array. Newtype over `u8` so lane
/// arithmetic never accidentally mixes with unrelated counts.
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct Lane(pub u8);

impl Lane {
    pub const fn new(index: u8) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<u8> for Lane {
    fn from(n: u8) -> Self {
        Lane(n)
    }
}

impl std::fmt::Display for Lane {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "lane{}", self.0)
    }
}

/// The state of an arrow under a given foot (spec §3).
///
/// Nodes in the step graph never represent feet "in the air" — every arrow
/// a foot references is either freshly tapped and now resting, held down,
/// or lifted (a `Lift`-annotated tap that releases immediately).
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ArrowState {
    #[default]
    Resting,
    Held,
    Lifted,
}
