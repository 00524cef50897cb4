use crate::*;

/// One tier of equally-preferred starting positions (spec §3: "tier 0 must
/// contain exactly one pair; later tiers may list multiple equally
/// preferred alternatives").
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StartingPosition {
    pub left: Lane,
    pub right: Lane,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct StartingPositions {
    tiers: Vec<Vec<StartingPosition>>,
}

impl StartingPositions {
    pub fn tiers(&self) -> &[Vec<StartingPosition>] {
        &self.tiers
    }

    pub fn tier_zero(&self) -> StartingPosition {
        self.tiers[0][0]
    }

    pub(crate) fn try_from_raw(raw: &[Vec<RawStartingPosition>], num_arrows: usize) -> CoreResult<Self> {
        let mut diagnostics = ConfigDiagnostics::new();
        if raw.is_empty() || raw[0].len() != 1 {
            diagnostics.push("tier 0 must contain exactly one starting position");
        }
        for (tier, positions) in raw.iter().enumerate() {
            for position in positions {
                if position.left_lane.index() >= num_arrows || position.right_lane.index() >= num_arrows {
                    diagnostics.push(format!("starting position in tier {tier} references an out-of-range lane"));
                }
            }
        }
        diagnostics.into_result()?;

        let tiers = raw
            .iter()
            .map(|positions| {
                positions
                    .iter()
                    .map(|p| StartingPosition { left: p.left_lane, right: p.right_lane })
                    .collect()
            })
            .collect();
        Ok(Self { tiers })
    }
}
