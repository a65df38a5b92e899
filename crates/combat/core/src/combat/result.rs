//! Attack and session outcomes.

use strum::Display;

/// Terminal outcome of a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CombatResult {
    Victory,
    Defeat,
}

/// Outcome of one resolved attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackOutcome {
    Miss,
    Hit { damage: u32 },
}

impl AttackOutcome {
    pub fn damage(&self) -> u32 {
        match self {
            Self::Miss => 0,
            Self::Hit { damage } => *damage,
        }
    }
}
