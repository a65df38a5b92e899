//! Display-oriented view of the live session.

use super::{CombatState, Tick};

/// An active heal-over-time entry.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HotStatus {
    pub name: String,
    pub per_tick: i32,
    pub ticks_remaining: u32,
}

/// The active thorns entry.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ThornsStatus {
    pub name: String,
    pub reflect_percent: u32,
    pub remaining_ticks: Tick,
}

/// Live HOT list, thorns state and mob health.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatTelemetry {
    pub clock: Tick,
    pub hots: Vec<HotStatus>,
    pub thorns: Option<ThornsStatus>,
    pub mob_health: u32,
    pub mob_max_health: u32,
}

impl CombatState {
    pub fn telemetry(&self, mob_max_health: u32) -> CombatTelemetry {
        let now = self.clock;
        CombatTelemetry {
            clock: now,
            hots: self
                .effects
                .hots
                .iter()
                .map(|hot| HotStatus {
                    name: hot.name.clone(),
                    per_tick: hot.magnitude,
                    ticks_remaining: hot.ticks_remaining,
                })
                .collect(),
            thorns: self
                .effects
                .thorns
                .peek()
                .filter(|thorns| thorns.is_active(now))
                .map(|thorns| ThornsStatus {
                    name: thorns.name.clone(),
                    reflect_percent: thorns.reflect_percent,
                    remaining_ticks: thorns.expires_at.saturating_sub(now),
                }),
            mob_health: self.mob_health,
            mob_max_health,
        }
    }
}
