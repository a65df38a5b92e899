//! Health and mana regeneration formulas.
//!
//! Two regimes share only the formula shape
//! `max(1, floor(max × rate) + floor((stat − 10) × factor))`:
//!
//! - **In combat**: an accumulator advanced by the master tick fires every
//!   `regen_interval_ticks` (10 simulated seconds) with low rates.
//! - **Resting**: independent one-second timers owned by the host, with
//!   higher rates (see `combat-runtime`'s resting regeneration worker).

use crate::config::RestingRegenParams;

const COMBAT_HEALTH_RATE: f64 = 0.005;
const COMBAT_HEALTH_CON_FACTOR: f64 = 0.2;
const COMBAT_MANA_RATE: f64 = 0.01;
const COMBAT_MANA_WIS_FACTOR: f64 = 0.3;

fn regen_amount(max: u32, rate: f64, stat: i32, factor: f64) -> u32 {
    let from_max = (max as f64 * rate).floor() as i64;
    let from_stat = ((stat - 10) as f64 * factor).floor() as i64;
    (from_max + from_stat).max(1) as u32
}

/// In-combat health regeneration per firing.
pub fn combat_health_regen(max_health: u32, constitution: i32) -> u32 {
    regen_amount(max_health, COMBAT_HEALTH_RATE, constitution, COMBAT_HEALTH_CON_FACTOR)
}

/// In-combat mana regeneration per firing.
pub fn combat_mana_regen(max_mana: u32, wisdom: i32) -> u32 {
    regen_amount(max_mana, COMBAT_MANA_RATE, wisdom, COMBAT_MANA_WIS_FACTOR)
}

/// Resting health regeneration per one-second timer firing.
pub fn resting_health_regen(max_health: u32, constitution: i32, params: &RestingRegenParams) -> u32 {
    regen_amount(max_health, params.health_rate, constitution, params.constitution_factor)
}

/// Resting mana regeneration per one-second timer firing.
pub fn resting_mana_regen(max_mana: u32, wisdom: i32, params: &RestingRegenParams) -> u32 {
    regen_amount(max_mana, params.mana_rate, wisdom, params.wisdom_factor)
}

/// Counts master ticks toward the next in-combat regeneration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegenAccumulator {
    pub ticks: u32,
}

impl RegenAccumulator {
    /// Advances one tick; true (and resets) every `interval` ticks.
    pub fn advance(&mut self, interval: u32) -> bool {
        self.ticks += 1;
        if self.ticks >= interval.max(1) {
            self.ticks = 0;
            return true;
        }
        false
    }
}
