//! Per-actor attack scheduling.
//!
//! Each combatant owns an [`AttackTimer`] advanced by exactly one on every
//! master tick. When the counter reaches the threshold the owner attacks, the
//! counter resets and a fresh threshold is drawn. The two timers never touch
//! each other.

use crate::config::CombatConfig;

/// Dexterity scaling of attack speed: `1 + (dex − 10) × 0.05`.
pub fn dexterity_modifier(dexterity: i32) -> f64 {
    1.0 + (dexterity - 10) as f64 * 0.05
}

/// Smallest divisor accepted before rounding, so absurd negative dexterity or
/// zero speed still yields a finite interval.
const MIN_RATE: f64 = 0.05;

/// Attack interval in ticks before variance.
///
/// `round(base_attack_ticks / (dex_modifier × speed_modifier))`
pub fn base_interval(dexterity: i32, speed: f64, config: &CombatConfig) -> u32 {
    let rate = (dexterity_modifier(dexterity) * speed).max(MIN_RATE);
    (config.base_attack_ticks as f64 / rate).round() as u32
}

/// Attack interval in ticks with variance applied.
///
/// `variance_unit` is a uniform draw in `[0, 1)` mapped onto
/// `±attack_variance_percent`; the result never drops below
/// `min_attack_ticks`.
pub fn ticks_per_attack(dexterity: i32, speed: f64, variance_unit: f64, config: &CombatConfig) -> u32 {
    let base = base_interval(dexterity, speed, config) as f64;
    let spread = config.attack_variance_percent as f64 / 100.0;
    let factor = 1.0 + (variance_unit.clamp(0.0, 1.0) * 2.0 - 1.0) * spread;
    ((base * factor).round() as u32).max(config.min_attack_ticks)
}

/// Tick counter and threshold of one combatant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackTimer {
    pub ticks: u32,
    pub threshold: u32,
}

impl AttackTimer {
    pub fn new(threshold: u32) -> Self {
        Self {
            ticks: 0,
            threshold: threshold.max(1),
        }
    }

    /// Advances by one tick; true when the owner should attack now.
    pub fn advance(&mut self) -> bool {
        self.ticks += 1;
        self.ticks >= self.threshold
    }

    /// Resets the counter and installs a freshly drawn threshold.
    pub fn reset(&mut self, threshold: u32) {
        self.ticks = 0;
        self.threshold = threshold.max(1);
    }

    /// Ticks left until the next attack.
    pub fn remaining(&self) -> u32 {
        self.threshold.saturating_sub(self.ticks)
    }
}
