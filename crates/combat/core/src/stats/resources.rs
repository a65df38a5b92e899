//! Resource maximums.
//!
//! Formulas:
//! - Health_max = 100 + Level × 20 + (CON − 10) × 8
//! - Mana_max   = 100 + Level × 20 + (INT − 10) × 5
//!
//! Current values live in the combat state; only maximums are derived here.

use super::aggregate::EffectiveStats;

/// Resource pools tracked during a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResourceKind {
    Health,
    Mana,
}

/// Health points gained per effective constitution point (maximum only).
pub const HEALTH_PER_CONSTITUTION: i32 = 8;
/// Mana points gained per effective intelligence point.
pub const MANA_PER_INTELLIGENCE: i32 = 5;

/// Maximum health for a level and effective constitution.
pub fn max_health(level: i32, constitution: i32) -> u32 {
    (100 + level * 20 + (constitution - 10) * HEALTH_PER_CONSTITUTION).max(1) as u32
}

/// Maximum mana for a level and effective intelligence.
pub fn max_mana(level: i32, intelligence: i32) -> u32 {
    (100 + level * 20 + (intelligence - 10) * MANA_PER_INTELLIGENCE).max(0) as u32
}

/// Maximum resource values derived from effective stats.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceMaximums {
    pub health: u32,
    pub mana: u32,
}

impl ResourceMaximums {
    pub fn from_stats(stats: &EffectiveStats) -> Self {
        Self {
            health: max_health(stats.level, stats.constitution),
            mana: max_mana(stats.level, stats.intelligence),
        }
    }

    pub fn get(&self, resource: ResourceKind) -> u32 {
        match resource {
            ResourceKind::Health => self.health,
            ResourceKind::Mana => self.mana,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baseline_maximums() {
        // 100 + 5 × 20 = 200
        assert_eq!(max_health(5, 10), 200);
        assert_eq!(max_mana(5, 10), 200);
    }

    #[test]
    fn constitution_scales_health_by_eight() {
        assert_eq!(max_health(1, 15) - max_health(1, 10), 40);
    }

    #[test]
    fn intelligence_scales_mana_by_five() {
        assert_eq!(max_mana(1, 14) - max_mana(1, 10), 20);
    }

    #[test]
    fn health_never_drops_below_one() {
        assert_eq!(max_health(0, -50), 1);
        assert_eq!(max_mana(0, -50), 0);
    }
}
