//! Effective stat computation.
//!
//! `Effective = Base + Σ equipment bonuses + Σ unexpired effect bonuses`
//!
//! There is no cache: callers recompute on every read so that an effect
//! expiring at tick `t` is invisible from tick `t` onwards.

use strum::IntoEnumIterator;

use super::attributes::{CombatantStats, StatKind};
use super::resources::ResourceMaximums;
use crate::state::Tick;

/// Anything that contributes additive stat bonuses.
///
/// Implemented by equipment (time-independent) and by effect collections
/// (only unexpired entries count at `now`).
pub trait BonusSource {
    /// Sum of additive bonuses this source grants to `stat` at tick `now`.
    fn bonus(&self, stat: StatKind, now: Tick) -> i32;
}

/// Effective value of one stat: base plus every source's bonus.
pub fn effective(
    stat: StatKind,
    base: &CombatantStats,
    sources: &[&dyn BonusSource],
    now: Tick,
) -> i32 {
    let bonus: i32 = sources.iter().map(|source| source.bonus(stat, now)).sum();
    base.get(stat) + bonus
}

/// All seven effective attributes plus level, computed in one pass.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectiveStats {
    pub strength: i32,
    pub dexterity: i32,
    pub constitution: i32,
    pub intelligence: i32,
    pub wisdom: i32,
    pub charisma: i32,
    pub evasiveness: i32,
    pub level: i32,
}

impl EffectiveStats {
    pub fn compute(base: &CombatantStats, sources: &[&dyn BonusSource], now: Tick) -> Self {
        let mut stats = Self::from_base(base);
        for stat in StatKind::iter() {
            let value = effective(stat, base, sources, now);
            match stat {
                StatKind::Strength => stats.strength = value,
                StatKind::Dexterity => stats.dexterity = value,
                StatKind::Constitution => stats.constitution = value,
                StatKind::Intelligence => stats.intelligence = value,
                StatKind::Wisdom => stats.wisdom = value,
                StatKind::Charisma => stats.charisma = value,
                StatKind::Evasiveness => stats.evasiveness = value,
            }
        }
        stats
    }

    /// Effective stats with no bonus sources.
    pub fn from_base(base: &CombatantStats) -> Self {
        Self {
            strength: base.strength,
            dexterity: base.dexterity,
            constitution: base.constitution,
            intelligence: base.intelligence,
            wisdom: base.wisdom,
            charisma: base.charisma,
            evasiveness: base.evasiveness,
            level: base.level,
        }
    }

    pub fn get(&self, stat: StatKind) -> i32 {
        match stat {
            StatKind::Strength => self.strength,
            StatKind::Dexterity => self.dexterity,
            StatKind::Constitution => self.constitution,
            StatKind::Intelligence => self.intelligence,
            StatKind::Wisdom => self.wisdom,
            StatKind::Charisma => self.charisma,
            StatKind::Evasiveness => self.evasiveness,
        }
    }

    pub fn maximums(&self) -> ResourceMaximums {
        ResourceMaximums::from_stats(self)
    }
}
