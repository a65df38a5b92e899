//! Read-only session inputs.
//!
//! Everything the engine reads but never writes: the character's base stats
//! and equipment, the opposing mob, known abilities, the hotbar, tunables and
//! the RNG oracle. [`CombatEnv`] bundles borrowed views so the engine can be
//! driven without owning any of it.

mod equipment;
mod mob;
mod rng;

pub use equipment::{Equipment, EquipmentBuilder, Item, ItemSlot, UNARMED_DAMAGE};
pub use mob::{MOB_DEXTERITY, MobStats};
pub use rng::{FixedRng, PcgRng, RngOracle, RollContext, ScriptedRng, compute_seed};

use crate::ability::{AbilityBook, Hotbar};
use crate::config::CombatConfig;
use crate::state::Tick;
use crate::stats::{BonusSource, CombatantStats, EffectiveStats};

/// Static session data, fixed when the session starts.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatContext {
    pub character: CombatantStats,
    pub equipment: Equipment,
    pub mob: MobStats,
    pub abilities: AbilityBook,
    pub hotbar: Hotbar,
    pub config: CombatConfig,
}

impl CombatContext {
    /// Effective character stats given extra bonus sources (active effects).
    pub fn character_stats(&self, effects: &dyn BonusSource, now: Tick) -> EffectiveStats {
        EffectiveStats::compute(&self.character, &[&self.equipment, effects], now)
    }
}

/// Borrowed view handed to the engine on every call.
#[derive(Clone, Copy)]
pub struct CombatEnv<'a> {
    pub context: &'a CombatContext,
    pub rng: &'a dyn RngOracle,
}

impl<'a> CombatEnv<'a> {
    pub fn new(context: &'a CombatContext, rng: &'a dyn RngOracle) -> Self {
        Self { context, rng }
    }

    pub fn config(&self) -> &'a CombatConfig {
        &self.context.config
    }
}

impl std::fmt::Debug for CombatEnv<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CombatEnv")
            .field("context", self.context)
            .finish_non_exhaustive()
    }
}
