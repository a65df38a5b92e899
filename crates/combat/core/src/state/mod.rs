//! Mutable session state.
//!
//! [`CombatState`] is created once from a [`CombatSnapshot`] and afterwards
//! mutated only through [`CombatEngine`](crate::engine::CombatEngine). Once
//! `is_active` drops to false the engine refuses every further mutation.

mod log;
mod snapshot;
mod sync;
mod telemetry;

pub use log::CombatLog;
pub use snapshot::{BuffSnapshot, CombatSnapshot, SnapshotError};
pub use sync::ResourceSync;
pub use telemetry::{CombatTelemetry, HotStatus, ThornsStatus};

use crate::ability::CooldownMap;
use crate::combat::CombatResult;
use crate::effects::{ActiveEffect, EffectEngine};
use crate::env::{CombatEnv, MOB_DEXTERITY, RollContext, compute_seed};
use crate::regen::RegenAccumulator;
use crate::schedule::{AttackTimer, ticks_per_attack};
use crate::stats::ResourceMaximums;

/// Simulation time in master ticks.
pub type Tick = u64;

/// The two combatants, used to key rolls.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u32)]
pub enum Combatant {
    Player = 0,
    Mob = 1,
}

/// Live state of one combat session.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatState {
    pub character_health: u32,
    pub character_mana: u32,
    pub mob_health: u32,
    pub player_timer: AttackTimer,
    pub mob_timer: AttackTimer,
    pub log: CombatLog,
    pub is_active: bool,
    pub result: Option<CombatResult>,
    /// Master ticks elapsed since the session started.
    pub clock: Tick,
    pub effects: EffectEngine,
    pub cooldowns: CooldownMap,
    pub regen: RegenAccumulator,
    pub sync: ResourceSync,
    pub rng_seed: u64,
    pub rng_nonce: u64,
}

impl CombatState {
    /// Seeds a fresh session: pre-existing buffs, clamped resources, both
    /// attack thresholds and the opening log line.
    pub fn from_snapshot(snapshot: &CombatSnapshot, env: &CombatEnv<'_>, rng_seed: u64) -> Self {
        let config = env.config();
        let mut state = Self {
            character_health: 0,
            character_mana: 0,
            mob_health: env.context.mob.max_health,
            player_timer: AttackTimer::new(config.base_attack_ticks),
            mob_timer: AttackTimer::new(config.base_attack_ticks),
            log: CombatLog::new(),
            is_active: true,
            result: None,
            clock: 0,
            effects: EffectEngine::new(),
            cooldowns: CooldownMap::new(),
            regen: RegenAccumulator::default(),
            sync: ResourceSync::new(),
            rng_seed,
            rng_nonce: 0,
        };

        for buff in &snapshot.buffs {
            let ticks = config.ticks_for_secs(buff.remaining_secs);
            state
                .effects
                .apply(ActiveEffect::buff(buff.name.clone(), buff.stat, buff.magnitude, ticks, 0));
        }

        let max = state.maximums(env);
        state.character_health = snapshot.health.min(max.health);
        if state.sync.seed_mana() {
            state.character_mana = snapshot.mana.min(max.mana);
        }

        let player = state.draw_threshold(Combatant::Player, env);
        state.player_timer.reset(player);
        let mob = state.draw_threshold(Combatant::Mob, env);
        state.mob_timer.reset(mob);

        state
            .log
            .push(format!("You engage {} (level {}).", env.context.mob.name, env.context.mob.level));
        state
    }

    /// Seed for the next roll; every call consumes one nonce.
    pub fn next_seed(&mut self, actor: Combatant, context: RollContext) -> u64 {
        let seed = compute_seed(self.rng_seed, self.rng_nonce, actor as u32, context);
        self.rng_nonce += 1;
        seed
    }

    /// Draws a fresh attack threshold for `actor`.
    pub fn draw_threshold(&mut self, actor: Combatant, env: &CombatEnv<'_>) -> u32 {
        let seed = self.next_seed(actor, RollContext::Interval);
        let variance = env.rng.unit(seed);
        match actor {
            Combatant::Player => {
                let stats = env.context.character_stats(&self.effects, self.clock);
                ticks_per_attack(stats.dexterity, env.context.equipment.weapon_speed(), variance, env.config())
            }
            Combatant::Mob => ticks_per_attack(MOB_DEXTERITY, env.context.mob.speed(), variance, env.config()),
        }
    }

    /// Current effective resource maximums of the character.
    pub fn maximums(&self, env: &CombatEnv<'_>) -> ResourceMaximums {
        env.context
            .character_stats(&self.effects, self.clock)
            .maximums()
    }

    /// Clamps both resources into `[0, max]`. Returns true when anything moved.
    pub fn clamp_resources(&mut self, max: ResourceMaximums) -> bool {
        let health = self.character_health.min(max.health);
        let mana = self.character_mana.min(max.mana);
        let changed = health != self.character_health || mana != self.character_mana;
        self.character_health = health;
        self.character_mana = mana;
        changed
    }

    pub fn is_over(&self) -> bool {
        !self.is_active
    }
}
