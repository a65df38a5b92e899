//! Deterministic real-time combat rules for one player against one mob.
//!
//! `combat-core` owns the rules (stat aggregation, effects, attack scheduling,
//! regeneration, abilities, hit and damage resolution) as pure synchronous
//! code. Time only advances through [`engine::CombatEngine::tick`]; timers,
//! host callbacks and persistence belong to the runtime crate.
pub mod ability;
pub mod combat;
pub mod config;
pub mod effects;
pub mod engine;
pub mod env;
pub mod error;
pub mod regen;
pub mod schedule;
pub mod state;
pub mod stats;

pub use ability::{
    AbilityBook, AbilityCategory, AbilityDefinition, AbilityError, CooldownMap, Hotbar,
    HotbarAction, HotbarBinding, Usability, slot_for_key,
};
pub use combat::{AttackOutcome, CombatResult};
pub use config::{CombatConfig, HitChanceParams, RestingRegenParams};
pub use effects::{ActiveEffect, EffectCategory, EffectEngine, EffectKind, EffectSpec};
pub use engine::{AbilityOutcome, CombatEngine, ConsumableRestore, TickReport};
pub use env::{
    CombatContext, CombatEnv, Equipment, FixedRng, Item, ItemSlot, MobStats, PcgRng, RngOracle,
    ScriptedRng,
};
pub use error::{CombatError, ErrorSeverity};
pub use state::{
    BuffSnapshot, CombatLog, CombatSnapshot, CombatState, CombatTelemetry, Combatant,
    SnapshotError, Tick,
};
pub use stats::{CombatantStats, EffectiveStats, ResourceKind, ResourceMaximums, StatKind};
