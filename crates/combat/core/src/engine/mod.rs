//! The combat reducer.
//!
//! [`CombatEngine`] borrows a [`CombatState`] and is the only code that
//! mutates it. Every entry point returns a [`TickReport`] describing what
//! changed so the owning runtime can notify the host; the engine itself never
//! performs I/O and never reads a clock.
//!
//! Entry points:
//! - [`tick`](CombatEngine::tick): one master tick (timers, effects, regen, attacks)
//! - [`use_ability`](CombatEngine::use_ability): discrete player invocation
//! - [`tick_cooldowns`](CombatEngine::tick_cooldowns): one-second cooldown countdown
//! - [`apply_consumable`](CombatEngine::apply_consumable): host-resolved consumable
//! - [`accept_external`](CombatEngine::accept_external): external health update
//! - [`stop`](CombatEngine::stop): forced teardown

mod ability;
mod tick;

pub use ability::AbilityOutcome;

use tracing::{debug, info};

use crate::ability::{AbilityError, Usability, can_use};
use crate::combat::CombatResult;
use crate::env::CombatEnv;
use crate::state::CombatState;

/// Resources restored by a consumable, as reported by the host.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConsumableRestore {
    #[cfg_attr(feature = "serde", serde(default))]
    pub health_restore: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub mana_restore: u32,
}

/// What an engine call changed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickReport {
    /// Character health or mana was written internally.
    pub resources_changed: bool,
    /// Character health was taken from the external record.
    pub health_synced: bool,
    pub mob_health_changed: bool,
    /// First log line appended by this call.
    pub log_from: usize,
    /// Set when this call ended the session.
    pub ended: Option<CombatResult>,
}

impl TickReport {
    fn begin(state: &CombatState) -> Self {
        Self {
            log_from: state.log.len(),
            ..Self::default()
        }
    }

    pub fn changed_anything(&self) -> bool {
        self.resources_changed || self.health_synced || self.mob_health_changed || self.ended.is_some()
    }
}

/// Reducer over a borrowed [`CombatState`].
pub struct CombatEngine<'a> {
    state: &'a mut CombatState,
}

impl<'a> CombatEngine<'a> {
    pub fn new(state: &'a mut CombatState) -> Self {
        Self { state }
    }

    /// Requirement check for a known ability, without side effects.
    pub fn can_use(&self, ability_id: &str, env: &CombatEnv<'_>) -> Result<Usability, AbilityError> {
        let ability = env
            .context
            .abilities
            .get(ability_id)
            .ok_or_else(|| AbilityError::UnknownAbility(ability_id.to_string()))?;
        if !self.state.is_active {
            return Ok(Usability::blocked("Combat is over"));
        }
        Ok(can_use(
            ability,
            self.state.character_mana,
            &self.state.cooldowns,
            &env.context.equipment,
        ))
    }

    /// One-second cooldown countdown. Returns the abilities that became ready.
    pub fn tick_cooldowns(&mut self) -> Vec<String> {
        if !self.state.is_active {
            return Vec::new();
        }
        self.state.sync.end_reactive_pass();
        self.state.cooldowns.tick_second()
    }

    /// Applies a consumable the host has already resolved.
    pub fn apply_consumable(
        &mut self,
        item_name: &str,
        restore: ConsumableRestore,
        env: &CombatEnv<'_>,
    ) -> TickReport {
        let mut report = TickReport::begin(self.state);
        if !self.state.is_active {
            return report;
        }
        self.state.sync.end_reactive_pass();

        let max = self.state.maximums(env);
        let health = self.state.character_health.saturating_add(restore.health_restore).min(max.health);
        let mana = self.state.character_mana.saturating_add(restore.mana_restore).min(max.mana);
        let gained_health = health - self.state.character_health;
        let gained_mana = mana - self.state.character_mana;

        self.state.character_health = health;
        self.state.character_mana = mana;
        self.state.log.push(format!(
            "You use {item_name}: +{gained_health} health, +{gained_mana} mana."
        ));
        report.resources_changed = gained_health > 0 || gained_mana > 0;
        self.finish(report)
    }

    /// Offers an external health/mana update.
    ///
    /// Ignored while the one-shot guard is armed (the update is the echo of
    /// our own write). Mana is never taken from outside after the session
    /// started; health is, clamped to the current maximum.
    pub fn accept_external(&mut self, health: u32, mana: u32, env: &CombatEnv<'_>) -> TickReport {
        let mut report = TickReport::begin(self.state);
        if !self.state.is_active {
            return report;
        }
        if !self.state.sync.accept_external() {
            debug!(target: "combat::engine", health, mana, "external update suppressed");
            return report;
        }

        let health = health.min(self.state.maximums(env).health);
        if health != self.state.character_health {
            self.state.character_health = health;
            report.health_synced = true;
            self.check_terminal(env, &mut report);
        }
        report
    }

    /// Forced teardown: deactivates without a result.
    ///
    /// Returns false when the session had already ended.
    pub fn stop(&mut self) -> bool {
        if !self.state.is_active {
            return false;
        }
        self.state.is_active = false;
        info!(target: "combat::engine", clock = self.state.clock, "combat stopped without result");
        true
    }

    /// Ends the session when either side is down. Mob death is checked first.
    fn check_terminal(&mut self, env: &CombatEnv<'_>, report: &mut TickReport) -> bool {
        if !self.state.is_active {
            return true;
        }
        let result = if self.state.mob_health == 0 {
            CombatResult::Victory
        } else if self.state.character_health == 0 {
            CombatResult::Defeat
        } else {
            return false;
        };

        self.state.is_active = false;
        self.state.result = Some(result);
        let mob = &env.context.mob.name;
        self.state.log.push(match result {
            CombatResult::Victory => format!("Victory! {mob} is defeated."),
            CombatResult::Defeat => format!("Defeat! You were slain by {mob}."),
        });
        report.ended = Some(result);
        info!(
            target: "combat::engine",
            %result,
            clock = self.state.clock,
            health = self.state.character_health,
            mob_health = self.state.mob_health,
            "combat ended"
        );
        true
    }

    /// Arms the sync guard when resources were written internally.
    fn finish(&mut self, report: TickReport) -> TickReport {
        if report.resources_changed {
            self.state.sync.note_internal_write();
        }
        report
    }
}

#[cfg(test)]
mod tests;
