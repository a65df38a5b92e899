//! Player ability invocation.

use tracing::debug;

use super::{CombatEngine, TickReport};
use crate::ability::{AbilityError, Usability, resolve_legacy};
use crate::combat::apply_damage;
use crate::effects::{ActiveEffect, ApplyOutcome, EffectCategory, ResolvedEffect, resolve};
use crate::env::CombatEnv;
use crate::stats::{EffectiveStats, StatKind};

/// Current health gained or lost per point of constitution change from an
/// effect, at the moment it is applied.
pub const CURRENT_HEALTH_PER_CONSTITUTION: i32 = 5;

/// Result of an ability invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AbilityOutcome {
    Used(TickReport),
    /// A requirement failed; nothing was mutated or logged.
    Rejected(Usability),
}

impl AbilityOutcome {
    pub fn is_used(&self) -> bool {
        matches!(self, Self::Used(_))
    }
}

impl CombatEngine<'_> {
    /// Invokes an ability after the requirement check passes.
    ///
    /// Declared effects resolve in order and stop at the first one that
    /// brings either side to zero health; mana cost and cooldown are then
    /// committed before the session ends.
    pub fn use_ability(
        &mut self,
        ability_id: &str,
        env: &CombatEnv<'_>,
    ) -> Result<AbilityOutcome, AbilityError> {
        let usability = self.can_use(ability_id, env)?;
        if !usability.can_use {
            debug!(
                target: "combat::engine",
                ability = ability_id,
                reason = usability.reason.as_deref().unwrap_or_default(),
                "ability rejected"
            );
            return Ok(AbilityOutcome::Rejected(usability));
        }
        let ability = env
            .context
            .abilities
            .get(ability_id)
            .ok_or_else(|| AbilityError::UnknownAbility(ability_id.to_string()))?;

        self.state.sync.end_reactive_pass();
        let mut report = TickReport::begin(self.state);
        let now = self.state.clock;
        let caster = env.context.character_stats(&self.state.effects, now);
        self.state.log.push(format!("You use {}.", ability.name));

        if ability.effects.is_empty() {
            if let Some(resolved) = resolve_legacy(ability, &caster) {
                self.apply_resolved(resolved, env, &mut report);
            }
        } else {
            for spec in &ability.effects {
                let resolved = resolve(spec, &ability.name, &caster, now, env.config());
                self.apply_resolved(resolved, env, &mut report);
                if self.state.mob_health == 0 || self.state.character_health == 0 {
                    break;
                }
            }
        }

        if ability.mana_cost > 0 {
            self.state.character_mana = self.state.character_mana.saturating_sub(ability.mana_cost);
            report.resources_changed = true;
        }
        if let Some(secs) = ability.cooldown_after_use(env.config().default_ability_cooldown_secs) {
            self.state.cooldowns.start(&ability.id, secs);
        }

        self.check_terminal(env, &mut report);
        Ok(AbilityOutcome::Used(self.finish(report)))
    }

    fn apply_resolved(&mut self, resolved: ResolvedEffect, env: &CombatEnv<'_>, report: &mut TickReport) {
        let mob = &env.context.mob.name;
        match resolved {
            ResolvedEffect::InstantDamage { name, amount } => {
                self.state.mob_health = apply_damage(self.state.mob_health, amount);
                report.mob_health_changed = true;
                self.state
                    .log
                    .push(format!("{name} hits {mob} for {amount} damage."));
            }
            ResolvedEffect::InstantHeal { name, amount } => {
                let max = self.state.maximums(env).health;
                let before = self.state.character_health;
                self.state.character_health = before.saturating_add(amount).min(max);
                let healed = self.state.character_health - before;
                report.resources_changed |= healed > 0;
                self.state.log.push(format!("{name} heals you for {healed}."));
            }
            ResolvedEffect::Apply(effect) => self.apply_effect(effect, env, report),
        }
    }

    fn apply_effect(&mut self, effect: ActiveEffect, env: &CombatEnv<'_>, report: &mut TickReport) {
        let now = self.state.clock;
        let stats_before = env.context.character_stats(&self.state.effects, now);
        let line = describe(&effect, &env.context.mob.name);
        let touches_constitution = effect.stat == Some(StatKind::Constitution);

        let outcome = self.state.effects.apply(effect);
        self.state.log.push(match outcome {
            ApplyOutcome::Added => line,
            ApplyOutcome::Refreshed => format!("{line} (refreshed)"),
            ApplyOutcome::Stacked(stacks) => format!("{line} (x{stacks})"),
        });

        if touches_constitution {
            let stats_after = env.context.character_stats(&self.state.effects, now);
            self.adjust_for_constitution(&stats_before, &stats_after, report);
        }
        let max = self.state.maximums(env);
        report.resources_changed |= self.state.clamp_resources(max);
    }

    /// Current health follows a constitution change at 5 per point, while the
    /// maximum moves at 8 per point. Losses never take health below 1.
    fn adjust_for_constitution(
        &mut self,
        before: &EffectiveStats,
        after: &EffectiveStats,
        report: &mut TickReport,
    ) {
        let delta = after.constitution - before.constitution;
        if delta == 0 {
            return;
        }
        let change = delta * CURRENT_HEALTH_PER_CONSTITUTION;
        let health = self.state.character_health as i64;
        let max = after.maximums().health as i64;
        let adjusted = (health + change as i64).max(1).min(max) as u32;
        if adjusted != self.state.character_health {
            self.state.character_health = adjusted;
            report.resources_changed = true;
        }
    }
}

fn describe(effect: &ActiveEffect, mob: &str) -> String {
    match effect.category {
        EffectCategory::Dot => format!("{mob} is afflicted by {}.", effect.name),
        EffectCategory::Hot => format!("{} begins to heal you.", effect.name),
        EffectCategory::Buff => format!("You gain {}.", effect.name),
        EffectCategory::Debuff => format!("You suffer {}.", effect.name),
        EffectCategory::Shield => format!("{} shields you for {}.", effect.name, effect.magnitude),
        EffectCategory::Thorns => format!(
            "{} surrounds you, reflecting {}% of damage.",
            effect.name,
            effect.magnitude.clamp(0, 100)
        ),
    }
}
