//! Master tick phases.
//!
//! Order within one tick:
//! 1. advance the clock, drop expired buffs / shields / thorns
//! 2. DOT pulses (terminal check after each)
//! 3. HOT pulses
//! 4. debuff countdown
//! 5. in-combat regeneration
//! 6. player attack (terminal check)
//! 7. mob attack, shield absorption, defeat check, thorns reflection, victory check

use tracing::debug;

use super::{CombatEngine, TickReport};
use crate::combat::{AttackOutcome, apply_damage, calculate_damage, check_hit, hit_chance};
use crate::env::{CombatEnv, RollContext};
use crate::regen::{combat_health_regen, combat_mana_regen};
use crate::state::Combatant;

impl CombatEngine<'_> {
    /// Advances the session by one master tick.
    ///
    /// Does nothing once the session has ended.
    pub fn tick(&mut self, env: &CombatEnv<'_>) -> TickReport {
        let mut report = TickReport::begin(self.state);
        if !self.state.is_active {
            return report;
        }
        self.state.sync.end_reactive_pass();
        self.state.clock += 1;

        self.expire_effects(env, &mut report);
        if self.pulse_dots(env, &mut report) {
            return self.finish(report);
        }
        self.pulse_hots(env, &mut report);
        self.pulse_debuffs(env, &mut report);
        self.regenerate(env, &mut report);
        if self.player_turn(env, &mut report) {
            return self.finish(report);
        }
        self.mob_turn(env, &mut report);
        self.finish(report)
    }

    fn expire_effects(&mut self, env: &CombatEnv<'_>, report: &mut TickReport) {
        let now = self.state.clock;
        let thorns = self.state.effects.thorns.peek().map(|t| t.name.clone());
        let expired = self.state.effects.expire(now);
        for buff in &expired {
            self.state.log.push(format!("{} fades.", buff.name));
        }
        if let Some(name) = thorns {
            if self.state.effects.thorns.peek().is_none() {
                self.state.log.push(format!("{name} fades."));
            }
        }
        if !expired.is_empty() {
            // Lost bonuses only ever clamp; health is not refunded or drained.
            let max = self.state.maximums(env);
            report.resources_changed |= self.state.clamp_resources(max);
        }
    }

    fn pulse_dots(&mut self, env: &CombatEnv<'_>, report: &mut TickReport) -> bool {
        let mob = &env.context.mob.name;
        let mut index = 0;
        while let Some(pulse) = self.state.effects.dots.pulse_at(index) {
            let damage = pulse.magnitude.max(0) as u32;
            self.state.mob_health = apply_damage(self.state.mob_health, damage);
            report.mob_health_changed = true;
            self.state
                .log
                .push(format!("{} deals {damage} damage to {mob}.", pulse.name));
            if pulse.finished {
                self.state.log.push(format!("{} wears off.", pulse.name));
            } else {
                index += 1;
            }
            if self.check_terminal(env, report) {
                return true;
            }
        }
        false
    }

    fn pulse_hots(&mut self, env: &CombatEnv<'_>, report: &mut TickReport) {
        let max_health = self.state.maximums(env).health;
        let mut index = 0;
        while let Some(pulse) = self.state.effects.hots.pulse_at(index) {
            let before = self.state.character_health;
            let heal = pulse.magnitude.max(0) as u32;
            self.state.character_health = before.saturating_add(heal).min(max_health);
            let healed = self.state.character_health - before;
            report.resources_changed |= healed > 0;
            self.state
                .log
                .push(format!("{} heals you for {healed}.", pulse.name));
            if pulse.finished {
                self.state.log.push(format!("{} wears off.", pulse.name));
            } else {
                index += 1;
            }
        }
    }

    fn pulse_debuffs(&mut self, env: &CombatEnv<'_>, report: &mut TickReport) {
        let mut index = 0;
        let mut any_finished = false;
        while let Some(pulse) = self.state.effects.debuffs.pulse_at(index) {
            if pulse.finished {
                self.state.log.push(format!("{} wears off.", pulse.name));
                any_finished = true;
            } else {
                index += 1;
            }
        }
        if any_finished {
            let max = self.state.maximums(env);
            report.resources_changed |= self.state.clamp_resources(max);
        }
    }

    fn regenerate(&mut self, env: &CombatEnv<'_>, report: &mut TickReport) {
        if !self.state.regen.advance(env.config().regen_interval_ticks) {
            return;
        }
        let stats = env.context.character_stats(&self.state.effects, self.state.clock);
        let max = stats.maximums();
        let health = self
            .state
            .character_health
            .saturating_add(combat_health_regen(max.health, stats.constitution))
            .min(max.health);
        let mana = self
            .state
            .character_mana
            .saturating_add(combat_mana_regen(max.mana, stats.wisdom))
            .min(max.mana);

        let gained_health = health - self.state.character_health;
        let gained_mana = mana - self.state.character_mana;
        if gained_health == 0 && gained_mana == 0 {
            return;
        }
        self.state.character_health = health;
        self.state.character_mana = mana;
        report.resources_changed = true;
        self.state.log.push(format!(
            "You regenerate {gained_health} health and {gained_mana} mana."
        ));
    }

    /// Hit and damage rolls for one attack by `attacker`.
    fn roll_attack(&mut self, attacker: Combatant, env: &CombatEnv<'_>) -> AttackOutcome {
        let stats = env.context.character_stats(&self.state.effects, self.state.clock);
        let mob = &env.context.mob;
        let (chance, (min, max), strength, level, armor) = match attacker {
            Combatant::Player => (
                hit_chance(stats.level, mob.level, mob.evasiveness, &env.config().hit_chance),
                env.context.equipment.weapon_damage(),
                stats.strength,
                stats.level,
                mob.armor,
            ),
            Combatant::Mob => (
                hit_chance(mob.level, stats.level, stats.evasiveness, &env.config().hit_chance),
                (mob.damage_min, mob.damage_max),
                mob.strength,
                mob.level,
                env.context.equipment.total_armor(),
            ),
        };

        let roll = env.rng.roll_percent(self.state.next_seed(attacker, RollContext::Hit));
        if !check_hit(chance, roll) {
            debug!(target: "combat::engine", clock = self.state.clock, ?attacker, chance, roll, "attack missed");
            return AttackOutcome::Miss;
        }
        let weapon_roll = env
            .rng
            .range(self.state.next_seed(attacker, RollContext::Damage), min, max);
        let damage = calculate_damage(weapon_roll, strength, level, armor);
        debug!(target: "combat::engine", clock = self.state.clock, ?attacker, chance, roll, damage, "attack hit");
        AttackOutcome::Hit { damage }
    }

    fn player_turn(&mut self, env: &CombatEnv<'_>, report: &mut TickReport) -> bool {
        if !self.state.player_timer.advance() {
            return false;
        }
        let mob = &env.context.mob.name;
        match self.roll_attack(Combatant::Player, env) {
            AttackOutcome::Hit { damage } => {
                self.state.mob_health = apply_damage(self.state.mob_health, damage);
                report.mob_health_changed = true;
                self.state.log.push(format!("You hit {mob} for {damage} damage."));
            }
            AttackOutcome::Miss => self.state.log.push(format!("You miss {mob}.")),
        }

        let threshold = self.state.draw_threshold(Combatant::Player, env);
        self.state.player_timer.reset(threshold);
        self.check_terminal(env, report)
    }

    fn mob_turn(&mut self, env: &CombatEnv<'_>, report: &mut TickReport) -> bool {
        if !self.state.mob_timer.advance() {
            return false;
        }
        let now = self.state.clock;
        let mob = &env.context.mob.name;
        let outcome = self.roll_attack(Combatant::Mob, env);
        let threshold = self.state.draw_threshold(Combatant::Mob, env);
        self.state.mob_timer.reset(threshold);

        let AttackOutcome::Hit { damage } = outcome else {
            self.state.log.push(format!("{mob} misses you."));
            return false;
        };

        let absorbed = self.state.effects.shields.absorb(damage, now);
        if absorbed > 0 {
            self.state
                .log
                .push(format!("Your shield absorbs {absorbed} damage."));
        }
        let taken = damage - absorbed;
        if taken > 0 {
            self.state.character_health = apply_damage(self.state.character_health, taken);
            report.resources_changed = true;
        }
        self.state.log.push(format!("{mob} hits you for {taken} damage."));

        if self.check_terminal(env, report) {
            return true;
        }

        // Reflection uses the damage that landed before shield absorption.
        let reflected = self
            .state
            .effects
            .thorns
            .active(now)
            .map(|thorns| (thorns.name.clone(), thorns.reflect(damage)));
        if let Some((name, reflected)) = reflected {
            if reflected > 0 {
                self.state.mob_health = apply_damage(self.state.mob_health, reflected);
                report.mob_health_changed = true;
                self.state
                    .log
                    .push(format!("{name} reflects {reflected} damage to {mob}."));
            }
        }
        self.check_terminal(env, report)
    }
}
