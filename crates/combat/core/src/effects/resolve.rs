//! Effect resolution: turns a declared [`EffectSpec`] into something the
//! engine can apply, owning all stat-scaling rules.

use tracing::warn;

use super::spec::{EffectKind, EffectSpec};
use super::types::{ActiveEffect, EffectCategory};
use crate::config::CombatConfig;
use crate::state::Tick;
use crate::stats::EffectiveStats;

/// A resolved effect ready for application.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResolvedEffect {
    InstantDamage { name: String, amount: u32 },
    InstantHeal { name: String, amount: u32 },
    Apply(ActiveEffect),
}

/// Scaled amount for a spec given the caster's effective stats.
pub fn scaled_amount(spec: &EffectSpec, caster: &EffectiveStats) -> i32 {
    match spec.scaling_stat {
        Some(stat) => spec.value + ((caster.get(stat) - 10) as f64 * spec.scaling).floor() as i32,
        None => spec.value,
    }
}

/// Resolves one declared effect of `ability_name` cast at tick `now`.
///
/// Non-positive amounts for damage/heal/periodic effects are reported and
/// floored at zero; they are still applied so the ability goes through.
pub fn resolve(
    spec: &EffectSpec,
    ability_name: &str,
    caster: &EffectiveStats,
    now: Tick,
    config: &CombatConfig,
) -> ResolvedEffect {
    let name = spec.name.clone().unwrap_or_else(|| ability_name.to_string());
    let raw = scaled_amount(spec, caster);
    let duration_ticks = config.ticks_for_secs(spec.duration_secs);
    let pulses = duration_ticks.min(u32::MAX as u64) as u32;

    let amount = if raw <= 0 && !matches!(spec.kind, EffectKind::Buff | EffectKind::Debuff) {
        warn!(
            target: "combat::effects",
            effect = %name,
            kind = %spec.kind,
            amount = raw,
            "effect resolved to a non-positive amount"
        );
        0
    } else {
        raw
    };

    match spec.kind {
        EffectKind::Damage => ResolvedEffect::InstantDamage {
            name,
            amount: amount as u32,
        },
        EffectKind::Heal => ResolvedEffect::InstantHeal {
            name,
            amount: amount as u32,
        },
        EffectKind::Dot => ResolvedEffect::Apply(
            ActiveEffect::periodic(name, EffectCategory::Dot, amount, pulses, now)
                .with_stacks_max(spec.stacks_max),
        ),
        EffectKind::Hot => ResolvedEffect::Apply(
            ActiveEffect::periodic(name, EffectCategory::Hot, amount, pulses, now)
                .with_stacks_max(spec.stacks_max),
        ),
        EffectKind::Debuff => ResolvedEffect::Apply(
            ActiveEffect::debuff(name, spec.stat, amount, pulses, now).with_stacks_max(spec.stacks_max),
        ),
        EffectKind::Buff => ResolvedEffect::Apply(
            ActiveEffect::buff(name, spec.stat, amount, duration_ticks, now)
                .with_stacks_max(spec.stacks_max),
        ),
        EffectKind::Shield => ResolvedEffect::Apply(
            ActiveEffect::shield(name, amount, duration_ticks, now).with_stacks_max(spec.stacks_max),
        ),
        EffectKind::Thorns => ResolvedEffect::Apply(ActiveEffect::thorns(
            name,
            amount.min(100),
            duration_ticks,
            now,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::{CombatantStats, StatKind};

    fn caster(intelligence: i32) -> EffectiveStats {
        EffectiveStats::from_base(&CombatantStats::default().with(StatKind::Intelligence, intelligence))
    }

    #[test]
    fn scaling_adds_floored_stat_excess() {
        let spec = EffectSpec::new(EffectKind::Damage, 20).scaled_by(StatKind::Intelligence, 1.5);
        assert_eq!(scaled_amount(&spec, &caster(15)), 27);
        assert_eq!(scaled_amount(&spec, &caster(10)), 20);
    }

    #[test]
    fn periodic_effects_get_tick_counters() {
        let config = CombatConfig::default();
        let spec = EffectSpec::new(EffectKind::Dot, 2).named("Poison").lasting(5);

        let ResolvedEffect::Apply(effect) = resolve(&spec, "Envenom", &caster(10), 7, &config) else {
            panic!("expected an active effect");
        };
        assert_eq!(effect.name, "Poison");
        assert_eq!(effect.category, EffectCategory::Dot);
        assert_eq!(effect.ticks_remaining, 50);
        assert_eq!(effect.magnitude, 2);
    }

    #[test]
    fn buffs_carry_stat_and_expiry() {
        let config = CombatConfig::default();
        let spec = EffectSpec::new(EffectKind::Buff, 5)
            .on_stat(StatKind::Constitution)
            .lasting(30);

        let ResolvedEffect::Apply(effect) = resolve(&spec, "Fortitude", &caster(10), 100, &config) else {
            panic!("expected an active effect");
        };
        assert_eq!(effect.stat, Some(StatKind::Constitution));
        assert_eq!(effect.expires_at, 400);
    }

    #[test]
    fn non_positive_heal_is_floored() {
        let config = CombatConfig::default();
        let spec = EffectSpec::new(EffectKind::Heal, 2).scaled_by(StatKind::Intelligence, 1.0);
        let resolved = resolve(&spec, "Weak Mend", &caster(4), 0, &config);
        assert_eq!(
            resolved,
            ResolvedEffect::InstantHeal {
                name: "Weak Mend".to_string(),
                amount: 0
            }
        );
    }
}
