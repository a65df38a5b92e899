//! Category-based resolution for ability definitions that predate
//! structured effects.

use super::definition::{AbilityCategory, AbilityDefinition};
use crate::effects::ResolvedEffect;
use crate::stats::{EffectiveStats, StatKind};

/// Flat amount scaled by the primary stat: 5% per point above 10, at least 1.
pub fn legacy_amount(power: u32, stat_value: i32) -> u32 {
    let scaled = power as i64 * (100 + (stat_value as i64 - 10) * 5) / 100;
    scaled.max(1) as u32
}

/// Stat a legacy ability scales with when none is declared.
pub fn default_primary_stat(category: AbilityCategory) -> StatKind {
    match category {
        AbilityCategory::Spell | AbilityCategory::Heal => StatKind::Intelligence,
        AbilityCategory::Attack | AbilityCategory::Ability => StatKind::Strength,
    }
}

/// Resolves a definition without structured effects.
///
/// Heals restore the character; every other category damages the mob. A
/// definition without power has no payload.
pub fn resolve_legacy(ability: &AbilityDefinition, caster: &EffectiveStats) -> Option<ResolvedEffect> {
    if ability.power == 0 {
        return None;
    }
    let stat = ability
        .primary_stat
        .unwrap_or_else(|| default_primary_stat(ability.category));
    let amount = legacy_amount(ability.power, caster.get(stat));
    let name = ability.name.clone();

    Some(match ability.category {
        AbilityCategory::Heal => ResolvedEffect::InstantHeal { name, amount },
        _ => ResolvedEffect::InstantDamage { name, amount },
    })
}
