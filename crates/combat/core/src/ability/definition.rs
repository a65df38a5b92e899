//! Ability definitions as supplied by the content layer.

use std::collections::BTreeMap;

use strum::{Display, EnumString};

use crate::effects::EffectSpec;
use crate::stats::StatKind;

/// Ability categories.
///
/// The category drives the legacy calculation for definitions without
/// structured effects, and generic `Ability` entries always receive a cooldown.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum AbilityCategory {
    Attack,
    Spell,
    Heal,
    Ability,
}

/// A usable ability.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilityDefinition {
    pub id: String,
    pub name: String,
    pub category: AbilityCategory,
    #[cfg_attr(feature = "serde", serde(default))]
    pub mana_cost: u32,
    /// Declared cooldown; `None` falls back to the configured default for
    /// generic abilities and to no cooldown otherwise.
    #[cfg_attr(feature = "serde", serde(default))]
    pub cooldown_secs: Option<u32>,
    /// Comma-separated weapon types, e.g. `"sword, axe"`. Empty means any.
    #[cfg_attr(feature = "serde", serde(default))]
    pub allowed_weapon_types: Option<String>,
    /// Comma-separated offhand types, e.g. `"shield"`. Empty means any.
    #[cfg_attr(feature = "serde", serde(default))]
    pub allowed_offhand_types: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub effects: Vec<EffectSpec>,
    /// Legacy flat amount used when `effects` is empty.
    #[cfg_attr(feature = "serde", serde(default))]
    pub power: u32,
    /// Legacy scaling stat used when `effects` is empty.
    #[cfg_attr(feature = "serde", serde(default))]
    pub primary_stat: Option<StatKind>,
}

impl AbilityDefinition {
    pub fn new(id: impl Into<String>, name: impl Into<String>, category: AbilityCategory) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
            mana_cost: 0,
            cooldown_secs: None,
            allowed_weapon_types: None,
            allowed_offhand_types: None,
            effects: Vec::new(),
            power: 0,
            primary_stat: None,
        }
    }

    pub fn with_cost(mut self, mana_cost: u32) -> Self {
        self.mana_cost = mana_cost;
        self
    }

    pub fn with_cooldown(mut self, secs: u32) -> Self {
        self.cooldown_secs = Some(secs);
        self
    }

    pub fn with_weapon_types(mut self, types: impl Into<String>) -> Self {
        self.allowed_weapon_types = Some(types.into());
        self
    }

    pub fn with_offhand_types(mut self, types: impl Into<String>) -> Self {
        self.allowed_offhand_types = Some(types.into());
        self
    }

    pub fn with_effect(mut self, effect: EffectSpec) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn with_power(mut self, power: u32, primary_stat: Option<StatKind>) -> Self {
        self.power = power;
        self.primary_stat = primary_stat;
        self
    }

    /// Cooldown to start after a successful use, if any.
    pub fn cooldown_after_use(&self, default_secs: u32) -> Option<u32> {
        match self.cooldown_secs {
            Some(secs) if secs > 0 => Some(secs),
            _ if self.category == AbilityCategory::Ability => Some(default_secs),
            _ => None,
        }
    }
}

/// Abilities known to the character, keyed by id.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilityBook {
    abilities: BTreeMap<String, AbilityDefinition>,
}

impl AbilityBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, ability: AbilityDefinition) {
        self.abilities.insert(ability.id.clone(), ability);
    }

    pub fn get(&self, id: &str) -> Option<&AbilityDefinition> {
        self.abilities.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &AbilityDefinition> {
        self.abilities.values()
    }

    pub fn len(&self) -> usize {
        self.abilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.abilities.is_empty()
    }
}

impl FromIterator<AbilityDefinition> for AbilityBook {
    fn from_iter<I: IntoIterator<Item = AbilityDefinition>>(iter: I) -> Self {
        let mut book = Self::new();
        for ability in iter {
            book.insert(ability);
        }
        book
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generic_abilities_get_default_cooldown() {
        let taunt = AbilityDefinition::new("taunt", "Taunt", AbilityCategory::Ability);
        assert_eq!(taunt.cooldown_after_use(10), Some(10));

        let bolt = AbilityDefinition::new("bolt", "Bolt", AbilityCategory::Spell);
        assert_eq!(bolt.cooldown_after_use(10), None);

        let slam = AbilityDefinition::new("slam", "Slam", AbilityCategory::Attack).with_cooldown(6);
        assert_eq!(slam.cooldown_after_use(10), Some(6));
    }
}
