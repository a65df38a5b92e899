//! Hotbar bindings for discrete player-triggered actions.

use arrayvec::ArrayVec;

use super::error::AbilityError;
use crate::config::CombatConfig;

/// What a hotbar slot invokes.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum HotbarAction {
    Ability(String),
    Consumable(String),
}

/// A slot (1..=10) bound to an action.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HotbarBinding {
    pub slot: u8,
    pub action: HotbarAction,
}

impl HotbarBinding {
    pub fn ability(slot: u8, ability_id: impl Into<String>) -> Self {
        Self {
            slot,
            action: HotbarAction::Ability(ability_id.into()),
        }
    }

    pub fn consumable(slot: u8, item_id: impl Into<String>) -> Self {
        Self {
            slot,
            action: HotbarAction::Consumable(item_id.into()),
        }
    }
}

/// The configured hotbar. Slots are unique.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hotbar {
    bindings: ArrayVec<HotbarBinding, { CombatConfig::MAX_HOTBAR_SLOTS }>,
}

impl Hotbar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_bindings(
        bindings: impl IntoIterator<Item = HotbarBinding>,
    ) -> Result<Self, AbilityError> {
        let mut hotbar = Self::new();
        for binding in bindings {
            hotbar.bind(binding)?;
        }
        Ok(hotbar)
    }

    pub fn bind(&mut self, binding: HotbarBinding) -> Result<(), AbilityError> {
        if binding.slot == 0 || binding.slot as usize > CombatConfig::MAX_HOTBAR_SLOTS {
            return Err(AbilityError::InvalidSlot(binding.slot));
        }
        if self.get(binding.slot).is_some() {
            return Err(AbilityError::DuplicateSlot(binding.slot));
        }
        // Capacity equals the slot count, so a unique in-range slot always fits.
        self.bindings.push(binding);
        Ok(())
    }

    pub fn get(&self, slot: u8) -> Option<&HotbarAction> {
        self.bindings
            .iter()
            .find(|binding| binding.slot == slot)
            .map(|binding| &binding.action)
    }

    /// Action bound to `slot`, or [`AbilityError::EmptySlot`].
    pub fn action(&self, slot: u8) -> Result<&HotbarAction, AbilityError> {
        if slot == 0 || slot as usize > CombatConfig::MAX_HOTBAR_SLOTS {
            return Err(AbilityError::InvalidSlot(slot));
        }
        self.get(slot).ok_or(AbilityError::EmptySlot(slot))
    }

    pub fn iter(&self) -> impl Iterator<Item = &HotbarBinding> {
        self.bindings.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// Slot for a keyboard digit: `1`..`9` map to slots 1..9, `0` to slot 10.
pub fn slot_for_key(key: char) -> Option<u8> {
    match key {
        '1'..='9' => key.to_digit(10).map(|digit| digit as u8),
        '0' => Some(10),
        _ => None,
    }
}
