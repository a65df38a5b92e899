//! Equipped items as seen by the combat engine.
//!
//! The inventory system owns items; the engine only reads the equipped set
//! for stat bonuses, armor, weapon damage, weapon speed and the weapon /
//! offhand types that gate abilities.

use std::collections::BTreeMap;

use arrayvec::ArrayVec;

use crate::config::CombatConfig;
use crate::state::Tick;
use crate::stats::{BonusSource, StatKind};

/// Damage range used when no weapon is equipped.
pub const UNARMED_DAMAGE: (u32, u32) = (1, 2);

/// Equipment slot an item occupies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemSlot {
    Weapon,
    Offhand,
    Armor,
}

/// An equippable item.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub id: String,
    pub name: String,
    pub slot: ItemSlot,
    /// Weapon or offhand type matched against ability requirements (`"sword"`, `"shield"`).
    #[cfg_attr(feature = "serde", serde(default))]
    pub item_type: Option<String>,
    /// Additive stat bonuses granted while equipped.
    #[cfg_attr(feature = "serde", serde(default))]
    pub bonuses: BTreeMap<StatKind, i32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub armor: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub damage_min: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub damage_max: u32,
    /// Attack speed multiplier; only meaningful for weapons.
    #[cfg_attr(feature = "serde", serde(default))]
    pub speed: Option<f64>,
}

impl Item {
    pub fn new(id: impl Into<String>, name: impl Into<String>, slot: ItemSlot) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            slot,
            item_type: None,
            bonuses: BTreeMap::new(),
            armor: 0,
            damage_min: 0,
            damage_max: 0,
            speed: None,
        }
    }

    pub fn with_type(mut self, item_type: impl Into<String>) -> Self {
        self.item_type = Some(item_type.into());
        self
    }

    pub fn with_bonus(mut self, stat: StatKind, amount: i32) -> Self {
        *self.bonuses.entry(stat).or_insert(0) += amount;
        self
    }

    pub fn with_armor(mut self, armor: i32) -> Self {
        self.armor = armor;
        self
    }

    pub fn with_damage(mut self, min: u32, max: u32) -> Self {
        self.damage_min = min;
        self.damage_max = max.max(min);
        self
    }

    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = Some(speed);
        self
    }

    pub fn bonus(&self, stat: StatKind) -> i32 {
        self.bonuses.get(&stat).copied().unwrap_or(0)
    }
}

/// Items currently equipped by the character.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Equipment {
    pub weapon: Option<Item>,
    pub offhand: Option<Item>,
    pub armor: ArrayVec<Item, { CombatConfig::MAX_ARMOR_PIECES }>,
}

impl Equipment {
    /// Creates empty equipment (unarmed, unarmored).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a builder for constructing equipment.
    pub fn builder() -> EquipmentBuilder {
        EquipmentBuilder::default()
    }

    /// Iterates every equipped item: weapon, offhand, then armor pieces.
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.weapon
            .iter()
            .chain(self.offhand.iter())
            .chain(self.armor.iter())
    }

    /// Total armor across all equipped items.
    pub fn total_armor(&self) -> i32 {
        self.items().map(|item| item.armor).sum::<i32>().max(0)
    }

    /// Weapon speed multiplier (1.0 when unarmed or undeclared).
    pub fn weapon_speed(&self) -> f64 {
        self.weapon
            .as_ref()
            .and_then(|weapon| weapon.speed)
            .filter(|speed| *speed > 0.0)
            .unwrap_or(1.0)
    }

    /// Weapon damage range, falling back to [`UNARMED_DAMAGE`].
    pub fn weapon_damage(&self) -> (u32, u32) {
        match &self.weapon {
            Some(weapon) if weapon.damage_max > 0 => (weapon.damage_min, weapon.damage_max),
            _ => UNARMED_DAMAGE,
        }
    }

    pub fn weapon_type(&self) -> Option<&str> {
        self.weapon.as_ref().and_then(|item| item.item_type.as_deref())
    }

    pub fn offhand_type(&self) -> Option<&str> {
        self.offhand.as_ref().and_then(|item| item.item_type.as_deref())
    }
}

impl BonusSource for Equipment {
    fn bonus(&self, stat: StatKind, _now: Tick) -> i32 {
        self.items().map(|item| item.bonus(stat)).sum()
    }
}

/// Builder for constructing equipment.
#[derive(Default)]
pub struct EquipmentBuilder {
    equipment: Equipment,
}

impl EquipmentBuilder {
    pub fn weapon(mut self, item: Item) -> Self {
        self.equipment.weapon = Some(item);
        self
    }

    pub fn offhand(mut self, item: Item) -> Self {
        self.equipment.offhand = Some(item);
        self
    }

    /// Adds an armor piece; pieces beyond the slot capacity are ignored.
    pub fn armor(mut self, item: Item) -> Self {
        if !self.equipment.armor.is_full() {
            self.equipment.armor.push(item);
        }
        self
    }

    pub fn build(self) -> Equipment {
        self.equipment
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kit() -> Equipment {
        Equipment::builder()
            .weapon(
                Item::new("sword", "Iron Sword", ItemSlot::Weapon)
                    .with_type("sword")
                    .with_damage(4, 8)
                    .with_speed(1.25)
                    .with_bonus(StatKind::Strength, 2),
            )
            .offhand(Item::new("buckler", "Buckler", ItemSlot::Offhand).with_type("shield").with_armor(5))
            .armor(
                Item::new("helm", "Helm", ItemSlot::Armor)
                    .with_armor(10)
                    .with_bonus(StatKind::Constitution, 1),
            )
            .armor(Item::new("boots", "Boots", ItemSlot::Armor).with_armor(3).with_bonus(StatKind::Strength, 1))
            .build()
    }

    #[test]
    fn bonuses_sum_across_every_slot() {
        let equipment = kit();
        assert_eq!(equipment.bonus(StatKind::Strength, 0), 3);
        assert_eq!(equipment.bonus(StatKind::Constitution, 0), 1);
        assert_eq!(equipment.bonus(StatKind::Wisdom, 0), 0);
    }

    #[test]
    fn armor_speed_and_damage() {
        let equipment = kit();
        assert_eq!(equipment.total_armor(), 18);
        assert_eq!(equipment.weapon_speed(), 1.25);
        assert_eq!(equipment.weapon_damage(), (4, 8));
        assert_eq!(equipment.weapon_type(), Some("sword"));
        assert_eq!(equipment.offhand_type(), Some("shield"));
    }

    #[test]
    fn unarmed_defaults() {
        let equipment = Equipment::empty();
        assert_eq!(equipment.weapon_speed(), 1.0);
        assert_eq!(equipment.weapon_damage(), UNARMED_DAMAGE);
        assert_eq!(equipment.total_armor(), 0);
    }
}
