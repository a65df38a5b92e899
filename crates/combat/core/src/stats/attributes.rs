//! Base attributes of a combatant.

use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// The seven combat attributes.
///
/// Parsed case-insensitively from data files, accepting both the full name
/// and the three-letter abbreviation (`"constitution"`, `"CON"`).
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumString, EnumIter, IntoStaticStr,
)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum StatKind {
    #[strum(to_string = "strength", serialize = "str")]
    #[cfg_attr(feature = "serde", serde(alias = "str"))]
    Strength,
    #[strum(to_string = "dexterity", serialize = "dex")]
    #[cfg_attr(feature = "serde", serde(alias = "dex"))]
    Dexterity,
    #[strum(to_string = "constitution", serialize = "con")]
    #[cfg_attr(feature = "serde", serde(alias = "con"))]
    Constitution,
    #[strum(to_string = "intelligence", serialize = "int")]
    #[cfg_attr(feature = "serde", serde(alias = "int"))]
    Intelligence,
    #[strum(to_string = "wisdom", serialize = "wis")]
    #[cfg_attr(feature = "serde", serde(alias = "wis"))]
    Wisdom,
    #[strum(to_string = "charisma", serialize = "cha")]
    #[cfg_attr(feature = "serde", serde(alias = "cha"))]
    Charisma,
    #[strum(to_string = "evasiveness", serialize = "eva")]
    #[cfg_attr(feature = "serde", serde(alias = "eva"))]
    Evasiveness,
}

/// Base stat record supplied by the host for a character.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatantStats {
    pub strength: i32,
    pub dexterity: i32,
    pub constitution: i32,
    pub intelligence: i32,
    pub wisdom: i32,
    pub charisma: i32,
    pub evasiveness: i32,
    pub level: i32,
}

impl CombatantStats {
    /// Base value of a single attribute.
    pub fn get(&self, stat: StatKind) -> i32 {
        match stat {
            StatKind::Strength => self.strength,
            StatKind::Dexterity => self.dexterity,
            StatKind::Constitution => self.constitution,
            StatKind::Intelligence => self.intelligence,
            StatKind::Wisdom => self.wisdom,
            StatKind::Charisma => self.charisma,
            StatKind::Evasiveness => self.evasiveness,
        }
    }

    /// Builder-style override of a single attribute.
    pub fn with(mut self, stat: StatKind, value: i32) -> Self {
        *self.get_mut(stat) = value;
        self
    }

    /// Builder-style override of the level.
    pub fn with_level(mut self, level: i32) -> Self {
        self.level = level;
        self
    }

    fn get_mut(&mut self, stat: StatKind) -> &mut i32 {
        match stat {
            StatKind::Strength => &mut self.strength,
            StatKind::Dexterity => &mut self.dexterity,
            StatKind::Constitution => &mut self.constitution,
            StatKind::Intelligence => &mut self.intelligence,
            StatKind::Wisdom => &mut self.wisdom,
            StatKind::Charisma => &mut self.charisma,
            StatKind::Evasiveness => &mut self.evasiveness,
        }
    }
}

impl Default for CombatantStats {
    /// Default stats: all 10 (average), level 1
    fn default() -> Self {
        Self {
            strength: 10,
            dexterity: 10,
            constitution: 10,
            intelligence: 10,
            wisdom: 10,
            charisma: 10,
            evasiveness: 10,
            level: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn parses_full_names_and_abbreviations() {
        assert_eq!(StatKind::from_str("constitution"), Ok(StatKind::Constitution));
        assert_eq!(StatKind::from_str("CON"), Ok(StatKind::Constitution));
        assert_eq!(StatKind::from_str("Wis"), Ok(StatKind::Wisdom));
        assert!(StatKind::from_str("luck").is_err());
    }

    #[test]
    fn with_overrides_single_attribute() {
        let stats = CombatantStats::default().with(StatKind::Strength, 16);
        assert_eq!(stats.get(StatKind::Strength), 16);
        assert_eq!(stats.get(StatKind::Dexterity), 10);
    }
}
