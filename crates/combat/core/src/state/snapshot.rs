//! Session start snapshot supplied by the host.

use crate::ability::{AbilityBook, AbilityDefinition, AbilityError, Hotbar, HotbarAction, HotbarBinding};
use crate::config::CombatConfig;
use crate::env::{CombatContext, Equipment, MobStats};
use crate::error::{CombatError, ErrorSeverity};
use crate::stats::{CombatantStats, StatKind};

/// A buff the character already carries when combat starts.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BuffSnapshot {
    pub name: String,
    pub stat: StatKind,
    pub magnitude: i32,
    pub remaining_secs: u32,
}

/// Everything the host hands over at session start.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatSnapshot {
    pub character: CombatantStats,
    #[cfg_attr(feature = "serde", serde(default))]
    pub equipment: Equipment,
    pub mob: MobStats,
    /// Externally tracked current health.
    pub health: u32,
    /// Externally tracked current mana; read once.
    pub mana: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub buffs: Vec<BuffSnapshot>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub abilities: Vec<AbilityDefinition>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub hotbar: Vec<HotbarBinding>,
}

/// Reasons a snapshot cannot start a session.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SnapshotError {
    #[error("character level must be at least 1, got {0}")]
    InvalidLevel(i32),

    #[error("character has no health left")]
    CharacterDown,

    #[error("mob `{0}` has no health")]
    MobHasNoHealth(String),

    #[error("hotbar slot {slot} references unknown ability `{ability}`")]
    UnknownHotbarAbility { slot: u8, ability: String },

    #[error(transparent)]
    Hotbar(#[from] AbilityError),
}

impl CombatError for SnapshotError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidLevel(_) => "SNAPSHOT_INVALID_LEVEL",
            Self::CharacterDown => "SNAPSHOT_CHARACTER_DOWN",
            Self::MobHasNoHealth(_) => "SNAPSHOT_MOB_NO_HEALTH",
            Self::UnknownHotbarAbility { .. } => "SNAPSHOT_UNKNOWN_HOTBAR_ABILITY",
            Self::Hotbar(inner) => inner.error_code(),
        }
    }
}

impl CombatSnapshot {
    pub fn new(character: CombatantStats, mob: MobStats, health: u32, mana: u32) -> Self {
        Self {
            character,
            equipment: Equipment::empty(),
            mob,
            health,
            mana,
            buffs: Vec::new(),
            abilities: Vec::new(),
            hotbar: Vec::new(),
        }
    }

    pub fn with_equipment(mut self, equipment: Equipment) -> Self {
        self.equipment = equipment;
        self
    }

    pub fn with_buff(mut self, buff: BuffSnapshot) -> Self {
        self.buffs.push(buff);
        self
    }

    pub fn with_ability(mut self, ability: AbilityDefinition) -> Self {
        self.abilities.push(ability);
        self
    }

    pub fn with_binding(mut self, binding: HotbarBinding) -> Self {
        self.hotbar.push(binding);
        self
    }

    /// Checks the snapshot and builds the static session context.
    pub fn build_context(&self, config: CombatConfig) -> Result<CombatContext, SnapshotError> {
        if self.character.level < 1 {
            return Err(SnapshotError::InvalidLevel(self.character.level));
        }
        if self.health == 0 {
            return Err(SnapshotError::CharacterDown);
        }
        if self.mob.max_health == 0 {
            return Err(SnapshotError::MobHasNoHealth(self.mob.name.clone()));
        }

        let abilities: AbilityBook = self.abilities.iter().cloned().collect();
        let hotbar = Hotbar::from_bindings(self.hotbar.iter().cloned())?;
        for binding in hotbar.iter() {
            if let HotbarAction::Ability(id) = &binding.action {
                if abilities.get(id).is_none() {
                    return Err(SnapshotError::UnknownHotbarAbility {
                        slot: binding.slot,
                        ability: id.clone(),
                    });
                }
            }
        }

        Ok(CombatContext {
            character: self.character.clone(),
            equipment: self.equipment.clone(),
            mob: self.mob.clone(),
            abilities,
            hotbar,
            config,
        })
    }
}
