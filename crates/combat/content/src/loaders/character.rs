//! Character catalog loader.
//!
//! Characters reference items and abilities by id; the
//! [`ContentCatalog`](crate::loaders::ContentCatalog) resolves them into a
//! session snapshot.

use std::path::Path;

use combat_core::{BuffSnapshot, CombatantStats, HotbarBinding};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Equipped item ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentSpec {
    #[serde(default)]
    pub weapon: Option<String>,
    #[serde(default)]
    pub offhand: Option<String>,
    #[serde(default)]
    pub armor: Vec<String>,
}

/// A playable character record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterSpec {
    pub id: String,
    pub name: String,
    pub stats: CombatantStats,
    #[serde(default)]
    pub equipment: EquipmentSpec,
    /// Current health; full when absent.
    #[serde(default)]
    pub health: Option<u32>,
    /// Current mana; full when absent.
    #[serde(default)]
    pub mana: Option<u32>,
    #[serde(default)]
    pub abilities: Vec<String>,
    #[serde(default)]
    pub hotbar: Vec<HotbarBinding>,
    #[serde(default)]
    pub buffs: Vec<BuffSnapshot>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CharacterCatalog {
    characters: Vec<CharacterSpec>,
}

/// Loader for character records from RON files.
pub struct CharacterLoader;

impl CharacterLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<CharacterSpec>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<CharacterSpec>> {
        let catalog: CharacterCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse character catalog RON: {}", e))?;

        for character in &catalog.characters {
            if character.stats.level < 1 {
                anyhow::bail!("Character '{}' must be at least level 1", character.id);
            }
        }
        Ok(catalog.characters)
    }
}
