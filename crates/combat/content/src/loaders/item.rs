//! Item catalog loader: equippable items and consumables.

use std::collections::BTreeSet;
use std::path::Path;

use combat_core::{ConsumableRestore, Item};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// A consumable the host resolves when the player uses it in combat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsumableDefinition {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub health_restore: u32,
    #[serde(default)]
    pub mana_restore: u32,
}

impl ConsumableDefinition {
    pub fn restore(&self) -> ConsumableRestore {
        ConsumableRestore {
            health_restore: self.health_restore,
            mana_restore: self.mana_restore,
        }
    }
}

/// Item catalog structure for RON files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemCatalog {
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default)]
    pub consumables: Vec<ConsumableDefinition>,
}

/// Loader for the item catalog from RON files.
pub struct ItemLoader;

impl ItemLoader {
    pub fn load(path: &Path) -> LoadResult<ItemCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parses a catalog. Ids must be unique across items and consumables.
    pub fn parse(content: &str) -> LoadResult<ItemCatalog> {
        let catalog: ItemCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse item catalog RON: {}", e))?;

        let mut seen = BTreeSet::new();
        let ids = catalog
            .items
            .iter()
            .map(|item| item.id.as_str())
            .chain(catalog.consumables.iter().map(|c| c.id.as_str()));
        for id in ids {
            if !seen.insert(id) {
                anyhow::bail!("Duplicate item id '{}'", id);
            }
        }
        for item in &catalog.items {
            if item.damage_min > item.damage_max {
                anyhow::bail!(
                    "Item '{}' has damage_min {} above damage_max {}",
                    item.id,
                    item.damage_min,
                    item.damage_max
                );
            }
        }
        Ok(catalog)
    }
}
