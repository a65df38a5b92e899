//! Content factory for building session snapshots from data files.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use combat_core::{
    AbilityDefinition, CombatConfig, CombatSnapshot, Equipment, HotbarAction, Item, ItemSlot,
    MobStats,
};
use tracing::debug;

use crate::loaders::{
    AbilityLoader, CharacterLoader, CharacterSpec, ConfigLoader, ConsumableDefinition, ItemLoader,
    LoadResult, MobLoader,
};

/// Content factory that loads all combat content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── abilities.ron
/// ├── items.ron
/// ├── mobs.ron
/// └── characters.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load engine configuration from `config.toml`, falling back to the
    /// defaults when the file does not exist.
    pub fn load_config(&self) -> LoadResult<CombatConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            debug!(path = %path.display(), "no config.toml, using defaults");
            return Ok(CombatConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load ability definitions from `abilities.ron`.
    pub fn load_abilities(&self) -> LoadResult<Vec<AbilityDefinition>> {
        AbilityLoader::load(&self.data_dir.join("abilities.ron"))
    }

    /// Load items and consumables from `items.ron`.
    pub fn load_items(&self) -> LoadResult<crate::loaders::ItemCatalog> {
        ItemLoader::load(&self.data_dir.join("items.ron"))
    }

    /// Load mob stat records from `mobs.ron`.
    pub fn load_mobs(&self) -> LoadResult<Vec<MobStats>> {
        MobLoader::load(&self.data_dir.join("mobs.ron"))
    }

    /// Load character records from `characters.ron`.
    pub fn load_characters(&self) -> LoadResult<Vec<CharacterSpec>> {
        CharacterLoader::load(&self.data_dir.join("characters.ron"))
    }

    /// Load every catalog at once.
    pub fn load_catalog(&self) -> LoadResult<ContentCatalog> {
        let items = self.load_items()?;
        let catalog = ContentCatalog {
            config: self.load_config()?,
            abilities: index_by(self.load_abilities()?, |a| a.id.clone()),
            items: index_by(items.items, |i| i.id.clone()),
            consumables: index_by(items.consumables, |c| c.id.clone()),
            mobs: index_by(self.load_mobs()?, |m| m.id.clone()),
            characters: index_by(self.load_characters()?, |c| c.id.clone()),
        };
        debug!(
            abilities = catalog.abilities.len(),
            items = catalog.items.len(),
            consumables = catalog.consumables.len(),
            mobs = catalog.mobs.len(),
            characters = catalog.characters.len(),
            "content catalog loaded"
        );
        Ok(catalog)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

fn index_by<T>(values: Vec<T>, key: impl Fn(&T) -> String) -> BTreeMap<String, T> {
    values.into_iter().map(|value| (key(&value), value)).collect()
}

/// Every loaded catalog, indexed by id.
#[derive(Debug, Clone)]
pub struct ContentCatalog {
    pub config: CombatConfig,
    pub abilities: BTreeMap<String, AbilityDefinition>,
    pub items: BTreeMap<String, Item>,
    pub consumables: BTreeMap<String, ConsumableDefinition>,
    pub mobs: BTreeMap<String, MobStats>,
    pub characters: BTreeMap<String, CharacterSpec>,
}

impl ContentCatalog {
    pub fn consumable(&self, id: &str) -> Option<&ConsumableDefinition> {
        self.consumables.get(id)
    }

    /// Builds the session snapshot for `character_id` fighting `mob_id`,
    /// resolving every item and ability reference.
    pub fn snapshot(&self, character_id: &str, mob_id: &str) -> LoadResult<CombatSnapshot> {
        let character = self
            .characters
            .get(character_id)
            .ok_or_else(|| anyhow::anyhow!("Unknown character '{}'", character_id))?;
        let mob = self
            .mobs
            .get(mob_id)
            .ok_or_else(|| anyhow::anyhow!("Unknown mob '{}'", mob_id))?;

        let equipment = self.equipment(character)?;
        let stats = &character.stats;
        let mut snapshot = CombatSnapshot::new(
            stats.clone(),
            mob.clone(),
            character.health.unwrap_or(u32::MAX),
            character.mana.unwrap_or(u32::MAX),
        )
        .with_equipment(equipment);
        snapshot.buffs = character.buffs.clone();

        for id in &character.abilities {
            let ability = self
                .abilities
                .get(id)
                .ok_or_else(|| anyhow::anyhow!("Character '{}' knows unknown ability '{}'", character.id, id))?;
            snapshot.abilities.push(ability.clone());
        }
        for binding in &character.hotbar {
            if let HotbarAction::Consumable(id) = &binding.action {
                if !self.consumables.contains_key(id) {
                    anyhow::bail!(
                        "Hotbar slot {} of '{}' references unknown consumable '{}'",
                        binding.slot,
                        character.id,
                        id
                    );
                }
            }
            snapshot.hotbar.push(binding.clone());
        }
        Ok(snapshot)
    }

    fn equipment(&self, character: &CharacterSpec) -> LoadResult<Equipment> {
        let lookup = |id: &str, slot: ItemSlot| -> LoadResult<Item> {
            let item = self
                .items
                .get(id)
                .ok_or_else(|| anyhow::anyhow!("Character '{}' equips unknown item '{}'", character.id, id))?;
            if item.slot != slot {
                anyhow::bail!("Item '{}' cannot be equipped as {:?}", id, slot);
            }
            Ok(item.clone())
        };

        let spec = &character.equipment;
        if spec.armor.len() > CombatConfig::MAX_ARMOR_PIECES {
            anyhow::bail!(
                "Character '{}' wears {} armor pieces, at most {} allowed",
                character.id,
                spec.armor.len(),
                CombatConfig::MAX_ARMOR_PIECES
            );
        }
        let mut builder = Equipment::builder();
        if let Some(id) = &spec.weapon {
            builder = builder.weapon(lookup(id, ItemSlot::Weapon)?);
        }
        if let Some(id) = &spec.offhand {
            builder = builder.offhand(lookup(id, ItemSlot::Offhand)?);
        }
        for id in &spec.armor {
            builder = builder.armor(lookup(id, ItemSlot::Armor)?);
        }
        Ok(builder.build())
    }
}
