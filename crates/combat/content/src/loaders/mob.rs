//! Mob catalog loader.

use std::path::Path;

use combat_core::MobStats;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Mob catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MobCatalog {
    pub mobs: Vec<MobStats>,
}

/// Loader for mob stat records from RON files.
pub struct MobLoader;

impl MobLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<MobStats>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<MobStats>> {
        let catalog: MobCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse mob catalog RON: {}", e))?;

        for mob in &catalog.mobs {
            if mob.max_health == 0 {
                anyhow::bail!("Mob '{}' must have positive max_health", mob.id);
            }
            if mob.damage_min > mob.damage_max {
                anyhow::bail!("Mob '{}' has an inverted damage range", mob.id);
            }
        }
        Ok(catalog.mobs)
    }
}
