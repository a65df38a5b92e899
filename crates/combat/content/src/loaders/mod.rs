//! Content loaders for reading combat data from files.

pub mod ability;
pub mod character;
pub mod config;
pub mod factory;
pub mod item;
pub mod mob;

pub use ability::AbilityLoader;
pub use character::{CharacterLoader, CharacterSpec, EquipmentSpec};
pub use config::ConfigLoader;
pub use factory::{ContentCatalog, ContentFactory};
pub use item::{ConsumableDefinition, ItemCatalog, ItemLoader};
pub use mob::MobLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
