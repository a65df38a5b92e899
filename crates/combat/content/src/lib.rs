//! Data-driven combat content and loaders.
//!
//! Turns RON/TOML data files into `combat-core` definitions:
//! - Ability definitions (RON)
//! - Equippable items and consumables (RON)
//! - Mob stat records (RON)
//! - Character records with equipment, known abilities and hotbar (RON)
//! - Engine configuration (TOML)
//!
//! Content feeds session snapshots and never appears in combat state.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    AbilityLoader, CharacterLoader, CharacterSpec, ConfigLoader, ConsumableDefinition,
    ContentCatalog, ContentFactory, EquipmentSpec, ItemCatalog, ItemLoader, LoadResult, MobLoader,
};
