//! Engine configuration loader.

use std::path::Path;

use combat_core::CombatConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for engine configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config from a TOML file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> LoadResult<CombatConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<CombatConfig> {
        let config: CombatConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if config.tick_ms == 0 || config.cooldown_tick_ms == 0 {
            anyhow::bail!("tick_ms and cooldown_tick_ms must be positive");
        }
        if config.min_attack_ticks == 0 {
            anyhow::bail!("min_attack_ticks must be positive");
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config = ConfigLoader::parse("base_attack_ticks = 50\n[hit_chance]\nbase = 90\nmin = 5\nmax = 99\n")
            .expect("valid config");
        assert_eq!(config.base_attack_ticks, 50);
        assert_eq!(config.hit_chance.base, 90);
        assert_eq!(config.tick_ms, CombatConfig::DEFAULT_TICK_MS);
        assert_eq!(config.resting.interval_ms, 1000);
    }

    #[test]
    fn rejects_zero_tick() {
        assert!(ConfigLoader::parse("tick_ms = 0").is_err());
    }
}
