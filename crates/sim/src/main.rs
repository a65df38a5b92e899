//! Headless combat host: loads content, runs one session with an
//! auto-pilot, prints the outcome.
mod config;
mod host;
mod pilot;

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use combat_content::ContentFactory;
use combat_core::{CombatConfig, CombatSnapshot, EffectEngine};
use combat_runtime::{CombatSession, SessionConfig};

use config::SimConfig;
use host::SimHost;
use pilot::AutoPilot;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = SimConfig::from_env();
    let catalog = ContentFactory::new(config.content_dir.clone())
        .load_catalog()
        .with_context(|| format!("Failed to load content from {}", config.content_dir.display()))?;
    let snapshot = catalog.snapshot(&config.character, &config.mob)?;

    let host = Arc::new(SimHost::new(
        catalog.consumables.clone(),
        config.consumable_charges,
    ));
    let max_health = starting_max_health(&snapshot, &catalog.config)?;
    let bindings = snapshot.hotbar.clone();

    let mut builder = CombatSession::builder()
        .config(SessionConfig {
            combat: catalog.config.clone(),
            ..SessionConfig::default()
        })
        .snapshot(snapshot)
        .host(host.clone());
    if let Some(seed) = config.seed {
        builder = builder.seed(seed);
    }
    let session = builder.build()?;

    info!(character = %config.character, mob = %config.mob, "session started");
    let pilot = tokio::spawn(AutoPilot::new(session.handle(), &bindings, &catalog, max_health).run());

    let state = tokio::select! {
        joined = session.join() => joined?,
        _ = tokio::signal::ctrl_c() => {
            anyhow::bail!("interrupted");
        }
    };
    pilot.abort();

    if config.json {
        println!("{}", serde_json::to_string_pretty(&state)?);
        return Ok(());
    }

    let result = state
        .result
        .map_or_else(|| "stopped".to_string(), |result| result.to_string());
    for line in state.log.lines() {
        println!("{line}");
    }
    let (health, mana) = host.record();
    println!();
    println!(
        "{result} after {:.1}s: health {}, mana {}, {} health left on the mob",
        state.clock as f64 * catalog.config.tick_ms as f64 / 1000.0,
        state.character_health,
        state.character_mana,
        state.mob_health,
    );
    println!("host record: health {health}, mana {mana}");
    for id in catalog.consumables.keys() {
        println!("{id}: {} left", host.charges(id));
    }
    Ok(())
}

/// Maximum health at the start of the fight, gear included.
fn starting_max_health(snapshot: &CombatSnapshot, config: &CombatConfig) -> Result<u32> {
    let context = snapshot.build_context(config.clone())?;
    Ok(context.character_stats(&EffectEngine::new(), 0).maximums().health)
}

#[cfg(test)]
mod tests {
    use super::*;
    use combat_core::{CombatantStats, Equipment, Item, ItemSlot, MobStats, StatKind};

    #[test]
    fn starting_max_health_counts_equipment() {
        let character = CombatantStats::default().with_level(5);
        let mob = MobStats::new("dummy", "Training Dummy", 5, 100);
        let bare = CombatSnapshot::new(character.clone(), mob.clone(), 200, 100);
        let geared = CombatSnapshot::new(character, mob, 200, 100).with_equipment(
            Equipment::builder()
                .armor(Item::new("mail", "Chain Mail", ItemSlot::Armor).with_bonus(StatKind::Constitution, 5))
                .build(),
        );

        let config = CombatConfig::default();
        assert_eq!(starting_max_health(&bare, &config).unwrap(), 200);
        assert_eq!(starting_max_health(&geared, &config).unwrap(), 240);
    }
}
