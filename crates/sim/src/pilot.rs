//! Auto-pilot: presses hotbar keys the way an impatient player would.
use std::time::Duration;

use tracing::debug;

use combat_content::ContentCatalog;
use combat_core::{HotbarAction, HotbarBinding};
use combat_runtime::{HotbarOutcome, Result, SessionError, SessionHandle};

/// Health percentage under which the pilot reaches for a healing item.
const DRINK_BELOW_PERCENT: u32 = 35;
const DECISION_INTERVAL: Duration = Duration::from_millis(500);

pub struct AutoPilot {
    handle: SessionHandle,
    abilities: Vec<HotbarBinding>,
    healing: Vec<HotbarBinding>,
    max_health: u32,
}

impl AutoPilot {
    pub fn new(
        handle: SessionHandle,
        bindings: &[HotbarBinding],
        catalog: &ContentCatalog,
        max_health: u32,
    ) -> Self {
        let mut abilities = Vec::new();
        let mut healing = Vec::new();
        for binding in bindings {
            match &binding.action {
                HotbarAction::Ability(_) => abilities.push(binding.clone()),
                HotbarAction::Consumable(id) => {
                    if catalog.consumable(id).is_some_and(|item| item.health_restore > 0) {
                        healing.push(binding.clone());
                    }
                }
            }
        }
        abilities.sort_by_key(|binding| binding.slot);
        Self {
            handle,
            abilities,
            healing,
            max_health: max_health.max(1),
        }
    }

    /// Runs until the session ends.
    pub async fn run(self) {
        let mut interval = tokio::time::interval(DECISION_INTERVAL);
        loop {
            interval.tick().await;
            match self.decide().await {
                Ok(()) => {}
                Err(SessionError::SessionEnded) | Err(SessionError::ChannelClosed(_)) => break,
                Err(error) => debug!(%error, "auto-pilot action failed"),
            }
        }
    }

    async fn decide(&self) -> Result<()> {
        let state = self.handle.query_state().await?;
        if !state.is_active {
            return Err(SessionError::SessionEnded);
        }

        if state.character_health * 100 < self.max_health * DRINK_BELOW_PERCENT {
            for binding in &self.healing {
                if let HotbarOutcome::Consumable(Some(_)) =
                    self.handle.trigger_hotbar(binding.slot).await?
                {
                    return Ok(());
                }
            }
        }

        for binding in &self.abilities {
            let HotbarAction::Ability(id) = &binding.action else {
                continue;
            };
            if self.handle.can_use(id.as_str()).await?.can_use {
                self.handle.trigger_hotbar(binding.slot).await?;
                return Ok(());
            }
        }
        Ok(())
    }
}
