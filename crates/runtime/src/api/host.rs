//! Callbacks the hosting application implements.
use async_trait::async_trait;

use combat_core::{CombatResult, CombatState, CombatTelemetry, ConsumableRestore};

use super::errors::HostError;

/// The host side of a combat session.
///
/// `on_health_change` and `on_telemetry` are invoked synchronously from the
/// worker and must not block; hosts that persist should hand the values off
/// to their own task. The host is free to echo `on_health_change` back through
/// [`SessionHandle::report_external_resources`](super::SessionHandle::report_external_resources);
/// the session swallows exactly one such echo per internal write, provided it
/// arrives before the next tick, ability use or consumable.
#[async_trait]
pub trait CombatHost: Send + Sync {
    /// Called exactly once when the session reaches victory or defeat.
    /// Never called for a forced stop.
    fn on_combat_end(&self, result: CombatResult, final_state: &CombatState);

    /// Called after every internal write to character health or mana.
    fn on_health_change(&self, health: u32, mana: u32);

    /// Resolves a consumable. `Ok(None)` means nothing was consumed; an error
    /// is logged and treated the same way.
    async fn on_use_consumable(
        &self,
        item_id: &str,
    ) -> Result<Option<ConsumableRestore>, HostError>;

    /// Display name used in the combat log for a consumable.
    fn consumable_name(&self, item_id: &str) -> String {
        item_id.to_string()
    }

    /// Live HOT list, thorns state and mob health, once per master tick.
    fn on_telemetry(&self, _telemetry: &CombatTelemetry) {}
}
