//! In-memory host: a character record and a small consumable inventory.
use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

use async_trait::async_trait;
use tracing::{debug, info};

use combat_content::ConsumableDefinition;
use combat_core::{CombatResult, CombatState, ConsumableRestore};
use combat_runtime::{CombatHost, HostError};

pub struct SimHost {
    consumables: BTreeMap<String, ConsumableDefinition>,
    inventory: Mutex<HashMap<String, u32>>,
    /// Last health and mana reported by the session.
    record: Mutex<(u32, u32)>,
}

impl SimHost {
    pub fn new(consumables: BTreeMap<String, ConsumableDefinition>, charges: u32) -> Self {
        let inventory = consumables.keys().map(|id| (id.clone(), charges)).collect();
        Self {
            consumables,
            inventory: Mutex::new(inventory),
            record: Mutex::new((0, 0)),
        }
    }

    pub fn charges(&self, item_id: &str) -> u32 {
        self.inventory
            .lock()
            .map(|inventory| inventory.get(item_id).copied().unwrap_or(0))
            .unwrap_or(0)
    }

    pub fn record(&self) -> (u32, u32) {
        self.record.lock().map(|record| *record).unwrap_or((0, 0))
    }
}

#[async_trait]
impl CombatHost for SimHost {
    fn on_combat_end(&self, result: CombatResult, final_state: &CombatState) {
        info!(
            %result,
            clock = final_state.clock,
            health = final_state.character_health,
            mob_health = final_state.mob_health,
            "combat ended"
        );
    }

    fn on_health_change(&self, health: u32, mana: u32) {
        if let Ok(mut record) = self.record.lock() {
            *record = (health, mana);
        }
        debug!(health, mana, "character record updated");
    }

    async fn on_use_consumable(
        &self,
        item_id: &str,
    ) -> Result<Option<ConsumableRestore>, HostError> {
        let Some(definition) = self.consumables.get(item_id) else {
            return Ok(None);
        };
        let mut inventory = self
            .inventory
            .lock()
            .map_err(|_| HostError::new("inventory", "inventory lock poisoned"))?;
        match inventory.get_mut(item_id) {
            Some(charges) if *charges > 0 => {
                *charges -= 1;
                Ok(Some(definition.restore()))
            }
            _ => Ok(None),
        }
    }

    fn consumable_name(&self, item_id: &str) -> String {
        self.consumables
            .get(item_id)
            .map_or_else(|| item_id.to_string(), |definition| definition.name.clone())
    }
}
