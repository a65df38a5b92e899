//! Ability cooldown bookkeeping, counted in whole seconds.

use std::collections::BTreeMap;

/// Ability id → remaining cooldown seconds.
///
/// Entries at or below zero are treated as absent and dropped on the next
/// countdown.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CooldownMap {
    remaining: BTreeMap<String, i32>,
}

impl CooldownMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, ability_id: &str, secs: u32) {
        self.remaining.insert(ability_id.to_string(), secs as i32);
    }

    /// Remaining seconds, 0 when absent or elapsed.
    pub fn remaining(&self, ability_id: &str) -> u32 {
        self.remaining
            .get(ability_id)
            .copied()
            .filter(|secs| *secs > 0)
            .unwrap_or(0) as u32
    }

    pub fn is_ready(&self, ability_id: &str) -> bool {
        self.remaining(ability_id) == 0
    }

    /// One-second countdown. Returns the ids that became ready.
    pub fn tick_second(&mut self) -> Vec<String> {
        let mut ready = Vec::new();
        self.remaining.retain(|id, secs| {
            *secs -= 1;
            if *secs <= 0 {
                ready.push(id.clone());
                false
            } else {
                true
            }
        });
        ready
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.remaining
            .iter()
            .filter(|(_, secs)| **secs > 0)
            .map(|(id, secs)| (id.as_str(), *secs as u32))
    }

    pub fn is_empty(&self) -> bool {
        self.remaining.values().all(|secs| *secs <= 0)
    }
}
