use serde::{Deserialize, Serialize};

use combat_core::{CombatResult, Tick};

/// One line appended to the combat log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEvent {
    pub clock: Tick,
    /// Position of the line in the session log.
    pub index: usize,
    pub line: String,
}

/// Character and mob resources after a change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceEvent {
    pub clock: Tick,
    pub health: u32,
    pub mana: u32,
    pub mob_health: u32,
}

/// Terminal result of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeEvent {
    pub clock: Tick,
    pub result: CombatResult,
}
