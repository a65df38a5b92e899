//! Background workers.
//!
//! - [`CombatWorker`]: owns one session's state and timers
//! - [`RestingRegen`]: out-of-combat regeneration between sessions

mod combat;
mod resting;

pub use combat::{Command, CombatWorker};
pub use resting::{ResourceStore, RestingRegen};
