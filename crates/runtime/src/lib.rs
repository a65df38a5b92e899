//! Session orchestration for the combat engine.
//!
//! [`CombatSession`] owns the authoritative [`CombatState`](combat_core::CombatState)
//! inside a background worker driven by two owned timers (the master tick and
//! the cooldown countdown). Clients talk to it through a cloneable
//! [`SessionHandle`]; the host receives results through [`CombatHost`] and may
//! additionally follow the [`EventBus`] topics.
//!
//! Modules:
//! - [`api`]: handle, host trait, errors
//! - [`events`]: topic-based event bus
//! - [`workers`]: the combat worker loop and out-of-combat regeneration
pub mod api;
pub mod events;
pub mod session;
pub mod workers;

pub use api::{
    CombatHost, HostError, HotbarOutcome, Result, SessionError, SessionHandle,
};
pub use events::{Event, EventBus, LogEvent, OutcomeEvent, ResourceEvent, Topic};
pub use session::{CombatSession, SessionBuilder, SessionConfig};
pub use workers::{ResourceStore, RestingRegen};
