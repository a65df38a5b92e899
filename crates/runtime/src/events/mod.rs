//! Topic-based event bus for session events.
//!
//! The host callbacks are the primary contract of a session; the bus is an
//! optional display surface that any number of consumers can follow.

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{LogEvent, OutcomeEvent, ResourceEvent};
