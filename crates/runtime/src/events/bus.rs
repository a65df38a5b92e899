//! Topic-based event bus implementation.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::broadcast;

use combat_core::CombatTelemetry;

use super::types::{LogEvent, OutcomeEvent, ResourceEvent};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Combat log lines
    Log,
    /// Health, mana and mob health changes
    Resources,
    /// HOT list, thorns and mob health, once per tick
    Telemetry,
    /// Victory or defeat
    Outcome,
}

/// Event wrapper that carries the typed payload of each topic
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    Log(LogEvent),
    Resources(ResourceEvent),
    Telemetry(CombatTelemetry),
    Outcome(OutcomeEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Log(_) => Topic::Log,
            Event::Resources(_) => Topic::Resources,
            Event::Telemetry(_) => Topic::Telemetry,
            Event::Outcome(_) => Topic::Outcome,
        }
    }
}

struct Channels {
    log: broadcast::Sender<Event>,
    resources: broadcast::Sender<Event>,
    telemetry: broadcast::Sender<Event>,
    outcome: broadcast::Sender<Event>,
}

impl Channels {
    fn get(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Log => &self.log,
            Topic::Resources => &self.resources,
            Topic::Telemetry => &self.telemetry,
            Topic::Outcome => &self.outcome,
        }
    }
}

/// Topic-based event bus
///
/// Consumers subscribe to the topics they display; publishing is
/// best-effort and never blocks the worker.
#[derive(Clone)]
pub struct EventBus {
    channels: Arc<Channels>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            channels: Arc::new(Channels {
                log: broadcast::channel(capacity).0,
                resources: broadcast::channel(capacity).0,
                telemetry: broadcast::channel(capacity).0,
                outcome: broadcast::channel(capacity).0,
            }),
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if self.channels.get(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.channels.get(topic).subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use combat_core::CombatResult;

    #[tokio::test]
    async fn subscribers_only_see_their_topic() {
        let bus = EventBus::with_capacity(8);
        let mut outcomes = bus.subscribe(Topic::Outcome);
        let mut logs = bus.subscribe(Topic::Log);

        bus.publish(Event::Outcome(OutcomeEvent {
            clock: 12,
            result: CombatResult::Victory,
        }));

        match outcomes.recv().await {
            Ok(Event::Outcome(event)) => assert_eq!(event.result, CombatResult::Victory),
            other => panic!("unexpected event: {other:?}"),
        }
        assert!(logs.try_recv().is_err());
    }

    #[test]
    fn publishing_without_subscribers_is_harmless() {
        let bus = EventBus::new();
        bus.publish(Event::Log(LogEvent {
            clock: 0,
            index: 0,
            line: "You engage a rat (level 1).".into(),
        }));
    }
}
