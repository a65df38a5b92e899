//! Cloneable façade for issuing commands to a running session.
//!
//! [`SessionHandle`] hides the channel plumbing: every call sends one
//! [`Command`] to the combat worker and awaits its reply.
use tokio::sync::{broadcast, mpsc, oneshot};

use combat_core::{
    AbilityOutcome, CombatState, HotbarAction, TickReport, Usability, slot_for_key,
};

use super::errors::{Result, SessionError};
use crate::events::{Event, EventBus, Topic};
use crate::workers::Command;

/// Result of a hotbar invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HotbarOutcome {
    Ability(AbilityOutcome),
    /// `None` when the host consumed nothing.
    Consumable(Option<TickReport>),
}

/// Client-facing handle to a combat session.
#[derive(Clone)]
pub struct SessionHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl SessionHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    async fn request<T>(&self, command: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(command(reply_tx))
            .await
            .map_err(|_| SessionError::SessionEnded)?;

        reply_rx.await.map_err(SessionError::ChannelClosed)
    }

    /// Invokes an ability. Requirement failures come back as
    /// [`AbilityOutcome::Rejected`], not as errors.
    pub async fn use_ability(&self, ability_id: impl Into<String>) -> Result<AbilityOutcome> {
        let ability_id = ability_id.into();
        self.request(|reply| Command::UseAbility { ability_id, reply })
            .await?
    }

    /// Requirement check without side effects, for enabling host controls.
    pub async fn can_use(&self, ability_id: impl Into<String>) -> Result<Usability> {
        let ability_id = ability_id.into();
        self.request(|reply| Command::CanUse { ability_id, reply })
            .await?
    }

    /// Asks the host to resolve a consumable and applies the result.
    ///
    /// Resolves once the restore has been applied, or with `None` when the
    /// host consumed nothing.
    pub async fn use_consumable(&self, item_id: impl Into<String>) -> Result<Option<TickReport>> {
        let item_id = item_id.into();
        self.request(|reply| Command::UseConsumable { item_id, reply })
            .await?
    }

    /// Runs whatever is bound to `slot` (1..=10).
    pub async fn trigger_hotbar(&self, slot: u8) -> Result<HotbarOutcome> {
        let action = self
            .request(|reply| Command::ResolveSlot { slot, reply })
            .await??;

        match action {
            HotbarAction::Ability(ability_id) => {
                self.use_ability(ability_id).await.map(HotbarOutcome::Ability)
            }
            HotbarAction::Consumable(item_id) => self
                .use_consumable(item_id)
                .await
                .map(HotbarOutcome::Consumable),
        }
    }

    /// Keyboard shortcut: digits `1`..`9` and `0` trigger slots 1..10.
    ///
    /// Other keys and empty slots are ignored and yield `None`.
    pub async fn press_key(&self, key: char) -> Result<Option<HotbarOutcome>> {
        let Some(slot) = slot_for_key(key) else {
            return Ok(None);
        };
        match self.trigger_hotbar(slot).await {
            Ok(outcome) => Ok(Some(outcome)),
            Err(SessionError::EmptyHotbarSlot(_)) => Ok(None),
            Err(error) => Err(error),
        }
    }

    /// Offers the host's current view of the character's health and mana.
    pub async fn report_external_resources(&self, health: u32, mana: u32) -> Result<TickReport> {
        self.request(|reply| Command::ExternalResources {
            health,
            mana,
            reply,
        })
        .await
    }

    /// Clone of the current session state.
    pub async fn query_state(&self) -> Result<CombatState> {
        self.request(|reply| Command::QueryState { reply }).await
    }

    /// Subscribe to events from a specific topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}
