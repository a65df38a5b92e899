//! Combat worker that owns the authoritative [`CombatState`].
//!
//! Receives commands from [`SessionHandle`](crate::api::SessionHandle), drives
//! [`CombatEngine`] from two owned timers, notifies the host and publishes
//! events to the [`EventBus`].

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::time::{Instant, interval_at};
use tracing::{debug, info, warn};

use combat_core::{
    AbilityOutcome, CombatContext, CombatEngine, CombatEnv, CombatResult, CombatState,
    ConsumableRestore, HotbarAction, RngOracle, TickReport, Usability,
};

use crate::api::{CombatHost, Result, SessionError};
use crate::events::{Event, EventBus, LogEvent, OutcomeEvent, ResourceEvent};

/// Commands that can be sent to the combat worker
pub enum Command {
    UseAbility {
        ability_id: String,
        reply: oneshot::Sender<Result<AbilityOutcome>>,
    },
    CanUse {
        ability_id: String,
        reply: oneshot::Sender<Result<Usability>>,
    },
    /// Looks up the action bound to a hotbar slot.
    ResolveSlot {
        slot: u8,
        reply: oneshot::Sender<Result<HotbarAction>>,
    },
    /// Hands the item to the host; the restore comes back as `ApplyConsumable`.
    UseConsumable {
        item_id: String,
        reply: oneshot::Sender<Result<Option<TickReport>>>,
    },
    ApplyConsumable {
        item_name: String,
        restore: ConsumableRestore,
        reply: oneshot::Sender<Result<Option<TickReport>>>,
    },
    ExternalResources {
        health: u32,
        mana: u32,
        reply: oneshot::Sender<TickReport>,
    },
    QueryState {
        reply: oneshot::Sender<CombatState>,
    },
}

/// Background task running one combat session.
///
/// The loop ends on the terminal transition or on shutdown; both timers are
/// owned by [`run`](Self::run) and dropped with it.
pub struct CombatWorker {
    state: CombatState,
    context: CombatContext,
    rng: Arc<dyn RngOracle>,
    host: Arc<dyn CombatHost>,
    command_rx: mpsc::Receiver<Command>,
    /// Lets consumable tasks re-enter the queue without keeping it open.
    command_tx: mpsc::WeakSender<Command>,
    shutdown_rx: oneshot::Receiver<()>,
    event_bus: EventBus,
}

impl CombatWorker {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        state: CombatState,
        context: CombatContext,
        rng: Arc<dyn RngOracle>,
        host: Arc<dyn CombatHost>,
        command_rx: mpsc::Receiver<Command>,
        command_tx: mpsc::WeakSender<Command>,
        shutdown_rx: oneshot::Receiver<()>,
        event_bus: EventBus,
    ) -> Self {
        Self {
            state,
            context,
            rng,
            host,
            command_rx,
            command_tx,
            shutdown_rx,
            event_bus,
        }
    }

    /// Main worker loop. Returns the final state.
    pub async fn run(mut self) -> CombatState {
        info!(
            target: "combat::worker",
            mob = %self.context.mob.name,
            health = self.state.character_health,
            mana = self.state.character_mana,
            "combat session started"
        );
        self.publish_log(0);

        let tick_period = Duration::from_millis(self.context.config.tick_ms.max(1));
        let cooldown_period = Duration::from_millis(self.context.config.cooldown_tick_ms.max(1));
        let start = Instant::now();
        let mut master = interval_at(start + tick_period, tick_period);
        let mut cooldowns = interval_at(start + cooldown_period, cooldown_period);

        while self.state.is_active {
            tokio::select! {
                biased;
                _ = &mut self.shutdown_rx => {
                    let stopped = CombatEngine::new(&mut self.state).stop();
                    debug!(target: "combat::worker", stopped, "shutdown requested");
                    break;
                }
                Some(cmd) = self.command_rx.recv() => {
                    self.handle_command(cmd);
                }
                _ = master.tick() => {
                    self.on_master_tick();
                }
                _ = cooldowns.tick() => {
                    self.on_cooldown_tick();
                }
            }
        }

        if let Some(result) = self.state.result {
            notify_end(Arc::clone(&self.host), &self.event_bus, &self.state, result).await;
        }
        self.state
    }

    fn handle_command(&mut self, cmd: Command) {
        let env = CombatEnv::new(&self.context, self.rng.as_ref());
        match cmd {
            Command::UseAbility { ability_id, reply } => {
                let outcome = CombatEngine::new(&mut self.state).use_ability(&ability_id, &env);
                if let Ok(AbilityOutcome::Used(report)) = &outcome {
                    self.dispatch(report);
                }
                if reply.send(outcome.map_err(SessionError::from)).is_err() {
                    debug!(target: "combat::worker", "UseAbility reply channel closed (caller dropped)");
                }
            }
            Command::CanUse { ability_id, reply } => {
                let usability = CombatEngine::new(&mut self.state).can_use(&ability_id, &env);
                if reply.send(usability.map_err(SessionError::from)).is_err() {
                    debug!(target: "combat::worker", "CanUse reply channel closed (caller dropped)");
                }
            }
            Command::ResolveSlot { slot, reply } => {
                let action = self.context.hotbar.action(slot).cloned();
                if reply.send(action.map_err(SessionError::from)).is_err() {
                    debug!(target: "combat::worker", "ResolveSlot reply channel closed (caller dropped)");
                }
            }
            Command::UseConsumable { item_id, reply } => {
                self.spawn_consumable(item_id, reply);
            }
            Command::ApplyConsumable {
                item_name,
                restore,
                reply,
            } => {
                let report =
                    CombatEngine::new(&mut self.state).apply_consumable(&item_name, restore, &env);
                self.dispatch(&report);
                if reply.send(Ok(Some(report))).is_err() {
                    debug!(target: "combat::worker", "ApplyConsumable reply channel closed (caller dropped)");
                }
            }
            Command::ExternalResources {
                health,
                mana,
                reply,
            } => {
                let report = CombatEngine::new(&mut self.state).accept_external(health, mana, &env);
                self.dispatch(&report);
                if reply.send(report).is_err() {
                    debug!(target: "combat::worker", "ExternalResources reply channel closed (caller dropped)");
                }
            }
            Command::QueryState { reply } => {
                if reply.send(self.state.clone()).is_err() {
                    debug!(target: "combat::worker", "QueryState reply channel closed (caller dropped)");
                }
            }
        }
    }

    fn on_master_tick(&mut self) {
        let env = CombatEnv::new(&self.context, self.rng.as_ref());
        let report = CombatEngine::new(&mut self.state).tick(&env);
        self.dispatch(&report);

        if self.state.is_active {
            let telemetry = self.state.telemetry(self.context.mob.max_health);
            self.host.on_telemetry(&telemetry);
            self.event_bus.publish(Event::Telemetry(telemetry));
        }
    }

    fn on_cooldown_tick(&mut self) {
        let ready = CombatEngine::new(&mut self.state).tick_cooldowns();
        if !ready.is_empty() {
            debug!(target: "combat::worker", ?ready, "abilities ready");
        }
    }

    /// Resolves the consumable on the host without stalling the timers.
    ///
    /// Collaborator failures degrade to "nothing consumed".
    fn spawn_consumable(
        &self,
        item_id: String,
        reply: oneshot::Sender<Result<Option<TickReport>>>,
    ) {
        if !self.state.is_active {
            let _ = reply.send(Ok(None));
            return;
        }
        let host = Arc::clone(&self.host);
        let command_tx = self.command_tx.clone();

        tokio::spawn(async move {
            let restore = match host.on_use_consumable(&item_id).await {
                Ok(restore) => restore,
                Err(error) => {
                    warn!(target: "combat::worker", item = %item_id, %error, "consumable use failed");
                    None
                }
            };
            let Some(restore) = restore else {
                let _ = reply.send(Ok(None));
                return;
            };
            let Some(command_tx) = command_tx.upgrade() else {
                let _ = reply.send(Err(SessionError::SessionEnded));
                return;
            };

            let command = Command::ApplyConsumable {
                item_name: host.consumable_name(&item_id),
                restore,
                reply,
            };
            if let Err(mpsc::error::SendError(command)) = command_tx.send(command).await {
                if let Command::ApplyConsumable { reply, .. } = command {
                    let _ = reply.send(Err(SessionError::SessionEnded));
                }
            }
        });
    }

    /// Reports one engine call to the host and the event bus.
    fn dispatch(&self, report: &TickReport) {
        self.publish_log(report.log_from);

        if report.resources_changed {
            self.host
                .on_health_change(self.state.character_health, self.state.character_mana);
        }
        if report.resources_changed || report.health_synced || report.mob_health_changed {
            self.event_bus.publish(Event::Resources(ResourceEvent {
                clock: self.state.clock,
                health: self.state.character_health,
                mana: self.state.character_mana,
                mob_health: self.state.mob_health,
            }));
        }
    }

    fn publish_log(&self, from: usize) {
        for (offset, line) in self.state.log.since(from).iter().enumerate() {
            self.event_bus.publish(Event::Log(LogEvent {
                clock: self.state.clock,
                index: from + offset,
                line: line.clone(),
            }));
        }
    }
}

/// Delivers the terminal result one scheduling step after it committed.
async fn notify_end(
    host: Arc<dyn CombatHost>,
    event_bus: &EventBus,
    state: &CombatState,
    result: CombatResult,
) {
    event_bus.publish(Event::Outcome(OutcomeEvent {
        clock: state.clock,
        result,
    }));

    let final_state = state.clone();
    let notify = tokio::spawn(async move {
        tokio::task::yield_now().await;
        host.on_combat_end(result, &final_state);
    });
    if let Err(error) = notify.await {
        warn!(target: "combat::worker", %error, "combat end notification failed");
    }
    info!(target: "combat::worker", %result, clock = state.clock, "combat session finished");
}
