//! Session orchestrator.
//!
//! [`CombatSession`] owns the combat worker and wires up the command and
//! event channels. [`CombatSession::stop`] is the single teardown path, used
//! both after a natural end and for forced teardown.

use std::sync::Arc;

use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::debug;

use combat_core::{
    CombatConfig, CombatEnv, CombatSnapshot, CombatState, PcgRng, RngOracle,
};

use crate::api::{CombatHost, Result, SessionError, SessionHandle};
use crate::events::{Event, EventBus, Topic};
use crate::workers::{Command, CombatWorker};

/// Session configuration.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub combat: CombatConfig,
    pub command_buffer_size: usize,
    pub event_buffer_size: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            combat: CombatConfig::default(),
            command_buffer_size: 32,
            event_buffer_size: 256,
        }
    }
}

/// A running combat session.
pub struct CombatSession {
    handle: SessionHandle,
    shutdown_tx: Option<oneshot::Sender<()>>,
    worker: JoinHandle<CombatState>,
}

impl CombatSession {
    pub fn builder() -> SessionBuilder {
        SessionBuilder::new()
    }

    /// Get a cloneable handle to this session
    pub fn handle(&self) -> SessionHandle {
        self.handle.clone()
    }

    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.handle.subscribe(topic)
    }

    /// True once the worker has exited (victory, defeat or stop).
    pub fn is_finished(&self) -> bool {
        self.worker.is_finished()
    }

    /// Waits for the session to end on its own and returns the final state.
    ///
    /// `onCombatEnd` has been delivered by the time this resolves.
    pub async fn join(self) -> Result<CombatState> {
        let Self {
            shutdown_tx,
            worker,
            ..
        } = self;
        let state = worker.await.map_err(SessionError::WorkerJoin)?;
        drop(shutdown_tx);
        Ok(state)
    }

    /// Tears the session down: cancels both timers and joins the worker.
    ///
    /// A session still in progress ends without a result and without
    /// `onCombatEnd`. Returns the final state.
    pub async fn stop(mut self) -> Result<CombatState> {
        if let Some(shutdown_tx) = self.shutdown_tx.take() {
            if shutdown_tx.send(()).is_err() {
                debug!(target: "combat::worker", "session already finished");
            }
        }
        self.worker.await.map_err(SessionError::WorkerJoin)
    }
}

/// Builder for [`CombatSession`].
pub struct SessionBuilder {
    config: SessionConfig,
    snapshot: Option<CombatSnapshot>,
    host: Option<Arc<dyn CombatHost>>,
    rng: Arc<dyn RngOracle>,
    seed: Option<u64>,
}

impl SessionBuilder {
    fn new() -> Self {
        Self {
            config: SessionConfig::default(),
            snapshot: None,
            host: None,
            rng: Arc::new(PcgRng),
            seed: None,
        }
    }

    /// Override session configuration
    pub fn config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    /// Shorthand for replacing only the engine configuration.
    pub fn combat_config(mut self, combat: CombatConfig) -> Self {
        self.config.combat = combat;
        self
    }

    /// Character, mob and resources at session start (required)
    pub fn snapshot(mut self, snapshot: CombatSnapshot) -> Self {
        self.snapshot = Some(snapshot);
        self
    }

    /// Host callbacks (required)
    pub fn host(mut self, host: Arc<dyn CombatHost>) -> Self {
        self.host = Some(host);
        self
    }

    /// Random source, [`PcgRng`] by default
    pub fn rng(mut self, rng: impl RngOracle + 'static) -> Self {
        self.rng = Arc::new(rng);
        self
    }

    /// Session seed; drawn from the thread RNG when unset
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the snapshot, seeds the state and spawns the worker.
    ///
    /// Must be called from within a tokio runtime.
    pub fn build(self) -> Result<CombatSession> {
        let snapshot = self.snapshot.ok_or(SessionError::MissingSnapshot)?;
        let host = self.host.ok_or(SessionError::MissingHost)?;
        let context = snapshot.build_context(self.config.combat.clone())?;
        let seed = self.seed.unwrap_or_else(rand::random);

        let state = {
            let env = CombatEnv::new(&context, self.rng.as_ref());
            CombatState::from_snapshot(&snapshot, &env, seed)
        };

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size.max(1));
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);

        let worker = CombatWorker::new(
            state,
            context,
            self.rng,
            host,
            command_rx,
            command_tx.downgrade(),
            shutdown_rx,
            event_bus.clone(),
        );
        let handle = SessionHandle::new(command_tx, event_bus);
        let worker = tokio::spawn(worker.run());

        Ok(CombatSession {
            handle,
            shutdown_tx: Some(shutdown_tx),
            worker,
        })
    }
}
