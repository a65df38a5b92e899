//! Out-of-combat regeneration.
//!
//! One task per resource on a plain interval. Health regenerates
//! unconditionally; mana only while the host's in-combat flag is false. Each
//! task ends on its own once its resource is full. Hosts stop regeneration
//! before mounting a combat session and start a fresh one afterwards.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, interval_at};
use tracing::debug;

use combat_core::regen::{resting_health_regen, resting_mana_regen};
use combat_core::{EffectiveStats, ResourceKind, RestingRegenParams};

/// The host's record of current character resources.
pub trait ResourceStore: Send + Sync {
    fn current(&self, kind: ResourceKind) -> u32;
    fn set(&self, kind: ResourceKind, value: u32);
}

/// Running resting regeneration for one character.
pub struct RestingRegen {
    tasks: Vec<JoinHandle<()>>,
}

impl RestingRegen {
    /// Starts both resource tasks. `in_combat` pauses mana regeneration while
    /// it reads true.
    pub fn start(
        stats: &EffectiveStats,
        params: RestingRegenParams,
        store: Arc<dyn ResourceStore>,
        in_combat: watch::Receiver<bool>,
    ) -> Self {
        let max = stats.maximums();
        let period = Duration::from_millis(params.interval_ms.max(1));

        let health = ResourceTask {
            kind: ResourceKind::Health,
            max: max.health,
            amount: resting_health_regen(max.health, stats.constitution, &params),
            period,
            store: Arc::clone(&store),
            in_combat: None,
        };
        let mana = ResourceTask {
            kind: ResourceKind::Mana,
            max: max.mana,
            amount: resting_mana_regen(max.mana, stats.wisdom, &params),
            period,
            store,
            in_combat: Some(in_combat),
        };

        Self {
            tasks: vec![tokio::spawn(health.run()), tokio::spawn(mana.run())],
        }
    }

    /// True once both resources are full.
    pub fn is_finished(&self) -> bool {
        self.tasks.iter().all(JoinHandle::is_finished)
    }

    /// Cancels both tasks and waits for them to wind down.
    pub async fn stop(self) {
        for task in &self.tasks {
            task.abort();
        }
        for task in self.tasks {
            // Cancellation is the expected outcome here.
            let _ = task.await;
        }
    }
}

struct ResourceTask {
    kind: ResourceKind,
    max: u32,
    amount: u32,
    period: Duration,
    store: Arc<dyn ResourceStore>,
    /// Present only for resources that pause during combat.
    in_combat: Option<watch::Receiver<bool>>,
}

impl ResourceTask {
    async fn run(self) {
        let mut interval = interval_at(Instant::now() + self.period, self.period);
        loop {
            let current = self.store.current(self.kind);
            if current >= self.max {
                debug!(target: "combat::resting", kind = ?self.kind, current, "resource full");
                return;
            }

            interval.tick().await;

            if self.paused() {
                continue;
            }
            let current = self.store.current(self.kind);
            let next = current.saturating_add(self.amount).min(self.max);
            self.store.set(self.kind, next);
            debug!(target: "combat::resting", kind = ?self.kind, from = current, to = next, "regenerated");
        }
    }

    fn paused(&self) -> bool {
        self.in_combat
            .as_ref()
            .is_some_and(|in_combat| *in_combat.borrow())
    }
}
