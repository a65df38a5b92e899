//! Timed status effects.
//!
//! Effects are kept in independent collections so each can follow its own
//! expiry schedule:
//!
//! | collection | expiry | payload per master tick |
//! |---|---|---|
//! | `dots` | remaining-tick counter | damage to the mob |
//! | `hots` | remaining-tick counter | healing to the character |
//! | `debuffs` | remaining-tick counter | none (stat penalty only) |
//! | `buffs` | absolute expiry tick | none (stat bonus only) |
//! | `shields` | absolute expiry tick or depletion | absorbs mob damage |
//! | `thorns` | absolute expiry tick (singleton) | reflects mob damage |
//!
//! Reapplying an effect with the same name refreshes it; only definitions
//! declaring `stacks_max > 1` accumulate independent instances.

pub mod collection;
pub mod resolve;
pub mod spec;
pub mod thorns;
pub mod types;

pub use collection::{ApplyOutcome, EffectCollection, Pulse};
pub use resolve::{ResolvedEffect, resolve};
pub use spec::{EffectKind, EffectSpec};
pub use thorns::{Thorns, ThornsSlot};
pub use types::{ActiveEffect, EffectCategory};

use crate::state::Tick;
use crate::stats::{BonusSource, StatKind};

/// Every active effect on the session.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectEngine {
    pub dots: EffectCollection,
    pub hots: EffectCollection,
    pub debuffs: EffectCollection,
    pub shields: EffectCollection,
    /// Stat buffs consumed by the stat aggregator.
    pub buffs: EffectCollection,
    pub thorns: ThornsSlot,
}

impl EffectEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Routes an effect to the collection owning its category.
    ///
    /// Thorns records are converted into the singleton slot and always replace
    /// whatever was there.
    pub fn apply(&mut self, effect: ActiveEffect) -> ApplyOutcome {
        match effect.category {
            EffectCategory::Dot => self.dots.apply(effect),
            EffectCategory::Hot => self.hots.apply(effect),
            EffectCategory::Debuff => self.debuffs.apply(effect),
            EffectCategory::Shield => self.shields.apply(effect),
            EffectCategory::Buff => self.buffs.apply(effect),
            EffectCategory::Thorns => {
                let replaced = self.thorns.set(Thorns {
                    name: effect.name,
                    reflect_percent: effect.magnitude.clamp(0, 100) as u32,
                    expires_at: effect.expires_at,
                });
                if replaced.is_some() {
                    ApplyOutcome::Refreshed
                } else {
                    ApplyOutcome::Added
                }
            }
        }
    }

    /// Drops every time-expired buff, shield and thorns entry.
    ///
    /// Returns the expired buffs so the caller can react to lost stat bonuses.
    pub fn expire(&mut self, now: Tick) -> Vec<ActiveEffect> {
        self.shields.expire(now);
        self.thorns.expire(now);
        self.buffs.expire(now)
    }

    pub fn is_empty(&self) -> bool {
        self.dots.is_empty()
            && self.hots.is_empty()
            && self.debuffs.is_empty()
            && self.shields.is_empty()
            && self.buffs.is_empty()
            && self.thorns.peek().is_none()
    }
}

impl BonusSource for EffectEngine {
    fn bonus(&self, stat: StatKind, now: Tick) -> i32 {
        self.buffs.bonus(stat, now) + self.debuffs.bonus(stat, now)
    }
}
