//! Ordered effect collections with refresh / stack semantics.

use super::types::ActiveEffect;
use crate::state::Tick;
use crate::stats::{BonusSource, StatKind};

/// What happened when an effect was applied to a collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// First instance of this name.
    Added,
    /// An existing instance was reset to the new application's values.
    Refreshed,
    /// A new independent instance was added; carries the resulting stack count.
    Stacked(u32),
}

/// One periodic pulse taken from a collection entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pulse {
    pub name: String,
    pub magnitude: i32,
    /// Pulses left after this one.
    pub ticks_remaining: u32,
    /// The entry ran out and was removed.
    pub finished: bool,
}

/// Insertion-ordered list of effects of one category.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectCollection {
    entries: Vec<ActiveEffect>,
}

impl EffectCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies an effect using the refresh-unless-stackable policy.
    ///
    /// - `stacks_max <= 1`: an entry with the same name is overwritten in place
    ///   (full duration, new magnitude).
    /// - `stacks_max > 1`: independent instances accumulate up to the cap; at
    ///   the cap the oldest instance is overwritten instead.
    pub fn apply(&mut self, mut effect: ActiveEffect) -> ApplyOutcome {
        let cap = effect.stacks_max.max(1);
        let same_name = self.count(&effect.name) as u32;

        if cap == 1 || same_name >= cap {
            if let Some(existing) = self.entries.iter_mut().find(|e| e.name == effect.name) {
                effect.stacks = existing.stacks;
                *existing = effect;
                return ApplyOutcome::Refreshed;
            }
            effect.stacks = 1;
            self.entries.push(effect);
            return ApplyOutcome::Added;
        }

        effect.stacks = same_name + 1;
        self.entries.push(effect);
        if same_name == 0 {
            ApplyOutcome::Added
        } else {
            ApplyOutcome::Stacked(same_name + 1)
        }
    }

    /// Takes one pulse from the entry at `index`, removing it when its
    /// counter reaches zero.
    ///
    /// Callers iterating the collection advance their index only when
    /// `finished` is false.
    pub fn pulse_at(&mut self, index: usize) -> Option<Pulse> {
        let entry = self.entries.get_mut(index)?;
        entry.ticks_remaining = entry.ticks_remaining.saturating_sub(1);

        let pulse = Pulse {
            name: entry.name.clone(),
            magnitude: entry.magnitude,
            ticks_remaining: entry.ticks_remaining,
            finished: entry.ticks_remaining == 0,
        };
        if pulse.finished {
            self.entries.remove(index);
        }
        Some(pulse)
    }

    /// Removes entries that are no longer active at `now`, returning them.
    pub fn expire(&mut self, now: Tick) -> Vec<ActiveEffect> {
        let (active, expired): (Vec<_>, Vec<_>) =
            self.entries.drain(..).partition(|effect| effect.is_active(now));
        self.entries = active;
        expired
    }

    /// Drains up to `amount` from entries in insertion order, removing
    /// depleted ones. Returns the amount absorbed.
    pub fn absorb(&mut self, amount: u32, now: Tick) -> u32 {
        let mut left = amount as i32;
        for entry in self.entries.iter_mut().filter(|e| e.is_active(now)) {
            if left == 0 {
                break;
            }
            let taken = entry.magnitude.min(left);
            entry.magnitude -= taken;
            left -= taken;
        }
        self.entries.retain(|entry| entry.magnitude > 0);
        amount - left as u32
    }

    pub fn count(&self, name: &str) -> usize {
        self.entries.iter().filter(|e| e.name == name).count()
    }

    pub fn get(&self, name: &str) -> Option<&ActiveEffect> {
        self.entries.iter().find(|e| e.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActiveEffect> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl BonusSource for EffectCollection {
    fn bonus(&self, stat: StatKind, now: Tick) -> i32 {
        self.entries.iter().map(|e| e.stat_bonus(stat, now)).sum()
    }
}
