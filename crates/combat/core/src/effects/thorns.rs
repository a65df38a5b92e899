//! Thorns: a singleton reflect slot.

use crate::state::Tick;

/// Reflects a percentage of incoming mob damage back onto the mob.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Thorns {
    pub name: String,
    pub reflect_percent: u32,
    pub expires_at: Tick,
}

impl Thorns {
    pub fn is_active(&self, now: Tick) -> bool {
        now < self.expires_at
    }

    /// Damage reflected for an incoming hit: `floor(damage × percent / 100)`.
    pub fn reflect(&self, damage: u32) -> u32 {
        (damage as u64 * self.reflect_percent as u64 / 100) as u32
    }
}

/// Holds at most one [`Thorns`]; the last write wins.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ThornsSlot {
    current: Option<Thorns>,
}

impl ThornsSlot {
    /// Replaces the slot content unconditionally, returning what was there.
    pub fn set(&mut self, thorns: Thorns) -> Option<Thorns> {
        self.current.replace(thorns)
    }

    /// Returns the unexpired entry; an expired entry is cleared on the way.
    pub fn active(&mut self, now: Tick) -> Option<&Thorns> {
        if self.current.as_ref().is_some_and(|t| !t.is_active(now)) {
            self.current = None;
        }
        self.current.as_ref()
    }

    /// Clears an expired entry, returning it.
    pub fn expire(&mut self, now: Tick) -> Option<Thorns> {
        if self.current.as_ref().is_some_and(|t| !t.is_active(now)) {
            return self.current.take();
        }
        None
    }

    /// Current content without expiry checks.
    pub fn peek(&self) -> Option<&Thorns> {
        self.current.as_ref()
    }
}
