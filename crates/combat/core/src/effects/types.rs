//! Active effect records.

use strum::{Display, IntoStaticStr};

use crate::state::Tick;
use crate::stats::StatKind;

/// Effect categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum EffectCategory {
    Buff,
    Debuff,
    Dot,
    Hot,
    Shield,
    Thorns,
}

impl EffectCategory {
    /// Whether entries expire by counting down master ticks rather than by
    /// reaching an absolute expiry tick.
    pub const fn is_periodic(self) -> bool {
        matches!(self, Self::Dot | Self::Hot | Self::Debuff)
    }
}

/// A single active effect instance.
///
/// `magnitude` means: per-tick damage (DOT), per-tick healing (HOT), stat
/// delta (buff/debuff), remaining absorb (shield), reflect percent (thorns).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveEffect {
    pub name: String,
    pub category: EffectCategory,
    pub stat: Option<StatKind>,
    pub magnitude: i32,
    pub duration_ticks: u64,
    pub expires_at: Tick,
    /// Remaining pulses for periodic categories.
    pub ticks_remaining: u32,
    /// Instance ordinal among same-named entries (1 when not stacking).
    pub stacks: u32,
    pub stacks_max: u32,
}

impl ActiveEffect {
    /// Periodic effect (DOT, HOT or debuff) lasting `ticks` master ticks.
    pub fn periodic(
        name: impl Into<String>,
        category: EffectCategory,
        magnitude: i32,
        ticks: u32,
        now: Tick,
    ) -> Self {
        Self {
            name: name.into(),
            category,
            stat: None,
            magnitude,
            duration_ticks: ticks as u64,
            expires_at: now + ticks as u64,
            ticks_remaining: ticks,
            stacks: 1,
            stacks_max: 1,
        }
    }

    pub fn dot(name: impl Into<String>, per_tick: i32, ticks: u32, now: Tick) -> Self {
        Self::periodic(name, EffectCategory::Dot, per_tick, ticks, now)
    }

    pub fn hot(name: impl Into<String>, per_tick: i32, ticks: u32, now: Tick) -> Self {
        Self::periodic(name, EffectCategory::Hot, per_tick, ticks, now)
    }

    pub fn debuff(
        name: impl Into<String>,
        stat: Option<StatKind>,
        magnitude: i32,
        ticks: u32,
        now: Tick,
    ) -> Self {
        let mut effect = Self::periodic(name, EffectCategory::Debuff, magnitude, ticks, now);
        effect.stat = stat;
        effect
    }

    /// Stat buff expiring at an absolute tick.
    pub fn buff(
        name: impl Into<String>,
        stat: impl Into<Option<StatKind>>,
        magnitude: i32,
        duration_ticks: u64,
        now: Tick,
    ) -> Self {
        Self {
            name: name.into(),
            category: EffectCategory::Buff,
            stat: stat.into(),
            magnitude,
            duration_ticks,
            expires_at: now + duration_ticks,
            ticks_remaining: 0,
            stacks: 1,
            stacks_max: 1,
        }
    }

    pub fn shield(name: impl Into<String>, absorb: i32, duration_ticks: u64, now: Tick) -> Self {
        Self {
            name: name.into(),
            category: EffectCategory::Shield,
            stat: None,
            magnitude: absorb,
            duration_ticks,
            expires_at: now + duration_ticks,
            ticks_remaining: 0,
            stacks: 1,
            stacks_max: 1,
        }
    }

    pub fn thorns(name: impl Into<String>, reflect_percent: i32, duration_ticks: u64, now: Tick) -> Self {
        Self {
            name: name.into(),
            category: EffectCategory::Thorns,
            stat: None,
            magnitude: reflect_percent,
            duration_ticks,
            expires_at: now + duration_ticks,
            ticks_remaining: 0,
            stacks: 1,
            stacks_max: 1,
        }
    }

    pub fn with_stacks_max(mut self, stacks_max: u32) -> Self {
        self.stacks_max = stacks_max.max(1);
        self
    }

    pub fn is_active(&self, now: Tick) -> bool {
        match self.category {
            EffectCategory::Dot | EffectCategory::Hot | EffectCategory::Debuff => {
                self.ticks_remaining > 0
            }
            EffectCategory::Shield => self.magnitude > 0 && now < self.expires_at,
            EffectCategory::Buff | EffectCategory::Thorns => now < self.expires_at,
        }
    }

    /// Signed contribution to `stat`: buffs add, debuffs subtract.
    pub fn stat_bonus(&self, stat: StatKind, now: Tick) -> i32 {
        if self.stat != Some(stat) || !self.is_active(now) {
            return 0;
        }
        match self.category {
            EffectCategory::Buff => self.magnitude,
            EffectCategory::Debuff => -self.magnitude,
            _ => 0,
        }
    }

    /// Remaining simulated time in ticks.
    pub fn remaining_ticks(&self, now: Tick) -> u64 {
        if self.category.is_periodic() {
            self.ticks_remaining as u64
        } else {
            self.expires_at.saturating_sub(now)
        }
    }
}
