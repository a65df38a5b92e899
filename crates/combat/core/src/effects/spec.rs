//! Declarative effect definitions carried by abilities.

use strum::{Display, EnumString};

use crate::stats::StatKind;

/// Kind of effect an ability declares.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum EffectKind {
    /// Instant damage to the mob.
    Damage,
    /// Instant healing to the character, clamped to max health.
    Heal,
    Dot,
    Hot,
    Buff,
    Debuff,
    Shield,
    Thorns,
}

/// One effect declared by an ability definition.
///
/// `value` is the unscaled amount: instant damage/heal, per-tick amount for
/// DOT/HOT, stat delta for buffs/debuffs, absorb for shields, reflect percent
/// for thorns. When `scaling_stat` is set the resolved amount becomes
/// `value + floor((stat − 10) × scaling)`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectSpec {
    pub kind: EffectKind,
    /// Display / stacking name; defaults to the ability name.
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: Option<String>,
    pub value: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub scaling_stat: Option<StatKind>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub scaling: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub duration_secs: u32,
    /// Stat affected by buffs and debuffs.
    #[cfg_attr(feature = "serde", serde(default))]
    pub stat: Option<StatKind>,
    #[cfg_attr(feature = "serde", serde(default = "default_stacks_max"))]
    pub stacks_max: u32,
}

#[cfg(feature = "serde")]
fn default_stacks_max() -> u32 {
    1
}

impl EffectSpec {
    pub fn new(kind: EffectKind, value: i32) -> Self {
        Self {
            kind,
            name: None,
            value,
            scaling_stat: None,
            scaling: 0.0,
            duration_secs: 0,
            stat: None,
            stacks_max: 1,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn scaled_by(mut self, stat: StatKind, scaling: f64) -> Self {
        self.scaling_stat = Some(stat);
        self.scaling = scaling;
        self
    }

    pub fn lasting(mut self, duration_secs: u32) -> Self {
        self.duration_secs = duration_secs;
        self
    }

    pub fn on_stat(mut self, stat: StatKind) -> Self {
        self.stat = Some(stat);
        self
    }

    pub fn stacking(mut self, stacks_max: u32) -> Self {
        self.stacks_max = stacks_max.max(1);
        self
    }
}
