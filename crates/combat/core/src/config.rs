/// Engine configuration constants and tunable parameters.
///
/// All durations are expressed in master ticks (one tick = `tick_ms` of
/// simulated time) unless the field name says otherwise.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    /// Length of one master tick in milliseconds.
    pub tick_ms: u64,
    /// Period of the ability cooldown countdown in milliseconds.
    pub cooldown_tick_ms: u64,
    /// Baseline attack interval before dexterity and speed scaling.
    pub base_attack_ticks: u32,
    /// Uniform variance applied to every freshly drawn attack interval (±percent).
    pub attack_variance_percent: u32,
    /// Lower bound for any attack interval.
    pub min_attack_ticks: u32,
    /// In-combat regeneration fires once every this many ticks.
    pub regen_interval_ticks: u32,
    /// Cooldown applied to generic abilities that do not declare one.
    pub default_ability_cooldown_secs: u32,
    pub hit_chance: HitChanceParams,
    pub resting: RestingRegenParams,
}

/// Hit chance curve parameters (percent).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HitChanceParams {
    pub base: i32,
    pub min: i32,
    pub max: i32,
}

/// Out-of-combat regeneration parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RestingRegenParams {
    /// Period of each resting regeneration timer in milliseconds.
    pub interval_ms: u64,
    /// Fraction of max health restored per interval.
    pub health_rate: f64,
    /// Fraction of max mana restored per interval.
    pub mana_rate: f64,
    /// Extra health per point of constitution above 10.
    pub constitution_factor: f64,
    /// Extra mana per point of wisdom above 10.
    pub wisdom_factor: f64,
}

impl CombatConfig {
    // ===== compile-time constants used as type parameters =====
    /// Hotbar slots 1..=10 (keys `1`..`9`, `0`).
    pub const MAX_HOTBAR_SLOTS: usize = 10;
    /// Upper bound on simultaneously equipped armor pieces.
    pub const MAX_ARMOR_PIECES: usize = 8;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_TICK_MS: u64 = 100;
    pub const DEFAULT_COOLDOWN_TICK_MS: u64 = 1000;
    pub const DEFAULT_BASE_ATTACK_TICKS: u32 = 70;
    pub const DEFAULT_ATTACK_VARIANCE_PERCENT: u32 = 15;
    pub const DEFAULT_MIN_ATTACK_TICKS: u32 = 10;
    pub const DEFAULT_REGEN_INTERVAL_TICKS: u32 = 100;
    pub const DEFAULT_ABILITY_COOLDOWN_SECS: u32 = 10;

    pub fn new() -> Self {
        Self {
            tick_ms: Self::DEFAULT_TICK_MS,
            cooldown_tick_ms: Self::DEFAULT_COOLDOWN_TICK_MS,
            base_attack_ticks: Self::DEFAULT_BASE_ATTACK_TICKS,
            attack_variance_percent: Self::DEFAULT_ATTACK_VARIANCE_PERCENT,
            min_attack_ticks: Self::DEFAULT_MIN_ATTACK_TICKS,
            regen_interval_ticks: Self::DEFAULT_REGEN_INTERVAL_TICKS,
            default_ability_cooldown_secs: Self::DEFAULT_ABILITY_COOLDOWN_SECS,
            hit_chance: HitChanceParams::default(),
            resting: RestingRegenParams::default(),
        }
    }

    /// Number of master ticks covering `secs` seconds of simulated time.
    pub fn ticks_for_secs(&self, secs: u32) -> u64 {
        let tick_ms = self.tick_ms.max(1);
        (secs as u64 * 1000).div_ceil(tick_ms)
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for HitChanceParams {
    fn default() -> Self {
        Self {
            base: 95,
            min: 5,
            max: 99,
        }
    }
}

impl Default for RestingRegenParams {
    fn default() -> Self {
        Self {
            interval_ms: 1000,
            health_rate: 0.02,
            mana_rate: 0.03,
            constitution_factor: 0.5,
            wisdom_factor: 0.5,
        }
    }
}
