//! Hit chance calculation.

use crate::config::HitChanceParams;

/// Hit chance in percent.
///
/// # Formula
///
/// ```text
/// chance = base − 2 × (defender_level − attacker_level)
///               − 2 × (defender_evasiveness − 10)
/// clamped to [min, max]
/// ```
pub fn hit_chance(
    attacker_level: i32,
    defender_level: i32,
    defender_evasiveness: i32,
    params: &HitChanceParams,
) -> u32 {
    let level_penalty = 2 * (defender_level - attacker_level);
    let evasion_penalty = 2 * (defender_evasiveness - 10);
    (params.base - level_penalty - evasion_penalty).clamp(params.min, params.max) as u32
}

/// Compares a roll in `[0, 100)` against the hit chance.
pub fn check_hit(chance: u32, roll: u32) -> bool {
    roll < chance
}
