//! Damage calculation and application.

/// Flat damage bonus from strength: `floor((strength − 10) / 2)`.
pub fn strength_bonus(strength: i32) -> i32 {
    (strength - 10).div_euclid(2)
}

/// Fraction of raw damage absorbed by armor: `armor / (armor + 10 × level)`.
pub fn armor_effectiveness(armor: i32, attacker_level: i32) -> f64 {
    let armor = armor.max(0);
    let denominator = armor + 10 * attacker_level.max(0);
    if denominator <= 0 {
        return 0.0;
    }
    armor as f64 / denominator as f64
}

/// Calculate damage from a weapon roll.
///
/// # Formula
///
/// ```text
/// raw   = roll + floor((strength − 10) / 2)
/// final = max(1, floor(raw − raw × armor / (armor + 10 × level)))
/// ```
///
/// Evaluated in integers as `floor(raw × 10L / (armor + 10L))`, which is the
/// same quantity without floating point rounding at exact boundaries.
pub fn calculate_damage(roll: u32, strength: i32, attacker_level: i32, defender_armor: i32) -> u32 {
    let raw = roll as i64 + strength_bonus(strength) as i64;
    let armor = defender_armor.max(0) as i64;
    let level_term = 10 * attacker_level.max(0) as i64;
    let denominator = armor + level_term;

    let reduced = if denominator == 0 {
        raw
    } else {
        (raw * level_term).div_euclid(denominator)
    };

    reduced.max(1) as u32
}

/// Apply damage to current health (clamped to 0).
pub fn apply_damage(current: u32, damage: u32) -> u32 {
    current.saturating_sub(damage)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn armor_fifty_against_level_ten() {
        assert!((armor_effectiveness(50, 10) - 1.0 / 3.0).abs() < 1e-12);
        // raw 30 (roll 30, strength 10) → floor(30 − 10) = 20
        assert_eq!(calculate_damage(30, 10, 10, 50), 20);
    }

    #[test]
    fn strength_bonus_floors_toward_negative_infinity() {
        assert_eq!(strength_bonus(10), 0);
        assert_eq!(strength_bonus(15), 2);
        assert_eq!(strength_bonus(9), -1);
    }

    #[test]
    fn unarmored_hit_is_roll_plus_strength() {
        assert_eq!(calculate_damage(10, 10, 5, 0), 10);
        assert_eq!(calculate_damage(10, 14, 5, 0), 12);
    }

    #[test]
    fn damage_never_below_one() {
        assert_eq!(calculate_damage(1, 2, 1, 500), 1);
        assert_eq!(calculate_damage(0, 10, 0, 0), 1);
    }

    #[test]
    fn apply_damage_saturates() {
        assert_eq!(apply_damage(5, 10), 0);
        assert_eq!(apply_damage(50, 10), 40);
    }
}
