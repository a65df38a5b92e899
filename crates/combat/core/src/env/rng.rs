//! RNG oracle for reproducible random number generation.
//!
//! Every random decision in the engine (attack-interval variance, hit rolls,
//! damage rolls) goes through [`RngOracle`], keyed by a seed derived from the
//! session seed and a per-roll nonce. Swapping the oracle is how tests pin
//! outcomes.

use std::sync::atomic::{AtomicUsize, Ordering};

/// RNG oracle for seeded random number generation.
///
/// Implementations must be deterministic: the same seed yields the same value.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Uniform integer in `[0, 100)`, used for hit rolls.
    fn roll_percent(&self, seed: u64) -> u32 {
        self.next_u32(seed) % 100
    }

    /// Generate a random value in range [min, max] inclusive.
    fn range(&self, seed: u64, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        let next = self.next_u32(seed);
        match (max - min).checked_add(1) {
            Some(range) => min + next % range,
            None => next,
        }
    }

    /// Uniform float in `[0, 1)`.
    fn unit(&self, seed: u64) -> f64 {
        self.next_u32(seed) as f64 / (u32::MAX as f64 + 1.0)
    }
}

/// PCG random number generator (PCG-XSH-RR, 64-bit state, 32-bit output).
///
/// Stateless: each call permutes the supplied seed, so the caller owns the
/// sequence through the nonce it mixes into [`compute_seed`].
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        Self::pcg_output(Self::pcg_step(seed))
    }
}

/// Oracle that always returns the same raw value.
///
/// `FixedRng(0)` always hits, always rolls minimum damage, and draws every
/// attack interval at the low edge of its variance band.
#[derive(Clone, Copy, Debug, Default)]
pub struct FixedRng(pub u32);

impl RngOracle for FixedRng {
    fn next_u32(&self, _seed: u64) -> u32 {
        self.0
    }
}

/// Oracle that replays a scripted list of raw values in order, cycling.
#[derive(Debug)]
pub struct ScriptedRng {
    values: Vec<u32>,
    cursor: AtomicUsize,
}

impl ScriptedRng {
    pub fn new(values: impl Into<Vec<u32>>) -> Self {
        let mut values = values.into();
        if values.is_empty() {
            values.push(0);
        }
        Self {
            values,
            cursor: AtomicUsize::new(0),
        }
    }
}

impl RngOracle for ScriptedRng {
    fn next_u32(&self, _seed: u64) -> u32 {
        let index = self.cursor.fetch_add(1, Ordering::Relaxed);
        self.values[index % self.values.len()]
    }
}

/// Roll purposes, mixed into the seed so one tick's rolls stay independent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum RollContext {
    Interval = 0,
    Hit = 1,
    Damage = 2,
}

/// Compute a roll seed from the session seed, the roll nonce, the acting
/// combatant and the roll purpose.
pub fn compute_seed(session_seed: u64, nonce: u64, actor_id: u32, context: RollContext) -> u64 {
    let mut hash = session_seed;

    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (actor_id as u64).wrapping_mul(0x517cc1b727220a95);
    hash ^= (context as u64).wrapping_mul(0x85ebca6b);

    // Final avalanche step
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pcg_is_deterministic() {
        let rng = PcgRng;
        let seed = compute_seed(42, 7, 1, RollContext::Hit);
        assert_eq!(rng.next_u32(seed), rng.next_u32(seed));
    }

    #[test]
    fn range_stays_inclusive() {
        let rng = PcgRng;
        for nonce in 0..500 {
            let value = rng.range(compute_seed(9, nonce, 0, RollContext::Damage), 3, 6);
            assert!((3..=6).contains(&value));
        }
    }

    #[test]
    fn full_width_range_uses_the_raw_value() {
        assert_eq!(FixedRng(7).range(0, 0, u32::MAX), 7);
        assert_eq!(FixedRng(u32::MAX).range(0, 0, u32::MAX), u32::MAX);
        assert_eq!(FixedRng(u32::MAX).range(0, 1, u32::MAX), 1);
    }

    #[test]
    fn unit_stays_below_one() {
        assert!(FixedRng(u32::MAX).unit(0) < 1.0);
        assert_eq!(FixedRng(0).unit(0), 0.0);
    }

    #[test]
    fn scripted_values_cycle() {
        let rng = ScriptedRng::new(vec![5, 99]);
        assert_eq!(rng.roll_percent(0), 5);
        assert_eq!(rng.roll_percent(0), 99);
        assert_eq!(rng.roll_percent(0), 5);
    }
}
