//! Combat resolution formulas.
//!
//! Pure functions only; the engine feeds them rolls drawn from the
//! [`RngOracle`](crate::env::RngOracle) and applies the results.
//!
//! - `hit_chance`: level and evasiveness comparison, clamped
//! - `calculate_damage`: weapon roll + strength, reduced by armor effectiveness
//! - `CombatResult`: terminal outcome of a session

pub mod damage;
pub mod hit;
pub mod result;

pub use damage::{apply_damage, armor_effectiveness, calculate_damage, strength_bonus};
pub use hit::{check_hit, hit_chance};
pub use result::{AttackOutcome, CombatResult};
