//! Stat aggregation.
//!
//! Effective stats are never stored. Every read recombines three layers:
//!
//! ```text
//! [ Base stats (character record) ]
//!      + [ Equipment bonuses (weapon, offhand, armor) ]
//!      + [ Active buff / debuff bonuses (unexpired at `now`) ]
//!      = Effective stat
//! ```
//!
//! Resource maximums are pure functions of effective level, constitution and
//! intelligence, so an expiring buff is reflected on the very next read.

pub mod aggregate;
pub mod attributes;
pub mod resources;

pub use aggregate::{BonusSource, EffectiveStats, effective};
pub use attributes::{CombatantStats, StatKind};
pub use resources::{ResourceKind, ResourceMaximums, max_health, max_mana};
