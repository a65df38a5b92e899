//! Player-invoked abilities.
//!
//! The gate answers "may this ability be used now?" without side effects
//! ([`can_use`]); the engine performs the invocation once the gate passes.
//! Requirement failures are ordinary values ([`Usability`]), never errors, so
//! hosts can grey out controls from the same call.

pub mod cooldown;
pub mod definition;
pub mod error;
pub mod gate;
pub mod hotbar;
pub mod legacy;

pub use cooldown::CooldownMap;
pub use definition::{AbilityBook, AbilityCategory, AbilityDefinition};
pub use error::AbilityError;
pub use gate::{Usability, can_use, matches_type_list};
pub use hotbar::{Hotbar, HotbarAction, HotbarBinding, slot_for_key};
pub use legacy::{default_primary_stat, legacy_amount, resolve_legacy};
