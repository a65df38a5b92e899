//! Ability lookup errors.

use crate::error::{CombatError, ErrorSeverity};

/// Errors raised when an ability or hotbar reference cannot be resolved.
///
/// Failing a requirement (mana, cooldown, equipment) is not an error.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AbilityError {
    /// The ability id is not in the character's ability book.
    #[error("unknown ability `{0}`")]
    UnknownAbility(String),

    /// Slot number outside 1..=10.
    #[error("hotbar slot {0} is out of range")]
    InvalidSlot(u8),

    /// Two bindings target the same slot.
    #[error("hotbar slot {0} is bound twice")]
    DuplicateSlot(u8),

    /// Nothing is bound to the slot.
    #[error("hotbar slot {0} is empty")]
    EmptySlot(u8),
}

impl CombatError for AbilityError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownAbility(_) | Self::InvalidSlot(_) | Self::DuplicateSlot(_) => {
                ErrorSeverity::Validation
            }
            Self::EmptySlot(_) => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownAbility(_) => "ABILITY_UNKNOWN",
            Self::InvalidSlot(_) => "ABILITY_INVALID_SLOT",
            Self::DuplicateSlot(_) => "ABILITY_DUPLICATE_SLOT",
            Self::EmptySlot(_) => "ABILITY_EMPTY_SLOT",
        }
    }
}
