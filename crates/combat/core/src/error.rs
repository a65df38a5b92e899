//! Shared error infrastructure for combat-core.
//!
//! Domain errors live next to the code that raises them (`AbilityError` in
//! `ability`, `SnapshotError` in `state`). Requirement failures such as
//! missing mana are not errors at all; see [`Usability`](crate::ability::Usability).

/// How a caller is expected to react to an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Temporary condition; the same request may succeed later.
    Recoverable,
    /// Invalid input; retrying unchanged will fail again.
    Validation,
    /// Unexpected state inconsistency.
    Internal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Common behaviour of every combat-core error.
pub trait CombatError: std::error::Error {
    fn severity(&self) -> ErrorSeverity;

    /// Stable machine-readable code, e.g. `"ABILITY_UNKNOWN"`.
    fn error_code(&self) -> &'static str;
}
