//! Error types surfaced by the runtime API.
//!
//! Requirement failures (mana, cooldown, equipment) are not errors; they come
//! back as [`Usability`](combat_core::Usability). These enums cover plumbing
//! failures and invalid requests only.
use thiserror::Error;
use tokio::sync::oneshot;

use combat_core::{AbilityError, CombatError, ErrorSeverity, SnapshotError};

pub type Result<T> = std::result::Result<T, SessionError>;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("combat worker reply channel closed")]
    ChannelClosed(#[source] oneshot::error::RecvError),

    #[error("combat worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("combat session has ended")]
    SessionEnded,

    #[error("unknown ability `{0}`")]
    UnknownAbility(String),

    #[error("hotbar slot {0} is empty")]
    EmptyHotbarSlot(u8),

    #[error("hotbar slot {0} is out of range")]
    InvalidHotbarSlot(u8),

    #[error("session requires a snapshot before building")]
    MissingSnapshot,

    #[error("session requires a host before building")]
    MissingHost,

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}

impl From<AbilityError> for SessionError {
    fn from(error: AbilityError) -> Self {
        match error {
            AbilityError::UnknownAbility(id) => Self::UnknownAbility(id),
            AbilityError::EmptySlot(slot) => Self::EmptyHotbarSlot(slot),
            AbilityError::InvalidSlot(slot) | AbilityError::DuplicateSlot(slot) => {
                Self::InvalidHotbarSlot(slot)
            }
        }
    }
}

impl CombatError for SessionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ChannelClosed(_) | Self::WorkerJoin(_) => ErrorSeverity::Internal,
            Self::SessionEnded => ErrorSeverity::Recoverable,
            Self::UnknownAbility(_)
            | Self::EmptyHotbarSlot(_)
            | Self::InvalidHotbarSlot(_)
            | Self::MissingSnapshot
            | Self::MissingHost
            | Self::Snapshot(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ChannelClosed(_) => "SESSION_CHANNEL_CLOSED",
            Self::WorkerJoin(_) => "SESSION_WORKER_JOIN",
            Self::SessionEnded => "SESSION_ENDED",
            Self::UnknownAbility(_) => "SESSION_UNKNOWN_ABILITY",
            Self::EmptyHotbarSlot(_) => "SESSION_EMPTY_HOTBAR_SLOT",
            Self::InvalidHotbarSlot(_) => "SESSION_INVALID_HOTBAR_SLOT",
            Self::MissingSnapshot => "SESSION_MISSING_SNAPSHOT",
            Self::MissingHost => "SESSION_MISSING_HOST",
            Self::Snapshot(_) => "SESSION_INVALID_SNAPSHOT",
        }
    }
}

/// Failure reported by a host collaborator (e.g. a failed persistence call
/// while consuming an item).
#[derive(Debug, Error)]
#[error("{context}: {message}")]
pub struct HostError {
    pub context: &'static str,
    pub message: String,
}

impl HostError {
    pub fn new(context: &'static str, message: impl Into<String>) -> Self {
        Self {
            context,
            message: message.into(),
        }
    }
}
