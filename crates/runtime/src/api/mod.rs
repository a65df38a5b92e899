//! Public runtime API surface.
//!
//! Types handed to hosts: the command handle, the host callback trait, and
//! the error enums they can observe.

pub mod errors;
pub mod handle;
pub mod host;

pub use errors::{HostError, Result, SessionError};
pub use handle::{HotbarOutcome, SessionHandle};
pub use host::CombatHost;
