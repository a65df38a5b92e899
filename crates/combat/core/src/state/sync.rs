//! Reconciliation with the externally owned character record.
//!
//! Every internal resource write is reported to the host, which usually
//! echoes it back as an external update. The guard swallows exactly one
//! external update after each internal write so the two directions cannot
//! oscillate. It only covers the reactive pass that follows the write: the
//! next engine pass disarms it, so a late update is never mistaken for an
//! echo. Mana is seeded from the host once and owned internally after
//! that; health keeps accepting external updates for the whole session.

/// One-shot re-entrancy guard plus the mana seeding flag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceSync {
    suppress_next: bool,
    mana_seeded: bool,
}

impl ResourceSync {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks mana as seeded. Returns true only on the first call.
    pub fn seed_mana(&mut self) -> bool {
        !std::mem::replace(&mut self.mana_seeded, true)
    }

    pub fn mana_seeded(&self) -> bool {
        self.mana_seeded
    }

    /// Arms the guard after an internal write was reported.
    pub fn note_internal_write(&mut self) {
        self.suppress_next = true;
    }

    /// Whether an incoming external update should be applied. Consumes the
    /// guard when it was armed.
    pub fn accept_external(&mut self) -> bool {
        !std::mem::replace(&mut self.suppress_next, false)
    }

    /// Disarms the guard at the start of an engine pass. An echo that did
    /// not arrive before the next pass is no longer expected.
    pub fn end_reactive_pass(&mut self) {
        self.suppress_next = false;
    }

    pub fn is_armed(&self) -> bool {
        self.suppress_next
    }
}
