//! # Pause Switch
//!
//! While engaged, every balance movement is refused before any state is
//! read. Configuration, approvals and ownership stay available so the owner
//! can repair things while the system is halted.

use serde::{Deserialize, Serialize};
use tollgate_protocol::{Address, Event, LedgerError, PauseCheck};

/// Global halt flag.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PauseSwitch {
    paused: bool,
}

impl PauseSwitch {
    /// A released switch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Engages the switch.
    ///
    /// # Errors
    ///
    /// [`LedgerError::AlreadyPaused`] if already engaged.
    pub fn pause(&mut self, by: Address) -> Result<Event, LedgerError> {
        if self.paused {
            return Err(LedgerError::AlreadyPaused);
        }
        self.paused = true;
        Ok(Event::Paused { by })
    }

    /// Releases the switch.
    ///
    /// # Errors
    ///
    /// [`LedgerError::NotPaused`] if not engaged.
    pub fn unpause(&mut self, by: Address) -> Result<Event, LedgerError> {
        if !self.paused {
            return Err(LedgerError::NotPaused);
        }
        self.paused = false;
        Ok(Event::Unpaused { by })
    }
}

impl PauseCheck for PauseSwitch {
    fn is_paused(&self) -> bool {
        self.paused
    }
}
