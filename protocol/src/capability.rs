//! # Collaborator Capabilities
//!
//! The engine does not know who is allowed to call it or whether the system
//! is halted. Those answers come from two small capabilities that the
//! surrounding contract supplies and invokes as ordinary calls, in a fixed
//! order, before the engine is entered.

use crate::account::Address;
use crate::error::LedgerError;

/// Global halt switch for transfers.
pub trait PauseCheck {
    /// Returns `true` while transfers are halted.
    fn is_paused(&self) -> bool;

    /// Fails with [`LedgerError::SystemPaused`] while halted.
    fn ensure_not_paused(&self) -> Result<(), LedgerError> {
        if self.is_paused() {
            return Err(LedgerError::SystemPaused);
        }
        Ok(())
    }
}

/// Single-principal gate for administrative operations.
pub trait AccessControl {
    /// The privileged principal. [`Address::ZERO`] once ownership has been
    /// renounced, in which case nobody passes the gate.
    fn owner(&self) -> Address;

    /// Fails with [`LedgerError::Unauthorized`] unless `caller` is the owner.
    fn ensure_owner(&self, caller: &Address) -> Result<(), LedgerError> {
        let owner = self.owner();
        if owner.is_zero() || *caller != owner {
            return Err(LedgerError::Unauthorized { caller: *caller });
        }
        Ok(())
    }
}
