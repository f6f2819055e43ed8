//! # Change Notifications
//!
//! Events are the durable audit trail of the ledger. Each successful state
//! change appends exactly one event to an [`EventLog`]; a rejected call
//! appends nothing, because every operation validates before it mutates and
//! the host discards the working copy of a failed call anyway.

use serde::{Deserialize, Serialize};

use crate::account::Address;
use crate::Amount;

/// A single state-change notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Event {
    /// Balance moved between two accounts. `from == ZERO` is a mint,
    /// `to == ZERO` a burn.
    Transfer {
        /// Debited account.
        from: Address,
        /// Credited account.
        to: Address,
        /// Amount moved.
        amount: Amount,
    },

    /// The fee rate was replaced.
    FeeRateChanged {
        /// Rate before the change.
        old: u8,
        /// Rate after the change.
        new: u8,
    },

    /// The fee collector was replaced.
    CollectorChanged {
        /// Collector before the change.
        old: Address,
        /// Collector after the change.
        new: Address,
    },

    /// An exemption flag was set. Emitted even when the flag is unchanged.
    ExemptionChanged {
        /// Account whose flag was written.
        account: Address,
        /// Flag before the write.
        old: bool,
        /// Flag after the write.
        new: bool,
    },

    /// A delegated-spending allowance was set or consumed.
    Approval {
        /// Account granting the allowance.
        owner: Address,
        /// Account allowed to spend.
        spender: Address,
        /// Allowance after the change.
        amount: Amount,
    },

    /// Administrative ownership moved.
    OwnershipTransferred {
        /// Previous owner (ZERO at genesis).
        old: Address,
        /// New owner (ZERO once renounced).
        new: Address,
    },

    /// The pause switch was engaged.
    Paused {
        /// Principal that engaged it.
        by: Address,
    },

    /// The pause switch was released.
    Unpaused {
        /// Principal that released it.
        by: Address,
    },
}

/// Append-only buffer of events awaiting collection by the host.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an event.
    pub fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Buffered events, oldest first.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Number of buffered events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns `true` if nothing is buffered.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Removes the most recent event. Used to retract a notification whose
    /// state change was reverted within the same operation.
    pub(crate) fn retract_last(&mut self) -> Option<Event> {
        self.events.pop()
    }

    /// Removes and returns every buffered event.
    pub fn drain(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }
}
