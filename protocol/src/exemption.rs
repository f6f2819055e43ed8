//! # Fee Exemptions
//!
//! Accounts on this list never pay a fee, whether they send or receive.
//! Lookups default to `false`; only explicitly flagged accounts are stored.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::account::Address;

/// Set of fee-exempt accounts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExemptionRegistry {
    exempt: HashSet<Address>,
}

impl ExemptionRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if `account` is exempt.
    pub fn is_exempt(&self, account: &Address) -> bool {
        self.exempt.contains(account)
    }

    /// Writes the flag for `account` and returns the previous value.
    /// Writing the current value again is harmless.
    pub fn set_exempt(&mut self, account: Address, flag: bool) -> bool {
        if flag {
            !self.exempt.insert(account)
        } else {
            self.exempt.remove(&account)
        }
    }

    /// Exempt accounts, ordered by address.
    pub fn exempt_accounts(&self) -> Vec<Address> {
        let mut accounts: Vec<_> = self.exempt.iter().copied().collect();
        accounts.sort_unstable();
        accounts
    }

    /// Number of exempt accounts.
    pub fn len(&self) -> usize {
        self.exempt.len()
    }

    /// Returns `true` if no account is exempt.
    pub fn is_empty(&self) -> bool {
        self.exempt.is_empty()
    }
}
