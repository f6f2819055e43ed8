//! # Delegated Spending
//!
//! `owner → spender → amount`. An allowance caps the *gross* amount a
//! spender may move out of the owner's account, fee included. An allowance
//! of [`Amount::MAX`] is treated as unlimited and never decreases.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tollgate_protocol::{Address, Amount, LedgerError};

/// Approved spending limits.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Allowances {
    approved: HashMap<Address, HashMap<Address, Amount>>,
}

impl Allowances {
    /// No approvals.
    pub fn new() -> Self {
        Self::default()
    }

    /// Remaining allowance of `spender` over `owner`'s funds.
    pub fn allowance(&self, owner: &Address, spender: &Address) -> Amount {
        self.approved
            .get(owner)
            .and_then(|spenders| spenders.get(spender))
            .copied()
            .unwrap_or(0)
    }

    /// Overwrites the allowance. Setting 0 removes the entry.
    pub fn approve(&mut self, owner: Address, spender: Address, amount: Amount) {
        if amount == 0 {
            if let Some(spenders) = self.approved.get_mut(&owner) {
                spenders.remove(&spender);
                if spenders.is_empty() {
                    self.approved.remove(&owner);
                }
            }
            return;
        }
        self.approved.entry(owner).or_default().insert(spender, amount);
    }

    /// Fails with [`LedgerError::InsufficientAllowance`] unless `spender`
    /// may move `amount` out of `owner`.
    pub fn ensure(&self, owner: &Address, spender: &Address, amount: Amount) -> Result<(), LedgerError> {
        let allowance = self.allowance(owner, spender);
        if allowance < amount {
            return Err(LedgerError::InsufficientAllowance {
                owner: *owner,
                spender: *spender,
                allowance,
                needed: amount,
            });
        }
        Ok(())
    }

    /// Consumes `amount` of an allowance already checked with
    /// [`ensure`](Self::ensure). Unlimited allowances are left alone.
    pub fn spend(&mut self, owner: Address, spender: Address, amount: Amount) {
        let current = self.allowance(&owner, &spender);
        if current == Amount::MAX {
            return;
        }
        self.approve(owner, spender, current.saturating_sub(amount));
    }
}
