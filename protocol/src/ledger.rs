//! # Ledger — Balances and Total Supply
//!
//! The ledger is the only place balances change. It offers exactly one
//! mutation primitive, [`Ledger::move_funds`], and that primitive either
//! applies completely or not at all: every check (source balance,
//! destination overflow, supply overflow) runs before the first write.
//!
//! The invariant `total_supply == Σ balances` is maintained here and nowhere
//! else. Ordinary moves leave the supply untouched; moves from
//! [`Address::ZERO`] mint and moves to it burn.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::account::Address;
use crate::error::LedgerError;
use crate::Amount;

/// Per-account balances plus the total-supply counter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ledger {
    /// Non-zero balances. Accounts drained to zero are removed.
    balances: HashMap<Address, Amount>,
    /// Sum of all balances.
    total_supply: Amount,
}

/// What a single [`Ledger::move_funds`] did to the supply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKind {
    /// Balance moved between two real accounts (or to itself).
    Transfer,
    /// New supply created for the destination.
    Mint,
    /// Supply destroyed from the source.
    Burn,
    /// `ZERO → ZERO`; nothing happened.
    Noop,
}

impl Ledger {
    /// Creates an empty ledger with zero supply.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current balance of `account`, or 0 if it has never held funds.
    pub fn balance_of(&self, account: &Address) -> Amount {
        self.balances.get(account).copied().unwrap_or(0)
    }

    /// Total supply in circulation.
    pub fn total_supply(&self) -> Amount {
        self.total_supply
    }

    /// Number of accounts with a non-zero balance.
    pub fn holder_count(&self) -> usize {
        self.balances.len()
    }

    /// Every non-zero balance, ordered by address.
    pub fn holders(&self) -> Vec<(Address, Amount)> {
        let mut holders: Vec<_> = self.balances.iter().map(|(a, b)| (*a, *b)).collect();
        holders.sort_unstable_by_key(|(addr, _)| *addr);
        holders
    }

    /// Sum of every balance, or `None` if the sum itself overflows (which
    /// would mean the supply invariant is already broken).
    pub fn sum_of_balances(&self) -> Option<Amount> {
        self.balances
            .values()
            .try_fold(0 as Amount, |acc, b| acc.checked_add(*b))
    }

    /// Returns `true` when the supply counter matches the balances.
    pub fn is_conserved(&self) -> bool {
        self.sum_of_balances() == Some(self.total_supply)
    }

    /// Fails with [`LedgerError::InsufficientBalance`] unless `account`
    /// holds at least `amount`. The null identity always passes: it is the
    /// mint source and has no balance to check.
    pub fn ensure_balance(&self, account: &Address, amount: Amount) -> Result<(), LedgerError> {
        if account.is_zero() {
            return Ok(());
        }
        let balance = self.balance_of(account);
        if balance < amount {
            return Err(LedgerError::InsufficientBalance {
                account: *account,
                balance,
                needed: amount,
            });
        }
        Ok(())
    }

    /// Moves `amount` from `from` to `to`.
    ///
    /// - `from == ZERO` mints, `to == ZERO` burns, both zero is a no-op.
    /// - `from == to` changes nothing but still requires the balance.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::InsufficientBalance`] if `from` holds less than `amount`.
    /// - [`LedgerError::SupplyOverflow`] if a mint would overflow the supply.
    /// - [`LedgerError::BalanceOverflow`] if the credit would overflow `to`.
    ///
    /// On error nothing has been written.
    pub fn move_funds(
        &mut self,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> Result<MoveKind, LedgerError> {
        match (from.is_zero(), to.is_zero()) {
            (true, true) => Ok(MoveKind::Noop),
            (true, false) => {
                let new_supply =
                    self.total_supply
                        .checked_add(amount)
                        .ok_or(LedgerError::SupplyOverflow {
                            total_supply: self.total_supply,
                            amount,
                        })?;
                // Supply bounds every balance, so the credit cannot overflow.
                self.credit(to, amount)?;
                self.total_supply = new_supply;
                Ok(MoveKind::Mint)
            }
            (false, true) => {
                self.ensure_balance(from, amount)?;
                self.debit(from, amount);
                self.total_supply -= amount;
                Ok(MoveKind::Burn)
            }
            (false, false) => {
                self.ensure_balance(from, amount)?;
                if from == to {
                    return Ok(MoveKind::Transfer);
                }
                let to_balance = self.balance_of(to);
                to_balance
                    .checked_add(amount)
                    .ok_or(LedgerError::BalanceOverflow {
                        account: *to,
                        balance: to_balance,
                        credit: amount,
                    })?;
                self.debit(from, amount);
                self.credit(to, amount)?;
                Ok(MoveKind::Transfer)
            }
        }
    }

    /// Subtracts from a balance already known to cover `amount`.
    fn debit(&mut self, account: &Address, amount: Amount) {
        if let Some(balance) = self.balances.get_mut(account) {
            *balance -= amount;
            if *balance == 0 {
                self.balances.remove(account);
            }
        }
    }

    fn credit(&mut self, account: &Address, amount: Amount) -> Result<(), LedgerError> {
        if amount == 0 {
            return Ok(());
        }
        let balance = self.balances.entry(*account).or_insert(0);
        *balance = balance
            .checked_add(amount)
            .ok_or(LedgerError::BalanceOverflow {
                account: *account,
                balance: *balance,
                credit: amount,
            })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> Address {
        Address::from_low_u64(1)
    }

    fn bob() -> Address {
        Address::from_low_u64(2)
    }

    fn funded(amount: Amount) -> Ledger {
        let mut ledger = Ledger::new();
        ledger.move_funds(&Address::ZERO, &alice(), amount).unwrap();
        ledger
    }

    #[test]
    fn unknown_account_has_zero_balance() {
        let ledger = Ledger::new();
        assert_eq!(ledger.balance_of(&alice()), 0);
        assert_eq!(ledger.total_supply(), 0);
    }

    #[test]
    fn mint_increases_supply_and_balance() {
        let ledger = funded(1_000);
        assert_eq!(ledger.balance_of(&alice()), 1_000);
        assert_eq!(ledger.total_supply(), 1_000);
        assert!(ledger.is_conserved());
    }

    #[test]
    fn move_is_conservative() {
        let mut ledger = funded(1_000);
        let kind = ledger.move_funds(&alice(), &bob(), 300).unwrap();
        assert_eq!(kind, MoveKind::Transfer);
        assert_eq!(ledger.balance_of(&alice()), 700);
        assert_eq!(ledger.balance_of(&bob()), 300);
        assert_eq!(ledger.total_supply(), 1_000);
        assert!(ledger.is_conserved());
    }

    #[test]
    fn insufficient_balance_leaves_state_untouched() {
        let mut ledger = funded(100);
        let err = ledger.move_funds(&alice(), &bob(), 101).unwrap_err();
        assert_eq!(
            err,
            LedgerError::InsufficientBalance {
                account: alice(),
                balance: 100,
                needed: 101
            }
        );
        assert_eq!(ledger.balance_of(&alice()), 100);
        assert_eq!(ledger.balance_of(&bob()), 0);
    }

    #[test]
    fn self_move_is_noop_but_checks_balance() {
        let mut ledger = funded(100);
        ledger.move_funds(&alice(), &alice(), 100).unwrap();
        assert_eq!(ledger.balance_of(&alice()), 100);
        assert!(ledger.move_funds(&alice(), &alice(), 101).is_err());
    }

    #[test]
    fn burn_decreases_supply() {
        let mut ledger = funded(1_000);
        let kind = ledger.move_funds(&alice(), &Address::ZERO, 400).unwrap();
        assert_eq!(kind, MoveKind::Burn);
        assert_eq!(ledger.total_supply(), 600);
        assert_eq!(ledger.balance_of(&alice()), 600);
        assert!(ledger.is_conserved());
    }

    #[test]
    fn zero_to_zero_is_noop() {
        let mut ledger = funded(10);
        let kind = ledger
            .move_funds(&Address::ZERO, &Address::ZERO, 5)
            .unwrap();
        assert_eq!(kind, MoveKind::Noop);
        assert_eq!(ledger.total_supply(), 10);
    }

    #[test]
    fn mint_overflow_rejected() {
        let mut ledger = funded(Amount::MAX);
        let err = ledger.move_funds(&Address::ZERO, &bob(), 1).unwrap_err();
        assert!(matches!(err, LedgerError::SupplyOverflow { .. }));
        assert_eq!(ledger.balance_of(&bob()), 0);
        assert_eq!(ledger.total_supply(), Amount::MAX);
    }

    #[test]
    fn drained_accounts_are_pruned() {
        let mut ledger = funded(50);
        ledger.move_funds(&alice(), &bob(), 50).unwrap();
        assert_eq!(ledger.holder_count(), 1);
        assert_eq!(ledger.holders(), vec![(bob(), 50)]);
    }

    #[test]
    fn zero_amount_move_succeeds_for_empty_account() {
        let mut ledger = Ledger::new();
        ledger.move_funds(&alice(), &bob(), 0).unwrap();
        assert_eq!(ledger.holder_count(), 0);
    }
}
