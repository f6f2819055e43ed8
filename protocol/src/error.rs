//! # Ledger Errors
//!
//! A single failure channel for the core and the collaborators that wrap it.
//! Every variant is a normal rejection of an invalid request: the invocation
//! that produced it aborts and leaves no observable state change behind.

use thiserror::Error;

use crate::account::Address;
use crate::Amount;

/// Errors that can occur while moving balances or reconfiguring the engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// The source account does not hold enough to cover the move.
    #[error("insufficient balance: {account} has {balance}, needs {needed}")]
    InsufficientBalance {
        /// Account being debited.
        account: Address,
        /// Its current balance.
        balance: Amount,
        /// Amount the move required.
        needed: Amount,
    },

    /// Crediting the destination would overflow its balance.
    #[error("balance overflow: {account} holds {balance}, credit {credit}")]
    BalanceOverflow {
        /// Account being credited.
        account: Address,
        /// Its current balance.
        balance: Amount,
        /// Amount that caused the overflow.
        credit: Amount,
    },

    /// Minting would overflow the total supply counter.
    #[error("supply overflow: minting {amount} on top of {total_supply}")]
    SupplyOverflow {
        /// Supply before the mint.
        total_supply: Amount,
        /// Amount that was attempted.
        amount: Amount,
    },

    /// A fee rate above 100 percent was requested.
    #[error("invalid fee rate: {rate} exceeds {max}")]
    InvalidRate {
        /// The rejected rate.
        rate: u8,
        /// The maximum accepted rate.
        max: u8,
    },

    /// The null identity was offered as fee collector.
    #[error("collector cannot be the null address")]
    NullCollector,

    /// A taxable transfer produced a fee but no collector is configured.
    #[error("fee collector is not configured")]
    CollectorUnset,

    /// Transfers are halted by the pause switch.
    #[error("system is paused")]
    SystemPaused,

    /// The pause switch was engaged while already engaged.
    #[error("system is already paused")]
    AlreadyPaused,

    /// The pause switch was released while not engaged.
    #[error("system is not paused")]
    NotPaused,

    /// The caller lacks the privilege the operation requires.
    #[error("unauthorized caller: {caller}")]
    Unauthorized {
        /// The principal that made the call.
        caller: Address,
    },

    /// A delegated spend exceeds the approved allowance.
    #[error("insufficient allowance: {spender} may spend {allowance} of {owner}, needs {needed}")]
    InsufficientAllowance {
        /// Account whose funds are being spent.
        owner: Address,
        /// Account spending them.
        spender: Address,
        /// Remaining approved amount.
        allowance: Amount,
        /// Amount the transfer required.
        needed: Amount,
    },

    /// A public transfer named the null identity as sender.
    #[error("invalid sender: {0}")]
    InvalidSender(Address),

    /// A public transfer named the null identity as receiver.
    #[error("invalid receiver: {0}")]
    InvalidReceiver(Address),

    /// An approval named the null identity as spender.
    #[error("invalid spender: {0}")]
    InvalidSpender(Address),

    /// Ownership cannot be handed to the null identity.
    #[error("invalid owner: {0}")]
    InvalidOwner(Address),

    /// The genesis configuration is unusable.
    #[error("invalid genesis configuration: {0}")]
    InvalidGenesis(String),
}

/// Convenience alias used across the crate.
pub type LedgerResult<T> = Result<T, LedgerError>;
