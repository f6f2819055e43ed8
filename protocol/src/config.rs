//! # Ledger Configuration & Constants
//!
//! Every tunable of the ledger lives here: the fee-rate ceiling, the
//! defaults a fresh deployment starts from, and the [`GenesisConfig`] that
//! describes the one-time mint and initial configuration.
//!
//! Changing a default only affects ledgers created afterwards. A running
//! ledger is reconfigured through the administrative setters, never by
//! editing these values.

use serde::{Deserialize, Serialize};

use crate::account::Address;
use crate::error::LedgerError;
use crate::Amount;

/// Version of the ledger rules, reported by tooling.
pub const PROTOCOL_VERSION: &str = env!("CARGO_PKG_VERSION");

// ---------------------------------------------------------------------------
// Fee Parameters
// ---------------------------------------------------------------------------

/// Highest accepted fee rate, in whole percent. At 100 the collector
/// receives the entire amount of a taxable transfer.
pub const MAX_FEE_RATE: u8 = 100;

/// Denominator of the fee rate. Rates are whole percentages.
pub const FEE_RATE_DENOMINATOR: Amount = 100;

/// Fee rate a new ledger starts with, in whole percent.
pub const DEFAULT_FEE_RATE: u8 = 2;

// ---------------------------------------------------------------------------
// Token Metadata Defaults
// ---------------------------------------------------------------------------

/// Display precision. Purely cosmetic: the ledger never divides by it.
pub const DEFAULT_DECIMALS: u8 = 18;

/// Default token name.
pub const DEFAULT_NAME: &str = "Tollgate Token";

/// Default ticker symbol.
pub const DEFAULT_SYMBOL: &str = "TOLL";

/// Default genesis mint: one million whole tokens at 18 decimals.
pub const DEFAULT_INITIAL_SUPPLY: Amount = 1_000_000 * 10u128.pow(DEFAULT_DECIMALS as u32);

/// Maximum symbol length accepted at genesis.
pub const MAX_SYMBOL_LENGTH: usize = 11;

// ---------------------------------------------------------------------------
// Genesis
// ---------------------------------------------------------------------------

/// Everything needed to bring a ledger into existence.
///
/// Validated once by [`GenesisConfig::validate`]; after genesis the fee rate,
/// collector and owner are mutable only through the admin surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisConfig {
    /// Human-readable token name.
    #[serde(default = "default_name")]
    pub name: String,
    /// Ticker symbol.
    #[serde(default = "default_symbol")]
    pub symbol: String,
    /// Display decimals.
    #[serde(default = "default_decimals")]
    pub decimals: u8,
    /// Amount minted to `initial_holder` at genesis.
    #[serde(default = "default_initial_supply")]
    pub initial_supply: Amount,
    /// Recipient of the genesis mint. Marked fee-exempt.
    pub initial_holder: Address,
    /// Fee collector. Marked fee-exempt.
    pub collector: Address,
    /// Administrative owner. Defaults to the initial holder when omitted.
    #[serde(default)]
    pub owner: Option<Address>,
    /// Initial fee rate, whole percent.
    #[serde(default = "default_fee_rate")]
    pub fee_rate: u8,
}

fn default_name() -> String {
    DEFAULT_NAME.to_string()
}

fn default_symbol() -> String {
    DEFAULT_SYMBOL.to_string()
}

fn default_decimals() -> u8 {
    DEFAULT_DECIMALS
}

fn default_initial_supply() -> Amount {
    DEFAULT_INITIAL_SUPPLY
}

fn default_fee_rate() -> u8 {
    DEFAULT_FEE_RATE
}

impl GenesisConfig {
    /// Default configuration for the given holder and collector.
    pub fn new(initial_holder: Address, collector: Address) -> Self {
        Self {
            name: default_name(),
            symbol: default_symbol(),
            decimals: DEFAULT_DECIMALS,
            initial_supply: DEFAULT_INITIAL_SUPPLY,
            initial_holder,
            collector,
            owner: None,
            fee_rate: DEFAULT_FEE_RATE,
        }
    }

    /// Overrides the genesis mint.
    pub fn with_initial_supply(mut self, initial_supply: Amount) -> Self {
        self.initial_supply = initial_supply;
        self
    }

    /// Overrides the initial fee rate.
    pub fn with_fee_rate(mut self, fee_rate: u8) -> Self {
        self.fee_rate = fee_rate;
        self
    }

    /// Sets an owner distinct from the initial holder.
    pub fn with_owner(mut self, owner: Address) -> Self {
        self.owner = Some(owner);
        self
    }

    /// The administrative owner after genesis.
    pub fn effective_owner(&self) -> Address {
        self.owner.unwrap_or(self.initial_holder)
    }

    /// Checks every constructor precondition.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::InvalidRate`] if `fee_rate > MAX_FEE_RATE`.
    /// - [`LedgerError::NullCollector`] if the collector is the null identity.
    /// - [`LedgerError::InvalidGenesis`] for a null holder or owner, or an
    ///   empty or oversized symbol.
    pub fn validate(&self) -> Result<(), LedgerError> {
        if self.fee_rate > MAX_FEE_RATE {
            return Err(LedgerError::InvalidRate {
                rate: self.fee_rate,
                max: MAX_FEE_RATE,
            });
        }
        if self.collector.is_zero() {
            return Err(LedgerError::NullCollector);
        }
        if self.initial_holder.is_zero() {
            return Err(LedgerError::InvalidGenesis(
                "initial holder cannot be the null address".into(),
            ));
        }
        if self.effective_owner().is_zero() {
            return Err(LedgerError::InvalidGenesis(
                "owner cannot be the null address".into(),
            ));
        }
        let symbol = self.symbol.trim();
        if symbol.is_empty() || symbol.len() > MAX_SYMBOL_LENGTH {
            return Err(LedgerError::InvalidGenesis(format!(
                "symbol must be 1..={} characters, got {:?}",
                MAX_SYMBOL_LENGTH, self.symbol
            )));
        }
        Ok(())
    }
}
